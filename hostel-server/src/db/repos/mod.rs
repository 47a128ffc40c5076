//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the pool; one repository per entity
//! - Relies on unique indexes for duplicates (no check-then-insert)
//! - Uses transactions for multi-statement operations

pub mod bookings;
pub mod guests;
pub mod maintenance;
pub mod payments;
pub mod rooms;

pub use bookings::BookingRepo;
pub use guests::GuestRepo;
pub use maintenance::MaintenanceRepo;
pub use payments::PaymentRepo;
pub use rooms::RoomRepo;
