//! Entity schemas with validation at construction
//!
//! Request bodies deserialize into `*Create` types, which are turned into
//! validated `New*` values before any storage call. Invalid input returns
//! ValidationError, not panic.

pub mod blank;
pub mod booking;
pub mod guest;
pub mod maintenance;
pub mod payment;
pub mod room;
pub mod status;
pub mod validation;

pub use booking::{Booking, BookingCreate, NewBooking};
pub use guest::{Guest, GuestCreate, NewGuest};
pub use maintenance::{
    MaintenanceRequest, MaintenanceRequestCreate, MaintenanceUpdate, NewMaintenanceRequest,
    StatusChange,
};
pub use payment::{NewPayment, Payment, PaymentCreate};
pub use room::{NewRoom, Room, RoomCreate};
pub use status::{BookingStatus, MaintenanceStatus, PaymentMethod, RoomStatus};
pub use validation::ValidationError;
