//! Closed status and method enums
//!
//! Each enum is stored as TEXT (guarded by a CHECK constraint) and crosses
//! the JSON boundary using the same labels, e.g. `"Bank Transfer"`.
//! Unknown labels are rejected before they reach storage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValidationError;

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal, default = $default:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Storage and wire label.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| ValidationError::InvalidVariant {
                        field: $field,
                        value: s.to_owned(),
                    })
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }
    };
}

text_enum! {
    /// Occupancy state of a room
    RoomStatus, field = "occupancy_status", default = Available {
        Available => "Available",
        Occupied => "Occupied",
        Maintenance => "Maintenance",
    }
}

text_enum! {
    /// Lifecycle state of a stay
    BookingStatus, field = "booking_status", default = Active {
        Active => "Active",
        Completed => "Completed",
        Cancelled => "Cancelled",
    }
}

text_enum! {
    PaymentMethod, field = "payment_method", default = Cash {
        Cash => "Cash",
        Upi => "UPI",
        Card => "Card",
        BankTransfer => "Bank Transfer",
    }
}

text_enum! {
    /// Progress of a maintenance request
    MaintenanceStatus, field = "status", default = Pending {
        Pending => "Pending",
        InProgress => "In Progress",
        Resolved => "Resolved",
    }
}
