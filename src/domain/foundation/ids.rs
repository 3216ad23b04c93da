//! Strongly-typed identifier value objects.
//!
//! All identifiers wrap the serial primary keys assigned by the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! serial_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw key assigned by the store.
            pub fn from_i64(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw key.
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

serial_id!(
    /// Unique identifier for a registered user.
    UserId
);

serial_id!(
    /// Unique identifier for a farm.
    FarmId
);

serial_id!(
    /// Unique identifier for a crop.
    CropId
);

serial_id!(
    /// Identifier of a logged exchange. Monotonically increasing.
    ConversationId
);
