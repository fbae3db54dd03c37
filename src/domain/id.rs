//! Domain ID Types with NewType Pattern
//!
//! Type-safe wrappers around the numeric row identifiers the store generates,
//! preventing ID mixing errors at compile time. Each ID type implements
//! `Display`, `FromStr`, `Serialize`, and `Deserialize`, and binds directly
//! as an SQLite integer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate NewType ID wrappers with all required traits
macro_rules! domain_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap an existing row identifier
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Get the inner numeric value
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

domain_id! {
    /// Identifier of a client record
    ClientId
}

domain_id! {
    /// Identifier of an employee record
    EmployeeId
}

domain_id! {
    /// Identifier of a role record
    RoleId
}
