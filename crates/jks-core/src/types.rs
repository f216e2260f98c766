//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A row identifier was zero or negative.
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: i64 },

    /// An interval ends before it starts.
    #[error("{what} {id} ends before it starts")]
    EndBeforeStart { what: &'static str, id: i64 },

    /// The lower duration bound of a plan exceeds its upper bound.
    #[error("plan {id}: duration_ge ({ge}s) exceeds duration_lt ({lt}s)")]
    DurationBoundsInverted { id: i64, ge: i64, lt: i64 },

    /// An entry refers to a task that is not present.
    #[error("{what} {id} refers to unknown task {task_id}")]
    UnknownTask {
        what: &'static str,
        id: i64,
        task_id: i64,
    },
}

/// Generates a validated row ID newtype with common trait implementations.
macro_rules! define_row_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Creates a new ID after validation.
            pub const fn new(id: i64) -> Result<Self, ValidationError> {
                if id <= 0 {
                    return Err(ValidationError::NotPositive {
                        field: $field_name,
                        value: id,
                    });
                }
                Ok(Self(id))
            }

            /// Returns the raw row number.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = ValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_row_id!(
    /// A validated task identifier.
    TaskId, "task ID"
);

define_row_id!(
    /// A validated activity identifier.
    ActivityId, "activity ID"
);

define_row_id!(
    /// A validated plan identifier.
    ///
    /// Plans and activities are numbered independently, so a plan and an
    /// activity may share the same raw number.
    PlanId, "plan ID"
);
