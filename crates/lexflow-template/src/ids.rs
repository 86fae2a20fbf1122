//! Identifiers for template items
//!
//! Every item the wizard creates gets a ULID so ids sort by creation time
//! and survive a JSON round trip through the creation service.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ulid::Ulid;

use crate::error::ModelError;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Ulid);

        impl $name {
            /// Generate a new identifier
            #[inline]
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ulid::from_string(s.trim())
                    .map(Self)
                    .map_err(|_| ModelError::InvalidId {
                        kind: $label,
                        value: s.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Identifier of a [`Stage`](crate::Stage)
    StageId,
    "stage"
);
define_id!(
    /// Identifier of a [`Task`](crate::Task)
    TaskId,
    "task"
);
define_id!(
    /// Identifier of an [`Expense`](crate::Expense)
    ExpenseId,
    "expense"
);
define_id!(
    /// Identifier of a [`DocumentRequirement`](crate::DocumentRequirement)
    DocumentId,
    "document"
);
define_id!(
    /// Identifier of an [`EmailTemplate`](crate::EmailTemplate)
    EmailTemplateId,
    "email template"
);
