//! Numeric store identities for directory records.
//!
//! These are the internal keys assigned by the record store. Students also
//! carry a human-facing public identifier; see [`crate::domain::StudentPublicId`].

use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw store key.
            #[must_use]
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            /// Raw store key.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Store identity of a course.
    CourseId
);
record_id!(
    /// Store identity of a student (distinct from the public `S-001` form).
    StudentId
);
record_id!(
    /// Store identity of a lecturer account.
    LecturerId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialise_as_bare_numbers() {
        let json = serde_json::to_string(&CourseId::new(7)).expect("serialise id");
        assert_eq!(json, "7");
        let parsed: StudentId = serde_json::from_str("12").expect("parse id");
        assert_eq!(parsed.get(), 12);
    }
}
