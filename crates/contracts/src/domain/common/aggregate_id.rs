use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Trait for aggregate primary key types.
///
/// The server uses integer primary keys; route parameters arrive as strings
/// and go through `from_string` before anything is fetched.
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Convert the id to its string form (used in URLs)
    fn as_string(&self) -> String;

    /// Parse the id from a string
    fn from_string(s: &str) -> Result<Self, String>;

    /// Raw integer value sent to the API
    fn value(&self) -> i64;
}

/// Declares an integer id newtype for an aggregate.
#[macro_export]
macro_rules! integer_aggregate_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $crate::domain::common::AggregateId for $name {
            fn as_string(&self) -> String {
                self.0.to_string()
            }

            fn from_string(s: &str) -> Result<Self, String> {
                s.trim()
                    .parse::<i64>()
                    .map($name)
                    .map_err(|e| format!("Invalid {}: {}", stringify!($name), e))
            }

            fn value(&self) -> i64 {
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

#[cfg(test)]
mod tests {
    use super::*;

    integer_aggregate_id!(TestId);

    #[test]
    fn test_parse_numeric_id() {
        assert_eq!(TestId::from_string("42"), Ok(TestId(42)));
        assert_eq!(TestId::from_string(" 7 "), Ok(TestId(7)));
    }

    #[test]
    fn test_reject_non_numeric_id() {
        assert!(TestId::from_string("abc").is_err());
        assert!(TestId::from_string("").is_err());
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&TestId(12)).unwrap();
        assert_eq!(json, "12");
        assert_eq!(TestId(12).as_string(), "12");
    }
}
