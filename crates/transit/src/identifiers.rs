//! Type-safe, efficient identifiers for OBA entities.
//!
//! String identifiers use Arc<str> for cheap cloning and minimal memory overhead.
//! They deserialize straight from the JSON strings the REST API emits.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok(Self::new(s))
            }
        }
    };
}

impl_identifier!(AgencyIdentifier);
impl_identifier!(RouteIdentifier);
impl_identifier!(StopIdentifier);
impl_identifier!(TripIdentifier);
impl_identifier!(SituationIdentifier);
impl_identifier!(ServiceIdentifier);
impl_identifier!(ShapeIdentifier);
impl_identifier!(BlockIdentifier);

/// Regions are numbered in the regions document rather than named.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionIdentifier(pub u32);

impl fmt::Display for RegionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_equality() {
        let id1 = StopIdentifier::new("1_75403");
        let id2 = StopIdentifier::new("1_75403");
        let id3 = id1.clone();

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
        assert!(Arc::ptr_eq(&id1.0, &id3.0)); // Clone shares Arc
    }

    #[test]
    fn test_identifier_hash() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(AgencyIdentifier::new("1"), 42);

        assert_eq!(map.get(&AgencyIdentifier::new("1")), Some(&42));
    }

    #[test]
    fn test_identifier_display() {
        let id = RouteIdentifier::new("1_100224");
        assert_eq!(format!("{}", id), "1_100224");
        assert_eq!(RegionIdentifier(1).to_string(), "1");
    }

    #[test]
    fn test_identifier_from_json() {
        let id: TripIdentifier = serde_json::from_str("\"1_604318235\"").unwrap();
        assert_eq!(id.as_str(), "1_604318235");

        let region: RegionIdentifier = serde_json::from_str("12").unwrap();
        assert_eq!(region, RegionIdentifier(12));

        assert!(serde_json::from_str::<StopIdentifier>("17").is_err());
    }
}
