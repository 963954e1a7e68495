//! The `references` block that accompanies most REST responses.
//!
//! ## Failure contract
//!
//! Each of the five lists is decoded independently. When one fails, its slot
//! is filled with an empty `Vec`, the failure is logged, and decoding moves
//! on to the next list. [`References::decode_partial`] hands back everything
//! that decoded together with every error; [`References::decode`] turns any
//! error into a failed decode, reporting the first failing list in key
//! order. A half-decoded aggregate is never returned as a success.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::decode::{decode_elements, DecodeError, EntityKind};
use crate::identifiers::*;
use crate::models::{
    agency::Agency, route::Route, situation::Situation, stop::Stop, trip::Trip,
};

/// One decoded `references` block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct References {
    pub agencies: Vec<Agency>,
    pub routes: Vec<Route>,
    pub situations: Vec<Situation>,
    pub stops: Vec<Stop>,
    pub trips: Vec<Trip>,
}

/// Result of a lenient decode: whatever decoded, plus what did not.
#[derive(Debug, Default)]
pub struct PartialReferences {
    pub references: References,
    pub errors: Vec<DecodeError>,
}

impl PartialReferences {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fails with the first recorded error, if any.
    pub fn into_result(self) -> Result<References, DecodeError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.references),
        }
    }
}

impl References {
    /// Strict decode: any failing list fails the whole block.
    pub fn decode(value: &Value) -> Result<Self, DecodeError> {
        Self::decode_partial(value).into_result()
    }

    /// Decode every list that can be decoded and report the rest.
    pub fn decode_partial(value: &Value) -> PartialReferences {
        let Some(object) = value.as_object() else {
            warn!("error decoding references: not an object");
            return PartialReferences {
                references: Self::default(),
                errors: vec![DecodeError::NotAnObject],
            };
        };

        let mut errors = Vec::new();
        let references = Self {
            agencies: settle(EntityKind::Agencies, object, &mut errors),
            routes: settle(EntityKind::Routes, object, &mut errors),
            situations: settle(EntityKind::Situations, object, &mut errors),
            stops: settle(EntityKind::Stops, object, &mut errors),
            trips: settle(EntityKind::Trips, object, &mut errors),
        };

        PartialReferences { references, errors }
    }

    pub fn is_empty(&self) -> bool {
        self.agencies.is_empty()
            && self.routes.is_empty()
            && self.situations.is_empty()
            && self.stops.is_empty()
            && self.trips.is_empty()
    }

    // ---- Lookups ----

    pub fn agency(&self, id: &AgencyIdentifier) -> Option<&Agency> {
        self.agencies.iter().find(|a| &a.id == id)
    }

    pub fn route(&self, id: &RouteIdentifier) -> Option<&Route> {
        self.routes.iter().find(|r| &r.id == id)
    }

    pub fn situation(&self, id: &SituationIdentifier) -> Option<&Situation> {
        self.situations.iter().find(|s| &s.id == id)
    }

    pub fn stop(&self, id: &StopIdentifier) -> Option<&Stop> {
        self.stops.iter().find(|s| &s.id == id)
    }

    pub fn trip(&self, id: &TripIdentifier) -> Option<&Trip> {
        self.trips.iter().find(|t| &t.id == id)
    }
}

fn decode_kind<T: DeserializeOwned>(
    kind: EntityKind,
    object: &Map<String, Value>,
) -> Result<Vec<T>, DecodeError> {
    match object.get(kind.key()) {
        None | Some(Value::Null) => Err(DecodeError::MissingKey { kind }),
        Some(Value::Array(items)) => decode_elements(items)
            .map_err(|(index, source)| DecodeError::Entity { kind, index, source }),
        Some(_) => Err(DecodeError::NotAnArray { kind }),
    }
}

// Empty placeholder on failure; the error itself is kept for the caller.
fn settle<T: DeserializeOwned>(
    kind: EntityKind,
    object: &Map<String, Value>,
    errors: &mut Vec<DecodeError>,
) -> Vec<T> {
    decode_kind(kind, object).unwrap_or_else(|error| {
        warn!(kind = kind.key(), %error, "error decoding references");
        errors.push(error);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn agency(id: &str) -> Value {
        json!({
            "id": id,
            "name": "Metro Transit",
            "url": "https://kingcounty.gov/metro",
            "timezone": "America/Los_Angeles",
            "lang": "EN",
            "phone": "206-553-3000",
            "privateService": false
        })
    }

    fn stop(id: &str) -> Value {
        json!({
            "id": id,
            "name": "NW Market St & 15th Ave NW",
            "lat": 47.663593,
            "lon": -122.36335,
            "code": "75403",
            "direction": "SW",
            "locationType": 0,
            "routeIds": ["1_100045"]
        })
    }

    fn route(id: &str) -> Value {
        json!({"id": id, "agencyId": "1", "shortName": "44", "type": 3})
    }

    fn trip(id: &str) -> Value {
        json!({"id": id, "routeId": "1_100224", "serviceId": "1_WEEK", "directionId": "0"})
    }

    fn situation(id: &str) -> Value {
        json!({"id": id, "creationTime": 1539781200000_i64, "severity": "normal"})
    }

    fn full() -> Value {
        json!({
            "agencies": [agency("1"), agency("40")],
            "routes": [route("1_100224"), route("1_100045")],
            "situations": [situation("1_1")],
            "stops": [stop("1_75403"), stop("1_75404"), stop("1_75405")],
            "trips": [trip("1_604318235")]
        })
    }

    #[test]
    fn test_decode_preserves_order() {
        let references = References::decode(&full()).unwrap();

        let agency_ids: Vec<_> = references.agencies.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(agency_ids, ["1", "40"]);

        let stop_ids: Vec<_> = references.stops.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(stop_ids, ["1_75403", "1_75404", "1_75405"]);

        assert_eq!(references.routes.len(), 2);
        assert_eq!(references.situations.len(), 1);
        assert_eq!(references.trips.len(), 1);
    }

    #[test]
    fn test_decode_mixed_empty_lists() {
        let value = json!({
            "agencies": [agency("1")],
            "routes": [],
            "situations": [],
            "stops": [stop("S1")],
            "trips": []
        });

        let references = References::decode(&value).unwrap();
        assert_eq!(references.agencies.len(), 1);
        assert_eq!(references.stops.len(), 1);
        assert!(references.routes.is_empty());
        assert!(references.situations.is_empty());
        assert!(references.trips.is_empty());
    }

    #[test]
    fn test_malformed_agency_fails_decode() {
        let mut value = full();
        value["agencies"] = json!([{"bad": true}]);

        let error = References::decode(&value).unwrap_err();
        assert_eq!(error.kind(), Some(EntityKind::Agencies));
        assert!(matches!(error, DecodeError::Entity { index: 0, .. }));
    }

    #[test]
    fn test_single_bad_element_names_its_index() {
        let mut value = full();
        value["stops"][1]["lat"] = json!("not a number");

        let error = References::decode(&value).unwrap_err();
        match error {
            DecodeError::Entity { kind, index, .. } => {
                assert_eq!(kind, EntityKind::Stops);
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_partial_decode_keeps_other_kinds() {
        let mut value = full();
        value["routes"] = json!([{"id": "R1"}]);
        value["trips"] = json!("nope");

        let partial = References::decode_partial(&value);
        assert!(!partial.is_complete());
        assert_eq!(partial.errors.len(), 2);
        assert_eq!(partial.errors[0].kind(), Some(EntityKind::Routes));
        assert!(matches!(
            partial.errors[1],
            DecodeError::NotAnArray { kind: EntityKind::Trips }
        ));

        // Failed kinds are empty placeholders; the others are intact.
        assert!(partial.references.routes.is_empty());
        assert!(partial.references.trips.is_empty());
        assert_eq!(partial.references.agencies.len(), 2);
        assert_eq!(partial.references.stops.len(), 3);

        // The strict contract reports the first failure in key order.
        let error = partial.into_result().unwrap_err();
        assert_eq!(error.kind(), Some(EntityKind::Routes));
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let mut value = full();
        value.as_object_mut().unwrap().remove("situations");

        let error = References::decode(&value).unwrap_err();
        assert!(matches!(
            error,
            DecodeError::MissingKey { kind: EntityKind::Situations }
        ));

        let mut value = full();
        value["trips"] = Value::Null;
        let error = References::decode(&value).unwrap_err();
        assert_eq!(error.kind(), Some(EntityKind::Trips));
    }

    #[test]
    fn test_not_an_object() {
        let partial = References::decode_partial(&json!([1, 2, 3]));
        assert_eq!(partial.references, References::default());
        assert!(matches!(partial.errors.as_slice(), [DecodeError::NotAnObject]));
    }

    #[test]
    fn test_decode_is_idempotent() {
        let value = full();
        let first = References::decode(&value).unwrap();
        let second = References::decode(&value).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_lookups() {
        let references = References::decode(&full()).unwrap();

        assert!(references.agency(&AgencyIdentifier::new("40")).is_some());
        assert!(references.agency(&AgencyIdentifier::new("99")).is_none());
        assert!(references.stop(&StopIdentifier::new("1_75404")).is_some());
        assert!(references.route(&RouteIdentifier::new("1_100045")).is_some());
        assert!(references.trip(&TripIdentifier::new("1_604318235")).is_some());
        assert!(references.situation(&SituationIdentifier::new("1_1")).is_some());
        assert!(!references.is_empty());
        assert!(References::default().is_empty());
    }
}
