use geo::{coord, Point, Rect};
use serde::Deserialize;

use crate::identifiers::AgencyIdentifier;
use crate::models::agency::Agency;
use crate::models::references::References;

/// An agency's service area: a center point and the lat/lon spans around it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyWithCoverage {
    pub agency_id: AgencyIdentifier,
    pub lat: f64,
    pub lon: f64,
    pub lat_span: f64,
    pub lon_span: f64,
}

impl AgencyWithCoverage {
    pub fn center(&self) -> Point {
        Point::new(self.lon, self.lat)
    }

    /// Bounding box of the service area.
    pub fn coverage(&self) -> Rect {
        span_rect(self.lat, self.lon, self.lat_span, self.lon_span)
    }

    /// Looks the agency up in the references that came with the response.
    pub fn agency<'a>(&self, references: &'a References) -> Option<&'a Agency> {
        references.agency(&self.agency_id)
    }
}

/// Rect centered on (lat, lon) extending half of each span in either direction.
pub(crate) fn span_rect(lat: f64, lon: f64, lat_span: f64, lon_span: f64) -> Rect {
    let half_lat = lat_span.abs() / 2.0;
    let half_lon = lon_span.abs() / 2.0;
    Rect::new(
        coord! { x: lon - half_lon, y: lat - half_lat },
        coord! { x: lon + half_lon, y: lat + half_lat },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_coverage_rect() {
        let coverage: AgencyWithCoverage = serde_json::from_str(
            r#"{"agencyId":"1","lat":47.53,"latSpan":0.7,"lon":-122.11,"lonSpan":0.8}"#,
        )
        .unwrap();

        let rect = coverage.coverage();
        assert_relative_eq!(rect.min().y, 47.18, epsilon = 1e-9);
        assert_relative_eq!(rect.max().y, 47.88, epsilon = 1e-9);
        assert_relative_eq!(rect.min().x, -122.51, epsilon = 1e-9);
        assert_relative_eq!(rect.max().x, -121.71, epsilon = 1e-9);
        assert_eq!(coverage.center(), Point::new(-122.11, 47.53));
    }

    #[test]
    fn test_coverage_requires_spans() {
        let result = serde_json::from_str::<AgencyWithCoverage>(
            r#"{"agencyId":"1","lat":47.53,"lon":-122.11}"#,
        );
        assert!(result.is_err());
    }
}
