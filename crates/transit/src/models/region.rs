use std::sync::Arc;

use geo::{Contains, Point, Rect};
use serde::Deserialize;

use crate::identifiers::RegionIdentifier;
use crate::models::coverage::span_rect;
use crate::models::serde_helpers::empty_string_as_none;

/// One rectangle of a region's service area.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionBound {
    pub lat: f64,
    pub lon: f64,
    pub lat_span: f64,
    pub lon_span: f64,
}

impl RegionBound {
    pub fn rect(&self) -> Rect {
        span_rect(self.lat, self.lon, self.lat_span, self.lon_span)
    }
}

/// A deployment of the OBA server covering a geographic area.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: RegionIdentifier,
    pub region_name: Arc<str>,

    /// Root URL of the REST API, e.g. "https://api.pugetsound.onebusaway.org/"
    pub oba_base_url: Arc<str>,

    #[serde(default = "default_true")]
    pub active: bool,

    #[serde(default)]
    pub bounds: Vec<RegionBound>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub siri_base_url: Option<Arc<str>>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub contact_email: Option<Arc<str>>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub twitter_url: Option<Arc<str>>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub language: Option<Arc<str>>,

    #[serde(default)]
    pub supports_oba_discovery_apis: bool,
    #[serde(default)]
    pub supports_oba_realtime_apis: bool,
    #[serde(default)]
    pub supports_siri_realtime_apis: bool,
    #[serde(default)]
    pub experimental: bool,
}

fn default_true() -> bool {
    true
}

impl Region {
    pub fn contains(&self, point: Point) -> bool {
        self.bounds.iter().any(|b| b.rect().contains(&point))
    }

    /// Center of the bounding box enclosing every bound.
    pub fn center(&self) -> Option<Point> {
        let mut rects = self.bounds.iter().map(RegionBound::rect);
        let first = rects.next()?;
        let (min, max) = rects.fold((first.min(), first.max()), |(min, max), r| {
            (
                geo::coord! { x: min.x.min(r.min().x), y: min.y.min(r.min().y) },
                geo::coord! { x: max.x.max(r.max().x), y: max.y.max(r.max().y) },
            )
        });
        Some(Point::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0))
    }
}
