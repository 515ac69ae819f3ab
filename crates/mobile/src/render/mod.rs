//! Route overlay rendering.
//!
//! The native map draws the route itself; this module hands it a GeoJSON
//! source and the MapLibre layers that style it.

use std::sync::RwLock;

use geojson::{Feature, GeoJson, Geometry, JsonObject, Value};
use waypoint_core::map::{Marker, Route};

use crate::render::style::RouteStyle;

pub mod style;

pub const ROUTE_SOURCE_ID: &str = "waypoint-route";

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct OverlayPayload {
    pub source_id: String,
    pub geojson: String,
    /// JSON array of layer definitions, bottom-most first
    pub layers_json: String,
}

pub struct RouteOverlay {
    style: RwLock<RouteStyle>,
}

impl RouteOverlay {
    pub fn new(style: RouteStyle) -> Self {
        Self {
            style: RwLock::new(style),
        }
    }

    pub fn set_style(&self, style: RouteStyle) {
        match self.style.write() {
            Ok(mut guard) => *guard = style,
            Err(poisoned) => *poisoned.into_inner() = style,
        }
    }

    pub fn render(&self, route: &Route) -> OverlayPayload {
        let layers = match self.style.read() {
            Ok(style) => style.layers(ROUTE_SOURCE_ID),
            Err(poisoned) => poisoned.into_inner().layers(ROUTE_SOURCE_ID),
        };

        OverlayPayload {
            source_id: ROUTE_SOURCE_ID.to_owned(),
            geojson: GeoJson::from(route.to_feature_collection()).to_string(),
            layers_json: serde_json::Value::Array(layers).to_string(),
        }
    }
}

pub fn marker_geojson(marker: &Marker) -> String {
    let mut properties = JsonObject::new();
    properties.insert("label".to_owned(), marker.label.as_ref().into());

    GeoJson::from(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![
            marker.coordinate.longitude,
            marker.coordinate.latitude,
        ]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
    .to_string()
}
