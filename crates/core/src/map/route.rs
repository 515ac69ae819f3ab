//! Driving routes as returned by a routing service.

use std::sync::Arc;

use geo::{BoundingRect, LineString, Rect};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};

use crate::map::Coordinate;

/// One maneuver along a route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    /// Human readable maneuver, e.g. "turn left"
    pub instruction: Arc<str>,
    pub road_name: Option<Arc<str>>,
    pub distance_m: f64,
    pub duration_s: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub geometry: LineString,
    pub distance_m: f64,
    pub expected_travel_time_s: f64,
    pub steps: Vec<RouteStep>,
}

impl Route {
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.geometry.coords().map(|coord| Coordinate::from(*coord))
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.geometry.bounding_rect()
    }

    /// GeoJSON source for the route overlay: a single LineString feature whose
    /// properties carry the route totals.
    pub fn to_feature_collection(&self) -> FeatureCollection {
        let positions = self
            .geometry
            .coords()
            .map(|coord| vec![coord.x, coord.y])
            .collect();

        let mut properties = JsonObject::new();
        properties.insert("distance_m".to_owned(), self.distance_m.into());
        properties.insert(
            "expected_travel_time_s".to_owned(),
            self.expected_travel_time_s.into(),
        );
        properties.insert("steps".to_owned(), self.steps.len().into());

        FeatureCollection {
            bbox: None,
            features: vec![Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::LineString(positions))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }],
            foreign_members: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use geo::line_string;

    use super::*;

    fn sample_route() -> Route {
        Route {
            geometry: line_string![
                (x: -73.9857, y: 40.7484),
                (x: -73.9851, y: 40.7527),
                (x: -73.9772, y: 40.7527)
            ],
            distance_m: 1_350.0,
            expected_travel_time_s: 240.0,
            steps: vec![RouteStep {
                instruction: "depart".into(),
                road_name: Some("5th Avenue".into()),
                distance_m: 480.0,
                duration_s: 90.0,
            }],
        }
    }

    #[test]
    fn test_geojson_uses_lon_lat_order() {
        let collection = sample_route().to_feature_collection();
        let feature = &collection.features[0];

        let Some(Geometry {
            value: Value::LineString(positions),
            ..
        }) = &feature.geometry
        else {
            panic!("expected a LineString geometry");
        };

        assert_eq!(positions.len(), 3);
        assert_eq!(positions[0], vec![-73.9857, 40.7484]);

        let properties = feature.properties.as_ref().unwrap();
        assert_eq!(properties["distance_m"], 1_350.0);
        assert_eq!(properties["steps"], 1);
    }

    #[test]
    fn test_bounds() {
        let bounds = sample_route().bounds().unwrap();

        assert_eq!(bounds.min().x, -73.9857);
        assert_eq!(bounds.max().y, 40.7527);
    }

    #[test]
    fn test_coordinates() {
        let first = sample_route().coordinates().next().unwrap();

        assert_eq!(first, Coordinate::new(40.7484, -73.9857));
    }
}
