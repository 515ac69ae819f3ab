//! Plain records handed across the FFI boundary.

use waypoint_core::{MapSnapshot, map as model};

use crate::state::location::LocationAuthorization;

#[derive(Debug, Clone, Copy, PartialEq, uniffi::Record)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<model::Coordinate> for Coordinate {
    fn from(coordinate: model::Coordinate) -> Self {
        Self {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        }
    }
}

impl From<Coordinate> for model::Coordinate {
    fn from(coordinate: Coordinate) -> Self {
        model::Coordinate::new(coordinate.latitude, coordinate.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct Viewport {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct Marker {
    pub label: String,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct RouteStep {
    pub instruction: String,
    pub road_name: Option<String>,
    pub distance_m: f64,
    pub duration_s: f64,
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct Route {
    pub coordinates: Vec<Coordinate>,
    pub distance_m: f64,
    pub expected_travel_time_s: f64,
    pub steps: Vec<RouteStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum TrackingState {
    Inactive,
    AwaitingAuthorization,
    Active,
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct Snapshot {
    pub viewport: Viewport,
    pub marker: Option<Marker>,
    pub route: Option<Route>,
    pub user_location: Option<Coordinate>,
    pub authorization: Option<LocationAuthorization>,
    pub tracking: TrackingState,
    pub follows_user: bool,
    pub distance_to_marker_m: Option<f64>,
}

impl From<&model::Viewport> for Viewport {
    fn from(viewport: &model::Viewport) -> Self {
        Self {
            center: viewport.center.into(),
            latitude_delta: viewport.span.latitude_delta(),
            longitude_delta: viewport.span.longitude_delta(),
        }
    }
}

impl From<&model::Marker> for Marker {
    fn from(marker: &model::Marker) -> Self {
        Self {
            label: marker.label.to_string(),
            coordinate: marker.coordinate.into(),
        }
    }
}

impl From<&model::Route> for Route {
    fn from(route: &model::Route) -> Self {
        Self {
            coordinates: route.coordinates().map(Coordinate::from).collect(),
            distance_m: route.distance_m,
            expected_travel_time_s: route.expected_travel_time_s,
            steps: route
                .steps
                .iter()
                .map(|step| RouteStep {
                    instruction: step.instruction.to_string(),
                    road_name: step.road_name.as_deref().map(str::to_owned),
                    distance_m: step.distance_m,
                    duration_s: step.duration_s,
                })
                .collect(),
        }
    }
}

impl From<waypoint_core::location::Tracking> for TrackingState {
    fn from(tracking: waypoint_core::location::Tracking) -> Self {
        use waypoint_core::location::Tracking;

        match tracking {
            Tracking::Inactive => TrackingState::Inactive,
            Tracking::AwaitingAuthorization => TrackingState::AwaitingAuthorization,
            Tracking::Active => TrackingState::Active,
        }
    }
}

impl From<&MapSnapshot> for Snapshot {
    fn from(state: &MapSnapshot) -> Self {
        Self {
            viewport: Viewport::from(&state.viewport),
            marker: state.marker.as_ref().map(Marker::from),
            route: state.route.as_deref().map(Route::from),
            user_location: state.user_location.map(Coordinate::from),
            authorization: state.authorization.map(LocationAuthorization::from),
            tracking: state.tracking.into(),
            follows_user: state.follows_user,
            distance_to_marker_m: state.distance_to_marker(),
        }
    }
}
