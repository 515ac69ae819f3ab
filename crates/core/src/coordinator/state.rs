use std::sync::Arc;

use crate::{
    location::{Authorization, Tracking},
    map::{Coordinate, Marker, Route, Viewport},
};

/// Everything the map screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSnapshot {
    pub viewport: Viewport,
    pub marker: Option<Marker>,
    pub route: Option<Arc<Route>>,
    pub user_location: Option<Coordinate>,
    /// Last status seen from the location service
    pub authorization: Option<Authorization>,
    pub tracking: Tracking,
    /// Whether location fixes move the viewport
    pub follows_user: bool,
}

impl MapSnapshot {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            marker: None,
            route: None,
            user_location: None,
            authorization: None,
            tracking: Tracking::Inactive,
            follows_user: true,
        }
    }

    /// Straight-line meters from the user to the marker
    pub fn distance_to_marker(&self) -> Option<f64> {
        let user = self.user_location?;
        let marker = self.marker.as_ref()?;
        Some(user.distance_to(marker.coordinate))
    }
}
