//! The map screen object the native UI binds to.
//!
//! Operational failures are logged and dropped here; the screen only ever
//! reflects state that was successfully applied.

use std::sync::Arc;

use waypoint_core::{Error, MapCoordinator};

use crate::{
    render::{OverlayPayload, RouteOverlay, style::RouteStyle},
    state::{
        location::LocationAuthorization,
        observer::{MapObserver, spawn_forwarder},
        view::MapError,
    },
};

pub mod records;

use records::{Coordinate, Snapshot};

#[derive(uniffi::Object)]
pub struct MapState {
    coordinator: Arc<MapCoordinator>,
    overlay: RouteOverlay,
}

impl MapState {
    pub(crate) fn new(coordinator: MapCoordinator) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
            overlay: RouteOverlay::new(RouteStyle::default()),
        }
    }
}

fn discard<T>(operation: &'static str, result: waypoint_core::Result<T>) {
    match result {
        Ok(_) => {}
        Err(Error::Superseded) => tracing::debug!(operation, "superseded by a newer request"),
        Err(error) => tracing::warn!(operation, %error, "dropped failed request"),
    }
}

#[uniffi::export(async_runtime = "tokio")]
impl MapState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.coordinator.snapshot())
    }

    pub fn observe(&self, observer: Arc<dyn MapObserver>) -> Result<(), MapError> {
        spawn_forwarder(self.coordinator.subscribe(), observer)
            .map_err(|e| MapError::Observer(format!("{e:#}")))
    }

    // Location delegate

    pub fn check_location_authorization(&self) {
        self.coordinator.check_location_authorization();
    }

    pub fn authorization_changed(&self, status: LocationAuthorization) {
        self.coordinator.authorization_changed(status.into());
    }

    pub fn location_updated(&self, coordinate: Coordinate) {
        self.coordinator.location_updated(coordinate.into());
    }

    pub fn location_failed(&self, reason: String) {
        self.coordinator.location_failed(&reason);
    }

    pub fn stop_location_updates(&self) {
        self.coordinator.stop_location_updates();
    }

    // Controls

    pub fn zoom_in(&self) {
        self.coordinator.zoom_in();
    }

    pub fn zoom_out(&self) {
        self.coordinator.zoom_out();
    }

    pub fn center_on_user(&self) -> bool {
        self.coordinator.center_on_user()
    }

    pub async fn search(&self, city: String, address: String) {
        discard("search", self.coordinator.search(&city, &address).await);
    }

    pub async fn mark_on_map(&self, city: String, address: String) {
        discard(
            "mark_on_map",
            self.coordinator.mark_on_map(&city, &address).await,
        );
    }

    pub async fn request_route(&self) {
        discard("request_route", self.coordinator.request_route().await);
    }

    pub fn clear_route(&self) {
        self.coordinator.clear_route();
    }

    // Overlay

    /// GeoJSON source and MapLibre layers for the current route, if any.
    pub fn route_overlay(&self) -> Option<OverlayPayload> {
        let state = self.coordinator.snapshot();
        state.route.as_deref().map(|route| self.overlay.render(route))
    }

    /// GeoJSON point for the current marker, if any.
    pub fn marker_geojson(&self) -> Option<String> {
        let state = self.coordinator.snapshot();
        state.marker.as_ref().map(crate::render::marker_geojson)
    }

    pub fn set_route_style(&self, color_hex: String, width_px: f32) -> Result<(), MapError> {
        let style = RouteStyle::from_hex(&color_hex, width_px)
            .map_err(|e| MapError::Style(e.to_string()))?;
        self.overlay.set_style(style);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Mutex, mpsc},
        time::Duration,
    };

    use waypoint_core::Config;

    use super::*;
    use crate::state::{location::LocationBridge, location::PlatformLocation};

    struct StubLocation {
        status: LocationAuthorization,
        calls: Mutex<Vec<&'static str>>,
    }

    impl LocationBridge for StubLocation {
        fn authorization(&self) -> LocationAuthorization {
            self.status
        }

        fn request_authorization(&self) {
            self.calls.lock().unwrap().push("request");
        }

        fn start_updates(&self) {
            self.calls.lock().unwrap().push("start");
        }

        fn stop_updates(&self) {
            self.calls.lock().unwrap().push("stop");
        }
    }

    struct ChannelObserver(Mutex<mpsc::Sender<Snapshot>>);

    impl MapObserver for ChannelObserver {
        fn on_state_changed(&self, snapshot: Snapshot) {
            let _ = self.0.lock().unwrap().send(snapshot);
        }
    }

    fn map_state(status: LocationAuthorization) -> (MapState, Arc<StubLocation>) {
        let bridge = Arc::new(StubLocation {
            status,
            calls: Mutex::new(Vec::new()),
        });
        let location = Arc::new(PlatformLocation(bridge.clone()));
        let coordinator =
            MapCoordinator::with_default_services(&Config::default(), location).unwrap();
        (MapState::new(coordinator), bridge)
    }

    #[test]
    fn test_location_flow_through_bridge() {
        let (state, bridge) = map_state(LocationAuthorization::NotDetermined);

        state.check_location_authorization();
        assert_eq!(*bridge.calls.lock().unwrap(), ["request"]);

        state.authorization_changed(LocationAuthorization::Granted);
        state.location_updated(Coordinate {
            latitude: 51.5007,
            longitude: -0.1246,
        });

        let snapshot = state.snapshot();
        assert_eq!(*bridge.calls.lock().unwrap(), ["request", "start"]);
        assert_eq!(snapshot.tracking, records::TrackingState::Active);
        assert_eq!(snapshot.viewport.center.latitude, 51.5007);
    }

    #[test]
    fn test_zoom_controls() {
        let (state, _) = map_state(LocationAuthorization::Denied);
        let before = state.snapshot().viewport;

        state.zoom_in();
        assert_eq!(state.snapshot().viewport.latitude_delta, before.latitude_delta / 2.0);

        state.zoom_out();
        assert_eq!(state.snapshot().viewport, before);
    }

    #[test]
    fn test_observer_receives_changes() {
        let (state, _) = map_state(LocationAuthorization::Denied);
        let (sender, receiver) = mpsc::channel();
        state
            .observe(Arc::new(ChannelObserver(Mutex::new(sender))))
            .unwrap();

        let initial = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(initial, state.snapshot());

        state.zoom_out();
        let changed = receiver.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(changed.viewport.latitude_delta, initial.viewport.latitude_delta * 2.0);
    }

    #[test]
    fn test_no_overlay_without_route() {
        let (state, _) = map_state(LocationAuthorization::Denied);

        assert!(state.route_overlay().is_none());
        assert!(state.marker_geojson().is_none());
        assert!(state.set_route_style("not a color".to_owned(), 4.0).is_err());
        assert!(state.set_route_style("#1E88E5".to_owned(), 4.0).is_ok());
    }
}
