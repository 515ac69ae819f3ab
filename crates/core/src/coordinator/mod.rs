//! The map screen's state holder.
//!
//! [`MapCoordinator`] owns the published [`MapSnapshot`] and forwards user
//! actions to the location, geocoding and routing services. Every mutation goes
//! through the watch channel, so subscribers see each change exactly once and
//! no lock is ever held across a service call.
//!
//! Failures never touch the snapshot: an operation either applies its whole
//! result or leaves the previous state in place.

mod state;

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::watch;

pub use state::MapSnapshot;

use crate::{
    Config, Error, Result,
    location::{Authorization, LocationService, PermissionAction, Tracking},
    map::{Coordinate, Marker, Route, Viewport},
    services::{self, AddressQuery, Geocoder, NominatimGeocoder, OsrmRouter, Router},
};

/// Hands out request numbers; only the newest one may publish.
#[derive(Default)]
struct Generation(AtomicU64);

impl Generation {
    fn issue(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

pub struct MapCoordinator {
    state: watch::Sender<MapSnapshot>,
    location: Arc<dyn LocationService>,
    geocoder: Arc<dyn Geocoder>,
    router: Arc<dyn Router>,
    route_padding: f64,
    searches: Generation,
    routes: Generation,
}

impl MapCoordinator {
    pub fn new(
        config: &Config,
        location: Arc<dyn LocationService>,
        geocoder: Arc<dyn Geocoder>,
        router: Arc<dyn Router>,
    ) -> Self {
        let (state, _) = watch::channel(MapSnapshot::new(Viewport::from(config.initial_viewport)));

        Self {
            state,
            location,
            geocoder,
            router,
            route_padding: config.route_padding,
            searches: Generation::default(),
            routes: Generation::default(),
        }
    }

    /// Coordinator backed by Nominatim and OSRM as configured.
    pub fn with_default_services(
        config: &Config,
        location: Arc<dyn LocationService>,
    ) -> Result<Self> {
        let client = services::http_client(config)?;
        let geocoder = NominatimGeocoder::new(client.clone(), config.geocoder_url.clone());
        let router = OsrmRouter::new(client, config.router_url.clone());

        Ok(Self::new(
            config,
            location,
            Arc::new(geocoder),
            Arc::new(router),
        ))
    }

    pub fn snapshot(&self) -> MapSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MapSnapshot> {
        self.state.subscribe()
    }

    /// Run the permission flow against the service's current status.
    pub fn check_location_authorization(&self) {
        let status = self.location.authorization();
        self.apply_authorization(status);
    }

    /// Delegate callback for authorization changes.
    pub fn authorization_changed(&self, status: Authorization) {
        self.apply_authorization(status);
    }

    fn apply_authorization(&self, status: Authorization) {
        let tracking = status.tracking();
        let mut action = PermissionAction::Nothing;

        // Decided under the channel's write lock so concurrent callbacks can't
        // both start updates. Published before calling out: the platform may
        // answer synchronously.
        self.state.send_if_modified(|state| {
            action = status.action(state.tracking);
            let changed = state.authorization != Some(status) || state.tracking != tracking;
            state.authorization = Some(status);
            state.tracking = tracking;
            changed
        });

        tracing::debug!(%status, %tracking, ?action, "location authorization");
        match action {
            PermissionAction::Request => self.location.request_authorization(),
            PermissionAction::Start => self.location.start_updates(),
            PermissionAction::Stop => self.location.stop_updates(),
            PermissionAction::StopAndRequest => {
                self.location.stop_updates();
                self.location.request_authorization();
            }
            PermissionAction::Nothing => {}
        }
    }

    pub fn stop_location_updates(&self) {
        let was_active = self.state.send_if_modified(|state| {
            let active = state.tracking == Tracking::Active;
            state.tracking = Tracking::Inactive;
            active
        });

        if was_active {
            self.location.stop_updates();
        }
    }

    pub fn location_updated(&self, coordinate: Coordinate) {
        if !coordinate.is_valid() {
            tracing::warn!(%coordinate, "dropping invalid location fix");
            return;
        }

        self.state.send_if_modified(|state| {
            if state.tracking != Tracking::Active {
                tracing::debug!(%coordinate, "location fix while not tracking");
                return false;
            }

            state.user_location = Some(coordinate);
            if state.follows_user {
                state.viewport = state.viewport.recentered(coordinate);
            }
            true
        });
    }

    pub fn location_failed(&self, reason: &str) {
        tracing::warn!(reason, "location update failed");
    }

    /// Follow the user again. Returns whether the viewport moved.
    pub fn center_on_user(&self) -> bool {
        let mut moved = false;
        self.state.send_if_modified(|state| {
            let changed = !state.follows_user;
            state.follows_user = true;
            if let Some(user) = state.user_location {
                moved = state.viewport.center != user;
                state.viewport = state.viewport.recentered(user);
            }
            changed || moved
        });
        moved
    }

    pub fn zoom_in(&self) {
        self.state
            .send_modify(|state| state.viewport = state.viewport.zoomed_in());
    }

    pub fn zoom_out(&self) {
        self.state
            .send_modify(|state| state.viewport = state.viewport.zoomed_out());
    }

    /// Geocode the address, replace the marker and recenter on it.
    pub async fn search(&self, city: &str, address: &str) -> Result<Marker> {
        let query = AddressQuery::new(city, address);
        if query.is_empty() {
            return Err(Error::InvalidQuery);
        }

        let ticket = self.searches.issue();
        let place = self
            .geocoder
            .geocode(&query)
            .await?
            .ok_or_else(|| Error::NoMatch(query.text()))?;

        let label = place.display_name.unwrap_or_else(|| query.text());
        let marker = Marker::new(label, place.coordinate);

        let applied = self.state.send_if_modified(|state| {
            if !self.searches.is_current(ticket) {
                return false;
            }

            state.viewport = state.viewport.recentered(marker.coordinate);
            state.marker = Some(marker.clone());
            // the old route led to the old marker
            state.route = None;
            state.follows_user = false;
            true
        });

        if !applied {
            tracing::debug!(%query, "discarding stale geocoding result");
            return Err(Error::Superseded);
        }

        tracing::debug!(%query, coordinate = %marker.coordinate, "marker placed");
        Ok(marker)
    }

    /// Search, then route from the user to the new marker.
    pub async fn mark_on_map(&self, city: &str, address: &str) -> Result<Arc<Route>> {
        self.search(city, address).await?;
        self.request_route().await
    }

    /// Driving route from the user's location to the current marker.
    pub async fn request_route(&self) -> Result<Arc<Route>> {
        let (from, to) = {
            let state = self.state.borrow();
            let from = state.user_location.ok_or(Error::NoUserLocation)?;
            let to = state.marker.as_ref().ok_or(Error::NoMarker)?.coordinate;
            (from, to)
        };

        let ticket = self.routes.issue();
        let route = Arc::new(self.router.route(from, to).await?);
        let fitted = route
            .bounds()
            .map(|bounds| Viewport::fitting(bounds, self.route_padding));

        let applied = self.state.send_if_modified(|state| {
            let same_destination = state
                .marker
                .as_ref()
                .is_some_and(|marker| marker.coordinate == to);
            if !self.routes.is_current(ticket) || !same_destination {
                return false;
            }

            state.route = Some(Arc::clone(&route));
            if let Some(viewport) = fitted {
                state.viewport = viewport;
                state.follows_user = false;
            }
            true
        });

        if !applied {
            tracing::debug!(%from, %to, "discarding stale route");
            return Err(Error::Superseded);
        }

        tracing::debug!(
            distance_m = route.distance_m,
            steps = route.steps.len(),
            "route ready"
        );
        Ok(route)
    }

    pub fn clear_route(&self) {
        self.state.send_if_modified(|state| state.route.take().is_some());
    }
}
