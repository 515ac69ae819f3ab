#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use futures_util::{FutureExt, future::BoxFuture};
use geo::LineString;
use tokio::sync::Notify;
use waypoint_core::{
    Config, Error, MapCoordinator, Result,
    location::{Authorization, LocationService},
    map::{Coordinate, Route, RouteStep},
    services::{AddressQuery, GeocodedPlace, Geocoder, Router},
};

pub const EMPIRE_STATE: Coordinate = Coordinate::new(40.7484, -73.9857);
pub const TIMES_SQUARE: Coordinate = Coordinate::new(40.7580, -73.9855);
pub const CENTRAL_PARK: Coordinate = Coordinate::new(40.7829, -73.9654);

pub struct FakeLocation {
    status: Mutex<Authorization>,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeLocation {
    pub fn new(status: Authorization) -> Arc<Self> {
        Arc::new(Self {
            status: Mutex::new(status),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn set_status(&self, status: Authorization) {
        *self.status.lock().unwrap() = status;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl LocationService for FakeLocation {
    fn authorization(&self) -> Authorization {
        *self.status.lock().unwrap()
    }

    fn request_authorization(&self) {
        self.record("request");
    }

    fn start_updates(&self) {
        self.record("start");
    }

    fn stop_updates(&self) {
        self.record("stop");
    }
}

/// Answers from a fixed table keyed by the query text. The query "slow" blocks
/// until released.
#[derive(Default)]
pub struct FakeGeocoder {
    places: Mutex<HashMap<String, GeocodedPlace>>,
    failing: AtomicBool,
    pub entered: Notify,
    pub release: Notify,
}

impl FakeGeocoder {
    pub fn with_place(self, text: &str, coordinate: Coordinate, name: Option<&str>) -> Self {
        self.places.lock().unwrap().insert(
            text.to_owned(),
            GeocodedPlace {
                coordinate,
                display_name: name.map(str::to_owned),
            },
        );
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Geocoder for FakeGeocoder {
    fn geocode<'a>(
        &'a self,
        query: &'a AddressQuery,
    ) -> BoxFuture<'a, Result<Option<GeocodedPlace>>> {
        async move {
            if query.text() == "slow" {
                self.entered.notify_one();
                self.release.notified().await;
            }

            if self.failing.load(Ordering::SeqCst) {
                return Err(Error::Service {
                    service: "fake",
                    message: "unavailable".to_owned(),
                });
            }

            Ok(self.places.lock().unwrap().get(&query.text()).cloned())
        }
        .boxed()
    }
}

/// Straight three-point routes. After `hold_next`, the next request blocks
/// until released.
#[derive(Default)]
pub struct FakeRouter {
    failing: AtomicBool,
    held: AtomicBool,
    pub entered: Notify,
    pub release: Notify,
}

impl FakeRouter {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn hold_next(&self) {
        self.held.store(true, Ordering::SeqCst);
    }
}

impl Router for FakeRouter {
    fn route<'a>(&'a self, from: Coordinate, to: Coordinate) -> BoxFuture<'a, Result<Route>> {
        async move {
            if self.held.swap(false, Ordering::SeqCst) {
                self.entered.notify_one();
                self.release.notified().await;
            }

            if self.failing.load(Ordering::SeqCst) {
                return Err(Error::Service {
                    service: "fake",
                    message: "NoRoute".to_owned(),
                });
            }

            let middle = Coordinate::new(from.latitude, to.longitude);
            let geometry: LineString = vec![
                (from.longitude, from.latitude),
                (middle.longitude, middle.latitude),
                (to.longitude, to.latitude),
            ]
            .into();

            Ok(Route {
                geometry,
                distance_m: from.distance_to(middle) + middle.distance_to(to),
                expected_travel_time_s: 300.0,
                steps: vec![
                    RouteStep {
                        instruction: "depart".into(),
                        road_name: None,
                        distance_m: from.distance_to(middle),
                        duration_s: 150.0,
                    },
                    RouteStep {
                        instruction: "turn left".into(),
                        road_name: Some("Broadway".into()),
                        distance_m: middle.distance_to(to),
                        duration_s: 150.0,
                    },
                ],
            })
        }
        .boxed()
    }
}

pub struct Harness {
    pub coordinator: Arc<MapCoordinator>,
    pub location: Arc<FakeLocation>,
    pub geocoder: Arc<FakeGeocoder>,
    pub router: Arc<FakeRouter>,
}

pub fn harness(status: Authorization) -> Harness {
    let location = FakeLocation::new(status);
    let geocoder = Arc::new(
        FakeGeocoder::default()
            .with_place("350 5th Ave, New York", EMPIRE_STATE, Some("Empire State Building"))
            .with_place("Times Square, New York", TIMES_SQUARE, None)
            .with_place("Central Park, New York", CENTRAL_PARK, Some("Central Park"))
            .with_place("slow", EMPIRE_STATE, Some("Empire State Building")),
    );
    let router = Arc::new(FakeRouter::default());

    let coordinator = Arc::new(MapCoordinator::new(
        &Config::default(),
        location.clone(),
        geocoder.clone(),
        router.clone(),
    ));

    Harness {
        coordinator,
        location,
        geocoder,
        router,
    }
}

/// Harness with tracking active and a first fix at Times Square.
pub fn tracking_harness() -> Harness {
    let harness = harness(Authorization::Granted);
    harness.coordinator.check_location_authorization();
    harness.coordinator.location_updated(TIMES_SQUARE);
    harness
}
