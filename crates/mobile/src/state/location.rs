//! Bridge to the platform location manager (CLLocationManager / FusedLocationProvider).

use std::sync::Arc;

use waypoint_core::location::{Authorization, LocationService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum LocationAuthorization {
    NotDetermined,
    Restricted,
    Denied,
    Granted,
}

impl From<LocationAuthorization> for Authorization {
    fn from(status: LocationAuthorization) -> Self {
        match status {
            LocationAuthorization::NotDetermined => Authorization::NotDetermined,
            LocationAuthorization::Restricted => Authorization::Restricted,
            LocationAuthorization::Denied => Authorization::Denied,
            LocationAuthorization::Granted => Authorization::Granted,
        }
    }
}

impl From<Authorization> for LocationAuthorization {
    fn from(status: Authorization) -> Self {
        match status {
            Authorization::NotDetermined => LocationAuthorization::NotDetermined,
            Authorization::Restricted => LocationAuthorization::Restricted,
            Authorization::Denied => LocationAuthorization::Denied,
            Authorization::Granted => LocationAuthorization::Granted,
        }
    }
}

/// Implemented in Swift/Kotlin on top of the platform location manager.
///
/// Fixes and authorization changes flow back through `MapState`.
#[uniffi::export(with_foreign)]
pub trait LocationBridge: Send + Sync {
    fn authorization(&self) -> LocationAuthorization;
    fn request_authorization(&self);
    fn start_updates(&self);
    fn stop_updates(&self);
}

pub(crate) struct PlatformLocation(pub(crate) Arc<dyn LocationBridge>);

impl LocationService for PlatformLocation {
    fn authorization(&self) -> Authorization {
        self.0.authorization().into()
    }

    fn request_authorization(&self) {
        self.0.request_authorization()
    }

    fn start_updates(&self) {
        self.0.start_updates()
    }

    fn stop_updates(&self) {
        self.0.stop_updates()
    }
}
