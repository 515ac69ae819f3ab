//! Location authorization and tracking.
//!
//! The platform owns the actual location manager. It reports authorization
//! changes and coordinate fixes back to the coordinator, which decides whether
//! updates should run.

/// Authorization status reported by the platform location manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Authorization {
    NotDetermined,
    Restricted,
    Denied,
    Granted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
pub enum Tracking {
    #[default]
    Inactive,
    AwaitingAuthorization,
    Active,
}

/// Push-based location source implemented by the host platform.
///
/// Fixes and authorization changes are delivered through
/// [`MapCoordinator::location_updated`](crate::MapCoordinator::location_updated) and
/// [`MapCoordinator::authorization_changed`](crate::MapCoordinator::authorization_changed).
pub trait LocationService: Send + Sync {
    fn authorization(&self) -> Authorization;
    fn request_authorization(&self);
    fn start_updates(&self);
    fn stop_updates(&self);
}

/// What the coordinator should do with the service for a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PermissionAction {
    Request,
    Start,
    Stop,
    StopAndRequest,
    Nothing,
}

impl Authorization {
    pub(crate) fn action(self, tracking: Tracking) -> PermissionAction {
        match self {
            Authorization::NotDetermined if tracking == Tracking::Active => {
                PermissionAction::StopAndRequest
            }
            Authorization::NotDetermined => PermissionAction::Request,
            Authorization::Granted if tracking == Tracking::Active => PermissionAction::Nothing,
            Authorization::Granted => PermissionAction::Start,
            Authorization::Restricted | Authorization::Denied if tracking == Tracking::Active => {
                PermissionAction::Stop
            }
            Authorization::Restricted | Authorization::Denied => PermissionAction::Nothing,
        }
    }

    pub(crate) fn tracking(self) -> Tracking {
        match self {
            Authorization::NotDetermined => Tracking::AwaitingAuthorization,
            Authorization::Granted => Tracking::Active,
            Authorization::Restricted | Authorization::Denied => Tracking::Inactive,
        }
    }
}
