use std::time::Duration;

use serde::Deserialize;

use crate::{
    Result,
    map::{Coordinate, Span, Viewport},
};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of a Nominatim instance
    #[serde(default = "default_geocoder_url")]
    pub geocoder_url: String,

    /// Base URL of an OSRM instance
    #[serde(default = "default_router_url")]
    pub router_url: String,

    // Nominatim's usage policy rejects requests without an identifying agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub initial_viewport: ViewportConfig,

    /// Extra room around a route when the map is fitted to it, as a fraction of its extent
    #[serde(default = "default_route_padding")]
    pub route_padding: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ViewportConfig {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_span_delta")]
    pub latitude_delta: f64,
    #[serde(default = "default_span_delta")]
    pub longitude_delta: f64,
}

impl Config {
    /// Parse a (possibly partial) JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoder_url: default_geocoder_url(),
            router_url: default_router_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            initial_viewport: ViewportConfig::default(),
            route_padding: default_route_padding(),
        }
    }
}

impl Default for ViewportConfig {
    // Apple Park, where the simulator puts you by default
    fn default() -> Self {
        Self {
            latitude: 37.3349,
            longitude: -122.0090,
            latitude_delta: default_span_delta(),
            longitude_delta: default_span_delta(),
        }
    }
}

impl From<ViewportConfig> for Viewport {
    fn from(config: ViewportConfig) -> Self {
        Viewport::new(
            Coordinate::new(config.latitude, config.longitude),
            Span::new(config.latitude_delta, config.longitude_delta),
        )
    }
}

fn default_geocoder_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_router_url() -> String {
    "https://router.project-osrm.org".to_string()
}

fn default_user_agent() -> String {
    concat!("waypoint/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_span_delta() -> f64 {
    0.05
}

fn default_route_padding() -> f64 {
    0.2
}
