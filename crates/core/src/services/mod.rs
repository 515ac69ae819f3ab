//! Seams to the external geocoding and routing services.

mod nominatim;
mod osrm;
mod traits;

pub use nominatim::NominatimGeocoder;
pub use osrm::OsrmRouter;
pub use traits::{AddressQuery, GeocodedPlace, Geocoder, Router};

use crate::{Config, Result};

/// Shared HTTP client for the default services.
pub fn http_client(config: &Config) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.request_timeout())
        .build()?)
}

pub(crate) fn trim_base_url(url: &str) -> &str {
    url.trim_end_matches('/')
}
