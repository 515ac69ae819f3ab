//! Forward geocoding against an OpenStreetMap Nominatim instance.

use futures_util::{FutureExt, future::BoxFuture};
use reqwest::Url;
use serde::Deserialize;

use crate::{
    Error, Result,
    map::Coordinate,
    services::{AddressQuery, GeocodedPlace, Geocoder, trim_base_url},
};

const SERVICE: &str = "nominatim";

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    // Nominatim reports coordinates as decimal strings
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SearchResponse {
    Places(Vec<NominatimPlace>),
    Failure { error: serde_json::Value },
}

#[derive(Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn search_url(&self, query: &AddressQuery) -> Result<Url> {
        let text = query.text();
        Url::parse_with_params(
            &format!("{}/search", trim_base_url(&self.base_url)),
            &[
                ("q", text.as_str()),
                ("format", "jsonv2"),
                ("limit", "1"),
            ],
        )
        .map_err(|error| Error::InvalidUrl(format!("{}: {error}", self.base_url)))
    }

    async fn search(&self, query: &AddressQuery) -> Result<Option<GeocodedPlace>> {
        let url = self.search_url(query)?;
        tracing::debug!(%query, "geocoding");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Service {
                service: SERVICE,
                message: format!("HTTP {status}"),
            });
        }

        parse_search_response(&response.bytes().await?)
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode<'a>(
        &'a self,
        query: &'a AddressQuery,
    ) -> BoxFuture<'a, Result<Option<GeocodedPlace>>> {
        self.search(query).boxed()
    }
}

fn parse_search_response(body: &[u8]) -> Result<Option<GeocodedPlace>> {
    let response: SearchResponse = serde_json::from_slice(body)
        .map_err(|error| Error::InvalidResponse(format!("{SERVICE}: {error}")))?;

    let places = match response {
        SearchResponse::Places(places) => places,
        SearchResponse::Failure { error } => {
            let message = error
                .get("message")
                .and_then(|message| message.as_str())
                .map(str::to_owned)
                .unwrap_or_else(|| error.to_string());
            return Err(Error::Service {
                service: SERVICE,
                message,
            });
        }
    };

    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };

    let coordinate = Coordinate::new(parse_degrees(&place.lat)?, parse_degrees(&place.lon)?);
    if !coordinate.is_valid() {
        return Err(Error::InvalidResponse(format!(
            "{SERVICE}: coordinate out of range: {coordinate}"
        )));
    }

    Ok(Some(GeocodedPlace {
        coordinate,
        display_name: place.display_name.filter(|name| !name.trim().is_empty()),
    }))
}

fn parse_degrees(value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidResponse(format!("{SERVICE}: not a number: {value:?}")))
}
