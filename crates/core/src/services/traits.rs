use std::fmt;

use futures_util::future::BoxFuture;
use itertools::Itertools;

use crate::{
    Result,
    map::{Coordinate, Route},
};

/// The free-text city and address fields, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressQuery {
    city: String,
    address: String,
}

impl AddressQuery {
    pub fn new(city: impl AsRef<str>, address: impl AsRef<str>) -> Self {
        Self {
            city: city.as_ref().trim().to_owned(),
            address: address.as_ref().trim().to_owned(),
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_empty() && self.address.is_empty()
    }

    /// Single-line form sent to the geocoder: "address, city"
    pub fn text(&self) -> String {
        [self.address.as_str(), self.city.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .join(", ")
    }
}

impl fmt::Display for AddressQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub coordinate: Coordinate,
    pub display_name: Option<String>,
}

/// Forward geocoding: text to coordinate.
pub trait Geocoder: Send + Sync {
    /// Best match for the query, or `None` when the service found nothing.
    fn geocode<'a>(&'a self, query: &'a AddressQuery)
    -> BoxFuture<'a, Result<Option<GeocodedPlace>>>;
}

/// Driving directions between two coordinates.
pub trait Router: Send + Sync {
    fn route<'a>(&'a self, from: Coordinate, to: Coordinate) -> BoxFuture<'a, Result<Route>>;
}
