//! Driving routes from an OSRM instance.

use futures_util::{FutureExt, future::BoxFuture};
use geo::{Coord, LineString};
use reqwest::Url;
use serde::Deserialize;

use crate::{
    Error, Result,
    map::{Coordinate, Route, RouteStep},
    services::{Router, trim_base_url},
};

const SERVICE: &str = "osrm";

#[derive(Debug, Deserialize)]
struct RouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    distance: f64,
    duration: f64,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    distance: f64,
    duration: f64,
    #[serde(default)]
    name: String,
    maneuver: OsrmManeuver,
}

#[derive(Debug, Deserialize)]
struct OsrmManeuver {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    modifier: Option<String>,
}

impl OsrmManeuver {
    fn instruction(&self) -> String {
        match (self.kind.as_str(), self.modifier.as_deref()) {
            ("depart" | "arrive", _) => self.kind.clone(),
            (kind, Some(modifier)) => format!("{kind} {modifier}"),
            (kind, None) => kind.to_owned(),
        }
    }
}

#[derive(Clone)]
pub struct OsrmRouter {
    client: reqwest::Client,
    base_url: String,
}

impl OsrmRouter {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn route_url(&self, from: Coordinate, to: Coordinate) -> Result<Url> {
        // OSRM wants lon,lat pairs
        Url::parse_with_params(
            &format!(
                "{}/route/v1/driving/{},{};{},{}",
                trim_base_url(&self.base_url),
                from.longitude,
                from.latitude,
                to.longitude,
                to.latitude
            ),
            &[
                ("overview", "full"),
                ("geometries", "geojson"),
                ("steps", "true"),
            ],
        )
        .map_err(|error| Error::InvalidUrl(format!("{}: {error}", self.base_url)))
    }

    async fn fetch(&self, from: Coordinate, to: Coordinate) -> Result<Route> {
        let url = self.route_url(from, to)?;
        tracing::debug!(%from, %to, "requesting driving route");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        // OSRM reports routing failures (NoRoute, NoSegment, ...) with a 400 and a JSON body
        match parse_route_response(&body) {
            Err(Error::InvalidResponse(_)) if !status.is_success() => Err(Error::Service {
                service: SERVICE,
                message: format!("HTTP {status}"),
            }),
            result => result,
        }
    }
}

impl Router for OsrmRouter {
    fn route<'a>(&'a self, from: Coordinate, to: Coordinate) -> BoxFuture<'a, Result<Route>> {
        self.fetch(from, to).boxed()
    }
}

fn parse_route_response(body: &[u8]) -> Result<Route> {
    let response: RouteResponse = serde_json::from_slice(body)
        .map_err(|error| Error::InvalidResponse(format!("{SERVICE}: {error}")))?;

    if response.code != "Ok" {
        return Err(Error::Service {
            service: SERVICE,
            message: response.message.unwrap_or(response.code),
        });
    }

    let Some(route) = response.routes.into_iter().next() else {
        return Err(Error::Service {
            service: SERVICE,
            message: "no route found".to_owned(),
        });
    };

    if route.geometry.coordinates.len() < 2 {
        return Err(Error::InvalidResponse(format!(
            "{SERVICE}: route geometry has {} positions",
            route.geometry.coordinates.len()
        )));
    }

    let geometry: LineString = route
        .geometry
        .coordinates
        .into_iter()
        .map(|[x, y]| Coord { x, y })
        .collect();

    let steps = route
        .legs
        .into_iter()
        .flat_map(|leg| leg.steps)
        .map(|step| RouteStep {
            instruction: step.maneuver.instruction().into(),
            road_name: Some(step.name)
                .filter(|name| !name.is_empty())
                .map(Into::into),
            distance_m: step.distance,
            duration_s: step.duration,
        })
        .collect();

    Ok(Route {
        geometry,
        distance_m: route.distance,
        expected_travel_time_s: route.duration,
        steps,
    })
}
