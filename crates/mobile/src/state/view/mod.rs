use std::sync::Arc;

use tokio::sync::RwLock;
use waypoint_core::{Config, MapCoordinator};

use crate::state::{
    location::{LocationBridge, PlatformLocation},
    view::map::MapState,
};

pub mod map;

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum MapError {
    #[error("{0}")]
    Config(String),
    #[error("{0}")]
    Services(String),
    #[error("{0}")]
    Observer(String),
    #[error("{0}")]
    Style(String),
}

#[derive(uniffi::Object)]
pub struct ViewState {
    config: Config,
    location: Arc<dyn LocationBridge>,
    map: RwLock<Option<Arc<MapState>>>,
}

#[uniffi::export(async_runtime = "tokio")]
impl ViewState {
    /// `config_json` may be partial; missing settings take their defaults.
    #[uniffi::constructor]
    pub fn new(
        config_json: Option<String>,
        location: Arc<dyn LocationBridge>,
    ) -> Result<Arc<Self>, MapError> {
        let config = match config_json {
            Some(json) => Config::from_json(&json).map_err(|e| MapError::Config(e.to_string()))?,
            None => Config::default(),
        };

        Ok(Arc::new(Self {
            config,
            location,
            map: RwLock::new(None),
        }))
    }

    pub async fn get_map_state(&self) -> Result<Arc<MapState>, MapError> {
        if let Some(ref map) = *(self.map.read().await) {
            return Ok(Arc::clone(map));
        }

        let mut guard = self.map.write().await;
        if let Some(ref map) = *guard {
            return Ok(Arc::clone(map));
        }

        let location = Arc::new(PlatformLocation(Arc::clone(&self.location)));
        let coordinator = MapCoordinator::with_default_services(&self.config, location)
            .map_err(|e| MapError::Services(e.to_string()))?;
        let new_map = Arc::new(MapState::new(coordinator));
        *guard = Some(Arc::clone(&new_map));

        tracing::info!(
            geocoder = %self.config.geocoder_url,
            router = %self.config.router_url,
            "map state ready"
        );
        Ok(new_map)
    }
}
