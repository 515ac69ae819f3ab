pub mod config;
pub mod coordinator;
pub mod error;
pub mod location;
pub mod map;
pub mod services;

pub use config::Config;
pub use coordinator::{MapCoordinator, MapSnapshot};
pub use error::{Error, Result};
