//! Domain types, distance math, and configuration shared by the `aquaname`
//! crates.

pub mod app_config;
pub mod config;
pub mod geo;
pub mod place;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_meters, Coordinate, CoordinateError, EARTH_RADIUS_M};
pub use place::{rank_by_distance, PlaceCandidate, ScoredMatch};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
