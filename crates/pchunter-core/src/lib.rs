//! Shared domain types and configuration for the pchunter workspace.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod listings;
pub mod specs;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog::{
    load_catalog, CatalogFile, CuratedUnit, ListingLink, NewListingLink, PendingUnit, UnitPricing,
    UnitStatus,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use listings::{AggregateStats, DealTier, NormalizedListing, RawListing, ScoredListing, Source};
pub use specs::{Category, Condition, ParsedSpec, BATTERY_HEALTH_KEY, MILEAGE_KEY};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
