use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::specs::{Category, Condition, ParsedSpec};
use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    /// Submitted by a worker, awaiting admin review.
    Pending,
    /// Vetted by an admin and visible to search.
    Approved,
}

/// A listing URL attached to a curated unit as market evidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingLink {
    pub id: Uuid,
    pub url: String,
    /// Asking price in whole DA.
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

/// An admin-vetted summary of the expected market price range for one spec
/// combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedUnit {
    pub id: Uuid,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub cpu: Option<String>,
    #[serde(default)]
    pub gpu: Option<String>,
    #[serde(default)]
    pub ram: Option<String>,
    #[serde(default)]
    pub storage: Option<String>,
    #[serde(default)]
    pub condition: Option<Condition>,
    pub min_price: i64,
    pub avg_price: i64,
    pub max_price: i64,
    /// Price at or below which a listing is a confident buy.
    pub deal_threshold: i64,
    #[serde(default)]
    pub confidence_score: Option<u8>,
    #[serde(default)]
    pub proof_url: Option<String>,
    pub status: UnitStatus,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub listing_links: Vec<ListingLink>,
}

/// The price reference a buying cost is judged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPricing {
    pub avg_price: i64,
    pub max_price: i64,
    pub deal_threshold: i64,
}

impl CuratedUnit {
    #[must_use]
    pub fn pricing(&self) -> UnitPricing {
        UnitPricing {
            avg_price: self.avg_price,
            max_price: self.max_price,
            deal_threshold: self.deal_threshold,
        }
    }

    /// Returns `true` if the unit has real (non-placeholder) pricing.
    #[must_use]
    pub fn is_priced(&self) -> bool {
        self.avg_price > 0
    }
}

/// A listing URL to attach to a newly submitted unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewListingLink {
    pub url: String,
    pub price: i64,
}

/// A worker submission: parsed attributes plus the listing that evidences them.
///
/// Stores create it as a [`UnitStatus::Pending`] unit with zero pricing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUnit {
    pub spec: ParsedSpec,
    pub link: NewListingLink,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub units: Vec<CuratedUnit>,
}

/// Load and validate the curated catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<CatalogFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: CatalogFile = serde_yaml::from_str(&content)?;
    validate_catalog(&catalog)?;

    Ok(catalog)
}

fn validate_catalog(catalog: &CatalogFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for unit in &catalog.units {
        if !seen_ids.insert(unit.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate unit id: {}",
                unit.id
            )));
        }

        let prices = [
            unit.min_price,
            unit.avg_price,
            unit.max_price,
            unit.deal_threshold,
        ];
        if prices.iter().any(|p| *p < 0) {
            return Err(ConfigError::Validation(format!(
                "unit {} has a negative price",
                unit.id
            )));
        }

        if unit.status == UnitStatus::Approved
            && unit.is_priced()
            && !(unit.min_price <= unit.avg_price && unit.avg_price <= unit.max_price)
        {
            return Err(ConfigError::Validation(format!(
                "unit {} must satisfy min_price <= avg_price <= max_price (got {} / {} / {})",
                unit.id, unit.min_price, unit.avg_price, unit.max_price
            )));
        }

        if unit.listing_links.iter().any(|l| l.url.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "unit {} has a listing link with an empty url",
                unit.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
