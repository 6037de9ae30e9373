//! Catalog matcher and the curated-unit storage seam.

use async_trait::async_trait;
use chrono::Utc;
use pchunter_core::{
    CatalogFile, Category, Condition, CuratedUnit, ListingLink, ParsedSpec, PendingUnit,
    UnitStatus,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::MarketError;

/// Result cap applied by [`build_filter`].
pub const DEFAULT_MATCH_LIMIT: usize = 10;

/// Criteria a curated unit must satisfy to be returned by a search.
///
/// `None` fields impose no constraint. Text fields match as case-insensitive
/// substrings; `category` and `condition` match exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub category: Option<Category>,
    pub cpu: Option<String>,
    pub gpu: Option<String>,
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub condition: Option<Condition>,
    pub status: UnitStatus,
    pub include_links: bool,
    pub limit: usize,
}

/// Maps extracted attributes onto search criteria over approved units.
#[must_use]
pub fn build_filter(spec: &ParsedSpec) -> FilterCriteria {
    FilterCriteria {
        category: spec.category,
        cpu: spec.cpu.clone(),
        gpu: spec.gpu.clone(),
        ram: spec.ram.clone(),
        storage: spec.storage.clone(),
        condition: spec.condition,
        status: UnitStatus::Approved,
        include_links: true,
        limit: DEFAULT_MATCH_LIMIT,
    }
}

impl FilterCriteria {
    /// Returns `true` when `unit` satisfies every present criterion.
    #[must_use]
    pub fn matches(&self, unit: &CuratedUnit) -> bool {
        unit.status == self.status
            && exact(self.category, unit.category)
            && exact(self.condition, unit.condition)
            && contains(self.cpu.as_deref(), unit.cpu.as_deref())
            && contains(self.gpu.as_deref(), unit.gpu.as_deref())
            && contains(self.ram.as_deref(), unit.ram.as_deref())
            && contains(self.storage.as_deref(), unit.storage.as_deref())
    }
}

fn exact<T: PartialEq>(wanted: Option<T>, actual: Option<T>) -> bool {
    wanted.is_none_or(|w| actual == Some(w))
}

fn contains(needle: Option<&str>, haystack: Option<&str>) -> bool {
    match (needle, haystack) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(n), Some(h)) => h.to_lowercase().contains(&n.to_lowercase()),
    }
}

/// Storage collaborator for curated units.
///
/// The core reads through [`CatalogStore::find_units`] and writes only through
/// [`CatalogStore::create_pending`].
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Units satisfying `criteria`, most recently updated first, at most
    /// `criteria.limit` of them.
    async fn find_units(&self, criteria: &FilterCriteria)
        -> Result<Vec<CuratedUnit>, MarketError>;

    /// Creates a pending unit with zero pricing and the submitted listing link.
    async fn create_pending(&self, unit: PendingUnit) -> Result<CuratedUnit, MarketError>;
}

/// Process-local store, seeded from the YAML catalog file.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    units: RwLock<Vec<CuratedUnit>>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new(units: Vec<CuratedUnit>) -> Self {
        Self {
            units: RwLock::new(units),
        }
    }

    #[must_use]
    pub fn from_catalog_file(file: CatalogFile) -> Self {
        Self::new(file.units)
    }

    /// Copy of every stored unit, in insertion order.
    pub async fn snapshot(&self) -> Vec<CuratedUnit> {
        self.units.read().await.clone()
    }
}

fn same_spec(unit: &CuratedUnit, spec: &ParsedSpec) -> bool {
    unit.category == spec.category
        && unit.cpu == spec.cpu
        && unit.gpu == spec.gpu
        && unit.ram == spec.ram
        && unit.storage == spec.storage
        && unit.condition == spec.condition
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn find_units(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<CuratedUnit>, MarketError> {
        let units = self.units.read().await;
        let mut found: Vec<CuratedUnit> = units
            .iter()
            .filter(|u| criteria.matches(u))
            .cloned()
            .collect();
        drop(units);

        found.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        found.truncate(criteria.limit);
        if !criteria.include_links {
            for unit in &mut found {
                unit.listing_links.clear();
            }
        }
        Ok(found)
    }

    async fn create_pending(&self, pending: PendingUnit) -> Result<CuratedUnit, MarketError> {
        let mut units = self.units.write().await;
        if units.iter().any(|u| same_spec(u, &pending.spec)) {
            return Err(MarketError::Catalog {
                reason: "a unit with the same specs already exists".to_string(),
            });
        }

        let now = Utc::now();
        let unit = CuratedUnit {
            id: Uuid::new_v4(),
            category: pending.spec.category,
            cpu: pending.spec.cpu,
            gpu: pending.spec.gpu,
            ram: pending.spec.ram,
            storage: pending.spec.storage,
            condition: pending.spec.condition,
            min_price: 0,
            avg_price: 0,
            max_price: 0,
            deal_threshold: 0,
            confidence_score: None,
            proof_url: None,
            status: UnitStatus::Pending,
            last_updated: now,
            listing_links: vec![ListingLink {
                id: Uuid::new_v4(),
                url: pending.link.url,
                price: pending.link.price,
                created_at: now,
            }],
        };
        units.push(unit.clone());

        tracing::info!(unit_id = %unit.id, "pending unit created");
        Ok(unit)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use pchunter_core::NewListingLink;

    use super::*;

    fn unit(cpu: &str, ram: &str, status: UnitStatus) -> CuratedUnit {
        CuratedUnit {
            id: Uuid::new_v4(),
            category: Some(Category::Laptop),
            cpu: Some(cpu.to_string()),
            gpu: None,
            ram: Some(ram.to_string()),
            storage: Some("512GB".to_string()),
            condition: Some(Condition::Used),
            min_price: 90_000,
            avg_price: 100_000,
            max_price: 120_000,
            deal_threshold: 85_000,
            confidence_score: Some(7),
            proof_url: None,
            status,
            last_updated: Utc::now(),
            listing_links: vec![ListingLink {
                id: Uuid::new_v4(),
                url: "https://www.ouedkniss.com/annonce/42".to_string(),
                price: 98_000,
                created_at: Utc::now(),
            }],
        }
    }

    fn spec(cpu: Option<&str>) -> ParsedSpec {
        ParsedSpec {
            cpu: cpu.map(str::to_string),
            ..ParsedSpec::default()
        }
    }

    #[test]
    fn build_filter_carries_present_fields() {
        let parsed = ParsedSpec {
            category: Some(Category::Laptop),
            cpu: Some("I51145G7".to_string()),
            ram: Some("16GB".to_string()),
            condition: Some(Condition::New),
            ..ParsedSpec::default()
        };
        let filter = build_filter(&parsed);
        assert_eq!(filter.cpu.as_deref(), Some("I51145G7"));
        assert_eq!(filter.ram.as_deref(), Some("16GB"));
        assert_eq!(filter.gpu, None);
        assert_eq!(filter.category, Some(Category::Laptop));
        assert_eq!(filter.condition, Some(Condition::New));
        assert_eq!(filter.status, UnitStatus::Approved);
        assert!(filter.include_links);
        assert_eq!(filter.limit, DEFAULT_MATCH_LIMIT);
    }

    #[test]
    fn empty_spec_matches_any_approved_unit() {
        let filter = build_filter(&ParsedSpec::default());
        assert!(filter.matches(&unit("I7 12th Gen", "16GB", UnitStatus::Approved)));
        assert!(!filter.matches(&unit("I7 12th Gen", "16GB", UnitStatus::Pending)));
    }

    #[test]
    fn text_fields_match_case_insensitive_substrings() {
        let filter = build_filter(&spec(Some("i7")));
        assert!(filter.matches(&unit("I7 12th Gen", "16GB", UnitStatus::Approved)));
        assert!(!filter.matches(&unit("I51145G7", "16GB", UnitStatus::Approved)));
    }

    #[test]
    fn present_field_excludes_units_missing_it() {
        let filter = build_filter(&ParsedSpec {
            gpu: Some("RTX 3060".to_string()),
            ..ParsedSpec::default()
        });
        assert!(!filter.matches(&unit("I7 12th Gen", "16GB", UnitStatus::Approved)));
    }

    #[test]
    fn condition_matches_exactly() {
        let filter = build_filter(&ParsedSpec {
            condition: Some(Condition::New),
            ..ParsedSpec::default()
        });
        assert!(!filter.matches(&unit("I7 12th Gen", "16GB", UnitStatus::Approved)));
    }

    #[tokio::test]
    async fn find_units_orders_newest_first_and_caps() {
        let mut units = Vec::new();
        for age in 0..15 {
            let mut u = unit("I5 11th Gen", "8GB", UnitStatus::Approved);
            u.last_updated = Utc::now() - Duration::days(age);
            units.push(u);
        }
        let newest = units[0].id;
        let store = InMemoryCatalog::new(units);

        let found = store
            .find_units(&build_filter(&spec(Some("i5"))))
            .await
            .unwrap();
        assert_eq!(found.len(), DEFAULT_MATCH_LIMIT);
        assert_eq!(found[0].id, newest);
        assert!(found.windows(2).all(|w| w[0].last_updated >= w[1].last_updated));
    }

    #[tokio::test]
    async fn links_are_dropped_when_not_requested() {
        let store = InMemoryCatalog::new(vec![unit("I5 11th Gen", "8GB", UnitStatus::Approved)]);
        let mut filter = build_filter(&ParsedSpec::default());
        filter.include_links = false;

        let found = store.find_units(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].listing_links.is_empty());
        assert_eq!(store.snapshot().await[0].listing_links.len(), 1);
    }

    #[tokio::test]
    async fn create_pending_stores_zero_priced_unit_with_link() {
        let store = InMemoryCatalog::default();
        let created = store
            .create_pending(PendingUnit {
                spec: spec(Some("I51145G7")),
                link: NewListingLink {
                    url: "https://www.ouedkniss.com/annonce/7".to_string(),
                    price: 95_000,
                },
            })
            .await
            .unwrap();

        assert_eq!(created.status, UnitStatus::Pending);
        assert!(!created.is_priced());
        assert_eq!(created.deal_threshold, 0);
        assert_eq!(created.listing_links.len(), 1);
        assert_eq!(created.listing_links[0].price, 95_000);

        // Pending units stay out of search results.
        let found = store
            .find_units(&build_filter(&ParsedSpec::default()))
            .await
            .unwrap();
        assert!(found.is_empty());
        assert_eq!(store.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_spec_is_rejected() {
        let store = InMemoryCatalog::default();
        let pending = PendingUnit {
            spec: spec(Some("I51145G7")),
            link: NewListingLink {
                url: "https://www.ouedkniss.com/annonce/7".to_string(),
                price: 95_000,
            },
        };
        store.create_pending(pending.clone()).await.unwrap();

        let err = store.create_pending(pending).await.unwrap_err();
        assert!(matches!(err, MarketError::Catalog { .. }));
    }
}
