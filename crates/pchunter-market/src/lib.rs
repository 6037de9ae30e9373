//! Market intelligence over scraped listings and the curated catalog.
//!
//! Two operations face callers:
//! - [`ScanOrchestrator::scan`]: live fan-out to every source, aggregate
//!   statistics, and deal tiers for each priced listing
//! - [`parse_and_match`]: extract specs from a query and look up curated units

pub mod catalog;
pub mod error;
pub mod scan;
pub mod score;
pub mod service;
pub mod stats;
pub mod watch;

pub use catalog::{build_filter, CatalogStore, FilterCriteria, InMemoryCatalog};
pub use error::MarketError;
pub use scan::{ScanOrchestrator, ScanReport};
pub use score::{assess_deal, classify, DealAssessment, ScoreBand, Verdict};
pub use service::{parse_and_match, submit_listing, MatchReport, WorkerSubmission};
pub use stats::aggregate_stats;
pub use watch::{find_underpriced, UnderpricedAlert};
