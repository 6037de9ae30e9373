pub mod error;
pub(crate) mod extract;
pub mod fetch;
pub mod price;
pub mod sources;
pub mod specs;

pub use error::ScraperError;
pub use fetch::{FetchSettings, PageFetcher};
pub use price::{effective_price_text, normalize_price};
pub use sources::{
    build_default_adapters, FacebookAdapter, OuedknissAdapter, SourceAdapter, WooCommerceAdapter,
};
pub use specs::parse_specs;
