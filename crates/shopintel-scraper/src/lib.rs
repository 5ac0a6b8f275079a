pub mod assemble;
pub mod catalog;
pub mod client;
pub mod competitors;
pub mod error;
pub mod extract;

pub use assemble::BrandAssembler;
pub use catalog::catalog_from_json;
pub use client::{brand_name_from_url, Page, StoreUrl, StorefrontClient};
pub use competitors::CompetitorDiscoverer;
pub use error::ScraperError;
pub use extract::CompiledSelectors;
