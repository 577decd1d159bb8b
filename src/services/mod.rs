//! Service modules for the SUSA-navet catalog import
//!
//! The pipeline stages live here: the HTTP client, the offering location
//! index, the SSYK aggregator, and the orchestrator that wires them
//! together. `catalog_cache` serves assembled catalogs to long-running
//! embedders.

pub mod catalog_cache;
pub mod import_pipeline;
pub mod location_index;
pub mod ssyk_aggregator;
pub mod susa_client;

pub use catalog_cache::CatalogCache;
pub use import_pipeline::{assemble_catalog, ImportPipeline};
pub use location_index::LocationIndex;
pub use ssyk_aggregator::{aggregate_by_ssyk, AUB_SUBJECT_TYPE};
pub use susa_client::{EventPage, InfoPage, SusaClient};
