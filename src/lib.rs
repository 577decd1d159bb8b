//! susa-aub library interface
//!
//! Imports the vocational ("AUB") slice of the Swedish SUSA-navet
//! education catalog and aggregates it into per-SSYK training buckets.
//! The binary runs one import and writes the artifact; embedders can use
//! the library pieces directly (fetch, assemble, cache, artifact I/O).

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::config::TomlConfig;
pub use crate::error::{ImportError, Result};
pub use crate::models::{TrainingCatalog, TrainingRecord};
pub use crate::services::{CatalogCache, ImportPipeline};
