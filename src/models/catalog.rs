//! SSYK training catalog
//!
//! Final output of the import pipeline: classification code → training
//! records, plus the artifact I/O the dashboard hand-off relies on
//! (`SUSA_AUB.json`).

use crate::error::{ImportError, Result};
use crate::models::TrainingRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Training records bucketed by SSYK classification code
///
/// Serializes flat, so the artifact is exactly
/// `{ "<code>": [ { "utbildningsnamn": …, … }, … ], … }`.
///
/// Invariants:
/// - every bucket is sorted ascending by `city` (stable)
/// - a program appears only if it has at least one located offering and at
///   least one `AUB_Subject` classification
/// - a program with several codes carries an identical record in each bucket
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainingCatalog {
    #[serde(flatten)]
    buckets: BTreeMap<String, Vec<TrainingRecord>>,
}

impl TrainingCatalog {
    pub(crate) fn from_buckets(buckets: BTreeMap<String, Vec<TrainingRecord>>) -> Self {
        Self { buckets }
    }

    /// Records for one SSYK code
    ///
    /// `None` means "no training data for this code" - a normal, expected
    /// case for the consuming UI, never an error.
    pub fn records_for_code(&self, code: &str) -> Option<&[TrainingRecord]> {
        self.buckets.get(code).map(|records| records.as_slice())
    }

    /// Records for a broader occupation-group code
    ///
    /// The dashboard keys occupation groups by strings that start with the
    /// four-character SSYK code (e.g. `"7212 Svetsare och gasskärare"`);
    /// lookup slices that prefix. Codes shorter than four characters cannot
    /// name a group and always miss.
    pub fn records_for_group(&self, group_code: &str) -> Option<&[TrainingRecord]> {
        self.records_for_code(ssyk_prefix(group_code)?)
    }

    /// Iterate classification codes in ascending order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(|code| code.as_str())
    }

    /// Number of classification buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of training records across all buckets
    pub fn record_count(&self) -> usize {
        self.buckets.values().map(|records| records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Serialize to a compact JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ImportError::Parse(format!("Failed to serialize catalog: {}", e)))
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ImportError::Parse(format!("Failed to parse catalog: {}", e)))
    }

    /// Write the artifact file (pretty-printed JSON)
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImportError::Parse(format!("Failed to serialize catalog: {}", e)))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read an artifact file written by [`TrainingCatalog::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

/// First four characters of an occupation-group code (char boundary safe)
fn ssyk_prefix(group_code: &str) -> Option<&str> {
    let mut indices = group_code.char_indices();
    indices.nth(3)?; // fewer than four characters: no prefix
    match indices.next() {
        Some((idx, _)) => Some(&group_code[..idx]),
        None => Some(group_code),
    }
}
