//! SSYK classification aggregator
//!
//! Stage 3 of the import pipeline: turns program descriptors plus the
//! offering location index into the per-SSYK training catalog.
//!
//! A program contributes records only when it has at least one located
//! offering AND at least one `AUB_Subject` classification. The record's
//! city is always the FIRST town of the winning offering event - never the
//! full town list.

use std::collections::BTreeMap;

use crate::error::ImportError;
use crate::models::{TrainingCatalog, TrainingRecord};
use crate::services::location_index::LocationIndex;
use crate::services::susa_client::{EducationInfo, InfoPage, LocalizedText};

/// Subject type marker whose entries carry SSYK codes
pub const AUB_SUBJECT_TYPE: &str = "AUB_Subject";

/// Aggregate program descriptors into the SSYK training catalog
///
/// **Algorithm (per descriptor):**
/// 1. Look up the descriptor's towns in the location index; no entry means
///    the program has no located offering and contributes nothing
/// 2. Collect the codes of its `AUB_Subject` subjects (coerced to text);
///    an empty set means the program contributes nothing
/// 3. Build ONE normalized record (title/description/url first localized
///    content, CDATA markers stripped, city = first town)
/// 4. Append that same record to every collected code's bucket
///
/// Afterwards every bucket is sorted ascending by city (stable, so feed
/// order is preserved among equal cities).
///
/// Descriptors missing expected nested fields are skipped with a warning
/// rather than failing the whole run; partial results serve the consuming
/// dashboard better than none.
pub fn aggregate_by_ssyk(infos: &InfoPage, locations: &LocationIndex) -> TrainingCatalog {
    let mut buckets: BTreeMap<String, Vec<TrainingRecord>> = BTreeMap::new();
    let mut skipped_malformed = 0usize;

    for entry in &infos.content {
        let Some(info) = entry.content.education_info.as_ref() else {
            tracing::warn!("Descriptor entry without educationInfo record, skipping");
            skipped_malformed += 1;
            continue;
        };

        let Some(identifier) = info.identifier.as_deref() else {
            tracing::warn!("Descriptor without identifier, skipping");
            skipped_malformed += 1;
            continue;
        };

        // Programs without a located offering contribute to no bucket
        let Some(city) = locations.first_town(identifier) else {
            continue;
        };

        let codes = ssyk_codes(info);
        if codes.is_empty() {
            continue;
        }

        let record = match build_record(info, city) {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!(identifier = %identifier, %error, "Skipping malformed descriptor");
                skipped_malformed += 1;
                continue;
            }
        };

        // Multi-code programs carry an identical record in every bucket
        for code in codes {
            buckets.entry(code).or_default().push(record.clone());
        }
    }

    for records in buckets.values_mut() {
        // Stable: ties keep insertion (feed) order
        records.sort_by(|a, b| a.city.cmp(&b.city));
    }

    tracing::debug!(
        descriptors = infos.content.len(),
        buckets = buckets.len(),
        skipped_malformed,
        "Aggregated training catalog"
    );

    TrainingCatalog::from_buckets(buckets)
}

/// SSYK codes of a descriptor's `AUB_Subject` subjects, coerced to text
///
/// Subject entries of other types are ignored; AUB entries without a code
/// are dropped. Duplicate codes are kept as-is and produce duplicate
/// records, matching the feed's semantics.
fn ssyk_codes(info: &EducationInfo) -> Vec<String> {
    info.subject
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter(|subject| subject.subject_type.as_deref() == Some(AUB_SUBJECT_TYPE))
        .filter_map(|subject| subject.code.as_ref())
        .map(|code| code.as_text())
        .collect()
}

/// Build the normalized training record for one descriptor
fn build_record(info: &EducationInfo, city: &str) -> Result<TrainingRecord, ImportError> {
    let name = first_text(info.title.as_ref())
        .ok_or_else(|| missing_field(info, "title.string[0].content"))?;
    let description = first_text(info.description.as_ref())
        .ok_or_else(|| missing_field(info, "description.string[0].content"))?;
    let url = info
        .url
        .as_ref()
        .and_then(|field| field.url.first())
        .and_then(|item| item.content.clone())
        .ok_or_else(|| missing_field(info, "url.url[0].content"))?;

    Ok(TrainingRecord {
        name,
        description: strip_cdata_markers(&description),
        url,
        city: city.to_string(),
    })
}

/// First localized string content of a title/description field
fn first_text(field: Option<&LocalizedText>) -> Option<String> {
    field
        .and_then(|text| text.string.first())
        .and_then(|item| item.content.clone())
}

fn missing_field(info: &EducationInfo, path: &str) -> ImportError {
    ImportError::Structural(format!(
        "Descriptor {} is missing {}",
        info.identifier.as_deref().unwrap_or("<unidentified>"),
        path
    ))
}

/// Remove the literal CDATA wrapping markers wherever they occur
fn strip_cdata_markers(description: &str) -> String {
    description.replace("<![CDATA[", "").replace("]]>", "")
}
