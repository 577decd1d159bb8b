//! Offering location index
//!
//! Stage 2 of the import pipeline: maps each education identifier to the
//! ordered list of towns where that program is offered, derived from the
//! program event collection.

use std::collections::HashMap;

use crate::services::susa_client::EventPage;

/// Education identifier → towns with at least one recorded offering
///
/// Invariant: the index never holds an empty town list. Events without
/// location data (for example distance offerings) simply have no entry.
///
/// When several events reference the same education identifier, the later
/// event in feed order wins wholesale (last-write-wins, no merge). Which
/// event wins therefore depends on input ordering; this is the feed's
/// contract as consumed today, kept as-is.
#[derive(Debug, Default)]
pub struct LocationIndex {
    towns_by_education: HashMap<String, Vec<String>>,
}

impl LocationIndex {
    /// Build the index from one fetched event collection
    ///
    /// **Algorithm:**
    /// 1. For every event entry, take its `educationEvent` record
    /// 2. Collect the `town` of each `location` element in source order,
    ///    coerced to text; elements without a town are skipped
    /// 3. Store non-empty town lists under the event's `education`
    ///    identifier, overwriting any earlier entry
    pub fn from_events(events: &EventPage) -> Self {
        let mut towns_by_education: HashMap<String, Vec<String>> = HashMap::new();

        for entry in &events.content {
            let Some(event) = entry.content.education_event.as_ref() else {
                tracing::warn!("Event entry without educationEvent record, skipping");
                continue;
            };

            let Some(locations) = event.location.as_ref() else {
                // No location data: normal for distance offerings
                continue;
            };

            let towns: Vec<String> = locations
                .iter()
                .filter_map(|location| location.town.as_ref())
                .map(|town| town.as_text())
                .collect();

            if towns.is_empty() {
                continue;
            }

            let Some(education) = event.education.as_ref() else {
                tracing::warn!(
                    towns = towns.len(),
                    "Located event without education identifier, skipping"
                );
                continue;
            };

            towns_by_education.insert(education.clone(), towns);
        }

        tracing::debug!(
            events = events.content.len(),
            indexed = towns_by_education.len(),
            "Built offering location index"
        );

        Self { towns_by_education }
    }

    /// Towns for one education identifier, in source order
    pub fn towns(&self, education_id: &str) -> Option<&[String]> {
        self.towns_by_education
            .get(education_id)
            .map(|towns| towns.as_slice())
    }

    /// First town for one education identifier
    pub fn first_town(&self, education_id: &str) -> Option<&str> {
        self.towns(education_id)
            .and_then(|towns| towns.first())
            .map(|town| town.as_str())
    }

    /// Number of indexed education identifiers
    pub fn len(&self) -> usize {
        self.towns_by_education.len()
    }

    pub fn is_empty(&self) -> bool {
        self.towns_by_education.is_empty()
    }
}
