//! Import pipeline orchestrator
//!
//! Drives one catalog import end to end: fetch both SUSA-navet collections
//! concurrently, index offering locations, aggregate descriptors into SSYK
//! buckets. The pure assembly step is exposed separately so tests can run
//! the full join/aggregate path on captured payloads without a network.

use crate::config::TomlConfig;
use crate::error::Result;
use crate::models::TrainingCatalog;
use crate::services::location_index::LocationIndex;
use crate::services::ssyk_aggregator::aggregate_by_ssyk;
use crate::services::susa_client::{EventPage, InfoPage, SusaClient};

/// One-shot import pipeline over the SUSA-navet catalog API
pub struct ImportPipeline {
    client: SusaClient,
}

impl ImportPipeline {
    /// Create a pipeline with a client configured per `config`
    pub fn new(config: &TomlConfig) -> Result<Self> {
        Ok(Self {
            client: SusaClient::new(config)?,
        })
    }

    /// Run one full import: fetch, join, aggregate
    ///
    /// The two collection fetches run concurrently; the first failure
    /// aborts the run. Join and aggregation never fail, so a returned
    /// error is always a fetch, API, or parse problem.
    pub async fn run(&self) -> Result<TrainingCatalog> {
        tracing::info!("Starting SUSA-navet catalog import");

        let (infos, events) = tokio::try_join!(
            self.client.fetch_program_infos(),
            self.client.fetch_program_events(),
        )?;

        let catalog = assemble_catalog(&infos, &events);

        tracing::info!(
            buckets = catalog.bucket_count(),
            records = catalog.record_count(),
            "Catalog import complete"
        );

        Ok(catalog)
    }
}

/// Assemble a training catalog from already-fetched collection pages
///
/// Pure function: builds the location index from the events page, then
/// aggregates the descriptor page against it.
pub fn assemble_catalog(infos: &InfoPage, events: &EventPage) -> TrainingCatalog {
    let locations = LocationIndex::from_events(events);
    tracing::info!(located_programs = locations.len(), "Location index built");

    aggregate_by_ssyk(infos, &locations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_builds_from_default_config() {
        let config = TomlConfig::default();
        assert!(ImportPipeline::new(&config).is_ok());
    }

    #[test]
    fn assemble_joins_and_aggregates() {
        let infos: InfoPage = serde_json::from_str(
            r#"{"content": [
                {"content": {"educationInfo": {
                    "identifier": "E1",
                    "title": {"string": [{"content": "Truckförarutbildning"}]},
                    "description": {"string": [{"content": "<![CDATA[Truckkort A+B]]>"}]},
                    "url": {"url": [{"content": "http://truck"}]},
                    "subject": [{"type": "AUB_Subject", "code": "8344"}]
                }}}
            ]}"#,
        )
        .unwrap();
        let events: EventPage = serde_json::from_str(
            r#"{"content": [
                {"content": {"educationEvent": {
                    "education": "E1",
                    "location": [{"town": "Gävle"}]
                }}}
            ]}"#,
        )
        .unwrap();

        let catalog = assemble_catalog(&infos, &events);

        let records = catalog.records_for_code("8344").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Truckförarutbildning");
        assert_eq!(records[0].description, "Truckkort A+B");
        assert_eq!(records[0].city, "Gävle");
    }

    #[test]
    fn assemble_is_idempotent_over_the_same_pages() {
        let infos: InfoPage = serde_json::from_str(
            r#"{"content": [
                {"content": {"educationInfo": {
                    "identifier": "E1",
                    "title": {"string": [{"content": "Svets"}]},
                    "description": {"string": [{"content": "-"}]},
                    "url": {"url": [{"content": "http://s"}]},
                    "subject": [{"type": "AUB_Subject", "code": "7212"}]
                }}}
            ]}"#,
        )
        .unwrap();
        let events: EventPage = serde_json::from_str(
            r#"{"content": [
                {"content": {"educationEvent": {
                    "education": "E1",
                    "location": [{"town": "Kiruna"}]
                }}}
            ]}"#,
        )
        .unwrap();

        let first = assemble_catalog(&infos, &events);
        let second = assemble_catalog(&infos, &events);
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }
}
