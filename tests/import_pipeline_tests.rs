//! Import pipeline integration tests
//!
//! Runs the full join/aggregate path over captured SUSA-navet payloads
//! (tests/fixtures/) and checks the catalog contract end to end: bucket
//! membership, record normalization, duplication across codes, event
//! precedence, and city ordering.

use susa_aub::services::{assemble_catalog, EventPage, InfoPage};
use susa_aub::{TrainingCatalog, TrainingRecord};

const INFOS_JSON: &str = include_str!("fixtures/susa_infos.json");
const EVENTS_JSON: &str = include_str!("fixtures/susa_events.json");

fn fixture_catalog() -> TrainingCatalog {
    let infos: InfoPage = serde_json::from_str(INFOS_JSON).expect("infos fixture must parse");
    let events: EventPage = serde_json::from_str(EVENTS_JSON).expect("events fixture must parse");
    assemble_catalog(&infos, &events)
}

// =============================================================================
// Bucket membership
// =============================================================================

/// The fixture set exercises every exclusion rule at once:
/// - susa:utb:1003 has only SUN subjects (no AUB classification)
/// - susa:utb:1004 has no offering event at all
/// - susa:utb:1007 is malformed (no description) and is skipped
/// - susa:evt:2009 points at an education id with no descriptor
#[test]
fn catalog_contains_exactly_the_qualifying_buckets() {
    let catalog = fixture_catalog();

    assert_eq!(
        catalog.codes().collect::<Vec<_>>(),
        vec!["5223", "7212", "7213", "8331", "8344"]
    );
    assert_eq!(catalog.record_count(), 6);
}

#[test]
fn programs_without_aub_subject_or_location_never_surface() {
    let catalog = fixture_catalog();

    assert!(catalog.records_for_code("214").is_none(), "SUN code must not become a bucket");
    assert!(catalog.records_for_code("7113").is_none(), "unlocated program must not surface");
    assert!(catalog.records_for_code("9999").is_none(), "malformed descriptor must be skipped");
}

// =============================================================================
// Record normalization
// =============================================================================

#[test]
fn welding_record_is_normalized() {
    let catalog = fixture_catalog();
    let records = catalog.records_for_code("7212").expect("welding bucket exists");

    assert_eq!(
        records,
        &[TrainingRecord {
            name: "Svetsutbildning MMA och MIG/MAG".to_string(),
            description: "<p>Grundläggande svetsutbildning med licensprov.</p>".to_string(),
            url: "https://utbildning.example.se/svets".to_string(),
            city: "Malmö".to_string(),
        }],
        "CDATA markers are stripped, inner markup kept, city is the first town"
    );
}

#[test]
fn multi_code_program_duplicates_field_for_field() {
    let catalog = fixture_catalog();

    let welding = catalog.records_for_code("7212").unwrap();
    let sheet_metal = catalog.records_for_code("7213").unwrap();
    assert_eq!(welding, sheet_metal, "the numeric 7213 code coerces and carries the same record");
}

#[test]
fn only_the_first_town_becomes_a_record_city() {
    let catalog = fixture_catalog();

    // susa:utb:1001 is offered in Malmö and Lund; only Malmö may appear
    for code in catalog.codes() {
        for record in catalog.records_for_code(code).unwrap() {
            assert_ne!(record.city, "Lund", "second town of an offering leaked into {code}");
        }
    }
}

#[test]
fn townless_location_entries_are_filtered_not_defaulted() {
    let catalog = fixture_catalog();

    // susa:evt:2008's first location entry has no town at all
    let records = catalog.records_for_code("5223").unwrap();
    assert_eq!(records[0].city, "Örebro");
}

// =============================================================================
// Event precedence
// =============================================================================

#[test]
fn later_located_event_wins() {
    let catalog = fixture_catalog();

    // susa:utb:1002 has events in Södertälje then Gävle; the later one wins
    let records = catalog.records_for_code("8344").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].city, "Gävle");
}

#[test]
fn unlocated_later_event_does_not_erase_an_earlier_one() {
    let catalog = fixture_catalog();

    // susa:evt:2010 (no location) follows the Umeå event for susa:utb:1005
    let cities: Vec<&str> = catalog
        .records_for_code("8331")
        .unwrap()
        .iter()
        .map(|r| r.city.as_str())
        .collect();
    assert!(cities.contains(&"Umeå"));
}

// =============================================================================
// Ordering and determinism
// =============================================================================

#[test]
fn buckets_sort_ascending_by_city() {
    let catalog = fixture_catalog();

    let cities: Vec<&str> = catalog
        .records_for_code("8331")
        .unwrap()
        .iter()
        .map(|r| r.city.as_str())
        .collect();
    assert_eq!(cities, vec!["Arvika", "Umeå"]);
}

#[test]
fn assembling_the_same_pages_twice_is_identical() {
    let first = fixture_catalog().to_json().unwrap();
    let second = fixture_catalog().to_json().unwrap();
    assert_eq!(first, second);
}

// =============================================================================
// Artifact shape
// =============================================================================

#[test]
fn artifact_uses_swedish_keys_under_a_flat_code_map() {
    let catalog = fixture_catalog();
    let value: serde_json::Value = serde_json::from_str(&catalog.to_json().unwrap()).unwrap();

    let record = &value["7212"][0];
    assert_eq!(record["utbildningsnamn"], "Svetsutbildning MMA och MIG/MAG");
    assert_eq!(record["ort"], "Malmö");
    assert!(record["beskrivning"].is_string());
    assert!(record["url"].is_string());

    // No envelope around the code map and no English field names
    assert!(value.get("content").is_none());
    assert!(record.get("name").is_none());
    assert!(record.get("city").is_none());
}
