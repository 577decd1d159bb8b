//! Normalized training record
//!
//! One entry of a classification bucket: the tuple the dashboard renders as
//! "city - link(name)" with the description as hover text.

use serde::{Deserialize, Serialize};

/// One vocational training offer, normalized for the dashboard
///
/// Serialized field names are the Swedish keys the occupation-information
/// dashboard reads (`utbildningsnamn`, `beskrivning`, `url`, `ort`); they are
/// part of the artifact contract and must not change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainingRecord {
    /// Program title (first localized string of the descriptor)
    #[serde(rename = "utbildningsnamn")]
    pub name: String,

    /// Program description with CDATA wrapping markers stripped
    #[serde(rename = "beskrivning")]
    pub description: String,

    /// Link to the program's catalog page
    pub url: String,

    /// City where the program is offered
    ///
    /// Always the FIRST city of the winning offering event's location list,
    /// never the full list. Which event wins follows feed order
    /// (last-write-wins in the location index).
    #[serde(rename = "ort")]
    pub city: String,
}
