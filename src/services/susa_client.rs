//! SUSA-navet catalog API client
//!
//! Fetches the two vocational-education collections the pipeline joins:
//! program descriptors (`/infos`) and program offering events (`/events`).
//! Both are fetched as a single page far larger than any realistic
//! collection size, so pagination never applies.
//!
//! Wire types mirror the feed's own nesting: every page wraps entries in a
//! `content` field, and every entry wraps its record in another `content`
//! field. Page and entry envelopes are required (a response without them is
//! a parse failure); everything inside a record is optional and handled by
//! the aggregator's skip-with-warning policy.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::config::TomlConfig;
use crate::error::{ImportError, Result};

const USER_AGENT: &str = "susa-aub/0.1.0";

/// Scalar that arrives as either a JSON string or a JSON number
///
/// The SUSA feeds are inconsistent here: classification codes and town names
/// show up in both forms. [`TextOrNumber::as_text`] renders numbers exactly
/// as their JSON literal.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    /// Coerce to text
    pub fn as_text(&self) -> String {
        match self {
            TextOrNumber::Text(text) => text.clone(),
            TextOrNumber::Number(number) => number.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Program descriptor feed (/infos)
// ---------------------------------------------------------------------------

/// One page of the program descriptor collection
#[derive(Debug, Clone, Deserialize)]
pub struct InfoPage {
    /// Entries in feed order
    pub content: Vec<InfoEntry>,
}

/// Entry envelope of the descriptor feed
#[derive(Debug, Clone, Deserialize)]
pub struct InfoEntry {
    pub content: InfoBody,
}

/// Record kind wrapper of the descriptor feed
#[derive(Debug, Clone, Deserialize)]
pub struct InfoBody {
    /// The descriptor record; absent for entries of another record kind
    #[serde(rename = "educationInfo")]
    pub education_info: Option<EducationInfo>,
}

/// One vocational training program descriptor
#[derive(Debug, Clone, Deserialize)]
pub struct EducationInfo {
    /// Unique program identifier, the join key against offering events
    pub identifier: Option<String>,
    /// Program title
    pub title: Option<LocalizedText>,
    /// Program description; may carry CDATA wrapping markers
    pub description: Option<LocalizedText>,
    /// Catalog page links
    pub url: Option<UrlField>,
    /// Classification subjects of mixed types
    pub subject: Option<Vec<SubjectTag>>,
}

/// Localized text container (`{"string": [{"content": "..."}]}`)
#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub string: Vec<TextItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextItem {
    pub content: Option<String>,
}

/// URL container (`{"url": [{"content": "..."}]}`)
#[derive(Debug, Clone, Deserialize)]
pub struct UrlField {
    #[serde(default)]
    pub url: Vec<UrlItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UrlItem {
    pub content: Option<String>,
}

/// One classification subject entry
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectTag {
    /// Subject type; only `"AUB_Subject"` entries carry SSYK codes
    #[serde(rename = "type")]
    pub subject_type: Option<String>,
    /// Classification code (string or number, feed-dependent)
    pub code: Option<TextOrNumber>,
}

// ---------------------------------------------------------------------------
// Program event feed (/events)
// ---------------------------------------------------------------------------

/// One page of the program event collection
#[derive(Debug, Clone, Deserialize)]
pub struct EventPage {
    /// Entries in feed order
    pub content: Vec<EventEntry>,
}

/// Entry envelope of the event feed
#[derive(Debug, Clone, Deserialize)]
pub struct EventEntry {
    pub content: EventBody,
}

/// Record kind wrapper of the event feed
#[derive(Debug, Clone, Deserialize)]
pub struct EventBody {
    /// The event record; absent for entries of another record kind
    #[serde(rename = "educationEvent")]
    pub education_event: Option<EducationEvent>,
}

/// One concrete offering of a program
#[derive(Debug, Clone, Deserialize)]
pub struct EducationEvent {
    /// Foreign key into [`EducationInfo::identifier`]
    pub education: Option<String>,
    /// Offering locations; absent for distance/unscheduled offerings
    pub location: Option<Vec<EventLocation>>,
}

/// One location element of an offering event
#[derive(Debug, Clone, Deserialize)]
pub struct EventLocation {
    /// Town name (string or number, feed-dependent)
    pub town: Option<TextOrNumber>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// SUSA-navet API client
pub struct SusaClient {
    http_client: reqwest::Client,
    base_url: String,
    page_size: u32,
}

impl SusaClient {
    /// Create a new client from bootstrap configuration
    pub fn new(config: &TomlConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ImportError::Fetch(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }

    /// Fetch the vocational program descriptor collection
    pub async fn fetch_program_infos(&self) -> Result<InfoPage> {
        let page: InfoPage = self.fetch_collection("infos").await?;
        tracing::info!(programs = page.content.len(), "Fetched program descriptor collection");
        Ok(page)
    }

    /// Fetch the program offering event collection
    pub async fn fetch_program_events(&self) -> Result<EventPage> {
        let page: EventPage = self.fetch_collection("events").await?;
        tracing::info!(events = page.content.len(), "Fetched program event collection");
        Ok(page)
    }

    /// Fetch one collection endpoint as a single oversized page
    ///
    /// The body is read as text and parsed separately so that network
    /// failures surface as `Fetch` and malformed JSON as `Parse`.
    async fn fetch_collection<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = collection_url(&self.base_url, endpoint, self.page_size);

        tracing::debug!(url = %url, "Querying SUSA-navet API");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ImportError::Fetch(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImportError::Api(status.as_u16(), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ImportError::Fetch(e.to_string()))?;

        serde_json::from_str(&body)
            .map_err(|e| ImportError::Parse(format!("{} response: {}", endpoint, e)))
    }
}

/// Build a collection URL with the fixed vocational filter and page window
fn collection_url(base_url: &str, endpoint: &str, page_size: u32) -> String {
    format!(
        "{}/{}?vocational=true&page=0&size={}",
        base_url, endpoint, page_size
    )
}
