use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id of the single search-config row.
pub const DEFAULT_CONFIG_ID: &str = "default";

/// Closed set of job sources. Registration order is fixed by [`SourceTag::ALL`]
/// and determines merge order in the orchestrator; adding a source means adding
/// a variant here and a match arm in the registry — both compile-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    JSearch,
    Jooble,
    Remotive,
    Arbeitnow,
    LinkedIn,
    Catho,
    #[serde(rename = "google")]
    GoogleJobs,
    WebSearch,
}

impl SourceTag {
    pub const ALL: [SourceTag; 8] = [
        SourceTag::JSearch,
        SourceTag::Jooble,
        SourceTag::Remotive,
        SourceTag::Arbeitnow,
        SourceTag::LinkedIn,
        SourceTag::Catho,
        SourceTag::GoogleJobs,
        SourceTag::WebSearch,
    ];

    /// Machine form, used in the comma-joined `enabled_sources` config field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::JSearch => "jsearch",
            SourceTag::Jooble => "jooble",
            SourceTag::Remotive => "remotive",
            SourceTag::Arbeitnow => "arbeitnow",
            SourceTag::LinkedIn => "linkedin",
            SourceTag::Catho => "catho",
            SourceTag::GoogleJobs => "google",
            SourceTag::WebSearch => "websearch",
        }
    }

    /// Display form, stored on persisted records.
    pub fn label(&self) -> &'static str {
        match self {
            SourceTag::JSearch => "JSearch",
            SourceTag::Jooble => "Jooble",
            SourceTag::Remotive => "Remotive",
            SourceTag::Arbeitnow => "Arbeitnow",
            SourceTag::LinkedIn => "LinkedIn",
            SourceTag::Catho => "Catho",
            SourceTag::GoogleJobs => "Google Jobs",
            SourceTag::WebSearch => "Web Search",
        }
    }
}

impl std::str::FromStr for SourceTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        SourceTag::ALL
            .iter()
            .find(|t| t.as_str() == tag)
            .copied()
            .ok_or_else(|| format!("unknown source tag: {s}"))
    }
}

impl std::fmt::Display for SourceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized job posting produced by one adapter invocation.
///
/// Ephemeral: flows from an adapter through the orchestrator merge into a
/// single upsert, then is discarded. `url` is the dedup key; `external_id`
/// is advisory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobCandidate {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    pub source: SourceTag,
    pub salary: Option<String>,
    /// Comma-joined list when present.
    pub tags: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
    pub external_id: Option<String>,
}

/// A persisted job posting.
///
/// Descriptive fields are refreshed on every re-aggregation of the same URL;
/// `is_favorite`, `is_submitted`, their paired timestamps and `ai_summary`
/// belong to the user/enrichment and survive updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: Uuid,
    pub external_id: Option<String>,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    pub source: String,
    pub salary: Option<String>,
    pub tags: Option<String>,
    pub ai_summary: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_favorite: bool,
    pub is_submitted: bool,
    pub favorited_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Result of a single upsert: the stored record and whether it was created
/// (as opposed to refreshed). Newly created records feed the enrichment batch.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub record: JobRecord,
    pub created: bool,
}

/// The singleton search configuration row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub id: String,
    pub keywords: String,
    pub location: String,
    pub interval_hours: i32,
    /// Comma-joined [`SourceTag`] machine forms; empty means "all sources".
    pub enabled_sources: String,
    pub last_search_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl SearchConfig {
    /// Parse `enabled_sources`, skipping unknown tags so a config written by
    /// a newer build degrades gracefully.
    pub fn enabled_tags(&self) -> Vec<SourceTag> {
        self.enabled_sources
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| s.parse().ok())
            .collect()
    }
}

/// Aggregate counters for one search run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    pub found: usize,
    pub saved: usize,
    pub summarized: usize,
    pub query_rewritten: bool,
    /// The query actually sent to the sources, for comparison with the
    /// configured keywords.
    pub query: String,
}
