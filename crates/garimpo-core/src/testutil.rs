//! Test utilities: mock implementations of all core traits.
//!
//! Handwritten mocks for dependency injection in unit tests.
//! All mocks use `Arc<Mutex<_>>` for interior mutability, allowing
//! test assertions on recorded calls.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{JobCandidate, JobRecord, SourceTag, UpsertOutcome};
use crate::traits::{JobStore, QueryEnhancer, SourceRegistry, Summarizer};

/// Build a minimal candidate for tests.
pub fn make_candidate(url: &str, source: SourceTag) -> JobCandidate {
    JobCandidate {
        title: format!("Job at {url}"),
        company: "Acme".to_string(),
        location: "Remote".to_string(),
        description: String::new(),
        url: url.to_string(),
        source,
        salary: None,
        tags: None,
        posted_at: None,
        external_id: None,
    }
}

/// Build a record as the store would create it from a candidate.
pub fn make_record(candidate: &JobCandidate) -> JobRecord {
    let now = Utc::now();
    JobRecord {
        id: Uuid::new_v4(),
        external_id: candidate.external_id.clone(),
        title: candidate.title.clone(),
        company: candidate.company.clone(),
        location: candidate.location.clone(),
        description: candidate.description.clone(),
        url: candidate.url.clone(),
        source: candidate.source.label().to_string(),
        salary: candidate.salary.clone(),
        tags: candidate.tags.clone(),
        ai_summary: None,
        posted_at: candidate.posted_at,
        created_at: now,
        updated_at: now,
        is_favorite: false,
        is_submitted: false,
        favorited_at: None,
        submitted_at: None,
    }
}

// ---------------------------------------------------------------------------
// MockRegistry
// ---------------------------------------------------------------------------

/// Mock source registry with per-tag canned responses and call recording.
/// Tags without a configured response return an empty batch.
#[derive(Clone, Default)]
pub struct MockRegistry {
    responses: Arc<Mutex<HashMap<SourceTag, Result<Vec<JobCandidate>, String>>>>,
    calls: Arc<Mutex<Vec<SourceTag>>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a tag to return the given candidates.
    pub fn source(self, tag: SourceTag, jobs: Vec<JobCandidate>) -> Self {
        self.responses.lock().unwrap().insert(tag, Ok(jobs));
        self
    }

    /// Configure a tag to fail.
    pub fn failing(self, tag: SourceTag, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(tag, Err(message.to_string()));
        self
    }

    /// Tags fetched so far, in call order.
    pub fn calls(&self) -> Vec<SourceTag> {
        self.calls.lock().unwrap().clone()
    }
}

impl SourceRegistry for MockRegistry {
    async fn fetch(
        &self,
        tag: SourceTag,
        _keywords: &str,
        _location: &str,
    ) -> Result<Vec<JobCandidate>, AppError> {
        self.calls.lock().unwrap().push(tag);
        match self.responses.lock().unwrap().get(&tag) {
            Some(Ok(jobs)) => Ok(jobs.clone()),
            Some(Err(message)) => Err(AppError::Generic(message.clone())),
            None => Ok(Vec::new()),
        }
    }
}

// ---------------------------------------------------------------------------
// MockJobStore
// ---------------------------------------------------------------------------

/// In-memory job store keyed by URL, mirroring the repository's upsert
/// semantics: descriptive fields refresh, user state and summaries survive.
#[derive(Clone, Default)]
pub struct MockJobStore {
    records: Arc<Mutex<HashMap<String, JobRecord>>>,
    fail_urls: Arc<Mutex<HashSet<String>>>,
}

impl MockJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with pre-existing records.
    pub fn with_existing(records: Vec<JobRecord>) -> Self {
        let store = Self::default();
        {
            let mut map = store.records.lock().unwrap();
            for record in records {
                map.insert(record.url.clone(), record);
            }
        }
        store
    }

    /// Make upserts for this URL fail with a database error.
    pub fn fail_url(&self, url: &str) {
        self.fail_urls.lock().unwrap().insert(url.to_string());
    }

    pub fn get(&self, url: &str) -> Option<JobRecord> {
        self.records.lock().unwrap().get(url).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl JobStore for MockJobStore {
    async fn upsert(&self, candidate: &JobCandidate) -> Result<UpsertOutcome, AppError> {
        if self.fail_urls.lock().unwrap().contains(&candidate.url) {
            return Err(AppError::DatabaseError(format!(
                "simulated failure for {}",
                candidate.url
            )));
        }

        let mut records = self.records.lock().unwrap();
        match records.get_mut(&candidate.url) {
            Some(existing) => {
                existing.title = candidate.title.clone();
                existing.company = candidate.company.clone();
                existing.location = candidate.location.clone();
                existing.description = candidate.description.clone();
                existing.source = candidate.source.label().to_string();
                existing.salary = candidate.salary.clone();
                existing.tags = candidate.tags.clone();
                existing.posted_at = candidate.posted_at;
                existing.updated_at = Utc::now();
                Ok(UpsertOutcome {
                    record: existing.clone(),
                    created: false,
                })
            }
            None => {
                let record = make_record(candidate);
                records.insert(candidate.url.clone(), record.clone());
                Ok(UpsertOutcome {
                    record,
                    created: true,
                })
            }
        }
    }

    async fn set_ai_summary(&self, id: Uuid, summary: &str) -> Result<(), AppError> {
        let mut records = self.records.lock().unwrap();
        match records.values_mut().find(|r| r.id == id) {
            Some(record) => {
                record.ai_summary = Some(summary.to_string());
                Ok(())
            }
            None => Err(AppError::DatabaseError(format!("no record with id {id}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// MockEnhancer
// ---------------------------------------------------------------------------

/// Mock query enhancer returning a fixed rewrite (or none).
#[derive(Clone, Default)]
pub struct MockEnhancer {
    rewrite: Option<String>,
}

impl MockEnhancer {
    /// Enhancer with no credential: every call is a no-op.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Enhancer that always rewrites to the given query.
    pub fn rewriting(query: &str) -> Self {
        Self {
            rewrite: Some(query.to_string()),
        }
    }
}

impl QueryEnhancer for MockEnhancer {
    fn is_configured(&self) -> bool {
        self.rewrite.is_some()
    }

    async fn enhance(&self, _keywords: &str, _location: &str) -> Option<String> {
        self.rewrite.clone()
    }
}

// ---------------------------------------------------------------------------
// MockSummarizer
// ---------------------------------------------------------------------------

/// Mock summarizer recording every call; configurable per-title failures.
#[derive(Clone)]
pub struct MockSummarizer {
    configured: bool,
    fail_titles: Arc<Mutex<HashSet<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self {
            configured: true,
            fail_titles: Arc::default(),
            calls: Arc::default(),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Make summarization of this title return `None`.
    pub fn fail_title(&self, title: &str) {
        self.fail_titles.lock().unwrap().insert(title.to_string());
    }

    /// Titles summarized so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Summarizer for MockSummarizer {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn summarize(&self, title: &str, _company: &str, _description: &str) -> Option<String> {
        self.calls.lock().unwrap().push(title.to_string());
        if self.fail_titles.lock().unwrap().contains(title) {
            None
        } else {
            Some(format!("Resumo: {title}"))
        }
    }
}
