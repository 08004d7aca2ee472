use std::future::Future;

use uuid::Uuid;

use crate::error::AppError;
use crate::models::{JobCandidate, SourceTag, UpsertOutcome};

/// Fetches candidates from one registered source.
///
/// Implementations dispatch on the closed [`SourceTag`] enum, so registering
/// a new source is a compile-time-checked match arm rather than a runtime
/// lookup. A failed fetch returns `Err`; the orchestrator discards it without
/// surfacing anything to the caller.
pub trait SourceRegistry: Send + Sync {
    fn fetch(
        &self,
        tag: SourceTag,
        keywords: &str,
        location: &str,
    ) -> impl Future<Output = Result<Vec<JobCandidate>, AppError>> + Send;
}

/// Persists candidates keyed by URL.
///
/// `upsert` must refresh descriptive fields only: favorite/submitted state
/// and the AI summary of an existing record are never touched by
/// re-aggregation.
pub trait JobStore: Send + Sync {
    fn upsert(
        &self,
        candidate: &JobCandidate,
    ) -> impl Future<Output = Result<UpsertOutcome, AppError>> + Send;

    fn set_ai_summary(
        &self,
        id: Uuid,
        summary: &str,
    ) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// Rewrites the configured keywords into an optimized source query.
///
/// `None` means "use the original keywords unchanged" — returned both when
/// the capability is unconfigured and when the rewrite call fails.
pub trait QueryEnhancer: Send + Sync {
    fn is_configured(&self) -> bool;

    fn enhance(
        &self,
        keywords: &str,
        location: &str,
    ) -> impl Future<Output = Option<String>> + Send;
}

/// Produces a short natural-language summary for a stored posting.
///
/// `None` means no summary (unconfigured capability or failed call); callers
/// leave the record unsummarized and move on.
pub trait Summarizer: Send + Sync {
    fn is_configured(&self) -> bool;

    fn summarize(
        &self,
        title: &str,
        company: &str,
        description: &str,
    ) -> impl Future<Output = Option<String>> + Send;
}

/// A no-op QueryEnhancer for when query rewriting is not wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEnhancer;

impl QueryEnhancer for NullEnhancer {
    fn is_configured(&self) -> bool {
        false
    }

    async fn enhance(&self, _keywords: &str, _location: &str) -> Option<String> {
        None
    }
}

/// A no-op Summarizer for when enrichment is not wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSummarizer;

impl Summarizer for NullSummarizer {
    fn is_configured(&self) -> bool {
        false
    }

    async fn summarize(&self, _title: &str, _company: &str, _description: &str) -> Option<String> {
        None
    }
}
