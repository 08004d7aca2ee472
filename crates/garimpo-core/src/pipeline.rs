use futures::future::join_all;

use crate::error::AppError;
use crate::models::{JobCandidate, JobRecord, SearchConfig, SearchReport};
use crate::search::JobSearch;
use crate::traits::{JobStore, QueryEnhancer, SourceRegistry, Summarizer};

/// At most this many newly created records are summarized per run.
pub const SUMMARY_BATCH_LIMIT: usize = 10;

/// Full search run: precondition check → query rewrite → fan-out →
/// reconciliation → enrichment.
///
/// Generic over all external collaborators via traits, enabling dependency
/// injection and testability without real HTTP, LLM or database calls.
pub struct SearchPipeline<R, J, E, M>
where
    R: SourceRegistry,
    J: JobStore,
    E: QueryEnhancer,
    M: Summarizer,
{
    search: JobSearch<R>,
    store: J,
    enhancer: E,
    summarizer: M,
}

impl<R, J, E, M> SearchPipeline<R, J, E, M>
where
    R: SourceRegistry,
    J: JobStore,
    E: QueryEnhancer,
    M: Summarizer,
{
    pub fn new(registry: R, store: J, enhancer: E, summarizer: M) -> Self {
        Self {
            search: JobSearch::new(registry),
            store,
            enhancer,
            summarizer,
        }
    }

    /// Run one aggregation pass for the given configuration.
    ///
    /// The only hard failure is the empty-keywords precondition; every other
    /// problem (source down, bad record, failed summary) is recovered locally
    /// and reflected in the counters instead.
    pub async fn run(&self, config: &SearchConfig) -> Result<SearchReport, AppError> {
        let keywords = config.keywords.trim();
        if keywords.is_empty() {
            return Err(AppError::ConfigError(
                "no search keywords configured".to_string(),
            ));
        }

        let (query, query_rewritten) = if self.enhancer.is_configured() {
            match self.enhancer.enhance(keywords, &config.location).await {
                Some(rewritten) => {
                    tracing::info!(original = %keywords, %rewritten, "Query rewritten");
                    (rewritten, true)
                }
                None => (keywords.to_string(), false),
            }
        } else {
            (keywords.to_string(), false)
        };

        let enabled = config.enabled_tags();
        let candidates = self.search.search(&query, &config.location, &enabled).await;
        let found = candidates.len();

        let (saved, created) = self.reconcile(&candidates).await;
        let summarized = self.summarize_new(&created).await;

        tracing::info!(found, saved, new = created.len(), summarized, "Search run complete");

        Ok(SearchReport {
            found,
            saved,
            summarized,
            query_rewritten,
            query,
        })
    }

    /// Upsert every candidate, skipping individual store failures. Returns
    /// the saved count and the records created (not refreshed) by this run.
    async fn reconcile(&self, candidates: &[JobCandidate]) -> (usize, Vec<JobRecord>) {
        let mut saved = 0;
        let mut created = Vec::new();
        for candidate in candidates {
            match self.store.upsert(candidate).await {
                Ok(outcome) => {
                    saved += 1;
                    if outcome.created {
                        created.push(outcome.record);
                    }
                }
                Err(error) => {
                    tracing::warn!(url = %candidate.url, %error, "Upsert failed, skipping candidate");
                }
            }
        }
        (saved, created)
    }

    /// Summarize up to [`SUMMARY_BATCH_LIMIT`] newly created records
    /// concurrently. Each record settles independently: one failed summary
    /// leaves that record without `ai_summary` and does not affect the rest.
    async fn summarize_new(&self, created: &[JobRecord]) -> usize {
        if !self.summarizer.is_configured() || created.is_empty() {
            return 0;
        }

        let batch = &created[..created.len().min(SUMMARY_BATCH_LIMIT)];
        let settled = join_all(batch.iter().map(|record| self.summarize_one(record))).await;
        settled.into_iter().filter(|applied| *applied).count()
    }

    async fn summarize_one(&self, record: &JobRecord) -> bool {
        let Some(summary) = self
            .summarizer
            .summarize(&record.title, &record.company, &record.description)
            .await
        else {
            return false;
        };

        match self.store.set_ai_summary(record.id, &summary).await {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(id = %record.id, %error, "Failed to store summary");
                false
            }
        }
    }
}
