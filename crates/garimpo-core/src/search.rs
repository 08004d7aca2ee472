use futures::future::join_all;

use crate::models::{JobCandidate, SourceTag};
use crate::normalize;
use crate::traits::SourceRegistry;

/// Fan-out/fan-in aggregation over the registered job sources.
///
/// Every resolved source is queried concurrently with the same arguments and
/// the call settles only when all of them have — a slow or failing source can
/// never fail the whole search, and never blocks the others. Failures are
/// discarded; merge order is registration order ([`SourceTag::ALL`]), then
/// within-source original order. No cross-source ranking.
pub struct JobSearch<R: SourceRegistry> {
    registry: R,
}

impl<R: SourceRegistry> JobSearch<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Query the enabled sources and return the merged candidate list.
    ///
    /// `enabled` empty means "all registered sources"; tags are intersected
    /// with the registry otherwise. Zero resolved sources yields an empty
    /// result, not an error. When `location` is non-empty the merged list is
    /// filtered through the location relevance predicate.
    pub async fn search(
        &self,
        keywords: &str,
        location: &str,
        enabled: &[SourceTag],
    ) -> Vec<JobCandidate> {
        let tags: Vec<SourceTag> = if enabled.is_empty() {
            SourceTag::ALL.to_vec()
        } else {
            SourceTag::ALL
                .iter()
                .copied()
                .filter(|tag| enabled.contains(tag))
                .collect()
        };

        if tags.is_empty() {
            return Vec::new();
        }

        tracing::info!(sources = tags.len(), %keywords, %location, "Fanning out job search");

        let fetches = tags
            .iter()
            .map(|tag| self.registry.fetch(*tag, keywords, location));
        let settled = join_all(fetches).await;

        let mut jobs = Vec::new();
        for (tag, result) in tags.iter().zip(settled) {
            match result {
                Ok(mut batch) => {
                    tracing::debug!(source = %tag, count = batch.len(), "Source settled");
                    jobs.append(&mut batch);
                }
                Err(error) => {
                    tracing::warn!(source = %tag, %error, "Source failed, discarding");
                }
            }
        }

        if location.is_empty() {
            return jobs;
        }
        jobs.retain(|job| normalize::candidate_matches_location(job, location));
        jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MockRegistry, make_candidate};

    #[tokio::test]
    async fn merges_sources_in_registration_order() {
        let registry = MockRegistry::new()
            .source(
                SourceTag::LinkedIn,
                vec![make_candidate("https://l.example/1", SourceTag::LinkedIn)],
            )
            .source(
                SourceTag::Remotive,
                vec![
                    make_candidate("https://r.example/1", SourceTag::Remotive),
                    make_candidate("https://r.example/2", SourceTag::Remotive),
                ],
            );
        let search = JobSearch::new(registry);

        let jobs = search.search("rust", "", &[]).await;

        // Remotive precedes LinkedIn in SourceTag::ALL
        let urls: Vec<&str> = jobs.iter().map(|j| j.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://r.example/1", "https://r.example/2", "https://l.example/1"]
        );
    }

    #[tokio::test]
    async fn failed_sources_are_discarded_not_propagated() {
        let registry = MockRegistry::new()
            .source(
                SourceTag::Remotive,
                vec![make_candidate("https://r.example/1", SourceTag::Remotive)],
            )
            .failing(SourceTag::LinkedIn, "connection reset")
            .failing(SourceTag::Catho, "timed out");
        let search = JobSearch::new(registry);

        let jobs = search.search("rust", "", &[]).await;

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].source, SourceTag::Remotive);
    }

    #[tokio::test]
    async fn enabling_one_source_invokes_only_that_adapter() {
        let registry = MockRegistry::new()
            .source(
                SourceTag::Remotive,
                vec![make_candidate("https://r.example/1", SourceTag::Remotive)],
            )
            .source(
                SourceTag::LinkedIn,
                vec![make_candidate("https://l.example/1", SourceTag::LinkedIn)],
            );
        let calls = registry.clone();
        let search = JobSearch::new(registry);

        let jobs = search.search("rust", "", &[SourceTag::Remotive]).await;

        assert!(jobs.iter().all(|j| j.source == SourceTag::Remotive));
        assert_eq!(calls.calls(), vec![SourceTag::Remotive]);
    }

    #[tokio::test]
    async fn empty_batches_yield_empty_result_not_error() {
        let registry = MockRegistry::new();
        let search = JobSearch::new(registry);

        let jobs = search.search("rust", "", &[SourceTag::Jooble]).await;
        assert!(jobs.is_empty());
    }

    #[tokio::test]
    async fn location_filter_is_idempotent() {
        let mut matching = make_candidate("https://r.example/1", SourceTag::Remotive);
        matching.location = "Recife, PE".to_string();
        let mut elsewhere = make_candidate("https://r.example/2", SourceTag::Remotive);
        elsewhere.location = "Lisboa".to_string();

        let registry = MockRegistry::new().source(SourceTag::Remotive, vec![matching, elsewhere]);
        let search = JobSearch::new(registry);

        let jobs = search.search("rust", "Recife", &[]).await;

        assert_eq!(jobs.len(), 1);
        // filtering the output a second time is a no-op
        let refiltered: Vec<_> = jobs
            .iter()
            .filter(|j| normalize::candidate_matches_location(j, "Recife"))
            .collect();
        assert_eq!(refiltered.len(), jobs.len());
    }
}
