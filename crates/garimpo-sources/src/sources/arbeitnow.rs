use chrono::DateTime;
use garimpo_core::models::{JobCandidate, SourceTag};
use garimpo_core::normalize;
use serde::Deserialize;

use crate::fetch::SafeFetcher;

const API_URL: &str = "https://www.arbeitnow.com/api/job-board-api";

#[derive(Deserialize)]
struct ArbeitnowResponse {
    #[serde(default)]
    data: Vec<ArbeitnowJob>,
}

#[derive(Deserialize, Default)]
struct ArbeitnowJob {
    #[serde(default)]
    slug: String,
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    location: String,
    #[serde(default)]
    url: String,
    /// Unix seconds.
    #[serde(default)]
    created_at: i64,
}

/// Arbeitnow — free community job-board API, English-indexed. Queries both
/// keyword forms; no key required.
#[derive(Clone)]
pub struct ArbeitnowSource {
    http: SafeFetcher,
}

impl ArbeitnowSource {
    pub fn new(http: SafeFetcher) -> Self {
        Self { http }
    }

    pub async fn fetch(&self, keywords: &str, _location: &str) -> Vec<JobCandidate> {
        let mut jobs = Vec::new();
        for query in normalize::query_variants(keywords) {
            let request = self
                .http
                .client()
                .get(API_URL)
                .query(&[("search", query.as_str())]);
            if let Some(response) = self.http.run_json::<ArbeitnowResponse>(request).await {
                jobs.extend(response.data.into_iter().filter_map(map_job));
            }
        }
        jobs
    }
}

fn map_job(job: ArbeitnowJob) -> Option<JobCandidate> {
    if job.title.is_empty() || job.url.is_empty() {
        return None;
    }

    let location = if job.location.is_empty() {
        "Remote".to_string()
    } else {
        job.location
    };

    Some(JobCandidate {
        title: job.title,
        company: job.company_name,
        location,
        description: job.description,
        url: job.url,
        source: SourceTag::Arbeitnow,
        salary: None,
        tags: (!job.tags.is_empty()).then(|| job.tags.join(", ")),
        posted_at: if job.created_at > 0 {
            DateTime::from_timestamp(job.created_at, 0)
        } else {
            None
        },
        external_id: (!job.slug.is_empty()).then_some(job.slug),
    })
}
