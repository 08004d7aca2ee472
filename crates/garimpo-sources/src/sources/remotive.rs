use garimpo_core::models::{JobCandidate, SourceTag};
use garimpo_core::normalize;
use serde::Deserialize;

use crate::extract::parse_date;
use crate::fetch::SafeFetcher;

const API_URL: &str = "https://remotive.com/api/remote-jobs";
const RESULT_LIMIT: &str = "50";

#[derive(Deserialize)]
struct RemotiveResponse {
    #[serde(default)]
    jobs: Vec<RemotiveJob>,
}

#[derive(Deserialize, Default)]
struct RemotiveJob {
    #[serde(default)]
    id: i64,
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    publication_date: String,
    #[serde(default)]
    candidate_required_location: String,
    #[serde(default)]
    salary: String,
    #[serde(default)]
    description: String,
}

/// Remotive — free remote-jobs API, English-indexed and with no country
/// filter of its own. Queries both the original and the translated keyword
/// form, and keeps only listings whose required location is open to Brazil.
#[derive(Clone)]
pub struct RemotiveSource {
    http: SafeFetcher,
}

impl RemotiveSource {
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
                .query(&[("search", query.as_str()), ("limit", RESULT_LIMIT)]);
            if let Some(response) = self.http.run_json::<RemotiveResponse>(request).await {
                jobs.extend(response.jobs.into_iter().filter_map(map_job));
            }
        }
        jobs
    }
}

fn map_job(job: RemotiveJob) -> Option<JobCandidate> {
    if job.title.is_empty() || job.url.is_empty() {
        return None;
    }

    let location = if job.candidate_required_location.is_empty() {
        "Remote".to_string()
    } else {
        job.candidate_required_location
    };
    if !normalize::location_in_brazil_scope(&location) {
        return None;
    }

    Some(JobCandidate {
        title: job.title,
        company: job.company_name,
        location,
        description: job.description,
        url: job.url,
        source: SourceTag::Remotive,
        salary: (!job.salary.is_empty()).then_some(job.salary),
        tags: (!job.tags.is_empty()).then(|| job.tags.join(", ")),
        posted_at: parse_date(&job.publication_date),
        external_id: Some(job.id.to_string()),
    })
}
