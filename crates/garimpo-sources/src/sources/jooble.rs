use garimpo_core::models::{JobCandidate, SourceTag};
use serde::{Deserialize, Serialize};

use crate::extract::parse_date;
use crate::fetch::SafeFetcher;

const API_URL: &str = "https://jooble.org/api/";

#[derive(Serialize)]
struct JoobleRequest<'a> {
    keywords: &'a str,
    location: &'a str,
}

#[derive(Deserialize)]
struct JoobleResponse {
    #[serde(default)]
    jobs: Vec<JoobleJob>,
}

#[derive(Deserialize, Default)]
struct JoobleJob {
    #[serde(default)]
    title: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    salary: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    updated: String,
    #[serde(default)]
    id: Option<i64>,
}

/// Jooble — aggregated job board API, POST with the key in the path.
/// Requires `JOOBLE_API_KEY`; without it the adapter yields nothing.
#[derive(Clone)]
pub struct JoobleSource {
    http: SafeFetcher,
    api_key: Option<String>,
}

impl JoobleSource {
    pub fn new(http: SafeFetcher, api_key: Option<String>) -> Self {
        Self { http, api_key }
    }

    pub async fn fetch(&self, keywords: &str, location: &str) -> Vec<JobCandidate> {
        let Some(api_key) = &self.api_key else {
            tracing::debug!("JOOBLE_API_KEY not set, skipping Jooble");
            return Vec::new();
        };

        let body = JoobleRequest {
            keywords,
            location: if location.is_empty() { "Brasil" } else { location },
        };
        let request = self
            .http
            .client()
            .post(format!("{API_URL}{api_key}"))
            .json(&body);

        let Some(response) = self.http.run_json::<JoobleResponse>(request).await else {
            return Vec::new();
        };

        response.jobs.into_iter().filter_map(map_job).collect()
    }
}

fn map_job(job: JoobleJob) -> Option<JobCandidate> {
    if job.title.is_empty() || job.link.is_empty() {
        return None;
    }

    let company = if job.company.is_empty() {
        "Empresa não informada".to_string()
    } else {
        job.company
    };
    let location = if job.location.is_empty() {
        "Brasil".to_string()
    } else {
        job.location
    };

    Some(JobCandidate {
        title: job.title,
        company,
        location,
        description: job.snippet,
        url: job.link,
        source: SourceTag::Jooble,
        salary: (!job.salary.is_empty()).then_some(job.salary),
        tags: None,
        posted_at: parse_date(&job.updated),
        external_id: job.id.map(|id| id.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_jobs_and_skips_incomplete_entries() {
        let raw = r#"{
            "totalCount": 3,
            "jobs": [
                {
                    "title": "Analista de Dados",
                    "location": "São Paulo",
                    "snippet": "SQL e Python",
                    "salary": "R$ 7.000",
                    "link": "https://jooble.org/jdp/1",
                    "company": "Dados SA",
                    "updated": "2024-11-01T00:00:00.000Z",
                    "id": 991
                },
                {"title": "Sem link", "link": ""},
                {"title": "", "link": "https://jooble.org/jdp/2"}
            ]
        }"#;
        let response: JoobleResponse = serde_json::from_str(raw).unwrap();
        let jobs: Vec<_> = response.jobs.into_iter().filter_map(map_job).collect();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Dados SA");
        assert_eq!(jobs[0].salary.as_deref(), Some("R$ 7.000"));
        assert_eq!(jobs[0].external_id.as_deref(), Some("991"));
    }

    #[test]
    fn empty_company_and_location_get_placeholders() {
        let job = JoobleJob {
            title: "Dev".to_string(),
            link: "https://jooble.org/jdp/3".to_string(),
            ..Default::default()
        };
        let mapped = map_job(job).unwrap();
        assert_eq!(mapped.company, "Empresa não informada");
        assert_eq!(mapped.location, "Brasil");
        assert!(mapped.salary.is_none());
    }
}
