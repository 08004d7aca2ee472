use garimpo_core::models::{JobCandidate, SourceTag};
use garimpo_core::normalize;
use serde::Deserialize;

use crate::extract::parse_date;
use crate::fetch::SafeFetcher;

const API_URL: &str = "https://jsearch.p.rapidapi.com/search";
const API_HOST: &str = "jsearch.p.rapidapi.com";

#[derive(Deserialize)]
struct JSearchResponse {
    #[serde(default)]
    data: Vec<JSearchJob>,
}

#[derive(Deserialize, Default)]
struct JSearchJob {
    #[serde(default)]
    job_id: String,
    #[serde(default)]
    job_title: String,
    #[serde(default)]
    employer_name: String,
    #[serde(default)]
    job_city: Option<String>,
    #[serde(default)]
    job_state: Option<String>,
    #[serde(default)]
    job_country: Option<String>,
    #[serde(default)]
    job_description: String,
    #[serde(default)]
    job_apply_link: String,
    #[serde(default)]
    job_min_salary: Option<f64>,
    #[serde(default)]
    job_max_salary: Option<f64>,
    #[serde(default)]
    job_salary_currency: Option<String>,
    #[serde(default)]
    job_employment_type: Option<String>,
    #[serde(default)]
    job_posted_at_datetime_utc: Option<String>,
}

/// JSearch (RapidAPI) — structured job search with a native country filter.
///
/// Requires `RAPIDAPI_KEY`; without it the adapter yields nothing. Location
/// goes into the combined query, so remote/country tokens are stripped from
/// the keywords first.
#[derive(Clone)]
pub struct JSearchSource {
    http: SafeFetcher,
    api_key: Option<String>,
}

impl JSearchSource {
    pub fn new(http: SafeFetcher, api_key: Option<String>) -> Self {
        Self { http, api_key }
    }

    pub async fn fetch(&self, keywords: &str, location: &str) -> Vec<JobCandidate> {
        let Some(api_key) = &self.api_key else {
            tracing::debug!("RAPIDAPI_KEY not set, skipping JSearch");
            return Vec::new();
        };

        let cleaned = normalize::strip_location_tokens(keywords);
        let terms = if cleaned.is_empty() { keywords } else { cleaned.as_str() };
        let query = if location.is_empty() {
            terms.to_string()
        } else {
            format!("{terms} {location}")
        };

        let request = self
            .http
            .client()
            .get(API_URL)
            .query(&[
                ("query", query.as_str()),
                ("page", "1"),
                ("num_pages", "1"),
                ("country", "br"),
            ])
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", API_HOST);

        let Some(response) = self.http.run_json::<JSearchResponse>(request).await else {
            return Vec::new();
        };

        response.data.into_iter().filter_map(map_job).collect()
    }
}

fn map_job(job: JSearchJob) -> Option<JobCandidate> {
    if job.job_title.is_empty() || job.job_apply_link.is_empty() {
        return None;
    }

    let location = job
        .job_city
        .filter(|city| !city.is_empty())
        .or(job.job_state.filter(|state| !state.is_empty()))
        .or(job.job_country.filter(|country| !country.is_empty()))
        .unwrap_or_else(|| "Remote".to_string());

    let company = if job.employer_name.is_empty() {
        "Empresa não informada".to_string()
    } else {
        job.employer_name
    };

    let salary = format_salary(
        job.job_min_salary,
        job.job_max_salary,
        job.job_salary_currency.as_deref(),
    );

    let posted_at = job
        .job_posted_at_datetime_utc
        .as_deref()
        .and_then(parse_date);

    Some(JobCandidate {
        title: job.job_title,
        company,
        location,
        description: job.job_description,
        url: job.job_apply_link,
        source: SourceTag::JSearch,
        salary,
        tags: job.job_employment_type.filter(|t| !t.is_empty()),
        posted_at,
        external_id: (!job.job_id.is_empty()).then_some(job.job_id),
    })
}

/// Format a salary range in the pt-BR style the UI expects: both bounds as
/// a range, min-only as `"CUR 5.000+"`, max-only as `"CUR até 8.000"`.
fn format_salary(min: Option<f64>, max: Option<f64>, currency: Option<&str>) -> Option<String> {
    let currency = currency.filter(|c| !c.is_empty()).unwrap_or("BRL");
    match (min, max) {
        (Some(min), Some(max)) => Some(format!(
            "{currency} {} - {}",
            group_thousands(min),
            group_thousands(max)
        )),
        (Some(min), None) => Some(format!("{currency} {}+", group_thousands(min))),
        (None, Some(max)) => Some(format!("{currency} até {}", group_thousands(max))),
        (None, None) => None,
    }
}

/// Integer formatting with `.` thousands separators (pt-BR convention).
fn group_thousands(value: f64) -> String {
    let raw = (value.round() as i64).to_string();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };

    let mut grouped = String::new();
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_only_salary_formats_with_plus() {
        assert_eq!(
            format_salary(Some(5000.0), None, Some("BRL")).as_deref(),
            Some("BRL 5.000+")
        );
    }

    #[test]
    fn max_only_salary_formats_as_up_to() {
        assert_eq!(
            format_salary(None, Some(8000.0), Some("BRL")).as_deref(),
            Some("BRL até 8.000")
        );
    }

    #[test]
    fn full_range_and_missing_salary() {
        assert_eq!(
            format_salary(Some(5000.0), Some(8000.0), Some("USD")).as_deref(),
            Some("USD 5.000 - 8.000")
        );
        assert_eq!(format_salary(None, None, Some("BRL")), None);
    }

    #[test]
    fn currency_defaults_to_brl() {
        assert_eq!(
            format_salary(Some(1234567.0), None, None).as_deref(),
            Some("BRL 1.234.567+")
        );
    }

    #[test]
    fn maps_response_fields_with_defaults() {
        let raw = r#"{
            "data": [
                {
                    "job_id": "abc123",
                    "job_title": "Rust Developer",
                    "employer_name": "",
                    "job_city": null,
                    "job_state": null,
                    "job_country": "BR",
                    "job_description": "Build services",
                    "job_apply_link": "https://jobs.example/abc123",
                    "job_min_salary": 9000,
                    "job_max_salary": null,
                    "job_salary_currency": "BRL",
                    "job_employment_type": "FULLTIME",
                    "job_posted_at_datetime_utc": "2024-11-02T08:00:00Z"
                },
                {"job_title": "", "job_apply_link": "https://jobs.example/no-title"}
            ]
        }"#;
        let response: JSearchResponse = serde_json::from_str(raw).unwrap();
        let jobs: Vec<_> = response.data.into_iter().filter_map(map_job).collect();

        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.company, "Empresa não informada");
        assert_eq!(job.location, "BR");
        assert_eq!(job.salary.as_deref(), Some("BRL 9.000+"));
        assert_eq!(job.tags.as_deref(), Some("FULLTIME"));
        assert_eq!(job.external_id.as_deref(), Some("abc123"));
        assert!(job.posted_at.is_some());
    }
}
