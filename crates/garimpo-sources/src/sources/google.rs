use std::sync::LazyLock;

use garimpo_core::models::{JobCandidate, SourceTag};
use regex::Regex;
use scraper::Html;
use serde_json::Value;

use crate::extract::{SelectorSet, parse_date, scan_cards, sel};
use crate::fetch::SafeFetcher;

const SEARCH_URL: &str = "https://www.google.com/search";

/// Jobs-widget postings ship as JSON objects inside inline scripts, not as
/// `ld+json` blocks; matched lazily so a truncated object just fails to
/// parse and is skipped.
static JOB_POSTING_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\{.*?"@type"\s*:\s*"JobPosting".*?\}"#).expect("valid posting pattern")
});

const SELECTORS: SelectorSet = SelectorSet {
    card: ".BjJfJf, .PwjeAc, .gws-plugins-horizon-jobs__tl-lif",
    title: ".BjJfJf, .PwjeAc, .sH3zFd, div[role='heading']",
    company: ".vNEEBe, .nJlDiv, .wHhUb",
    location: ".Qk80Jf, .pwTheOc, .e6m0Sd",
    link: "a",
};

/// Google Jobs — scrape of the jobs search vertical. Postings are pulled
/// from embedded script JSON first; the widget-selector scan is a fallback
/// whose entries all link back to the search page itself.
#[derive(Clone)]
pub struct GoogleJobsSource {
    http: SafeFetcher,
}

impl GoogleJobsSource {
    pub fn new(http: SafeFetcher) -> Self {
        Self { http }
    }

    pub async fn fetch(&self, keywords: &str, location: &str) -> Vec<JobCandidate> {
        let target = if location.is_empty() { "Brasil" } else { location };
        let query = format!("{keywords} vagas {target}");

        let request = self.http.client().get(SEARCH_URL).query(&[
            ("q", query.as_str()),
            ("ibp", "htl;jobs"),
            ("hl", "pt-BR"),
        ]);

        let Some(html) = self.http.run_text(request).await else {
            return Vec::new();
        };
        parse(&html, &query, location)
    }
}

pub(crate) fn parse(html: &str, query: &str, location: &str) -> Vec<JobCandidate> {
    let document = Html::parse_document(html);
    let fallback = if location.is_empty() { "Brasil" } else { location };
    let search_url = search_result_url(query);

    let mut jobs = Vec::new();
    if let Some(script_sel) = sel("script") {
        for element in document.select(&script_sel) {
            let content = element.text().collect::<String>();
            if !content.contains("JobPosting") {
                continue;
            }
            for block in JOB_POSTING_BLOCK.find_iter(&content) {
                let Ok(posting) = serde_json::from_str::<Value>(block.as_str()) else {
                    continue;
                };
                if let Some(job) = map_embedded(&posting, fallback, &search_url) {
                    jobs.push(job);
                }
            }
        }
    }
    if !jobs.is_empty() {
        return jobs;
    }

    scan_cards(&document, &SELECTORS)
        .into_iter()
        .map(|card| {
            let description = format!("{} - {}", card.title, card.company);
            let company = if card.company.is_empty() {
                "Empresa não informada".to_string()
            } else {
                card.company
            };
            let location = if card.location.is_empty() {
                fallback.to_string()
            } else {
                card.location
            };
            JobCandidate {
                title: card.title,
                company,
                location,
                description,
                url: search_url.clone(),
                source: SourceTag::GoogleJobs,
                salary: None,
                tags: None,
                posted_at: None,
                external_id: None,
            }
        })
        .collect()
}

fn map_embedded(posting: &Value, fallback: &str, search_url: &str) -> Option<JobCandidate> {
    let title = posting
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    if title.is_empty() {
        return None;
    }

    let url = posting
        .get("url")
        .and_then(Value::as_str)
        .filter(|u| !u.is_empty())
        .unwrap_or(search_url)
        .to_string();
    let company = posting
        .pointer("/hiringOrganization/name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let location = posting
        .pointer("/jobLocation/address/addressLocality")
        .and_then(Value::as_str)
        .filter(|l| !l.is_empty())
        .unwrap_or(fallback)
        .to_string();
    let description = posting
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let posted_at = posting
        .get("datePosted")
        .and_then(Value::as_str)
        .and_then(parse_date);

    Some(JobCandidate {
        title,
        company,
        location,
        description,
        url,
        source: SourceTag::GoogleJobs,
        salary: None,
        tags: None,
        posted_at,
        external_id: None,
    })
}

fn search_result_url(query: &str) -> String {
    url::Url::parse_with_params(SEARCH_URL, &[("q", query), ("ibp", "htl;jobs")])
        .map(|u| u.to_string())
        .unwrap_or_else(|_| SEARCH_URL.to_string())
}
