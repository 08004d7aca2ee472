//! Shared HTML extraction strategies for the scraping adapters.
//!
//! Two passes, in order of trust: machine-readable JSON-LD `JobPosting`
//! blocks embedded in the page, then a best-effort scan with ordered CSS
//! selector candidates per field. Extraction never fails loudly — malformed
//! markup or JSON simply contributes nothing, which is indistinguishable
//! from the source being down. Accepted limitation of selector scraping:
//! site redesigns break it silently.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use garimpo_core::models::{JobCandidate, SourceTag};
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

/// Per-adapter selector candidates. Each string is a CSS selector list
/// (comma-separated alternatives, most specific first).
pub struct SelectorSet {
    pub card: &'static str,
    pub title: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub link: &'static str,
}

/// A raw card pulled out of a listing page; fields may be empty except
/// `title` (cards without a title are dropped during the scan).
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedCard {
    pub title: String,
    pub company: String,
    pub location: String,
    pub link: String,
}

pub(crate) fn sel(source: &str) -> Option<Selector> {
    match Selector::parse(source) {
        Ok(selector) => Some(selector),
        Err(error) => {
            tracing::debug!(selector = source, ?error, "Invalid selector");
            None
        }
    }
}

/// First matching descendant's trimmed text, or empty.
pub(crate) fn first_text(element: ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|node| node.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// First matching descendant's attribute value.
pub(crate) fn first_attr(
    element: ElementRef<'_>,
    selector: &Selector,
    attr: &str,
) -> Option<String> {
    element
        .select(selector)
        .next()
        .and_then(|node| node.value().attr(attr))
        .map(str::to_string)
}

/// Selector-based fallback scan. Cards lacking a title are skipped.
pub fn scan_cards(document: &Html, selectors: &SelectorSet) -> Vec<ScannedCard> {
    let (Some(card_sel), Some(title_sel), Some(company_sel), Some(location_sel), Some(link_sel)) = (
        sel(selectors.card),
        sel(selectors.title),
        sel(selectors.company),
        sel(selectors.location),
        sel(selectors.link),
    ) else {
        return Vec::new();
    };

    let mut cards = Vec::new();
    for element in document.select(&card_sel) {
        let title = first_text(element, &title_sel);
        if title.is_empty() {
            continue;
        }
        cards.push(ScannedCard {
            title,
            company: first_text(element, &company_sel),
            location: first_text(element, &location_sel),
            link: first_attr(element, &link_sel, "href").unwrap_or_default(),
        });
    }
    cards
}

/// Parse every `<script type="application/ld+json">` block in the document,
/// collecting embedded `JobPosting` items. Handles the three shapes seen in
/// the wild: an `ItemList` with `itemListElement`, a bare array, and a
/// single posting object. Malformed blocks are skipped; partial data from
/// the same document is still returned.
pub fn parse_json_ld_postings(
    document: &Html,
    source: SourceTag,
    fallback_location: &str,
) -> Vec<JobCandidate> {
    let Some(script_sel) = sel(r#"script[type="application/ld+json"]"#) else {
        return Vec::new();
    };

    let mut jobs = Vec::new();
    for element in document.select(&script_sel) {
        let raw = element.text().collect::<String>();
        let Ok(value) = serde_json::from_str::<Value>(&raw) else {
            continue;
        };
        collect_postings(&value, source, fallback_location, &mut jobs);
    }
    jobs
}

fn collect_postings(
    value: &Value,
    source: SourceTag,
    fallback_location: &str,
    out: &mut Vec<JobCandidate>,
) {
    let items: Vec<&Value> = if let Some(list) = value.get("itemListElement").and_then(Value::as_array)
    {
        list.iter().collect()
    } else if let Some(array) = value.as_array() {
        array.iter().collect()
    } else {
        vec![value]
    };

    for item in items {
        let posting = item.get("item").unwrap_or(item);
        if posting.get("@type").and_then(Value::as_str) != Some("JobPosting") {
            continue;
        }
        if let Some(job) = map_posting(posting, source, fallback_location) {
            out.push(job);
        }
    }
}

/// Map one JSON-LD posting object into a candidate. Postings without a URL
/// are useless for dedup and are dropped.
pub fn map_posting(
    posting: &Value,
    source: SourceTag,
    fallback_location: &str,
) -> Option<JobCandidate> {
    let url = posting
        .get("url")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    if url.is_empty() {
        return None;
    }

    let title = posting
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let company = posting
        .pointer("/hiringOrganization/name")
        .and_then(Value::as_str)
        .unwrap_or("Empresa não informada")
        .to_string();
    let location = posting_location(posting)
        .unwrap_or(fallback_location)
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
    let external_id = posting
        .get("identifier")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| Some(url.clone()));

    Some(JobCandidate {
        title,
        company,
        location,
        description,
        url,
        source,
        salary: None,
        tags: None,
        posted_at,
        external_id,
    })
}

/// `jobLocation` may be a single object or an array of them.
fn posting_location(posting: &Value) -> Option<&str> {
    let location = posting.get("jobLocation")?;
    let location = if let Some(array) = location.as_array() {
        array.first()?
    } else {
        location
    };
    let address = location.get("address")?;
    address
        .get("addressLocality")
        .and_then(Value::as_str)
        .or_else(|| address.get("addressRegion").and_then(Value::as_str))
}

/// Lenient date parse: RFC 3339, then an offset-less timestamp (Remotive),
/// then a bare `YYYY-MM-DD`. Everything else is treated as unknown.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Resolve a possibly-relative link against a site base.
pub fn resolve_url(base: &str, link: &str) -> Option<String> {
    if link.is_empty() {
        return None;
    }
    if link.starts_with("http") {
        return Some(link.to_string());
    }
    url::Url::parse(base)
        .ok()?
        .join(link)
        .ok()
        .map(|resolved| resolved.to_string())
}
