use garimpo_core::models::{JobCandidate, SourceTag};
use scraper::Html;

use crate::extract::{SelectorSet, parse_json_ld_postings, resolve_url, scan_cards};
use crate::fetch::SafeFetcher;

const BASE_URL: &str = "https://www.catho.com.br";
const SEARCH_URL: &str = "https://www.catho.com.br/vagas/";

const SELECTORS: SelectorSet = SelectorSet {
    card: "[data-testid='job-card'], .job-card, article",
    title: "h2, [data-testid='job-title'], .job-card__title",
    company: "[data-testid='job-company'], .job-card__company",
    location: "[data-testid='job-location'], .job-card__location",
    link: "a",
};

/// Catho — Brazilian job board, HTML scrape. The search pages embed JSON-LD
/// `JobPosting` metadata; when that parse yields anything it wins outright
/// and the selector scan is skipped.
#[derive(Clone)]
pub struct CathoSource {
    http: SafeFetcher,
}

impl CathoSource {
    pub fn new(http: SafeFetcher) -> Self {
        Self { http }
    }

    pub async fn fetch(&self, keywords: &str, location: &str) -> Vec<JobCandidate> {
        let query: String = [keywords, location]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        let request = self
            .http
            .client()
            .get(SEARCH_URL)
            .query(&[("q", query.as_str()), ("page", "1")]);

        let Some(html) = self.http.run_text(request).await else {
            return Vec::new();
        };
        parse(&html, location)
    }
}

pub(crate) fn parse(html: &str, location: &str) -> Vec<JobCandidate> {
    let document = Html::parse_document(html);
    let fallback = if location.is_empty() { "Brasil" } else { location };

    let structured = parse_json_ld_postings(&document, SourceTag::Catho, fallback);
    if !structured.is_empty() {
        return structured;
    }

    scan_cards(&document, &SELECTORS)
        .into_iter()
        .filter_map(|card| {
            let url = resolve_url(BASE_URL, &card.link)?;
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
            Some(JobCandidate {
                title: card.title,
                company,
                location,
                description,
                url,
                source: SourceTag::Catho,
                salary: None,
                tags: None,
                posted_at: None,
                external_id: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON_LD_PAGE: &str = r#"
        <html><body>
        <script type="application/ld+json">
        {"itemListElement": [{"item": {
            "@type": "JobPosting",
            "title": "Analista de Sistemas",
            "url": "https://www.catho.com.br/vagas/123",
            "hiringOrganization": {"name": "Catho Cliente"}
        }}]}
        </script>
        <article>
          <h2>Selector Card</h2>
          <a href="/vagas/should-be-ignored"></a>
        </article>
        </body></html>"#;

    const SELECTOR_ONLY_PAGE: &str = r#"
        <html><body>
        <article>
          <h2>Dev Backend</h2>
          <span data-testid="job-company">Loja SA</span>
          <span data-testid="job-location">São Paulo</span>
          <a href="/vagas/456"></a>
        </article>
        </body></html>"#;

    #[test]
    fn structured_metadata_takes_precedence_over_selectors() {
        let jobs = parse(JSON_LD_PAGE, "");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Analista de Sistemas");
        assert_eq!(jobs[0].url, "https://www.catho.com.br/vagas/123");
    }

    #[test]
    fn selector_fallback_resolves_relative_links() {
        let jobs = parse(SELECTOR_ONLY_PAGE, "Recife");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].url, "https://www.catho.com.br/vagas/456");
        assert_eq!(jobs[0].company, "Loja SA");
        assert_eq!(jobs[0].location, "São Paulo");
    }

    #[test]
    fn empty_page_yields_empty() {
        assert!(parse("<html></html>", "").is_empty());
    }
}
