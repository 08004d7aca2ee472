use garimpo_core::models::{JobCandidate, SourceTag};
use garimpo_core::normalize;
use scraper::Html;

use crate::extract::{first_attr, first_text, parse_date, sel};
use crate::fetch::SafeFetcher;

/// Guest search endpoint; serves server-rendered cards without a session.
const SEARCH_URL: &str =
    "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search";

const CARD: &str = "li";
const TITLE: &str = ".base-search-card__title";
const COMPANY: &str = ".base-search-card__subtitle";
const LOCATION: &str = ".job-search-card__location";
const LINK: &str = "a.base-card__full-link";
const POSTED: &str = "time";

/// LinkedIn — HTML scrape of the guest job search. Location is a separate
/// request parameter, so remote/country tokens are stripped from keywords.
#[derive(Clone)]
pub struct LinkedInSource {
    http: SafeFetcher,
}

impl LinkedInSource {
    pub fn new(http: SafeFetcher) -> Self {
        Self { http }
    }

    pub async fn fetch(&self, keywords: &str, location: &str) -> Vec<JobCandidate> {
        let cleaned = normalize::strip_location_tokens(keywords);
        let terms = if cleaned.is_empty() { keywords } else { cleaned.as_str() };

        let request = self.http.client().get(SEARCH_URL).query(&[
            ("keywords", terms),
            ("location", if location.is_empty() { "Brasil" } else { location }),
            ("start", "0"),
            ("count", "25"),
        ]);

        let Some(html) = self.http.run_text(request).await else {
            return Vec::new();
        };
        parse(&html)
    }
}

pub(crate) fn parse(html: &str) -> Vec<JobCandidate> {
    let document = Html::parse_document(html);
    let (Some(card_sel), Some(title_sel), Some(company_sel), Some(location_sel), Some(link_sel), Some(posted_sel)) = (
        sel(CARD),
        sel(TITLE),
        sel(COMPANY),
        sel(LOCATION),
        sel(LINK),
        sel(POSTED),
    ) else {
        return Vec::new();
    };

    let mut jobs = Vec::new();
    for element in document.select(&card_sel) {
        let title = first_text(element, &title_sel);
        let link = first_attr(element, &link_sel, "href").unwrap_or_default();
        if title.is_empty() || link.is_empty() {
            continue;
        }

        let company = first_text(element, &company_sel);
        let location = first_text(element, &location_sel);
        let posted_at = first_attr(element, &posted_sel, "datetime")
            .as_deref()
            .and_then(parse_date);

        let url = link.split('?').next().unwrap_or(&link).to_string();
        let external_id = link
            .split("/view/")
            .nth(1)
            .and_then(|rest| rest.split(['/', '?']).next())
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        let description = format!("{title} at {company} - {location}");
        let location = if location.is_empty() { "N/A".to_string() } else { location };

        jobs.push(JobCandidate {
            title,
            company,
            location,
            description,
            url,
            source: SourceTag::LinkedIn,
            salary: None,
            tags: None,
            posted_at,
            external_id,
        });
    }
    jobs
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <ul>
          <li>
            <a class="base-card__full-link" href="https://br.linkedin.com/jobs/view/3799001122/?refId=x&trk=guest"></a>
            <h3 class="base-search-card__title"> Engenheiro de Software </h3>
            <h4 class="base-search-card__subtitle">Acme Brasil</h4>
            <span class="job-search-card__location">Recife, PE</span>
            <time datetime="2024-10-28"></time>
          </li>
          <li>
            <div class="base-search-card__title">Sem link</div>
          </li>
        </ul>"#;

    #[test]
    fn parses_cards_and_strips_tracking_params() {
        let jobs = parse(FIXTURE);

        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.title, "Engenheiro de Software");
        assert_eq!(job.company, "Acme Brasil");
        assert_eq!(job.location, "Recife, PE");
        assert_eq!(job.url, "https://br.linkedin.com/jobs/view/3799001122/");
        assert_eq!(job.external_id.as_deref(), Some("3799001122"));
        assert!(job.posted_at.is_some());
    }

    #[test]
    fn bad_markup_yields_empty_not_error() {
        assert!(parse("").is_empty());
        assert!(parse("<<<definitely not html>>>").is_empty());
    }
}
