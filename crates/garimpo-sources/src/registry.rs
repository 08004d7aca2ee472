use garimpo_core::error::AppError;
use garimpo_core::models::{JobCandidate, SourceTag};
use garimpo_core::traits::SourceRegistry;
use serde::Serialize;

use crate::fetch::SafeFetcher;
use crate::sources::{
    ArbeitnowSource, CathoSource, GoogleJobsSource, JSearchSource, JoobleSource, LinkedInSource,
    RemotiveSource, WebSearchSource,
};

/// The full adapter registry, one field per [`SourceTag`] variant. The
/// dispatch match below is exhaustive, so a new source tag fails to compile
/// until it is registered here.
#[derive(Clone)]
pub struct JobBoard {
    jsearch: JSearchSource,
    jooble: JoobleSource,
    remotive: RemotiveSource,
    arbeitnow: ArbeitnowSource,
    linkedin: LinkedInSource,
    catho: CathoSource,
    google: GoogleJobsSource,
    websearch: WebSearchSource,
}

impl JobBoard {
    /// Build every adapter, reading optional credentials from the
    /// environment. Adapters whose credential is absent stay registered and
    /// simply yield empty batches.
    pub fn from_env() -> Result<Self, AppError> {
        let http = SafeFetcher::new()?;
        Ok(Self {
            jsearch: JSearchSource::new(http.clone(), env_key("RAPIDAPI_KEY")),
            jooble: JoobleSource::new(http.clone(), env_key("JOOBLE_API_KEY")),
            remotive: RemotiveSource::new(http.clone()),
            arbeitnow: ArbeitnowSource::new(http.clone()),
            linkedin: LinkedInSource::new(http.clone()),
            catho: CathoSource::new(http.clone()),
            google: GoogleJobsSource::new(http),
            websearch: WebSearchSource::new(env_key("OPENAI_API_KEY"))?,
        })
    }
}

impl SourceRegistry for JobBoard {
    async fn fetch(
        &self,
        tag: SourceTag,
        keywords: &str,
        location: &str,
    ) -> Result<Vec<JobCandidate>, AppError> {
        let jobs = match tag {
            SourceTag::JSearch => self.jsearch.fetch(keywords, location).await,
            SourceTag::Jooble => self.jooble.fetch(keywords, location).await,
            SourceTag::Remotive => self.remotive.fetch(keywords, location).await,
            SourceTag::Arbeitnow => self.arbeitnow.fetch(keywords, location).await,
            SourceTag::LinkedIn => self.linkedin.fetch(keywords, location).await,
            SourceTag::Catho => self.catho.fetch(keywords, location).await,
            SourceTag::GoogleJobs => self.google.fetch(keywords, location).await,
            SourceTag::WebSearch => self.websearch.fetch(keywords, location).await,
        };
        Ok(jobs)
    }
}

/// Per-integration credential presence, for the status surface.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Capabilities {
    pub groq: bool,
    pub rapid_api: bool,
    pub jooble: bool,
    pub openai: bool,
}

pub fn capabilities() -> Capabilities {
    Capabilities {
        groq: env_key("GROQ_API_KEY").is_some(),
        rapid_api: env_key("RAPIDAPI_KEY").is_some(),
        jooble: env_key("JOOBLE_API_KEY").is_some(),
        openai: env_key("OPENAI_API_KEY").is_some(),
    }
}

fn env_key(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
