use std::time::Duration;

use garimpo_core::error::AppError;
use garimpo_core::models::{JobCandidate, SourceTag};
use reqwest::Client;
use serde::Deserialize;

use crate::llm::{ChatMessage, ChatRequest, send_chat};

const BASE_URL: &str = "https://api.openai.com/v1";
const MODEL: &str = "gpt-4o-search-preview";

/// Web-search-augmented calls are slow; they get the longest budget in the
/// system.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(90);

const MAX_TOKENS: u32 = 2000;

const SYSTEM_PROMPT: &str = "Você busca vagas de emprego reais na web para o Brasil. Pesquise vagas publicadas recentemente que combinem com as palavras-chave e a localização informadas. Responda APENAS com um array JSON de objetos com os campos title, company, location, description e url. Sem explicações e sem markdown.";

#[derive(Deserialize)]
struct WebPosting {
    #[serde(default)]
    title: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: String,
}

/// Web search — LLM-backed source using OpenAI's web-search tool.
///
/// Requires `OPENAI_API_KEY`; without it the adapter yields nothing. The
/// model is asked for a strict JSON array; anything unparsable collapses to
/// an empty batch, indistinguishable from the source being down.
#[derive(Clone)]
pub struct WebSearchSource {
    client: Client,
    api_key: Option<String>,
}

impl WebSearchSource {
    pub fn new(api_key: Option<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.is_empty()),
        })
    }

    pub async fn fetch(&self, keywords: &str, location: &str) -> Vec<JobCandidate> {
        let Some(api_key) = &self.api_key else {
            tracing::debug!("OPENAI_API_KEY not set, skipping web search");
            return Vec::new();
        };

        let target = if location.is_empty() { "Brasil" } else { location };
        let request = ChatRequest {
            model: MODEL.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("Palavras-chave: {keywords}\nLocalização: {target}"),
                },
            ],
            max_tokens: Some(MAX_TOKENS),
            temperature: None,
            web_search_options: Some(serde_json::json!({})),
        };

        match send_chat(
            &self.client,
            BASE_URL,
            api_key,
            &request,
            SEARCH_TIMEOUT.as_secs(),
        )
        .await
        {
            Ok(content) => parse_postings(&content),
            Err(error) => {
                tracing::warn!(%error, "Web search call failed");
                Vec::new()
            }
        }
    }
}

pub(crate) fn parse_postings(content: &str) -> Vec<JobCandidate> {
    let stripped = strip_code_fences(content);
    let Ok(entries) = serde_json::from_str::<Vec<WebPosting>>(stripped) else {
        tracing::debug!("Web search returned non-JSON content");
        return Vec::new();
    };

    entries
        .into_iter()
        .filter(|posting| !posting.title.is_empty() && !posting.url.is_empty())
        .map(|posting| {
            let company = if posting.company.is_empty() {
                "Empresa não informada".to_string()
            } else {
                posting.company
            };
            let location = if posting.location.is_empty() {
                "Brasil".to_string()
            } else {
                posting.location
            };
            JobCandidate {
                title: posting.title,
                company,
                location,
                description: posting.description,
                url: posting.url,
                source: SourceTag::WebSearch,
                salary: None,
                tags: None,
                posted_at: None,
                external_id: None,
            }
        })
        .collect()
}

/// Models wrap JSON in markdown fences despite instructions; tolerate it.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim()
        .strip_suffix("```")
        .map(str::trim_end)
        .unwrap_or(trimmed)
}
