use std::time::Duration;

use garimpo_core::error::AppError;
use garimpo_core::normalize;
use garimpo_core::traits::{QueryEnhancer, Summarizer};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const GROQ_MODEL: &str = "llama-3.1-8b-instant";

/// Short chat calls (summaries, query rewriting) get a tight budget.
const CHAT_TIMEOUT: Duration = Duration::from_secs(10);

const SUMMARY_MAX_TOKENS: u32 = 200;
const QUERY_MAX_TOKENS: u32 = 60;

/// Descriptions are clipped before summarization to bound token usage.
const DESCRIPTION_CAP: usize = 3000;

const SUMMARY_SYSTEM_PROMPT: &str = "Você resume vagas de emprego. Gere um resumo conciso em português (máximo 3 frases) incluindo: principais responsabilidades, requisitos-chave e benefícios destacados. Seja direto e objetivo. Não use markdown.";

const QUERY_SYSTEM_PROMPT: &str = "Você otimiza consultas de busca de emprego. Dado palavras-chave e localização, gere UMA query de busca otimizada em inglês para APIs de emprego. Retorne APENAS a query, sem explicações. Inclua termos sinônimos relevantes separados por espaço.";

// ---- OpenAI-compatible chat types, shared with the web-search adapter ----

#[derive(Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_search_options: Option<serde_json::Value>,
}

#[derive(Serialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// POST a chat request to an OpenAI-compatible endpoint and return the first
/// choice's trimmed text.
pub(crate) async fn send_chat(
    client: &Client,
    base_url: &str,
    api_key: &str,
    request: &ChatRequest,
    timeout_secs: u64,
) -> Result<String, AppError> {
    let url = format!("{base_url}/chat/completions");

    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {api_key}"))
        .json(request)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(timeout_secs)
            } else if e.is_connect() {
                AppError::NetworkError(format!("Connection failed: {e}"))
            } else {
                AppError::HttpError(e.to_string())
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        let status_code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiError>(&body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| format!("HTTP {status_code}: {body}"));
        return Err(AppError::LlmError {
            message,
            status_code,
        });
    }

    let chat_response: ChatResponse = response
        .json()
        .await
        .map_err(|e| AppError::HttpError(format!("Failed to parse LLM response: {e}")))?;

    chat_response
        .choices
        .first()
        .and_then(|choice| choice.message.content.as_deref())
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| AppError::LlmError {
            message: "Empty response from LLM".to_string(),
            status_code: 200,
        })
}

/// Groq-backed chat client for post-persistence summaries and query
/// rewriting.
///
/// Capability-gated: without `GROQ_API_KEY` every call is a `None` no-op,
/// never an error, and `is_configured` reports false for the status surface.
/// Call failures collapse to `None` the same way — a missing summary is not
/// a problem this system escalates.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: Option<String>,
}

impl GroqClient {
    pub fn new(api_key: Option<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(CHAT_TIMEOUT)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.is_empty()),
        })
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::new(std::env::var("GROQ_API_KEY").ok())
    }

    async fn chat(&self, messages: Vec<ChatMessage>, max_tokens: u32) -> Option<String> {
        let api_key = self.api_key.as_ref()?;

        let request = ChatRequest {
            model: GROQ_MODEL.to_string(),
            messages,
            max_tokens: Some(max_tokens),
            temperature: Some(0.3),
            web_search_options: None,
        };

        match send_chat(
            &self.client,
            GROQ_BASE_URL,
            api_key,
            &request,
            CHAT_TIMEOUT.as_secs(),
        )
        .await
        {
            Ok(content) => Some(content),
            Err(error) => {
                tracing::debug!(%error, "Groq call failed");
                None
            }
        }
    }
}

impl Summarizer for GroqClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn summarize(&self, title: &str, company: &str, description: &str) -> Option<String> {
        let clean: String = normalize::strip_html(description)
            .chars()
            .take(DESCRIPTION_CAP)
            .collect();

        self.chat(
            vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SUMMARY_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("Vaga: {title} na empresa {company}\n\nDescrição:\n{clean}"),
                },
            ],
            SUMMARY_MAX_TOKENS,
        )
        .await
    }
}

impl QueryEnhancer for GroqClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn enhance(&self, keywords: &str, location: &str) -> Option<String> {
        let target = if location.is_empty() { "qualquer" } else { location };

        self.chat(
            vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: QUERY_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("Palavras-chave: {keywords}\nLocalização: {target}"),
                },
            ],
            QUERY_MAX_TOKENS,
        )
        .await
    }
}
