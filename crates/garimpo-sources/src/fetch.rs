use std::time::Duration;

use garimpo_core::error::AppError;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Fixed timeout for generic fetch/scrape calls. LLM clients use their own,
/// longer budgets.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Several of the scraped boards serve degraded markup to obvious bots.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// HTTP fetcher shared by every source adapter.
///
/// All outbound calls run under a fixed timeout with a single attempt — no
/// retries; orchestrator-level concurrency is the sole mitigation for slow
/// sources. The `run_*`/`get_*` surface collapses every failure (network
/// error, non-2xx, timeout, undecodable body) into `None` so callers treat
/// "no data" and "error" identically.
#[derive(Clone)]
pub struct SafeFetcher {
    client: Client,
    timeout_secs: u64,
}

impl SafeFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let timeout_secs = timeout.as_secs();

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("pt-BR,pt;q=0.9,en-US;q=0.8,en;q=0.7"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    /// The underlying client, for adapters that need custom queries, headers
    /// or POST bodies. Pass the built request back through
    /// [`run_text`](Self::run_text) or [`run_json`](Self::run_json).
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Send a request, classifying errors the usual way. Adapters normally
    /// use the collapsing wrappers below instead.
    pub async fn try_send(&self, request: RequestBuilder) -> Result<reqwest::Response, AppError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                AppError::NetworkError(format!("Connection failed: {e}"))
            } else {
                AppError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpError(format!("HTTP {}", status.as_u16())));
        }

        Ok(response)
    }

    /// Execute a request and return the body text, or `None` on any failure.
    pub async fn run_text(&self, request: RequestBuilder) -> Option<String> {
        match self.try_send(request).await {
            Ok(response) => match response.text().await {
                Ok(body) => Some(body),
                Err(error) => {
                    tracing::debug!(%error, "Failed to read response body");
                    None
                }
            },
            Err(error) => {
                tracing::debug!(%error, "Request failed");
                None
            }
        }
    }

    /// Execute a request and decode the body as JSON, or `None` on any
    /// failure (including an unexpected shape).
    pub async fn run_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Option<T> {
        match self.try_send(request).await {
            Ok(response) => match response.json::<T>().await {
                Ok(value) => Some(value),
                Err(error) => {
                    tracing::debug!(%error, "Failed to decode JSON response");
                    None
                }
            },
            Err(error) => {
                tracing::debug!(%error, "Request failed");
                None
            }
        }
    }

    pub async fn get_text(&self, url: &str) -> Option<String> {
        self.run_text(self.client.get(url)).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        self.run_json(self.client.get(url).header(ACCEPT, "application/json"))
            .await
    }
}
