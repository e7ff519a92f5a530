// suggester/gemini.rs

use crate::config::AssistantConfig;
use crate::model::SuggestError;
use crate::suggester::Suggester;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Google Gemini `generateContent` client.
pub struct GeminiSuggester {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl GeminiSuggester {
    pub fn from_config(config: &AssistantConfig) -> Result<Self, SuggestError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(SuggestError::NotConfigured)?
            .to_string();
        let timeout = Duration::from_secs(config.timeout_seconds.max(1));
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SuggestError::Http(e.to_string()))?;

        Ok(Self {
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }
}

fn first_text(response: GenerateResponse) -> Result<String, SuggestError> {
    let text = response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .map(|p| p.text)
        .find(|t| !t.trim().is_empty())
        .ok_or(SuggestError::Empty)?;
    Ok(text.trim().to_string())
}

#[async_trait]
impl Suggester for GeminiSuggester {
    async fn suggest(&self, prompt: &str) -> Result<String, SuggestError> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };
        info!("📤 Asking {} ({} prompt chars)", self.model, prompt.chars().count());

        let response = match timeout(
            self.timeout,
            self.client
                .post(self.endpoint())
                .header("x-goog-api-key", self.api_key.as_str())
                .json(&body)
                .send(),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                let e = e.without_url();
                warn!("❌ Assistant request failed: {}", e);
                return Err(SuggestError::Http(e.to_string()));
            }
            Err(_) => {
                warn!("⏳ Assistant request timed out");
                return Err(SuggestError::Timeout);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown".into());
            warn!("❌ Assistant responded [{}]: {}", status, body);
            return Err(SuggestError::Status(status.as_u16()));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SuggestError::InvalidBody(e.without_url().to_string()))?;
        first_text(parsed)
    }
}
