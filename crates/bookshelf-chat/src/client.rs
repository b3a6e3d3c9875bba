//! Generative-language API client

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ChatError;

/// Chat client configuration
#[derive(Clone, Debug)]
pub struct ChatClientConfig {
    /// API key for the generative-language service
    pub api_key: String,
    /// Model name, e.g. "gemini-1.5-flash"
    pub model: String,
    /// Base URL of the service
    pub base_url: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// Extract the first candidate's text from a response body
fn first_candidate_text(response: GenerateResponse) -> Result<String, ChatError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or_else(|| ChatError::InvalidResponse("no candidates in response".to_string()))
}

/// Client for the generative-language API
pub struct ChatClient {
    config: ChatClientConfig,
    client: Client,
}

impl ChatClient {
    /// Create a new chat client
    pub fn new(config: ChatClientConfig) -> Result<Self, ChatError> {
        let client = Client::builder().build()?;

        info!("Created chat client for model {}", config.model);

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        )
    }

    /// Send a message and return the first candidate's reply text
    pub async fn generate(&self, message: &str) -> Result<String, ChatError> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: message.to_string(),
                }],
            }],
        };

        debug!("Forwarding chat message to {}", self.config.model);

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChatError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ChatError::InvalidResponse(e.to_string()))?;

        first_candidate_text(body)
    }
}
