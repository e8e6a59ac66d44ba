//! Client for the `/chat` endpoint

use serde::{Deserialize, Serialize};

use crate::error::ChatError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// One request/response exchange with the chat backend.
///
/// Futures are not `Send`: in the browser they run on the page's event loop.
#[allow(async_fn_in_trait)]
pub trait ChatTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError>;
}

/// Client for the chat backend
pub struct ChatClient {
    base_url: String,
    endpoint: String,
    client: reqwest::Client,
}

impl ChatClient {
    pub fn new(base_url: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Full URL requests are posted to
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.endpoint)
    }
}

impl ChatTransport for ChatClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        // `.json()` sets `Content-Type: application/json`
        let response = self.client.post(self.url()).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status { status: status.as_u16(), body });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ChatError::Decode(e.to_string()))
    }
}
