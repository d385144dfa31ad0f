use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};

pub const CHAT_PATH: &str = "/api/chat";
pub const TRANSLATE_PATH: &str = "/translate";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub reply_lang: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    pub text: String,
    pub reply_lang: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub reply_lang: Option<String>,
    #[serde(default)]
    pub translate_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Client for the chat and translate endpoints.
///
/// The HTTP status is not inspected: error statuses still carry a JSON body with
/// `success: false`, and that body decides the outcome. Only send failures and
/// bodies that are not valid JSON are reported as errors.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn chat(&self, message: &str, reply_lang: &str) -> Result<ChatResponse> {
        let request = ChatRequest {
            message: message.to_string(),
            reply_lang: reply_lang.to_string(),
        };
        self.post_json(CHAT_PATH, &request).await
    }

    pub async fn translate(&self, text: &str, reply_lang: &str) -> Result<TranslateResponse> {
        let request = TranslateRequest {
            text: text.to_string(),
            reply_lang: reply_lang.to_string(),
        };
        self.post_json(TRANSLATE_PATH, &request).await
    }

    async fn post_json<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| anyhow!("Request to {} failed: {}", url, e))?;

        let status = response.status();
        let body = response.text().await?;

        serde_json::from_str(&body)
            .map_err(|e| anyhow!("Malformed response from {} (status {}): {}", url, status, e))
    }
}
