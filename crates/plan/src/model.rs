use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

/// A chat model answering with a JSON object.
#[async_trait::async_trait]
pub trait PlanModel: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> anyhow::Result<String>;
}

/// OpenAI compatible `chat/completions` client.
#[derive(Debug, Clone)]
pub struct OpenAiModel {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiModel {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    async fn send(&self, request: &ChatRequest<'_>) -> reqwest::Result<reqwest::Response> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        self.client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
    }
}

#[async_trait::async_trait]
impl PlanModel for OpenAiModel {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> anyhow::Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature,
            max_tokens,
        };

        let response = match self.send(&request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(err = %err, "chat completion request failed, retrying once");
                self.send(&request).await?
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %body, "chat completion returned an error");
            anyhow::bail!("chat completion returned {status}: {body}");
        }

        let response: ChatResponse = response.json().await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("chat completion returned no content"))
    }
}
