use anyhow::{Context, Result, bail};
use reqwest::{Client, Url};
use serde::Serialize;
use std::time::Duration;

use super::backend::{Backend, BackendSession, EventStream};
use super::sse_parser::sse_to_events;
use crate::config::ResolvedConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// Backend speaking the OpenAI-compatible `/v1/chat/completions` protocol.
///
/// Each session is a single streamed completion; the SSE stream is mapped
/// into session events by [`sse_to_events`].
pub struct ChatCompletionsBackend {
    endpoint: String,
    api_key: Option<String>,
    api_key_env: Option<String>,
    client: Option<Client>,
}

impl ChatCompletionsBackend {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            api_key_env: config.api_key_env.clone(),
            client: None,
        }
    }

    fn completions_url(&self) -> Result<Url> {
        let url = format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        );
        let url = Url::parse(&url)
            .with_context(|| format!("Invalid endpoint URL: {}", self.endpoint))?;

        if !matches!(url.scheme(), "http" | "https") {
            bail!("Unsupported endpoint scheme: {}", url.scheme());
        }

        Ok(url)
    }
}

impl Backend for ChatCompletionsBackend {
    type Session = ChatSession;

    async fn start(&mut self) -> Result<()> {
        self.completions_url()?;

        if self.api_key.is_none()
            && let Some(env_var) = &self.api_key_env
        {
            bail!(
                "API key is missing\n\n\
                 Set the {env_var} environment variable:\n  \
                 export {env_var}=\"your-api-key\""
            );
        }

        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        self.client = Some(client);

        Ok(())
    }

    async fn create_session(&self, model: &str) -> Result<ChatSession> {
        let client = self
            .client
            .clone()
            .context("Client has not been started")?;

        if model.trim().is_empty() {
            bail!("Model name is empty");
        }

        Ok(ChatSession {
            client,
            url: self.completions_url()?,
            api_key: self.api_key.clone(),
            model: model.to_string(),
        })
    }

    async fn stop(&mut self) {
        self.client = None;
    }
}

/// One conversation with a chat-completions endpoint.
pub struct ChatSession {
    client: Client,
    url: Url,
    api_key: Option<String>,
    model: String,
}

impl BackendSession for ChatSession {
    async fn send(&mut self, prompt: &str) -> Result<EventStream> {
        let chat_request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            stream: true,
        };

        let mut http_request = self.client.post(self.url.clone()).json(&chat_request);

        if let Some(api_key) = &self.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        let response = http_request
            .send()
            .await
            .with_context(|| format!("Failed to connect to API endpoint: {}", self.url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("API request failed with status {status}: {body}");
        }

        Ok(Box::pin(sse_to_events(response.bytes_stream())))
    }

    async fn destroy(self) {}
}
