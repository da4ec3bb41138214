use crate::{
    config::VisionClientConfig,
    error::{Result, VisionError},
    messages::{ChatRequest, ChatResponse, ErrorResponse},
};
use std::time::Duration;

/// Outcome of a single chat-completion call, classified by failure kind.
#[derive(Debug)]
pub enum ChatCompletionResult {
    /// The endpoint answered 2xx with a chat-completion body.
    Success(ChatResponse),
    /// The endpoint could not be reached.
    ConnectionFailed(String),
    /// No response arrived within the bounded wait.
    TimedOut,
    /// Anything else: non-2xx status, unreadable or malformed body.
    Other(VisionError),
}

impl ChatCompletionResult {
    /// A connect that times out is a connection failure, not a slow model.
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_connect() {
            ChatCompletionResult::ConnectionFailed(err.to_string())
        } else if err.is_timeout() {
            ChatCompletionResult::TimedOut
        } else {
            ChatCompletionResult::Other(VisionError::Request(err.to_string()))
        }
    }
}

/// HTTP client bound to one chat-completion endpoint.
pub struct VisionClient {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl VisionClient {
    /// Creates a client whose every request is bounded by `config.timeout`.
    pub fn new(config: &VisionClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout.min(config.timeout))
            .timeout(config.timeout)
            .build()
            .map_err(|e| VisionError::Request(e.to_string()))?;

        Ok(Self {
            http,
            url: config.url.clone(),
            timeout: config.timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POSTs `request` as JSON and classifies the outcome. Never retries.
    pub async fn submit(&self, request: &ChatRequest) -> ChatCompletionResult {
        log::debug!("POST {} (model {})", self.url, request.model);

        let response = match self.http.post(&self.url).json(request).send().await {
            Ok(response) => response,
            Err(e) => return ChatCompletionResult::from_reqwest(e),
        };

        let status = response.status();
        log::debug!("Response status: {status}");

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return ChatCompletionResult::from_reqwest(e),
        };

        if !status.is_success() {
            let detail = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(error) => error.error.message,
                Err(_) => body.trim().to_string(),
            };
            return ChatCompletionResult::Other(VisionError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        match serde_json::from_str::<ChatResponse>(&body) {
            Ok(response) => ChatCompletionResult::Success(response),
            Err(e) => ChatCompletionResult::Other(VisionError::MalformedResponse(e.to_string())),
        }
    }

    /// Like [`VisionClient::submit`], folded into the crate error type.
    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse> {
        match self.submit(request).await {
            ChatCompletionResult::Success(response) => {
                if let Some(usage) = response.usage {
                    log::debug!(
                        "Token usage: prompt={} completion={} total={}",
                        usage.prompt_tokens,
                        usage.completion_tokens,
                        usage.total_tokens
                    );
                }
                Ok(response)
            }
            ChatCompletionResult::ConnectionFailed(detail) => Err(VisionError::ConnectionFailed {
                url: self.url.clone(),
                detail,
            }),
            ChatCompletionResult::TimedOut => Err(VisionError::TimedOut {
                timeout: self.timeout,
            }),
            ChatCompletionResult::Other(e) => Err(e),
        }
    }
}
