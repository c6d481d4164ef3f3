//! Pass-through client for the upstream text-generation service.
//!
//! The student service builds a prompt from a record and posts it to a chat-completions style
//! endpoint. The upstream response body is returned untouched so the HTTP layer can relay it
//! verbatim; nothing here parses or validates what the model produced.

use crate::students::Student;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced while calling the upstream service.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Request could not be sent or the connection failed.
    #[error("failed to reach summary upstream: {0}")]
    Transport(String),
    /// Upstream did not answer within the configured timeout.
    #[error("summary upstream timed out after {0:?}")]
    Timeout(Duration),
    /// Response arrived but its body could not be read.
    #[error("failed to read summary response: {0}")]
    ReadBody(String),
}

/// JSON payload posted to the upstream endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRequest {
    /// Natural-language prompt describing the student.
    pub input: String,
    /// Model identifier understood by the upstream service.
    pub model: String,
}

impl SummaryRequest {
    /// Build the summary prompt for `student`.
    pub fn for_student(student: &Student, model: impl Into<String>) -> Self {
        Self {
            input: format!(
                "Generate a detailed summary for the following student: Name: {}, Age: {}, Email: {}",
                student.name, student.age, student.email
            ),
            model: model.into(),
        }
    }
}

/// Interface implemented by summary backends.
#[async_trait]
pub trait SummaryClient: Send + Sync {
    /// Forward `request` and return the raw upstream response body.
    async fn generate(&self, request: SummaryRequest) -> Result<Vec<u8>, SummaryError>;
}

/// `reqwest`-backed client posting to a fixed endpoint.
pub struct HttpSummaryClient {
    http: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpSummaryClient {
    /// Build a client for `endpoint` whose calls give up after `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SummaryError> {
        let http = Client::builder()
            .user_agent("student-api/summary")
            .timeout(timeout)
            .build()
            .map_err(|error| SummaryError::Transport(error.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    /// Endpoint every summary request is posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn classify(
        &self,
        error: reqwest::Error,
        on_other: fn(String) -> SummaryError,
    ) -> SummaryError {
        if error.is_timeout() {
            SummaryError::Timeout(self.timeout)
        } else {
            on_other(error.to_string())
        }
    }
}

#[async_trait]
impl SummaryClient for HttpSummaryClient {
    async fn generate(&self, request: SummaryRequest) -> Result<Vec<u8>, SummaryError> {
        tracing::debug!(endpoint = %self.endpoint, model = %request.model, "Requesting summary");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|error| self.classify(error, SummaryError::Transport))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| self.classify(error, SummaryError::ReadBody))?;

        // Non-2xx bodies are relayed as-is.
        if !status.is_success() {
            tracing::warn!(%status, "Summary upstream returned non-success status");
        }

        Ok(body.to_vec())
    }
}
