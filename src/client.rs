use crate::models::{IncrementRequest, IncrementResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

pub const INCREMENT_PATH: &str = "/api/increment-count";

#[derive(Error, Debug)]
pub enum CounterClientError {
    #[error("network response was not ok: {0}")]
    Status(StatusCode),

    #[error("counter request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Sends the increment signal for one registration.
#[async_trait]
pub trait CounterClient: Send + Sync {
    async fn increment(&self, email: &str) -> Result<IncrementResponse, CounterClientError>;
}

#[async_trait]
impl<T: CounterClient + ?Sized> CounterClient for std::sync::Arc<T> {
    async fn increment(&self, email: &str) -> Result<IncrementResponse, CounterClientError> {
        (**self).increment(email).await
    }
}

#[derive(Debug, Clone)]
pub struct HttpCounterClient {
    client: Client,
    endpoint: String,
}

impl HttpCounterClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{INCREMENT_PATH}", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CounterClient for HttpCounterClient {
    async fn increment(&self, email: &str) -> Result<IncrementResponse, CounterClientError> {
        tracing::debug!("posting increment to {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&IncrementRequest {
                email: email.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CounterClientError::Status(response.status()));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn posts_email_as_json() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/increment-count")
                    .header("content-type", "application/json")
                    .json_body(serde_json::json!({ "email": "a@b.com" }));
                then.status(200)
                    .json_body(serde_json::json!({ "success": true, "newCount": 7 }));
            })
            .await;

        let client = HttpCounterClient::new(&server.base_url());
        let response = client.increment("a@b.com").await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.new_count, 7);
        assert!(response.success);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/increment-count");
                then.status(500).json_body(serde_json::json!({
                    "success": false,
                    "message": "Failed to update counter due to a database error."
                }));
            })
            .await;

        let client = HttpCounterClient::new(&server.base_url());
        let err = client.increment("a@b.com").await.unwrap_err();
        assert!(matches!(
            err,
            CounterClientError::Status(status) if status == StatusCode::INTERNAL_SERVER_ERROR
        ));
    }

    #[tokio::test]
    async fn malformed_body_is_a_transport_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/increment-count");
                then.status(200).body("not json");
            })
            .await;

        let client = HttpCounterClient::new(&server.base_url());
        let err = client.increment("a@b.com").await.unwrap_err();
        assert!(matches!(err, CounterClientError::Transport(_)));
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let client = HttpCounterClient::new("http://127.0.0.1:8080/");
        assert_eq!(client.endpoint(), "http://127.0.0.1:8080/api/increment-count");
    }
}
