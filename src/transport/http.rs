//! HTTP transport for the agent backend
//!
//! JSON over HTTP against a fixed base URL. Request timeouts are a policy of
//! this client (`backend.timeout_seconds`); the state layer never cancels.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::BackendConfig;
use crate::error::{Result, RoundtableError};
use crate::transport::{
    Backend, ChatRequest, ChatResult, ContextSnapshot, DiscussionRequest, DiscussionResult,
    DiscussionStatus,
};

/// `reqwest`-backed [`Backend`]
///
/// # Examples
///
/// ```
/// use roundtable::config::BackendConfig;
/// use roundtable::transport::HttpBackend;
///
/// let backend = HttpBackend::new(&BackendConfig::default()).unwrap();
/// assert_eq!(backend.base_url().as_str(), "http://localhost:8000/api/");
/// ```
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a new HTTP backend from configuration
    ///
    /// # Errors
    ///
    /// Returns error if the base URL does not parse or the HTTP client
    /// cannot be built
    pub fn new(config: &BackendConfig) -> Result<Self> {
        // Url::join replaces the last path segment unless the base ends in '/'
        let mut base = config.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base).map_err(|e| {
            RoundtableError::Config(format!("Invalid backend URL '{}': {}", config.base_url, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                RoundtableError::Transport(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::debug!(
            "Initialized HTTP backend: base_url={}, timeout={}s",
            base_url,
            config.timeout_seconds
        );

        Ok(Self { client, base_url })
    }

    /// Base URL every endpoint is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| {
            RoundtableError::Config(format!("Invalid endpoint path '{}': {}", path, e)).into()
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RoundtableError::Transport(format!("GET {} failed: {}", path, e)))?;

        Self::decode(response, path).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| RoundtableError::Transport(format!("POST {} failed: {}", path, e)))?;

        Self::decode(response, path).await
    }

    async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Backend returned {} for {}", status, path);
            return Err(RoundtableError::HttpStatus {
                endpoint: path.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.map_err(|e| {
            RoundtableError::Transport(format!("Failed to read {} response: {}", path, e))
        })?;

        serde_json::from_str(&body).map_err(|e| {
            RoundtableError::InvalidResponse {
                endpoint: path.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn send_chat(&self, content: &str) -> Result<ChatResult> {
        let request = ChatRequest {
            content: content.to_string(),
        };
        let result: ChatResult = self.post_json("chat", &request).await?;
        tracing::debug!("Received {} agent replies", result.reply_count());
        Ok(result)
    }

    async fn fetch_context(&self) -> Result<ContextSnapshot> {
        self.get_json("context").await
    }

    async fn start_discussion(&self, topic: &str, max_rounds: u32) -> Result<DiscussionResult> {
        let request = DiscussionRequest {
            topic: topic.to_string(),
            max_rounds,
        };
        self.post_json("discussion", &request).await
    }

    async fn discussion_status(&self) -> Result<DiscussionStatus> {
        self.get_json("discussion/status").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> BackendConfig {
        BackendConfig {
            base_url: base_url.to_string(),
            ..BackendConfig::default()
        }
    }

    #[test]
    fn test_endpoints_resolve_under_base_path() {
        let backend = HttpBackend::new(&config("http://localhost:8000/api")).unwrap();
        assert_eq!(
            backend.endpoint("chat").unwrap().as_str(),
            "http://localhost:8000/api/chat"
        );
        assert_eq!(
            backend.endpoint("discussion/status").unwrap().as_str(),
            "http://localhost:8000/api/discussion/status"
        );
    }

    #[test]
    fn test_trailing_slash_is_not_doubled() {
        let backend = HttpBackend::new(&config("http://localhost:8000/api/")).unwrap();
        assert_eq!(backend.base_url().as_str(), "http://localhost:8000/api/");
        assert_eq!(
            backend.endpoint("context").unwrap().as_str(),
            "http://localhost:8000/api/context"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = HttpBackend::new(&config("::not a url")).unwrap_err();
        assert!(err.to_string().contains("Invalid backend URL"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 1 is reserved and nothing listens on it
        let backend = HttpBackend::new(&BackendConfig {
            base_url: "http://127.0.0.1:1/api".to_string(),
            timeout_seconds: 2,
            ..BackendConfig::default()
        })
        .unwrap();

        let err = backend.fetch_context().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RoundtableError>(),
            Some(RoundtableError::Transport(_))
        ));
    }
}
