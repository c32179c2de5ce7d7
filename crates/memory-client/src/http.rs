//! HTTP client for the remote memory API

use crate::types::{ContextRequest, MemoriesResponse, RecallRequest};
use crate::{MemoryBackend, MemoryConfig, MemoryError, MemorySnippet, MemoryStats, NewMemory, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};

/// Bearer-authenticated client for `/api/recall`, `/api/remember`, `/api/context`
/// and `/api/stats`.
pub struct HttpMemoryClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl HttpMemoryClient {
    pub fn new(config: MemoryConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url: config.base_url,
            api_key: config.api_key,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(MemoryError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl MemoryBackend for HttpMemoryClient {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn recall(&self, query: &str, limit: usize) -> Result<Vec<MemorySnippet>> {
        let request = self
            .client
            .post(self.url("/api/recall"))
            .json(&RecallRequest { query, limit });
        let response = Self::check(self.authorized(request).send().await?).await?;
        let body: MemoriesResponse = response.json().await?;
        tracing::debug!("recalled {} memories", body.memories.len());
        Ok(body.memories)
    }

    async fn remember(&self, memory: NewMemory) -> Result<()> {
        let request = self.client.post(self.url("/api/remember")).json(&memory);
        Self::check(self.authorized(request).send().await?).await?;
        tracing::info!("stored {} memory", memory.kind);
        Ok(())
    }

    async fn context(
        &self,
        context: &str,
        max_results: usize,
        auto_ingest: bool,
    ) -> Result<Vec<MemorySnippet>> {
        let request = self.client.post(self.url("/api/context")).json(&ContextRequest {
            context,
            max_results,
            auto_ingest,
        });
        let response = Self::check(self.authorized(request).send().await?).await?;
        let body: MemoriesResponse = response.json().await?;
        Ok(body.memories)
    }

    async fn stats(&self) -> Result<MemoryStats> {
        let request = self.client.get(self.url("/api/stats"));
        let response = Self::check(self.authorized(request).send().await?).await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> Result<HttpMemoryClient> {
        HttpMemoryClient::new(MemoryConfig {
            base_url: server.uri(),
            api_key: "secret".to_string(),
            timeout: Duration::from_secs(5),
        })
    }

    #[tokio::test]
    async fn recall_sends_query_and_parses_memories() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/recall"))
            .and(header("Authorization", "Bearer secret"))
            .and(body_json(json!({"query": "Wann ist der Termin?", "limit": 5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "memories": [
                    {"content": "Pizza Termin Freitag", "type": "event", "score": 0.92, "id": "m-1"},
                    {"content": "Zahnarzt Dienstag"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let memories = client(&server)?.recall("Wann ist der Termin?", 5).await?;
        assert_eq!(memories.len(), 2);
        assert_eq!(memories[0].content, "Pizza Termin Freitag");
        assert_eq!(memories[0].kind.as_deref(), Some("event"));
        assert_eq!(memories[1].score, None);
        Ok(())
    }

    #[tokio::test]
    async fn remember_posts_record() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/remember"))
            .and(header("Authorization", "Bearer secret"))
            .and(body_json(json!({
                "content": "Pizza Termin Freitag",
                "type": "event",
                "source_type": "conversation",
                "tags": ["google-home"]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "m-2"})))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)?
            .remember(NewMemory {
                content: "Pizza Termin Freitag".to_string(),
                kind: "event".to_string(),
                source_type: "conversation".to_string(),
                tags: vec!["google-home".to_string()],
            })
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn context_and_stats() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/context"))
            .and(body_json(json!({"context": "Abendessen planen", "max_results": 3, "auto_ingest": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "memories": [{"content": "mag keinen Koriander", "type": "preference"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total_memories": 42, "by_type": {}})))
            .mount(&server)
            .await;

        let client = client(&server)?;
        let memories = client.context("Abendessen planen", 3, false).await?;
        assert_eq!(memories[0].content, "mag keinen Koriander");
        assert_eq!(client.stats().await?.total_memories, 42);
        Ok(())
    }

    #[tokio::test]
    async fn error_status_is_reported_with_body() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/recall"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let err = client(&server)?.recall("irgendwas", 5).await;
        match err {
            Err(MemoryError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid key");
            }
            other => return Err(MemoryError::Status { status: 0, body: format!("unexpected: {other:?}") }),
        }
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_service_is_an_http_error() -> Result<()> {
        let client = HttpMemoryClient::new(MemoryConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: "secret".to_string(),
            timeout: Duration::from_secs(2),
        })?;
        assert!(matches!(client.stats().await, Err(MemoryError::Http(_))));
        Ok(())
    }

    #[test]
    fn config_requires_url_and_key() {
        assert!(MemoryConfig::from_parts(None, Some("k".into())).is_none());
        assert!(MemoryConfig::from_parts(Some("http://m".into()), None).is_none());
        assert!(MemoryConfig::from_parts(Some("http://m".into()), Some("  ".into())).is_none());
        let config = MemoryConfig::from_parts(Some("http://m/".into()), Some("k".into()));
        assert_eq!(config.map(|c| c.base_url), Some("http://m".to_string()));
    }
}
