//! `POST {"query": ...}` → `{"response": ...}` over HTTP.

use crate::config::FileEndpointConfig;
use async_trait::async_trait;
use chatwire_application::{ChatEndpoint, EndpointError};
use chatwire_domain::Query;
use chatwire_domain::core::string::preview;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Serialize)]
struct ChatRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct ChatReply {
    response: String,
}

/// Chat endpoint reached with a single JSON POST per query.
///
/// The request body is `{"query": <text>}` sent with
/// `Content-Type: application/json`. A 2xx answer must carry a string
/// `response` field; any other status fails without reading the body.
pub struct HttpChatEndpoint {
    client: Client,
    url: Url,
}

impl HttpChatEndpoint {
    /// Create an endpoint for `url` with an optional request timeout.
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, EndpointError> {
        let url = Url::parse(url)
            .map_err(|e| EndpointError::Other(format!("Invalid endpoint URL '{}': {}", url, e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| EndpointError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, url })
    }

    pub fn from_config(config: &FileEndpointConfig) -> Result<Self, EndpointError> {
        Self::new(&config.url, config.timeout())
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ChatEndpoint for HttpChatEndpoint {
    async fn ask(&self, query: &Query) -> Result<String, EndpointError> {
        let start = Instant::now();
        debug!("POST {} query={}", self.url, preview(query.content(), 60));

        let response = self
            .client
            .post(self.url.clone())
            .json(&ChatRequest {
                query: query.content(),
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "Chat endpoint answered {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            );
            return Err(EndpointError::Status {
                status: status.as_u16(),
            });
        }

        let reply: ChatReply = response.json().await.map_err(|e| {
            if e.is_timeout() {
                EndpointError::Timeout
            } else {
                EndpointError::MalformedReply(e.to_string())
            }
        })?;

        debug!(
            "Chat endpoint replied in {}ms ({} bytes)",
            start.elapsed().as_millis(),
            reply.response.len()
        );
        Ok(reply.response)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

fn map_transport_error(e: reqwest::Error) -> EndpointError {
    if e.is_timeout() {
        EndpointError::Timeout
    } else if e.is_connect() || e.is_request() {
        EndpointError::ConnectionError(e.to_string())
    } else {
        EndpointError::Other(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path},
    };

    fn query(text: &str) -> Query {
        Query::try_new(text).unwrap()
    }

    async fn endpoint_for(server: &MockServer) -> HttpChatEndpoint {
        HttpChatEndpoint::new(&format!("{}/chat", server.uri()), None).unwrap()
    }

    #[tokio::test]
    async fn test_posts_query_and_returns_response_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "query": "hi" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "response": "**bold** line1\nline2" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let reply = endpoint_for(&server).await.ask(&query("hi")).await.unwrap();

        assert_eq!(reply, "**bold** line1\nline2");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "error": "Query is required" })),
            )
            .mount(&server)
            .await;

        let err = endpoint_for(&server)
            .await
            .ask(&query("hi"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_success_without_response_field_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "nope" })))
            .mount(&server)
            .await;

        let err = endpoint_for(&server)
            .await
            .ask(&query("hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, EndpointError::MalformedReply(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "response": "late" }))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let endpoint = HttpChatEndpoint::new(
            &format!("{}/chat", server.uri()),
            Some(Duration::from_millis(100)),
        )
        .unwrap();
        let err = endpoint.ask(&query("hi")).await.unwrap_err();

        assert!(matches!(err, EndpointError::Timeout));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        // Bind then drop a listener so nothing answers on the port
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let endpoint =
            HttpChatEndpoint::new(&format!("http://127.0.0.1:{}/chat", port), None).unwrap();

        let err = endpoint.ask(&query("hi")).await.unwrap_err();

        assert!(matches!(err, EndpointError::ConnectionError(_)));
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(HttpChatEndpoint::new("not a url", None).is_err());
    }

    #[test]
    fn test_describe_is_url() {
        let endpoint = HttpChatEndpoint::new("http://127.0.0.1:5000/chat", None).unwrap();
        assert_eq!(endpoint.describe(), "http://127.0.0.1:5000/chat");
    }
}
