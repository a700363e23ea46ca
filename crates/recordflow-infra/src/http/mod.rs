//! reqwest clients for the two external services.
//!
//! Each client sends one request per attempt through [`send_json`] and
//! leaves retries and per-attempt timeouts to
//! [`recordflow_core::retry::ResilientCaller`].

pub mod records;
pub mod workflow;

use serde_json::Value;

use recordflow_types::error::AttemptError;

pub use records::HttpRecordStore;
pub use workflow::HttpWorkflowEngine;

/// Build the shared HTTP client.
pub fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(concat!("recordflow/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Send one request and decode its JSON body.
///
/// Error-range statuses (4xx/5xx) fail with the response body attached; a
/// body that is not JSON fails as a decode error.
pub async fn send_json(request: reqwest::RequestBuilder) -> Result<Value, AttemptError> {
    let response = request
        .send()
        .await
        .map_err(|e| AttemptError::Transport(e.to_string()))?;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        let body = response.text().await.unwrap_or_default();
        return Err(AttemptError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| AttemptError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn send_json_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"a": 1})))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let body = send_json(client.get(format!("{}/ok", server.uri()))).await.unwrap();
        assert_eq!(body, json!({"a": 1}));
    }

    #[tokio::test]
    async fn send_json_error_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let err = send_json(client.get(server.uri())).await.unwrap_err();
        match err {
            AttemptError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid token");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_json_non_json_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let client = build_client().unwrap();
        let err = send_json(client.get(server.uri())).await.unwrap_err();
        assert!(matches!(err, AttemptError::Decode(_)));
    }

    #[tokio::test]
    async fn send_json_connection_refused_is_transport_error() {
        // Grab a free port, then close it so nothing is listening.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = build_client().unwrap();
        let err = send_json(client.get(format!("http://{addr}"))).await.unwrap_err();
        assert!(matches!(err, AttemptError::Transport(_)));
    }
}
