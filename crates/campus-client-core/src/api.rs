use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{RequestError, format_http_error};
use crate::session::Session;

pub const CONTENT_TYPE_JSON: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// What a caller asks for: an endpoint relative to the API base URL plus an
/// optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub endpoint: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            endpoint: endpoint.into(),
            body: None,
        }
    }

    pub fn post<B: Serialize + ?Sized>(
        endpoint: impl Into<String>,
        body: &B,
    ) -> Result<Self, RequestError> {
        let body = serde_json::to_value(body).map_err(|error| RequestError::Encode {
            message: error.to_string(),
        })?;
        Ok(Self {
            method: HttpMethod::Post,
            endpoint: endpoint.into(),
            body: Some(body),
        })
    }
}

/// Fully resolved request handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl PreparedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Platform HTTP seam. The browser uses `gloo-net`, native builds use
/// `reqwest`, tests script responses.
#[async_trait(?Send)]
pub trait ApiTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    config: ClientConfig,
    session: Session,
    transport: T,
}

impl<T: ApiTransport> ApiClient<T> {
    pub fn new(config: ClientConfig, session: Session, transport: T) -> Self {
        Self {
            config,
            session,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn endpoint(&self, path: &str) -> Option<String> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with('/') {
            Some(format!("{}{}", self.config.base_url, trimmed))
        } else {
            Some(format!("{}/{}", self.config.base_url, trimmed))
        }
    }

    pub fn prepare(&self, request: &ApiRequest) -> Result<PreparedRequest, RequestError> {
        let url = self
            .endpoint(&request.endpoint)
            .ok_or(RequestError::InvalidEndpoint)?;
        let body = request
            .body
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|error| RequestError::Encode {
                message: error.to_string(),
            })?;
        Ok(PreparedRequest {
            method: request.method,
            url,
            headers: vec![
                ("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string()),
                (
                    "Authorization".to_string(),
                    self.session.authorization_header(),
                ),
            ],
            body,
        })
    }

    /// Sends the request and decodes the JSON body. Non-2xx statuses become
    /// [`RequestError::Status`].
    pub async fn call<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R, RequestError> {
        let prepared = self.prepare(request)?;
        tracing::debug!(
            method = prepared.method.as_str(),
            url = %prepared.url,
            "sending api request"
        );
        let response = self.transport.send(prepared).await?;
        decode_json_response(&response)
    }

    /// Like [`ApiClient::call`] but hands back the raw response, so callers
    /// that only care about reachability can inspect the status.
    pub async fn send_raw(&self, request: &ApiRequest) -> Result<RawResponse, RequestError> {
        let prepared = self.prepare(request)?;
        self.transport.send(prepared).await
    }

    pub async fn get_json<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, RequestError> {
        self.call(&ApiRequest::get(endpoint)).await
    }
}

pub fn decode_json_response<R: DeserializeOwned>(
    response: &RawResponse,
) -> Result<R, RequestError> {
    if !response.is_success() {
        return Err(format_http_error(response.status, &response.body));
    }
    serde_json::from_str(&response.body).map_err(|error| RequestError::Decode {
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use serde_json::{Value, json};

    use super::*;

    #[derive(Default)]
    struct QueueTransport {
        responses: RefCell<VecDeque<Result<RawResponse, RequestError>>>,
        sent: RefCell<Vec<PreparedRequest>>,
    }

    impl QueueTransport {
        fn with(responses: Vec<Result<RawResponse, RequestError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl ApiTransport for QueueTransport {
        async fn send(&self, request: PreparedRequest) -> Result<RawResponse, RequestError> {
            self.sent.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(RequestError::transport("no scripted response")))
        }
    }

    fn client(transport: QueueTransport) -> ApiClient<QueueTransport> {
        ApiClient::new(
            ClientConfig::new("http://localhost:8080/api/").expect("config"),
            Session::new("tok_abc"),
            transport,
        )
    }

    fn ok(body: &str) -> Result<RawResponse, RequestError> {
        Ok(RawResponse {
            status: 200,
            body: body.to_string(),
        })
    }

    #[test]
    fn endpoint_builder_normalizes_paths() {
        let client = client(QueueTransport::default());
        assert_eq!(
            client.endpoint("/students/dashboard"),
            Some("http://localhost:8080/api/students/dashboard".to_string())
        );
        assert_eq!(
            client.endpoint("hod/students"),
            Some("http://localhost:8080/api/hod/students".to_string())
        );
        assert_eq!(client.endpoint("  "), None);
    }

    #[test]
    fn prepared_requests_carry_json_and_bearer_headers() {
        let client = client(QueueTransport::default());
        let request = ApiRequest::post("/hod/students", &json!({ "name": "Asha" }))
            .expect("encodable body");
        let prepared = client.prepare(&request).expect("prepared");
        assert_eq!(prepared.method, HttpMethod::Post);
        assert_eq!(prepared.header("content-type"), Some("application/json"));
        assert_eq!(prepared.header("authorization"), Some("Bearer tok_abc"));
        assert_eq!(prepared.body.as_deref(), Some(r#"{"name":"Asha"}"#));
    }

    #[tokio::test]
    async fn call_decodes_successful_json() {
        let client = client(QueueTransport::with(vec![ok(r#"{"totalStudents":240}"#)]));
        let value: Value = client
            .get_json("/hod/dashboard")
            .await
            .expect("decoded response");
        assert_eq!(value["totalStudents"], 240);
        let sent = client.transport().sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "http://localhost:8080/api/hod/dashboard");
        assert_eq!(sent[0].body, None);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let client = client(QueueTransport::with(vec![Ok(RawResponse {
            status: 401,
            body: "unauthorized".to_string(),
        })]));
        let error = client
            .get_json::<Value>("/principal/dashboard")
            .await
            .expect_err("status error");
        assert_eq!(
            error,
            RequestError::Status {
                status: 401,
                body: "unauthorized".to_string()
            }
        );
    }

    #[tokio::test]
    async fn transport_and_decode_failures_surface() {
        let client = client(QueueTransport::with(vec![
            Err(RequestError::transport("connection refused")),
            ok("not json"),
        ]));
        let transport = client
            .get_json::<Value>("/students/dashboard")
            .await
            .expect_err("transport error");
        assert!(matches!(transport, RequestError::Transport { .. }));
        let decode = client
            .get_json::<Value>("/students/dashboard")
            .await
            .expect_err("decode error");
        assert!(matches!(decode, RequestError::Decode { .. }));
    }

    #[tokio::test]
    async fn empty_endpoint_never_reaches_transport() {
        let client = client(QueueTransport::default());
        let error = client
            .get_json::<Value>("")
            .await
            .expect_err("invalid endpoint");
        assert_eq!(error, RequestError::InvalidEndpoint);
        assert!(client.transport().sent.borrow().is_empty());
    }
}
