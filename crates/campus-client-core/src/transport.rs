use async_trait::async_trait;

use crate::api::{ApiTransport, HttpMethod, PreparedRequest, RawResponse};
use crate::error::RequestError;

/// Native transport used by the CLI. No timeout and no retry: a hung backend
/// blocks the caller.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl ApiTransport for ReqwestTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, RequestError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(request.url.as_str()),
            HttpMethod::Post => self.http.post(request.url.as_str()),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(RequestError::transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(RequestError::transport)?;
        Ok(RawResponse { status, body })
    }
}
