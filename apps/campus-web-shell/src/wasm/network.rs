use super::*;

/// Browser fetch through `gloo-net`.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct GlooTransport;

#[async_trait(?Send)]
impl ApiTransport for GlooTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, RequestError> {
        let mut request_builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
        };
        for (header_name, header_value) in &request.headers {
            request_builder = request_builder.header(header_name, header_value);
        }

        let response = if let Some(body) = request.body {
            request_builder
                .body(body)
                .map_err(map_network_error)?
                .send()
                .await
                .map_err(map_network_error)?
        } else {
            request_builder.send().await.map_err(map_network_error)?
        };

        let status = response.status();
        let body = response.text().await.map_err(map_network_error)?;
        Ok(RawResponse { status, body })
    }
}

pub(super) fn map_network_error(error: gloo_net::Error) -> RequestError {
    RequestError::transport(error)
}

/// `localStorage` token lookup.
pub(super) struct LocalStorageTokenStore {
    window: web_sys::Window,
}

impl LocalStorageTokenStore {
    pub(super) fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl TokenStore for LocalStorageTokenStore {
    type Error = SurfaceError;

    fn load_token(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let Some(storage) = self
            .window
            .local_storage()
            .map_err(|_| SurfaceError::Dom("localStorage is unavailable".to_string()))?
        else {
            return Ok(None);
        };
        storage
            .get_item(key)
            .map_err(|_| SurfaceError::Dom(format!("failed to read {key} from localStorage")))
    }
}
