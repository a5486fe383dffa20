use tracing::debug;

use super::types::{
    backend_proxy_error::BackendProxyError,
    forward_envelope::{ForwardRequest, ForwardResponse},
};

pub const API_PREFIX: &str = "/api/";

#[derive(Clone)]
pub struct BackendProxyConfig {
    pub base_url: String,
}

#[derive(Clone)]
pub struct BackendProxy {
    config: BackendProxyConfig,
    client: reqwest::Client,
}

impl BackendProxy {
    pub fn new(config: BackendProxyConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn target_url(&self, path: &str, query: Option<&str>) -> String {
        let rest = path
            .strip_prefix(API_PREFIX)
            .unwrap_or_else(|| path.trim_start_matches('/'));

        let mut url = format!(
            "{}{}{}",
            self.config.base_url.trim_end_matches('/'),
            API_PREFIX,
            rest
        );

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }

        url
    }

    /// Relays one request to the backend. The whole body is buffered; there
    /// is no retry and no timeout beyond the transport default.
    pub async fn forward(
        &self,
        request: ForwardRequest,
    ) -> Result<ForwardResponse, BackendProxyError> {
        let target = self.target_url(&request.path, request.query.as_deref());
        debug!(method = %request.method, target = %target, "Forwarding to backend");

        let mut builder = self
            .client
            .request(request.method.clone(), &target)
            .headers(request.headers());

        if let Some((_, body)) = request.body {
            builder = builder.body(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| BackendProxyError::Request(e.to_string()))?;

        let status = resp.status();
        let headers = ForwardResponse::filter_headers(resp.headers());
        let body = resp
            .bytes()
            .await
            .map_err(|e| BackendProxyError::Body(e.to_string()))?;

        Ok(ForwardResponse {
            status,
            headers,
            body,
        })
    }
}
