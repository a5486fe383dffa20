use axum::{
    body::{Body, Bytes},
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderMap, HeaderValue, Method, Response, StatusCode, Uri,
    },
    response::IntoResponse,
};

/// Response headers relayed back to the caller. Everything else is dropped.
pub const FORWARDED_RESPONSE_HEADERS: [&str; 4] =
    ["content-type", "cache-control", "x-chat-model", "x-embed-model"];

const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// One outgoing proxied call. Only `accept`, and `content-type` when a body
/// is sent, ever leave the proxy.
pub struct ForwardRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub accept: HeaderValue,
    pub body: Option<(HeaderValue, Bytes)>,
}

impl ForwardRequest {
    pub fn new(method: Method, uri: &Uri, headers: &HeaderMap, body: Bytes) -> Self {
        let accept = headers
            .get(ACCEPT)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_MEDIA_TYPE));

        let body = match method {
            Method::POST | Method::PUT => {
                let content_type = headers
                    .get(CONTENT_TYPE)
                    .cloned()
                    .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_MEDIA_TYPE));
                Some((content_type, body))
            }
            _ => None,
        };

        ForwardRequest {
            method,
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            accept,
            body,
        }
    }

    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, self.accept.clone());
        if let Some((content_type, _)) = &self.body {
            headers.insert(CONTENT_TYPE, content_type.clone());
        }
        headers
    }
}

pub struct ForwardResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ForwardResponse {
    pub fn filter_headers(upstream: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for name in FORWARDED_RESPONSE_HEADERS {
            if let Some(value) = upstream.get(name) {
                headers.insert(name, value.clone());
            }
        }
        headers
    }
}

impl IntoResponse for ForwardResponse {
    fn into_response(self) -> Response<Body> {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
