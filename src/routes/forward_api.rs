use crate::{
    services::backend_proxy::types::forward_envelope::ForwardRequest,
    types::app_state::AppState, utils::app_error::AppError,
};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tracing::error;

pub async fn forward_api(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let request = ForwardRequest::new(method, &uri, &headers, body);

    let response = state.backend_proxy.forward(request).await.map_err(|e| {
        error!("Failed to forward {} to backend: {}", uri.path(), e);
        AppError::new(StatusCode::BAD_GATEWAY, &e.to_string())
    })?;

    Ok(response.into_response())
}
