use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendProxyError {
    #[error("Backend request failed: {0}")]
    Request(String),
    #[error("Failed to read backend response: {0}")]
    Body(String),
}
