use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacesServiceError {
    #[error("GOOGLE_MAPS_API_KEY is not set. Add it to the service environment before searching.")]
    MissingApiKey,
    #[error("Google Places request timed out after {0} ms")]
    Timeout(u128),
    #[error("Google Places request failed: {0}")]
    Network(String),
    #[error("Google Places HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Google Places status {status}: {message}")]
    Status { status: String, message: String },
    #[error("Failed to decode Google Places response: {0}")]
    Decode(String),
}
