use std::time::Duration;

use reqwest::header::CACHE_CONTROL;
use tracing::{debug, warn};
use urlencoding::encode;

use super::{
    search_query::SearchQuery,
    types::{
        google_text_search_response::GoogleTextSearchResponse,
        normalized_place::{normalize_results, NormalizedPlace},
        places_service_error::PlacesServiceError,
    },
};

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Clone)]
pub struct PlacesServiceConfig {
    pub api_key: Option<String>,
    pub host: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct PlacesService {
    config: PlacesServiceConfig,
    client: reqwest::Client,
}

pub struct TextSearchOutput {
    pub places: Vec<NormalizedPlace>,
    pub provider_status: Option<String>,
}

impl PlacesService {
    pub fn new(config: PlacesServiceConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Runs a single text search. There is no retry and no caching; a
    /// timeout aborts the call and is reported as a failure.
    pub async fn text_search(
        &self,
        query: &SearchQuery,
    ) -> Result<TextSearchOutput, PlacesServiceError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(PlacesServiceError::MissingApiKey)?;

        let url = format!(
            "{}/maps/api/place/textsearch/json?{}&key={}",
            self.config.host.trim_end_matches('/'),
            query.to_query_string(),
            encode(api_key)
        );

        debug!(
            query = query.get("query").unwrap_or_default(),
            "Sending Google Places text search"
        );

        let resp = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-store")
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {}>", e.without_url()));
            return Err(PlacesServiceError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp
            .json::<GoogleTextSearchResponse>()
            .await
            .map_err(|e| match e.is_timeout() {
                true => self.transport_error(e),
                false => PlacesServiceError::Decode(e.without_url().to_string()),
            })?;

        match body.status.as_deref() {
            None | Some(STATUS_OK) | Some(STATUS_ZERO_RESULTS) => {}
            Some(other) => {
                warn!(status = other, "Google Places rejected the search");
                return Err(PlacesServiceError::Status {
                    status: other.to_string(),
                    message: body
                        .error_message
                        .unwrap_or_else(|| "No message".to_string()),
                });
            }
        }

        Ok(TextSearchOutput {
            places: normalize_results(body.results.unwrap_or_default()),
            provider_status: body.status,
        })
    }

    // The request URL carries the API key, so it is stripped from the error.
    fn transport_error(&self, e: reqwest::Error) -> PlacesServiceError {
        if e.is_timeout() {
            PlacesServiceError::Timeout(self.config.timeout.as_millis())
        } else {
            PlacesServiceError::Network(e.without_url().to_string())
        }
    }
}
