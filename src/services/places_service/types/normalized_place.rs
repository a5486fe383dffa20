use serde::{Deserialize, Serialize};

use super::google_text_search_response::GoogleTextSearchResponseResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaceLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Provider-independent place record. Fields the provider did not send stay
/// `None` and are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPlace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<PlaceLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

impl From<GoogleTextSearchResponseResult> for NormalizedPlace {
    fn from(result: GoogleTextSearchResponseResult) -> Self {
        NormalizedPlace {
            place_id: result.place_id,
            name: result.name,
            formatted_address: result.formatted_address,
            rating: result.rating,
            user_ratings_total: result.user_ratings_total,
            price_level: result.price_level,
            open_now: result.opening_hours.and_then(|h| h.open_now),
            location: result
                .geometry
                .and_then(|g| g.location)
                .and_then(|l| match (l.lat, l.lng) {
                    (Some(lat), Some(lng)) => Some(PlaceLocation { lat, lng }),
                    _ => None,
                }),
            types: result.types,
        }
    }
}

pub fn normalize_results(results: Vec<GoogleTextSearchResponseResult>) -> Vec<NormalizedPlace> {
    results.into_iter().map(NormalizedPlace::from).collect()
}
