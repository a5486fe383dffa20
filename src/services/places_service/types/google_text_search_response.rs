use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Default)]
pub struct GoogleTextSearchResponseLatLng {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

#[derive(Serialize, Deserialize, Default)]
pub struct GoogleTextSearchResponseGeometry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GoogleTextSearchResponseLatLng>,
}

#[derive(Serialize, Deserialize, Default)]
pub struct GoogleTextSearchResponseOpeningHours {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
}

#[derive(Serialize, Deserialize, Default)]
pub struct GoogleTextSearchResponseResult {
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
    pub opening_hours: Option<GoogleTextSearchResponseOpeningHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GoogleTextSearchResponseGeometry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Default)]
pub struct GoogleTextSearchResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    // Google may send `null` here; treated the same as an empty list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<GoogleTextSearchResponseResult>>,
}
