use crate::{
    services::places_service::{
        search_query::{SearchFilterInput, SearchFilters, SearchQuery},
        types::{normalized_place::NormalizedPlace, places_service_error::PlacesServiceError},
    },
    types::app_state::AppState,
    utils::{app_error::AppError, validated_query::ValidatedQuery},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
#[cfg(test)]
use axum_macros::debug_handler;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use validator::Validate;

#[derive(Validate, Deserialize)]
pub struct GetSearchPayload {
    #[validate(length(max = 256, message = "Must be at most 256 characters"))]
    pub query: Option<String>,
    #[validate(length(max = 256, message = "Must be at most 256 characters"))]
    pub q: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius_m: Option<String>,
    pub open_now: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    #[validate(length(max = 64, message = "Must be at most 64 characters"))]
    pub diets: Option<String>,
    #[validate(length(max = 128, message = "Must be at most 128 characters"))]
    pub location: Option<String>,
    // Sent by the page but not transmitted upstream.
    pub hide_chains: Option<String>,
    pub open_after: Option<String>,
}

impl From<GetSearchPayload> for SearchFilterInput {
    fn from(payload: GetSearchPayload) -> Self {
        SearchFilterInput {
            query: payload.query,
            q: payload.q,
            lat: payload.lat,
            lng: payload.lng,
            radius_m: payload.radius_m,
            open_now: payload.open_now,
            price_min: payload.price_min,
            price_max: payload.price_max,
            diets: payload.diets,
            location: payload.location,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct GetSearchResponse {
    pub ok: bool,
    pub query: String,
    pub count: usize,
    pub results: Vec<NormalizedPlace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_status: Option<String>,
}

fn status_for(e: &PlacesServiceError) -> StatusCode {
    match e {
        PlacesServiceError::MissingApiKey | PlacesServiceError::Decode(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        PlacesServiceError::Timeout(_)
        | PlacesServiceError::Network(_)
        | PlacesServiceError::Http { .. }
        | PlacesServiceError::Status { .. } => StatusCode::BAD_GATEWAY,
    }
}

#[cfg_attr(test, debug_handler)]
pub async fn get_search(
    State(state): State<AppState>,
    ValidatedQuery(payload): ValidatedQuery<GetSearchPayload>,
) -> Result<Response, AppError> {
    if payload.hide_chains.is_some() || payload.open_after.is_some() {
        debug!(
            hide_chains = payload.hide_chains.as_deref(),
            open_after = payload.open_after.as_deref(),
            "Ignoring filters the text search cannot express"
        );
    }

    let filters = SearchFilters::parse(payload.into())
        .map_err(|e| AppError::new(StatusCode::BAD_REQUEST, &e.to_string()))?;

    let output = state
        .places_service
        .text_search(&SearchQuery::build(&filters))
        .await
        .map_err(|e| {
            error!("Google Places search failed: {}", e);
            AppError::new(status_for(&e), &e.to_string())
        })?;

    info!(
        query = %filters.text,
        count = output.places.len(),
        "Search completed"
    );

    Ok((
        StatusCode::OK,
        Json(GetSearchResponse {
            ok: true,
            query: filters.text,
            count: output.places.len(),
            results: output.places,
            google_status: output.provider_status,
        }),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use mockito::Matcher;
    use tower::ServiceExt;
    use tracing_test::traced_test;

    use super::*;
    use crate::{
        app::{gen_mock_app, gen_mock_app_with_key},
        services::places_service::types::google_text_search_response::{
            GoogleTextSearchResponse, GoogleTextSearchResponseGeometry,
            GoogleTextSearchResponseLatLng, GoogleTextSearchResponseOpeningHours,
            GoogleTextSearchResponseResult,
        },
        utils::app_error::ErrorResponse,
    };

    const TEXT_SEARCH_PATH: &str = "/maps/api/place/textsearch/json";

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    #[traced_test]
    async fn test_search_with_location_text() {
        let mut mock_app = gen_mock_app().await;

        let mock_google_response = GoogleTextSearchResponse {
            status: Some("OK".to_string()),
            error_message: None,
            results: Some(vec![
                GoogleTextSearchResponseResult {
                    place_id: Some("p1".to_string()),
                    name: Some("Chili Mustard Onions".to_string()),
                    formatted_address: Some("1 Vegan Way, Detroit, MI".to_string()),
                    rating: Some(4.7),
                    user_ratings_total: Some(812),
                    price_level: Some(1),
                    opening_hours: Some(GoogleTextSearchResponseOpeningHours {
                        open_now: Some(true),
                    }),
                    geometry: Some(GoogleTextSearchResponseGeometry {
                        location: Some(GoogleTextSearchResponseLatLng {
                            lat: Some(42.35),
                            lng: Some(-83.06),
                        }),
                    }),
                    types: Some(vec!["restaurant".to_string()]),
                },
                GoogleTextSearchResponseResult {
                    place_id: Some("p2".to_string()),
                    name: Some("Taco Cart".to_string()),
                    ..Default::default()
                },
            ]),
        };

        let mock_server = mock_app
            .google_server
            .mock("GET", TEXT_SEARCH_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded(
                    "query".to_string(),
                    "tacos Vegan Detroit, MI restaurant".to_string(),
                ),
                Matcher::UrlEncoded("minprice".to_string(), "0".to_string()),
                Matcher::UrlEncoded("maxprice".to_string(), "2".to_string()),
                Matcher::UrlEncoded("opennow".to_string(), "true".to_string()),
                Matcher::UrlEncoded("key".to_string(), "test-key".to_string()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&mock_google_response).unwrap())
            .create_async()
            .await;

        let response = mock_app
            .app
            .oneshot(get(
                "/api/search?query=tacos&diets=Vegan&location=Detroit%2C%20MI&price_min=0&price_max=2&open_now=true&hide_chains=true",
            ))
            .await
            .unwrap();

        mock_server.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = read_json(response).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["query"], "tacos");
        assert_eq!(body["count"], 2);
        assert_eq!(body["google_status"], "OK");
        assert_eq!(body["results"][0]["open_now"], true);
        assert_eq!(body["results"][0]["location"]["lat"], 42.35);
        assert_eq!(body["results"][1]["name"], "Taco Cart");
        assert!(body["results"][1].get("rating").is_none());
        assert!(body["results"][1].get("price_level").is_none());

        assert!(!logs_contain("test-key"));
    }

    #[tokio::test]
    async fn test_search_with_coordinates() {
        let mut mock_app = gen_mock_app().await;

        let mock_server = mock_app
            .google_server
            .mock("GET", TEXT_SEARCH_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".to_string(), "pizza restaurant".to_string()),
                Matcher::UrlEncoded("location".to_string(), "42.33,-83.05".to_string()),
                Matcher::UrlEncoded("radius".to_string(), "1000".to_string()),
            ]))
            .with_body(r#"{"status":"OK","results":[]}"#)
            .create_async()
            .await;

        let response = mock_app
            .app
            .oneshot(get(
                "/api/search?q=pizza&lat=42.33&lng=-83.05&radius_m=500&location=Detroit",
            ))
            .await
            .unwrap();

        mock_server.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_blank_query_never_calls_upstream() {
        let mut mock_app = gen_mock_app().await;

        let mock_server = mock_app
            .google_server
            .mock("GET", TEXT_SEARCH_PATH)
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let response = mock_app
            .app
            .oneshot(get("/api/search?query=%20%20&open_now=true&lat=1&lng=1"))
            .await
            .unwrap();

        mock_server.assert_async().await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = read_json(response).await;
        assert!(!body.ok);
        assert_eq!(body.error, "Missing query");
    }

    #[tokio::test]
    async fn test_invalid_coordinates() {
        let mock_app = gen_mock_app().await;

        let response = mock_app
            .app
            .oneshot(get("/api/search?query=pizza&lat=abc&lng=1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_zero_results() {
        let mut mock_app = gen_mock_app().await;

        mock_app
            .google_server
            .mock("GET", TEXT_SEARCH_PATH)
            .match_query(Matcher::Any)
            .with_body(r#"{"status":"ZERO_RESULTS","results":[]}"#)
            .create_async()
            .await;

        let response = mock_app
            .app
            .oneshot(get("/api/search?query=unicorn%20stew"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: GetSearchResponse = read_json(response).await;
        assert!(body.ok);
        assert_eq!(body.count, 0);
        assert!(body.results.is_empty());
        assert_eq!(body.google_status.as_deref(), Some("ZERO_RESULTS"));
    }

    #[tokio::test]
    async fn test_null_results() {
        let mut mock_app = gen_mock_app().await;

        mock_app
            .google_server
            .mock("GET", TEXT_SEARCH_PATH)
            .match_query(Matcher::Any)
            .with_body(r#"{"status":"ZERO_RESULTS","results":null}"#)
            .create_async()
            .await;

        let response = mock_app
            .app
            .oneshot(get("/api/search?query=ramen"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: GetSearchResponse = read_json(response).await;
        assert!(body.ok);
        assert_eq!(body.count, 0);
    }

    #[tokio::test]
    async fn test_duplicate_parameters_rejected() {
        let mut mock_app = gen_mock_app().await;

        let mock_server = mock_app
            .google_server
            .mock("GET", TEXT_SEARCH_PATH)
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let response = mock_app
            .app
            .oneshot(get("/api/search?query=ramen&query=pho"))
            .await
            .unwrap();

        mock_server.assert_async().await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = read_json(response).await;
        assert!(body.error.starts_with("Invalid parameters"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_over_query_limit() {
        let mut mock_app = gen_mock_app().await;

        mock_app
            .google_server
            .mock("GET", TEXT_SEARCH_PATH)
            .match_query(Matcher::Any)
            .with_body(
                r#"{"status":"OVER_QUERY_LIMIT","error_message":"Quota exceeded","results":[]}"#,
            )
            .create_async()
            .await;

        let response = mock_app
            .app
            .oneshot(get("/api/search?query=ramen"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body: ErrorResponse = read_json(response).await;
        assert!(!body.ok);
        assert_eq!(
            body.error,
            "Google Places status OVER_QUERY_LIMIT: Quota exceeded"
        );
        assert!(logs_contain("Google Places search failed"));
    }

    #[tokio::test]
    async fn test_upstream_http_error() {
        let mut mock_app = gen_mock_app().await;

        mock_app
            .google_server
            .mock("GET", TEXT_SEARCH_PATH)
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let response = mock_app
            .app
            .oneshot(get("/api/search?query=ramen"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.error, "Google Places HTTP 500: boom");
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let mock_app = gen_mock_app_with_key(None).await;

        let response = mock_app
            .app
            .oneshot(get("/api/search?query=ramen"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorResponse = read_json(response).await;
        assert!(!body.ok);
        assert!(body.error.starts_with("GOOGLE_MAPS_API_KEY is not set"));
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let mut mock_app = gen_mock_app().await;

        mock_app
            .google_server
            .mock("GET", TEXT_SEARCH_PATH)
            .match_query(Matcher::Any)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let response = mock_app
            .app
            .oneshot(get("/api/search?query=ramen"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
