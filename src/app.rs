use crate::{
    routes::apply_routes,
    services::{
        backend_proxy::backend_proxy::{BackendProxy, BackendProxyConfig},
        places_service::places_service::{PlacesService, PlacesServiceConfig},
    },
    types::app_state::AppState,
};
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

pub fn gen_app(places_config: PlacesServiceConfig, backend_config: BackendProxyConfig) -> Router {
    let state = AppState {
        places_service: PlacesService::new(places_config),
        backend_proxy: BackendProxy::new(backend_config),
    };

    apply_routes(Router::new())
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

#[cfg(test)]
pub struct MockApp {
    pub app: Router,
    pub google_server: mockito::ServerGuard,
    pub backend_server: mockito::ServerGuard,
}

#[cfg(test)]
pub async fn gen_mock_app() -> MockApp {
    gen_mock_app_with_key(Some("test-key")).await
}

#[cfg(test)]
pub async fn gen_mock_app_with_key(api_key: Option<&str>) -> MockApp {
    let google_server = mockito::Server::new_async().await;
    let backend_server = mockito::Server::new_async().await;

    let app = gen_app(
        PlacesServiceConfig {
            api_key: api_key.map(str::to_string),
            host: google_server.url(),
            timeout: std::time::Duration::from_millis(8000),
        },
        BackendProxyConfig {
            base_url: backend_server.url(),
        },
    );

    MockApp {
        app,
        google_server,
        backend_server,
    }
}
