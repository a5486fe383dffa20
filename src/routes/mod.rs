use axum::{
    extract::DefaultBodyLimit,
    routing::{get, on, MethodFilter},
    Router,
};

use crate::types::app_state::AppState;

mod forward_api;
mod get_home;
mod get_search;

pub fn apply_routes(app: Router<AppState>) -> Router<AppState> {
    let proxied_methods = MethodFilter::GET
        .or(MethodFilter::POST)
        .or(MethodFilter::PUT)
        .or(MethodFilter::DELETE)
        .or(MethodFilter::OPTIONS);

    app.route("/", get(get_home::get_home))
        .route("/api/search", get(get_search::get_search))
        .route(
            "/api/*path",
            // Bodies are relayed whole, whatever their size.
            on(proxied_methods, forward_api::forward_api).layer(DefaultBodyLimit::disable()),
        )
}
