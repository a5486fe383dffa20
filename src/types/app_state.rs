use crate::services::{
    backend_proxy::backend_proxy::BackendProxy, places_service::places_service::PlacesService,
};

#[derive(Clone)]
pub struct AppState {
    pub places_service: PlacesService,
    pub backend_proxy: BackendProxy,
}
