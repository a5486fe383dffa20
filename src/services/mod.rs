pub mod backend_proxy;
pub mod places_service;
