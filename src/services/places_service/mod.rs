pub mod places_service;
pub mod search_query;
pub mod types;
