pub mod backend_proxy;
pub mod types;
