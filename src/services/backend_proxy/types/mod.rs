pub mod backend_proxy_error;
pub mod forward_envelope;
