// Presentation layer - HTTP surface of the gateway
pub mod app_state;
pub mod handlers;
pub mod routes;
