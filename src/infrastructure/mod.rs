// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod console_sink;
pub mod credential_providers;
pub mod http_response;
pub mod http_source;
pub mod kusto_repository;
pub mod logging;
