// Application layer - Use cases and the seams they depend on
pub mod credentials;
pub mod poller;
pub mod render_sink;
pub mod scheduler;
pub mod telemetry_repository;
pub mod telemetry_service;
pub mod telemetry_source;
pub mod view_state;
