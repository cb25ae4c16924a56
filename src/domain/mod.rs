// Domain layer - Pure telemetry types and transforms
pub mod chart;
pub mod range;
pub mod status;
pub mod telemetry;
