// Adapters layer: concrete implementations for external systems (HTTP, output sinks).

pub mod http;
pub mod output;
