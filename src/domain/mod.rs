// Domain layer: API models and ports. No I/O here.

pub mod datetime;
pub mod model;
pub mod ports;
pub mod query_settings;
