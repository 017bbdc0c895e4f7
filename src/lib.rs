pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::http::HttpVarfishClient;
pub use config::settings::{GlobalConfig, OutputConfig};
pub use config::Cli;
pub use core::runner::CommandRunner;
pub use domain::ports::VarfishApi;
pub use utils::error::{Result, VarfishError};
