pub mod runner;

pub use crate::domain::ports::VarfishApi;
pub use crate::utils::error::Result;
