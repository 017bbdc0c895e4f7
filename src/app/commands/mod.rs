pub mod case;
pub mod common;
pub mod project;
pub mod varannos;
