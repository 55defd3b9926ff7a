pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod session;
pub mod usecase;


pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use session::Session;
