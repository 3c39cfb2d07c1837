pub mod config;
pub mod error;

pub use config::JaremisConfig;
pub use error::{JaremisError, Result};
