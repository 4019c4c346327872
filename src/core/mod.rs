//! Core system types and foundations
//!
//! Configuration, error handling, identifier generation, logging setup and
//! the shared application state.

pub mod app_state;
pub mod config;
pub mod error;
pub mod factory;
pub mod id;
pub mod logging;

// Re-export commonly used items
pub use app_state::AppState;
pub use config::{load_config, Config};
pub use error::{Error, Result};
pub use factory::create_app_state;
pub use id::{IdGenerator, SequentialIds, UuidGenerator};
