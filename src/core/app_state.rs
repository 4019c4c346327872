//! Application State Management
//!
//! The AppState holds the engine, the GraphQL schema serving it and the
//! configuration they were built from. It is shared with every HTTP handler
//! behind an `Arc`.

use crate::api::schema::BlogSchema;
use crate::core::config::Config;
use crate::engine::Engine;
use std::sync::Arc;
use std::time::Instant;

/// Central application state
pub struct AppState {
    /// The graph engine answering queries and mutations
    pub engine: Arc<Engine>,

    /// GraphQL schema over `engine`
    pub schema: BlogSchema,

    /// Application configuration
    pub config: Config,

    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Create a new AppState around an already-built engine and schema
    pub fn new(engine: Arc<Engine>, schema: BlogSchema, config: Config) -> Self {
        Self {
            engine,
            schema,
            config,
            started_at: Instant::now(),
        }
    }
}
