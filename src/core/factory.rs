//! Application Factory
//!
//! Builds the AppState, its engine and the GraphQL schema from configuration.

use crate::api::schema::build_schema;
use crate::core::app_state::AppState;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::engine::Engine;
use std::sync::Arc;
use tracing::info;

/// Create the shared AppState based on configuration
pub fn create_app_state(config: Config) -> Result<Arc<AppState>> {
    let engine = if config.storage.seed_demo_data {
        info!("Initializing engine with demo data");
        Engine::seeded()?
    } else {
        info!("Initializing empty engine");
        Engine::new()?
    };

    let counts = engine.counts();
    info!(
        users = counts.users,
        posts = counts.posts,
        comments = counts.comments,
        "AppState created successfully"
    );

    let engine = Arc::new(engine);
    let schema = build_schema(Arc::clone(&engine));

    Ok(Arc::new(AppState::new(engine, schema, config)))
}
