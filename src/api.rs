//! # API Module
//!
//! HTTP transport for the blog graph engine.
//!
//! ## Endpoints
//!
//! - `POST /graphql` - Execute a GraphQL query or mutation
//! - `GET /graphql` - GraphiQL explorer
//! - `GET /health` - Health check
//! - `GET /info` - Service info and collection sizes
//! - `GET /metrics` - Prometheus metrics

pub mod handlers;
pub mod schema;
pub mod server;

// Re-export commonly used items
pub use schema::{build_schema, BlogSchema};
pub use server::{create_app, start_server};
