//! Resolvers for the query and mutation roots and for relationship fields
//!
//! Resolvers are plain functions over a borrowed [`Store`](crate::storage::Store);
//! locking and metrics are the engine's job.

/// Read-side root fields
pub mod query;

/// Create/delete root fields
pub mod mutation;

/// Lazily resolved relationship fields
pub mod relations;
