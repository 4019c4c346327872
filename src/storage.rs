//! Storage layer for the blog graph
//!
//! The store keeps three ordered in-memory collections. It performs no
//! validation of its own: referential integrity lives in `integrity`, which
//! every mutation goes through before touching the store.

/// Ordered collections of users, posts and comments
pub mod store;

/// Foreign-key checks and delete cascades
pub mod integrity;

/// Demo dataset
pub mod seed;

pub use integrity::CascadeReport;
pub use seed::demo_store;
pub use store::{Collection, Store, StoreCounts};
