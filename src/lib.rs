//! Blog Graph - an in-process graph query engine
//!
//! Users, posts and comments live in three in-memory collections linked by
//! foreign keys. Queries search and list them; relationship fields are
//! resolved lazily from the foreign keys. Mutations create and delete
//! entities while keeping every reference valid, cascading deletes along
//! User -> Post -> Comment.
//!
//! ```
//! use blog_graph::{Engine, types::CreatePostInput};
//!
//! let engine = Engine::seeded().unwrap();
//! let post = engine
//!     .create_post(CreatePostInput {
//!         title: "Thriller".to_string(),
//!         body: "It's close to midnight".to_string(),
//!         published: true,
//!         author: "2".to_string(),
//!     })
//!     .unwrap();
//!
//! engine.delete_user("2").unwrap();
//! assert!(engine.posts(Some("thriller")).is_empty());
//! # let _ = post;
//! ```
#![warn(missing_docs)]

// Core foundational modules
pub mod core;
pub mod types;

// Main functional modules
pub mod storage;
pub mod resolvers;
pub mod engine;
pub mod api;
pub mod system;

// Re-export commonly used items for convenience
pub use crate::core::{Config, Error, Result};
pub use engine::Engine;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
