//! Type definitions for the blog graph
//!
//! Entities stored in the three collections plus the inputs accepted by the
//! create mutations.

/// User, Post and Comment entities
pub mod entity;
/// Create mutation inputs
pub mod input;

pub use entity::{Comment, Entity, EntityId, Post, User};
pub use input::{CreateCommentInput, CreatePostInput, CreateUserInput};
