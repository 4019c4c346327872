//! Inputs accepted by the create mutations
//!
//! Field names follow the GraphQL schema (`createUser(data: {...})` etc.),
//! so the same structs double as the schema's input objects.

use async_graphql::InputObject;

/// Data for `createUser`
#[derive(Debug, Clone, PartialEq, Eq, InputObject)]
pub struct CreateUserInput {
    /// Display name
    pub name: String,
    /// Email, must not be registered yet
    pub email: String,
    /// Optional age
    pub age: Option<i32>,
}

/// Data for `createPost`
#[derive(Debug, Clone, PartialEq, Eq, InputObject)]
pub struct CreatePostInput {
    /// Post title
    pub title: String,
    /// Post body
    pub body: String,
    /// Whether comments may be attached
    pub published: bool,
    /// Author user id
    pub author: String,
}

/// Data for `createComment`
#[derive(Debug, Clone, PartialEq, Eq, InputObject)]
pub struct CreateCommentInput {
    /// Comment text
    pub text: String,
    /// Author user id
    pub author: String,
    /// Target post id, must be published
    pub post: String,
}
