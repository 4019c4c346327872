//! Entities held by the store
//!
//! Entities are immutable once built. Each constructor takes the generated
//! identifier plus the create input, so every required field is spelled out
//! and nothing is spread in dynamically. Relationships are kept as foreign
//! key strings; resolution happens in `resolvers::relations`.

use crate::types::input::{CreateCommentInput, CreatePostInput, CreateUserInput};

/// Opaque entity identifier
pub type EntityId = String;

/// Common behaviour of records kept in a store collection
pub trait Entity {
    /// Type name used in errors and logs
    const KIND: &'static str;

    /// Identifier, unique within the entity's collection
    fn id(&self) -> &str;
}

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: EntityId,
    name: String,
    email: String,
    age: Option<i32>,
}

/// A post written by a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: EntityId,
    title: String,
    body: String,
    published: bool,
    author: EntityId,
}

/// A comment left by a user on a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: EntityId,
    text: String,
    author: EntityId,
    post: EntityId,
}

impl User {
    /// Build a user from its identifier and create input
    pub fn new(id: impl Into<EntityId>, input: CreateUserInput) -> Self {
        Self {
            id: id.into(),
            name: input.name,
            email: input.email,
            age: input.age,
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Age, when given
    pub fn age(&self) -> Option<i32> {
        self.age
    }
}

impl Post {
    /// Build a post from its identifier and create input
    pub fn new(id: impl Into<EntityId>, input: CreatePostInput) -> Self {
        Self {
            id: id.into(),
            title: input.title,
            body: input.body,
            published: input.published,
            author: input.author,
        }
    }

    /// Title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body text
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether the post accepts comments
    pub fn published(&self) -> bool {
        self.published
    }

    /// Author user id
    pub fn author(&self) -> &str {
        &self.author
    }
}

impl Comment {
    /// Build a comment from its identifier and create input
    pub fn new(id: impl Into<EntityId>, input: CreateCommentInput) -> Self {
        Self {
            id: id.into(),
            text: input.text,
            author: input.author,
            post: input.post,
        }
    }

    /// Comment text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Author user id
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Post id the comment belongs to
    pub fn post(&self) -> &str {
        &self.post
    }
}

impl Entity for User {
    const KIND: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Post {
    const KIND: &'static str = "Post";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Comment {
    const KIND: &'static str = "Comment";

    fn id(&self) -> &str {
        &self.id
    }
}
