//! In-memory store with one ordered collection per entity type

use crate::core::error::{Error, Result};
use crate::types::{Comment, Entity, Post, User};
use serde::Serialize;

/// Insertion-ordered collection of entities of one type
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Collection<T> {
    /// Look up an entity by id
    pub fn find_by_id(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Check whether an entity with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Entities matching `predicate`, in insertion order
    pub fn filter_by<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a T> + 'a
    where
        P: Fn(&T) -> bool + 'a,
    {
        self.items.iter().filter(move |item| predicate(item))
    }

    /// All entities in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Append an entity. The caller has already checked id uniqueness
    /// and every foreign key.
    pub fn insert(&mut self, entity: T) {
        self.items.push(entity);
    }

    /// Remove the entity with `id`, keeping the order of the rest
    pub fn remove_by_id(&mut self, id: &str) -> Result<T> {
        let position = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| Error::not_found(T::KIND, id))?;

        Ok(self.items.remove(position))
    }

    /// Remove every entity matching `predicate` and return them in order
    pub fn remove_where<P>(&mut self, predicate: P) -> Vec<T>
    where
        P: FnMut(&T) -> bool,
    {
        let (removed, kept): (Vec<T>, Vec<T>) =
            std::mem::take(&mut self.items).into_iter().partition(predicate);
        self.items = kept;
        removed
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Collection sizes at a point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    /// Number of users
    pub users: usize,
    /// Number of posts
    pub posts: usize,
    /// Number of comments
    pub comments: usize,
}

/// The three collections of the blog graph.
///
/// Not synchronised: the engine wraps it in a single lock.
#[derive(Debug, Clone, Default)]
pub struct Store {
    users: Collection<User>,
    posts: Collection<Post>,
    comments: Collection<Comment>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Users collection
    pub fn users(&self) -> &Collection<User> {
        &self.users
    }

    /// Posts collection
    pub fn posts(&self) -> &Collection<Post> {
        &self.posts
    }

    /// Comments collection
    pub fn comments(&self) -> &Collection<Comment> {
        &self.comments
    }

    /// Mutable users collection
    pub fn users_mut(&mut self) -> &mut Collection<User> {
        &mut self.users
    }

    /// Mutable posts collection
    pub fn posts_mut(&mut self) -> &mut Collection<Post> {
        &mut self.posts
    }

    /// Mutable comments collection
    pub fn comments_mut(&mut self) -> &mut Collection<Comment> {
        &mut self.comments
    }

    /// Current collection sizes
    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            users: self.users.len(),
            posts: self.posts.len(),
            comments: self.comments.len(),
        }
    }
}
