//! Relationship fields, resolved lazily per parent entity
//!
//! Each call is an independent store lookup keyed by the foreign key held in
//! the parent. Nothing is cached or batched, so rendering N posts with their
//! authors costs N lookups. At this data size that is the intended trade.

use crate::storage::Store;
use crate::types::{Comment, Entity, Post, User};

/// `Post.author`
pub fn post_author<'s>(store: &'s Store, post: &Post) -> Option<&'s User> {
    store.users().find_by_id(post.author())
}

/// `Post.comments`
pub fn post_comments<'s>(store: &'s Store, post: &Post) -> Vec<&'s Comment> {
    let id = post.id().to_string();
    store
        .comments()
        .filter_by(move |comment| comment.post() == id)
        .collect()
}

/// `Comment.author`
pub fn comment_author<'s>(store: &'s Store, comment: &Comment) -> Option<&'s User> {
    store.users().find_by_id(comment.author())
}

/// `Comment.post`
pub fn comment_post<'s>(store: &'s Store, comment: &Comment) -> Option<&'s Post> {
    store.posts().find_by_id(comment.post())
}

/// `User.posts`
pub fn user_posts<'s>(store: &'s Store, user: &User) -> Vec<&'s Post> {
    let id = user.id().to_string();
    store
        .posts()
        .filter_by(move |post| post.author() == id)
        .collect()
}

/// `User.comments`
pub fn user_comments<'s>(store: &'s Store, user: &User) -> Vec<&'s Comment> {
    let id = user.id().to_string();
    store
        .comments()
        .filter_by(move |comment| comment.author() == id)
        .collect()
}
