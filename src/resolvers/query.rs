//! Query root: `users`, `posts`, `comments`, `me`, `post`

use crate::storage::Store;
use crate::types::{Comment, CreatePostInput, CreateUserInput, Post, User};

/// Users whose name contains `query`, ignoring case. No query (or an empty
/// one) lists every user in insertion order.
pub fn users<'s>(store: &'s Store, query: Option<&str>) -> Vec<&'s User> {
    match search_term(query) {
        None => store.users().iter().collect(),
        Some(term) => store
            .users()
            .filter_by(move |user| contains_ignore_case(user.name(), &term))
            .collect(),
    }
}

/// Posts whose title or body contains `query`, ignoring case
pub fn posts<'s>(store: &'s Store, query: Option<&str>) -> Vec<&'s Post> {
    match search_term(query) {
        None => store.posts().iter().collect(),
        Some(term) => store
            .posts()
            .filter_by(move |post| {
                contains_ignore_case(post.title(), &term) || contains_ignore_case(post.body(), &term)
            })
            .collect(),
    }
}

/// Every comment, unfiltered
pub fn comments(store: &Store) -> Vec<&Comment> {
    store.comments().iter().collect()
}

/// Placeholder for the current user. Not backed by the store.
pub fn me() -> User {
    User::new(
        "123098",
        CreateUserInput {
            name: "Derek".to_string(),
            email: "derek@gmail.com".to_string(),
            age: None,
        },
    )
}

/// Placeholder post. Not backed by the store; it has no author.
pub fn post() -> Post {
    Post::new(
        "45678124",
        CreatePostInput {
            title: "Gulliver's Travels".to_string(),
            body: "Once upon a time....".to_string(),
            published: true,
            author: String::new(),
        },
    )
}

fn search_term(query: Option<&str>) -> Option<String> {
    query.filter(|q| !q.is_empty()).map(str::to_lowercase)
}

fn contains_ignore_case(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}
