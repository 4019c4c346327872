//! Demo dataset loaded at startup when `storage.seed_demo_data` is set.
//!
//! Inserted straight into the collections, so create-time checks do not run:
//! comments 103 and 104 sit on the unpublished post 11.

use crate::storage::store::Store;
use crate::types::{
    Comment, CreateCommentInput, CreatePostInput, CreateUserInput, Post, User,
};

const USERS: &[(&str, &str, &str, Option<i32>)] = &[
    ("1", "Andrew", "andrew@example.com", Some(27)),
    ("2", "Sarah", "sarah@example.com", None),
    ("3", "Mike", "mike@example.com", None),
];

const POSTS: &[(&str, &str, &str, bool, &str)] = &[
    ("10", "Dangerous", "You playing with a smooth criminal..", true, "1"),
    ("11", "Leave me alone", "Just stop dogging me around..", false, "3"),
    ("12", "Black or white", "It don't matter if you're black or white..", true, "2"),
];

const COMMENTS: &[(&str, &str, &str, &str)] = &[
    ("101", "How's are you today?", "3", "10"),
    ("102", "I'm fine, thank you.  How are you?", "1", "10"),
    ("103", "Not bad at all, yourself?", "2", "11"),
    ("104", "Good, good.  Lovely weather, isn't it", "1", "11"),
];

/// Build a store holding the demo users, posts and comments
pub fn demo_store() -> Store {
    let mut store = Store::new();

    for &(id, name, email, age) in USERS {
        store.users_mut().insert(User::new(
            id,
            CreateUserInput {
                name: name.to_string(),
                email: email.to_string(),
                age,
            },
        ));
    }

    for &(id, title, body, published, author) in POSTS {
        store.posts_mut().insert(Post::new(
            id,
            CreatePostInput {
                title: title.to_string(),
                body: body.to_string(),
                published,
                author: author.to_string(),
            },
        ));
    }

    for &(id, text, author, post) in COMMENTS {
        store.comments_mut().insert(Comment::new(
            id,
            CreateCommentInput {
                text: text.to_string(),
                author: author.to_string(),
                post: post.to_string(),
            },
        ));
    }

    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::store::StoreCounts;

    #[test]
    fn test_demo_store_counts() {
        assert_eq!(
            demo_store().counts(),
            StoreCounts {
                users: 3,
                posts: 3,
                comments: 4,
            }
        );
    }
}
