//! Referential integrity for the blog graph
//!
//! Create-time checks guard every foreign key before anything is written.
//! Delete cascades follow the dependency graph User -> Post -> Comment:
//!
//! - deleting a user removes the comments on the user's posts, then those
//!   posts, then the user's remaining comments, then the user
//! - deleting a post removes the comments attached to it, then the post
//! - deleting a comment removes only that comment
//!
//! Every cascade checks that its root exists before removing anything, so a
//! miss leaves the store untouched.

use crate::core::error::{Error, Result};
use crate::storage::store::Store;
use crate::types::{
    Comment, CreateCommentInput, CreatePostInput, CreateUserInput, Entity, Post, User,
};
use std::collections::HashSet;

/// Everything removed by one cascading delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeReport<T> {
    /// The entity the delete was issued for
    pub removed: T,
    /// Posts removed along with it
    pub posts: Vec<Post>,
    /// Comments removed along with it
    pub comments: Vec<Comment>,
}

/// True when no user has registered `email`
pub fn user_email_unique(store: &Store, email: &str) -> bool {
    !store.users().iter().any(|user| user.email() == email)
}

/// True when a user with `id` exists
pub fn user_exists(store: &Store, id: &str) -> bool {
    store.users().contains(id)
}

/// True when a post with `id` exists and is published
pub fn post_exists_and_published(store: &Store, id: &str) -> bool {
    store
        .posts()
        .find_by_id(id)
        .is_some_and(|post| post.published())
}

/// Preconditions of `createUser`
pub fn check_new_user(store: &Store, input: &CreateUserInput) -> Result<()> {
    if !user_email_unique(store, &input.email) {
        return Err(Error::EmailTaken);
    }
    Ok(())
}

/// Preconditions of `createPost`
pub fn check_new_post(store: &Store, input: &CreatePostInput) -> Result<()> {
    if !user_exists(store, &input.author) {
        return Err(Error::UserNotFound);
    }
    Ok(())
}

/// Preconditions of `createComment`: author, then post existence, then
/// the published flag
pub fn check_new_comment(store: &Store, input: &CreateCommentInput) -> Result<()> {
    if !user_exists(store, &input.author) {
        return Err(Error::UserNotFound);
    }

    if !post_exists_and_published(store, &input.post) {
        return match store.posts().find_by_id(&input.post) {
            Some(_) => Err(Error::PostNotPublished),
            None => Err(Error::PostNotFound),
        };
    }

    Ok(())
}

/// Delete a user together with their posts, the comments on those posts
/// and their remaining comments
pub fn cascade_delete_user(store: &mut Store, id: &str) -> Result<CascadeReport<User>> {
    if !store.users().contains(id) {
        return Err(Error::not_found(User::KIND, id));
    }

    let owned_posts: HashSet<String> = store
        .posts()
        .filter_by(|post| post.author() == id)
        .map(|post| post.id().to_string())
        .collect();

    let mut comments = store
        .comments_mut()
        .remove_where(|comment| owned_posts.contains(comment.post()));
    let posts = store
        .posts_mut()
        .remove_where(|post| owned_posts.contains(post.id()));
    comments.extend(
        store
            .comments_mut()
            .remove_where(|comment| comment.author() == id),
    );
    let removed = store.users_mut().remove_by_id(id)?;

    Ok(CascadeReport {
        removed,
        posts,
        comments,
    })
}

/// Delete a post together with the comments attached to it
pub fn cascade_delete_post(store: &mut Store, id: &str) -> Result<CascadeReport<Post>> {
    if !store.posts().contains(id) {
        return Err(Error::not_found(Post::KIND, id));
    }

    let comments = store
        .comments_mut()
        .remove_where(|comment| comment.post() == id);
    let removed = store.posts_mut().remove_by_id(id)?;

    Ok(CascadeReport {
        removed,
        posts: Vec::new(),
        comments,
    })
}

/// Delete a single comment
pub fn delete_comment(store: &mut Store, id: &str) -> Result<Comment> {
    store.comments_mut().remove_by_id(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed::demo_store;
    use proptest::prelude::*;

    fn comment_input(author: &str, post: &str) -> CreateCommentInput {
        CreateCommentInput {
            text: "hi".to_string(),
            author: author.to_string(),
            post: post.to_string(),
        }
    }

    #[test]
    fn test_create_checks() {
        let store = demo_store();

        assert!(!user_email_unique(&store, "andrew@example.com"));
        assert!(user_email_unique(&store, "new@example.com"));
        assert!(user_exists(&store, "2"));
        assert!(post_exists_and_published(&store, "10"));
        assert!(!post_exists_and_published(&store, "11"));
        assert!(!post_exists_and_published(&store, "99"));
    }

    #[test]
    fn test_comment_check_order() {
        let store = demo_store();

        assert!(matches!(
            check_new_comment(&store, &comment_input("99", "99")),
            Err(Error::UserNotFound)
        ));
        assert!(matches!(
            check_new_comment(&store, &comment_input("1", "99")),
            Err(Error::PostNotFound)
        ));
        assert!(matches!(
            check_new_comment(&store, &comment_input("1", "11")),
            Err(Error::PostNotPublished)
        ));
        assert!(check_new_comment(&store, &comment_input("1", "12")).is_ok());
    }

    #[test]
    fn test_delete_user_cascade() {
        let mut store = demo_store();

        // Mike (3) wrote post 11 (comments 103, 104) and comment 101 on post 10
        let report = cascade_delete_user(&mut store, "3").unwrap();

        assert_eq!(report.removed.name(), "Mike");
        assert_eq!(report.posts.len(), 1);
        let mut removed: Vec<&str> = report.comments.iter().map(|c| c.id()).collect();
        removed.sort();
        assert_eq!(removed, vec!["101", "103", "104"]);

        assert_eq!(store.counts().users, 2);
        assert_eq!(store.counts().posts, 2);
        assert_eq!(store.counts().comments, 1);
        assert!(store.comments().contains("102"));
    }

    #[test]
    fn test_delete_missing_user_leaves_store() {
        let mut store = demo_store();
        let before = store.counts();

        let err = cascade_delete_user(&mut store, "404").unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "User", .. }));
        assert_eq!(store.counts(), before);
    }

    #[test]
    fn test_delete_post_removes_its_comments_only() {
        let mut store = demo_store();

        let report = cascade_delete_post(&mut store, "10").unwrap();
        assert_eq!(report.removed.title(), "Dangerous");
        assert_eq!(report.comments.len(), 2);

        assert_eq!(store.counts().users, 3);
        assert_eq!(store.counts().posts, 2);
        assert!(store.comments().iter().all(|c| c.post() != "10"));
    }

    #[test]
    fn test_delete_comment() {
        let mut store = demo_store();

        assert_eq!(delete_comment(&mut store, "104").unwrap().author(), "1");
        assert!(matches!(
            delete_comment(&mut store, "104"),
            Err(Error::NotFound { entity: "Comment", .. })
        ));
        assert_eq!(store.counts().comments, 3);
    }

    fn arb_store() -> impl Strategy<Value = Store> {
        // (post author index, published) and (comment author index, post index)
        (
            1usize..5,
            prop::collection::vec((0usize..5, any::<bool>()), 0..8),
            prop::collection::vec((0usize..5, 0usize..8), 0..16),
        )
            .prop_map(|(user_count, posts, comments)| {
                let mut store = Store::new();
                for u in 0..user_count {
                    store.users_mut().insert(User::new(
                        format!("u{}", u),
                        CreateUserInput {
                            name: format!("user {}", u),
                            email: format!("u{}@example.com", u),
                            age: None,
                        },
                    ));
                }
                for (p, (author, published)) in posts.iter().enumerate() {
                    store.posts_mut().insert(Post::new(
                        format!("p{}", p),
                        CreatePostInput {
                            title: format!("post {}", p),
                            body: String::new(),
                            published: *published,
                            author: format!("u{}", author % user_count),
                        },
                    ));
                }
                if !posts.is_empty() {
                    for (c, (author, post)) in comments.iter().enumerate() {
                        store.comments_mut().insert(Comment::new(
                            format!("c{}", c),
                            CreateCommentInput {
                                text: String::new(),
                                author: format!("u{}", author % user_count),
                                post: format!("p{}", post % posts.len()),
                            },
                        ));
                    }
                }
                store
            })
    }

    proptest! {
        #[test]
        fn prop_delete_user_leaves_no_dangling_references(store in arb_store(), victim in 0usize..5) {
            let mut store = store;
            let victim = format!("u{}", victim % store.counts().users);
            let before = store.counts();

            let authored: Vec<String> = store
                .posts()
                .filter_by(|p| p.author() == victim)
                .map(|p| p.id().to_string())
                .collect();
            let dependent_comments = store
                .comments()
                .filter_by(|c| c.author() == victim || authored.iter().any(|p| p == c.post()))
                .count();

            let report = cascade_delete_user(&mut store, &victim).unwrap();
            let after = store.counts();

            prop_assert_eq!(report.posts.len(), authored.len());
            prop_assert_eq!(after.posts, before.posts - authored.len());
            prop_assert!(before.comments - after.comments >= dependent_comments);
            prop_assert_eq!(after.users, before.users - 1);
            for comment in store.comments().iter() {
                prop_assert!(comment.author() != victim);
                prop_assert!(store.posts().contains(comment.post()));
            }
        }
    }
}
