//! Mutation root
//!
//! Every mutation validates first and only then applies. A validation error
//! returns before the store is touched, so a failed mutation never leaves a
//! partial write behind.

use crate::core::error::Result;
use crate::core::id::IdGenerator;
use crate::storage::integrity::{self, CascadeReport};
use crate::storage::Store;
use crate::types::{
    Comment, CreateCommentInput, CreatePostInput, CreateUserInput, Post, User,
};

/// `createUser(data)`
pub fn create_user(store: &mut Store, ids: &dyn IdGenerator, input: CreateUserInput) -> Result<User> {
    integrity::check_new_user(store, &input)?;

    let user = User::new(ids.next_id(), input);
    store.users_mut().insert(user.clone());
    Ok(user)
}

/// `deleteUser(id)`, cascading to the user's posts and comments
pub fn delete_user(store: &mut Store, id: &str) -> Result<CascadeReport<User>> {
    integrity::cascade_delete_user(store, id)
}

/// `createPost(data)`
pub fn create_post(store: &mut Store, ids: &dyn IdGenerator, input: CreatePostInput) -> Result<Post> {
    integrity::check_new_post(store, &input)?;

    let post = Post::new(ids.next_id(), input);
    store.posts_mut().insert(post.clone());
    Ok(post)
}

/// `deletePost(id)`, cascading to the post's comments
pub fn delete_post(store: &mut Store, id: &str) -> Result<CascadeReport<Post>> {
    integrity::cascade_delete_post(store, id)
}

/// `createComment(data)`
pub fn create_comment(
    store: &mut Store,
    ids: &dyn IdGenerator,
    input: CreateCommentInput,
) -> Result<Comment> {
    integrity::check_new_comment(store, &input)?;

    let comment = Comment::new(ids.next_id(), input);
    store.comments_mut().insert(comment.clone());
    Ok(comment)
}

/// `deleteComment(id)`
pub fn delete_comment(store: &mut Store, id: &str) -> Result<Comment> {
    integrity::delete_comment(store, id)
}
