//! GraphQL schema and resolvers for the blog graph
//!
//! ## Schema
//!
//! - **Queries**: `users`, `posts`, `comments`, `me`, `post`
//! - **Mutations**: `createUser`, `deleteUser`, `createPost`, `deletePost`,
//!   `createComment`, `deleteComment`
//!
//! Every object carries the store snapshot it was read from. Relationship
//! fields resolve lazily against that snapshot, one lookup per field and
//! parent, so a whole document sees one consistent state. Queries share the
//! snapshot attached to the request; a mutation's result uses the snapshot
//! the mutation itself produced.

use async_graphql::{
    Context, EmptySubscription, ErrorExtensions, Object, Result, Schema, ID,
};
use std::sync::Arc;

use crate::core::error::Error;
use crate::engine::{Applied, Engine};
use crate::resolvers::{query, relations};
use crate::storage::Store;
use crate::types::{
    Comment, CreateCommentInput, CreatePostInput, CreateUserInput, Entity, Post, User,
};

/// The executable blog graph schema
pub type BlogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Root fields, queries first
pub const ROOT_FIELDS: &[&str] = &[
    "users",
    "posts",
    "comments",
    "me",
    "post",
    "createUser",
    "deleteUser",
    "createPost",
    "deletePost",
    "createComment",
    "deleteComment",
];

/// Store view shared by every query field of one request
#[derive(Clone)]
pub struct RequestSnapshot(pub Arc<Store>);

/// Build the schema around a shared engine
pub fn build_schema(engine: Arc<Engine>) -> BlogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(engine)
        .finish()
}

impl ErrorExtensions for Error {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("kind", self.kind()))
    }
}

fn engine<'a>(ctx: &Context<'a>) -> Result<&'a Arc<Engine>> {
    ctx.data::<Arc<Engine>>()
}

fn snapshot(ctx: &Context<'_>) -> Result<Arc<Store>> {
    match ctx.data_opt::<RequestSnapshot>() {
        Some(RequestSnapshot(store)) => Ok(Arc::clone(store)),
        None => Ok(engine(ctx)?.snapshot()),
    }
}

/// `User` object
pub struct UserNode {
    user: User,
    store: Arc<Store>,
}

/// `Post` object
pub struct PostNode {
    post: Post,
    store: Arc<Store>,
}

/// `Comment` object
pub struct CommentNode {
    comment: Comment,
    store: Arc<Store>,
}

impl UserNode {
    fn new(user: User, store: &Arc<Store>) -> Self {
        Self {
            user,
            store: Arc::clone(store),
        }
    }
}

impl PostNode {
    fn new(post: Post, store: &Arc<Store>) -> Self {
        Self {
            post,
            store: Arc::clone(store),
        }
    }
}

impl CommentNode {
    fn new(comment: Comment, store: &Arc<Store>) -> Self {
        Self {
            comment,
            store: Arc::clone(store),
        }
    }
}

fn users_of<'s>(items: impl IntoIterator<Item = &'s User>, store: &Arc<Store>) -> Vec<UserNode> {
    items.into_iter().map(|user| UserNode::new(user.clone(), store)).collect()
}

fn posts_of<'s>(items: impl IntoIterator<Item = &'s Post>, store: &Arc<Store>) -> Vec<PostNode> {
    items.into_iter().map(|post| PostNode::new(post.clone(), store)).collect()
}

fn comments_of<'s>(
    items: impl IntoIterator<Item = &'s Comment>,
    store: &Arc<Store>,
) -> Vec<CommentNode> {
    items
        .into_iter()
        .map(|comment| CommentNode::new(comment.clone(), store))
        .collect()
}

#[Object(name = "User")]
impl UserNode {
    async fn id(&self) -> ID {
        ID::from(self.user.id())
    }

    async fn name(&self) -> &str {
        self.user.name()
    }

    async fn email(&self) -> &str {
        self.user.email()
    }

    async fn age(&self) -> Option<i32> {
        self.user.age()
    }

    /// Posts written by this user
    async fn posts(&self) -> Vec<PostNode> {
        posts_of(relations::user_posts(&self.store, &self.user), &self.store)
    }

    /// Comments left by this user
    async fn comments(&self) -> Vec<CommentNode> {
        comments_of(relations::user_comments(&self.store, &self.user), &self.store)
    }
}

#[Object(name = "Post")]
impl PostNode {
    async fn id(&self) -> ID {
        ID::from(self.post.id())
    }

    async fn title(&self) -> &str {
        self.post.title()
    }

    async fn body(&self) -> &str {
        self.post.body()
    }

    async fn published(&self) -> bool {
        self.post.published()
    }

    /// Null only for the placeholder post
    async fn author(&self) -> Option<UserNode> {
        relations::post_author(&self.store, &self.post)
            .map(|user| UserNode::new(user.clone(), &self.store))
    }

    async fn comments(&self) -> Vec<CommentNode> {
        comments_of(relations::post_comments(&self.store, &self.post), &self.store)
    }
}

#[Object(name = "Comment")]
impl CommentNode {
    async fn id(&self) -> ID {
        ID::from(self.comment.id())
    }

    async fn text(&self) -> &str {
        self.comment.text()
    }

    async fn author(&self) -> Option<UserNode> {
        relations::comment_author(&self.store, &self.comment)
            .map(|user| UserNode::new(user.clone(), &self.store))
    }

    async fn post(&self) -> Option<PostNode> {
        relations::comment_post(&self.store, &self.comment)
            .map(|post| PostNode::new(post.clone(), &self.store))
    }
}

/// Query root
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Users whose name contains `query`, ignoring case
    async fn users(&self, ctx: &Context<'_>, query: Option<String>) -> Result<Vec<UserNode>> {
        engine(ctx)?.record_query("users");
        let store = snapshot(ctx)?;
        Ok(users_of(query::users(&store, query.as_deref()), &store))
    }

    /// Posts whose title or body contains `query`, ignoring case
    async fn posts(&self, ctx: &Context<'_>, query: Option<String>) -> Result<Vec<PostNode>> {
        engine(ctx)?.record_query("posts");
        let store = snapshot(ctx)?;
        Ok(posts_of(query::posts(&store, query.as_deref()), &store))
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<CommentNode>> {
        engine(ctx)?.record_query("comments");
        let store = snapshot(ctx)?;
        Ok(comments_of(query::comments(&store), &store))
    }

    async fn me(&self, ctx: &Context<'_>) -> Result<UserNode> {
        engine(ctx)?.record_query("me");
        Ok(UserNode::new(query::me(), &snapshot(ctx)?))
    }

    async fn post(&self, ctx: &Context<'_>) -> Result<PostNode> {
        engine(ctx)?.record_query("post");
        Ok(PostNode::new(query::post(), &snapshot(ctx)?))
    }
}

/// Mutation root
pub struct MutationRoot;

fn user_node(result: crate::Result<Applied<User>>) -> Result<UserNode> {
    let applied = result.map_err(|e| e.extend())?;
    Ok(UserNode::new(applied.value, &applied.snapshot))
}

fn post_node(result: crate::Result<Applied<Post>>) -> Result<PostNode> {
    let applied = result.map_err(|e| e.extend())?;
    Ok(PostNode::new(applied.value, &applied.snapshot))
}

fn comment_node(result: crate::Result<Applied<Comment>>) -> Result<CommentNode> {
    let applied = result.map_err(|e| e.extend())?;
    Ok(CommentNode::new(applied.value, &applied.snapshot))
}

#[Object]
impl MutationRoot {
    async fn create_user(&self, ctx: &Context<'_>, data: CreateUserInput) -> Result<UserNode> {
        user_node(engine(ctx)?.create_user(data))
    }

    /// Deletes the user, their posts, the comments on those posts and their
    /// remaining comments
    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> Result<UserNode> {
        user_node(engine(ctx)?.delete_user(id.as_str()))
    }

    async fn create_post(&self, ctx: &Context<'_>, data: CreatePostInput) -> Result<PostNode> {
        post_node(engine(ctx)?.create_post(data))
    }

    /// Deletes the post and its comments
    async fn delete_post(&self, ctx: &Context<'_>, id: ID) -> Result<PostNode> {
        post_node(engine(ctx)?.delete_post(id.as_str()))
    }

    async fn create_comment(
        &self,
        ctx: &Context<'_>,
        data: CreateCommentInput,
    ) -> Result<CommentNode> {
        comment_node(engine(ctx)?.create_comment(data))
    }

    async fn delete_comment(&self, ctx: &Context<'_>, id: ID) -> Result<CommentNode> {
        comment_node(engine(ctx)?.delete_comment(id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::id::SequentialIds;
    use crate::storage::demo_store;
    use async_graphql::{Request, Response, Value, Variables};
    use serde_json::json;

    fn schema() -> (BlogSchema, Arc<Engine>) {
        let engine = Arc::new(Engine::with_store(demo_store(), SequentialIds::new("gen")).unwrap());
        (build_schema(Arc::clone(&engine)), engine)
    }

    async fn run(schema: &BlogSchema, query: &str) -> Response {
        schema.execute(query).await
    }

    fn data(response: Response) -> serde_json::Value {
        assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
        response.data.into_json().unwrap()
    }

    fn error_kind(response: &Response) -> Option<&Value> {
        response.errors[0]
            .extensions
            .as_ref()
            .and_then(|extensions| extensions.get("kind"))
    }

    #[tokio::test]
    async fn test_users_with_variables_and_nested_posts() {
        let (schema, _) = schema();
        let request = Request::new("query($q: String) { users(query: $q) { name posts { title } } }")
            .variables(Variables::from_json(json!({ "q": "and" })));

        let response = schema.execute(request).await;
        assert_eq!(
            data(response),
            json!({ "users": [{ "name": "Andrew", "posts": [{ "title": "Dangerous" }] }] })
        );
    }

    #[tokio::test]
    async fn test_me_placeholder() {
        let (schema, _) = schema();
        let response = run(&schema, "{ me { id name email age } }").await;
        assert_eq!(
            data(response),
            json!({ "me": { "id": "123098", "name": "Derek", "email": "derek@gmail.com", "age": null } })
        );
    }

    #[tokio::test]
    async fn test_placeholder_post_author_is_null() {
        let (schema, _) = schema();
        let response = run(&schema, "{ post { title author { id } comments { id } } }").await;
        assert_eq!(
            data(response),
            json!({ "post": { "title": "Gulliver's Travels", "author": null, "comments": [] } })
        );
    }

    #[tokio::test]
    async fn test_comment_relations() {
        let (schema, _) = schema();
        let response = run(&schema, "{ comments { id author { name } post { title } } }").await;
        let data = data(response);

        assert_eq!(data["comments"][2]["id"], "103");
        assert_eq!(data["comments"][2]["author"]["name"], "Sarah");
        assert_eq!(data["comments"][2]["post"]["title"], "Leave me alone");
    }

    #[tokio::test]
    async fn test_create_post_resolves_author() {
        let (schema, _) = schema();
        let response = run(
            &schema,
            r#"mutation {
                createPost(data: { title: "T", body: "B", published: true, author: "1" }) {
                    id
                    author { id name }
                }
            }"#,
        )
        .await;

        assert_eq!(
            data(response),
            json!({ "createPost": { "id": "gen-1", "author": { "id": "1", "name": "Andrew" } } })
        );
    }

    #[tokio::test]
    async fn test_delete_user_resolves_after_cascade() {
        let (schema, engine) = schema();
        let response = run(&schema, r#"mutation { deleteUser(id: "2") { name posts { id } } }"#).await;

        assert_eq!(
            data(response),
            json!({ "deleteUser": { "name": "Sarah", "posts": [] } })
        );
        assert_eq!(engine.counts().users, 2);
    }

    #[tokio::test]
    async fn test_domain_error_carries_kind() {
        let (schema, engine) = schema();
        let response = run(
            &schema,
            r#"mutation { createUser(data: { name: "X", email: "mike@example.com" }) { id } }"#,
        )
        .await;

        assert_eq!(response.errors[0].message, "Email taken");
        assert_eq!(error_kind(&response), Some(&Value::from("EmailTaken")));
        assert_eq!(engine.counts().users, 3);
    }

    #[tokio::test]
    async fn test_unknown_field_is_rejected_before_mutation() {
        let (schema, engine) = schema();
        let response = run(&schema, r#"mutation { deleteUser(id: "1") { password } }"#).await;

        assert!(!response.errors.is_empty());
        assert!(error_kind(&response).is_none());
        assert_eq!(engine.counts().users, 3);
    }

    #[tokio::test]
    async fn test_request_snapshot_is_shared() {
        let (schema, engine) = schema();
        let request = Request::new("{ comments { id } }").data(RequestSnapshot(engine.snapshot()));

        engine.delete_comment("101").unwrap();

        let data = data(schema.execute(request).await);
        assert_eq!(data["comments"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_sdl_names_every_root_field() {
        let (schema, _) = schema();
        let sdl = schema.sdl();
        for field in ROOT_FIELDS {
            assert!(sdl.contains(&format!("{}(", field)) || sdl.contains(&format!("{}:", field)));
        }
        assert!(sdl.contains("input CreateUserInput"));
    }
}
