//! The graph engine: a store behind one lock, an id generator and metrics
//!
//! The store is held as an `Arc<Store>` snapshot. Readers clone the `Arc`
//! under the read lock and resolve a whole request against that immutable
//! value. Mutations hold the write lock for validation and application
//! together, cascades included, and copy the store on write when a reader
//! still holds the previous snapshot. Readers therefore see a delete either
//! in full or not at all.

use crate::core::error::Result;
use crate::core::id::{IdGenerator, UuidGenerator};
use crate::resolvers::{mutation, query};
use crate::storage::{demo_store, Store, StoreCounts};
use crate::system::EngineMetrics;
use crate::types::{
    Comment, CreateCommentInput, CreatePostInput, CreateUserInput, Entity, Post, User,
};
use parking_lot::{RwLock, RwLockWriteGuard};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a mutation together with the store as it stood right after it
#[derive(Debug, Clone)]
pub struct Applied<T> {
    /// Entity created or removed
    pub value: T,
    /// Store state produced by this mutation, before any later write
    pub snapshot: Arc<Store>,
}

/// In-process query/mutation engine over users, posts and comments
pub struct Engine {
    store: RwLock<Arc<Store>>,
    ids: Box<dyn IdGenerator>,
    metrics: EngineMetrics,
}

impl Engine {
    /// Empty engine issuing UUID identifiers
    pub fn new() -> Result<Self> {
        Self::with_store(Store::new(), UuidGenerator)
    }

    /// Engine preloaded with the demo dataset
    pub fn seeded() -> Result<Self> {
        Self::with_store(demo_store(), UuidGenerator)
    }

    /// Engine over an existing store with a custom id generator
    pub fn with_store(store: Store, ids: impl IdGenerator + 'static) -> Result<Self> {
        let engine = Self {
            store: RwLock::new(Arc::new(store)),
            ids: Box::new(ids),
            metrics: EngineMetrics::new()?,
        };
        engine.publish_counts(&engine.snapshot());
        Ok(engine)
    }

    /// Consistent view of the store. Later mutations do not affect it.
    pub fn snapshot(&self) -> Arc<Store> {
        Arc::clone(&self.store.read())
    }

    /// Metrics for this engine
    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    /// Current collection sizes
    pub fn counts(&self) -> StoreCounts {
        self.store.read().counts()
    }

    /// Count a query root invocation
    pub fn record_query(&self, operation: &str) {
        debug!(operation, "query");
        self.metrics.record_query(operation);
    }

    /// `users(query)`
    pub fn users(&self, search: Option<&str>) -> Vec<User> {
        self.record_query("users");
        query::users(&self.snapshot(), search).into_iter().cloned().collect()
    }

    /// `posts(query)`
    pub fn posts(&self, search: Option<&str>) -> Vec<Post> {
        self.record_query("posts");
        query::posts(&self.snapshot(), search).into_iter().cloned().collect()
    }

    /// `comments`
    pub fn comments(&self) -> Vec<Comment> {
        self.record_query("comments");
        query::comments(&self.snapshot()).into_iter().cloned().collect()
    }

    /// `createUser(data)`
    pub fn create_user(&self, input: CreateUserInput) -> Result<Applied<User>> {
        self.mutate("createUser", |store, ids| mutation::create_user(store, ids, input))
    }

    /// `deleteUser(id)`
    pub fn delete_user(&self, id: &str) -> Result<Applied<User>> {
        self.mutate("deleteUser", |store, _| {
            let report = mutation::delete_user(store, id)?;
            info!(
                user = id,
                posts = report.posts.len(),
                comments = report.comments.len(),
                "Deleted user with cascade"
            );
            self.metrics.record_cascade(Post::KIND, report.posts.len());
            self.metrics.record_cascade(Comment::KIND, report.comments.len());
            Ok(report.removed)
        })
    }

    /// `createPost(data)`
    pub fn create_post(&self, input: CreatePostInput) -> Result<Applied<Post>> {
        self.mutate("createPost", |store, ids| mutation::create_post(store, ids, input))
    }

    /// `deletePost(id)`
    pub fn delete_post(&self, id: &str) -> Result<Applied<Post>> {
        self.mutate("deletePost", |store, _| {
            let report = mutation::delete_post(store, id)?;
            info!(post = id, comments = report.comments.len(), "Deleted post with cascade");
            self.metrics.record_cascade(Comment::KIND, report.comments.len());
            Ok(report.removed)
        })
    }

    /// `createComment(data)`
    pub fn create_comment(&self, input: CreateCommentInput) -> Result<Applied<Comment>> {
        self.mutate("createComment", |store, ids| mutation::create_comment(store, ids, input))
    }

    /// `deleteComment(id)`
    pub fn delete_comment(&self, id: &str) -> Result<Applied<Comment>> {
        self.mutate("deleteComment", |store, _| mutation::delete_comment(store, id))
    }

    /// Run one mutation as a single critical section. On success the write
    /// guard is downgraded so the returned snapshot is exactly the state the
    /// mutation produced.
    fn mutate<T, F>(&self, operation: &'static str, apply: F) -> Result<Applied<T>>
    where
        F: FnOnce(&mut Store, &dyn IdGenerator) -> Result<T>,
    {
        let mut store = self.store.write();
        match apply(Arc::make_mut(&mut *store), self.ids.as_ref()) {
            Ok(value) => {
                debug!(operation, "mutation applied");
                self.metrics.record_mutation(operation);
                self.publish_counts(&store);
                let store = RwLockWriteGuard::downgrade(store);
                Ok(Applied {
                    value,
                    snapshot: Arc::clone(&store),
                })
            }
            Err(e) => {
                warn!(operation, error = %e, "mutation rejected");
                self.metrics.record_failure(&e);
                Err(e)
            }
        }
    }

    fn publish_counts(&self, store: &Store) {
        let counts = store.counts();
        self.metrics
            .set_entity_counts(counts.users, counts.posts, counts.comments);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::core::id::SequentialIds;
    use crate::resolvers::relations;
    use std::thread;

    fn engine() -> Engine {
        Engine::with_store(demo_store(), SequentialIds::new("t")).unwrap()
    }

    #[test]
    fn test_queries_return_owned_values() {
        let engine = engine();
        assert_eq!(engine.users(Some("sar")).len(), 1);
        assert_eq!(engine.posts(None).len(), 3);
        assert_eq!(engine.comments().len(), 4);
        assert_eq!(engine.metrics().queries.with_label_values(&["users"]).get(), 1);
    }

    #[test]
    fn test_mutation_metrics() {
        let engine = engine();

        let err = engine
            .create_user(CreateUserInput {
                name: "Dup".to_string(),
                email: "mike@example.com".to_string(),
                age: None,
            })
            .unwrap_err();
        assert!(matches!(err, Error::EmailTaken));

        engine.delete_user("1").unwrap();

        let metrics = engine.metrics();
        assert_eq!(metrics.mutation_failures.with_label_values(&["EmailTaken"]).get(), 1);
        assert_eq!(metrics.mutations.with_label_values(&["deleteUser"]).get(), 1);
        assert_eq!(metrics.entities.with_label_values(&["User"]).get(), 2);
        // post 10 and comments 101, 102, 104
        assert_eq!(metrics.cascade_removed.with_label_values(&["Post"]).get(), 1);
        assert_eq!(metrics.cascade_removed.with_label_values(&["Comment"]).get(), 3);
    }

    #[test]
    fn test_delete_post_keeps_users() {
        let engine = engine();
        let removed = engine.delete_post("11").unwrap().value;
        assert_eq!(removed.title(), "Leave me alone");

        let counts = engine.counts();
        assert_eq!(counts.users, 3);
        assert_eq!(counts.posts, 2);
        assert_eq!(counts.comments, 2);
    }

    #[test]
    fn test_concurrent_creates_keep_emails_unique() {
        let engine = Arc::new(Engine::new().unwrap());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = Arc::clone(&engine);
                thread::spawn(move || {
                    engine
                        .create_user(CreateUserInput {
                            name: "Racer".to_string(),
                            email: "race@example.com".to_string(),
                            age: None,
                        })
                        .is_ok()
                })
            })
            .collect();

        let created = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(created, 1);
        assert_eq!(engine.counts().users, 1);
    }

    #[test]
    fn test_mutation_snapshot_ignores_later_writes() {
        let engine = engine();

        let applied = engine
            .create_post(CreatePostInput {
                title: "Thriller".to_string(),
                body: "It's close to midnight".to_string(),
                published: true,
                author: "2".to_string(),
            })
            .unwrap();
        assert_eq!(applied.value.id(), "t-1");

        // the author goes away before the caller resolves `author`
        engine.delete_user("2").unwrap();
        assert!(engine.snapshot().posts().find_by_id("t-1").is_none());

        let author = relations::post_author(&applied.snapshot, &applied.value).unwrap();
        assert_eq!(author.name(), "Sarah");
        assert!(applied.snapshot.posts().contains("t-1"));
    }

    #[test]
    fn test_reader_snapshot_is_stable() {
        let engine = engine();
        let before = engine.snapshot();

        engine.delete_comment("101").unwrap();

        assert_eq!(before.counts().comments, 4);
        assert_eq!(engine.counts().comments, 3);
    }
}
