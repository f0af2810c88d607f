//! Post persistence.
//!
//! [`PostStore`] is the seam between the HTTP layer and the database. The
//! API receives a [`SharedStore`] when its router is built, so tests swap in
//! a [`MemoryStore`] (or a failing fake) without touching global state.

mod memory;
mod mongo;

use std::sync::Arc;

use async_trait::async_trait;

use crate::post::{NewPost, Post};

pub use memory::MemoryStore;
pub use mongo::{COLLECTION, DEFAULT_DATABASE, MongoStore};

/// A store operation failed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database could not be reached, or a read or write failed at the
    /// driver level.
    #[error("store unavailable: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// The database answered, but with data that is not a post.
    #[error("stored post is malformed: {0}")]
    Corrupt(String),
}

/// Durable storage and retrieval of posts.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Every stored post, in whatever order the backend yields them.
    async fn list_all(&self) -> Result<Vec<Post>, StoreError>;

    /// Persists one post and returns it with its assigned id. No validation
    /// is applied to the fields.
    async fn create(&self, new: NewPost) -> Result<Post, StoreError>;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Handle injected into the API.
pub type SharedStore = Arc<dyn PostStore>;
