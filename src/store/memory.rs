use async_trait::async_trait;
use bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{PostStore, StoreError};
use crate::post::{NewPost, Post, PostId};

/// In-process store. Lists in insertion order and never fails.
///
/// Ids are minted the same way MongoDB mints them, so clients cannot tell
/// the two backends apart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    posts: RwLock<Vec<Post>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.posts.read().await.clone())
    }

    async fn create(&self, new: NewPost) -> Result<Post, StoreError> {
        let post = Post::from_new(PostId::new(ObjectId::new().to_hex()), new);
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
