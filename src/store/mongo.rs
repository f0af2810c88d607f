use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use futures_util::TryStreamExt;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{PostStore, StoreError};
use crate::post::{NewPost, Post, PostId, coerce};

/// Collection holding one document per post.
pub const COLLECTION: &str = "posts";

/// Database used when the connection URL does not name one.
pub const DEFAULT_DATABASE: &str = "blogdb";

/// On-disk shape of a post. Fields other than these (a `__v` version key,
/// say) are ignored on read. Documents written by other clients may hold
/// numbers or booleans in `title` or `content`; those read back as text,
/// and anything structured reads as absent.
#[derive(Debug, Serialize, Deserialize)]
struct PostDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(default, deserialize_with = "coerce::stored_text", skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, deserialize_with = "coerce::stored_text", skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

impl PostDoc {
    fn into_post(self) -> Result<Post, StoreError> {
        let id = self
            .id
            .ok_or_else(|| StoreError::Corrupt("document has no _id".into()))?;
        Ok(Post { id: PostId::new(id.to_hex()), title: self.title, content: self.content })
    }
}

impl From<NewPost> for PostDoc {
    fn from(new: NewPost) -> Self {
        Self { id: None, title: new.title, content: new.content }
    }
}

/// MongoDB-backed store.
///
/// The driver connects lazily: [`MongoStore::connect`] only fails on a
/// malformed URL, and an unreachable server surfaces later as a
/// [`StoreError`] from the operation that needed it.
#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database,
    posts: Collection<PostDoc>,
}

impl MongoStore {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = ClientOptions::parse(url).await?;
        let db_name = options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_owned());
        let client = Client::with_options(options)?;
        info!(database = %db_name, collection = COLLECTION, "mongodb client configured");
        Ok(Self::with_database(client.database(&db_name)))
    }

    pub fn with_database(db: Database) -> Self {
        let posts = db.collection::<PostDoc>(COLLECTION);
        Self { db, posts }
    }
}

#[async_trait]
impl PostStore for MongoStore {
    async fn list_all(&self) -> Result<Vec<Post>, StoreError> {
        let docs: Vec<PostDoc> = self.posts.find(doc! {}).await?.try_collect().await?;
        debug!(count = docs.len(), "listed posts");
        docs.into_iter().map(PostDoc::into_post).collect()
    }

    async fn create(&self, new: NewPost) -> Result<Post, StoreError> {
        let result = self.posts.insert_one(PostDoc::from(new.clone())).await?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::Corrupt(format!("inserted id {} is not an ObjectId", result.inserted_id))
        })?;
        debug!(%id, "created post");
        Ok(Post::from_new(PostId::new(id.to_hex()), new))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
