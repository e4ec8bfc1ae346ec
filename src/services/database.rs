use crate::error::AppError;
use crate::models::{Post, PostDocument};
use anyhow::Context;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{self, doc, Bson, Document},
    options::ReplaceOptions,
    Client as MongoClient, Collection, Database,
};
use rand::Rng;

const POSTS_COLLECTION: &str = "posts";

/// Length and alphabet of store-assigned post ids (Firestore-style auto-ids).
const AUTO_ID_LENGTH: usize = 20;
const AUTO_ID_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Store operations the handlers depend on. Injected as `Arc<dyn PostStore>` so
/// tests can substitute doubles for the hosted database.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All documents in the collection, in store-defined order.
    async fn list(&self) -> anyhow::Result<Vec<Post>>;

    /// Insert a new document and return its store-assigned id.
    async fn create(&self, fields: PostDocument) -> anyhow::Result<String>;

    /// Overwrite the document at `id` entirely. Creates the document if the id
    /// does not exist (replace-or-create); fields absent from `fields` are gone.
    async fn replace(&self, id: &str, fields: PostDocument) -> anyhow::Result<()>;

    /// Delete the document at `id`. Deleting a nonexistent id is not an error.
    async fn delete(&self, id: &str) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct MongoDb {
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { db })
    }

    fn posts(&self) -> Collection<Document> {
        self.db.collection(POSTS_COLLECTION)
    }
}

#[async_trait]
impl PostStore for MongoDb {
    async fn list(&self) -> anyhow::Result<Vec<Post>> {
        let mut cursor = self.posts().find(None, None).await?;

        let mut posts = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            posts.push(post_from_document(document)?);
        }
        Ok(posts)
    }

    async fn create(&self, fields: PostDocument) -> anyhow::Result<String> {
        let id = generate_post_id();
        let mut document = document_from_fields(fields)?;
        document.insert("_id", id.as_str());

        self.posts().insert_one(document, None).await?;
        Ok(id)
    }

    async fn replace(&self, id: &str, fields: PostDocument) -> anyhow::Result<()> {
        let document = document_from_fields(fields)?;
        let options = ReplaceOptions::builder().upsert(true).build();

        self.posts()
            .replace_one(doc! { "_id": id }, document, options)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> anyhow::Result<()> {
        // delete_one reports a zero deleted count for unknown ids, not an error
        self.posts().delete_one(doc! { "_id": id }, None).await?;
        Ok(())
    }
}

/// Generate a store-assigned post id: 20 characters drawn from the
/// alphanumeric alphabet.
pub fn generate_post_id() -> String {
    let mut rng = rand::thread_rng();
    (0..AUTO_ID_LENGTH)
        .map(|_| AUTO_ID_ALPHABET[rng.gen_range(0..AUTO_ID_ALPHABET.len())] as char)
        .collect()
}

fn document_from_fields(fields: PostDocument) -> anyhow::Result<Document> {
    let mut document =
        bson::to_document(&fields).context("failed to convert post fields to BSON")?;
    // The _id key belongs to the store; a caller-supplied one would collide
    // with the id we assign.
    document.remove("_id");
    Ok(document)
}

fn post_from_document(mut document: Document) -> anyhow::Result<Post> {
    let id = match document.remove("_id") {
        Some(Bson::String(id)) => id,
        Some(other) => other.to_string(),
        None => anyhow::bail!("stored post is missing its _id"),
    };

    let fields = match Bson::Document(document).into_relaxed_extjson() {
        serde_json::Value::Object(map) => map,
        _ => unreachable!("a BSON document always converts to a JSON object"),
    };

    Ok(Post { id, fields })
}
