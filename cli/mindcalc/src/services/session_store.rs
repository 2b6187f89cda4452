use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson},
    Client as MongoClient, Collection,
};
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::{config::Config, models::SessionRecord};

/// Errors surfaced by session storage.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("write error: {0}")]
    Write(String),

    #[error("decode error: {0}")]
    Decode(String),
}

/// Where finished sessions live.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert_session(&self, record: &SessionRecord) -> Result<(), StoreError>;

    /// Every stored session in storage order.
    async fn find_all(&self) -> Result<Vec<SessionRecord>, StoreError>;

    /// Latest session by `date`.
    async fn find_most_recent(&self) -> Result<Option<SessionRecord>, StoreError>;
}

/// MongoDB-backed store. The client is created on first use and reused for
/// the rest of the process.
pub struct MongoSessionStore {
    uri: String,
    database: String,
    collection: String,
    sessions: OnceCell<Collection<SessionRecord>>,
}

impl MongoSessionStore {
    pub fn new(config: &Config) -> Self {
        Self {
            uri: config.mongo_uri.clone(),
            database: config.mongo_database.clone(),
            collection: config.sessions_collection.clone(),
            sessions: OnceCell::new(),
        }
    }

    async fn sessions(&self) -> Result<&Collection<SessionRecord>, StoreError> {
        self.sessions
            .get_or_try_init(|| async {
                let client = MongoClient::with_uri_str(&self.uri)
                    .await
                    .map_err(|e| StoreError::Connection(e.to_string()))?;
                let db = client.database(&self.database);

                db.run_command(doc! { "ping": 1 })
                    .await
                    .map_err(|e| StoreError::Connection(e.to_string()))?;

                tracing::info!(
                    database = %self.database,
                    collection = %self.collection,
                    "MongoDB connected"
                );
                Ok::<_, StoreError>(db.collection::<SessionRecord>(&self.collection))
            })
            .await
    }
}

#[async_trait]
impl SessionStore for MongoSessionStore {
    async fn insert_session(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let result = self
            .sessions()
            .await?
            .insert_one(record)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        if let Bson::ObjectId(oid) = result.inserted_id {
            tracing::info!("Stored session {}", oid.to_hex());
        }
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<SessionRecord>, StoreError> {
        let cursor = self
            .sessions()
            .await?
            .find(doc! {})
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let sessions: Vec<SessionRecord> = cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        tracing::debug!("Loaded {} sessions", sessions.len());
        Ok(sessions)
    }

    async fn find_most_recent(&self) -> Result<Option<SessionRecord>, StoreError> {
        self.sessions()
            .await?
            .find_one(doc! {})
            .sort(doc! { "date": -1 })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }
}

/// Process-local store, used by tests and when no database is wanted.
#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<Vec<SessionRecord>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions(sessions: Vec<SessionRecord>) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(sessions)),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<SessionRecord>>, StoreError> {
        self.sessions
            .lock()
            .map_err(|_| StoreError::Connection("in-memory store poisoned".to_string()))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert_session(&self, record: &SessionRecord) -> Result<(), StoreError> {
        self.lock()?.push(record.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<SessionRecord>, StoreError> {
        Ok(self.lock()?.clone())
    }

    async fn find_most_recent(&self) -> Result<Option<SessionRecord>, StoreError> {
        Ok(self.lock()?.iter().max_by_key(|s| s.date).cloned())
    }
}
