//! Dual-write orchestration for one entity type.
//!
//! Reads always go to the primary store. Creates and updates are written to the
//! primary store on the caller's path; once that succeeds, the stored entity is
//! mirrored into the search index by a detached task the caller never waits for.
//! Search reads the index and may lag behind the store.

use std::{future::Future, sync::Arc, time::Duration};

use crate::{
    error::{AppError, AppResult},
    models::{Book, Document, Member},
    repository::{PrimaryStore, SearchIndex},
};

use super::background::BackgroundTasks;

/// Bound for store/index calls made on the caller's path
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Bound for one detached index write
pub const DEFAULT_INDEX_TIMEOUT: Duration = Duration::from_secs(30);

pub type BookService = EntityService<Book>;
pub type MemberService = EntityService<Member>;

pub struct EntityService<E: Document> {
    store: Arc<dyn PrimaryStore<E>>,
    index: Arc<dyn SearchIndex<E>>,
    tasks: BackgroundTasks,
    call_timeout: Duration,
    index_timeout: Duration,
}

impl<E: Document> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            index: Arc::clone(&self.index),
            tasks: self.tasks.clone(),
            call_timeout: self.call_timeout,
            index_timeout: self.index_timeout,
        }
    }
}

impl<E: Document> EntityService<E> {
    pub fn new(
        store: Arc<dyn PrimaryStore<E>>,
        index: Arc<dyn SearchIndex<E>>,
        tasks: BackgroundTasks,
    ) -> Self {
        Self {
            store,
            index,
            tasks,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            index_timeout: DEFAULT_INDEX_TIMEOUT,
        }
    }

    pub fn with_timeouts(mut self, call_timeout: Duration, index_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self.index_timeout = index_timeout;
        self
    }

    async fn bounded<T, F>(&self, operation: &str, call: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .map_err(|_| AppError::Timeout {
                operation: operation.to_string(),
                millis: self.call_timeout.as_millis(),
            })?
    }

    /// All entities from the primary store
    pub async fn get_all(&self) -> AppResult<Vec<E>> {
        let operation = format!("get {}", E::LABEL_PLURAL);
        self.bounded(&operation, self.store.get_all()).await
    }

    /// Persist a new entity, then index it in the background.
    ///
    /// On success `entity` carries the id and timestamps assigned by the store.
    /// Indexing outcome never affects the result.
    pub async fn create(&self, entity: &mut E) -> AppResult<()> {
        let operation = format!("create {}", E::LABEL);
        self.bounded(&operation, self.store.create(entity)).await?;

        tracing::info!("Created {} id={:?}", E::LABEL, entity.id());
        self.reindex(entity);
        Ok(())
    }

    /// Apply the non-empty fields of `entity`, then re-index it in the background.
    pub async fn update(&self, entity: &mut E) -> AppResult<()> {
        let operation = format!("update {}", E::LABEL);
        self.bounded(&operation, self.store.update(entity)).await?;

        tracing::info!("Updated {} id={:?}", E::LABEL, entity.id());
        self.reindex(entity);
        Ok(())
    }

    /// Full-text search over the index. A blank keyword matches nothing.
    pub async fn search(&self, keyword: &str) -> AppResult<Vec<E>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }
        let operation = format!("search {}", E::LABEL_PLURAL);
        self.bounded(&operation, self.index.search(keyword)).await
    }

    /// Both collaborators answer
    pub async fn ready(&self) -> AppResult<()> {
        self.bounded("ping primary store", self.store.ping()).await?;
        self.bounded("ping search index", self.index.ping()).await
    }

    fn reindex(&self, entity: &E) {
        let index = Arc::clone(&self.index);
        let document = entity.clone();
        let name = match entity.id() {
            Some(id) => format!("index {} {}", E::LABEL, id),
            None => format!("index {}", E::LABEL),
        };

        self.tasks.spawn(name, self.index_timeout, async move {
            index.index_document(&document).await
        });
    }
}
