//! Meilisearch-backed search index

use std::{marker::PhantomData, time::Duration};

use async_trait::async_trait;
use meilisearch_sdk::{
    client::Client,
    errors::{Error as MeiliError, ErrorCode, MeilisearchError},
    tasks::Task,
};

use super::SearchIndex;
use crate::{config::SearchConfig, error::AppResult, models::Document};

/// Shared Meilisearch client, one per process
#[derive(Clone)]
pub struct SearchClient {
    client: Client,
}

impl SearchClient {
    /// Create a client for the configured instance. Does not contact the server.
    pub fn new(config: &SearchConfig) -> AppResult<Self> {
        let client = Client::new(&config.url, config.api_key.as_deref())?;
        Ok(Self { client })
    }

    /// Index adapter for entity type `E`; each upsert waits up to `wait_timeout`
    /// for Meilisearch to process it
    pub fn index<E: Document>(&self, wait_timeout: Duration) -> MeiliIndex<E> {
        MeiliIndex {
            client: self.client.clone(),
            wait_timeout,
            _entity: PhantomData,
        }
    }

    /// Check that the search engine answers
    pub async fn health(&self) -> AppResult<()> {
        self.client.health().await?;
        Ok(())
    }
}

/// Search index for one entity type, stored in the index named by [`Document::INDEX`]
pub struct MeiliIndex<E> {
    client: Client,
    wait_timeout: Duration,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for MeiliIndex<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            wait_timeout: self.wait_timeout,
            _entity: PhantomData,
        }
    }
}

/// Nothing has been indexed yet for this entity type
fn is_missing_index(err: &MeiliError) -> bool {
    matches!(
        err,
        MeiliError::Meilisearch(MeilisearchError {
            error_code: ErrorCode::IndexNotFound,
            ..
        })
    )
}

#[async_trait]
impl<E: Document> SearchIndex<E> for MeiliIndex<E> {
    async fn index_document(&self, entity: &E) -> AppResult<()> {
        let index = self.client.index(E::INDEX);
        let task = index
            .add_or_replace(std::slice::from_ref(entity), Some("id"))
            .await?
            .wait_for_completion(&self.client, None, Some(self.wait_timeout))
            .await?;

        if let Task::Failed { content } = task {
            return Err(MeiliError::Meilisearch(content.error).into());
        }
        Ok(())
    }

    async fn search(&self, keyword: &str) -> AppResult<Vec<E>> {
        let index = self.client.index(E::INDEX);
        let results = match index.search().with_query(keyword).execute::<E>().await {
            Ok(results) => results,
            Err(err) if is_missing_index(&err) => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        Ok(results.hits.into_iter().map(|hit| hit.result).collect())
    }

    async fn ping(&self) -> AppResult<()> {
        self.client.health().await?;
        Ok(())
    }
}
