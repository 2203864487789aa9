//! In-memory store backend.
//!
//! Keeps every collection in process memory and ranks chunks with a
//! brute-force keyword score. Useful for tests and for embedding-free
//! deployments; anything needing persistence wants a real backend behind the
//! same trait.

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, SmartchunkError};
use crate::models::{Chunk, Metadata};

use super::{SearchResults, VectorStore};

#[derive(Debug, Clone)]
struct StoredChunk {
    id: String,
    content: String,
    metadata: Metadata,
}

impl StoredChunk {
    fn parent_document_id(&self) -> Option<&str> {
        self.metadata
            .get("parent_document_id")
            .and_then(|v| v.as_str())
    }
}

type Collections = HashMap<String, Vec<StoredChunk>>;

#[derive(Default)]
pub struct InMemoryStore {
    collections: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>> {
        self.collections
            .read()
            .map_err(|_| SmartchunkError::Store("collection lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>> {
        self.collections
            .write()
            .map_err(|_| SmartchunkError::Store("collection lock poisoned".to_string()))
    }

    /// Fraction of query terms present in the content, in `0.0..=1.0`.
    fn score(query_terms: &HashSet<String>, content: &str) -> f32 {
        if query_terms.is_empty() {
            return 0.0;
        }
        let content_terms = terms(content);
        let hits = query_terms.intersection(&content_terms).count();
        hits as f32 / query_terms.len() as f32
    }
}

fn terms(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn upsert(records: &mut Vec<StoredChunk>, record: StoredChunk) {
    if let Some(existing) = records.iter_mut().find(|r| r.id == record.id) {
        *existing = record;
    } else {
        records.push(record);
    }
}

fn to_record(chunk: &Chunk) -> StoredChunk {
    StoredChunk {
        id: chunk
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        content: chunk.content.clone(),
        metadata: chunk.metadata.clone(),
    }
}

#[async_trait]
impl VectorStore for InMemoryStore {
    async fn add_documents(&self, collection: &str, chunks: &[Chunk]) -> Result<Vec<String>> {
        let mut collections = self.write()?;
        let records = collections.entry(collection.to_string()).or_default();

        let mut ids = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let record = to_record(chunk);
            ids.push(record.id.clone());
            upsert(records, record);
        }

        debug!(collection, count = ids.len(), "added chunks");
        Ok(ids)
    }

    async fn update_documents(
        &self,
        collection: &str,
        doc_ids: &[String],
        chunks: &[Chunk],
    ) -> Result<usize> {
        let mut collections = self.write()?;
        let records = collections.entry(collection.to_string()).or_default();

        let before = records.len();
        records.retain(|r| {
            r.parent_document_id()
                .map_or(true, |parent| !doc_ids.iter().any(|id| id == parent))
        });
        let removed = before - records.len();

        for chunk in chunks {
            upsert(records, to_record(chunk));
        }

        debug!(
            collection,
            removed,
            written = chunks.len(),
            "replaced document chunks"
        );
        Ok(chunks.len())
    }

    async fn delete_documents(&self, collection: &str, doc_ids: &[String]) -> Result<()> {
        let mut collections = self.write()?;
        let records = collections.entry(collection.to_string()).or_default();

        records.retain(|r| {
            let by_chunk = doc_ids.iter().any(|id| id == &r.id);
            let by_parent = r
                .parent_document_id()
                .is_some_and(|parent| doc_ids.iter().any(|id| id == parent));
            !(by_chunk || by_parent)
        });

        debug!(collection, "deleted documents");
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: &str,
        n_results: usize,
        threshold: f32,
    ) -> Result<SearchResults> {
        let collections = self.read()?;
        let records = collections.get(collection).map(Vec::as_slice).unwrap_or(&[]);

        let query_terms = terms(query);
        let mut scored: Vec<(f32, &StoredChunk)> = records
            .iter()
            .map(|r| (Self::score(&query_terms, &r.content), r))
            .filter(|(score, _)| *score >= threshold)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(n_results);

        let mut results = SearchResults::default();
        for (score, record) in scored {
            results.ids.push(record.id.clone());
            results.documents.push(record.content.clone());
            results.metadatas.push(record.metadata.clone());
            results.distances.push(1.0 - score);
        }

        debug!(collection, hits = results.len(), "search complete");
        Ok(results)
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        let collections = self.read()?;
        let mut names: Vec<String> = collections.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
