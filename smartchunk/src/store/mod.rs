//! Storage backends for chunked documents.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Chunk, Metadata};

/// Column-oriented search output: position `i` of each vector describes the
/// same hit. `distances` holds `1.0 - similarity`, so lower is better.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub ids: Vec<String>,
    pub documents: Vec<String>,
    pub metadatas: Vec<Metadata>,
    pub distances: Vec<f32>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Chunk-level storage and retrieval operations.
///
/// Collections are created on first use. Callers identify whole documents by
/// the `parent_document_id` metadata key stamped on every chunk at ingestion
/// time; the store itself never assigns it.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Upsert chunks into a collection, returning their ids.
    async fn add_documents(&self, collection: &str, chunks: &[Chunk]) -> Result<Vec<String>>;

    /// Replace every chunk belonging to the given documents with the new
    /// chunks, returning the number of chunks written.
    async fn update_documents(
        &self,
        collection: &str,
        doc_ids: &[String],
        chunks: &[Chunk],
    ) -> Result<usize>;

    /// Remove chunks matched by chunk id or by `parent_document_id`.
    async fn delete_documents(&self, collection: &str, doc_ids: &[String]) -> Result<()>;

    /// Rank stored chunks against `query`, keeping hits whose similarity
    /// reaches `threshold`, at most `n_results` of them.
    async fn search(
        &self,
        collection: &str,
        query: &str,
        n_results: usize,
        threshold: f32,
    ) -> Result<SearchResults>;

    async fn list_collections(&self) -> Result<Vec<String>>;
}
