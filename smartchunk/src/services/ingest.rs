use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::chunking::{metadata, ChunkParams, ChunkingEngine};
use crate::config::{Config, SearchConfig};
use crate::error::{Result, SmartchunkError};
use crate::models::{BatchDocumentRequest, Chunk, Document, SearchRequest};
use crate::store::{SearchResults, VectorStore};

/// Ingestion front door: chunks incoming documents and forwards the pieces to
/// the configured store.
///
/// Every stored chunk carries `parent_document_id` so that later updates and
/// deletes can address a whole document; that key is stamped here, after
/// chunking. Document-level metadata is folded into each chunk without
/// overwriting the keys the splitters produced.
pub struct DocumentService {
    engine: ChunkingEngine,
    store: Arc<dyn VectorStore>,
    search_defaults: SearchConfig,
}

impl DocumentService {
    pub fn new(store: Arc<dyn VectorStore>, config: &Config) -> Self {
        Self {
            engine: ChunkingEngine::new(&config.processing),
            store,
            search_defaults: config.search.clone(),
        }
    }

    fn chunk_document(&self, document: &Document) -> Result<Vec<Chunk>> {
        let params = ChunkParams::new(document.chunk_size, document.chunk_overlap)?;
        let mut chunks = self
            .engine
            .chunk(&document.content, document.content_type, &params);

        for chunk in &mut chunks {
            for (key, value) in &document.metadata {
                if !chunk.metadata.contains_key(key) {
                    chunk
                        .metadata
                        .insert(key.clone(), metadata::scalar(value.clone()));
                }
            }
            chunk.metadata.insert(
                "parent_document_id".to_string(),
                Value::String(document.uid.clone()),
            );
        }

        debug!(
            uid = %document.uid,
            chunks = chunks.len(),
            "chunked document"
        );
        Ok(chunks)
    }

    fn chunk_all(&self, documents: &[Document]) -> Result<Vec<Chunk>> {
        let mut all = Vec::new();
        for document in documents {
            all.extend(self.chunk_document(document)?);
        }
        Ok(all)
    }

    /// Chunk and store a batch of documents, returning the stored chunk ids.
    pub async fn add_documents(
        &self,
        collection: &str,
        documents: &[Document],
    ) -> Result<Vec<String>> {
        let chunks = self.chunk_all(documents)?;
        let ids = self.store.add_documents(collection, &chunks).await?;
        info!(
            collection,
            documents = documents.len(),
            chunks = ids.len(),
            "documents added"
        );
        Ok(ids)
    }

    /// [`Self::add_documents`] driven by a request payload.
    pub async fn add_batch(&self, request: &BatchDocumentRequest) -> Result<Vec<String>> {
        self.add_documents(&request.collection_name, &request.documents)
            .await
    }

    /// Re-chunk the given documents and replace their stored chunks. `doc_ids`
    /// must pair up with `documents`.
    pub async fn update_documents(
        &self,
        collection: &str,
        doc_ids: &[String],
        documents: &[Document],
    ) -> Result<usize> {
        if doc_ids.len() != documents.len() {
            return Err(SmartchunkError::Validation(format!(
                "number of documents ({}) must match number of ids ({})",
                documents.len(),
                doc_ids.len()
            )));
        }

        let chunks = self.chunk_all(documents)?;
        let written = self
            .store
            .update_documents(collection, doc_ids, &chunks)
            .await?;
        info!(collection, written, "documents updated");
        Ok(written)
    }

    pub async fn delete_documents(&self, collection: &str, doc_ids: &[String]) -> Result<()> {
        self.store.delete_documents(collection, doc_ids).await?;
        info!(collection, count = doc_ids.len(), "documents deleted");
        Ok(())
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResults> {
        self.store
            .search(
                &request.collection_name,
                &request.query,
                request.n_results,
                request.threshold,
            )
            .await
    }

    /// Search with the configured default result count and threshold.
    pub async fn search_collection(
        &self,
        collection: &str,
        query: &str,
    ) -> Result<SearchResults> {
        self.store
            .search(
                collection,
                query,
                self.search_defaults.n_results,
                self.search_defaults.threshold,
            )
            .await
    }

    pub async fn list_collections(&self) -> Result<Vec<String>> {
        self.store.list_collections().await
    }
}
