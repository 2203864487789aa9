//! Format-aware document chunking for RAG ingestion.
//!
//! Smartchunk splits heterogeneous documents (plain text, HTML, source code,
//! JSON) into bounded-size chunks suitable for embedding and retrieval. The
//! [`chunking::ChunkingEngine`] resolves a content type (declared or detected)
//! and routes to the matching splitter; [`services::DocumentService`] wraps the
//! engine and forwards chunks to a pluggable [`store::VectorStore`] backend.

pub mod chunking;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use chunking::{ChunkParams, ChunkingEngine, Splitter};
pub use config::Config;
pub use error::{Result, SmartchunkError};
pub use models::{Chunk, ContentType, Document, Metadata};
pub use services::DocumentService;
pub use store::{InMemoryStore, SearchResults, VectorStore};
