use serde::{Deserialize, Serialize};

use super::Metadata;

/// A bounded-size unit of content emitted by a splitter.
///
/// Chunks are created inside a splitter invocation and never mutated by the
/// engine afterwards; ownership passes to the caller. Metadata always carries
/// `chunk_type`, a per-call-unique `chunk_id`, and a 0-based `chunk_index`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
    pub metadata: Metadata,
}

impl Chunk {
    pub fn new(content: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    /// The `chunk_id` metadata value, if present.
    pub fn id(&self) -> Option<&str> {
        self.metadata.get("chunk_id").and_then(|v| v.as_str())
    }

    /// The `chunk_index` metadata value, if present.
    pub fn index(&self) -> Option<u64> {
        self.metadata.get("chunk_index").and_then(|v| v.as_u64())
    }
}
