mod code;
mod detector;
mod engine;
mod html;
mod json;
pub(crate) mod metadata;
mod text;

pub use code::CodeSplitter;
pub use detector::ContentTypeDetector;
pub use engine::ChunkingEngine;
pub use html::HtmlSplitter;
pub use json::JsonSplitter;
pub use text::TextSplitter;

use crate::config::ProcessingConfig;
use crate::error::{Result, SmartchunkError};
use crate::models::Chunk;

/// Size budget for a single chunking call.
///
/// `chunk_overlap` only applies to the raw character-window fallback used when
/// a single sentence exceeds `chunk_size`; the structural levels above it never
/// overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkParams {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl ChunkParams {
    /// Validate caller-supplied sizing before any splitting starts.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 || chunk_overlap >= chunk_size {
            return Err(SmartchunkError::InvalidChunkParams {
                chunk_size,
                chunk_overlap,
            });
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Window advance for the character-window fallback. Clamped to at least 1
    /// so that degenerate sizing can never loop forever.
    pub(crate) fn stride(&self) -> usize {
        self.chunk_size.saturating_sub(self.chunk_overlap).max(1)
    }
}

impl Default for ChunkParams {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl From<&ProcessingConfig> for ChunkParams {
    fn from(config: &ProcessingConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
        }
    }
}

/// One format-specific chunking strategy.
///
/// Splitters are stateless; concurrent calls are safe without locking. Every
/// implementation guarantees the `chunk_index` values of one call form the
/// sequence `0..n` in emission order and that `chunk_id` values are unique.
pub trait Splitter: Send + Sync {
    fn split(&self, content: &str, params: &ChunkParams) -> Vec<Chunk>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_default() {
        let params = ChunkParams::default();
        assert_eq!(params.chunk_size, 1000);
        assert_eq!(params.chunk_overlap, 200);
        assert_eq!(params.stride(), 800);
    }

    #[test]
    fn test_params_rejects_overlap_not_below_size() {
        assert!(ChunkParams::new(100, 100).is_err());
        assert!(ChunkParams::new(100, 150).is_err());
        assert!(ChunkParams::new(0, 0).is_err());
    }

    #[test]
    fn test_params_accepts_valid() {
        let params = ChunkParams::new(100, 20).unwrap();
        assert_eq!(params.stride(), 80);
    }

    #[test]
    fn test_stride_never_zero() {
        // Guard against non-termination even if a degenerate value sneaks in
        // through the Default/From paths rather than `new`.
        let params = ChunkParams {
            chunk_size: 10,
            chunk_overlap: 10,
        };
        assert_eq!(params.stride(), 1);
    }
}
