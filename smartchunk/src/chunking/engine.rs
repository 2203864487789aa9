use tracing::debug;

use crate::config::ProcessingConfig;
use crate::models::{Chunk, ContentType};

use super::{
    ChunkParams, CodeSplitter, ContentTypeDetector, HtmlSplitter, JsonSplitter, Splitter,
    TextSplitter,
};

/// Routes content to the right splitter based on an explicit or detected
/// [`ContentType`]. Stores owned splitter instances and hands out trait object
/// references for dispatch.
#[derive(Default)]
pub struct ChunkingEngine {
    detector: ContentTypeDetector,
    text_splitter: TextSplitter,
    html_splitter: HtmlSplitter,
    code_splitter: CodeSplitter,
    json_splitter: JsonSplitter,
    default_params: ChunkParams,
}

impl ChunkingEngine {
    pub fn new(config: &ProcessingConfig) -> Self {
        Self {
            default_params: ChunkParams::from(config),
            ..Self::default()
        }
    }

    /// Splitter serving the given content type.
    pub fn splitter_for(&self, content_type: ContentType) -> &dyn Splitter {
        match content_type {
            ContentType::Html => &self.html_splitter,
            ContentType::Code => &self.code_splitter,
            ContentType::Json => &self.json_splitter,
            ContentType::Text => &self.text_splitter,
        }
    }

    /// Chunk `content`, detecting its type when the caller does not supply
    /// one. An explicit type is honored even when detection would disagree.
    pub fn chunk(
        &self,
        content: &str,
        content_type: Option<ContentType>,
        params: &ChunkParams,
    ) -> Vec<Chunk> {
        let content_type = content_type.unwrap_or_else(|| self.detector.detect(content));
        debug!(%content_type, chunk_size = params.chunk_size, "chunking content");
        self.splitter_for(content_type).split(content, params)
    }

    /// [`Self::chunk`] with the engine's configured sizing.
    pub fn chunk_default(&self, content: &str, content_type: Option<ContentType>) -> Vec<Chunk> {
        self.chunk(content, content_type, &self.default_params)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn chunk_type(chunk: &Chunk) -> &str {
        chunk
            .metadata
            .get("chunk_type")
            .and_then(|v| v.as_str())
            .unwrap()
    }

    #[test]
    fn test_engine_detects_html() {
        let engine = ChunkingEngine::default();
        let chunks = engine.chunk_default("<html><div>Hi there.</div></html>", None);
        assert!(!chunks.is_empty());
        assert_eq!(chunk_type(&chunks[0]), "html");
    }

    #[test]
    fn test_engine_detects_json() {
        let engine = ChunkingEngine::default();
        let chunks = engine.chunk_default(r#"{"a": 1}"#, None);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunk_type(&chunks[0]), "json");
    }

    #[test]
    fn test_engine_detects_code() {
        let engine = ChunkingEngine::default();
        let chunks = engine.chunk_default("import os\nprint('hi')", None);
        assert!(!chunks.is_empty());
        assert_eq!(chunk_type(&chunks[0]), "code");
    }

    #[test]
    fn test_engine_defaults_to_text() {
        let engine = ChunkingEngine::default();
        let chunks = engine.chunk_default("Plain prose goes here.", None);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunk_type(&chunks[0]), "text");
    }

    #[test]
    fn test_explicit_type_overrides_detection() {
        let engine = ChunkingEngine::default();
        // Detection would say JSON; the caller forces text.
        let chunks = engine.chunk_default(r#"{"a": 1}"#, Some(ContentType::Text));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunk_type(&chunks[0]), "text");
        assert_eq!(chunks[0].content, r#"{"a": 1}"#);
    }

    #[test]
    fn test_engine_new_uses_config_sizing() {
        let config = ProcessingConfig {
            chunk_size: 50,
            chunk_overlap: 10,
        };
        let engine = ChunkingEngine::new(&config);
        let long = "z".repeat(120);
        let chunks = engine.chunk_default(&long, None);
        assert!(chunks.len() > 1);
    }

    #[test]
    fn test_engine_explicit_params_win() {
        let engine = ChunkingEngine::default();
        let params = ChunkParams::new(10, 2).unwrap();
        let chunks = engine.chunk(&"w".repeat(25), Some(ContentType::Text), &params);
        assert!(chunks.len() > 1);
    }
}
