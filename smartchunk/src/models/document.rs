use serde::{Deserialize, Serialize};

use super::{ContentType, Metadata};

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

/// A document submitted for chunking and storage.
///
/// `content_type` is optional; when absent the engine detects it from the
/// content. Per-document chunk sizing overrides the configured defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub uid: String,
    pub content: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub content_type: Option<ContentType>,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

impl Document {
    pub fn new(uid: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            content: content.into(),
            metadata: Metadata::new(),
            content_type: None,
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchDocumentRequest {
    pub documents: Vec<Document>,
    pub collection_name: String,
}

fn default_n_results() -> usize {
    5
}

fn default_threshold() -> f32 {
    0.2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub collection_name: String,
    #[serde(default = "default_n_results")]
    pub n_results: usize,
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_defaults() {
        let doc = Document::new("doc-1", "hello");
        assert_eq!(doc.chunk_size, 1000);
        assert_eq!(doc.chunk_overlap, 200);
        assert!(doc.content_type.is_none());
        assert!(doc.metadata.is_empty());
    }

    #[test]
    fn test_document_deserialize_defaults() {
        let doc: Document =
            serde_json::from_str(r#"{"uid": "d1", "content": "some text"}"#).unwrap();
        assert_eq!(doc.uid, "d1");
        assert_eq!(doc.chunk_size, 1000);
        assert_eq!(doc.chunk_overlap, 200);
    }

    #[test]
    fn test_search_request_defaults() {
        let req: SearchRequest =
            serde_json::from_str(r#"{"query": "q", "collection_name": "c"}"#).unwrap();
        assert_eq!(req.n_results, 5);
        assert!((req.threshold - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_document_declared_content_type() {
        let doc: Document = serde_json::from_str(
            r#"{"uid": "d1", "content": "{}", "content_type": "json"}"#,
        )
        .unwrap();
        assert_eq!(doc.content_type, Some(ContentType::Json));
    }
}
