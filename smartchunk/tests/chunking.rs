use pretty_assertions::assert_eq;
use serde_json::json;
use smartchunk::chunking::TextSplitter;
use smartchunk::{Chunk, ChunkParams, ChunkingEngine, ContentType, Splitter};

fn chunk_type(chunk: &Chunk) -> &str {
    chunk
        .metadata
        .get("chunk_type")
        .and_then(|v| v.as_str())
        .unwrap()
}

#[test]
fn short_text_is_one_chunk() {
    let engine = ChunkingEngine::default();
    let chunks = engine.chunk_default("Hello world.", None);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, "Hello world.");
    assert_eq!(chunk_type(&chunks[0]), "text");
    assert_eq!(chunks[0].index(), Some(0));
    assert!(chunks[0].id().is_some());
}

#[test]
fn long_sentence_is_window_sliced() {
    let engine = ChunkingEngine::default();
    let content = "a".repeat(2500);
    let chunks = engine.chunk_default(&content, None);
    // Windows advance by 800 (1000 - 200): 1000, 1000, 900, 100.
    assert_eq!(chunks.len(), 4);
    assert_eq!(chunks[0].content.len(), 1000);
    assert_eq!(chunks[1].content.len(), 1000);
    assert_eq!(chunks[2].content.len(), 900);
    assert_eq!(chunks[3].content.len(), 100);
}

#[test]
fn html_sections_carry_document_metadata() {
    let engine = ChunkingEngine::default();
    let html = r#"<html>
        <head>
            <title>Guide</title>
            <meta name="version" content="2">
        </head>
        <body>
            <div id="a">First section text.</div>
            <div id="b">Second section text.</div>
        </body>
    </html>"#;
    let chunks = engine.chunk_default(html, None);
    assert_eq!(chunks.len(), 2);
    for chunk in &chunks {
        assert_eq!(chunk_type(chunk), "html");
        assert_eq!(chunk.metadata.get("title"), Some(&json!("Guide")));
        assert_eq!(chunk.metadata.get("version"), Some(&json!(2)));
    }
    assert_eq!(chunks[0].metadata.get("section_id"), Some(&json!("a")));
    assert_eq!(chunks[1].metadata.get("section_id"), Some(&json!("b")));
}

#[test]
fn json_object_packs_by_serialized_size() {
    let engine = ChunkingEngine::default();
    let long = "x".repeat(60);
    let content = format!(r#"{{"a": 1, "b": 2, "c": "{long}"}}"#);
    let params = ChunkParams::new(50, 0).unwrap();
    let chunks = engine.chunk(&content, None, &params);
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].content, r#"{"a":1,"b":2}"#);
    assert!(chunks[1].content.contains(&long));
    assert_eq!(chunk_type(&chunks[0]), "json");
}

#[test]
fn malformed_json_declared_as_json_chunks_like_text() {
    let engine = ChunkingEngine::default();
    let content = "A sentence that is not JSON. Another sentence follows it.";
    let params = ChunkParams::new(100, 10).unwrap();

    let as_json = engine.chunk(content, Some(ContentType::Json), &params);
    let as_text = TextSplitter::default().split(content, &params);

    assert_eq!(as_json.len(), as_text.len());
    for (a, b) in as_json.iter().zip(&as_text) {
        assert_eq!(a.content, b.content);
        assert_eq!(chunk_type(a), "text");
    }
}

#[test]
fn detection_is_stable_across_calls() {
    let engine = ChunkingEngine::default();
    let content = "import os\n\ndef run():\n    pass";
    let first: Vec<String> = engine
        .chunk_default(content, None)
        .iter()
        .map(|c| c.content.clone())
        .collect();
    for _ in 0..3 {
        let again: Vec<String> = engine
            .chunk_default(content, None)
            .iter()
            .map(|c| c.content.clone())
            .collect();
        assert_eq!(again, first);
    }
}

#[test]
fn text_chunks_respect_size_bound_and_cover_content() {
    let engine = ChunkingEngine::default();
    let content = "Sentence one is here. Sentence two is longer than one. Sentence three closes it.";
    // Zero overlap so the window fallback emits disjoint slices and the
    // concatenation check holds exactly.
    let params = ChunkParams::new(30, 0).unwrap();
    let chunks = engine.chunk(content, Some(ContentType::Text), &params);

    for chunk in &chunks {
        assert!(chunk.content.chars().count() <= 30, "{:?}", chunk.content);
    }
    let squashed: String = chunks
        .iter()
        .map(|c| c.content.replace(' ', ""))
        .collect();
    assert_eq!(squashed, content.replace(' ', ""));
}

#[test]
fn chunk_ids_are_unique_within_and_across_calls() {
    let engine = ChunkingEngine::default();
    let content = "First block.\n\nSecond block.\n\nThird block.";
    let params = ChunkParams::new(15, 3).unwrap();

    let mut seen = std::collections::HashSet::new();
    for _ in 0..2 {
        for chunk in engine.chunk(content, Some(ContentType::Text), &params) {
            assert!(seen.insert(chunk.id().unwrap().to_string()));
        }
    }
}

#[test]
fn explicit_unknown_type_routes_to_text() {
    let engine = ChunkingEngine::default();
    // "yaml" is not a recognized label; parsing maps it to text.
    let declared: ContentType = "yaml".parse().unwrap();
    let chunks = engine.chunk_default("key: value", Some(declared));
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunk_type(&chunks[0]), "text");
}
