use serde_json::{Map, Value};

use crate::models::{Chunk, ContentType};

use super::text::{width, TextSplitter};
use super::{metadata, ChunkParams, Splitter};

/// Splitter for JSON documents.
///
/// Objects are packed key by key and arrays element by element, measured by
/// compact serialized length. An entry that does not fit closes the open chunk
/// and starts the next one; only an oversized entry arriving on an empty chunk
/// is emitted alone. Content that fails to parse is handed to [`TextSplitter`]
/// unchanged, so callers get text-typed chunks back in that case.
#[derive(Default)]
pub struct JsonSplitter {
    text: TextSplitter,
}

fn push_json_chunk(chunks: &mut Vec<Chunk>, content: String) {
    let mut md = metadata::base(ContentType::Json);
    metadata::stamp(&mut md, chunks.len());
    chunks.push(Chunk::new(content, md));
}

fn process_object(object: &Map<String, Value>, chunk_size: usize, chunks: &mut Vec<Chunk>) {
    let mut current = Map::new();
    let mut current_size = 0;

    for (key, value) in object {
        let mut single = Map::new();
        single.insert(key.clone(), value.clone());
        let item_str = Value::Object(single).to_string();
        let item_size = width(&item_str);

        if current_size + item_size <= chunk_size {
            current.insert(key.clone(), value.clone());
            current_size += item_size;
        } else if !current.is_empty() {
            push_json_chunk(chunks, Value::Object(std::mem::take(&mut current)).to_string());
            current.insert(key.clone(), value.clone());
            current_size = item_size;
        } else {
            push_json_chunk(chunks, item_str);
        }
    }

    if !current.is_empty() {
        push_json_chunk(chunks, Value::Object(current).to_string());
    }
}

fn process_array(array: &[Value], chunk_size: usize, chunks: &mut Vec<Chunk>) {
    let mut current: Vec<Value> = Vec::new();
    let mut current_size = 0;

    for item in array {
        let item_str = item.to_string();
        let item_size = width(&item_str);

        if current_size + item_size <= chunk_size {
            current.push(item.clone());
            current_size += item_size;
        } else if !current.is_empty() {
            push_json_chunk(chunks, Value::Array(std::mem::take(&mut current)).to_string());
            current.push(item.clone());
            current_size = item_size;
        } else {
            push_json_chunk(chunks, item_str);
        }
    }

    if !current.is_empty() {
        push_json_chunk(chunks, Value::Array(current).to_string());
    }
}

impl Splitter for JsonSplitter {
    fn split(&self, content: &str, params: &ChunkParams) -> Vec<Chunk> {
        let parsed: Value = match serde_json::from_str(content) {
            Ok(value) => value,
            Err(_) => return self.text.split(content, params),
        };

        let mut chunks = Vec::new();
        match parsed {
            Value::Object(object) => process_object(&object, params.chunk_size, &mut chunks),
            Value::Array(array) => process_array(&array, params.chunk_size, &mut chunks),
            _ => {
                // A bare scalar is stored as-is, original formatting included.
                push_json_chunk(&mut chunks, content.to_string());
            }
        }
        chunks
    }
}
