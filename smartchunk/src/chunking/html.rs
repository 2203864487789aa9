use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use crate::models::{Chunk, ContentType, Metadata};

use super::text::{width, TextSplitter};
use super::{metadata, ChunkParams, Splitter};

/// Tags treated as semantic sections, in collection priority order.
const SECTION_TAGS: [&str; 8] = [
    "div", "section", "article", "main", "header", "footer", "nav", "aside",
];

/// Splitter for HTML documents.
///
/// The document title and every named `<meta>` tag are lifted into the
/// metadata of each chunk, with attribute values coerced to booleans and
/// numbers where they parse as such. Sections are collected one tag name at a
/// time following [`SECTION_TAGS`], so all `<div>` chunks precede all
/// `<section>` chunks regardless of document order. Nested sections are each
/// collected in full; their text can repeat across chunks. A section over the
/// size budget is re-split by [`TextSplitter`] and its pieces are flagged with
/// `sub_chunk`. A document with no section tags at all degrades to plain-text
/// splitting of the full extracted text.
pub struct HtmlSplitter {
    text: TextSplitter,
    title_selector: Selector,
    meta_selector: Selector,
    section_selectors: Vec<Selector>,
}

impl Default for HtmlSplitter {
    fn default() -> Self {
        Self {
            text: TextSplitter::default(),
            title_selector: Selector::parse("title").expect("hardcoded title selector"),
            meta_selector: Selector::parse("meta").expect("hardcoded meta selector"),
            section_selectors: SECTION_TAGS
                .iter()
                .map(|tag| Selector::parse(tag).expect("hardcoded section selector"))
                .collect(),
        }
    }
}

/// Trim every text node, drop the empty ones, and join with `separator`.
fn collect_text<'a>(texts: impl Iterator<Item = &'a str>, separator: &str) -> String {
    texts
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

impl HtmlSplitter {
    /// Shared metadata for every chunk of one document: `chunk_type`, the
    /// document title, and one entry per named `<meta>` tag.
    fn document_metadata(&self, document: &Html) -> Metadata {
        let mut md = metadata::base(ContentType::Html);

        let title = document
            .select(&self.title_selector)
            .next()
            .map(|el| collect_text(el.text(), " "))
            .unwrap_or_default();
        md.insert("title".to_string(), Value::String(title));

        for meta in document.select(&self.meta_selector) {
            let element = meta.value();
            if let (Some(name), Some(content)) = (element.attr("name"), element.attr("content")) {
                md.insert(name.to_string(), metadata::coerce_str(content));
            }
        }

        md
    }

    fn push_section_chunk(
        chunks: &mut Vec<Chunk>,
        base: &Metadata,
        section: ElementRef<'_>,
        content: String,
    ) {
        let mut md = base.clone();
        metadata::stamp(&mut md, chunks.len());
        insert_section_attrs(&mut md, section);
        chunks.push(Chunk::new(content, md));
    }
}

fn insert_section_attrs(md: &mut Metadata, section: ElementRef<'_>) {
    let element = section.value();
    md.insert(
        "section_id".to_string(),
        Value::String(element.attr("id").unwrap_or_default().to_string()),
    );
    md.insert(
        "section_class".to_string(),
        Value::String(element.attr("class").unwrap_or_default().to_string()),
    );
}

fn original_chunk_type(chunk: &Chunk) -> Value {
    chunk
        .metadata
        .get("chunk_type")
        .cloned()
        .unwrap_or_else(|| Value::String(ContentType::Text.to_string()))
}

impl Splitter for HtmlSplitter {
    fn split(&self, content: &str, params: &ChunkParams) -> Vec<Chunk> {
        let document = Html::parse_document(content);
        let base = self.document_metadata(&document);

        let mut sections = Vec::new();
        for selector in &self.section_selectors {
            sections.extend(document.select(selector));
        }

        let mut chunks = Vec::new();

        if sections.is_empty() {
            // No structure to work with; split the full text and keep the
            // document-level metadata on each piece.
            let text_content = collect_text(document.root_element().text(), "\n");
            for sub in self.text.split(&text_content, params) {
                let mut md = base.clone();
                metadata::stamp(&mut md, chunks.len());
                md.insert("original_chunk_type".to_string(), original_chunk_type(&sub));
                chunks.push(Chunk::new(sub.content, md));
            }
            return chunks;
        }

        for section in sections {
            let section_text = collect_text(section.text(), " ");
            if section_text.is_empty() {
                continue;
            }

            if width(&section_text) <= params.chunk_size {
                Self::push_section_chunk(&mut chunks, &base, section, section_text);
            } else {
                for sub in self.text.split(&section_text, params) {
                    let mut md = base.clone();
                    metadata::stamp(&mut md, chunks.len());
                    insert_section_attrs(&mut md, section);
                    md.insert("sub_chunk".to_string(), Value::Bool(true));
                    md.insert("original_chunk_type".to_string(), original_chunk_type(&sub));
                    chunks.push(Chunk::new(sub.content, md));
                }
            }
        }

        chunks
    }
}
