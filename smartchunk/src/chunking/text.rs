use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::models::{Chunk, ContentType};

use super::{metadata, ChunkParams, Splitter};

/// Splitter for plain text.
///
/// Works through three levels, each engaged only when the unit above is too
/// large: blank-line paragraphs are packed greedily, an oversized paragraph is
/// re-split by sentence boundary, and an oversized single sentence is sliced
/// into fixed character windows advancing by `chunk_size - chunk_overlap`.
pub struct TextSplitter {
    paragraph_re: Regex,
    sentence_re: Regex,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self {
            paragraph_re: Regex::new(r"\n\s*\n").expect("hardcoded paragraph regex"),
            sentence_re: Regex::new(r"[.!?]\s+").expect("hardcoded sentence regex"),
        }
    }
}

/// Grapheme-cluster length; the unit of all size accounting.
pub(crate) fn width(text: &str) -> usize {
    text.graphemes(true).count()
}

fn push_chunk(chunks: &mut Vec<Chunk>, content: &str) {
    let mut md = metadata::base(ContentType::Text);
    metadata::stamp(&mut md, chunks.len());
    chunks.push(Chunk::new(content, md));
}

fn flush(chunks: &mut Vec<Chunk>, current: &mut String) {
    if !current.is_empty() {
        push_chunk(chunks, current);
        current.clear();
    }
}

impl TextSplitter {
    /// Split after `.`, `!`, or `?` followed by whitespace; the terminator
    /// stays with its sentence, the whitespace run is dropped.
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut last = 0;
        for m in self.sentence_re.find_iter(text) {
            // The terminator is a single ASCII byte.
            let end = m.start() + 1;
            out.push(&text[last..end]);
            last = m.end();
        }
        if last < text.len() {
            out.push(&text[last..]);
        }
        out
    }

    fn split_oversized_paragraph(
        &self,
        paragraph: &str,
        params: &ChunkParams,
        chunks: &mut Vec<Chunk>,
    ) {
        let mut current = String::new();
        for sentence in self.sentences(paragraph) {
            let sep = usize::from(!current.is_empty());
            if width(&current) + sep + width(sentence) <= params.chunk_size {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(sentence);
            } else {
                flush(chunks, &mut current);
                if width(sentence) > params.chunk_size {
                    slice_windows(sentence, params, chunks);
                } else {
                    current.push_str(sentence);
                }
            }
        }
        flush(chunks, &mut current);
    }
}

/// Fixed-window slicing for a single indivisible unit longer than the budget.
/// Windows never split a grapheme cluster.
fn slice_windows(sentence: &str, params: &ChunkParams, chunks: &mut Vec<Chunk>) {
    let graphemes: Vec<(usize, &str)> = sentence.grapheme_indices(true).collect();
    let stride = params.stride();
    let mut start = 0;
    while start < graphemes.len() {
        let end = (start + params.chunk_size).min(graphemes.len());
        let byte_start = graphemes[start].0;
        let byte_end = if end == graphemes.len() {
            sentence.len()
        } else {
            graphemes[end].0
        };
        push_chunk(chunks, &sentence[byte_start..byte_end]);
        start += stride;
    }
}

impl Splitter for TextSplitter {
    fn split(&self, content: &str, params: &ChunkParams) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for paragraph in self.paragraph_re.split(content) {
            let paragraph = paragraph.trim();
            if paragraph.is_empty() {
                continue;
            }

            let sep = if current.is_empty() { 0 } else { 2 };
            if width(&current) + sep + width(paragraph) <= params.chunk_size {
                if !current.is_empty() {
                    current.push_str("\n\n");
                }
                current.push_str(paragraph);
            } else {
                flush(&mut chunks, &mut current);
                if width(paragraph) > params.chunk_size {
                    self.split_oversized_paragraph(paragraph, params, &mut chunks);
                } else {
                    current.push_str(paragraph);
                }
            }
        }

        flush(&mut chunks, &mut current);
        chunks
    }
}
