use regex::Regex;

use crate::models::{Chunk, ContentType};

use super::text::width;
use super::{metadata, ChunkParams, Splitter};

/// Splitter for source code.
///
/// This is a pattern heuristic, not a parser. Function/class declarations and
/// per-line brace balance feed a single nesting counter, so a block is
/// considered closed when the counter drops to zero or the last line is
/// reached while inside a block. Braceless languages (Python) rely entirely on
/// the declaration patterns plus the last-line fallback; indentation depth is
/// not tracked, so blocks there can close early or late. Import lines are
/// collected for the whole document and prepended to every emitted chunk.
pub struct CodeSplitter {
    language_sigs: Vec<(Regex, &'static str)>,
    import_re: Regex,
    function_re: Regex,
    class_re: Regex,
}

impl Default for CodeSplitter {
    fn default() -> Self {
        let sigs: [(&str, &'static str); 8] = [
            (r"(?i)import\s+[\w.]+|from\s+[\w.]+\s+import", "python"),
            (
                r"(?i)function\s+\w+\s*\(|const\s+\w+\s*=|let\s+\w+\s*=|var\s+\w+\s*=",
                "javascript",
            ),
            (r"(?i)public\s+class|private\s+class|protected\s+class", "java"),
            (r#"(?i)#include\s*<|#include\s*""#, "c/c++"),
            (r"(?i)package\s+[\w.]+;", "java"),
            (r"(?i)using\s+[\w.]+;", "c#"),
            (r"(?i)<!DOCTYPE\s+html|<html", "html"),
            (r"(?i)<\?php", "php"),
        ];
        Self {
            language_sigs: sigs
                .iter()
                .map(|(p, lang)| {
                    (
                        Regex::new(p).expect("hardcoded language signature regex"),
                        *lang,
                    )
                })
                .collect(),
            import_re: Regex::new(r"^\s*(?:import|from|#include|using)\s")
                .expect("hardcoded import regex"),
            function_re: Regex::new(r"^\s*(?:def|function|public|private|protected)\s+\w+\s*\(")
                .expect("hardcoded function regex"),
            class_re: Regex::new(r"^\s*class\s+\w+").expect("hardcoded class regex"),
        }
    }
}

impl CodeSplitter {
    /// First matching signature wins; `unknown` when nothing matches.
    pub fn detect_language(&self, content: &str) -> &'static str {
        self.language_sigs
            .iter()
            .find(|(re, _)| re.is_match(content))
            .map(|(_, lang)| *lang)
            .unwrap_or("unknown")
    }
}

fn push_code_chunk(
    chunks: &mut Vec<Chunk>,
    imports: &[&str],
    body: &[&str],
    language: &str,
) {
    let content = imports
        .iter()
        .chain(body.iter())
        .copied()
        .collect::<Vec<_>>()
        .join("\n");
    let mut md = metadata::base(ContentType::Code);
    md.insert(
        "language".to_string(),
        serde_json::Value::String(language.to_string()),
    );
    metadata::stamp(&mut md, chunks.len());
    chunks.push(Chunk::new(content, md));
}

impl Splitter for CodeSplitter {
    /// `chunk_overlap` is accepted but unused; code chunks never overlap.
    fn split(&self, content: &str, params: &ChunkParams) -> Vec<Chunk> {
        if content.is_empty() {
            return Vec::new();
        }

        let language = self.detect_language(content);
        let lines: Vec<&str> = content.split('\n').collect();
        let last = lines.len() - 1;

        let mut chunks = Vec::new();
        let mut imports: Vec<&str> = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_size = 0;
        let mut depth: i64 = 0;
        let mut in_block = false;

        for (i, line) in lines.iter().enumerate() {
            if self.import_re.is_match(line) {
                imports.push(line);
                continue;
            }

            let starts_function = self.function_re.is_match(line);
            let starts_class = self.class_re.is_match(line);
            let opens = line.matches('{').count() as i64 - line.matches('}').count() as i64;

            if starts_function || starts_class {
                in_block = true;
                depth += 1;
            }
            depth += opens;

            // The block closes before the closing line is appended, so a
            // trailing brace opens the next chunk.
            if in_block && (depth <= 0 || i == last) {
                in_block = false;
                depth = 0;
                if !current.is_empty() {
                    push_code_chunk(&mut chunks, &imports, &current, language);
                    current.clear();
                    current_size = 0;
                }
            }

            current.push(line);
            current_size += width(line) + 1;

            if current_size > params.chunk_size && !in_block {
                push_code_chunk(&mut chunks, &imports, &current, language);
                current.clear();
                current_size = 0;
            }
        }

        if !current.is_empty() {
            push_code_chunk(&mut chunks, &imports, &current, language);
        }

        chunks
    }
}
