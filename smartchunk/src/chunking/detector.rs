use regex::Regex;

use crate::models::ContentType;

/// Heuristic content-type classification.
///
/// Checks run in a fixed order and the first match wins: HTML markers, then a
/// bracket-delimited JSON parse, then code language signatures, then text.
/// Detection is pure and deterministic; there is no error path.
pub struct ContentTypeDetector {
    html_re: Regex,
    code_res: Vec<Regex>,
}

impl Default for ContentTypeDetector {
    fn default() -> Self {
        let code_patterns = [
            // Python
            r"(?i)import\s+[\w.]+|from\s+[\w.]+\s+import",
            // JavaScript
            r"(?i)function\s+\w+\s*\(|const\s+\w+\s*=|let\s+\w+\s*=",
            // Java
            r"(?i)public\s+class|private\s+class|protected\s+class",
            // C/C++
            r#"(?i)#include\s*<|#include\s*""#,
            // Java package
            r"(?i)package\s+[\w.]+;",
            // C#
            r"(?i)using\s+[\w.]+;",
            // PHP
            r"(?i)<\?php",
        ];
        Self {
            html_re: Regex::new(r"(?i)<!DOCTYPE\s+html|<html|<body|<div|<p>|<head>")
                .expect("hardcoded html regex"),
            code_res: code_patterns
                .iter()
                .map(|p| Regex::new(p).expect("hardcoded code signature regex"))
                .collect(),
        }
    }
}

impl ContentTypeDetector {
    pub fn detect(&self, content: &str) -> ContentType {
        if self.html_re.is_match(content) {
            return ContentType::Html;
        }

        let trimmed = content.trim();
        let bracketed = (trimmed.starts_with('{') && trimmed.ends_with('}'))
            || (trimmed.starts_with('[') && trimmed.ends_with(']'));
        if bracketed && serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
            return ContentType::Json;
        }

        if self.code_res.iter().any(|re| re.is_match(content)) {
            return ContentType::Code;
        }

        ContentType::Text
    }
}
