use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Ordered chunk metadata. Key order follows insertion order so that stored
/// metadata round-trips in a stable shape (`serde_json` with `preserve_order`).
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Content category driving splitter selection.
///
/// Parsing never fails: any unrecognized label is treated as plain text, which
/// is also how the dispatcher routes unknown types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    Html,
    Json,
    Code,
    #[default]
    Text,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::Json => write!(f, "json"),
            Self::Code => write!(f, "code"),
            Self::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "html" => Self::Html,
            "json" => Self::Json,
            "code" => Self::Code,
            _ => Self::Text,
        })
    }
}

impl Serialize for ContentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(Self::Text))
    }
}
