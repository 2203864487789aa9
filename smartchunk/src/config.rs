use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub processing: ProcessingConfig,
    pub search: SearchConfig,
}

/// Chunk sizing applied when a document does not carry its own sizes.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

/// Defaults applied to search requests that omit tuning fields.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub n_results: usize,
    pub threshold: f32,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            n_results: 5,
            threshold: 0.2,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            processing: ProcessingConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            processing: ProcessingConfig {
                chunk_size: parse_env_or("CHUNK_SIZE", 1000),
                chunk_overlap: parse_env_or("CHUNK_OVERLAP", 200),
            },
            search: SearchConfig {
                n_results: parse_env_or("SEARCH_RESULTS", 5),
                threshold: parse_env_or("SIMILARITY_THRESHOLD", 0.2),
            },
        }
    }
}
