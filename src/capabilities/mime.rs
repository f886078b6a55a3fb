//! MIME allow-list matching at the ingestion boundary

use std::path::Path;

use crate::config::IngestConfig;

/// Allow-list of MIME types, supporting `type/*` wildcards
#[derive(Clone, Debug)]
pub struct MimeFilter {
    patterns: Vec<String>,
}

impl MimeFilter {
    /// Build a filter from exact types and wildcards
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.as_ref().trim().to_ascii_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Build a filter from the ingestion config
    pub fn from_config(config: &IngestConfig) -> Self {
        Self::new(&config.accepted_mime_types)
    }

    /// Whether `mime_type` is on the allow-list
    ///
    /// Parameters such as `; charset=...` are ignored and comparison is case-insensitive.
    pub fn accepts(&self, mime_type: &str) -> bool {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let Some((top, _)) = essence.split_once('/') else {
            return false;
        };

        self.patterns.iter().any(|pattern| match pattern.strip_suffix("/*") {
            Some(pattern_top) => pattern_top == top,
            None => *pattern == essence,
        })
    }
}

impl Default for MimeFilter {
    fn default() -> Self {
        Self::from_config(&IngestConfig::default())
    }
}

/// Guess a MIME type from a file extension
pub fn guess_mime_type(path: &Path) -> Option<&'static str> {
    mime_guess::from_path(path).first_raw()
}
