//! Configuration types for augment-uploader

use crate::error::{Error, Result};
use crate::types::NumImages;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Augmentation service connection settings
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Endpoint receiving the multipart POST (default: "http://localhost:8000/augment")
    #[serde(default = "default_endpoint")]
    pub endpoint: Url,

    /// Request timeout covering upload and response body (default: 300 seconds)
    ///
    /// Augmentation of large sets is slow on the service side, so this is
    /// deliberately generous.
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout: default_request_timeout(),
        }
    }
}

/// Ingestion boundary settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IngestConfig {
    /// MIME allow-list applied before files reach the collection
    ///
    /// Entries are exact types (`image/png`) or wildcards (`image/*`).
    #[serde(default = "default_accepted_mime_types")]
    pub accepted_mime_types: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            accepted_mime_types: default_accepted_mime_types(),
        }
    }
}

/// Result download settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// File name the archive is offered under (default: "augmented_data.zip")
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Initial value of the `num_images` field (default: 1)
    #[serde(default = "default_num_images")]
    pub default_num_images: u32,

    /// Directory used by [`DirectoryBlobPublisher`](crate::capabilities::DirectoryBlobPublisher)
    /// (default: "./downloads")
    #[serde(default = "default_archive_dir")]
    pub archive_dir: PathBuf,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            default_num_images: default_num_images(),
            archive_dir: default_archive_dir(),
        }
    }
}

/// Main configuration for an [`AugmentController`](crate::AugmentController)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Augmentation service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Ingestion boundary settings
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Result download settings
    #[serde(default)]
    pub download: DownloadConfig,
}

impl Config {
    /// Parse a configuration from JSON, filling missing fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check settings that serde cannot enforce on its own
    pub fn validate(&self) -> Result<()> {
        if self.download.file_name.trim().is_empty() {
            return Err(Error::Config {
                message: "download file name must not be empty".to_string(),
                key: Some("download.file_name".to_string()),
            });
        }

        if !is_plain_file_name(&self.download.file_name) {
            return Err(Error::Config {
                message: format!(
                    "download file name must be a bare file name, got '{}'",
                    self.download.file_name
                ),
                key: Some("download.file_name".to_string()),
            });
        }

        if self.ingest.accepted_mime_types.is_empty() {
            return Err(Error::Config {
                message: "at least one accepted MIME type is required".to_string(),
                key: Some("ingest.accepted_mime_types".to_string()),
            });
        }

        NumImages::new(self.download.default_num_images).map_err(|_| Error::Config {
            message: format!(
                "default_num_images must be between {} and {}, got {}",
                NumImages::MIN,
                NumImages::MAX,
                self.download.default_num_images
            ),
            key: Some("download.default_num_images".to_string()),
        })?;

        Ok(())
    }

    /// Initial `num_images` value as a validated [`NumImages`]
    pub fn initial_num_images(&self) -> NumImages {
        NumImages::new(self.download.default_num_images).unwrap_or_default()
    }
}

#[allow(clippy::expect_used)]
fn default_endpoint() -> Url {
    Url::parse("http://localhost:8000/augment").expect("static endpoint URL is valid")
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(300)
}

fn default_accepted_mime_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "image/*".to_string(),
    ]
}

fn default_file_name() -> String {
    "augmented_data.zip".to_string()
}

fn default_num_images() -> u32 {
    1
}

fn default_archive_dir() -> PathBuf {
    PathBuf::from("./downloads")
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Whether `name` is exactly one normal path component
///
/// Rejects separators, `.`/`..`, roots and drive prefixes.
pub(crate) fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_contract() {
        let config = Config::default();
        assert_eq!(config.download.file_name, "augmented_data.zip");
        assert_eq!(
            config.ingest.accepted_mime_types,
            vec!["image/jpeg", "image/png", "image/*"]
        );
        assert_eq!(config.service.endpoint.as_str(), "http://localhost:8000/augment");
        assert_eq!(config.service.timeout, Duration::from_secs(300));
        assert_eq!(config.initial_num_images().get(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = Config::from_json_str(
            r#"{ "service": { "endpoint": "https://augment.example.com/api/augment", "timeout": 30 } }"#,
        )
        .unwrap();

        assert_eq!(
            config.service.endpoint.as_str(),
            "https://augment.example.com/api/augment"
        );
        assert_eq!(config.service.timeout, Duration::from_secs(30));
        assert_eq!(config.download.file_name, "augmented_data.zip");
    }

    #[test]
    fn file_name_with_path_components_is_rejected() {
        for name in ["../augmented_data.zip", "nested/augmented_data.zip", "/tmp/out.zip", ".."] {
            let mut config = Config::default();
            config.download.file_name = name.to_string();
            match config.validate() {
                Err(Error::Config { key, .. }) => {
                    assert_eq!(key.as_deref(), Some("download.file_name"), "{name}")
                }
                other => panic!("expected config error for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn plain_file_names() {
        assert!(is_plain_file_name("augmented_data.zip"));
        assert!(is_plain_file_name("result set.zip"));
        assert!(!is_plain_file_name("."));
        assert!(!is_plain_file_name("a/b.zip"));
        assert!(!is_plain_file_name(""));
    }

    #[test]
    fn empty_file_name_is_rejected() {
        let result = Config::from_json_str(r#"{ "download": { "file_name": "  " } }"#);
        match result {
            Err(Error::Config { key, .. }) => {
                assert_eq!(key.as_deref(), Some("download.file_name"))
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_default_num_images_is_rejected() {
        let result = Config::from_json_str(r#"{ "download": { "default_num_images": 101 } }"#);
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn empty_mime_list_is_rejected() {
        let result = Config::from_json_str(r#"{ "ingest": { "accepted_mime_types": [] } }"#);
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn config_survives_json_round_trip() {
        let mut original = Config::default();
        original.download.default_num_images = 12;
        original.service.timeout = Duration::from_secs(42);

        let json = serde_json::to_string(&original).expect("Config must serialize to JSON");
        let restored = Config::from_json_str(&json).expect("Config must parse its own JSON");

        assert_eq!(restored.download.default_num_images, 12);
        assert_eq!(restored.service.timeout, Duration::from_secs(42));
        assert_eq!(restored.service.endpoint, original.service.endpoint);
    }

    #[test]
    fn from_file_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "download": { "default_num_images": 5 } }"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.initial_num_images().get(), 5);
    }
}
