use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use ingest_core::EditorFields;
use ingest_engine::ConversionConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {message}")]
    Config { path: PathBuf, message: String },
    #[error("failed to parse fields {path:?}: {source}")]
    Fields {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Loads a RON conversion config. No path, or a path that does not exist,
/// gives the defaults; a file that exists but does not parse is an error.
pub fn load_config(path: Option<&Path>) -> Result<ConversionConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(ConversionConfig::default());
    };
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            engine_info!("No config at {:?}, using defaults", path);
            return Ok(ConversionConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = ron::from_str(&content).map_err(|err| ConfigError::Config {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    engine_info!("Loaded conversion config from {:?}", path);
    Ok(config)
}

/// Loads the editor's current field values from JSON.
pub fn load_fields(path: &Path) -> Result<EditorFields, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Fields {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use ingest_engine::ConversionConfig;

    use super::{load_config, load_fields, ConfigError};

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("absent.ron"))).unwrap();
        assert_eq!(config, ConversionConfig::default());
        assert_eq!(load_config(None).unwrap(), ConversionConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ingest.ron");
        fs::write(
            &path,
            "(classifier: (min_length: 20), output: (escape_text: false))",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.classifier.min_length, 20);
        assert_eq!(config.classifier.min_tag_count, 10);
        assert!(!config.output.escape_text);
        assert!(config.output.sanitize_urls);
        assert_eq!(config.limits, ConversionConfig::default().limits);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        fs::write(&path, "(classifier: ").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Config { .. }));
    }

    #[test]
    fn fields_load_with_missing_keys_defaulted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fields.json");
        fs::write(&path, r#"{ "title": "Mine", "slug": "" }"#).unwrap();

        let fields = load_fields(&path).unwrap();

        assert_eq!(fields.title, "Mine");
        assert_eq!(fields.slug.as_deref(), Some(""));
        assert!(fields.tags.is_empty());
    }
}
