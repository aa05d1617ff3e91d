//! Configuration file loading.

use crate::config::decode::{Strictness, decode_document};
use crate::config::overrides::apply_overrides;
use crate::config::types::RootConfig;
use crate::config::validate::validate_config;
use crate::error::{Error, Result};
use std::path::Path;

/// Load and validate a configuration from a TOML file.
pub fn load_config_file(path: &Path, strictness: Strictness) -> Result<RootConfig> {
    load_config_file_with(path, strictness, &[])
}

/// Load a configuration file, merge `key=value` overrides, then validate.
pub fn load_config_file_with(
    path: &Path,
    strictness: Strictness,
    overrides: &[String],
) -> Result<RootConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_config_str_with(&contents, strictness, overrides)
}

/// Load and validate a configuration from TOML text.
pub fn load_config_str(text: &str, strictness: Strictness) -> Result<RootConfig> {
    load_config_str_with(text, strictness, &[])
}

fn load_config_str_with(
    text: &str,
    strictness: Strictness,
    overrides: &[String],
) -> Result<RootConfig> {
    let mut doc = text
        .parse::<toml::Table>()
        .map_err(|e| Error::ConfigParse { source: e })?;
    apply_overrides(&mut doc, overrides)?;
    let config = decode_document(&doc, strictness)?;
    validate_config(&config)?;
    Ok(config)
}

/// Save a configuration to a TOML file.
pub fn save_config(config: &RootConfig, path: &Path) -> Result<()> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents = to_toml_string(config)?;

    std::fs::write(path, contents).map_err(|e| Error::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Render a configuration as pretty-printed TOML.
pub fn to_toml_string(config: &RootConfig) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize { source: e })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::config::test_support::valid_document;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_nonexistent_file_is_read_error() {
        let path = Path::new("/nonexistent/path/config.toml");
        let result = load_config_file(path, Strictness::Lenient);
        assert!(matches!(result.unwrap_err(), Error::ConfigRead { .. }));
    }

    #[test]
    fn test_load_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", valid_document()).unwrap();

        let config = load_config_file(file.path(), Strictness::Strict).unwrap();
        assert_eq!(config.train.epochs, 100);
        assert_eq!(config.test.log_frequency, 50);
    }

    #[test]
    fn test_load_invalid_toml_returns_parse_error() {
        let result = load_config_str("this is not valid toml {{", Strictness::Lenient);
        assert!(matches!(result.unwrap_err(), Error::ConfigParse { .. }));
    }

    #[test]
    fn test_loading_twice_yields_equal_configs() {
        let text = valid_document();
        let first = load_config_str(&text, Strictness::Strict).unwrap();
        let second = load_config_str(&text, Strictness::Strict).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_save_then_reload_round_trips() {
        let config = load_config_str(&valid_document(), Strictness::Strict).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved").join("config.toml");

        save_config(&config, &path).unwrap();
        let reloaded = load_config_file(&path, Strictness::Strict).unwrap();
        assert_eq!(config, reloaded);
    }

    #[test]
    fn test_overrides_merge_before_validation() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", valid_document()).unwrap();

        let config = load_config_file_with(
            file.path(),
            Strictness::Strict,
            &["train.epochs=200".to_string()],
        )
        .unwrap();
        assert_eq!(config.train.epochs, 200);

        let err = load_config_file_with(
            file.path(),
            Strictness::Strict,
            &["train.momentum=2.0".to_string()],
        )
        .unwrap_err();
        assert!(matches!(&err, Error::Range { path, .. } if path == "train.momentum"));
    }

    #[test]
    fn test_out_of_range_value_fails_validation() {
        let text = valid_document().replace("lr_step_gamma = 0.3", "lr_step_gamma = 1.5");
        let err = load_config_str(&text, Strictness::Lenient).unwrap_err();
        assert!(matches!(
            &err,
            Error::Range { path, .. } if path == "train.lr_step_gamma"
        ));
    }
}
