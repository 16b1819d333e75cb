use crate::error::SortOrderError;
use crate::template::validate_template;
use crate::DEFAULT_FILENAME_TEMPLATE;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the first sequence number.
pub const SEQUENCE_START_ENV: &str = "ALBUM_SEQUENCE_START";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sequence_start: u64,
    pub filename_template: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sequence_start: 0,
            filename_template: DEFAULT_FILENAME_TEMPLATE.to_string(),
        }
    }
}

impl AppConfig {
    /// Sequence start to use right now: the environment value when set,
    /// otherwise the configured one. Read on every call.
    pub fn sequence_start(&self) -> std::result::Result<u64, SortOrderError> {
        let raw = std::env::var(SEQUENCE_START_ENV).ok();
        self.sequence_start_with(raw.as_deref())
    }

    /// Resolves the sequence start against an already looked-up environment value.
    pub fn sequence_start_with(
        &self,
        env_value: Option<&str>,
    ) -> std::result::Result<u64, SortOrderError> {
        match env_value {
            Some(raw) => parse_sequence_start(Some(raw)),
            None => Ok(self.sequence_start),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_path: PathBuf,
}

/// Parses the sequence start setting. Absent means 0.
pub fn parse_sequence_start(raw: Option<&str>) -> std::result::Result<u64, SortOrderError> {
    let Some(raw) = raw else {
        return Ok(0);
    };
    raw.trim()
        .parse::<u64>()
        .map_err(|_| SortOrderError::MalformedOffset {
            value: raw.to_string(),
        })
}

/// Reads the sequence start from the environment, defaulting to 0.
pub fn sequence_start_from_env() -> std::result::Result<u64, SortOrderError> {
    let raw = std::env::var(SEQUENCE_START_ENV).ok();
    parse_sequence_start(raw.as_deref())
}

pub fn app_paths() -> Result<AppPaths> {
    let proj = ProjectDirs::from("com", "album-sort-order", "album-sort-order")
        .context("could not determine the OS config directory")?;
    let config_dir = proj.config_dir().to_path_buf();
    Ok(AppPaths {
        config_path: config_dir.join("config.toml"),
        config_dir,
    })
}

pub fn load_config() -> Result<AppConfig> {
    let paths = app_paths()?;
    load_config_from(&paths.config_path)
}

/// Loads the config at `path`, falling back to defaults when the file is
/// missing. The filename template is checked here so a broken template fails at
/// startup instead of on the first rendered photo.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config = toml::from_str::<AppConfig>(&raw)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    validate_template(&config.filename_template).with_context(|| {
        format!(
            "invalid filename_template {:?} in {}",
            config.filename_template,
            path.display()
        )
    })?;
    Ok(config)
}

pub fn save_config(config: &AppConfig) -> Result<()> {
    let paths = app_paths()?;
    fs::create_dir_all(&paths.config_dir).with_context(|| {
        format!(
            "failed to create config directory: {}",
            paths.config_dir.display()
        )
    })?;
    let body = toml::to_string_pretty(config).context("failed to serialize config")?;
    fs::write(&paths.config_path, body).with_context(|| {
        format!(
            "failed to write config file: {}",
            paths.config_path.display()
        )
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn absent_start_defaults_to_zero() {
        assert_eq!(parse_sequence_start(None).expect("must parse"), 0);
    }

    #[test]
    fn start_ignores_surrounding_whitespace() {
        assert_eq!(parse_sequence_start(Some(" 5\n")).expect("must parse"), 5);
    }

    #[test]
    fn malformed_start_is_rejected() {
        for raw in ["", "one", "1.5", "-1"] {
            let err = parse_sequence_start(Some(raw)).expect_err("must fail");
            assert!(matches!(err, SortOrderError::MalformedOffset { ref value } if value == raw));
        }
    }

    #[test]
    fn partial_config_file_keeps_defaults() {
        let config: AppConfig = toml::from_str("sequence_start = 1").expect("must parse");
        assert_eq!(config.sequence_start, 1);
        assert_eq!(config.filename_template, DEFAULT_FILENAME_TEMPLATE);
    }

    #[test]
    fn config_start_used_when_env_unset() {
        let config = AppConfig {
            sequence_start: 4,
            ..AppConfig::default()
        };
        assert_eq!(config.sequence_start_with(None).expect("must resolve"), 4);
    }

    #[test]
    fn env_start_overrides_config() {
        let config = AppConfig {
            sequence_start: 4,
            ..AppConfig::default()
        };
        assert_eq!(config.sequence_start_with(Some("1")).expect("must resolve"), 1);
        assert_eq!(config.sequence_start_with(Some("0")).expect("must resolve"), 0);
    }

    #[test]
    fn malformed_env_start_fails_despite_valid_config() {
        let config = AppConfig {
            sequence_start: 4,
            ..AppConfig::default()
        };
        let err = config
            .sequence_start_with(Some("four"))
            .expect_err("must fail");
        assert!(matches!(err, SortOrderError::MalformedOffset { .. }));
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let temp = tempdir().expect("tempdir");
        let config = load_config_from(&temp.path().join("config.toml")).expect("must load");
        assert_eq!(config.sequence_start, 0);
        assert_eq!(config.filename_template, DEFAULT_FILENAME_TEMPLATE);
    }

    #[test]
    fn config_file_values_are_loaded() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "sequence_start = 1\nfilename_template = \"{album}_{album_seq}_{orig_name}\"\n",
        )
        .expect("write config");
        let config = load_config_from(&path).expect("must load");
        assert_eq!(config.sequence_start, 1);
        assert_eq!(config.filename_template, "{album}_{album_seq}_{orig_name}");
    }

    #[test]
    fn config_file_with_bad_template_is_rejected() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "filename_template = \"{album_seq\"\n").expect("write config");
        let err = load_config_from(&path).expect_err("must fail");
        assert!(err.to_string().contains("invalid filename_template"));
    }
}
