mod init;
mod schema;

pub use init::run_init_wizard;
pub use schema::{
    Config, Profile, ProfileConfig, ScoresConfig, ValuationConfig, WeightsConfig,
};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/airval/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("airval")
}

/// Get the default config file path (~/.config/airval/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Ensure the config directory exists
pub fn ensure_config_dir() -> Result<()> {
    let config_dir = get_config_dir();
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir).with_context(|| {
            format!(
                "Failed to create config directory at {}",
                config_dir.display()
            )
        })?;
    }
    Ok(())
}

/// Load configuration from a YAML file.
///
/// With an explicit `path`, the file must exist. With `None`, a missing
/// file at the default path (~/.config/airval/config.yaml) is not an
/// error: the tool runs with built-in defaults until `airval init` writes
/// one.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let (config_path, explicit) = match path {
        Some(p) => (p, true),
        None => (get_config_path(), false),
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_missing_path_is_error() {
        let path = std::env::temp_dir().join("airval_test_nonexistent.yaml");
        let _ = fs::remove_file(&path);
        assert!(load_config(Some(path)).is_err());
    }

    #[test]
    fn test_explicit_path_loads() {
        let path = std::env::temp_dir().join("airval_test_config.yaml");
        fs::write(&path, "scores:\n  visible: 42\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        let scores = config.scores.unwrap_or_default().resolve();
        assert_eq!(scores.visible, 42.0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let path = std::env::temp_dir().join("airval_test_bad.yaml");
        fs::write(&path, "scores: [not, a, mapping\n").unwrap();
        assert!(load_config(Some(path.clone())).is_err());
        let _ = fs::remove_file(&path);
    }
}
