use std::path::{Path, PathBuf};

use keepsake_core::VaultConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct KeepsakeConfig {
    #[serde(default)]
    pub vault: VaultConfig,
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn read_config(path: &Path) -> anyhow::Result<KeepsakeConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    let config: KeepsakeConfig = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))?;
    config
        .vault
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))?;
    Ok(config)
}

pub fn render_config(config: &KeepsakeConfig) -> anyhow::Result<String> {
    toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("keepsake"));
        }
    }
    Ok(home_dir()?.join(".config").join("keepsake"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_partial_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[vault]\nthreshold_attempts = 5\n").unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.vault.threshold_attempts, 5);
        assert_eq!(config.vault.kdf_iterations, 390_000);
        assert_eq!(config.vault.salt_length, 16);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.vault, VaultConfig::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[vault]\nkdf_iterations = 1000\n").unwrap();

        let err = read_config(&path).unwrap_err();
        assert!(err.to_string().contains("kdf_iterations"));
    }

    #[test]
    fn test_render_round_trips() {
        let rendered = render_config(&KeepsakeConfig::default()).unwrap();
        assert!(rendered.contains("[vault]"));
        assert!(rendered.contains("kdf_iterations = 390000"));

        let parsed: KeepsakeConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.vault, VaultConfig::default());
    }
}
