use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_VERSION_URL: &str =
    "https://raw.githubusercontent.com/KornineQ/KInstaller/master/ver.txt";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 未在命令行指定语言时使用
    pub language: String,
    pub package_manager: String,
    /// AUR 助手，"auto" 表示按 yay → paru 顺序检测
    pub aur_helper: String,
    pub use_sudo: bool,
    pub command_timeout_secs: u64,
    pub check_version: bool,
    pub version_url: String,
    pub version_timeout_secs: u64,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: crate::i18n::DEFAULT_LANGUAGE.to_string(),
            package_manager: "pacman".to_string(),
            aur_helper: "yay".to_string(),
            use_sudo: true,
            command_timeout_secs: 120,
            check_version: true,
            version_url: DEFAULT_VERSION_URL.to_string(),
            version_timeout_secs: 10,
            color: true,
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".config/kinstaller/config.toml")
    }

    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::path();

        if config_path.exists() {
            log::debug!("读取配置文件 {}", config_path.display());
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            Self::parse(&content)
                .with_context(|| format!("invalid config file {}", config_path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    pub fn version_timeout(&self) -> Duration {
        Duration::from_secs(self.version_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.language, "pl");
        assert_eq!(config.package_manager, "pacman");
        assert_eq!(config.aur_helper, "yay");
        assert!(config.use_sudo);
        assert_eq!(config.command_timeout(), Duration::from_secs(120));
        assert_eq!(config.version_url, DEFAULT_VERSION_URL);
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let config = Config::parse(
            r#"
language = "en"
aur_helper = "auto"
command_timeout_secs = 30
"#,
        )
        .unwrap();
        assert_eq!(config.language, "en");
        assert_eq!(config.aur_helper, "auto");
        assert_eq!(config.command_timeout_secs, 30);
        assert!(config.check_version);
        assert_eq!(config.version_timeout_secs, 10);
    }

    #[test]
    fn wrong_type_is_an_error() {
        assert!(Config::parse("use_sudo = \"yes\"").is_err());
    }
}
