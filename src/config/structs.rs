use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, UaDetectorError};

/// 检测器配置
///
/// 覆盖数据源、刷新周期、超时、本地缓存与解析缓存。
/// 所有字段都有内置默认值。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Remote rule file URL.
    #[serde(default = "default_data_url")]
    pub data_url: String,
    /// Remote version sentinel URL; a single line compared for equality.
    /// Empty disables the sentinel check and every refresh downloads the
    /// full rule file.
    #[serde(default = "default_version_url")]
    pub version_url: String,
    /// Background refresh period in seconds; `0` disables the task.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
    /// Directory for `uas.json` / `uas.version` cache files.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
    /// Parse memoization entries; `0` disables the cache.
    #[serde(default = "default_parser_cache_size")]
    pub parser_cache_size: u64,
}

fn default_data_url() -> String {
    "https://uadata.esaps.net/uas.json".to_string()
}

fn default_version_url() -> String {
    "https://uadata.esaps.net/uas.version".to_string()
}

fn default_refresh_interval_secs() -> u64 {
    // 24 小时
    86_400
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_read_timeout_secs() -> u64 {
    30
}

fn default_cache_dir() -> String {
    ".uadetector".to_string()
}

fn default_parser_cache_size() -> u64 {
    1_000
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            data_url: default_data_url(),
            version_url: default_version_url(),
            refresh_interval_secs: default_refresh_interval_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
            cache_dir: default_cache_dir(),
            parser_cache_size: default_parser_cache_size(),
        }
    }
}

impl DetectorConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > uadetector.toml > 默认值
    /// ENV 前缀：UAD，分隔符：__
    /// 示例：UAD__DATA_URL=https://example.com/uas.json
    pub fn load() -> Self {
        use config::{Config, Environment, File};

        let path = "uadetector.toml";

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("UAD")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<DetectorConfig>() {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// Reject configurations the store cannot operate with.
    pub fn validate(&self) -> Result<()> {
        if self.data_url.trim().is_empty() {
            return Err(UaDetectorError::invalid_argument(
                "data_url must not be empty",
            ));
        }
        if self.cache_dir.trim().is_empty() {
            return Err(UaDetectorError::invalid_argument(
                "cache_dir must not be empty",
            ));
        }
        Ok(())
    }

    /// 生成示例 TOML 配置
    pub fn sample_toml() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DetectorConfig::default();
        assert_eq!(config.refresh_interval_secs, 86_400);
        assert_eq!(config.connect_timeout_secs, 30);
        assert_eq!(config.read_timeout_secs, 30);
        assert_eq!(config.parser_cache_size, 1_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_data_url_rejected() {
        let config = DetectorConfig {
            data_url: "".to_string(),
            ..DetectorConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), "E001");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: DetectorConfig =
            toml::from_str("data_url = \"https://example.com/uas.json\"").unwrap();
        assert_eq!(config.data_url, "https://example.com/uas.json");
        assert_eq!(config.refresh_interval_secs, 86_400);
        assert_eq!(config.cache_dir, ".uadetector");
    }

    #[test]
    fn test_sample_toml_round_trips() {
        let sample = DetectorConfig::sample_toml();
        let parsed: DetectorConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.data_url, DetectorConfig::default().data_url);
    }
}
