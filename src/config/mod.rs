use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../../config.example.toml");

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub copy: CopyConfig,
    pub notify: NotifyConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    pub clobber: bool,
    pub trash_clobbered: bool,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            clobber: true,
            trash_clobbered: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NotifyConfig {
    pub macos_notify: bool,
}

impl Config {
    /// 設定ファイルを読み込み、実行時の挙動設定を構築する。
    ///
    /// # 判定ルール
    /// 1. `POSTCP_TEST_MODE=1` かつ `POSTCP_DISABLE_TEST_MODE` 未指定なら
    ///    ディスクに触れずデフォルト設定を返す
    /// 2. それ以外は `POSTCP_CONFIG_PATH` または `~/.config/postcp/config.toml` を使用
    /// 3. 設定ファイルが存在しない場合はデフォルト設定を作成
    pub fn load() -> Result<Self, String> {
        if Self::is_explicit_test_mode_enabled() {
            return Ok(Self::default());
        }

        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))?;
        config.validate()?;

        Ok(config)
    }

    /// 明示指定されたテストモードの有効化可否を判定する。
    ///
    /// `CARGO_*` の自動推測は行わず、`POSTCP_TEST_MODE=1` のみを受け付ける。
    fn is_explicit_test_mode_enabled() -> bool {
        if std::env::var("POSTCP_DISABLE_TEST_MODE").is_ok() {
            return false;
        }

        matches!(std::env::var("POSTCP_TEST_MODE").as_deref(), Ok("1"))
    }

    /// 読み込んだ設定値の整合性を検証する。
    fn validate(&self) -> Result<(), String> {
        if self.copy.trash_clobbered && !self.copy.clobber {
            return Err(
                "Invalid config: copy.trash_clobbered requires copy.clobber = true".to_string(),
            );
        }

        Ok(())
    }

    /// Determines the path to the configuration file.
    ///
    /// # Priority
    /// 1. POSTCP_CONFIG_PATH environment variable (for testing and custom setups)
    /// 2. ~/.config/postcp/config.toml (default location)
    fn config_path() -> Result<PathBuf, String> {
        if let Ok(path) = std::env::var("POSTCP_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let home_dir =
            dirs::home_dir().ok_or_else(|| "Could not determine home directory".to_string())?;

        let config_dir = home_dir.join(".config").join("postcp");

        Ok(config_dir.join("config.toml"))
    }

    /// デフォルト設定ファイルを作成する。
    fn create_default_config(config_path: &Path) -> Result<(), String> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {e}"))?;
        }

        fs::write(config_path, DEFAULT_CONFIG_TEMPLATE)
            .map_err(|e| format!("Failed to write default config: {e}"))
    }
}
