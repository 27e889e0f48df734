use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 配置文件名，默认放在程序同级目录
pub const CONFIG_FILE_NAME: &str = "filter_users.toml";

/// 应用程序配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 数据文件相关配置
    pub data: DataConfig,
    /// 日志相关配置
    pub logging: LoggingConfig,
}

/// 数据文件配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// 用户数据文件路径
    pub file: PathBuf,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 是否写调试日志
    pub enabled: bool,
    /// 日志文件所在目录
    pub directory: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("users.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: PathBuf::from("."),
        }
    }
}

impl Config {
    /// 配置文件存在时加载，否则使用默认配置（不创建文件）
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// 从文件加载配置
    pub fn load_from_file(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("cannot read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("cannot parse config file: {}", config_path.display()))?;

        Ok(config)
    }

    /// 获取配置文件的默认路径
    pub fn default_config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe()
            .context("cannot determine executable path")?;

        let exe_dir = exe_path.parent()
            .context("cannot determine executable directory")?;

        Ok(exe_dir.join(CONFIG_FILE_NAME))
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.data.file.as_os_str().is_empty() {
            anyhow::bail!("data.file must not be empty");
        }

        if self.logging.directory.as_os_str().is_empty() {
            anyhow::bail!("logging.directory must not be empty");
        }

        Ok(())
    }
}
