//! 发现设置
//!
//! 从可选的配置文件和 `DISCOVERY__*` 环境变量加载

use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use discovery_common::{ConfigError, ConfigResult, NamingConvention};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// 预置过滤器设置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub implementing: Vec<String>,
    pub extending: Option<String>,
    pub using: Vec<String>,
    pub methods: Vec<String>,
    pub properties: Vec<String>,
}

impl FilterSettings {
    pub fn is_empty(&self) -> bool {
        self.implementing.is_empty()
            && self.extending.is_none()
            && self.using.is_empty()
            && self.methods.is_empty()
            && self.properties.is_empty()
    }
}

/// 类型发现设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    /// 项目根目录
    pub base_path: PathBuf,
    /// 应用源码目录（相对于项目根目录）
    pub app_dir: String,
    /// 是否递归扫描
    pub recursive: bool,
    /// 是否跟随符号链接
    pub follow_links: bool,
    /// 扫描目录（相对于应用源码目录），为空时扫描应用源码目录本身
    pub paths: Vec<String>,
    /// 命名约定
    pub naming: NamingConvention,
    /// 自动加载前缀 -> 目录
    pub autoload: IndexMap<String, Vec<PathBuf>>,
    /// 预置过滤器
    pub filters: FilterSettings,
    /// 日志设置
    pub logging: Option<LoggingSettings>,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            app_dir: "app".to_string(),
            recursive: true,
            follow_links: false,
            paths: Vec::new(),
            naming: NamingConvention::default(),
            autoload: IndexMap::new(),
            filters: FilterSettings::default(),
            logging: None,
        }
    }
}

/// 日志设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// 日志级别
    pub level: String,
    /// 是否使用 JSON 格式
    pub json_format: bool,
    /// 是否输出源文件和行号
    pub show_source_location: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            show_source_location: false,
        }
    }
}

impl LoggingSettings {
    /// 转换为日志配置
    pub fn to_logging_config(&self) -> ConfigResult<LoggingConfig> {
        let level = self
            .level
            .parse::<tracing::Level>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: e.to_string(),
            })?;

        Ok(LoggingConfig {
            level,
            json_format: self.json_format,
            show_source_location: self.show_source_location,
        })
    }
}

impl DiscoverySettings {
    /// 环境变量前缀
    pub const ENV_PREFIX: &'static str = "DISCOVERY";

    /// 加载设置
    ///
    /// 配置文件格式由扩展名决定（toml / json / yaml），环境变量覆盖文件中的值。
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            info!("加载发现设置文件: {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(Self::ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let settings: Self = builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| ConfigError::LoadError {
                source: Box::new(e),
            })?;

        settings.validate()?;
        Ok(settings)
    }

    /// 校验设置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.app_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "app_dir".to_string(),
                message: "不能为空".to_string(),
            });
        }
        if self.naming.source_extension.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "naming.source_extension".to_string(),
                message: "不能为空".to_string(),
            });
        }
        if self.naming.namespace_separator.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "naming.namespace_separator".to_string(),
                message: "不能为空".to_string(),
            });
        }
        Ok(())
    }
}
