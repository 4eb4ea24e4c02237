//! 日志配置

use discovery_common::{ConfigError, ConfigResult};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// 未设置 `RUST_LOG` 时的日志级别
    pub level: tracing::Level,
    /// 是否使用 JSON 格式
    pub json_format: bool,
    /// 是否输出源文件和行号
    pub show_source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            json_format: false,
            show_source_location: false,
        }
    }
}

impl LoggingConfig {
    /// 开发环境：输出每个文件的解析和跳过记录
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            json_format: false,
            show_source_location: true,
        }
    }

    /// 生产环境：只输出发现汇总
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            json_format: true,
            show_source_location: false,
        }
    }

    /// 初始化全局日志订阅者
    ///
    /// `RUST_LOG` 存在时优先于配置的级别。已初始化过时返回错误。
    pub fn init(&self) -> ConfigResult<()> {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(self.level).into())
            .from_env_lossy();

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_file(self.show_source_location)
            .with_line_number(self.show_source_location);

        if self.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| ConfigError::LoggingInitFailed {
            message: e.to_string(),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    }
}
