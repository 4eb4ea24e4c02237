//! 错误类型定义

use crate::metadata::TypeKind;
use std::path::PathBuf;
use thiserror::Error;

/// 类型发现错误类型
///
/// 这是发现流程唯一向调用方暴露的错误。
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("目录 [{path}] 中的文件未注册到类型自动加载")]
    UntrustedPath { path: String },
}

impl DiscoveryError {
    /// 创建不受信任路径错误
    pub fn untrusted_path(path: impl Into<String>) -> Self {
        Self::UntrustedPath { path: path.into() }
    }
}

/// 类型解析失败
///
/// 由反射提供者产生，在类型解析层被吸收，不会向调用方传播。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionFailure {
    #[error("类型不存在: {name}")]
    NotFound { name: String },

    #[error("类型 {name} 依赖的 {dependency} 未声明")]
    MissingDependency { name: String, dependency: String },

    #[error("类型 {name} 的声明无效: {message}")]
    InvalidDeclaration { name: String, message: String },

    #[error("类型 {name} 的继承链存在循环: {chain}")]
    CyclicDeclaration { name: String, chain: String },
}

impl ResolutionFailure {
    /// 创建类型不存在错误
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// 创建依赖缺失错误
    pub fn missing_dependency(name: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self::MissingDependency {
            name: name.into(),
            dependency: dependency.into(),
        }
    }

    /// 创建声明无效错误
    pub fn invalid_declaration(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDeclaration {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// 文件被跳过的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("文件不在项目根目录下: {path}")]
    OutsideBasePath { path: PathBuf },

    #[error("无法从文件推导类型名称: {path}")]
    NoTypeName { path: PathBuf },

    #[error("类型解析失败: {source}")]
    Unresolvable {
        #[from]
        source: ResolutionFailure,
    },

    #[error("类型 {name} 不可实例化 ({kind})")]
    NotInstantiable { name: String, kind: TypeKind },
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置加载失败: {source}")]
    LoadError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("类型清单解析失败: {source}")]
    ManifestError {
        #[from]
        source: serde_json::Error,
    },

    #[error("配置值无效: {key}, 原因: {message}")]
    InvalidValue { key: String, message: String },

    #[error("日志初始化失败: {message}")]
    LoggingInitFailed { message: String },
}

/// 结果类型别名
pub type DiscoveryResultOf<T> = Result<T, DiscoveryError>;
pub type ResolutionResult<T> = Result<T, ResolutionFailure>;
pub type ConfigResult<T> = Result<T, ConfigError>;
