//! # Discovery Common
//!
//! 这个 crate 提供了 Lorn ADSP 类型发现引擎的公共数据模型和工具。
//!
//! ## 核心组件
//!
//! - [`TypeDeclaration`] - 注册表中的原始类型声明
//! - [`TypeDescriptor`] - 反射计算后的类型描述符
//! - [`DiscoveryResult`] - 有序的发现结果
//! - [`TypeReflector`] - 类型反射提供者接口
//! - [`NamingConvention`] - 文件到类型名称的命名约定
//!
//! ## 设计原则
//!
//! - 显式注册表代替运行时反射
//! - 单个文件的解析失败只减少结果，不中断发现
//! - 约定优于配置

pub mod conventions;
pub mod discovery;
pub mod errors;
pub mod metadata;

pub use conventions::*;
pub use discovery::*;
pub use errors::*;
pub use metadata::*;

use std::sync::Arc;

/// 全局类型注册表
static GLOBAL_TYPE_REGISTRY: once_cell::sync::Lazy<Arc<InMemoryTypeRegistry>> =
    once_cell::sync::Lazy::new(|| Arc::new(InMemoryTypeRegistry::new()));

/// 获取全局类型注册表
///
/// `#[discoverable]` 宏生成的注册代码在程序启动时写入这里。
pub fn global_type_registry() -> Arc<InMemoryTypeRegistry> {
    Arc::clone(&GLOBAL_TYPE_REGISTRY)
}
