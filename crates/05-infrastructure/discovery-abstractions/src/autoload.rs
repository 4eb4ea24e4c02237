//! 自动加载注册表抽象接口
//!
//! 提供已注册的可加载根目录

use std::path::PathBuf;

/// 自动加载注册表 trait
///
/// 暴露当前注册的"命名空间前缀 -> 目录"映射，发现引擎只使用展平后的目录列表。
pub trait AutoloadRegistry: Send + Sync {
    /// 获取全部可加载根目录
    fn loadable_roots(&self) -> Vec<PathBuf>;

    /// 获取注册表名称
    fn name(&self) -> &str;
}
