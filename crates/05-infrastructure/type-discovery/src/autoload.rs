//! 自动加载根目录注册表实现

use discovery_abstractions::AutoloadRegistry;
use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 命名空间根目录注册表
///
/// 记录"命名空间前缀 -> 目录列表"映射，按注册顺序展平为可加载根目录。
#[derive(Debug, Default)]
pub struct NamespaceRootRegistry {
    prefixes: RwLock<IndexMap<String, Vec<PathBuf>>>,
}

impl NamespaceRootRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册命名空间前缀对应的目录
    pub fn register(&self, prefix: impl Into<String>, directory: impl Into<PathBuf>) {
        let prefix = prefix.into();
        let directory = directory.into();
        debug!("注册自动加载目录: {} => {}", prefix, directory.display());

        let mut prefixes = self.prefixes.write();
        let directories = prefixes.entry(prefix).or_default();
        if !directories.contains(&directory) {
            directories.push(directory);
        }
    }

    /// 注册目录并返回自身
    pub fn with_prefix(self, prefix: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        self.register(prefix, directory);
        self
    }

    /// 获取所有前缀及其目录
    pub fn prefixes(&self) -> IndexMap<String, Vec<PathBuf>> {
        self.prefixes.read().clone()
    }

    /// 前缀数量
    pub fn len(&self) -> usize {
        self.prefixes.read().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.prefixes.read().is_empty()
    }
}

impl AutoloadRegistry for NamespaceRootRegistry {
    fn loadable_roots(&self) -> Vec<PathBuf> {
        let prefixes = self.prefixes.read();
        let roots: IndexSet<PathBuf> = prefixes
            .values()
            .flatten()
            .map(|directory| real_path(directory))
            .collect();
        roots.into_iter().collect()
    }

    fn name(&self) -> &str {
        "NamespaceRootRegistry"
    }
}

/// 存在的目录返回真实路径，否则原样返回
pub(crate) fn real_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
