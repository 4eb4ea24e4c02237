//! 源文件遍历

use crate::autoload::real_path;
use discovery_abstractions::SourceWalker;
use discovery_common::NamingConvention;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// 基于 walkdir 的文件系统遍历器
#[derive(Debug, Clone)]
pub struct WalkdirSourceWalker {
    follow_links: bool,
    sort_by_file_name: bool,
}

impl Default for WalkdirSourceWalker {
    fn default() -> Self {
        Self {
            follow_links: false,
            sort_by_file_name: true,
        }
    }
}

impl WalkdirSourceWalker {
    /// 创建新的遍历器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置是否跟随符号链接
    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// 设置根目录内部是否按文件名排序
    pub fn with_sort_by_file_name(mut self, sort: bool) -> Self {
        self.sort_by_file_name = sort;
        self
    }
}

impl SourceWalker for WalkdirSourceWalker {
    fn walk<'a>(
        &'a self,
        roots: &'a [PathBuf],
        max_depth: Option<usize>,
    ) -> Box<dyn Iterator<Item = PathBuf> + 'a> {
        Box::new(roots.iter().flat_map(move |root| {
            debug!("遍历根目录: {}", root.display());

            // walkdir 的深度 0 是根目录本身
            let mut walker = WalkDir::new(root)
                .min_depth(1)
                .follow_links(self.follow_links);
            if let Some(depth) = max_depth {
                walker = walker.max_depth(depth + 1);
            }
            if self.sort_by_file_name {
                walker = walker.sort_by_file_name();
            }

            walker.into_iter().filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(real_path(entry.path())),
                Ok(_) => None,
                Err(e) => {
                    warn!("遍历目录失败，已跳过: {}", e);
                    None
                }
            })
        }))
    }

    fn name(&self) -> &str {
        "WalkdirSourceWalker"
    }
}

/// 候选源文件遍历器
///
/// 在遍历器产出的文件上按源文件扩展名过滤。
pub struct FileWalker {
    walker: Arc<dyn SourceWalker>,
    naming: NamingConvention,
}

impl FileWalker {
    /// 创建新的文件遍历器
    pub fn new(walker: Arc<dyn SourceWalker>, naming: NamingConvention) -> Self {
        Self { walker, naming }
    }

    /// 惰性产出候选源文件
    pub fn candidates<'a>(
        &'a self,
        roots: &'a [PathBuf],
        recursive: bool,
    ) -> impl Iterator<Item = PathBuf> + 'a {
        let max_depth = if recursive { None } else { Some(0) };
        self.walker
            .walk(roots, max_depth)
            .filter(move |path| self.naming.is_source_file(path))
    }

    /// 底层遍历器名称
    pub fn walker_name(&self) -> &str {
        self.walker.name()
    }
}
