//! 路径解析和可信校验
//!
//! 将用户提供的目录转换为绝对路径，拒绝不在任何可加载根目录下的目录

use discovery_abstractions::AutoloadRegistry;
use discovery_common::DiscoveryError;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// 应用路径
///
/// 项目根目录和应用默认源码根目录（默认为 `<base>/app`）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationPaths {
    base_path: PathBuf,
    app_path: PathBuf,
}

impl ApplicationPaths {
    /// 默认的应用源码目录名
    pub const DEFAULT_APP_DIR: &'static str = "app";

    /// 创建新的应用路径
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        let app_path = base_path.join(Self::DEFAULT_APP_DIR);
        Self {
            base_path,
            app_path,
        }
    }

    /// 设置应用源码目录（相对于项目根目录）
    pub fn with_app_dir(mut self, app_dir: impl AsRef<Path>) -> Self {
        self.app_path = self.base_path.join(app_dir);
        self
    }

    /// 项目根目录
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// 应用源码根目录
    pub fn app_path(&self) -> &Path {
        &self.app_path
    }

    /// 拼接项目根目录下的相对路径
    pub fn base_path_join(&self, path: &str) -> PathBuf {
        join_relative(&self.base_path, path)
    }

    /// 拼接应用源码目录下的相对路径
    pub fn app_path_join(&self, path: &str) -> PathBuf {
        join_relative(&self.app_path, path)
    }
}

fn join_relative(root: &Path, path: &str) -> PathBuf {
    let trimmed = trim_separators(path);
    if trimmed.is_empty() {
        root.to_path_buf()
    } else {
        root.join(trimmed)
    }
}

/// 去掉首尾的路径分隔符
pub(crate) fn trim_separators(path: &str) -> &str {
    path.trim_matches(|c: char| c == '/' || c == '\\' || c == std::path::MAIN_SEPARATOR)
}

/// 按词法规则消除 `.` 和 `..`，不访问文件系统
///
/// 无法抵消的 `..` 保留在结果中，根目录之上的 `..` 丢弃。
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(Component::ParentDir.as_os_str()),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// 路径解析器
pub struct PathResolver {
    paths: ApplicationPaths,
    autoload: Arc<dyn AutoloadRegistry>,
}

impl PathResolver {
    /// 创建新的路径解析器
    pub fn new(paths: ApplicationPaths, autoload: Arc<dyn AutoloadRegistry>) -> Self {
        Self { paths, autoload }
    }

    /// 应用路径
    pub fn paths(&self) -> &ApplicationPaths {
        &self.paths
    }

    /// 解析应用源码目录下的相对路径
    ///
    /// 应用源码目录始终可信，不查询自动加载注册表。
    pub fn resolve_app_path(&self, path: &str) -> PathBuf {
        self.paths.app_path_join(path)
    }

    /// 解析项目根目录下的路径并校验是否可信
    pub fn resolve_base_path(&self, path: &str) -> Result<PathBuf, DiscoveryError> {
        if !self.is_trusted(path) {
            return Err(DiscoveryError::untrusted_path(path));
        }

        let resolved = if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.paths.base_path_join(path)
        };
        debug!("解析扫描目录: {} => {}", path, resolved.display());
        Ok(resolved)
    }

    /// 检查路径是否位于可加载根目录下
    pub fn is_trusted(&self, path: &str) -> bool {
        self.is_under_app_path(path) || self.is_autoloaded(path)
    }

    fn is_under_app_path(&self, path: &str) -> bool {
        let candidate = if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.paths.base_path_join(path)
        };
        normalize_lexically(&candidate).starts_with(normalize_lexically(self.paths.app_path()))
    }

    /// 宽松的首段匹配：路径第一段与任一已注册根目录的最后一段相同即视为可信
    fn is_autoloaded(&self, path: &str) -> bool {
        let first_segment = trim_separators(path)
            .split(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or_default();
        if first_segment.is_empty() {
            return false;
        }

        self.autoload.loadable_roots().iter().any(|root| {
            root.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name == first_segment)
        })
    }
}
