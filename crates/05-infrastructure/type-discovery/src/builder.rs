//! 类型发现器构建器

use crate::autoload::NamespaceRootRegistry;
use crate::file_walker::{FileWalker, WalkdirSourceWalker};
use crate::finder::TypeFinder;
use crate::logging::LoggingConfig;
use crate::path_resolver::{ApplicationPaths, PathResolver};
use crate::settings::{DiscoverySettings, FilterSettings};
use discovery_abstractions::{AutoloadRegistry, SourceWalker};
use discovery_common::{global_type_registry, ConfigResult, NamingConvention, TypeReflector};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// 类型发现器构建器
///
/// 使用建造者模式组装发现器的协作者
pub struct TypeFinderBuilder {
    /// 项目根目录
    base_path: PathBuf,
    /// 应用源码目录
    app_dir: String,
    /// 命名约定
    naming: NamingConvention,
    /// 反射提供者，默认为全局类型注册表
    reflector: Option<Arc<dyn TypeReflector>>,
    /// 自动加载注册表
    autoload: Option<Arc<dyn AutoloadRegistry>>,
    /// 文件系统遍历器
    walker: Option<Arc<dyn SourceWalker>>,
    /// 是否递归扫描
    recursive: bool,
    /// 初始扫描目录
    paths: Vec<String>,
    /// 预置过滤器
    settings_filters: Option<FilterSettings>,
    /// 日志配置，设置后构建时初始化日志
    logging_config: Option<LoggingConfig>,
}

impl TypeFinderBuilder {
    /// 创建新的构建器
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            app_dir: ApplicationPaths::DEFAULT_APP_DIR.to_string(),
            naming: NamingConvention::default(),
            reflector: None,
            autoload: None,
            walker: None,
            recursive: true,
            paths: Vec::new(),
            settings_filters: None,
            logging_config: None,
        }
    }

    /// 根据发现设置创建构建器
    pub fn from_settings(settings: &DiscoverySettings) -> ConfigResult<Self> {
        info!("根据设置创建类型发现器: {}", settings.base_path.display());

        let autoload = NamespaceRootRegistry::new();
        for (prefix, directories) in &settings.autoload {
            for directory in directories {
                let directory = if directory.is_absolute() {
                    directory.clone()
                } else {
                    settings.base_path.join(directory)
                };
                autoload.register(prefix.clone(), directory);
            }
        }

        let mut builder = Self::new(settings.base_path.clone())
            .with_app_dir(settings.app_dir.clone())
            .with_naming(settings.naming.clone())
            .with_autoload(Arc::new(autoload))
            .with_walker(Arc::new(
                WalkdirSourceWalker::new().with_follow_links(settings.follow_links),
            ))
            .recursive(settings.recursive);

        builder.paths = settings.paths.clone();
        if !settings.filters.is_empty() {
            builder.settings_filters = Some(settings.filters.clone());
        }
        if let Some(logging) = &settings.logging {
            builder = builder.with_logging(logging.to_logging_config()?);
        }
        Ok(builder)
    }

    /// 设置应用源码目录
    pub fn with_app_dir(mut self, app_dir: impl Into<String>) -> Self {
        self.app_dir = app_dir.into();
        self
    }

    /// 设置命名约定
    pub fn with_naming(mut self, naming: NamingConvention) -> Self {
        self.naming = naming;
        self
    }

    /// 设置反射提供者
    pub fn with_reflector(mut self, reflector: Arc<dyn TypeReflector>) -> Self {
        debug!("使用反射提供者: {}", reflector.name());
        self.reflector = Some(reflector);
        self
    }

    /// 设置自动加载注册表
    pub fn with_autoload(mut self, autoload: Arc<dyn AutoloadRegistry>) -> Self {
        debug!("使用自动加载注册表: {}", autoload.name());
        self.autoload = Some(autoload);
        self
    }

    /// 设置文件系统遍历器
    pub fn with_walker(mut self, walker: Arc<dyn SourceWalker>) -> Self {
        debug!("使用文件遍历器: {}", walker.name());
        self.walker = Some(walker);
        self
    }

    /// 设置是否递归扫描
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = Some(config);
        self
    }

    /// 构建类型发现器
    pub fn build(self) -> ConfigResult<TypeFinder> {
        // 只有在明确配置了日志时才初始化日志
        if let Some(logging) = &self.logging_config {
            logging.init()?;
        }

        let paths = ApplicationPaths::new(self.base_path).with_app_dir(&self.app_dir);
        let autoload: Arc<dyn AutoloadRegistry> = match self.autoload {
            Some(autoload) => autoload,
            None => Arc::new(NamespaceRootRegistry::new()),
        };
        let reflector: Arc<dyn TypeReflector> = match self.reflector {
            Some(reflector) => reflector,
            None => global_type_registry(),
        };
        let walker: Arc<dyn SourceWalker> = match self.walker {
            Some(walker) => walker,
            None => Arc::new(WalkdirSourceWalker::new()),
        };

        let mut finder = TypeFinder::from_parts(
            PathResolver::new(paths, autoload),
            self.naming.clone(),
            reflector,
            FileWalker::new(walker, self.naming),
            self.recursive,
        );

        let mut paths = self.paths.into_iter();
        if let Some(first) = paths.next() {
            finder.path(first);
            for path in paths {
                finder.add_path(path);
            }
        }

        if let Some(filters) = self.settings_filters {
            if !filters.implementing.is_empty() {
                finder.implementing(filters.implementing);
            }
            if let Some(parent) = filters.extending {
                finder.extending(parent);
            }
            if !filters.using.is_empty() {
                finder.using(filters.using);
            }
            if !filters.methods.is_empty() {
                finder.methods(filters.methods);
            }
            if !filters.properties.is_empty() {
                finder.properties(filters.properties);
            }
        }

        info!("类型发现器构建完成: {}", finder.app_path().display());
        Ok(finder)
    }
}

impl TypeFinder {
    /// 使用默认协作者创建类型发现器
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let naming = NamingConvention::default();
        Self::from_parts(
            PathResolver::new(
                ApplicationPaths::new(base_path),
                Arc::new(NamespaceRootRegistry::new()),
            ),
            naming.clone(),
            global_type_registry(),
            FileWalker::new(Arc::new(WalkdirSourceWalker::new()), naming),
            true,
        )
    }

    /// 创建构建器
    pub fn builder(base_path: impl Into<PathBuf>) -> TypeFinderBuilder {
        TypeFinderBuilder::new(base_path)
    }
}
