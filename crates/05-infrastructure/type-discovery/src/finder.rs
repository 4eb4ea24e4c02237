//! 类型发现器
//!
//! 驱动 遍历 -> 解析 -> 过滤 流程，产出有序的发现结果

use crate::autoload::real_path;
use crate::capability_filter::{
    CapabilityFilterChain, ExtendingFilter, ImplementingFilter, MethodsFilter, PropertiesFilter,
    UsingFilter,
};
use crate::file_walker::FileWalker;
use crate::path_resolver::PathResolver;
use crate::type_resolver::TypeResolver;
use discovery_abstractions::{CapabilityFilter, FilterKind, TypeDiscovery};
use discovery_common::{
    DiscoveryError, DiscoveryResult, DiscoveryResultOf, NamingConvention, TypeReflector,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// 未解析的扫描根目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootSpec {
    /// 相对于应用源码目录，始终可信
    App(String),
    /// 相对于项目根目录，需要校验
    Base(String),
}

impl RootSpec {
    /// 应用源码目录本身
    pub fn app_root() -> Self {
        RootSpec::App(String::new())
    }
}

/// 类型发现器
///
/// 配置方法原位修改并返回自身，`get()` 可以重复调用，每次都重新读取文件系统。
pub struct TypeFinder {
    resolver: PathResolver,
    naming: NamingConvention,
    reflector: Arc<dyn TypeReflector>,
    file_walker: FileWalker,
    roots: Vec<RootSpec>,
    recursive: bool,
    filters: CapabilityFilterChain,
}

impl TypeFinder {
    pub(crate) fn from_parts(
        resolver: PathResolver,
        naming: NamingConvention,
        reflector: Arc<dyn TypeReflector>,
        file_walker: FileWalker,
        recursive: bool,
    ) -> Self {
        Self {
            resolver,
            naming,
            reflector,
            file_walker,
            roots: vec![RootSpec::app_root()],
            recursive,
            filters: CapabilityFilterChain::new(),
        }
    }

    /// 扫描应用源码目录下的目录，替换已有的扫描目录
    pub fn path(&mut self, path: impl Into<String>) -> &mut Self {
        self.roots = vec![RootSpec::App(path.into())];
        self
    }

    /// 追加应用源码目录下的扫描目录
    pub fn add_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.roots.push(RootSpec::App(path.into()));
        self
    }

    /// 扫描项目根目录下的目录，替换已有的扫描目录
    pub fn base_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.roots = vec![RootSpec::Base(path.into())];
        self
    }

    /// 追加项目根目录下的扫描目录
    pub fn add_base_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.roots.push(RootSpec::Base(path.into()));
        self
    }

    /// 设置是否递归扫描
    pub fn recursive(&mut self, recursive: bool) -> &mut Self {
        self.recursive = recursive;
        self
    }

    /// 只扫描根目录下的直接文件
    pub fn non_recursive(&mut self) -> &mut Self {
        self.recursive(false)
    }

    /// 只保留实现了全部指定接口的类型
    pub fn implementing<I, S>(&mut self, interfaces: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter(Box::new(ImplementingFilter::new(interfaces)))
    }

    /// 只保留继承了指定类型的类型
    pub fn extending(&mut self, parent: impl Into<String>) -> &mut Self {
        self.filter(Box::new(ExtendingFilter::new(parent)))
    }

    /// 只保留使用了全部指定混入的类型
    pub fn using<I, S>(&mut self, mixins: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter(Box::new(UsingFilter::new(mixins)))
    }

    /// 只保留暴露了全部指定公开方法的类型
    pub fn methods<I, S>(&mut self, methods: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter(Box::new(MethodsFilter::new(methods)))
    }

    /// 只保留暴露了全部指定公开属性的类型
    pub fn properties<I, S>(&mut self, properties: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter(Box::new(PropertiesFilter::new(properties)))
    }

    /// 注册自定义过滤器，替换同种过滤器
    pub fn filter(&mut self, filter: Box<dyn CapabilityFilter>) -> &mut Self {
        debug!("注册过滤器: {}", filter.name());
        self.filters.register(filter);
        self
    }

    /// 清空过滤器
    pub fn reset_filters(&mut self) -> &mut Self {
        self.filters.clear();
        self
    }

    /// 已注册的过滤器种类
    pub fn filter_kinds(&self) -> Vec<FilterKind> {
        self.filters.kinds()
    }

    /// 未解析的扫描目录
    pub fn roots(&self) -> &[RootSpec] {
        &self.roots
    }

    /// 是否递归扫描
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// 项目根目录
    pub fn project_path(&self) -> &Path {
        self.resolver.paths().base_path()
    }

    /// 应用源码目录
    pub fn app_path(&self) -> &Path {
        self.resolver.paths().app_path()
    }

    /// 解析全部扫描目录
    pub fn resolved_roots(&self) -> DiscoveryResultOf<Vec<PathBuf>> {
        self.roots
            .iter()
            .map(|root| -> DiscoveryResultOf<PathBuf> {
                let resolved = match root {
                    RootSpec::App(path) => self.resolver.resolve_app_path(path),
                    RootSpec::Base(path) => self.resolver.resolve_base_path(path)?,
                };
                Ok(real_path(&resolved))
            })
            .collect()
    }

    /// 执行发现流程
    pub fn get(&self) -> DiscoveryResultOf<DiscoveryResult> {
        let roots = self.resolved_roots()?;
        let type_resolver = TypeResolver::new(
            real_path(self.project_path()),
            self.naming.clone(),
            Arc::clone(&self.reflector),
        );

        info!(
            "开始类型发现: {} 个目录, 递归: {}, 过滤器: {}",
            roots.len(),
            self.recursive,
            self.filters.len()
        );

        let mut scanned = 0usize;
        let result: DiscoveryResult = self
            .file_walker
            .candidates(&roots, self.recursive)
            .inspect(|_| scanned += 1)
            .filter_map(|file| type_resolver.resolve(&file))
            .filter(|descriptor| self.filters.apply(descriptor))
            .collect();

        info!("类型发现完成: 扫描 {} 个文件, 发现 {} 个类型", scanned, result.len());
        Ok(result)
    }
}

impl TypeDiscovery for TypeFinder {
    fn discover(&self) -> Result<DiscoveryResult, DiscoveryError> {
        self.get()
    }

    fn name(&self) -> &str {
        "TypeFinder"
    }
}
