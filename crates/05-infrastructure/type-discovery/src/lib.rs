//! # 类型发现引擎
//!
//! 扫描源码目录，将源文件映射为已注册的类型，并按能力过滤器筛选结果。
//!
//! ## 主要组件
//!
//! - [`PathResolver`] - 路径解析和可信校验
//! - [`FileWalker`] - 候选源文件遍历
//! - [`TypeResolver`] - 文件到类型描述符的解析
//! - [`CapabilityFilterChain`] - 能力过滤链
//! - [`TypeFinder`] - 发现流程编排
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use type_discovery::TypeFinder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut finder = TypeFinder::new(".");
//!     finder.path("Providers").implementing(["Serializable"]);
//!
//!     for (name, descriptor) in finder.get()?.iter() {
//!         println!("{}: {}", name, descriptor.kind());
//!     }
//!     Ok(())
//! }
//! ```

pub mod autoload;
pub mod builder;
pub mod capability_filter;
pub mod file_walker;
pub mod finder;
pub mod logging;
pub mod path_resolver;
pub mod settings;
pub mod type_resolver;

pub use autoload::NamespaceRootRegistry;
pub use builder::TypeFinderBuilder;
pub use capability_filter::{
    CapabilityFilterChain, ExtendingFilter, ImplementingFilter, MethodsFilter, PropertiesFilter,
    UsingFilter,
};
pub use file_walker::{FileWalker, WalkdirSourceWalker};
pub use finder::{RootSpec, TypeFinder};
pub use logging::LoggingConfig;
pub use path_resolver::{ApplicationPaths, PathResolver};
pub use settings::{DiscoverySettings, FilterSettings, LoggingSettings};
pub use type_resolver::{Resolution, TypeResolver};

// 重新导出公共类型
pub use discovery_abstractions::{
    AutoloadRegistry, CapabilityFilter, FilterKind, SourceWalker, TypeDiscovery,
};
pub use discovery_common::{
    global_type_registry, ConfigError, DiscoveryError, DiscoveryResult, InMemoryTypeRegistry,
    NamingConvention, TypeDeclaration, TypeDescriptor, TypeReflector,
};

#[cfg(test)]
mod tests;
