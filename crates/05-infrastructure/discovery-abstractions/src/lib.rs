//! # Discovery Abstractions
//!
//! 类型发现抽象层，定义发现流程各阶段之间的接口。
//!
//! ## 核心接口
//!
//! - [`AutoloadRegistry`] - 自动加载根目录注册表接口
//! - [`SourceWalker`] - 文件系统遍历接口
//! - [`CapabilityFilter`] - 能力过滤器接口
//! - [`TypeDiscovery`] - 类型发现器接口

pub mod autoload;
pub mod filter;
pub mod finder;
pub mod walker;

pub use autoload::*;
pub use filter::*;
pub use finder::*;
pub use walker::*;
