//! 类型发现抽象接口

use discovery_common::{DiscoveryError, DiscoveryResult};

/// 类型发现器 trait
///
/// 执行完整的 遍历 -> 解析 -> 过滤 流程并返回有序结果。
/// 重复调用不缓存，每次都重新读取文件系统。
pub trait TypeDiscovery: Send + Sync {
    /// 发现类型
    fn discover(&self) -> Result<DiscoveryResult, DiscoveryError>;

    /// 获取发现器名称
    fn name(&self) -> &str;
}
