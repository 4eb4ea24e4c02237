//! 文件遍历抽象接口

use std::path::PathBuf;

/// 文件系统遍历 trait
///
/// 按给定顺序遍历每个根目录，产出文件（不含目录）的真实绝对路径。
/// 根目录内部的顺序由具体实现决定，但对固定的文件系统状态必须稳定。
pub trait SourceWalker: Send + Sync {
    /// 遍历根目录
    ///
    /// `max_depth` 为 `Some(0)` 时只产出根目录下的直接文件，`None` 表示不限深度。
    fn walk<'a>(
        &'a self,
        roots: &'a [PathBuf],
        max_depth: Option<usize>,
    ) -> Box<dyn Iterator<Item = PathBuf> + 'a>;

    /// 获取遍历器名称
    fn name(&self) -> &str;
}
