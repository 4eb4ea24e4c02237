//! 能力过滤器抽象接口
//!
//! 提供基于类型结构的能力断言

use discovery_common::TypeDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 过滤器种类
///
/// 每种过滤器在过滤链中至多保留一个，重复设置会替换之前的断言。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// 实现指定接口
    Implementing,
    /// 继承指定类型
    Extending,
    /// 使用指定混入
    Using,
    /// 暴露指定公开方法
    Methods,
    /// 暴露指定公开属性
    Properties,
}

impl FilterKind {
    /// 全部过滤器种类
    pub const ALL: [FilterKind; 5] = [
        FilterKind::Implementing,
        FilterKind::Extending,
        FilterKind::Using,
        FilterKind::Methods,
        FilterKind::Properties,
    ];

    /// 获取过滤器种类名称
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKind::Implementing => "implementing",
            FilterKind::Extending => "extending",
            FilterKind::Using => "using",
            FilterKind::Methods => "methods",
            FilterKind::Properties => "properties",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 过滤器种类解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("未知的过滤器种类: {value}")]
pub struct UnknownFilterKind {
    pub value: String,
}

impl FromStr for FilterKind {
    type Err = UnknownFilterKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownFilterKind {
                value: s.to_string(),
            })
    }
}

/// 能力过滤器 trait
///
/// 对单个类型描述符求值的纯函数断言。
pub trait CapabilityFilter: Send + Sync + fmt::Debug {
    /// 过滤器种类
    fn kind(&self) -> FilterKind;

    /// 检查类型是否满足断言
    fn matches(&self, descriptor: &TypeDescriptor) -> bool;

    /// 过滤器名称
    fn name(&self) -> &str {
        self.kind().as_str()
    }
}
