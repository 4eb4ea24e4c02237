//! 能力过滤器和过滤链

use discovery_abstractions::{CapabilityFilter, FilterKind};
use discovery_common::TypeDescriptor;
use indexmap::IndexMap;

fn collect_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

/// 接口过滤器：实现全部指定接口
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplementingFilter {
    interfaces: Vec<String>,
}

impl ImplementingFilter {
    pub fn new<I, S>(interfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            interfaces: collect_names(interfaces),
        }
    }
}

impl CapabilityFilter for ImplementingFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Implementing
    }

    fn matches(&self, descriptor: &TypeDescriptor) -> bool {
        self.interfaces
            .iter()
            .all(|name| descriptor.implements_interface(name))
    }
}

/// 继承过滤器：指定类型是父类型链中的真祖先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendingFilter {
    parent: String,
}

impl ExtendingFilter {
    pub fn new(parent: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
        }
    }
}

impl CapabilityFilter for ExtendingFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Extending
    }

    fn matches(&self, descriptor: &TypeDescriptor) -> bool {
        descriptor.is_subclass_of(&self.parent)
    }
}

/// 混入过滤器：传递地使用全部指定混入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsingFilter {
    mixins: Vec<String>,
}

impl UsingFilter {
    pub fn new<I, S>(mixins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mixins: collect_names(mixins),
        }
    }
}

impl CapabilityFilter for UsingFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Using
    }

    fn matches(&self, descriptor: &TypeDescriptor) -> bool {
        self.mixins.iter().all(|name| descriptor.uses_mixin(name))
    }
}

/// 方法过滤器：全部指定方法存在且公开
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodsFilter {
    methods: Vec<String>,
}

impl MethodsFilter {
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            methods: collect_names(methods),
        }
    }
}

impl CapabilityFilter for MethodsFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Methods
    }

    fn matches(&self, descriptor: &TypeDescriptor) -> bool {
        self.methods
            .iter()
            .all(|name| descriptor.has_public_method(name))
    }
}

/// 属性过滤器：全部指定属性存在且公开
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertiesFilter {
    properties: Vec<String>,
}

impl PropertiesFilter {
    pub fn new<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            properties: collect_names(properties),
        }
    }
}

impl CapabilityFilter for PropertiesFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Properties
    }

    fn matches(&self, descriptor: &TypeDescriptor) -> bool {
        self.properties
            .iter()
            .all(|name| descriptor.has_public_property(name))
    }
}

/// 能力过滤链
///
/// 每种过滤器至多一个，注册同种过滤器会原位替换。
/// 所有过滤器都通过才算匹配，空链接受所有类型。
#[derive(Debug, Default)]
pub struct CapabilityFilterChain {
    filters: IndexMap<FilterKind, Box<dyn CapabilityFilter>>,
}

impl CapabilityFilterChain {
    /// 创建空的过滤链
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册过滤器，返回被替换的同种过滤器
    pub fn register(&mut self, filter: Box<dyn CapabilityFilter>) -> Option<Box<dyn CapabilityFilter>> {
        self.filters.insert(filter.kind(), filter)
    }

    /// 移除指定种类的过滤器
    pub fn remove(&mut self, kind: FilterKind) -> Option<Box<dyn CapabilityFilter>> {
        self.filters.shift_remove(&kind)
    }

    /// 清空过滤链
    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// 已注册的过滤器种类（按首次注册顺序）
    pub fn kinds(&self) -> Vec<FilterKind> {
        self.filters.keys().copied().collect()
    }

    /// 获取指定种类的过滤器
    pub fn get(&self, kind: FilterKind) -> Option<&dyn CapabilityFilter> {
        self.filters.get(&kind).map(|filter| filter.as_ref())
    }

    /// 检查类型是否通过全部过滤器
    pub fn apply(&self, descriptor: &TypeDescriptor) -> bool {
        self.filters.values().all(|filter| filter.matches(descriptor))
    }
}
