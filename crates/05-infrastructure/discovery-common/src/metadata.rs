//! 元数据定义
//!
//! 提供类型声明、类型描述符和发现结果

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 类型种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// 具体类型（可实例化）
    #[default]
    Class,
    /// 抽象类型
    AbstractClass,
    /// 接口（只包含契约）
    Interface,
    /// 混入（可复用的成员集合）
    Mixin,
}

impl TypeKind {
    /// 是否可实例化
    pub fn is_instantiable(self) -> bool {
        matches!(self, TypeKind::Class)
    }

    /// 是否可以出现在父类型链中
    pub fn is_class_like(self) -> bool {
        matches!(self, TypeKind::Class | TypeKind::AbstractClass)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TypeKind::Class => "class",
            TypeKind::AbstractClass => "abstract class",
            TypeKind::Interface => "interface",
            TypeKind::Mixin => "mixin",
        };
        f.write_str(text)
    }
}

/// 成员可见性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// 公开
    #[default]
    Public,
    /// 受保护（仅限继承链或受限范围）
    Protected,
    /// 私有
    Private,
}

impl Visibility {
    /// 是否为公开可见
    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// 类型声明
///
/// 注册表中的原始声明，只记录类型自身直接声明的信息。
/// 继承、接口传递和混入展开在反射时计算。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// 完全限定类型名称
    pub name: String,
    /// 类型种类
    #[serde(default)]
    pub kind: TypeKind,
    /// 直接父类型
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// 直接实现的接口；接口声明中表示其继承的接口
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// 直接使用的混入
    #[serde(default)]
    pub mixins: Vec<String>,
    /// 声明的方法
    #[serde(default)]
    pub methods: IndexMap<String, Visibility>,
    /// 声明的属性
    #[serde(default)]
    pub properties: IndexMap<String, Visibility>,
}

impl TypeDeclaration {
    /// 创建新的类型声明
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            interfaces: Vec::new(),
            mixins: Vec::new(),
            methods: IndexMap::new(),
            properties: IndexMap::new(),
        }
    }

    /// 声明具体类型
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    /// 声明抽象类型
    pub fn abstract_class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::AbstractClass)
    }

    /// 声明接口
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    /// 声明混入
    pub fn mixin(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Mixin)
    }

    /// 设置父类型
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// 添加实现的接口
    pub fn implements<I, S>(mut self, interfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for interface in interfaces {
            push_unique(&mut self.interfaces, interface.into());
        }
        self
    }

    /// 添加使用的混入
    pub fn uses<I, S>(mut self, mixins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for mixin in mixins {
            push_unique(&mut self.mixins, mixin.into());
        }
        self
    }

    /// 添加方法
    pub fn method(mut self, name: impl Into<String>, visibility: Visibility) -> Self {
        self.methods.insert(name.into(), visibility);
        self
    }

    /// 添加公开方法
    pub fn public_method(self, name: impl Into<String>) -> Self {
        self.method(name, Visibility::Public)
    }

    /// 添加属性
    pub fn property(mut self, name: impl Into<String>, visibility: Visibility) -> Self {
        self.properties.insert(name.into(), visibility);
        self
    }

    /// 添加公开属性
    pub fn public_property(self, name: impl Into<String>) -> Self {
        self.property(name, Visibility::Public)
    }
}

/// 类型扩展
///
/// 在类型声明之外为类型补充的接口和成员，例如来自 `impl` 块的方法。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeExtension {
    /// 补充实现的接口
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// 补充的方法
    #[serde(default)]
    pub methods: IndexMap<String, Visibility>,
    /// 补充的属性
    #[serde(default)]
    pub properties: IndexMap<String, Visibility>,
}

impl TypeExtension {
    /// 创建空的类型扩展
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加接口
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        push_unique(&mut self.interfaces, interface.into());
        self
    }

    /// 添加方法
    pub fn with_method(mut self, name: impl Into<String>, visibility: Visibility) -> Self {
        self.methods.insert(name.into(), visibility);
        self
    }

    /// 添加属性
    pub fn with_property(mut self, name: impl Into<String>, visibility: Visibility) -> Self {
        self.properties.insert(name.into(), visibility);
        self
    }

    /// 合并另一个扩展
    pub fn merge(&mut self, other: TypeExtension) {
        for interface in other.interfaces {
            push_unique(&mut self.interfaces, interface);
        }
        self.methods.extend(other.methods);
        self.properties.extend(other.properties);
    }

    /// 扩展是否为空
    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty() && self.methods.is_empty() && self.properties.is_empty()
    }
}

fn push_unique(target: &mut Vec<String>, value: String) {
    if !target.contains(&value) {
        target.push(value);
    }
}

/// 类型描述符
///
/// 已加载类型的反射结果，包含传递展开后的接口、父类型链、混入和成员表。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    name: String,
    kind: TypeKind,
    parents: Vec<String>,
    interfaces: IndexSet<String>,
    mixins: IndexSet<String>,
    methods: IndexMap<String, Visibility>,
    properties: IndexMap<String, Visibility>,
}

impl TypeDescriptor {
    pub(crate) fn from_parts(
        name: String,
        kind: TypeKind,
        parents: Vec<String>,
        interfaces: IndexSet<String>,
        mixins: IndexSet<String>,
        methods: IndexMap<String, Visibility>,
        properties: IndexMap<String, Visibility>,
    ) -> Self {
        Self {
            name,
            kind,
            parents,
            interfaces,
            mixins,
            methods,
            properties,
        }
    }

    /// 完全限定类型名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 获取简短的类型名称（不包含命名空间）
    pub fn short_name(&self, namespace_separator: &str) -> &str {
        self.name
            .rsplit(namespace_separator)
            .next()
            .unwrap_or(&self.name)
    }

    /// 类型种类
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// 是否可实例化
    pub fn is_instantiable(&self) -> bool {
        self.kind.is_instantiable()
    }

    /// 直接父类型
    pub fn parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }

    /// 父类型链，由近及远
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    /// 是否为指定类型的真子类型
    pub fn is_subclass_of(&self, name: &str) -> bool {
        self.parents.iter().any(|parent| parent == name)
    }

    /// 传递实现的全部接口名称
    pub fn interface_names(&self) -> impl Iterator<Item = &str> {
        self.interfaces.iter().map(String::as_str)
    }

    /// 是否实现了指定接口
    pub fn implements_interface(&self, name: &str) -> bool {
        self.interfaces.contains(name)
    }

    /// 传递使用的全部混入名称
    pub fn mixin_names(&self) -> impl Iterator<Item = &str> {
        self.mixins.iter().map(String::as_str)
    }

    /// 是否使用了指定混入
    pub fn uses_mixin(&self, name: &str) -> bool {
        self.mixins.contains(name)
    }

    /// 有效方法表
    pub fn methods(&self) -> &IndexMap<String, Visibility> {
        &self.methods
    }

    /// 查询方法可见性
    pub fn method_visibility(&self, name: &str) -> Option<Visibility> {
        self.methods.get(name).copied()
    }

    /// 是否声明了指定方法
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// 是否声明了指定的公开方法
    pub fn has_public_method(&self, name: &str) -> bool {
        self.method_visibility(name).is_some_and(Visibility::is_public)
    }

    /// 有效属性表
    pub fn properties(&self) -> &IndexMap<String, Visibility> {
        &self.properties
    }

    /// 查询属性可见性
    pub fn property_visibility(&self, name: &str) -> Option<Visibility> {
        self.properties.get(name).copied()
    }

    /// 是否声明了指定属性
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// 是否声明了指定的公开属性
    pub fn has_public_property(&self, name: &str) -> bool {
        self.property_visibility(name)
            .is_some_and(Visibility::is_public)
    }
}

/// 发现结果
///
/// 类型名称到类型描述符的有序映射，按文件遍历的发现顺序插入。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryResult {
    types: IndexMap<String, TypeDescriptor>,
}

impl DiscoveryResult {
    /// 创建空的发现结果
    pub fn new() -> Self {
        Self::default()
    }

    /// 以描述符自身报告的名称为键插入
    ///
    /// 重复的名称保留首次出现的位置，值被替换。
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> Option<TypeDescriptor> {
        self.types.insert(descriptor.name.clone(), descriptor)
    }

    /// 类型数量
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// 是否包含指定类型
    pub fn has(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// 获取类型描述符
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// 按发现顺序返回类型名称
    pub fn names(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }

    /// 按发现顺序遍历
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, TypeDescriptor> {
        self.types.iter()
    }

    /// 按发现顺序遍历描述符
    pub fn descriptors(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    /// 取出内部映射
    pub fn into_inner(self) -> IndexMap<String, TypeDescriptor> {
        self.types
    }
}

impl FromIterator<TypeDescriptor> for DiscoveryResult {
    fn from_iter<T: IntoIterator<Item = TypeDescriptor>>(iter: T) -> Self {
        let mut result = Self::new();
        for descriptor in iter {
            result.insert(descriptor);
        }
        result
    }
}

impl IntoIterator for DiscoveryResult {
    type Item = (String, TypeDescriptor);
    type IntoIter = indexmap::map::IntoIter<String, TypeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiscoveryResult {
    type Item = (&'a String, &'a TypeDescriptor);
    type IntoIter = indexmap::map::Iter<'a, String, TypeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}
