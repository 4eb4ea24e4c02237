//! 类型反射和注册机制
//!
//! Rust 没有运行时反射，类型事实由显式注册表提供：
//! 声明在程序启动或测试准备阶段注册，描述符在查询时按继承链计算。

use crate::errors::{ConfigResult, ResolutionFailure, ResolutionResult};
use crate::metadata::{TypeDeclaration, TypeDescriptor, TypeExtension, TypeKind, Visibility};
use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// 类型反射提供者 trait
///
/// 根据完全限定名称返回类型描述符，或报告解析失败。
pub trait TypeReflector: Send + Sync {
    /// 反射指定类型
    fn reflect(&self, name: &str) -> ResolutionResult<TypeDescriptor>;

    /// 获取反射提供者名称
    fn name(&self) -> &str;
}

/// 类型清单
///
/// 以 JSON 描述的注册表内容，用于在没有编译时注册的场景下加载类型事实。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeManifest {
    /// 类型声明列表
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
    /// 按类型名称附加的扩展
    #[serde(default)]
    pub extensions: IndexMap<String, TypeExtension>,
}

#[derive(Debug, Default)]
struct RegistryState {
    declarations: IndexMap<String, TypeDeclaration>,
    extensions: HashMap<String, TypeExtension>,
    // 小写名称 -> 声明名称，大小写不同的同名声明保留最先注册的
    folded_names: HashMap<String, String>,
}

/// 内存中的类型注册表实现
#[derive(Debug, Default)]
pub struct InMemoryTypeRegistry {
    state: RwLock<RegistryState>,
}

impl InMemoryTypeRegistry {
    /// 创建新的内存注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 类型清单创建注册表
    pub fn from_manifest_json(json: &str) -> ConfigResult<Self> {
        let registry = Self::new();
        registry.load_manifest_json(json)?;
        Ok(registry)
    }

    /// 加载 JSON 类型清单，返回加载的声明数量
    pub fn load_manifest_json(&self, json: &str) -> ConfigResult<usize> {
        let manifest: TypeManifest = serde_json::from_str(json)?;
        let count = manifest.types.len();

        for declaration in manifest.types {
            self.declare(declaration);
        }
        for (owner, extension) in manifest.extensions {
            self.extend(owner, extension);
        }

        debug!("类型清单加载完成，共 {} 个声明", count);
        Ok(count)
    }

    /// 注册类型声明，返回被替换的旧声明
    pub fn declare(&self, declaration: TypeDeclaration) -> Option<TypeDeclaration> {
        debug!("注册类型声明: {} ({})", declaration.name, declaration.kind);
        let mut state = self.state.write();
        state
            .folded_names
            .entry(declaration.name.to_lowercase())
            .or_insert_with(|| declaration.name.clone());
        state
            .declarations
            .insert(declaration.name.clone(), declaration)
    }

    /// 为类型补充接口和成员
    ///
    /// 扩展可以先于类型声明注册，反射时合并。
    pub fn extend(&self, owner: impl Into<String>, extension: TypeExtension) {
        let owner = owner.into();
        debug!("注册类型扩展: {}", owner);
        let mut state = self.state.write();
        state.extensions.entry(owner).or_default().merge(extension);
    }

    /// 是否声明了指定类型
    pub fn contains(&self, name: &str) -> bool {
        self.state.read().declarations.contains_key(name)
    }

    /// 声明数量
    pub fn len(&self) -> usize {
        self.state.read().declarations.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.state.read().declarations.is_empty()
    }

    /// 获取所有类型声明的快照
    pub fn declarations(&self) -> Vec<TypeDeclaration> {
        self.state.read().declarations.values().cloned().collect()
    }
}

impl TypeReflector for InMemoryTypeRegistry {
    fn reflect(&self, name: &str) -> ResolutionResult<TypeDescriptor> {
        self.state.read().reflect(name)
    }

    fn name(&self) -> &str {
        "InMemoryTypeRegistry"
    }
}

impl RegistryState {
    /// 按名称查找声明，精确匹配失败时忽略大小写
    fn lookup(&self, name: &str) -> Option<&TypeDeclaration> {
        self.declarations.get(name).or_else(|| {
            self.folded_names
                .get(&name.to_lowercase())
                .and_then(|declared| self.declarations.get(declared))
        })
    }

    fn reflect(&self, name: &str) -> ResolutionResult<TypeDescriptor> {
        let declaration = self
            .lookup(name)
            .ok_or_else(|| ResolutionFailure::not_found(name))?;
        let name = declaration.name.as_str();

        let lineage = self.lineage(declaration)?;
        let parents = lineage[1..]
            .iter()
            .map(|level| level.name.clone())
            .collect();

        let mut interfaces = IndexSet::new();
        for level in &lineage {
            for interface in self.direct_interfaces(level) {
                self.collect_interfaces(name, interface, &mut interfaces)?;
            }
        }

        let mut mixins = IndexSet::new();
        for level in &lineage {
            for mixin in &level.mixins {
                self.collect_mixins(name, mixin, &mut mixins)?;
            }
        }

        // 由远及近叠加，派生层的声明覆盖祖先层
        let mut methods = IndexMap::new();
        let mut properties = IndexMap::new();
        for level in lineage.iter().rev() {
            let mut applied = HashSet::new();
            for mixin in &level.mixins {
                self.apply_mixin_members(mixin, &mut methods, &mut properties, &mut applied);
            }
            self.apply_own_members(level, &mut methods, &mut properties);
        }

        Ok(TypeDescriptor::from_parts(
            declaration.name.clone(),
            declaration.kind,
            parents,
            interfaces,
            mixins,
            methods,
            properties,
        ))
    }

    /// 类型自身及其全部祖先，由近及远
    fn lineage<'a>(
        &'a self,
        declaration: &'a TypeDeclaration,
    ) -> ResolutionResult<Vec<&'a TypeDeclaration>> {
        let mut chain = vec![declaration];
        let mut current = declaration;

        while let Some(parent_name) = &current.parent {
            if chain.iter().any(|level| &level.name == parent_name) {
                let mut names: Vec<&str> = chain.iter().map(|level| level.name.as_str()).collect();
                names.push(parent_name);
                return Err(ResolutionFailure::CyclicDeclaration {
                    name: declaration.name.clone(),
                    chain: names.join(" -> "),
                });
            }

            let parent = self
                .declarations
                .get(parent_name)
                .ok_or_else(|| ResolutionFailure::missing_dependency(&declaration.name, parent_name))?;

            if !parent.kind.is_class_like() {
                return Err(ResolutionFailure::invalid_declaration(
                    &declaration.name,
                    format!("父类型 {} 是 {}", parent_name, parent.kind),
                ));
            }

            chain.push(parent);
            current = parent;
        }

        Ok(chain)
    }

    fn direct_interfaces<'a>(
        &'a self,
        declaration: &'a TypeDeclaration,
    ) -> impl Iterator<Item = &'a String> + 'a {
        let extended = self
            .extensions
            .get(&declaration.name)
            .map(|extension| extension.interfaces.iter())
            .into_iter()
            .flatten();
        declaration.interfaces.iter().chain(extended)
    }

    fn collect_interfaces(
        &self,
        owner: &str,
        interface: &str,
        found: &mut IndexSet<String>,
    ) -> ResolutionResult<()> {
        if found.contains(interface) {
            return Ok(());
        }

        let declaration = self
            .declarations
            .get(interface)
            .ok_or_else(|| ResolutionFailure::missing_dependency(owner, interface))?;

        if declaration.kind != TypeKind::Interface {
            return Err(ResolutionFailure::invalid_declaration(
                owner,
                format!("{} 不是接口 ({})", interface, declaration.kind),
            ));
        }

        found.insert(interface.to_string());
        for parent in self.direct_interfaces(declaration) {
            self.collect_interfaces(owner, parent, found)?;
        }
        Ok(())
    }

    fn collect_mixins(
        &self,
        owner: &str,
        mixin: &str,
        found: &mut IndexSet<String>,
    ) -> ResolutionResult<()> {
        if found.contains(mixin) {
            return Ok(());
        }

        let declaration = self
            .declarations
            .get(mixin)
            .ok_or_else(|| ResolutionFailure::missing_dependency(owner, mixin))?;

        if declaration.kind != TypeKind::Mixin {
            return Err(ResolutionFailure::invalid_declaration(
                owner,
                format!("{} 不是混入 ({})", mixin, declaration.kind),
            ));
        }

        found.insert(mixin.to_string());
        for nested in &declaration.mixins {
            self.collect_mixins(owner, nested, found)?;
        }
        Ok(())
    }

    fn apply_mixin_members(
        &self,
        mixin: &str,
        methods: &mut IndexMap<String, Visibility>,
        properties: &mut IndexMap<String, Visibility>,
        applied: &mut HashSet<String>,
    ) {
        if !applied.insert(mixin.to_string()) {
            return;
        }
        if let Some(declaration) = self.declarations.get(mixin) {
            for nested in &declaration.mixins {
                self.apply_mixin_members(nested, methods, properties, applied);
            }
            self.apply_own_members(declaration, methods, properties);
        }
    }

    fn apply_own_members(
        &self,
        declaration: &TypeDeclaration,
        methods: &mut IndexMap<String, Visibility>,
        properties: &mut IndexMap<String, Visibility>,
    ) {
        methods.extend(declaration.methods.iter().map(|(k, v)| (k.clone(), *v)));
        properties.extend(declaration.properties.iter().map(|(k, v)| (k.clone(), *v)));

        if let Some(extension) = self.extensions.get(&declaration.name) {
            methods.extend(extension.methods.iter().map(|(k, v)| (k.clone(), *v)));
            properties.extend(extension.properties.iter().map(|(k, v)| (k.clone(), *v)));
        }
    }
}
