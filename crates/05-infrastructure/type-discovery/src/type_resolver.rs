//! 文件到类型描述符的解析

use discovery_common::{NamingConvention, SkipReason, TypeDescriptor, TypeReflector};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// 单个文件的解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// 解析为可实例化类型
    Resolved(TypeDescriptor),
    /// 被跳过
    Skipped(SkipReason),
}

impl Resolution {
    /// 是否解析成功
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    /// 取出类型描述符
    pub fn into_descriptor(self) -> Option<TypeDescriptor> {
        match self {
            Resolution::Resolved(descriptor) => Some(descriptor),
            Resolution::Skipped(_) => None,
        }
    }
}

/// 类型解析器
///
/// 解析失败只被分类记录，不会向上传播。
pub struct TypeResolver {
    base_path: PathBuf,
    naming: NamingConvention,
    reflector: Arc<dyn TypeReflector>,
}

impl TypeResolver {
    /// 创建新的类型解析器
    pub fn new(
        base_path: impl Into<PathBuf>,
        naming: NamingConvention,
        reflector: Arc<dyn TypeReflector>,
    ) -> Self {
        Self {
            base_path: base_path.into(),
            naming,
            reflector,
        }
    }

    /// 项目根目录
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// 对文件进行分类
    pub fn classify(&self, file: &Path) -> Resolution {
        match self.try_resolve(file) {
            Ok(descriptor) => Resolution::Resolved(descriptor),
            Err(reason) => Resolution::Skipped(reason),
        }
    }

    /// 解析文件，跳过的文件返回 `None`
    pub fn resolve(&self, file: &Path) -> Option<TypeDescriptor> {
        match self.classify(file) {
            Resolution::Resolved(descriptor) => {
                debug!("解析类型: {} => {}", file.display(), descriptor.name());
                Some(descriptor)
            }
            Resolution::Skipped(reason) => {
                debug!("跳过文件 {}: {}", file.display(), reason);
                None
            }
        }
    }

    fn try_resolve(&self, file: &Path) -> Result<TypeDescriptor, SkipReason> {
        let candidate = self.naming.type_name_for(&self.base_path, file)?;
        let descriptor = self.reflector.reflect(&candidate)?;

        if !descriptor.is_instantiable() {
            return Err(SkipReason::NotInstantiable {
                name: descriptor.name().to_string(),
                kind: descriptor.kind(),
            });
        }
        Ok(descriptor)
    }
}
