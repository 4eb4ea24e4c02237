//! 约定规范定义
//!
//! 提供源文件到类型名称的命名约定

use crate::errors::SkipReason;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

/// 命名约定规范
///
/// 文件路径去掉项目根目录前缀和源文件扩展名后，路径分隔符替换为命名空间分隔符，
/// 按约定将首字母大写（磁盘上小写的根目录对应大写的命名空间）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConvention {
    /// 可识别的源文件扩展名（不含点）
    pub source_extension: String,
    /// 类型命名空间分隔符
    pub namespace_separator: String,
    /// 是否将首字母大写
    pub capitalize_first: bool,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            source_extension: "rs".to_string(),
            namespace_separator: "::".to_string(),
            capitalize_first: true,
        }
    }
}

impl NamingConvention {
    /// 创建默认命名约定
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置源文件扩展名
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.source_extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// 设置命名空间分隔符
    pub fn with_namespace_separator(mut self, separator: impl Into<String>) -> Self {
        self.namespace_separator = separator.into();
        self
    }

    /// 设置是否将首字母大写
    pub fn with_capitalize_first(mut self, capitalize: bool) -> Self {
        self.capitalize_first = capitalize;
        self
    }

    /// 检查文件是否为可识别的源文件
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.source_extension)
    }

    /// 根据文件路径推导完全限定类型名称
    pub fn type_name_for(&self, base_path: &Path, file: &Path) -> Result<String, SkipReason> {
        let relative = file
            .strip_prefix(base_path)
            .map_err(|_| SkipReason::OutsideBasePath {
                path: file.to_path_buf(),
            })?;

        let mut segments = Vec::new();
        for component in relative.components() {
            if let Component::Normal(segment) = component {
                let segment = segment.to_str().ok_or_else(|| SkipReason::NoTypeName {
                    path: file.to_path_buf(),
                })?;
                segments.push(segment.to_string());
            }
        }

        let suffix = format!(".{}", self.source_extension);
        if let Some(last) = segments.last_mut() {
            if let Some(stem) = last.strip_suffix(&suffix) {
                *last = stem.to_string();
            }
        }

        if segments.iter().any(String::is_empty) || segments.is_empty() {
            return Err(SkipReason::NoTypeName {
                path: file.to_path_buf(),
            });
        }

        let name = segments.join(&self.namespace_separator);
        if self.capitalize_first {
            Ok(capitalize_first(&name))
        } else {
            Ok(name)
        }
    }
}

/// 将首字母大写
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_type_name_for_nested_file() {
        let naming = NamingConvention::default();
        let base = PathBuf::from("/srv/project");
        let file = base.join("app").join("Discoverable").join("Extending.rs");

        let name = naming.type_name_for(&base, &file).unwrap();
        assert_eq!(name, "App::Discoverable::Extending");
    }

    #[test]
    fn test_type_name_without_capitalization() {
        let naming = NamingConvention::default()
            .with_namespace_separator("\\")
            .with_extension(".php")
            .with_capitalize_first(false);
        let base = PathBuf::from("/srv/project");
        let file = base.join("app").join("Models").join("User.php");

        let name = naming.type_name_for(&base, &file).unwrap();
        assert_eq!(name, "app\\Models\\User");
    }

    #[test]
    fn test_only_trailing_extension_is_removed() {
        let naming = NamingConvention::default();
        let base = PathBuf::from("/srv/project");
        let file = base.join("app").join("rs.rs");

        assert_eq!(naming.type_name_for(&base, &file).unwrap(), "App::rs");
    }

    #[test]
    fn test_file_outside_base_path_is_skipped() {
        let naming = NamingConvention::default();
        let result = naming.type_name_for(Path::new("/srv/project"), Path::new("/tmp/Other.rs"));

        assert!(matches!(result, Err(SkipReason::OutsideBasePath { .. })));
    }

    #[test]
    fn test_base_path_itself_has_no_type_name() {
        let naming = NamingConvention::default();
        let base = Path::new("/srv/project");

        assert!(matches!(
            naming.type_name_for(base, base),
            Err(SkipReason::NoTypeName { .. })
        ));
    }

    #[test]
    fn test_is_source_file() {
        let naming = NamingConvention::default();
        assert!(naming.is_source_file(Path::new("app/Service.rs")));
        assert!(!naming.is_source_file(Path::new("app/README.md")));
        assert!(!naming.is_source_file(Path::new("app/rs")));
    }
}
