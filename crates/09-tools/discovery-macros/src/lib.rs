//! # Discovery Macros
//!
//! 这个 crate 提供了在编译时声明可发现类型的过程宏。
//!
//! 声明在程序启动时写入 `discovery_common::global_type_registry()`，
//! 使用方需要依赖 `discovery-common` 和 `ctor`。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use discovery_macros::discoverable;
//!
//! #[discoverable(name = "App::Contracts::Serializable")]
//! pub trait Serializable {
//!     fn serialize(&self) -> String;
//! }
//!
//! #[discoverable(name = "App::Models::User", extends = "App::Models::Model")]
//! pub struct User {
//!     pub email: String,
//!     password: String,
//! }
//!
//! #[discoverable(name = "App::Models::User", interface = "App::Contracts::Serializable")]
//! impl Serializable for User {
//!     fn serialize(&self) -> String {
//!         self.email.clone()
//!     }
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, Item};

mod args;
mod discoverable;

use args::DiscoverableArgs;

/// 类型声明注册宏
///
/// # 参数
///
/// - `name = "..."` - 完全限定类型名称（默认为 `module_path!()::Ident`）
/// - `kind = "class" | "abstract" | "mixin"` - 结构体的类型种类（默认为 `class`）
/// - `extends = "..."` - 父类型
/// - `implements("...", ...)` - 实现的接口，用于 trait 时为父接口
/// - `uses("...", ...)` - 使用的混入
/// - `interface = "..."` - trait 实现块对应的接口名称
///
/// 结构体的具名字段注册为属性：`pub` 为公开，`pub(..)` 为受保护，其余为私有。
/// impl 块中的方法按同样规则注册，trait 实现中的方法一律公开。
#[proc_macro_attribute]
pub fn discoverable(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = if args.is_empty() {
        DiscoverableArgs::default()
    } else {
        match syn::parse::<DiscoverableArgs>(args) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    let item = parse_macro_input!(input as Item);

    match discoverable::expand(args, item) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(e) => e.to_compile_error().into(),
    }
}
