//! 宏参数解析

use syn::{
    parse::Parse, parse::ParseStream, punctuated::Punctuated, Expr, Lit, LitStr, Meta, MetaList,
    Result, Token,
};

/// 声明的类型种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredKind {
    Class,
    Abstract,
    Interface,
    Mixin,
}

impl DeclaredKind {
    fn from_lit(lit: &LitStr) -> Result<Self> {
        match lit.value().as_str() {
            "class" => Ok(DeclaredKind::Class),
            "abstract" => Ok(DeclaredKind::Abstract),
            "interface" => Ok(DeclaredKind::Interface),
            "mixin" => Ok(DeclaredKind::Mixin),
            other => Err(syn::Error::new(
                lit.span(),
                format!("未知的类型种类 `{}`，可选值: class, abstract, interface, mixin", other),
            )),
        }
    }
}

/// `#[discoverable]` 参数
#[derive(Debug, Clone, Default)]
pub struct DiscoverableArgs {
    /// 完全限定类型名称，默认为 `module_path!()::Ident`
    pub name: Option<String>,
    /// 类型种类
    pub kind: Option<DeclaredKind>,
    /// 父类型
    pub extends: Option<String>,
    /// 实现的接口（trait 上为父接口）
    pub implements: Vec<String>,
    /// 使用的混入
    pub uses: Vec<String>,
    /// trait 实现块对应的接口名称
    pub interface: Option<String>,
}

impl Parse for DiscoverableArgs {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let mut args = DiscoverableArgs::default();

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            match meta {
                Meta::NameValue(nv) => {
                    let value = match &nv.value {
                        Expr::Lit(expr_lit) => match &expr_lit.lit {
                            Lit::Str(lit_str) => lit_str.clone(),
                            other => return Err(syn::Error::new_spanned(other, "参数值必须是字符串")),
                        },
                        other => return Err(syn::Error::new_spanned(other, "参数值必须是字符串")),
                    };

                    if nv.path.is_ident("name") {
                        args.name = Some(value.value());
                    } else if nv.path.is_ident("kind") {
                        args.kind = Some(DeclaredKind::from_lit(&value)?);
                    } else if nv.path.is_ident("extends") {
                        args.extends = Some(value.value());
                    } else if nv.path.is_ident("interface") {
                        args.interface = Some(value.value());
                    } else {
                        return Err(syn::Error::new_spanned(nv.path, "未知参数"));
                    }
                }
                Meta::List(list) => {
                    if list.path.is_ident("implements") {
                        args.implements.extend(string_list(&list)?);
                    } else if list.path.is_ident("uses") {
                        args.uses.extend(string_list(&list)?);
                    } else {
                        return Err(syn::Error::new_spanned(list.path, "未知参数"));
                    }
                }
                Meta::Path(path) => {
                    return Err(syn::Error::new_spanned(path, "未知参数"));
                }
            }
        }

        Ok(args)
    }
}

fn string_list(list: &MetaList) -> Result<Vec<String>> {
    let items = list.parse_args_with(Punctuated::<LitStr, Token![,]>::parse_terminated)?;
    Ok(items.iter().map(LitStr::value).collect())
}
