//! 类型声明注册宏实现

use crate::args::{DeclaredKind, DiscoverableArgs};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Fields, ImplItem, Item, ItemImpl, ItemStruct, ItemTrait, LitStr, Result, TraitItem, Type,
    Visibility,
};

/// 展开 `#[discoverable]`
pub fn expand(args: DiscoverableArgs, item: Item) -> Result<TokenStream> {
    let registration = match &item {
        Item::Struct(item_struct) => struct_registration(&args, item_struct)?,
        Item::Trait(item_trait) => trait_registration(&args, item_trait)?,
        Item::Impl(item_impl) => impl_registration(&args, item_impl)?,
        other => {
            return Err(syn::Error::new_spanned(
                other,
                "#[discoverable] 只能用于 struct、trait 或 impl 块",
            ))
        }
    };

    Ok(quote! {
        #item

        const _: () = {
            // 使用 ctor 在程序启动时注册到全局类型注册表
            #[::ctor::ctor]
            fn __discoverable_register() {
                #registration
            }
        };
    })
}

/// 类型名称表达式：显式名称或 `module_path!()::ident`
fn name_expr(explicit: Option<&String>, ident: &syn::Ident) -> TokenStream {
    match explicit {
        Some(name) => quote! { #name },
        None => {
            let ident = LitStr::new(&ident.to_string(), ident.span());
            quote! { concat!(module_path!(), "::", #ident) }
        }
    }
}

/// 字段和方法的可见性映射
fn visibility_tokens(vis: &Visibility) -> TokenStream {
    match vis {
        Visibility::Public(_) => quote! { ::discovery_common::Visibility::Public },
        Visibility::Restricted(_) => quote! { ::discovery_common::Visibility::Protected },
        Visibility::Inherited => quote! { ::discovery_common::Visibility::Private },
    }
}

fn public_tokens() -> TokenStream {
    quote! { ::discovery_common::Visibility::Public }
}

fn reject_for(present: bool, what: &str, target: &str, span: &impl quote::ToTokens) -> Result<()> {
    if present {
        return Err(syn::Error::new_spanned(
            span,
            format!("`{}` 不能用于 {}", what, target),
        ));
    }
    Ok(())
}

fn declaration_chain(args: &DiscoverableArgs) -> TokenStream {
    let mut chain = TokenStream::new();
    if let Some(parent) = &args.extends {
        chain.extend(quote! { .extends(#parent) });
    }
    if !args.implements.is_empty() {
        let interfaces = &args.implements;
        chain.extend(quote! { .implements([#(#interfaces),*]) });
    }
    if !args.uses.is_empty() {
        let mixins = &args.uses;
        chain.extend(quote! { .uses([#(#mixins),*]) });
    }
    chain
}

fn struct_registration(args: &DiscoverableArgs, item: &ItemStruct) -> Result<TokenStream> {
    reject_for(args.interface.is_some(), "interface", "struct", &item.ident)?;

    let kind = match args.kind.unwrap_or(DeclaredKind::Class) {
        DeclaredKind::Class => quote! { ::discovery_common::TypeKind::Class },
        DeclaredKind::Abstract => quote! { ::discovery_common::TypeKind::AbstractClass },
        DeclaredKind::Mixin => quote! { ::discovery_common::TypeKind::Mixin },
        DeclaredKind::Interface => {
            return Err(syn::Error::new_spanned(
                &item.ident,
                "接口请在 trait 上声明",
            ))
        }
    };

    let name = name_expr(args.name.as_ref(), &item.ident);
    let chain = declaration_chain(args);

    let mut properties = TokenStream::new();
    if let Fields::Named(fields) = &item.fields {
        for field in &fields.named {
            if let Some(ident) = &field.ident {
                let property = ident.to_string();
                let visibility = visibility_tokens(&field.vis);
                properties.extend(quote! { .property(#property, #visibility) });
            }
        }
    }

    Ok(quote! {
        let declaration = ::discovery_common::TypeDeclaration::new(#name, #kind)
            #chain
            #properties;
        ::discovery_common::global_type_registry().declare(declaration);
    })
}

fn trait_registration(args: &DiscoverableArgs, item: &ItemTrait) -> Result<TokenStream> {
    reject_for(args.extends.is_some(), "extends", "trait", &item.ident)?;
    reject_for(!args.uses.is_empty(), "uses", "trait", &item.ident)?;
    reject_for(args.interface.is_some(), "interface", "trait", &item.ident)?;
    if matches!(args.kind, Some(kind) if kind != DeclaredKind::Interface) {
        return Err(syn::Error::new_spanned(&item.ident, "trait 只能声明为接口"));
    }

    let name = name_expr(args.name.as_ref(), &item.ident);
    let chain = declaration_chain(args);
    let public = public_tokens();

    let mut methods = TokenStream::new();
    for trait_item in &item.items {
        if let TraitItem::Fn(function) = trait_item {
            let method = function.sig.ident.to_string();
            methods.extend(quote! { .method(#method, #public) });
        }
    }

    Ok(quote! {
        let declaration = ::discovery_common::TypeDeclaration::new(
            #name,
            ::discovery_common::TypeKind::Interface,
        )
            #chain
            #methods;
        ::discovery_common::global_type_registry().declare(declaration);
    })
}

fn impl_registration(args: &DiscoverableArgs, item: &ItemImpl) -> Result<TokenStream> {
    reject_for(args.kind.is_some(), "kind", "impl 块", &item.self_ty)?;
    reject_for(args.extends.is_some(), "extends", "impl 块", &item.self_ty)?;
    reject_for(!args.implements.is_empty(), "implements", "impl 块", &item.self_ty)?;
    reject_for(!args.uses.is_empty(), "uses", "impl 块", &item.self_ty)?;

    let owner_ident = match item.self_ty.as_ref() {
        Type::Path(type_path) => type_path.path.segments.last().map(|segment| &segment.ident),
        _ => None,
    };
    let owner = match (args.name.as_ref(), owner_ident) {
        (Some(name), _) => quote! { #name },
        (None, Some(ident)) => name_expr(None, ident),
        (None, None) => {
            return Err(syn::Error::new_spanned(
                &item.self_ty,
                "无法推导类型名称，请使用 name = \"...\"",
            ))
        }
    };

    let mut extension = TokenStream::new();
    let trait_impl = item.trait_.as_ref();
    if let Some((_, path, _)) = trait_impl {
        let interface = match (&args.interface, path.segments.last()) {
            (Some(interface), _) => quote! { #interface },
            (None, Some(segment)) => name_expr(None, &segment.ident),
            (None, None) => {
                return Err(syn::Error::new_spanned(path, "无法推导接口名称"));
            }
        };
        extension.extend(quote! { .with_interface(#interface) });
    } else {
        reject_for(args.interface.is_some(), "interface", "固有 impl 块", &item.self_ty)?;
    }

    for impl_item in &item.items {
        if let ImplItem::Fn(function) = impl_item {
            let method = function.sig.ident.to_string();
            // trait 实现中的方法一律公开
            let visibility = if trait_impl.is_some() {
                public_tokens()
            } else {
                visibility_tokens(&function.vis)
            };
            extension.extend(quote! { .with_method(#method, #visibility) });
        }
    }

    Ok(quote! {
        let extension = ::discovery_common::TypeExtension::new() #extension;
        ::discovery_common::global_type_registry().extend(#owner, extension);
    })
}
