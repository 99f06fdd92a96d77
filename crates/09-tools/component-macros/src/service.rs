//! 服务注册宏实现

use crate::utils::{reject_generics, registration_fn_ident};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, punctuated::Punctuated, Expr, ItemStruct,
    Lit, Meta, Path, Result, Token, Type,
};

/// 服务生命周期类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceLifetime {
    Singleton,
    Scoped,
    Transient,
}

/// 服务配置参数
#[derive(Default)]
pub struct ServiceArgs {
    /// 未指定时使用注册时的默认生命周期
    pub lifetime: Option<ServiceLifetime>,
    pub group: Option<String>,
    pub implements: Vec<Type>,
    pub markers: Vec<Type>,
    /// `fn() -> Result<Self, DependencyError>`，未指定时使用 `Default`
    pub factory: Option<Path>,
}

impl ServiceArgs {
    fn set_lifetime(&mut self, meta: &Meta, lifetime: ServiceLifetime) -> Result<()> {
        if self.lifetime.is_some() {
            return Err(syn::Error::new_spanned(meta, "生命周期只能指定一次"));
        }
        self.lifetime = Some(lifetime);
        Ok(())
    }
}

impl Parse for ServiceArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = ServiceArgs::default();

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            match &meta {
                Meta::Path(path) => {
                    if path.is_ident("singleton") {
                        args.set_lifetime(&meta, ServiceLifetime::Singleton)?;
                    } else if path.is_ident("scoped") {
                        args.set_lifetime(&meta, ServiceLifetime::Scoped)?;
                    } else if path.is_ident("transient") {
                        args.set_lifetime(&meta, ServiceLifetime::Transient)?;
                    } else {
                        return Err(syn::Error::new_spanned(path, "未知的服务参数"));
                    }
                }
                Meta::List(list) => {
                    let types = list.parse_args_with(Punctuated::<Type, Token![,]>::parse_terminated)?;
                    if list.path.is_ident("implements") {
                        args.implements.extend(types);
                    } else if list.path.is_ident("markers") {
                        args.markers.extend(types);
                    } else {
                        return Err(syn::Error::new_spanned(&list.path, "未知的服务参数"));
                    }
                }
                Meta::NameValue(nv) => {
                    if nv.path.is_ident("group") {
                        match &nv.value {
                            Expr::Lit(expr_lit) => match &expr_lit.lit {
                                Lit::Str(lit_str) => args.group = Some(lit_str.value()),
                                other => {
                                    return Err(syn::Error::new_spanned(other, "group 必须是字符串"))
                                }
                            },
                            other => {
                                return Err(syn::Error::new_spanned(other, "group 必须是字符串"))
                            }
                        }
                    } else if nv.path.is_ident("factory") {
                        args.factory = Some(match &nv.value {
                            Expr::Path(expr_path) => expr_path.path.clone(),
                            Expr::Lit(expr_lit) => match &expr_lit.lit {
                                Lit::Str(lit_str) => lit_str.parse::<Path>()?,
                                other => {
                                    return Err(syn::Error::new_spanned(other, "factory 必须是函数路径"))
                                }
                            },
                            other => {
                                return Err(syn::Error::new_spanned(other, "factory 必须是函数路径"))
                            }
                        });
                    } else {
                        return Err(syn::Error::new_spanned(&nv.path, "未知的服务参数"));
                    }
                }
            }
        }

        Ok(args)
    }
}

/// 实现 #[service] 宏
pub fn service_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let service_args = match syn::parse::<ServiceArgs>(args) {
        Ok(args) => args,
        Err(e) => return e.to_compile_error().into(),
    };

    let input_struct = parse_macro_input!(input as ItemStruct);

    match expand(service_args, input_struct) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(e) => e.to_compile_error().into(),
    }
}

/// 生成 `Registrable` 实现和启动期注册代码
pub fn expand(args: ServiceArgs, input_struct: ItemStruct) -> Result<TokenStream2> {
    reject_generics(&input_struct.generics)?;

    let struct_name = &input_struct.ident;

    let constructor = match &args.factory {
        Some(factory) => quote! { #factory },
        None => quote! {
            || ::std::result::Result::Ok(<#struct_name as ::std::default::Default>::default())
        },
    };

    let capabilities = args.implements.iter().map(|capability| {
        quote! {
            .implements::<#capability>(
                |instance: ::std::sync::Arc<#struct_name>| -> ::std::sync::Arc<#capability> {
                    instance
                },
            )
        }
    });

    let marker_type = match args.lifetime {
        Some(ServiceLifetime::Singleton) => quote! { ::infrastructure_common::SingletonService },
        Some(ServiceLifetime::Scoped) => quote! { ::infrastructure_common::ScopedService },
        Some(ServiceLifetime::Transient) => quote! { ::infrastructure_common::TransientService },
        None => quote! { ::infrastructure_common::ServiceAttribute },
    };

    let group = match &args.group {
        Some(group) => quote! { ::std::option::Option::Some(#group) },
        None => quote! { ::std::option::Option::None },
    };

    let markers = args.markers.iter().map(|marker| {
        quote! { .marker(::infrastructure_common::MarkerAttribute::of::<#marker>()) }
    });

    let registration_fn_name = registration_fn_ident(struct_name);

    Ok(quote! {
        #input_struct

        impl ::infrastructure_common::Registrable for #struct_name {
            fn candidate() -> ::infrastructure_common::CandidateType {
                ::infrastructure_common::CandidateType::builder(#constructor)
                    #(#capabilities)*
                    .marker(::infrastructure_common::MarkerAttribute::service::<#marker_type>(#group))
                    #(#markers)*
                    .build()
            }
        }

        // 程序启动前提交到全局类型目录
        #[::ctor::ctor]
        fn #registration_fn_name() {
            ::infrastructure_common::global_type_catalog().submit(
                ::std::module_path!(),
                <#struct_name as ::infrastructure_common::Registrable>::candidate,
            );
        }
    })
}
