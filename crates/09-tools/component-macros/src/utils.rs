//! 宏工具函数

use proc_macro2::Span;
use syn::{Generics, Ident, Result};

/// 泛型结构体无法在定义处确定具体类型，不能注册
pub fn reject_generics(generics: &Generics) -> Result<()> {
    if generics.params.is_empty() {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            generics,
            "#[service] 不支持泛型结构体，请为具体实例化手动实现 Registrable",
        ))
    }
}

/// 生成启动期注册函数名
pub fn registration_fn_ident(struct_name: &Ident) -> Ident {
    let name = format!("__keel_register_{}", to_snake_case(&struct_name.to_string()));
    Ident::new(&name, Span::call_site())
}

/// 将驼峰命名转换为蛇形命名
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            // 检查前一个字符是否为小写，或者下一个字符是否为小写
            let prev_is_lower = chars.get(i - 1).is_some_and(|c| c.is_lowercase());
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());

            if (prev_is_lower || next_is_lower) && !result.ends_with('_') {
                result.push('_');
            }
        }
        result.push(ch.to_lowercase().next().unwrap_or(ch));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("MyService"), "my_service");
        assert_eq!(to_snake_case("HTTPClient"), "http_client");
        assert_eq!(to_snake_case("SucceededRule"), "succeeded_rule");
        assert_eq!(to_snake_case("Order_Rule"), "order_rule");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn test_registration_fn_ident() {
        let ident = Ident::new("XmlParser", Span::call_site());
        assert_eq!(registration_fn_ident(&ident).to_string(), "__keel_register_xml_parser");
    }

    #[test]
    fn test_reject_generics() {
        let plain: syn::ItemStruct = syn::parse_str("struct Plain;").unwrap();
        assert!(reject_generics(&plain.generics).is_ok());

        let generic: syn::ItemStruct = syn::parse_str("struct Holder<'a> { v: &'a str }").unwrap();
        assert!(reject_generics(&generic.generics).is_err());
    }
}
