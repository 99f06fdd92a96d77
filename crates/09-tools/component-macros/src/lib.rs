//! # Component Macros
//!
//! 这个 crate 提供了用于服务自动注册的过程宏。
//!
//! ## 核心宏
//!
//! - [`service`] - 生成 `Registrable` 实现，并在程序启动前提交到全局类型目录
//!
//! ## 使用示例
//!
//! ```ignore
//! use component_macros::service;
//!
//! pub trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! #[derive(Default)]
//! #[service(singleton, group = "greetings", implements(dyn Greeter))]
//! pub struct EnglishGreeter;
//!
//! impl Greeter for EnglishGreeter {
//!     fn greet(&self) -> String {
//!         "hello".to_string()
//!     }
//! }
//! ```
//!
//! 使用方需要依赖 `infrastructure-common` 和 `ctor`。

use proc_macro::TokenStream;

mod service;
mod utils;

/// 服务注册宏
///
/// # 参数
///
/// - `singleton` / `scoped` / `transient` - 标记声明的生命周期，省略时由注册方决定
/// - `group = "name"` - 服务分组
/// - `implements(dyn A, dyn B<X>)` - 实现的接口
/// - `markers(M)` - 额外的标记类型
/// - `factory = "path"` - 构造函数 `fn() -> Result<Self, DependencyError>`，默认使用 `Default`
///
/// 不支持泛型结构体。
#[proc_macro_attribute]
pub fn service(args: TokenStream, input: TokenStream) -> TokenStream {
    service::service_impl(args, input)
}
