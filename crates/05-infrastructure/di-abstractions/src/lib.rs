//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义服务注册、类型扫描和服务解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`ServiceRegistry`] - 只追加的服务注册表
//! - [`TypeScanner`] - 类型扫描器接口
//! - [`ServiceLocator`] - 服务定位器接口

pub mod registry;
pub mod resolver;
pub mod scanner;

pub use registry::*;
pub use resolver::*;
pub use scanner::*;
