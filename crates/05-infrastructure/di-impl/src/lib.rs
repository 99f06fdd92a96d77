//! # 依赖注入具体实现
//!
//! 提供能力匹配、模块扫描、服务注册以及服务解析的具体实现
//!
//! ## 启动流程
//!
//! 1. 从 [`TypeCatalog`](infrastructure_common::TypeCatalog) 取得模块快照
//! 2. [`ModuleTypeScanner`] 按能力或标记筛选候选类型
//! 3. [`ServiceRegistrar`] 把结果写入 [`ServiceCollection`]
//! 4. 构建 [`ServiceProvider`] 后按生命周期解析实例

pub mod collection;
pub mod matcher;
pub mod provider;
pub mod registrar;
pub mod scanner;

pub use collection::ServiceCollection;
pub use matcher::CapabilityMatcher;
pub use provider::{ServiceProvider, ServiceScope};
pub use registrar::ServiceRegistrar;
pub use scanner::ModuleTypeScanner;
