//! # Infrastructure Common
//!
//! 这个 crate 提供了 Keel 工具包基础设施层的公共类型和工具。
//!
//! ## 核心组件
//!
//! - [`TypeInfo`] / [`CapabilityDescriptor`] - 类型与能力元数据
//! - [`MarkerAttribute`] - 声明式标记
//! - [`CandidateType`] / [`TypeModule`] / [`TypeCatalog`] - 初始化阶段构建的类型注册表
//! - [`Lifetime`] - 注册生命周期
//! - [`RegistrationOptions`] - 注册配置
//!
//! ## 设计原则
//!
//! - 用显式注册表替代运行时反射
//! - 基于 Rust 类型系统的编译时安全
//! - 配置错误同步返回，不延迟

pub mod configuration;
pub mod discovery;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use configuration::*;
pub use discovery::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
