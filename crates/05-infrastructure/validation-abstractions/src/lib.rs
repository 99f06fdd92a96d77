//! # Validation Abstractions
//!
//! 校验抽象层，定义规则接口、校验结果以及校验错误。
//!
//! ## 核心类型
//!
//! - [`ValidationRule`] - 异步校验规则
//! - [`ValidationOutcome`] / [`ResultErrors`] - 校验结果与错误映射
//! - [`ValidationRunError`] - 区分领域校验失败与规则解析失败

pub mod error;
pub mod outcome;
pub mod rule;

pub use error::*;
pub use outcome::*;
pub use rule::*;
