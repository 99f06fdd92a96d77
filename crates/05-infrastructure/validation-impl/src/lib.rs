//! # Validation Implementation
//!
//! 流式校验管道：[`Validator`] 累积 (规则类型, 数据) 计划，
//! [`ValidationExecutor`] 通过服务定位器解析规则、并发执行并合并结果。
//!
//! ```ignore
//! validator
//!     .require::<NameRule>()
//!     .with_data(order.name.clone())
//!     .require::<AmountRule>()
//!     .with_data(order.amount)
//!     .ensure_valid()
//!     .await?;
//! ```

pub mod executor;
pub mod plan;
pub mod validator;

pub use executor::{merge_outcomes, ValidationExecutor};
pub use plan::PlanEntry;
pub use validator::{PendingRule, ValidationPlan, Validator};
