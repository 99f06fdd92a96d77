//! 流式校验构建器
//!
//! `require` 之后只能调用 `with_data`，因此未绑定数据的规则无法进入执行阶段：
//!
//! ```compile_fail
//! use validation_abstractions::ValidationRule;
//! use validation_impl::Validator;
//!
//! async fn run(validator: Validator) {
//!     validator
//!         .require::<dyn ValidationRule<String>>()
//!         .ensure_valid()
//!         .await;
//! }
//! ```

use crate::executor::ValidationExecutor;
use crate::plan::PlanEntry;
use di_abstractions::ServiceLocator;
use infrastructure_common::TypeInfo;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;
use validation_abstractions::{ValidationRule, ValidationRunError};

/// 校验入口
///
/// 每次 `require` 或 `plan` 都开始一个新的计划。
#[derive(Clone)]
pub struct Validator {
    locator: Arc<dyn ServiceLocator>,
    executor: ValidationExecutor,
}

impl Validator {
    pub fn new(locator: Arc<dyn ServiceLocator>) -> Self {
        Self {
            locator,
            executor: ValidationExecutor::new(),
        }
    }

    /// 开始一个空计划
    pub fn plan(&self) -> ValidationPlan {
        ValidationPlan {
            locator: Arc::clone(&self.locator),
            executor: self.executor,
            entries: Vec::new(),
        }
    }

    /// 开始新计划并加入第一条规则
    pub fn require<R>(&self) -> PendingRule<R>
    where
        R: ?Sized + 'static,
    {
        self.plan().require::<R>()
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}

/// 已完成配对的计划，可以继续 `require` 或执行
pub struct ValidationPlan {
    locator: Arc<dyn ServiceLocator>,
    executor: ValidationExecutor,
    entries: Vec<PlanEntry>,
}

impl ValidationPlan {
    /// 加入规则，随后必须调用 `with_data`
    pub fn require<R>(self) -> PendingRule<R>
    where
        R: ?Sized + 'static,
    {
        PendingRule {
            plan: self,
            _rule: PhantomData,
        }
    }

    /// 计划中的规则数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按计划顺序返回规则类型
    pub fn rule_types(&self) -> impl Iterator<Item = &TypeInfo> {
        self.entries.iter().map(PlanEntry::rule_type)
    }

    /// 执行计划，消费构建器
    ///
    /// 全部规则成功时返回 `Ok(())`；任意规则失败时返回
    /// [`ValidationRunError::Failed`]；规则无法解析时返回
    /// [`ValidationRunError::Resolution`]。
    pub async fn ensure_valid(self) -> Result<(), ValidationRunError> {
        debug!("开始校验: {} 条规则", self.entries.len());
        self.executor
            .ensure_valid(self.locator.as_ref(), self.entries)
            .await
    }
}

impl std::fmt::Debug for ValidationPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationPlan")
            .field("entries", &self.entries)
            .finish()
    }
}

/// 等待绑定数据的规则
#[must_use = "规则必须通过 with_data 绑定数据"]
pub struct PendingRule<R: ?Sized> {
    plan: ValidationPlan,
    _rule: PhantomData<fn() -> Box<R>>,
}

impl<R> PendingRule<R>
where
    R: ?Sized + 'static,
{
    /// 绑定规则要校验的数据
    pub fn with_data<T>(self, data: T) -> ValidationPlan
    where
        R: ValidationRule<T>,
        T: Send + 'static,
    {
        let mut plan = self.plan;
        plan.entries.push(PlanEntry::new::<R, T>(data));
        plan
    }
}
