//! 校验计划条目

use di_abstractions::{ServiceLocator, ServiceLocatorExt};
use futures::future::{BoxFuture, FutureExt};
use infrastructure_common::{DependencyError, TypeInfo};
use std::fmt;
use validation_abstractions::{ValidationOutcome, ValidationRule};

type StartRule = Box<
    dyn FnOnce(&dyn ServiceLocator) -> Result<BoxFuture<'static, ValidationOutcome>, DependencyError>
        + Send,
>;

/// 计划条目：规则类型与绑定的数据
///
/// 创建后不可修改，只由执行器消费一次。
pub struct PlanEntry {
    rule_type: TypeInfo,
    start: StartRule,
}

impl PlanEntry {
    /// 创建条目，执行时从服务定位器解析 `R`
    pub fn new<R, T>(data: T) -> Self
    where
        R: ValidationRule<T> + ?Sized + 'static,
        T: Send + 'static,
    {
        Self {
            rule_type: TypeInfo::of::<R>(),
            start: Box::new(
                move |locator: &dyn ServiceLocator| -> Result<
                    BoxFuture<'static, ValidationOutcome>,
                    DependencyError,
                > {
                    let rule = locator.resolve::<R>()?;
                    Ok(async move { rule.validate(data).await }.boxed())
                },
            ),
        }
    }

    /// 规则类型
    pub fn rule_type(&self) -> &TypeInfo {
        &self.rule_type
    }

    /// 解析规则实例并返回尚未执行的校验 future
    pub fn start(
        self,
        locator: &dyn ServiceLocator,
    ) -> Result<BoxFuture<'static, ValidationOutcome>, DependencyError> {
        (self.start)(locator)
    }
}

impl fmt::Debug for PlanEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanEntry")
            .field("rule_type", &self.rule_type.name)
            .finish()
    }
}
