//! 校验执行器

use crate::plan::PlanEntry;
use di_abstractions::ServiceLocator;
use futures::future::join_all;
use tracing::{info, warn};
use validation_abstractions::{ValidationFailedError, ValidationOutcome, ValidationRunError};

/// 校验执行器
///
/// 按计划顺序逐条解析规则，每条解析一次，全部规则在同一个任务中并发执行，
/// 只在最后汇合点等待。
#[derive(Debug, Default, Clone, Copy)]
pub struct ValidationExecutor;

impl ValidationExecutor {
    pub fn new() -> Self {
        Self
    }

    /// 执行计划，任意规则失败时返回合并后的校验失败
    ///
    /// 规则解析失败时立即返回，不执行任何规则。
    pub async fn ensure_valid(
        &self,
        locator: &dyn ServiceLocator,
        entries: Vec<PlanEntry>,
    ) -> Result<(), ValidationRunError> {
        let total = entries.len();
        let mut pending = Vec::with_capacity(total);

        for entry in entries {
            let rule_type = entry.rule_type().clone();
            let future = entry.start(locator).map_err(|e| {
                warn!("无法解析校验规则 {}: {}", rule_type, e);
                e
            })?;
            pending.push(future);
        }

        info!("执行 {} 条校验规则", total);
        let outcomes = join_all(pending).await;

        match merge_outcomes(outcomes) {
            ValidationOutcome::Success => Ok(()),
            ValidationOutcome::Failure(errors) => {
                warn!("校验失败: {}", errors);
                Err(ValidationFailedError::new(errors).into())
            }
        }
    }
}

/// 按顺序合并结果，从 `Success` 开始
///
/// 不含任何消息的失败视为无贡献。
pub fn merge_outcomes<I>(outcomes: I) -> ValidationOutcome
where
    I: IntoIterator<Item = ValidationOutcome>,
{
    outcomes
        .into_iter()
        .fold(ValidationOutcome::Success, |merged, outcome| match outcome {
            ValidationOutcome::Failure(errors) if errors.is_empty() => {
                warn!("规则返回了空的失败结果，已忽略");
                merged
            }
            outcome => merged.merge(outcome),
        })
}
