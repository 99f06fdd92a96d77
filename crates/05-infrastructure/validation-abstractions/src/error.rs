//! 校验错误类型

use crate::outcome::ResultErrors;
use infrastructure_common::DependencyError;
use thiserror::Error;

/// 校验失败
///
/// 正常使用中预期出现的领域结果，携带合并后的全部错误消息。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("校验失败: {errors}")]
pub struct ValidationFailedError {
    errors: ResultErrors,
}

impl ValidationFailedError {
    pub fn new(errors: ResultErrors) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &ResultErrors {
        &self.errors
    }

    pub fn into_errors(self) -> ResultErrors {
        self.errors
    }
}

/// 一次校验执行的错误
#[derive(Error, Debug)]
pub enum ValidationRunError {
    /// 至少一条规则失败
    #[error(transparent)]
    Failed(#[from] ValidationFailedError),

    /// 规则无法解析，属于调用方配置缺陷
    #[error("规则解析失败: {0}")]
    Resolution(#[from] DependencyError),
}

impl ValidationRunError {
    /// 是否为领域校验失败（而不是配置错误）
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// 校验失败时返回错误映射
    pub fn validation_errors(&self) -> Option<&ResultErrors> {
        match self {
            Self::Failed(failure) => Some(failure.errors()),
            Self::Resolution(_) => None,
        }
    }
}

/// 结果类型别名
pub type ValidationResult<T> = Result<T, ValidationRunError>;
