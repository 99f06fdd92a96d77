//! 校验规则抽象接口

use crate::outcome::ValidationOutcome;
use async_trait::async_trait;

/// 校验规则 trait
///
/// 规则通过服务定位器以 `dyn ValidationRule<T>` 解析，每次执行按值接收数据。
/// 规则自己负责超时与取消。
#[async_trait]
pub trait ValidationRule<T>: Send + Sync
where
    T: Send + 'static,
{
    /// 校验数据
    async fn validate(&self, data: T) -> ValidationOutcome;
}
