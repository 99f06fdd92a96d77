//! 服务定位器抽象接口
//!
//! 按类型解析已注册的实例

use infrastructure_common::{DependencyError, TypeInfo};
use std::any::Any;
use std::sync::Arc;

/// 类型擦除的实例，内部保存 `Arc<I>`
pub type ErasedInstance = Arc<dyn Any + Send + Sync>;

/// 服务定位器 trait
///
/// 对象安全，可以以 `Arc<dyn ServiceLocator>` 形式共享。并发解析必须安全。
pub trait ServiceLocator: Send + Sync {
    /// 解析 `service` 的最后一条注册
    fn resolve_instance(&self, service: &TypeInfo) -> Result<ErasedInstance, DependencyError>;

    /// 按注册顺序解析 `service` 的全部注册
    fn resolve_all_instances(
        &self,
        service: &TypeInfo,
    ) -> Result<Vec<ErasedInstance>, DependencyError>;

    /// 检查是否可以解析
    fn can_resolve(&self, service: &TypeInfo) -> bool;
}

/// 带类型参数的解析方法
pub trait ServiceLocatorExt: ServiceLocator {
    /// 解析 `I`，`I` 可以是 trait object
    fn resolve<I>(&self) -> Result<Arc<I>, DependencyError>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let instance = self.resolve_instance(&TypeInfo::of::<I>())?;
        downcast_instance::<I>(&instance)
    }

    /// 解析 `I` 的全部注册
    fn resolve_all<I>(&self) -> Result<Vec<Arc<I>>, DependencyError>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.resolve_all_instances(&TypeInfo::of::<I>())?
            .iter()
            .map(downcast_instance::<I>)
            .collect()
    }

    fn is_resolvable<I>(&self) -> bool
    where
        I: ?Sized + 'static,
    {
        self.can_resolve(&TypeInfo::of::<I>())
    }
}

impl<L: ServiceLocator + ?Sized> ServiceLocatorExt for L {}

/// 把类型擦除的实例还原为 `Arc<I>`
pub fn downcast_instance<I>(instance: &ErasedInstance) -> Result<Arc<I>, DependencyError>
where
    I: ?Sized + Send + Sync + 'static,
{
    (**instance)
        .downcast_ref::<Arc<I>>()
        .cloned()
        .ok_or_else(|| {
            DependencyError::type_mismatch(std::any::type_name::<I>(), "实例类型与注册键不一致")
        })
}
