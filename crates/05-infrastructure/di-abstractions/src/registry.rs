//! 服务注册表抽象接口

use infrastructure_common::{CapabilityDescriptor, InstanceFactory, Lifetime, TypeInfo};
use std::fmt;

/// 注册键
///
/// 同一实现类型会以每个能力各注册一次，再以自身类型注册一次。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ServiceKey {
    /// 以实现的接口为键
    Capability(CapabilityDescriptor),
    /// 以实现类型自身为键
    OwnIdentity(CapabilityDescriptor),
}

impl ServiceKey {
    pub fn descriptor(&self) -> &CapabilityDescriptor {
        match self {
            ServiceKey::Capability(descriptor) | ServiceKey::OwnIdentity(descriptor) => descriptor,
        }
    }

    /// 解析时比较的类型信息
    pub fn type_info(&self) -> &TypeInfo {
        self.descriptor().type_info()
    }

    pub fn is_own_identity(&self) -> bool {
        matches!(self, ServiceKey::OwnIdentity(_))
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKey::Capability(descriptor) => write!(f, "{}", descriptor),
            ServiceKey::OwnIdentity(descriptor) => write!(f, "{} (self)", descriptor),
        }
    }
}

/// 注册记录
///
/// 工厂产出的 `Any` 内部保存键类型对应的 `Arc`。
#[derive(Clone)]
pub struct RegistrationEntry {
    /// 注册键
    pub key: ServiceKey,
    /// 实现类型
    pub implementation: TypeInfo,
    /// 生命周期
    pub lifetime: Lifetime,
    /// 实例工厂
    pub factory: InstanceFactory,
}

impl RegistrationEntry {
    pub fn new(
        key: ServiceKey,
        implementation: TypeInfo,
        lifetime: Lifetime,
        factory: InstanceFactory,
    ) -> Self {
        Self {
            key,
            implementation,
            lifetime,
            factory,
        }
    }

    /// 是否可以作为 `service` 的解析结果
    pub fn serves(&self, service: &TypeInfo) -> bool {
        self.key.type_info() == service
    }
}

impl fmt::Debug for RegistrationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationEntry")
            .field("key", &self.key)
            .field("implementation", &self.implementation.name)
            .field("lifetime", &self.lifetime)
            .field("factory", &"<function>")
            .finish()
    }
}

/// 服务注册表 trait
///
/// 只追加的多值映射，不做去重。
pub trait ServiceRegistry: Send + Sync {
    /// 追加注册记录
    fn register(&mut self, entry: RegistrationEntry);

    /// 按注册顺序返回全部记录
    fn entries(&self) -> &[RegistrationEntry];

    /// 是否存在可解析 `service` 的记录
    fn is_registered(&self, service: &TypeInfo) -> bool {
        self.entries().iter().any(|entry| entry.serves(service))
    }

    /// 可解析 `service` 的记录数量
    fn count_for(&self, service: &TypeInfo) -> usize {
        self.entries()
            .iter()
            .filter(|entry| entry.serves(service))
            .count()
    }

    fn len(&self) -> usize {
        self.entries().len()
    }

    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
