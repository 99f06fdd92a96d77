//! 服务注册器
//!
//! 把扫描结果写入服务注册表，不实例化任何类型。

use di_abstractions::{RegistrationEntry, ScanResult, ServiceKey, ServiceRegistry};
use infrastructure_common::{CandidateType, CapabilityDescriptor, Lifetime};
use std::sync::Arc;
use tracing::debug;

/// 服务注册器
#[derive(Debug, Default, Clone, Copy)]
pub struct ServiceRegistrar;

impl ServiceRegistrar {
    /// 注册全部扫描结果，返回追加的记录数
    ///
    /// 不与已有记录去重，重复扫描同一模块会产生重复记录。
    pub fn register<R>(registry: &mut R, results: &[ScanResult], lifetime: Lifetime) -> usize
    where
        R: ServiceRegistry + ?Sized,
    {
        results
            .iter()
            .map(|result| Self::register_candidate(registry, result.candidate(), lifetime))
            .sum()
    }

    /// 注册单个候选类型：每个不同的能力一条记录，再加一条自身类型记录
    pub fn register_candidate<R>(
        registry: &mut R,
        candidate: &CandidateType,
        lifetime: Lifetime,
    ) -> usize
    where
        R: ServiceRegistry + ?Sized,
    {
        let implementation = candidate.type_info().clone();
        let mut registered: Vec<&CapabilityDescriptor> = Vec::new();

        for binding in candidate.capabilities() {
            if registered.contains(&binding.descriptor()) {
                continue;
            }
            registered.push(binding.descriptor());

            registry.register(RegistrationEntry::new(
                ServiceKey::Capability(binding.descriptor().clone()),
                implementation.clone(),
                lifetime,
                Arc::clone(binding.factory()),
            ));
        }

        registry.register(RegistrationEntry::new(
            ServiceKey::OwnIdentity(candidate.identity().clone()),
            implementation,
            lifetime,
            Arc::clone(candidate.constructor()),
        ));

        let count = registered.len() + 1;
        debug!(
            "注册类型 {} ({}): {} 条记录",
            candidate.type_info(),
            lifetime,
            count
        );
        count
    }
}
