//! 服务集合
//!
//! 启动阶段单线程填充的注册表，完成后构建为 [`ServiceProvider`]。

use crate::provider::ServiceProvider;
use crate::registrar::ServiceRegistrar;
use crate::scanner::ModuleTypeScanner;
use di_abstractions::{RegistrationEntry, ScanResult, ServiceKey, ServiceRegistry, TypeScanner};
use infrastructure_common::{
    CapabilityDescriptor, ComponentError, DependencyError, InstanceFactory, Lifetime,
    MarkerAttribute, RegistrationOptions, ServiceAttribute, TypeCatalog, TypeInfo, TypeModule,
};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, info};

/// 服务集合
#[derive(Debug, Clone, Default)]
pub struct ServiceCollection {
    entries: Vec<RegistrationEntry>,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册模块中实现 `requested` 的全部类型，返回追加的记录数
    pub fn add_types_implementing_capability(
        &mut self,
        module: &TypeModule,
        requested: &CapabilityDescriptor,
        lifetime: Lifetime,
    ) -> Result<usize, ComponentError> {
        let results = ModuleTypeScanner::new().scan_by_capability(module, requested)?;
        let count = self.add_scanned(&results, lifetime);
        info!(
            "按能力 {} 注册模块 {}: {} 个类型, {} 条记录",
            requested,
            module.name(),
            results.len(),
            count
        );
        Ok(count)
    }

    /// 注册模块中带有可赋值给 `marker` 的标记的全部类型
    pub fn add_types_with_marker(
        &mut self,
        module: &TypeModule,
        marker: &CapabilityDescriptor,
        lifetime: Lifetime,
    ) -> Result<usize, ComponentError> {
        let results = ModuleTypeScanner::new().scan_by_marker(module, marker)?;
        let count = self.add_scanned(&results, lifetime);
        info!(
            "按标记 {} 注册模块 {}: {} 个类型, {} 条记录",
            marker,
            module.name(),
            results.len(),
            count
        );
        Ok(count)
    }

    /// 注册模块中带有服务标记的类型
    ///
    /// 只选取分组与 `group` 相同的标记，`group` 为 `None` 时只选取未分组的标记。
    /// 生命周期取第一个选中标记声明的值，未声明时使用 `default_lifetime`。
    pub fn add_attribute_services(
        &mut self,
        module: &TypeModule,
        group: Option<&str>,
        default_lifetime: Lifetime,
    ) -> Result<usize, ComponentError> {
        let service_marker = CapabilityDescriptor::marker::<ServiceAttribute>();
        let results = ModuleTypeScanner::new().scan_by_marker(module, &service_marker)?;

        let mut count = 0;
        for result in &results {
            let selected: Option<&MarkerAttribute> =
                result.candidate().markers().iter().find(|marker| {
                    marker.is_assignable_to(&service_marker) && marker.group() == group
                });

            let Some(marker) = selected else {
                debug!("类型 {} 不属于分组 {:?}, 跳过", result.candidate().type_info(), group);
                continue;
            };

            let lifetime = marker.lifetime().unwrap_or(default_lifetime);
            count += ServiceRegistrar::register_candidate(self, result.candidate(), lifetime);
        }

        info!("注册模块 {} 的服务 (分组 {:?}): {} 条记录", module.name(), group, count);
        Ok(count)
    }

    /// 按配置扫描目录中的模块
    pub fn apply_options(
        &mut self,
        options: &RegistrationOptions,
        catalog: &TypeCatalog,
    ) -> Result<usize, ComponentError> {
        let mut count = 0;
        for path in &options.modules {
            let module = catalog.module(path)?;
            count += self.add_attribute_services(
                &module,
                options.attribute_group.as_deref(),
                options.default_lifetime,
            )?;
        }
        Ok(count)
    }

    /// 注册其他扫描器产出的结果
    pub fn add_scanned(&mut self, results: &[ScanResult], lifetime: Lifetime) -> usize {
        ServiceRegistrar::register(self, results, lifetime)
    }

    /// 以 `I` 为键注册工厂
    pub fn add_service<I, F>(&mut self, lifetime: Lifetime, factory: F) -> &mut Self
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn() -> Result<Arc<I>, DependencyError> + Send + Sync + 'static,
    {
        let factory: InstanceFactory =
            Arc::new(move || Ok(Arc::new(factory()?) as Arc<dyn Any + Send + Sync>));

        self.register(RegistrationEntry::new(
            ServiceKey::Capability(CapabilityDescriptor::interface::<I>()),
            TypeInfo::of::<I>(),
            lifetime,
            factory,
        ));
        self
    }

    pub fn add_transient<I, F>(&mut self, factory: F) -> &mut Self
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn() -> Result<Arc<I>, DependencyError> + Send + Sync + 'static,
    {
        self.add_service(Lifetime::Transient, factory)
    }

    pub fn add_scoped<I, F>(&mut self, factory: F) -> &mut Self
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn() -> Result<Arc<I>, DependencyError> + Send + Sync + 'static,
    {
        self.add_service(Lifetime::Scoped, factory)
    }

    pub fn add_singleton<I, F>(&mut self, factory: F) -> &mut Self
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn() -> Result<Arc<I>, DependencyError> + Send + Sync + 'static,
    {
        self.add_service(Lifetime::Singleton, factory)
    }

    /// 注册已有实例
    pub fn add_instance<I>(&mut self, instance: Arc<I>) -> &mut Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.add_service(Lifetime::Singleton, move || Ok(Arc::clone(&instance)))
    }

    /// 构建服务提供者
    pub fn build_provider(self) -> ServiceProvider {
        info!("构建服务提供者: {} 条注册记录", self.entries.len());
        ServiceProvider::new(self.entries)
    }
}

impl ServiceRegistry for ServiceCollection {
    fn register(&mut self, entry: RegistrationEntry) {
        self.entries.push(entry);
    }

    fn entries(&self) -> &[RegistrationEntry] {
        &self.entries
    }
}
