//! 服务提供者
//!
//! 按注册记录的生命周期解析实例。同一个键有多条记录时解析最后一条。
//! 单例按记录缓存，同一实现类型在不同键下得到各自独立的实例。

use dashmap::DashMap;
use di_abstractions::{ErasedInstance, RegistrationEntry, ServiceLocator};
use infrastructure_common::{DependencyError, Lifetime, Scope, TypeInfo};
use once_cell::sync::OnceCell;
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

struct ProviderEntry {
    registration: RegistrationEntry,
    singleton: OnceCell<ErasedInstance>,
}

struct ProviderInner {
    entries: Vec<ProviderEntry>,
    index: HashMap<TypeId, Vec<usize>>,
}

impl ProviderInner {
    fn positions(&self, service: &TypeInfo) -> &[usize] {
        self.index
            .get(&service.id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn instantiate(
        &self,
        position: usize,
        scope_cache: &DashMap<usize, ErasedInstance>,
    ) -> Result<ErasedInstance, DependencyError> {
        let entry = &self.entries[position];
        let registration = &entry.registration;

        match registration.lifetime {
            Lifetime::Transient => (registration.factory)(),
            Lifetime::Singleton => entry
                .singleton
                .get_or_try_init(|| (registration.factory)())
                .map(Arc::clone),
            Lifetime::Scoped => scope_cache
                .entry(position)
                .or_try_insert_with(|| (registration.factory)())
                .map(|instance| Arc::clone(instance.value())),
        }
    }

    fn resolve(
        &self,
        service: &TypeInfo,
        scope_cache: &DashMap<usize, ErasedInstance>,
    ) -> Result<ErasedInstance, DependencyError> {
        let position = self
            .positions(service)
            .last()
            .copied()
            .ok_or_else(|| DependencyError::not_registered(&service.name))?;

        debug!(
            "解析服务 {} -> {} ({})",
            service,
            self.entries[position].registration.implementation,
            self.entries[position].registration.lifetime
        );
        self.instantiate(position, scope_cache)
    }

    fn resolve_all(
        &self,
        service: &TypeInfo,
        scope_cache: &DashMap<usize, ErasedInstance>,
    ) -> Result<Vec<ErasedInstance>, DependencyError> {
        self.positions(service)
            .iter()
            .map(|&position| self.instantiate(position, scope_cache))
            .collect()
    }
}

/// 服务提供者
///
/// 本身充当根作用域。可以在多个任务间共享。
#[derive(Clone)]
pub struct ServiceProvider {
    inner: Arc<ProviderInner>,
    root: Arc<ServiceScope>,
}

impl ServiceProvider {
    pub(crate) fn new(registrations: Vec<RegistrationEntry>) -> Self {
        let mut index: HashMap<TypeId, Vec<usize>> = HashMap::new();
        let entries = registrations
            .into_iter()
            .enumerate()
            .map(|(position, registration)| {
                index
                    .entry(registration.key.type_info().id)
                    .or_default()
                    .push(position);
                ProviderEntry {
                    registration,
                    singleton: OnceCell::new(),
                }
            })
            .collect();

        let inner = Arc::new(ProviderInner { entries, index });
        let root = Arc::new(ServiceScope::new(Arc::clone(&inner), Scope::root()));
        Self { inner, root }
    }

    /// 创建新的作用域，作用域实例在该作用域内共享
    pub fn create_scope(&self, name: impl Into<String>) -> ServiceScope {
        ServiceScope::new(Arc::clone(&self.inner), self.root.scope.child(name))
    }

    /// 根作用域
    pub fn root_scope(&self) -> &ServiceScope {
        &self.root
    }

    /// 注册记录数量
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }
}

impl ServiceLocator for ServiceProvider {
    fn resolve_instance(&self, service: &TypeInfo) -> Result<ErasedInstance, DependencyError> {
        self.root.resolve_instance(service)
    }

    fn resolve_all_instances(
        &self,
        service: &TypeInfo,
    ) -> Result<Vec<ErasedInstance>, DependencyError> {
        self.root.resolve_all_instances(service)
    }

    fn can_resolve(&self, service: &TypeInfo) -> bool {
        !self.inner.positions(service).is_empty()
    }
}

impl fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("registrations", &self.inner.entries.len())
            .field("services", &self.inner.index.len())
            .finish()
    }
}

/// 服务作用域
pub struct ServiceScope {
    inner: Arc<ProviderInner>,
    scope: Scope,
    instances: DashMap<usize, ErasedInstance>,
}

impl ServiceScope {
    fn new(inner: Arc<ProviderInner>, scope: Scope) -> Self {
        debug!("创建作用域: {} ({})", scope.name, scope.id);
        Self {
            inner,
            scope,
            instances: DashMap::new(),
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// 创建子作用域，不共享当前作用域的实例
    pub fn create_child(&self, name: impl Into<String>) -> ServiceScope {
        ServiceScope::new(Arc::clone(&self.inner), self.scope.child(name))
    }
}

impl ServiceLocator for ServiceScope {
    fn resolve_instance(&self, service: &TypeInfo) -> Result<ErasedInstance, DependencyError> {
        self.inner.resolve(service, &self.instances)
    }

    fn resolve_all_instances(
        &self,
        service: &TypeInfo,
    ) -> Result<Vec<ErasedInstance>, DependencyError> {
        self.inner.resolve_all(service, &self.instances)
    }

    fn can_resolve(&self, service: &TypeInfo) -> bool {
        !self.inner.positions(service).is_empty()
    }
}

impl fmt::Debug for ServiceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceScope")
            .field("scope", &self.scope)
            .field("instances", &self.instances.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::ServiceCollection;
    use di_abstractions::ServiceLocatorExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    trait Counter: Send + Sync {
        fn id(&self) -> usize;
    }

    struct Numbered(usize);

    impl Counter for Numbered {
        fn id(&self) -> usize {
            self.0
        }
    }

    fn counting_factory(
        created: Arc<AtomicUsize>,
    ) -> impl Fn() -> Result<Arc<dyn Counter>, DependencyError> + Send + Sync + 'static {
        move || {
            let id = created.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(Numbered(id)) as Arc<dyn Counter>)
        }
    }

    #[test]
    fn test_transient_creates_new_instances() {
        let created = Arc::new(AtomicUsize::new(0));
        let mut services = ServiceCollection::new();
        services.add_transient(counting_factory(Arc::clone(&created)));
        let provider = services.build_provider();

        let first = provider.resolve::<dyn Counter>().unwrap();
        let second = provider.resolve::<dyn Counter>().unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(created.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_singleton_is_cached() {
        let created = Arc::new(AtomicUsize::new(0));
        let mut services = ServiceCollection::new();
        services.add_singleton(counting_factory(Arc::clone(&created)));
        let provider = services.build_provider();

        let first = provider.resolve::<dyn Counter>().unwrap();
        let second = provider.create_scope("request").resolve::<dyn Counter>().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_scoped_is_cached_per_scope() {
        let created = Arc::new(AtomicUsize::new(0));
        let mut services = ServiceCollection::new();
        services.add_scoped(counting_factory(Arc::clone(&created)));
        let provider = services.build_provider();

        let scope = provider.create_scope("request");
        let first = scope.resolve::<dyn Counter>().unwrap();
        let second = scope.resolve::<dyn Counter>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let other = provider.create_scope("other").resolve::<dyn Counter>().unwrap();
        assert!(!Arc::ptr_eq(&first, &other));

        let root_first = provider.resolve::<dyn Counter>().unwrap();
        let root_second = provider.resolve::<dyn Counter>().unwrap();
        assert!(Arc::ptr_eq(&root_first, &root_second));
        assert_eq!(created.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_last_registration_wins_and_resolve_all_keeps_order() {
        let mut services = ServiceCollection::new();
        services
            .add_instance::<dyn Counter>(Arc::new(Numbered(1)))
            .add_instance::<dyn Counter>(Arc::new(Numbered(2)));
        let provider = services.build_provider();

        assert_eq!(provider.resolve::<dyn Counter>().unwrap().id(), 2);
        let all: Vec<usize> = provider
            .resolve_all::<dyn Counter>()
            .unwrap()
            .iter()
            .map(|counter| counter.id())
            .collect();
        assert_eq!(all, vec![1, 2]);
    }

    #[test]
    fn test_unregistered_service() {
        let provider = ServiceCollection::new().build_provider();

        assert!(matches!(
            provider.resolve::<dyn Counter>(),
            Err(DependencyError::ComponentNotRegistered { .. })
        ));
        assert!(!provider.is_resolvable::<dyn Counter>());
        assert!(provider.resolve_all::<dyn Counter>().unwrap().is_empty());
    }

    #[test]
    fn test_factory_failure_is_not_cached() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let mut services = ServiceCollection::new();
        services.add_singleton::<dyn Counter, _>(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(DependencyError::creation_failed("Numbered", "连接尚未就绪"))
            } else {
                Ok(Arc::new(Numbered(7)))
            }
        });
        let provider = services.build_provider();

        assert!(matches!(
            provider.resolve::<dyn Counter>(),
            Err(DependencyError::ComponentCreationFailed { .. })
        ));
        assert_eq!(provider.resolve::<dyn Counter>().unwrap().id(), 7);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_singleton_resolution() {
        let created = Arc::new(AtomicUsize::new(0));
        let mut services = ServiceCollection::new();
        services.add_singleton(counting_factory(Arc::clone(&created)));
        let provider = services.build_provider();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let provider = provider.clone();
                tokio::spawn(async move { provider.resolve::<dyn Counter>().map(|c| c.id()) })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), 0);
        }
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }
}
