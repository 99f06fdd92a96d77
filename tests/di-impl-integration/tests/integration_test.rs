//! Centralized integration tests for di-impl crate
use di_abstractions::{ServiceLocatorExt, ServiceRegistry};
use di_impl::ServiceCollection;
use infrastructure_common::{
    CandidateType, CapabilityDescriptor, Lifetime, MarkerAttribute, RegistrationOptions,
    SingletonService, TransientService, TypeCatalog, TypeInfo,
};
use std::sync::Arc;

pub trait Handler<T>: Send + Sync {
    fn handle(&self, value: T) -> String;
}

pub struct Created;
pub struct Cancelled;

#[derive(Default)]
struct CreatedHandler;

impl Handler<Created> for CreatedHandler {
    fn handle(&self, _value: Created) -> String {
        "created".to_string()
    }
}

#[derive(Default)]
struct AuditHandler;

impl Handler<Created> for AuditHandler {
    fn handle(&self, _value: Created) -> String {
        "audit created".to_string()
    }
}

impl Handler<Cancelled> for AuditHandler {
    fn handle(&self, _value: Cancelled) -> String {
        "audit cancelled".to_string()
    }
}

fn created_handler() -> CandidateType {
    CandidateType::builder(|| Ok(CreatedHandler))
        .implements::<dyn Handler<Created>>(|h: Arc<CreatedHandler>| -> Arc<dyn Handler<Created>> { h })
        .marker(MarkerAttribute::service::<TransientService>(None))
        .build()
}

fn audit_handler() -> CandidateType {
    CandidateType::builder(|| Ok(AuditHandler))
        .implements::<dyn Handler<Created>>(|h: Arc<AuditHandler>| -> Arc<dyn Handler<Created>> { h })
        .implements::<dyn Handler<Cancelled>>(|h: Arc<AuditHandler>| -> Arc<dyn Handler<Cancelled>> {
            h
        })
        .marker(MarkerAttribute::service::<SingletonService>(None))
        .build()
}

fn catalog() -> TypeCatalog {
    let catalog = TypeCatalog::new();
    catalog.submit("shop::handlers::orders", created_handler);
    catalog.submit("shop::handlers::audit", audit_handler);
    catalog.submit("shop::handlersx", created_handler);
    catalog
}

#[test]
fn test_generic_template_scan_registers_every_instantiation() -> anyhow::Result<()> {
    let module = catalog().module("shop::handlers")?;
    let mut services = ServiceCollection::new();

    let count = services.add_types_implementing_capability(
        &module,
        &CapabilityDescriptor::generic_template::<dyn Handler<()>>(),
        Lifetime::Transient,
    )?;

    // CreatedHandler: 1 + 1, AuditHandler: 2 + 1
    assert_eq!(count, 5);
    assert_eq!(services.count_for(&TypeInfo::of::<dyn Handler<Created>>()), 2);
    assert_eq!(services.count_for(&TypeInfo::of::<dyn Handler<Cancelled>>()), 1);

    let provider = services.build_provider();
    let handlers: Vec<String> = provider
        .resolve_all::<dyn Handler<Created>>()?
        .iter()
        .map(|handler| handler.handle(Created))
        .collect();
    assert_eq!(handlers, vec!["created", "audit created"]);
    assert_eq!(
        provider.resolve::<dyn Handler<Cancelled>>()?.handle(Cancelled),
        "audit cancelled"
    );
    Ok(())
}

#[test]
fn test_options_from_toml_drive_registration() -> anyhow::Result<()> {
    let options = RegistrationOptions::from_toml_str(
        r#"
        default_lifetime = "scoped"
        modules = ["shop::handlers::audit"]
        "#,
    )?;

    let mut services = ServiceCollection::new();
    let count = services.apply_options(&options, &catalog())?;

    assert_eq!(count, 3);
    assert!(services
        .entries()
        .iter()
        .all(|entry| entry.lifetime == Lifetime::Singleton));
    Ok(())
}

#[test]
fn test_double_scan_duplicates_entries() -> anyhow::Result<()> {
    let module = catalog().module("shop::handlers::orders")?;
    let mut services = ServiceCollection::new();
    let requested = CapabilityDescriptor::interface::<dyn Handler<Created>>();

    services.add_types_implementing_capability(&module, &requested, Lifetime::Transient)?;
    services.add_types_implementing_capability(&module, &requested, Lifetime::Transient)?;

    assert_eq!(services.len(), 4);
    Ok(())
}

#[test]
fn test_absent_module_is_invalid_argument() {
    let catalog = catalog();

    assert!(catalog.module("shop::payments").unwrap_err().is_invalid_argument());
    assert!(catalog.module("   ").unwrap_err().is_invalid_argument());
}

#[tokio::test]
async fn test_scopes_isolate_scoped_instances() -> anyhow::Result<()> {
    let module = catalog().module("shop::handlers::orders")?;
    let mut services = ServiceCollection::new();
    services.add_types_implementing_capability(
        &module,
        &CapabilityDescriptor::interface::<dyn Handler<Created>>(),
        Lifetime::Scoped,
    )?;
    let provider = services.build_provider();

    let request_a = provider.create_scope("request-a");
    let request_b = request_a.create_child("request-b");

    let a1 = request_a.resolve::<dyn Handler<Created>>()?;
    let a2 = request_a.resolve::<dyn Handler<Created>>()?;
    let b1 = request_b.resolve::<dyn Handler<Created>>()?;

    assert!(Arc::ptr_eq(&a1, &a2));
    assert!(!Arc::ptr_eq(&a1, &b1));
    assert_eq!(request_b.scope().name, "root.request-a.request-b");
    Ok(())
}
