//! 服务宏与依赖注入的集成测试

use di_abstractions::{ServiceLocatorExt, ServiceRegistry};
use di_impl::ServiceCollection;
use infrastructure_common::{
    global_type_catalog, CapabilityDescriptor, Lifetime, RegistrationOptions, TypeInfo,
};
use std::sync::Arc;

pub trait Notifier: Send + Sync {
    fn channel(&self) -> &'static str;
}

mod notifications {
    pub mod email {
        use crate::Notifier;
        use component_macros::service;

        #[derive(Debug, Default)]
        #[service(singleton, implements(dyn Notifier))]
        pub struct EmailNotifier;

        impl Notifier for EmailNotifier {
            fn channel(&self) -> &'static str {
                "email"
            }
        }
    }

    pub mod sms {
        use crate::Notifier;
        use component_macros::service;

        #[derive(Debug, Default)]
        #[service(transient, group = "alerts", implements(dyn Notifier))]
        pub struct SmsNotifier;

        impl Notifier for SmsNotifier {
            fn channel(&self) -> &'static str {
                "sms"
            }
        }
    }
}

fn notifications_path() -> String {
    format!("{}::notifications", module_path!())
}

#[test]
fn test_module_prefix_collects_nested_services() {
    let module = global_type_catalog().module(&notifications_path()).unwrap();
    assert_eq!(module.len(), 2);

    let sms_only = global_type_catalog()
        .module(&format!("{}::sms", notifications_path()))
        .unwrap();
    assert_eq!(sms_only.len(), 1);
}

#[test]
fn test_attribute_services_follow_marker_lifetime() {
    let module = global_type_catalog().module(&notifications_path()).unwrap();
    let mut services = ServiceCollection::new();
    let count = services
        .add_attribute_services(&module, None, Lifetime::Transient)
        .unwrap();

    assert_eq!(count, 2);
    assert!(services
        .entries()
        .iter()
        .all(|entry| entry.lifetime == Lifetime::Singleton));

    let provider = services.build_provider();
    let first = provider.resolve::<dyn Notifier>().unwrap();
    let second = provider.resolve::<dyn Notifier>().unwrap();
    assert_eq!(first.channel(), "email");
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_grouped_services_via_options() {
    let options = RegistrationOptions::default()
        .with_module(notifications_path())
        .with_attribute_group("alerts");

    let mut services = ServiceCollection::new();
    let count = services.apply_options(&options, global_type_catalog()).unwrap();
    assert_eq!(count, 2);

    let provider = services.build_provider();
    assert_eq!(provider.resolve::<dyn Notifier>().unwrap().channel(), "sms");
    assert!(provider.resolve::<notifications::sms::SmsNotifier>().is_ok());
    assert!(provider
        .resolve::<notifications::email::EmailNotifier>()
        .is_err());
}

#[test]
fn test_capability_scan_over_macro_types() {
    let module = global_type_catalog().module(&notifications_path()).unwrap();
    let mut services = ServiceCollection::new();
    services
        .add_types_implementing_capability(
            &module,
            &CapabilityDescriptor::interface::<dyn Notifier>(),
            Lifetime::Scoped,
        )
        .unwrap();

    assert_eq!(services.count_for(&TypeInfo::of::<dyn Notifier>()), 2);
    let provider = services.build_provider();
    let channels: Vec<&str> = provider
        .resolve_all::<dyn Notifier>()
        .unwrap()
        .iter()
        .map(|notifier| notifier.channel())
        .collect();
    assert_eq!(channels.len(), 2);
    assert!(channels.contains(&"email") && channels.contains(&"sms"));
}
