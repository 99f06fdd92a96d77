//! 校验管道端到端测试：规则通过 #[service] 注册，经服务提供者解析后执行

use async_trait::async_trait;
use component_macros::service;
use di_abstractions::ServiceLocator;
use di_impl::ServiceCollection;
use infrastructure_common::{global_type_catalog, Lifetime};
use std::sync::Arc;
use validation_abstractions::{ValidationOutcome, ValidationRule, ValidationRunError};
use validation_impl::Validator;

const GROUP: &str = "validation-tests";

#[derive(Debug, Default)]
#[service(transient, group = "validation-tests", implements(dyn ValidationRule<String>))]
pub struct SucceededRule;

#[async_trait]
impl ValidationRule<String> for SucceededRule {
    async fn validate(&self, _data: String) -> ValidationOutcome {
        ValidationOutcome::Success
    }
}

#[derive(Debug, Default)]
#[service(transient, group = "validation-tests", implements(dyn ValidationRule<String>))]
pub struct FailedRule;

#[async_trait]
impl ValidationRule<String> for FailedRule {
    async fn validate(&self, _data: String) -> ValidationOutcome {
        ValidationOutcome::failure("key", "value")
    }
}

/// 未分组，不应被注册
#[derive(Debug, Default)]
#[service(transient, implements(dyn ValidationRule<String>))]
pub struct UngroupedRule;

#[async_trait]
impl ValidationRule<String> for UngroupedRule {
    async fn validate(&self, _data: String) -> ValidationOutcome {
        ValidationOutcome::failure("ungrouped", "should not run")
    }
}

#[derive(Debug, Default)]
pub struct UnregisteredRule;

#[async_trait]
impl ValidationRule<String> for UnregisteredRule {
    async fn validate(&self, _data: String) -> ValidationOutcome {
        ValidationOutcome::Success
    }
}

fn validator() -> Validator {
    let module = global_type_catalog()
        .module(module_path!())
        .expect("测试模块已注册");
    let mut services = ServiceCollection::new();
    services
        .add_attribute_services(&module, Some(GROUP), Lifetime::Singleton)
        .expect("注册校验规则");

    let provider: Arc<dyn ServiceLocator> = Arc::new(services.build_provider());
    Validator::new(provider)
}

#[tokio::test]
async fn test_success() {
    let result = validator()
        .require::<SucceededRule>()
        .with_data("x".to_string())
        .require::<SucceededRule>()
        .with_data("x".to_string())
        .ensure_valid()
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_failure() {
    let error = validator()
        .require::<SucceededRule>()
        .with_data("x".to_string())
        .require::<FailedRule>()
        .with_data("y".to_string())
        .ensure_valid()
        .await
        .unwrap_err();

    assert!(error.is_validation_failure());
    let errors = error.validation_errors().unwrap();
    assert_eq!(
        serde_json::to_value(errors).unwrap(),
        serde_json::json!({"key": ["value"]})
    );
}

#[tokio::test]
async fn test_overlapping_keys_keep_every_message() {
    let error = validator()
        .require::<FailedRule>()
        .with_data("a".to_string())
        .require::<FailedRule>()
        .with_data("b".to_string())
        .ensure_valid()
        .await
        .unwrap_err();

    let errors = error.validation_errors().unwrap();
    assert_eq!(errors.get("key").unwrap(), ["value", "value"]);
}

#[tokio::test]
async fn test_interface_resolution_uses_last_registration() {
    // 两个规则都以 dyn ValidationRule<String> 注册，解析得到最后一条
    let result = validator()
        .require::<dyn ValidationRule<String>>()
        .with_data("x".to_string())
        .ensure_valid()
        .await;

    match result {
        Ok(()) => {}
        Err(ValidationRunError::Failed(failure)) => {
            assert_eq!(failure.errors().get("key").unwrap(), ["value"]);
        }
        Err(other) => panic!("意外的错误: {}", other),
    }
}

#[tokio::test]
async fn test_ungrouped_rule_is_not_registered() {
    let error = validator()
        .require::<UngroupedRule>()
        .with_data("x".to_string())
        .ensure_valid()
        .await
        .unwrap_err();

    assert!(matches!(error, ValidationRunError::Resolution(_)));
}

#[tokio::test]
async fn test_missing_rule_is_resolution_error() {
    let error = validator()
        .require::<SucceededRule>()
        .with_data("x".to_string())
        .require::<UnregisteredRule>()
        .with_data("y".to_string())
        .ensure_valid()
        .await
        .unwrap_err();

    assert!(!error.is_validation_failure());
    assert!(matches!(error, ValidationRunError::Resolution(_)));
}
