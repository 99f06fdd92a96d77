//! 订单校验规则

use async_trait::async_trait;
use component_macros::service;
use validation_abstractions::{ResultErrors, ValidationOutcome, ValidationRule};

/// 客户名称规则
#[derive(Debug, Default)]
#[service(transient, group = "orders", implements(dyn ValidationRule<String>))]
pub struct CustomerNameRule;

#[async_trait]
impl ValidationRule<String> for CustomerNameRule {
    async fn validate(&self, data: String) -> ValidationOutcome {
        let name = data.trim();
        let mut errors = ResultErrors::new();

        if name.is_empty() {
            errors.insert("customer", "客户名称不能为空");
        }
        if name.chars().count() > 32 {
            errors.insert("customer", "客户名称不能超过 32 个字符");
        }

        if errors.is_empty() {
            ValidationOutcome::Success
        } else {
            ValidationOutcome::Failure(errors)
        }
    }
}

/// 订购数量规则
#[derive(Debug, Default)]
#[service(singleton, group = "orders", implements(dyn ValidationRule<u32>))]
pub struct QuantityRule;

#[async_trait]
impl ValidationRule<u32> for QuantityRule {
    async fn validate(&self, data: u32) -> ValidationOutcome {
        match data {
            0 => ValidationOutcome::failure("quantity", "数量必须大于 0"),
            1..=100 => ValidationOutcome::Success,
            _ => ValidationOutcome::failure("quantity", "单笔订单数量不能超过 100"),
        }
    }
}
