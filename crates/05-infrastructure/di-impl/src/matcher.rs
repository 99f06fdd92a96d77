//! 能力匹配器

use infrastructure_common::{CandidateType, CapabilityDescriptor, ComponentError, DescriptorKind};

/// 能力匹配器
///
/// 计算候选类型声明的能力中满足请求的那部分。
#[derive(Debug, Default, Clone, Copy)]
pub struct CapabilityMatcher;

impl CapabilityMatcher {
    pub fn new() -> Self {
        Self
    }

    /// 检查请求是否为接口类描述符
    ///
    /// 泛型接口族必须来自泛型接口的实例化。
    pub fn check_requested(&self, requested: &CapabilityDescriptor) -> Result<(), ComponentError> {
        if !requested.is_interface_like() {
            return Err(ComponentError::invalid_argument(
                "requested",
                format!("{} 不是接口类描述符", requested),
            ));
        }

        if requested.kind() == DescriptorKind::GenericTemplate
            && requested.type_info().generic_definition().is_none()
        {
            return Err(ComponentError::invalid_argument(
                "requested",
                format!("{} 不是泛型接口，无法作为泛型接口族", requested),
            ));
        }

        Ok(())
    }

    /// 返回候选类型中满足 `requested` 的能力，按声明顺序去重
    ///
    /// 泛型接口族只比较能力自身的泛型定义，不沿细化链查找，
    /// 返回候选类型自己的实例化描述符。
    pub fn matches(
        &self,
        requested: &CapabilityDescriptor,
        candidate: &CandidateType,
    ) -> Result<Vec<CapabilityDescriptor>, ComponentError> {
        self.check_requested(requested)?;

        let mut matched: Vec<CapabilityDescriptor> = Vec::new();
        for binding in candidate.capabilities() {
            let descriptor = binding.descriptor();
            let satisfied = match requested.kind() {
                DescriptorKind::GenericTemplate => requested.shares_template_with(descriptor),
                _ => requested.is_assignable_from(descriptor),
            };

            if satisfied && !matched.contains(descriptor) {
                matched.push(descriptor.clone());
            }
        }

        Ok(matched)
    }
}
