//! 模块类型扫描器

use crate::matcher::CapabilityMatcher;
use di_abstractions::{ScanResult, TypeScanner};
use infrastructure_common::{
    CandidateType, CapabilityDescriptor, ComponentError, DescriptorKind, TypeModule,
};
use tracing::{debug, warn};

/// 基于类型模块的扫描器
///
/// 单个候选类型无法加载或元数据不完整时跳过该类型，扫描继续。
#[derive(Debug, Clone)]
pub struct ModuleTypeScanner {
    name: String,
    matcher: CapabilityMatcher,
}

impl ModuleTypeScanner {
    pub fn new() -> Self {
        Self::with_name("module-type-scanner")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matcher: CapabilityMatcher::new(),
        }
    }

    /// 按模块原生顺序返回可实例化的候选类型
    fn candidates(&self, module: &TypeModule) -> Vec<CandidateType> {
        module
            .load_types()
            .into_iter()
            .enumerate()
            .filter_map(|(position, loaded)| {
                let candidate = match loaded {
                    Ok(candidate) => candidate,
                    Err(e) => {
                        warn!("跳过无法加载的类型: 模块 {} 位置 {}, {}", module.name(), position, e);
                        return None;
                    }
                };

                if candidate.is_abstract() {
                    debug!("跳过抽象类型: {}", candidate.type_info());
                    return None;
                }

                if let Err(e) = candidate.validate() {
                    warn!("跳过元数据无效的类型: {}", e);
                    return None;
                }

                Some(candidate)
            })
            .collect()
    }
}

impl Default for ModuleTypeScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeScanner for ModuleTypeScanner {
    fn scan_by_capability(
        &self,
        module: &TypeModule,
        requested: &CapabilityDescriptor,
    ) -> Result<Vec<ScanResult>, ComponentError> {
        self.matcher.check_requested(requested)?;

        let mut results = Vec::new();
        for candidate in self.candidates(module) {
            let matched = self.matcher.matches(requested, &candidate)?;
            if matched.is_empty() {
                continue;
            }

            let result = ScanResult::new(candidate, matched);
            debug!(
                "类型 {} 满足 {}: {} 个能力",
                result.candidate().type_info(),
                requested,
                result.matched().len()
            );
            results.push(result);
        }

        debug!("扫描模块 {} 完成: {} 个类型实现 {}", module.name(), results.len(), requested);
        Ok(results)
    }

    fn scan_by_marker(
        &self,
        module: &TypeModule,
        marker: &CapabilityDescriptor,
    ) -> Result<Vec<ScanResult>, ComponentError> {
        if marker.kind() != DescriptorKind::Marker {
            return Err(ComponentError::invalid_argument(
                "marker",
                format!("{} 不是标记类型", marker),
            ));
        }

        let results: Vec<ScanResult> = self
            .candidates(module)
            .into_iter()
            .filter(|candidate| candidate.has_marker(marker))
            .map(|candidate| {
                let capabilities = candidate.capability_descriptors();
                ScanResult::new(candidate, capabilities)
            })
            .collect();

        debug!("扫描模块 {} 完成: {} 个类型带有标记 {}", module.name(), results.len(), marker);
        Ok(results)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
