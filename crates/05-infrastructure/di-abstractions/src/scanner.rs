//! 类型扫描器抽象接口
//!
//! 从类型模块中筛选实现指定能力或带有指定标记的具体类型

use infrastructure_common::{
    CandidateType, CapabilityBinding, CapabilityDescriptor, ComponentError, TypeModule,
};

/// 扫描结果
///
/// 保存候选类型的全部能力，注册时覆盖类型实现的每个接口，而不仅是请求的那个。
#[derive(Debug, Clone)]
pub struct ScanResult {
    candidate: CandidateType,
    matched: Vec<CapabilityDescriptor>,
}

impl ScanResult {
    pub fn new(candidate: CandidateType, matched: Vec<CapabilityDescriptor>) -> Self {
        Self { candidate, matched }
    }

    pub fn candidate(&self) -> &CandidateType {
        &self.candidate
    }

    /// 候选类型声明的全部能力
    pub fn capabilities(&self) -> &[CapabilityBinding] {
        self.candidate.capabilities()
    }

    /// 满足请求的能力子集，按标记扫描时为全部能力
    ///
    /// 仅用于诊断和日志，注册使用 [`ScanResult::capabilities`]。
    pub fn matched(&self) -> &[CapabilityDescriptor] {
        &self.matched
    }
}

/// 类型扫描器 trait
pub trait TypeScanner: Send + Sync {
    /// 扫描实现 `requested` 的类型
    ///
    /// `requested` 不是接口类描述符时返回 `InvalidArgument`。
    fn scan_by_capability(
        &self,
        module: &TypeModule,
        requested: &CapabilityDescriptor,
    ) -> Result<Vec<ScanResult>, ComponentError>;

    /// 扫描带有可赋值给 `marker` 的标记的类型
    ///
    /// `marker` 不是标记描述符时返回 `InvalidArgument`。
    fn scan_by_marker(
        &self,
        module: &TypeModule,
        marker: &CapabilityDescriptor,
    ) -> Result<Vec<ScanResult>, ComponentError>;

    /// 获取扫描器名称
    fn name(&self) -> &str;
}
