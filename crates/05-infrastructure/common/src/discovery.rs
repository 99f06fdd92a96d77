//! 候选类型与类型模块
//!
//! 在初始化阶段构建的注册表，替代运行时反射：每个可注册类型在定义处
//! 声明它实现的能力、附带的标记以及构造方式。

use crate::errors::{ComponentError, DependencyError};
use crate::metadata::{CapabilityDescriptor, DescriptorKind, MarkerAttribute, TypeInfo};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 类型擦除的实例工厂
///
/// 返回的 `Any` 内部保存 `Arc<I>`，其中 `I` 是注册键对应的类型。
pub type InstanceFactory =
    Arc<dyn Fn() -> Result<Arc<dyn Any + Send + Sync>, DependencyError> + Send + Sync>;

/// 类型加载函数，失败表示该类型不可读取
pub type TypeLoader = Arc<dyn Fn() -> Result<CandidateType, ComponentError> + Send + Sync>;

/// 可注册类型 trait
///
/// 一般由 `#[service]` 宏生成。
pub trait Registrable: Send + Sync + 'static {
    /// 构建候选类型描述
    fn candidate() -> CandidateType;
}

/// 能力绑定：能力描述符及其实例工厂
#[derive(Clone)]
pub struct CapabilityBinding {
    descriptor: CapabilityDescriptor,
    factory: InstanceFactory,
}

impl CapabilityBinding {
    pub fn descriptor(&self) -> &CapabilityDescriptor {
        &self.descriptor
    }

    pub fn factory(&self) -> &InstanceFactory {
        &self.factory
    }
}

impl fmt::Debug for CapabilityBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityBinding")
            .field("descriptor", &self.descriptor)
            .field("factory", &"<function>")
            .finish()
    }
}

/// 候选类型
///
/// 模块中发现的具体类型，带有它满足的全部能力和声明式标记。
#[derive(Clone)]
pub struct CandidateType {
    identity: CapabilityDescriptor,
    capabilities: Vec<CapabilityBinding>,
    markers: Vec<MarkerAttribute>,
    is_abstract: bool,
    constructor: InstanceFactory,
}

impl CandidateType {
    /// 创建候选类型构建器
    pub fn builder<T, F>(constructor: F) -> CandidateTypeBuilder<T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Result<T, DependencyError> + Send + Sync + 'static,
    {
        CandidateTypeBuilder::new(constructor)
    }

    /// 类型自身的描述符
    pub fn identity(&self) -> &CapabilityDescriptor {
        &self.identity
    }

    pub fn type_info(&self) -> &TypeInfo {
        self.identity.type_info()
    }

    pub fn capabilities(&self) -> &[CapabilityBinding] {
        &self.capabilities
    }

    /// 声明的全部能力描述符
    pub fn capability_descriptors(&self) -> Vec<CapabilityDescriptor> {
        self.capabilities
            .iter()
            .map(|binding| binding.descriptor.clone())
            .collect()
    }

    pub fn markers(&self) -> &[MarkerAttribute] {
        &self.markers
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// 以自身类型为键的实例工厂，实例为 `Arc<T>`
    pub fn constructor(&self) -> &InstanceFactory {
        &self.constructor
    }

    /// 是否带有可赋值给 `marker` 的标记
    pub fn has_marker(&self, marker: &CapabilityDescriptor) -> bool {
        self.markers
            .iter()
            .any(|attribute| attribute.is_assignable_to(marker))
    }

    /// 检查元数据是否完整
    pub fn validate(&self) -> Result<(), ComponentError> {
        if self.identity.kind() != DescriptorKind::Concrete {
            return Err(ComponentError::invalid_metadata(
                &self.identity.type_info().name,
                "类型自身描述符必须为具体类型",
            ));
        }

        if let Some(binding) = self
            .capabilities
            .iter()
            .find(|binding| binding.descriptor.kind() != DescriptorKind::Interface)
        {
            return Err(ComponentError::invalid_metadata(
                &self.identity.type_info().name,
                format!("能力 {} 不是接口", binding.descriptor),
            ));
        }

        if let Some(marker) = self
            .markers
            .iter()
            .find(|marker| marker.descriptor().kind() != DescriptorKind::Marker)
        {
            return Err(ComponentError::invalid_metadata(
                &self.identity.type_info().name,
                format!("{} 不是标记", marker.descriptor()),
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for CandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateType")
            .field("identity", &self.identity.type_info().name)
            .field("capabilities", &self.capabilities)
            .field("markers", &self.markers)
            .field("is_abstract", &self.is_abstract)
            .finish()
    }
}

/// 候选类型构建器
pub struct CandidateTypeBuilder<T> {
    identity: CapabilityDescriptor,
    constructor: Arc<dyn Fn() -> Result<Arc<T>, DependencyError> + Send + Sync>,
    capabilities: Vec<CapabilityBinding>,
    markers: Vec<MarkerAttribute>,
    is_abstract: bool,
}

impl<T> CandidateTypeBuilder<T>
where
    T: Send + Sync + 'static,
{
    fn new<F>(constructor: F) -> Self
    where
        F: Fn() -> Result<T, DependencyError> + Send + Sync + 'static,
    {
        Self {
            identity: CapabilityDescriptor::concrete::<T>(),
            constructor: Arc::new(move || constructor().map(Arc::new)),
            capabilities: Vec::new(),
            markers: Vec::new(),
            is_abstract: false,
        }
    }

    /// 声明实现的接口，`cast` 负责把实例转换为接口对象
    pub fn implements<I>(self, cast: fn(Arc<T>) -> Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.implements_as(CapabilityDescriptor::interface::<I>(), cast)
    }

    /// 使用显式描述符声明实现的接口（细化链、类型参数等）
    pub fn implements_as<I>(
        mut self,
        descriptor: CapabilityDescriptor,
        cast: fn(Arc<T>) -> Arc<I>,
    ) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let constructor = Arc::clone(&self.constructor);
        let factory: InstanceFactory = Arc::new(move || {
            let instance = cast(constructor()?);
            Ok(Arc::new(instance) as Arc<dyn Any + Send + Sync>)
        });

        self.capabilities.push(CapabilityBinding {
            descriptor,
            factory,
        });
        self
    }

    /// 附加声明式标记
    pub fn marker(mut self, marker: MarkerAttribute) -> Self {
        self.markers.push(marker);
        self
    }

    /// 标记为不可实例化，扫描时跳过
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// 构建候选类型
    pub fn build(self) -> CandidateType {
        let constructor = self.constructor;
        let factory: InstanceFactory = Arc::new(move || {
            let instance = constructor()?;
            Ok(Arc::new(instance) as Arc<dyn Any + Send + Sync>)
        });

        CandidateType {
            identity: self.identity,
            capabilities: self.capabilities,
            markers: self.markers,
            is_abstract: self.is_abstract,
            constructor: factory,
        }
    }
}

/// 类型模块
///
/// 一组有序的类型加载函数，扫描期间视为只读快照。
#[derive(Clone)]
pub struct TypeModule {
    name: String,
    loaders: Vec<TypeLoader>,
}

impl TypeModule {
    /// 创建空模块
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            loaders: Vec::new(),
        }
    }

    /// 添加已构建的候选类型
    pub fn with_type(mut self, candidate: CandidateType) -> Self {
        self.loaders.push(Arc::new(move || Ok(candidate.clone())));
        self
    }

    /// 添加可注册类型
    pub fn with_registrable<T: Registrable>(self) -> Self {
        self.with_loader(|| Ok(T::candidate()))
    }

    /// 添加类型加载函数
    pub fn with_loader<F>(mut self, loader: F) -> Self
    where
        F: Fn() -> Result<CandidateType, ComponentError> + Send + Sync + 'static,
    {
        self.loaders.push(Arc::new(loader));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// 按模块原生顺序加载全部类型
    pub fn load_types(&self) -> Vec<Result<CandidateType, ComponentError>> {
        self.loaders.iter().map(|loader| loader()).collect()
    }
}

impl fmt::Debug for TypeModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeModule")
            .field("name", &self.name)
            .field("types", &self.loaders.len())
            .finish()
    }
}

/// 类型目录
///
/// 按模块路径收集类型加载函数，`#[service]` 宏在程序启动前提交。
#[derive(Default)]
pub struct TypeCatalog {
    entries: parking_lot::RwLock<Vec<(String, TypeLoader)>>,
}

impl TypeCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 提交可注册类型
    pub fn submit(&self, module_path: &str, loader: fn() -> CandidateType) {
        self.submit_loader(module_path, Arc::new(move || Ok(loader())));
    }

    /// 提交类型加载函数
    pub fn submit_loader(&self, module_path: &str, loader: TypeLoader) {
        self.entries.write().push((module_path.to_string(), loader));
    }

    /// 已提交的类型数量
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// 获取模块快照，包含该路径及其子模块下的全部类型
    pub fn module(&self, path: &str) -> Result<TypeModule, ComponentError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(ComponentError::invalid_argument("module", "模块路径不能为空"));
        }

        let entries = self.entries.read();
        let loaders: Vec<TypeLoader> = entries
            .iter()
            .filter(|(module_path, _)| module_contains(path, module_path))
            .map(|(_, loader)| Arc::clone(loader))
            .collect();

        if loaders.is_empty() {
            return Err(ComponentError::invalid_argument(
                "module",
                format!("模块不存在或没有可注册类型: {}", path),
            ));
        }

        Ok(TypeModule {
            name: path.to_string(),
            loaders,
        })
    }
}

fn module_contains(path: &str, module_path: &str) -> bool {
    module_path == path
        || module_path
            .strip_prefix(path)
            .is_some_and(|rest| rest.starts_with("::"))
}

static GLOBAL_TYPE_CATALOG: once_cell::sync::Lazy<TypeCatalog> =
    once_cell::sync::Lazy::new(TypeCatalog::new);

/// 获取全局类型目录
pub fn global_type_catalog() -> &'static TypeCatalog {
    &GLOBAL_TYPE_CATALOG
}
