//! 元数据定义
//!
//! 提供类型、能力描述符和声明式标记的元数据信息

use crate::lifecycle::{Lifetime, ServiceAttribute, ServiceMarker};
use std::any::TypeId;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型信息
///
/// 相等性只由 `TypeId` 决定。
#[derive(Debug, Clone)]
pub struct TypeInfo {
    /// 类型全名
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 模块路径
    pub module_path: String,
}

impl TypeInfo {
    /// 从类型获取类型信息，支持 trait object
    pub fn of<T: ?Sized + 'static>() -> Self {
        let name = std::any::type_name::<T>();
        let definition = generic_definition(name).unwrap_or(name);
        let definition = definition.strip_prefix("dyn ").unwrap_or(definition);
        let module_path = definition
            .rsplit_once("::")
            .map(|(module, _)| module)
            .unwrap_or_default();

        Self {
            name: name.to_string(),
            id: TypeId::of::<T>(),
            module_path: module_path.to_string(),
        }
    }

    /// 泛型定义（去掉类型参数的部分），非泛型类型返回 `None`
    pub fn generic_definition(&self) -> Option<&str> {
        generic_definition(&self.name)
    }

    /// 获取简短的类型名称（不包含模块路径和类型参数）
    pub fn short_name(&self) -> &str {
        let definition = self.generic_definition().unwrap_or(&self.name);
        definition.rsplit("::").next().unwrap_or(definition)
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn generic_definition(name: &str) -> Option<&str> {
    name.find('<').map(|index| name[..index].trim_end())
}

/// 描述符种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    /// 具体接口（trait object 或其泛型实例化）
    Interface,
    /// 泛型接口族，忽略类型参数
    GenericTemplate,
    /// 可实例化的具体类型
    Concrete,
    /// 声明式标记
    Marker,
}

/// 能力描述符
///
/// 标识一个接口类契约。泛型模板按去掉类型参数后的定义比较，
/// 其它种类按 `TypeId` 比较。
#[derive(Debug, Clone)]
pub struct CapabilityDescriptor {
    type_info: TypeInfo,
    kind: DescriptorKind,
    template: Option<String>,
    type_args: Vec<TypeInfo>,
    refines: Vec<CapabilityDescriptor>,
}

impl CapabilityDescriptor {
    fn with_kind<T: ?Sized + 'static>(kind: DescriptorKind) -> Self {
        let type_info = TypeInfo::of::<T>();
        let template = type_info.generic_definition().map(str::to_string);
        Self {
            type_info,
            kind,
            template,
            type_args: Vec::new(),
            refines: Vec::new(),
        }
    }

    /// 具体接口描述符，例如 `dyn Repository` 或 `dyn Handler<Order>`
    pub fn interface<I: ?Sized + 'static>() -> Self {
        Self::with_kind::<I>(DescriptorKind::Interface)
    }

    /// 泛型接口族描述符
    ///
    /// 以任意一个实例化代表整个族，例如 `generic_template::<dyn Handler<()>>()`
    /// 匹配所有 `dyn Handler<X>`。
    pub fn generic_template<I: ?Sized + 'static>() -> Self {
        let mut descriptor = Self::with_kind::<I>(DescriptorKind::GenericTemplate);
        if descriptor.template.is_none() {
            descriptor.template = Some(descriptor.type_info.name.clone());
        }
        descriptor
    }

    /// 具体类型描述符，用作类型自身的注册键
    pub fn concrete<T: ?Sized + 'static>() -> Self {
        Self::with_kind::<T>(DescriptorKind::Concrete)
    }

    /// 标记描述符
    pub fn marker<M: ?Sized + 'static>() -> Self {
        Self::with_kind::<M>(DescriptorKind::Marker)
    }

    /// 记录一个类型参数
    pub fn with_type_arg<A: ?Sized + 'static>(mut self) -> Self {
        self.type_args.push(TypeInfo::of::<A>());
        self
    }

    /// 声明当前描述符细化自 `parent`（例如 supertrait）
    pub fn refining(mut self, parent: CapabilityDescriptor) -> Self {
        self.refines.push(parent);
        self
    }

    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    pub fn kind(&self) -> DescriptorKind {
        self.kind
    }

    /// 泛型定义，非泛型接口为 `None`
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn type_args(&self) -> &[TypeInfo] {
        &self.type_args
    }

    pub fn refines(&self) -> &[CapabilityDescriptor] {
        &self.refines
    }

    /// 是否为接口类描述符
    pub fn is_interface_like(&self) -> bool {
        matches!(
            self.kind,
            DescriptorKind::Interface | DescriptorKind::GenericTemplate
        )
    }

    /// `other` 是否可以赋值给当前描述符：相同，或沿细化链可达
    pub fn is_assignable_from(&self, other: &CapabilityDescriptor) -> bool {
        other.type_info == self.type_info
            || other
                .refines
                .iter()
                .any(|parent| self.is_assignable_from(parent))
    }

    /// 两个描述符是否属于同一泛型定义
    pub fn shares_template_with(&self, other: &CapabilityDescriptor) -> bool {
        match (self.template(), other.template()) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }
}

impl PartialEq for CapabilityDescriptor {
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind {
            return false;
        }
        match self.kind {
            DescriptorKind::GenericTemplate => self.template == other.template,
            _ => self.type_info == other.type_info,
        }
    }
}

impl Eq for CapabilityDescriptor {}

impl Hash for CapabilityDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        match self.kind {
            DescriptorKind::GenericTemplate => self.template.hash(state),
            _ => self.type_info.hash(state),
        }
    }
}

impl fmt::Display for CapabilityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.template()) {
            (DescriptorKind::GenericTemplate, Some(template)) => write!(f, "{}<_>", template),
            _ => f.write_str(&self.type_info.name),
        }
    }
}

/// 声明式标记实例
///
/// 在类型定义处附加，注册阶段读取一次。
#[derive(Debug, Clone)]
pub struct MarkerAttribute {
    descriptor: CapabilityDescriptor,
    properties: BTreeMap<String, String>,
}

impl MarkerAttribute {
    /// 属性名：生命周期
    pub const LIFETIME: &'static str = "lifetime";
    /// 属性名：分组
    pub const GROUP: &'static str = "group";

    /// 创建标记
    pub fn of<M: ?Sized + 'static>() -> Self {
        Self::from_descriptor(CapabilityDescriptor::marker::<M>())
    }

    /// 从描述符创建标记
    pub fn from_descriptor(descriptor: CapabilityDescriptor) -> Self {
        Self {
            descriptor,
            properties: BTreeMap::new(),
        }
    }

    /// 创建服务标记，记录其生命周期和分组
    pub fn service<M: ServiceMarker>(group: Option<&str>) -> Self {
        let mut descriptor = CapabilityDescriptor::marker::<M>();
        if TypeId::of::<M>() != TypeId::of::<ServiceAttribute>() {
            descriptor = descriptor.refining(CapabilityDescriptor::marker::<ServiceAttribute>());
        }

        let mut marker = Self::from_descriptor(descriptor);
        if let Some(lifetime) = M::lifetime() {
            marker = marker.with_property(Self::LIFETIME, lifetime.as_str());
        }
        if let Some(group) = group {
            marker = marker.with_property(Self::GROUP, group);
        }
        marker
    }

    /// 添加属性
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn descriptor(&self) -> &CapabilityDescriptor {
        &self.descriptor
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// 标记声明的生命周期
    pub fn lifetime(&self) -> Option<Lifetime> {
        self.property(Self::LIFETIME)
            .and_then(|value| value.parse().ok())
    }

    /// 标记所属分组
    pub fn group(&self) -> Option<&str> {
        self.property(Self::GROUP)
    }

    /// 标记是否可以赋值给 `requested`
    pub fn is_assignable_to(&self, requested: &CapabilityDescriptor) -> bool {
        requested.is_assignable_from(&self.descriptor)
    }
}
