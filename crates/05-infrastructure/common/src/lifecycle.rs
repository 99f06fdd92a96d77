//! 组件生命周期管理

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 组件生命周期类型
///
/// 由扫描调用方提供，而不是从类型本身推导。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifetime {
    /// 单例模式 - 整个应用生命周期内只创建一个实例
    Singleton,
    /// 作用域模式 - 在同一作用域内共享实例
    Scoped,
    /// 瞬时模式 - 每次请求都创建新实例
    Transient,
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::Transient
    }
}

impl Lifetime {
    /// 生命周期的字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Singleton => "singleton",
            Self::Scoped => "scoped",
            Self::Transient => "transient",
        }
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lifetime {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "singleton" => Ok(Self::Singleton),
            "scoped" => Ok(Self::Scoped),
            "transient" => Ok(Self::Transient),
            other => Err(format!("未知的生命周期: {}", other)),
        }
    }
}

/// 组件作用域
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: uuid::Uuid,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Scope {
    /// 创建新作用域
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: name.into(),
            created_at: chrono::Utc::now(),
        }
    }

    /// 创建根作用域
    pub fn root() -> Self {
        Self::new("root")
    }

    /// 创建子作用域
    pub fn child(&self, name: impl Into<String>) -> Self {
        Self::new(format!("{}.{}", self.name, name.into()))
    }
}

/// 服务标记 trait
///
/// 声明式标记，附带注册时使用的生命周期
pub trait ServiceMarker: Send + Sync + 'static {
    /// 标记声明的生命周期，`None` 表示由调用方决定
    fn lifetime() -> Option<Lifetime>;
}

/// 服务标记基类，所有带生命周期的服务标记都细化自它
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceAttribute;

/// 瞬时服务标记
#[derive(Debug, Clone, Copy, Default)]
pub struct TransientService;

/// 作用域服务标记
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopedService;

/// 单例服务标记
#[derive(Debug, Clone, Copy, Default)]
pub struct SingletonService;

impl ServiceMarker for ServiceAttribute {
    fn lifetime() -> Option<Lifetime> {
        None
    }
}

impl ServiceMarker for TransientService {
    fn lifetime() -> Option<Lifetime> {
        Some(Lifetime::Transient)
    }
}

impl ServiceMarker for ScopedService {
    fn lifetime() -> Option<Lifetime> {
        Some(Lifetime::Scoped)
    }
}

impl ServiceMarker for SingletonService {
    fn lifetime() -> Option<Lifetime> {
        Some(Lifetime::Singleton)
    }
}
