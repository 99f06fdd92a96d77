//! 注册配置
//!
//! 描述启动阶段要扫描的模块以及默认生命周期，可从 TOML 或 JSON 加载。

use crate::errors::ConfigError;
use crate::lifecycle::Lifetime;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 服务注册选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationOptions {
    /// 标记未声明生命周期时使用的默认值
    pub default_lifetime: Lifetime,
    /// 需要扫描的模块路径
    pub modules: Vec<String>,
    /// 只注册属于该分组的服务标记，未设置时只注册未分组的标记
    pub attribute_group: Option<String>,
}

impl Default for RegistrationOptions {
    fn default() -> Self {
        Self {
            default_lifetime: Lifetime::Transient,
            modules: Vec::new(),
            attribute_group: None,
        }
    }
}

impl RegistrationOptions {
    /// 从 TOML 字符串加载
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let options: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            source: Box::new(e),
        })?;
        options.validate()?;
        Ok(options)
    }

    /// 从 JSON 值加载
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_value(value)?;
        options.validate()?;
        Ok(options)
    }

    /// 从文件加载，按扩展名选择格式
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_value(serde_json::from_str(&content)?),
            _ => Self::from_toml_str(&content),
        }
    }

    /// 添加扫描模块
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.modules.push(module.into());
        self
    }

    /// 设置分组
    pub fn with_attribute_group(mut self, group: impl Into<String>) -> Self {
        self.attribute_group = Some(group.into());
        self
    }

    /// 验证选项
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(module) = self.modules.iter().find(|module| module.trim().is_empty()) {
            return Err(ConfigError::ValidationError {
                message: format!("模块路径不能为空: {:?}", module),
            });
        }
        Ok(())
    }
}
