//! 校验结果

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 键到错误消息的映射
///
/// 同一个键的消息按加入顺序保存，不去重。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ResultErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加一条消息，返回自身以便链式构建
    pub fn add(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.insert(key, message);
        self
    }

    /// 添加一条消息
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(key.into())
            .or_default()
            .push(message.into());
    }

    /// 按键合并另一组消息，`other` 的消息追加在已有消息之后
    pub fn merge(&mut self, other: ResultErrors) {
        for (key, messages) in other.errors {
            self.errors.entry(key).or_default().extend(messages);
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.errors.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.errors.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// 键的数量
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors
            .iter()
            .map(|(key, messages)| (key.as_str(), messages.as_slice()))
    }
}

impl<K, M> FromIterator<(K, M)> for ResultErrors
where
    K: Into<String>,
    M: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, M)>>(iter: T) -> Self {
        let mut errors = ResultErrors::new();
        for (key, message) in iter {
            errors.insert(key, message);
        }
        errors
    }
}

impl fmt::Display for ResultErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (key, messages)) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: [{}]", key, messages.join(", "))?;
        }
        Ok(())
    }
}

/// 单条规则的校验结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationOutcome {
    Success,
    Failure(ResultErrors),
}

impl ValidationOutcome {
    /// 只有一条消息的失败结果
    pub fn failure(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failure(ResultErrors::new().add(key, message))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// 合并两个结果，`Success` 是单位元
    pub fn merge(self, other: ValidationOutcome) -> ValidationOutcome {
        match (self, other) {
            (Self::Success, other) => other,
            (this, Self::Success) => this,
            (Self::Failure(mut errors), Self::Failure(other)) => {
                errors.merge(other);
                Self::Failure(errors)
            }
        }
    }

    /// 失败时返回错误映射
    pub fn errors(&self) -> Option<&ResultErrors> {
        match self {
            Self::Success => None,
            Self::Failure(errors) => Some(errors),
        }
    }
}

impl Default for ValidationOutcome {
    fn default() -> Self {
        Self::Success
    }
}
