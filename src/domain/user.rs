use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// 年龄字段的原始值
#[derive(Debug, Clone, PartialEq)]
pub enum Age {
    /// JSON 数字，保留文件中的原始文本
    Number(Number),
    /// JSON 字符串（例如 "030"）
    Text(String),
    /// 其他 JSON 值，保留原样
    Other(Value),
}

impl Age {
    /// `null` 视为缺失
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(number) => Some(Age::Number(number.clone())),
            Value::String(text) => Some(Age::Text(text.clone())),
            other => Some(Age::Other(other.clone())),
        }
    }

    /// 年龄的文本形式，筛选时按文本比较而非数值比较
    pub fn text_form(&self) -> String {
        match self {
            Age::Number(number) => number.to_string(),
            Age::Text(text) => text.clone(),
            Age::Other(value) => value.to_string(),
        }
    }
}

/// 用户记录
///
/// 任何 JSON 值都能转换成记录：非对象元素、非字符串的 `name`/`email`
/// 一律按缺失处理。原始值保留，用于展示。
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub name: Option<String>,
    pub age: Option<Age>,
    pub email: Option<String>,
    raw: Value,
}

impl User {
    pub fn from_value(raw: Value) -> Self {
        let text_field = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_owned);

        Self {
            name: text_field("name"),
            age: raw.get("age").and_then(Age::from_value),
            email: text_field("email"),
            raw,
        }
    }

    /// 文件中的原始记录
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// 姓名，缺失时为空字符串
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// 邮箱，缺失时为空字符串
    pub fn email_or_empty(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }

    pub fn age_text(&self) -> Option<String> {
        self.age.as_ref().map(Age::text_form)
    }
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(User::from_value)
    }
}

impl Serialize for User {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 单行紧凑 JSON，键顺序与文件一致
        let line = serde_json::to_string(&self.raw).map_err(|_| fmt::Error)?;
        f.write_str(&line)
    }
}
