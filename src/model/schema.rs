//! 字段模型：封闭的类型枚举 + 有序的字段森林

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::data_core::AppError;

/// 新建字段的默认键名
pub const DEFAULT_FIELD_KEY: &str = "newField";

/// 字段类型（封闭集合，序列化为小写名称）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    String,
    Number,
    Integer,
    Float,
    Boolean,
    Array,
    Object,
    Nested,
    Date,
    Datetime,
    Email,
    Url,
    Text,
    Password,
    Enum,
}

impl FieldType {
    /// 编辑器下拉框中的展示顺序
    pub const ALL: [FieldType; 15] = [
        FieldType::String,
        FieldType::Number,
        FieldType::Integer,
        FieldType::Float,
        FieldType::Boolean,
        FieldType::Array,
        FieldType::Object,
        FieldType::Nested,
        FieldType::Date,
        FieldType::Datetime,
        FieldType::Email,
        FieldType::Url,
        FieldType::Text,
        FieldType::Password,
        FieldType::Enum,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
            FieldType::Nested => "nested",
            FieldType::Date => "date",
            FieldType::Datetime => "datetime",
            FieldType::Email => "email",
            FieldType::Url => "url",
            FieldType::Text => "text",
            FieldType::Password => "password",
            FieldType::Enum => "enum",
        }
    }

    /// 容器类型（array/object/nested）才允许拥有子字段
    pub fn is_container(self) -> bool {
        matches!(self, FieldType::Array | FieldType::Object | FieldType::Nested)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::UnknownType(s.to_string()))
    }
}

/// 森林中的一个字段节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    /// 整棵树内唯一，创建后不再变更
    pub id: String,
    /// 展示名，不要求唯一（同级也可重复）
    pub key: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    /// 有序子字段，仅容器类型可非空
    #[serde(default)]
    pub children: Vec<SchemaField>,
}

/// 森林：根层本身就是一个有序列表
pub type SchemaTree = Vec<SchemaField>;

impl SchemaField {
    pub fn new(id: impl Into<String>, key: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            key: key.into(),
            field_type,
            required: false,
            children: Vec::new(),
        }
    }

    /// 新增字段的默认形态：`newField` / string / 非必填 / 无子字段
    pub fn with_default(id: impl Into<String>) -> Self {
        Self::new(id, DEFAULT_FIELD_KEY, FieldType::default())
    }

    pub fn with_children(mut self, children: Vec<SchemaField>) -> Self {
        self.children = children;
        self
    }

    #[cfg(test)]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// 编辑器的初始演示结构
pub fn demo_fields() -> SchemaTree {
    vec![
        SchemaField::new("field_1", "name", FieldType::String),
        SchemaField::new("field_2", "class", FieldType::Number),
        SchemaField::new("field_3", "address", FieldType::Nested).with_children(vec![
            SchemaField::new("field_4", "hno", FieldType::Number),
            SchemaField::new("field_5", "city", FieldType::String),
            SchemaField::new("field_6", "pin", FieldType::Number),
            SchemaField::new("field_7", "landmark", FieldType::Nested).with_children(vec![
                SchemaField::new("field_8", "nearby", FieldType::String),
            ]),
        ]),
    ]
}
