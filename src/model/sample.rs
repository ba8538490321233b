//! 样例文档生成：按字段类型给出固定示例值，输出键顺序与同级字段顺序一致

use serde_json::{json, Map, Value};

use crate::model::schema::{FieldType, SchemaField};

/// 根据字段森林生成样例文档（纯函数，结果确定）
///
/// 同级键名重复时，后出现的字段覆盖先前的值，键保留首次出现的位置。
pub fn generate(fields: &[SchemaField]) -> Map<String, Value> {
    let mut data = Map::new();
    for field in fields {
        data.insert(field.key.clone(), sample_value(field));
    }
    data
}

/// 单个字段的示例值
#[allow(clippy::approx_constant)]
pub fn sample_value(field: &SchemaField) -> Value {
    match field.field_type {
        FieldType::String => json!("STRING"),
        // 与 integer/float 不同，number 的示例值是字符串
        FieldType::Number => json!("number"),
        FieldType::Integer => json!(42),
        FieldType::Float => json!(3.14),
        FieldType::Boolean => json!(true),
        FieldType::Array => {
            if field.has_children() {
                // 子字段描述的是“单个元素”的结构
                Value::Array(vec![Value::Object(generate(&field.children))])
            } else {
                json!(["item1", "item2"])
            }
        }
        FieldType::Object | FieldType::Nested => Value::Object(generate(&field.children)),
        FieldType::Date => json!("2025-07-21"),
        FieldType::Datetime => json!("2025-07-21T10:30:00Z"),
        FieldType::Email => json!("user@example.com"),
        FieldType::Url => json!("https://example.com"),
        FieldType::Text => json!("This is a longer text content"),
        FieldType::Password => json!("********"),
        FieldType::Enum => json!("option1"),
    }
}

/// 两空格缩进的格式化输出
pub fn render_pretty(data: &Map<String, Value>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}
