//! 影子树（Shadow Tree）：把字段森林拍平成带深度与路径的行，供界面逐行渲染

use serde_json::Value;

use crate::model::sample::sample_value;
use crate::model::schema::{FieldType, SchemaField};
use crate::vm::bridge::INDENT_STEP;

/// 一行字段（与 UI 展示解耦）
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    pub id: String,
    pub key: String,
    pub field_type: FieldType,
    pub required: bool,
    /// 节点深度（根层为0）
    pub depth: u32,
    /// 缩进量（深度 × 步长）
    pub indent: u32,
    /// 直接子字段数量
    pub children: u32,
    /// 是否显示“添加子字段”入口（容器类型）
    pub can_add_child: bool,
    /// 该字段示例值在样例文档中的 RFC 9535 JSONPath
    pub path: String,
    /// 示例值的轻量预览
    pub preview: String,
}

/// 先序遍历构建全部行
pub fn build_field_rows(fields: &[SchemaField]) -> Vec<FieldRow> {
    fn walk(out: &mut Vec<FieldRow>, fields: &[SchemaField], parent_path: &str, depth: u32) {
        for field in fields {
            let path = child_path(parent_path, &field.key);
            out.push(FieldRow {
                id: field.id.clone(),
                key: field.key.clone(),
                field_type: field.field_type,
                required: field.required,
                depth,
                indent: depth * INDENT_STEP,
                children: field.children.len() as u32,
                can_add_child: field.field_type.is_container(),
                path: path.clone(),
                preview: preview_of(&sample_value(field)),
            });
            // array 的子字段描述单个元素，经由 [0] 寻址
            let item_path = if field.field_type == FieldType::Array {
                format!("{}[0]", path)
            } else {
                path
            };
            walk(out, &field.children, &item_path, depth + 1);
        }
    }

    let mut out = Vec::with_capacity(fields.len());
    walk(&mut out, fields, "$", 0);
    out
}

/// 键名可用点号简写时用 `.key`，否则使用 bracket-notation
fn child_path(parent: &str, key: &str) -> String {
    let mut chars = key.chars();
    let shorthand = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if shorthand {
        format!("{}.{}", parent, key)
    } else {
        format!("{}['{}']", parent, escape_member_name(key))
    }
}

/// 单引号字符串字面量转义（RFC 9535 不允许出现原始的 U+0000–U+001F）
fn escape_member_name(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

fn preview_of(v: &Value) -> String {
    match v {
        Value::String(s) => {
            if s.chars().count() > 32 {
                let truncated: String = s.chars().take(32).collect();
                format!("\"{}...\"", truncated)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Object(m) => format!("{{..}} ({} keys)", m.len()),
        Value::Array(a) => format!("[..] ({} items)", a.len()),
    }
}
