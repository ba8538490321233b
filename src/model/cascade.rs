//! 类型变更的级联规则

use crate::model::schema::{FieldType, SchemaField};

/// 将字段改为 `new_type`，并按新类型处理子字段
///
/// 容器类型保留已有子字段；非容器类型无条件清空，被丢弃的子树不可恢复。
pub fn apply_type_change(field: SchemaField, new_type: FieldType) -> SchemaField {
    let children = if new_type.is_container() {
        field.children
    } else {
        Vec::new()
    };
    SchemaField {
        field_type: new_type,
        children,
        ..field
    }
}
