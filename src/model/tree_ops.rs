//! 纯函数式树操作：按ID查找并更新/删除/追加子字段
//!
//! 所有函数只读输入、返回新树；ID不存在时返回与输入相等的树。

use crate::model::schema::SchemaField;

/// 递归查找ID匹配的节点并替换为 `updater(node)`，其余节点原样复制
pub fn find_and_update<F>(fields: &[SchemaField], id: &str, updater: F) -> Vec<SchemaField>
where
    F: Fn(SchemaField) -> SchemaField,
{
    update_level(fields, id, &updater)
}

fn update_level<F>(fields: &[SchemaField], id: &str, updater: &F) -> Vec<SchemaField>
where
    F: Fn(SchemaField) -> SchemaField,
{
    fields
        .iter()
        .map(|field| {
            if field.id == id {
                updater(field.clone())
            } else if field.has_children() {
                SchemaField {
                    children: update_level(&field.children, id, updater),
                    ..field.clone()
                }
            } else {
                field.clone()
            }
        })
        .collect()
}

/// 删除ID匹配的节点（连同整棵子树），其余节点保持相对顺序
pub fn find_and_delete(fields: &[SchemaField], id: &str) -> Vec<SchemaField> {
    fields
        .iter()
        .filter(|field| field.id != id)
        .map(|field| {
            if field.has_children() {
                SchemaField {
                    children: find_and_delete(&field.children, id),
                    ..field.clone()
                }
            } else {
                field.clone()
            }
        })
        .collect()
}

/// 把 `new_field` 追加到ID为 `parent_id` 的节点的子字段末尾
///
/// 不检查父节点是否为容器类型，调用方只应对容器节点调用。
pub fn find_and_add_child(fields: &[SchemaField], parent_id: &str, new_field: &SchemaField) -> Vec<SchemaField> {
    fields
        .iter()
        .map(|field| {
            if field.id == parent_id {
                let mut children = field.children.clone();
                children.push(new_field.clone());
                SchemaField {
                    children,
                    ..field.clone()
                }
            } else if field.has_children() {
                SchemaField {
                    children: find_and_add_child(&field.children, parent_id, new_field),
                    ..field.clone()
                }
            } else {
                field.clone()
            }
        })
        .collect()
}

/// 深度优先查找节点
pub fn find<'a>(fields: &'a [SchemaField], id: &str) -> Option<&'a SchemaField> {
    fields.iter().find_map(|field| {
        if field.id == id {
            Some(field)
        } else {
            find(&field.children, id)
        }
    })
}

pub fn contains_id(fields: &[SchemaField], id: &str) -> bool {
    find(fields, id).is_some()
}

/// 整片森林的节点总数
pub fn count_nodes(fields: &[SchemaField]) -> usize {
    fields.iter().map(|f| 1 + count_nodes(&f.children)).sum()
}

/// 深度优先（先序）收集全部ID
#[cfg(test)]
pub fn collect_ids(fields: &[SchemaField]) -> Vec<String> {
    fn walk(fields: &[SchemaField], out: &mut Vec<String>) {
        for f in fields {
            out.push(f.id.clone());
            walk(&f.children, out);
        }
    }
    let mut out = Vec::new();
    walk(fields, &mut out);
    out
}
