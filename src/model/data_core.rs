//! AppState：应用核心状态与字段操作

use jsonpath_rust::JsonPath;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::cascade::apply_type_change;
use crate::model::id_gen::IdGenerator;
use crate::model::sample::{generate, render_pretty};
use crate::model::schema::{demo_fields, FieldType, SchemaField, SchemaTree};
use crate::model::shadow_tree::{build_field_rows, FieldRow};
use crate::model::tree_ops;

/// 单一状态单元：当前字段森林快照 + 会话内ID生成器
///
/// 每个操作都基于旧快照计算出新树再整体替换，不存在部分更新可见的窗口。
#[derive(Debug, Default)]
pub struct AppState {
    fields: SchemaTree,
    ids: IdGenerator,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("未知字段类型: {0}")]
    UnknownType(String),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("JSONPath错误: {0}")]
    JsonPath(String),
    #[error("状态错误: {0}")]
    State(String),
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以演示结构作为初始快照
    pub fn with_demo_schema() -> Self {
        Self::from_fields(demo_fields())
    }

    /// 以给定森林作为初始快照（调用方保证ID唯一）
    pub fn from_fields(fields: SchemaTree) -> Self {
        Self {
            fields,
            ids: IdGenerator::new(),
        }
    }

    /// 当前根层字段（供界面渲染）
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&SchemaField> {
        tree_ops::find(&self.fields, id)
    }

    pub fn node_count(&self) -> usize {
        tree_ops::count_nodes(&self.fields)
    }

    /// 拍平后的行视图
    pub fn rows(&self) -> Vec<FieldRow> {
        build_field_rows(&self.fields)
    }

    /// 修改键名（不做唯一性校验）
    pub fn update_key(&mut self, id: &str, new_key: &str) {
        tracing::debug!("update_key: {} -> {:?}", id, new_key);
        self.warn_if_missing("update_key", id);
        self.fields = tree_ops::find_and_update(&self.fields, id, |field| SchemaField {
            key: new_key.to_string(),
            ..field
        });
    }

    /// 修改类型并应用级联规则
    pub fn update_type(&mut self, id: &str, new_type: FieldType) {
        tracing::debug!("update_type: {} -> {}", id, new_type);
        self.warn_if_missing("update_type", id);
        self.fields = tree_ops::find_and_update(&self.fields, id, |field| apply_type_change(field, new_type));
    }

    pub fn toggle_required(&mut self, id: &str) {
        tracing::debug!("toggle_required: {}", id);
        self.warn_if_missing("toggle_required", id);
        self.fields = tree_ops::find_and_update(&self.fields, id, |field| SchemaField {
            required: !field.required,
            ..field
        });
    }

    /// 新增默认字段：无父ID时追加到根层，否则追加到父节点子字段末尾
    ///
    /// 返回新字段ID；父ID不存在时树不变，该ID不会出现在树中。
    pub fn add_field(&mut self, parent_id: Option<&str>) -> String {
        let id = self.fresh_id();
        let new_field = SchemaField::with_default(id.clone());
        match parent_id {
            None => {
                tracing::debug!("add_field: 根层新增 {}", id);
                let mut fields = self.fields.clone();
                fields.push(new_field);
                self.fields = fields;
            }
            Some(parent_id) => {
                tracing::debug!("add_field: 在 {} 下新增 {}", parent_id, id);
                self.warn_if_missing("add_field", parent_id);
                self.fields = tree_ops::find_and_add_child(&self.fields, parent_id, &new_field);
            }
        }
        id
    }

    /// 删除字段及其整棵子树
    pub fn delete_field(&mut self, id: &str) {
        tracing::debug!("delete_field: {}", id);
        self.warn_if_missing("delete_field", id);
        self.fields = tree_ops::find_and_delete(&self.fields, id);
    }

    /// 当前快照的样例文档
    pub fn sample_document(&self) -> Map<String, Value> {
        generate(&self.fields)
    }

    /// 两空格缩进的样例文档文本
    pub fn render(&self) -> Result<String, AppError> {
        Ok(render_pretty(&self.sample_document())?)
    }

    /// 提交：记录并返回样例文档
    pub fn submit(&self) -> Map<String, Value> {
        let data = self.sample_document();
        let doc = Value::Object(data.clone());
        tracing::info!("Generated Schema Data: {}", doc);
        data
    }

    /// 按字段ID提取其在样例文档中对应片段的 pretty 字符串
    ///
    /// 字段存在但在样例文档中没有对应值时（挂在非容器节点下的子字段、
    /// 被同级重名字段覆盖的字段的子字段）返回 `AppError::State`。
    pub fn sample_for(&self, id: &str) -> Result<String, AppError> {
        let row = self
            .rows()
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::State(format!("字段不存在: {}", id)))?;
        let doc = Value::Object(self.sample_document());
        let hits: Vec<&Value> = doc
            .query(&row.path)
            .map_err(|e| AppError::JsonPath(e.to_string()))?;
        let first = hits
            .into_iter()
            .next()
            .ok_or_else(|| AppError::State(format!("字段 {} 在样例文档中没有对应值: {}", id, row.path)))?;
        Ok(serde_json::to_string_pretty(first)?)
    }

    /// 生成当前树中不存在的ID（树可能由外部ID预先填充）
    fn fresh_id(&mut self) -> String {
        loop {
            let id = self.ids.next_id();
            if !tree_ops::contains_id(&self.fields, &id) {
                return id;
            }
            tracing::warn!("生成的ID与现有字段冲突，重新生成: {}", id);
        }
    }

    fn warn_if_missing(&self, op: &str, id: &str) {
        if !tree_ops::contains_id(&self.fields, id) {
            tracing::warn!("{}: 字段 {} 不存在，忽略", op, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn scenario_d() -> AppState {
        AppState::from_fields(vec![SchemaField::new("addr", "addr", FieldType::Nested)
            .with_children(vec![SchemaField::new("city", "city", FieldType::String)])])
    }

    #[test]
    fn test_scenarios_a_to_c() {
        let a = AppState::from_fields(vec![SchemaField::new("1", "name", FieldType::String)]);
        assert_eq!(Value::Object(a.sample_document()), json!({"name": "STRING"}));

        let b = AppState::from_fields(vec![SchemaField::new("1", "age", FieldType::Integer)]);
        assert_eq!(Value::Object(b.sample_document()), json!({"age": 42}));

        let c = AppState::from_fields(vec![SchemaField::new("1", "tags", FieldType::Array)]);
        assert_eq!(Value::Object(c.sample_document()), json!({"tags": ["item1", "item2"]}));
    }

    #[test]
    fn test_scenario_d_and_e() {
        let mut state = scenario_d();
        assert_eq!(Value::Object(state.sample_document()), json!({"addr": {"city": "STRING"}}));

        state.delete_field("addr");
        assert!(state.fields().is_empty());
        assert_eq!(Value::Object(state.sample_document()), json!({}));
        assert_eq!(state.render().unwrap(), "{}");
    }

    #[test]
    fn test_add_field_ids_are_unique() {
        let mut state = AppState::with_demo_schema();
        let mut parent: Option<String> = None;
        for i in 0..200 {
            let id = state.add_field(parent.as_deref());
            if i % 3 == 0 {
                state.update_type(&id, FieldType::Object);
                parent = Some(id);
            }
        }
        let ids = tree_ops::collect_ids(state.fields());
        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(ids.len(), 208);
        assert_eq!(unique.len(), ids.len(), "所有ID应两两不同");
    }

    #[test]
    fn test_add_field_defaults_and_placement() {
        let mut state = AppState::with_demo_schema();
        let root_id = state.add_field(None);
        assert_eq!(state.fields().last().unwrap().id, root_id);

        let child_id = state.add_field(Some("field_3"));
        let address = state.field("field_3").unwrap();
        let child = address.children.last().unwrap();
        assert_eq!(child.id, child_id);
        assert_eq!(child.key, "newField");
        assert_eq!(child.field_type, FieldType::String);
        assert!(!child.required);
        assert!(child.children.is_empty());
    }

    #[test]
    fn test_update_key_type_and_required() {
        let mut state = AppState::with_demo_schema();
        state.update_key("field_1", "fullName");
        state.update_type("field_2", FieldType::Integer);
        state.toggle_required("field_5");

        assert_eq!(state.field("field_1").unwrap().key, "fullName");
        assert_eq!(state.field("field_2").unwrap().field_type, FieldType::Integer);
        assert!(state.field("field_5").unwrap().required);

        state.toggle_required("field_5");
        assert!(!state.field("field_5").unwrap().required);
    }

    #[test]
    fn test_duplicate_keys_allowed() {
        let mut state = AppState::with_demo_schema();
        state.update_key("field_2", "name");
        assert_eq!(state.field("field_1").unwrap().key, "name");
        assert_eq!(state.field("field_2").unwrap().key, "name");
    }

    #[test]
    fn test_irrecoverable_cascade() {
        let mut state = AppState::with_demo_schema();
        let before = state.node_count();

        state.update_type("field_3", FieldType::String);
        assert!(state.field("field_3").unwrap().children.is_empty());
        assert_eq!(state.node_count(), before - 5);

        state.update_type("field_3", FieldType::Nested);
        assert!(state.field("field_3").unwrap().children.is_empty(), "改回容器类型不恢复子字段");
        assert_eq!(Value::Object(state.sample_document())["address"], json!({}));
    }

    #[test]
    fn test_unknown_id_operations_are_noops() {
        let mut state = AppState::with_demo_schema();
        let snapshot = state.fields().to_vec();

        state.update_key("ghost", "x");
        state.update_type("ghost", FieldType::Array);
        state.toggle_required("ghost");
        state.delete_field("ghost");
        assert_eq!(state.fields(), snapshot.as_slice());

        let id = state.add_field(Some("ghost"));
        assert_eq!(state.fields(), snapshot.as_slice());
        assert!(state.field(&id).is_none());
    }

    #[test]
    fn test_add_child_under_scalar_is_lenient() {
        // 不校验父节点类型：产生“非容器但有子字段”的节点
        let mut state = AppState::with_demo_schema();
        state.add_field(Some("field_1"));
        let name = state.field("field_1").unwrap();
        assert_eq!(name.field_type, FieldType::String);
        assert_eq!(name.children.len(), 1);
        // 样例值仍按类型生成
        assert_eq!(state.sample_document()["name"], json!("STRING"));
    }

    #[test]
    fn test_render_and_submit_match() {
        let state = AppState::with_demo_schema();
        let text = state.render().unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, Value::Object(state.submit()));
        assert!(text.starts_with("{\n  \"name\": \"STRING\""));
        assert_eq!(
            parsed,
            json!({
                "name": "STRING",
                "class": "number",
                "address": {
                    "hno": "number",
                    "city": "STRING",
                    "pin": "number",
                    "landmark": {"nearby": "STRING"}
                }
            })
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let state = AppState::with_demo_schema();
        assert_eq!(state.render().unwrap(), state.render().unwrap());
    }

    #[test]
    fn test_sample_for_field() {
        let mut state = AppState::with_demo_schema();
        assert_eq!(state.sample_for("field_8").unwrap(), "\"STRING\"");
        let landmark: Value = serde_json::from_str(&state.sample_for("field_7").unwrap()).unwrap();
        assert_eq!(landmark, json!({"nearby": "STRING"}));

        state.update_type("field_3", FieldType::Array);
        let city: Value = serde_json::from_str(&state.sample_for("field_5").unwrap()).unwrap();
        assert_eq!(city, json!("STRING"));
    }

    #[test]
    fn test_sample_for_keys_with_control_characters() {
        let state = AppState::from_fields(vec![
            SchemaField::new("tab", "a\tb", FieldType::Integer),
            SchemaField::new("nl", "line\nbreak", FieldType::Integer),
            SchemaField::new("q", "q\"x", FieldType::Integer),
        ]);
        assert_eq!(state.sample_for("tab").unwrap(), "42");
        assert_eq!(state.sample_for("nl").unwrap(), "42");
        assert_eq!(state.sample_for("q").unwrap(), "42");
    }

    #[test]
    fn test_sample_for_field_without_sample_value() {
        // 挂在非容器节点下的子字段不出现在样例文档中
        let mut state = AppState::with_demo_schema();
        let stray = state.add_field(Some("field_1"));
        assert!(state.field(&stray).is_some());
        assert!(matches!(state.sample_for(&stray), Err(AppError::State(_))));
    }

    #[test]
    fn test_submit_logs_and_returns_document() {
        let state = scenario_d();
        assert_eq!(Value::Object(state.submit()), json!({"addr": {"city": "STRING"}}));
    }

    #[test]
    fn test_sample_for_unknown_id() {
        let state = AppState::with_demo_schema();
        assert!(matches!(state.sample_for("ghost"), Err(AppError::State(_))));
    }

    #[test]
    fn test_add_field_next_to_generator_style_ids() {
        let mut probe = IdGenerator::new();
        let taken = probe.next_id();
        let mut state = AppState::from_fields(vec![SchemaField::new(taken.clone(), "x", FieldType::String)]);
        let id = state.add_field(None);
        assert_ne!(id, taken);
        assert_eq!(state.node_count(), 2);
    }
}
