//! 字段结构构建工具库
//!
//! 提供嵌套字段森林的纯函数式编辑（按ID更新/删除/追加子字段、类型级联）
//! 以及按字段类型确定性生成样例JSON文档。界面层只持有 AppState 并调用其操作。

pub mod model;
pub mod vm;

// 重新导出主要类型
pub use model::data_core::{AppState, AppError};
pub use model::id_gen::IdGenerator;
pub use model::schema::{FieldType, SchemaField, SchemaTree};
pub use model::shadow_tree::{FieldRow, build_field_rows};
