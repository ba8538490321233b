//! 程序入口：初始化日志、载入演示结构，执行一组编辑操作并输出样例文档

use tracing_subscriber::fmt::SubscriberBuilder;

use schema_builder::vm::bridge::*;
use schema_builder::{AppState, FieldRow, FieldType};

/// 读取日志级别（未设置或无法解析时使用 INFO）
fn log_level() -> tracing::Level {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(tracing::Level::INFO)
}

/// 单行的缩进文本：每层两个空格
fn row_line(row: &FieldRow) -> String {
    let pad = "  ".repeat(row.depth as usize);
    let required = if row.required { " *" } else { "" };
    let add = if row.can_add_child { format!("  [{}]", ADD_ITEM_LABEL) } else { String::new() };
    format!("{}{}: {}{}{}", pad, row.key, row.field_type, required, add)
}

fn print_rows(rows: &[FieldRow]) {
    for row in rows {
        println!("{}", row_line(row));
    }
}

fn main() -> anyhow::Result<()> {
    // 初始化日志输出
    let _ = SubscriberBuilder::default()
        .with_max_level(log_level())
        .try_init();

    let mut state = AppState::with_demo_schema();
    tracing::info!("{}，共 {} 个字段", STATUS_READY, state.node_count());

    // 演示：新增带子字段的数组并调整类型
    let tags = state.add_field(None);
    state.update_key(&tags, "tags");
    state.update_type(&tags, FieldType::Array);
    let item = state.add_field(Some(&tags));
    state.update_key(&item, "label");
    state.update_type(&item, "enum".parse()?);
    state.toggle_required("field_1");

    print_rows(&state.rows());
    println!();

    match state.render() {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("{}{}", STATUS_ERROR_PREFIX, e);
            return Err(e.into());
        }
    }

    state.submit();
    println!("{}", STATUS_SUBMITTED);
    Ok(())
}
