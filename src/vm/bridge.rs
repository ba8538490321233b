//! VM桥接层：界面与 AppState 之间的公共常量
//!
//! 界面本身不在本库内，这里只提供展示层需要的固定文本与尺寸

// === 常量定义（消除魔法值） ===
pub const STATUS_READY: &str = "就绪";
pub const STATUS_SUBMITTED: &str = "Schema submitted successfully!";
pub const STATUS_ERROR_PREFIX: &str = "错误: ";

/// “添加字段/添加子字段”按钮文本
pub const ADD_ITEM_LABEL: &str = "+ Add Item";
/// 每层嵌套的缩进步长
pub const INDENT_STEP: u32 = 20;

/// 日志级别环境变量（取值如 `debug`、`info`）
pub const LOG_LEVEL_ENV: &str = "SCHEMA_BUILDER_LOG";
