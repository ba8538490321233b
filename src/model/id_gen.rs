//! 字段ID生成：会话内自增序号 + 随机后缀

use rand::Rng;

/// ID前缀
pub const ID_PREFIX: &str = "field";
/// 随机后缀长度（小写 base36）
pub const ID_SUFFIX_LEN: usize = 9;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// 会话级ID生成器
///
/// 序号保证同一生成器内两次调用不会相等；随机后缀用于区分不同会话
/// 产生的ID（例如从别处载入的字段）。
#[derive(Debug, Default)]
pub struct IdGenerator {
    seq: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 生成形如 `field_<序号>_<后缀>` 的ID
    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format!("{}_{}_{}", ID_PREFIX, self.seq, random_suffix())
    }
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}
