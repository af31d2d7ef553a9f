//! 标识符类型
//!
//! 节点 id 在 trace 的地址字段中以 4 位补零的形式出现（如 `0003`），
//! 比较前统一换算成同样的形式。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 补零宽度
pub const ID_WIDTH: usize = 4;

/// 节点标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// 4 位补零形式，例如 `NodeId(3)` -> `"0003"`
    pub fn padded(self) -> String {
        format!("{:0width$}", self.0, width = ID_WIDTH)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(v: u32) -> Self {
        NodeId(v)
    }
}

/// 把地址字段里的 id 片段（`"3"`、`"0003"`、`"00:03"`）规整成补零形式。
///
/// 只保留数字；去掉前导零后再补齐到 [`ID_WIDTH`]。没有任何数字时返回 `None`。
pub fn pad_id_token(token: &str) -> Option<String> {
    let digits: String = token.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let trimmed = digits.trim_start_matches('0');
    Some(format!("{:0>width$}", trimmed, width = ID_WIDTH))
}
