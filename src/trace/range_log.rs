//! 发送时间轴扫描
//!
//! 动画只需要“谁在什么时候发了包”以及广播半径，这里走轻量路径：
//! 按尺寸标记切块，只看 `t` 块里的时间、`/NodeList/<id>` 和 `TxRange(<int>)`。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::kv::NUMBER;
use super::segment::transmit_blocks;
use crate::error::{Result, TraceError};
use crate::net::NodeId;

static TX_MARK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?s)^t\s+({NUMBER})\s+/NodeList/(\d+).*?TxRange\((\d+)\)"))
        .expect("transmit mark regex")
});

/// 时间轴上的一次发送
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceLogEntry {
    /// 仿真时间（秒）
    pub time: f64,
    pub node_id: NodeId,
}

/// 扫描结果：一次发送及其记录的广播半径
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransmitMark {
    pub entry: TraceLogEntry,
    pub tx_range: u32,
}

/// 按原始出现顺序返回所有发送标记。
///
/// 被保留的 `t` 块若缺少必需字段，整个缓冲区解析失败，错误里带块序号。
#[tracing::instrument(skip(buf), fields(bytes = buf.len()))]
pub fn scan_transmit_marks(buf: &str) -> Result<Vec<TransmitMark>> {
    let mut marks = Vec::new();
    for block in transmit_blocks(buf) {
        let caps = TX_MARK_RE.captures(block.text).ok_or_else(|| {
            TraceError::malformed(
                block.ordinal,
                "transmit block lacks '<time> /NodeList/<id> ... TxRange(<int>)'",
            )
        })?;
        let bad = |what: &str, e: &dyn std::fmt::Display| {
            TraceError::malformed(block.ordinal, format!("bad {what}: {e}"))
        };
        let time = caps[1].parse::<f64>().map_err(|e| bad("time", &e))?;
        let node_id = caps[2].parse::<u32>().map(NodeId).map_err(|e| bad("node id", &e))?;
        let tx_range = caps[3].parse::<u32>().map_err(|e| bad("TxRange", &e))?;

        trace!(ordinal = block.ordinal, time, node = node_id.0, tx_range, "发送标记");
        marks.push(TransmitMark {
            entry: TraceLogEntry { time, node_id },
            tx_range,
        });
    }
    debug!(marks = marks.len(), "发送时间轴扫描完成");
    Ok(marks)
}
