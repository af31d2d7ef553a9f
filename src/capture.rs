//! 抓包导出读取
//!
//! 读取抓包分析器以 `-T json -e <field>...` 导出的 JSON 数组，每个元素形如
//! `{"_source": {"layers": {"frame.time_relative": ["0.1"], "ip.src": ["10.1.1.1"], ...}}}`。
//! 分析器本身的调用不在本 crate 范围内。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::error::{Result, TraceError};

pub const FIELD_TIME: &str = "frame.time_relative";
pub const FIELD_LEN: &str = "frame.len";
pub const FIELD_PROTOCOLS: &str = "frame.protocols";
pub const FIELD_IP_SRC: &str = "ip.src";
pub const FIELD_IP_DST: &str = "ip.dst";

#[derive(Debug, Deserialize)]
struct ExportedPacket {
    #[serde(rename = "_source")]
    source: ExportedSource,
}

#[derive(Debug, Deserialize)]
struct ExportedSource {
    #[serde(default)]
    layers: HashMap<String, Vec<String>>,
}

/// 一个抓到的包
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedPacket {
    /// 相对首包的时间（秒）
    pub time: f64,
    pub len: u32,
    /// 非 IP 包没有地址
    pub ip_src: Option<String>,
    pub ip_dst: Option<String>,
    /// 协议链，如 `ppp:ip:udp:discard`
    pub protocols: String,
}

impl CapturedPacket {
    /// 协议链按层拆开，最外层在前
    pub fn protocol_stack(&self) -> Vec<&str> {
        self.protocols.split(':').filter(|p| !p.is_empty()).collect()
    }
}

fn first_value<'a>(layers: &'a HashMap<String, Vec<String>>, field: &str) -> Option<&'a str> {
    layers.get(field)?.first().map(String::as_str)
}

fn decode_packet(ordinal: usize, layers: &HashMap<String, Vec<String>>) -> Result<CapturedPacket> {
    let required = |field: &str| {
        first_value(layers, field)
            .ok_or_else(|| TraceError::malformed(ordinal, format!("missing {field}")))
    };
    let time = required(FIELD_TIME)?
        .parse::<f64>()
        .map_err(|e| TraceError::malformed(ordinal, format!("bad {FIELD_TIME}: {e}")))?;
    let len = required(FIELD_LEN)?
        .parse::<u32>()
        .map_err(|e| TraceError::malformed(ordinal, format!("bad {FIELD_LEN}: {e}")))?;
    let protocols = required(FIELD_PROTOCOLS)?.to_string();

    Ok(CapturedPacket {
        time,
        len,
        ip_src: first_value(layers, FIELD_IP_SRC).map(str::to_string),
        ip_dst: first_value(layers, FIELD_IP_DST).map(str::to_string),
        protocols,
    })
}

/// 解析导出的 JSON；缺少时间/长度/协议链的包会让整个解析失败。
#[tracing::instrument(skip(buf), fields(bytes = buf.len()))]
pub fn parse_capture_json(buf: &str) -> Result<Vec<CapturedPacket>> {
    let exported: Vec<ExportedPacket> = serde_json::from_str(buf)?;

    let packets = exported
        .iter()
        .enumerate()
        .map(|(idx, pkt)| decode_packet(idx + 1, &pkt.source.layers))
        .collect::<Result<Vec<_>>>()?;

    debug!(packets = packets.len(), "抓包导出解析完成");
    Ok(packets)
}
