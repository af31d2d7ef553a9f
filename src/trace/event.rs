//! 事件解析
//!
//! 把一条原始记录解析成结构化的 [`Event`]。各段必须按协议栈固定的顺序出现：
//!
//! ```text
//! t <time> <device path> ns3::AquaSimPacketStamp ... ns3::AquaSimHeader ... ns3::MacHeader ... ns3::VBHeader ... Payload ...
//! r <time> <device path> ns3::AquaSimHeader ... ns3::MacHeader ... ns3::VBHeader ... Payload ...
//! ```
//!
//! 缺任何一段整条记录都会被拒绝，不做部分解析。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::header::{MacHeader, NetworkHeader, PacketStamp, RoutingHeader};
use super::kv::{parse_key_values, FieldMap, NUMBER};
use super::segment::{segment_records, RawRecord, RecordKind};
use crate::error::{Result, TraceError};
use crate::net::{node_index_from_path, NodeId};

pub const PACKET_STAMP: &str = "ns3::AquaSimPacketStamp";
pub const NETWORK_HEADER: &str = "ns3::AquaSimHeader";
pub const MAC_HEADER: &str = "ns3::MacHeader";
pub const ROUTING_HEADER: &str = "ns3::VBHeader";
pub const PAYLOAD: &str = "Payload";

const TRANSMIT_SECTIONS: [&str; 5] = [PACKET_STAMP, NETWORK_HEADER, MAC_HEADER, ROUTING_HEADER, PAYLOAD];
const RECEIVE_SECTIONS: [&str; 4] = [NETWORK_HEADER, MAC_HEADER, ROUTING_HEADER, PAYLOAD];

static HEAD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^([tr])[ \t]+({NUMBER})\s+(\S+)\s+")).expect("record head regex")
});

static TX_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"TxRange\((\d+)\)").expect("tx range regex"));

/// 事件类型相关的字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    Transmit {
        stamp: PacketStamp,
        /// 发送时的广播半径
        tx_range: Option<u32>,
    },
    Receive,
}

/// 一条结构化的 trace 事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(flatten)]
    pub kind: EventKind,
    /// 仿真时间（秒）
    pub timestamp: f64,
    pub device_path: String,
    pub network: NetworkHeader,
    pub mac: MacHeader,
    pub routing: RoutingHeader,
    pub payload: FieldMap,
}

impl Event {
    pub fn record_kind(&self) -> RecordKind {
        match self.kind {
            EventKind::Transmit { .. } => RecordKind::Transmit,
            EventKind::Receive => RecordKind::Receive,
        }
    }

    pub fn is_transmit(&self) -> bool {
        matches!(self.kind, EventKind::Transmit { .. })
    }

    pub fn stamp(&self) -> Option<&PacketStamp> {
        match &self.kind {
            EventKind::Transmit { stamp, .. } => Some(stamp),
            EventKind::Receive => None,
        }
    }

    pub fn tx_range(&self) -> Option<u32> {
        match self.kind {
            EventKind::Transmit { tx_range, .. } => tx_range,
            EventKind::Receive => None,
        }
    }

    /// 设备路径中的仿真器节点序号
    pub fn node_index(&self) -> Option<NodeId> {
        node_index_from_path(&self.device_path)
    }
}

/// 按固定顺序切出各段文本；最后一段是 `Payload` 之后的全部内容。
fn split_sections<'a>(body: &'a str, markers: &[&str], ordinal: usize) -> Result<Vec<&'a str>> {
    let (head, tail) = markers
        .split_first()
        .ok_or_else(|| TraceError::malformed(ordinal, "no sections to split"))?;
    let mut rest = body.strip_prefix(*head).ok_or_else(|| {
        TraceError::malformed(ordinal, format!("expected {head} right after the device path"))
    })?;

    let mut sections = Vec::with_capacity(markers.len());
    for marker in tail {
        let Some(i) = rest.find(*marker) else {
            return Err(TraceError::malformed(ordinal, format!("missing {marker} section")));
        };
        sections.push(&rest[..i]);
        rest = &rest[i + marker.len()..];
    }
    sections.push(rest);
    Ok(sections)
}

/// 解析一条原始记录。纯函数。
pub fn parse_record(record: &RawRecord<'_>) -> Result<Event> {
    let ordinal = record.ordinal;
    let caps = HEAD_RE.captures(record.text).ok_or_else(|| {
        TraceError::malformed(ordinal, "expected '<t|r> <time> <device path>' header")
    })?;

    let letter = caps[1].chars().next().unwrap_or_default();
    if letter != record.kind.letter() {
        return Err(TraceError::malformed(
            ordinal,
            format!("record starts with '{letter}' but was segmented as '{}'", record.kind.letter()),
        ));
    }
    let timestamp = caps[2]
        .parse::<f64>()
        .map_err(|e| TraceError::malformed(ordinal, format!("bad timestamp: {e}")))?;
    let device_path = caps[3].to_string();
    let body = &record.text[caps.get(0).map_or(0, |m| m.end())..];

    let markers: &[&str] = match record.kind {
        RecordKind::Transmit => &TRANSMIT_SECTIONS,
        RecordKind::Receive => &RECEIVE_SECTIONS,
    };
    let sections = split_sections(body, markers, ordinal)?;
    let mut fields = sections.into_iter().map(parse_key_values);

    let kind = match record.kind {
        RecordKind::Transmit => {
            let stamp = PacketStamp::from_fields(fields.next().unwrap_or_default());
            let tx_range = stamp.tx_range.or_else(|| {
                TX_RANGE_RE
                    .captures(record.text)
                    .and_then(|c| c[1].parse().ok())
            });
            EventKind::Transmit { stamp, tx_range }
        }
        RecordKind::Receive => EventKind::Receive,
    };
    let network = NetworkHeader::from_fields(fields.next().unwrap_or_default());
    let mac = MacHeader::from_fields(fields.next().unwrap_or_default());
    let routing = RoutingHeader::from_fields(fields.next().unwrap_or_default());
    let payload = fields.next().unwrap_or_default();

    trace!(ordinal, timestamp, device_path = %device_path, "解析记录");

    Ok(Event {
        kind,
        timestamp,
        device_path,
        network,
        mac,
        routing,
        payload,
    })
}

/// 切分并解析整个 trace；遇到第一条错误记录即失败。
#[tracing::instrument(skip(buf), fields(bytes = buf.len()))]
pub fn parse_events(buf: &str) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for record in segment_records(buf) {
        events.push(parse_record(&record?)?);
    }
    debug!(events = events.len(), "trace 解析完成");
    Ok(events)
}
