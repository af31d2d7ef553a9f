//! 协议头类型
//!
//! 每种头部把已知字段解析成强类型（可能缺失），完整的原始字段表保留在 `fields` 中。
//! 同一字段在不同版本的打印格式里名字不一，按别名顺序取第一个出现的。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::kv::{FieldMap, NUMBER};

static LEADING_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{NUMBER}")).expect("leading number regex"));

fn first<'a>(fields: &'a FieldMap, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .find_map(|name| fields.get(*name))
        .map(|v| v.trim())
}

fn first_string(fields: &FieldMap, names: &[&str]) -> Option<String> {
    first(fields, names).map(str::to_string)
}

/// 数值字段可能带单位后缀（如 `+9.92e+07ns`、`25kHz`），取最长的数字前缀
fn first_f64(fields: &FieldMap, names: &[&str]) -> Option<f64> {
    let raw = first(fields, names)?;
    leading_number(raw)?.parse().ok()
}

fn first_u64(fields: &FieldMap, names: &[&str]) -> Option<u64> {
    first(fields, names)?.parse().ok()
}

fn leading_number(raw: &str) -> Option<&str> {
    LEADING_NUMBER_RE.find(raw).map(|m| m.as_str())
}

/// `ns3::AquaSimPacketStamp`：物理层发送参数，仅出现在发送记录中
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PacketStamp {
    pub tx_power: Option<f64>,
    pub rx_power: Option<f64>,
    pub frequency: Option<f64>,
    pub noise: Option<f64>,
    pub tx_range: Option<u32>,
    pub fields: FieldMap,
}

impl PacketStamp {
    pub fn from_fields(fields: FieldMap) -> Self {
        Self {
            tx_power: first_f64(&fields, &["Pt", "TxPower"]),
            rx_power: first_f64(&fields, &["Pr", "RxPower"]),
            frequency: first_f64(&fields, &["Freq", "Frequency"]),
            noise: first_f64(&fields, &["Noise", "NoiseLvl"]),
            tx_range: first(&fields, &["TxRange"]).and_then(|v| v.parse().ok()),
            fields,
        }
    }
}

/// `ns3::AquaSimHeader`：网络层公共头
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkHeader {
    pub src: Option<String>,
    pub dst: Option<String>,
    pub next_hop: Option<String>,
    pub uid: Option<u64>,
    pub direction: Option<String>,
    pub fields: FieldMap,
}

impl NetworkHeader {
    pub fn from_fields(fields: FieldMap) -> Self {
        Self {
            src: first_string(&fields, &["SAddr", "SA"]),
            dst: first_string(&fields, &["DAddr", "DA"]),
            next_hop: first_string(&fields, &["NextHop"]),
            uid: first_u64(&fields, &["UId", "Uid"]),
            direction: first_string(&fields, &["Direction"]),
            fields,
        }
    }
}

/// `ns3::MacHeader`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacHeader {
    pub src: Option<String>,
    pub dst: Option<String>,
    pub fields: FieldMap,
}

impl MacHeader {
    pub fn from_fields(fields: FieldMap) -> Self {
        Self {
            src: first_string(&fields, &["SA"]),
            dst: first_string(&fields, &["DA"]),
            fields,
        }
    }
}

/// `ns3::VBHeader`：向量转发路由头
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingHeader {
    pub sender: Option<String>,
    pub forwarder: Option<String>,
    pub target: Option<String>,
    pub message_type: Option<String>,
    pub packet_num: Option<u64>,
    pub fields: FieldMap,
}

impl RoutingHeader {
    pub fn from_fields(fields: FieldMap) -> Self {
        Self {
            sender: first_string(&fields, &["SenderAddr", "SenderId"]),
            forwarder: first_string(&fields, &["ForwardAddr"]),
            target: first_string(&fields, &["TargetAddr"]),
            message_type: first_string(&fields, &["MessType", "MessageType"]),
            packet_num: first_u64(&fields, &["PkNum"]),
            fields,
        }
    }
}
