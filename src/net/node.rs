//! 节点类型
//!
//! 定义节点位置记录及其角色（普通节点、发送端、汇聚节点）。

use super::id::NodeId;
use serde::{Deserialize, Serialize};

/// 节点角色
///
/// 序列化名沿用渲染层的叫法：发送端为 `source`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Normal,
    #[serde(rename = "source")]
    Sender,
    Sink,
}

impl NodeRole {
    /// 节点列表文件中的关键字
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "Node" => Some(Self::Normal),
            "Sender" => Some(Self::Sender),
            "Sink" => Some(Self::Sink),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Normal => "Node",
            Self::Sender => "Sender",
            Self::Sink => "Sink",
        }
    }
}

/// 一个节点的位置记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub role: NodeRole,
}

impl NodeRecord {
    pub fn position(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

/// 按仿真器节点序号（`/NodeList/<index>/`）排好的节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedNode {
    pub index: NodeId,
    #[serde(flatten)]
    pub record: NodeRecord,
}
