//! 节点目录
//!
//! 从节点列表文本构建三组互不相交的节点集合，并把事件中的设备路径 /
//! 地址字段关联到具体节点。
//!
//! 节点列表每行一条：`Node 0: (10, 20, 0)`、`Sender 2: (0, 0, 0)`、`Sink 1: (50, 50, 0)`。
//! 任一非空行格式不对都会让整个列表解析失败（下游关联假定列表完整）。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use super::id::{pad_id_token, NodeId};
use super::node::{NodeRecord, NodeRole, PlacedNode};
use crate::error::{Result, TraceError};

static NODE_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    let num = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";
    Regex::new(&format!(
        r"^(Node|Sink|Sender)\s+(\d+)\s*:\s*\(\s*({num})\s*,\s*({num})\s*,\s*({num})\s*\)$"
    ))
    .expect("node line regex")
});

static NODE_LIST_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/NodeList/(\d+)(?:/|$)").expect("device path regex"));

/// 设备路径中的仿真器节点序号，例如
/// `/NodeList/3/DeviceList/0/$ns3::AquaSimNetDevice/Phy/Tx` -> `NodeId(3)`。
pub fn node_index_from_path(device_path: &str) -> Option<NodeId> {
    let caps = NODE_LIST_PATH_RE.captures(device_path)?;
    caps[1].parse::<u32>().ok().map(NodeId)
}

/// 节点查找键
#[derive(Debug, Clone, Copy)]
pub enum NodeKey<'a> {
    /// 某一角色集合内的数字 id
    Id(NodeRole, NodeId),
    /// 某一角色集合内、来自事件字段的 id 片段（如 `"0003"`）
    Token(NodeRole, &'a str),
    /// 事件的设备路径，按仿真器节点序号解析
    DevicePath(&'a str),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeDirectory {
    normal: Vec<NodeRecord>,
    senders: Vec<NodeRecord>,
    sinks: Vec<NodeRecord>,
}

impl NodeDirectory {
    /// 解析节点列表文本；空行跳过，其余行必须全部合法。
    #[tracing::instrument(skip(buf), fields(bytes = buf.len()))]
    pub fn parse(buf: &str) -> Result<Self> {
        let mut dir = NodeDirectory::default();

        for (idx, line) in buf.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let caps = NODE_LINE_RE.captures(trimmed).ok_or_else(|| {
                TraceError::malformed(line_no, format!("not a node line: {trimmed:?}"))
            })?;

            let role = NodeRole::parse(&caps[1])
                .ok_or_else(|| TraceError::malformed(line_no, "unknown node keyword"))?;
            let id = caps[2]
                .parse::<u32>()
                .map(NodeId)
                .map_err(|e| TraceError::malformed(line_no, format!("bad node id: {e}")))?;
            let coord = |i: usize| {
                caps[i].parse::<f64>().map_err(|e| {
                    TraceError::malformed(line_no, format!("bad coordinate {:?}: {e}", &caps[i]))
                })
            };
            let record = NodeRecord {
                id,
                x: coord(3)?,
                y: coord(4)?,
                z: coord(5)?,
                role,
            };

            let set = dir.set_mut(role);
            if set.iter().any(|n| n.id == id) {
                return Err(TraceError::malformed(
                    line_no,
                    format!("duplicate {} id {id}", role.keyword()),
                ));
            }
            set.push(record);
        }

        debug!(
            normal = dir.normal.len(),
            senders = dir.senders.len(),
            sinks = dir.sinks.len(),
            "节点列表解析完成"
        );
        if dir.senders.len() > 1 || dir.sinks.len() > 1 {
            warn!(
                senders = dir.senders.len(),
                sinks = dir.sinks.len(),
                "仿真器只安装第一个发送端和第一个汇聚节点，其余不参与关联"
            );
        }
        Ok(dir)
    }

    pub fn normal(&self) -> &[NodeRecord] {
        &self.normal
    }

    pub fn senders(&self) -> &[NodeRecord] {
        &self.senders
    }

    pub fn sinks(&self) -> &[NodeRecord] {
        &self.sinks
    }

    pub fn role_set(&self, role: NodeRole) -> &[NodeRecord] {
        match role {
            NodeRole::Normal => &self.normal,
            NodeRole::Sender => &self.senders,
            NodeRole::Sink => &self.sinks,
        }
    }

    fn set_mut(&mut self, role: NodeRole) -> &mut Vec<NodeRecord> {
        match role {
            NodeRole::Normal => &mut self.normal,
            NodeRole::Sender => &mut self.senders,
            NodeRole::Sink => &mut self.sinks,
        }
    }

    /// 三组节点的总数
    pub fn len(&self) -> usize {
        self.normal.len() + self.senders.len() + self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn resolve(&self, key: NodeKey<'_>) -> Option<&NodeRecord> {
        match key {
            NodeKey::Id(role, id) => self.lookup_padded(role, &id.padded()),
            NodeKey::Token(role, token) => {
                let padded = pad_id_token(token)?;
                self.lookup_padded(role, &padded)
            }
            NodeKey::DevicePath(path) => {
                let index = node_index_from_path(path)?;
                self.by_index(index)
            }
        }
    }

    fn lookup_padded(&self, role: NodeRole, padded: &str) -> Option<&NodeRecord> {
        self.role_set(role).iter().find(|n| n.id.padded() == padded)
    }

    /// 按仿真器节点序号查找。
    ///
    /// 仿真场景先安装普通节点（按列表顺序占用 `0..n`），再只安装第一个发送端（`n`）
    /// 和第一个汇聚节点（`n + 1`）；其余发送端/汇聚节点不会出现在 trace 里。
    pub fn by_index(&self, index: NodeId) -> Option<&NodeRecord> {
        let i = index.0 as usize;
        let n = self.normal.len();
        if i < n {
            self.normal.get(i)
        } else if i == n {
            self.senders.first()
        } else if i == n + 1 {
            self.sinks.first()
        } else {
            None
        }
    }

    /// 仿真器实际安装的节点，按序号排列（渲染层按它绘制）。
    ///
    /// 没有发送端时汇聚节点仍占 `n + 1`，序号不一定连续。
    pub fn placed_nodes(&self) -> Vec<PlacedNode> {
        let n = self.normal.len();
        let installed = self
            .senders
            .first()
            .map(|r| (n, r))
            .into_iter()
            .chain(self.sinks.first().map(|r| (n + 1, r)));

        self.normal
            .iter()
            .enumerate()
            .chain(installed)
            .map(|(i, record)| PlacedNode {
                index: NodeId(i as u32),
                record: record.clone(),
            })
            .collect()
    }
}
