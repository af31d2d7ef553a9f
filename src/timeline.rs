//! 时间轴构建
//!
//! 把解析出的事件按时间戳稳定排序（同一时刻保持原始出现顺序），
//! 并为发送时间轴取出广播半径。所有派生视图都由调用方在解析后显式计算。

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

use crate::error::{Result, TraceError};
use crate::net::{NodeDirectory, NodeId};
use crate::trace::{parse_events, scan_transmit_marks, Event, TraceLogEntry};

/// 可以放进时间轴、并被回放引擎消费的条目
pub trait Cue {
    /// 仿真时间（秒）
    fn time(&self) -> f64;

    /// 到达该条目时应当亮起的节点（仿真器序号）；`None` 表示只推进游标
    fn wave_node(&self) -> Option<NodeId>;
}

impl Cue for TraceLogEntry {
    fn time(&self) -> f64 {
        self.time
    }

    fn wave_node(&self) -> Option<NodeId> {
        Some(self.node_id)
    }
}

// 只有发送会在发送节点上激起波纹
impl Cue for Event {
    fn time(&self) -> f64 {
        self.timestamp
    }

    fn wave_node(&self) -> Option<NodeId> {
        if self.is_transmit() {
            self.node_index()
        } else {
            None
        }
    }
}

/// 按时间戳非降序排列的条目序列
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Timeline<T> {
    entries: Vec<T>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Cue> Timeline<T> {
    /// 稳定排序；对已排序的序列是恒等变换。
    pub fn new(mut entries: Vec<T>) -> Self {
        entries.sort_by(|a, b| a.time().total_cmp(&b.time()));
        Self { entries }
    }

    pub fn is_sorted(&self) -> bool {
        self.entries
            .windows(2)
            .all(|w| w[0].time().total_cmp(&w[1].time()).is_le())
    }

    pub fn first_time(&self) -> Option<f64> {
        self.entries.first().map(Cue::time)
    }

    pub fn last_time(&self) -> Option<f64> {
        self.entries.last().map(Cue::time)
    }

    /// 时间轴上出现、但节点目录里找不到的节点序号
    pub fn unresolved_nodes(&self, dir: &NodeDirectory) -> BTreeSet<NodeId> {
        self.entries
            .iter()
            .filter_map(Cue::wave_node)
            .filter(|id| dir.by_index(*id).is_none())
            .collect()
    }
}

impl<T> Timeline<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.entries.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<T> {
        self.entries
    }
}

impl<'a, T> IntoIterator for &'a Timeline<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Timeline<Event> {
    /// 只保留设备路径指向仿真器节点 `node` 的事件；原时间轴不变。
    pub fn for_node(&self, node: NodeId) -> Timeline<Event> {
        // 过滤保持相对顺序，结果仍然有序
        Timeline {
            entries: self
                .entries
                .iter()
                .filter(|ev| ev.node_index() == Some(node))
                .cloned()
                .collect(),
        }
    }
}

/// 发送时间轴 + 广播半径
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeTimeline {
    pub range: u32,
    pub log: Timeline<TraceLogEntry>,
}

/// 尺寸标记语法的 trace -> 发送时间轴。
///
/// `range` 取原始顺序（排序前）中第一条发送记录的 TxRange。
pub fn build_range_timeline(buf: &str) -> Result<RangeTimeline> {
    let marks = scan_transmit_marks(buf)?;
    let Some(first) = marks.first() else {
        return Err(TraceError::EmptyInput { what: "transmit" });
    };
    let range = first.tx_range;
    let log = Timeline::new(marks.into_iter().map(|m| m.entry).collect());
    debug!(range, entries = log.len(), "发送时间轴构建完成");
    Ok(RangeTimeline { range, log })
}

/// 完整语法的 trace -> 事件时间轴。
pub fn build_event_timeline(buf: &str) -> Result<Timeline<Event>> {
    let events = parse_events(buf)?;
    if events.is_empty() {
        return Err(TraceError::EmptyInput { what: "trace" });
    }
    let timeline = Timeline::new(events);
    debug!(entries = timeline.len(), "事件时间轴构建完成");
    Ok(timeline)
}
