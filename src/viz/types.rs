use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::net::{NodeId, PlacedNode};
use crate::sim::PlaybackStatus;

/// 渲染层看到的一个波纹
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VizWave {
    pub token: u64,
    /// 激活时刻（秒）
    pub start_time: f64,
    /// 已存活的仿真时间（秒），渲染层据此计算缩放/透明度
    pub age: f64,
}

/// 某一时刻回放引擎的只读快照（每次 tick 后给渲染层）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    pub current_time: f64,
    pub status: PlaybackStatus,
    pub cursor: usize,
    pub total: usize,
    pub active_waves: BTreeMap<NodeId, Vec<VizWave>>,
}

/// 回放输出的第一行：场景元信息 + 画布变换
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VizMeta {
    pub range: u32,
    /// 广播半径换算到画布上的像素
    pub range_radius: f64,
    pub nodes: Vec<PlacedNode>,
    pub entries: usize,
    pub layout: CanvasLayout,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
}

impl VizMeta {
    /// 每条坐标轴的刻度数
    pub const AXIS_TICKS: usize = 5;

    pub fn new(range: u32, nodes: Vec<PlacedNode>, entries: usize, width: f64, height: f64) -> Self {
        let layout = CanvasLayout::fit(&nodes, width, height);
        Self {
            range,
            range_radius: layout.scale_range(range),
            nodes,
            entries,
            layout,
            x_ticks: layout.x_ticks(Self::AXIS_TICKS),
            y_ticks: layout.y_ticks(Self::AXIS_TICKS),
        }
    }
}

/// 坐标轴刻度
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisTick {
    /// 画布坐标
    pub pos: f64,
    /// 原始坐标值
    pub value: f64,
}

/// 把节点原始坐标等比缩放到画布上，居中并留边
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasLayout {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl CanvasLayout {
    /// 内容占画布的比例
    pub const FILL: f64 = 0.7;

    /// 根据节点包围盒计算缩放和偏移；没有节点时用画布本身作为包围盒。
    pub fn fit<'a, I>(nodes: I, width: f64, height: f64) -> Self
    where
        I: IntoIterator<Item = &'a PlacedNode>,
    {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut any = false;
        for n in nodes {
            any = true;
            min_x = min_x.min(n.record.x);
            max_x = max_x.max(n.record.x);
            min_y = min_y.min(n.record.y);
            max_y = max_y.max(n.record.y);
        }
        if !any {
            (min_x, max_x, min_y, max_y) = (0.0, width, 0.0, height);
        }

        let nonzero = |d: f64| if d == 0.0 { 1.0 } else { d };
        let data_w = nonzero(max_x - min_x);
        let data_h = nonzero(max_y - min_y);
        let scale = (width / data_w).min(height / data_h) * Self::FILL;

        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            scale,
            offset_x: (width - data_w * scale) / 2.0,
            offset_y: (height - data_h * scale) / 2.0,
        }
    }

    /// 原始坐标 -> 画布坐标
    pub fn project(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.min_x) * self.scale + self.offset_x,
            (y - self.min_y) * self.scale + self.offset_y,
        )
    }

    /// 广播半径按同一比例缩放
    pub fn scale_range(&self, range: u32) -> f64 {
        range as f64 * self.scale
    }

    pub fn x_ticks(&self, count: usize) -> Vec<AxisTick> {
        ticks(count, self.min_x, self.max_x, self.scale, self.offset_x)
    }

    pub fn y_ticks(&self, count: usize) -> Vec<AxisTick> {
        ticks(count, self.min_y, self.max_y, self.scale, self.offset_y)
    }
}

fn ticks(count: usize, min: f64, max: f64, scale: f64, offset: f64) -> Vec<AxisTick> {
    let steps = count.saturating_sub(1).max(1) as f64;
    (0..count)
        .map(|i| {
            let value = min + (i as f64 / steps) * (max - min);
            AxisTick {
                pos: (value - min) * scale + offset,
                value,
            }
        })
        .collect()
}
