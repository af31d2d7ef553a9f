//! 回放引擎
//!
//! 推进一个逻辑仿真时钟，到点的条目在对应节点上激起一个“波纹”，
//! 波纹存活 `wave_duration` 后被清理。时钟只由外部调用 `tick` 推动，
//! 引擎内部不等待、不加锁，调用方需保证串行调用。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

use super::time::SimTime;
use crate::net::NodeId;
use crate::timeline::{Cue, Timeline};

/// 回放参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackOpts {
    /// 每个波纹持续的仿真时间
    pub wave_duration: SimTime,
}

impl Default for PlaybackOpts {
    fn default() -> Self {
        Self {
            wave_duration: SimTime::from_secs(1),
        }
    }
}

/// 回放状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// 一个正在显示的波纹
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wave {
    /// 会话内唯一，渲染层用作 key
    pub token: u64,
    pub start: SimTime,
}

/// 一次 tick 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub spawned: usize,
    pub expired: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackEngine<T> {
    timeline: Timeline<T>,
    opts: PlaybackOpts,
    status: PlaybackStatus,
    now: SimTime,
    cursor: usize,
    active_waves: BTreeMap<NodeId, Vec<Wave>>,
    next_token: u64,
}

impl<T: Cue> PlaybackEngine<T> {
    pub fn new(timeline: Timeline<T>, opts: PlaybackOpts) -> Self {
        Self {
            timeline,
            opts,
            status: PlaybackStatus::Stopped,
            now: SimTime::ZERO,
            cursor: 0,
            active_waves: BTreeMap::new(),
            next_token: 0,
        }
    }

    pub fn timeline(&self) -> &Timeline<T> {
        &self.timeline
    }

    pub fn opts(&self) -> &PlaybackOpts {
        &self.opts
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 下一个尚未触发的时间轴下标
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn active_waves(&self) -> &BTreeMap<NodeId, Vec<Wave>> {
        &self.active_waves
    }

    pub fn is_active(&self, node: NodeId) -> bool {
        self.active_waves.contains_key(&node)
    }

    /// 所有条目都已触发且没有存活的波纹
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.timeline.len() && self.active_waves.is_empty()
    }

    pub fn play(&mut self) {
        if self.status != PlaybackStatus::Playing {
            debug!(now = ?self.now, cursor = self.cursor, "▶️  开始回放");
            self.status = PlaybackStatus::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            debug!(now = ?self.now, cursor = self.cursor, "⏸️  暂停回放");
            self.status = PlaybackStatus::Paused;
        }
    }

    /// 回到初始状态；时间轴保持不变。
    pub fn reset(&mut self) {
        self.status = PlaybackStatus::Stopped;
        self.now = SimTime::ZERO;
        self.cursor = 0;
        self.active_waves.clear();
        self.next_token = 0;
    }

    /// 推进 `delta_secs` 秒仿真时间，先触发到点条目，再清理过期波纹。
    ///
    /// 非播放状态下什么都不做。负数或 NaN 视为 0：只有 `reset` 能让时间倒退。
    pub fn tick(&mut self, delta_secs: f64) -> TickReport {
        if self.status != PlaybackStatus::Playing {
            return TickReport::default();
        }
        if delta_secs.is_nan() || delta_secs < 0.0 {
            warn!(delta_secs, "忽略非法的 tick 步长");
        }
        self.advance(SimTime::from_secs_f64(delta_secs))
    }

    /// 以整数纳秒推进，语义同 [`Self::tick`]
    pub fn tick_by(&mut self, delta: SimTime) -> TickReport {
        if self.status != PlaybackStatus::Playing {
            return TickReport::default();
        }
        self.advance(delta)
    }

    fn advance(&mut self, delta: SimTime) -> TickReport {
        self.now = self.now.saturating_add(delta);
        let now = self.now;

        let mut spawned = 0;
        while let Some(entry) = self.timeline.get(self.cursor) {
            if SimTime::from_secs_f64(entry.time()) > now {
                break;
            }
            if let Some(node) = entry.wave_node() {
                let token = self.next_token;
                self.next_token = self.next_token.wrapping_add(1);
                self.active_waves
                    .entry(node)
                    .or_default()
                    .push(Wave { token, start: now });
                spawned += 1;
                trace!(cursor = self.cursor, node = node.0, token, "激活波纹");
            }
            self.cursor += 1;
        }

        let duration = self.opts.wave_duration;
        let mut expired = 0;
        self.active_waves.retain(|_, waves| {
            let before = waves.len();
            waves.retain(|w| now.saturating_sub(w.start) < duration);
            expired += before - waves.len();
            !waves.is_empty()
        });

        TickReport { spawned, expired }
    }
}
