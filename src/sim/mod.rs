//! 回放核心模块
//!
//! 此模块包含仿真时间与回放引擎：由外部时钟驱动，按时间轴激活/清理节点上的波纹。

// 子模块声明
mod playback;
mod time;

// 重新导出公共接口
pub use playback::{PlaybackEngine, PlaybackOpts, PlaybackStatus, TickReport, Wave};
pub use time::SimTime;
