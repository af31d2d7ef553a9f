//! 渲染层接口（只读视图）
//!
//! 设计目标：
//! - **只读**：渲染层只拿快照，不直接改引擎状态
//! - **可序列化**：快照、元信息都能直接写成 JSON 行
//! - **与绘制无关**：只给出画布坐标和缩放，不涉及具体绘制

mod playback_viz;
mod types;

pub use types::{AxisTick, CanvasLayout, PlaybackSnapshot, VizMeta, VizWave};
