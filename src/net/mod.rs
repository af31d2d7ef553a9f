//! 节点关联模块
//!
//! 此模块包含节点标识符、节点位置记录，以及把 trace 事件关联到节点的目录。

// 子模块声明
mod directory;
mod id;
mod node;

// 重新导出公共接口
pub use directory::{node_index_from_path, NodeDirectory, NodeKey};
pub use id::{pad_id_token, NodeId, ID_WIDTH};
pub use node::{NodeRecord, NodeRole, PlacedNode};
