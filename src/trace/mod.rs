//! trace 解析模块
//!
//! 把仿真器输出的 ASCII trace 文本切分成记录，并解析出各层头部字段。

// 子模块声明
mod event;
mod header;
mod kv;
mod range_log;
mod segment;

// 重新导出公共接口
pub use event::{
    parse_events, parse_record, Event, EventKind, MAC_HEADER, NETWORK_HEADER, PACKET_STAMP,
    PAYLOAD, ROUTING_HEADER,
};
pub use header::{MacHeader, NetworkHeader, PacketStamp, RoutingHeader};
pub use kv::{parse_key_values, FieldMap};
pub use range_log::{scan_transmit_marks, TraceLogEntry, TransmitMark};
pub use segment::{
    segment_records, transmit_blocks, RawRecord, RecordKind, Records, TransmitBlock,
    TransmitBlocks, SIZE_MARKER,
};
