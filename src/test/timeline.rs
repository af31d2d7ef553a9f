use super::SAMPLE_TRACE;
use crate::error::TraceError;
use crate::net::{NodeDirectory, NodeId};
use crate::timeline::{build_event_timeline, build_range_timeline, Timeline};
use crate::trace::TraceLogEntry;

fn entry(time: f64, node: u32) -> TraceLogEntry {
    TraceLogEntry {
        time,
        node_id: NodeId(node),
    }
}

#[test]
fn range_timeline_keeps_transmits_and_first_range() {
    let buf = "t 1.5 /NodeList/0/DeviceList/0/Phy/Tx TxRange(250) (size=40)\nr 1.6 /NodeList/1/DeviceList/0/Phy/Rx (size=40)\n";
    let rt = build_range_timeline(buf).expect("range timeline");
    assert_eq!(rt.range, 250);
    assert_eq!(rt.log.entries(), &[entry(1.5, 0)]);
}

#[test]
fn range_is_taken_from_first_record_in_original_order() {
    let buf = "\
t 2.0 /NodeList/1/Tx TxRange(300) (size=40)
t 1.0 /NodeList/2/Tx TxRange(150) (size=40)
t 1.0 /NodeList/0/Tx TxRange(150) (size=40)
";
    let rt = build_range_timeline(buf).expect("range timeline");
    assert_eq!(rt.range, 300);
    // 稳定排序：同一时刻保持原始顺序
    assert_eq!(
        rt.log.entries(),
        &[entry(1.0, 2), entry(1.0, 0), entry(2.0, 1)]
    );
}

#[test]
fn range_timeline_works_on_full_grammar_trace() {
    let rt = build_range_timeline(SAMPLE_TRACE).expect("range timeline");
    assert_eq!(rt.range, 250);
    assert_eq!(rt.log.entries(), &[entry(0.5, 2), entry(1.5, 0)]);
}

#[test]
fn range_timeline_without_transmits_is_empty_input() {
    let err = build_range_timeline("r 1.0 /NodeList/0/Rx (size=40)\n").expect_err("no t blocks");
    assert!(matches!(err, TraceError::EmptyInput { what: "transmit" }));
    assert!(matches!(
        build_range_timeline("   "),
        Err(TraceError::EmptyInput { .. })
    ));
}

#[test]
fn range_timeline_rejects_transmit_without_range() {
    let buf = "t 1.0 /NodeList/0/Tx TxRange(10) (size=40)\nt 2.0 /NodeList/1/Tx (size=40)\n";
    let err = build_range_timeline(buf).expect_err("missing TxRange");
    assert_eq!(err.ordinal(), Some(2));
}

#[test]
fn timeline_sort_is_idempotent() {
    let tl = Timeline::new(vec![entry(3.0, 1), entry(1.0, 2), entry(1.0, 3), entry(0.0, 4)]);
    assert!(tl.is_sorted());
    assert_eq!(tl.first_time(), Some(0.0));
    assert_eq!(tl.last_time(), Some(3.0));

    let again = Timeline::new(tl.entries().to_vec());
    assert_eq!(again, tl);
}

#[test]
fn event_timeline_sorts_and_filters_without_mutating() {
    let tl = build_event_timeline(SAMPLE_TRACE).expect("event timeline");
    assert_eq!(tl.len(), 3);
    let times = tl.iter().map(|e| e.timestamp).collect::<Vec<_>>();
    assert_eq!(times, vec![0.5, 1.5, 1.7]);

    let only_node0 = tl.for_node(NodeId(0));
    assert_eq!(only_node0.len(), 1);
    assert_eq!(only_node0.entries()[0].timestamp, 1.5);
    assert_eq!(tl.len(), 3, "source timeline untouched");

    assert!(tl.for_node(NodeId(9)).is_empty());
}

#[test]
fn event_timeline_on_empty_buffer_is_empty_input() {
    assert!(matches!(
        build_event_timeline("\n\n"),
        Err(TraceError::EmptyInput { what: "trace" })
    ));
}

#[test]
fn unresolved_nodes_reports_entries_missing_from_directory() {
    let dir = NodeDirectory::parse("Node 0: (0,0,0)\nNode 1: (1,1,1)").expect("nodes");
    let tl = Timeline::new(vec![entry(1.0, 0), entry(2.0, 5), entry(3.0, 1)]);
    let missing = tl.unresolved_nodes(&dir).into_iter().collect::<Vec<_>>();
    assert_eq!(missing, vec![NodeId(5)]);
}

#[test]
fn range_timeline_reads_exponent_timestamps() {
    let buf = "t 1.0 /NodeList/0/Tx TxRange(80) (size=40)\nt 2.5e-05 /NodeList/3/Tx TxRange(80) (size=40)\n";
    let rt = build_range_timeline(buf).expect("range timeline");
    assert_eq!(rt.log.entries(), &[entry(2.5e-5, 3), entry(1.0, 0)]);
}
