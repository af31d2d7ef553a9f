use crate::error::TraceError;
use crate::net::{node_index_from_path, pad_id_token, NodeDirectory, NodeId, NodeKey, NodeRole};

#[test]
fn node_directory_partitions_by_role() {
    let dir = NodeDirectory::parse("Node 0: (10,20,0)\nSink 1: (50,50,0)\nSender 2: (0,0,0)")
        .expect("parse node list");

    assert_eq!(dir.normal().len(), 1);
    assert_eq!(dir.sinks().len(), 1);
    assert_eq!(dir.senders().len(), 1);
    assert_eq!(dir.len(), 3);

    let n0 = &dir.normal()[0];
    assert_eq!(n0.id, NodeId(0));
    assert_eq!((n0.x, n0.y, n0.z), (10.0, 20.0, 0.0));
    assert_eq!(n0.role, NodeRole::Normal);
    assert_eq!(dir.sinks()[0].id, NodeId(1));
    assert_eq!(dir.sinks()[0].position(), (50.0, 50.0, 0.0));
    assert_eq!(dir.senders()[0].id, NodeId(2));
}

#[test]
fn node_directory_skips_blank_lines_and_accepts_loose_numbers() {
    let buf = "\n  Node 0: ( -1.5 , 2e1, .5 )  \n\nNode 1:(3,4,5)\r\nSender 0: (0, 0, 0)\n\n";
    let dir = NodeDirectory::parse(buf).expect("parse");
    // 非空行数 == 三组之和
    assert_eq!(dir.len(), 3);
    assert_eq!(dir.normal()[0].position(), (-1.5, 20.0, 0.5));
    assert_eq!(dir.normal()[1].position(), (3.0, 4.0, 5.0));
    // 不同角色允许 id 重叠
    assert_eq!(dir.senders()[0].id, NodeId(0));
}

#[test]
fn node_directory_rejects_missing_coordinate_all_or_nothing() {
    let err = NodeDirectory::parse("Node 0: (1, 2, 3)\nNode 1: (1, 2)\nSink 2: (0, 0, 0)")
        .expect_err("missing coordinate must fail");
    match err {
        TraceError::MalformedRecord { ordinal, .. } => assert_eq!(ordinal, 2),
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn node_directory_rejects_duplicate_id_within_role() {
    let err = NodeDirectory::parse("Node 1: (1, 2, 3)\nNode 1: (4, 5, 6)").expect_err("dup");
    assert_eq!(err.ordinal(), Some(2));
}

#[test]
fn resolve_compares_padded_ids_within_role() {
    let dir = NodeDirectory::parse("Node 3: (1,1,1)\nSink 3: (9,9,9)\nSender 7: (0,0,0)")
        .expect("parse");

    let normal = dir
        .resolve(NodeKey::Id(NodeRole::Normal, NodeId(3)))
        .expect("normal 3");
    assert_eq!(normal.x, 1.0);
    let sink = dir
        .resolve(NodeKey::Token(NodeRole::Sink, "0003"))
        .expect("sink 0003");
    assert_eq!(sink.x, 9.0);
    let sender = dir
        .resolve(NodeKey::Token(NodeRole::Sender, "00:07"))
        .expect("sender 00:07");
    assert_eq!(sender.role, NodeRole::Sender);

    assert!(dir.resolve(NodeKey::Id(NodeRole::Sender, NodeId(3))).is_none());
    assert!(dir.resolve(NodeKey::Token(NodeRole::Normal, "none")).is_none());
}

#[test]
fn resolve_device_path_follows_simulator_install_order() {
    // 普通节点 0..n，随后发送端，最后汇聚节点
    let dir = NodeDirectory::parse("Node 0: (0,0,0)\nNode 1: (1,0,0)\nSink 0: (5,5,5)\nSender 0: (9,9,9)")
        .expect("parse");

    let at = |path: &str| dir.resolve(NodeKey::DevicePath(path)).map(|n| n.role);
    assert_eq!(at("/NodeList/1/DeviceList/0/Tx"), Some(NodeRole::Normal));
    assert_eq!(at("/NodeList/2/DeviceList/0/Tx"), Some(NodeRole::Sender));
    assert_eq!(at("/NodeList/3/DeviceList/0/Rx"), Some(NodeRole::Sink));
    assert_eq!(at("/NodeList/4/DeviceList/0/Rx"), None);
    assert_eq!(at("/DeviceList/0"), None);

    let placed = dir.placed_nodes();
    assert_eq!(placed.len(), 4);
    assert_eq!(placed[2].index, NodeId(2));
    assert_eq!(placed[2].record.role, NodeRole::Sender);
    assert_eq!(placed[3].record.role, NodeRole::Sink);
}

#[test]
fn only_first_sender_and_sink_get_simulator_indices() {
    let dir = NodeDirectory::parse(
        "Node 0: (0,0,0)\nNode 1: (1,0,0)\nSender 0: (2,0,0)\nSender 1: (3,0,0)\nSink 0: (4,0,0)\nSink 1: (5,0,0)",
    )
    .expect("parse");
    assert_eq!(dir.senders().len(), 2);

    let at = |i: u32| dir.by_index(NodeId(i)).map(|n| (n.role, n.id));
    assert_eq!(at(2), Some((NodeRole::Sender, NodeId(0))));
    assert_eq!(at(3), Some((NodeRole::Sink, NodeId(0))));
    assert_eq!(at(4), None);

    let placed = dir.placed_nodes();
    let indices = placed.iter().map(|p| p.index.0).collect::<Vec<_>>();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert_eq!(placed[3].record.role, NodeRole::Sink);
}

#[test]
fn sink_keeps_its_index_without_a_sender() {
    let dir = NodeDirectory::parse("Node 0: (0,0,0)\nSink 0: (4,0,0)").expect("parse");
    assert!(dir.by_index(NodeId(1)).is_none());
    assert_eq!(dir.by_index(NodeId(2)).map(|n| n.role), Some(NodeRole::Sink));

    let placed = dir.placed_nodes();
    assert_eq!(placed.len(), 2);
    assert_eq!(placed[1].index, NodeId(2));
}

#[test]
fn node_index_and_padding_helpers() {
    assert_eq!(node_index_from_path("/NodeList/12/DeviceList/0"), Some(NodeId(12)));
    assert_eq!(node_index_from_path("/NodeList/12"), Some(NodeId(12)));
    assert_eq!(node_index_from_path("/NodeList/x/"), None);

    assert_eq!(NodeId(3).padded(), "0003");
    assert_eq!(pad_id_token("3").as_deref(), Some("0003"));
    assert_eq!(pad_id_token("00:03").as_deref(), Some("0003"));
    assert_eq!(pad_id_token("0").as_deref(), Some("0000"));
    assert_eq!(pad_id_token("n/a"), None);
}
