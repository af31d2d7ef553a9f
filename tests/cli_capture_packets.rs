use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "aquavis-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn capture_packets_prints_one_row_per_packet() {
    let dir = unique_temp_dir("capture");
    let path = dir.join("capture.json");
    fs::write(
        &path,
        r#"[
  {"_source": {"layers": {"frame.time_relative": ["0.5"], "ip.src": ["10.1.1.1"], "ip.dst": ["10.1.1.2"], "frame.len": ["1054"], "frame.protocols": ["ppp:ip:udp"]}}},
  {"_source": {"layers": {"frame.time_relative": ["0.75"], "frame.len": ["60"], "frame.protocols": ["ppp:lcp"]}}}
]"#,
    )
    .expect("write capture json");

    let output = Command::new(env!("CARGO_BIN_EXE_capture_packets"))
        .args(["--json", path.to_str().unwrap(), "--quiet"])
        .output()
        .expect("run capture_packets");
    assert!(
        output.status.success(),
        "capture_packets failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<&str> = stdout.lines().collect();
    assert_eq!(rows, vec![
        "1 0.500000 10.1.1.1 10.1.1.2 ppp:ip:udp 1054",
        "2 0.750000 - - ppp:lcp 60",
    ]);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn capture_packets_rejects_invalid_json() {
    let dir = unique_temp_dir("capture-bad");
    let path = dir.join("capture.json");
    fs::write(&path, "{ not json").expect("write capture json");

    let output = Command::new(env!("CARGO_BIN_EXE_capture_packets"))
        .args(["--json", path.to_str().unwrap(), "--quiet"])
        .output()
        .expect("run capture_packets");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid capture json"));

    let _ = fs::remove_dir_all(&dir);
}
