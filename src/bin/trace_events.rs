//! 完整语法 trace 解析
//!
//! 把 trace 文件解析成按时间排序的事件 JSON，可按节点过滤

use aquavis_rs::net::NodeId;
use aquavis_rs::timeline::build_event_timeline;
use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "trace-events", about = "解析 Aqua-Sim ASCII trace，输出结构化事件 JSON")]
struct Args {
    /// trace 文件路径
    #[arg(long)]
    trace: PathBuf,

    /// 只保留该仿真器节点序号（/NodeList/<id>/）上的事件
    #[arg(long)]
    node_id: Option<u32>,

    /// 输出 JSON 文件；不填则写到 stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// 不打印日志
    #[arg(long)]
    quiet: bool,
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let raw = fs::read_to_string(&args.trace)?;
    let timeline = build_event_timeline(&raw)?;
    info!(events = timeline.len(), "trace 解析完成");

    let timeline = match args.node_id {
        Some(id) => {
            let filtered = timeline.for_node(NodeId(id));
            info!(node = id, events = filtered.len(), "按节点过滤");
            filtered
        }
        None => timeline,
    };

    let json = serde_json::to_string_pretty(&timeline)?;
    match &args.out {
        Some(path) => {
            fs::write(path, json)?;
            if !args.quiet {
                eprintln!("wrote {} events to {}", timeline.len(), path.display());
            }
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(if args.quiet {
            tracing_subscriber::EnvFilter::new("off")
        } else {
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        })
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
