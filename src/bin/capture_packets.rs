//! 抓包导出查看
//!
//! 读取抓包分析器导出的 JSON，按行打印包列表

use aquavis_rs::capture::parse_capture_json;
use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "capture-packets", about = "打印抓包分析器导出的包列表")]
struct Args {
    /// `-T json` 导出文件
    #[arg(long)]
    json: PathBuf,

    /// 不打印日志
    #[arg(long)]
    quiet: bool,
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let raw = fs::read_to_string(&args.json)?;
    let packets = parse_capture_json(&raw)?;
    info!(packets = packets.len(), "抓包导出读取完成");

    // 序号 时间 源 目的 协议栈 长度
    for (i, pkt) in packets.iter().enumerate() {
        println!(
            "{} {:.6} {} {} {} {}",
            i + 1,
            pkt.time,
            pkt.ip_src.as_deref().unwrap_or("-"),
            pkt.ip_dst.as_deref().unwrap_or("-"),
            pkt.protocol_stack().join(":"),
            pkt.len
        );
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
