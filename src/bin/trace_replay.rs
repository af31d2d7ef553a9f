//! 发送时间轴回放
//!
//! 用固定的仿真步长驱动回放引擎，每个 tick 输出一行 JSON 快照（JSON Lines）。
//! 第一行是场景元信息（广播半径、节点列表、条目数）。

use aquavis_rs::net::NodeDirectory;
use aquavis_rs::sim::{PlaybackEngine, PlaybackOpts, SimTime};
use aquavis_rs::timeline::build_range_timeline;
use aquavis_rs::viz::VizMeta;
use clap::Parser;
use std::error::Error;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "trace-replay", about = "回放 trace 中的发送事件，逐 tick 输出节点波纹快照")]
struct Args {
    /// trace 文件路径（按 `(size=40)` 分块）
    #[arg(long)]
    trace: PathBuf,

    /// 节点列表文件（Node/Sender/Sink 坐标）
    #[arg(long)]
    nodes: Option<PathBuf>,

    /// 每个 tick 推进的仿真时间（毫秒）
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,

    /// 波纹持续时间（毫秒）
    #[arg(long, default_value_t = 1000)]
    wave_ms: u64,

    /// 回放到多少秒为止；不填则放到最后一个波纹消失
    #[arg(long)]
    until_secs: Option<f64>,

    /// 画布宽度（像素），用于元信息里的坐标变换
    #[arg(long, default_value_t = 800.0)]
    canvas_width: f64,

    /// 画布高度（像素）
    #[arg(long, default_value_t = 600.0)]
    canvas_height: f64,

    /// 输出 JSON Lines 文件；不填则写到 stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// 不打印日志
    #[arg(long)]
    quiet: bool,
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let raw = fs::read_to_string(&args.trace)?;
    let rt = build_range_timeline(&raw)?;
    info!(range = rt.range, entries = rt.log.len(), "发送时间轴就绪");

    let dir = match &args.nodes {
        Some(path) => NodeDirectory::parse(&fs::read_to_string(path)?)?,
        None => NodeDirectory::default(),
    };
    if !dir.is_empty() {
        let missing = rt.log.unresolved_nodes(&dir);
        if !missing.is_empty() {
            warn!(?missing, "时间轴中有节点不在节点列表里");
        }
    }

    let mut out: Box<dyn Write> = match &args.out {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let meta = VizMeta::new(
        rt.range,
        dir.placed_nodes(),
        rt.log.len(),
        args.canvas_width,
        args.canvas_height,
    );
    serde_json::to_writer(&mut out, &meta)?;
    writeln!(out)?;

    let opts = PlaybackOpts {
        wave_duration: SimTime::from_millis(args.wave_ms),
    };
    let tick = SimTime::from_millis(args.tick_ms);
    let until = args.until_secs.map(SimTime::from_secs_f64);

    let mut engine = PlaybackEngine::new(rt.log, opts);
    engine.play();
    let mut ticks = 0_u64;
    while !engine.is_finished() && until.is_none_or(|u| engine.now() < u) {
        engine.tick_by(tick);
        ticks += 1;
        serde_json::to_writer(&mut out, &engine.snapshot())?;
        writeln!(out)?;
    }
    out.flush()?;

    info!(ticks, final_time = ?engine.now(), "✅ 回放完成");
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
