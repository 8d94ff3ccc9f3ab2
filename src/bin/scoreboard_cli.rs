//! Terminal viewer for the improv scoreboard overlay.
//!
//! Examples:
//!   scoreboard-cli render snapshot.json
//!   scoreboard-cli render snapshot.json --html
//!   scoreboard-cli replay session.ndjson
//!   scoreboard-cli watch --addr 127.0.0.1:9877
//!
//! `replay` reads one payload per line and feeds it on the scoreboard topic.
//! `watch` reads newline-delimited feed frames (`{"topic":..,"payload":"<hex>"}`)
//! from a TCP peer and re-prints the panel whenever the snapshot changes.
//!
//! Configuration comes from `--config <path>`, or from
//! `<config dir>/improv_scoreboard/config.json` when that file exists.

use std::path::{Path, PathBuf};
use std::process;

use improv_scoreboard::feed;
use improv_scoreboard::prelude::*;
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tracing::{info, warn};

const DEFAULT_ADDR: &str = "127.0.0.1:9877";

#[derive(Debug)]
enum Command {
    Render { path: PathBuf },
    Replay { path: PathBuf },
    Watch { addr: String },
    Help,
}

#[derive(Debug)]
struct Options {
    command: Command,
    html: bool,
    config: Option<PathBuf>,
}

const USAGE: &str = "usage:\n  scoreboard-cli [--config <path>] render <snapshot.json> [--html]\n  scoreboard-cli [--config <path>] replay <payloads.ndjson> [--html]\n  scoreboard-cli [--config <path>] watch [--addr host:port] [--html]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReplaySummary {
    sent: u64,
    applied: u64,
    rejected: u64,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut html = false;
    let mut config = None;
    let mut addr = None;
    let mut positional = Vec::new();
    let mut help = false;

    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--html" => html = true,
            "--config" => {
                let v = it.next().ok_or("--config needs a path")?;
                config = Some(PathBuf::from(v));
            }
            "--addr" => {
                let v = it.next().ok_or("--addr needs host:port")?;
                addr = Some(v.clone());
            }
            "-h" | "--help" => help = true,
            other if other.starts_with("--") => return Err(format!("unknown option {other}")),
            other => positional.push(other.to_string()),
        }
    }

    let command = match positional.as_slice() {
        _ if help => Command::Help,
        [cmd, path] if cmd == "render" => Command::Render {
            path: PathBuf::from(path),
        },
        [cmd, path] if cmd == "replay" => Command::Replay {
            path: PathBuf::from(path),
        },
        [cmd] if cmd == "watch" => Command::Watch {
            addr: addr.unwrap_or_else(|| DEFAULT_ADDR.to_string()),
        },
        [] => return Err("missing command".to_string()),
        _ => return Err(format!("unrecognised arguments: {}", positional.join(" "))),
    };

    Ok(Options {
        command,
        html,
        config,
    })
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("improv_scoreboard").join("config.json"))
}

fn load_config(explicit: Option<&Path>) -> Result<ScoreboardConfig, Box<dyn std::error::Error>> {
    match explicit {
        Some(path) => Ok(ScoreboardConfig::load(path)?),
        None => match default_config_path() {
            Some(path) => Ok(ScoreboardConfig::load_or_default(&path)?),
            None => Ok(ScoreboardConfig::default()),
        },
    }
}

fn print_panel(panel: &PanelView, cfg: &ScoreboardConfig, html: bool) {
    if html {
        println!("{}", render_html(panel));
    } else {
        print!("{}", render_text(panel, cfg.text_width, cfg.clamp_lines));
    }
}

/// Mount a widget whose re-renders go to stdout.
fn mount_printer(bus: &LocalBus, cfg: &ScoreboardConfig, html: bool) -> Scoreboard {
    let print_cfg = cfg.clone();
    Scoreboard::mount(bus, cfg.clone(), move |panel| match panel {
        Some(panel) => print_panel(&panel, &print_cfg, html),
        None => info!("no rounds yet; panel hidden"),
    })
}

fn run_render(path: &Path, cfg: &ScoreboardConfig, html: bool) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(path)?;
    let snapshot = decode_payload(&bytes)?;
    match PanelView::from_snapshot(&snapshot, &cfg.title) {
        Some(panel) => print_panel(&panel, cfg, html),
        None => info!("snapshot has no rounds; nothing to render"),
    }
    Ok(())
}

fn run_replay(
    path: &Path,
    cfg: &ScoreboardConfig,
    html: bool,
) -> Result<ReplaySummary, Box<dyn std::error::Error>> {
    let bytes = std::fs::read(path)?;
    let bus = LocalBus::new();
    let board = mount_printer(&bus, cfg, html);

    let mut sent = 0u64;
    for line in bytes.split(|&b| b == b'\n') {
        let line = line.trim_ascii();
        if line.is_empty() {
            continue;
        }
        bus.publish(&DataMessage::new(cfg.topic.as_str(), line.to_vec()));
        sent += 1;
    }

    let (applied, rejected) = board.with_model(|m| (m.applied_count(), m.rejected_count()));
    board.unmount();
    Ok(ReplaySummary {
        sent,
        applied,
        rejected,
    })
}

async fn run_watch(addr: &str, cfg: &ScoreboardConfig, html: bool) -> Result<(), Box<dyn std::error::Error>> {
    let stream = TcpStream::connect(addr).await?;
    info!("Connected to scoreboard feed at {}", addr);

    let bus = LocalBus::new();
    let board = mount_printer(&bus, cfg, html);
    let stats = feed::pump(BufReader::new(stream), &bus).await?;

    info!(
        delivered = stats.delivered,
        skipped = stats.skipped,
        "feed closed"
    );
    if stats.skipped > 0 {
        warn!("{} feed lines were skipped", stats.skipped);
    }
    board.unmount();
    Ok(())
}

fn run(opts: Options) -> Result<(), Box<dyn std::error::Error>> {
    if let Command::Help = opts.command {
        println!("{USAGE}");
        return Ok(());
    }
    let cfg = load_config(opts.config.as_deref())?;
    match opts.command {
        Command::Render { path } => run_render(&path, &cfg, opts.html),
        Command::Replay { path } => {
            let s = run_replay(&path, &cfg, opts.html)?;
            println!(
                "replayed {} messages: {} applied, {} rejected",
                s.sent, s.applied, s.rejected
            );
            Ok(())
        }
        Command::Help => Ok(()),
        Command::Watch { addr } => {
            // Current-thread runtime: the bus and widget are !Send.
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_io()
                .build()?;
            rt.block_on(run_watch(&addr, &cfg, opts.html))
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = match parse_args(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}\n{USAGE}");
            process::exit(1);
        }
    };

    if let Err(e) = run(opts) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
