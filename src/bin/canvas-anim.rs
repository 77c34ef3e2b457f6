use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "canvas-anim", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a script frame by frame and write per-frame element state as JSON.
    Simulate(SimulateArgs),
    /// Print the encoded task descriptors live at a given time.
    Descriptors(DescriptorsArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct DescriptorsArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Script time in seconds.
    #[arg(long)]
    at: f64,

    /// Frames per second used to step up to `--at`.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Descriptors(args) => cmd_descriptors(args),
    }
}

fn read_script_json(path: &Path) -> anyhow::Result<canvas_anim::Script> {
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    let r = BufReader::new(f);
    let script: canvas_anim::Script =
        serde_json::from_reader(r).with_context(|| "parse script JSON")?;
    script.validate()?;
    Ok(script)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let script = read_script_json(&args.in_path)?;
    let sim = canvas_anim::simulate(&script, args.fps, args.frames)?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(out).with_context(|| format!("create '{}'", out.display()))?;
            serde_json::to_writer_pretty(f, &sim)
                .with_context(|| format!("write simulation '{}'", out.display()))?;
            eprintln!(
                "wrote {} ({} frames, peak {}, rejected {})",
                out.display(),
                sim.frames.len(),
                sim.peak_concurrent_animations,
                sim.rejected
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &sim).with_context(|| "write simulation")?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn cmd_descriptors(args: DescriptorsArgs) -> anyhow::Result<()> {
    let script = read_script_json(&args.in_path)?;
    let mut sim = canvas_anim::Simulator::new(&script)?;
    let frames = sim.advance_to(args.at, args.fps)?;

    let mut stdout = std::io::stdout().lock();
    for (id, d) in sim.animator().descriptors() {
        writeln!(stdout, "{}\t{d}", id.0.0)?;
    }
    eprintln!(
        "{} live task(s) after {frames} frame(s)",
        sim.animator().pool_usage().tasks
    );
    Ok(())
}
