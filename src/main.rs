//! Swivel - gesture classification engine for model-viewer controls
//!
//! Turns touch, mouse, and keyboard input into rotate/scale/translate
//! gestures and applies them to a model transform. The binary replays
//! recorded input traces through the engine and triangulates voxel
//! meshes from images.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use swivel::config::{Screen, Settings};
use swivel::driver;
use swivel::trace::InputTrace;
use swivel::voxel::VoxelGrid;

#[derive(Parser, Debug)]
#[command(name = "swivel")]
#[command(about = "Gesture classification engine for model-viewer controls", long_about = None)]
struct Args {
    /// Enable verbose debug output
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded input trace through the engine
    Replay {
        /// Trace file (JSON); replays a built-in demo session when omitted
        trace: Option<PathBuf>,

        /// Settings file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Tick rate in frames per second
        #[arg(long, default_value_t = 60)]
        fps: u32,
    },

    /// Triangulate an image's dark pixels into a voxel mesh
    Voxelize {
        /// Source image (PNG)
        image: PathBuf,

        /// Output path; defaults to the image path with an .obj extension
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// World size of one voxel cell
        #[arg(long, default_value_t = 10.0)]
        cell_size: f32,

        /// Pixels at or below this luma count as solid
        #[arg(long, default_value_t = 0)]
        threshold: u8,
    },
}

fn main() -> Result<()> {
    // Log panics before crashing
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
        if let Ok(home) = std::env::var("HOME") {
            let crash_log = format!("{}/.local/state/swivel/crash.log", home);
            if let Ok(mut f) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log)
            {
                use std::io::Write;
                let _ = writeln!(f, "[{}] PANIC: {}", chrono::Local::now(), panic_info);
            }
        }
    }));

    // Log directory (~/.local/state/swivel or /tmp/swivel)
    let log_dir = std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|_| std::env::var("HOME").map(|h| PathBuf::from(h).join(".local/state")))
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
        .join("swivel");

    std::fs::create_dir_all(&log_dir).ok();

    let args = Args::parse();

    // File appender, rotates daily
    let file_appender = rolling::daily(&log_dir, "swivel.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Quiet by default, verbose with --debug
    let default_filter = if args.debug {
        "debug,swivel=debug"
    } else {
        "warn,swivel=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    match args.command {
        Command::Replay { trace, config, fps } => replay(trace, config, fps),
        Command::Voxelize {
            image,
            out,
            cell_size,
            threshold,
        } => voxelize(image, out, cell_size, threshold),
    }
}

fn replay(trace_path: Option<PathBuf>, config: Option<PathBuf>, fps: u32) -> Result<()> {
    let settings = match config {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };

    let trace = match trace_path {
        Some(path) => InputTrace::load(&path)?,
        None => {
            info!("No trace given, replaying the built-in demo session");
            InputTrace::demo(Screen::new(720, 1440))
        }
    };

    let summary = driver::run_replay(trace, settings, fps)?;
    println!("{}", summary);
    Ok(())
}

fn voxelize(
    image: PathBuf,
    out: Option<PathBuf>,
    cell_size: f32,
    threshold: u8,
) -> Result<()> {
    let grid = VoxelGrid::load(&image, cell_size, threshold)?;
    let mesh = grid.triangulate();

    let out = out.unwrap_or_else(|| image.with_extension("obj"));
    mesh.save_obj(&out)?;

    let (width, height) = grid.dimensions();
    println!(
        "voxelized {}x{} image into {} triangles -> {}",
        width,
        height,
        mesh.triangle_count(),
        out.display()
    );
    Ok(())
}
