use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use controller::{load_settings, AnimationController};
use shared::domain::{AlgorithmId, RunPhase};
use sort_engine::Renderer;
use storage::SequenceStore;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tokio_stream::{wrappers::LinesStream, StreamExt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod orchestration;
mod render;

use commands::{ControlCommand, HELP};
use orchestration::{describe_event, dispatch_control_command, observe_run_end};
use render::{JsonRenderer, TextRenderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FrameFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "sortvis", about = "Animate comparison sorting algorithms step by step")]
struct Args {
    /// TOML settings file (defaults to ./sortvis.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, short)]
    algorithm: Option<AlgorithmId>,
    #[arg(long, short)]
    size: Option<usize>,
    /// Slider value 1-10; higher is faster
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    speed: Option<u8>,
    /// Sort these values instead of a random array
    #[arg(long, value_delimiter = ',')]
    values: Option<Vec<u32>>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = FrameFormat::Text)]
    format: FrameFormat,
    /// Disable ANSI colours in text frames
    #[arg(long)]
    plain: bool,
    /// Start immediately and exit when the run ends
    #[arg(long)]
    once: bool,
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(algorithm) = args.algorithm {
        settings.algorithm = algorithm;
    }
    if let Some(size) = args.size {
        settings.array_size = size;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    settings.validate()?;

    let renderer: Arc<dyn Renderer> = match args.format {
        FrameFormat::Text => Arc::new(TextRenderer::new(settings.value_high, !args.plain)),
        FrameFormat::Json => Arc::new(JsonRenderer),
    };
    let mut controller = match args.values {
        Some(values) => {
            AnimationController::with_store(settings, renderer, SequenceStore::from_values(values))?
        }
        None => AnimationController::new(settings, renderer)?,
    };
    if let Some(raw) = args.speed {
        controller.set_speed(raw)?;
    }
    info!(
        "sortvis ready algorithm={} size={} interval_ms={}",
        controller.algorithm(),
        controller.size(),
        controller.interval().as_millis()
    );

    if args.once {
        controller.start()?;
        return match controller.wait_for_run().await {
            RunPhase::Completed => Ok(()),
            phase => Err(anyhow!("run ended in the {phase} phase")),
        };
    }

    run_interactive(&mut controller, args.format).await
}

async fn run_interactive(controller: &mut AnimationController, format: FrameFormat) -> Result<()> {
    let mut events = controller.subscribe();
    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());
    eprintln!("{HELP}");

    loop {
        tokio::select! {
            line = lines.next() => {
                let Some(line) = line else { break };
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<ControlCommand>() {
                    Ok(ControlCommand::Quit) => break,
                    Ok(cmd) => dispatch_control_command(controller, cmd).await,
                    Err(err) => eprintln!("{err}"),
                }
            }
            event = events.recv() => match event {
                Ok(event) => {
                    match format {
                        FrameFormat::Text => eprintln!("{}", describe_event(&event)),
                        FrameFormat::Json => println!("{}", serde_json::to_string(&event)?),
                    }
                    observe_run_end(controller, &event);
                }
                Err(RecvError::Lagged(skipped)) => warn!("event stream lagged skipped={skipped}"),
                Err(RecvError::Closed) => break,
            },
        }
    }

    if controller.phase().is_active() {
        controller.reset().await?;
    }
    Ok(())
}
