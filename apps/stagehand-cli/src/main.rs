use anyhow::Context;
use clap::{Parser, Subcommand};
use stagehand_input::{IdleInput, InputSnapshot, InputSource, ScriptedInput};
use stagehand_render::TextFrame;
use stagehand_scene::{Scene, SceneConfig, SceneLoop, SimulatedClock};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stagehand-cli", about = "Headless runner for stagehand scenes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the scene configuration as YAML
    Config {
        /// Scene config to load instead of the defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Run the scene loop with a simulated clock and a text frame target
    Run {
        /// Scene config (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Input script (YAML); without one the scene runs idle
        #[arg(long)]
        script: Option<PathBuf>,
        /// Stop after this many frames
        #[arg(short, long)]
        frames: Option<u64>,
        /// Simulated seconds per frame
        #[arg(long, default_value = "0.016")]
        step: f64,
        /// Print the loop summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SceneConfig> {
    match path {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading scene config {}", path.display())),
        None => Ok(SceneConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("stagehand-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("input: {}", stagehand_input::crate_info());
            println!("render: {}", stagehand_render::crate_info());
            println!("locomotion: {}", stagehand_locomotion::crate_info());
            println!("scene: {}", stagehand_scene::crate_info());
        }
        Commands::Config { config } => {
            let config = load_config(config.as_ref())?;
            print!("{}", config.to_yaml()?);
        }
        Commands::Run {
            config,
            script,
            frames,
            step,
            json,
        } => {
            let config = load_config(config.as_ref())?;
            let mut source: Box<dyn InputSource> = match &script {
                Some(path) => Box::new(
                    ScriptedInput::load(path)
                        .with_context(|| format!("loading input script {}", path.display()))?,
                ),
                None => Box::new(IdleInput),
            };

            let frame_limit = frames.or(config.frame_limit);
            if script.is_none() && frame_limit.is_none() {
                anyhow::bail!("an idle run needs --frames or frame_limit in the config");
            }

            let mut input = InputSnapshot::new();
            let mut scene = Scene::from_config(&config, &input);
            let mut target = TextFrame::new();
            let mut scene_loop =
                SceneLoop::new(SimulatedClock::new(step), config.locomotion.bindings.quit)
                    .with_frame_limit(frame_limit);

            let summary = scene_loop.run(&mut scene, &mut input, &mut target, source.as_mut());

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", target.render());
                let [x, y, z] = summary.position;
                println!(
                    "Stopped after {} frames ({:.3}s, {:?})",
                    summary.frames, summary.elapsed, summary.reason
                );
                println!(
                    "Player: pos=({x:.3}, {y:.3}, {z:.3}) v={:.3} animation={}",
                    summary.vertical_velocity, summary.animation
                );
            }
        }
    }

    Ok(())
}
