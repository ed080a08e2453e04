#![deny(unsafe_code)]
//! CLI binary for the driftfield flow-field simulation.
//!
//! Subcommands:
//! - `render` — run the simulation N frames, write a PNG of the trails
//! - `list` — print available palettes and the parameter schema

mod error;

use clap::{Parser, Subcommand};
use driftfield_core::{Palette, SimConfig, Simulation};
use driftfield_snapshot::PixelCanvas;
use error::CliError;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "driftfield", about = "Flow-field particle trails CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation for N frames and write a PNG snapshot.
    Render {
        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: usize,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: usize,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 600)]
        frames: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Palette name (blue-pink, violet, cyan-teal, red-orange, grayscale).
        #[arg(short, long, default_value = "blue-pink")]
        palette: String,

        /// Particle count, clamped to [500, 10000].
        #[arg(long, default_value_t = 3000)]
        particles: usize,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Simulation parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available palettes and tunable parameters.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let palettes = Palette::list_names();
            let schema = Simulation::param_schema();
            if cli.json {
                let info = serde_json::json!({
                    "palettes": palettes,
                    "params": schema,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
                println!("Parameters:");
                if let Some(map) = schema.as_object() {
                    for (key, spec) in map {
                        let desc = spec["description"].as_str().unwrap_or("");
                        println!("  {key}: {desc}");
                    }
                }
            }
        }
        Command::Render {
            width,
            height,
            frames,
            seed,
            palette,
            particles,
            output,
            params,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let palette = Palette::from_name(&palette)?;

            let mut config = SimConfig::from_json(width as f64, height as f64, &params);
            config.palette = palette;
            config.particle_count = particles;
            let config = config.sanitized();

            let mut sim = Simulation::new(config, seed)?;
            let mut canvas = PixelCanvas::new(width, height)?;
            for _ in 0..frames {
                let frame = sim.step()?;
                canvas.apply_frame(&frame);
            }

            driftfield_snapshot::write_png(&canvas, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "frames": frames,
                    "seed": seed,
                    "palette": sim.palette().name(),
                    "particles": sim.config().particle_count,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {width}x{height}, {frames} frames, seed {seed} -> {}",
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
