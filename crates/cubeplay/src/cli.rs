use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use cubeplay_core::cgmath::Vector3;
use cubeplay_prefs::Preferences;
use cubeplay_view::{CubeSimulation, KeyBindings};
use eyre::{Context, Result, eyre};
use itertools::Itertools;

/// Upper bound on the number of frames simulated while waiting for one
/// action to settle.
const MAX_SETTLE_FRAMES: u32 = 100_000;

/// Rubik's cube command-line interface
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Preferences file to load on top of the defaults.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,
    /// Print the cube using letters only.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Shuffle a solved cube and print the result.
    Shuffle {
        /// Number of random twists. Defaults to the value in the preferences.
        #[arg(short, long)]
        moves: Option<u32>,
        /// Seed for reproducible shuffles.
        #[arg(short, long)]
        seed: Option<String>,
    },
    /// Play a sequence of key presses and print the result.
    ///
    /// Keys are separated by whitespace. Lines starting with `#` are ignored.
    Play {
        /// Script of key names, use '-' for stdin.
        #[arg(value_parser, default_value = "-")]
        script: clio::Input,
        /// Direction from the viewer to the center of the cube, as `x,y,z`.
        #[arg(long, value_parser = parse_vector)]
        camera: Option<Vector3<f32>>,
        /// Frames per second used to simulate animations.
        #[arg(long, default_value_t = 60)]
        frame_rate: u32,
    },
    /// Print the effective preferences as YAML.
    Prefs,
    /// Print the default key bindings.
    Keys,
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let Args {
        prefs,
        no_color,
        subcommand,
    } = args;
    let color = !no_color;

    match subcommand {
        Subcommand::Shuffle { moves, seed } => {
            let prefs = Preferences::load(prefs.as_deref())?;
            let move_count = moves.unwrap_or(prefs.shuffle.move_count);
            let mut sim = CubeSimulation::new(prefs);
            sim.shuffle(move_count, seed, |_| ());
            sim.skip_animations();

            println!("seed: {}", sim.shuffler().seed());
            println!("scramble: {}", sim.scramble().iter().join(" "));
            println!("{}", crate::net::render(sim.model(), color));
            Ok(())
        }

        Subcommand::Play {
            mut script,
            camera,
            frame_rate,
        } => {
            if frame_rate == 0 {
                return Err(eyre!("frame rate must be positive"));
            }
            let frame = Duration::from_secs_f64(1.0 / frame_rate as f64);

            let mut buffer = String::new();
            script
                .read_to_string(&mut buffer)
                .context("error reading script")?;

            let prefs = Preferences::load(prefs.as_deref())?;
            let mut sim = CubeSimulation::new(prefs);
            sim.set_camera_direction(camera);
            let keys = KeyBindings::default();

            for token in buffer
                .lines()
                .filter(|line| !line.trim_start().starts_with('#'))
                .flat_map(str::split_whitespace)
            {
                let action = keys
                    .action_for_key(token)
                    .ok_or_else(|| eyre!("no action bound to key {token:?}"))?;
                settle(&mut sim, frame);
                if !sim.do_action(action) {
                    log::info!("{token}: {action} had no effect");
                }
            }
            settle(&mut sim, frame);

            println!("{}", crate::net::render(sim.model(), color));
            println!("moves: {}", sim.model().move_history().iter().join(" "));
            println!("twists: {}", sim.twist_count());
            if sim.handle_newly_solved() {
                println!("solved!");
            } else {
                println!("solved: {}", sim.is_solved());
            }
            Ok(())
        }

        Subcommand::Prefs => {
            let prefs = Preferences::load(prefs.as_deref())?;
            print!("{}", prefs.to_yaml()?);
            Ok(())
        }

        Subcommand::Keys => {
            for (key, action) in KeyBindings::default().iter() {
                println!("{key:<12} {action}");
            }
            Ok(())
        }
    }
}

/// Steps the simulation one frame at a time until it is idle.
fn settle(sim: &mut CubeSimulation, frame: Duration) {
    let mut frames = 0;
    while sim.is_busy() && frames < MAX_SETTLE_FRAMES {
        sim.step(frame);
        frames += 1;
    }
    if sim.is_busy() {
        log::warn!("animation did not finish after {frames} frames; skipping");
        sim.skip_animations();
    }
}

fn parse_vector(s: &str) -> Result<Vector3<f32>> {
    let components: Vec<f32> = s
        .split(',')
        .map(|c| c.trim().parse::<f32>())
        .try_collect()
        .with_context(|| format!("invalid vector {s:?}"))?;
    match components.as_slice() {
        &[x, y, z] => Ok(Vector3::new(x, y, z)),
        _ => Err(eyre!("expected three components, got {}", components.len())),
    }
}
