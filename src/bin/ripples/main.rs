// ripples - Render a ripple scenario to PNG frames
//
// Pipeline:
//   1. Load scenario TOML (or defaults), apply command-line overrides
//   2. Per frame: apply scheduled clicks, step
//   3. Every Nth frame: render into a framebuffer, write PNG
//
// Usage: cargo run --bin ripples -- [scenario.toml] [--out DIR] [--width N]
//        [--height N] [--frames N] [--every N]
//
// Then e.g. ffmpeg -framerate 30 -pattern_type glob -i 'frames/ripple_*.png' out.mp4

mod export;
mod scenario;

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ripple_engine::{Framebuffer, Simulation};
use scenario::Scenario;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut scenario_path: Option<PathBuf> = None;
    let mut out_dir = PathBuf::from("frames");
    let mut width = None;
    let mut height = None;
    let mut frames = None;
    let mut every = None;

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--out" => { out_dir = value.map(PathBuf::from).unwrap_or(out_dir); i += 2; }
            "--width" => { width = value.and_then(|s| s.parse().ok()); i += 2; }
            "--height" => { height = value.and_then(|s| s.parse().ok()); i += 2; }
            "--frames" => { frames = value.and_then(|s| s.parse().ok()); i += 2; }
            "--every" => { every = value.and_then(|s| s.parse().ok()); i += 2; }
            "-h" | "--help" => {
                println!("Usage: {} [scenario.toml] [--out DIR] [--width N] [--height N] [--frames N] [--every N]", args[0]);
                return Ok(());
            }
            flag if flag.starts_with("--") => { eprintln!("Ignoring unknown flag {flag}"); i += 1; }
            path => { scenario_path = Some(PathBuf::from(path)); i += 1; }
        }
    }

    let mut scenario = match &scenario_path {
        Some(path) => Scenario::from_file(path)?,
        None => Scenario::default(),
    };
    scenario.width = width.unwrap_or(scenario.width);
    scenario.height = height.unwrap_or(scenario.height);
    scenario.frames = frames.unwrap_or(scenario.frames);
    scenario.every = every.unwrap_or(scenario.every);
    scenario.validate()?;

    println!(
        "Rendering {} frames at {}x{} (every {} exported) to {}",
        scenario.frames,
        scenario.width,
        scenario.height,
        scenario.every,
        out_dir.display()
    );

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut sim = Simulation::new(scenario.wave.clone(), scenario.width, scenario.height)?;
    log::debug!("wave config: {:?}", sim.config());
    let mut fb = Framebuffer::new(scenario.width, scenario.height);
    let mut written = 0;

    for frame in 0..scenario.frames {
        for click in scenario.clicks_at(frame) {
            sim.on_click(click.x, click.y);
        }
        sim.step();

        if frame % scenario.every == 0 {
            let drawn = sim.render(&mut fb);
            export::write_png(&fb, &out_dir.join(export::frame_name(frame)))?;
            log::debug!("frame {frame}: {drawn} cells drawn, peak {:.3}", sim.field().peak());
            written += 1;
        }
    }

    println!(
        "Done! {} frames of {}x{} written, final energy {:.3e}",
        written,
        sim.width(),
        sim.height(),
        sim.field().energy()
    );
    Ok(())
}
