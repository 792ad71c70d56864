use std::fmt::Write as _;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use bloom_core::{
    build_modulator, fixed_step, parse_range_overrides, AnimationClock, Config, FrameClock,
    Modulation, RangeUpdate, Seed, Strategy,
};
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Waypoint,
    Drift,
}

impl From<StrategyArg> for Strategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::Waypoint => Strategy::Waypoint,
            StrategyArg::Drift => Strategy::Drift,
        }
    }
}

/// Runs the parameter modulation engine headless and prints the stream.
#[derive(Debug, Parser)]
#[command(name = "bloom", version)]
struct Args {
    /// Integer or text seed; omitted means a fresh random seed.
    #[arg(long)]
    seed: Option<String>,

    /// Global pacing multiplier.
    #[arg(long, default_value_t = 1.0)]
    time_scale: f32,

    #[arg(long, value_enum, default_value_t = StrategyArg::Waypoint)]
    strategy: StrategyArg,

    /// Frames to simulate with a fixed step; 0 runs forever in real time.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Range overrides, `name=min:max`; repeat or comma separate.
    #[arg(long = "range")]
    ranges: Vec<String>,

    /// Frame at which the overrides are applied (live retarget).
    #[arg(long, default_value_t = 0)]
    apply_at: u64,

    /// Print every n-th frame.
    #[arg(long, default_value_t = 60)]
    every: u64,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let overrides = collect_overrides(&args.ranges)?;
    let seed = args.seed.as_deref().map(Seed::parse);
    let mut engine = build_modulator(args.strategy.into(), seed, args.time_scale);
    log::info!(
        "[bloom] strategy={:?} seed={} time_scale={} overrides={}",
        args.strategy,
        engine.seed(),
        args.time_scale,
        overrides.len()
    );

    let every = args.every.max(1);
    let mut clock = AnimationClock::default();
    let mut pending = Some(overrides).filter(|o| !o.is_empty());

    if args.frames == 0 {
        let step = fixed_step(args.fps);
        let mut frames = FrameClock::new();
        loop {
            let dt = frames.tick();
            let frame = frames.frames();
            step_frame(engine.as_mut(), &mut clock, &mut pending, args.apply_at, frame, dt, every);
            thread::sleep(Duration::from_secs_f32(step));
        }
    }

    let dt = fixed_step(args.fps);
    for frame in 1..=args.frames {
        step_frame(engine.as_mut(), &mut clock, &mut pending, args.apply_at, frame, dt, every);
    }
    log::info!("[bloom] simulated {:.2}s over {} frames", engine.time(), args.frames);
    Ok(())
}

fn collect_overrides(raw: &[String]) -> Result<RangeUpdate> {
    let mut update = RangeUpdate::new();
    for spec in raw {
        let parsed =
            parse_range_overrides(spec).with_context(|| format!("invalid --range `{spec}`"))?;
        update.merge(&parsed);
    }
    Ok(update)
}

fn step_frame(
    engine: &mut dyn Modulation,
    clock: &mut AnimationClock,
    pending: &mut Option<RangeUpdate>,
    apply_at: u64,
    frame: u64,
    dt: f32,
    every: u64,
) {
    if frame >= apply_at {
        if let Some(update) = pending.take() {
            engine.set_ranges(&update);
            log::info!("[bloom] applied {} range override(s) at frame {}", update.len(), frame);
        }
    }
    let cfg = *engine.update(dt);
    clock.advance(dt, &cfg);
    if frame % every == 0 {
        println!("{}", format_frame(frame, engine.time(), &cfg, &clock));
    }
}

fn format_frame(frame: u64, time: f64, cfg: &Config, clock: &AnimationClock) -> String {
    let mut line = format!(
        "frame={frame:>6} t={time:>8.3} phase={:>6.1} grad={:>6.1}",
        clock.phase, clock.gradient_rotation
    );
    for (key, value) in cfg.iter() {
        let _ = write!(line, " {key}={value:.4}");
    }
    line
}
