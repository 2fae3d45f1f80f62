use std::path::PathBuf;
use std::time::{Duration, Instant};

use sph3d::sph::*;
use sph3d::units::*;
use tracing_subscriber::EnvFilter;

struct RunnerArgs {
    config: Option<PathBuf>,
    steps: u64,
    block: usize,
    report_every: u64,
    output: Option<PathBuf>,
}

impl Default for RunnerArgs {
    fn default() -> Self {
        RunnerArgs {
            config: None,
            steps: 1000,
            block: 10,
            report_every: 100,
            output: None,
        }
    }
}

fn print_help() {
    println!("sph3d - headless SPH fluid simulation");
    println!();
    println!("USAGE:");
    println!("    sph3d [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --config <file.json>   Simulation parameters, missing fields use defaults");
    println!("    --steps <N>            Number of simulation steps (default 1000)");
    println!("    --block <N>            Edge length of the initial fluid cube in particles (default 10)");
    println!("    --report-every <N>     Log statistics every N steps, 0 disables (default 100)");
    println!("    --output <file.json>   Write the final snapshot to this file");
    println!("    --help, -h             Print this help");
    println!();
    println!("Log level is controlled via RUST_LOG, e.g. RUST_LOG=sph3d=debug");
}

// None if the program should exit without simulating.
// `args` includes the program name.
fn parse_args(args: &[String]) -> Option<RunnerArgs> {
    let mut runner_args = RunnerArgs::default();

    fn number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Option<T> {
        let parsed = value.and_then(|v| v.parse().ok());
        if parsed.is_none() {
            eprintln!("{} expects a non-negative integer", flag);
        }
        parsed
    }

    fn path(flag: &str, value: Option<&String>) -> Option<PathBuf> {
        let parsed = value.filter(|v| !v.starts_with("--")).map(PathBuf::from);
        if parsed.is_none() {
            eprintln!("{} expects a file path", flag);
        }
        parsed
    }

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                runner_args.config = Some(path("--config", args.get(i))?);
            }
            "--steps" => {
                i += 1;
                runner_args.steps = number("--steps", args.get(i))?;
            }
            "--block" => {
                i += 1;
                runner_args.block = number("--block", args.get(i))?;
            }
            "--report-every" => {
                i += 1;
                runner_args.report_every = number("--report-every", args.get(i))?;
            }
            "--output" => {
                i += 1;
                runner_args.output = Some(path("--output", args.get(i))?);
            }
            "--help" | "-h" => {
                print_help();
                return None;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                return None;
            }
        }
        i += 1;
    }
    Some(runner_args)
}

fn main() -> Result<(), SimulationError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let args = match parse_args(&args) {
        Some(args) => args,
        None => return Ok(()),
    };

    let parameters = match &args.config {
        Some(path) => SimulationParameters::load_json(path)?,
        None => SimulationParameters::default(),
    };
    tracing::info!(?parameters, "simulation parameters");

    microprofile::init!();
    microprofile::set_enable_all_groups!(true);

    let mut fluid_world = FluidParticleWorld::new(parameters)?;
    // cube centered around the origin, so it starts well inside the box
    let extent = fluid_world.parameters().rest_spacing() * args.block.saturating_sub(1) as Real;
    let min = Point::new(-extent * 0.5, -extent * 0.5, -extent * 0.5);
    fluid_world.add_fluid_lattice(min, [args.block; 3], 0.0, &mut rand::thread_rng());

    let mut sph_solver: Box<dyn Solver> = Box::new(StagedSolver::new());
    let mut total_processing_time = Duration::default();
    let mut last_statistics = None;
    for _ in 0..args.steps {
        let start = Instant::now();
        let statistics = sph_solver.simulation_step(&mut fluid_world)?;
        total_processing_time += start.elapsed();
        microprofile::flip!();

        if args.report_every > 0 && statistics.step % args.report_every == 0 {
            tracing::info!(
                step = statistics.step,
                time = statistics.passed_time,
                mean_density = statistics.mean_density,
                max_density = statistics.max_density,
                max_speed = statistics.max_speed,
                num_non_finite = statistics.num_non_finite,
                "progress"
            );
        }
        last_statistics = Some(statistics);
    }

    tracing::info!(
        steps = args.steps,
        num_particles = fluid_world.particles.len(),
        processing_time_ms = total_processing_time.as_secs_f64() * 1000.0,
        ?last_statistics,
        "simulation finished"
    );

    if let Some(path) = &args.output {
        fluid_world.snapshot().export_json(path)?;
        tracing::info!(path = %path.display(), "wrote snapshot");
    }

    Ok(())
}
