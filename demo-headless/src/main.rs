use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;
use wave_tank_core::{
    BoundaryType, InterferencePoint, Obstacle, Simulation, SlitLayout, SlitParams, TankConfig,
    Vec2, WaveField, WavePacket,
};

/// Wave interference tank demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "wave-tank-demo")]
#[command(about = "Headless 2D wave interference simulation", long_about = None)]
struct Args {
    /// Slits on the bottom wall
    #[arg(long, default_value_t = 0)]
    bottom: usize,

    /// Slits on the top wall
    #[arg(long, default_value_t = 0)]
    top: usize,

    /// Slits on the left wall
    #[arg(long, default_value_t = 2)]
    left: usize,

    /// Slits on the right wall
    #[arg(long, default_value_t = 0)]
    right: usize,

    /// Sample points per axis
    #[arg(short = 'n', long, default_value_t = 200)]
    resolution: usize,

    /// Water depth (wave speed is 10 * sqrt(depth))
    #[arg(short, long, default_value_t = 1.0)]
    depth: f32,

    /// Global decay factor (0.9 - 1.0)
    #[arg(long, default_value_t = 0.999)]
    decay: f32,

    /// Boundary type (reflective, absorbing, open)
    #[arg(short, long, default_value = "reflective")]
    boundary: String,

    /// Standing wave harmonic (omit for none)
    #[arg(long)]
    standing_wave: Option<u32>,

    /// Simulation time scale
    #[arg(long, default_value_t = 1.0)]
    time_scale: f32,

    /// Time requested per frame
    #[arg(long, default_value_t = 0.05)]
    frame_dt: f32,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 100)]
    frames: usize,

    /// Print statistics every N frames
    #[arg(short, long, default_value_t = 10)]
    report_interval: usize,

    /// Random obstacles to place
    #[arg(long, default_value_t = 0)]
    obstacles: usize,

    /// Random wave packets to add
    #[arg(long, default_value_t = 0)]
    packets: usize,

    /// Random interference points to add
    #[arg(long, default_value_t = 0)]
    points: usize,

    /// Seed for random obstacles, packets and points
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn random_position(rng: &mut StdRng, width: f32, height: f32) -> Vec2 {
    Vec2::new(rng.random_range(0.0..width), rng.random_range(0.0..height))
}

fn populate(field: &mut WaveField, args: &Args, rng: &mut StdRng) {
    let (width, height) = (field.geometry().width(), field.geometry().height());

    for _ in 0..args.obstacles {
        let position = random_position(rng, width, height);
        field.add_obstacle(Obstacle::new(position, rng.random_range(0.5..2.0)));
    }

    for _ in 0..args.packets {
        let packet = WavePacket::new(
            random_position(rng, width, height),
            rng.random_range(0.5..2.0),
            rng.random_range(0.5..2.0),
            rng.random_range(1.0..5.0),
            rng.random_range(1.0..3.0),
            Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0)),
        );
        field.add_wave_packet(packet);
    }

    for _ in 0..args.points {
        let point = InterferencePoint::new(
            random_position(rng, width, height),
            rng.random_range(0.5..2.0),
            rng.random_range(0.5..2.0),
        );
        field.add_interference_point(point);
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    println!("=== Wave Tank Demo ===\n");

    let boundary_type = match args.boundary.parse::<BoundaryType>() {
        Ok(boundary) => boundary,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let config = TankConfig {
        resolution: args.resolution,
        depth: args.depth,
        decay_factor: args.decay,
        boundary_type,
        ..TankConfig::default()
    };
    let layout = SlitLayout::new(args.bottom, args.top, args.left, args.right);
    let slits = layout.slits(config.width, config.height, SlitParams::default());

    let mut field = match WaveField::from_config(&config, slits) {
        Ok(field) => field,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            std::process::exit(2);
        }
    };

    let mut rng = StdRng::seed_from_u64(args.seed);
    populate(&mut field, &args, &mut rng);
    field.set_standing_wave_mode(args.standing_wave);

    println!(
        "Tank: {:.0}x{:.0}, {}x{} grid, depth {:.2}, decay {:.4}, boundary {}",
        config.width,
        config.height,
        config.resolution,
        config.resolution,
        field.depth(),
        field.decay_factor(),
        field.boundary_type()
    );
    println!(
        "Wave speed {:.3}, dt {:.6}, {} slits, {} obstacles, {} packets, {} points\n",
        field.wave_speed(),
        field.dt(),
        field.slits().len(),
        field.obstacles().len(),
        field.packets().len(),
        field.points().len()
    );

    let mut sim = Simulation::new(field);
    sim.set_time_scale(args.time_scale);

    let report_interval = args.report_interval.max(1);
    let mut total_steps = 0;
    for frame in 1..=args.frames {
        total_steps += sim.step(args.frame_dt);

        if frame % report_interval == 0 || frame == args.frames {
            let stats = sim.field().stats();
            println!(
                "frame {:5}  t={:7.3}  steps={:7}  min={:10.4}  max={:10.4}  mean|u|={:9.5}  energy={:12.4e}  active={}",
                frame,
                sim.time(),
                total_steps,
                stats.min,
                stats.max,
                stats.mean_abs,
                stats.energy,
                stats.nonzero_cells
            );
        }
    }

    println!("\n=== Done: {} frames, {} integration steps ===", args.frames, total_steps);
}
