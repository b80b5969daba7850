use std::path::PathBuf;

use clap::Parser;
use dopri_physics::config::load_scenario;
use dopri_physics::dynamics::DragMode;
use dopri_physics::export::summary::write_summary;
use dopri_physics::export::trajectory::writer_for_path;
use dopri_physics::scenario::{physics_model_from_config, run_with_model};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Propagate a craft through a scenario with the fixed-step Dormand-Prince stepper"
)]
struct Cli {
    /// Scenario file (YAML or TOML)
    #[arg(long)]
    scenario: PathBuf,

    /// Trajectory CSV output (`-` for stdout)
    #[arg(long, default_value = "artifacts/trajectory.csv")]
    output: PathBuf,

    /// Optional JSON run summary
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Override the scenario timestep
    #[arg(long)]
    dt: Option<f64>,

    /// Override the number of steps
    #[arg(long)]
    steps: Option<usize>,

    /// Apply drag at every stage regardless of the scenario's drag mode
    #[arg(long, default_value_t = false)]
    drag: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut scenario = load_scenario(&cli.scenario)?;
    if let Some(dt) = cli.dt {
        scenario.integration.dt = dt;
    }
    if let Some(steps) = cli.steps {
        scenario.integration.steps = steps;
    }

    let mut model = physics_model_from_config(&scenario.physics)?;
    if cli.drag {
        model = model.with_drag_mode(DragMode::Applied);
    }
    let run = run_with_model(&scenario, &model)?;

    let mut writer = writer_for_path(&cli.output)?;
    run.write_csv(writer.as_mut())?;
    if let Some(path) = &cli.summary {
        write_summary(path, &run.summary())?;
    }

    if cli.output != PathBuf::from("-") {
        let start = run.initial_state.position;
        let end = run.final_state.position;
        println!("=== Propagation: {} ===", run.name);
        println!(
            "Steps          : {} taken, {} skipped (dt = {})",
            run.steps_taken, run.steps_skipped, run.dt
        );
        println!("Start position : ({:.6}, {:.6}, {:.6})", start.x, start.y, start.z);
        println!("Final position : ({:.6}, {:.6}, {:.6})", end.x, end.y, end.z);
        if let Some(sample) = run.samples.last() {
            println!("Final altitude : {:.3} km", sample.altitude_km);
        }
        match run.energy_drift {
            Some(drift) => println!("Energy drift   : {:.3e}", drift),
            None => println!("Energy drift   : n/a (no primary body)"),
        }
        println!("Trajectory     : {}", cli.output.display());
    }

    Ok(())
}
