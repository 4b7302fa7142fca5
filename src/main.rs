//! Crowd Runner entry point
//!
//! The web build is driven from JavaScript through `platform::WebRun`. The
//! native binary plays a stage headlessly with the autopilot and logs the
//! outcome:
//!
//! ```text
//! RUST_LOG=info crowd-runner [stage] [seed]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use crowd_runner::sim::{GameEvent, RunOutcome, RunSimulation, suggest_lateral_target};
    use crowd_runner::{ProgressData, Tuning};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Simulated frame rate of the headless run
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 36_000;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let stage_id = match args.next().map(|s| s.parse::<u32>()) {
        None => 1,
        Some(Ok(id)) => id,
        Some(Err(e)) => {
            log::error!("Invalid stage number: {}", e);
            std::process::exit(2);
        }
    };
    let seed = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(42);

    log::info!("Crowd Runner (native) starting stage {} with seed {}", stage_id, seed);

    let progress = ProgressData::load();
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut sim = match RunSimulation::create(stage_id, &progress, Tuning::default(), &mut rng) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Cannot start run: {}", e);
            std::process::exit(2);
        }
    };

    let mut sounds = 0usize;
    let mut frames = 0;
    while !sim.is_finished() && frames < MAX_FRAMES {
        sim.set_lateral_target(suggest_lateral_target(&sim));
        sim.update(FRAME_DT);
        sounds += sim
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::PlaySound { .. }))
            .count();
        frames += 1;
    }

    match sim.outcome() {
        Some(RunOutcome::Victory(r)) | Some(RunOutcome::Ending(r)) => println!(
            "Stage {} cleared: {} coins, {} stars, {}/{} allies ({} boss exchanges, {} sounds)",
            stage_id,
            r.total_coins,
            r.stars,
            r.surviving_allies,
            r.start_allies,
            sim.exchanges(),
            sounds
        ),
        Some(RunOutcome::Fail { message }) => println!(
            "Stage {} failed at {:.0}%: {}",
            stage_id,
            sim.progress_percent(),
            message
        ),
        None => println!("Stage {} unfinished after {} frames", stage_id, frames),
    }
    sim.destroy();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::start, this is just to satisfy the compiler
}
