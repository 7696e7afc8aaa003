// src/main.rs
// Runs a headless collection session over a fixed scatter of targets and logs the outcome.
//
// Usage: harvester [config.yaml] [local|sweep]
// Logging is controlled with RUST_LOG (e.g. RUST_LOG=info).

use harvester::{CollectionPlanner, HarvestConfig, PlanningMode, Point, Session, SessionStatus};
use log::{error, info};
use std::error::Error;

/// Simulation rate of the demo loop (Hz)
const FPS: f64 = 30.0;
/// Stop after this many simulated seconds even if targets remain
const MAX_SECONDS: f64 = 600.0;

/// Deterministic spread of targets: two tight groups, a loose line and a few strays.
fn demo_targets() -> Vec<Point> {
    [
        (3.0, 2.0), (3.4, 2.3), (3.1, 2.8), (2.7, 2.4),
        (8.0, 6.0), (8.5, 6.2), (8.3, 5.6),
        (5.0, 4.0), (6.0, 4.1), (7.0, 4.0), (8.0, 3.9), (9.0, 4.0),
        (12.5, 1.5), (14.8, 7.0), (11.0, 6.8),
    ]
    .iter()
    .map(|&(x, y)| Point::new(x, y))
    .collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    info!("Starting Harvester demo...");

    let mut args = std::env::args().skip(1);
    let mut config = match args.next() {
        Some(path) => HarvestConfig::from_yaml_file(path)?,
        None => HarvestConfig::default(),
    };
    match args.next().as_deref() {
        Some("sweep") => config.session.mode = PlanningMode::FullSweep,
        Some("local") => config.session.mode = PlanningMode::LocalCluster,
        Some(other) => error!("Unknown mode '{}', keeping {:?}", other, config.session.mode),
        None => {}
    }

    let planner = CollectionPlanner::new(config.planner.clone())?;
    let mut session = Session::new(planner, config.session.clone(), config.field.clone())?;
    for target in demo_targets() {
        session.add_target(target);
    }
    info!("Placed {} targets, mode {:?}", session.targets().len(), session.mode());

    session.start();

    let dt = 1.0 / FPS;
    let mut elapsed = 0.0;
    let mut travelled = 0.0;
    let mut last = session.position();
    while session.status() != SessionStatus::Done && elapsed < MAX_SECONDS {
        session.step(dt);
        elapsed += dt;

        let now = session.position();
        travelled += harvester::core::distance(&last, &now);
        last = now;
    }

    info!(
        "Finished in {:.1} s: {} collected, {} remaining, {:.2} m driven, {} replans",
        elapsed,
        session.collected(),
        session.targets().len(),
        travelled,
        session.replan_count()
    );
    if session.status() != SessionStatus::Done {
        error!("Session still {} after {:.0} s", session.status(), MAX_SECONDS);
    }
    Ok(())
}
