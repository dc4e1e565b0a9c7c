use descent::{init, DescentRunner, LanderState, Physics, SpeedController};
use std::env;

const MAX_STEPS: usize = 1000;

fn main() -> Result<(), String> {
    let mut runner = match env::args().nth(1) {
        Some(scenario_path) => init::json::from_file(&scenario_path)?,
        None => DescentRunner::try_new(LanderState::default(), Physics::default())
            .map_err(|e| e.to_string())?,
    };

    // aim slightly below the safe threshold to leave margin for the last step
    let policy = SpeedController::new(runner.physics().safe_landing_speed() * 0.8);

    let now = std::time::Instant::now();
    let result = runner.run(&policy, MAX_STEPS);
    let elapsed = now.elapsed();
    println!("Run ended with result: {result:?} time: {elapsed:?}");

    println!("{}", runner.history().pretty_to_string());
    println!("Finished {:?}", runner.current_state().status);
    Ok(())
}
