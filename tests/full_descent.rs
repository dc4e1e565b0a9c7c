use approx::assert_relative_eq;
use descent::{
    ConstantBurn, DescentRunner, FlightStatus, LanderState, Physics, SpeedController,
};
use rand::Rng;

fn default_runner() -> DescentRunner {
    DescentRunner::try_new(LanderState::default(), Physics::default()).unwrap()
}

#[test]
fn full_burn_descent_terminates_quickly() {
    let mut runner = default_runner();
    runner.run(&ConstantBurn::new(200.), 50).unwrap();

    let lander = runner.current_state();
    assert!(lander.status.is_terminal());
    assert_eq!(lander.altitude, 0.);
    assert_eq!(lander.fuel, 0.);
}

#[test]
fn speed_controller_lands_with_generous_fuel() {
    let mut runner = DescentRunner::try_new(
        LanderState::default().with_fuel(5000.),
        Physics::default(),
    )
    .unwrap();
    runner.run(&SpeedController::new(4.), 100).unwrap();

    let lander = runner.current_state();
    assert_eq!(lander.status, FlightStatus::Landed);
    assert!(lander.velocity.abs() <= runner.physics().safe_landing_speed());
}

#[test]
fn invariants_hold_for_random_burn_sequences() {
    let mut rng = rand::thread_rng();
    let physics = Physics::default();

    for _ in 0..100 {
        let mut lander = LanderState::default()
            .with_altitude(rng.gen_range(10f64..3000.))
            .with_velocity(rng.gen_range(-50f64..100.))
            .with_fuel(rng.gen_range(0f64..2000.));
        let mut previous_fuel = lander.fuel;
        let mut previous_elapsed = lander.elapsed;

        for _ in 0..200 {
            lander = physics.advance(lander, rng.gen_range(-50f64..400.));
            assert!(lander.altitude >= 0.);
            assert!(lander.fuel >= 0.);
            assert!(lander.fuel <= previous_fuel);
            assert!(lander.elapsed >= previous_elapsed);
            previous_fuel = lander.fuel;
            previous_elapsed = lander.elapsed;
            if lander.status.is_terminal() {
                break;
            }
        }
        assert!(lander.status.is_terminal(), "descent never ended");
    }
}

#[test]
fn terminal_state_is_frozen_across_runs() {
    let mut runner = default_runner();
    runner.run(&ConstantBurn::new(0.), 100).unwrap();
    let frozen = runner.current_state().clone();
    assert!(frozen.status.is_terminal());

    runner.run(&ConstantBurn::new(200.), 100).unwrap();
    let lander = runner.current_state();
    assert_eq!(lander.altitude, frozen.altitude);
    assert_eq!(lander.velocity, frozen.velocity);
    assert_eq!(lander.fuel, frozen.fuel);
    assert_eq!(lander.status, frozen.status);
}

#[test]
fn many_small_coast_steps_match_closed_form() {
    let physics = Physics::default().with_dt(0.5);
    let mut lander = LanderState::default()
        .with_altitude(1000.)
        .with_velocity(0.)
        .with_fuel(0.);
    for _ in 0..20 {
        lander = physics.advance(lander, 0.);
    }

    // 10 s of free fall at 1.62 m/s^2
    assert_relative_eq!(lander.velocity, 16.2, max_relative = 1e-9);
    assert_relative_eq!(lander.altitude, 1000. - 1.62 / 2. * 100., max_relative = 1e-9);
    assert_relative_eq!(lander.elapsed, 10., max_relative = 1e-9);
}

#[test]
fn contact_velocity_matches_energy_argument() {
    // free fall from rest: contact speed is sqrt(2 g h) regardless of dt
    for dt in [0.1, 1., 10., 100.] {
        let physics = Physics::default().with_dt(dt);
        let mut lander = LanderState::default()
            .with_altitude(500.)
            .with_velocity(0.)
            .with_fuel(0.);
        for _ in 0..10_000 {
            lander = physics.advance(lander, 0.);
            if lander.status.is_terminal() {
                break;
            }
        }
        assert_eq!(lander.status, FlightStatus::Crashed);
        assert_relative_eq!(
            lander.velocity,
            (2. * 1.62 * 500.0_f64).sqrt(),
            max_relative = 1e-9
        );
        assert_relative_eq!(
            lander.elapsed,
            (2. * 500.0_f64 / 1.62).sqrt(),
            max_relative = 1e-9
        );
    }
}
