use super::{LanderState, Physics};

/// Source of burn requests, human or automated. The runner queries it once
/// per step; requests outside `[0, max_burn_per_step]` get clamped by the
/// thrust model anyway.
pub trait BurnPolicy {
    fn requested_burn(&self, lander: &LanderState, physics: &Physics) -> f64;
}

pub struct ConstantBurn {
    burn: f64,
}

impl ConstantBurn {
    pub fn new(burn: f64) -> Self {
        Self { burn }
    }
}

impl BurnPolicy for ConstantBurn {
    fn requested_burn(&self, _: &LanderState, _: &Physics) -> f64 {
        self.burn
    }
}

/// Steers the descent speed toward `target_speed` (down-positive, m/s).
///
/// Picks the burn whose net acceleration over one nominal step closes the
/// speed gap exactly, so with enough thrust authority and fuel the lander
/// settles into a constant-speed descent.
pub struct SpeedController {
    target_speed: f64,
}

impl SpeedController {
    pub fn new(target_speed: f64) -> Self {
        Self { target_speed }
    }
}

impl BurnPolicy for SpeedController {
    fn requested_burn(&self, lander: &LanderState, physics: &Physics) -> f64 {
        let needed_accel =
            (lander.velocity - self.target_speed) / physics.dt() + physics.gravity();
        if needed_accel <= 0. {
            return 0.;
        }
        (needed_accel / physics.max_upward_accel() * physics.max_burn_per_step())
            .min(physics.max_burn_per_step())
    }
}

#[cfg(test)]
mod policy_tests {
    use super::*;

    #[test]
    fn constant_burn_ignores_state() {
        let policy = ConstantBurn::new(120.);
        let burn = policy.requested_burn(&LanderState::default(), &Physics::default());
        assert_eq!(burn, 120.);
    }

    #[test]
    fn controller_brakes_hard_when_fast() {
        let physics = Physics::default();
        let fast = LanderState::default().with_velocity(500.);
        assert_eq!(
            SpeedController::new(5.).requested_burn(&fast, &physics),
            physics.max_burn_per_step()
        );
    }

    #[test]
    fn controller_cuts_engine_when_slow() {
        let physics = Physics::default();
        let rising = LanderState::default().with_velocity(-50.);
        assert_eq!(SpeedController::new(5.).requested_burn(&rising, &physics), 0.);
    }

    #[test]
    fn controller_hovers_at_target_speed() {
        let physics = Physics::default();
        let on_target = LanderState::default().with_velocity(5.);
        let burn = SpeedController::new(5.).requested_burn(&on_target, &physics);
        // gravity compensation only
        let hover = physics.gravity() / physics.max_upward_accel() * physics.max_burn_per_step();
        assert!((burn - hover).abs() < 1e-9);
    }

    #[test]
    fn requests_stay_in_range() {
        let physics = Physics::default();
        let policy = SpeedController::new(5.);
        for velocity in [-1000., -5., 0., 5., 80., 1e6] {
            let burn =
                policy.requested_burn(&LanderState::default().with_velocity(velocity), &physics);
            assert!((0. ..=physics.max_burn_per_step()).contains(&burn));
        }
    }
}
