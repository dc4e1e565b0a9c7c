use std::fmt::Display;

use super::touchdown::{solve_contact, Contact};

pub(crate) mod defaults {
    pub const GRAVITY: f64 = 1.62;
    pub const MAX_UPWARD_ACCEL: f64 = 6.0;
    pub const MAX_BURN_PER_STEP: f64 = 200.;
    pub const SAFE_LANDING_SPEED: f64 = 5.;
    pub const DT: f64 = 10.;
    pub const ALTITUDE: f64 = 1500.;
    pub const VELOCITY: f64 = 50.;
    pub const FUEL: f64 = 1200.;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightStatus {
    Flying,
    OutOfFuel,
    Landed,
    Crashed,
}

impl FlightStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlightStatus::Landed | FlightStatus::Crashed)
    }
}

/// Vertical state of the lander. Down-positive convention: `velocity` is
/// positive while descending, and gravity increases it.
#[derive(Clone, Debug)]
pub struct LanderState {
    pub altitude: f64,
    pub velocity: f64,
    pub fuel: f64,
    pub elapsed: f64,
    pub status: FlightStatus,
}

impl Default for LanderState {
    fn default() -> Self {
        Self {
            altitude: defaults::ALTITUDE,
            velocity: defaults::VELOCITY,
            fuel: defaults::FUEL,
            elapsed: 0.,
            status: FlightStatus::Flying,
        }
    }
}

impl LanderState {
    pub fn with_altitude(self, altitude: f64) -> Self {
        Self { altitude, ..self }
    }

    pub fn with_velocity(self, velocity: f64) -> Self {
        Self { velocity, ..self }
    }

    pub fn with_fuel(self, fuel: f64) -> Self {
        Self { fuel, ..self }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    NonPositive { field: &'static str, value: f64 },
    Negative { field: &'static str, value: f64 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "{field} ({value}) has to be positive")
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{field} ({value}) can't be negative")
            }
        }
    }
}

/// What a requested burn achieves over one step, given the fuel on board.
///
/// `achieved_accel` is the upward acceleration while the engine burns;
/// `burn_fraction` is the share of the step it can be sustained for before
/// the tank runs dry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThrustPlan {
    pub achieved_accel: f64,
    pub fuel_consumed: f64,
    pub burn_fraction: f64,
    pub time_at_full_burn: f64,
}

impl ThrustPlan {
    fn coast() -> Self {
        Self {
            achieved_accel: 0.,
            fuel_consumed: 0.,
            burn_fraction: 0.,
            time_at_full_burn: 0.,
        }
    }
}

#[derive(Debug)]
pub struct Physics {
    gravity: f64,
    max_upward_accel: f64,
    max_burn_per_step: f64,
    safe_landing_speed: f64,
    dt: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: defaults::GRAVITY,
            max_upward_accel: defaults::MAX_UPWARD_ACCEL,
            max_burn_per_step: defaults::MAX_BURN_PER_STEP,
            safe_landing_speed: defaults::SAFE_LANDING_SPEED,
            dt: defaults::DT,
        }
    }
}

impl Physics {
    pub fn with_gravity(self, gravity: f64) -> Self {
        Self { gravity, ..self }
    }

    pub fn with_max_upward_accel(self, max_upward_accel: f64) -> Self {
        Self {
            max_upward_accel,
            ..self
        }
    }

    pub fn with_max_burn_per_step(self, max_burn_per_step: f64) -> Self {
        Self {
            max_burn_per_step,
            ..self
        }
    }

    pub fn with_safe_landing_speed(self, safe_landing_speed: f64) -> Self {
        Self {
            safe_landing_speed,
            ..self
        }
    }

    pub fn with_dt(self, dt: f64) -> Self {
        Self { dt, ..self }
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn max_upward_accel(&self) -> f64 {
        self.max_upward_accel
    }

    pub fn max_burn_per_step(&self) -> f64 {
        self.max_burn_per_step
    }

    pub fn safe_landing_speed(&self) -> f64 {
        self.safe_landing_speed
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("Gravity", self.gravity),
            ("MaxUpwardAccel", self.max_upward_accel),
            ("MaxBurnPerStep", self.max_burn_per_step),
            ("Dt", self.dt),
        ] {
            if !(value > 0.) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if !(self.safe_landing_speed >= 0.) {
            return Err(ConfigError::Negative {
                field: "SafeLandingSpeed",
                value: self.safe_landing_speed,
            });
        }
        Ok(self)
    }

    /// Maps a requested burn and the fuel on board to what the engine
    /// actually delivers over a step of `dt`. Pure; the fuel deduction
    /// happens in [`Physics::advance_by`].
    pub fn plan_burn(&self, requested_burn: f64, fuel: f64, dt: f64) -> ThrustPlan {
        let burn = requested_burn.clamp(0., self.max_burn_per_step);
        if burn <= 0. || fuel <= 0. {
            return ThrustPlan::coast();
        }
        let burn_fraction = (fuel / burn).min(1.);
        ThrustPlan {
            achieved_accel: burn / self.max_burn_per_step * self.max_upward_accel,
            fuel_consumed: burn.min(fuel),
            burn_fraction,
            time_at_full_burn: dt * burn_fraction,
        }
    }

    /// Advances one nominal step of `dt`.
    pub fn advance(&self, lander: LanderState, requested_burn: f64) -> LanderState {
        self.advance_by(lander, self.dt, requested_burn)
    }

    /// Advances the lander by `dt` seconds under `requested_burn`.
    ///
    /// The step splits into a burn phase (full thrust for as long as fuel
    /// sustains it) and a coast phase (gravity only). Each phase checks for
    /// ground contact within its own duration, so touchdown is resolved at
    /// the exact contact instant instead of a step boundary. Terminal states
    /// are left untouched.
    pub fn advance_by(&self, mut lander: LanderState, dt: f64, requested_burn: f64) -> LanderState {
        if lander.status.is_terminal() || dt <= 0. {
            return lander;
        }
        if lander.altitude <= 0. {
            lander.altitude = 0.;
            return self.settle(lander);
        }

        let plan = self.plan_burn(requested_burn, lander.fuel, dt);
        let t_burn = plan.time_at_full_burn;
        if t_burn > 0. {
            let net_accel = self.gravity - plan.achieved_accel;
            if let Some(contact) = solve_contact(lander.altitude, lander.velocity, net_accel, t_burn)
            {
                lander.fuel = (lander.fuel - plan.fuel_consumed * contact.time / t_burn).max(0.);
                return self.touch_down(lander, contact);
            }
            lander.altitude -= lander.velocity * t_burn + net_accel / 2. * t_burn.powi(2);
            lander.velocity += net_accel * t_burn;
            lander.fuel = (lander.fuel - plan.fuel_consumed).max(0.);
            lander.elapsed += t_burn;
        }

        let t_coast = dt - t_burn;
        if t_coast > 0. {
            if let Some(contact) =
                solve_contact(lander.altitude, lander.velocity, self.gravity, t_coast)
            {
                return self.touch_down(lander, contact);
            }
            lander.altitude -= lander.velocity * t_coast + self.gravity / 2. * t_coast.powi(2);
            lander.velocity += self.gravity * t_coast;
            lander.elapsed += t_coast;
        }

        if lander.altitude <= 0. {
            // exact boundary hit, no in-phase root
            lander.altitude = 0.;
            return self.settle(lander);
        }
        if lander.fuel <= 0. && lander.status == FlightStatus::Flying {
            lander.fuel = 0.;
            lander.status = FlightStatus::OutOfFuel;
        }
        lander
    }

    fn touch_down(&self, mut lander: LanderState, contact: Contact) -> LanderState {
        lander.elapsed += contact.time;
        lander.velocity = contact.velocity;
        lander.altitude = 0.;
        self.settle(lander)
    }

    fn settle(&self, mut lander: LanderState) -> LanderState {
        lander.status = if lander.velocity.abs() <= self.safe_landing_speed {
            FlightStatus::Landed
        } else {
            FlightStatus::Crashed
        };
        lander
    }
}
