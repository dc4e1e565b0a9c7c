use std::fmt::Display;

use super::physics::ConfigError;
use super::policy::BurnPolicy;
use super::{FlightStatus, LanderState, Physics};

#[derive(Debug)]
pub enum Error {
    InvalidConfig(ConfigError),
    StepLimitExceeded { limit: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidConfig(e) => write!(f, "Invalid configuration: {e}"),
            Error::StepLimitExceeded { limit } => {
                write!(f, "Lander still airborne after {limit} steps")
            }
        }
    }
}

impl From<ConfigError> for Error {
    fn from(val: ConfigError) -> Self {
        Error::InvalidConfig(val)
    }
}

#[derive(Debug)]
pub enum ExecutionStatus {
    InProgress,
    Finished,
}

/// Owns one descent session: the parameter set, the lander state and the
/// flight history. Callers feed it burn requests (or a whole policy) and
/// read the state back; the state has no other writer.
#[derive(Debug)]
pub struct DescentRunner {
    physics: Physics,
    lander: LanderState,
    history: DescentHistory,
}

impl DescentRunner {
    /// Validates the parameter set once, up front. Stepping never fails.
    pub fn try_new(initial_lander_state: LanderState, physics: Physics) -> Result<Self, Error> {
        let physics = physics.validated()?;
        let lander = LanderState {
            altitude: initial_lander_state.altitude.max(0.),
            fuel: initial_lander_state.fuel.max(0.),
            ..initial_lander_state
        };
        Ok(Self {
            physics,
            history: DescentHistory::with_initial_state(lander.clone()),
            lander,
        })
    }

    pub fn reinitialize(&mut self, initial_lander_state: LanderState) {
        self.history = DescentHistory::with_initial_state(initial_lander_state.clone());
        self.lander = initial_lander_state;
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    pub fn current_state(&self) -> &LanderState {
        &self.lander
    }

    pub fn history(&self) -> &DescentHistory {
        &self.history
    }

    pub fn iterate(&mut self, requested_burn: f64) -> ExecutionStatus {
        if self.lander.status.is_terminal() {
            return ExecutionStatus::Finished;
        }
        self.lander = self.physics.advance(self.lander.clone(), requested_burn);
        self.history.append_lander_state(&self.lander);
        if self.lander.status.is_terminal() {
            ExecutionStatus::Finished
        } else {
            ExecutionStatus::InProgress
        }
    }

    /// Lets `policy` fly the lander until touchdown. Errs if the lander is
    /// still airborne after `max_steps`.
    pub fn run(&mut self, policy: &impl BurnPolicy, max_steps: usize) -> Result<(), Error> {
        for _ in 0..max_steps {
            let burn = policy.requested_burn(&self.lander, &self.physics);
            if let ExecutionStatus::Finished = self.iterate(burn) {
                return Ok(());
            }
        }
        Err(Error::StepLimitExceeded { limit: max_steps })
    }
}

#[derive(Clone, Debug)]
pub struct DescentHistory {
    altitude: Vec<f64>,
    velocity: Vec<f64>,
    fuel: Vec<f64>,
    elapsed: Vec<f64>,
    status: Vec<FlightStatus>,
}

impl DescentHistory {
    pub fn with_initial_state(state: LanderState) -> Self {
        let LanderState {
            altitude,
            velocity,
            fuel,
            elapsed,
            status,
        } = state;
        Self {
            altitude: vec![altitude],
            velocity: vec![velocity],
            fuel: vec![fuel],
            elapsed: vec![elapsed],
            status: vec![status],
        }
    }

    pub fn append_lander_state(&mut self, state: &LanderState) {
        self.altitude.push(state.altitude);
        self.velocity.push(state.velocity);
        self.fuel.push(state.fuel);
        self.elapsed.push(state.elapsed);
        self.status.push(state.status);
    }

    pub fn len(&self) -> usize {
        self.altitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.altitude.is_empty()
    }

    pub fn iter_history(&self) -> impl Iterator<Item = LanderState> + '_ {
        self.altitude
            .iter()
            .zip(&self.velocity)
            .zip(&self.fuel)
            .zip(&self.elapsed)
            .zip(&self.status)
            .map(|((((altitude, velocity), fuel), elapsed), status)| LanderState {
                altitude: *altitude,
                velocity: *velocity,
                fuel: *fuel,
                elapsed: *elapsed,
                status: *status,
            })
    }

    pub fn pretty_to_string(&self) -> String {
        self.iter_history().fold(
            format!(
                "{:>10}{:>10}{:>10}{:>10}  {}",
                "TIME", "ALT", "VSPEED", "FUEL", "STATUS"
            ),
            |out,
             LanderState {
                 altitude,
                 velocity,
                 fuel,
                 elapsed,
                 status,
             }| {
                out + &format!("\n{elapsed:10.2}{altitude:10.2}{velocity:10.2}{fuel:10.2}  {status:?}")
            },
        )
    }
}
