use std::{fs::File, io::Read};

use json::{self, JsonValue};

use crate::simulation::defaults;
use crate::{DescentRunner, LanderState, Physics};

/// Loads a descent scenario. Every field is optional and falls back to the
/// built-in defaults; the assembled parameter set is validated once here.
///
/// ```json
/// {
///     "Lander": { "Altitude": 1500, "VSpeed": 50, "Fuel": 1200 },
///     "Physics": {
///         "Gravity": 1.62,
///         "MaxUpwardAccel": 6.0,
///         "MaxBurnPerStep": 200,
///         "SafeLandingSpeed": 5,
///         "Dt": 10
///     }
/// }
/// ```
pub fn from_file(file_path: &str) -> Result<DescentRunner, String> {
    runner_from_json(read_json(file_path)?)
}

pub fn parse_from_string(content: &str) -> Result<DescentRunner, String> {
    runner_from_json(json::parse(content).map_err(|e| e.to_string())?)
}

fn read_json(file_path: &str) -> Result<JsonValue, String> {
    let mut file_content = String::new();
    let mut file = File::open(file_path).map_err(|_| "Path does not exist")?;

    file.read_to_string(&mut file_content)
        .map_err(|_| "Failed to read file")?;
    json::parse(&file_content).map_err(|e| e.to_string())
}

fn runner_from_json(json: JsonValue) -> Result<DescentRunner, String> {
    macro_rules! get_or_default {
        ($section:literal, $key:literal, $default:expr) => {
            match &json[$section][$key] {
                JsonValue::Null => $default,
                value => value
                    .as_f64()
                    .ok_or(concat!($section, "/", $key, " has to be numeric"))?,
            }
        };
    }

    let initial_lander_state = LanderState::default()
        .with_altitude(get_or_default!("Lander", "Altitude", defaults::ALTITUDE))
        .with_velocity(get_or_default!("Lander", "VSpeed", defaults::VELOCITY))
        .with_fuel(get_or_default!("Lander", "Fuel", defaults::FUEL));

    let physics = Physics::default()
        .with_gravity(get_or_default!("Physics", "Gravity", defaults::GRAVITY))
        .with_max_upward_accel(get_or_default!(
            "Physics",
            "MaxUpwardAccel",
            defaults::MAX_UPWARD_ACCEL
        ))
        .with_max_burn_per_step(get_or_default!(
            "Physics",
            "MaxBurnPerStep",
            defaults::MAX_BURN_PER_STEP
        ))
        .with_safe_landing_speed(get_or_default!(
            "Physics",
            "SafeLandingSpeed",
            defaults::SAFE_LANDING_SPEED
        ))
        .with_dt(get_or_default!("Physics", "Dt", defaults::DT));

    DescentRunner::try_new(initial_lander_state, physics).map_err(|e| e.to_string())
}
