/// Below this magnitude the acceleration term is dropped and the motion is
/// treated as linear.
const ACCEL_EPSILON: f64 = 1e-8;
/// Discriminants this close to zero are rounding artifacts of a grazing
/// contact and get clamped to an exact graze.
const DISCRIMINANT_EPSILON: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub time: f64,
    pub velocity: f64,
}

/// Finds the first instant within `(0, duration]` at which a body starting
/// `altitude` above ground, moving with down-positive `velocity_down` under
/// constant down-positive `net_accel`, reaches the ground.
///
/// Solves `net_accel/2 * t^2 + velocity_down * t - altitude = 0` and keeps
/// the earliest root inside the window; the later root is a second crossing
/// the idealized model never reaches. Returns the contact instant and the
/// velocity at that instant.
pub fn solve_contact(
    altitude: f64,
    velocity_down: f64,
    net_accel: f64,
    duration: f64,
) -> Option<Contact> {
    if duration <= 0. {
        return None;
    }
    let time = if net_accel.abs() < ACCEL_EPSILON {
        linear_contact(altitude, velocity_down)
    } else {
        quadratic_contact(altitude, velocity_down, net_accel)
    }
    .filter(|&t| t > 0. && t <= duration)?;
    Some(Contact {
        time,
        velocity: velocity_down + net_accel * time,
    })
}

fn linear_contact(altitude: f64, velocity_down: f64) -> Option<f64> {
    if velocity_down <= ACCEL_EPSILON {
        // not closing on the ground
        return None;
    }
    Some(altitude / velocity_down)
}

fn quadratic_contact(altitude: f64, velocity_down: f64, net_accel: f64) -> Option<f64> {
    let a = net_accel / 2.;
    let b = velocity_down;
    let c = -altitude;

    let mut discriminant = b * b - 4. * a * c;
    if discriminant < 0. {
        if discriminant < -DISCRIMINANT_EPSILON {
            return None;
        }
        discriminant = 0.;
    }
    let sqrt_d = discriminant.sqrt();

    let (early, late) = {
        let (r1, r2) = ((-b - sqrt_d) / (2. * a), (-b + sqrt_d) / (2. * a));
        if r1 < r2 {
            (r1, r2)
        } else {
            (r2, r1)
        }
    };
    if early > 0. {
        Some(early)
    } else if late > 0. {
        Some(late)
    } else {
        None
    }
}
