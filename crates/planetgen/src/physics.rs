use crate::constants::*;
use crate::error::{PlanetGenError, Result};
use crate::star::{SpectralType, Star};

/// Rounds `number` to `digits` significant digits, half up, keeping its sign.
///
/// Numbers that already fit in `digits` digits (|n| <= 10^digits) come back
/// unchanged.
///
/// Results too large for an `i64` saturate at `±i64::MAX`.
///
/// # Errors
/// `InvalidArgument` when `digits < 1`.
pub fn round_significant(number: i64, digits: u32) -> Result<i64> {
    if digits < 1 {
        return Err(PlanetGenError::invalid(
            "number of significant digits must be at least one",
        ));
    }
    let sign = number.signum();
    let mut n = number.unsigned_abs();
    if n as f64 > 10f64.powi(digits as i32) {
        let magnitude = n.ilog10();
        let scale = 10u64.pow(1 + magnitude - digits);
        n += scale / 2;
        n -= n % scale;
    }
    // Rounding up near the top of the range saturates.
    Ok(sign * i64::try_from(n).unwrap_or(i64::MAX))
}

/// [`round_significant`] with the default four digits.
pub fn round_default(number: i64) -> i64 {
    // Four digits is always valid.
    round_significant(number, DEFAULT_SIGNIFICANT_DIGITS).unwrap_or(number)
}

/// Energy received from `star` relative to Sol at the same distance.
pub fn stellar_constant(star: &Star) -> f64 {
    let t = star.surface_temperature() as f64 / SpectralType::G2.surface_temperature() as f64;
    let r = star.radius as f64 / SOL_RADIUS as f64;
    r.powi(2) * t.powi(4)
}

/// Black-body temperature (K) at `distance` km given a stellar constant.
///
/// # Errors
/// `InvalidArgument` if `distance` is not positive.
pub fn orbit_temperature(stellar_constant: f64, distance: i64) -> Result<i32> {
    if distance <= 0 {
        return Err(PlanetGenError::invalid(format!(
            "orbital distance must be positive, got {distance}km"
        )));
    }
    let au = distance as f64 / AU as f64;
    let l = stellar_constant / au.powi(2);
    Ok((280.0 * l.powf(0.25)) as i32)
}

pub fn star_orbit_temperature(star: &Star, distance: i64) -> Result<i32> {
    orbit_temperature(stellar_constant(star), distance)
}

/// Kepler's third law: period in seconds of an orbit of `metres` radius around
/// a total mass of `kg`.
pub fn orbital_period(kg: f64, metres: i64) -> i64 {
    let rhs = (metres as f64).powi(3) / (G * kg);
    (2.0 * std::f64::consts::PI * rhs.sqrt()) as i64
}
