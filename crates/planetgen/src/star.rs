use crate::constants::{SOL_MASS, SOL_RADIUS};
use crate::error::{PlanetGenError, Result};
use crate::physics;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letter part of a spectral type, hottest main-sequence first, then the
/// brown dwarfs and white dwarfs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectralClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
    L,
    T,
    Y,
    D,
}

/// Spectral type such as `G2`: class letter plus a digit 0..=9 where 0 is the
/// hottest of the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpectralType {
    pub class: SpectralClass,
    pub digit: u8,
}

impl SpectralType {
    pub const G2: SpectralType = SpectralType {
        class: SpectralClass::G,
        digit: 2,
    };

    pub fn new(class: SpectralClass, digit: u8) -> Result<Self> {
        if digit > 9 {
            return Err(PlanetGenError::invalid(format!(
                "spectral digit must be 0-9, got {digit}"
            )));
        }
        Ok(Self { class, digit })
    }

    fn inverse_digit(&self) -> i32 {
        9 - self.digit as i32
    }

    /// Photosphere temperature in kelvin.
    pub fn surface_temperature(&self) -> i32 {
        let inv = self.inverse_digit();
        match self.class {
            SpectralClass::O => 30_000 + inv * 5_000,
            SpectralClass::B => 10_000 + inv * 2_000,
            SpectralClass::A => 7_500 + inv * 250,
            SpectralClass::F => 6_000 + inv * 150,
            SpectralClass::G => 5_200 + inv * 80,
            SpectralClass::K => 3_700 + inv * 150,
            SpectralClass::M => 2_000 + inv * 170,
            SpectralClass::L => 1_300 + inv * 70,
            SpectralClass::T => 600 + inv * 70,
            SpectralClass::Y => 300 + inv * 60,
            SpectralClass::D => ((40.0 + (inv as f64).powf(2.5) * 5.0) as i32) * 100,
        }
    }
}

impl fmt::Display for SpectralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{}", self.class, self.digit)
    }
}

impl FromStr for SpectralType {
    type Err = PlanetGenError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        let (Some(letter), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(PlanetGenError::invalid(format!(
                "spectral type must be a letter and a digit, got [{s}]"
            )));
        };
        let class = match letter.to_ascii_uppercase() {
            'O' => SpectralClass::O,
            'B' => SpectralClass::B,
            'A' => SpectralClass::A,
            'F' => SpectralClass::F,
            'G' => SpectralClass::G,
            'K' => SpectralClass::K,
            'M' => SpectralClass::M,
            'L' => SpectralClass::L,
            'T' => SpectralClass::T,
            'Y' => SpectralClass::Y,
            'D' => SpectralClass::D,
            other => {
                return Err(PlanetGenError::invalid(format!(
                    "unknown spectral class [{other}]"
                )));
            }
        };
        let digit = digit
            .to_digit(10)
            .ok_or_else(|| PlanetGenError::invalid(format!("bad spectral digit in [{s}]")))?;
        SpectralType::new(class, digit as u8)
    }
}

/// The parent star of a generated body. Read-only to generators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub name: String,
    pub spectral_type: SpectralType,
    /// Radius in km.
    pub radius: i64,
    /// Mass in solar masses.
    pub mass: f64,
}

impl Star {
    pub fn new(name: impl Into<String>, spectral_type: SpectralType, radius: i64, mass: f64) -> Self {
        Self {
            name: name.into(),
            spectral_type,
            radius,
            mass,
        }
    }

    pub fn sol() -> Self {
        Self::new("Sol", SpectralType::G2, SOL_RADIUS, 1.0)
    }

    pub fn surface_temperature(&self) -> i32 {
        self.spectral_type.surface_temperature()
    }

    /// Period of an orbit at `distance` km around this star, in seconds.
    pub fn orbital_period(&self, distance: i64) -> i64 {
        physics::orbital_period(self.mass * SOL_MASS, distance.saturating_mul(1000))
    }
}
