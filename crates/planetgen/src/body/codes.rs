//! Closed code tables describing a body's environment.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MagneticField {
    None,
    Minimal,
    VeryWeak,
    Weak,
    Standard,
    Strong,
    VeryStrong,
    Intense,
}

/// Evolutionary stage of native life, simplest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Life {
    None,
    Organic,
    Archaean,
    Aerobic,
    ComplexOcean,
    SimpleLand,
    ComplexLand,
    Extensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Atmosphere {
    Vacuum,
    Standard,
    Chlorine,
    Flourine,
    Oxygen,
    SulphurCompounds,
    NitrogenCompounds,
    OrganicToxins,
    LowOxygen,
    Pollutants,
    HighCarbonDioxide,
    HighOxygen,
    InertGases,
    Hydrogen,
    Primordial,
    WaterVapour,
    CarbonDioxide,
    Tainted,
    Exotic,
}

/// Named pressure levels. Bodies store pascals; these are the landmarks
/// generators pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pressure {
    None,
    Trace,
    VeryThin,
    Thin,
    Standard,
    Dense,
    VeryDense,
    SuperDense,
}

impl Pressure {
    pub const fn pascals(self) -> i32 {
        match self {
            Pressure::None => 0,
            Pressure::Trace => 5_000,
            Pressure::VeryThin => 20_000,
            Pressure::Thin => 45_000,
            Pressure::Standard => 100_000,
            Pressure::Dense => 150_000,
            Pressure::VeryDense => 500_000,
            Pressure::SuperDense => 2_500_000,
        }
    }
}

/// Temperature landmarks in kelvin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Temperature {
    DeepSpace,
    Cool,
    VeryHot,
    LeadMelts,
    SilicatesMelt,
}

impl Temperature {
    pub const fn kelvin(self) -> i32 {
        match self {
            Temperature::DeepSpace => 3,
            Temperature::Cool => 280,
            Temperature::VeryHot => 350,
            Temperature::LeadMelts => 750,
            Temperature::SilicatesMelt => 1500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressure_levels_are_ordered() {
        let levels = [
            Pressure::None,
            Pressure::Trace,
            Pressure::VeryThin,
            Pressure::Thin,
            Pressure::Standard,
            Pressure::Dense,
            Pressure::VeryDense,
            Pressure::SuperDense,
        ];
        for pair in levels.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].pascals() < pair[1].pascals());
        }
        assert_eq!(Pressure::Standard.pascals(), crate::constants::STANDARD_PRESSURE);
    }

    #[test]
    fn test_life_is_ordered_by_complexity() {
        assert!(Life::None < Life::Organic);
        assert!(Life::Aerobic < Life::Extensive);
        assert!(MagneticField::Weak < MagneticField::Standard);
    }
}
