use crate::dice::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Commodities a body can carry as natural resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommodityName {
    Hydrogen,
    Helium,
    OrganicGases,
    CorrosiveGases,
    ExoticGases,
    SilicateOre,
    CarbonicOre,
    FerricOre,
    HeavyMetals,
    Radioactives,
    RareMetals,
    PreciousMetals,
    SilicateCrystals,
    ExoticCrystals,
    CarbonicCrystals,
    Water,
    Oxygen,
    OrganicChemicals,
    Protobionts,
    Prokaryotes,
    Cyanobacteria,
    Algae,
    Metazoa,
    Plankton,
    Echinoderms,
    Unobtanium,
}

impl CommodityName {
    pub fn display_name(self) -> &'static str {
        use CommodityName::*;
        match self {
            Hydrogen => "Hydrogen",
            Helium => "Helium",
            OrganicGases => "Organic Gases",
            CorrosiveGases => "Corrosive Gases",
            ExoticGases => "Exotic Gases",
            SilicateOre => "Silicate Ore",
            CarbonicOre => "Carbonic Ore",
            FerricOre => "Ferric Ore",
            HeavyMetals => "Heavy Metals",
            Radioactives => "Radioactives",
            RareMetals => "Rare Metals",
            PreciousMetals => "Precious Metals",
            SilicateCrystals => "Silicate Crystals",
            ExoticCrystals => "Exotic Crystals",
            CarbonicCrystals => "Carbonic Crystals",
            Water => "Water",
            Oxygen => "Oxygen",
            OrganicChemicals => "Organic Chemicals",
            Protobionts => "Protobionts",
            Prokaryotes => "Prokaryotes",
            Cyanobacteria => "Cyanobacteria",
            Algae => "Algae",
            Metazoa => "Metazoa",
            Plankton => "Plankton",
            Echinoderms => "Echinoderms",
            Unobtanium => "Unobtanium",
        }
    }
}

impl fmt::Display for CommodityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Abundance tier of a resource. Each tier rolls its density from its own range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Primary,
    Secondary,
    Tertiary,
    Trace,
}

impl Tier {
    /// Primary 800+4d100, secondary 400+2d100, tertiary 200+d100, trace 100+2d20.
    pub fn roll_density(self, dice: &mut dyn RandomSource) -> i32 {
        let density = match self {
            Tier::Primary => 800 + dice.roll_n(100, 4),
            Tier::Secondary => 400 + dice.roll_n(100, 2),
            Tier::Tertiary => 200 + dice.roll(100),
            Tier::Trace => 100 + dice.roll_n(20, 2),
        };
        density as i32
    }

    /// Inclusive range of densities this tier can roll.
    pub fn density_range(self) -> std::ops::RangeInclusive<i32> {
        match self {
            Tier::Primary => 804..=1200,
            Tier::Secondary => 402..=600,
            Tier::Tertiary => 201..=300,
            Tier::Trace => 102..=140,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub commodity: CommodityName,
    pub tier: Tier,
    density: i32,
}

impl Resource {
    pub fn new(commodity: CommodityName, tier: Tier, density: i32) -> Self {
        Self {
            commodity,
            tier,
            density: density.max(1),
        }
    }

    pub fn density(&self) -> i32 {
        self.density
    }

    pub fn set_density(&mut self, density: i32) {
        self.density = density.max(1);
    }
}
