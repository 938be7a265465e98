//! Qualitative features. Each body family has its own closed set; a body
//! stores them wrapped in [`Feature`].

use serde::{Deserialize, Serialize};

/// Size and shape markers for small bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmallBodyFeature {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
    Gigantic,
    Oblong,
    Egg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeltFeature {
    ThinRing,
    WideSparseRing,
    Planetoids,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JovianFeature {
    MethaneClouds,
    AmmoniaClouds,
    WaterClouds,
    Cloudless,
    AlkaliMetals,
    SilicateClouds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrestrialFeature {
    VolcanicFlats,
    Pangaea,
    EquatorialOcean,
    ManyIslands,
    RedIce,
    BacterialMats,
    BorderedInBlack,
    BorderedInGreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DwarfFeature {
    GreatRift,
    BrokenRifts,
    MetallicSea,
    MetallicLakes,
    NaturalHoneyComb,
    ArtificialHoneyComb,
    NorthCrater,
    SouthCrater,
    EquatorialRidge,
    NightsideIce,
    ReMelted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoonFeature {
    SmallMoon,
    LargeMoon,
    TidallyLocked,
    AlmostLocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    SmallBody(SmallBodyFeature),
    Belt(BeltFeature),
    Jovian(JovianFeature),
    Terrestrial(TerrestrialFeature),
    Dwarf(DwarfFeature),
    Moon(MoonFeature),
}

macro_rules! impl_from_family {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Feature {
                fn from(f: $ty) -> Self {
                    Feature::$variant(f)
                }
            }
        )*
    };
}

impl_from_family!(
    SmallBodyFeature => SmallBody,
    BeltFeature => Belt,
    JovianFeature => Jovian,
    TerrestrialFeature => Terrestrial,
    DwarfFeature => Dwarf,
    MoonFeature => Moon,
);
