pub mod codes;
pub mod features;

pub use codes::{Atmosphere, Life, MagneticField, Pressure, Temperature};
pub use features::{
    BeltFeature, DwarfFeature, Feature, JovianFeature, MoonFeature, SmallBodyFeature,
    TerrestrialFeature,
};

use crate::dice::RandomSource;
use crate::error::{PlanetGenError, Result};
use crate::resources::{CommodityName, Resource, Tier};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Top level grouping of body types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyGroup {
    Belt,
    SmallBody,
    Dwarf,
    Terrestrial,
    Jovian,
}

/// Every body type that has a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyType {
    AsteroidBelt,
    VulcanianBelt,
    IceBelt,
    DustDisc,
    PlanetesimalDisc,

    Vulcanian,
    Metallic,
    Silicaceous,
    Carbonaceous,
    Gelidaceous,
    Aggregate,

    Ferrinian,
    Janian,
    Hermian,
    Selenian,
    MesoArean,
    EuArean,

    Sokarian,
    Saturnian,
    Jovic,

    EoGaian,
    Cytherean,
}

impl BodyType {
    pub const ALL: [BodyType; 22] = [
        BodyType::AsteroidBelt,
        BodyType::VulcanianBelt,
        BodyType::IceBelt,
        BodyType::DustDisc,
        BodyType::PlanetesimalDisc,
        BodyType::Vulcanian,
        BodyType::Metallic,
        BodyType::Silicaceous,
        BodyType::Carbonaceous,
        BodyType::Gelidaceous,
        BodyType::Aggregate,
        BodyType::Ferrinian,
        BodyType::Janian,
        BodyType::Hermian,
        BodyType::Selenian,
        BodyType::MesoArean,
        BodyType::EuArean,
        BodyType::Sokarian,
        BodyType::Saturnian,
        BodyType::Jovic,
        BodyType::EoGaian,
        BodyType::Cytherean,
    ];

    pub fn group(self) -> BodyGroup {
        use BodyType::*;
        match self {
            AsteroidBelt | VulcanianBelt | IceBelt | DustDisc | PlanetesimalDisc => BodyGroup::Belt,
            Vulcanian | Metallic | Silicaceous | Carbonaceous | Gelidaceous | Aggregate => {
                BodyGroup::SmallBody
            }
            Ferrinian | Janian | Hermian | Selenian | MesoArean | EuArean => BodyGroup::Dwarf,
            Sokarian | Saturnian | Jovic => BodyGroup::Jovian,
            EoGaian | Cytherean => BodyGroup::Terrestrial,
        }
    }

    /// Bulk density relative to water. Belts have none of their own.
    pub fn density(self) -> f64 {
        use BodyType::*;
        match self {
            AsteroidBelt | VulcanianBelt | IceBelt | DustDisc | PlanetesimalDisc => 0.0,
            Vulcanian => 7.5,
            Metallic => 8.5,
            Silicaceous | Carbonaceous => 4.0,
            Gelidaceous | Aggregate => 2.0,
            Ferrinian => 7.0,
            Janian | Hermian => 6.0,
            Selenian => 3.0,
            MesoArean | EuArean => 5.0,
            Sokarian | Saturnian => 1.0,
            Jovic => 2.0,
            EoGaian | Cytherean => 5.5,
        }
    }

    /// Colour used when drawing the body on a system orbit map.
    pub fn colour(self) -> u32 {
        use BodyType::*;
        match self {
            AsteroidBelt => 0x777777,
            VulcanianBelt => 0x775555,
            IceBelt => 0xAAAAAA,
            DustDisc => 0xDDBBBB,
            PlanetesimalDisc => 0x997777,
            Gelidaceous => 0x555555,
            Vulcanian | Metallic | Silicaceous | Carbonaceous | Aggregate | Ferrinian => 0x333333,
            Janian | Hermian | Selenian => 0x444444,
            MesoArean | EuArean => 0x554444,
            Sokarian | Saturnian | Jovic => 0x777755,
            EoGaian | Cytherean => 0x557755,
        }
    }

    pub fn is_belt(self) -> bool {
        self.group() == BodyGroup::Belt
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::str::FromStr for BodyType {
    type Err = PlanetGenError;

    fn from_str(s: &str) -> Result<Self> {
        BodyType::ALL
            .into_iter()
            .find(|t| t.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PlanetGenError::NotFound(format!("no body type named [{s}]")))
    }
}

/// A generated celestial body.
///
/// Numeric setters clamp rather than reject: temperature never drops below 3K,
/// hydrographics stays within 0..=100 and the rest are floored at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    name: String,
    body_type: BodyType,
    /// Parent body name when this is a moon.
    moon_of: Option<String>,
    /// km from the star, or the signed offset from the parent for a moon.
    distance: i64,
    /// km; the ring width for belts.
    radius: i64,
    /// kg/m³.
    density: i32,
    temperature: i32,
    atmosphere: Atmosphere,
    pressure: i32,
    magnetic_field: MagneticField,
    /// Seconds.
    day_length: i64,
    hydrographics: i32,
    life: Life,
    features: HashSet<Feature>,
    resources: Vec<Resource>,
    pub moons: Vec<Body>,
    pub description: String,
}

impl Body {
    pub fn new(name: impl Into<String>, body_type: BodyType) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlanetGenError::invalid("body name must not be empty"));
        }
        Ok(Self {
            name,
            body_type,
            moon_of: None,
            distance: 0,
            radius: 0,
            density: 0,
            temperature: 3,
            atmosphere: Atmosphere::Vacuum,
            pressure: 0,
            magnetic_field: MagneticField::None,
            day_length: 0,
            hydrographics: 0,
            life: Life::None,
            features: HashSet::new(),
            resources: Vec::new(),
            moons: Vec::new(),
            description: String::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    pub fn group(&self) -> BodyGroup {
        self.body_type.group()
    }

    pub fn moon_of(&self) -> Option<&str> {
        self.moon_of.as_deref()
    }

    pub fn set_moon_of(&mut self, parent: impl Into<String>) {
        self.moon_of = Some(parent.into());
    }

    pub fn is_moon(&self) -> bool {
        self.moon_of.is_some()
    }

    pub fn distance(&self) -> i64 {
        self.distance
    }

    /// Planets sit at a non-negative distance; moons of a belt may lie inside
    /// the belt's centre line.
    pub fn set_distance(&mut self, km: i64) {
        self.distance = if self.is_moon() { km } else { km.max(0) };
    }

    pub fn radius(&self) -> i64 {
        self.radius
    }

    pub fn set_radius(&mut self, km: i64) {
        self.radius = km.max(0);
    }

    pub fn density(&self) -> i32 {
        self.density
    }

    pub fn set_density(&mut self, density: i32) {
        self.density = density.max(0);
    }

    pub fn temperature(&self) -> i32 {
        self.temperature
    }

    pub fn set_temperature(&mut self, kelvin: i32) {
        self.temperature = kelvin.max(Temperature::DeepSpace.kelvin());
    }

    pub fn atmosphere(&self) -> Atmosphere {
        self.atmosphere
    }

    pub fn set_atmosphere(&mut self, atmosphere: Atmosphere) {
        self.atmosphere = atmosphere;
    }

    pub fn pressure(&self) -> i32 {
        self.pressure
    }

    pub fn set_pressure(&mut self, pascals: i32) {
        self.pressure = pascals.max(0);
    }

    pub fn set_pressure_level(&mut self, pressure: Pressure) {
        self.pressure = pressure.pascals();
    }

    pub fn magnetic_field(&self) -> MagneticField {
        self.magnetic_field
    }

    pub fn set_magnetic_field(&mut self, field: MagneticField) {
        self.magnetic_field = field;
    }

    pub fn day_length(&self) -> i64 {
        self.day_length
    }

    pub fn set_day_length(&mut self, seconds: i64) {
        self.day_length = seconds.max(0);
    }

    pub fn hydrographics(&self) -> i32 {
        self.hydrographics
    }

    pub fn set_hydrographics(&mut self, percent: i32) {
        self.hydrographics = percent.clamp(0, 100);
    }

    pub fn life(&self) -> Life {
        self.life
    }

    pub fn set_life(&mut self, life: Life) {
        self.life = life;
    }

    pub fn add_feature(&mut self, feature: impl Into<Feature>) {
        self.features.insert(feature.into());
    }

    pub fn has_feature(&self, feature: impl Into<Feature>) -> bool {
        self.features.contains(&feature.into())
    }

    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Append `commodity` at `tier`, rolling its density from the tier's range.
    pub fn add_resource(&mut self, commodity: CommodityName, tier: Tier, dice: &mut dyn RandomSource) {
        let density = tier.roll_density(dice);
        self.resources.push(Resource::new(commodity, tier, density));
    }

    pub fn resource(&self, commodity: CommodityName) -> Option<&Resource> {
        self.resources.iter().find(|r| r.commodity == commodity)
    }

    pub fn add_primary_resource(&mut self, commodity: CommodityName, dice: &mut dyn RandomSource) {
        self.add_resource(commodity, Tier::Primary, dice);
    }

    pub fn add_secondary_resource(&mut self, commodity: CommodityName, dice: &mut dyn RandomSource) {
        self.add_resource(commodity, Tier::Secondary, dice);
    }

    pub fn add_tertiary_resource(&mut self, commodity: CommodityName, dice: &mut dyn RandomSource) {
        self.add_resource(commodity, Tier::Tertiary, dice);
    }

    pub fn add_trace_resource(&mut self, commodity: CommodityName, dice: &mut dyn RandomSource) {
        self.add_resource(commodity, Tier::Trace, dice);
    }
}
