//! Body generators.
//!
//! Every [`BodyType`] has a generator reached through [`BodyType::generate`].
//! Generators share the scaffolding in this module: [`define`] builds the
//! default body, [`check_distance`] pushes belts clear of the previous body.

pub mod belt;
pub mod dwarf;
pub mod jovian;
pub mod small_body;
pub mod terrestrial;

use crate::body::{Atmosphere, Body, BodyGroup, BodyType, Feature, Life, MagneticField};
use crate::constants::STANDARD_DAY;
use crate::dice::RandomSource;
use crate::error::{PlanetGenError, Result};
use crate::physics;
use crate::star::Star;
use log::{debug, info};

/// Where the previous body in the system sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub distance: i64,
    pub radius: i64,
}

impl From<&Body> for Placement {
    fn from(body: &Body) -> Self {
        Self {
            distance: body.distance(),
            radius: body.radius(),
        }
    }
}

/// Everything a generator needs to place one body.
#[derive(Debug, Clone)]
pub struct GenerationContext<'a> {
    pub star: &'a Star,
    pub previous: Option<Placement>,
    /// Target distance in km. Belts may push this outward while generating.
    pub distance: i64,
    /// Parent's distance from the star when generating a moon, otherwise 0.
    pub parent_distance: i64,
    pub parent: Option<String>,
    /// Features the caller wants applied regardless of rolls.
    pub features: Vec<Feature>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(star: &'a Star, distance: i64) -> Self {
        Self {
            star,
            previous: None,
            distance,
            parent_distance: 0,
            parent: None,
            features: Vec::new(),
        }
    }

    pub fn after(mut self, previous: impl Into<Placement>) -> Self {
        self.previous = Some(previous.into());
        self
    }

    pub fn with_feature(mut self, feature: impl Into<Feature>) -> Self {
        self.features.push(feature.into());
        self
    }

    /// Context for a moon at `offset` km from `parent`.
    pub fn for_moon(star: &'a Star, parent: &Body, offset: i64) -> Self {
        Self {
            star,
            previous: None,
            distance: offset,
            parent_distance: parent.distance(),
            parent: Some(parent.name().to_string()),
            features: Vec::new(),
        }
    }

    pub fn previous_distance(&self) -> i64 {
        self.previous.map(|p| p.distance).unwrap_or(0)
    }

    /// Distance from the star, summing the parent's distance for moons.
    pub fn stellar_distance(&self) -> i64 {
        self.distance + self.parent_distance
    }
}

impl BodyType {
    /// Generate a body of this type. Moons are not included, see
    /// [`generate_moons`].
    pub fn generate(
        self,
        ctx: &mut GenerationContext<'_>,
        name: &str,
        dice: &mut dyn RandomSource,
    ) -> Result<Body> {
        let body = match self.group() {
            BodyGroup::Belt => belt::generate(ctx, name, self, dice),
            BodyGroup::SmallBody => small_body::generate(ctx, name, self, dice),
            BodyGroup::Dwarf => dwarf::generate(ctx, name, self, dice),
            BodyGroup::Jovian => jovian::generate(ctx, name, self, dice),
            BodyGroup::Terrestrial => terrestrial::generate(ctx, name, self, dice),
        }?;
        info!(
            "Generated {} [{}] at {}km, radius {}km, {}K",
            self,
            body.name(),
            body.distance(),
            body.radius(),
            body.temperature()
        );
        Ok(body)
    }
}

/// Generate `body_type` and then its moons, attaching them to the body.
pub fn generate_with_moons(
    body_type: BodyType,
    ctx: &mut GenerationContext<'_>,
    name: &str,
    dice: &mut dyn RandomSource,
) -> Result<Body> {
    let mut body = body_type.generate(ctx, name, dice)?;
    body.moons = generate_moons(&body, ctx.star, dice)?;
    Ok(body)
}

/// Moons for an already generated body. Types without moons give none.
pub fn generate_moons(
    primary: &Body,
    star: &Star,
    dice: &mut dyn RandomSource,
) -> Result<Vec<Body>> {
    match primary.body_type() {
        BodyType::AsteroidBelt | BodyType::IceBelt => belt::moons(primary, star, dice),
        BodyType::EoGaian | BodyType::Cytherean => terrestrial::moons(primary, star, dice),
        _ => Ok(Vec::new()),
    }
}

/// `Sol IV` + 1 gives `Sol IVa`.
pub fn moon_name(parent: &str, index: usize) -> String {
    let letters = b"abcdefghijklmnopqrstuvwxyz";
    let mut suffix = String::new();
    let mut i = index.saturating_sub(1);
    loop {
        suffix.insert(0, letters[i % 26] as char);
        if i < 26 {
            break;
        }
        i = i / 26 - 1;
    }
    format!("{parent}{suffix}")
}

/// Create the default body for `body_type`, before any type-specific rules.
pub fn define(
    ctx: &GenerationContext<'_>,
    name: &str,
    body_type: BodyType,
    dice: &mut dyn RandomSource,
) -> Result<Body> {
    let mut body = Body::new(name, body_type)?;
    if let Some(parent) = &ctx.parent {
        body.set_moon_of(parent.clone());
    }
    body.set_distance(ctx.distance);
    body.set_radius(500 + dice.roll(100) * 10);
    body.set_temperature(physics::star_orbit_temperature(
        ctx.star,
        ctx.stellar_distance(),
    )?);
    body.set_atmosphere(Atmosphere::Vacuum);
    body.set_pressure(0);
    body.set_magnetic_field(MagneticField::None);
    body.set_life(Life::None);
    body.set_day_length(STANDARD_DAY * (36 + dice.roll_n(12, 4)));
    modify_temperature_by_rotation(&mut body);

    let density = body_type.density();
    if density > 0.0 {
        body.set_density((1000.0 * density) as i32);
    } else {
        body.set_density(1000);
    }
    for feature in &ctx.features {
        body.add_feature(*feature);
    }
    body.description = "Unexplored.".to_string();
    Ok(body)
}

/// Slow rotators get a longer effective day.
pub fn modify_temperature_by_rotation(body: &mut Body) {
    let day = body.day_length();
    if day > STANDARD_DAY {
        let modifier = 1.0 + (day as f64 / STANDARD_DAY as f64).sqrt() / 10.0;
        body.set_day_length((modifier * day as f64) as i64);
    }
}

/// Keep a body of `radius` clear of the previous one, moving `ctx.distance`
/// outward if needed, and cap the radius at a third of the distance.
pub fn check_distance(ctx: &mut GenerationContext<'_>, radius: i64) -> i64 {
    let clearance = ctx.previous_distance() + (radius as f64 * 1.3) as i64;
    if clearance > ctx.distance {
        debug!("Pushing body out from {}km to {}km", ctx.distance, clearance);
        ctx.distance = clearance;
    }
    radius.min(ctx.distance / 3)
}

pub(crate) fn wrong_type(family: &str, body_type: BodyType) -> PlanetGenError {
    PlanetGenError::invalid(format!("{family} generator does not support type [{body_type}]"))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BeltFeature, MoonFeature};
    use crate::constants::{AU, MKM};
    use crate::dice::{Dice, ScriptedDice};
    use rstest::rstest;

    #[test]
    fn test_define_sets_defaults() {
        let sol = Star::sol();
        let ctx = GenerationContext::new(&sol, AU).with_feature(MoonFeature::SmallMoon);
        let mut dice = Dice::seeded(1);
        let body = define(&ctx, "Terra", BodyType::Selenian, &mut dice).unwrap();
        assert_eq!(body.temperature(), 280);
        assert_eq!(body.distance(), AU);
        assert_eq!(body.density(), 3000);
        assert!((510..=1500).contains(&body.radius()));
        assert!(body.day_length() > 40 * STANDARD_DAY);
        assert!(body.has_feature(MoonFeature::SmallMoon));
        assert_eq!(body.description, "Unexplored.");
        assert_eq!(body.life(), Life::None);
    }

    #[test]
    fn test_define_rejects_empty_name_and_zero_distance() {
        let sol = Star::sol();
        let mut dice = Dice::seeded(1);
        let ctx = GenerationContext::new(&sol, AU);
        assert!(define(&ctx, "", BodyType::Jovic, &mut dice).is_err());
        let ctx = GenerationContext::new(&sol, 0);
        assert!(matches!(
            define(&ctx, "Nowhere", BodyType::Jovic, &mut dice),
            Err(PlanetGenError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_belts_default_to_water_density() {
        let sol = Star::sol();
        let ctx = GenerationContext::new(&sol, AU);
        let body = define(&ctx, "Ring", BodyType::DustDisc, &mut Dice::seeded(3)).unwrap();
        assert_eq!(body.density(), 1000);
    }

    #[test]
    fn test_rotation_stretches_long_days() {
        let mut body = Body::new("Slow", BodyType::Hermian).unwrap();
        body.set_day_length(4 * STANDARD_DAY);
        modify_temperature_by_rotation(&mut body);
        assert!((body.day_length() - 414_720).abs() <= 1, "{}", body.day_length());

        body.set_day_length(STANDARD_DAY / 2);
        modify_temperature_by_rotation(&mut body);
        assert_eq!(body.day_length(), STANDARD_DAY / 2);
    }

    #[rstest]
    #[case(None, 100 * MKM, 10 * MKM, 100 * MKM, 10 * MKM)]
    #[case(None, 30 * MKM, 20 * MKM, 30 * MKM, 10 * MKM)]
    #[case(Some(95 * MKM), 100 * MKM, 10 * MKM, 108 * MKM, 10 * MKM)]
    #[case(Some(200 * MKM), 100 * MKM, 100 * MKM, 330 * MKM, 100 * MKM)]
    fn test_check_distance(
        #[case] previous: Option<i64>,
        #[case] distance: i64,
        #[case] radius: i64,
        #[case] new_distance: i64,
        #[case] new_radius: i64,
    ) {
        let sol = Star::sol();
        let mut ctx = GenerationContext::new(&sol, distance);
        ctx.previous = previous.map(|d| Placement {
            distance: d,
            radius: 0,
        });
        assert_eq!(check_distance(&mut ctx, radius), new_radius);
        assert_eq!(ctx.distance, new_distance);
    }

    #[test]
    fn test_moon_names() {
        assert_eq!(moon_name("Sol IV", 1), "Sol IVa");
        assert_eq!(moon_name("Sol IV", 3), "Sol IVc");
        assert_eq!(moon_name("Belt", 27), "Beltaa");
    }

    #[test]
    fn test_every_type_generates() {
        let sol = Star::sol();
        for (i, body_type) in BodyType::ALL.into_iter().enumerate() {
            let mut dice = Dice::seeded(i as u64);
            let mut ctx = GenerationContext::new(&sol, 2 * AU);
            let body = generate_with_moons(body_type, &mut ctx, "Test", &mut dice).unwrap();
            assert_eq!(body.body_type(), body_type);
            assert!(body.radius() > 0, "{body_type} has no radius");
            assert!(body.resources().iter().all(|r| r.density() >= 1));
            assert!((0..=100).contains(&body.hydrographics()));
            for moon in &body.moons {
                assert_eq!(moon.moon_of(), Some("Test"));
                assert!(moon.radius() > 0);
            }
        }
    }

    #[test]
    fn test_prespecified_features_survive() {
        let sol = Star::sol();
        let mut ctx = GenerationContext::new(&sol, 3 * AU).with_feature(BeltFeature::ThinRing);
        let mut dice = ScriptedDice::with_fallback(&[], 3);
        let body = BodyType::DustDisc.generate(&mut ctx, "Disc", &mut dice).unwrap();
        assert!(body.has_feature(BeltFeature::ThinRing));
    }
}
