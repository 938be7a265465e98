//! Dwarf terrestrial worlds: Mars, Mercury and Moon sized bodies.

use super::{GenerationContext, define, wrong_type};
use crate::body::{
    Atmosphere, Body, BodyType, DwarfFeature, MagneticField, MoonFeature, Pressure, Temperature,
};
use crate::dice::RandomSource;
use crate::error::Result;
use crate::resources::CommodityName::*;
use log::debug;

pub fn generate(
    ctx: &mut GenerationContext<'_>,
    name: &str,
    body_type: BodyType,
    dice: &mut dyn RandomSource,
) -> Result<Body> {
    match body_type {
        BodyType::EuArean => eu_arean(ctx, name, dice),
        BodyType::MesoArean => meso_arean(ctx, name, dice),
        BodyType::Ferrinian => ferrinian(ctx, name, dice),
        BodyType::Hermian => hermian(ctx, name, dice),
        BodyType::Janian => janian(ctx, name, dice),
        BodyType::Selenian => selenian(ctx, name, dice),
        other => Err(wrong_type("dwarf", other)),
    }
}

/// Trace to Thin, VeryThin being the most likely. Negative modifiers thin the
/// air, and ±5 forces either end.
pub fn determine_pressure(modifier: i64, dice: &mut dyn RandomSource) -> Pressure {
    match dice.roll(6) + modifier {
        ..=1 => Pressure::Trace,
        2..=5 => Pressure::VeryThin,
        _ => Pressure::Thin,
    }
}

/// The 2d6 landform table shared by the Arean worlds.
fn arean_feature(roll: i64) -> Option<DwarfFeature> {
    match roll {
        5 => Some(DwarfFeature::SouthCrater),
        6 => Some(DwarfFeature::EquatorialRidge),
        7 => Some(DwarfFeature::GreatRift),
        8 => Some(DwarfFeature::NorthCrater),
        _ => None,
    }
}

fn eu_arean(ctx: &GenerationContext<'_>, name: &str, dice: &mut dyn RandomSource) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::EuArean, dice)?;
    body.set_radius(2800 + dice.roll_n(500, 2));
    body.set_atmosphere(Atmosphere::CarbonDioxide);
    let pressure = determine_pressure(-2, dice);
    body.set_pressure_level(pressure);
    body.set_magnetic_field(MagneticField::None);

    let roll = dice.roll_n(6, 2);
    if let Some(feature) = arean_feature(roll) {
        body.add_feature(feature);
    } else if roll == 9 {
        body.add_feature(DwarfFeature::BrokenRifts);
    }

    body.add_primary_resource(SilicateOre, dice);
    body.add_secondary_resource(SilicateCrystals, dice);
    body.add_tertiary_resource(FerricOre, dice);
    body.add_trace_resource(Water, dice);
    Ok(body)
}

fn meso_arean(ctx: &GenerationContext<'_>, name: &str, dice: &mut dyn RandomSource) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::MesoArean, dice)?;
    body.set_radius(2800 + dice.roll_n(500, 2));
    body.set_atmosphere(Atmosphere::CarbonDioxide);
    let pressure = determine_pressure(0, dice);
    body.set_pressure_level(pressure);
    body.set_magnetic_field(MagneticField::Minimal);

    let hydrographics = match body.pressure() {
        ..1_000 => 0,
        1_000..10_000 => dice.roll(4),
        10_000..30_000 => {
            body.set_magnetic_field(MagneticField::VeryWeak);
            dice.roll_n(6, 3)
        }
        _ => dice.roll_n(8, 3),
    };
    body.set_hydrographics(hydrographics as i32);

    if let Some(feature) = arean_feature(dice.roll_n(6, 2)) {
        body.add_feature(feature);
    }

    body.add_primary_resource(SilicateOre, dice);
    body.add_secondary_resource(SilicateCrystals, dice);
    body.add_tertiary_resource(FerricOre, dice);
    body.add_tertiary_resource(Water, dice);
    Ok(body)
}

fn ferrinian(ctx: &GenerationContext<'_>, name: &str, dice: &mut dyn RandomSource) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::Ferrinian, dice)?;
    body.set_radius(1500 + dice.roll_n(400, 2));
    body.set_atmosphere(Atmosphere::Vacuum);
    body.set_pressure_level(Pressure::None);
    body.set_magnetic_field(match dice.roll_n(6, 3) {
        ..=3 => MagneticField::Weak,
        4..=5 => MagneticField::VeryWeak,
        6..=8 => MagneticField::Minimal,
        _ => MagneticField::None,
    });

    let feature = match dice.roll_n(6, 3) {
        8 => Some(DwarfFeature::BrokenRifts),
        9 => Some(DwarfFeature::GreatRift),
        10 => Some(DwarfFeature::NorthCrater),
        11 => Some(DwarfFeature::SouthCrater),
        12 => Some(DwarfFeature::NaturalHoneyComb),
        13 => Some(DwarfFeature::ArtificialHoneyComb),
        _ => None,
    };
    if let Some(feature) = feature {
        body.add_feature(feature);
    }

    body.add_primary_resource(SilicateOre, dice);
    body.add_tertiary_resource(SilicateCrystals, dice);
    body.add_primary_resource(FerricOre, dice);
    body.add_primary_resource(HeavyMetals, dice);
    body.add_secondary_resource(Radioactives, dice);
    body.add_secondary_resource(PreciousMetals, dice);
    Ok(body)
}

fn hermian(ctx: &GenerationContext<'_>, name: &str, dice: &mut dyn RandomSource) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::Hermian, dice)?;
    body.set_radius(2000 + dice.roll_n(500, 2));
    body.set_atmosphere(Atmosphere::Vacuum);
    body.set_pressure(0);

    match dice.roll_n(6, 3) {
        ..=4 => {
            body.set_magnetic_field(MagneticField::VeryWeak);
            if dice.roll(3) == 1 {
                body.set_atmosphere(Atmosphere::InertGases);
                body.set_pressure((50 + dice.roll(100)) as i32);
            }
        }
        5..=7 => body.set_magnetic_field(MagneticField::Minimal),
        _ => body.set_magnetic_field(MagneticField::None),
    }

    add_hermian_features(&mut body, dice);

    let metallic = body.has_feature(DwarfFeature::MetallicSea)
        || body.has_feature(DwarfFeature::MetallicLakes);
    if metallic && dice.roll(2) == 1 {
        debug!("{} outgasses from its molten surface", body.name());
        body.set_atmosphere(Atmosphere::Exotic);
        body.set_pressure((50 + dice.roll_n(100, 2)) as i32);
    }

    body.add_primary_resource(SilicateOre, dice);
    body.add_secondary_resource(SilicateCrystals, dice);
    body.add_secondary_resource(FerricOre, dice);
    if metallic {
        body.add_primary_resource(HeavyMetals, dice);
    } else {
        body.add_secondary_resource(HeavyMetals, dice);
    }
    body.add_tertiary_resource(Radioactives, dice);
    body.add_tertiary_resource(PreciousMetals, dice);
    Ok(body)
}

/// Hot worlds may pool molten metal; anything else falls through to landforms.
fn add_hermian_features(body: &mut Body, dice: &mut dyn RandomSource) {
    if body.temperature() > Temperature::LeadMelts.kelvin() {
        match dice.roll(6) {
            1 => return body.add_feature(DwarfFeature::MetallicSea),
            2..=3 => return body.add_feature(DwarfFeature::MetallicLakes),
            _ => {}
        }
    }
    let feature = match dice.roll_n(6, 2) {
        5 => Some(DwarfFeature::SouthCrater),
        6 => Some(DwarfFeature::EquatorialRidge),
        8 => Some(DwarfFeature::GreatRift),
        9 => Some(DwarfFeature::NorthCrater),
        10 => Some(DwarfFeature::BrokenRifts),
        11 => Some(DwarfFeature::ReMelted),
        _ => None,
    };
    if let Some(feature) = feature {
        body.add_feature(feature);
    }
}

/// Tidally locked to its star, so a day lasts a full orbit.
fn janian(ctx: &GenerationContext<'_>, name: &str, dice: &mut dyn RandomSource) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::Janian, dice)?;
    body.set_radius(1500 + dice.roll_n(800, 3));
    body.set_atmosphere(Atmosphere::Vacuum);
    body.set_pressure_level(Pressure::None);

    let (field, outgassing) = match dice.roll_n(6, 3) {
        ..=3 => (MagneticField::Weak, 2),
        4..=5 => (MagneticField::VeryWeak, 3),
        6..=7 => (MagneticField::Minimal, 0),
        _ => (MagneticField::None, 0),
    };
    body.set_magnetic_field(field);
    if outgassing > 0 && dice.roll(outgassing) == 1 {
        body.set_atmosphere(Atmosphere::InertGases);
        body.set_pressure_level(Pressure::Trace);
    }

    body.set_day_length(ctx.star.orbital_period(body.distance()));

    if dice.roll(2) == 1 {
        body.add_feature(DwarfFeature::NightsideIce);
        if dice.roll(2) == 1 {
            body.set_atmosphere(Atmosphere::WaterVapour);
            body.set_pressure_level(Pressure::Trace);
        }
    }

    body.add_primary_resource(SilicateOre, dice);
    body.add_secondary_resource(SilicateCrystals, dice);
    body.add_secondary_resource(FerricOre, dice);
    body.add_secondary_resource(HeavyMetals, dice);
    body.add_tertiary_resource(Radioactives, dice);
    body.add_tertiary_resource(PreciousMetals, dice);
    body.add_tertiary_resource(Water, dice);
    Ok(body)
}

fn selenian(ctx: &GenerationContext<'_>, name: &str, dice: &mut dyn RandomSource) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::Selenian, dice)?;
    let mut radius = 1200 + dice.roll(600);
    if body.has_feature(MoonFeature::SmallMoon) {
        radius /= 2;
    } else if body.has_feature(MoonFeature::LargeMoon) {
        radius = radius * 3 / 2;
    }
    body.set_radius(radius);
    body.set_atmosphere(Atmosphere::Vacuum);
    body.set_pressure_level(Pressure::None);
    body.set_magnetic_field(MagneticField::None);

    body.add_secondary_resource(SilicateOre, dice);
    body.add_tertiary_resource(SilicateCrystals, dice);
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::AU;
    use crate::dice::{Dice, ScriptedDice};
    use crate::generator::test_support::{distance_for_kelvin, sol};
    use crate::resources::Tier;
    use rstest::rstest;

    #[rstest]
    #[case(1, 0, Pressure::Trace)]
    #[case(2, 0, Pressure::VeryThin)]
    #[case(5, 0, Pressure::VeryThin)]
    #[case(6, 0, Pressure::Thin)]
    #[case(3, -2, Pressure::Trace)]
    #[case(6, -5, Pressure::Trace)]
    #[case(1, 5, Pressure::Thin)]
    fn test_determine_pressure(#[case] roll: i64, #[case] modifier: i64, #[case] expected: Pressure) {
        let mut dice = ScriptedDice::new(&[roll]);
        assert_eq!(determine_pressure(modifier, &mut dice), expected);
    }

    #[test]
    fn test_janian_day_is_its_year() {
        let star = sol();
        for seed in 0..5 {
            let mut ctx = GenerationContext::new(&star, AU / 3);
            let body = generate(&mut ctx, "Janus", BodyType::Janian, &mut Dice::seeded(seed)).unwrap();
            assert_eq!(body.day_length(), star.orbital_period(AU / 3));
            assert!((1503..=3900).contains(&body.radius()));
        }
    }

    #[rstest]
    #[case(MoonFeature::SmallMoon, 600..=900)]
    #[case(MoonFeature::LargeMoon, 1801..=2700)]
    #[case(MoonFeature::TidallyLocked, 1201..=1800)]
    fn test_selenian_moon_size(
        #[case] feature: MoonFeature,
        #[case] range: std::ops::RangeInclusive<i64>,
    ) {
        let star = sol();
        for seed in 0..10 {
            let mut ctx = GenerationContext::new(&star, AU).with_feature(feature);
            let body = generate(&mut ctx, "Luna", BodyType::Selenian, &mut Dice::seeded(seed)).unwrap();
            assert!(range.contains(&body.radius()), "{feature:?}: {}", body.radius());
            assert_eq!(body.atmosphere(), Atmosphere::Vacuum);
        }
    }

    #[test]
    fn test_selenian_small_moon_halves_radius() {
        let star = sol();
        let mut ctx = GenerationContext::new(&star, AU).with_feature(MoonFeature::SmallMoon);
        // define takes five dice, then d600.
        let mut dice = ScriptedDice::new(&[1, 1, 1, 1, 1, 400]);
        let body = generate(&mut ctx, "Luna", BodyType::Selenian, &mut dice).unwrap();
        assert_eq!(body.radius(), 800);
    }

    #[test]
    fn test_hot_hermian_can_have_metallic_sea() {
        let star = sol();
        let mut ctx = GenerationContext::new(&star, distance_for_kelvin(900));
        // define, radius 2d500, field 3d6 = 18, then d6 = 1 sea and d2 = 1 outgassing.
        let mut rolls = vec![1; 5 + 2];
        rolls.extend([6, 6, 6, 1, 1]);
        let mut dice = ScriptedDice::new(&rolls);
        let body = generate(&mut ctx, "Vulcan", BodyType::Hermian, &mut dice).unwrap();
        assert!(body.has_feature(DwarfFeature::MetallicSea));
        assert_eq!(body.atmosphere(), Atmosphere::Exotic);
        assert_eq!(body.pressure(), 52);
        assert_eq!(body.resource(HeavyMetals).map(|r| r.tier), Some(Tier::Primary));
        assert_eq!(body.magnetic_field(), MagneticField::None);
    }

    #[test]
    fn test_cool_hermian_never_has_metal() {
        let star = sol();
        for seed in 0..20 {
            let mut ctx = GenerationContext::new(&star, distance_for_kelvin(400));
            let body = generate(&mut ctx, "Cold", BodyType::Hermian, &mut Dice::seeded(seed)).unwrap();
            assert!(!body.has_feature(DwarfFeature::MetallicSea));
            assert!(!body.has_feature(DwarfFeature::MetallicLakes));
            assert_eq!(body.resource(HeavyMetals).map(|r| r.tier), Some(Tier::Secondary));
        }
    }

    #[rstest]
    #[case(1, 0)]
    #[case(3, 3)]
    #[case(6, 9)]
    fn test_meso_arean_water_follows_pressure(#[case] pressure_roll: i64, #[case] water_low: i32) {
        let star = sol();
        let mut ctx = GenerationContext::new(&star, AU + AU / 2);
        let mut rolls = vec![1; 5 + 2];
        rolls.push(pressure_roll);
        let mut dice = ScriptedDice::with_fallback(&rolls, 3);
        let body = generate(&mut ctx, "Ares", BodyType::MesoArean, &mut dice).unwrap();
        assert!(body.hydrographics() >= water_low);
        assert_eq!(body.atmosphere(), Atmosphere::CarbonDioxide);
    }

    #[test]
    fn test_eu_arean_broken_rifts() {
        let star = sol();
        let mut ctx = GenerationContext::new(&star, AU + AU / 2);
        let mut rolls = vec![1; 5 + 2];
        rolls.extend([6, 4, 5]);
        let mut dice = ScriptedDice::new(&rolls);
        let body = generate(&mut ctx, "Ares", BodyType::EuArean, &mut dice).unwrap();
        assert!(body.has_feature(DwarfFeature::BrokenRifts));
        assert_eq!(body.pressure(), Pressure::VeryThin.pascals());
        assert_eq!(body.magnetic_field(), MagneticField::None);
    }

    #[test]
    fn test_ferrinian_honeycomb() {
        let star = sol();
        let mut ctx = GenerationContext::new(&star, AU);
        let mut rolls = vec![1; 5 + 2];
        rolls.extend([1, 1, 1, 6, 6, 1]);
        let mut dice = ScriptedDice::new(&rolls);
        let body = generate(&mut ctx, "Iron", BodyType::Ferrinian, &mut dice).unwrap();
        assert_eq!(body.magnetic_field(), MagneticField::Weak);
        assert!(body.has_feature(DwarfFeature::ArtificialHoneyComb));
        assert_eq!(body.resource(FerricOre).map(|r| r.tier), Some(Tier::Primary));
    }

    #[test]
    fn test_wrong_type() {
        let star = sol();
        let mut ctx = GenerationContext::new(&star, AU);
        assert!(generate(&mut ctx, "X", BodyType::Cytherean, &mut Dice::seeded(1)).is_err());
    }
}
