//! Earth-sized worlds, including the early Gaian types most likely to carry life.

use super::{GenerationContext, define, moon_name, wrong_type};
use crate::body::{
    Atmosphere, Body, BodyType, Life, MagneticField, MoonFeature, Pressure, TerrestrialFeature,
};
use crate::dice::RandomSource;
use crate::error::{PlanetGenError, Result};
use crate::resources::CommodityName::*;
use crate::star::Star;
use log::debug;

pub fn generate(
    ctx: &mut GenerationContext<'_>,
    name: &str,
    body_type: BodyType,
    dice: &mut dyn RandomSource,
) -> Result<Body> {
    match body_type {
        BodyType::EoGaian => eo_gaian(ctx, name, dice),
        BodyType::Cytherean => cytherean(ctx, name, dice),
        other => Err(wrong_type("terrestrial", other)),
    }
}

/// Radius, atmosphere, day length, pressure and magnetic field shared by the
/// temperate terrestrial types. Thicker air warms the surface.
fn set_terrestrial_properties(body: &mut Body, dice: &mut dyn RandomSource) {
    body.set_radius(5500 + dice.roll_n(1000, 2));
    body.set_atmosphere(Atmosphere::NitrogenCompounds);
    body.set_day_length(20 * 3600 + dice.roll_n(7200, 4));

    let (pressure, warming) = match dice.roll_n(6, 2) + body.radius() / 1000 - 6 {
        ..=1 => (Pressure::VeryThin, 1.01),
        2..=4 => (Pressure::Thin, 1.03),
        5..=9 => (Pressure::Standard, 1.05),
        _ => (Pressure::Dense, 1.10),
    };
    body.set_pressure_level(pressure);
    body.set_temperature((body.temperature() as f64 * warming) as i32);

    body.set_magnetic_field(match dice.roll_n(6, 2) {
        ..=2 => MagneticField::Minimal,
        3..=4 => MagneticField::VeryWeak,
        5..=7 => MagneticField::Weak,
        _ => MagneticField::Standard,
    });
}

fn eo_gaian(ctx: &GenerationContext<'_>, name: &str, dice: &mut dyn RandomSource) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::EoGaian, dice)?;
    set_terrestrial_properties(&mut body, dice);

    // Volcanic activity.
    body.set_temperature((body.temperature() as f64 * 1.05) as i32);
    body.set_hydrographics(dice.roll_n(20, 2) as i32);

    match dice.roll_n(6, 2) {
        ..=3 => {
            body.set_life(Life::None);
            body.add_primary_resource(OrganicChemicals, dice);
        }
        4..=5 => {
            body.set_life(Life::Organic);
            body.add_primary_resource(OrganicChemicals, dice);
            body.add_secondary_resource(Protobionts, dice);
        }
        6..=7 => {
            body.set_life(Life::Organic);
            body.add_secondary_resource(OrganicChemicals, dice);
            body.add_primary_resource(Protobionts, dice);
        }
        8..=9 => {
            body.set_life(Life::Organic);
            body.add_secondary_resource(OrganicChemicals, dice);
            body.add_primary_resource(Protobionts, dice);
            body.add_trace_resource(Prokaryotes, dice);
        }
        10 => {
            body.set_life(Life::Archaean);
            body.add_tertiary_resource(OrganicChemicals, dice);
            body.add_secondary_resource(Protobionts, dice);
            body.add_primary_resource(Prokaryotes, dice);
        }
        11 => {
            body.set_life(Life::Archaean);
            body.add_tertiary_resource(OrganicChemicals, dice);
            body.add_tertiary_resource(Protobionts, dice);
            body.add_primary_resource(Prokaryotes, dice);
            body.add_trace_resource(Cyanobacteria, dice);
        }
        _ => {
            body.set_life(Life::Archaean);
            body.add_tertiary_resource(Protobionts, dice);
            body.add_primary_resource(Prokaryotes, dice);
            body.add_tertiary_resource(Cyanobacteria, dice);
        }
    }

    match dice.roll_n(6, 3) {
        3..=4 => body.add_feature(TerrestrialFeature::BacterialMats),
        5 => body.add_feature(TerrestrialFeature::BorderedInBlack),
        6 => body.add_feature(TerrestrialFeature::BorderedInGreen),
        7 => body.add_feature(TerrestrialFeature::VolcanicFlats),
        _ => {}
    }

    body.add_secondary_resource(SilicateOre, dice);
    body.add_secondary_resource(SilicateCrystals, dice);
    body.add_secondary_resource(CarbonicOre, dice);
    body.add_tertiary_resource(FerricOre, dice);
    body.add_primary_resource(OrganicGases, dice);
    body.add_primary_resource(Water, dice);
    Ok(body)
}

/// Venus-like hothouse. Keeps the default radius from [`define`].
fn cytherean(ctx: &GenerationContext<'_>, name: &str, dice: &mut dyn RandomSource) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::Cytherean, dice)?;
    body.set_temperature(body.temperature() * 2);
    body.set_hydrographics(0);
    body.set_pressure((100_000 * (70 + dice.roll_n(20, 2))) as i32);
    body.set_atmosphere(Atmosphere::CarbonDioxide);

    let (day, field) = match dice.roll(6) {
        1..=3 => (72_000 + dice.roll_n(14_400, 2), MagneticField::Standard),
        4..=5 => (36_000 + dice.roll(28_800), MagneticField::Strong),
        _ => (86_400 + dice.roll(864_000), MagneticField::Weak),
    };
    body.set_day_length(day);
    body.set_magnetic_field(field);

    body.add_secondary_resource(SilicateOre, dice);
    body.add_secondary_resource(SilicateCrystals, dice);
    body.add_tertiary_resource(CarbonicOre, dice);
    body.add_tertiary_resource(FerricOre, dice);
    Ok(body)
}

/// At most one Selenian moon, generated in full around `primary`.
pub fn moons(primary: &Body, star: &Star, dice: &mut dyn RandomSource) -> Result<Vec<Body>> {
    if !matches!(primary.body_type(), BodyType::EoGaian | BodyType::Cytherean) {
        return Err(PlanetGenError::invalid(format!(
            "terrestrial moons do not apply to [{}]",
            primary.body_type()
        )));
    }

    let mut ctx = match dice.roll(6) {
        1..=3 => return Ok(Vec::new()),
        4..=5 => {
            let offset = (150 + dice.roll_n(50, 2)) * 1000 + dice.roll(1000);
            GenerationContext::for_moon(star, primary, offset)
                .with_feature(MoonFeature::SmallMoon)
                .with_feature(MoonFeature::TidallyLocked)
        }
        _ => {
            let offset = (300 + dice.roll_n(100, 2)) * 1000 + dice.roll(1000);
            let lock = if dice.roll(3) == 1 {
                MoonFeature::AlmostLocked
            } else {
                MoonFeature::TidallyLocked
            };
            GenerationContext::for_moon(star, primary, offset).with_feature(lock)
        }
    };
    let name = moon_name(primary.name(), 1);
    debug!("{} gains moon {name} at {}km", primary.name(), ctx.distance);
    let moon = BodyType::Selenian.generate(&mut ctx, &name, dice)?;
    Ok(vec![moon])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{AU, STANDARD_DAY};
    use crate::dice::{Dice, ScriptedDice};
    use crate::generator::test_support::sol;
    use crate::resources::{CommodityName, Tier};
    use rstest::rstest;

    fn tier(body: &Body, commodity: CommodityName) -> Option<Tier> {
        body.resource(commodity).map(|r| r.tier)
    }

    // define() takes five dice (d100 radius, 4d12 day), then radius 2d1000,
    // day 4d7200, pressure 2d6, field 2d6, hydrographics 2d20.
    fn eo_gaian_script(life: [i64; 2]) -> Vec<i64> {
        let mut rolls = vec![1; 5 + 2 + 4];
        rolls.extend([3, 3]); // pressure: 6 + 5 - 6 = 5, Standard
        rolls.extend([4, 4]); // field: 8, Standard
        rolls.extend([10, 10]); // hydrographics
        rolls.extend(life);
        rolls
    }

    #[rstest]
    #[case([1, 1], Life::None, vec![(OrganicChemicals, Tier::Primary)])]
    #[case([2, 3], Life::Organic, vec![(OrganicChemicals, Tier::Primary), (Protobionts, Tier::Secondary)])]
    #[case([4, 4], Life::Organic, vec![(OrganicChemicals, Tier::Secondary), (Prokaryotes, Tier::Trace)])]
    #[case([5, 5], Life::Archaean, vec![(OrganicChemicals, Tier::Tertiary), (Prokaryotes, Tier::Primary)])]
    #[case([5, 6], Life::Archaean, vec![(Protobionts, Tier::Tertiary), (Cyanobacteria, Tier::Trace)])]
    #[case([6, 6], Life::Archaean, vec![(Cyanobacteria, Tier::Tertiary), (Prokaryotes, Tier::Primary)])]
    fn test_eo_gaian_life_sets_resources(
        #[case] life_roll: [i64; 2],
        #[case] life: Life,
        #[case] expected: Vec<(CommodityName, Tier)>,
    ) {
        let star = sol();
        let mut ctx = GenerationContext::new(&star, AU);
        let mut dice = ScriptedDice::new(&eo_gaian_script(life_roll));
        let body = generate(&mut ctx, "Eden", BodyType::EoGaian, &mut dice).unwrap();
        assert_eq!(body.life(), life);
        for (commodity, t) in expected {
            assert_eq!(tier(&body, commodity), Some(t), "{commodity:?}");
        }
        assert_eq!(body.hydrographics(), 20);
        assert_eq!(body.pressure(), Pressure::Standard.pascals());
        assert_eq!(body.magnetic_field(), MagneticField::Standard);
        assert_eq!(tier(&body, Water), Some(Tier::Primary));
    }

    #[test]
    fn test_eo_gaian_without_life_has_no_organisms() {
        let star = sol();
        let mut ctx = GenerationContext::new(&star, AU);
        let mut dice = ScriptedDice::new(&eo_gaian_script([1, 1]));
        let body = generate(&mut ctx, "Eden", BodyType::EoGaian, &mut dice).unwrap();
        assert!(body.resource(Protobionts).is_none());
        assert!(body.resource(Prokaryotes).is_none());
    }

    #[test]
    fn test_eo_gaian_is_warmed() {
        let star = sol();
        let mut ctx = GenerationContext::new(&star, AU);
        let mut dice = ScriptedDice::new(&eo_gaian_script([1, 1]));
        let body = generate(&mut ctx, "Eden", BodyType::EoGaian, &mut dice).unwrap();
        // 280K, Standard pressure ×1.05 then volcanic ×1.05.
        assert_eq!(body.temperature(), 308);
        assert_eq!(body.radius(), 5502);
        assert_eq!(body.day_length(), 72_004);
    }

    #[test]
    fn test_cytherean_is_a_hothouse() {
        let star = sol();
        for seed in 0..10 {
            let mut ctx = GenerationContext::new(&star, AU);
            let body = generate(&mut ctx, "Venus", BodyType::Cytherean, &mut Dice::seeded(seed)).unwrap();
            assert_eq!(body.temperature(), 560);
            assert_eq!(body.hydrographics(), 0);
            assert!((7_200_000..=11_000_000).contains(&body.pressure()));
            assert_eq!(body.atmosphere(), Atmosphere::CarbonDioxide);
            assert!((510..=1500).contains(&body.radius()));
        }
    }

    #[rstest]
    #[case(2, MagneticField::Standard)]
    #[case(5, MagneticField::Strong)]
    #[case(6, MagneticField::Weak)]
    fn test_cytherean_rotation_table(#[case] roll: i64, #[case] field: MagneticField) {
        let star = sol();
        let mut ctx = GenerationContext::new(&star, AU);
        let mut rolls = vec![1; 5 + 2];
        rolls.push(roll);
        let mut dice = ScriptedDice::new(&rolls);
        let body = generate(&mut ctx, "Venus", BodyType::Cytherean, &mut dice).unwrap();
        assert_eq!(body.magnetic_field(), field);
        assert!(body.day_length() < 11 * STANDARD_DAY);
    }

    #[rstest]
    #[case(&[1], 0)]
    #[case(&[3], 0)]
    #[case(&[4], 1)]
    #[case(&[6], 1)]
    fn test_moon_chance(#[case] rolls: &[i64], #[case] count: usize) {
        let star = sol();
        let primary = generate(
            &mut GenerationContext::new(&star, AU),
            "Terra",
            BodyType::EoGaian,
            &mut Dice::seeded(1),
        )
        .unwrap();
        let mut dice = ScriptedDice::with_fallback(rolls, 2);
        let moons = moons(&primary, &star, &mut dice).unwrap();
        assert_eq!(moons.len(), count);
    }

    #[test]
    fn test_small_moon_is_locked_and_named() {
        let star = sol();
        let primary = generate(
            &mut GenerationContext::new(&star, AU),
            "Terra",
            BodyType::EoGaian,
            &mut Dice::seeded(1),
        )
        .unwrap();
        // d6 = 4, then 2d50 = 2, d1000 = 1.
        let mut dice = ScriptedDice::new(&[4]);
        let moons = moons(&primary, &star, &mut dice).unwrap();
        let moon = &moons[0];
        assert_eq!(moon.name(), "Terraa");
        assert_eq!(moon.moon_of(), Some("Terra"));
        assert_eq!(moon.body_type(), BodyType::Selenian);
        assert_eq!(moon.distance(), 152_001);
        assert!(moon.has_feature(MoonFeature::SmallMoon));
        assert!(moon.has_feature(MoonFeature::TidallyLocked));
        // Half of 1200+d600.
        assert!((600..=900).contains(&moon.radius()));
    }

    #[test]
    fn test_moons_rejects_other_types() {
        let star = sol();
        let rock = Body::new("Rock", BodyType::Hermian).unwrap();
        assert!(moons(&rock, &star, &mut Dice::seeded(1)).is_err());
    }

    #[test]
    fn test_wrong_type() {
        let star = sol();
        let mut ctx = GenerationContext::new(&star, AU);
        assert!(generate(&mut ctx, "X", BodyType::Jovic, &mut Dice::seeded(1)).is_err());
    }
}
