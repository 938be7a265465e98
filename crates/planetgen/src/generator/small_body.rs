//! Asteroids and other small bodies.

use super::{GenerationContext, define, wrong_type};
use crate::body::{Body, BodyType, SmallBodyFeature};
use crate::dice::RandomSource;
use crate::error::Result;
use crate::resources::CommodityName::*;

pub fn generate(
    ctx: &mut GenerationContext<'_>,
    name: &str,
    body_type: BodyType,
    dice: &mut dyn RandomSource,
) -> Result<Body> {
    match body_type {
        BodyType::Aggregate => aggregate(ctx, name, dice),
        BodyType::Carbonaceous => carbonaceous(ctx, name, dice),
        BodyType::Gelidaceous => gelidaceous(ctx, name, dice),
        BodyType::Metallic => metallic(ctx, name, dice),
        BodyType::Silicaceous => silicaceous(ctx, name, dice),
        BodyType::Vulcanian => vulcanian(ctx, name, dice),
        other => Err(wrong_type("small body", other)),
    }
}

/// Radius from the size feature, 30+3d20 when none is set.
pub fn feature_radius(body: &Body, dice: &mut dyn RandomSource) -> i64 {
    if body.has_feature(SmallBodyFeature::Tiny) {
        3 + dice.roll(6)
    } else if body.has_feature(SmallBodyFeature::Small) {
        10 + dice.roll_n(8, 2)
    } else if body.has_feature(SmallBodyFeature::Large) {
        100 + dice.roll_n(100, 2)
    } else if body.has_feature(SmallBodyFeature::Huge) {
        300 + dice.roll_n(300, 2)
    } else if body.has_feature(SmallBodyFeature::Gigantic) {
        1000 + dice.roll(500)
    } else {
        30 + dice.roll_n(20, 3)
    }
}

fn aggregate(ctx: &GenerationContext<'_>, name: &str, dice: &mut dyn RandomSource) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::Aggregate, dice)?;
    body.set_radius(10 + dice.roll_n(6, 3));
    body.set_day_length(18_000 + dice.roll_n(3600, 5));

    body.add_secondary_resource(SilicateOre, dice);
    let t = body.temperature();
    if t > 500 {
        body.add_secondary_resource(FerricOre, dice);
        body.add_tertiary_resource(CarbonicOre, dice);
        body.add_trace_resource(Radioactives, dice);
    } else if t > 400 {
        body.add_secondary_resource(CarbonicOre, dice);
        body.add_tertiary_resource(FerricOre, dice);
    } else if t > 300 {
        body.add_secondary_resource(CarbonicOre, dice);
        body.add_tertiary_resource(FerricOre, dice);
        body.add_trace_resource(Water, dice);
    } else if t > 200 {
        body.add_secondary_resource(Water, dice);
        body.add_tertiary_resource(CarbonicOre, dice);
        body.add_trace_resource(FerricOre, dice);
    } else if t > 100 {
        body.add_secondary_resource(Water, dice);
        body.add_trace_resource(CarbonicOre, dice);
    }
    Ok(body)
}

/// Water at tertiary below 300K, trace below 350K.
fn add_water(body: &mut Body, dice: &mut dyn RandomSource) {
    if body.temperature() < 300 {
        body.add_tertiary_resource(Water, dice);
    } else if body.temperature() < 350 {
        body.add_trace_resource(Water, dice);
    }
}

fn carbonaceous(
    ctx: &GenerationContext<'_>,
    name: &str,
    dice: &mut dyn RandomSource,
) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::Carbonaceous, dice)?;
    body.set_radius(100 + dice.roll_n(100, 4));
    body.set_day_length(3600 + dice.roll_n(3600, 2));

    body.add_secondary_resource(SilicateOre, dice);
    body.add_secondary_resource(CarbonicOre, dice);
    body.add_secondary_resource(CarbonicCrystals, dice);
    if body.temperature() > 500 {
        body.add_tertiary_resource(FerricOre, dice);
    }
    add_water(&mut body, dice);
    Ok(body)
}

fn gelidaceous(
    ctx: &GenerationContext<'_>,
    name: &str,
    dice: &mut dyn RandomSource,
) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::Gelidaceous, dice)?;
    body.set_radius(50 + dice.roll_n(20, 3));
    body.set_day_length(3600 + dice.roll_n(3600, 2));

    body.add_primary_resource(Water, dice);
    body.add_secondary_resource(SilicateOre, dice);
    body.add_secondary_resource(CarbonicOre, dice);
    match dice.roll(8) {
        1 | 2 => body.add_trace_resource(ExoticCrystals, dice),
        3 | 4 => body.add_trace_resource(SilicateCrystals, dice),
        5 | 6 => body.add_trace_resource(CarbonicCrystals, dice),
        _ => {}
    }
    Ok(body)
}

fn metallic(ctx: &GenerationContext<'_>, name: &str, dice: &mut dyn RandomSource) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::Metallic, dice)?;
    body.set_radius(10 + dice.roll_n(10, 3));
    body.set_day_length(3600 + dice.roll_n(3600, 3));

    body.add_primary_resource(FerricOre, dice);
    body.add_secondary_resource(HeavyMetals, dice);
    if dice.roll(2) == 1 {
        body.add_secondary_resource(RareMetals, dice);
    }
    if dice.roll(2) == 1 {
        body.add_secondary_resource(PreciousMetals, dice);
    }
    if dice.roll(2) == 1 {
        body.add_tertiary_resource(Radioactives, dice);
    }
    Ok(body)
}

fn silicaceous(
    ctx: &GenerationContext<'_>,
    name: &str,
    dice: &mut dyn RandomSource,
) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::Silicaceous, dice)?;
    let radius = feature_radius(&body, dice);
    body.set_radius(radius);
    body.set_day_length(3600 + dice.roll_n(3600, 2));

    body.add_primary_resource(SilicateOre, dice);
    body.add_secondary_resource(SilicateCrystals, dice);
    body.add_secondary_resource(FerricOre, dice);
    body.add_secondary_resource(RareMetals, dice);
    if body.temperature() > 500 {
        body.add_tertiary_resource(FerricOre, dice);
    }
    add_water(&mut body, dice);
    Ok(body)
}

fn vulcanian(ctx: &GenerationContext<'_>, name: &str, dice: &mut dyn RandomSource) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::Vulcanian, dice)?;
    body.set_radius(dice.roll_n(10, 3));
    body.set_day_length(3600 + dice.roll_n(3600, 2));

    body.add_secondary_resource(FerricOre, dice);
    body.add_secondary_resource(HeavyMetals, dice);
    body.add_secondary_resource(RareMetals, dice);
    body.add_secondary_resource(PreciousMetals, dice);
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{Dice, ScriptedDice};
    use crate::error::PlanetGenError;
    use crate::generator::test_support::{distance_for_kelvin, sol};
    use crate::resources::{CommodityName, Tier};
    use rstest::rstest;

    fn tiers_of(body: &Body, commodity: CommodityName) -> Vec<Tier> {
        body.resources()
            .iter()
            .filter(|r| r.commodity == commodity)
            .map(|r| r.tier)
            .collect()
    }

    #[test]
    fn test_wrong_type_is_invalid() {
        let star = sol();
        let mut ctx = GenerationContext::new(&star, distance_for_kelvin(200));
        let err = generate(&mut ctx, "Rock", BodyType::Jovic, &mut Dice::seeded(1)).unwrap_err();
        assert!(matches!(err, PlanetGenError::InvalidArgument(_)));
    }

    #[rstest]
    #[case(BodyType::Silicaceous)]
    #[case(BodyType::Aggregate)]
    fn test_hot_rocky_body_has_ferric_ore(#[case] body_type: BodyType) {
        let star = sol();
        for seed in 0..20 {
            let mut ctx = GenerationContext::new(&star, distance_for_kelvin(700));
            let body = generate(&mut ctx, "Cinder", body_type, &mut Dice::seeded(seed)).unwrap();
            assert!(body.temperature() > 500);
            let tiers = tiers_of(&body, FerricOre);
            assert!(
                tiers.iter().any(|t| *t <= Tier::Secondary),
                "{body_type} at {}K: {tiers:?}",
                body.temperature()
            );
        }
    }

    #[rstest]
    #[case(150, vec![Water, CarbonicOre])]
    #[case(250, vec![Water, CarbonicOre, FerricOre])]
    #[case(350, vec![CarbonicOre, FerricOre, Water])]
    #[case(450, vec![CarbonicOre, FerricOre])]
    fn test_aggregate_temperature_bands(#[case] kelvin: i64, #[case] expected: Vec<CommodityName>) {
        let star = sol();
        let mut ctx = GenerationContext::new(&star, distance_for_kelvin(kelvin));
        let body = generate(&mut ctx, "Rubble", BodyType::Aggregate, &mut Dice::seeded(4)).unwrap();
        let names: Vec<CommodityName> = body.resources().iter().map(|r| r.commodity).collect();
        assert_eq!(names[0], SilicateOre);
        assert_eq!(&names[1..], expected.as_slice());
    }

    #[test]
    fn test_metallic_bonus_resources_are_independent() {
        let star = sol();
        let mut ctx = GenerationContext::new(&star, distance_for_kelvin(300));
        // Radius 3 dice, day 3 dice, primary 4, secondary 2, then the coin flips
        // with the precious metals density (2d100) between the second and third.
        let mut script = vec![1; 3 + 3 + 4 + 2];
        script.extend([2, 1, 50, 50, 2]);
        // define() consumes d100 then 4d12 first.
        let mut rolls = vec![1; 5];
        rolls.extend(script);
        let mut dice = ScriptedDice::new(&rolls);
        let body = generate(&mut ctx, "Iron", BodyType::Metallic, &mut dice).unwrap();
        assert!(body.resource(RareMetals).is_none());
        assert_eq!(body.resource(PreciousMetals).map(|r| r.tier), Some(Tier::Secondary));
        assert!(body.resource(Radioactives).is_none());
    }

    #[rstest]
    #[case(SmallBodyFeature::Tiny, 4..=9)]
    #[case(SmallBodyFeature::Small, 12..=26)]
    #[case(SmallBodyFeature::Large, 102..=300)]
    #[case(SmallBodyFeature::Huge, 302..=900)]
    #[case(SmallBodyFeature::Gigantic, 1001..=1500)]
    fn test_silicaceous_size_features(
        #[case] feature: SmallBodyFeature,
        #[case] range: std::ops::RangeInclusive<i64>,
    ) {
        let star = sol();
        for seed in 0..10 {
            let mut ctx = GenerationContext::new(&star, distance_for_kelvin(250)).with_feature(feature);
            let body =
                generate(&mut ctx, "Vesta", BodyType::Silicaceous, &mut Dice::seeded(seed)).unwrap();
            assert!(range.contains(&body.radius()), "{feature:?}: {}", body.radius());
        }
    }

    #[test]
    fn test_gelidaceous_is_water_primary() {
        let star = sol();
        let mut ctx = GenerationContext::new(&star, distance_for_kelvin(60));
        let body = generate(&mut ctx, "Snowball", BodyType::Gelidaceous, &mut Dice::seeded(8)).unwrap();
        assert_eq!(tiers_of(&body, Water), vec![Tier::Primary]);
        assert!((53..=110).contains(&body.radius()));
    }
}
