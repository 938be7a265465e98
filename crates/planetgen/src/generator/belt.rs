//! Asteroid belts, ice belts and circumstellar discs. A belt's radius is
//! the width of the ring.

use super::{GenerationContext, check_distance, define, moon_name, wrong_type};
use crate::body::{BeltFeature, Body, BodyType, SmallBodyFeature};
use crate::constants::MKM;
use crate::dice::RandomSource;
use crate::error::Result;
use crate::physics;
use crate::resources::CommodityName::*;
use crate::star::Star;
use log::{debug, info};

pub fn generate(
    ctx: &mut GenerationContext<'_>,
    name: &str,
    body_type: BodyType,
    dice: &mut dyn RandomSource,
) -> Result<Body> {
    match body_type {
        BodyType::AsteroidBelt => asteroid_belt(ctx, name, dice),
        BodyType::IceBelt => ice_belt(ctx, name, dice),
        BodyType::VulcanianBelt => vulcanian_belt(ctx, name, dice),
        BodyType::DustDisc => dust_disc(ctx, name, dice),
        BodyType::PlanetesimalDisc => planetesimal_disc(ctx, name, dice),
        other => Err(wrong_type("belt", other)),
    }
}

/// How a ring feature reshapes a belt.
struct RingRules {
    thin_base: i64,
    sparse_push: i64,
    planetoid_density_divisor: i32,
}

fn apply_ring_feature(
    body: &mut Body,
    ctx: &mut GenerationContext<'_>,
    mut radius: i64,
    mut density: i32,
    rules: RingRules,
    dice: &mut dyn RandomSource,
) {
    if body.has_feature(BeltFeature::ThinRing) {
        radius = rules.thin_base + dice.roll_n(100_000, 3);
        density *= 10;
    } else if body.has_feature(BeltFeature::WideSparseRing) {
        ctx.distance += radius * rules.sparse_push;
        density /= 10;
    } else if body.has_feature(BeltFeature::Planetoids) {
        radius /= 2;
        density /= rules.planetoid_density_divisor;
    }
    body.set_distance(ctx.distance);
    body.set_radius(radius);
    body.set_density(density);
}

fn asteroid_belt(
    ctx: &mut GenerationContext<'_>,
    name: &str,
    dice: &mut dyn RandomSource,
) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::AsteroidBelt, dice)?;
    let radius = dice.roll_n(6, 20) * MKM;
    let density = 1000 + dice.variance(250) as i32;

    match dice.roll_n(6, 3) {
        3 | 4 => body.add_feature(BeltFeature::ThinRing),
        5 | 6 => body.add_feature(BeltFeature::WideSparseRing),
        7 | 8 => body.add_feature(BeltFeature::Planetoids),
        _ => {}
    }
    let radius = check_distance(ctx, radius);
    let rules = RingRules {
        thin_base: 20_000,
        sparse_push: 5,
        planetoid_density_divisor: 3,
    };
    apply_ring_feature(&mut body, ctx, radius, density, rules, dice);

    body.add_primary_resource(SilicateOre, dice);
    body.add_primary_resource(CarbonicOre, dice);
    body.add_secondary_resource(FerricOre, dice);
    body.add_tertiary_resource(Water, dice);
    body.add_tertiary_resource(HeavyMetals, dice);
    body.add_tertiary_resource(PreciousMetals, dice);
    Ok(body)
}

fn ice_belt(
    ctx: &mut GenerationContext<'_>,
    name: &str,
    dice: &mut dyn RandomSource,
) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::IceBelt, dice)?;
    let radius = dice.roll_n(6, 20) * MKM;
    let density = 750 + dice.variance(250) as i32;

    match dice.roll_n(6, 3) {
        3 => body.add_feature(BeltFeature::ThinRing),
        4..=8 => body.add_feature(BeltFeature::WideSparseRing),
        17 | 18 => body.add_feature(BeltFeature::Planetoids),
        _ => {}
    }
    let radius = check_distance(ctx, radius);
    let rules = RingRules {
        thin_base: 25_000,
        sparse_push: 6,
        planetoid_density_divisor: 2,
    };
    apply_ring_feature(&mut body, ctx, radius, density, rules, dice);

    body.add_primary_resource(Water, dice);
    body.add_tertiary_resource(SilicateOre, dice);
    body.add_trace_resource(CarbonicOre, dice);
    Ok(body)
}

fn vulcanian_belt(
    ctx: &mut GenerationContext<'_>,
    name: &str,
    dice: &mut dyn RandomSource,
) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::VulcanianBelt, dice)?;
    let radius = if ctx.distance < 10 * MKM {
        let radius = dice.roll_n(4, 2) * MKM;
        if radius > ctx.distance {
            ctx.distance = radius + dice.roll(2) * MKM;
        }
        radius
    } else if ctx.distance < 25 * MKM {
        dice.roll_n(6, 3) * MKM
    } else if ctx.distance < 100 * MKM {
        dice.roll_n(6, 4) * MKM
    } else {
        dice.roll_n(6, 3) * MKM
    };
    let radius = check_distance(ctx, radius);
    body.set_distance(ctx.distance);
    body.set_radius(radius);

    body.add_primary_resource(SilicateOre, dice);
    body.add_primary_resource(CarbonicOre, dice);
    body.add_secondary_resource(FerricOre, dice);
    body.add_secondary_resource(HeavyMetals, dice);
    body.add_tertiary_resource(PreciousMetals, dice);
    body.add_tertiary_resource(Radioactives, dice);
    Ok(body)
}

fn dust_disc(
    ctx: &mut GenerationContext<'_>,
    name: &str,
    dice: &mut dyn RandomSource,
) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::DustDisc, dice)?;
    let radius = ctx.distance / 3;
    let radius = check_distance(ctx, radius);
    body.set_distance(ctx.distance);
    body.set_radius(physics::round_significant(radius, 4)?);

    body.add_tertiary_resource(Hydrogen, dice);
    let t = body.temperature();
    if t < 300 && dice.roll(2) == 1 {
        body.add_secondary_resource(Water, dice);
    } else if t < 400 && dice.roll(2) == 1 {
        body.add_tertiary_resource(Water, dice);
    } else if t < 400 {
        body.add_trace_resource(Water, dice);
    }
    if dice.roll(3) == 1 {
        body.add_trace_resource(SilicateOre, dice);
    }
    if dice.roll(6) == 1 {
        body.add_trace_resource(CarbonicOre, dice);
    }
    Ok(body)
}

fn planetesimal_disc(
    ctx: &mut GenerationContext<'_>,
    name: &str,
    dice: &mut dyn RandomSource,
) -> Result<Body> {
    let mut body = define(ctx, name, BodyType::PlanetesimalDisc, dice)?;
    let radius = ctx.distance / 3;
    let radius = check_distance(ctx, radius);
    body.set_distance(ctx.distance);
    body.set_radius(radius);

    body.add_secondary_resource(SilicateOre, dice);
    body.add_secondary_resource(CarbonicOre, dice);
    if body.temperature() < 400 {
        body.add_tertiary_resource(Water, dice);
    }
    Ok(body)
}

/// Oversized members of a belt, placed left to right across its width.
pub fn moons(primary: &Body, star: &Star, dice: &mut dyn RandomSource) -> Result<Vec<Body>> {
    let icy = match primary.body_type() {
        BodyType::AsteroidBelt => false,
        BodyType::IceBelt => true,
        other => return Err(wrong_type("belt moon", other)),
    };
    let planetoids = primary.has_feature(BeltFeature::Planetoids);

    let mut count = dice.roll(4) - 1;
    if planetoids {
        count += if icy { dice.roll_n(3, 2) } else { dice.roll_n(4, 3) };
    }
    info!("Creating {count} moons for [{}]", primary.name());
    if count <= 0 {
        return Ok(Vec::new());
    }

    let width = primary.radius();
    let (mut offset, spacing) = match count {
        1 => (dice.variance(width), width / 100),
        2 => (-dice.roll(width), width / 2),
        n => (-width, width / n),
    };

    let mut moons = Vec::with_capacity(count as usize);
    for m in 0..count as usize {
        let size_roll = dice.roll_n(6, 2) - if planetoids { 2 } else { 0 };
        let size = match (icy, size_roll) {
            (false, ..=1) | (true, ..=0) => SmallBodyFeature::Gigantic,
            (false, 2..=5) | (true, 1..=4) => SmallBodyFeature::Huge,
            _ => SmallBodyFeature::Large,
        };
        let moon_type = match (icy, dice.roll(6)) {
            (false, 1..=3) => BodyType::Carbonaceous,
            (false, _) => BodyType::Silicaceous,
            (true, 1) => BodyType::Silicaceous,
            (true, _) => BodyType::Gelidaceous,
        };
        let name = moon_name(primary.name(), m + 1);
        let position = offset + dice.variance(spacing / 5);
        debug!("Adding moon {name} ({moon_type}, {size:?}) at {position}km");

        let mut ctx = GenerationContext::for_moon(star, primary, position).with_feature(size);
        let moon = moon_type.generate(&mut ctx, &name, dice)?;
        moons.push(moon);
        offset += spacing;
    }
    Ok(moons)
}
