//! Gas giants.

use super::{GenerationContext, define, wrong_type};
use crate::body::{Atmosphere, Body, BodyType, JovianFeature, MagneticField, Pressure, Temperature};
use crate::constants::STANDARD_DAY;
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
        BodyType::Jovic => jovic(ctx, name, dice),
        BodyType::Saturnian | BodyType::Sokarian => saturnian(ctx, name, body_type, dice),
        other => Err(wrong_type("jovian", other)),
    }
}

fn giant(
    ctx: &GenerationContext<'_>,
    name: &str,
    body_type: BodyType,
    dice: &mut dyn RandomSource,
) -> Result<Body> {
    let mut body = define(ctx, name, body_type, dice)?;
    body.set_radius(45_000 + dice.roll_n(5000, 4));
    Ok(body)
}

fn jovic(ctx: &GenerationContext<'_>, name: &str, dice: &mut dyn RandomSource) -> Result<Body> {
    let mut body = giant(ctx, name, BodyType::Jovic, dice)?;
    body.set_atmosphere(Atmosphere::Hydrogen);
    body.set_pressure_level(Pressure::SuperDense);
    body.set_magnetic_field(match dice.roll_n(6, 2) {
        ..=4 => MagneticField::Strong,
        5..=11 => MagneticField::VeryStrong,
        _ => MagneticField::Intense,
    });
    body.set_day_length(9 * STANDARD_DAY + dice.roll_n(3600, 2));

    if dice.roll(4) == 1 {
        body.add_feature(JovianFeature::WaterClouds);
    } else {
        body.add_feature(JovianFeature::AmmoniaClouds);
    }

    body.add_primary_resource(Hydrogen, dice);
    body.add_secondary_resource(Helium, dice);
    body.add_tertiary_resource(OrganicGases, dice);
    body.add_tertiary_resource(Water, dice);
    Ok(body)
}

/// Saturnian giants, and the hot Sokarian variant which never drops below the
/// melting point of silicates.
fn saturnian(
    ctx: &GenerationContext<'_>,
    name: &str,
    body_type: BodyType,
    dice: &mut dyn RandomSource,
) -> Result<Body> {
    let mut body = giant(ctx, name, body_type, dice)?;
    let sokarian = body_type == BodyType::Sokarian;
    if sokarian {
        let floor = Temperature::SilicatesMelt.kelvin();
        if body.temperature() < floor {
            debug!("Raising {} from {}K to {floor}K", body.name(), body.temperature());
            body.set_temperature(floor);
        }
    }
    body.set_atmosphere(Atmosphere::Hydrogen);
    body.set_pressure_level(Pressure::SuperDense);
    body.set_magnetic_field(match dice.roll_n(6, 2) {
        ..=3 => MagneticField::Standard,
        4..=11 => MagneticField::Strong,
        _ => MagneticField::VeryStrong,
    });
    body.set_day_length(10 * STANDARD_DAY + dice.roll_n(3600, 2));

    let clouds = if sokarian {
        JovianFeature::SilicateClouds
    } else if body.temperature() < Temperature::Cool.kelvin() {
        JovianFeature::AmmoniaClouds
    } else if body.temperature() < Temperature::VeryHot.kelvin() {
        JovianFeature::WaterClouds
    } else {
        JovianFeature::Cloudless
    };
    body.add_feature(clouds);

    body.add_primary_resource(Hydrogen, dice);
    body.add_tertiary_resource(Helium, dice);
    body.add_tertiary_resource(OrganicGases, dice);
    body.add_tertiary_resource(Water, dice);
    Ok(body)
}
