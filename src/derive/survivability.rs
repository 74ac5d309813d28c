use tracing::debug;

use crate::error::IResult;
use crate::modifiers::{FoldOp, ModifierKind};

use super::{BuildContext, round_to};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurvivabilityStats {
    pub health: f64,
    pub health_raw: f64,
    /// Seconds one fire burns.
    pub fire_duration: f64,
    pub fire_damage_per_second: f64,
    /// Damage of one fire burning out.
    pub fire_damage: f64,
    pub flood_duration: f64,
    pub flood_damage_per_second: f64,
    pub flood_damage: f64,
    pub fire_spots: u32,
    /// Percent of torpedo damage absorbed.
    pub torpedo_protection: f64,
}

pub fn derive(ctx: &BuildContext<'_>) -> IResult<Option<SurvivabilityStats>> {
    let Some(hull) = ctx.configuration.hull()? else {
        return Ok(None);
    };
    debug!(ship = %ctx.ship().name, "deriving survivability");

    let modifiers = ctx.modifiers;
    let tier = f64::from(ctx.ship().tier);
    let health = hull.health + modifiers.sum(ModifierKind::HealthPerLevel) * tier;

    let fire_duration = modifiers.fold(ModifierKind::BurnTime, hull.burn_time, FoldOp::Multiply);
    let fire_dps = health * hull.burn_damage_rate;
    let flood_duration = modifiers.fold(ModifierKind::FloodTime, hull.flood_time, FoldOp::Multiply);
    let flood_dps = health * hull.flood_damage_rate;

    Ok(Some(SurvivabilityStats {
        health: round_to(health, 0),
        health_raw: health,
        fire_duration: round_to(fire_duration, 1),
        fire_damage_per_second: round_to(fire_dps, 1),
        fire_damage: round_to(fire_dps * fire_duration, 0),
        flood_duration: round_to(flood_duration, 1),
        flood_damage_per_second: round_to(flood_dps, 1),
        flood_damage: round_to(flood_dps * flood_duration, 0),
        fire_spots: hull.fire_spots,
        torpedo_protection: round_to(hull.torpedo_protection * 100.0, 1),
    }))
}
