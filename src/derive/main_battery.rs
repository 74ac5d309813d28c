use tracing::debug;

use crate::error::IResult;
use crate::modifiers::{FoldOp, ModifierKind, Stage};
use crate::salvo::{self, BarrelArrangement};
use crate::units::Meters;

use super::shell::{BatteryKind, ShellStats, derive_shells};
use super::{BuildContext, DispersionStats, format_thousands, round_to};

const RELOAD_STAGES: &[Stage] = &[
    Stage::multiply(ModifierKind::MainBatteryShotDelay),
    Stage::percent_reduction(ModifierKind::LastChanceReload),
    Stage::multiply(ModifierKind::ArtilleryReload),
];

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MainBatteryStats {
    pub name: String,
    /// Seconds between salvos.
    pub reload: f64,
    pub reload_raw: f64,
    /// Salvos per minute.
    pub rate_of_fire: f64,
    pub rate_of_fire_raw: f64,
    /// Degrees per second.
    pub traverse_speed: f64,
    /// Seconds for a 180 degree turn.
    pub turn_time: f64,
    pub range: Meters,
    pub range_raw: Meters,
    pub sigma: f64,
    pub arrangement: BarrelArrangement,
    pub barrel_count: u32,
    pub dispersion: DispersionStats,
    pub shells: Vec<MainBatteryShell>,
}

/// A shell of the battery together with its salvo figures.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MainBatteryShell {
    pub shell: ShellStats,
    pub dpm: String,
    pub dpm_raw: f64,
    /// Percent chance a full salvo starts at least one fire.
    pub fire_chance_per_salvo: Option<f64>,
    pub fires_per_minute: Option<f64>,
}

pub fn derive(ctx: &BuildContext<'_>) -> IResult<Option<MainBatteryStats>> {
    let Some(module) = ctx.configuration.main_battery()? else {
        return Ok(None);
    };
    let Some(first_gun) = module.guns.first() else {
        debug!(ship = %ctx.ship().name, "main battery module has no guns");
        return Ok(None);
    };
    debug!(ship = %ctx.ship().name, gun = %first_gun.name, "deriving main battery");

    let modifiers = ctx.modifiers;

    let reload = modifiers.apply(first_gun.reload, RELOAD_STAGES);
    let rate_of_fire = salvo::rate_of_fire(reload);
    let traverse_speed = modifiers.fold(
        ModifierKind::MainBatteryRotationSpeed,
        first_gun.rotation_speed,
        FoldOp::Multiply,
    );

    let fire_control_coeff = ctx
        .configuration
        .fire_control()?
        .map(|fc| fc.max_range_coeff)
        .unwrap_or(1.0);
    let range = module.max_range * fire_control_coeff * modifiers.product(ModifierKind::MainBatteryMaxDist);

    let dispersion = module
        .dispersion
        .with_ideal_radius_modifier(modifiers.product(ModifierKind::MainBatteryIdealRadius));
    let dispersion = DispersionStats::evaluate(&dispersion, ctx.dispersion_range(range), range)?;

    let arrangement = BarrelArrangement::from_mounts(&module.guns);
    let barrel_count = arrangement.total_barrels();

    let shells = derive_shells(&first_gun.ammo_list, BatteryKind::Main, ctx.data, modifiers)?
        .into_iter()
        .map(|shell| {
            let dpm = salvo::theoretical_dpm(shell.damage_raw, barrel_count, rate_of_fire);
            let (fire_chance_per_salvo, fires_per_minute) = if shell.can_start_fires() {
                (
                    Some(round_to(
                        salvo::fire_chance_per_salvo(shell.fire_chance_raw, barrel_count),
                        1,
                    )),
                    Some(round_to(
                        salvo::fires_per_minute(shell.fire_chance_raw, barrel_count, rate_of_fire),
                        2,
                    )),
                )
            } else {
                (None, None)
            };
            MainBatteryShell {
                shell,
                dpm: format_thousands(dpm),
                dpm_raw: dpm,
                fire_chance_per_salvo,
                fires_per_minute,
            }
        })
        .collect();

    Ok(Some(MainBatteryStats {
        name: first_gun.name.clone(),
        reload: round_to(reload, 2),
        reload_raw: reload,
        rate_of_fire: round_to(rate_of_fire, 2),
        rate_of_fire_raw: rate_of_fire,
        traverse_speed: round_to(traverse_speed, 2),
        turn_time: round_to(180.0 / traverse_speed, 1),
        range: Meters::new(round_to(range.value(), 0)),
        range_raw: range,
        sigma: module.sigma,
        arrangement,
        barrel_count,
        dispersion,
        shells,
    }))
}
