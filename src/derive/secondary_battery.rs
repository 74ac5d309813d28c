use tracing::{debug, warn};

use crate::error::{Error, IResult, invariant};
use crate::game_data::Gun;
use crate::modifiers::{FoldOp, ModifierKind};
use crate::salvo;
use crate::units::Meters;

use super::shell::{BatteryKind, ShellStats, derive_shell};
use super::{BuildContext, DispersionStats, format_thousands, round_to};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SecondaryBatteryStats {
    pub range: Meters,
    pub range_raw: Meters,
    pub sigma: f64,
    pub dispersion: DispersionStats,
    pub guns: Vec<SecondaryGunEntry>,
}

/// One group of identical secondary guns.
///
/// A group whose ammunition cannot be resolved is reported as
/// [`SecondaryGunEntry::Error`] so the rest of the battery stays usable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SecondaryGunEntry {
    Gun(SecondaryGunStats),
    Error { name: String, message: String },
}

impl SecondaryGunEntry {
    pub fn gun(&self) -> Option<&SecondaryGunStats> {
        match self {
            Self::Gun(stats) => Some(stats),
            Self::Error { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SecondaryGunStats {
    pub name: String,
    pub turret_count: u32,
    pub barrels_per_turret: u32,
    pub reload: f64,
    pub reload_raw: f64,
    pub rate_of_fire: f64,
    pub shell: ShellStats,
    pub dpm: String,
    pub dpm_raw: f64,
    pub fire_chance_per_salvo: Option<f64>,
    pub fires_per_minute: Option<f64>,
}

pub fn derive(ctx: &BuildContext<'_>) -> IResult<Option<SecondaryBatteryStats>> {
    let Some(module) = ctx.configuration.secondaries()? else {
        return Ok(None);
    };
    if module.guns.is_empty() {
        return Ok(None);
    }
    debug!(ship = %ctx.ship().name, "deriving secondary battery");

    let modifiers = ctx.modifiers;
    let range = module.max_range * modifiers.product(ModifierKind::SecondaryMaxDist);
    let dispersion = module
        .dispersion
        .with_ideal_radius_modifier(modifiers.product(ModifierKind::SecondaryIdealRadius));
    let dispersion = DispersionStats::evaluate(&dispersion, ctx.dispersion_range(range), range)?;

    let guns = group_by_name(&module.guns)
        .into_iter()
        .map(|(name, group)| match derive_group(ctx, &group) {
            Ok(stats) => SecondaryGunEntry::Gun(stats),
            Err(err) => sentinel(ctx, name, err),
        })
        .collect();

    Ok(Some(SecondaryBatteryStats {
        range: Meters::new(round_to(range.value(), 0)),
        range_raw: range,
        sigma: module.sigma,
        dispersion,
        guns,
    }))
}

/// Guns sharing a name, in order of first appearance.
fn group_by_name(guns: &[Gun]) -> Vec<(&str, Vec<&Gun>)> {
    let mut groups: Vec<(&str, Vec<&Gun>)> = Vec::new();
    for gun in guns {
        match groups.iter_mut().find(|(name, _)| *name == gun.name) {
            Some((_, group)) => group.push(gun),
            None => groups.push((gun.name.as_str(), vec![gun])),
        }
    }
    groups
}

fn sentinel(ctx: &BuildContext<'_>, name: &str, err: Error) -> SecondaryGunEntry {
    warn!(ship = %ctx.ship().name, gun = name, error = %err, "secondary gun could not be derived");
    SecondaryGunEntry::Error {
        name: name.to_string(),
        message: err.to_string(),
    }
}

fn derive_group(ctx: &BuildContext<'_>, group: &[&Gun]) -> IResult<SecondaryGunStats> {
    let modifiers = ctx.modifiers;
    let Some(gun) = group.first() else {
        return Err(invariant("empty secondary gun group"));
    };
    let ammo = gun
        .ammo_list
        .first()
        .ok_or_else(|| invariant(format!("{} has no ammunition", gun.name)))?;
    let shell = derive_shell(ctx.data.shell(ammo)?, BatteryKind::Secondary, modifiers);

    let reload = modifiers.fold(ModifierKind::SecondaryShotDelay, gun.reload, FoldOp::Multiply);
    let rate_of_fire = salvo::rate_of_fire(reload);
    let turret_count = group.len() as u32;
    let barrels = gun.num_barrels * turret_count;
    let dpm = salvo::theoretical_dpm(shell.damage_raw, barrels, rate_of_fire);

    let (fire_chance_per_salvo, fires_per_minute) = if shell.can_start_fires() {
        (
            Some(round_to(salvo::fire_chance_per_salvo(shell.fire_chance_raw, barrels), 1)),
            Some(round_to(
                salvo::fires_per_minute(shell.fire_chance_raw, barrels, rate_of_fire),
                2,
            )),
        )
    } else {
        (None, None)
    };

    Ok(SecondaryGunStats {
        name: gun.name.clone(),
        turret_count,
        barrels_per_turret: gun.num_barrels,
        reload: round_to(reload, 2),
        reload_raw: reload,
        rate_of_fire: round_to(rate_of_fire, 2),
        shell,
        dpm: format_thousands(dpm),
        dpm_raw: dpm,
        fire_chance_per_salvo,
        fires_per_minute,
    })
}
