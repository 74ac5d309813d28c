use tracing::debug;

use crate::error::IResult;
use crate::game_data::{Aircraft, OrdnanceKind, PlaneRole};
use crate::modifiers::{FoldOp, ModifierKind, ModifierSet};
use crate::units::Km;

use super::depth_charge::{DepthChargeStats, derive_charge};
use super::ordnance::{OrdnanceFamily, OrdnanceStats, derive_ordnance};
use super::torpedo::{TorpedoSource, TorpedoStats, derive_torpedo};
use super::{BuildContext, IsLast, round_to};

/// Modifier kinds that only apply to one plane role.
struct RoleKinds {
    health: ModifierKind,
    speed: ModifierKind,
    aiming_rate: ModifierKind,
}

fn role_kinds(role: PlaneRole) -> RoleKinds {
    match role {
        PlaneRole::Fighter => RoleKinds {
            health: ModifierKind::FighterHealth,
            speed: ModifierKind::FighterSpeed,
            aiming_rate: ModifierKind::FighterAimingRate,
        },
        PlaneRole::DiveBomber => RoleKinds {
            health: ModifierKind::DiveBomberHealth,
            speed: ModifierKind::DiveBomberSpeed,
            aiming_rate: ModifierKind::DiveBomberAimingRate,
        },
        PlaneRole::TorpedoBomber => RoleKinds {
            health: ModifierKind::TorpedoBomberHealth,
            speed: ModifierKind::TorpedoBomberSpeed,
            aiming_rate: ModifierKind::TorpedoBomberAimingRate,
        },
        PlaneRole::SkipBomber => RoleKinds {
            health: ModifierKind::SkipBomberHealth,
            speed: ModifierKind::SkipBomberSpeed,
            aiming_rate: ModifierKind::SkipBomberAimingRate,
        },
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SquadronOrdnance {
    Bomb(OrdnanceStats),
    Rocket(OrdnanceStats),
    Torpedo(TorpedoStats),
    DepthCharge(DepthChargeStats),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SquadronStats {
    pub role: PlaneRole,
    pub name: String,
    pub health: f64,
    pub health_raw: f64,
    /// Knots.
    pub cruise_speed: f64,
    pub max_speed: f64,
    pub min_speed: f64,
    pub boost_time: f64,
    pub boost_reload: f64,
    pub squadron_size: u32,
    pub attack_size: u32,
    pub attacks_per_flight: u32,
    pub hangar_size: u32,
    /// Seconds to restore one plane.
    pub restore_time: f64,
    pub concealment: Km,
    pub aiming_time: f64,
    pub aiming_rate: f64,
    pub attack_cooldown: f64,
    pub ordnance_per_plane: u32,
    pub ordnance: Option<SquadronOrdnance>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AircraftStats {
    pub squadrons: Vec<SquadronStats>,
}

pub fn derive(ctx: &BuildContext<'_>) -> IResult<Option<AircraftStats>> {
    let mut squadrons = Vec::new();
    for role in PlaneRole::ALL {
        let Some(name) = ctx.configuration.component(role.slot()) else {
            continue;
        };
        debug!(ship = %ctx.ship().name, %name, ?role, "deriving squadron");
        let aircraft = ctx.data.aircraft(name)?;
        squadrons.push(derive_squadron(ctx, *role, aircraft)?);
    }

    if squadrons.is_empty() {
        return Ok(None);
    }
    Ok(Some(AircraftStats { squadrons }))
}

fn derive_squadron(ctx: &BuildContext<'_>, role: PlaneRole, aircraft: &Aircraft) -> IResult<SquadronStats> {
    let modifiers = ctx.modifiers;
    let kinds = role_kinds(role);
    let tier = f64::from(ctx.ship().tier);

    let health_per_level = modifiers.sum(ModifierKind::PlaneHealthPerLevel);
    let health = (aircraft.health + health_per_level * tier)
        * modifiers.product(ModifierKind::PlaneHealth)
        * modifiers.product(kinds.health);

    let cruise_speed = aircraft.cruise_speed
        * modifiers.product(ModifierKind::PlaneSpeed)
        * modifiers.product(kinds.speed);

    let hangar_size = modifiers.fold(
        ModifierKind::PlaneExtraHangarSize,
        f64::from(aircraft.hangar_size),
        FoldOp::Add,
    );
    let restore_time = modifiers.fold(ModifierKind::PlaneSpawnTime, aircraft.restore_time, FoldOp::Multiply);
    let boost_reload = modifiers.fold(ModifierKind::PlaneBoostReload, aircraft.boost_reload, FoldOp::Multiply);
    let concealment = aircraft.concealment * modifiers.product(ModifierKind::PlaneVisibility);
    let aiming_rate = modifiers.fold(kinds.aiming_rate, aircraft.aiming_rate, FoldOp::Multiply);

    let attacks_per_flight = aircraft
        .squadron_size
        .checked_div(aircraft.attack_size)
        .unwrap_or_default();

    let ordnance = aircraft
        .ordnance
        .as_ref()
        .map(|ordnance| derive_squadron_ordnance(ctx, ordnance.kind, &ordnance.name, modifiers))
        .transpose()?;

    Ok(SquadronStats {
        role,
        name: aircraft.name.clone(),
        health: round_to(health, 0),
        health_raw: health,
        cruise_speed: round_to(cruise_speed, 0),
        max_speed: round_to(cruise_speed * aircraft.max_speed_multiplier, 0),
        min_speed: round_to(cruise_speed * aircraft.min_speed_multiplier, 0),
        boost_time: round_to(aircraft.boost_time, 1),
        boost_reload: round_to(boost_reload, 1),
        squadron_size: aircraft.squadron_size,
        attack_size: aircraft.attack_size,
        attacks_per_flight,
        hangar_size: hangar_size.max(0.0).round() as u32,
        restore_time: round_to(restore_time, 2),
        concealment: Km::new(round_to(concealment.value(), 2)),
        aiming_time: round_to(aircraft.aiming_time, 2),
        aiming_rate: round_to(aiming_rate, 3),
        attack_cooldown: aircraft.attack_cooldown,
        ordnance_per_plane: aircraft.ordnance_per_plane,
        ordnance,
    })
}

fn derive_squadron_ordnance(
    ctx: &BuildContext<'_>,
    kind: OrdnanceKind,
    name: &str,
    modifiers: &ModifierSet,
) -> IResult<SquadronOrdnance> {
    let ordnance = match kind {
        OrdnanceKind::Bomb | OrdnanceKind::SkipBomb => {
            let mut bomb = derive_ordnance(ctx.data.bomb(name)?, OrdnanceFamily::Bomb, modifiers);
            bomb.set_last(true);
            SquadronOrdnance::Bomb(bomb)
        }
        OrdnanceKind::Rocket => {
            let mut rocket = derive_ordnance(ctx.data.rocket(name)?, OrdnanceFamily::Rocket, modifiers);
            rocket.set_last(true);
            SquadronOrdnance::Rocket(rocket)
        }
        OrdnanceKind::Torpedo => {
            let mut torpedo = derive_torpedo(ctx.data.torpedo(name)?, TorpedoSource::Plane, modifiers);
            torpedo.set_last(true);
            SquadronOrdnance::Torpedo(torpedo)
        }
        OrdnanceKind::DepthCharge => {
            SquadronOrdnance::DepthCharge(derive_charge(ctx.data.depth_charge(name)?, modifiers))
        }
    };
    Ok(ordnance)
}
