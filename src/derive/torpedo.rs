use tracing::debug;

use crate::error::IResult;
use crate::game_data::{GameDataProvider, ShipClass, Torpedo, TorpedoType};
use crate::modifiers::{FoldOp, ModifierKind, ModifierSet, Stage};
use crate::salvo::{self, BarrelArrangement};
use crate::units::{Km, Meters};

use super::{BuildContext, IsLast, mark_last, round_to};

/// Game speed of one knot, in meters travelled per second of battle time.
const KNOTS_TO_METERS_PER_SECOND: f64 = 2.6;

const RELOAD_STAGES: &[Stage] = &[
    Stage::multiply(ModifierKind::TorpedoShotDelay),
    Stage::percent_reduction(ModifierKind::LastChanceReload),
];

/// Who launches the torpedo. Ship and aerial torpedoes read different keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TorpedoSource {
    Ship,
    Plane,
}

impl TorpedoSource {
    fn damage(self) -> ModifierKind {
        match self {
            Self::Ship => ModifierKind::TorpedoDamage,
            Self::Plane => ModifierKind::PlaneTorpedoDamage,
        }
    }

    fn speed(self) -> ModifierKind {
        match self {
            Self::Ship => ModifierKind::TorpedoSpeed,
            Self::Plane => ModifierKind::PlaneTorpedoSpeed,
        }
    }

    fn flood_chance(self) -> ModifierKind {
        match self {
            Self::Ship => ModifierKind::FloodChance,
            Self::Plane => ModifierKind::PlaneFloodChance,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TorpedoStats {
    pub name: String,
    pub damage: f64,
    pub damage_raw: f64,
    /// Knots.
    pub speed: f64,
    pub speed_raw: f64,
    pub range: Km,
    pub detectability: Km,
    /// Seconds between the torpedo becoming visible and reaching its target.
    pub reaction_time: f64,
    pub arming_distance: Meters,
    /// Percent.
    pub flood_chance: f64,
    pub torpedo_type: TorpedoType,
    pub ignore_classes: Vec<ShipClass>,
    pub is_last: bool,
}

impl IsLast for TorpedoStats {
    fn set_last(&mut self, is_last: bool) {
        self.is_last = is_last;
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TorpedoArmamentStats {
    pub name: String,
    pub reload: f64,
    pub reload_raw: f64,
    pub traverse_speed: f64,
    pub turn_time: f64,
    pub arrangement: BarrelArrangement,
    pub barrel_count: u32,
    pub torpedoes: Vec<TorpedoStats>,
}

pub fn derive_torpedo(torpedo: &Torpedo, source: TorpedoSource, modifiers: &ModifierSet) -> TorpedoStats {
    let damage = modifiers.fold(source.damage(), torpedo.damage, FoldOp::Multiply);
    let speed = modifiers.fold(source.speed(), torpedo.speed, FoldOp::Multiply);

    let mut range = torpedo.max_dist.to_meters();
    if source == TorpedoSource::Ship {
        range = range * modifiers.product(ModifierKind::TorpedoRange);
    }
    let detectability = torpedo.visibility * modifiers.product(ModifierKind::TorpedoVisibility);
    let flood_chance = modifiers.fold(source.flood_chance(), torpedo.flood_chance * 100.0, FoldOp::Multiply);

    let meters_per_second = speed * KNOTS_TO_METERS_PER_SECOND;

    TorpedoStats {
        name: torpedo.name.clone(),
        damage: round_to(damage, 0),
        damage_raw: damage,
        speed: round_to(speed, 1),
        speed_raw: speed,
        range: Km::new(round_to(range.to_km().value(), 2)),
        detectability: Km::new(round_to(detectability.value(), 2)),
        reaction_time: round_to(detectability.to_meters().value() / meters_per_second, 2),
        arming_distance: Meters::new(round_to(torpedo.arming_time * meters_per_second, 0)),
        flood_chance: round_to(flood_chance.clamp(0.0, 100.0), 1),
        torpedo_type: torpedo.torpedo_type,
        ignore_classes: torpedo.ignore_classes.clone(),
        is_last: false,
    }
}

pub fn derive(ctx: &BuildContext<'_>) -> IResult<Option<TorpedoArmamentStats>> {
    let Some(module) = ctx.configuration.torpedoes()? else {
        return Ok(None);
    };
    let Some(launcher) = module.launchers.first() else {
        return Ok(None);
    };
    debug!(ship = %ctx.ship().name, launcher = %launcher.name, "deriving torpedoes");

    let modifiers = ctx.modifiers;
    let reload = modifiers.apply(launcher.reload, RELOAD_STAGES);
    let traverse_speed = modifiers.fold(
        ModifierKind::TorpedoRotationSpeed,
        launcher.rotation_speed,
        FoldOp::Multiply,
    );
    let arrangement = BarrelArrangement::from_mounts(&module.launchers);

    let torpedoes = derive_torpedoes(&launcher.ammo_list, TorpedoSource::Ship, ctx.data, modifiers)?;

    Ok(Some(TorpedoArmamentStats {
        name: launcher.name.clone(),
        reload: round_to(reload, 2),
        reload_raw: reload,
        traverse_speed: round_to(traverse_speed, 2),
        turn_time: round_to(180.0 / traverse_speed, 1),
        barrel_count: arrangement.total_barrels(),
        arrangement,
        torpedoes,
    }))
}

pub(crate) fn derive_torpedoes<S: AsRef<str>>(
    ammo: &[S],
    source: TorpedoSource,
    data: &dyn GameDataProvider,
    modifiers: &ModifierSet,
) -> IResult<Vec<TorpedoStats>> {
    let mut torpedoes = ammo
        .iter()
        .map(|name| Ok(derive_torpedo(data.torpedo(name.as_ref())?, source, modifiers)))
        .collect::<IResult<Vec<_>>>()?;
    mark_last(&mut torpedoes);
    Ok(torpedoes)
}

/// Rate of fire of a launcher in salvos per minute.
pub fn launcher_rate_of_fire(stats: &TorpedoArmamentStats) -> f64 {
    salvo::rate_of_fire(stats.reload_raw)
}
