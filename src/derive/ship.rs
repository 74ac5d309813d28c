//! Whole-build assembly.

#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::debug;

use crate::configuration::ShipConfiguration;
use crate::error::IResult;
use crate::game_data::{GameDataProvider, Ship};
use crate::modifiers::ModifierSet;

use super::aircraft::AircraftStats;
use super::concealment::ConcealmentStats;
use super::depth_charge::DepthChargeArmamentStats;
use super::main_battery::MainBatteryStats;
use super::maneuverability::ManeuverabilityStats;
use super::secondary_battery::SecondaryBatteryStats;
use super::special_ability::SpecialAbilityStats;
use super::survivability::SurvivabilityStats;
use super::torpedo::TorpedoArmamentStats;
use super::{BuildContext, DerivationOptions};
use super::{
    aircraft, concealment, depth_charge, main_battery, maneuverability, secondary_battery,
    special_ability, survivability, torpedo,
};

/// Every family derived for one build. Families the ship lacks are `None`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipStats {
    pub index: String,
    pub name: String,
    pub main_battery: Option<MainBatteryStats>,
    pub secondary_battery: Option<SecondaryBatteryStats>,
    pub torpedoes: Option<TorpedoArmamentStats>,
    pub depth_charges: Option<DepthChargeArmamentStats>,
    pub aircraft: Option<AircraftStats>,
    pub special_ability: Option<SpecialAbilityStats>,
    pub survivability: Option<SurvivabilityStats>,
    pub maneuverability: Option<ManeuverabilityStats>,
    pub concealment: Option<ConcealmentStats>,
}

pub fn derive_ship(ctx: &BuildContext<'_>) -> IResult<ShipStats> {
    let ship = ctx.ship();
    debug!(ship = %ship.name, modifiers = ctx.modifiers.effects().len(), "deriving build");

    Ok(ShipStats {
        index: ship.index.clone(),
        name: ship.name.clone(),
        main_battery: main_battery::derive(ctx)?,
        secondary_battery: secondary_battery::derive(ctx)?,
        torpedoes: torpedo::derive(ctx)?,
        depth_charges: depth_charge::derive(ctx)?,
        aircraft: aircraft::derive(ctx)?,
        special_ability: special_ability::derive(ctx)?,
        survivability: survivability::derive(ctx)?,
        maneuverability: maneuverability::derive(ctx)?,
        concealment: concealment::derive(ctx)?,
    })
}

/// One build to evaluate: a ship, the upgrades selected on it, and the
/// effects of its captain, consumables and signals.
#[derive(Clone, Debug)]
pub struct ShipBuild<'a> {
    pub ship: &'a Ship,
    pub upgrades: Vec<String>,
    pub modifiers: ModifierSet,
}

impl<'a> ShipBuild<'a> {
    pub fn stock(ship: &'a Ship, modifiers: ModifierSet) -> Self {
        let configuration = ShipConfiguration::stock(ship);
        Self {
            ship,
            upgrades: configuration.upgrades().map(|u| u.name.clone()).collect(),
            modifiers,
        }
    }

    pub fn derive(&self, data: &dyn GameDataProvider, options: DerivationOptions) -> IResult<ShipStats> {
        let configuration = ShipConfiguration::resolve(self.ship, self.upgrades.as_slice())?;
        let ctx = BuildContext::builder()
            .configuration(configuration)
            .modifiers(&self.modifiers)
            .data(data)
            .options(options)
            .build();
        derive_ship(&ctx)
    }
}

/// Derives every build, returning one result per build in input order.
pub fn derive_builds(
    builds: &[ShipBuild<'_>],
    data: &(dyn GameDataProvider + Sync),
    options: DerivationOptions,
) -> Vec<IResult<ShipStats>> {
    #[cfg(feature = "rayon")]
    let results = builds.par_iter().map(|build| build.derive(data, options)).collect();
    #[cfg(not(feature = "rayon"))]
    let results = builds.iter().map(|build| build.derive(data, options)).collect();
    results
}
