//! Resolution of a ship's selected upgrades into the active module per slot.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{IResult, invariant, not_found};
use crate::game_data::{
    ComponentKind, ComponentType, DepthChargeModule, Engine, FireControl, Hull, Ship, ShipUpgrade,
    TorpedoModule, TurretModule,
};

/// One upgrade selected per slot of a [`Ship`].
#[derive(Clone, Debug)]
pub struct ShipConfiguration<'a> {
    ship: &'a Ship,
    selected: HashMap<ComponentType, &'a ShipUpgrade>,
}

impl<'a> ShipConfiguration<'a> {
    /// Selects the named upgrades of `ship`.
    ///
    /// Every name must be one of the ship's upgrades and no two may occupy
    /// the same slot. Slots without a selection stay empty.
    pub fn resolve<S: AsRef<str>>(ship: &'a Ship, upgrade_names: &[S]) -> IResult<Self> {
        let mut selected: HashMap<ComponentType, &'a ShipUpgrade> = HashMap::new();
        for name in upgrade_names {
            let name = name.as_ref();
            let upgrade = ship
                .upgrade(name)
                .ok_or_else(|| not_found(ComponentKind::Upgrade, name))?;
            if let Some(previous) = selected.insert(upgrade.uc_type, upgrade) {
                return Err(invariant(format!(
                    "{} and {} both occupy the {} slot of {}",
                    previous.name, upgrade.name, upgrade.uc_type, ship.name
                )));
            }
        }

        Ok(Self { ship, selected })
    }

    /// The first upgrade of every slot, in the ship's upgrade order.
    pub fn stock(ship: &'a Ship) -> Self {
        let mut selected: HashMap<ComponentType, &'a ShipUpgrade> = HashMap::new();
        for upgrade in &ship.upgrades {
            selected.entry(upgrade.uc_type).or_insert(upgrade);
        }

        Self { ship, selected }
    }

    pub fn ship(&self) -> &'a Ship {
        self.ship
    }

    pub fn upgrade(&self, slot: ComponentType) -> Option<&'a ShipUpgrade> {
        self.selected.get(&slot).copied()
    }

    pub fn upgrades(&self) -> impl Iterator<Item = &'a ShipUpgrade> + '_ {
        self.selected.values().copied()
    }

    /// Name of the component active in `slot`, or `None` when the slot is
    /// not configured for this ship.
    pub fn component(&self, slot: ComponentType) -> Option<&'a str> {
        let hull_list = self
            .upgrade(ComponentType::Hull)
            .map(|hull| hull.components(slot))
            .filter(|list| !list.is_empty());

        let owner_list = self
            .upgrade(slot.owning_slot())
            .map(|owner| owner.components(slot))
            .filter(|list| !list.is_empty());

        let name = match (owner_list, hull_list) {
            (Some(owned), Some(allowed)) => owned.iter().find(|name| allowed.contains(*name)),
            (Some(owned), None) => owned.first(),
            (None, Some(allowed)) => allowed.first(),
            (None, None) => None,
        };

        if name.is_none() {
            debug!(ship = %self.ship.name, %slot, "slot is not configured");
        }

        name.map(String::as_str)
    }

    fn module<T>(&self, slot: ComponentType, modules: &'a HashMap<String, T>) -> IResult<Option<&'a T>> {
        self.component(slot)
            .map(|name| {
                modules
                    .get(name)
                    .ok_or_else(|| not_found(ComponentKind::Module(slot), name))
            })
            .transpose()
    }

    pub fn hull(&self) -> IResult<Option<&'a Hull>> {
        self.module(ComponentType::Hull, &self.ship.hulls)
    }

    pub fn main_battery(&self) -> IResult<Option<&'a TurretModule>> {
        self.module(ComponentType::Artillery, &self.ship.main_battery)
    }

    pub fn secondaries(&self) -> IResult<Option<&'a TurretModule>> {
        self.module(ComponentType::Atba, &self.ship.secondaries)
    }

    pub fn torpedoes(&self) -> IResult<Option<&'a TorpedoModule>> {
        self.module(ComponentType::Torpedoes, &self.ship.torpedoes)
    }

    pub fn engine(&self) -> IResult<Option<&'a Engine>> {
        self.module(ComponentType::Engine, &self.ship.engines)
    }

    pub fn fire_control(&self) -> IResult<Option<&'a FireControl>> {
        self.module(ComponentType::FireControl, &self.ship.fire_controls)
    }

    pub fn depth_charges(&self) -> IResult<Option<&'a DepthChargeModule>> {
        self.module(ComponentType::DepthCharges, &self.ship.depth_charges)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::derive::fixtures;

    #[test]
    fn stock_picks_first_upgrade_per_slot() {
        let ship = fixtures::cruiser();
        let config = ShipConfiguration::stock(&ship);
        assert_eq!(config.upgrade(ComponentType::Hull).unwrap().name, "PASUH001_Hull_A");
        assert_eq!(config.component(ComponentType::Artillery), Some("AB1_Artillery"));
        assert_eq!(config.component(ComponentType::Atba), Some("A_Secondary"));
        assert_eq!(config.component(ComponentType::DepthCharges), None);
    }

    #[test]
    fn owner_list_filtered_by_hull() {
        let ship = fixtures::cruiser();
        let config =
            ShipConfiguration::resolve(&ship, &["PASUH002_Hull_B", "PASUA002_Artillery_B"]).unwrap();
        // The artillery upgrade lists both mounts, the B hull only allows the second.
        assert_eq!(config.component(ComponentType::Artillery), Some("AB2_Artillery"));
        assert_eq!(config.component(ComponentType::Atba), Some("B_Secondary"));
    }

    #[test]
    fn missing_owner_falls_back_to_hull() {
        let ship = fixtures::cruiser();
        let config = ShipConfiguration::resolve(&ship, &["PASUH001_Hull_A"]).unwrap();
        assert_eq!(config.component(ComponentType::Artillery), Some("AB1_Artillery"));
        assert_eq!(config.component(ComponentType::Torpedoes), None);
        assert!(config.torpedoes().unwrap().is_none());
    }

    #[test]
    fn unknown_upgrade_is_not_found() {
        let ship = fixtures::cruiser();
        let err = ShipConfiguration::resolve(&ship, &["PASUH999"]).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Upgrade not found: PASUH999");
    }

    #[test]
    fn two_upgrades_in_one_slot_rejected() {
        let ship = fixtures::cruiser();
        let err = ShipConfiguration::resolve(&ship, &["PASUH001_Hull_A", "PASUH002_Hull_B"]).unwrap_err();
        assert!(!err.is_not_found());
    }

    #[test]
    fn module_missing_from_ship_is_not_found() {
        let ship = fixtures::cruiser();
        let config = ShipConfiguration::resolve(&ship, &["PASUE002_Engine_Broken"]).unwrap();
        let err = config.engine().unwrap_err();
        assert_eq!(err.to_string(), "Engine module not found: Missing_Engine");
    }
}
