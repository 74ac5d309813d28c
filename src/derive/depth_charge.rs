use tracing::debug;

use crate::error::IResult;
use crate::game_data::DepthCharge;
use crate::modifiers::{FoldOp, ModifierKind, ModifierSet};
use crate::units::Meters;

use super::{BuildContext, round_to};

/// One depth charge, as dropped by a ship or an aircraft.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepthChargeStats {
    pub name: String,
    pub damage: f64,
    pub damage_raw: f64,
    pub splash_radius: Meters,
    /// Percent.
    pub fire_chance: f64,
    /// Percent.
    pub flood_chance: f64,
    /// Meters per second.
    pub sink_speed: f64,
    pub detonation_timer: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepthChargeArmamentStats {
    pub reload: f64,
    pub reload_raw: f64,
    /// Attacks available before reloading.
    pub packs: u32,
    pub bombs_per_pack: u32,
    pub charge: DepthChargeStats,
}

pub fn derive_charge(charge: &DepthCharge, modifiers: &ModifierSet) -> DepthChargeStats {
    let damage = modifiers.fold(ModifierKind::DepthChargeDamage, charge.damage, FoldOp::Multiply);
    let splash_radius = charge.splash_radius * modifiers.product(ModifierKind::DepthChargeSplash);

    DepthChargeStats {
        name: charge.name.clone(),
        damage: round_to(damage, 0),
        damage_raw: damage,
        splash_radius: Meters::new(round_to(splash_radius.value(), 1)),
        fire_chance: round_to(charge.burn_prob * 100.0, 1),
        flood_chance: round_to(charge.flood_chance * 100.0, 1),
        sink_speed: charge.sink_speed,
        detonation_timer: charge.detonation_timer,
    }
}

pub fn derive(ctx: &BuildContext<'_>) -> IResult<Option<DepthChargeArmamentStats>> {
    let Some(module) = ctx.configuration.depth_charges()? else {
        return Ok(None);
    };
    let Some(ammo) = module.ammo_list.first() else {
        debug!(ship = %ctx.ship().name, "depth charge module has no ammunition");
        return Ok(None);
    };
    debug!(ship = %ctx.ship().name, ammo = %ammo, "deriving depth charges");

    let modifiers = ctx.modifiers;
    let charge = derive_charge(ctx.data.depth_charge(ammo)?, modifiers);
    let reload = modifiers.fold(ModifierKind::DepthChargeReload, module.reload, FoldOp::Multiply);
    let packs = modifiers.fold(ModifierKind::DepthChargePacks, f64::from(module.num_packs), FoldOp::Add);

    Ok(Some(DepthChargeArmamentStats {
        reload: round_to(reload, 1),
        reload_raw: reload,
        packs: packs.max(0.0).round() as u32,
        bombs_per_pack: module.bombs_per_pack,
        charge,
    }))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::configuration::ShipConfiguration;
    use crate::derive::fixtures;

    #[test]
    fn stock_cruiser_has_none() {
        let ship = fixtures::cruiser();
        let data = fixtures::data();
        let modifiers = ModifierSet::empty();
        let ctx = fixtures::context(&ship, &data, &modifiers);
        assert!(derive(&ctx).unwrap().is_none());
    }

    #[test]
    fn hull_b_depth_charges() {
        let ship = fixtures::cruiser();
        let data = fixtures::data();
        let modifiers: ModifierSet = [
            ("dcReloadCoeff", 0.8),
            ("dcNumPacksBonus", 1.0),
            ("dcAlphaDamageMultiplier", 1.2),
            ("dcSplashRadiusMultiplier", 1.1),
        ]
        .into_iter()
        .collect();
        let config = ShipConfiguration::resolve(&ship, &["PASUH002_Hull_B"]).unwrap();
        let ctx = BuildContext::builder()
            .configuration(config)
            .modifiers(&modifiers)
            .data(&data)
            .build();

        let stats = derive(&ctx).unwrap().unwrap();
        assert!((stats.reload_raw - 32.0).abs() < 1e-9);
        assert_eq!(stats.packs, 3);
        assert_eq!(stats.bombs_per_pack, 6);
        assert_eq!(stats.charge.damage, 6_000.0);
        assert_eq!(stats.charge.splash_radius, Meters::new(7.7));
        assert_eq!(stats.charge.fire_chance, 20.0);
        assert_eq!(stats.charge.flood_chance, 50.0);
    }

    #[test]
    fn module_without_ammunition_is_none() {
        let mut ship = fixtures::cruiser();
        for module in ship.depth_charges.values_mut() {
            module.ammo_list.clear();
        }
        let data = fixtures::data();
        let modifiers = ModifierSet::empty();
        let config = ShipConfiguration::resolve(&ship, &["PASUH002_Hull_B"]).unwrap();
        assert!(config.depth_charges().unwrap().is_some());
        let ctx = BuildContext::builder()
            .configuration(config)
            .modifiers(&modifiers)
            .data(&data)
            .build();
        assert!(derive(&ctx).unwrap().is_none());
    }
}
