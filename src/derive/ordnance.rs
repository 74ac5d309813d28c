//! Bombs and rockets dropped by aircraft.

use crate::game_data::{AerialOrdnance, AmmoType};
use crate::modifiers::{FoldOp, ModifierKind, ModifierSet};

use super::{IsLast, round_to};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrdnanceFamily {
    Bomb,
    Rocket,
}

impl OrdnanceFamily {
    fn ap_damage(self) -> ModifierKind {
        match self {
            Self::Bomb => ModifierKind::BombApDamage,
            Self::Rocket => ModifierKind::RocketApDamage,
        }
    }

    fn damage(self) -> ModifierKind {
        match self {
            Self::Bomb => ModifierKind::BombDamage,
            Self::Rocket => ModifierKind::RocketDamage,
        }
    }

    fn burn_chance(self) -> ModifierKind {
        match self {
            Self::Bomb => ModifierKind::BombBurnChance,
            Self::Rocket => ModifierKind::RocketBurnChance,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrdnanceStats {
    pub name: String,
    pub family: OrdnanceFamily,
    pub ammo_type: AmmoType,
    pub damage: f64,
    pub damage_raw: f64,
    pub penetration: Option<f64>,
    /// Percent; always `0` for armor-piercing ordnance.
    pub fire_chance: f64,
    pub ricochet_angle: Option<f64>,
    pub always_ricochet_angle: Option<f64>,
    pub arming_threshold: Option<f64>,
    pub fuse_time: Option<f64>,
    pub is_last: bool,
}

impl IsLast for OrdnanceStats {
    fn set_last(&mut self, is_last: bool) {
        self.is_last = is_last;
    }
}

pub fn derive_ordnance(
    ordnance: &AerialOrdnance,
    family: OrdnanceFamily,
    modifiers: &ModifierSet,
) -> OrdnanceStats {
    match ordnance.ammo_type {
        AmmoType::AP => {
            let damage = modifiers.fold(family.ap_damage(), ordnance.damage, FoldOp::Multiply);
            OrdnanceStats {
                name: ordnance.name.clone(),
                family,
                ammo_type: ordnance.ammo_type,
                damage: round_to(damage, 0),
                damage_raw: damage,
                penetration: None,
                fire_chance: 0.0,
                ricochet_angle: Some(ordnance.ricochet_angle),
                always_ricochet_angle: Some(ordnance.always_ricochet_angle),
                arming_threshold: Some(ordnance.arming_threshold),
                fuse_time: Some(ordnance.fuse_time),
                is_last: false,
            }
        }
        AmmoType::HE | AmmoType::SAP => {
            let damage = modifiers.fold(family.damage(), ordnance.damage, FoldOp::Multiply);
            let fire_chance = if ordnance.burn_prob > 0.0 {
                modifiers
                    .fold(family.burn_chance(), ordnance.burn_prob * 100.0, FoldOp::AddPercentagePoints)
                    .clamp(0.0, 100.0)
            } else {
                0.0
            };
            OrdnanceStats {
                name: ordnance.name.clone(),
                family,
                ammo_type: ordnance.ammo_type,
                damage: round_to(damage, 0),
                damage_raw: damage,
                penetration: ordnance.penetration.map(|pen| round_to(pen, 0)),
                fire_chance: round_to(fire_chance, 1),
                ricochet_angle: None,
                always_ricochet_angle: None,
                arming_threshold: None,
                fuse_time: None,
                is_last: false,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn bomb(ammo_type: AmmoType) -> AerialOrdnance {
        AerialOrdnance::builder()
            .name("PABB001_1000lb")
            .ammo_type(ammo_type)
            .damage(7_000.0)
            .penetration(40.0)
            .burn_prob(0.3)
            .arming_threshold(40.0)
            .build()
    }

    #[test]
    fn ap_bombs_never_burn() {
        let modifiers: ModifierSet = [
            ("bombBurnChanceBonus", 0.05),
            ("bombApAlphaDamageMultiplier", 1.1),
            ("bombAlphaDamageMultiplier", 2.0),
        ]
        .into_iter()
        .collect();
        let stats = derive_ordnance(&bomb(AmmoType::AP), OrdnanceFamily::Bomb, &modifiers);
        assert_eq!(stats.fire_chance, 0.0);
        assert_eq!(stats.damage, 7_700.0);
        assert_eq!(stats.arming_threshold, Some(40.0));
        assert_eq!(stats.penetration, None);
    }

    #[test]
    fn he_bombs_stack_fire_bonuses() {
        let modifiers: ModifierSet = [
            ("bombBurnChanceBonus", 0.05),
            ("bombBurnChanceBonus", 0.02),
            ("rocketBurnChanceBonus", 0.5),
            ("bombAlphaDamageMultiplier", 1.1),
        ]
        .into_iter()
        .collect();
        let stats = derive_ordnance(&bomb(AmmoType::HE), OrdnanceFamily::Bomb, &modifiers);
        assert_eq!(stats.fire_chance, 37.0);
        assert_eq!(stats.damage, 7_700.0);
        assert_eq!(stats.penetration, Some(40.0));
        assert_eq!(stats.ricochet_angle, None);
        assert_eq!(stats.arming_threshold, None);
        assert_eq!(stats.fuse_time, None);
    }

    #[test]
    fn rockets_use_rocket_keys() {
        let modifiers: ModifierSet = [("rocketAlphaDamageMultiplier", 1.5), ("bombAlphaDamageMultiplier", 3.0)]
            .into_iter()
            .collect();
        let stats = derive_ordnance(&bomb(AmmoType::HE), OrdnanceFamily::Rocket, &modifiers);
        assert_eq!(stats.damage, 10_500.0);
    }
}
