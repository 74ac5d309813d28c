//! Artillery shell statistics, shared by the main and secondary batteries.

use crate::error::IResult;
use crate::game_data::{AmmoType, GameDataProvider, Shell};
use crate::modifiers::{FoldOp, ModifierKind, ModifierSet, Stage};
use crate::units::Millimeters;

use super::{IsLast, mark_last, round_to};

/// Caliber from which the high-level fire chance factor applies.
const FIRE_FACTOR_HIGH_CALIBER: f64 = 139.0;
/// Caliber above which the high-level flat fire bonus applies.
const FIRE_BONUS_HIGH_CALIBER: f64 = 160.0;
/// Caliber from which the heavy-caliber AP coefficient applies.
const HEAVY_AP_CALIBER: f64 = 190.0;
const OVERMATCH_DIVISOR: f64 = 14.3;

/// Which battery fires the shell. Selects the damage coefficients.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatteryKind {
    Main,
    Secondary,
}

impl BatteryKind {
    fn ap_damage(self) -> ModifierKind {
        match self {
            Self::Main => ModifierKind::MainBatteryApDamage,
            Self::Secondary => ModifierKind::SecondaryApDamage,
        }
    }

    fn non_ap_damage(self) -> ModifierKind {
        match self {
            Self::Main => ModifierKind::MainBatteryHeSapDamage,
            Self::Secondary => ModifierKind::SecondaryHeSapDamage,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShellStats {
    pub name: String,
    pub ammo_type: AmmoType,
    pub caliber: Millimeters,
    pub damage: f64,
    pub damage_raw: f64,
    /// HE or SAP penetration in mm. AP penetration depends on range and is
    /// left to ballistics.
    pub penetration: Option<f64>,
    /// Per-shell fire chance in percent, `0` for shells that cannot start fires.
    pub fire_chance: f64,
    pub fire_chance_raw: f64,
    /// Thickest plating in mm the shell overmatches.
    pub overmatch: u32,
    pub ricochet_angle: Option<f64>,
    pub always_ricochet_angle: Option<f64>,
    pub arming_threshold: f64,
    pub fuse_time: f64,
    pub muzzle_velocity: f64,
    pub mass: f64,
    pub krupp: f64,
    pub air_drag: f64,
    pub is_last: bool,
}

impl ShellStats {
    pub fn can_start_fires(&self) -> bool {
        self.fire_chance_raw > 0.0
    }

    fn base(shell: &Shell) -> Self {
        Self {
            name: shell.name.clone(),
            ammo_type: shell.ammo_type,
            caliber: shell.caliber,
            damage: 0.0,
            damage_raw: shell.damage,
            penetration: None,
            fire_chance: 0.0,
            fire_chance_raw: 0.0,
            overmatch: overmatch(shell.caliber),
            ricochet_angle: Some(shell.ricochet_angle),
            always_ricochet_angle: Some(shell.always_ricochet_angle),
            arming_threshold: shell.arming_threshold,
            fuse_time: shell.fuse_time,
            muzzle_velocity: shell.muzzle_velocity,
            mass: shell.mass,
            krupp: shell.krupp,
            air_drag: shell.air_drag,
            is_last: false,
        }
    }

    fn finish(mut self) -> Self {
        self.damage = round_to(self.damage_raw, 0);
        self.fire_chance = round_to(self.fire_chance_raw, 1);
        self.penetration = self.penetration.map(|pen| round_to(pen, 0));
        self
    }
}

impl IsLast for ShellStats {
    fn set_last(&mut self, is_last: bool) {
        self.is_last = is_last;
    }
}

fn overmatch(caliber: Millimeters) -> u32 {
    (caliber.value() / OVERMATCH_DIVISOR).trunc() as u32
}

/// Derives one shell fired by `battery`.
pub fn derive_shell(shell: &Shell, battery: BatteryKind, modifiers: &ModifierSet) -> ShellStats {
    let stats = ShellStats::base(shell);
    let stats = match shell.ammo_type {
        AmmoType::AP => armor_piercing(stats, battery, modifiers),
        AmmoType::HE => {
            let stats = high_explosive(stats, shell, modifiers);
            apply_non_ap(stats, battery, modifiers)
        }
        AmmoType::SAP => {
            let stats = ShellStats {
                penetration: shell.penetration_sap,
                ..stats
            };
            apply_non_ap(stats, battery, modifiers)
        }
    };
    stats.finish()
}

/// Derives every shell in `ammo`, in order, flagging the last one.
pub fn derive_shells<S: AsRef<str>>(
    ammo: &[S],
    battery: BatteryKind,
    data: &dyn GameDataProvider,
    modifiers: &ModifierSet,
) -> IResult<Vec<ShellStats>> {
    let mut shells = ammo
        .iter()
        .map(|name| Ok(derive_shell(data.shell(name.as_ref())?, battery, modifiers)))
        .collect::<IResult<Vec<_>>>()?;
    mark_last(&mut shells);
    Ok(shells)
}

fn armor_piercing(mut stats: ShellStats, battery: BatteryKind, modifiers: &ModifierSet) -> ShellStats {
    if battery == BatteryKind::Main && stats.caliber.value() >= HEAVY_AP_CALIBER {
        stats.damage_raw = modifiers.fold(ModifierKind::HeavyCaliberApDamage, stats.damage_raw, FoldOp::Multiply);
    }
    stats.damage_raw = modifiers.fold(battery.ap_damage(), stats.damage_raw, FoldOp::Multiply);
    stats
}

fn high_explosive(mut stats: ShellStats, shell: &Shell, modifiers: &ModifierSet) -> ShellStats {
    let caliber = shell.caliber.value();

    if shell.burn_prob > 0.0 {
        let factor = if caliber >= FIRE_FACTOR_HIGH_CALIBER {
            ModifierKind::BurnChanceFactorHighLevel
        } else {
            ModifierKind::BurnChanceFactorLowLevel
        };
        let bonus = if caliber > FIRE_BONUS_HIGH_CALIBER {
            ModifierKind::BurnChanceBonusHighLevel
        } else {
            ModifierKind::BurnChanceBonusLowLevel
        };
        let fire = modifiers.apply(
            shell.burn_prob * 100.0,
            &[
                Stage::multiply(factor),
                Stage::add_percentage_points(bonus),
                Stage::add_percentage_points(ModifierKind::BurnProbabilityBonus),
                Stage::add_percentage_points(ModifierKind::ArtilleryBurnChanceBonus),
            ],
        );
        stats.fire_chance_raw = fire.clamp(0.0, 100.0);
    }

    stats.penetration = shell
        .penetration_he
        .map(|pen| modifiers.fold(ModifierKind::HePenetration, pen, FoldOp::Multiply));
    stats.overmatch = 0;
    stats.ricochet_angle = None;
    stats.always_ricochet_angle = None;
    stats
}

/// Rules HE and SAP share: no arming delay and the HE/SAP damage coefficient.
fn apply_non_ap(mut stats: ShellStats, battery: BatteryKind, modifiers: &ModifierSet) -> ShellStats {
    stats.arming_threshold = 0.0;
    stats.fuse_time = 0.0;
    stats.damage_raw = modifiers.fold(battery.non_ap_damage(), stats.damage_raw, FoldOp::Multiply);
    stats
}
