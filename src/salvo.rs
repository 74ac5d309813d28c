//! Salvo math shared by the gun, torpedo and depth-charge pipelines.

use std::fmt;

use itertools::Itertools;

/// Anything mounted with a number of barrels (guns, torpedo launchers).
pub trait BarrelMount {
    fn barrel_count(&self) -> u32;
}

/// Shots per minute for one barrel.
pub fn rate_of_fire(reload: f64) -> f64 {
    60.0 / reload
}

/// Theoretical damage per minute if every shell of every salvo hits.
pub fn theoretical_dpm(shell_damage: f64, barrel_count: u32, rate_of_fire: f64) -> f64 {
    (shell_damage * f64::from(barrel_count) * rate_of_fire).round()
}

/// Chance, in percent, that at least one shell of a full salvo starts a fire.
///
/// `fire_chance` is the per-shell chance in percent. The result is not rounded
/// and never exceeds 100.
pub fn fire_chance_per_salvo(fire_chance: f64, barrel_count: u32) -> f64 {
    let per_shell = (fire_chance / 100.0).clamp(0.0, 1.0);
    let none_ignite = (1.0 - per_shell).powi(barrel_count as i32);
    (1.0 - none_ignite) * 100.0
}

/// Expected fires started per minute with every shell hitting.
pub fn fires_per_minute(fire_chance: f64, barrel_count: u32, rate_of_fire: f64) -> f64 {
    fire_chance / 100.0 * f64::from(barrel_count) * rate_of_fire
}

/// One group of identical mounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MountGroup {
    pub barrels_per_turret: u32,
    pub turret_count: u32,
}

/// Mounts grouped by barrel count, ordered by ascending turret count.
///
/// Groups with the same turret count keep the order in which their barrel
/// count first appears.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarrelArrangement {
    groups: Vec<MountGroup>,
}

impl BarrelArrangement {
    pub fn from_mounts<'a, M, I>(mounts: I) -> Self
    where
        M: BarrelMount + 'a,
        I: IntoIterator<Item = &'a M>,
    {
        let mut groups: Vec<MountGroup> = Vec::new();
        for mount in mounts {
            let barrels = mount.barrel_count();
            match groups.iter_mut().find(|g| g.barrels_per_turret == barrels) {
                Some(group) => group.turret_count += 1,
                None => groups.push(MountGroup {
                    barrels_per_turret: barrels,
                    turret_count: 1,
                }),
            }
        }

        Self {
            groups: groups
                .into_iter()
                .sorted_by_key(|g| g.turret_count)
                .collect(),
        }
    }

    pub fn groups(&self) -> &[MountGroup] {
        &self.groups
    }

    pub fn turret_count(&self) -> u32 {
        self.groups.iter().map(|g| g.turret_count).sum()
    }

    /// Barrels firing in a full salvo.
    pub fn total_barrels(&self) -> u32 {
        self.groups
            .iter()
            .map(|g| g.barrels_per_turret * g.turret_count)
            .sum()
    }
}

impl fmt::Display for BarrelArrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .groups
            .iter()
            .map(|g| format!("{}x{}", g.turret_count, g.barrels_per_turret))
            .join(" + ");
        f.write_str(&text)
    }
}
