//! Sample ships and game data shared by the derivation tests.

use std::collections::HashMap;

use crate::configuration::ShipConfiguration;
use crate::dispersion::DispersionParameters;
use crate::game_data::ComponentType as Slot;
use crate::game_data::*;
use crate::modifiers::{ModifierEffect, ModifierSet};
use crate::units::{BigWorldDistance, Km, Meters, Millimeters};

use super::BuildContext;

pub(crate) fn context<'a>(
    ship: &'a Ship,
    data: &'a GameDataStore,
    modifiers: &'a ModifierSet,
) -> BuildContext<'a> {
    BuildContext::builder()
        .configuration(ShipConfiguration::stock(ship))
        .modifiers(modifiers)
        .data(data)
        .build()
}

/// An upgrade listing `(slot, component)` pairs, in order.
fn upgrade(name: &str, uc_type: Slot, components: &[(Slot, &str)]) -> ShipUpgrade {
    let mut by_slot: HashMap<Slot, Vec<String>> = HashMap::new();
    for (slot, component) in components {
        by_slot.entry(*slot).or_default().push(component.to_string());
    }
    ShipUpgrade::builder()
        .name(name)
        .uc_type(uc_type)
        .components(by_slot)
        .build()
}

fn gun(name: &str, barrels: u32, reload: f64, rotation_speed: f64, ammo: &[&str]) -> Gun {
    Gun::builder()
        .name(name)
        .num_barrels(barrels)
        .reload(reload)
        .rotation_speed(rotation_speed)
        .ammo_list(ammo.iter().map(|a| a.to_string()).collect())
        .build()
}

pub(crate) fn main_battery_dispersion() -> DispersionParameters {
    DispersionParameters::builder()
        .ideal_radius(10.0)
        .min_radius(2.8)
        .ideal_distance(BigWorldDistance::new(1000.0))
        .taper_distance(Meters::new(5000.0))
        .radius_on_zero(0.2)
        .radius_on_delim(0.5)
        .radius_on_max(0.6)
        .delim(0.5)
        .build()
        .unwrap()
}

fn secondary_dispersion() -> DispersionParameters {
    DispersionParameters::builder()
        .ideal_radius(5.0)
        .min_radius(1.0)
        .ideal_distance(BigWorldDistance::new(1000.0))
        .taper_distance(Meters::new(2000.0))
        .radius_on_zero(0.3)
        .radius_on_delim(0.6)
        .radius_on_max(0.8)
        .delim(0.5)
        .build()
        .unwrap()
}

fn hull(health: f64) -> Hull {
    Hull::builder()
        .health(health)
        .max_speed(32.0)
        .rudder_time(10.0)
        .turning_radius(Meters::new(780.0))
        .sea_detection(Km::new(13.0))
        .air_detection(Km::new(8.0))
        .smoke_firing_detection(Km::new(6.0))
        .burn_time(30.0)
        .burn_damage_rate(0.003)
        .flood_time(40.0)
        .flood_damage_rate(0.0025)
        .torpedo_protection(0.15)
        .build()
}

fn secondaries(broken: bool) -> TurretModule {
    let he = &["PAPA010_127mm_HE"];
    let mut guns = vec![
        gun("PAGS001_127mm", 2, 4.0, 10.0, he),
        gun("PAGS002_40mm", 1, 1.5, 20.0, &["PAPA011_40mm_HE"]),
        gun("PAGS001_127mm", 2, 4.0, 10.0, he),
        gun("PAGS001_127mm", 2, 4.0, 10.0, he),
        gun("PAGS002_40mm", 1, 1.5, 20.0, &["PAPA011_40mm_HE"]),
        gun("PAGS001_127mm", 2, 4.0, 10.0, he),
    ];
    if broken {
        guns.retain(|g| g.name != "PAGS002_40mm");
        guns.push(gun("PAGS003_Broken", 1, 3.0, 10.0, &["PAPA999_missing"]));
        guns.push(gun("PAGS003_Broken", 1, 3.0, 10.0, &["PAPA999_missing"]));
        guns.push(gun("PAGS004_Unarmed", 1, 3.0, 10.0, &[]));
    }

    TurretModule::builder()
        .max_range(Meters::new(5000.0))
        .sigma(1.0)
        .dispersion(secondary_dispersion())
        .guns(guns)
        .build()
}

/// Tier 8 cruiser with two hulls, two main battery mounts, torpedoes and
/// a burst-fire ability.
pub(crate) fn cruiser() -> Ship {
    let main_ammo = &["PAPA001_203mm_HE", "PAPA002_203mm_AP"];
    let ab1 = TurretModule::builder()
        .max_range(Meters::new(15_000.0))
        .dispersion(main_battery_dispersion())
        .guns(vec![
            gun("PAGM001_203mm", 3, 12.0, 6.0, main_ammo),
            gun("PAGM001_203mm", 3, 12.0, 6.0, main_ammo),
            gun("PAGM002_203mm_twin", 2, 12.0, 6.0, main_ammo),
            gun("PAGM001_203mm", 3, 12.0, 6.0, main_ammo),
        ])
        .build();
    let ab2_ammo = &["PAPA001_203mm_HE", "PAPA999_missing"];
    let ab2 = TurretModule::builder()
        .max_range(Meters::new(16_000.0))
        .dispersion(main_battery_dispersion())
        .guns(vec![
            gun("PAGM003_203mm", 3, 11.0, 6.0, ab2_ammo),
            gun("PAGM003_203mm", 3, 11.0, 6.0, ab2_ammo),
            gun("PAGM003_203mm", 3, 11.0, 6.0, ab2_ammo),
        ])
        .build();

    let launcher = TorpedoLauncher::builder()
        .name("PATT001_533mm")
        .num_barrels(4)
        .reload(100.0)
        .rotation_speed(25.0)
        .ammo_list(vec!["PATO001_Mk15".into(), "PATO002_Mk17_Deep".into()])
        .build();

    Ship::builder()
        .index("PASC108")
        .name("Baltimore")
        .tier(8)
        .class(ShipClass::Cruiser)
        .upgrades(vec![
            upgrade(
                "PASUH001_Hull_A",
                Slot::Hull,
                &[
                    (Slot::Hull, "A_Hull"),
                    (Slot::Artillery, "AB1_Artillery"),
                    (Slot::Atba, "A_Secondary"),
                ],
            ),
            upgrade(
                "PASUH002_Hull_B",
                Slot::Hull,
                &[
                    (Slot::Hull, "B_Hull"),
                    (Slot::Artillery, "AB2_Artillery"),
                    (Slot::Atba, "B_Secondary"),
                    (Slot::DepthCharges, "B_DepthCharges"),
                ],
            ),
            upgrade("PASUA001_Artillery_A", Slot::Artillery, &[(Slot::Artillery, "AB1_Artillery")]),
            upgrade(
                "PASUA002_Artillery_B",
                Slot::Artillery,
                &[(Slot::Artillery, "AB1_Artillery"), (Slot::Artillery, "AB2_Artillery")],
            ),
            upgrade("PASUT001_Torpedoes", Slot::Torpedoes, &[(Slot::Torpedoes, "A_Torpedoes")]),
            upgrade("PASUE001_Engine", Slot::Engine, &[(Slot::Engine, "A_Engine")]),
            upgrade("PASUE002_Engine_Broken", Slot::Engine, &[(Slot::Engine, "Missing_Engine")]),
            upgrade("PASUS001_FireControl", Slot::FireControl, &[(Slot::FireControl, "A_FireControl")]),
        ])
        .main_battery(HashMap::from([
            ("AB1_Artillery".to_string(), ab1),
            ("AB2_Artillery".to_string(), ab2),
        ]))
        .secondaries(HashMap::from([
            ("A_Secondary".to_string(), secondaries(false)),
            ("B_Secondary".to_string(), secondaries(true)),
        ]))
        .torpedoes(HashMap::from([(
            "A_Torpedoes".to_string(),
            TorpedoModule::builder()
                .launchers(vec![launcher.clone(), launcher])
                .build(),
        )]))
        .hulls(HashMap::from([
            ("A_Hull".to_string(), hull(40_000.0)),
            ("B_Hull".to_string(), hull(42_000.0)),
        ]))
        .engines(HashMap::from([(
            "A_Engine".to_string(),
            Engine::builder().speed_coef(0.05).build(),
        )]))
        .fire_controls(HashMap::from([(
            "A_FireControl".to_string(),
            FireControl::builder().max_range_coeff(1.0).build(),
        )]))
        .depth_charges(HashMap::from([(
            "B_DepthCharges".to_string(),
            DepthChargeModule::builder()
                .reload(40.0)
                .num_packs(2)
                .bombs_per_pack(6)
                .ammo_list(vec!["PADC001_Mk6".into()])
                .build(),
        )]))
        .special_ability(
            SpecialAbility::builder()
                .name("BurstFire")
                .duration(20.0)
                .required_progress(100.0)
                .modifiers(vec![ModifierEffect::new("GMShotDelay", 0.5)])
                .build(),
        )
        .build()
}

/// Tier 10 carrier with a squadron in every role.
pub(crate) fn carrier() -> Ship {
    Ship::builder()
        .index("PASA110")
        .name("Midway")
        .tier(10)
        .class(ShipClass::AirCarrier)
        .upgrades(vec![
            upgrade("PAUH001_Hull", Slot::Hull, &[(Slot::Hull, "CV_Hull")]),
            upgrade("PAUF001_Fighters", Slot::Fighter, &[(Slot::Fighter, "PAUP001_F8F")]),
            upgrade("PAUD001_DiveBombers", Slot::DiveBomber, &[(Slot::DiveBomber, "PAUP002_SB2C")]),
            upgrade("PAUT001_TorpedoBombers", Slot::TorpedoBomber, &[(Slot::TorpedoBomber, "PAUP003_TBF")]),
            upgrade("PAUS001_SkipBombers", Slot::SkipBomber, &[(Slot::SkipBomber, "PAUP004_A26")]),
        ])
        .hulls(HashMap::from([("CV_Hull".to_string(), hull(90_000.0))]))
        .build()
}

fn shell(name: &str, ammo_type: AmmoType, caliber: f64, damage: f64, burn_prob: f64) -> Component {
    Component::Shell(
        Shell::builder()
            .name(name)
            .ammo_type(ammo_type)
            .caliber(Millimeters::new(caliber))
            .damage(damage)
            .burn_prob(burn_prob)
            .maybe_penetration_he((ammo_type == AmmoType::HE).then_some(caliber / 6.0))
            .build(),
    )
}

fn aircraft(name: &str, health: f64, cruise_speed: f64, squadron: (u32, u32), restore_time: f64) -> Aircraft {
    Aircraft::builder()
        .name(name)
        .health(health)
        .cruise_speed(cruise_speed)
        .squadron_size(squadron.0)
        .attack_size(squadron.1)
        .hangar_size(12)
        .restore_time(restore_time)
        .concealment(Km::new(9.0))
        .aiming_rate(0.1)
        .build()
}

pub(crate) fn data() -> GameDataStore {
    let torpedo = |name: &str, torpedo_type: TorpedoType, ignore: Vec<ShipClass>| {
        Torpedo::builder()
            .name(name)
            .damage(15_000.0)
            .speed(66.0)
            .max_dist(BigWorldDistance::new(350.0))
            .visibility(Km::new(1.4))
            .arming_time(2.0)
            .flood_chance(0.25)
            .torpedo_type(torpedo_type)
            .ignore_classes(ignore)
            .build()
    };

    let mut fighter = aircraft("PAUP001_F8F", 1_500.0, 150.0, (8, 4), 50.0);
    fighter.concealment = Km::new(10.0);
    fighter.ordnance = Some(AircraftOrdnance {
        kind: OrdnanceKind::Rocket,
        name: "PAPR001_HVAR".into(),
    });

    let mut dive_bomber = aircraft("PAUP002_SB2C", 1_500.0, 140.0, (9, 3), 55.0);
    dive_bomber.ordnance = Some(AircraftOrdnance {
        kind: OrdnanceKind::Bomb,
        name: "PAPB001_1000lb".into(),
    });

    let mut torpedo_bomber = aircraft("PAUP003_TBF", 1_800.0, 120.0, (8, 2), 60.0);
    torpedo_bomber.ordnance = Some(AircraftOrdnance {
        kind: OrdnanceKind::Torpedo,
        name: "PAPT001_Mk13".into(),
    });

    let mut skip_bomber = aircraft("PAUP004_A26", 2_000.0, 130.0, (6, 3), 70.0);
    skip_bomber.ordnance = Some(AircraftOrdnance {
        kind: OrdnanceKind::SkipBomb,
        name: "PAPB002_500lb_skip".into(),
    });

    GameDataStore::from([
        shell("PAPA001_203mm_HE", AmmoType::HE, 203.0, 2_200.0, 0.1),
        shell("PAPA002_203mm_AP", AmmoType::AP, 203.0, 5_400.0, -0.5),
        shell("PAPA010_127mm_HE", AmmoType::HE, 127.0, 1_800.0, 0.05),
        shell("PAPA011_40mm_HE", AmmoType::HE, 40.0, 600.0, 0.01),
        Component::Torpedo(torpedo("PATO001_Mk15", TorpedoType::Standard, vec![])),
        Component::Torpedo(torpedo(
            "PATO002_Mk17_Deep",
            TorpedoType::DeepWater,
            vec![ShipClass::Destroyer],
        )),
        Component::Torpedo(
            Torpedo::builder()
                .name("PAPT001_Mk13")
                .damage(6_000.0)
                .speed(35.0)
                .max_dist(BigWorldDistance::new(133.0))
                .visibility(Km::new(1.0))
                .build(),
        ),
        Component::Bomb(
            AerialOrdnance::builder()
                .name("PAPB001_1000lb")
                .ammo_type(AmmoType::HE)
                .damage(7_000.0)
                .penetration(40.0)
                .burn_prob(0.3)
                .build(),
        ),
        Component::Bomb(
            AerialOrdnance::builder()
                .name("PAPB002_500lb_skip")
                .ammo_type(AmmoType::HE)
                .damage(4_000.0)
                .penetration(30.0)
                .burn_prob(0.2)
                .build(),
        ),
        Component::Rocket(
            AerialOrdnance::builder()
                .name("PAPR001_HVAR")
                .ammo_type(AmmoType::HE)
                .damage(2_000.0)
                .penetration(25.0)
                .burn_prob(0.05)
                .build(),
        ),
        Component::DepthCharge(
            DepthCharge::builder()
                .name("PADC001_Mk6")
                .damage(5_000.0)
                .burn_prob(0.2)
                .flood_chance(0.5)
                .sink_speed(3.0)
                .detonation_timer(8.0)
                .splash_radius(Meters::new(7.0))
                .build(),
        ),
        Component::Aircraft(fighter),
        Component::Aircraft(dive_bomber),
        Component::Aircraft(torpedo_bomber),
        Component::Aircraft(skip_bomber),
    ])
}
