use std::collections::HashMap;
use std::fmt;

use bon::Builder;
use variantly::Variantly;

use crate::dispersion::DispersionParameters;
use crate::modifiers::ModifierEffect;
use crate::recognized::Recognized;
use crate::salvo::BarrelMount;
use crate::units::{BigWorldDistance, Km, Meters, Millimeters};

use super::keys::ComponentType;

// ─── Identity ─────────────────────────────────────────────────────────────────

/// Nation encoded in the second character of a GameParams index
/// (`PAPA001` is an American projectile, `PJSB018` a Japanese ship).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Nation {
    Usa,
    UnitedKingdom,
    France,
    Germany,
    Italy,
    Japan,
    Ussr,
    Commonwealth,
    PanAmerica,
    Europe,
    PanAsia,
    Netherlands,
    Spain,
}

impl Nation {
    pub fn from_code(code: char) -> Recognized<Self, char> {
        match code {
            'A' => Recognized::Known(Self::Usa),
            'B' => Recognized::Known(Self::UnitedKingdom),
            'F' => Recognized::Known(Self::France),
            'G' => Recognized::Known(Self::Germany),
            'I' => Recognized::Known(Self::Italy),
            'J' => Recognized::Known(Self::Japan),
            'R' => Recognized::Known(Self::Ussr),
            'U' => Recognized::Known(Self::Commonwealth),
            'V' => Recognized::Known(Self::PanAmerica),
            'W' => Recognized::Known(Self::Europe),
            'Z' => Recognized::Known(Self::PanAsia),
            'H' => Recognized::Known(Self::Netherlands),
            'S' => Recognized::Known(Self::Spain),
            other => Recognized::Unknown(other),
        }
    }

    /// Nation partition a component name belongs to.
    pub fn from_param_name(name: &str) -> Recognized<Self, char> {
        Self::from_code(name.chars().nth(1).unwrap_or('?'))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipClass {
    Destroyer,
    Cruiser,
    Battleship,
    AirCarrier,
    Submarine,
    Auxiliary,
}

// ─── Ammunition ───────────────────────────────────────────────────────────────

/// Shell, bomb and rocket ammunition type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AmmoType {
    AP,
    HE,
    #[cfg_attr(feature = "serde", serde(alias = "CS"))]
    SAP,
}

impl AmmoType {
    /// Parse from the game's internal string representation.
    pub fn from_game_str(s: &str) -> Recognized<Self> {
        match s {
            "AP" => Recognized::Known(Self::AP),
            "HE" => Recognized::Known(Self::HE),
            "CS" => Recognized::Known(Self::SAP),
            _ => Recognized::Unknown(s.to_string()),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::AP => "AP",
            Self::HE => "HE",
            Self::SAP => "SAP",
        }
    }
}

impl fmt::Display for AmmoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Artillery shell as stored in game data.
#[derive(Clone, Debug, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shell {
    #[builder(into)]
    pub name: String,
    pub ammo_type: AmmoType,
    pub caliber: Millimeters,
    pub damage: f64,
    /// HE penetration in mm.
    #[cfg_attr(feature = "serde", serde(default))]
    pub penetration_he: Option<f64>,
    /// SAP penetration in mm.
    #[cfg_attr(feature = "serde", serde(default))]
    pub penetration_sap: Option<f64>,
    /// Per-shell fire chance as a fraction. Non-positive means the shell
    /// cannot start fires.
    #[builder(default = -0.5)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub burn_prob: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub muzzle_velocity: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub mass: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub krupp: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub air_drag: f64,
    #[builder(default = 45.0)]
    pub ricochet_angle: f64,
    #[builder(default = 60.0)]
    pub always_ricochet_angle: f64,
    /// Fuse timer in seconds.
    #[builder(default = 0.033)]
    pub fuse_time: f64,
    /// Minimum armor thickness in mm that arms the fuse.
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub arming_threshold: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TorpedoType {
    #[default]
    Standard,
    /// Runs below the draft of the ignored classes.
    DeepWater,
    Magnetic,
}

#[derive(Clone, Debug, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Torpedo {
    #[builder(into)]
    pub name: String,
    pub damage: f64,
    /// Speed in knots.
    pub speed: f64,
    pub max_dist: BigWorldDistance,
    pub visibility: Km,
    /// Seconds after launch before the warhead arms.
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub arming_time: f64,
    /// Flooding chance as a fraction.
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub flood_chance: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub torpedo_type: TorpedoType,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub ignore_classes: Vec<ShipClass>,
}

/// Bomb or rocket carried by aircraft.
#[derive(Clone, Debug, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AerialOrdnance {
    #[builder(into)]
    pub name: String,
    pub ammo_type: AmmoType,
    pub damage: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub caliber: Millimeters,
    /// HE penetration in mm.
    #[cfg_attr(feature = "serde", serde(default))]
    pub penetration: Option<f64>,
    #[builder(default = -0.5)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub burn_prob: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub krupp: f64,
    #[builder(default = 45.0)]
    pub ricochet_angle: f64,
    #[builder(default = 60.0)]
    pub always_ricochet_angle: f64,
    #[builder(default = 0.033)]
    pub fuse_time: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub arming_threshold: f64,
}

#[derive(Clone, Debug, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepthCharge {
    #[builder(into)]
    pub name: String,
    pub damage: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub burn_prob: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub flood_chance: f64,
    /// Sink speed in m/s.
    pub sink_speed: f64,
    /// Seconds between drop and detonation.
    pub detonation_timer: f64,
    pub splash_radius: Meters,
}

// ─── Aircraft ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaneRole {
    Fighter,
    DiveBomber,
    TorpedoBomber,
    SkipBomber,
}

impl PlaneRole {
    pub const ALL: &[PlaneRole] = &[
        Self::Fighter,
        Self::DiveBomber,
        Self::TorpedoBomber,
        Self::SkipBomber,
    ];

    pub fn slot(&self) -> ComponentType {
        match self {
            Self::Fighter => ComponentType::Fighter,
            Self::DiveBomber => ComponentType::DiveBomber,
            Self::TorpedoBomber => ComponentType::TorpedoBomber,
            Self::SkipBomber => ComponentType::SkipBomber,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrdnanceKind {
    Bomb,
    SkipBomb,
    Rocket,
    Torpedo,
    DepthCharge,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AircraftOrdnance {
    pub kind: OrdnanceKind,
    pub name: String,
}

#[derive(Clone, Debug, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aircraft {
    #[builder(into)]
    pub name: String,
    pub health: f64,
    /// Cruise speed in knots.
    pub cruise_speed: f64,
    #[builder(default = 1.0)]
    pub max_speed_multiplier: f64,
    #[builder(default = 1.0)]
    pub min_speed_multiplier: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub boost_time: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub boost_reload: f64,
    pub squadron_size: u32,
    pub attack_size: u32,
    pub hangar_size: u32,
    /// Seconds to restore one plane on deck.
    pub restore_time: f64,
    pub concealment: Km,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub aiming_time: f64,
    /// Accuracy gained per second while aiming.
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub aiming_rate: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_cooldown: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ordnance: Option<AircraftOrdnance>,
    #[builder(default = 1)]
    pub ordnance_per_plane: u32,
}

// ─── Ship modules ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gun {
    #[builder(into)]
    pub name: String,
    pub num_barrels: u32,
    /// Reload in seconds.
    pub reload: f64,
    /// Horizontal rotation speed in degrees per second.
    pub rotation_speed: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub ammo_list: Vec<String>,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub barrel_diameter: Millimeters,
}

impl BarrelMount for Gun {
    fn barrel_count(&self) -> u32 {
        self.num_barrels
    }
}

/// Main battery or secondary battery module.
#[derive(Clone, Debug, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurretModule {
    pub max_range: Meters,
    #[builder(default = 2.0)]
    pub sigma: f64,
    pub dispersion: DispersionParameters,
    pub guns: Vec<Gun>,
}

#[derive(Clone, Debug, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TorpedoLauncher {
    #[builder(into)]
    pub name: String,
    pub num_barrels: u32,
    pub reload: f64,
    pub rotation_speed: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub ammo_list: Vec<String>,
}

impl BarrelMount for TorpedoLauncher {
    fn barrel_count(&self) -> u32 {
        self.num_barrels
    }
}

#[derive(Clone, Debug, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TorpedoModule {
    pub launchers: Vec<TorpedoLauncher>,
}

#[derive(Clone, Debug, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepthChargeModule {
    pub reload: f64,
    /// Number of attacks available.
    pub num_packs: u32,
    pub bombs_per_pack: u32,
    pub ammo_list: Vec<String>,
}

#[derive(Clone, Debug, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FireControl {
    #[builder(default = 1.0)]
    pub max_range_coeff: f64,
}

#[derive(Clone, Debug, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Engine {
    /// Fractional speed bonus over the hull's nominal speed.
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed_coef: f64,
}

#[derive(Clone, Debug, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hull {
    pub health: f64,
    /// Maximum speed in knots.
    pub max_speed: f64,
    /// Rudder shift time in seconds.
    pub rudder_time: f64,
    pub turning_radius: Meters,
    pub sea_detection: Km,
    pub air_detection: Km,
    #[cfg_attr(feature = "serde", serde(default))]
    pub smoke_firing_detection: Option<Km>,
    #[builder(default = 4)]
    pub fire_spots: u32,
    /// Fire duration in seconds.
    pub burn_time: f64,
    /// Fraction of maximum health a fire burns per second.
    pub burn_damage_rate: f64,
    pub flood_time: f64,
    pub flood_damage_rate: f64,
    /// Fraction of torpedo damage absorbed by the anti-torpedo bulge.
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub torpedo_protection: f64,
}

/// A ship-specific ability that charges during battle (burst fire, rage mode).
#[derive(Clone, Debug, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialAbility {
    #[builder(into)]
    pub name: String,
    /// Active duration in seconds.
    pub duration: f64,
    /// Progress needed to activate the ability.
    pub required_progress: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub decrement_delay: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub decrement_count: f64,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub decrement_period: f64,
    /// Effects applied while the ability is active.
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<ModifierEffect>,
}

// ─── Ships ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipUpgrade {
    #[builder(into)]
    pub name: String,
    /// Slot this upgrade occupies.
    pub uc_type: ComponentType,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub components: HashMap<ComponentType, Vec<String>>,
}

impl ShipUpgrade {
    pub fn components(&self, slot: ComponentType) -> &[String] {
        self.components
            .get(&slot)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    #[builder(into)]
    pub index: String,
    #[builder(into)]
    pub name: String,
    pub tier: u32,
    pub class: ShipClass,
    pub upgrades: Vec<ShipUpgrade>,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub main_battery: HashMap<String, TurretModule>,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub secondaries: HashMap<String, TurretModule>,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub torpedoes: HashMap<String, TorpedoModule>,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub hulls: HashMap<String, Hull>,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub engines: HashMap<String, Engine>,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub fire_controls: HashMap<String, FireControl>,
    #[builder(default)]
    #[cfg_attr(feature = "serde", serde(default))]
    pub depth_charges: HashMap<String, DepthChargeModule>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub special_ability: Option<SpecialAbility>,
}

impl Ship {
    pub fn upgrade(&self, name: &str) -> Option<&ShipUpgrade> {
        self.upgrades.iter().find(|u| u.name == name)
    }

    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> crate::error::IResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ─── Snapshot components ──────────────────────────────────────────────────────

/// What kind of record a lookup was looking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Upgrade,
    Module(ComponentType),
    Shell,
    Torpedo,
    Bomb,
    Rocket,
    DepthCharge,
    Aircraft,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upgrade => write!(f, "Upgrade"),
            Self::Module(slot) => write!(f, "{slot} module"),
            Self::Shell => write!(f, "Shell"),
            Self::Torpedo => write!(f, "Torpedo"),
            Self::Bomb => write!(f, "Bomb"),
            Self::Rocket => write!(f, "Rocket"),
            Self::DepthCharge => write!(f, "Depth charge"),
            Self::Aircraft => write!(f, "Aircraft"),
        }
    }
}

/// A record of the read-only game-data snapshot.
#[derive(Clone, Debug, Variantly)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Component {
    Shell(Shell),
    Torpedo(Torpedo),
    Bomb(AerialOrdnance),
    Rocket(AerialOrdnance),
    DepthCharge(DepthCharge),
    Aircraft(Aircraft),
}

impl Component {
    pub fn name(&self) -> &str {
        match self {
            Self::Shell(s) => &s.name,
            Self::Torpedo(t) => &t.name,
            Self::Bomb(b) | Self::Rocket(b) => &b.name,
            Self::DepthCharge(d) => &d.name,
            Self::Aircraft(a) => &a.name,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Shell(_) => ComponentKind::Shell,
            Self::Torpedo(_) => ComponentKind::Torpedo,
            Self::Bomb(_) => ComponentKind::Bomb,
            Self::Rocket(_) => ComponentKind::Rocket,
            Self::DepthCharge(_) => ComponentKind::DepthCharge,
            Self::Aircraft(_) => ComponentKind::Aircraft,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn nation_from_index_prefix() {
        assert_eq!(
            Nation::from_param_name("PAPA001_203mm_HE"),
            Recognized::Known(Nation::Usa)
        );
        assert_eq!(
            Nation::from_param_name("PJPT012_Type93"),
            Recognized::Known(Nation::Japan)
        );
        assert_eq!(Nation::from_param_name("PQXX"), Recognized::Unknown('Q'));
        assert_eq!(Nation::from_param_name(""), Recognized::Unknown('?'));
    }

    #[test]
    fn ammo_type_game_strings() {
        assert_eq!(AmmoType::from_game_str("CS"), Recognized::Known(AmmoType::SAP));
        assert_eq!(AmmoType::from_game_str("HE"), Recognized::Known(AmmoType::HE));
        assert!(AmmoType::from_game_str("torpedo").unknown().is_some());
    }

    #[test]
    fn upgrade_components_default_empty() {
        let upgrade = ShipUpgrade::builder()
            .name("PASUH001")
            .uc_type(ComponentType::Hull)
            .build();
        assert!(upgrade.components(ComponentType::Atba).is_empty());
    }
}
