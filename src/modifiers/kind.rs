//! Typed modifier keys.
//!
//! Every key the derivation pipelines read is declared here once, together
//! with the rule used to match it against the free-form keys produced by the
//! modifier-collection builder.

use std::fmt;

/// How a [`ModifierKind`]'s key is matched against an effect key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchRule {
    /// Case-insensitive substring match.
    Contains,
    /// Case-sensitive equality. Used where the key is itself a substring of
    /// an unrelated key.
    Exact,
}

impl MatchRule {
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Exact } else { Self::Contains }
    }

    pub fn matches(self, filter: &str, key: &str) -> bool {
        match self {
            Self::Exact => key == filter,
            Self::Contains => key.to_lowercase().contains(&filter.to_lowercase()),
        }
    }
}

macro_rules! modifier_kinds {
    ($($(#[$meta:meta])* $variant:ident => $key:literal, $rule:ident;)+) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum ModifierKind {
            $($(#[$meta])* $variant,)+
        }

        impl ModifierKind {
            /// All known modifier kinds.
            pub const ALL: &[ModifierKind] = &[$(Self::$variant,)+];

            /// The raw key this kind selects on.
            pub fn key(self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }

            pub fn match_rule(self) -> MatchRule {
                match self {
                    $(Self::$variant => MatchRule::$rule,)+
                }
            }
        }
    };
}

modifier_kinds! {
    // Main battery
    MainBatteryShotDelay => "GMShotDelay", Contains;
    /// Percentage reload reduction, applied as `base * (1 - v / 100)`.
    LastChanceReload => "lastChanceReloadCoefficient", Contains;
    ArtilleryReload => "artilleryReloadCoeff", Contains;
    MainBatteryRotationSpeed => "GMRotationSpeed", Contains;
    MainBatteryMaxDist => "GMMaxDist", Contains;
    MainBatteryIdealRadius => "GMIdealRadius", Contains;
    HeavyCaliberApDamage => "GMHeavyCruiserCaliberDamageCoeff", Contains;
    MainBatteryApDamage => "GMAPDamageCoeff", Contains;
    MainBatteryHeSapDamage => "GMHECSDamageCoeff", Contains;

    // Shell fire chance and HE penetration
    BurnChanceFactorHighLevel => "burnChanceFactorHighLevel", Contains;
    BurnChanceFactorLowLevel => "burnChanceFactorLowLevel", Contains;
    BurnChanceBonusHighLevel => "burnChanceBonusHighLevel", Contains;
    BurnChanceBonusLowLevel => "burnChanceBonusLowLevel", Contains;
    BurnProbabilityBonus => "burnProbabilityBonus", Contains;
    ArtilleryBurnChanceBonus => "artilleryBurnChanceBonus", Contains;
    HePenetration => "penetrationCoeffHE", Contains;

    // Secondary battery
    SecondaryShotDelay => "GSShotDelay", Contains;
    SecondaryMaxDist => "GSMaxDist", Contains;
    SecondaryIdealRadius => "GSIdealRadius", Contains;
    SecondaryApDamage => "GSAPDamageCoeff", Contains;
    SecondaryHeSapDamage => "GSHECSDamageCoeff", Contains;

    // Ship torpedoes
    TorpedoShotDelay => "GTShotDelay", Contains;
    TorpedoRotationSpeed => "GTRotationSpeed", Contains;
    TorpedoDamage => "torpedoDamageCoeff", Exact;
    TorpedoSpeed => "torpedoSpeedMultiplier", Exact;
    TorpedoRange => "torpedoRangeCoefficient", Contains;
    TorpedoVisibility => "torpedoVisibilityFactor", Contains;
    FloodChance => "floodChanceFactor", Exact;

    // Aerial torpedoes
    PlaneTorpedoDamage => "planeTorpedoDamageCoeff", Contains;
    PlaneTorpedoSpeed => "planeTorpedoSpeedMultiplier", Contains;
    PlaneFloodChance => "floodChanceFactorPlane", Contains;

    // Bombs and rockets
    BombApDamage => "bombApAlphaDamageMultiplier", Contains;
    BombDamage => "bombAlphaDamageMultiplier", Contains;
    BombBurnChance => "bombBurnChanceBonus", Contains;
    RocketApDamage => "rocketApAlphaDamageMultiplier", Contains;
    RocketDamage => "rocketAlphaDamageMultiplier", Contains;
    RocketBurnChance => "rocketBurnChanceBonus", Contains;

    // Depth charges
    DepthChargeReload => "dcReloadCoeff", Contains;
    DepthChargePacks => "dcNumPacksBonus", Contains;
    DepthChargeDamage => "dcAlphaDamageMultiplier", Contains;
    DepthChargeSplash => "dcSplashRadiusMultiplier", Contains;

    // Aircraft, shared
    PlaneHealth => "planeHealthCoeff", Exact;
    /// Flat health added per ship tier.
    PlaneHealthPerLevel => "planeHealthPerLevel", Contains;
    PlaneSpeed => "planeSpeed", Exact;
    PlaneSpawnTime => "planeSpawnTime", Contains;
    PlaneExtraHangarSize => "planeExtraHangarSize", Contains;
    PlaneBoostReload => "planeBoostReloadCoeff", Contains;
    PlaneVisibility => "planeVisibilityFactor", Contains;

    // Aircraft, per role
    FighterHealth => "fighterHealth", Contains;
    FighterSpeed => "fighterSpeedMultiplier", Contains;
    FighterAimingRate => "fighterAccuracyIncRateCoeff", Contains;
    DiveBomberHealth => "diveBomberHealth", Contains;
    DiveBomberSpeed => "diveBomberSpeedMultiplier", Contains;
    DiveBomberAimingRate => "diveBomberAccuracyIncRateCoeff", Contains;
    TorpedoBomberHealth => "torpedoBomberHealth", Contains;
    TorpedoBomberSpeed => "torpedoBomberSpeedMultiplier", Contains;
    TorpedoBomberAimingRate => "torpedoBomberAccuracyIncRateCoeff", Contains;
    SkipBomberHealth => "skipBomberHealth", Contains;
    SkipBomberSpeed => "skipBomberSpeedMultiplier", Contains;
    SkipBomberAimingRate => "skipBomberAccuracyIncRateCoeff", Contains;

    SpecialAbilityDuration => "specialAbilityDurationCoeff", Contains;

    // Survivability
    HealthPerLevel => "healthPerLevel", Exact;
    BurnTime => "burnTime", Contains;
    FloodTime => "floodTime", Contains;

    // Maneuverability
    SpeedCoef => "speedCoef", Exact;
    RudderTime => "SGRudderTime", Contains;

    // Concealment
    Visibility => "visibilityFactor", Exact;
    VisibilityByPlane => "visibilityFactorByPlane", Contains;
}

impl ModifierKind {
    /// Whether an effect key is selected by this kind.
    pub fn matches(self, effect_key: &str) -> bool {
        self.match_rule().matches(self.key(), effect_key)
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn keys_are_unique() {
        let keys: HashSet<_> = ModifierKind::ALL.iter().map(|k| k.key()).collect();
        assert_eq!(keys.len(), ModifierKind::ALL.len());
    }

    #[test]
    fn contains_is_case_insensitive() {
        assert!(ModifierKind::MainBatteryShotDelay.matches("gmshotdelay"));
        assert!(ModifierKind::MainBatteryShotDelay.matches("PCM013_GMShotDelay"));
        assert!(!ModifierKind::MainBatteryShotDelay.matches("GSShotDelay"));
    }

    #[test]
    fn exact_kinds_ignore_longer_keys() {
        assert!(ModifierKind::TorpedoDamage.matches("torpedoDamageCoeff"));
        assert!(!ModifierKind::TorpedoDamage.matches("planeTorpedoDamageCoeff"));
        assert!(!ModifierKind::Visibility.matches("torpedoVisibilityFactor"));
        assert!(ModifierKind::PlaneHealth.matches("planeHealthCoeff"));
        assert!(!ModifierKind::PlaneHealth.matches("planeHealthPerLevel"));
        assert!(!ModifierKind::HealthPerLevel.matches("planeHealthPerLevel"));
        assert!(!ModifierKind::FloodChance.matches("floodChanceFactorPlane"));
    }

    /// Every substring collision between two `Contains` keys would make one
    /// kind silently pick up the other's effects.
    #[test]
    fn no_contains_key_swallows_another_key() {
        for outer in ModifierKind::ALL {
            for inner in ModifierKind::ALL {
                if outer == inner {
                    continue;
                }
                assert!(
                    !inner.matches(outer.key()),
                    "{inner:?} would also select {outer:?}"
                );
            }
        }
    }
}
