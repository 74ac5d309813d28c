//! Module slot keys used by ship upgrades.

/// Typed representation of component slot keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentType {
    #[cfg_attr(feature = "serde", serde(rename = "hull"))]
    Hull,
    #[cfg_attr(feature = "serde", serde(rename = "artillery"))]
    Artillery,
    #[cfg_attr(feature = "serde", serde(rename = "atba"))]
    Atba,
    #[cfg_attr(feature = "serde", serde(rename = "torpedoes"))]
    Torpedoes,
    #[cfg_attr(feature = "serde", serde(rename = "engine"))]
    Engine,
    #[cfg_attr(feature = "serde", serde(rename = "fireControl"))]
    FireControl,
    #[cfg_attr(feature = "serde", serde(rename = "depthCharges"))]
    DepthCharges,
    #[cfg_attr(feature = "serde", serde(rename = "fighter"))]
    Fighter,
    #[cfg_attr(feature = "serde", serde(rename = "diveBomber"))]
    DiveBomber,
    #[cfg_attr(feature = "serde", serde(rename = "torpedoBomber"))]
    TorpedoBomber,
    #[cfg_attr(feature = "serde", serde(rename = "skipBomber"))]
    SkipBomber,
}

impl ComponentType {
    /// All known component types.
    pub const ALL: &[ComponentType] = &[
        Self::Hull,
        Self::Artillery,
        Self::Atba,
        Self::Torpedoes,
        Self::Engine,
        Self::FireControl,
        Self::DepthCharges,
        Self::Fighter,
        Self::DiveBomber,
        Self::TorpedoBomber,
        Self::SkipBomber,
    ];

    /// The raw string key used in upgrade component dictionaries.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Hull => "hull",
            Self::Artillery => "artillery",
            Self::Atba => "atba",
            Self::Torpedoes => "torpedoes",
            Self::Engine => "engine",
            Self::FireControl => "fireControl",
            Self::DepthCharges => "depthCharges",
            Self::Fighter => "fighter",
            Self::DiveBomber => "diveBomber",
            Self::TorpedoBomber => "torpedoBomber",
            Self::SkipBomber => "skipBomber",
        }
    }

    /// The upgrade slot whose selection decides this component.
    ///
    /// Secondaries and depth charges are fitted with the hull.
    pub fn owning_slot(&self) -> ComponentType {
        match self {
            Self::Atba | Self::DepthCharges => Self::Hull,
            other => *other,
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hull => write!(f, "Hull"),
            Self::Artillery => write!(f, "Main Battery"),
            Self::Atba => write!(f, "Secondaries"),
            Self::Torpedoes => write!(f, "Torpedoes"),
            Self::Engine => write!(f, "Engine"),
            Self::FireControl => write!(f, "Fire Control"),
            Self::DepthCharges => write!(f, "Depth Charges"),
            Self::Fighter => write!(f, "Fighters"),
            Self::DiveBomber => write!(f, "Dive Bombers"),
            Self::TorpedoBomber => write!(f, "Torpedo Bombers"),
            Self::SkipBomber => write!(f, "Skip Bombers"),
        }
    }
}
