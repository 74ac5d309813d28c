//! Modifier effects and the per-build modifier collection.

pub mod aggregate;
pub mod kind;

use std::collections::HashMap;

use tracing::debug;

pub use aggregate::{FoldOp, Stage, fold, select};
pub use kind::{MatchRule, ModifierKind};

/// A named coefficient or delta sourced from an upgrade, captain skill,
/// consumable or signal.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierEffect {
    pub key: String,
    pub value: f64,
}

impl ModifierEffect {
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Ordered, immutable collection of the effects that apply to one build.
///
/// Effects are matched against every [`ModifierKind`] once, when the set is
/// built. Pipelines then read values by kind without re-scanning keys.
#[derive(Clone, Debug, Default)]
pub struct ModifierSet {
    effects: Vec<ModifierEffect>,
    by_kind: HashMap<ModifierKind, Vec<f64>>,
}

impl ModifierSet {
    pub fn new<I>(effects: I) -> Self
    where
        I: IntoIterator<Item = ModifierEffect>,
    {
        let effects: Vec<ModifierEffect> = effects.into_iter().collect();
        let mut by_kind: HashMap<ModifierKind, Vec<f64>> = HashMap::new();
        for effect in &effects {
            let mut recognized = false;
            for kind in ModifierKind::ALL {
                if kind.matches(&effect.key) {
                    by_kind.entry(*kind).or_default().push(effect.value);
                    recognized = true;
                }
            }
            if !recognized {
                debug!(key = %effect.key, "modifier is not read by any stat");
            }
        }

        Self { effects, by_kind }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn effects(&self) -> &[ModifierEffect] {
        &self.effects
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Values selected by `kind`, in effect order.
    pub fn values(&self, kind: ModifierKind) -> &[f64] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Ad-hoc string selection over the raw effect keys.
    pub fn select<'a>(&'a self, filter: &'a str, strict: bool) -> impl Iterator<Item = f64> + 'a {
        aggregate::select(&self.effects, filter, strict)
    }

    pub fn fold(&self, kind: ModifierKind, base: f64, op: FoldOp) -> f64 {
        aggregate::fold(self.values(kind).iter().copied(), base, op)
    }

    /// Product of every value of `kind`; `1.0` when none apply.
    pub fn product(&self, kind: ModifierKind) -> f64 {
        self.fold(kind, 1.0, FoldOp::Multiply)
    }

    /// Sum of every value of `kind`; `0.0` when none apply.
    pub fn sum(&self, kind: ModifierKind) -> f64 {
        self.fold(kind, 0.0, FoldOp::Add)
    }

    /// Runs `stages` in order over `base`.
    pub fn apply(&self, base: f64, stages: &[Stage]) -> f64 {
        stages
            .iter()
            .fold(base, |current, stage| self.fold(stage.kind, current, stage.op))
    }

    /// Effects whose key no [`ModifierKind`] reads.
    pub fn unrecognized(&self) -> impl Iterator<Item = &ModifierEffect> {
        self.effects
            .iter()
            .filter(|effect| !ModifierKind::ALL.iter().any(|kind| kind.matches(&effect.key)))
    }

    /// A new set with `extra` appended after the current effects.
    pub fn extended<I>(&self, extra: I) -> ModifierSet
    where
        I: IntoIterator<Item = ModifierEffect>,
    {
        ModifierSet::new(self.effects.iter().cloned().chain(extra))
    }
}

impl FromIterator<ModifierEffect> for ModifierSet {
    fn from_iter<T: IntoIterator<Item = ModifierEffect>>(iter: T) -> Self {
        ModifierSet::new(iter)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ModifierSet {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        ModifierSet::new(
            iter.into_iter()
                .map(|(key, value)| ModifierEffect::new(key, value)),
        )
    }
}
