//! Selection and folding of modifier values.
//!
//! A stat is derived by running a fixed sequence of [`Stage`]s over its base
//! value. Each stage folds every selected value into the running total, left
//! to right. Folding an empty selection returns the running total unchanged.

use super::{ModifierEffect, kind::MatchRule, kind::ModifierKind};

/// How one selected value is folded into the running total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoldOp {
    /// `base *= v`
    Multiply,
    /// `base *= 1 - v / 100`
    PercentReduction,
    /// `base += v`
    Add,
    /// `base += v * 100`. Turns fractional chance bonuses into percentage points.
    AddPercentagePoints,
}

impl FoldOp {
    pub fn apply(self, base: f64, value: f64) -> f64 {
        match self {
            Self::Multiply => base * value,
            Self::PercentReduction => base * (1.0 - value / 100.0),
            Self::Add => base + value,
            Self::AddPercentagePoints => base + value * 100.0,
        }
    }
}

/// One step of a stat's modifier pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stage {
    pub kind: ModifierKind,
    pub op: FoldOp,
}

impl Stage {
    pub const fn multiply(kind: ModifierKind) -> Self {
        Self {
            kind,
            op: FoldOp::Multiply,
        }
    }

    pub const fn percent_reduction(kind: ModifierKind) -> Self {
        Self {
            kind,
            op: FoldOp::PercentReduction,
        }
    }

    pub const fn add(kind: ModifierKind) -> Self {
        Self {
            kind,
            op: FoldOp::Add,
        }
    }

    pub const fn add_percentage_points(kind: ModifierKind) -> Self {
        Self {
            kind,
            op: FoldOp::AddPercentagePoints,
        }
    }
}

/// Values of every effect whose key matches `filter`.
///
/// Matching is a case-insensitive substring test, or exact equality when
/// `strict` is set. Order follows the effect sequence.
pub fn select<'a>(
    effects: &'a [ModifierEffect],
    filter: &'a str,
    strict: bool,
) -> impl Iterator<Item = f64> + 'a {
    let rule = MatchRule::from_strict(strict);
    effects
        .iter()
        .filter(move |effect| rule.matches(filter, &effect.key))
        .map(|effect| effect.value)
}

/// Folds `values` over `base` left to right.
pub fn fold<I>(values: I, base: f64, op: FoldOp) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .fold(base, |current, value| op.apply(current, value))
}

#[cfg(test)]
mod test {
    use super::*;

    fn effects(pairs: &[(&str, f64)]) -> Vec<ModifierEffect> {
        pairs
            .iter()
            .map(|(key, value)| ModifierEffect::new(*key, *value))
            .collect()
    }

    #[test]
    fn empty_fold_is_identity() {
        for op in [
            FoldOp::Multiply,
            FoldOp::PercentReduction,
            FoldOp::Add,
            FoldOp::AddPercentagePoints,
        ] {
            for base in [0.0, 1.0, 24.3, -7.5, 1e9] {
                assert_eq!(fold(std::iter::empty(), base, op), base);
            }
        }
    }

    #[test]
    fn select_without_match_is_identity() {
        let effects = effects(&[("GSShotDelay", 0.8), ("GMMaxDist", 1.2)]);
        let reload = fold(select(&effects, "GMShotDelay", false), 30.0, FoldOp::Multiply);
        assert_eq!(reload, 30.0);
    }

    #[test]
    fn select_substring_and_strict() {
        let effects = effects(&[
            ("torpedoDamageCoeff", 1.05),
            ("planeTorpedoDamageCoeff", 1.2),
            ("TORPEDODAMAGECOEFF", 1.1),
        ]);
        let loose: Vec<_> = select(&effects, "torpedoDamageCoeff", false).collect();
        assert_eq!(loose, vec![1.05, 1.2, 1.1]);
        let strict: Vec<_> = select(&effects, "torpedoDamageCoeff", true).collect();
        assert_eq!(strict, vec![1.05]);
    }

    #[test]
    fn ops() {
        assert_eq!(fold([0.9, 0.5], 30.0, FoldOp::Multiply), 13.5);
        assert_eq!(fold([10.0], 30.0, FoldOp::PercentReduction), 27.0);
        assert_eq!(fold([2.0, 3.0], 1.0, FoldOp::Add), 6.0);
        assert!((fold([0.01, 0.02], 8.0, FoldOp::AddPercentagePoints) - 11.0).abs() < 1e-12);
    }

    #[test]
    fn mixed_stages_do_not_commute() {
        // Additive and multiplicative stages give different results when swapped.
        let add_then_mul = FoldOp::Multiply.apply(FoldOp::Add.apply(10.0, 5.0), 2.0);
        let mul_then_add = FoldOp::Add.apply(FoldOp::Multiply.apply(10.0, 2.0), 5.0);
        assert_ne!(add_then_mul, mul_then_add);
    }
}
