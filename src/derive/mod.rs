//! Per-armament derivation of build statistics.
//!
//! Every family is a pure function of a [`BuildContext`]. A family returns
//! `Ok(None)` when the ship has nothing configured for it, and propagates a
//! missing module or ammunition record as [`ErrorKind::NotFound`].
//!
//! Records keep their display fields rounded. Values that later calculations
//! depend on are kept unrounded in `*_raw` fields.
//!
//! [`ErrorKind::NotFound`]: crate::error::ErrorKind::NotFound

pub mod aircraft;
pub mod concealment;
pub mod depth_charge;
pub mod main_battery;
pub mod maneuverability;
pub mod ordnance;
pub mod secondary_battery;
pub mod shell;
pub mod ship;
pub mod special_ability;
pub mod survivability;
pub mod torpedo;

#[cfg(test)]
pub(crate) mod fixtures;

use bon::Builder;
use itertools::Itertools;

use crate::configuration::ShipConfiguration;
use crate::dispersion::{DispersionFormula, DispersionParameters, DispersionRegime};
use crate::error::IResult;
use crate::game_data::{GameDataProvider, Ship};
use crate::modifiers::ModifierSet;
use crate::units::Meters;

pub use ship::{ShipBuild, ShipStats, derive_builds, derive_ship};

/// Knobs that change how statistics are evaluated, not what they are.
#[derive(Clone, Copy, Debug, Default, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivationOptions {
    /// Range at which dispersion ellipses are evaluated. Defaults to the
    /// battery's modified maximum range and never exceeds it.
    pub dispersion_range: Option<Meters>,
}

/// Everything one build evaluation reads.
#[derive(Clone, Builder)]
pub struct BuildContext<'a> {
    pub configuration: ShipConfiguration<'a>,
    pub modifiers: &'a ModifierSet,
    pub data: &'a dyn GameDataProvider,
    #[builder(default)]
    pub options: DerivationOptions,
}

impl<'a> BuildContext<'a> {
    pub fn ship(&self) -> &'a Ship {
        self.configuration.ship()
    }

    /// The same build evaluated under a different modifier set.
    pub fn with_modifiers<'b>(&self, modifiers: &'b ModifierSet) -> BuildContext<'b>
    where
        'a: 'b,
    {
        BuildContext {
            configuration: self.configuration.clone(),
            modifiers,
            data: self.data,
            options: self.options,
        }
    }

    /// Range to evaluate dispersion at for a battery reaching `max_range`,
    /// kept within `0..=max_range`.
    pub(crate) fn dispersion_range(&self, max_range: Meters) -> Meters {
        self.options
            .dispersion_range
            .map(|range| range.min(max_range).max(Meters::new(0.0)))
            .unwrap_or(max_range)
    }
}

/// Dispersion ellipse of a battery at one range.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispersionStats {
    /// Range the ellipse was evaluated at.
    pub range: Meters,
    pub horizontal: Meters,
    pub vertical: Meters,
    pub regime: DispersionRegime,
    /// Horizontal radius as a linear function of range in km.
    pub formula: DispersionFormula,
}

impl DispersionStats {
    /// Evaluates the ellipse at `range`. The ideal distance may lie beyond
    /// `max_range`; the horizontal radius stays linear up to `max_range`.
    pub(crate) fn evaluate(
        parameters: &DispersionParameters,
        range: Meters,
        max_range: Meters,
    ) -> IResult<Self> {
        Ok(Self {
            range,
            horizontal: Meters::new(round_to(parameters.horizontal(range).value(), 1)),
            vertical: Meters::new(round_to(parameters.vertical(range, max_range)?.value(), 1)),
            regime: parameters.regime(range, max_range),
            formula: parameters.formula(),
        })
    }
}

/// Rounds `value` at `places` decimals, ties to even.
///
/// Ties are judged on the scaled binary value: `2.345` scales to
/// `234.50000000000003` and rounds up, while `0.125` scales to exactly
/// `12.5` and rounds to `0.12`.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round_ties_even() / scale
}

/// Whole number with `,` between groups of three digits.
pub fn format_thousands(value: f64) -> String {
    let whole = value.round_ties_even();
    let digits = whole.abs().to_string();
    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| chunk.iter().map(|b| char::from(*b)).collect::<String>())
        .join(",");
    if whole < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Flags the last element of a derived list.
pub(crate) trait IsLast {
    fn set_last(&mut self, is_last: bool);
}

pub(crate) fn mark_last<T: IsLast>(items: &mut [T]) {
    let count = items.len();
    for (i, item) in items.iter_mut().enumerate() {
        item.set_last(i + 1 == count);
    }
}
