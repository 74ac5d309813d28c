//! Shell dispersion ellipse model.
//!
//! Game data describes a gun's spread with eight parameters. Radii are in
//! BigWorld units and distances use the units the game stores them in: the
//! ideal distance in BigWorld units, the taper distance in meters. Every
//! intermediate value is kept at full precision; callers round results.
//!
//! Horizontal radius, with `x` the range in BigWorld units:
//!
//! * `x <= taper`: `x * (ideal - min) / idealDistance + min * x / taper`
//! * otherwise: `x * (ideal - min) / idealDistance + min`
//!
//! Both branches meet at `x == taper`. The vertical radius is the horizontal
//! radius scaled by a coefficient that moves linearly from `radiusOnZero` to
//! `radiusOnDelim` up to `delim * maxRange`, then from `radiusOnDelim` to
//! `radiusOnMax` at maximum range.
//!
//! The ideal distance is a slope denominator, not a reachable range. Game
//! data commonly sets it to 1000 BigWorld units (30 km), past the maximum
//! range of most batteries, so it is never checked against `maxRange`.

use std::fmt;

use bon::bon;

use crate::error::{IResult, invariant};
use crate::units::{BW_TO_METERS, BigWorldDistance, Meters};

/// Static dispersion parameters of one gun type.
///
/// Only constructed through [`DispersionParameters::builder`], which rejects
/// parameter sets the geometry cannot evaluate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDispersion"))]
pub struct DispersionParameters {
    ideal_radius: f64,
    min_radius: f64,
    ideal_distance: BigWorldDistance,
    taper_distance: Meters,
    radius_on_zero: f64,
    radius_on_delim: f64,
    radius_on_max: f64,
    delim: f64,
}

/// Where a range falls in the piecewise model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DispersionRegime {
    /// Up to the taper distance.
    Near,
    /// Between the taper distance and `delim * maxRange`.
    Mid,
    /// Beyond `delim * maxRange`.
    Far,
}

#[bon]
impl DispersionParameters {
    #[builder]
    pub fn new(
        ideal_radius: f64,
        min_radius: f64,
        ideal_distance: BigWorldDistance,
        taper_distance: Meters,
        radius_on_zero: f64,
        radius_on_delim: f64,
        radius_on_max: f64,
        delim: f64,
    ) -> IResult<Self> {
        let radii = [
            ideal_radius,
            min_radius,
            radius_on_zero,
            radius_on_delim,
            radius_on_max,
        ];
        if radii.iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(invariant(format!(
                "dispersion radii must be finite and non-negative, got {radii:?}"
            )));
        }
        if !(ideal_distance.value() > 0.0) {
            return Err(invariant(format!(
                "ideal distance must be positive, got {}",
                ideal_distance.value()
            )));
        }
        if !(taper_distance.value() > 0.0) {
            return Err(invariant(format!(
                "taper distance must be positive, got {}",
                taper_distance.value()
            )));
        }
        if taper_distance >= ideal_distance.to_meters() {
            return Err(invariant(format!(
                "taper distance {}m must be below the ideal distance {}m",
                taper_distance.value(),
                ideal_distance.to_meters().value()
            )));
        }
        if !(delim > 0.0 && delim < 1.0) {
            return Err(invariant(format!(
                "delim fraction must lie in (0, 1), got {delim}"
            )));
        }

        Ok(Self {
            ideal_radius,
            min_radius,
            ideal_distance,
            taper_distance,
            radius_on_zero,
            radius_on_delim,
            radius_on_max,
            delim,
        })
    }
}

impl DispersionParameters {
    pub fn ideal_radius(&self) -> f64 {
        self.ideal_radius
    }

    pub fn min_radius(&self) -> f64 {
        self.min_radius
    }

    pub fn ideal_distance(&self) -> BigWorldDistance {
        self.ideal_distance
    }

    pub fn taper_distance(&self) -> Meters {
        self.taper_distance
    }

    pub fn radius_on_zero(&self) -> f64 {
        self.radius_on_zero
    }

    pub fn radius_on_delim(&self) -> f64 {
        self.radius_on_delim
    }

    pub fn radius_on_max(&self) -> f64 {
        self.radius_on_max
    }

    pub fn delim(&self) -> f64 {
        self.delim
    }

    /// Copy with the ideal radius scaled by a dispersion modifier.
    pub fn with_ideal_radius_modifier(&self, modifier: f64) -> Self {
        Self {
            ideal_radius: self.ideal_radius * modifier,
            ..*self
        }
    }

    fn slope(&self) -> f64 {
        (self.ideal_radius - self.min_radius) / self.ideal_distance.value()
    }

    /// Horizontal dispersion radius at `range`.
    pub fn horizontal(&self, range: Meters) -> Meters {
        let x = range.to_bigworld().value();
        let taper = self.taper_distance.to_bigworld().value();
        let radius = if x <= taper {
            x * self.slope() + self.min_radius * (x / taper)
        } else {
            x * self.slope() + self.min_radius
        };
        Meters::new(radius * BW_TO_METERS)
    }

    /// Vertical dispersion radius at `range` for a gun whose maximum range is
    /// `max_range`.
    pub fn vertical(&self, range: Meters, max_range: Meters) -> IResult<Meters> {
        Ok(self.horizontal(range) * self.vertical_coefficient(range, max_range)?)
    }

    /// Ratio of vertical to horizontal radius at `range`.
    pub fn vertical_coefficient(&self, range: Meters, max_range: Meters) -> IResult<f64> {
        let max_bw = max_range.to_bigworld().value();
        if !(max_bw > 0.0) {
            return Err(invariant(format!(
                "maximum range must be positive, got {}m",
                max_range.value()
            )));
        }

        let x = range.to_bigworld().value();
        let delim_dist = max_bw * self.delim;
        let coefficient = if x < delim_dist {
            self.radius_on_zero + (self.radius_on_delim - self.radius_on_zero) * (x / delim_dist)
        } else {
            let v_radius_coeff =
                (self.radius_on_max - self.radius_on_delim) / (max_bw * (1.0 - self.delim));
            self.radius_on_delim + v_radius_coeff * (x - delim_dist)
        };
        Ok(coefficient)
    }

    pub fn regime(&self, range: Meters, max_range: Meters) -> DispersionRegime {
        if range <= self.taper_distance {
            DispersionRegime::Near
        } else if range.value() <= self.delim * max_range.value() {
            DispersionRegime::Mid
        } else {
            DispersionRegime::Far
        }
    }

    /// Linear horizontal formula in kilometers, valid past the taper distance.
    pub fn formula(&self) -> DispersionFormula {
        DispersionFormula {
            slope: self.slope() * 1000.0,
            intercept: BW_TO_METERS * self.min_radius,
        }
    }
}

/// `horizontal radius (m) = range (km) * slope + intercept`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispersionFormula {
    pub slope: f64,
    pub intercept: f64,
}

impl DispersionFormula {
    pub fn evaluate(&self, range_km: f64) -> f64 {
        range_km * self.slope + self.intercept
    }
}

impl fmt::Display for DispersionFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X * {:.2} + {:.2}", self.slope, self.intercept)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDispersion {
    ideal_radius: f64,
    min_radius: f64,
    ideal_distance: BigWorldDistance,
    taper_distance: Meters,
    radius_on_zero: f64,
    radius_on_delim: f64,
    radius_on_max: f64,
    delim: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDispersion> for DispersionParameters {
    type Error = crate::error::Error;

    fn try_from(raw: RawDispersion) -> Result<Self, Self::Error> {
        DispersionParameters::builder()
            .ideal_radius(raw.ideal_radius)
            .min_radius(raw.min_radius)
            .ideal_distance(raw.ideal_distance)
            .taper_distance(raw.taper_distance)
            .radius_on_zero(raw.radius_on_zero)
            .radius_on_delim(raw.radius_on_delim)
            .radius_on_max(raw.radius_on_max)
            .delim(raw.delim)
            .build()
    }
}
