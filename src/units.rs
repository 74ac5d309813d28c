//! Distance newtypes used by game data and derived statistics.
//!
//! All values are `f64` so that chained modifier math and the dispersion
//! model keep full precision until a record is rounded for display.

use std::ops::{Add, Div, Mul, Sub};

/// Conversion factor: 1 BigWorld unit = 30 meters.
pub const BW_TO_METERS: f64 = 30.0;

/// Distance in meters.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Meters(f64);

/// Distance in BigWorld coordinate units (1 BW unit = 30 meters).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BigWorldDistance(f64);

/// Distance in kilometers.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Km(f64);

/// Distance in millimeters. Used for calibers and armor thickness.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Millimeters(f64);

impl Meters {
    pub const fn new(v: f64) -> Self {
        Self(v)
    }

    pub fn value(self) -> f64 {
        self.0
    }
    pub fn to_bigworld(self) -> BigWorldDistance {
        BigWorldDistance(self.0 / BW_TO_METERS)
    }
    pub fn to_km(self) -> Km {
        Km(self.0 / 1000.0)
    }
    pub fn min(self, other: Meters) -> Meters {
        Meters(self.0.min(other.0))
    }
    pub fn max(self, other: Meters) -> Meters {
        Meters(self.0.max(other.0))
    }
}

impl BigWorldDistance {
    pub const fn new(v: f64) -> Self {
        Self(v)
    }

    pub fn value(self) -> f64 {
        self.0
    }
    pub fn to_meters(self) -> Meters {
        Meters(self.0 * BW_TO_METERS)
    }
}

impl Km {
    pub const fn new(v: f64) -> Self {
        Self(v)
    }

    pub fn value(self) -> f64 {
        self.0
    }
    pub fn to_meters(self) -> Meters {
        Meters(self.0 * 1000.0)
    }
}

impl Millimeters {
    pub const fn new(v: f64) -> Self {
        Self(v)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Meters {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

impl From<f64> for BigWorldDistance {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

impl From<f64> for Km {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

impl From<f64> for Millimeters {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

// --- Scalar arithmetic (dimensionless coefficients) ---

impl Mul<f64> for Meters {
    type Output = Meters;
    fn mul(self, rhs: f64) -> Meters {
        Meters(self.0 * rhs)
    }
}

impl Mul<f64> for Km {
    type Output = Km;
    fn mul(self, rhs: f64) -> Km {
        Km(self.0 * rhs)
    }
}

impl Mul<f64> for BigWorldDistance {
    type Output = BigWorldDistance;
    fn mul(self, rhs: f64) -> BigWorldDistance {
        BigWorldDistance(self.0 * rhs)
    }
}

impl Div<f64> for Meters {
    type Output = Meters;
    fn div(self, rhs: f64) -> Meters {
        Meters(self.0 / rhs)
    }
}

// --- Same-type arithmetic ---

impl Add for Meters {
    type Output = Meters;
    fn add(self, rhs: Meters) -> Meters {
        Meters(self.0 + rhs.0)
    }
}
impl Sub for Meters {
    type Output = Meters;
    fn sub(self, rhs: Meters) -> Meters {
        Meters(self.0 - rhs.0)
    }
}

impl Add for BigWorldDistance {
    type Output = BigWorldDistance;
    fn add(self, rhs: BigWorldDistance) -> BigWorldDistance {
        BigWorldDistance(self.0 + rhs.0)
    }
}
impl Sub for BigWorldDistance {
    type Output = BigWorldDistance;
    fn sub(self, rhs: BigWorldDistance) -> BigWorldDistance {
        BigWorldDistance(self.0 - rhs.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bigworld_round_trip() {
        let m = Meters::new(15_000.0);
        assert_eq!(m.to_bigworld().value(), 500.0);
        assert_eq!(m.to_bigworld().to_meters(), m);
        assert_eq!(m.to_km(), Km::new(15.0));
        assert_eq!(Km::new(15.0).to_meters(), m);
    }

    #[test]
    fn scalar_ops() {
        assert_eq!(Meters::new(100.0) * 1.5, Meters::new(150.0));
        assert_eq!(Meters::new(100.0) / 4.0, Meters::new(25.0));
        assert_eq!(
            Meters::new(100.0).min(Meters::new(40.0)),
            Meters::new(40.0)
        );
        assert_eq!(Meters::new(-5.0).max(Meters::new(0.0)), Meters::new(0.0));
    }
}
