//! # Unit Types
//!
//! Type-safe wrappers for the SI units used on the test bench. They are plain
//! `f64` newtypes that serialize as bare numbers.
//!
//! The calculation types keep raw `f64` fields with unit suffixes
//! (`arm_length_m`, `motor_torque_nm`) so the JSON stays flat. The formulas in
//! [`crate::equations`] wrap their arguments in these types internally, and
//! reports use them for the metre to millimetre conversion.
//!
//! ## Example
//!
//! ```rust
//! use torque_core::units::{Meters, Millimeters};
//!
//! let shaft = Meters(0.065);
//! let shaft_mm: Millimeters = shaft.into();
//! assert!((shaft_mm.0 - 65.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

impl Meters {
    /// Radius of a pulley with this diameter
    pub fn half(self) -> Meters {
        Meters(self.0 / 2.0)
    }
}

// ============================================================================
// Mass / Acceleration
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Acceleration in m/s²
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetersPerSecondSquared(pub f64);

/// Standard gravity used by the reference design (m/s²)
pub const STANDARD_GRAVITY: MetersPerSecondSquared = MetersPerSecondSquared(9.81);

// ============================================================================
// Force / Torque
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Torque in newton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMeters(pub f64);

/// Weight force of a mass under gravity: F = m·g
impl Mul<MetersPerSecondSquared> for Kilograms {
    type Output = Newtons;
    fn mul(self, rhs: MetersPerSecondSquared) -> Newtons {
        Newtons(self.0 * rhs.0)
    }
}

/// Moment of a force about an arm: T = F·r
impl Mul<Meters> for Newtons {
    type Output = NewtonMeters;
    fn mul(self, rhs: Meters) -> NewtonMeters {
        NewtonMeters(self.0 * rhs.0)
    }
}

/// Force needed at an arm to produce a torque: F = T/r
impl Div<Meters> for NewtonMeters {
    type Output = Newtons;
    fn div(self, rhs: Meters) -> Newtons {
        Newtons(self.0 / rhs.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(Kilograms);
impl_arithmetic!(MetersPerSecondSquared);
impl_arithmetic!(Newtons);
impl_arithmetic!(NewtonMeters);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_to_millimeters() {
        let m = Meters(0.02);
        let mm: Millimeters = m.into();
        assert!((mm.0 - 20.0).abs() < 1e-12);
        let back: Meters = mm.into();
        assert!((back.0 - 0.02).abs() < 1e-15);
    }

    #[test]
    fn test_weight_and_moment() {
        let weight = Kilograms(2.0) * STANDARD_GRAVITY;
        assert!((weight.0 - 19.62).abs() < 1e-12);

        let torque = weight * Meters(0.3);
        assert!((torque.0 - 5.886).abs() < 1e-12);

        let tension = torque / Meters(0.065).half();
        assert!((tension.0 - 181.10769).abs() < 1e-4);
    }

    #[test]
    fn test_arithmetic() {
        let a = NewtonMeters(3.0);
        let b = NewtonMeters(1.0);
        assert_eq!((a + b).0, 4.0);
        assert_eq!((a - b).0, 2.0);
        assert_eq!((a * 2.0).0, 6.0);
        assert_eq!((a / 2.0).0, 1.5);
    }

    #[test]
    fn test_serialization() {
        let t = NewtonMeters(0.3924);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "0.3924");

        let roundtrip: NewtonMeters = serde_json::from_str(&json).unwrap();
        assert_eq!(t, roundtrip);
    }
}
