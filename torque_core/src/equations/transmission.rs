//! # Rope Transmission Formulas
//!
//! Closed-form statics for a pendulum driven through rope-over-pulley stages
//! and a gearbox.
//!
//! ## Notation
//!
//! - `M` = Pendulum mass
//! - `g` = Gravitational acceleration
//! - `L` = Arm length (pivot to mass)
//! - `θ` = Arm angle below horizontal
//! - `D_k` = Diameter of shaft `k`, `k = 0` at the motor, `k = n` at the load
//! - `F_i` = Tension in the rope segment between shaft `i` and shaft `i+1`
//! - `T` = Torque
//! - `N_g` = Gearbox ratio
//!
//! ## Sign Conventions
//!
//! - Torques are magnitudes; the load torque resists the motor.
//! - Rope tensions are positive in tension.
//!
//! ```text
//!   motor ─[N_g]─ D_0 ──F_0── D_1 ──F_1── … ──F_(n-1)── D_n ── arm ── M
//! ```
//!
//! Arguments and results are raw SI values; the arithmetic goes through the
//! unit types so each step is dimensionally checked.

use crate::units::{Kilograms, Meters, MetersPerSecondSquared, NewtonMeters, Newtons};

/// Static torque of the pendulum about its pivot.
///
/// # Formula
/// - T = M·g·L·cos θ
///
/// θ = 0 (arm horizontal) is the worst case and reduces to T = M·g·L.
#[inline]
pub fn pendulum_torque(
    mass_kg: f64,
    gravity_mps2: f64,
    arm_length_m: f64,
    angle_deg: f64,
) -> f64 {
    let weight: Newtons = Kilograms(mass_kg) * MetersPerSecondSquared(gravity_mps2);
    let moment: NewtonMeters = weight * Meters(arm_length_m);
    (moment * angle_deg.to_radians().cos()).value()
}

/// Rope tension that holds a torque on a pulley.
///
/// # Formula
/// - F = 2T/D
#[inline]
pub fn tension_from_torque(torque_nm: f64, diameter_m: f64) -> f64 {
    (NewtonMeters(torque_nm) * 2.0 / Meters(diameter_m)).value()
}

/// Torque a rope tension applies to a pulley.
///
/// # Formula
/// - T = F·D/2
#[inline]
pub fn torque_from_tension(force_n: f64, diameter_m: f64) -> f64 {
    (Newtons(force_n) * Meters(diameter_m).half()).value()
}

/// Tension in the segment upstream (motor side) of a driven shaft.
///
/// Stepping from the segment that drives shaft `k+1` to the one that drives
/// shaft `k`, moment equilibrium holds `F·D/2` fixed, so the tension scales by
/// the ratio of the two driven diameters.
///
/// # Formula
/// - F_(k-1) = F_k · D_(k+1) / D_k
#[inline]
pub fn upstream_tension(
    downstream_force_n: f64,
    downstream_driven_m: f64,
    upstream_driven_m: f64,
) -> f64 {
    (Newtons(downstream_force_n) * (downstream_driven_m / upstream_driven_m)).value()
}

/// Torque required at the motor given the torque at the gearbox output.
///
/// # Formula
/// - T_motor = T_out / N_g
#[inline]
pub fn motor_torque_through_gearbox(output_torque_nm: f64, gear_ratio: f64) -> f64 {
    (NewtonMeters(output_torque_nm) / gear_ratio).value()
}

/// Torque ratio of the rope chain, motor pulley to load shaft.
///
/// Each driven shaft is held at the load torque, so the only change happens
/// where the first segment leaves the motor pulley.
///
/// # Formula
/// - R_rope = D_1 / D_0, or 1 when there is no rope stage
#[inline]
pub fn rope_reduction_ratio(diameters_m: &[f64]) -> f64 {
    match diameters_m {
        [d0, d1, ..] => d1 / d0,
        _ => 1.0,
    }
}

/// Relative discrepancy between a value and its independent check.
///
/// # Formula
/// - e = |a - b| / |b|
///
/// Two exact zeros compare equal.
#[inline]
pub fn relative_error(value: f64, check: f64) -> f64 {
    let diff = (value - check).abs();
    if diff == 0.0 {
        0.0
    } else {
        diff / check.abs()
    }
}
