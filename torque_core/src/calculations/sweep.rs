//! # Arm Angle Sweep
//!
//! Runs the transmission calculation across a range of arm angles, giving
//! the torque curve a plotting or control front end needs.
//!
//! ## Example
//!
//! ```rust
//! use torque_core::calculations::sweep::sweep_arm_angle;
//! use torque_core::calculations::transmission::TransmissionConfig;
//!
//! let points = sweep_arm_angle(&TransmissionConfig::reference(), 0.0, 60.0, 7).unwrap();
//! assert_eq!(points.len(), 7);
//! assert_eq!(points[3].angle_deg, 30.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::transmission::{calculate, TransmissionConfig};
use crate::errors::{CalcError, CalcResult};

/// One sample of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Arm angle below horizontal (degrees)
    pub angle_deg: f64,

    /// Pendulum torque at this angle (N·m)
    pub load_torque_nm: f64,

    /// Motor torque required at this angle (N·m)
    pub motor_torque_nm: f64,
}

/// Calculate `steps` evenly spaced points from `start_deg` to `end_deg`
/// inclusive.
///
/// Both ends must lie in [0, 90) and `steps` must be at least 2. Every point
/// goes through the full verified calculation; the first failure is returned.
pub fn sweep_arm_angle(
    config: &TransmissionConfig,
    start_deg: f64,
    end_deg: f64,
    steps: usize,
) -> CalcResult<Vec<SweepPoint>> {
    if steps < 2 {
        return Err(CalcError::invalid_configuration(
            "steps",
            steps.to_string(),
            "A sweep needs at least 2 steps",
        ));
    }
    if !(end_deg >= start_deg) {
        return Err(CalcError::invalid_configuration(
            "end_deg",
            end_deg.to_string(),
            "Sweep end angle must not be below the start angle",
        ));
    }

    let step = (end_deg - start_deg) / (steps - 1) as f64;
    (0..steps)
        .map(|i| {
            // Pin the last sample to the requested end angle.
            let angle_deg = if i == steps - 1 { end_deg } else { start_deg + step * i as f64 };
            let point_config = config.clone().with_arm_angle(angle_deg);
            let result = calculate(&point_config)?;
            Ok(SweepPoint {
                angle_deg,
                load_torque_nm: result.load_torque_nm,
                motor_torque_nm: result.motor_torque_nm,
            })
        })
        .collect()
}
