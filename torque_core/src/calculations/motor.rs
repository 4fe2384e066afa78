//! # Motor Capacity Check
//!
//! Compares the motor torque demanded by a transmission with a motor's
//! rated (continuous) and peak torque. The rating is supplied by the caller;
//! catalogue figures differ between sources, so none is built in.
//!
//! ## Example
//!
//! ```rust
//! use torque_core::calculations::motor::{check_motor, MotorRating};
//! use torque_core::calculations::transmission::{calculate, TransmissionConfig};
//!
//! let result = calculate(&TransmissionConfig::reference()).unwrap();
//! let check = check_motor(&result, &MotorRating::new(3.3, 10.64)).unwrap();
//! assert!(check.passes());
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::transmission::TransmissionResult;
use crate::errors::{CalcError, CalcResult};

/// Torque capability of a motor.
///
/// ## JSON Example
///
/// ```json
/// { "rated_torque_nm": 3.3, "peak_torque_nm": 10.64 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorRating {
    /// Continuous rated torque (N·m)
    pub rated_torque_nm: f64,

    /// Short-duration peak torque (N·m)
    pub peak_torque_nm: f64,
}

impl MotorRating {
    pub fn new(rated_torque_nm: f64, peak_torque_nm: f64) -> Self {
        MotorRating {
            rated_torque_nm,
            peak_torque_nm,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.rated_torque_nm.is_finite() && self.rated_torque_nm > 0.0) {
            return Err(CalcError::invalid_configuration(
                "rated_torque_nm",
                self.rated_torque_nm.to_string(),
                "Rated torque must be positive",
            ));
        }
        if !(self.peak_torque_nm.is_finite() && self.peak_torque_nm >= self.rated_torque_nm) {
            return Err(CalcError::invalid_configuration(
                "peak_torque_nm",
                self.peak_torque_nm.to_string(),
                "Peak torque must be at least the rated torque",
            ));
        }
        Ok(())
    }
}

/// Results from a motor capacity check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorCheck {
    /// Motor torque demanded by the transmission (N·m)
    pub demand_torque_nm: f64,

    /// Demand / rated torque
    pub rated_utilization: f64,

    /// Demand / peak torque
    pub peak_utilization: f64,

    /// Rated torque / demand
    pub safety_factor: f64,
}

impl MotorCheck {
    /// Passes when the demand fits within the continuous rating.
    pub fn passes(&self) -> bool {
        self.rated_utilization <= 1.0
    }

    /// Demand exceeds the rating but not the peak: fine for short holds only.
    pub fn peak_only(&self) -> bool {
        !self.passes() && self.peak_utilization <= 1.0
    }

    /// Short label for reports
    pub fn status(&self) -> &'static str {
        if self.passes() {
            "OK"
        } else if self.peak_only() {
            "PEAK ONLY"
        } else {
            "OVERLOADED"
        }
    }
}

/// Check a transmission's motor demand against a motor rating.
///
/// # Returns
///
/// * `Ok(MotorCheck)` - Utilization figures
/// * `Err(CalcError::InvalidConfiguration)` - If the rating is invalid
pub fn check_motor(result: &TransmissionResult, rating: &MotorRating) -> CalcResult<MotorCheck> {
    rating.validate()?;

    let demand = result.motor_torque_nm;
    Ok(MotorCheck {
        demand_torque_nm: demand,
        rated_utilization: demand / rating.rated_torque_nm,
        peak_utilization: demand / rating.peak_torque_nm,
        safety_factor: rating.rated_torque_nm / demand,
    })
}
