//! # Transmission Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Config` / `*Rating` - Input parameters (JSON-serializable)
//! - `*Result` / `*Check` - Results (JSON-serializable)
//! - a pure function returning `CalcResult<_>`
//!
//! ## Available Calculations
//!
//! - [`transmission`] - Load torque, rope tensions, motor torque, self-check
//! - [`motor`] - Motor demand against a rated/peak torque
//! - [`sweep`] - Transmission results across a range of arm angles

pub mod motor;
pub mod sweep;
pub mod transmission;

// Re-export commonly used types
pub use motor::{check_motor, MotorCheck, MotorRating};
pub use sweep::{sweep_arm_angle, SweepPoint};
pub use transmission::{
    calculate, load_torque, propagate, verify, Propagation, TransmissionConfig, TransmissionResult,
    Verification, CONSISTENCY_TOLERANCE,
};
