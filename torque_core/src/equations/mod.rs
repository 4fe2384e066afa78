//! # Transmission Equations
//!
//! The statics formulas used by the calculator, kept in one place so each can
//! be checked against a hand calculation on its own.
//!
//! ## Modules
//!
//! - [`transmission`] - Pendulum load, rope tension, and gearbox formulas
//!
//! ## References
//!
//! - Hibbeler, Engineering Mechanics: Statics, ch. 4 (moment of a force)
//! - Shigley's Mechanical Engineering Design, ch. 17 (flexible elements)

pub mod transmission;

pub use transmission::{
    motor_torque_through_gearbox,
    pendulum_torque,
    relative_error,
    rope_reduction_ratio,
    tension_from_torque,
    torque_from_tension,
    upstream_tension,
};
