//! # torque_core - Static Torque-Transmission Calculator
//!
//! `torque_core` computes what a motor must supply to hold a pendulum arm
//! through a chain of rope-over-pulley stages and a gearbox: the load torque,
//! every rope tension, the torque before the gearbox, and the motor torque.
//! Every result is cross-checked against an independent derivation before it
//! is returned.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Fail Fast**: Invalid input is rejected before any arithmetic
//! - **Self-Checking**: A result that fails its consistency check is an error
//!
//! ## Quick Start
//!
//! ```rust
//! use torque_core::{calculate, TransmissionConfig};
//!
//! let config = TransmissionConfig::new(2.0, 0.3, vec![0.020, 0.030, 0.040, 0.050, 0.065], 10.0);
//! let result = calculate(&config).unwrap();
//!
//! println!("Motor torque: {:.4} N·m", result.motor_torque_nm);
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Transmission, motor check, and angle sweep
//! - [`equations`] - The statics formulas behind the calculations
//! - [`report`] - Rounded JSON report and CSV rope table
//! - [`study`] - Groups of configurations
//! - [`file_io`] - Config and study files with atomic saves
//! - [`units`] - Type-safe SI unit wrappers
//! - [`errors`] - Structured error types
//! - [`logging`] - Leveled messages with a pluggable sink

pub mod logging;

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod report;
pub mod study;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, TransmissionConfig, TransmissionResult, CONSISTENCY_TOLERANCE};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_config, load_study, save_config, save_study};
pub use report::TransmissionReport;
pub use study::Study;
