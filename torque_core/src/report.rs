//! # Reports
//!
//! Presentation of a finished calculation: a rounded JSON report and a CSV
//! table of rope segments. Rounding happens here and nowhere in the
//! calculation path.
//!
//! Shafts are lettered from the motor side (`A` is the motor pulley), so the
//! rope segments of the reference bench are `AB`, `BC`, `CD`, `DE`. Chains
//! longer than the alphabet are numbered with zero-padded `S` labels instead
//! (`S00`, `S01`, …), so map keys always sort motor side first.
//!
//! ## Example
//!
//! ```rust
//! use torque_core::calculations::transmission::{calculate, TransmissionConfig};
//! use torque_core::report::TransmissionReport;
//!
//! let config = TransmissionConfig::reference();
//! let result = calculate(&config).unwrap();
//! let report = TransmissionReport::new(&config, &result);
//!
//! assert_eq!(report.rope_forces_n["AB"], 392.4);
//! assert_eq!(report.torques_nm.motor, 0.3924);
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::motor::MotorCheck;
use crate::calculations::transmission::{TransmissionConfig, TransmissionResult};
use crate::errors::{CalcError, CalcResult};
use crate::units::{Meters, Millimeters};

/// Decimal places for forces in reports
pub const FORCE_DECIMALS: i32 = 3;

/// Decimal places for torques in reports
pub const TORQUE_DECIMALS: i32 = 4;

/// Decimal places for shaft diameters (mm) in reports
pub const DIAMETER_DECIMALS: i32 = 3;

/// Round for display.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Label for shaft `index` of a chain with `shaft_count` shafts, counted from
/// the motor side.
pub fn shaft_label(index: usize, shaft_count: usize) -> String {
    if shaft_count <= 26 {
        char::from(b'A' + index as u8).to_string()
    } else {
        let width = (shaft_count - 1).to_string().len();
        format!("S{:0width$}", index, width = width)
    }
}

/// Label of the rope segment between shaft `index` and `index + 1`.
pub fn segment_label(index: usize, shaft_count: usize) -> String {
    format!(
        "{}{}",
        shaft_label(index, shaft_count),
        shaft_label(index + 1, shaft_count)
    )
}

/// Metres to millimetres, rounded for display.
fn diameter_mm(meters: f64) -> f64 {
    round_to(Millimeters::from(Meters(meters)).value(), DIAMETER_DECIMALS)
}

/// Input parameters as they appear in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportParameters {
    pub label: String,
    pub pendulum_mass_kg: f64,
    pub arm_length_m: f64,
    pub gravity_mps2: f64,
    pub arm_angle_deg: f64,
    /// Shaft diameters keyed by shaft letter
    pub shaft_diameters_mm: BTreeMap<String, f64>,
    pub gear_ratio: f64,
}

/// Torques as they appear in a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportTorques {
    pub motor: f64,
    pub after_gearbox: f64,
    pub pendulum_load: f64,
}

/// Verification figures as they appear in a report. Not rounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportVerification {
    pub rope_reduction_ratio: f64,
    pub total_reduction_ratio: f64,
    pub motor_torque_check_nm: f64,
    pub relative_error: f64,
}

/// JSON snapshot of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmissionReport {
    pub timestamp: DateTime<Utc>,
    pub parameters: ReportParameters,
    /// Rope tensions keyed by segment label
    pub rope_forces_n: BTreeMap<String, f64>,
    pub torques_nm: ReportTorques,
    pub verification: ReportVerification,
    pub mechanical_advantage: bool,
    /// Present when a motor rating was checked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motor_check: Option<MotorCheck>,
}

impl TransmissionReport {
    pub fn new(config: &TransmissionConfig, result: &TransmissionResult) -> Self {
        let shafts = config.diameters_m.len();
        let shaft_diameters_mm = config
            .diameters_m
            .iter()
            .enumerate()
            .map(|(i, &d)| (shaft_label(i, shafts), diameter_mm(d)))
            .collect();

        let rope_forces_n = result
            .rope_forces_n
            .iter()
            .enumerate()
            .map(|(i, &f)| (segment_label(i, shafts), round_to(f, FORCE_DECIMALS)))
            .collect();

        TransmissionReport {
            timestamp: Utc::now(),
            parameters: ReportParameters {
                label: config.label.clone(),
                pendulum_mass_kg: config.pendulum_mass_kg,
                arm_length_m: config.arm_length_m,
                gravity_mps2: config.gravity_mps2,
                arm_angle_deg: config.arm_angle_deg,
                shaft_diameters_mm,
                gear_ratio: config.gear_ratio,
            },
            rope_forces_n,
            torques_nm: ReportTorques {
                motor: round_to(result.motor_torque_nm, TORQUE_DECIMALS),
                after_gearbox: round_to(result.pre_gearbox_torque_nm, TORQUE_DECIMALS),
                pendulum_load: round_to(result.load_torque_nm, TORQUE_DECIMALS),
            },
            verification: ReportVerification {
                rope_reduction_ratio: result.rope_reduction_ratio,
                total_reduction_ratio: result.total_reduction_ratio,
                motor_torque_check_nm: result.motor_torque_check_nm,
                relative_error: result.relative_error,
            },
            mechanical_advantage: result.has_mechanical_advantage(),
            motor_check: None,
        }
    }

    pub fn with_motor_check(mut self, check: MotorCheck) -> Self {
        self.motor_check = Some(check);
        self
    }

    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// One row of the rope segment table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RopeSegmentRow {
    pub segment: String,
    pub force_n: f64,
    pub shaft_from: String,
    pub shaft_to: String,
    pub diameter_from_mm: f64,
    pub diameter_to_mm: f64,
}

/// Rows of the rope segment table, motor side first.
pub fn rope_segments(
    config: &TransmissionConfig,
    result: &TransmissionResult,
) -> Vec<RopeSegmentRow> {
    let shafts = config.diameters_m.len();
    result
        .rope_forces_n
        .iter()
        .zip(config.diameters_m.windows(2))
        .enumerate()
        .map(|(i, (&force, pair))| RopeSegmentRow {
            segment: segment_label(i, shafts),
            force_n: round_to(force, FORCE_DECIMALS),
            shaft_from: shaft_label(i, shafts),
            shaft_to: shaft_label(i + 1, shafts),
            diameter_from_mm: diameter_mm(pair[0]),
            diameter_to_mm: diameter_mm(pair[1]),
        })
        .collect()
}

/// Rope segment table as CSV text with a header row.
pub fn rope_table_csv(
    config: &TransmissionConfig,
    result: &TransmissionResult,
) -> CalcResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rope_segments(config, result) {
        writer
            .serialize(&row)
            .map_err(|e| CalcError::serialization(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CalcError::serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CalcError::serialization(e.to_string()))
}
