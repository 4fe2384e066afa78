//! # Rope Transmission Calculation
//!
//! Static analysis of the pendulum bench: a mass on an arm is held by a chain
//! of rope-over-pulley stages driven through a gearbox by the motor.
//!
//! The calculation runs in three steps:
//!
//! 1. Load torque at the pendulum pivot ([`load_torque`])
//! 2. Rope tensions walked from the load back to the motor, then through the
//!    gearbox ([`propagate`])
//! 3. An independent derivation of the motor torque from the diameters and
//!    gear ratio alone ([`verify`]); disagreement beyond
//!    [`CONSISTENCY_TOLERANCE`] is an error
//!
//! ## Assumptions
//!
//! - Static equilibrium, arm held at a fixed angle (horizontal by default)
//! - Massless, inextensible ropes without slip
//! - Lossless pulleys and gearbox
//!
//! ## Example
//!
//! ```rust
//! use torque_core::calculations::transmission::{calculate, TransmissionConfig};
//!
//! let config = TransmissionConfig::reference();
//! let result = calculate(&config).unwrap();
//!
//! assert!((result.load_torque_nm - 5.886).abs() < 1e-9);
//! assert!((result.motor_torque_nm - 0.3924).abs() < 1e-9);
//! assert_eq!(result.rope_forces_n.len(), 4);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::transmission as eq;
use crate::errors::{CalcError, CalcResult};
use crate::units::STANDARD_GRAVITY;

/// Maximum relative error between the propagated and the independently derived
/// motor torque. Not configurable.
pub const CONSISTENCY_TOLERANCE: f64 = 1e-9;

fn default_gravity() -> f64 {
    STANDARD_GRAVITY.value()
}

/// Input parameters for a rope-and-gearbox transmission.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Reference bench",
///   "pendulum_mass_kg": 2.0,
///   "arm_length_m": 0.3,
///   "gravity_mps2": 9.81,
///   "arm_angle_deg": 0.0,
///   "diameters_m": [0.020, 0.030, 0.040, 0.050, 0.065],
///   "gear_ratio": 10.0
/// }
/// ```
///
/// `label`, `gravity_mps2` and `arm_angle_deg` may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmissionConfig {
    /// User label for this configuration
    #[serde(default)]
    pub label: String,

    /// Pendulum mass in kg
    pub pendulum_mass_kg: f64,

    /// Distance from the pivot to the mass in m
    pub arm_length_m: f64,

    /// Gravitational acceleration in m/s²
    #[serde(default = "default_gravity")]
    pub gravity_mps2: f64,

    /// Arm angle below horizontal in degrees, in [0, 90)
    #[serde(default)]
    pub arm_angle_deg: f64,

    /// Shaft/pulley diameters in m, motor side first
    pub diameters_m: Vec<f64>,

    /// Gearbox reduction ratio (motor turns per output turn)
    pub gear_ratio: f64,
}

impl TransmissionConfig {
    /// Create a configuration with a horizontal arm and standard gravity.
    pub fn new(
        pendulum_mass_kg: f64,
        arm_length_m: f64,
        diameters_m: impl Into<Vec<f64>>,
        gear_ratio: f64,
    ) -> Self {
        TransmissionConfig {
            label: String::new(),
            pendulum_mass_kg,
            arm_length_m,
            gravity_mps2: default_gravity(),
            arm_angle_deg: 0.0,
            diameters_m: diameters_m.into(),
            gear_ratio,
        }
    }

    /// The documented bench: 2 kg at 0.3 m, shafts A-E of 20/30/40/50/65 mm,
    /// 10:1 gearbox.
    pub fn reference() -> Self {
        TransmissionConfig::new(2.0, 0.3, vec![0.020, 0.030, 0.040, 0.050, 0.065], 10.0)
            .with_label("Reference bench")
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_gravity(mut self, gravity_mps2: f64) -> Self {
        self.gravity_mps2 = gravity_mps2;
        self
    }

    pub fn with_arm_angle(mut self, arm_angle_deg: f64) -> Self {
        self.arm_angle_deg = arm_angle_deg;
        self
    }

    /// Number of rope segments (one fewer than the number of shafts).
    pub fn stage_count(&self) -> usize {
        self.diameters_m.len().saturating_sub(1)
    }

    /// Validate input parameters.
    ///
    /// Every quantity is checked before any arithmetic; nothing is clamped.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive(
            "pendulum_mass_kg",
            self.pendulum_mass_kg,
            "Pendulum mass must be positive",
        )?;
        require_positive("arm_length_m", self.arm_length_m, "Arm length must be positive")?;
        require_positive("gravity_mps2", self.gravity_mps2, "Gravity must be positive")?;
        validate_chain(&self.diameters_m, self.gear_ratio)?;
        validate_arm_angle(self.arm_angle_deg)
    }
}

impl Default for TransmissionConfig {
    fn default() -> Self {
        TransmissionConfig::reference()
    }
}

/// Results from a transmission calculation.
///
/// ## JSON Example (reference bench)
///
/// ```json
/// {
///   "load_torque_nm": 5.886,
///   "rope_forces_n": [392.4, 294.3, 235.44, 181.108],
///   "shaft_torques_nm": [5.886, 5.886, 5.886, 5.886],
///   "pre_gearbox_torque_nm": 3.924,
///   "motor_torque_nm": 0.3924,
///   "rope_reduction_ratio": 1.5,
///   "total_reduction_ratio": 15.0,
///   "motor_torque_check_nm": 0.3924,
///   "relative_error": 0.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmissionResult {
    /// Pendulum torque at the pivot (N·m)
    pub load_torque_nm: f64,

    /// Rope tensions (N); entry `i` is the segment between shaft `i` and `i+1`
    pub rope_forces_n: Vec<f64>,

    /// Torque on each driven shaft `1..=n` (N·m), same indexing as the forces
    pub shaft_torques_nm: Vec<f64>,

    /// Torque at the gearbox output, motor pulley side (N·m)
    pub pre_gearbox_torque_nm: f64,

    /// Torque required at the motor shaft (N·m)
    pub motor_torque_nm: f64,

    /// Torque ratio of the rope chain alone
    pub rope_reduction_ratio: f64,

    /// Rope ratio times gear ratio; equals load torque / motor torque
    pub total_reduction_ratio: f64,

    /// Motor torque derived from the total reduction ratio (N·m)
    pub motor_torque_check_nm: f64,

    /// |motor - check| / |check|
    pub relative_error: f64,
}

impl TransmissionResult {
    /// Whether the transmission reduces the torque the motor must supply.
    pub fn has_mechanical_advantage(&self) -> bool {
        self.motor_torque_nm < self.load_torque_nm
    }

    /// Largest rope tension, the one the rope must be rated for (N).
    pub fn max_rope_force_n(&self) -> Option<f64> {
        self.rope_forces_n.iter().copied().reduce(f64::max)
    }
}

/// Rope tensions and gearbox torques from [`propagate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Propagation {
    pub rope_forces_n: Vec<f64>,
    pub shaft_torques_nm: Vec<f64>,
    pub pre_gearbox_torque_nm: f64,
    pub motor_torque_nm: f64,
}

/// Outcome of the consistency check from [`verify`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub rope_reduction_ratio: f64,
    pub total_reduction_ratio: f64,
    pub motor_torque_check_nm: f64,
    pub relative_error: f64,
}

impl Verification {
    pub fn passes(&self) -> bool {
        self.relative_error <= CONSISTENCY_TOLERANCE
    }
}

fn require_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    // Written so NaN fails too.
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_configuration(field, value.to_string(), reason))
    }
}

/// Reject intermediate values that overflowed or underflowed `f64`.
fn require_normal(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if value.is_normal() {
        Ok(())
    } else {
        Err(CalcError::invalid_configuration(field, value.to_string(), reason))
    }
}

fn validate_arm_angle(arm_angle_deg: f64) -> CalcResult<()> {
    if (0.0..90.0).contains(&arm_angle_deg) {
        Ok(())
    } else {
        Err(CalcError::invalid_configuration(
            "arm_angle_deg",
            arm_angle_deg.to_string(),
            "Arm angle must be in [0, 90) degrees below horizontal",
        ))
    }
}

fn validate_chain(diameters_m: &[f64], gear_ratio: f64) -> CalcResult<()> {
    if diameters_m.is_empty() {
        return Err(CalcError::invalid_configuration(
            "diameters_m",
            "[]",
            "At least one shaft diameter is required",
        ));
    }
    for (i, &d) in diameters_m.iter().enumerate() {
        require_positive(&format!("diameters_m[{}]", i), d, "Shaft diameter must be positive")?;
    }
    require_positive("gear_ratio", gear_ratio, "Gear ratio must be positive")
}

/// Static pendulum torque about the pivot.
///
/// # Returns
///
/// * `Ok(T)` with T = M·g·L·cos θ (θ = 0 gives M·g·L)
/// * `Err(CalcError::InvalidConfiguration)` if M, L or g is not positive, or
///   θ is outside [0, 90)
pub fn load_torque(
    mass_kg: f64,
    arm_length_m: f64,
    gravity_mps2: f64,
    arm_angle_deg: f64,
) -> CalcResult<f64> {
    require_positive("pendulum_mass_kg", mass_kg, "Pendulum mass must be positive")?;
    require_positive("arm_length_m", arm_length_m, "Arm length must be positive")?;
    require_positive("gravity_mps2", gravity_mps2, "Gravity must be positive")?;
    validate_arm_angle(arm_angle_deg)?;

    Ok(eq::pendulum_torque(mass_kg, gravity_mps2, arm_length_m, arm_angle_deg))
}

/// Walk the rope chain from the load back to the motor.
///
/// With diameters `[D_0 … D_n]` (motor side first):
///
/// 1. F_(n-1) = 2·T_load / D_n
/// 2. F_(k-1) = F_k · D_(k+1) / D_k for k = n-1 … 1
/// 3. T_pre = F_0 · D_0 / 2
/// 4. T_motor = T_pre / N_g
///
/// A single diameter means no rope stage: T_motor = T_load / N_g and the
/// force list is empty.
pub fn propagate(
    load_torque_nm: f64,
    diameters_m: &[f64],
    gear_ratio: f64,
) -> CalcResult<Propagation> {
    validate_chain(diameters_m, gear_ratio)?;

    let stages = diameters_m.len() - 1;
    if stages == 0 {
        return Ok(Propagation {
            rope_forces_n: Vec::new(),
            shaft_torques_nm: Vec::new(),
            pre_gearbox_torque_nm: load_torque_nm,
            motor_torque_nm: eq::motor_torque_through_gearbox(load_torque_nm, gear_ratio),
        });
    }

    let mut rope_forces_n = vec![0.0; stages];
    rope_forces_n[stages - 1] = eq::tension_from_torque(load_torque_nm, diameters_m[stages]);
    for i in (0..stages - 1).rev() {
        // Segment i drives shaft i+1; segment i+1 drives shaft i+2.
        rope_forces_n[i] =
            eq::upstream_tension(rope_forces_n[i + 1], diameters_m[i + 2], diameters_m[i + 1]);
    }

    let shaft_torques_nm = rope_forces_n
        .iter()
        .zip(&diameters_m[1..])
        .map(|(&f, &d)| eq::torque_from_tension(f, d))
        .collect();

    let pre_gearbox_torque_nm = eq::torque_from_tension(rope_forces_n[0], diameters_m[0]);
    let motor_torque_nm = eq::motor_torque_through_gearbox(pre_gearbox_torque_nm, gear_ratio);

    Ok(Propagation {
        rope_forces_n,
        shaft_torques_nm,
        pre_gearbox_torque_nm,
        motor_torque_nm,
    })
}

/// Check a propagated motor torque against one derived from the diameters and
/// gear ratio alone.
///
/// Returns the verification data whether or not it passes; [`calculate`]
/// turns a failing check into [`CalcError::ConsistencyCheckFailed`].
pub fn verify(
    config: &TransmissionConfig,
    load_torque_nm: f64,
    motor_torque_nm: f64,
) -> CalcResult<Verification> {
    validate_chain(&config.diameters_m, config.gear_ratio)?;

    let rope_reduction_ratio = eq::rope_reduction_ratio(&config.diameters_m);
    let total_reduction_ratio = rope_reduction_ratio * config.gear_ratio;
    let motor_torque_check_nm = load_torque_nm / total_reduction_ratio;

    Ok(Verification {
        rope_reduction_ratio,
        total_reduction_ratio,
        motor_torque_check_nm,
        relative_error: eq::relative_error(motor_torque_nm, motor_torque_check_nm),
    })
}

/// Run the full transmission analysis.
///
/// # Returns
///
/// * `Ok(TransmissionResult)` - Verified results
/// * `Err(CalcError::InvalidConfiguration)` - Any invalid input, including
///   finite inputs whose torques or ratios overflow or underflow `f64`
/// * `Err(CalcError::ConsistencyCheckFailed)` - The two motor torque
///   derivations disagree beyond [`CONSISTENCY_TOLERANCE`]
pub fn calculate(config: &TransmissionConfig) -> CalcResult<TransmissionResult> {
    config.validate()?;

    let load_torque_nm = load_torque(
        config.pendulum_mass_kg,
        config.arm_length_m,
        config.gravity_mps2,
        config.arm_angle_deg,
    )?;
    require_normal(
        "load_torque_nm",
        load_torque_nm,
        "Mass, arm length and gravity give a load torque outside the f64 range",
    )?;
    check_ratios(config)?;

    let propagation = propagate(load_torque_nm, &config.diameters_m, config.gear_ratio)?;
    check_propagation(&propagation)?;

    let verification = verify(config, load_torque_nm, propagation.motor_torque_nm)?;

    if !verification.passes() {
        crate::error!(
            "'{}': motor torque {} N·m disagrees with check {} N·m",
            config.label,
            propagation.motor_torque_nm,
            verification.motor_torque_check_nm
        );
        return Err(CalcError::consistency_check_failed(
            propagation.motor_torque_nm,
            verification.motor_torque_check_nm,
            verification.relative_error,
            CONSISTENCY_TOLERANCE,
        ));
    }

    Ok(TransmissionResult {
        load_torque_nm,
        rope_forces_n: propagation.rope_forces_n,
        shaft_torques_nm: propagation.shaft_torques_nm,
        pre_gearbox_torque_nm: propagation.pre_gearbox_torque_nm,
        motor_torque_nm: propagation.motor_torque_nm,
        rope_reduction_ratio: verification.rope_reduction_ratio,
        total_reduction_ratio: verification.total_reduction_ratio,
        motor_torque_check_nm: verification.motor_torque_check_nm,
        relative_error: verification.relative_error,
    })
}

fn check_ratios(config: &TransmissionConfig) -> CalcResult<()> {
    let rope_reduction_ratio = eq::rope_reduction_ratio(&config.diameters_m);
    require_normal(
        "diameters_m",
        rope_reduction_ratio,
        "Shaft diameters give a rope ratio outside the f64 range",
    )?;
    require_normal(
        "gear_ratio",
        rope_reduction_ratio * config.gear_ratio,
        "Gear ratio gives a total reduction outside the f64 range",
    )
}

fn check_propagation(propagation: &Propagation) -> CalcResult<()> {
    for (i, &force) in propagation.rope_forces_n.iter().enumerate() {
        require_normal(
            &format!("diameters_m[{}]", i),
            force,
            "Shaft diameters give a rope tension outside the f64 range",
        )?;
    }
    require_normal(
        "diameters_m",
        propagation.pre_gearbox_torque_nm,
        "Shaft diameters give a gearbox torque outside the f64 range",
    )?;
    require_normal(
        "gear_ratio",
        propagation.motor_torque_nm,
        "Gear ratio gives a motor torque outside the f64 range",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1.0)
    }

    #[test]
    fn test_reference_load_torque() {
        let t = load_torque(2.0, 0.3, 9.81, 0.0).unwrap();
        assert!((t - 5.886).abs() < 1e-12);
    }

    #[test]
    fn test_reference_scenario() {
        let result = calculate(&TransmissionConfig::reference()).unwrap();

        assert!((result.load_torque_nm - 5.886).abs() < 1e-9);

        let expected = [392.4, 294.3, 235.44, 181.108];
        assert_eq!(result.rope_forces_n.len(), expected.len());
        for (got, want) in result.rope_forces_n.iter().zip(expected) {
            assert!((got - want).abs() < 1e-3, "force {} vs {}", got, want);
        }

        assert!((result.pre_gearbox_torque_nm - 3.924).abs() < 1e-9);
        assert!((result.motor_torque_nm - 0.3924).abs() < 1e-9);
        assert!((result.total_reduction_ratio - 15.0).abs() < 1e-9);
        assert!(result.relative_error <= CONSISTENCY_TOLERANCE);
        assert!(result.has_mechanical_advantage());
    }

    #[test]
    fn test_shaft_torques_equal_load_torque() {
        let result = calculate(&TransmissionConfig::reference()).unwrap();
        assert_eq!(result.shaft_torques_nm.len(), 4);
        for t in &result.shaft_torques_nm {
            assert!((t - 5.886).abs() < 1e-9);
        }
    }

    #[test]
    fn test_force_count_matches_stages() {
        for n in 1..=7 {
            let diameters: Vec<f64> = (0..n).map(|i| 0.02 + 0.01 * i as f64).collect();
            let config = TransmissionConfig::new(1.0, 0.5, diameters, 4.0);
            let result = calculate(&config).unwrap();
            assert_eq!(result.rope_forces_n.len(), n - 1);
            assert_eq!(config.stage_count(), n - 1);
        }
    }

    #[test]
    fn test_forces_rise_toward_motor_on_increasing_chain() {
        let result = calculate(&TransmissionConfig::reference()).unwrap();
        for pair in result.rope_forces_n.windows(2) {
            assert!(pair[0] > pair[1]);
        }
        assert_eq!(result.max_rope_force_n(), Some(result.rope_forces_n[0]));
    }

    #[test]
    fn test_non_monotonic_chain_is_accepted() {
        let config = TransmissionConfig::new(1.5, 0.25, vec![0.05, 0.02, 0.08, 0.03], 7.0);
        let result = calculate(&config).unwrap();
        assert!(result.relative_error <= CONSISTENCY_TOLERANCE);
    }

    #[test]
    fn test_increasing_first_driven_diameter_lowers_motor_torque() {
        let base = TransmissionConfig::reference();
        let base_motor = calculate(&base).unwrap().motor_torque_nm;

        let mut bigger = base.clone();
        bigger.diameters_m[1] = 0.035;
        let motor = calculate(&bigger).unwrap().motor_torque_nm;
        assert!(motor < base_motor);
    }

    #[test]
    fn test_increasing_any_diameter_never_raises_motor_torque() {
        let base = TransmissionConfig::reference();
        let base_motor = calculate(&base).unwrap().motor_torque_nm;

        for i in 1..base.diameters_m.len() {
            let mut bigger = base.clone();
            bigger.diameters_m[i] *= 1.2;
            let motor = calculate(&bigger).unwrap().motor_torque_nm;
            assert!(motor <= base_motor * (1.0 + 1e-12), "diameter {} raised motor torque", i);
        }
    }

    #[test]
    fn test_larger_gear_ratio_lowers_motor_torque() {
        let base = calculate(&TransmissionConfig::reference()).unwrap();
        let mut config = TransmissionConfig::reference();
        config.gear_ratio = 20.0;
        let geared = calculate(&config).unwrap();
        assert!(close(geared.motor_torque_nm, base.motor_torque_nm / 2.0, 1e-12));
    }

    #[test]
    fn test_determinism() {
        let config = TransmissionConfig::reference().with_arm_angle(17.5);
        let a = calculate(&config).unwrap();
        let b = calculate(&config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.motor_torque_nm.to_bits(), b.motor_torque_nm.to_bits());
    }

    #[test]
    fn test_calculate_from_many_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransmissionConfig>();
        assert_send_sync::<TransmissionResult>();

        let config = TransmissionConfig::reference().with_arm_angle(12.5);
        let expected = calculate(&config).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| calculate(&config))).collect();
            for handle in handles {
                let result = handle.join().unwrap().unwrap();
                assert_eq!(result.motor_torque_nm.to_bits(), expected.motor_torque_nm.to_bits());
                assert_eq!(result, expected);
            }
        });
    }

    #[test]
    fn test_degenerate_chain() {
        let config = TransmissionConfig::new(2.0, 0.3, vec![0.04], 10.0);
        let result = calculate(&config).unwrap();
        assert!(result.rope_forces_n.is_empty());
        assert!(result.shaft_torques_nm.is_empty());
        assert_eq!(result.motor_torque_nm, result.load_torque_nm / 10.0);
        assert_eq!(result.relative_error, 0.0);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let cases: [(&str, fn(&mut TransmissionConfig)); 13] = [
            ("pendulum_mass_kg", |c| c.pendulum_mass_kg = 0.0),
            ("pendulum_mass_kg", |c| c.pendulum_mass_kg = -2.0),
            ("arm_length_m", |c| c.arm_length_m = 0.0),
            ("arm_length_m", |c| c.arm_length_m = f64::NAN),
            ("gravity_mps2", |c| c.gravity_mps2 = -9.81),
            ("diameters_m[2]", |c| c.diameters_m[2] = 0.0),
            ("diameters_m[4]", |c| c.diameters_m[4] = -0.065),
            ("diameters_m[0]", |c| c.diameters_m[0] = f64::INFINITY),
            ("diameters_m", |c| c.diameters_m.clear()),
            ("gear_ratio", |c| c.gear_ratio = 0.0),
            ("gear_ratio", |c| c.gear_ratio = -10.0),
            ("arm_angle_deg", |c| c.arm_angle_deg = 90.0),
            ("arm_angle_deg", |c| c.arm_angle_deg = -5.0),
        ];

        for (field, mutate) in cases {
            let mut config = TransmissionConfig::reference();
            mutate(&mut config);
            match calculate(&config) {
                Err(CalcError::InvalidConfiguration { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected InvalidConfiguration for {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_out_of_range_arithmetic_is_invalid_configuration() {
        let mut huge_gear = TransmissionConfig::reference();
        huge_gear.gear_ratio = 1.5e308;

        let cases = [
            // overflow
            ("load_torque_nm", TransmissionConfig::new(1e307, 1e3, vec![0.02, 0.03], 10.0)),
            ("gear_ratio", huge_gear),
            // underflow
            ("diameters_m", TransmissionConfig::new(2.0, 0.3, vec![1e-320, 0.03, 0.04], 10.0)),
            ("gear_ratio", TransmissionConfig::new(1e-3, 0.3, vec![0.02, 0.03], 1e308)),
        ];

        for (field, config) in cases {
            assert!(config.validate().is_ok());
            match calculate(&config) {
                Err(CalcError::InvalidConfiguration { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected InvalidConfiguration for {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_propagate_rejects_bad_diameter_before_arithmetic() {
        let err = propagate(5.886, &[0.02, 0.0, 0.04], 10.0).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_self_consistency_over_many_configs() {
        let mut d0 = 0.011;
        for k in 0..50 {
            let diameters: Vec<f64> =
                (0..(2 + k % 5)).map(|i| d0 * (1.0 + 0.37 * i as f64)).collect();
            let mass = 0.5 + k as f64 * 0.1;
            let arm = 0.1 + 0.01 * k as f64;
            let config = TransmissionConfig::new(mass, arm, diameters, 1.0 + k as f64)
                .with_arm_angle((k as f64 * 1.7) % 89.0);
            let result = calculate(&config).unwrap();
            assert!(result.relative_error <= CONSISTENCY_TOLERANCE);
            assert!(close(
                result.total_reduction_ratio,
                result.load_torque_nm / result.motor_torque_nm,
                1e-9
            ));
            d0 *= 1.03;
        }
    }

    /// A propagation with one diameter ratio inverted, used to show the check
    /// catches a broken chain.
    fn propagate_inverted(load_torque_nm: f64, d: &[f64], gear_ratio: f64) -> f64 {
        let n = d.len() - 1;
        let mut force = 2.0 * load_torque_nm / d[n];
        for i in (0..n - 1).rev() {
            force *= d[i + 1] / d[i + 2];
        }
        force * d[0] / 2.0 / gear_ratio
    }

    #[test]
    fn test_check_detects_inverted_ratio() {
        let config = TransmissionConfig::reference();
        let t_load = load_torque(2.0, 0.3, 9.81, 0.0).unwrap();
        let broken_motor = propagate_inverted(t_load, &config.diameters_m, config.gear_ratio);

        let verification = verify(&config, t_load, broken_motor).unwrap();
        assert!(!verification.passes());
        assert!(verification.relative_error > 1e3 * CONSISTENCY_TOLERANCE);
        assert!(verification.relative_error > 0.1);
    }

    #[test]
    fn test_angle_reduces_load_torque() {
        let level = calculate(&TransmissionConfig::reference()).unwrap();
        let tilted = calculate(&TransmissionConfig::reference().with_arm_angle(60.0)).unwrap();
        assert!(close(tilted.load_torque_nm, level.load_torque_nm * 0.5, 1e-12));
        assert!(close(tilted.motor_torque_nm, level.motor_torque_nm * 0.5, 1e-12));
    }

    #[test]
    fn test_config_json_defaults() {
        let json = r#"{
            "pendulum_mass_kg": 2.0,
            "arm_length_m": 0.3,
            "diameters_m": [0.02, 0.03, 0.04, 0.05, 0.065],
            "gear_ratio": 10.0
        }"#;
        let config: TransmissionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.gravity_mps2, 9.81);
        assert_eq!(config.arm_angle_deg, 0.0);
        assert!(config.label.is_empty());
        assert!(calculate(&config).is_ok());
    }

    #[test]
    fn test_result_serialization() {
        let result = calculate(&TransmissionConfig::reference()).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("motor_torque_nm"));
        assert!(json.contains("rope_forces_n"));
        let roundtrip: TransmissionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.rope_forces_n.len(), 4);
    }
}
