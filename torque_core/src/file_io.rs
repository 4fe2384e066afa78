//! # File I/O Module
//!
//! Reading and writing of configuration and study files:
//! - **Atomic saves**: write to a temp file, fsync, rename
//! - **Version validation**: study files must match our schema major version
//!
//! ## File Formats
//!
//! - `.json` - a single [`TransmissionConfig`]
//! - `.tqs` - a [`Study`] (JSON)
//!
//! ## Example
//!
//! ```rust,no_run
//! use torque_core::file_io::{load_study, save_study};
//! use torque_core::study::Study;
//! use std::path::Path;
//!
//! let study = Study::new("Student", "Bench variants");
//! save_study(&study, Path::new("bench.tqs"))?;
//! let loaded = load_study(Path::new("bench.tqs"))?;
//! # Ok::<(), torque_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use semver::Version;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::calculations::transmission::TransmissionConfig;
use crate::errors::{CalcError, CalcResult};
use crate::study::{Study, SCHEMA_VERSION};

fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))
}

/// Write `value` as pretty JSON: temp file, fsync, then rename over `path`.
fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let mut tmp_file = File::create(tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// Load a single transmission configuration from a JSON file.
///
/// The configuration is validated before it is returned, so a bad file fails
/// here with `InvalidConfiguration` rather than later.
pub fn load_config(path: &Path) -> CalcResult<TransmissionConfig> {
    let config: TransmissionConfig = read_json(path)?;
    config.validate()?;
    crate::info!("Loaded configuration '{}' from {}", config.label, path.display());
    Ok(config)
}

/// Save a single transmission configuration as JSON.
pub fn save_config(config: &TransmissionConfig, path: &Path) -> CalcResult<()> {
    write_json_atomic(config, path)
}

/// Save a study with atomic write semantics.
pub fn save_study(study: &Study, path: &Path) -> CalcResult<()> {
    write_json_atomic(study, path)?;
    crate::info!(
        "Saved study '{}' ({} configurations) to {}",
        study.meta.title,
        study.config_count(),
        path.display()
    );
    Ok(())
}

/// Load a study from a file.
///
/// # Returns
///
/// * `Ok(Study)` - Successfully loaded study
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_study(path: &Path) -> CalcResult<Study> {
    let study: Study = read_json(path)?;
    validate_version(&study.meta.version)?;

    for (id, config) in &study.configs {
        if let Err(e) = config.validate() {
            crate::warn!("Study configuration {} ('{}') is invalid: {}", id, config.label, e);
        }
    }
    Ok(study)
}

/// Validate that a file version is compatible with the current schema.
///
/// Major versions must match; for 0.x the file's minor version must not be
/// newer than ours.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file = Version::parse(file_version).map_err(|_| mismatch())?;
    let current = Version::parse(SCHEMA_VERSION).map_err(|e| CalcError::Internal {
        message: format!("bad schema version constant: {}", e),
    })?;

    if file.major != current.major {
        return Err(mismatch());
    }
    if current.major == 0 && file.minor > current.minor {
        return Err(mismatch());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_path(name: &str, extension: &str) -> PathBuf {
        temp_dir().join(format!("torquebench_test_{}_{}.{}", name, std::process::id(), extension))
    }

    #[test]
    fn test_study_save_and_load_roundtrip() {
        let path = temp_path("roundtrip", "tqs");

        let mut study = Study::new("Test Student", "Roundtrip");
        let id = study.add_config(TransmissionConfig::reference());
        save_study(&study, &path).unwrap();

        let loaded = load_study(&path).unwrap();
        assert_eq!(loaded.meta.author, "Test Student");
        assert_eq!(loaded.get_config(&id), study.get_config(&id));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_path("atomic", "tqs");
        let tmp_path = temp_dir().join(format!(
            "{}.tmp",
            path.file_name().unwrap().to_string_lossy()
        ));

        save_study(&Study::new("A", "B"), &path).unwrap();
        assert!(path.exists());
        assert!(!tmp_path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_config_roundtrip_and_validation() {
        let path = temp_path("config", "json");

        let config = TransmissionConfig::reference().with_arm_angle(30.0);
        save_config(&config, &path).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);

        let mut bad = config.clone();
        bad.gear_ratio = -1.0;
        save_config(&bad, &path).unwrap();
        let err = load_config(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_demo_config() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos/reference_bench.json");
        let config = load_config(&path).unwrap();
        assert_eq!(config, TransmissionConfig::reference());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_study(&temp_path("does_not_exist", "tqs")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_path("garbage", "json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_config(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.9").is_ok());

        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("not-a-version").is_err());
    }
}
