//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::reconciliation::{Geofence, LeaveCategoryRules, ShiftCatalog};

use super::types::{EngineConfig, LeaveCategoriesConfig, OrgConfig, ShiftsConfig};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── org.yaml               # Organisation name and site geofence
/// ├── shifts.yaml            # Shift catalog and default shift
/// └── leave_categories.yaml  # Optional leave keyword rules
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Loaded org: {}", loader.org().name);
/// println!("Default shift: {}", loader.catalog().default_shift().label());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `org.yaml` or `shifts.yaml` is missing
    /// - any file contains invalid YAML or a malformed clock time
    /// - the shift catalog is inconsistent (see [`ShiftCatalog::new`])
    ///
    /// A missing `leave_categories.yaml` falls back to the default rules.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let org = Self::load_yaml::<OrgConfig>(&path.join("org.yaml"))?;
        if org.site.radius_m.is_nan() || org.site.radius_m < 0.0 {
            return Err(EngineError::InvalidConfig {
                message: format!("site radius must be non-negative, got {}", org.site.radius_m),
            });
        }

        let shifts = Self::load_yaml::<ShiftsConfig>(&path.join("shifts.yaml"))?;
        let catalog = ShiftCatalog::new(shifts.shifts, shifts.default_code.as_deref())?;

        let leave_path = path.join("leave_categories.yaml");
        let leave_rules = if leave_path.exists() {
            Self::load_yaml::<LeaveCategoriesConfig>(&leave_path)?.leave_categories
        } else {
            LeaveCategoryRules::default()
        };

        debug!(
            path = %path.display(),
            org = %org.name,
            shifts = catalog.shifts().len(),
            "Loaded configuration"
        );

        Ok(Self {
            config: EngineConfig::new(org, catalog, leave_rules),
        })
    }

    /// Builds a loader from already-constructed parts, without touching disk.
    pub fn from_parts(org: OrgConfig, catalog: ShiftCatalog, leave_rules: LeaveCategoryRules) -> Self {
        Self {
            config: EngineConfig::new(org, catalog, leave_rules),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the organisation metadata.
    pub fn org(&self) -> &OrgConfig {
        self.config.org()
    }

    /// Returns the site geofence.
    pub fn geofence(&self) -> &Geofence {
        &self.config.org().site
    }

    /// Returns the shift catalog.
    pub fn catalog(&self) -> &ShiftCatalog {
        self.config.catalog()
    }

    /// Returns the leave category rules.
    pub fn leave_rules(&self) -> &LeaveCategoryRules {
        self.config.leave_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/default"
    }

    /// Writes a throwaway config directory under the system temp dir.
    fn temp_config(name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "attendance-engine-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        for (file, content) in files {
            fs::write(dir.join(file), content).unwrap();
        }
        dir
    }

    const ORG: &str = "name: Test Store\nsite:\n  latitude: 13.7563\n  longitude: 100.5018\n  radius_m: 150\n";

    #[test]
    fn test_load_default_config() {
        let loader = ConfigLoader::load(config_path()).expect("Failed to load config");
        assert_eq!(loader.org().name, "Demo Store");
        assert_eq!(loader.geofence().radius_m, 200.0);
        assert_eq!(loader.catalog().shifts().len(), 3);
        assert_eq!(loader.catalog().default_shift().code, "A");
        assert_eq!(loader.catalog().lookup(Some("C")).scheduled_start, 720);
    }

    #[test]
    fn test_default_config_leave_rules() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.leave_rules(), &LeaveCategoryRules::default());
    }

    #[test]
    fn test_missing_directory() {
        let result = ConfigLoader::load("./config/does-not-exist");
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_leave_categories_optional() {
        let dir = temp_config(
            "no-leave",
            &[
                ("org.yaml", ORG),
                ("shifts.yaml", "shifts:\n  - code: D\n    start: \"08:00\"\n    end: \"17:00\"\n"),
            ],
        );
        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(loader.catalog().default_shift().code, "D");
        assert_eq!(loader.leave_rules(), &LeaveCategoryRules::default());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_overnight_shift_is_invalid_config() {
        let dir = temp_config(
            "overnight",
            &[
                ("org.yaml", ORG),
                ("shifts.yaml", "shifts:\n  - code: N\n    start: \"22:00\"\n    end: \"06:00\"\n"),
            ],
        );
        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_bad_clock_time_is_parse_error() {
        let dir = temp_config(
            "bad-clock",
            &[
                ("org.yaml", ORG),
                ("shifts.yaml", "shifts:\n  - code: A\n    start: \"ten\"\n    end: \"19:00\"\n"),
            ],
        );
        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_negative_radius_rejected() {
        let dir = temp_config(
            "negative-radius",
            &[
                (
                    "org.yaml",
                    "name: X\nsite:\n  latitude: 0\n  longitude: 0\n  radius_m: -5\n",
                ),
                ("shifts.yaml", "shifts:\n  - code: A\n    start: \"10:00\"\n    end: \"19:00\"\n"),
            ],
        );
        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_from_parts() {
        let org = OrgConfig {
            name: "Inline".to_string(),
            site: Geofence {
                latitude: 1.0,
                longitude: 2.0,
                radius_m: 50.0,
            },
        };
        let loader = ConfigLoader::from_parts(org, ShiftCatalog::default(), LeaveCategoryRules::default());
        assert_eq!(loader.org().name, "Inline");
        assert_eq!(loader.catalog().default_shift().code, "A");
    }
}
