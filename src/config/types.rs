//! Configuration types for attendance reconciliation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::models::ShiftDefinition;
use crate::reconciliation::{Geofence, LeaveCategoryRules, ShiftCatalog};

/// Organisation metadata and work site.
#[derive(Debug, Clone, Deserialize)]
pub struct OrgConfig {
    /// Display name of the organisation.
    pub name: String,
    /// The site geofence clock events are checked against.
    pub site: Geofence,
}

/// Shift catalog file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftsConfig {
    /// Code of the fallback shift; the first shift when omitted.
    #[serde(default)]
    pub default_code: Option<String>,
    /// All shifts, in display order.
    pub shifts: Vec<ShiftDefinition>,
}

/// Leave category file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveCategoriesConfig {
    /// Keyword rules per category.
    pub leave_categories: LeaveCategoryRules,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    org: OrgConfig,
    catalog: ShiftCatalog,
    leave_rules: LeaveCategoryRules,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(org: OrgConfig, catalog: ShiftCatalog, leave_rules: LeaveCategoryRules) -> Self {
        Self {
            org,
            catalog,
            leave_rules,
        }
    }

    /// Returns the organisation metadata.
    pub fn org(&self) -> &OrgConfig {
        &self.org
    }

    /// Returns the shift catalog.
    pub fn catalog(&self) -> &ShiftCatalog {
        &self.catalog
    }

    /// Returns the leave category rules.
    pub fn leave_rules(&self) -> &LeaveCategoryRules {
        &self.leave_rules
    }
}
