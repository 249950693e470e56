//! Configuration loading and management for the attendance engine.
//!
//! This module loads the organisation site, shift catalog and leave category
//! rules from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded org: {}", config.org().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, LeaveCategoriesConfig, OrgConfig, ShiftsConfig};
