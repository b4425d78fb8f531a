//! Configuration loading and management for the salary calculation engine.
//!
//! This module loads the engine settings (standard monthly hours, premium
//! multipliers, night windows, rest-day window, closure compensation) from
//! YAML files.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Overtime multiplier: {}", config.config().premiums.overtime);
//! ```

mod loader;
mod types;

pub(crate) use loader::load_yaml;
pub use loader::{ConfigLoader, ENGINE_CONFIG_FILE};
pub use types::{
    EngineConfig, HolidayWorkConfig, MonthDay, NightWindowConfig, PremiumRates, RestDayConfig,
    SpecialHolidayConfig,
};
