#![forbid(unsafe_code)]

//! Core domain model and business logic for Calorie Burnout.
//!
//! This crate provides:
//! - Domain types (user profile, gender)
//! - Profile persistence with schema versioning
//! - Calorie burn estimation from heart rate
//! - Setup form gate and launch routing
//! - Heart-rate sensor hand-off

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod schema;
pub mod store;
pub mod estimator;
pub mod setup;
pub mod launch;
pub mod sensor;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{Config, LegacyPolicy};
pub use store::{FileStore, KeyValueStore, MemoryStore, UserProfileStore, PROFILE_KEY};
pub use estimator::{constants_for, constants_for_label, estimate, Biometrics, CalorieConstants, CalorieEstimate};
pub use setup::SetupForm;
pub use launch::{route, Screen};
pub use sensor::{measure_and_estimate, FixedSensor, HeartRateReading, HeartRateSensor, PromptSensor};
