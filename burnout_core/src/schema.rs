//! Versioned on-disk format for the user profile.
//!
//! Current records are wrapped in an envelope carrying `schema_version`.
//! Earlier app revisions wrote the bare record with camelCase keys and no
//! version tag; those are recognized here so the store can upgrade or
//! discard them explicitly.

use crate::{Error, Gender, Result, UserProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version written by [`encode`]
pub const CURRENT_SCHEMA_VERSION: u32 = 3;

/// Envelope for the current schema
#[derive(Debug, Serialize, Deserialize)]
struct StoredProfile {
    schema_version: u32,
    saved_at: DateTime<Utc>,
    profile: UserProfile,
}

/// Unversioned record from earlier revisions (v1, and v2 with `restingBPM`)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyProfile {
    valid_information: bool,
    name: String,
    age: String,
    gender: String,
    weight: String,
    #[serde(rename = "restingBPM", default)]
    resting_bpm: Option<f64>,
}

impl LegacyProfile {
    fn version(&self) -> u32 {
        if self.resting_bpm.is_some() {
            2
        } else {
            1
        }
    }

    /// Map onto the current record
    ///
    /// v1 never captured a resting heart rate, so the result is marked
    /// invalid and the user goes back through setup.
    fn upgrade(self) -> UserProfile {
        let (resting_heart_rate, is_valid) = match self.resting_bpm {
            Some(bpm) => (bpm, self.valid_information),
            None => (0.0, false),
        };

        UserProfile {
            is_valid,
            name: self.name,
            age: self.age,
            gender: Gender::from(self.gender),
            weight: self.weight,
            resting_heart_rate,
        }
    }
}

/// Result of decoding a stored blob
#[derive(Clone, Debug, PartialEq)]
pub enum Decoded {
    Current(UserProfile),
    Legacy { version: u32, profile: UserProfile },
}

/// Serialize a profile into the current envelope
///
/// JSON has no representation for NaN or infinity, so a non-finite resting
/// heart rate is refused rather than written as `null`.
pub fn encode(profile: &UserProfile, saved_at: DateTime<Utc>) -> Result<String> {
    if !profile.resting_heart_rate.is_finite() {
        return Err(Error::Schema(format!(
            "resting heart rate must be finite, got {}",
            profile.resting_heart_rate
        )));
    }

    let stored = StoredProfile {
        schema_version: CURRENT_SCHEMA_VERSION,
        saved_at,
        profile: profile.clone(),
    };
    Ok(serde_json::to_string(&stored)?)
}

/// Decode a stored blob of any known revision
pub fn decode(contents: &str) -> Result<Decoded> {
    let value: serde_json::Value = serde_json::from_str(contents)?;

    match value.get("schema_version").cloned() {
        Some(version) => {
            let version = version
                .as_u64()
                .ok_or_else(|| Error::Schema(format!("non-integer schema_version {}", version)))?;
            if version != u64::from(CURRENT_SCHEMA_VERSION) {
                return Err(Error::Schema(format!(
                    "unsupported schema_version {} (expected {})",
                    version, CURRENT_SCHEMA_VERSION
                )));
            }
            let stored: StoredProfile = serde_json::from_value(value)?;
            tracing::debug!("Decoded profile saved at {}", stored.saved_at);
            Ok(Decoded::Current(stored.profile))
        }
        None => {
            if !value.is_object() {
                return Err(Error::Schema("stored profile is not an object".into()));
            }
            let legacy: LegacyProfile = serde_json::from_value(value)?;
            let version = legacy.version();
            tracing::debug!("Decoded unversioned v{} profile", version);
            Ok(Decoded::Legacy {
                version,
                profile: legacy.upgrade(),
            })
        }
    }
}
