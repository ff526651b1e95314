//! Core domain types for Calorie Burnout.
//!
//! There is exactly one persisted record per installation: the user's
//! biometric profile collected by the setup flow.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological sex used to pick calorie-estimation constants
///
/// Only `Male` and `Female` can be selected during setup. Anything else read
/// back from storage becomes `Unknown`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    /// Parse one of the selectable setup values (case-insensitive)
    pub fn from_selection(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unknown => "Unknown",
        }
    }
}

impl From<&str> for Gender {
    fn from(label: &str) -> Self {
        Self::from_selection(label).unwrap_or(Gender::Unknown)
    }
}

impl From<String> for Gender {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's biometric profile
///
/// `age` and `weight` are kept as the text the user typed; they are parsed
/// when an estimate is requested (see [`crate::Biometrics::from_profile`]).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Set once the setup flow has filled in every field
    pub is_valid: bool,
    pub name: String,
    pub age: String,
    pub gender: Gender,
    /// Kilograms
    pub weight: String,
    /// Beats per minute
    pub resting_heart_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_selection() {
        assert_eq!(Gender::from_selection("Male"), Some(Gender::Male));
        assert_eq!(Gender::from_selection("FEMALE"), Some(Gender::Female));
        assert_eq!(Gender::from_selection(" female "), Some(Gender::Female));
        assert_eq!(Gender::from_selection("Other"), None);
        assert_eq!(Gender::from_selection(""), None);
    }

    #[test]
    fn test_unrecognized_gender_deserializes_to_unknown() {
        let gender: Gender = serde_json::from_str(r#""Other""#).unwrap();
        assert_eq!(gender, Gender::Unknown);

        let gender: Gender = serde_json::from_str(r#""""#).unwrap();
        assert_eq!(gender, Gender::Unknown);

        let gender: Gender = serde_json::from_str(r#""Female""#).unwrap();
        assert_eq!(gender, Gender::Female);
    }

    #[test]
    fn test_gender_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), r#""Male""#);
        assert_eq!(
            serde_json::to_string(&Gender::Unknown).unwrap(),
            r#""Unknown""#
        );
    }

    #[test]
    fn test_default_profile_is_not_valid() {
        let profile = UserProfile::default();
        assert!(!profile.is_valid);
        assert!(profile.name.is_empty());
        assert_eq!(profile.gender, Gender::Unknown);
        assert_eq!(profile.resting_heart_rate, 0.0);
    }
}
