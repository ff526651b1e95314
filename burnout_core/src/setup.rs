//! Setup form submission.
//!
//! The only check is that every field was filled in. A successful submit
//! yields a complete profile ready to be saved in one write.

use crate::{Error, Gender, Result, UserProfile};

/// Raw values collected by the setup flow
#[derive(Clone, Debug, Default)]
pub struct SetupForm {
    pub name: String,
    pub age: String,
    pub weight: String,
    pub gender: Option<Gender>,
    pub resting_heart_rate: Option<f64>,
}

impl SetupForm {
    /// Pre-fill the form from a previously stored (possibly incomplete) profile
    pub fn from_profile(profile: &UserProfile) -> Self {
        let gender = match profile.gender {
            Gender::Unknown => None,
            g => Some(g),
        };
        let resting_heart_rate =
            (profile.resting_heart_rate > 0.0).then_some(profile.resting_heart_rate);

        Self {
            name: profile.name.clone(),
            age: profile.age.clone(),
            weight: profile.weight.clone(),
            gender,
            resting_heart_rate,
        }
    }

    /// Turn the form into a valid profile
    pub fn submit(self) -> Result<UserProfile> {
        let name = required("name", self.name)?;
        let age = required("age", self.age)?;
        let weight = required("weight", self.weight)?;
        let gender = self
            .gender
            .filter(|g| *g != Gender::Unknown)
            .ok_or(Error::MissingField("gender"))?;
        let resting_heart_rate = self
            .resting_heart_rate
            .ok_or(Error::MissingField("resting heart rate"))?;

        Ok(UserProfile {
            is_valid: true,
            name,
            age,
            gender,
            weight,
            resting_heart_rate,
        })
    }
}

fn required(field: &'static str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::MissingField(field));
    }
    Ok(trimmed.to_string())
}
