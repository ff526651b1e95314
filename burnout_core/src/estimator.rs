//! Heart-rate based calorie burn estimation.
//!
//! Uses the Keytel et al. linear model:
//!
//! ```text
//! kcal/min = (hr_coef * hr + age_coef * age + weight_coef * weight - base) / 4.184
//! ```
//!
//! with coefficients selected by gender. `Unknown` gender selects all-zero
//! coefficients, so the estimate collapses to zero instead of failing.

use crate::{Error, Gender, Result, UserProfile};
use chrono::Duration;
use std::fmt;

/// Kilojoules per kilocalorie
pub const KJ_PER_KCAL: f64 = 4.184;

/// Per-gender coefficients of the estimation formula
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalorieConstants {
    pub age: f64,
    pub weight: f64,
    pub heart_rate: f64,
    pub base: f64,
}

impl CalorieConstants {
    pub const MALE: Self = Self {
        age: 0.2017,
        weight: 0.1988,
        heart_rate: 0.6309,
        base: 55.0969,
    };

    pub const FEMALE: Self = Self {
        age: 0.0740,
        weight: 0.1988,
        heart_rate: 0.4472,
        base: 20.4022,
    };

    pub const ZERO: Self = Self {
        age: 0.0,
        weight: 0.0,
        heart_rate: 0.0,
        base: 0.0,
    };

    /// `(age, weight, heart_rate, base)`
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.age, self.weight, self.heart_rate, self.base)
    }
}

pub fn constants_for(gender: Gender) -> CalorieConstants {
    match gender {
        Gender::Male => CalorieConstants::MALE,
        Gender::Female => CalorieConstants::FEMALE,
        Gender::Unknown => CalorieConstants::ZERO,
    }
}

/// Look up constants by label; unrecognized labels get [`CalorieConstants::ZERO`]
pub fn constants_for_label(label: &str) -> CalorieConstants {
    constants_for(Gender::from(label))
}

/// Estimated kilocalories burned per minute
///
/// Very low heart rates can give a negative value; it is returned as computed.
pub fn estimate(age: f64, weight: f64, heart_rate: f64, gender: Gender) -> f64 {
    let c = constants_for(gender);
    (c.heart_rate * heart_rate + c.age * age + c.weight * weight - c.base) / KJ_PER_KCAL
}

/// Numeric inputs to the estimator, parsed from a stored profile
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Biometrics {
    pub age: f64,
    pub weight_kg: f64,
    pub gender: Gender,
}

impl Biometrics {
    /// Parse the profile's text fields
    pub fn from_profile(profile: &UserProfile) -> Result<Self> {
        Ok(Self {
            age: parse_positive("age", &profile.age)?,
            weight_kg: parse_positive("weight", &profile.weight)?,
            gender: profile.gender,
        })
    }

    pub fn estimate(&self, heart_rate: f64) -> CalorieEstimate {
        CalorieEstimate {
            heart_rate,
            kcal_per_minute: estimate(self.age, self.weight_kg, heart_rate, self.gender),
        }
    }
}

fn parse_positive(field: &str, text: &str) -> Result<f64> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| Error::InvalidProfile(format!("{} is not a number: {:?}", field, text)))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidProfile(format!(
            "{} must be a positive number, got {}",
            field, value
        )));
    }
    Ok(value)
}

/// An estimate for one heart-rate reading
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalorieEstimate {
    pub heart_rate: f64,
    pub kcal_per_minute: f64,
}

impl CalorieEstimate {
    /// Total kilocalories if the rate is held for `duration`
    pub fn total_over(&self, duration: Duration) -> f64 {
        let minutes = duration.num_milliseconds() as f64 / 60_000.0;
        self.kcal_per_minute * minutes
    }
}

impl fmt::Display for CalorieEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.kcal_per_minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_constants_lookup() {
        assert_eq!(
            constants_for_label("Male").as_tuple(),
            (0.2017, 0.1988, 0.6309, 55.0969)
        );
        assert_eq!(
            constants_for_label("Female").as_tuple(),
            (0.0740, 0.1988, 0.4472, 20.4022)
        );
        assert_eq!(constants_for_label("Other").as_tuple(), (0.0, 0.0, 0.0, 0.0));
        assert_eq!(constants_for(Gender::Unknown), CalorieConstants::ZERO);
    }

    #[test]
    fn test_unknown_gender_estimates_zero() {
        assert_eq!(estimate(30.0, 70.0, 80.0, Gender::Unknown), 0.0);
    }

    #[test]
    fn test_male_estimate() {
        // (0.6309*120 + 0.2017*30 + 0.1988*80 - 55.0969) / 4.184
        let expected = (75.708 + 6.051 + 15.904 - 55.0969) / 4.184;
        let kcal = estimate(30.0, 80.0, 120.0, Gender::Male);
        assert!(approx_eq(kcal, expected), "got {}", kcal);
        assert_eq!(format!("{:.2}", kcal), "10.17");
    }

    #[test]
    fn test_female_estimate() {
        let expected = (53.664 + 2.22 + 11.928 - 20.4022) / 4.184;
        let kcal = estimate(30.0, 60.0, 120.0, Gender::Female);
        assert!(approx_eq(kcal, expected), "got {}", kcal);
        assert_eq!(format!("{:.2}", kcal), "11.33");
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let a = estimate(41.0, 82.5, 135.0, Gender::Male);
        let b = estimate(41.0, 82.5, 135.0, Gender::Male);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_low_heart_rate_is_not_clamped() {
        assert!(estimate(20.0, 50.0, 40.0, Gender::Male) < 0.0);
    }

    #[test]
    fn test_biometrics_from_profile() {
        let profile = UserProfile {
            is_valid: true,
            name: "Ravi".into(),
            age: " 30 ".into(),
            gender: Gender::Male,
            weight: "80".into(),
            resting_heart_rate: 58.0,
        };

        let bio = Biometrics::from_profile(&profile).unwrap();
        assert_eq!(bio.age, 30.0);
        assert_eq!(bio.weight_kg, 80.0);

        let est = bio.estimate(120.0);
        assert_eq!(est.heart_rate, 120.0);
        assert_eq!(est.to_string(), "10.17");
    }

    #[test]
    fn test_biometrics_rejects_non_numeric_text() {
        let mut profile = UserProfile {
            age: "thirty".into(),
            weight: "80".into(),
            ..UserProfile::default()
        };
        assert!(matches!(
            Biometrics::from_profile(&profile),
            Err(Error::InvalidProfile(_))
        ));

        profile.age = "30".into();
        profile.weight = "-5".into();
        assert!(matches!(
            Biometrics::from_profile(&profile),
            Err(Error::InvalidProfile(_))
        ));

        profile.weight = "NaN".into();
        assert!(Biometrics::from_profile(&profile).is_err());
    }

    #[test]
    fn test_total_over_duration() {
        let est = CalorieEstimate {
            heart_rate: 120.0,
            kcal_per_minute: 10.0,
        };
        assert!(approx_eq(est.total_over(Duration::minutes(30)), 300.0));
        assert!(approx_eq(est.total_over(Duration::seconds(90)), 15.0));
        assert_eq!(est.total_over(Duration::zero()), 0.0);
    }

    #[test]
    fn test_display_two_decimals() {
        let est = CalorieEstimate {
            heart_rate: 0.0,
            kcal_per_minute: 0.0,
        };
        assert_eq!(est.to_string(), "0.00");
    }
}
