//! Heart-rate sensor hand-off.
//!
//! Measuring is a modal step: it either completes with a reading or the
//! user cancels. The rest of the system only sees that outcome.

use crate::{Biometrics, CalorieEstimate, Error, Result, UserProfile};
use std::io::{BufRead, Write};

/// Outcome of one measurement
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeartRateReading {
    /// Beats per minute
    Measured(f64),
    Cancelled,
}

/// Source of heart-rate readings
pub trait HeartRateSensor {
    fn measure(&mut self) -> Result<HeartRateReading>;
}

/// Sensor that replays a preset outcome (`None` means cancelled)
#[derive(Clone, Copy, Debug)]
pub struct FixedSensor(pub Option<f64>);

impl HeartRateSensor for FixedSensor {
    fn measure(&mut self) -> Result<HeartRateReading> {
        match self.0 {
            Some(bpm) => {
                validate_bpm(bpm)?;
                Ok(HeartRateReading::Measured(bpm))
            }
            None => Ok(HeartRateReading::Cancelled),
        }
    }
}

/// Sensor that asks the user to type a reading
pub struct PromptSensor<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSensor<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> HeartRateSensor for PromptSensor<R, W> {
    /// Blank input or end of input cancels
    fn measure(&mut self) -> Result<HeartRateReading> {
        write!(self.output, "Heart rate (bpm, blank to cancel)> ")?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        let line = line.trim();
        if line.is_empty() {
            tracing::info!("Heart rate measurement cancelled");
            return Ok(HeartRateReading::Cancelled);
        }

        let bpm: f64 = line
            .parse()
            .map_err(|_| Error::InvalidReading(format!("not a number: {:?}", line)))?;
        validate_bpm(bpm)?;
        Ok(HeartRateReading::Measured(bpm))
    }
}

fn validate_bpm(bpm: f64) -> Result<()> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(Error::InvalidReading(format!(
            "heart rate must be positive, got {}",
            bpm
        )));
    }
    Ok(())
}

/// Take one reading and estimate calorie burn for `profile`
///
/// Returns `None` when the measurement was cancelled.
pub fn measure_and_estimate<S: HeartRateSensor + ?Sized>(
    profile: &UserProfile,
    sensor: &mut S,
) -> Result<Option<CalorieEstimate>> {
    let biometrics = Biometrics::from_profile(profile)?;

    match sensor.measure()? {
        HeartRateReading::Measured(bpm) => {
            let estimate = biometrics.estimate(bpm);
            tracing::info!("{} bpm -> {} kcal/min", bpm, estimate);
            Ok(Some(estimate))
        }
        HeartRateReading::Cancelled => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Gender;
    use std::io::Cursor;

    fn profile() -> UserProfile {
        UserProfile {
            is_valid: true,
            name: "Ravi".into(),
            age: "30".into(),
            gender: Gender::Male,
            weight: "80".into(),
            resting_heart_rate: 58.0,
        }
    }

    fn prompt(input: &str) -> PromptSensor<Cursor<Vec<u8>>, Vec<u8>> {
        PromptSensor::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_prompt_reads_bpm() {
        let mut sensor = prompt("120\n");
        assert_eq!(sensor.measure().unwrap(), HeartRateReading::Measured(120.0));
        let shown = String::from_utf8(sensor.output.clone()).unwrap();
        assert!(shown.contains("Heart rate"));
    }

    #[test]
    fn test_prompt_blank_or_eof_cancels() {
        assert_eq!(prompt("\n").measure().unwrap(), HeartRateReading::Cancelled);
        assert_eq!(prompt("").measure().unwrap(), HeartRateReading::Cancelled);
    }

    #[test]
    fn test_prompt_rejects_bad_input() {
        assert!(matches!(
            prompt("fast\n").measure(),
            Err(Error::InvalidReading(_))
        ));
        assert!(matches!(
            prompt("0\n").measure(),
            Err(Error::InvalidReading(_))
        ));
    }

    #[test]
    fn test_measure_and_estimate() {
        let estimate = measure_and_estimate(&profile(), &mut FixedSensor(Some(120.0)))
            .unwrap()
            .unwrap();
        assert_eq!(estimate.to_string(), "10.17");
    }

    #[test]
    fn test_cancelled_measurement_gives_no_estimate() {
        let result = measure_and_estimate(&profile(), &mut FixedSensor(None)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_unknown_gender_estimates_zero() {
        let mut p = profile();
        p.gender = Gender::Unknown;
        let estimate = measure_and_estimate(&p, &mut FixedSensor(Some(80.0)))
            .unwrap()
            .unwrap();
        assert_eq!(estimate.kcal_per_minute, 0.0);
        assert_eq!(estimate.to_string(), "0.00");
    }

    #[test]
    fn test_unparseable_profile_is_error() {
        let mut p = profile();
        p.weight = "heavy".into();
        assert!(measure_and_estimate(&p, &mut FixedSensor(Some(80.0))).is_err());
    }
}
