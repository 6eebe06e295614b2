use crate::{ElevationType, ProfileError, C};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

/// Parameters of a sampling run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Desired spacing between samples in meters.
    pub resolution_m: C,

    /// Upper bound on the number of samples; the resolution is
    /// enlarged when a line would need more.
    pub max_points: usize,

    pub elevation_type: ElevationType,

    /// Decimals shown for heights.
    pub decimal_places: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            resolution_m: 10.0,
            max_points: 1000,
            elevation_type: ElevationType::Terrain,
            decimal_places: 1,
        }
    }
}

impl SamplingConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ProfileError> {
        let file = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if !(self.resolution_m.is_finite() && self.resolution_m > 0.0) {
            return Err(ProfileError::InvalidResolution(self.resolution_m));
        }
        if self.max_points == 0 {
            return Err(ProfileError::InvalidMaxPoints);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SamplingConfig;
    use crate::{ElevationType, ProfileError};

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SamplingConfig =
            serde_json::from_str(r#"{ "resolution_m": 2.5, "elevation_type": "both" }"#).unwrap();
        assert_eq!(config.resolution_m, 2.5);
        assert_eq!(config.elevation_type, ElevationType::Both);
        assert_eq!(config.max_points, SamplingConfig::default().max_points);
        assert_eq!(config.decimal_places, 1);
    }

    #[test]
    fn test_validate() {
        assert!(SamplingConfig::default().validate().is_ok());
        let config = SamplingConfig {
            resolution_m: -1.0,
            ..SamplingConfig::default()
        };
        assert!(matches!(config.validate(), Err(ProfileError::InvalidResolution(_))));
    }

    #[test]
    fn test_from_missing_file() {
        let err = SamplingConfig::from_json_file("/nonexistent/heightprofile.json").unwrap_err();
        assert!(matches!(err, ProfileError::Io(_)));
    }
}
