//! Tunable parameters of the mixing pipeline.
//!
//! [`MixOptions`] collects everything about an evaluation besides the palette
//! and the illuminated observer. Options serialize to and from JSON, with
//! missing fields taking on their default values:
//!
//! ```json
//! {
//!     "surface": { "k1": 0.0031, "k2": 0.65 },
//!     "gamma": 2.2,
//!     "degeneracy": "black",
//!     "gamut": "clamp"
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::conversion::GamutPolicy;
use crate::error::{MixError, Result};
use crate::reflectance::{DegeneracyPolicy, SurfaceConstants};
use crate::Float;

/// Options for mixing pigments and rendering the result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixOptions {
    /// Saunderson's surface reflection constants.
    pub surface: SurfaceConstants,
    /// The gamma used for encoding linear RGB.
    pub gamma: Float,
    /// The treatment of buckets outside the Kubelka-Munk formula's domain.
    pub degeneracy: DegeneracyPolicy,
    /// The treatment of linear RGB outside the unit cube.
    pub gamut: GamutPolicy,
}

impl MixOptions {
    /// The default gamma.
    pub const REFERENCE_GAMMA: Float = 2.2;

    /// Validate these options.
    pub fn validate(&self) -> Result<()> {
        self.surface.validate()?;
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(MixError::InvalidGamma(self.gamma));
        }
        Ok(())
    }

    /// Parse and validate options from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Save options to a JSON file.
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl Default for MixOptions {
    fn default() -> Self {
        Self {
            surface: SurfaceConstants::REFERENCE,
            gamma: Self::REFERENCE_GAMMA,
            degeneracy: DegeneracyPolicy::Black,
            gamut: GamutPolicy::Clamp,
        }
    }
}

#[cfg(test)]
mod test {
    use super::MixOptions;
    use crate::conversion::GamutPolicy;
    use crate::error::MixError;
    use crate::reflectance::{DegeneracyPolicy, SurfaceConstants};

    #[test]
    fn test_defaults() {
        let options = MixOptions::default();
        assert_eq!(options.surface, SurfaceConstants::REFERENCE);
        assert_eq!(options.gamma, 2.2);
        assert_eq!(options.degeneracy, DegeneracyPolicy::Black);
        assert_eq!(options.gamut, GamutPolicy::Clamp);
        assert!(options.validate().is_ok());

        assert_eq!(MixOptions::from_json_str("{}").unwrap(), options);
    }

    #[test]
    fn test_partial_json() {
        let options =
            MixOptions::from_json_str(r#"{"gamma": 1.0, "degeneracy": "zero-reflectance"}"#)
                .unwrap();
        assert_eq!(options.gamma, 1.0);
        assert_eq!(options.degeneracy, DegeneracyPolicy::ZeroReflectance);
        assert_eq!(options.surface, SurfaceConstants::REFERENCE);

        let options = MixOptions::from_json_str(r#"{"gamut": "clamp-unit"}"#).unwrap();
        assert_eq!(options.gamut, GamutPolicy::ClampUnit);
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            MixOptions::from_json_str(r#"{"gamma": 0.0}"#),
            Err(MixError::InvalidGamma(_))
        ));
        assert!(matches!(
            MixOptions::from_json_str(r#"{"surface": {"k1": 0.5, "k2": 1.5}}"#),
            Err(MixError::InvalidSurfaceConstants { .. })
        ));
        assert!(matches!(
            MixOptions::from_json_str(r#"{"degeneracy": "ignore"}"#),
            Err(MixError::Json(_))
        ));
    }

    #[test]
    fn test_json_file() {
        let path = std::env::temp_dir().join(format!("paintmix-options-{}.json", std::process::id()));
        let options = MixOptions {
            gamma: 2.4,
            gamut: GamutPolicy::Propagate,
            ..MixOptions::default()
        };

        options.to_json_file(&path).unwrap();
        let loaded = MixOptions::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, options);
    }
}
