//! Utility module with paintmix's errors.
//!
//! All errors are configuration errors: they indicate malformed data or a
//! caller bug and are reported when a curve, pigment, palette, or context is
//! constructed, or when a weight vector does not fit its palette. Numerically
//! degenerate mixtures are not errors; they resolve according to the
//! configured [`DegeneracyPolicy`](crate::reflectance::DegeneracyPolicy).

#[cfg(feature = "pyffi")]
use pyo3::{exceptions::PyValueError, prelude::*};
use thiserror::Error;

use crate::Float;

/// Result type alias for paintmix operations.
pub type Result<T> = std::result::Result<T, MixError>;

/// The ways constructing or driving a mixing pipeline can fail.
#[derive(Debug, Error)]
pub enum MixError {
    /// A spectral curve with the wrong number of samples.
    #[error("invalid bucket count for {label}: {actual} != {expected}")]
    BucketCount {
        label: String,
        actual: usize,
        expected: usize,
    },

    /// A weight vector whose length differs from the palette's.
    #[error("expected {expected} mixing weights, one per pigment, but got {actual}")]
    WeightCount { actual: usize, expected: usize },

    /// A palette without pigments.
    #[error("palette should contain at least one pigment but is empty")]
    EmptyPalette,

    /// A pigment name not found in a palette.
    #[error("unknown pigment `{0}`")]
    UnknownPigment(String),

    /// A pigment name occurring twice in one palette.
    #[error("pigment `{0}` appears more than once in palette")]
    DuplicatePigment(String),

    /// A luminance normalization factor that is zero, negative, or not finite.
    #[error("luminance normalization should be positive and finite but is {0}")]
    InvalidNormalization(Float),

    /// Saunderson constants outside `0..1`.
    #[error("surface reflection constants should lie in 0..1 but are k1={k1}, k2={k2}")]
    InvalidSurfaceConstants { k1: Float, k2: Float },

    /// A gamma that is zero, negative, or not finite.
    #[error("gamma should be positive and finite but is {0}")]
    InvalidGamma(Float),

    /// A plane with zero width or height.
    #[error("mixing plane should have non-zero dimensions but is {width}x{height}")]
    EmptyPlane { width: u32, height: u32 },

    /// Reading or writing a configuration or pigment file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration or pigment file is not well-formed.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl MixError {
    /// Create a new bucket count error.
    pub fn bucket_count(label: impl Into<String>, actual: usize) -> Self {
        Self::BucketCount {
            label: label.into(),
            actual,
            expected: crate::spectrum::BUCKETS,
        }
    }
}

#[cfg(feature = "pyffi")]
impl From<MixError> for PyErr {
    fn from(value: MixError) -> Self {
        PyValueError::new_err(value.to_string())
    }
}
