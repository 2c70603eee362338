//! Spectral curves, illuminants, and observers at 10nm resolution.
//!
//! Everything spectral in paintmix is sampled at the same fixed wavelengths,
//! from [`MIN_NM`] to [`MAX_NM`] inclusive in steps of [`STEP_NM`], for a
//! total of [`BUCKETS`] samples. Instead of relying on implicit array sizes,
//! every curve validates its length when it is constructed from a slice, so
//! that a malformed table fails loudly at startup and never during
//! evaluation.
//!
//! The [`SpectralDistribution`] trait abstracts over bucketed data. Its value
//! type is `Float` for illuminants and curves and `[Float; 3]` for observers.
//! This module includes the following implementations:
//!
//!   * [`SpectralCurve`] is a plain sequence of samples and serves as
//!     pigment K and S curves as well as reflectance spectra.
//!   * [`Illuminant`] is a labelled curve with a light source's relative power.
//!   * [`Observer`] holds the three color matching functions.
//!   * [`IlluminatedObserver`] holds the per-bucket product of an illuminant
//!     and an observer, i.e., the integration weights, together with the
//!     luminance normalization factor derived from them.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{MixError, Result};
use crate::integrate::{trapezoid, trapezoid3};
use crate::Float;

/// The shortest sampled wavelength in nanometers.
pub const MIN_NM: usize = 380;

/// The longest sampled wavelength in nanometers.
pub const MAX_NM: usize = 750;

/// The distance between adjacent samples in nanometers.
pub const STEP_NM: usize = 10;

/// The number of samples in every spectral curve.
pub const BUCKETS: usize = (MAX_NM - MIN_NM) / STEP_NM + 1;

/// The distance between adjacent samples as a floating point number.
pub const STEP: Float = STEP_NM as Float;

/// Get the wavelength in nanometers for the given bucket index.
pub const fn wavelength_of(index: usize) -> Option<usize> {
    if index < BUCKETS {
        Some(MIN_NM + index * STEP_NM)
    } else {
        None
    }
}

/// Get the bucket index for the given wavelength in nanometers.
///
/// Only wavelengths that are sampled, i.e., that lie within range and on the
/// 10nm grid, have an index.
pub const fn index_of(wavelength: usize) -> Option<usize> {
    if wavelength < MIN_NM || MAX_NM < wavelength || (wavelength - MIN_NM) % STEP_NM != 0 {
        None
    } else {
        Some((wavelength - MIN_NM) / STEP_NM)
    }
}

/// Iterate over all sampled wavelengths in ascending order.
pub fn wavelengths() -> std::iter::StepBy<std::ops::RangeInclusive<usize>> {
    (MIN_NM..=MAX_NM).step_by(STEP_NM)
}

/// Check that a table has exactly [`BUCKETS`] entries.
fn check_bucket_count<T>(label: &str, samples: &[T]) -> Result<()> {
    if samples.len() == BUCKETS {
        Ok(())
    } else {
        Err(MixError::bucket_count(label, samples.len()))
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A spectral distribution at 10nm resolution.
///
/// Implementations only need to provide a label and bucket-indexed access.
/// Access by wavelength and the length default to the fixed sampling grid.
pub trait SpectralDistribution {
    /// The spectral distribution's value type.
    type Value;

    /// Get a descriptive label for this spectral distribution.
    fn label(&self) -> String;

    /// Get the number of buckets.
    fn len(&self) -> usize {
        BUCKETS
    }

    /// Determine whether this distribution is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the value for the given zero-based bucket index.
    fn get(&self, index: usize) -> Option<Self::Value>;

    /// Get the value for the given wavelength in nanometers.
    fn at(&self, wavelength: usize) -> Option<Self::Value> {
        index_of(wavelength).and_then(|index| self.get(index))
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A sequence of exactly [`BUCKETS`] samples, one per wavelength.
///
/// Curves serialize as plain JSON arrays. Deserializing an array of any other
/// length fails.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Float>", into = "Vec<Float>")]
pub struct SpectralCurve {
    samples: [Float; BUCKETS],
}

impl SpectralCurve {
    /// Create a new spectral curve from a slice.
    ///
    /// The label only serves to identify the curve in the error for a slice
    /// with the wrong length.
    pub fn new(label: &str, samples: &[Float]) -> Result<Self> {
        check_bucket_count(label, samples)?;
        let mut curve = Self::constant(0.0);
        curve.samples.copy_from_slice(samples);
        Ok(curve)
    }

    /// Create a new spectral curve from an array with the right length.
    pub const fn from_array(samples: [Float; BUCKETS]) -> Self {
        Self { samples }
    }

    /// Create a new spectral curve with the same value everywhere.
    pub const fn constant(value: Float) -> Self {
        Self {
            samples: [value; BUCKETS],
        }
    }

    /// Access the samples as an array.
    #[inline]
    pub fn as_array(&self) -> &[Float; BUCKETS] {
        &self.samples
    }

    /// Iterate over the samples in ascending wavelength order.
    pub fn iter(&self) -> std::slice::Iter<'_, Float> {
        self.samples.iter()
    }

    /// Create a new curve by applying the function to every sample.
    #[must_use = "method returns a new curve and does not mutate the original"]
    pub fn map(&self, f: impl Fn(Float) -> Float) -> Self {
        Self {
            samples: self.samples.map(f),
        }
    }

    /// Determine whether all samples are finite.
    pub fn is_finite(&self) -> bool {
        self.samples.iter().all(|s| s.is_finite())
    }

    /// Get the smallest sample.
    pub fn minimum(&self) -> Float {
        self.samples.iter().copied().fold(Float::INFINITY, Float::min)
    }

    /// Get the largest sample.
    pub fn maximum(&self) -> Float {
        self.samples
            .iter()
            .copied()
            .fold(Float::NEG_INFINITY, Float::max)
    }
}

impl AsRef<[Float]> for SpectralCurve {
    fn as_ref(&self) -> &[Float] {
        &self.samples
    }
}

impl std::ops::Index<usize> for SpectralCurve {
    type Output = Float;

    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}

impl TryFrom<Vec<Float>> for SpectralCurve {
    type Error = MixError;

    fn try_from(value: Vec<Float>) -> Result<Self> {
        Self::new("spectral curve", &value)
    }
}

impl From<SpectralCurve> for Vec<Float> {
    fn from(value: SpectralCurve) -> Self {
        value.samples.to_vec()
    }
}

impl SpectralDistribution for SpectralCurve {
    type Value = Float;

    fn label(&self) -> String {
        "spectral curve".to_string()
    }

    fn get(&self, index: usize) -> Option<Self::Value> {
        self.samples.get(index).copied()
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A light source's relative spectral power.
#[derive(Clone, Debug)]
pub struct Illuminant {
    label: Cow<'static, str>,
    curve: SpectralCurve,
}

impl Illuminant {
    /// Create a new illuminant from a static table.
    pub const fn from_table(label: &'static str, data: [Float; BUCKETS]) -> Self {
        Self {
            label: Cow::Borrowed(label),
            curve: SpectralCurve::from_array(data),
        }
    }

    /// Create a new illuminant, validating the number of samples.
    pub fn new(label: impl Into<String>, samples: &[Float]) -> Result<Self> {
        let label = label.into();
        let curve = SpectralCurve::new(&label, samples)?;
        Ok(Self {
            label: Cow::Owned(label),
            curve,
        })
    }

    /// Get this illuminant's spectral power curve.
    pub fn curve(&self) -> &SpectralCurve {
        &self.curve
    }
}

impl SpectralDistribution for Illuminant {
    type Value = Float;

    fn label(&self) -> String {
        self.label.to_string()
    }

    fn get(&self, index: usize) -> Option<Self::Value> {
        self.curve.get(index)
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A standard observer at 10nm resolution.
///
/// The CIE's standard observers, or color matching functions, model human color
/// perception. Since humans are trichromatic, the per-wavelength values of
/// standard observers are triples of floating point numbers.
#[derive(Clone, Debug)]
pub struct Observer {
    label: Cow<'static, str>,
    data: [[Float; 3]; BUCKETS],
}

impl Observer {
    /// Create a new observer from three static tables for x, y, and z.
    pub const fn from_tables(
        label: &'static str,
        x: [Float; BUCKETS],
        y: [Float; BUCKETS],
        z: [Float; BUCKETS],
    ) -> Self {
        let mut data = [[0.0; 3]; BUCKETS];
        let mut index = 0;
        while index < BUCKETS {
            data[index] = [x[index], y[index], z[index]];
            index += 1;
        }

        Self {
            label: Cow::Borrowed(label),
            data,
        }
    }

    /// Create a new observer, validating the number of samples for each color
    /// matching function.
    pub fn new(label: impl Into<String>, x: &[Float], y: &[Float], z: &[Float]) -> Result<Self> {
        let label = label.into();
        let x = SpectralCurve::new(&format!("{} X", label), x)?;
        let y = SpectralCurve::new(&format!("{} Y", label), y)?;
        let z = SpectralCurve::new(&format!("{} Z", label), z)?;

        Ok(Self {
            label: Cow::Owned(label),
            data: std::array::from_fn(|index| [x[index], y[index], z[index]]),
        })
    }
}

impl SpectralDistribution for Observer {
    type Value = [Float; 3];

    fn label(&self) -> String {
        self.label.to_string()
    }

    fn get(&self, index: usize) -> Option<Self::Value> {
        self.data.get(index).copied()
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// An illuminated observer at 10nm resolution.
///
/// An illuminated observer is a spectral distribution representing a choice of
/// illuminant and observer when computing tristimulus values. Its
/// per-wavelength values are computed by premultiplying the illuminant's and
/// observer's per-wavelength values. ASTM standard E308 refers to the
/// premultiplied values as *weighting factors*.
///
/// Upon creation, an illuminated observer also integrates its Y weights. That
/// luminance normalization factor scales tristimulus values so that a
/// perfectly reflecting surface has `Y = 1`. For the D65 illuminant and the
/// 1931 2º observer it is 11619.347.
#[derive(Clone, Debug)]
pub struct IlluminatedObserver {
    label: String,
    y_norm: Float,
    data: [[Float; 3]; BUCKETS],
}

impl IlluminatedObserver {
    /// Create a new illuminated observer.
    ///
    /// This function fails if either distribution has the wrong number of
    /// buckets or if the resulting luminance normalization factor is not
    /// positive.
    pub fn new<I, O>(illuminant: &I, observer: &O) -> Result<Self>
    where
        I: SpectralDistribution<Value = Float>,
        O: SpectralDistribution<Value = [Float; 3]>,
    {
        if illuminant.len() != BUCKETS {
            return Err(MixError::bucket_count(illuminant.label(), illuminant.len()));
        } else if observer.len() != BUCKETS {
            return Err(MixError::bucket_count(observer.label(), observer.len()));
        }

        let mut data = [[0.0; 3]; BUCKETS];

        for (index, entry) in data.iter_mut().enumerate() {
            let s = illuminant
                .get(index)
                .ok_or_else(|| MixError::bucket_count(illuminant.label(), illuminant.len()))?;
            let [x, y, z] = observer
                .get(index)
                .ok_or_else(|| MixError::bucket_count(observer.label(), observer.len()))?;
            *entry = [s * x, s * y, s * z];
        }

        let luminance: [Float; BUCKETS] = std::array::from_fn(|index| data[index][1]);
        let y_norm = Self::check_y_norm(trapezoid(&luminance, STEP))?;

        Ok(Self {
            label: format!("{} / {}", illuminant.label(), observer.label()),
            y_norm,
            data,
        })
    }

    /// Create the illuminated observer for CIE D65 and the CIE 1931 2º
    /// observer.
    pub fn reference() -> Result<Self> {
        Self::new(
            &crate::cie::CIE_ILLUMINANT_D65,
            &crate::cie::CIE_OBSERVER_2DEG_1931,
        )
    }

    /// Replace the luminance normalization factor.
    ///
    /// Callers that must reproduce another implementation's scale exactly can
    /// supply its precomputed factor. It must be positive and finite.
    pub fn with_y_norm(self, y_norm: Float) -> Result<Self> {
        let y_norm = Self::check_y_norm(y_norm)?;
        Ok(Self { y_norm, ..self })
    }

    fn check_y_norm(y_norm: Float) -> Result<Float> {
        if y_norm.is_finite() && 0.0 < y_norm {
            Ok(y_norm)
        } else {
            Err(MixError::InvalidNormalization(y_norm))
        }
    }

    /// Get the integration weights.
    #[inline]
    pub fn weights(&self) -> &[[Float; 3]; BUCKETS] {
        &self.data
    }

    /// Get the luminance normalization factor.
    #[inline]
    pub fn y_norm(&self) -> Float {
        self.y_norm
    }

    /// Integrate the reflectance spectrum into normalized XYZ tristimulus
    /// values.
    ///
    /// This method weighs each bucket's reflectance with this illuminated
    /// observer's weights, integrates the products with the trapezoidal rule,
    /// and divides by the luminance normalization factor.
    pub fn tristimulus(&self, reflectance: &SpectralCurve) -> [Float; 3] {
        let products: [[Float; 3]; BUCKETS] = std::array::from_fn(|index| {
            let r = reflectance[index];
            let [x, y, z] = self.data[index];
            [r * x, r * y, r * z]
        });

        let [x, y, z] = trapezoid3(&products, STEP);
        [x / self.y_norm, y / self.y_norm, z / self.y_norm]
    }

    /// Determine the white point, i.e., the tristimulus values of a perfectly
    /// reflecting surface.
    pub fn white_point(&self) -> [Float; 3] {
        self.tristimulus(&SpectralCurve::constant(1.0))
    }
}

impl SpectralDistribution for IlluminatedObserver {
    type Value = [Float; 3];

    fn label(&self) -> String {
        self.label.clone()
    }

    fn get(&self, index: usize) -> Option<Self::Value> {
        self.data.get(index).copied()
    }
}

// --------------------------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::{
        index_of, wavelength_of, wavelengths, IlluminatedObserver, Illuminant, Observer,
        SpectralCurve, SpectralDistribution, BUCKETS, MAX_NM, MIN_NM,
    };
    use crate::error::MixError;
    use crate::{Float, TEST_EPSILON};

    #[test]
    fn test_bucket_count() {
        assert_eq!(BUCKETS, 38);
        assert_eq!(wavelengths().count(), BUCKETS);
        assert_eq!(wavelengths().next(), Some(MIN_NM));
        assert_eq!(wavelengths().last(), Some(MAX_NM));
    }

    #[test]
    fn test_wavelength_index() {
        assert_eq!(wavelength_of(0), Some(380));
        assert_eq!(wavelength_of(37), Some(750));
        assert_eq!(wavelength_of(38), None);

        assert_eq!(index_of(380), Some(0));
        assert_eq!(index_of(550), Some(17));
        assert_eq!(index_of(750), Some(37));
        assert_eq!(index_of(370), None);
        assert_eq!(index_of(555), None);
        assert_eq!(index_of(760), None);

        for wavelength in wavelengths() {
            assert_eq!(index_of(wavelength).and_then(wavelength_of), Some(wavelength));
        }
    }

    #[test]
    fn test_curve_length() {
        for len in [0, 1, 37, 39, 76] {
            let samples = vec![0.5; len];
            let result = SpectralCurve::new("test curve", &samples);
            assert!(matches!(
                result,
                Err(MixError::BucketCount {
                    actual,
                    expected: 38,
                    ..
                }) if actual == len
            ));
        }

        let curve = SpectralCurve::new("test curve", &[0.5; BUCKETS]).unwrap();
        assert_eq!(curve, SpectralCurve::constant(0.5));
        assert_eq!(curve.at(550), Some(0.5));
        assert_eq!(curve.at(551), None);
    }

    #[test]
    fn test_curve_json() {
        let curve: SpectralCurve = serde_json::from_str(&format!(
            "[{}]",
            vec!["0.25"; BUCKETS].join(", ")
        ))
        .unwrap();
        assert_eq!(curve, SpectralCurve::constant(0.25));

        let result: Result<SpectralCurve, _> = serde_json::from_str("[1.0, 2.0, 3.0]");
        let message = result.unwrap_err().to_string();
        assert!(message.contains("3 != 38"), "unexpected message: {}", message);
    }

    #[test]
    fn test_curve_statistics() {
        let curve = SpectralCurve::from_array(std::array::from_fn(|index| index as Float));
        assert_eq!(curve.minimum(), 0.0);
        assert_eq!(curve.maximum(), 37.0);
        assert!(curve.is_finite());
        assert!(!curve.map(|s| s / 0.0).is_finite());
    }

    #[test]
    fn test_mismatched_tables() {
        let result = Illuminant::new("short illuminant", &[100.0; 37]);
        assert!(matches!(result, Err(MixError::BucketCount { .. })));

        let good = [1.0; BUCKETS];
        let result = Observer::new("lopsided", &good, &[1.0; 39], &good);
        let Err(MixError::BucketCount { label, actual, .. }) = result else {
            panic!("observer with 39 y samples should not be valid");
        };
        assert_eq!(label, "lopsided Y");
        assert_eq!(actual, 39);
    }

    #[test]
    fn test_y_norm() {
        let observer = IlluminatedObserver::reference().unwrap();
        assert_relative_eq!(observer.y_norm(), 11619.34742175, max_relative = TEST_EPSILON);
        assert_eq!(observer.len(), BUCKETS);
        assert_eq!(observer.label(), "CIE D65 / CIE 1931 2º observer");

        let [_, y, _] = observer.white_point();
        assert_abs_diff_eq!(y, 1.0, epsilon = TEST_EPSILON);

        let observer = observer.with_y_norm(2.0 * 11619.34742175).unwrap();
        let [_, y, _] = observer.white_point();
        assert_abs_diff_eq!(y, 0.5, epsilon = TEST_EPSILON);
    }

    #[test]
    fn test_invalid_y_norm() {
        let dark = Illuminant::new("darkness", &[0.0; BUCKETS]).unwrap();
        let result = IlluminatedObserver::new(&dark, &crate::cie::CIE_OBSERVER_2DEG_1931);
        assert!(matches!(result, Err(MixError::InvalidNormalization(_))));

        let observer = IlluminatedObserver::reference().unwrap();
        for y_norm in [0.0, -1.0, Float::NAN, Float::INFINITY] {
            assert!(observer.clone().with_y_norm(y_norm).is_err());
        }
    }
}
