//! The Kubelka-Munk reflectance model with Saunderson's surface correction.
//!
//! For an opaque layer of paint with absorption `K` and scattering `S`, the
//! Kubelka-Munk model predicts the reflectance from the ratio `ks = K/S` as
//! `1 + ks − sqrt(ks² + 2·ks)`. That value describes the light scattered back
//! from inside the paint. Saunderson's correction then accounts for the light
//! reflected at the boundary between air and paint, both on the way in
//! ([`SurfaceConstants::k1`]) and on the way out ([`SurfaceConstants::k2`]).
//!
//! The formulas are undefined when `S ≤ 0` or `K/S < 0`, which happens for
//! zero or negative mixing weights. [`DegeneracyPolicy`] determines what
//! happens to such buckets.

use serde::{Deserialize, Serialize};

use crate::error::{MixError, Result};
use crate::mixer::Mixture;
use crate::spectrum::{SpectralCurve, BUCKETS};
use crate::Float;

/// Compute the Kubelka-Munk reflectance of an opaque layer.
///
/// For non-negative `ks`, the result lies in `0..=1`, with `ks = 0` yielding
/// a perfect reflector. This function evaluates `1 + ks − sqrt(ks² + 2·ks)`
/// as its reciprocal form `1 / (1 + ks + sqrt(ks² + 2·ks))`, which has no
/// cancellation for large ratios and tends to zero once `ks²` overflows.
#[inline]
pub fn km_reflectance(ks: Float) -> Float {
    1.0 / (1.0 + ks + (ks * ks + 2.0 * ks).sqrt())
}

/// Determine whether a bucket's absorption and scattering fall outside the
/// domain of the Kubelka-Munk formula.
#[inline]
pub fn is_degenerate(k: Float, s: Float) -> bool {
    !(s > 0.0 && k / s >= 0.0 && (k / s).is_finite())
}

// --------------------------------------------------------------------------------------------------------------------

/// Saunderson's surface reflection constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConstants {
    /// The fraction of incident light reflected specularly at the surface.
    pub k1: Float,
    /// The fraction of light inside the paint reflected back internally at
    /// the surface.
    pub k2: Float,
}

impl SurfaceConstants {
    /// The default surface constants, with 0.31% specular reflection at the
    /// surface and 65% internal reflection.
    pub const REFERENCE: Self = Self {
        k1: 0.0031,
        k2: 0.650,
    };

    /// No surface reflection, which reduces Saunderson's correction to the
    /// identity.
    pub const NONE: Self = Self { k1: 0.0, k2: 0.0 };

    /// Create new surface constants.
    ///
    /// Both constants are fractions of light and must lie in `0..1`.
    pub fn new(k1: Float, k2: Float) -> Result<Self> {
        let constants = Self { k1, k2 };
        constants.validate()?;
        Ok(constants)
    }

    /// Check that both constants lie in `0..1`.
    pub fn validate(&self) -> Result<()> {
        if (0.0..1.0).contains(&self.k1) && (0.0..1.0).contains(&self.k2) {
            Ok(())
        } else {
            Err(MixError::InvalidSurfaceConstants {
                k1: self.k1,
                k2: self.k2,
            })
        }
    }

    /// Apply Saunderson's correction to a Kubelka-Munk reflectance.
    #[inline]
    pub fn correct(&self, r: Float) -> Float {
        ((1.0 - self.k1) * (1.0 - self.k2) * r) / (1.0 - self.k2 * r)
    }

    /// Compute the corrected reflectance for the given absorption and
    /// scattering.
    ///
    /// This method does not check for degenerate inputs. See
    /// [`reflectance_spectrum`] for policy-aware evaluation.
    #[inline]
    pub fn reflectance(&self, k: Float, s: Float) -> Float {
        self.correct(km_reflectance(k / s))
    }
}

impl Default for SurfaceConstants {
    fn default() -> Self {
        Self::REFERENCE
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// The treatment of buckets outside the Kubelka-Munk formula's domain.
///
/// A bucket is degenerate if its combined scattering is not positive or its
/// absorption to scattering ratio is negative or not finite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DegeneracyPolicy {
    /// Resolve the entire sample to black.
    #[default]
    Black,
    /// Treat degenerate buckets as absorbing all light.
    ZeroReflectance,
    /// Evaluate the formulas anyway and let IEEE 754 not-a-numbers and
    /// infinities propagate, which is useful for diagnostics.
    Propagate,
}

/// Compute the reflectance spectrum of a mixture.
///
/// This function applies the Kubelka-Munk formula and Saunderson's correction
/// to each bucket independently. If any bucket is degenerate and the policy
/// is [`DegeneracyPolicy::Black`], it returns `None`.
pub fn reflectance_spectrum(
    mixture: &Mixture,
    surface: &SurfaceConstants,
    policy: DegeneracyPolicy,
) -> Option<SpectralCurve> {
    let (k, s) = (mixture.k(), mixture.s());
    let mut samples = [0.0; BUCKETS];

    for (index, sample) in samples.iter_mut().enumerate() {
        let (k, s) = (k[index], s[index]);

        *sample = if policy == DegeneracyPolicy::Propagate || !is_degenerate(k, s) {
            surface.reflectance(k, s)
        } else {
            log::trace!("degenerate bucket {}: K={}, S={}", index, k, s);
            if policy == DegeneracyPolicy::Black {
                return None;
            }
            0.0
        };
    }

    Some(SpectralCurve::from_array(samples))
}
