//! Combining pigments by concentration.
//!
//! The absorption and scattering of a mixture are the weighted sums of its
//! pigments' absorption and scattering, computed for every wavelength bucket
//! independently:
//!
//! ```text
//! K_mix[i] = Σ_p weight[p] · K[p][i]
//! S_mix[i] = Σ_p weight[p] · S[p][i]
//! ```
//!
//! Weights are not normalized. Since the Kubelka-Munk model only depends on
//! the ratio `K/S`, scaling all weights by the same positive factor leaves the
//! final color unchanged.

use crate::error::{MixError, Result};
use crate::pigment::Pigment;
use crate::reflectance::is_degenerate;
use crate::spectrum::{SpectralCurve, BUCKETS};
use crate::Float;

/// The combined absorption and scattering curves of a pigment mixture.
#[derive(Clone, Debug, PartialEq)]
pub struct Mixture {
    k: SpectralCurve,
    s: SpectralCurve,
}

impl Mixture {
    /// Create a new mixture from its absorption and scattering curves.
    pub fn new(k: SpectralCurve, s: SpectralCurve) -> Self {
        Self { k, s }
    }

    /// Get the mixture's absorption curve.
    #[inline]
    pub fn k(&self) -> &SpectralCurve {
        &self.k
    }

    /// Get the mixture's scattering curve.
    #[inline]
    pub fn s(&self) -> &SpectralCurve {
        &self.s
    }

    /// Count the buckets outside the Kubelka-Munk formula's domain.
    pub fn degenerate_buckets(&self) -> usize {
        self.k
            .iter()
            .zip(self.s.iter())
            .filter(|&(&k, &s)| is_degenerate(k, s))
            .count()
    }
}

/// Mix the pigments with the given weights.
///
/// The two slices must have the same length, with each weight applying to
/// the pigment at the same position. For every bucket, the weighted sums
/// accumulate in pigment order.
pub fn mix(pigments: &[Pigment], weights: &[Float]) -> Result<Mixture> {
    if pigments.len() != weights.len() {
        return Err(MixError::WeightCount {
            actual: weights.len(),
            expected: pigments.len(),
        });
    }

    let mut k = [0.0; BUCKETS];
    let mut s = [0.0; BUCKETS];

    for index in 0..BUCKETS {
        for (pigment, &weight) in pigments.iter().zip(weights) {
            k[index] += weight * pigment.k()[index];
            s[index] += weight * pigment.s()[index];
        }
    }

    Ok(Mixture::new(
        SpectralCurve::from_array(k),
        SpectralCurve::from_array(s),
    ))
}
