//! Conversion from XYZ tristimulus values to gamma-encoded RGB.
//!
//! The conversion first applies the linear XYZ to sRGB matrix for the D65
//! white point and then encodes each channel with a simple power-law gamma.
//! It deliberately uses a pure power law instead of sRGB's piecewise transfer
//! function and evaluates the matrix product with plain multiplications and
//! additions in row order. Both choices keep results reproducible against
//! per-pixel implementations of the same model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Float;

/// The matrix converting XYZ tristimulus values to linear sRGB.
#[rustfmt::skip]
pub const XYZ_TO_LINEAR_RGB: [[Float; 3]; 3] = [
    [ 3.2404542, -1.5371385, -0.4985314],
    [-0.9692660,  1.8760108,  0.0415560],
    [ 0.0556434, -0.2040259,  1.0572252],
];

/// Convert XYZ tristimulus values to linear RGB.
#[inline]
pub fn xyz_to_linear_rgb(xyz: &[Float; 3]) -> [Float; 3] {
    let [x, y, z] = *xyz;
    let [row1, row2, row3] = &XYZ_TO_LINEAR_RGB;

    [
        row1[0] * x + row1[1] * y + row1[2] * z,
        row2[0] * x + row2[1] * y + row2[2] * z,
        row3[0] * x + row3[1] * y + row3[2] * z,
    ]
}

// --------------------------------------------------------------------------------------------------------------------

/// The treatment of linear RGB values outside the unit cube before gamma
/// encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GamutPolicy {
    /// Clamp negative values to zero but leave values above one untouched.
    /// Not-a-numbers also become zero.
    #[default]
    Clamp,
    /// Clamp values to `0..=1`. Not-a-numbers become zero.
    ClampUnit,
    /// Encode values as is. Negative values turn into not-a-numbers.
    Propagate,
}

impl GamutPolicy {
    /// Apply this policy to a single linear channel.
    #[inline]
    pub fn apply(&self, value: Float) -> Float {
        match self {
            Self::Clamp => value.max(0.0),
            Self::ClampUnit => value.max(0.0).min(1.0),
            Self::Propagate => value,
        }
    }
}

/// Gamma-encode linear RGB with the given policy.
///
/// Each channel becomes `c^(1/gamma)` after the policy has been applied.
pub fn gamma_encode(linear: &[Float; 3], gamma: Float, policy: GamutPolicy) -> [Float; 3] {
    let exponent = 1.0 / gamma;
    linear.map(|c| policy.apply(c).powf(exponent))
}

// --------------------------------------------------------------------------------------------------------------------

/// A gamma-encoded RGB color.
///
/// Channels nominally range `0..=1`. Depending on the [`GamutPolicy`], they
/// may exceed one or, for diagnostic policies, not be finite at all.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub [Float; 3]);

impl Rgb {
    /// The color black.
    pub const BLACK: Self = Self([0.0; 3]);

    /// Create a new RGB color.
    pub const fn new(r: Float, g: Float, b: Float) -> Self {
        Self([r, g, b])
    }

    /// Determine whether all channels are finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Convert to 24-bit representation.
    ///
    /// This method clamps channels to `0..=1` before scaling and rounding.
    /// Not-a-numbers become zero.
    pub fn to_24bit(&self) -> [u8; 3] {
        self.0.map(|c| {
            let c = if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) };
            (c * 255.0).round() as u8
        })
    }

    /// Format as a hashed hexadecimal string, e.g., `#ffa500`.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_24bit();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl AsRef<[Float; 3]> for Rgb {
    fn as_ref(&self) -> &[Float; 3] {
        &self.0
    }
}

impl From<[Float; 3]> for Rgb {
    fn from(value: [Float; 3]) -> Self {
        Self(value)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        if let Some(precision) = f.precision() {
            write!(f, "rgb({:.*} {:.*} {:.*})", precision, r, precision, g, precision, b)
        } else {
            write!(f, "rgb({} {} {})", r, g, b)
        }
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use super::{gamma_encode, xyz_to_linear_rgb, GamutPolicy, Rgb};
    use crate::{Float, TEST_EPSILON};

    #[test]
    fn test_matrix() {
        assert_eq!(xyz_to_linear_rgb(&[0.0; 3]), [0.0; 3]);

        let [r, g, b] = xyz_to_linear_rgb(&[0.95047, 1.0, 1.08883]);
        assert_abs_diff_eq!(r, 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(g, 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(b, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_gamma() {
        let [r, g, b] = gamma_encode(&[0.0, 1.0, 0.5], 2.2, GamutPolicy::Clamp);
        assert_eq!(r, 0.0);
        assert_eq!(g, 1.0);
        assert_abs_diff_eq!(b, (0.5 as Float).powf(1.0 / 2.2), epsilon = TEST_EPSILON);

        assert_eq!(gamma_encode(&[0.25; 3], 1.0, GamutPolicy::Propagate), [0.25; 3]);
    }

    #[test]
    fn test_gamut_policies() {
        let linear = [-0.1, 1.2, Float::NAN];

        let [r, g, b] = gamma_encode(&linear, 2.2, GamutPolicy::Clamp);
        assert_eq!(r, 0.0);
        assert!(g > 1.0);
        assert_eq!(b, 0.0);

        assert_eq!(gamma_encode(&linear, 2.2, GamutPolicy::ClampUnit), [0.0, 1.0, 0.0]);

        let [r, g, b] = gamma_encode(&linear, 2.2, GamutPolicy::Propagate);
        assert!(r.is_nan());
        assert!(g > 1.0);
        assert!(b.is_nan());
    }

    #[test]
    fn test_xyz_to_rgb() {
        let linear = xyz_to_linear_rgb(&[0.16802, 0.17526, 0.18788]);
        let [r, g, b] = gamma_encode(&linear, 2.2, GamutPolicy::Clamp);
        assert_abs_diff_eq!(r, 0.46027, epsilon = 1e-4);
        assert_abs_diff_eq!(g, 0.45133, epsilon = 1e-4);
        assert_abs_diff_eq!(b, 0.44955, epsilon = 1e-4);
    }

    #[test]
    fn test_24bit() {
        assert_eq!(Rgb::BLACK.to_24bit(), [0, 0, 0]);
        assert_eq!(Rgb::new(1.0, 0.5, 0.0).to_24bit(), [255, 128, 0]);
        assert_eq!(Rgb::new(1.04, -0.2, Float::NAN).to_24bit(), [255, 0, 0]);
        assert_eq!(Rgb::new(1.0, 0.5, 0.0).to_hex(), "#ff8000");
        assert!(!Rgb::new(Float::NAN, 0.0, 0.0).is_finite());
        assert_eq!(format!("{:.2}", Rgb::new(1.0, 0.5, 0.0)), "rgb(1.00 0.50 0.00)");
    }
}
