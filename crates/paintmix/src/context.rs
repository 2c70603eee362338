//! Evaluating mixtures.
//!
//! A [`MixingContext`] owns everything that stays fixed across evaluations:
//! the palette, the illuminated observer with its luminance normalization
//! factor, and the [`MixOptions`]. It is built once, validated once, and
//! never changes afterwards. Evaluation only reads from the context, so a
//! shared reference suffices for evaluating samples on as many threads as
//! desired.

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::conversion::{gamma_encode, xyz_to_linear_rgb, Rgb};
use crate::error::Result;
use crate::mixer::{mix, Mixture};
use crate::options::MixOptions;
use crate::pigment::{Palette, Pigment};
use crate::reflectance::reflectance_spectrum;
use crate::spectrum::{IlluminatedObserver, SpectralCurve, SpectralDistribution};
use crate::Float;

/// The intermediate and final results of evaluating one mixture.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// The mixture's absorption and scattering.
    pub mixture: Mixture,
    /// The reflectance spectrum or `None` if the mixture resolved to black.
    pub reflectance: Option<SpectralCurve>,
    /// The normalized tristimulus values.
    pub xyz: [Float; 3],
    /// The linear RGB values before gamut policy and gamma encoding.
    pub linear_rgb: [Float; 3],
    /// The gamma-encoded color.
    pub rgb: Rgb,
}

/// Evaluate a mixture without a context.
///
/// This function validates the options on every call. Prefer a
/// [`MixingContext`] when evaluating more than a handful of samples.
pub fn evaluate(
    pigments: &[Pigment],
    weights: &[Float],
    observer: &IlluminatedObserver,
    options: &MixOptions,
) -> Result<Rgb> {
    options.validate()?;
    Ok(evaluate_detailed(pigments, weights, observer, options)?.rgb)
}

fn evaluate_detailed(
    pigments: &[Pigment],
    weights: &[Float],
    observer: &IlluminatedObserver,
    options: &MixOptions,
) -> Result<Evaluation> {
    let mixture = mix(pigments, weights)?;

    let Some(reflectance) = reflectance_spectrum(&mixture, &options.surface, options.degeneracy)
    else {
        return Ok(Evaluation {
            mixture,
            reflectance: None,
            xyz: [0.0; 3],
            linear_rgb: [0.0; 3],
            rgb: Rgb::BLACK,
        });
    };

    let xyz = observer.tristimulus(&reflectance);
    let linear_rgb = xyz_to_linear_rgb(&xyz);
    let rgb = Rgb(gamma_encode(&linear_rgb, options.gamma, options.gamut));

    Ok(Evaluation {
        mixture,
        reflectance: Some(reflectance),
        xyz,
        linear_rgb,
        rgb,
    })
}

// --------------------------------------------------------------------------------------------------------------------

/// The immutable inputs for evaluating mixtures of a palette's pigments.
#[cfg_attr(feature = "pyffi", pyclass(frozen, module = "paintmix"))]
#[derive(Clone, Debug)]
pub struct MixingContext {
    palette: Palette,
    observer: IlluminatedObserver,
    options: MixOptions,
}

impl MixingContext {
    /// Create a new mixing context for CIE D65 and the CIE 1931 2º observer.
    pub fn new(palette: Palette, options: MixOptions) -> Result<Self> {
        Self::with_observer(palette, IlluminatedObserver::reference()?, options)
    }

    /// Create a new mixing context with the given illuminated observer.
    pub fn with_observer(
        palette: Palette,
        observer: IlluminatedObserver,
        options: MixOptions,
    ) -> Result<Self> {
        options.validate()?;

        log::debug!(
            "mixing [{}] under {} with y_norm={}",
            palette.names().collect::<Vec<_>>().join(", "),
            observer.label(),
            observer.y_norm()
        );

        Ok(Self {
            palette,
            observer,
            options,
        })
    }

    /// Create the reference mixing context with white, yellow, and blue
    /// pigments and default options.
    pub fn reference() -> Result<Self> {
        Self::new(Palette::reference(), MixOptions::default())
    }

    /// Get the palette.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Get the illuminated observer.
    #[inline]
    pub fn observer(&self) -> &IlluminatedObserver {
        &self.observer
    }

    /// Get the options.
    #[inline]
    pub fn options(&self) -> &MixOptions {
        &self.options
    }

    /// Evaluate the color of mixing this context's pigments with the given
    /// weights.
    ///
    /// This method fails only if the number of weights differs from the
    /// number of pigments. Degenerate mixtures resolve according to the
    /// context's [`DegeneracyPolicy`](crate::reflectance::DegeneracyPolicy).
    pub fn evaluate(&self, weights: &[Float]) -> Result<Rgb> {
        Ok(self.evaluate_detailed(weights)?.rgb)
    }

    /// Evaluate a mixture while retaining all intermediate results.
    pub fn evaluate_detailed(&self, weights: &[Float]) -> Result<Evaluation> {
        evaluate_detailed(
            self.palette.pigments(),
            weights,
            &self.observer,
            &self.options,
        )
    }
}

#[cfg(feature = "pyffi")]
#[pymethods]
impl MixingContext {
    /// Create a new mixing context from built-in pigments with default
    /// options. Without pigment names, the context uses white, yellow, and
    /// blue. <i class=python-only>Python only!</i>
    #[new]
    #[pyo3(signature = (pigments=None))]
    pub fn py_new(pigments: Option<Vec<String>>) -> Result<Self> {
        let palette = match pigments {
            Some(names) => Palette::select(&names)?,
            None => Palette::reference(),
        };
        Self::new(palette, MixOptions::default())
    }

    /// Get the names of this context's pigments. <i class=python-only>Python
    /// only!</i>
    #[getter(pigments)]
    pub fn py_pigments(&self) -> Vec<String> {
        self.palette.names().map(str::to_string).collect()
    }

    /// Evaluate the gamma-encoded RGB color of mixing this context's pigments
    /// with the given weights. <i class=python-only>Python only!</i>
    #[pyo3(name = "evaluate")]
    #[allow(clippy::needless_pass_by_value)]
    pub fn py_evaluate(&self, weights: Vec<Float>) -> Result<[Float; 3]> {
        Ok(self.evaluate(&weights)?.0)
    }

    /// Get a debug representation. <i class=python-only>Python only!</i>
    pub fn __repr__(&self) -> String {
        format!("MixingContext({})", self.py_pigments().join(", "))
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use super::{evaluate, MixingContext};
    use crate::conversion::GamutPolicy;
    use crate::error::MixError;
    use crate::options::MixOptions;
    use crate::pigment::{Palette, BLUE, WHITE, YELLOW};
    use crate::reflectance::DegeneracyPolicy;
    use crate::spectrum::IlluminatedObserver;
    use crate::{Float, TEST_EPSILON};

    fn context(names: &[&str]) -> MixingContext {
        MixingContext::new(Palette::select(names).unwrap(), MixOptions::default()).unwrap()
    }

    #[test]
    fn test_thread_safety() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MixingContext>();
    }

    #[test]
    fn test_white() {
        let context = context(&["white"]);
        let evaluation = context.evaluate_detailed(&[1.0]).unwrap();

        // Saunderson's correction reflects 1 - k1 for a perfect white.
        assert_abs_diff_eq!(evaluation.xyz[1], 1.0 - 0.0031, epsilon = TEST_EPSILON);

        let [r, g, b] = evaluation.rgb.0;
        assert_abs_diff_eq!(r, 1.0, epsilon = 1e-2);
        assert_abs_diff_eq!(g, 1.0, epsilon = 1e-2);
        assert_abs_diff_eq!(b, 1.0, epsilon = 1e-2);
        assert_eq!(evaluation.rgb.to_24bit(), [255, 255, 253]);

        // Weights are not normalized, yet white remains white.
        assert_eq!(context.evaluate(&[2.0]).unwrap(), evaluation.rgb);
    }

    #[test]
    fn test_yellow() {
        let context = context(&["yellow"]);
        let [r, g, b] = context.evaluate(&[1.0]).unwrap().0;
        assert!(r > 0.9 && g > 0.9 && b < 0.3, "yellow is rgb({} {} {})", r, g, b);

        assert_abs_diff_eq!(r, 1.03793, epsilon = 1e-4);
        assert_abs_diff_eq!(g, 0.96969, epsilon = 1e-4);
        assert_abs_diff_eq!(b, 0.19235, epsilon = 1e-4);

        // Repeated evaluation is bit-for-bit identical.
        assert_eq!(context.evaluate(&[1.0]).unwrap(), context.evaluate(&[1.0]).unwrap());
    }

    #[test]
    fn test_yellow_and_blue() {
        let context = context(&["yellow", "blue"]);
        let yellow = context.evaluate(&[1.0, 0.0]).unwrap().0;
        let blue = context.evaluate(&[0.0, 1.0]).unwrap().0;
        let mixed = context.evaluate(&[0.5, 0.5]).unwrap().0;

        assert_abs_diff_eq!(mixed[0], 0.46027, epsilon = 1e-4);
        assert_abs_diff_eq!(mixed[1], 0.45133, epsilon = 1e-4);
        assert_abs_diff_eq!(mixed[2], 0.44955, epsilon = 1e-4);

        // Subtractive mixing is much darker than averaging RGB.
        for c in 0..3 {
            let average = (yellow[c] + blue[c]) / 2.0;
            assert!(mixed[c] + 0.1 < average);
        }

        assert_ne!(mixed, yellow);
        assert_ne!(mixed, blue);
    }

    #[test]
    fn test_three_pigments() {
        let context = MixingContext::reference().unwrap();
        let [r, g, b] = context.evaluate(&[0.5, 0.25, 0.25]).unwrap().0;
        assert_abs_diff_eq!(r, 0.54556, epsilon = 1e-4);
        assert_abs_diff_eq!(g, 0.53638, epsilon = 1e-4);
        assert_abs_diff_eq!(b, 0.53397, epsilon = 1e-4);
    }

    #[test]
    fn test_scale_invariance() {
        let context = MixingContext::reference().unwrap();
        let weights: [Float; 3] = [0.2, 0.3, 0.7];
        let [r1, g1, b1] = context.evaluate(&weights).unwrap().0;
        let [r2, g2, b2] = context.evaluate(&weights.map(|w| 3.0 * w)).unwrap().0;

        assert_abs_diff_eq!(r1, r2, epsilon = TEST_EPSILON);
        assert_abs_diff_eq!(g1, g2, epsilon = TEST_EPSILON);
        assert_abs_diff_eq!(b1, b2, epsilon = TEST_EPSILON);
    }

    #[test]
    fn test_zero_weights() {
        let context = MixingContext::reference().unwrap();
        let evaluation = context.evaluate_detailed(&[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(evaluation.reflectance, None);
        assert_eq!(evaluation.rgb.0, [0.0; 3]);

        let options = MixOptions {
            degeneracy: DegeneracyPolicy::ZeroReflectance,
            ..MixOptions::default()
        };
        let context = MixingContext::new(Palette::reference(), options).unwrap();
        assert_eq!(context.evaluate(&[0.0, 0.0, 0.0]).unwrap().0, [0.0; 3]);

        let options = MixOptions {
            degeneracy: DegeneracyPolicy::Propagate,
            gamut: GamutPolicy::Propagate,
            ..MixOptions::default()
        };
        let context = MixingContext::new(Palette::reference(), options).unwrap();
        let rgb = context.evaluate(&[0.0, 0.0, 0.0]).unwrap();
        assert!(!rgb.is_finite());
        assert_eq!(rgb.to_24bit(), [0, 0, 0]);
    }

    #[test]
    fn test_negative_weights() {
        let context = MixingContext::reference().unwrap();
        let rgb = context.evaluate(&[1.0, -0.5, 0.0]).unwrap();
        assert_eq!(rgb.0, [0.0; 3]);
    }

    #[test]
    fn test_weight_count() {
        let context = MixingContext::reference().unwrap();
        assert!(matches!(
            context.evaluate(&[1.0, 0.0]),
            Err(MixError::WeightCount {
                actual: 2,
                expected: 3
            })
        ));
    }

    #[test]
    fn test_free_function() {
        let observer = IlluminatedObserver::reference().unwrap();
        let pigments = [WHITE.clone(), YELLOW.clone(), BLUE.clone()];
        let options = MixOptions::default();
        let context = MixingContext::reference().unwrap();

        let cases: [[Float; 3]; 3] = [[1.0, 0.0, 0.0], [0.3, 0.3, 0.4], [0.0, 0.9, 0.1]];
        for weights in cases {
            assert_eq!(
                evaluate(&pigments, &weights, &observer, &options).unwrap(),
                context.evaluate(&weights).unwrap()
            );
        }

        let options = MixOptions {
            gamma: -1.0,
            ..MixOptions::default()
        };
        assert!(matches!(
            evaluate(&pigments, &[1.0, 0.0, 0.0], &observer, &options),
            Err(MixError::InvalidGamma(_))
        ));
        assert!(MixingContext::new(Palette::reference(), options).is_err());
    }
}
