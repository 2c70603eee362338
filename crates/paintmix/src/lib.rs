//! # Paint 🎨 Mix
//!
//! Paintmix predicts the color of mixed paints. Instead of averaging RGB
//! values, which is how light mixes, it models pigments the way they actually
//! interact with light: every pigment absorbs and scatters each wavelength by
//! some amount, a mixture absorbs and scatters by the concentration-weighted
//! sum of its ingredients, and the resulting reflectance spectrum is what the
//! eye perceives under a given light.
#![cfg_attr(
    not(feature = "pyffi"),
    doc = " This version of the API documentation **covers native Rust interfaces
only**. Enable the `pyffi` feature for the Python integration."
)]
#![cfg_attr(
    feature = "pyffi",
    doc = " This version of the API documentation **covers both Rust and Python
interfaces**."
)]
//!
//!
//! ## 1. Overview
//!
//! A single evaluation runs through five stages, each in its own module:
//!
//!   * [`cie`] and [`pigment`] hold the **spectral constants**: the CIE D65
//!     illuminant, the CIE 1931 2º observer, and the absorption (K) and
//!     scattering (S) curves of the built-in [`WHITE`](pigment::WHITE),
//!     [`YELLOW`](pigment::YELLOW), and [`BLUE`](pigment::BLUE) pigments. All
//!     curves are sampled from 380nm to 750nm in 10nm steps, i.e., they have
//!     [`BUCKETS`](spectrum::BUCKETS) samples.
//!   * [`mixer`] combines the K and S curves of a [`Palette`] with a vector of
//!     weights into a [`Mixture`](mixer::Mixture).
//!   * [`reflectance`] turns a mixture into a reflectance spectrum with the
//!     Kubelka-Munk formula and Saunderson's surface correction.
//!   * [`integrate`] and [`IlluminatedObserver`] integrate that spectrum into
//!     XYZ tristimulus values with the trapezoidal rule.
//!   * [`conversion`] maps XYZ to linear RGB and gamma-encodes the result as
//!     an [`Rgb`].
//!
//! [`MixingContext`] bundles the read-only inputs of all stages, computed
//! once, and exposes [`MixingContext::evaluate`]. Since evaluation takes
//! `&self` and the context is `Send + Sync`, any number of threads can
//! evaluate samples concurrently. [`render::MixingPlane`] does just that for a
//! two-dimensional plane of mixing ratios.
//!
//!
//! ## 2. Mixing Paints
//!
//! ```
//! # use paintmix::{MixingContext, MixOptions, Palette};
//! # use paintmix::pigment::{BLUE, YELLOW};
//! # fn main() -> paintmix::Result<()> {
//! let palette = Palette::new(vec![YELLOW.clone(), BLUE.clone()])?;
//! let context = MixingContext::new(palette, MixOptions::default())?;
//!
//! let green = context.evaluate(&[0.5, 0.5])?;
//! let yellow = context.evaluate(&[1.0, 0.0])?;
//! assert_ne!(green.to_24bit(), yellow.to_24bit());
//! # Ok(())
//! # }
//! ```
//!
//! A weight vector whose length differs from the palette's is an error,
//! since it indicates a bug in the caller. By contrast, weights that produce
//! physically meaningless mixtures, e.g., all zero weights, resolve according
//! to the [`DegeneracyPolicy`](reflectance::DegeneracyPolicy) configured in
//! [`MixOptions`], which defaults to black.
//!
//!
//! ## 3. Optional Features
//!
//! Paintmix supports three feature flags:
//!
//!   - **`f64`** selects the eponymous type as floating point type [`Float`]
//!     instead of `f32`. This feature is enabled by default. Without it,
//!     results match single-precision shader implementations more closely.
//!   - **`cli`** builds the `paintmix` command line tool and the [`logging`]
//!     module. This feature is enabled by default.
//!   - **`pyffi`** controls paintmix's Python integration through
//!     [PyO3](https://pyo3.rs/). This feature is disabled by default.

/// The floating point type in use.
#[cfg(feature = "f64")]
pub type Float = f64;
/// The floating point type in use.
#[cfg(not(feature = "f64"))]
pub type Float = f32;

/// The tolerance for comparing floating point results in tests.
#[cfg(all(test, feature = "f64"))]
pub(crate) const TEST_EPSILON: Float = 1e-9;
/// The tolerance for comparing floating point results in tests.
#[cfg(all(test, not(feature = "f64")))]
pub(crate) const TEST_EPSILON: Float = 1e-4;

pub mod cie;
pub mod context;
pub mod conversion;
pub mod error;
pub mod integrate;
#[cfg(feature = "cli")]
pub mod logging;
pub mod mixer;
pub mod options;
pub mod pigment;
pub mod reflectance;
pub mod render;
pub mod spectrum;

pub use context::{evaluate, Evaluation, MixingContext};
pub use conversion::Rgb;
pub use error::{MixError, Result};
pub use options::MixOptions;
pub use pigment::{Palette, Pigment};
pub use spectrum::{IlluminatedObserver, SpectralCurve};

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

#[doc(hidden)]
#[cfg(feature = "pyffi")]
#[pymodule]
pub fn paintmix(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<MixingContext>()?;
    m.add_class::<Pigment>()?;
    m.add("BUCKETS", spectrum::BUCKETS)?;
    m.add("MIN_NM", spectrum::MIN_NM)?;
    m.add("MAX_NM", spectrum::MAX_NM)?;
    m.add("STEP_NM", spectrum::STEP_NM)?;
    Ok(())
}
