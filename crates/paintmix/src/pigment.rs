//! Pigments and palettes.
//!
//! A [`Pigment`] is a named pair of absorption (K) and scattering (S) curves.
//! Pigments never change after construction. They are either compiled in,
//! like [`WHITE`], [`YELLOW`], and [`BLUE`], or loaded from a JSON file with
//! [`Palette::from_json_file`]:
//!
//! ```json
//! [
//!     { "name": "white", "k": [0, 0, ...], "s": [1, 1, ...] }
//! ]
//! ```
//!
//! A [`Palette`] is the ordered, non-empty set of pigments a mixing weight
//! vector refers to.

use std::borrow::Cow;
use std::path::Path;

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{MixError, Result};
use crate::mixer::{mix, Mixture};
use crate::spectrum::{SpectralCurve, BUCKETS};
use crate::Float;

/// A subtractive colorant described by its absorption and scattering.
#[cfg_attr(feature = "pyffi", pyclass(frozen, module = "paintmix"))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pigment {
    name: Cow<'static, str>,
    k: SpectralCurve,
    s: SpectralCurve,
}

impl Pigment {
    /// Create a new pigment from static tables.
    pub const fn from_tables(
        name: &'static str,
        k: [Float; BUCKETS],
        s: [Float; BUCKETS],
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            k: SpectralCurve::from_array(k),
            s: SpectralCurve::from_array(s),
        }
    }

    /// Create a new pigment, validating the number of samples in both curves.
    pub fn new(name: impl Into<String>, k: &[Float], s: &[Float]) -> Result<Self> {
        let name = name.into();
        let k = SpectralCurve::new(&format!("{} K", name), k)?;
        let s = SpectralCurve::new(&format!("{} S", name), s)?;
        Ok(Self {
            name: Cow::Owned(name),
            k,
            s,
        })
    }

    /// Get the pigment's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the pigment's absorption curve.
    #[inline]
    pub fn k(&self) -> &SpectralCurve {
        &self.k
    }

    /// Get the pigment's scattering curve.
    #[inline]
    pub fn s(&self) -> &SpectralCurve {
        &self.s
    }
}

#[cfg(feature = "pyffi")]
#[pymethods]
impl Pigment {
    /// Get the pigment's name. <i class=python-only>Python only!</i>
    #[getter(name)]
    pub fn py_name(&self) -> String {
        self.name.to_string()
    }

    /// Get the pigment's absorption curve. <i class=python-only>Python
    /// only!</i>
    #[getter(k)]
    pub fn py_k(&self) -> Vec<Float> {
        self.k.clone().into()
    }

    /// Get the pigment's scattering curve. <i class=python-only>Python
    /// only!</i>
    #[getter(s)]
    pub fn py_s(&self) -> Vec<Float> {
        self.s.clone().into()
    }

    /// Get a debug representation. <i class=python-only>Python only!</i>
    pub fn __repr__(&self) -> String {
        format!("Pigment({})", self.name)
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A perfectly white pigment that scatters without absorbing.
#[rustfmt::skip]
pub static WHITE: Pigment = Pigment::from_tables(
    "white",
    [
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ],
    [1.0; BUCKETS],
);

/// An idealized yellow pigment absorbing from 380nm to 490nm.
#[rustfmt::skip]
pub static YELLOW: Pigment = Pigment::from_tables(
    "yellow",
    [
        1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ],
    [1.0; BUCKETS],
);

/// An idealized blue pigment absorbing from 490nm to 750nm.
#[rustfmt::skip]
pub static BLUE: Pigment = Pigment::from_tables(
    "blue",
    [
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0,
        1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
        1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    ],
    [1.0; BUCKETS],
);

/// Look up a built-in pigment by name.
pub fn builtin(name: &str) -> Option<&'static Pigment> {
    [&WHITE, &YELLOW, &BLUE]
        .into_iter()
        .find(|pigment| pigment.name().eq_ignore_ascii_case(name))
}

// --------------------------------------------------------------------------------------------------------------------

/// An ordered, non-empty collection of uniquely named pigments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Pigment>", into = "Vec<Pigment>")]
pub struct Palette {
    pigments: Vec<Pigment>,
}

impl Palette {
    /// Create a new palette.
    ///
    /// This function fails if there are no pigments or if two pigments share
    /// the same name.
    pub fn new(pigments: Vec<Pigment>) -> Result<Self> {
        if pigments.is_empty() {
            return Err(MixError::EmptyPalette);
        }

        for (index, pigment) in pigments.iter().enumerate() {
            if pigments[..index].iter().any(|p| p.name == pigment.name) {
                return Err(MixError::DuplicatePigment(pigment.name().to_string()));
            }
        }

        Ok(Self { pigments })
    }

    /// Create the palette of built-in pigments, white, yellow, and blue, in
    /// that order.
    pub fn reference() -> Self {
        Self {
            pigments: vec![WHITE.clone(), YELLOW.clone(), BLUE.clone()],
        }
    }

    /// Create a palette from built-in pigments by name.
    pub fn select<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let pigments = names
            .iter()
            .map(|name| {
                builtin(name.as_ref())
                    .cloned()
                    .ok_or_else(|| MixError::UnknownPigment(name.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(pigments)
    }

    /// Parse a palette from a JSON array of pigments.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a palette from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let palette = Self::from_json_str(&content)?;
        log::debug!(
            "loaded {} pigments from {}",
            palette.len(),
            path.display()
        );
        Ok(palette)
    }

    /// Save this palette to a JSON file.
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Get the number of pigments.
    #[inline]
    pub fn len(&self) -> usize {
        self.pigments.len()
    }

    /// Determine whether this palette is empty, which it never is.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pigments.is_empty()
    }

    /// Get the pigments in order.
    #[inline]
    pub fn pigments(&self) -> &[Pigment] {
        &self.pigments
    }

    /// Look up a pigment by name.
    pub fn get(&self, name: &str) -> Option<&Pigment> {
        self.pigments.iter().find(|p| p.name() == name)
    }

    /// Iterate over the pigments' names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pigments.iter().map(Pigment::name)
    }

    /// Mix this palette's pigments with the given weights, one per pigment.
    pub fn mix(&self, weights: &[Float]) -> Result<Mixture> {
        mix(&self.pigments, weights)
    }
}

impl TryFrom<Vec<Pigment>> for Palette {
    type Error = MixError;

    fn try_from(value: Vec<Pigment>) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Palette> for Vec<Pigment> {
    fn from(value: Palette) -> Self {
        value.pigments
    }
}
