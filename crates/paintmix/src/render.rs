//! Rendering a plane of mixtures.
//!
//! A [`MixingPlane`] maps every pixel of a `width`×`height` raster to the
//! weights of a three-pigment palette, usually white, yellow, and blue. With
//! normalized coordinates `u` running left to right and `v` running bottom to
//! top, each pixel mixes `v` parts of the first pigment, `u` parts of the
//! second, and `1 - u` parts of the third. Pixels are sampled at their
//! centers.
//!
//! Rendering evaluates all pixels in parallel with rayon. Since every pixel
//! is an independent evaluation against the same read-only
//! [`MixingContext`], the result does not depend on the number of threads.

use rayon::prelude::*;

use crate::context::MixingContext;
use crate::conversion::Rgb;
use crate::error::{MixError, Result};
use crate::Float;

/// A raster of mixing weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MixingPlane {
    width: u32,
    height: u32,
}

impl MixingPlane {
    /// Create a new mixing plane. Both dimensions must be positive.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MixError::EmptyPlane { width, height });
        }
        Ok(Self { width, height })
    }

    /// Get the width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of pixels.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Determine whether this plane has no pixels, which it never has.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the mixing weights for the pixel at the given column and row, with
    /// row 0 at the top.
    pub fn weights_at(&self, x: u32, y: u32) -> [Float; 3] {
        let u = (x as Float + 0.5) / self.width as Float;
        let v = 1.0 - (y as Float + 0.5) / self.height as Float;
        [v, u, 1.0 - u]
    }

    /// Render the plane in row-major order, starting with the top row.
    ///
    /// This method fails if the context's palette does not have exactly
    /// three pigments.
    pub fn render(&self, context: &MixingContext) -> Result<Vec<Rgb>> {
        log::debug!("rendering {}x{} mixing plane", self.width, self.height);

        (0..self.height)
            .into_par_iter()
            .flat_map(|y| (0..self.width).into_par_iter().map(move |x| (x, y)))
            .map(|(x, y)| context.evaluate(&self.weights_at(x, y)))
            .collect()
    }

    /// Render the plane as packed 24-bit RGB, three bytes per pixel.
    pub fn render_24bit(&self, context: &MixingContext) -> Result<Vec<u8>> {
        Ok(self
            .render(context)?
            .into_iter()
            .flat_map(|rgb| rgb.to_24bit())
            .collect())
    }
}
