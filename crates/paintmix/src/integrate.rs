//! Numerical integration over evenly spaced samples.
//!
//! Both functions implement the trapezoidal rule
//! `step/2 · Σ (f[i] + f[i+1])`. They accumulate the pairwise sums in
//! ascending index order and scale by `step/2` exactly once at the end. That
//! operation order is part of the contract: it keeps results bit-for-bit
//! reproducible across implementations that follow the same order, e.g., the
//! per-pixel shaders this model is often evaluated in.

use crate::Float;

/// Integrate scalar samples with the trapezoidal rule.
///
/// Fewer than two samples span no interval and integrate to zero.
pub fn trapezoid(samples: &[Float], step: Float) -> Float {
    let mut sum = 0.0;
    for pair in samples.windows(2) {
        sum += pair[0] + pair[1];
    }
    sum * (step / 2.0)
}

/// Integrate triples with the trapezoidal rule, component by component.
///
/// Fewer than two samples span no interval and integrate to zero.
pub fn trapezoid3(samples: &[[Float; 3]], step: Float) -> [Float; 3] {
    let mut sum = [0.0; 3];
    for pair in samples.windows(2) {
        let ([a1, a2, a3], [b1, b2, b3]) = (pair[0], pair[1]);
        sum[0] += a1 + b1;
        sum[1] += a2 + b2;
        sum[2] += a3 + b3;
    }

    let scale = step / 2.0;
    [sum[0] * scale, sum[1] * scale, sum[2] * scale]
}
