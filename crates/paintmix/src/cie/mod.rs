//! The CIE's standard illuminant D65 and 1931 2º observer at 10nm resolution.

mod d_series;
mod two_deg;

pub use d_series::CIE_ILLUMINANT_D65;
pub use two_deg::CIE_OBSERVER_2DEG_1931;
