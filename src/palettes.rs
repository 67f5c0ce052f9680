//! Distance palettes of the road information panel.
//!
//! Distances are in meters.  Everything below the legal minimal
//! passing distance (1.5 m in urban areas, 2 m in rural ones) is red,
//! darker for closer passes; above, the color goes from yellow to
//! green.

use lazy_static::lazy_static;
use crate::ramp::{Ramp, ResampledRamp, DEFAULT_SAMPLES};
pub(crate) mod ty;
use ty::rgba8;

/// Color of absent measurements in the distance palettes.
pub const INVALID: [u8; 4] = [0, 0, 196, 255];

/// Control points of the urban palette.
pub const URBAN_POINTS: [(f64, [u8; 4]); 5] = [
    (0.0, [64, 0, 0, 255]),
    (1.4999, [196, 0, 0, 255]),
    (1.5, [196, 196, 0, 255]),
    (2.0, [0, 196, 0, 255]),
    (2.55, [0, 255, 0, 255]),
];

/// Control points of the rural palette.
pub const RURAL_POINTS: [(f64, [u8; 4]); 5] = [
    (0.0, [64, 0, 0, 255]),
    (1.9999, [196, 0, 0, 255]),
    (2.0, [196, 196, 0, 255]),
    (2.5, [0, 196, 0, 255]),
    (2.55, [0, 255, 0, 255]),
];

lazy_static! {
    pub(crate) static ref URBAN: ResampledRamp =
        Ramp::from_sorted(&URBAN_POINTS)
            .resample_unchecked(rgba8(INVALID), DEFAULT_SAMPLES);

    pub(crate) static ref RURAL: ResampledRamp =
        Ramp::from_sorted(&RURAL_POINTS)
            .resample_unchecked(rgba8(INVALID), DEFAULT_SAMPLES);
}

/// Palette for roads in urban areas.
#[inline]
pub fn urban() -> &'static ResampledRamp { &URBAN }

/// Palette for roads outside of urban areas.
#[inline]
pub fn rural() -> &'static ResampledRamp { &RURAL }
