use rgb::RGBA8;
use serde::{Deserialize, Serialize};
use crate::{ramp::{Ramp, ResampledRamp, DEFAULT_SAMPLES}, Result};

/// Description of a distance palette, as found in configuration
/// files.
///
/// ```
/// use overtaking_colors::PaletteSpec;
/// let spec: PaletteSpec = serde_json::from_str(r#"{
///     "control_points": [[0.0, [64, 0, 0, 255]], [2.0, [0, 196, 0, 255]]],
///     "invalid_color": [0, 0, 196, 255]
/// }"#).unwrap();
/// let ramp = spec.build().unwrap();
/// assert_eq!(ramp.samples().len(), 256);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PaletteSpec {
    /// `(key, [r, g, b, a])` pairs, in any order.
    pub control_points: Vec<(f64, [u8; 4])>,
    /// Color of absent values.
    pub invalid_color: [u8; 4],
    /// Number of colors of the resampled ramp.
    #[serde(default = "default_samples")]
    pub samples: usize,
}

fn default_samples() -> usize { DEFAULT_SAMPLES }

pub(crate) fn rgba8([r, g, b, a]: [u8; 4]) -> RGBA8 { RGBA8::new(r, g, b, a) }

impl PaletteSpec {
    /// The exact ramp through the control points.
    pub fn ramp(&self) -> Result<Ramp> {
        Ramp::new(self.control_points.iter().map(|&(x, c)| (x, rgba8(c))))
    }

    /// The resampled ramp described by this palette.
    pub fn build(&self) -> Result<ResampledRamp> {
        self.ramp()?.resample(rgba8(self.invalid_color), self.samples)
    }
}
