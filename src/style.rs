//! Color scales of the map layers.
//!
//! Map layers color roads by their mean overtaking distance and
//! tiles by event count, interpolating in the CIE L*C*h* space
//! between a few stops.

use rgb::RGBA8;
use crate::{ramp::Ramp, ColorRange, Error, Gradient, RGBColor, Result};

/// White to black.
pub const GRAYSCALE: [RGBA8; 2] = [
    RGBA8 { r: 255, g: 255, b: 255, a: 255 },
    RGBA8 { r: 0, g: 0, b: 0, a: 255 },
];

/// Transparent to opaque red.
pub const REDS: [RGBA8; 2] = [
    RGBA8 { r: 255, g: 0, b: 0, a: 0 },
    RGBA8 { r: 255, g: 0, b: 0, a: 255 },
];

/// Stops of the mean overtaking distance scale, in meters.
pub const DISTANCE_STOPS: [(f64, [u8; 4]); 5] = [
    (0.5, [64, 0, 0, 255]),
    (1.0, [196, 0, 0, 255]),
    (1.5, [196, 196, 0, 255]),
    (2.0, [0, 196, 0, 255]),
    (2.5, [0, 255, 0, 255]),
];

/// Color of roads without distance measurements (`#ABC`).
pub const DISTANCE_FALLBACK: RGBA8 = RGBA8 { r: 0xAA, g: 0xBB, b: 0xCC, a: 255 };

/// Keep at most about `max_count` colors of `colors`, evenly spread
/// and starting with the first one.
///
/// ```
/// use overtaking_colors::style::simplify;
/// let c: Vec<u32> = (0 .. 256).collect();
/// let s = simplify(&c, 20);
/// assert_eq!(s.len(), 20);
/// assert_eq!(s[1], 13);
/// ```
pub fn simplify<C: Clone>(colors: &[C], max_count: usize) -> Vec<C> {
    if max_count == 0 {
        return colors.iter().take(1).cloned().collect()
    }
    let step = (colors.len() + max_count - 1) / max_count;
    colors.iter().step_by(step.max(1)).cloned().collect()
}

/// Spread `colors` evenly over `[min, max]`.
pub fn scale_stops<C: Clone>(colors: &[C], min: f64, max: f64)
                             -> Vec<(f64, C)> {
    if colors.len() == 1 {
        return vec![(min, colors[0].clone())]
    }
    let last = colors.len().saturating_sub(1) as f64;
    colors.iter().enumerate()
        .map(|(i, c)| (min + i as f64 / last * (max - min), c.clone()))
        .collect()
}

/// Piecewise interpolation in the CIE L*C*h* space between stops,
/// constant outside of them.
#[derive(Clone, Debug)]
pub struct HclScale {
    stops: Ramp,
    gradients: Vec<Gradient<RGBA8>>, // between consecutive stops
}

impl HclScale {
    /// Fails with [`Error::InvalidConfig`] if there are no stops or
    /// if two of them have the same position.
    pub fn new(stops: impl IntoIterator<Item = (f64, RGBA8)>) -> Result<Self> {
        Ok(Self::from_ramp(Ramp::new(stops)?))
    }

    fn from_ramp(stops: Ramp) -> Self {
        let colors: Vec<RGBA8> = stops.points().map(|(_, c)| c).collect();
        let gradients = colors.windows(2)
            .map(|c| c[0].gradient(&c[1]))
            .collect();
        HclScale { stops, gradients }
    }

    /// The positions of the first and last stops.
    pub fn domain(&self) -> (f64, f64) { self.stops.domain() }

    /// Returns the color at `x`.  Stops get their exact color, `NaN`
    /// gets the first one.
    pub fn color(&self, x: f64) -> RGBA8 {
        let (min, max) = self.domain();
        if x.is_nan() || x <= min || x >= max {
            return self.stops.interpolate(x)
        }
        let keys = self.stops.keys();
        // keys[i] <= x < keys[i + 1]
        let i = keys.partition_point(|&k| k <= x) - 1;
        let t = (x - keys[i]) / (keys[i + 1] - keys[i]);
        if t == 0. {
            return self.stops.interpolate(x)
        }
        self.gradients[i].rgb_unchecked(t)
    }
}

impl ColorRange<RGBA8> for HclScale {
    fn rgb(&self, t: f64) -> RGBA8 {
        let (min, max) = self.domain();
        self.color(min + t.clamp(0., 1.) * (max - min))
    }
}

/// Whether a map attribute counts as set: absent, zero and `NaN`
/// values do not.
fn truthy(v: Option<f64>) -> Option<f64> {
    v.filter(|v| *v != 0. && !v.is_nan())
}

/// Road color by mean overtaking distance.
#[derive(Clone, Debug)]
pub struct DistanceStyle {
    scale: HclScale,
    fallback: RGBA8,
}

impl DistanceStyle {
    /// Use `fallback` for roads without measurements.
    pub fn with_fallback(fallback: RGBA8) -> Self {
        let scale = HclScale::from_ramp(Ramp::from_sorted(&DISTANCE_STOPS));
        DistanceStyle { scale, fallback }
    }

    /// Color of a road with mean distance `v` (in meters).
    pub fn color(&self, v: Option<f64>) -> RGBA8 {
        match truthy(v) {
            Some(v) => self.scale.color(v),
            None => self.fallback,
        }
    }
}

impl Default for DistanceStyle {
    fn default() -> Self { Self::with_fallback(DISTANCE_FALLBACK) }
}

/// Color by event count, from `0` to `max_count`.
#[derive(Clone, Debug)]
pub struct CountStyle {
    scale: HclScale,
}

impl CountStyle {
    /// Spread `colormap` (for example [`GRAYSCALE`] or [`REDS`]) over
    /// `[0, max_count]`.  Fails if the colormap is empty or
    /// `max_count` is not positive.
    pub fn new(colormap: &[RGBA8], max_count: f64) -> Result<Self> {
        if max_count.is_nan() || max_count <= 0. {
            return Err(Error::InvalidConfig(
                format!("maximal count must be positive, got {max_count}")))
        }
        Ok(CountStyle { scale: HclScale::new(scale_stops(colormap, 0., max_count))? })
    }

    /// Color of `count`; unset counts are treated as `0`.
    pub fn color(&self, count: Option<f64>) -> RGBA8 {
        self.scale.color(truthy(count).unwrap_or(0.))
    }
}
