//! Piecewise linear color ramps over irregularly spaced control points.

use log::debug;
use rgb::RGBA8;
use crate::{ColorRange, Error, RGBColor, Result};

/// Number of samples used when resampling a ramp, unless specified
/// otherwise.
pub const DEFAULT_SAMPLES: usize = 256;

/// A color ramp given by control points `(key, color)`, linearly
/// interpolated between consecutive keys and constant outside of them.
#[derive(Clone, Debug, PartialEq)]
pub struct Ramp {
    keys: Vec<f64>, // Invariant: non-empty, finite, strictly increasing.
    colors: Vec<RGBA8>, // Same length as `keys`.
}

impl Ramp {
    /// Create a ramp from the control points, given in any order.
    ///
    /// Fails with [`Error::InvalidConfig`] if there is no control
    /// point, if a key is not finite or if two keys are equal.
    pub fn new(points: impl IntoIterator<Item = (f64, RGBA8)>) -> Result<Self> {
        let mut points: Vec<_> = points.into_iter().collect();
        if points.is_empty() {
            return Err(Error::InvalidConfig(
                "a color ramp needs at least one control point".into()));
        }
        if let Some((x, _)) = points.iter().find(|(x, _)| !x.is_finite()) {
            return Err(Error::InvalidConfig(
                format!("control point key {x} is not finite")));
        }
        points.sort_by(|(x0, _), (x1, _)| x0.total_cmp(x1));
        if let Some(w) = points.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(Error::InvalidConfig(
                format!("duplicate control point key {}", w[0].0)));
        }
        let (keys, colors) = points.into_iter().unzip();
        Ok(Ramp { keys, colors })
    }

    /// Create a ramp from points already sorted by strictly
    /// increasing finite keys.  Only used for the built-in palettes.
    pub(crate) fn from_sorted(points: &[(f64, [u8; 4])]) -> Self {
        debug_assert!(!points.is_empty());
        debug_assert!(points.windows(2).all(|w| w[0].0 < w[1].0));
        Ramp {
            keys: points.iter().map(|p| p.0).collect(),
            colors: points.iter().map(|&(_, [r, g, b, a])| RGBA8::new(r, g, b, a))
                .collect(),
        }
    }

    /// Number of control points (at least 1).
    pub fn point_count(&self) -> usize { self.keys.len() }

    /// The control points sorted by increasing key.
    pub fn points(&self) -> impl Iterator<Item = (f64, RGBA8)> + '_ {
        self.keys.iter().copied().zip(self.colors.iter().copied())
    }

    pub(crate) fn keys(&self) -> &[f64] { &self.keys }

    /// The smallest and largest keys.
    pub fn domain(&self) -> (f64, f64) {
        (self.keys[0], self.keys[self.keys.len() - 1])
    }

    /// Returns the color of the ramp at `x`.
    ///
    /// Values at or below the first key get the first color, values
    /// at or above the last key get the last color.  In between, each
    /// channel is linearly interpolated between the bracketing control
    /// points and rounded to the nearest integer.  `NaN` gets the
    /// first color.
    pub fn interpolate(&self, x: f64) -> RGBA8 {
        let n = self.keys.len();
        if x.is_nan() || x <= self.keys[0] {
            return self.colors[0]
        }
        if x >= self.keys[n - 1] {
            return self.colors[n - 1]
        }
        // keys[lo] <= x < keys[hi]
        let mut lo = 0;
        let mut hi = n - 1;
        while hi - lo > 1 {
            let mid = (lo + hi + 1) / 2;
            if x < self.keys[mid] { hi = mid } else { lo = mid }
        }
        let (xa, xb) = (self.keys[lo], self.keys[hi]);
        let w = (x - xa) / (xb - xa);
        let (ca, cb) = (self.colors[lo], self.colors[hi]);
        let mix = |a: u8, b: u8| {
            (a as f64 * (1. - w) + b as f64 * w).round() as u8
        };
        RGBA8::new(mix(ca.r, cb.r), mix(ca.g, cb.g), mix(ca.b, cb.b),
                   mix(ca.a, cb.a))
    }

    /// Sample the ramp uniformly at `n` points of its domain, both
    /// ends included.  `invalid` is the color returned by
    /// [`ResampledRamp::query`] for absent values.
    pub fn resample(&self, invalid: RGBA8, n: usize) -> Result<ResampledRamp> {
        if n < 2 {
            return Err(Error::InvalidConfig(
                format!("a resampled ramp needs at least 2 samples, got {n}")));
        }
        Ok(self.resample_unchecked(invalid, n))
    }

    /// Same as [`Ramp::resample`] assuming `n >= 2`.
    pub(crate) fn resample_unchecked(&self, invalid: RGBA8, n: usize)
                                     -> ResampledRamp {
        let (min, max) = self.domain();
        let samples = ColorRange::<RGBA8>::range(self, min, max, n)
            .map(|(_, c)| c).collect();
        debug!("resampled {} control points over [{min}, {max}] \
                into {n} colors", self.point_count());
        ResampledRamp { min, max, invalid, samples }
    }
}

/// Position `t` ∈ \[0, 1\] of the ramp is the key `min + t (max - min)`.
impl<Color: RGBColor> ColorRange<Color> for Ramp {
    fn rgb(&self, t: f64) -> Color {
        let (min, max) = self.domain();
        let x = if t >= 1. { max } else { min + t * (max - min) };
        Color::from_rgba(self.interpolate(x).to_rgba())
    }
}

/// Returns the color of the ramp defined by `points` at `x`.
///
/// This sorts the control points on each call; build a [`Ramp`] once
/// when evaluating many values.
///
/// ```
/// use rgb::RGBA8;
/// use overtaking_colors::interpolate;
/// let points = [(0.0, RGBA8::new(64, 0, 0, 255)),
///               (2.0, RGBA8::new(196, 196, 0, 255))];
/// assert_eq!(interpolate(points, 1.0).unwrap(), RGBA8::new(130, 98, 0, 255));
/// ```
pub fn interpolate(points: impl IntoIterator<Item = (f64, RGBA8)>, x: f64)
                   -> Result<RGBA8> {
    Ok(Ramp::new(points)?.interpolate(x))
}

/// Build a ramp from `points` and resample it with `n` colors.
/// `invalid` is the color of absent values.
pub fn build(points: impl IntoIterator<Item = (f64, RGBA8)>,
             invalid: RGBA8, n: usize) -> Result<ResampledRamp> {
    Ramp::new(points)?.resample(invalid, n)
}

/// A color ramp sampled at uniformly spaced positions, allowing
/// constant time lookups.  Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct ResampledRamp {
    min: f64,
    max: f64,
    invalid: RGBA8,
    samples: Vec<RGBA8>, // Invariant: length ≥ 2
}

impl ResampledRamp {
    /// The range of values covered by the samples.
    pub fn domain(&self) -> (f64, f64) { (self.min, self.max) }

    /// The color returned for absent values.
    pub fn invalid(&self) -> RGBA8 { self.invalid }

    /// The sampled colors, from the lowest to the highest value.
    pub fn samples(&self) -> &[RGBA8] { &self.samples }

    /// Returns the sample closest to `v`, or the invalid color if `v`
    /// is `None` or `NaN`.  Values outside of the domain get the first
    /// or the last sample.
    pub fn query(&self, v: Option<f64>) -> RGBA8 {
        match v {
            Some(v) if !v.is_nan() => self.samples[self.index(v)],
            _ => self.invalid,
        }
    }

    fn index(&self, v: f64) -> usize {
        let last = self.samples.len() - 1;
        let width = self.max - self.min;
        if width <= 0. {
            return 0
        }
        let i = ((v - self.min) / width * last as f64).round();
        // The cast saturates infinite values.
        (i.max(0.) as usize).min(last)
    }

    /// Same as [`ResampledRamp::query`] as a `(r, g, b, a)` tuple.
    pub fn rgba(&self, v: Option<f64>) -> (u8, u8, u8, u8) {
        self.query(v).to_tuple()
    }

    /// CSS `rgba(r,g,b,a)` string of the color of `v`.
    pub fn rgba_css(&self, v: Option<f64>) -> String {
        self.query(v).to_rgba_string()
    }

    /// CSS `rgb(r,g,b)` string of the color of `v` (alpha dropped).
    pub fn rgb_css(&self, v: Option<f64>) -> String {
        self.query(v).to_rgb_string()
    }

    /// `#RRGGBB` string of the color of `v` (alpha dropped).
    pub fn rgb_hex(&self, v: Option<f64>) -> String {
        self.query(v).to_hex()
    }
}

/// Position `t` ∈ \[0, 1\] of the ramp is the value
/// `min + t (max - min)`.
impl<Color: RGBColor> ColorRange<Color> for ResampledRamp {
    fn rgb(&self, t: f64) -> Color {
        let v = self.min + t.clamp(0., 1.) * (self.max - self.min);
        Color::from_rgba(self.query(Some(v)).to_rgba())
    }
}

/// Textual encodings of a color.
pub trait CssColor {
    /// The `(r, g, b, a)` components.
    fn to_tuple(&self) -> (u8, u8, u8, u8);

    /// `rgba(r,g,b,a)` with the alpha in \[0, 255\].
    fn to_rgba_string(&self) -> String {
        let (r, g, b, a) = self.to_tuple();
        format!("rgba({r},{g},{b},{a})")
    }

    /// `rgb(r,g,b)`, ignoring alpha.
    fn to_rgb_string(&self) -> String {
        let (r, g, b, _) = self.to_tuple();
        format!("rgb({r},{g},{b})")
    }

    /// `#RRGGBB` with uppercase hex digits, ignoring alpha.
    fn to_hex(&self) -> String {
        let (r, g, b, _) = self.to_tuple();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl CssColor for RGBA8 {
    fn to_tuple(&self) -> (u8, u8, u8, u8) { (self.r, self.g, self.b, self.a) }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn c(r: u8, g: u8, b: u8, a: u8) -> RGBA8 { RGBA8::new(r, g, b, a) }

    fn urban_points() -> Vec<(f64, RGBA8)> {
        vec![(2.55, c(0, 255, 0, 255)),
             (0.0, c(64, 0, 0, 255)),
             (1.5, c(196, 196, 0, 255)),
             (1.4999, c(196, 0, 0, 255)),
             (2.0, c(0, 196, 0, 255))]
    }

    #[test]
    fn midpoint() {
        let ramp = Ramp::new([(0.0, c(64, 0, 0, 255)),
                              (2.0, c(196, 196, 0, 255))]).unwrap();
        assert_eq!(ramp.interpolate(1.0), c(130, 98, 0, 255));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        let ramp = Ramp::new([(0.0, c(0, 0, 0, 0)),
                              (1.0, c(1, 3, 5, 255))]).unwrap();
        assert_eq!(ramp.interpolate(0.5), c(1, 2, 3, 128));
    }

    #[test]
    fn sorts_control_points() {
        let ramp = Ramp::new(urban_points()).unwrap();
        let keys: Vec<f64> = ramp.points().map(|(x, _)| x).collect();
        assert_eq!(keys, vec![0.0, 1.4999, 1.5, 2.0, 2.55]);
        assert_eq!(ramp.domain(), (0.0, 2.55));
        assert_eq!(ramp.point_count(), 5);
    }

    #[test]
    fn control_points_round_trip() {
        let ramp = Ramp::new(urban_points()).unwrap();
        for (x, color) in urban_points() {
            assert_eq!(ramp.interpolate(x), color, "at {x}");
        }
    }

    #[test]
    fn clamps_outside_domain() {
        let ramp = Ramp::new(urban_points()).unwrap();
        for x in [-1e9, -0.1, 0.0] {
            assert_eq!(ramp.interpolate(x), c(64, 0, 0, 255));
        }
        for x in [2.55, 3.0, f64::INFINITY] {
            assert_eq!(ramp.interpolate(x), c(0, 255, 0, 255));
        }
        assert_eq!(ramp.interpolate(f64::NEG_INFINITY), c(64, 0, 0, 255));
        assert_eq!(ramp.interpolate(f64::NAN), c(64, 0, 0, 255));
    }

    #[test]
    fn monotone_between_control_points() {
        let ramp = Ramp::new(urban_points()).unwrap();
        // Between 1.5 and 2.0: red decreases 196 → 0, green stays.
        let mut prev = ramp.interpolate(1.5);
        for i in 1 ..= 50 {
            let cur = ramp.interpolate(1.5 + 0.01 * i as f64);
            assert!(cur.r <= prev.r);
            assert_eq!(cur.g, 196);
            prev = cur;
        }
        // Between 2.0 and 2.55: green increases 196 → 255.
        let mut prev = ramp.interpolate(2.0);
        for i in 1 ..= 55 {
            let cur = ramp.interpolate(2.0 + 0.01 * i as f64);
            assert!(cur.g >= prev.g);
            prev = cur;
        }
    }

    #[test]
    fn binary_search_many_points() {
        let points: Vec<_> = (0 .. 100).rev()
            .map(|i| (i as f64, c(i as u8, 0, 255 - i as u8, 255)))
            .collect();
        let ramp = Ramp::new(points).unwrap();
        assert_eq!(ramp.interpolate(41.5), c(42, 0, 214, 255));
        assert_eq!(ramp.interpolate(98.25), c(98, 0, 157, 255));
        assert_eq!(ramp.interpolate(0.5), c(1, 0, 255, 255));
    }

    #[test]
    fn single_point_ramp_is_constant() {
        let r = build([(1.0, c(1, 2, 3, 4))], c(0, 0, 0, 0), 4).unwrap();
        assert_eq!(r.samples(), &[c(1, 2, 3, 4); 4]);
        assert_eq!(r.query(Some(-5.)), c(1, 2, 3, 4));
        assert_eq!(r.query(Some(1.)), c(1, 2, 3, 4));
    }

    #[test]
    fn invalid_configs() {
        let none: [(f64, RGBA8); 0] = [];
        assert!(matches!(build(none, c(0, 0, 0, 0), 256),
                         Err(Error::InvalidConfig(_))));
        assert!(matches!(build(urban_points(), c(0, 0, 0, 0), 1),
                         Err(Error::InvalidConfig(_))));
        assert!(matches!(build(urban_points(), c(0, 0, 0, 0), 0),
                         Err(Error::InvalidConfig(_))));
        let dup = [(1.0, c(0, 0, 0, 255)), (1.0, c(255, 0, 0, 255))];
        assert!(matches!(Ramp::new(dup), Err(Error::InvalidConfig(_))));
        let nan = [(f64::NAN, c(0, 0, 0, 255))];
        assert!(matches!(Ramp::new(nan), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn resampled_ends_match_interpolation() {
        let ramp = Ramp::new(urban_points()).unwrap();
        for n in [2, 3, 17, 256] {
            let r = ramp.resample(c(0, 0, 196, 255), n).unwrap();
            assert_eq!(r.samples().len(), n);
            assert_eq!(r.samples()[0], ramp.interpolate(0.0));
            assert_eq!(r.samples()[n - 1], ramp.interpolate(2.55));
        }
    }

    #[test]
    fn resampled_positions() {
        let ramp = Ramp::new([(0.0, c(0, 0, 0, 255)),
                              (4.0, c(200, 100, 0, 255))]).unwrap();
        let r = ramp.resample(c(0, 0, 0, 0), 5).unwrap();
        assert_eq!(r.samples(), &[c(0, 0, 0, 255), c(50, 25, 0, 255),
                                  c(100, 50, 0, 255), c(150, 75, 0, 255),
                                  c(200, 100, 0, 255)]);
    }

    #[test]
    fn query() {
        let invalid = c(0, 0, 196, 255);
        let r = build(urban_points(), invalid, 256).unwrap();
        assert_eq!(r.query(None), invalid);
        assert_eq!(r.query(Some(f64::NAN)), invalid);
        assert_eq!(r.query(Some(-3.)), r.samples()[0]);
        assert_eq!(r.query(Some(0.)), c(64, 0, 0, 255));
        assert_eq!(r.query(Some(2.55)), c(0, 255, 0, 255));
        assert_eq!(r.query(Some(100.)), c(0, 255, 0, 255));
        assert_eq!(r.query(Some(f64::INFINITY)), c(0, 255, 0, 255));
        assert_eq!(r.query(Some(f64::NEG_INFINITY)), c(64, 0, 0, 255));
        // 2.0 / 2.55 * 255 = 200 exactly: sample 200 is at 2.0.
        assert_eq!(r.query(Some(2.0)), c(0, 196, 0, 255));
    }

    #[test]
    fn formatting() {
        let color = c(0, 196, 0, 255);
        assert_eq!(color.to_hex(), "#00C400");
        assert_eq!(color.to_rgb_string(), "rgb(0,196,0)");
        assert_eq!(color.to_rgba_string(), "rgba(0,196,0,255)");
        assert_eq!(color.to_tuple(), (0, 196, 0, 255));
        assert_eq!(c(10, 11, 255, 0).to_hex(), "#0A0BFF");
    }

    #[test]
    fn formatting_through_ramp() {
        let invalid = c(0, 0, 196, 255);
        let r = build(urban_points(), invalid, 256).unwrap();
        assert_eq!(r.rgb_hex(None), "#0000C4");
        assert_eq!(r.rgb_css(Some(0.)), "rgb(64,0,0)");
        assert_eq!(r.rgba_css(Some(9.)), "rgba(0,255,0,255)");
        assert_eq!(r.rgba(Some(2.0)), (0, 196, 0, 255));
    }

    #[test]
    fn color_range_of_ramp() {
        let ramp = Ramp::new([(1.0, c(0, 0, 0, 255)),
                              (3.0, c(100, 200, 50, 255))]).unwrap();
        let v: Vec<_> = ColorRange::<RGBA8>::range(&ramp, 1., 3., 3)
            .collect();
        assert_eq!(v, vec![(1., c(0, 0, 0, 255)), (2., c(50, 100, 25, 255)),
                           (3., c(100, 200, 50, 255))]);
        let r = ramp.resample(c(0, 0, 0, 0), 3).unwrap();
        let mid = ColorRange::<RGBA8>::rgb(&r, 0.5);
        assert_eq!(mid, c(50, 100, 25, 255));
    }
}
