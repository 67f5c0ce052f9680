//! Color scales and histograms for overtaking distance measurements.
//!
//! - [`Ramp`] and [`ResampledRamp`]: piecewise linear color ramps over
//!   a sparse table of control points, resampled for fast lookups.
//! - [`histogram`]: binning of distance samples, with an optional
//!   open-ended last bin, together with labels and bin colors.
//! - [`style`]: HCL color scales as used by the map layers.
//! - [`road`]: helpers for the road information panel.
//!
//! The [`palettes`] module provides the urban and rural distance
//! palettes.
//!
//! ```
//! use overtaking_colors::{palettes, CssColor};
//! let urban = palettes::urban();
//! assert_eq!(urban.query(Some(2.0)).to_hex(), "#00C400");
//! assert_eq!(urban.query(None), urban.invalid());
//! ```

use std::f64::consts::PI;
use std::marker::PhantomData;
use rgb::{RGBA, RGB8, RGBA8};

mod error;
pub mod histogram;
pub mod palettes;
mod ramp;
pub mod road;
pub mod style;

pub use error::{Error, Result};
pub use histogram::{bin, labels, HistogramConfig};
pub use palettes::ty::PaletteSpec;
pub use ramp::{build, interpolate, CssColor, Ramp, ResampledRamp,
               DEFAULT_SAMPLES};

/// A “continuous” range of colors parametrized by reals in \[0, 1\].
pub trait ColorRange<Color> {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\].
    fn rgb(&self, t: f64) -> Color;

    /// Return an iterator yielding a uniform sampling of `n` points
    /// between `a` and `b` (both included) together with the colors
    /// at the corresponding positions of the range.  It is not
    /// required that `a <= b`.
    fn range(&self, a: f64, b: f64, n: usize) -> Range<'_, Self, Color>
    where Self: Sized {
        let a = clamp_infinite(a);
        let b = clamp_infinite(b);
        if n == 0 {
            Range { range: self, color: PhantomData,
                    a, b, flast: 0., last: 0,
                    i: 1, j: 0 } // Empty iterator
        } else {
            Range { range: self, color: PhantomData,
                    a, b, flast: (n - 1) as f64,
                    last: n - 1, i: 0, j: n - 1 }
        }
    }
}

fn clamp_infinite(x: f64) -> f64 {
    if x == f64::INFINITY { f64::MAX }
    else if x == f64::NEG_INFINITY { f64::MIN }
    else { x }
}

/// An iterator yielding `f64` in a given range together with colors.
///
/// Created by [`ColorRange::range`].
pub struct Range<'a, R, Color> {
    range: &'a R,
    color: PhantomData<Color>,
    a: f64, // finite or NaN
    b: f64, // finite or NaN
    flast: f64, // `last` as a floating-point number
    last: usize,
    i: usize, // first position to be consumed (i ≤ j)
    j: usize, // last position to be consumed
}

impl<'a, R, Color> Range<'a, R, Color> where R: ColorRange<Color> {
    /// Return the position `k` (assumed in `0 ..= self.last`) and its
    /// color.  Positions are `a + (k / last) * (b - a)` with both
    /// bounds hit exactly.
    fn rgb(&self, k: usize) -> (f64, Color) {
        if k == 0 {
            (self.a, self.range.rgb(0.))
        } else if k == self.last {
            (self.b, self.range.rgb(1.))
        } else {
            let t = k as f64 / self.flast;
            let mut x = self.a + t * (self.b - self.a);
            if x.is_infinite() {
                x = (1. - t) * self.a + t * self.b;
            }
            (x, self.range.rgb(t))
        }
    }
}

impl<'a, R, Color> Iterator for Range<'a, R, Color>
where R: ColorRange<Color> {
    type Item = (f64, Color);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.rgb(self.i);
            self.i += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = (self.j + 1).saturating_sub(self.i);
        (len, Some(len))
    }
}

impl<'a, R, Color> ExactSizeIterator for Range<'a, R, Color>
where R: ColorRange<Color> {}

impl<'a, R, Color> DoubleEndedIterator for Range<'a, R, Color>
where R: ColorRange<Color> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.rgb(self.j);
            if self.j == 0 {
                self.i = 1
            } else {
                self.j -= 1;
            }
            Some(item)
        } else {
            None
        }
    }
}

/// Specifies the methods a RGB color encoding must provide.
pub trait RGBColor: Sized {
    /// Return the red, green, blue and alpha components of the color
    /// (in \[0, 255\]).
    fn to_rgba(&self) -> RGBA<f64>;

    /// Create a color from its RGBA components (in \[0, 255\]).
    /// Integer encodings round to the nearest value and saturate.
    fn from_rgba(rgba: RGBA<f64>) -> Self;

    /// Return a gradient from color `c0` to color `c1`, interpolated
    /// in the CIE L*C*h* color space (taking the shorter way around
    /// the hue circle).
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGBA8;
    /// use overtaking_colors::{RGBColor, ColorRange};
    /// let dark_red = RGBA8::new(64, 0, 0, 255);
    /// let green = RGBA8::new(0, 255, 0, 255);
    /// let grad = dark_red.gradient(&green);
    /// assert_eq!(grad.rgb(0.), dark_red);
    /// assert_eq!(grad.rgb(1.), green);
    /// ```
    fn gradient(&self, c1: &Self) -> Gradient<Self> {
        let lch0 = Lch::from_rgb(Self::to_rgba(self));
        let lch1 = Lch::from_rgb(Self::to_rgba(c1));
        let h0 = lch0.h;
        let h1 = lch1.h;
        let dh = {
            if h1 > h0 && h1 - h0 > PI { h1 - (h0 + TWO_PI) }
            else if h1 < h0 && h0 - h1 > PI { h1 + TWO_PI - h0 }
            else { h1 - h0 } };
        Gradient { c0: lch0,
                   dc: Lch { l: lch1.l - lch0.l, c: lch1.c - lch0.c,
                             h: dh, a: lch1.a - lch0.a },
                   color: PhantomData }
    }
}

impl RGBColor for RGBA<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> { *self }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { c }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB8 { r: c.r.round() as u8,  g: c.g.round() as u8,
               b: c.b.round() as u8 }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA8 { r: c.r.round() as u8,  g: c.g.round() as u8,
                b: c.b.round() as u8, a: c.a.round() as u8 }
    }
}

/// The type for colors in the CIE L*C*h*_ab color space with a D50
/// reference white point and an alpha component.  This color space is
/// CIE L*a*b* with polar coordinates.
#[derive(Clone, Copy, Debug)]
struct Lch {
    /// The lightness in the range 0. to 100.
    l: f64,
    /// The chroma, in the range 0. to 181.02, but less in practice.
    c: f64,
    /// The hue in radians in the range 0. to 2π.
    h: f64,
    /// Alpha component, in \[0, 255\].
    a: f64,
}

const EPS0: f64 = 6. / 29.;
const EPS: f64 = EPS0 * EPS0 * EPS0 ;
const TWO_PI: f64 = 2. * PI;

/// sRGB component in \[0, 255\] to linear intensity in \[0, 1\].
fn linearize(c: f64) -> f64 {
    let c = c / 255.;
    if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

/// Linear intensity to sRGB component in \[0, 255\].
fn delinearize(c: f64) -> f64 {
    let c = if c <= 0.0031308 { 12.92 * c }
            else { 1.055 * c.powf(1. / 2.4) - 0.055 };
    255. * c
}

impl Lch {
    fn from_rgb(c: RGBA<f64>) -> Lch {
        // See https://github.com/dbuenzli/gg/blob/b8704687d669d139bb4ac7a54115afc7e5caaa55/src/gg.ml#L2926
        const C0: f64 = 1. / 3.;
        const C1: f64 = 841. / 108.;
        const C2: f64 = 4. / 29.;
        let (r, g, b) = (linearize(c.r), linearize(c.g), linearize(c.b));
        let xr = 0.4522795 * r + 0.3993744 * g + 0.1483460 * b;
        let yr = 0.2225105 * r + 0.7168863 * g + 0.0606032 * b;
        let zr = 0.0168820 * r + 0.1176865 * g + 0.8654315 * b;
        let fx = if xr > EPS { xr.powf(C0) } else { C1 * xr + C2 };
        let fy = if yr > EPS { yr.powf(C0) } else { C1 * yr + C2 };
        let fz = if zr > EPS { zr.powf(C0) } else { C1 * zr + C2 };
        let l = 116. * fy - 16.;
        let a = 500. * (fx - fy);
        let b = 200. * (fy - fz);
        let h = { let h = b.atan2(a);
                  if h < 0. { h + TWO_PI } else { h } };
        Lch { l, c: a.hypot(b), h, a: c.a }
    }

    fn to_rgb(self) -> RGBA<f64> {
        const C0: f64 = 108. / 841.;
        const C1: f64 = 4. / 29.;
        let a = self.c * self.h.cos();
        let b =  self.c * self.h.sin();
        let fy = (self.l + 16.) / 116.;
        let fx = a / 500. + fy;
        let fz = fy - b / 200.;
        let fx1 = if fx > EPS0 { fx * fx * fx } else { C0 * (fx - C1) };
        let fy1 = if fy > EPS0 { fy * fy * fy } else { C0 * (fy - C1) };
        let fz1 = if fz > EPS0 { fz * fz * fz } else { C0 * (fz - C1) };
        let r = 3.0215932  * fx1 - 1.6168777 * fy1 - 0.4047152 * fz1;
        let g = -0.9437222 * fx1 + 1.9161365 * fy1 + 0.0275856 * fz1;
        let b = 0.0693906  * fx1 - 0.2290271 * fy1 + 1.1596365 * fz1;
        RGBA { r: delinearize(r.max(0.)), g: delinearize(g.max(0.)),
               b: delinearize(b.max(0.)), a: self.a }
    }
}

/// Gradient between two colors.
///
/// Created by [`RGBColor::gradient`].  See the [`ColorRange`] trait
/// for methods.
#[derive(Clone, Debug)]
pub struct Gradient<Color> {
    c0: Lch, // first color
    dc: Lch, // last - first color
    color: PhantomData<Color>,
}

impl<Color> Gradient<Color>
where Color: RGBColor {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\] but does
    /// not check the later condition.
    #[inline]
    pub(crate) fn rgb_unchecked(&self, t: f64) -> Color {
        let lch = Lch { l: self.c0.l + t * self.dc.l,
                        c: self.c0.c + t * self.dc.c,
                        h: self.c0.h + t * self.dc.h,
                        a: self.c0.a + t * self.dc.a };
        Color::from_rgba(lch.to_rgb())
    }
}

impl<Color> ColorRange<Color> for Gradient<Color>
where Color: RGBColor {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\], where
    /// `t == 0.` returns the first color provided in the gradient and
    /// `t == 1.` the second.
    fn rgb(&self, t: f64) -> Color { self.rgb_unchecked(t.clamp(0., 1.)) }
}


/// Format `x` with `digits` decimals, halfway cases rounded away from
/// zero (as JavaScript's `toFixed` does for exact binary fractions).
pub(crate) fn to_fixed(x: f64, digits: usize) -> String {
    let scale = 10f64.powi(digits as i32);
    let rounded = (x * scale).round() / scale;
    if rounded.is_finite() {
        format!("{rounded:.digits$}")
    } else {
        // `x * scale` overflowed.
        format!("{x:.digits$}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;

    impl ColorRange<f64> for Identity {
        fn rgb(&self, t: f64) -> f64 { t }
    }

    #[test]
    fn range_positions() {
        for (i, (x, t)) in Identity.range(0., 2.5, 11).enumerate() {
            assert!((x - 0.25 * i as f64).abs() <= 1e-15,
                    "{} ≉ {}", x, 0.25 * i as f64);
            assert!((t - 0.1 * i as f64).abs() <= 1e-15);
        }
    }

    #[test]
    fn range_bounds_exact() {
        let v: Vec<_> = Identity.range(0.3, 0.7, 7).collect();
        assert_eq!(v.first(), Some(&(0.3, 0.)));
        assert_eq!(v.last(), Some(&(0.7, 1.)));
    }

    #[test]
    fn range_len_and_reverse() {
        let id = Identity;
        let mut r = id.range(1., 0., 4);
        assert_eq!(r.len(), 4);
        assert_eq!(r.next_back(), Some((0., 1.)));
        assert_eq!(r.next(), Some((1., 0.)));
        assert_eq!(r.len(), 2);
        assert_eq!(id.range(0., 1., 0).count(), 0);
        let single: Vec<_> = id.range(5., 6., 1).rev().collect();
        assert_eq!(single, vec![(5., 0.)]);
    }

    #[test]
    fn gradient_endpoints() {
        let c0 = RGBA8::new(196, 0, 0, 255);
        let c1 = RGBA8::new(196, 196, 0, 255);
        let g = c0.gradient(&c1);
        assert_eq!(g.rgb(0.), c0);
        assert_eq!(g.rgb(1.), c1);
        assert_eq!(g.rgb(-3.), c0);
        assert_eq!(g.rgb(7.), c1);
    }

    #[test]
    fn gradient_gray_stays_gray() {
        let white = RGB8::new(255, 255, 255);
        let black = RGB8::new(0, 0, 0);
        let g = white.gradient(&black);
        let mid = g.rgb(0.5);
        assert!(mid.r.abs_diff(mid.g) <= 1 && mid.g.abs_diff(mid.b) <= 1,
                "{:?}", mid);
        assert!(mid.r > 0 && mid.r < 255);
    }

    #[test]
    fn gradient_alpha_is_linear() {
        let c0 = RGBA8::new(255, 0, 0, 0);
        let c1 = RGBA8::new(255, 0, 0, 255);
        let mid = c0.gradient(&c1).rgb(0.5);
        assert_eq!(mid.a, 128);
        assert_eq!((mid.r, mid.g, mid.b), (255, 0, 0));
    }

    #[test]
    fn fixed_decimals_round_half_away_from_zero() {
        assert_eq!(to_fixed(0.0625, 3), "0.063");
        assert_eq!(to_fixed(0.3125, 3), "0.313");
        assert_eq!(to_fixed(-0.3125, 3), "-0.313");
        assert_eq!(to_fixed(1.23456, 3), "1.235");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(12.5, 0), "13");
        assert_eq!(to_fixed(42., 0), "42");
        assert_eq!(to_fixed(2., 3), "2.000");
    }
}
