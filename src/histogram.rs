//! Histograms of distance samples.
//!
//! Bin `i` covers `[xa + i dx, xa + (i+1) dx)`.  When the histogram is
//! *open-ended*, the last bin also collects every value above it.

use log::trace;
use serde::{Deserialize, Serialize};
use crate::{ramp::{CssColor, ResampledRamp}, to_fixed, Error, Result};

/// Largest number of bins a [`HistogramConfig`] may describe.
pub const MAX_BINS: usize = 4096;

/// Count the `samples` falling in each of the `bin_count` bins of
/// width `dx` starting at `xa`.  Samples below `xa` (or above the last
/// bin when not `open_ended`) and `NaN` are not counted.  When `dx`
/// is not a positive finite width, no sample is counted.
///
/// ```
/// use overtaking_colors::bin;
/// let counts = bin(&[0.1, 0.3, 0.3, 2.9], 0.0, 0.25, 11, true);
/// assert_eq!(counts, [1, 2, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
/// ```
pub fn bin(samples: &[f64], xa: f64, dx: f64, bin_count: usize,
           open_ended: bool) -> Vec<usize> {
    let mut counts = vec![0; bin_count];
    if bin_count == 0 {
        return counts
    }
    if !dx.is_finite() || dx <= 0. {
        trace!("bin width {dx} is not positive, {} samples discarded",
               samples.len());
        return counts
    }
    let last = (bin_count - 1) as f64;
    let mut discarded = 0;
    for &v in samples {
        if v.is_nan() {
            discarded += 1;
            continue
        }
        let mut j = ((v - xa) / dx).floor();
        if open_ended {
            j = j.min(last);
        }
        if j >= 0. && j <= last {
            counts[j as usize] += 1;
        } else {
            discarded += 1;
        }
    }
    if discarded > 0 {
        trace!("{discarded} of {} samples outside of the histogram",
               samples.len());
    }
    counts
}

/// Labels of the bins, in centimeters: `"25-50"` for the bin
/// `[0.25, 0.5)`, and `"≥250"` for the last bin starting at 2.5 when
/// the histogram is `open_ended`.
pub fn labels(xa: f64, dx: f64, bin_count: usize, open_ended: bool)
              -> Vec<String> {
    (0 .. bin_count).map(|i| {
        let low = xa + dx * i as f64;
        if open_ended && i == bin_count - 1 {
            format!("≥{}", to_fixed(low * 100., 0))
        } else {
            format!("{}-{}", to_fixed(low * 100., 0),
                    to_fixed((low + dx) * 100., 0))
        }
    }).collect()
}

/// Bin layout of a histogram.
///
/// The default is the one of the overtaking distance chart: bins of
/// 25 cm from 0 to 2.55 m, the last one open-ended.  Deserializing
/// checks the layout with [`HistogramConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "UncheckedConfig")]
pub struct HistogramConfig {
    /// Lower bound of the first bin.
    pub xa: f64,
    /// Upper bound of the binned range.
    pub xb: f64,
    /// Width of the bins.
    pub dx: f64,
    /// Whether the last bin collects all values above it.
    pub open_ended: bool,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        HistogramConfig { xa: 0.0, xb: 2.55, dx: 0.25, open_ended: true }
    }
}

/// Fields of a [`HistogramConfig`] as read from a file, missing ones
/// taken from the default layout.
#[derive(Deserialize)]
#[serde(default)]
struct UncheckedConfig {
    xa: f64,
    xb: f64,
    dx: f64,
    open_ended: bool,
}

impl Default for UncheckedConfig {
    fn default() -> Self {
        let HistogramConfig { xa, xb, dx, open_ended } =
            HistogramConfig::default();
        UncheckedConfig { xa, xb, dx, open_ended }
    }
}

impl TryFrom<UncheckedConfig> for HistogramConfig {
    type Error = Error;

    fn try_from(c: UncheckedConfig) -> Result<Self> {
        let config = HistogramConfig { xa: c.xa, xb: c.xb, dx: c.dx,
                                       open_ended: c.open_ended };
        config.validate()?;
        Ok(config)
    }
}

/// A bar of the histogram chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub count: usize,
    /// `#RRGGBB` color of the lower edge of the bin.
    pub color: String,
}

impl HistogramConfig {
    /// Check that the bins are well defined and that there are at
    /// most [`MAX_BINS`] of them.
    pub fn validate(&self) -> Result<()> {
        if !(self.xa.is_finite() && self.xb.is_finite() && self.dx.is_finite()) {
            return Err(Error::InvalidConfig(
                "histogram bounds and bin width must be finite".into()))
        }
        if self.dx <= 0. {
            return Err(Error::InvalidConfig(
                format!("histogram bin width must be positive, got {}",
                        self.dx)))
        }
        if self.xb <= self.xa {
            return Err(Error::InvalidConfig(
                format!("empty histogram range [{}, {})", self.xa, self.xb)))
        }
        let n = ((self.xb - self.xa) / self.dx).ceil();
        // Also catches an overflowing `xb - xa`.
        if n.is_infinite() || n > MAX_BINS as f64 {
            return Err(Error::InvalidConfig(
                format!("histogram has {n} bins, at most {MAX_BINS} allowed")))
        }
        Ok(())
    }

    /// Number of bins needed to cover `[xa, xb)`.
    pub fn bin_count(&self) -> Result<usize> {
        self.validate()?;
        Ok(((self.xb - self.xa) / self.dx).ceil() as usize)
    }

    /// See [`bin`].
    pub fn bin(&self, samples: &[f64]) -> Result<Vec<usize>> {
        Ok(bin(samples, self.xa, self.dx, self.bin_count()?, self.open_ended))
    }

    /// See [`labels`].
    pub fn labels(&self) -> Result<Vec<String>> {
        Ok(labels(self.xa, self.dx, self.bin_count()?, self.open_ended))
    }

    /// Hex colors of the lower edges of the bins in `palette`.
    pub fn colors(&self, palette: &ResampledRamp) -> Result<Vec<String>> {
        Ok((0 .. self.bin_count()?)
            .map(|i| palette.query(Some(self.xa + self.dx * i as f64)).to_hex())
            .collect())
    }

    /// Counts, labels and colors of the bins, from the lowest to the
    /// highest one.
    pub fn bars(&self, samples: &[f64], palette: &ResampledRamp)
                -> Result<Vec<Bar>> {
        Ok(self.labels()?.into_iter()
            .zip(self.bin(samples)?)
            .zip(self.colors(palette)?)
            .map(|((label, count), color)| Bar { label, count, color })
            .collect())
    }
}
