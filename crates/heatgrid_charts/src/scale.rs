use heatgrid_core::Color;

use crate::data::{max_value, AxisCategories, DataPoint};

/// Evenly spaced, padded bands over a pixel range.
///
/// Output is a pure function of `(count, range, padding)`; nothing is mutated
/// after construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandScale {
    count: usize,
    start: f32,
    step: f32,
    band_width: f32,
}

impl BandScale {
    pub fn new(
        count: usize,
        range_min: f32,
        range_max: f32,
        padding_inner: f32,
        padding_outer: f32,
    ) -> Self {
        if count == 0 {
            return Self {
                count: 0,
                start: range_min,
                step: 0.0,
                band_width: 0.0,
            };
        }
        let count_f = count as f32;
        let span = (range_max - range_min).max(0.0);
        let denom = (count_f - padding_inner + 2.0 * padding_outer).max(1e-6);
        let step = span / denom;
        let band_width = step * (1.0 - padding_inner).max(0.0);
        let start = range_min + step * padding_outer;
        Self {
            count,
            start,
            step,
            band_width,
        }
    }

    /// Heatmap convention: every band owns `range / count` pixels and the edge
    /// gaps are half an inner gap.
    ///
    /// d3's `scaleBand().padding(p)` uses full-gap edges instead
    /// (`step = range / (count + p)`); use [`BandScale::new`] with
    /// `outer = inner` to match it.
    pub fn with_padding(count: usize, range_min: f32, range_max: f32, padding: f32) -> Self {
        let padding = padding.clamp(0.0, 0.999_999);
        Self::new(count, range_min, range_max, padding, padding * 0.5)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn band_width(&self) -> f32 {
        self.band_width
    }

    /// Distance between the starts of two neighboring bands.
    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn band_start(&self, idx: usize) -> Option<f32> {
        if idx >= self.count {
            return None;
        }
        Some(self.start + self.step * idx as f32)
    }

    pub fn center(&self, idx: usize) -> Option<f32> {
        self.band_start(idx).map(|x| x + self.band_width * 0.5)
    }

    /// Band under a pixel position. Gaps between bands hit nothing.
    pub fn index_at(&self, px: f32) -> Option<usize> {
        if self.count == 0 || self.step <= 0.0 || !px.is_finite() || px < self.start {
            return None;
        }
        let idx = ((px - self.start) / self.step).floor() as usize;
        let start = self.band_start(idx)?;
        (px <= start + self.band_width).then_some(idx)
    }
}

/// A band scale keyed by category label.
#[derive(Clone, Debug)]
pub struct CategoryScale {
    categories: AxisCategories,
    band: BandScale,
}

impl CategoryScale {
    pub fn new(categories: AxisCategories, range_min: f32, range_max: f32, padding: f32) -> Self {
        let band = BandScale::with_padding(categories.len(), range_min, range_max, padding);
        Self { categories, band }
    }

    pub fn categories(&self) -> &AxisCategories {
        &self.categories
    }

    pub fn band(&self) -> &BandScale {
        &self.band
    }

    pub fn bandwidth(&self) -> f32 {
        self.band.band_width()
    }

    /// Band start for a label, `None` when the label is not in the domain.
    pub fn position(&self, label: &str) -> Option<f32> {
        self.categories
            .index_of(label)
            .and_then(|idx| self.band.band_start(idx))
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.categories.index_of(label)
    }

    pub fn index_at(&self, px: f32) -> Option<usize> {
        self.band.index_at(px)
    }
}

/// Piecewise-linear color scale with breakpoints at fractions of a maximum.
///
/// Inputs below the first breakpoint clamp to the first color and inputs above
/// the last clamp to the last color. When every breakpoint is equal (an
/// all-null dataset gives `max = 0`) the scale returns the first color.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScale {
    domain: Vec<f64>,
    colors: Vec<Color>,
    // ascending copy of (breakpoint, color) used for lookups
    stops: Vec<(f64, Color)>,
    max: f64,
}

impl ColorScale {
    pub fn new(domain: Vec<f64>, colors: Vec<Color>) -> anyhow::Result<Self> {
        anyhow::ensure!(!domain.is_empty(), "ColorScale requires at least one stop");
        anyhow::ensure!(
            domain.len() == colors.len(),
            "ColorScale requires one color per breakpoint ({} breakpoints, {} colors)",
            domain.len(),
            colors.len()
        );
        anyhow::ensure!(
            domain.iter().all(|d| d.is_finite()),
            "ColorScale breakpoints must be finite"
        );

        let mut stops: Vec<(f64, Color)> = domain.iter().copied().zip(colors.iter().copied()).collect();
        if stops.len() > 1 && stops[stops.len() - 1].0 < stops[0].0 {
            stops.reverse();
        }
        let max = domain.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            domain,
            colors,
            stops,
            max,
        })
    }

    /// Breakpoints at `threshold * max` for each threshold.
    pub fn from_thresholds(thresholds: &[f64], colors: &[Color], max: f64) -> anyhow::Result<Self> {
        anyhow::ensure!(max.is_finite(), "ColorScale maximum must be finite");
        let domain = thresholds.iter().map(|t| t * max).collect();
        let mut scale = Self::new(domain, colors.to_vec())?;
        scale.max = max;
        Ok(scale)
    }

    /// Scale whose maximum is the largest non-null value in `data`.
    pub fn for_dataset(
        data: &[DataPoint],
        thresholds: &[f64],
        colors: &[Color],
    ) -> anyhow::Result<Self> {
        Self::from_thresholds(thresholds, colors, max_value(data))
    }

    pub fn domain(&self) -> &[f64] {
        &self.domain
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Data maximum the breakpoints were derived from.
    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn map(&self, value: f64) -> Color {
        let first = self.colors[0];
        let n = self.stops.len();
        if n == 1 || value.is_nan() {
            return first;
        }

        let (lo, _) = self.stops[0];
        let (hi, _) = self.stops[n - 1];
        if hi == lo {
            return first;
        }
        if value <= lo {
            return self.stops[0].1;
        }
        if value >= hi {
            return self.stops[n - 1].1;
        }

        // last breakpoint <= value; lo < value < hi keeps i in 0..n-1
        let i = self.stops.partition_point(|(d, _)| *d <= value) - 1;
        let (d0, c0) = self.stops[i];
        let (d1, c1) = self.stops[i + 1];
        let t = (value - d0) / (d1 - d0);
        c0.lerp(c1, t as f32)
    }
}
