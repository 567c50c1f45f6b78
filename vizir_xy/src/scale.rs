// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales: data space to pixel space and back.
//!
//! A [`Scale`] is either continuous (linear, log, sqrt, time) or banded
//! (ordinal). Scales are immutable once constructed; tick values are computed
//! up front. Use [`compute_x_scale`] and [`compute_y_scales`] to build scales
//! from merged domains.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chrono::FixedOffset;
use hashbrown::HashMap;

#[cfg(all(not(feature = "std"), not(test)))]
use crate::float::FloatExt;

use crate::domain::{
    ContinuousKind, Datum, Domain, GroupId, Interval, ScaleKind, XDomain, YDomain,
};
use crate::ticks::{self, DEFAULT_TICK_COUNT, LogTransform};
use crate::time::{self, resolve_time_zone};
use crate::x_domain::DEFAULT_TIME_ZONE;

/// Upper bound on `min_interval` ticks before falling back to nice ticks.
const MAX_INTERVAL_TICKS: f64 = 10_000.0;

/// How [`ScaleContinuous::invert_with_step`] snaps a value to the
/// `min_interval` grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StepPolicy {
    /// `floor`: a grid point owns the interval that follows it.
    StepAfter,
    /// `ceil`: a grid point owns the interval that precedes it.
    StepBefore,
    /// Nearest grid point counted from the domain start; exact halves round down.
    #[default]
    Step,
}

/// Construction options for a [`ScaleContinuous`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleOptions {
    /// Pixel width reserved per data point before padding.
    pub bandwidth: f64,
    /// Data-space step between samples (0 when irregular or unknown).
    pub min_interval: f64,
    /// Time zone used for time ticks.
    pub time_zone: String,
    /// Number of bar series sharing one band.
    pub bars_in_cluster: usize,
    /// Fraction of the bandwidth kept free around each band, clamped to `[0, 1]`.
    pub bars_padding: f64,
    /// Desired number of ticks.
    pub tick_count: usize,
    /// Whether to extend the domain to nice round values (never for time).
    pub nice: bool,
    /// Base of log scales.
    pub log_base: f64,
    /// Floor on the magnitude of log domain endpoints (see [`limit_log_domain`]).
    pub log_min_limit: Option<f64>,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            bandwidth: 0.0,
            min_interval: 0.0,
            time_zone: String::from(DEFAULT_TIME_ZONE),
            bars_in_cluster: 1,
            bars_padding: 0.0,
            tick_count: DEFAULT_TICK_COUNT,
            nice: false,
            log_base: 10.0,
            log_min_limit: None,
        }
    }
}

impl ScaleOptions {
    /// Default options: no bandwidth, UTC, ten ticks, base-10 logs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bandwidth.
    pub fn with_bandwidth(mut self, bandwidth: f64) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    /// Sets the min interval.
    pub fn with_min_interval(mut self, min_interval: f64) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Sets the time zone.
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = time_zone.into();
        self
    }

    /// Sets the number of bars per cluster.
    pub fn with_bars_in_cluster(mut self, bars_in_cluster: usize) -> Self {
        self.bars_in_cluster = bars_in_cluster;
        self
    }

    /// Sets the bars padding.
    pub fn with_bars_padding(mut self, bars_padding: f64) -> Self {
        self.bars_padding = bars_padding;
        self
    }

    /// Sets the desired tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Enables or disables nice domains.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Sets the log base.
    pub fn with_log_base(mut self, log_base: f64) -> Self {
        self.log_base = log_base;
        self
    }

    /// Sets the log domain floor; its sign is ignored.
    pub fn with_log_min_limit(mut self, log_min_limit: f64) -> Self {
        self.log_min_limit = Some(log_min_limit);
        self
    }
}

/// Smallest magnitude a log domain endpoint falls back to.
const LOG_MIN_ABS_DOMAIN: f64 = 1.0;

/// Keeps a log domain away from zero.
///
/// Zero and sign-straddling endpoints are replaced with `±limit`, where
/// `limit` is `|log_min_limit|` when given and positive, else `1`. The
/// endpoint with the smaller magnitude is the one replaced; the other is kept
/// exactly. With a positive `log_min_limit`, endpoints closer to zero than the
/// limit are also raised to it.
pub fn limit_log_domain(domain: Interval, log_min_limit: Option<f64>) -> Interval {
    let (min, max) = domain.as_tuple();
    let abs_limit = log_min_limit.map(f64::abs).filter(|l| *l > 0.0);
    if let Some(limit) = abs_limit {
        if min > 0.0 && min < limit {
            return Interval::new(limit, max.max(limit));
        }
        if max < 0.0 && max > -limit {
            return Interval::new(min.min(-limit), -limit);
        }
    }

    let limit = abs_limit.unwrap_or(LOG_MIN_ABS_DOMAIN);
    let toward = |v: f64| if v < 0.0 { -limit } else { limit };
    if min == 0.0 && max == 0.0 {
        return Interval::new(limit, limit);
    }
    if min == 0.0 {
        return Interval::new(toward(max), max);
    }
    if max == 0.0 {
        return Interval::new(min, toward(min));
    }
    if min < 0.0 && max > 0.0 {
        if max.abs() >= min.abs() {
            Interval::new(limit, max)
        } else {
            Interval::new(min, -limit)
        }
    } else if min > 0.0 && max < 0.0 {
        if min.abs() >= max.abs() {
            Interval::new(min, limit)
        } else {
            Interval::new(-limit, max)
        }
    } else {
        domain
    }
}

/// The result of a data-aware inversion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvertedValue {
    /// The matched or extrapolated data value.
    pub value: f64,
    /// Whether the pixel fell on a data point's band.
    pub within_bandwidth: bool,
}

/// A continuous scale (linear, log, sqrt or time).
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleContinuous {
    kind: ContinuousKind,
    domain: Interval,
    range: (f64, f64),
    bandwidth: f64,
    bandwidth_padding: f64,
    bars_padding: f64,
    bars_in_cluster: usize,
    min_interval: f64,
    time_zone: FixedOffset,
    log_base: f64,
    tick_values: Vec<f64>,
}

impl ScaleContinuous {
    /// Creates a scale mapping `domain` onto the pixel `range`.
    ///
    /// Log domains are passed through [`limit_log_domain`] first.
    pub fn new(
        kind: ContinuousKind,
        domain: Interval,
        range: (f64, f64),
        options: &ScaleOptions,
    ) -> Self {
        let log_base = if options.log_base > 0.0 && options.log_base != 1.0 {
            options.log_base
        } else {
            10.0
        };
        let mut domain = if kind == ContinuousKind::Log {
            limit_log_domain(domain, options.log_min_limit)
        } else {
            domain
        };
        if options.nice {
            domain = match kind {
                ContinuousKind::Linear | ContinuousKind::Sqrt => {
                    ticks::nice_linear(domain, options.tick_count)
                }
                ContinuousKind::Log => ticks::nice_log(domain, log_base),
                ContinuousKind::Time => domain,
            };
        }

        let bars_padding = options.bars_padding.clamp(0.0, 1.0);
        let time_zone = resolve_time_zone(&options.time_zone);
        let mut scale = Self {
            kind,
            domain,
            range,
            bandwidth: options.bandwidth * (1.0 - bars_padding),
            bandwidth_padding: options.bandwidth * bars_padding,
            bars_padding,
            bars_in_cluster: options.bars_in_cluster,
            min_interval: options.min_interval,
            time_zone,
            log_base,
            tick_values: Vec::new(),
        };
        scale.tick_values = scale.compute_ticks(options.tick_count);
        scale
    }

    fn compute_ticks(&self, count: usize) -> Vec<f64> {
        let Interval { min, max } = self.domain;
        match self.kind {
            ContinuousKind::Time => time::time_ticks_in_zone(self.domain, self.time_zone, count),
            _ if self.min_interval > 0.0 => {
                let intervals = ((max - min) / self.min_interval).floor();
                if intervals >= 0.0 && intervals <= MAX_INTERVAL_TICKS {
                    #[allow(clippy::cast_possible_truncation, reason = "bounded above")]
                    let n = intervals as usize;
                    (0..=n).map(|i| min + i as f64 * self.min_interval).collect()
                } else {
                    tracing::debug!(
                        min_interval = self.min_interval,
                        "min interval ticks unavailable for this domain, using nice ticks"
                    );
                    self.nice_ticks(count)
                }
            }
            _ => self.nice_ticks(count),
        }
    }

    fn nice_ticks(&self, count: usize) -> Vec<f64> {
        match self.kind {
            ContinuousKind::Log => ticks::log_ticks(self.domain, self.log_base, count),
            _ => ticks::ticks(self.domain.min, self.domain.max, count),
        }
    }

    fn transform(&self, x: f64) -> f64 {
        match self.kind {
            ContinuousKind::Linear | ContinuousKind::Time => x,
            ContinuousKind::Sqrt if x < 0.0 => -(-x).sqrt(),
            ContinuousKind::Sqrt => x.sqrt(),
            ContinuousKind::Log => LogTransform::new(self.log_base, self.domain).log(x),
        }
    }

    fn untransform(&self, y: f64) -> f64 {
        match self.kind {
            ContinuousKind::Linear | ContinuousKind::Time => y,
            ContinuousKind::Sqrt if y < 0.0 => -(y * y),
            ContinuousKind::Sqrt => y * y,
            ContinuousKind::Log => LogTransform::new(self.log_base, self.domain).pow(y),
        }
    }

    /// The underlying map, without band padding.
    fn map(&self, x: f64) -> f64 {
        let t0 = self.transform(self.domain.min);
        let t1 = self.transform(self.domain.max);
        let (r0, r1) = self.range;
        let denom = t1 - t0;
        let t = if denom == 0.0 {
            0.5
        } else {
            (self.transform(x) - t0) / denom
        };
        r0 + t * (r1 - r0)
    }

    /// Maps a data value to a pixel, or `None` if it has no pixel.
    ///
    /// Banded scales shift by half the cluster's padding.
    pub fn scale(&self, value: f64) -> Option<f64> {
        if value.is_nan() {
            return None;
        }
        let px = self.map(value);
        if px.is_nan() {
            return None;
        }
        Some(px + self.bandwidth_padding / 2.0 * self.bars_in_cluster as f64)
    }

    /// Maps a pixel back to a data value (a millisecond timestamp for time).
    pub fn invert(&self, px: f64) -> f64 {
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        let u = if denom == 0.0 { 0.5 } else { (px - r0) / denom };
        let t0 = self.transform(self.domain.min);
        let t1 = self.transform(self.domain.max);
        self.untransform(t0 + u * (t1 - t0))
    }

    /// Inverts `px` and snaps the result to the `min_interval` grid.
    ///
    /// Banded scales always use [`StepPolicy::StepAfter`]. Without a min
    /// interval the raw inverted value is returned.
    pub fn invert_with_step(&self, px: f64, policy: StepPolicy) -> f64 {
        let raw = self.invert(px);
        let step = self.min_interval;
        if !(step > 0.0) {
            return raw;
        }
        let policy = if self.bandwidth > 0.0 {
            StepPolicy::StepAfter
        } else {
            policy
        };
        match policy {
            StepPolicy::StepAfter => (raw / step).floor() * step,
            StepPolicy::StepBefore => (raw / step).ceil() * step,
            StepPolicy::Step => {
                let base = self.domain.min;
                let steps = (raw - base) / step;
                let whole = steps.floor();
                let up = if steps - whole > 0.5 { 1.0 } else { 0.0 };
                base + (whole + up) * step
            }
        }
    }

    /// Inverts `px` and snaps it to the nearest sample in sorted `data`.
    ///
    /// Pixels before the first sample are extrapolated back by whole
    /// `min_interval`s and reported as outside any band. Returns `None` for
    /// empty data.
    pub fn invert_with_data(&self, px: f64, data: &[f64]) -> Option<InvertedValue> {
        let first = *data.first()?;
        let inverted = self.invert(px);
        let probe = if self.bandwidth == 0.0 {
            inverted + self.min_interval / 2.0
        } else {
            inverted
        };
        let left = data.partition_point(|v| *v < probe);

        if left == 0 {
            if inverted < first {
                let back = if self.min_interval > 0.0 {
                    self.min_interval * ((first - inverted) / self.min_interval).ceil()
                } else {
                    0.0
                };
                return Some(InvertedValue {
                    value: first - back,
                    within_bandwidth: false,
                });
            }
            return Some(InvertedValue {
                value: first,
                within_bandwidth: true,
            });
        }

        let current = data[left - 1];
        if self.min_interval == 0.0 {
            let value = match data.get(left) {
                Some(next) if (next - inverted).abs() <= (inverted - current).abs() => *next,
                _ => current,
            };
            return Some(InvertedValue {
                value,
                within_bandwidth: true,
            });
        }
        if inverted - current <= self.min_interval {
            return Some(InvertedValue {
                value: current,
                within_bandwidth: true,
            });
        }
        Some(InvertedValue {
            value: current
                + self.min_interval * ((inverted - current) / self.min_interval).floor(),
            within_bandwidth: false,
        })
    }

    /// Tick values, in domain order.
    pub fn ticks(&self) -> &[f64] {
        &self.tick_values
    }

    /// The scale kind.
    pub fn kind(&self) -> ContinuousKind {
        self.kind
    }

    /// The effective domain (after log limiting and `nice`).
    pub fn domain(&self) -> Interval {
        self.domain
    }

    /// The pixel range, possibly decreasing.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Pixel width of one bar after padding.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Pixel padding reserved around each bar.
    pub fn bandwidth_padding(&self) -> f64 {
        self.bandwidth_padding
    }

    /// The clamped bars padding fraction.
    pub fn bars_padding(&self) -> f64 {
        self.bars_padding
    }

    /// Number of bar series per cluster.
    pub fn bars_in_cluster(&self) -> usize {
        self.bars_in_cluster
    }

    /// Data-space step between samples.
    pub fn min_interval(&self) -> f64 {
        self.min_interval
    }

    /// The resolved time zone.
    pub fn time_zone(&self) -> FixedOffset {
        self.time_zone
    }

    /// The log base (meaningful for log scales only).
    pub fn log_base(&self) -> f64 {
        self.log_base
    }

    /// Whether the domain runs from a larger to a smaller value.
    ///
    /// Informational: mapping already follows the endpoint order.
    pub fn is_inverted(&self) -> bool {
        self.domain.is_inverted()
    }

    /// Whether both domain endpoints coincide.
    pub fn is_single_value(&self) -> bool {
        self.domain.min == self.domain.max
    }

    /// Whether `value` lies within the domain.
    pub fn is_value_in_domain(&self, value: f64) -> bool {
        self.domain.contains(value)
    }
}

/// Inner and outer padding of a band scale, as fractions of a step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandPadding {
    /// Space between bands.
    pub inner: f64,
    /// Space before the first and after the last band.
    pub outer: f64,
}

impl BandPadding {
    /// Creates padding from its inner and outer fractions.
    pub fn new(inner: f64, outer: f64) -> Self {
        Self { inner, outer }
    }
}

/// A banded scale over discrete keys.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBand {
    domain: Vec<Datum>,
    index: HashMap<Datum, usize>,
    range: (f64, f64),
    positions: Vec<f64>,
    step: f64,
    bandwidth: f64,
    original_bandwidth: f64,
    bars_padding: f64,
}

impl ScaleBand {
    /// Creates a band scale over `domain` (duplicates are dropped).
    ///
    /// With `round`, step and band positions are snapped to whole pixels.
    /// `override_bandwidth` replaces the computed bandwidth afterwards.
    pub fn new(
        domain: &[Datum],
        range: (f64, f64),
        padding: BandPadding,
        round: bool,
        override_bandwidth: Option<f64>,
    ) -> Self {
        let mut index = HashMap::with_capacity(domain.len());
        let mut keys = Vec::with_capacity(domain.len());
        for key in domain {
            if !index.contains_key(key) {
                index.insert(key.clone(), keys.len());
                keys.push(key.clone());
            }
        }

        let inner = padding.inner.clamp(0.0, 1.0);
        let outer = padding.outer.max(0.0);
        let n = keys.len() as f64;
        let (r0, r1) = range;
        let reverse = r1 < r0;
        let (start, stop) = if reverse { (r1, r0) } else { (r0, r1) };
        let mut step = (stop - start) / (n - inner + outer * 2.0).max(1.0);
        if round {
            step = step.floor();
        }
        let mut first = start + (stop - start - step * (n - inner)) * 0.5;
        let mut bandwidth = step * (1.0 - inner);
        if round {
            first = first.round();
            bandwidth = bandwidth.round();
        }
        let mut positions: Vec<f64> = (0..keys.len()).map(|i| first + step * i as f64).collect();
        if reverse {
            positions.reverse();
        }

        let original_bandwidth = bandwidth;
        if let Some(w) = override_bandwidth.filter(|w| *w > 0.0) {
            bandwidth = w * (1.0 - inner);
        }

        Self {
            domain: keys,
            index,
            range,
            positions,
            step,
            bandwidth,
            original_bandwidth,
            bars_padding: inner,
        }
    }

    /// The bar-chart layout: inner padding `p`, outer padding `p / 2`.
    pub fn with_bars_padding(
        domain: &[Datum],
        range: (f64, f64),
        override_bandwidth: Option<f64>,
        bars_padding: f64,
    ) -> Self {
        let p = bars_padding.clamp(0.0, 1.0);
        Self::new(domain, range, BandPadding::new(p, p / 2.0), false, override_bandwidth)
    }

    /// Start pixel of the band of `value`, or `None` if not in the domain.
    pub fn scale(&self, value: &Datum) -> Option<f64> {
        self.index.get(value).map(|&i| self.positions[i])
    }

    /// The key whose quantile bucket of the range contains `px`.
    pub fn invert(&self, px: f64) -> Option<Datum> {
        let n = self.domain.len();
        if n == 0 || px.is_nan() {
            return None;
        }
        let (r0, r1) = self.range;
        let span = r1 - r0;
        let u = if span == 0.0 { 0.0 } else { (px - r0) / span };
        let bucket = (u * n as f64).floor().clamp(0.0, (n - 1) as f64);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to a valid index")]
        let i = bucket as usize;
        self.domain.get(i).cloned()
    }

    /// Identical to [`ScaleBand::invert`]: bands have no sub-steps.
    pub fn invert_with_step(&self, px: f64) -> Option<Datum> {
        self.invert(px)
    }

    /// The domain keys, which are also the ticks.
    pub fn ticks(&self) -> &[Datum] {
        &self.domain
    }

    /// The distinct domain keys in order.
    pub fn domain(&self) -> &[Datum] {
        &self.domain
    }

    /// The pixel range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Effective band width.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Band width before any override.
    pub fn original_bandwidth(&self) -> f64 {
        self.original_bandwidth
    }

    /// Distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The inner padding fraction.
    pub fn bars_padding(&self) -> f64 {
        self.bars_padding
    }

    /// Whether the domain has fewer than two keys.
    pub fn is_single_value(&self) -> bool {
        self.domain.len() < 2
    }

    /// Whether `value` is one of the keys.
    pub fn is_value_in_domain(&self, value: &Datum) -> bool {
        self.index.contains_key(value)
    }
}

/// Any scale.
#[derive(Clone, Debug, PartialEq)]
pub enum Scale {
    /// Linear, log, sqrt or time.
    Continuous(ScaleContinuous),
    /// Ordinal bands.
    Band(ScaleBand),
}

impl From<ScaleContinuous> for Scale {
    fn from(value: ScaleContinuous) -> Self {
        Self::Continuous(value)
    }
}

impl From<ScaleBand> for Scale {
    fn from(value: ScaleBand) -> Self {
        Self::Band(value)
    }
}

impl Scale {
    /// The scale kind.
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Continuous(s) => s.kind().into(),
            Self::Band(_) => ScaleKind::Ordinal,
        }
    }

    /// Maps `value` to a pixel; `None` for values the scale cannot place.
    pub fn scale(&self, value: &Datum) -> Option<f64> {
        match self {
            Self::Continuous(s) => value.as_f64().and_then(|v| s.scale(v)),
            Self::Band(s) => s.scale(value),
        }
    }

    /// Maps a pixel back into the domain.
    pub fn invert(&self, px: f64) -> Option<Datum> {
        match self {
            Self::Continuous(s) => Some(Datum::Number(s.invert(px))),
            Self::Band(s) => s.invert(px),
        }
    }

    /// Maps a pixel back into the domain, snapped per `policy`.
    pub fn invert_with_step(&self, px: f64, policy: StepPolicy) -> Option<Datum> {
        match self {
            Self::Continuous(s) => Some(Datum::Number(s.invert_with_step(px, policy))),
            Self::Band(s) => s.invert_with_step(px),
        }
    }

    /// Tick values.
    pub fn ticks(&self) -> Vec<Datum> {
        match self {
            Self::Continuous(s) => s.ticks().iter().copied().map(Datum::Number).collect(),
            Self::Band(s) => s.ticks().to_vec(),
        }
    }

    /// The domain.
    pub fn domain(&self) -> Domain {
        match self {
            Self::Continuous(s) => Domain::Continuous(s.domain()),
            Self::Band(s) => Domain::Ordinal(s.domain().to_vec()),
        }
    }

    /// The pixel range.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Continuous(s) => s.range(),
            Self::Band(s) => s.range(),
        }
    }

    /// Effective band width (0 for unbanded continuous scales).
    pub fn bandwidth(&self) -> f64 {
        match self {
            Self::Continuous(s) => s.bandwidth(),
            Self::Band(s) => s.bandwidth(),
        }
    }

    /// The clamped bars padding fraction.
    pub fn bars_padding(&self) -> f64 {
        match self {
            Self::Continuous(s) => s.bars_padding(),
            Self::Band(s) => s.bars_padding(),
        }
    }

    /// Data-space step between samples (0 for bands).
    pub fn min_interval(&self) -> f64 {
        match self {
            Self::Continuous(s) => s.min_interval(),
            Self::Band(_) => 0.0,
        }
    }

    /// Whether the domain collapses to a single value.
    pub fn is_single_value(&self) -> bool {
        match self {
            Self::Continuous(s) => s.is_single_value(),
            Self::Band(s) => s.is_single_value(),
        }
    }

    /// Whether `value` belongs to the domain.
    pub fn is_value_in_domain(&self, value: &Datum) -> bool {
        match self {
            Self::Continuous(s) => value.as_f64().is_some_and(|v| s.is_value_in_domain(v)),
            Self::Band(s) => s.is_value_in_domain(value),
        }
    }

    /// The continuous scale, if this is one.
    pub fn as_continuous(&self) -> Option<&ScaleContinuous> {
        match self {
            Self::Continuous(s) => Some(s),
            Self::Band(_) => None,
        }
    }

    /// The band scale, if this is one.
    pub fn as_band(&self) -> Option<&ScaleBand> {
        match self {
            Self::Continuous(_) => None,
            Self::Band(s) => Some(s),
        }
    }
}

/// Builds the x scale for a merged domain over `[min_range, max_range]`.
///
/// - Ordinal domains get a band scale whose bandwidth is one cluster slot.
/// - Band-scaled continuous domains reserve one band per `min_interval`,
///   shortening the range by one band at its far end.
/// - Anything else is a plain continuous scale.
pub fn compute_x_scale(
    x_domain: &XDomain,
    total_bars_in_cluster: usize,
    min_range: f64,
    max_range: f64,
    bars_padding: f64,
) -> Scale {
    compute_x_scale_with_tick_count(
        x_domain,
        total_bars_in_cluster,
        min_range,
        max_range,
        bars_padding,
        DEFAULT_TICK_COUNT,
    )
}

/// [`compute_x_scale`] with an explicit desired tick count.
pub fn compute_x_scale_with_tick_count(
    x_domain: &XDomain,
    total_bars_in_cluster: usize,
    min_range: f64,
    max_range: f64,
    bars_padding: f64,
    tick_count: usize,
) -> Scale {
    let range_diff = (max_range - min_range).abs();
    let is_inverse = max_range < min_range;
    let bars = total_bars_in_cluster.max(1) as f64;
    let time_zone = x_domain
        .time_zone
        .clone()
        .unwrap_or_else(|| String::from(DEFAULT_TIME_ZONE));

    match (&x_domain.domain, x_domain.kind.continuous()) {
        (Domain::Continuous(interval), Some(kind)) => {
            let options = ScaleOptions::new()
                .with_min_interval(x_domain.min_interval)
                .with_time_zone(time_zone)
                .with_bars_in_cluster(total_bars_in_cluster)
                .with_bars_padding(bars_padding)
                .with_tick_count(tick_count);
            if x_domain.is_band_scale {
                let intervals = if x_domain.min_interval > 0.0 {
                    interval.span() / x_domain.min_interval
                } else {
                    0.0
                };
                let bandwidth = range_diff / (intervals + 1.0);
                let range = if is_inverse {
                    (min_range - bandwidth, max_range)
                } else {
                    (min_range, max_range - bandwidth)
                };
                let options = options.with_bandwidth(bandwidth / bars);
                ScaleContinuous::new(kind, *interval, range, &options).into()
            } else {
                ScaleContinuous::new(kind, *interval, (min_range, max_range), &options).into()
            }
        }
        (Domain::Ordinal(values), _) => {
            let len = values.len().max(1) as f64;
            let bandwidth = range_diff / (len * bars);
            ScaleBand::with_bars_padding(
                values,
                (min_range, max_range),
                Some(bandwidth),
                bars_padding,
            )
            .into()
        }
        (Domain::Continuous(interval), None) => {
            tracing::warn!(?interval, "ordinal x kind with a continuous domain");
            let values = [Datum::Number(interval.min), Datum::Number(interval.max)];
            ScaleBand::with_bars_padding(&values, (min_range, max_range), None, bars_padding).into()
        }
    }
}

/// Builds one continuous scale per y domain over `[min_range, max_range]`.
pub fn compute_y_scales(
    y_domains: &[YDomain],
    min_range: f64,
    max_range: f64,
) -> HashMap<GroupId, ScaleContinuous> {
    compute_y_scales_with_tick_count(y_domains, min_range, max_range, DEFAULT_TICK_COUNT)
}

/// [`compute_y_scales`] with an explicit desired tick count.
pub fn compute_y_scales_with_tick_count(
    y_domains: &[YDomain],
    min_range: f64,
    max_range: f64,
    tick_count: usize,
) -> HashMap<GroupId, ScaleContinuous> {
    let options = ScaleOptions::new().with_tick_count(tick_count);
    y_domains
        .iter()
        .map(|y| {
            let scale = ScaleContinuous::new(y.kind, y.domain, (min_range, max_range), &options);
            (y.group_id.clone(), scale)
        })
        .collect()
}
