// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! X domain merging.
//!
//! Every series declares its own x scale kind (and, for time data, a time
//! zone). A chart has a single x axis, so those declarations are reconciled
//! into one [`XDomain`]:
//!
//! - one distinct kind is used as is;
//! - mixing in [`ScaleKind::Ordinal`] makes the whole axis ordinal;
//! - any other mix of continuous kinds falls back to [`ScaleKind::Linear`].
//!
//! A single bar series is enough to make the domain a band scale.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::domain::{
    CustomDomain, Datum, Domain, DomainRange, Interval, ScaleKind, SeriesKind, XDomain,
};
use crate::error::{DomainBoundsError, DomainError, DomainShapeError, DomainTarget};

/// The time zone used when none is declared or declarations disagree.
pub const DEFAULT_TIME_ZONE: &str = "utc";

/// The x-related part of a series declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct XSeriesSpec {
    /// How the series is rendered.
    pub series_kind: SeriesKind,
    /// Declared x scale kind.
    pub x_scale_kind: ScaleKind,
    /// Declared time zone, meaningful for time scales only.
    pub time_zone: Option<String>,
}

impl XSeriesSpec {
    /// Creates a declaration without a time zone.
    pub fn new(series_kind: SeriesKind, x_scale_kind: ScaleKind) -> Self {
        Self {
            series_kind,
            x_scale_kind,
            time_zone: None,
        }
    }

    /// Sets the time zone.
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }
}

/// The outcome of reconciling the declared x scale kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XScaleResolution {
    /// Resolved scale kind.
    pub kind: ScaleKind,
    /// Whether any series is a bar series.
    pub is_band_scale: bool,
    /// Lower-cased time zone, for time scales only.
    pub time_zone: Option<String>,
}

/// Reconciles the x scale kinds and time zones of `specs`.
///
/// Returns `None` when there is nothing to reconcile.
pub fn convert_x_scale_types(specs: &[XSeriesSpec]) -> Option<XScaleResolution> {
    if specs.is_empty() {
        return None;
    }

    let mut kinds: SmallVec<[ScaleKind; 5]> = SmallVec::new();
    let mut zones: SmallVec<[String; 2]> = SmallVec::new();
    let mut is_band_scale = false;
    for spec in specs {
        is_band_scale |= spec.series_kind == SeriesKind::Bar;
        if !kinds.contains(&spec.x_scale_kind) {
            kinds.push(spec.x_scale_kind);
        }
        if let Some(zone) = &spec.time_zone {
            let zone = zone.to_lowercase();
            if !zones.contains(&zone) {
                zones.push(zone);
            }
        }
    }

    let kind = match kinds.as_slice() {
        [single] => *single,
        many if many.contains(&ScaleKind::Ordinal) => {
            tracing::debug!(?kinds, "mixed x scale kinds coerced to ordinal");
            ScaleKind::Ordinal
        }
        _ => {
            tracing::debug!(?kinds, "mixed continuous x scale kinds coerced to linear");
            ScaleKind::Linear
        }
    };

    let time_zone = (kind == ScaleKind::Time).then(|| match zones.as_slice() {
        [single] => single.clone(),
        [] => DEFAULT_TIME_ZONE.to_string(),
        _ => {
            tracing::debug!(?zones, "mixed time zones coerced to utc");
            DEFAULT_TIME_ZONE.to_string()
        }
    });

    Some(XScaleResolution {
        kind,
        is_band_scale,
        time_zone,
    })
}

/// Merges the x values of every series into a single [`XDomain`].
///
/// `x_values` may contain duplicates; they are collapsed in first-seen order.
/// A `custom_domain` must be [`CustomDomain::Values`] for an ordinal result
/// and [`CustomDomain::Range`] for a continuous one.
pub fn merge_x_domain(
    specs: &[XSeriesSpec],
    x_values: &[Datum],
    custom_domain: Option<&CustomDomain>,
) -> Result<XDomain, DomainError> {
    let XScaleResolution {
        kind,
        is_band_scale,
        time_zone,
    } = convert_x_scale_types(specs).ok_or(DomainError::MissingScaleKind)?;

    let distinct = distinct_values(x_values);

    let (domain, min_interval) = if kind == ScaleKind::Ordinal {
        let values = match custom_domain {
            None => distinct,
            Some(CustomDomain::Values(values)) => values.clone(),
            Some(CustomDomain::Range(_)) => return Err(DomainShapeError::RangeForOrdinal.into()),
        };
        (Domain::Ordinal(values), 0.0)
    } else {
        let numbers: Vec<f64> = distinct
            .iter()
            .filter_map(Datum::as_f64)
            .filter(|v| !v.is_nan())
            .collect();
        let computed = extent(&numbers).unwrap_or(Interval::new(0.0, 0.0));
        let computed_min_interval = find_min_interval(&numbers);

        let (interval, min_interval) = match custom_domain {
            None => (computed, computed_min_interval),
            Some(CustomDomain::Values(_)) => {
                return Err(DomainShapeError::ValuesForContinuous.into());
            }
            Some(CustomDomain::Range(range)) => {
                let interval = apply_custom_range(computed, range, &DomainTarget::X)?;
                let min_interval = range.min_interval.map_or(computed_min_interval, |custom| {
                    custom_min_interval(custom, computed_min_interval, numbers.len())
                });
                (interval, min_interval)
            }
        };
        (Domain::Continuous(interval), min_interval)
    };

    Ok(XDomain {
        kind,
        domain,
        is_band_scale,
        min_interval,
        time_zone,
    })
}

/// Validates a custom min interval, keeping the computed one when it is
/// negative or coarser than the data spacing of a multi-sample domain.
fn custom_min_interval(custom: f64, computed: f64, samples: usize) -> f64 {
    if custom < 0.0 {
        tracing::warn!(
            custom,
            computed,
            "custom xDomain is invalid, custom minInterval is less than 0. \
             Using computed minInterval."
        );
        computed
    } else if samples > 1 && custom > computed {
        tracing::warn!(
            custom,
            computed,
            "custom xDomain is invalid, custom minInterval is greater than computed minInterval. \
             Using computed minInterval."
        );
        computed
    } else {
        custom
    }
}

/// Applies a partial or complete custom range to a computed interval.
pub(crate) fn apply_custom_range(
    computed: Interval,
    range: &DomainRange,
    target: &DomainTarget,
) -> Result<Interval, DomainError> {
    let fail = |reason| Err(DomainError::bounds(target.clone(), reason));
    match (range.min, range.max) {
        (Some(min), Some(max)) if min > max => fail(DomainBoundsError::MinGreaterThanMax),
        (Some(min), Some(max)) => Ok(Interval::new(min, max)),
        (Some(min), None) if min > computed.max => {
            fail(DomainBoundsError::CustomMinAboveComputedMax)
        }
        (Some(min), None) => Ok(Interval::new(min, computed.max)),
        (None, Some(max)) if computed.min > max => {
            fail(DomainBoundsError::ComputedMinAboveCustomMax)
        }
        (None, Some(max)) => Ok(Interval::new(computed.min, max)),
        (None, None) => Ok(computed),
    }
}

/// Returns the smallest gap between the sorted `values`.
///
/// An empty input yields `0` and a single sample yields `1`.
pub fn find_min_interval(values: &[f64]) -> f64 {
    match values {
        [] => 0.0,
        [_] => 1.0,
        _ => {
            let mut sorted = values.to_vec();
            sorted.sort_by(f64::total_cmp);
            sorted
                .windows(2)
                .map(|w| (w[1] - w[0]).abs())
                .fold(f64::INFINITY, f64::min)
        }
    }
}

/// `[min, max]` of `values`, or `None` when empty.
pub(crate) fn extent(values: &[f64]) -> Option<Interval> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Some(Interval::new(min, max))
}

fn distinct_values(values: &[Datum]) -> Vec<Datum> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .iter()
        .filter(|v| seen.insert(*v))
        .cloned()
        .collect()
}
