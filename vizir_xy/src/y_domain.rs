// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Y domain merging, one domain per axis group.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::domain::{
    ContinuousKind, Datum, DomainRange, GroupId, Interval, SeriesId, SeriesKind, YDomain,
};
use crate::error::{DomainError, DomainTarget};
use crate::x_domain::{apply_custom_range, extent};

/// The y-related part of a series declaration, with its data.
#[derive(Clone, Debug, PartialEq)]
pub struct YSeriesSpec {
    /// Series id.
    pub id: SeriesId,
    /// Axis group the series is plotted against.
    pub group_id: GroupId,
    /// How the series is rendered.
    pub series_kind: SeriesKind,
    /// Declared y scale kind.
    pub y_scale_kind: ContinuousKind,
    /// Whether the series stacks on top of the group's other stacked series.
    pub stacked: bool,
    /// Whether the domain may exclude zero to fit the data.
    pub fit_to_extent: bool,
    /// Data series of this spec, as `(x, y)` points.
    pub layers: Vec<Vec<(Datum, f64)>>,
}

impl YSeriesSpec {
    /// Creates an unstacked linear declaration with no data.
    pub fn new(
        id: impl Into<SeriesId>,
        group_id: impl Into<GroupId>,
        series_kind: SeriesKind,
    ) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            series_kind,
            y_scale_kind: ContinuousKind::Linear,
            stacked: false,
            fit_to_extent: false,
            layers: Vec::new(),
        }
    }

    /// Sets the y scale kind.
    pub fn with_y_scale_kind(mut self, kind: ContinuousKind) -> Self {
        self.y_scale_kind = kind;
        self
    }

    /// Enables or disables stacking.
    pub fn with_stacked(mut self, stacked: bool) -> Self {
        self.stacked = stacked;
        self
    }

    /// Enables or disables fitting the domain to the data extent.
    pub fn with_fit_to_extent(mut self, fit: bool) -> Self {
        self.fit_to_extent = fit;
        self
    }

    /// Appends a data series.
    pub fn with_layer(mut self, points: impl IntoIterator<Item = (Datum, f64)>) -> Self {
        self.layers.push(points.into_iter().collect());
        self
    }
}

/// Resolves one y scale kind from the declared ones.
///
/// A single distinct kind is kept; none or several give [`ContinuousKind::Linear`].
pub fn coerce_y_scale_types(kinds: impl IntoIterator<Item = ContinuousKind>) -> ContinuousKind {
    let mut distinct: SmallVec<[ContinuousKind; 4]> = SmallVec::new();
    for kind in kinds {
        if !distinct.contains(&kind) {
            distinct.push(kind);
        }
    }
    match distinct.as_slice() {
        [single] => *single,
        [] => ContinuousKind::Linear,
        _ => {
            tracing::debug!(?distinct, "mixed y scale kinds coerced to linear");
            ContinuousKind::Linear
        }
    }
}

/// Merges the y values of every series into one domain per axis group.
///
/// Groups keep the order in which they first appear in `specs`.
pub fn merge_y_domain(
    specs: &[YSeriesSpec],
    custom_domains: &HashMap<GroupId, DomainRange>,
) -> Result<Vec<YDomain>, DomainError> {
    let mut groups: Vec<(&GroupId, Vec<&YSeriesSpec>)> = Vec::new();
    for spec in specs {
        match groups.iter_mut().find(|(id, _)| **id == spec.group_id) {
            Some((_, members)) => members.push(spec),
            None => groups.push((&spec.group_id, alloc::vec![spec])),
        }
    }

    groups
        .into_iter()
        .map(|(group_id, members)| -> Result<YDomain, DomainError> {
            let kind = coerce_y_scale_types(members.iter().map(|s| s.y_scale_kind));
            let values = group_values(&members);
            let fit = members.iter().all(|s| s.fit_to_extent);
            let mut domain = extent(&values).unwrap_or(Interval::new(0.0, 0.0));
            if !fit {
                domain = Interval::new(domain.min.min(0.0), domain.max.max(0.0));
            }
            if let Some(range) = custom_domains.get(group_id) {
                domain = apply_custom_range(domain, range, &DomainTarget::Y(group_id.clone()))?;
            }
            Ok(YDomain {
                group_id: group_id.clone(),
                kind,
                domain,
                is_band_scale: false,
            })
        })
        .collect()
}

/// Every layer value, plus the per-x sums of the stacked layers.
fn group_values(members: &[&YSeriesSpec]) -> Vec<f64> {
    let mut values = Vec::new();
    let mut sums: HashMap<&Datum, f64> = HashMap::new();
    for spec in members {
        for (x, y) in spec.layers.iter().flatten() {
            if y.is_nan() {
                continue;
            }
            values.push(*y);
            if spec.stacked {
                *sums.entry(x).or_insert(0.0) += *y;
            }
        }
    }
    values.extend(sums.into_values());
    values
}
