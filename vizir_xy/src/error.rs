// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while merging domains.

use core::fmt;

use crate::domain::GroupId;

/// Failure to merge series declarations into a domain.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// No series, or no series declared an x scale kind.
    #[error("Cannot merge the domain. Missing X scale types")]
    MissingScaleKind,
    /// A custom domain had the wrong shape for the resolved scale kind.
    #[error(transparent)]
    InvalidCustomDomainShape(#[from] DomainShapeError),
    /// A custom domain bound conflicts with the other bound or the data.
    #[error("custom {target} is invalid, {reason}")]
    InvalidCustomDomainBounds {
        /// Which domain was being overridden.
        target: DomainTarget,
        /// Which bound check failed.
        reason: DomainBoundsError,
    },
}

/// Shape mismatch between a custom domain and the scale kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DomainShapeError {
    /// A min/max range was supplied for an ordinal scale.
    #[error("xDomain for ordinal scale should be an array of values, not a DomainRange object")]
    RangeForOrdinal,
    /// An explicit value list was supplied for a continuous scale.
    #[error("xDomain for continuous scale should be a DomainRange object, not an array")]
    ValuesForContinuous,
}

/// The bound check a custom domain failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DomainBoundsError {
    /// Both bounds given and `min > max`.
    #[error("min is greater than max")]
    MinGreaterThanMax,
    /// Only `min` given and it exceeds the data maximum.
    #[error("custom min is greater than computed max")]
    CustomMinAboveComputedMax,
    /// Only `max` given and the data minimum exceeds it.
    #[error("computed min is greater than custom max")]
    ComputedMinAboveCustomMax,
}

/// Names the domain an error refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainTarget {
    /// The chart's x domain.
    X,
    /// The y domain of one axis group.
    Y(GroupId),
}

impl fmt::Display for DomainTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("xDomain"),
            Self::Y(group) => write!(f, "yDomain for {group}"),
        }
    }
}

impl DomainError {
    pub(crate) fn bounds(target: DomainTarget, reason: DomainBoundsError) -> Self {
        Self::InvalidCustomDomainBounds { target, reason }
    }
}
