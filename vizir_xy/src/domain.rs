// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Domain primitives shared by the mergers, scales, axes and bar geometry.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

/// A single domain value: a number (continuous or ordinal) or a text key.
///
/// Equality and hashing are total so values can key ordinal domains: numbers
/// compare by bit pattern with `-0.0` folded into `0.0` and every `NaN` equal
/// to every other `NaN`.
#[derive(Clone, Debug)]
pub enum Datum {
    /// A numeric value (timestamps are milliseconds).
    Number(f64),
    /// A discrete text key.
    Text(Arc<str>),
}

impl Datum {
    /// Returns the numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// Returns the text key, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(s) => Some(s),
        }
    }

    fn canonical_bits(v: f64) -> u64 {
        if v.is_nan() {
            f64::NAN.to_bits()
        } else if v == 0.0 {
            0.0_f64.to_bits()
        } else {
            v.to_bits()
        }
    }
}

impl PartialEq for Datum {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => {
                Self::canonical_bits(*a) == Self::canonical_bits(*b)
            }
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Datum {}

impl Hash for Datum {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Number(v) => {
                0_u8.hash(state);
                Self::canonical_bits(*v).hash(state);
            }
            Self::Text(s) => {
                1_u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) if *v == 0.0 => f.write_str("0"),
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Datum {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Datum {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Datum {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for Datum {
    fn from(value: String) -> Self {
        Self::Text(value.into())
    }
}

impl From<Arc<str>> for Datum {
    fn from(value: Arc<str>) -> Self {
        Self::Text(value)
    }
}

/// A `[min, max]` pair of a continuous domain.
///
/// `min > max` is allowed and describes an inverted axis; nothing here
/// reorders the endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    /// First endpoint.
    pub min: f64,
    /// Second endpoint.
    pub max: f64,
}

impl Interval {
    /// Creates an interval from its endpoints, as given.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `max - min`, negative for inverted intervals.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether the first endpoint is greater than the second.
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    /// Whether `value` lies between the endpoints (inclusive, either order).
    pub fn contains(&self, value: f64) -> bool {
        let (lo, hi) = if self.is_inverted() {
            (self.max, self.min)
        } else {
            (self.min, self.max)
        };
        value >= lo && value <= hi
    }

    /// Returns the endpoints as a tuple.
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

impl From<(f64, f64)> for Interval {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

/// The data values an axis represents.
#[derive(Clone, Debug, PartialEq)]
pub enum Domain {
    /// A numeric interval (linear, log, sqrt and time kinds).
    Continuous(Interval),
    /// An ordered sequence of distinct keys (ordinal kind).
    Ordinal(Vec<Datum>),
}

impl Domain {
    /// Returns the interval of a continuous domain.
    pub fn as_interval(&self) -> Option<Interval> {
        match self {
            Self::Continuous(i) => Some(*i),
            Self::Ordinal(_) => None,
        }
    }

    /// Returns the keys of an ordinal domain.
    pub fn as_values(&self) -> Option<&[Datum]> {
        match self {
            Self::Continuous(_) => None,
            Self::Ordinal(v) => Some(v),
        }
    }
}

/// Scale kind tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    /// Linear continuous scale.
    Linear,
    /// Logarithmic continuous scale.
    Log,
    /// Square-root continuous scale.
    Sqrt,
    /// Time scale over millisecond timestamps.
    Time,
    /// Discrete, banded scale.
    Ordinal,
}

impl ScaleKind {
    /// Returns the continuous kind, or `None` for [`ScaleKind::Ordinal`].
    pub fn continuous(self) -> Option<ContinuousKind> {
        match self {
            Self::Linear => Some(ContinuousKind::Linear),
            Self::Log => Some(ContinuousKind::Log),
            Self::Sqrt => Some(ContinuousKind::Sqrt),
            Self::Time => Some(ContinuousKind::Time),
            Self::Ordinal => None,
        }
    }

    /// Whether this is one of the continuous kinds.
    pub fn is_continuous(self) -> bool {
        self != Self::Ordinal
    }
}

/// The continuous subset of [`ScaleKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContinuousKind {
    /// Linear.
    Linear,
    /// Logarithmic.
    Log,
    /// Square root.
    Sqrt,
    /// Millisecond timestamps with calendar ticks.
    Time,
}

impl From<ContinuousKind> for ScaleKind {
    fn from(value: ContinuousKind) -> Self {
        match value {
            ContinuousKind::Linear => Self::Linear,
            ContinuousKind::Log => Self::Log,
            ContinuousKind::Sqrt => Self::Sqrt,
            ContinuousKind::Time => Self::Time,
        }
    }
}

/// How a series is rendered. Only bars reserve per-point width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    /// Bars (band geometry).
    Bar,
    /// Lines.
    Line,
    /// Filled areas.
    Area,
    /// Scattered points.
    Point,
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            /// Creates an id from a string.
            pub fn new(id: impl Into<Arc<str>>) -> Self {
                Self(id.into())
            }

            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifies an axis group: the series sharing one y axis.
    GroupId
);
string_id!(
    /// Identifies a series specification.
    SeriesId
);
string_id!(
    /// Identifies an axis specification.
    AxisId
);

/// A partial or complete custom bound for a continuous domain.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DomainRange {
    /// Lower bound override.
    pub min: Option<f64>,
    /// Upper bound override.
    pub max: Option<f64>,
    /// Override for the computed min interval (x domains only).
    pub min_interval: Option<f64>,
}

impl DomainRange {
    /// A complete `[min, max]` override.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            min_interval: None,
        }
    }

    /// A lower bound only.
    pub fn lower(min: f64) -> Self {
        Self {
            min: Some(min),
            ..Self::default()
        }
    }

    /// An upper bound only.
    pub fn upper(max: f64) -> Self {
        Self {
            max: Some(max),
            ..Self::default()
        }
    }

    /// Sets the min interval override.
    pub fn with_min_interval(mut self, min_interval: f64) -> Self {
        self.min_interval = Some(min_interval);
        self
    }
}

/// A caller-supplied domain override.
#[derive(Clone, Debug, PartialEq)]
pub enum CustomDomain {
    /// Min/max bounds, for continuous scales.
    Range(DomainRange),
    /// An explicit ordered key list, for ordinal scales.
    Values(Vec<Datum>),
}

impl From<DomainRange> for CustomDomain {
    fn from(value: DomainRange) -> Self {
        Self::Range(value)
    }
}

impl From<Vec<Datum>> for CustomDomain {
    fn from(value: Vec<Datum>) -> Self {
        Self::Values(value)
    }
}

/// The merged x domain of a chart.
#[derive(Clone, Debug, PartialEq)]
pub struct XDomain {
    /// Resolved scale kind.
    pub kind: ScaleKind,
    /// Resolved domain.
    pub domain: Domain,
    /// True when any contributing series is a bar series.
    pub is_band_scale: bool,
    /// Smallest gap between consecutive numeric samples (0 for ordinal).
    pub min_interval: f64,
    /// Time zone of a time domain, `None` for the other kinds.
    pub time_zone: Option<String>,
}

/// The merged y domain of one axis group.
#[derive(Clone, Debug, PartialEq)]
pub struct YDomain {
    /// The axis group.
    pub group_id: GroupId,
    /// Resolved scale kind.
    pub kind: ContinuousKind,
    /// Resolved domain.
    pub domain: Interval,
    /// Always false: y axes never reserve band width.
    pub is_band_scale: bool,
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::string::ToString;
    use hashbrown::HashSet;

    #[test]
    fn zero_and_negative_zero_are_one_key() {
        let mut set = HashSet::new();
        set.insert(Datum::from(0.0));
        set.insert(Datum::from(-0.0));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn numbers_and_text_never_collide() {
        assert_ne!(Datum::from(1.0), Datum::from("1"));
    }

    #[test]
    fn datum_display_uses_shortest_form() {
        assert_eq!(Datum::from(1.0).to_string(), "1");
        assert_eq!(Datum::from(0.1).to_string(), "0.1");
        assert_eq!(Datum::from(-0.0).to_string(), "0");
        assert_eq!(Datum::from("a").to_string(), "a");
    }

    #[test]
    fn interval_contains_handles_inverted_endpoints() {
        let i = Interval::new(10.0, 0.0);
        assert!(i.is_inverted());
        assert!(i.contains(5.0));
        assert!(!i.contains(11.0));
    }
}
