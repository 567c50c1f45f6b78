// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar-aligned time ticks and tick labels.
//!
//! Time values are millisecond timestamps. Ticks are picked from a ladder of
//! calendar intervals (seconds through years) closest to `span / count`, and
//! are aligned to boundaries of that interval in the target time zone: the
//! domain is shifted by the zone offset, ticked in UTC, and shifted back.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDate, Offset, Timelike, Utc};

#[cfg(all(not(feature = "std"), not(test)))]
use crate::float::FloatExt;

use crate::domain::Interval;
use crate::ticks::tick_step;

const MILLISECOND: f64 = 1.0;
const SECOND: f64 = 1_000.0;
const MINUTE: f64 = 60.0 * SECOND;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const WEEK: f64 = 7.0 * DAY;
const MONTH: f64 = 30.0 * DAY;
const YEAR: f64 = 365.0 * DAY;

const MAX_TICKS: usize = 10_000;

/// Calendar unit of a [`TimeInterval`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeUnit {
    /// Milliseconds.
    Millisecond,
    /// Seconds.
    Second,
    /// Minutes.
    Minute,
    /// Hours.
    Hour,
    /// Calendar days.
    Day,
    /// Weeks starting on Sunday.
    Week,
    /// Calendar months.
    Month,
    /// Calendar years.
    Year,
}

impl TimeUnit {
    /// Nominal length in milliseconds (months are 30 days, years 365).
    pub fn approximate_millis(self) -> f64 {
        match self {
            Self::Millisecond => MILLISECOND,
            Self::Second => SECOND,
            Self::Minute => MINUTE,
            Self::Hour => HOUR,
            Self::Day => DAY,
            Self::Week => WEEK,
            Self::Month => MONTH,
            Self::Year => YEAR,
        }
    }
}

/// Every `step`-th boundary of `unit`.
///
/// Below a day, boundaries are those whose calendar field (second of the
/// minute, hour of the day, ...) is a multiple of `step`; days count from the
/// first of the month, months from January, and years from year zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeInterval {
    /// Calendar unit.
    pub unit: TimeUnit,
    /// Multiple of the unit, at least 1.
    pub step: u32,
}

const TICK_INTERVALS: [TimeInterval; 18] = {
    const fn every(unit: TimeUnit, step: u32) -> TimeInterval {
        TimeInterval { unit, step }
    }
    [
        every(TimeUnit::Second, 1),
        every(TimeUnit::Second, 5),
        every(TimeUnit::Second, 15),
        every(TimeUnit::Second, 30),
        every(TimeUnit::Minute, 1),
        every(TimeUnit::Minute, 5),
        every(TimeUnit::Minute, 15),
        every(TimeUnit::Minute, 30),
        every(TimeUnit::Hour, 1),
        every(TimeUnit::Hour, 3),
        every(TimeUnit::Hour, 6),
        every(TimeUnit::Hour, 12),
        every(TimeUnit::Day, 1),
        every(TimeUnit::Day, 2),
        every(TimeUnit::Week, 1),
        every(TimeUnit::Month, 1),
        every(TimeUnit::Month, 3),
        every(TimeUnit::Year, 1),
    ]
};

impl TimeInterval {
    /// Nominal length of one step in milliseconds.
    pub fn approximate_millis(&self) -> f64 {
        self.unit.approximate_millis() * f64::from(self.step)
    }

    /// Picks the interval whose length is closest to `|stop - start| / count`.
    pub fn for_span(start: f64, stop: f64, count: usize) -> Self {
        let target = (stop - start).abs() / count.max(1) as f64;
        let i = TICK_INTERVALS.partition_point(|t| t.approximate_millis() <= target);
        if i == TICK_INTERVALS.len() {
            let step = tick_step(start / YEAR, stop / YEAR, count).abs();
            return Self {
                unit: TimeUnit::Year,
                step: to_step(step),
            };
        }
        if i == 0 {
            let step = tick_step(start, stop, count).abs();
            return Self {
                unit: TimeUnit::Millisecond,
                step: to_step(step),
            };
        }
        let (lo, hi) = (TICK_INTERVALS[i - 1], TICK_INTERVALS[i]);
        if target / lo.approximate_millis() < hi.approximate_millis() / target {
            lo
        } else {
            hi
        }
    }

    /// Boundaries `t` of this interval with `start <= t < stop`.
    pub fn range(&self, start: i64, stop: i64) -> Vec<i64> {
        let step = i64::from(self.step.max(1));
        let mut out = Vec::new();
        match self.unit {
            TimeUnit::Millisecond => {
                let mut t = ceil_div(start, step) * step;
                while t < stop && out.len() < MAX_TICKS {
                    out.push(t);
                    t += step;
                }
            }
            TimeUnit::Year => {
                let Some(first) = ceil_to_month(start).and_then(|d| {
                    let year =
                        ceil_div(i64::from(d.year()) + i64::from(d.month0() > 0), step) * step;
                    i32::try_from(year).ok()
                }) else {
                    return out;
                };
                let mut year = first;
                while out.len() < MAX_TICKS {
                    let Some(t) = NaiveDate::from_ymd_opt(year, 1, 1).map(date_millis) else {
                        break;
                    };
                    if t >= stop {
                        break;
                    }
                    out.push(t);
                    let Some(next) = i32::try_from(step).ok().and_then(|s| year.checked_add(s))
                    else {
                        break;
                    };
                    year = next;
                }
            }
            TimeUnit::Month => {
                let Some(mut date) = ceil_to_month(start) else {
                    return out;
                };
                while out.len() < MAX_TICKS {
                    let t = date_millis(date);
                    if t >= stop {
                        break;
                    }
                    if i64::from(date.month0()) % step == 0 {
                        out.push(t);
                    }
                    let Some(next) = date.checked_add_months(Months::new(1)) else {
                        break;
                    };
                    date = next;
                }
            }
            TimeUnit::Second
            | TimeUnit::Minute
            | TimeUnit::Hour
            | TimeUnit::Day
            | TimeUnit::Week => {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "unit lengths are exact integers"
                )]
                let unit = self.unit.approximate_millis() as i64;
                let mut t = self.floor_fixed(start - 1, unit) + unit;
                let mut visited = 0;
                while t < stop && out.len() < MAX_TICKS && visited < MAX_TICKS * 32 {
                    if self.field(t) % step == 0 {
                        out.push(t);
                    }
                    t += unit;
                    visited += 1;
                }
            }
        }
        out
    }

    fn floor_fixed(&self, t: i64, unit: i64) -> i64 {
        if self.unit == TimeUnit::Week {
            let days = t.div_euclid(86_400_000);
            // 1970-01-01 was a Thursday.
            let since_sunday = (days + 4).rem_euclid(7);
            (days - since_sunday) * 86_400_000
        } else {
            t.div_euclid(unit) * unit
        }
    }

    fn field(&self, t: i64) -> i64 {
        match self.unit {
            TimeUnit::Second => t.div_euclid(1_000).rem_euclid(60),
            TimeUnit::Minute => t.div_euclid(60_000).rem_euclid(60),
            TimeUnit::Hour => t.div_euclid(3_600_000).rem_euclid(24),
            TimeUnit::Day => DateTime::from_timestamp_millis(t)
                .map(|d| i64::from(d.day0()))
                .unwrap_or(0),
            _ => 0,
        }
    }
}

fn to_step(step: f64) -> u32 {
    let step = step.round().clamp(1.0, f64::from(u32::MAX));
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the u32 range")]
    {
        step as u32
    }
}

fn ceil_div(a: i64, b: i64) -> i64 {
    -(-a).div_euclid(b)
}

/// The first day of the earliest month starting at or after `t`.
fn ceil_to_month(t: i64) -> Option<NaiveDate> {
    let date = DateTime::from_timestamp_millis(t)?.naive_utc();
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?;
    if date_millis(first) >= t {
        Some(first)
    } else {
        first.checked_add_months(Months::new(1))
    }
}

fn date_millis(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis()
}

pub(crate) fn to_millis(v: f64) -> i64 {
    let v = v.round().clamp(-8.64e15, 8.64e15);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the representable date range")]
    {
        v as i64
    }
}

/// Calendar ticks over `domain` in UTC.
///
/// Both endpoints are inclusive; ticks are descending when the domain is.
pub fn time_ticks(domain: Interval, count: usize) -> Vec<f64> {
    if count == 0 || !domain.min.is_finite() || !domain.max.is_finite() {
        return Vec::new();
    }
    let reverse = domain.is_inverted();
    let (start, stop) = if reverse {
        (domain.max, domain.min)
    } else {
        (domain.min, domain.max)
    };
    let interval = TimeInterval::for_span(start, stop, count);
    let mut out: Vec<f64> = interval
        .range(to_millis(start.ceil()), to_millis(stop.floor()) + 1)
        .into_iter()
        .map(|t| t as f64)
        .collect();
    if reverse {
        out.reverse();
    }
    out
}

/// Calendar ticks over `domain` aligned to local boundaries of `zone`.
pub fn time_ticks_in_zone(domain: Interval, zone: FixedOffset, count: usize) -> Vec<f64> {
    let offset = f64::from(zone.local_minus_utc()) * SECOND;
    time_ticks(Interval::new(domain.min + offset, domain.max + offset), count)
        .into_iter()
        .map(|t| t - offset)
        .collect()
}

/// Parses a time zone name into a fixed UTC offset.
///
/// Accepts `utc`, `gmt`, `z`, and offsets such as `utc+3`, `GMT-03:30`,
/// `+05:00` or `-0800`. Returns `None` for anything else.
pub fn parse_time_zone(zone: &str) -> Option<FixedOffset> {
    let zone = zone.trim().to_lowercase();
    if matches!(zone.as_str(), "" | "utc" | "gmt" | "z") {
        return Some(Utc.fix());
    }
    let rest = zone
        .strip_prefix("utc")
        .or_else(|| zone.strip_prefix("gmt"))
        .unwrap_or(zone.as_str());
    let (sign, rest) = match rest.as_bytes().first()? {
        b'+' => (1, &rest[1..]),
        b'-' => (-1, &rest[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    if hours.is_empty() || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Like [`parse_time_zone`], falling back to UTC with a warning.
pub fn resolve_time_zone(zone: &str) -> FixedOffset {
    parse_time_zone(zone).unwrap_or_else(|| {
        tracing::warn!(zone, "unsupported time zone, using utc");
        Utc.fix()
    })
}

/// Formats a time tick label.
///
/// The pattern depends on the tick step: sub-second steps show milliseconds,
/// sub-day steps show the time of day, and longer steps show the date at the
/// coarsest calendar unit that still distinguishes neighbouring ticks.
/// Hourly ticks falling on midnight show the date instead.
pub fn format_time_tick(value: f64, step: f64, zone: FixedOffset) -> String {
    let Some(t) = DateTime::from_timestamp_millis(to_millis(value)) else {
        return alloc::format!("{value}");
    };
    let t = t.with_timezone(&zone);
    let step = step.abs();
    let pattern = if step < SECOND {
        "%H:%M:%S%.3f"
    } else if step < MINUTE {
        "%H:%M:%S"
    } else if step < DAY {
        if step >= HOUR && t.hour() == 0 && t.minute() == 0 {
            "%b %d"
        } else {
            "%H:%M"
        }
    } else if step < MONTH {
        "%b %d"
    } else if step < YEAR {
        "%b %Y"
    } else {
        "%Y"
    };
    t.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::vec;

    const JAN_1_2020: f64 = 1_577_836_800_000.0;

    #[test]
    fn picks_closest_interval() {
        assert_eq!(
            TimeInterval::for_span(0.0, 10.0 * MINUTE, 10),
            TimeInterval {
                unit: TimeUnit::Minute,
                step: 1
            }
        );
        assert_eq!(
            TimeInterval::for_span(0.0, 2.0 * DAY, 10),
            TimeInterval {
                unit: TimeUnit::Hour,
                step: 6
            }
        );
        assert_eq!(
            TimeInterval::for_span(0.0, 50.0, 10).unit,
            TimeUnit::Millisecond
        );
        assert_eq!(
            TimeInterval::for_span(0.0, 40.0 * YEAR, 10),
            TimeInterval {
                unit: TimeUnit::Year,
                step: 5
            }
        );
    }

    #[test]
    fn hourly_ticks_land_on_hours() {
        let t = time_ticks(Interval::new(JAN_1_2020 + 1.0, JAN_1_2020 + DAY), 4);
        assert_eq!(t.first(), Some(&(JAN_1_2020 + 6.0 * HOUR)));
        assert!(t.iter().all(|v| (v - JAN_1_2020) % (6.0 * HOUR) == 0.0));
        assert_eq!(t.last(), Some(&(JAN_1_2020 + DAY)));
    }

    #[test]
    fn monthly_ticks_follow_the_calendar() {
        // 2020-01-01 .. 2020-12-31, quarterly.
        let t = time_ticks(Interval::new(JAN_1_2020, JAN_1_2020 + 365.0 * DAY), 4);
        let labels: Vec<String> = t
            .iter()
            .map(|v| format_time_tick(*v, 3.0 * MONTH, Utc.fix()))
            .collect();
        assert_eq!(labels, vec!["Jan 2020", "Apr 2020", "Jul 2020", "Oct 2020"]);
    }

    #[test]
    fn weekly_ticks_start_on_sunday() {
        let t = time_ticks(Interval::new(JAN_1_2020, JAN_1_2020 + 60.0 * DAY), 8);
        let first = DateTime::from_timestamp_millis(to_millis(t[0])).unwrap();
        assert_eq!(first.weekday(), chrono::Weekday::Sun);
        assert_eq!(first.day(), 5);
    }

    #[test]
    fn zone_ticks_align_to_local_midnight() {
        let zone = parse_time_zone("utc+2").unwrap();
        let start = JAN_1_2020 - 2.0 * HOUR;
        let t = time_ticks_in_zone(Interval::new(start, start + 10.0 * DAY), zone, 10);
        assert_eq!(t.first(), Some(&start));
        assert!(t.iter().all(|v| (v - start) % DAY == 0.0));
    }

    #[test]
    fn descending_domains_give_descending_ticks() {
        let t = time_ticks(Interval::new(JAN_1_2020 + DAY, JAN_1_2020), 4);
        assert!(t.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn parses_zone_formats() {
        let east = |s| FixedOffset::east_opt(s).unwrap();
        assert_eq!(parse_time_zone("UTC"), Some(east(0)));
        assert_eq!(parse_time_zone("utc+3"), Some(east(3 * 3600)));
        assert_eq!(parse_time_zone("GMT-03:30"), Some(east(-(3 * 3600 + 1800))));
        assert_eq!(parse_time_zone("+05:00"), Some(east(5 * 3600)));
        assert_eq!(parse_time_zone("-0800"), Some(east(-8 * 3600)));
        assert_eq!(parse_time_zone("Europe/Rome"), None);
        assert_eq!(resolve_time_zone("local"), Utc.fix());
    }

    #[test]
    fn formats_by_step() {
        let zone = Utc.fix();
        assert_eq!(format_time_tick(JAN_1_2020 + 1_500.0, 500.0, zone), "00:00:01.500");
        assert_eq!(format_time_tick(JAN_1_2020 + 90.0 * MINUTE, 30.0 * MINUTE, zone), "01:30");
        assert_eq!(format_time_tick(JAN_1_2020, 6.0 * HOUR, zone), "Jan 01");
        assert_eq!(format_time_tick(JAN_1_2020, YEAR, zone), "2020");
        let plus_one = parse_time_zone("utc+1").unwrap();
        assert_eq!(format_time_tick(JAN_1_2020, MINUTE, plus_one), "01:00");
    }
}
