// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric tick generation.
//!
//! Tick steps are "nice" (1, 2 or 5 times a power of ten). Tick values are
//! computed as integer multiples of the step, and for steps below one as
//! integers divided by the inverse step, so `[0, 1]` yields exactly
//! `0, 0.1, 0.2, …, 1` without accumulated drift.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(all(not(feature = "std"), not(test)))]
use crate::float::FloatExt;

use crate::domain::Interval;

/// Default number of ticks requested from continuous scales.
pub const DEFAULT_TICK_COUNT: usize = 10;

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = core::f64::consts::SQRT_2;

/// Rounds half-way cases toward positive infinity.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// First index, last index and signed increment of the ticks in `[start, stop]`.
///
/// A negative increment `-k` means "divide by `k`".
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10_f64.powf(-power) / factor;
        i1 = round_half_up(start * inv);
        i2 = round_half_up(stop * inv);
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        inc = 10_f64.powf(power) * factor;
        i1 = round_half_up(start / inc);
        i2 = round_half_up(stop / inc);
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Returns the signed tick increment for `[start, stop]` (see [`tick_spec`]).
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).2
}

/// Returns the tick step for `[start, stop]`, negative when `stop < start`.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reverse = stop < start;
    let inc = if reverse {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -step } else { step }
}

/// Returns roughly `count` nice ticks covering `[start, stop]`.
///
/// Ticks are ordered like the endpoints: descending when `stop < start`.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return alloc::vec![start];
    }
    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count as f64)
    } else {
        tick_spec(start, stop, count as f64)
    };
    if !(i2 >= i1) {
        return Vec::new();
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "tick indices are bounded by the requested count"
    )]
    let n = (i2 - i1 + 1.0) as usize;
    let value = |k: f64| if inc < 0.0 { k / -inc } else { k * inc };
    (0..n)
        .map(|i| {
            let i = i as f64;
            if reverse { value(i2 - i) } else { value(i1 + i) }
        })
        .collect()
}

/// Extends `domain` outward so both endpoints land on tick steps.
///
/// Returns the domain unchanged if the step does not settle.
pub fn nice_linear(domain: Interval, count: usize) -> Interval {
    let reverse = domain.max < domain.min;
    let (mut start, mut stop) = if reverse {
        (domain.max, domain.min)
    } else {
        (domain.min, domain.max)
    };
    let mut prestep = None;
    for _ in 0..10 {
        let step = tick_increment(start, stop, count);
        if prestep == Some(step) {
            return if reverse {
                Interval::new(stop, start)
            } else {
                Interval::new(start, stop)
            };
        }
        if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else if step < 0.0 {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        } else {
            break;
        }
        prestep = Some(step);
    }
    domain
}

/// `log_base(x)`, mirrored for negative domains.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LogTransform {
    base: f64,
    negative: bool,
}

impl LogTransform {
    pub(crate) fn new(base: f64, domain: Interval) -> Self {
        Self {
            base,
            negative: domain.min < 0.0,
        }
    }

    fn raw_log(&self, x: f64) -> f64 {
        if self.base == 10.0 {
            x.log10()
        } else if self.base == core::f64::consts::E {
            x.ln()
        } else {
            x.ln() / self.base.ln()
        }
    }

    fn raw_pow(&self, x: f64) -> f64 {
        if self.base == 10.0 && x == x.floor() && x.abs() <= 22.0 {
            pow10_exact(x)
        } else {
            self.base.powf(x)
        }
    }

    pub(crate) fn log(&self, x: f64) -> f64 {
        if self.negative {
            -self.raw_log(-x)
        } else {
            self.raw_log(x)
        }
    }

    pub(crate) fn pow(&self, x: f64) -> f64 {
        if self.negative {
            -self.raw_pow(-x)
        } else {
            self.raw_pow(x)
        }
    }
}

/// `10^x` for integral `|x| <= 22`, correctly rounded.
fn pow10_exact(x: f64) -> f64 {
    let mut p = 1.0;
    #[allow(clippy::cast_possible_truncation, reason = "callers bound |x| to 22")]
    let n = x.abs() as u32;
    for _ in 0..n {
        p *= 10.0;
    }
    if x < 0.0 { 1.0 / p } else { p }
}

/// Ticks for a log scale over `domain` (already free of zero).
///
/// When the domain spans fewer powers than `count`, the integer multiples of
/// each power are included; if that still yields too few ticks it falls back
/// to linear ticks.
pub fn log_ticks(domain: Interval, base: f64, count: usize) -> Vec<f64> {
    let transform = LogTransform::new(base, domain);
    let reverse = domain.max < domain.min;
    let (u, v) = if reverse {
        (domain.max, domain.min)
    } else {
        (domain.min, domain.max)
    };
    let mut i = transform.log(u);
    let mut j = transform.log(v);
    let n = count as f64;
    let mut z = Vec::new();

    if base == base.floor() && j - i < n {
        i = i.floor();
        j = j.ceil();
        let push = |t: f64, z: &mut Vec<f64>| -> bool {
            if t < u {
                return true;
            }
            if t > v {
                return false;
            }
            z.push(t);
            true
        };
        if u > 0.0 {
            'outer: while i <= j {
                let mut k = 1.0;
                while k < base {
                    let t = if i < 0.0 {
                        k / transform.pow(-i)
                    } else {
                        k * transform.pow(i)
                    };
                    if !push(t, &mut z) {
                        break 'outer;
                    }
                    k += 1.0;
                }
                i += 1.0;
            }
        } else {
            'outer: while i <= j {
                let mut k = base - 1.0;
                while k >= 1.0 {
                    let t = if i > 0.0 {
                        k / transform.pow(-i)
                    } else {
                        k * transform.pow(i)
                    };
                    if !push(t, &mut z) {
                        break 'outer;
                    }
                    k -= 1.0;
                }
                i += 1.0;
            }
        }
        if z.len() * 2 < count {
            z = ticks(u, v, count);
        }
    } else {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "the span in powers is small and positive here"
        )]
        let decades = (j - i).min(n).max(0.0) as usize;
        z = ticks(i, j, decades)
            .into_iter()
            .map(|p| transform.pow(p))
            .collect();
    }

    if reverse {
        z.reverse();
    }
    z
}

/// Extends a log domain outward to whole powers of `base`.
pub fn nice_log(domain: Interval, base: f64) -> Interval {
    let t = LogTransform::new(base, domain);
    let floor = |x: f64| t.pow(t.log(x).floor());
    let ceil = |x: f64| t.pow(t.log(x).ceil());
    if domain.max < domain.min {
        Interval::new(ceil(domain.min), floor(domain.max))
    } else {
        Interval::new(floor(domain.min), ceil(domain.max))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::vec;

    #[test]
    fn unit_interval_ticks_are_exact_tenths() {
        assert_eq!(
            ticks(0.0, 1.0, 10),
            vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]
        );
    }

    #[test]
    fn reversed_endpoints_give_descending_ticks() {
        assert_eq!(ticks(1.0, 0.0, 5), vec![1.0, 0.8, 0.6, 0.4, 0.2, 0.0]);
    }

    #[test]
    fn larger_domains_step_by_nice_numbers() {
        assert_eq!(ticks(0.0, 100.0, 10), vec![
            0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0
        ]);
        assert_eq!(ticks(-10.0, 10.0, 5), vec![-10.0, -5.0, 0.0, 5.0, 10.0]);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(ticks(3.0, 3.0, 10), vec![3.0]);
        assert!(ticks(0.0, 1.0, 0).is_empty());
        assert!(ticks(f64::NAN, 1.0, 10).is_empty());
    }

    #[test]
    fn tick_step_sign_follows_direction() {
        assert_eq!(tick_step(0.0, 10.0, 10), 1.0);
        assert_eq!(tick_step(10.0, 0.0, 10), -1.0);
        assert_eq!(tick_step(0.0, 1.0, 10), 0.1);
    }

    #[test]
    fn nice_extends_to_step_boundaries() {
        assert_eq!(
            nice_linear(Interval::new(0.5, 9.7), 10),
            Interval::new(0.0, 10.0)
        );
        assert_eq!(
            nice_linear(Interval::new(9.7, 0.5), 10),
            Interval::new(10.0, 0.0)
        );
    }

    #[test]
    fn log_ticks_include_multiples_over_few_decades() {
        let t = log_ticks(Interval::new(1.0, 100.0), 10.0, 10);
        assert_eq!(t, vec![
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0,
            80.0, 90.0, 100.0
        ]);
    }

    #[test]
    fn log_ticks_use_powers_over_many_decades() {
        let t = log_ticks(Interval::new(1.0, 1e20), 10.0, 10);
        assert!(t.iter().all(|v| v.log10() == v.log10().round()));
        assert_eq!(t.first(), Some(&1.0));
        assert_eq!(t.last(), Some(&1e20));
    }

    #[test]
    fn log_ticks_on_negative_domains_stay_negative() {
        let t = log_ticks(Interval::new(-100.0, -1.0), 10.0, 10);
        assert!(!t.is_empty());
        assert!(t.iter().all(|v| *v < 0.0));
        assert!(t.contains(&-10.0));
    }

    #[test]
    fn nice_log_snaps_to_powers() {
        assert_eq!(
            nice_log(Interval::new(3.0, 450.0), 10.0),
            Interval::new(1.0, 1000.0)
        );
    }
}
