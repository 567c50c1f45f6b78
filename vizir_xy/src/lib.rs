// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale & domain engine for XY charts.
//!
//! The pipeline runs in one direction per layout pass:
//! - **Domains**: [`merge_x_domain`] reconciles every series into one x
//!   [`XDomain`]; [`merge_y_domain`] builds one [`YDomain`] per axis group.
//! - **Scales**: [`compute_x_scale`] and [`compute_y_scales`] map those
//!   domains onto pixel ranges. A [`Scale`] is either continuous (linear, log,
//!   sqrt, time) or banded (ordinal) and is never mutated after construction.
//! - **Axes**: [`compute_axis_tick_dimensions`] measures tick labels through
//!   an injected [`TextMeasurer`]; [`get_available_ticks`] and
//!   [`get_visible_ticks`] place them and drop collisions.
//! - **Bars**: [`render_bars`] produces pixel rectangles and value labels.
//!
//! Everything is pure: no global theme, no global measurer. Invalid custom
//! domains are reported as [`DomainError`]; other degenerate inputs (empty
//! data, single values, zero-crossing logarithms) recover with documented
//! fallbacks and a `tracing` event.
//!
//! ```
//! use vizir_xy::{
//!     ContinuousKind, Datum, ScaleKind, SeriesKind, XSeriesSpec, compute_x_scale, merge_x_domain,
//! };
//!
//! let specs = [XSeriesSpec::new(SeriesKind::Bar, ScaleKind::Linear)];
//! let values: Vec<Datum> = [1.0, 2.0, 3.0].into_iter().map(Datum::from).collect();
//! let x = merge_x_domain(&specs, &values, None).unwrap();
//! assert_eq!(x.min_interval, 1.0);
//!
//! let scale = compute_x_scale(&x, 1, 0.0, 90.0, 0.0);
//! assert_eq!(scale.bandwidth(), 30.0);
//! assert_eq!(scale.kind().continuous(), Some(ContinuousKind::Linear));
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod axis;
mod bar;
mod domain;
mod error;
#[cfg(all(not(feature = "std"), not(test)))]
mod float;
mod scale;
#[cfg(test)]
mod scenario_tests;
mod ticks;
mod time;
mod x_domain;
mod y_domain;

pub use axis::{
    AxisPosition, AxisSpec, AxisTheme, AxisTickDimensions, ChartRotation, HorizontalAlign,
    PositionedTick, RotationOrigin, TickFormatter, TickLabelProps, VerticalAlign,
    center_rotation_origin, compute_axis_tick_dimensions, compute_rotated_label_dimensions,
    get_available_ticks, get_horizontal_axis_grid_line_props, get_horizontal_axis_tick_line_props,
    get_min_max_range, get_scale_for_axis_spec, get_tick_label_props,
    get_vertical_axis_grid_line_props, get_vertical_axis_tick_line_props, get_visible_ticks,
    is_horizontal_axis, is_vertical_axis, is_y_domain,
};
pub use bar::{
    BandedAccessor, BarDatum, BarGeometry, BarSeriesSpec, BarValue, DisplayValue,
    DisplayValueOptions, ValueFormatter, render_bars,
};
pub use domain::{
    AxisId, ContinuousKind, CustomDomain, Datum, Domain, DomainRange, GroupId, Interval, ScaleKind,
    SeriesId, SeriesKind, XDomain, YDomain,
};
pub use error::{DomainBoundsError, DomainError, DomainShapeError, DomainTarget};
pub use scale::{
    BandPadding, InvertedValue, Scale, ScaleBand, ScaleContinuous, ScaleOptions, StepPolicy,
    compute_x_scale, compute_x_scale_with_tick_count, compute_y_scales,
    compute_y_scales_with_tick_count, limit_log_domain,
};
pub use ticks::{
    DEFAULT_TICK_COUNT, log_ticks, nice_linear, nice_log, tick_increment, tick_step, ticks,
};
pub use time::{
    TimeInterval, TimeUnit, format_time_tick, parse_time_zone, resolve_time_zone, time_ticks,
    time_ticks_in_zone,
};
pub use x_domain::{
    DEFAULT_TIME_ZONE, XScaleResolution, XSeriesSpec, convert_x_scale_types, find_min_interval,
    merge_x_domain,
};
pub use y_domain::{YSeriesSpec, coerce_y_scale_types, merge_y_domain};

pub use vizir_text::{TextBox, TextMeasurer, TextStyle};
