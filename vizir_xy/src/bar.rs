// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar geometry.
//!
//! [`render_bars`] turns one bar series into pixel rectangles. Each series of
//! a cluster is shifted by its index times the x bandwidth, so the x scale
//! must have been built for the full cluster (see
//! [`compute_x_scale`](crate::compute_x_scale)).

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Brush;
use vizir_text::{TextMeasurer, TextStyle};

use crate::domain::{ContinuousKind, Datum, SeriesId};
use crate::scale::{Scale, ScaleContinuous};

/// Formats a bar value into its display label.
pub type ValueFormatter = Arc<dyn Fn(f64) -> String>;

/// Horizontal padding measured around display values.
const DISPLAY_VALUE_PADDING: f64 = 1.0;

/// Options for value labels drawn on bars.
#[derive(Clone, Default)]
pub struct DisplayValueOptions {
    /// Attach a label to each bar.
    pub show_value_label: bool,
    /// Only label every other bar.
    pub is_alternating_value_label: bool,
    /// Size the label to the bar width instead of its text.
    pub is_value_contained_in_element: bool,
    /// Ask the painter to drop labels that do not fit.
    pub hide_clipped_value: bool,
    /// Label formatter; without one no text is produced.
    pub value_formatter: Option<ValueFormatter>,
}

impl core::fmt::Debug for DisplayValueOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DisplayValueOptions")
            .field("show_value_label", &self.show_value_label)
            .field("is_alternating_value_label", &self.is_alternating_value_label)
            .field("is_value_contained_in_element", &self.is_value_contained_in_element)
            .field("hide_clipped_value", &self.hide_clipped_value)
            .field("value_formatter", &self.value_formatter.is_some())
            .finish()
    }
}

impl DisplayValueOptions {
    /// Shown labels formatted by `f`.
    pub fn new(f: impl Fn(f64) -> String + 'static) -> Self {
        Self {
            show_value_label: true,
            value_formatter: Some(Arc::new(f)),
            ..Self::default()
        }
    }

    /// Labels only every other bar.
    pub fn with_alternating(mut self, alternating: bool) -> Self {
        self.is_alternating_value_label = alternating;
        self
    }

    /// Sizes labels to the bar width.
    pub fn with_contained_in_element(mut self, contained: bool) -> Self {
        self.is_value_contained_in_element = contained;
        self
    }

    /// Drops labels that do not fit.
    pub fn with_hide_clipped_value(mut self, hide: bool) -> Self {
        self.hide_clipped_value = hide;
        self
    }
}

/// A bar series and its styling.
#[derive(Clone, Debug)]
pub struct BarSeriesSpec {
    /// Position of the series within its cluster.
    pub series_index: usize,
    /// Series id.
    pub series_id: SeriesId,
    /// Key distinguishing split series of one spec.
    pub series_key: String,
    /// Bar fill.
    pub fill: Brush,
    /// Value label options.
    pub display_value: Option<DisplayValueOptions>,
    /// Value label font.
    pub display_value_style: TextStyle,
    /// Minimum absolute height of non-empty bars.
    pub min_bar_height: Option<f64>,
}

impl BarSeriesSpec {
    /// The first series of a cluster, with a default fill and no labels.
    pub fn new(series_id: impl Into<SeriesId>) -> Self {
        let series_id = series_id.into();
        Self {
            series_index: 0,
            series_key: String::from(series_id.as_str()),
            series_id,
            fill: Brush::default(),
            display_value: None,
            display_value_style: TextStyle::default(),
            min_bar_height: None,
        }
    }

    /// Sets the position within the cluster.
    pub fn with_series_index(mut self, index: usize) -> Self {
        self.series_index = index;
        self
    }

    /// Sets the series key.
    pub fn with_series_key(mut self, key: impl Into<String>) -> Self {
        self.series_key = key.into();
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Enables value labels.
    pub fn with_display_value(mut self, options: DisplayValueOptions) -> Self {
        self.display_value = Some(options);
        self
    }

    /// Sets the value label font.
    pub fn with_display_value_style(mut self, style: TextStyle) -> Self {
        self.display_value_style = style;
        self
    }

    /// Sets the minimum bar height.
    pub fn with_min_bar_height(mut self, height: f64) -> Self {
        self.min_bar_height = Some(height);
        self
    }
}

/// One bar-series data point.
#[derive(Clone, Debug, PartialEq)]
pub struct BarDatum {
    /// X value.
    pub x: Datum,
    /// Stack baseline; `None` means zero.
    pub y0: Option<f64>,
    /// Bar top, stacked; `None` skips the datum.
    pub y1: Option<f64>,
    /// Unstacked value, reported back and labeled.
    pub initial_y1: Option<f64>,
}

impl BarDatum {
    /// An unstacked datum.
    pub fn new(x: impl Into<Datum>, y: f64) -> Self {
        Self {
            x: x.into(),
            y0: None,
            y1: Some(y),
            initial_y1: Some(y),
        }
    }

    /// A stacked datum from `y0` to `y1`, originally worth `initial_y1`.
    pub fn stacked(x: impl Into<Datum>, y0: f64, y1: f64, initial_y1: f64) -> Self {
        Self {
            x: x.into(),
            y0: Some(y0),
            y1: Some(y1),
            initial_y1: Some(initial_y1),
        }
    }
}

/// Which end of a banded datum a geometry represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BandedAccessor {
    /// The baseline.
    Y0,
    /// The value.
    Y1,
}

/// The datum behind a bar.
#[derive(Clone, Debug, PartialEq)]
pub struct BarValue {
    /// Accessor the bar represents.
    pub accessor: BandedAccessor,
    /// X value.
    pub x: Datum,
    /// Unstacked y value.
    pub y: f64,
}

/// A value label attached to a bar.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayValue {
    /// Label text; `None` on bars skipped by alternation.
    pub text: Option<String>,
    /// Label width.
    pub width: f64,
    /// Label height, the font size.
    pub height: f64,
    /// Whether the painter should drop the label when clipped.
    pub hide_clipped_value: bool,
    /// Whether the label is sized to the bar.
    pub is_value_contained_in_element: bool,
}

/// A bar in pixel space.
///
/// `y` is the pixel of the bar's value and `height` runs from there to the
/// baseline, so it is negative for bars hanging below their baseline on an
/// upward axis.
#[derive(Clone, Debug, PartialEq)]
pub struct BarGeometry {
    /// Left edge.
    pub x: f64,
    /// Value edge.
    pub y: f64,
    /// Width, the x bandwidth.
    pub width: f64,
    /// Signed extent from `y` to the baseline.
    pub height: f64,
    /// Fill.
    pub color: Brush,
    /// Source datum.
    pub value: BarValue,
    /// Series id.
    pub series_id: SeriesId,
    /// Series key.
    pub series_key: String,
    /// Value label.
    pub display_value: Option<DisplayValue>,
}

impl BarGeometry {
    /// The bar as a rectangle with positive width and height.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height).abs()
    }
}

/// Lays out the bars of one series.
///
/// Data outside the x domain, without a `y1`, or without a pixel on either
/// scale is skipped.
pub fn render_bars(
    spec: &BarSeriesSpec,
    data: &[BarDatum],
    x_scale: &Scale,
    y_scale: &ScaleContinuous,
    measurer: &dyn TextMeasurer,
) -> Vec<BarGeometry> {
    let min_height = spec.min_bar_height.map(f64::abs);
    let label_style = spec
        .display_value_style
        .clone()
        .with_padding(DISPLAY_VALUE_PADDING);
    let mut bars: Vec<BarGeometry> = Vec::new();

    for datum in data {
        let (Some(y1), Some(initial_y1)) = (datum.y1, datum.initial_y1) else {
            continue;
        };
        if !x_scale.is_value_in_domain(&datum.x) {
            continue;
        }
        let Some((mut y, base)) = scale_extent(y_scale, datum.y0, y1) else {
            continue;
        };
        let mut height = base - y;
        if let Some(min) = min_height
            && height != 0.0
            && height.abs() < min
        {
            let delta = min - height.abs();
            if height < 0.0 {
                height = -min;
                y += delta;
            } else {
                height = min;
                y -= delta;
            }
        }
        let Some(x_scaled) = x_scale.scale(&datum.x) else {
            continue;
        };
        let width = x_scale.bandwidth();
        let x = x_scaled + width * spec.series_index as f64;

        let display_value = spec.display_value.as_ref().and_then(|options| {
            if !options.show_value_label {
                return None;
            }
            let formatted = options.value_formatter.as_ref().map(|f| f(initial_y1));
            let text = if options.is_alternating_value_label && bars.len() % 2 != 0 {
                None
            } else {
                formatted
            };
            let label_width = if options.is_value_contained_in_element {
                width
            } else {
                measurer
                    .measure(text.as_deref().unwrap_or(""), &label_style)
                    .width
            };
            Some(DisplayValue {
                text,
                width: label_width,
                height: spec.display_value_style.font_size,
                hide_clipped_value: options.hide_clipped_value,
                is_value_contained_in_element: options.is_value_contained_in_element,
            })
        });

        bars.push(BarGeometry {
            x,
            y,
            width,
            height,
            color: spec.fill.clone(),
            value: BarValue {
                accessor: BandedAccessor::Y1,
                x: datum.x.clone(),
                y: initial_y1,
            },
            series_id: spec.series_id.clone(),
            series_key: spec.series_key.clone(),
            display_value,
        });
    }
    bars
}

/// Pixels of the bar value and its baseline.
///
/// Log scales have no pixel for zero, so zero values sit at the range start
/// and zero baselines at the range end nearest the axis origin.
fn scale_extent(y_scale: &ScaleContinuous, y0: Option<f64>, y1: f64) -> Option<(f64, f64)> {
    if y_scale.kind() == ContinuousKind::Log {
        let (r0, r1) = y_scale.range();
        let y = if y1 == 0.0 { Some(r0) } else { y_scale.scale(y1) };
        let base = match y0.filter(|v| *v != 0.0) {
            Some(v) => y_scale.scale(v),
            None if y_scale.is_inverted() => Some(r1),
            None => Some(r0),
        };
        Some((y?, base?))
    } else {
        let y = y_scale.scale(y1)?;
        let base = y_scale.scale(y0.unwrap_or(0.0))?;
        Some((y, base))
    }
}
