// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis tick computation and label layout.
//!
//! An axis is measured once per layout pass with
//! [`compute_axis_tick_dimensions`], which builds a throwaway scale over a
//! nominal range, formats every tick and records the largest label boxes.
//! Once the chart viewport is known, [`get_available_ticks`] positions every
//! tick in pixels and [`get_visible_ticks`] drops the ones whose labels would
//! collide.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

#[cfg(all(not(feature = "std"), not(test)))]
use crate::float::FloatExt;

use kurbo::{Line, Point, Size};
use vizir_text::{TextMeasurer, TextStyle};

use crate::domain::{AxisId, ContinuousKind, Datum, Domain, GroupId, ScaleKind, XDomain, YDomain};
use crate::scale::{Scale, compute_x_scale_with_tick_count, compute_y_scales_with_tick_count};
use crate::ticks::DEFAULT_TICK_COUNT;
use crate::time::format_time_tick;

/// Formats a tick value into its label.
pub type TickFormatter = Arc<dyn Fn(&Datum) -> String>;

/// Where an axis sits relative to the plot area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisPosition {
    /// Above the plot.
    Top,
    /// Below the plot.
    Bottom,
    /// Left of the plot.
    Left,
    /// Right of the plot.
    Right,
}

impl AxisPosition {
    /// Whether the axis runs vertically (`Left` or `Right`).
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Whether the axis runs horizontally (`Top` or `Bottom`).
    pub fn is_horizontal(self) -> bool {
        !self.is_vertical()
    }
}

/// Whether `position` is a vertical axis.
pub fn is_vertical_axis(position: AxisPosition) -> bool {
    position.is_vertical()
}

/// Whether `position` is a horizontal axis.
pub fn is_horizontal_axis(position: AxisPosition) -> bool {
    position.is_horizontal()
}

/// Rotation of the whole chart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChartRotation {
    /// Upright: x runs left to right, y bottom to top.
    #[default]
    Deg0,
    /// Quarter turn clockwise.
    Deg90,
    /// Quarter turn counterclockwise.
    DegNeg90,
    /// Upside down.
    Deg180,
}

impl ChartRotation {
    /// The rotation in degrees.
    pub fn degrees(self) -> f64 {
        match self {
            Self::Deg0 => 0.0,
            Self::Deg90 => 90.0,
            Self::DegNeg90 => -90.0,
            Self::Deg180 => 180.0,
        }
    }

    /// Whether the x axis stays horizontal.
    pub fn is_straight(self) -> bool {
        matches!(self, Self::Deg0 | Self::Deg180)
    }
}

/// Whether an axis at `position` shows a y domain under `rotation`.
pub fn is_y_domain(position: AxisPosition, rotation: ChartRotation) -> bool {
    position.is_vertical() == rotation.is_straight()
}

/// An axis declaration.
#[derive(Clone)]
pub struct AxisSpec {
    /// Axis id, used in diagnostics.
    pub id: AxisId,
    /// Placement relative to the plot.
    pub position: AxisPosition,
    /// Axis group whose y domain a y axis shows.
    pub group_id: GroupId,
    /// Tick line length.
    pub tick_size: f64,
    /// Gap between the tick line and its label.
    pub tick_padding: f64,
    /// Keep colliding ticks, with their labels blanked.
    pub show_overlapping_ticks: bool,
    /// Keep colliding ticks and their labels.
    pub show_overlapping_labels: bool,
    /// Hide the axis entirely.
    pub hide: bool,
    /// Label formatter; falls back to the theme's, then to the built-in one.
    pub tick_format: Option<TickFormatter>,
    /// Desired tick count.
    pub tick_count: Option<usize>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("group_id", &self.group_id)
            .field("tick_size", &self.tick_size)
            .field("tick_padding", &self.tick_padding)
            .field("show_overlapping_ticks", &self.show_overlapping_ticks)
            .field("show_overlapping_labels", &self.show_overlapping_labels)
            .field("hide", &self.hide)
            .field("tick_format", &self.tick_format.is_some())
            .field("tick_count", &self.tick_count)
            .finish()
    }
}

impl AxisSpec {
    /// Creates a visible axis with 10px ticks and 5px tick padding.
    pub fn new(
        id: impl Into<AxisId>,
        position: AxisPosition,
        group_id: impl Into<GroupId>,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            group_id: group_id.into(),
            tick_size: 10.0,
            tick_padding: 5.0,
            show_overlapping_ticks: false,
            show_overlapping_labels: false,
            hide: false,
            tick_format: None,
            tick_count: None,
        }
    }

    /// Sets the tick line length.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size = tick_size;
        self
    }

    /// Sets the gap between tick lines and labels.
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    /// Keeps colliding ticks, with blank labels.
    pub fn with_show_overlapping_ticks(mut self, show: bool) -> Self {
        self.show_overlapping_ticks = show;
        self
    }

    /// Keeps colliding ticks and their labels.
    pub fn with_show_overlapping_labels(mut self, show: bool) -> Self {
        self.show_overlapping_labels = show;
        self
    }

    /// Hides the axis.
    pub fn with_hide(mut self, hide: bool) -> Self {
        self.hide = hide;
        self
    }

    /// Sets the label formatter.
    pub fn with_tick_format(mut self, f: impl Fn(&Datum) -> String + 'static) -> Self {
        self.tick_format = Some(Arc::new(f));
        self
    }

    /// Sets the desired tick count.
    pub fn with_tick_count(mut self, count: usize) -> Self {
        self.tick_count = Some(count);
        self
    }
}

/// Axis label styling shared by every axis of a chart.
#[derive(Clone)]
pub struct AxisTheme {
    /// Extra horizontal space measured around each label.
    pub tick_label_padding: f64,
    /// Label rotation in degrees.
    pub tick_label_rotation: f64,
    /// Label font.
    pub tick_label_style: TextStyle,
    /// Whether labels are drawn (and therefore measured).
    pub show_tick_labels: bool,
    /// Formatter for axes that declare none.
    pub default_formatter: Option<TickFormatter>,
}

impl core::fmt::Debug for AxisTheme {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisTheme")
            .field("tick_label_padding", &self.tick_label_padding)
            .field("tick_label_rotation", &self.tick_label_rotation)
            .field("tick_label_style", &self.tick_label_style)
            .field("show_tick_labels", &self.show_tick_labels)
            .field("default_formatter", &self.default_formatter.is_some())
            .finish()
    }
}

impl Default for AxisTheme {
    fn default() -> Self {
        Self {
            tick_label_padding: 1.0,
            tick_label_rotation: 0.0,
            tick_label_style: TextStyle::default(),
            show_tick_labels: true,
            default_formatter: None,
        }
    }
}

impl AxisTheme {
    /// The default theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the label padding.
    pub fn with_tick_label_padding(mut self, padding: f64) -> Self {
        self.tick_label_padding = padding;
        self
    }

    /// Sets the label rotation in degrees.
    pub fn with_tick_label_rotation(mut self, degrees: f64) -> Self {
        self.tick_label_rotation = degrees;
        self
    }

    /// Sets the label font.
    pub fn with_tick_label_style(mut self, style: TextStyle) -> Self {
        self.tick_label_style = style;
        self
    }

    /// Shows or hides tick labels.
    pub fn with_show_tick_labels(mut self, show: bool) -> Self {
        self.show_tick_labels = show;
        self
    }

    /// Sets the fallback formatter.
    pub fn with_default_formatter(mut self, f: impl Fn(&Datum) -> String + 'static) -> Self {
        self.default_formatter = Some(Arc::new(f));
        self
    }
}

/// Tick values, labels and the largest label boxes of one axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTickDimensions {
    /// Kind of the scale the ticks came from.
    pub scale_kind: ScaleKind,
    /// Domain of that scale.
    pub scale_domain: Domain,
    /// Tick values in scale order.
    pub tick_values: Vec<Datum>,
    /// Formatted labels, parallel to `tick_values`.
    pub tick_labels: Vec<String>,
    /// Widest rotated, padded label box.
    pub max_label_bbox_width: f64,
    /// Tallest rotated, padded label box.
    pub max_label_bbox_height: f64,
    /// Widest unrotated label text.
    pub max_label_text_width: f64,
    /// Tallest unrotated label text.
    pub max_label_text_height: f64,
}

/// A tick placed on an axis.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedTick {
    /// Domain value.
    pub value: Datum,
    /// Label text; empty when suppressed.
    pub label: String,
    /// Pixel offset along the axis.
    pub position: f64,
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HorizontalAlign {
    /// Anchor at the left edge.
    Left,
    /// Anchor at the center.
    Center,
    /// Anchor at the right edge.
    Right,
}

/// Vertical text anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    /// Anchor at the top edge.
    Top,
    /// Anchor at the middle.
    Middle,
    /// Anchor at the bottom edge.
    Bottom,
}

/// Anchor and alignment of one tick label, relative to the axis origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickLabelProps {
    /// Anchor x.
    pub x: f64,
    /// Anchor y.
    pub y: f64,
    /// Horizontal alignment.
    pub align: HorizontalAlign,
    /// Vertical alignment.
    pub vertical_align: VerticalAlign,
}

/// Anchor shifted to the label center, for rotating labels in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationOrigin {
    /// Anchor moved by the offset.
    pub point: Point,
    /// Half the label text extent.
    pub offset: Size,
}

/// Builds the scale an axis shows over `[min_range, max_range]`.
///
/// Returns `None` for a y axis whose group has no domain.
pub fn get_scale_for_axis_spec(
    axis_spec: &AxisSpec,
    x_domain: &XDomain,
    y_domains: &[YDomain],
    total_bars_in_cluster: usize,
    rotation: ChartRotation,
    min_range: f64,
    max_range: f64,
    bars_padding: f64,
) -> Option<Scale> {
    let tick_count = axis_spec.tick_count.unwrap_or(DEFAULT_TICK_COUNT);
    if is_y_domain(axis_spec.position, rotation) {
        let mut scales =
            compute_y_scales_with_tick_count(y_domains, min_range, max_range, tick_count);
        scales.remove(&axis_spec.group_id).map(Scale::from)
    } else {
        Some(compute_x_scale_with_tick_count(
            x_domain,
            total_bars_in_cluster,
            min_range,
            max_range,
            bars_padding,
            tick_count,
        ))
    }
}

/// Measures the ticks of an axis.
///
/// Returns `None` for hidden axes and for axes without a resolvable scale.
pub fn compute_axis_tick_dimensions(
    axis_spec: &AxisSpec,
    x_domain: &XDomain,
    y_domains: &[YDomain],
    total_bars_in_cluster: usize,
    measurer: &dyn TextMeasurer,
    rotation: ChartRotation,
    theme: &AxisTheme,
) -> Option<AxisTickDimensions> {
    if axis_spec.hide {
        return None;
    }
    let Some(scale) = get_scale_for_axis_spec(
        axis_spec,
        x_domain,
        y_domains,
        total_bars_in_cluster,
        rotation,
        0.0,
        1.0,
        0.0,
    ) else {
        tracing::warn!(
            axis = %axis_spec.id,
            "cannot compute scale for axis; it will not be displayed"
        );
        return None;
    };

    let tick_values = scale.ticks();
    let labeler = Labeler::new(axis_spec, theme, &scale);
    let tick_labels: Vec<String> = tick_values.iter().map(|v| labeler.format(v)).collect();

    let mut dims = AxisTickDimensions {
        scale_kind: scale.kind(),
        scale_domain: scale.domain(),
        tick_values,
        tick_labels,
        max_label_bbox_width: 0.0,
        max_label_bbox_height: 0.0,
        max_label_text_width: 0.0,
        max_label_text_height: 0.0,
    };
    if theme.show_tick_labels {
        let padded = theme
            .tick_label_style
            .clone()
            .with_padding(theme.tick_label_padding);
        for label in &dims.tick_labels {
            let text = measurer.measure(label, &theme.tick_label_style);
            let bbox = measurer.measure(label, &padded);
            let rotated = compute_rotated_label_dimensions(
                Size::new(bbox.width, bbox.height),
                theme.tick_label_rotation,
            );
            dims.max_label_bbox_width = dims.max_label_bbox_width.max(rotated.width.ceil());
            dims.max_label_bbox_height = dims.max_label_bbox_height.max(rotated.height.ceil());
            dims.max_label_text_width = dims.max_label_text_width.max(text.width.ceil());
            dims.max_label_text_height = dims.max_label_text_height.max(text.height.ceil());
        }
    }
    Some(dims)
}

/// The bounding box of a `size` box rotated by `degrees`.
pub fn compute_rotated_label_dimensions(size: Size, degrees: f64) -> Size {
    let radians = degrees * core::f64::consts::PI / 180.0;
    let (sin, cos) = (radians.sin(), radians.cos());
    Size::new(
        (size.width * cos).abs() + (size.height * sin).abs(),
        (size.width * sin).abs() + (size.height * cos).abs(),
    )
}

/// The pixel range an axis spans inside a chart of `chart` size.
///
/// Returned as `(min_range, max_range)`; vertical ranges run bottom-up
/// unless the rotation flips them.
pub fn get_min_max_range(
    position: AxisPosition,
    rotation: ChartRotation,
    chart: Size,
) -> (f64, f64) {
    if position.is_horizontal() {
        let w = chart.width;
        match rotation {
            ChartRotation::Deg0 | ChartRotation::Deg90 => (0.0, w),
            ChartRotation::DegNeg90 | ChartRotation::Deg180 => (w, 0.0),
        }
    } else {
        let h = chart.height;
        match rotation {
            ChartRotation::Deg0 | ChartRotation::DegNeg90 => (h, 0.0),
            ChartRotation::Deg90 | ChartRotation::Deg180 => (0.0, h),
        }
    }
}

/// Every tick of `scale`, positioned and labeled.
///
/// Positions are shifted by half a cluster so ticks sit at band centers.
pub fn get_available_ticks(
    axis_spec: &AxisSpec,
    scale: &Scale,
    total_bars_in_cluster: usize,
    theme: &AxisTheme,
) -> Vec<PositionedTick> {
    let shift = total_bars_in_cluster.max(1) as f64;
    let offset = scale.bandwidth() * shift / 2.0;
    let labeler = Labeler::new(axis_spec, theme, scale);
    scale
        .ticks()
        .into_iter()
        .map(|value| PositionedTick {
            label: labeler.format(&value),
            position: scale.scale(&value).unwrap_or(0.0) + offset,
            value,
        })
        .collect()
}

/// Drops ticks whose labels would overlap the previous kept label.
///
/// Ticks are sorted by position first. The first tick is always kept.
/// With `show_overlapping_labels` every tick is kept; with only
/// `show_overlapping_ticks` every tick is kept but colliding labels are
/// blanked.
///
/// The ticks-only case does not return its input unchanged: a tick whose
/// label would collide keeps its value and position and comes back with an
/// empty `label`, so grid lines and tick marks still render for it.
pub fn get_visible_ticks(
    mut all_ticks: Vec<PositionedTick>,
    axis_spec: &AxisSpec,
    dims: &AxisTickDimensions,
) -> Vec<PositionedTick> {
    all_ticks.sort_by(|a, b| a.position.total_cmp(&b.position));

    let required = if axis_spec.position.is_vertical() {
        dims.max_label_bbox_height / 2.0
    } else {
        dims.max_label_bbox_width / 2.0
    };

    let mut occupied: Option<f64> = None;
    let mut visible = Vec::with_capacity(all_ticks.len());
    for mut tick in all_ticks {
        let fits = occupied.is_none_or(|end| tick.position - required >= end);
        if fits {
            occupied = Some(tick.position + required);
            visible.push(tick);
        } else if axis_spec.show_overlapping_labels {
            visible.push(tick);
        } else if axis_spec.show_overlapping_ticks {
            tick.label.clear();
            visible.push(tick);
        }
    }
    visible
}

/// Anchor and alignment of a tick label at `tick_position`.
///
/// Unrotated labels are aligned away from the axis; rotated labels are
/// centered.
pub fn get_tick_label_props(
    tick_label_rotation: f64,
    tick_size: f64,
    tick_padding: f64,
    tick_position: f64,
    position: AxisPosition,
    dims: &AxisTickDimensions,
) -> TickLabelProps {
    let rotated = tick_label_rotation != 0.0;
    let offset = tick_size + tick_padding;
    match position {
        AxisPosition::Left | AxisPosition::Right => {
            let left = position == AxisPosition::Left;
            let align = match (rotated, left) {
                (true, _) => HorizontalAlign::Center,
                (false, true) => HorizontalAlign::Right,
                (false, false) => HorizontalAlign::Left,
            };
            TickLabelProps {
                x: if left { -dims.max_label_bbox_width } else { offset },
                y: tick_position - dims.max_label_bbox_height / 2.0,
                align,
                vertical_align: VerticalAlign::Middle,
            }
        }
        AxisPosition::Top | AxisPosition::Bottom => {
            let top = position == AxisPosition::Top;
            let vertical_align = match (rotated, top) {
                (true, _) => VerticalAlign::Middle,
                (false, true) => VerticalAlign::Bottom,
                (false, false) => VerticalAlign::Top,
            };
            TickLabelProps {
                x: tick_position - dims.max_label_text_width / 2.0,
                y: if top { 0.0 } else { offset },
                align: HorizontalAlign::Center,
                vertical_align,
            }
        }
    }
}

/// Moves a label anchor to the label's center so it can rotate in place.
pub fn center_rotation_origin(dims: &AxisTickDimensions, anchor: Point) -> RotationOrigin {
    let offset = Size::new(dims.max_label_text_width / 2.0, dims.max_label_text_height / 2.0);
    RotationOrigin {
        point: Point::new(anchor.x + offset.width, anchor.y + offset.height),
        offset,
    }
}

/// Tick line of a vertical axis; left ticks start after the padding.
pub fn get_vertical_axis_tick_line_props(
    position: AxisPosition,
    tick_padding: f64,
    tick_size: f64,
    tick_position: f64,
) -> Line {
    let (x0, x1) = if position == AxisPosition::Left {
        (tick_padding, tick_padding + tick_size)
    } else {
        (0.0, tick_size)
    };
    Line::new((x0, tick_position), (x1, tick_position))
}

/// Tick line of a horizontal axis; top ticks start below the labels.
pub fn get_horizontal_axis_tick_line_props(
    position: AxisPosition,
    tick_padding: f64,
    tick_size: f64,
    tick_position: f64,
    max_label_bbox_height: f64,
) -> Line {
    let (y0, y1) = if position == AxisPosition::Top {
        let start = max_label_bbox_height + tick_padding;
        (start, start + tick_size)
    } else {
        (0.0, tick_size)
    };
    Line::new((tick_position, y0), (tick_position, y1))
}

/// Grid line across the chart for a vertical axis tick.
pub fn get_vertical_axis_grid_line_props(tick_position: f64, chart_width: f64) -> Line {
    Line::new((0.0, tick_position), (chart_width, tick_position))
}

/// Grid line across the chart for a horizontal axis tick.
pub fn get_horizontal_axis_grid_line_props(tick_position: f64, chart_height: f64) -> Line {
    Line::new((tick_position, 0.0), (tick_position, chart_height))
}

/// Resolved label formatting for one axis.
enum Labeler<'a> {
    Custom(&'a TickFormatter),
    Time { step: f64, zone: chrono::FixedOffset },
    Plain,
}

impl<'a> Labeler<'a> {
    fn new(axis_spec: &'a AxisSpec, theme: &'a AxisTheme, scale: &Scale) -> Self {
        if let Some(f) = axis_spec.tick_format.as_ref().or(theme.default_formatter.as_ref()) {
            return Self::Custom(f);
        }
        match scale.as_continuous() {
            Some(s) if s.kind() == ContinuousKind::Time => {
                let step = match s.ticks() {
                    [a, b, ..] => b - a,
                    _ => TIME_FALLBACK_STEP,
                };
                Self::Time {
                    step,
                    zone: s.time_zone(),
                }
            }
            _ => Self::Plain,
        }
    }

    fn format(&self, value: &Datum) -> String {
        match self {
            Self::Custom(f) => f(value),
            Self::Time { step, zone } => match value.as_f64() {
                Some(v) => format_time_tick(v, *step, *zone),
                None => alloc::format!("{value}"),
            },
            Self::Plain => alloc::format!("{value}"),
        }
    }
}

/// One day, used to label a time axis with fewer than two ticks.
const TIME_FALLBACK_STEP: f64 = 86_400_000.0;

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::domain::Interval;
    use alloc::string::ToString;
    use alloc::vec;
    use vizir_text::{MonospaceTextMeasurer, TextBox};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// Every label measures 10×10.
    struct Square;

    impl TextMeasurer for Square {
        fn measure(&self, _text: &str, _style: &TextStyle) -> TextBox {
            TextBox::new(10.0, 10.0)
        }
    }

    fn unit_y() -> Vec<YDomain> {
        vec![YDomain {
            group_id: GroupId::new("group_1"),
            kind: ContinuousKind::Linear,
            domain: Interval::new(0.0, 1.0),
            is_band_scale: false,
        }]
    }

    fn unit_x() -> XDomain {
        XDomain {
            kind: ScaleKind::Linear,
            domain: Domain::Continuous(Interval::new(0.0, 1.0)),
            is_band_scale: false,
            min_interval: 0.0,
            time_zone: None,
        }
    }

    fn dims(bbox: f64) -> AxisTickDimensions {
        AxisTickDimensions {
            scale_kind: ScaleKind::Linear,
            scale_domain: Domain::Continuous(Interval::new(0.0, 1.0)),
            tick_values: Vec::new(),
            tick_labels: Vec::new(),
            max_label_bbox_width: 10.0,
            max_label_bbox_height: bbox,
            max_label_text_width: 10.0,
            max_label_text_height: bbox,
        }
    }

    fn unit_ticks() -> Vec<PositionedTick> {
        (0..=10)
            .map(|i| {
                let value = f64::from(i) / 10.0;
                PositionedTick {
                    value: Datum::Number(value),
                    label: Datum::Number(value).to_string(),
                    position: 100.0 - f64::from(i) * 10.0,
                }
            })
            .collect()
    }

    fn labels(ticks: &[PositionedTick]) -> Vec<&str> {
        ticks.iter().map(|t| t.label.as_str()).collect()
    }

    /// Measures an unrotated axis with [`Square`] labels.
    fn measure_square(
        spec: &AxisSpec,
        x: &XDomain,
        ys: &[YDomain],
        theme: &AxisTheme,
    ) -> Option<AxisTickDimensions> {
        compute_axis_tick_dimensions(spec, x, ys, 1, &Square, ChartRotation::Deg0, theme)
    }

    /// The unit domain scale of `spec` over a 100px range, top to bottom.
    fn unit_scale(spec: &AxisSpec) -> Scale {
        get_scale_for_axis_spec(
            spec,
            &unit_x(),
            &unit_y(),
            0,
            ChartRotation::Deg0,
            100.0,
            0.0,
            0.0,
        )
        .unwrap()
    }

    #[test]
    fn measures_unit_axis() {
        let spec = AxisSpec::new("axis_1", AxisPosition::Left, "group_1");
        let theme = AxisTheme::new();
        let d = measure_square(&spec, &unit_x(), &unit_y(), &theme).unwrap();
        assert_eq!(d.scale_kind, ScaleKind::Linear);
        assert_eq!(d.scale_domain, Domain::Continuous(Interval::new(0.0, 1.0)));
        assert_eq!(
            d.tick_labels,
            ["0", "0.1", "0.2", "0.3", "0.4", "0.5", "0.6", "0.7", "0.8", "0.9", "1"]
        );
        assert_eq!(d.max_label_bbox_width, 10.0);
        assert_eq!(d.max_label_bbox_height, 10.0);
        assert_eq!(d.max_label_text_width, 10.0);
        assert_eq!(d.max_label_text_height, 10.0);
    }

    #[test]
    fn padding_widens_box_not_text() {
        let spec = AxisSpec::new("x", AxisPosition::Bottom, "g");
        let theme = AxisTheme::new().with_tick_label_padding(2.0);
        let m = MonospaceTextMeasurer::new(5.0, 10.0);
        let d = compute_axis_tick_dimensions(
            &spec,
            &unit_x(),
            &[],
            1,
            &m,
            ChartRotation::Deg0,
            &theme,
        )
        .unwrap();
        // "0.1" is the widest label.
        assert_eq!(d.max_label_text_width, 15.0);
        assert_eq!(d.max_label_bbox_width, 19.0);
        assert_eq!(d.max_label_bbox_height, 10.0);
    }

    #[test]
    fn hidden_or_unresolved_axes_are_skipped() {
        let theme = AxisTheme::new();
        let hidden = AxisSpec::new("a", AxisPosition::Left, "group_1").with_hide(true);
        assert!(measure_square(&hidden, &unit_x(), &unit_y(), &theme).is_none());
        let orphan = AxisSpec::new("b", AxisPosition::Left, "missing");
        assert!(measure_square(&orphan, &unit_x(), &unit_y(), &theme).is_none());
    }

    #[test]
    fn hidden_labels_measure_zero() {
        let spec = AxisSpec::new("a", AxisPosition::Left, "group_1");
        let theme = AxisTheme::new().with_show_tick_labels(false);
        let d = measure_square(&spec, &unit_x(), &unit_y(), &theme).unwrap();
        assert_eq!(d.tick_labels.len(), 11);
        assert_eq!(d.max_label_bbox_width, 0.0);
        assert_eq!(d.max_label_text_height, 0.0);
    }

    #[test]
    fn formatter_precedence() {
        let theme = AxisTheme::new().with_default_formatter(|_| String::from("theme"));
        let plain = AxisSpec::new("a", AxisPosition::Left, "group_1");
        let custom = plain.clone().with_tick_format(|v| alloc::format!("{v}%"));
        let scale = unit_scale(&plain);
        assert_eq!(get_available_ticks(&plain, &scale, 0, &theme)[0].label, "theme");
        assert_eq!(get_available_ticks(&custom, &scale, 0, &theme)[1].label, "0.1%");
    }

    #[test]
    fn rotated_bounding_boxes() {
        let a = compute_rotated_label_dimensions(Size::new(1.0, 2.0), 0.0);
        assert_eq!(a, Size::new(1.0, 2.0));
        let b = compute_rotated_label_dimensions(Size::new(1.0, 2.0), 90.0);
        assert!(approx(b.width, 2.0) && approx(b.height, 1.0));
        let c = compute_rotated_label_dimensions(Size::new(1.0, 1.0), 45.0);
        assert!(approx(c.width, core::f64::consts::SQRT_2));
        assert!(approx(c.height, core::f64::consts::SQRT_2));
    }

    #[test]
    fn y_domain_follows_rotation() {
        assert!(is_y_domain(AxisPosition::Left, ChartRotation::Deg0));
        assert!(!is_y_domain(AxisPosition::Left, ChartRotation::Deg90));
        assert!(!is_y_domain(AxisPosition::Top, ChartRotation::Deg0));
        assert!(is_y_domain(AxisPosition::Top, ChartRotation::Deg90));
        assert!(is_vertical_axis(AxisPosition::Right));
        assert!(is_horizontal_axis(AxisPosition::Bottom));
    }

    #[test]
    fn available_ticks_on_vertical_axis() {
        let spec = AxisSpec::new("a", AxisPosition::Left, "group_1");
        let scale = unit_scale(&spec);
        let ticks = get_available_ticks(&spec, &scale, 0, &AxisTheme::new());
        assert_eq!(ticks.len(), 11);
        for (tick, expected) in ticks.iter().zip(unit_ticks()) {
            assert_eq!(tick.label, expected.label);
            assert!(approx(tick.position, expected.position));
        }
    }

    #[test]
    fn band_ticks_sit_at_cluster_centers() {
        let x = XDomain {
            kind: ScaleKind::Ordinal,
            domain: Domain::Ordinal(vec![Datum::from("a"), Datum::from("b")]),
            is_band_scale: true,
            min_interval: 0.0,
            time_zone: None,
        };
        let spec = AxisSpec::new("x", AxisPosition::Bottom, "g");
        let scale = get_scale_for_axis_spec(
            &spec,
            &x,
            &[],
            2,
            ChartRotation::Deg0,
            0.0,
            100.0,
            0.0,
        )
        .unwrap();
        let ticks = get_available_ticks(&spec, &scale, 2, &AxisTheme::new());
        assert_eq!(labels(&ticks), ["a", "b"]);
        assert!(approx(ticks[0].position, 25.0));
        assert!(approx(ticks[1].position, 75.0));
    }

    #[test]
    fn visible_ticks_keep_everything_that_fits() {
        let spec = AxisSpec::new("a", AxisPosition::Left, "g");
        let visible = get_visible_ticks(unit_ticks(), &spec, &dims(10.0));
        assert_eq!(
            labels(&visible),
            ["1", "0.9", "0.8", "0.7", "0.6", "0.5", "0.4", "0.3", "0.2", "0.1", "0"]
        );
        let horizontal = AxisSpec::new("b", AxisPosition::Bottom, "g");
        assert_eq!(get_visible_ticks(unit_ticks(), &horizontal, &dims(10.0)).len(), 11);
    }

    #[test]
    fn colliding_labels_are_dropped() {
        let spec = AxisSpec::new("a", AxisPosition::Left, "g");
        let visible = get_visible_ticks(unit_ticks(), &spec, &dims(20.0));
        assert_eq!(labels(&visible), ["1", "0.8", "0.6", "0.4", "0.2", "0"]);
        let positions: Vec<f64> = visible.iter().map(|t| t.position).collect();
        assert_eq!(positions, [0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn overlapping_ticks_and_labels_on_request() {
        let both = AxisSpec::new("a", AxisPosition::Left, "g")
            .with_show_overlapping_ticks(true)
            .with_show_overlapping_labels(true);
        let visible = get_visible_ticks(unit_ticks(), &both, &dims(20.0));
        assert_eq!(
            labels(&visible),
            ["1", "0.9", "0.8", "0.7", "0.6", "0.5", "0.4", "0.3", "0.2", "0.1", "0"]
        );

        let ticks_only =
            AxisSpec::new("a", AxisPosition::Left, "g").with_show_overlapping_ticks(true);
        let visible = get_visible_ticks(unit_ticks(), &ticks_only, &dims(20.0));
        assert_eq!(
            labels(&visible),
            ["1", "", "0.8", "", "0.6", "", "0.4", "", "0.2", "", "0"]
        );
        assert_eq!(visible[1].value, Datum::Number(0.9));
        assert_eq!(visible[1].position, 10.0);
    }

    #[test]
    fn min_max_ranges() {
        let chart = Size::new(100.0, 50.0);
        let range = |p, r| get_min_max_range(p, r, chart);
        assert_eq!(range(AxisPosition::Bottom, ChartRotation::Deg0), (0.0, 100.0));
        assert_eq!(range(AxisPosition::Bottom, ChartRotation::Deg90), (0.0, 100.0));
        assert_eq!(range(AxisPosition::Bottom, ChartRotation::Deg180), (100.0, 0.0));
        assert_eq!(range(AxisPosition::Bottom, ChartRotation::DegNeg90), (100.0, 0.0));
        assert_eq!(range(AxisPosition::Left, ChartRotation::Deg0), (50.0, 0.0));
        assert_eq!(range(AxisPosition::Left, ChartRotation::Deg90), (0.0, 50.0));
        assert_eq!(range(AxisPosition::Left, ChartRotation::Deg180), (0.0, 50.0));
        assert_eq!(range(AxisPosition::Right, ChartRotation::DegNeg90), (50.0, 0.0));
    }

    #[test]
    fn label_props_on_vertical_axes() {
        let d = dims(10.0);
        let left = get_tick_label_props(0.0, 10.0, 5.0, 0.0, AxisPosition::Left, &d);
        assert_eq!((left.x, left.y), (-10.0, -5.0));
        assert_eq!(left.align, HorizontalAlign::Right);
        assert_eq!(left.vertical_align, VerticalAlign::Middle);

        let left_rotated = get_tick_label_props(90.0, 10.0, 5.0, 0.0, AxisPosition::Left, &d);
        assert_eq!((left_rotated.x, left_rotated.y), (-10.0, -5.0));
        assert_eq!(left_rotated.align, HorizontalAlign::Center);

        let right = get_tick_label_props(0.0, 10.0, 5.0, 0.0, AxisPosition::Right, &d);
        assert_eq!((right.x, right.y), (15.0, -5.0));
        assert_eq!(right.align, HorizontalAlign::Left);
    }

    #[test]
    fn label_props_on_horizontal_axes() {
        let d = dims(10.0);
        let top = get_tick_label_props(0.0, 10.0, 5.0, 0.0, AxisPosition::Top, &d);
        assert_eq!((top.x, top.y), (-5.0, 0.0));
        assert_eq!(top.align, HorizontalAlign::Center);
        assert_eq!(top.vertical_align, VerticalAlign::Bottom);

        let bottom = get_tick_label_props(0.0, 10.0, 5.0, 0.0, AxisPosition::Bottom, &d);
        assert_eq!((bottom.x, bottom.y), (-5.0, 15.0));
        assert_eq!(bottom.vertical_align, VerticalAlign::Top);

        let bottom_rotated = get_tick_label_props(90.0, 10.0, 5.0, 0.0, AxisPosition::Bottom, &d);
        assert_eq!(bottom_rotated.vertical_align, VerticalAlign::Middle);
    }

    #[test]
    fn rotation_origin_is_label_center() {
        let mut d = dims(20.0);
        let origin = center_rotation_origin(&d, Point::ZERO);
        assert_eq!(origin.offset, Size::new(5.0, 10.0));
        assert_eq!(origin.point, Point::new(5.0, 10.0));

        d.max_label_text_width = 20.0;
        d.max_label_text_height = 10.0;
        let origin = center_rotation_origin(&d, Point::new(30.0, 40.0));
        assert_eq!(origin.point, Point::new(35.0, 50.0));
    }

    #[test]
    fn tick_and_grid_lines() {
        let line = |l: Line| [l.p0.x, l.p0.y, l.p1.x, l.p1.y];
        assert_eq!(
            line(get_vertical_axis_tick_line_props(AxisPosition::Left, 5.0, 10.0, 10.0)),
            [5.0, 10.0, 15.0, 10.0]
        );
        assert_eq!(
            line(get_vertical_axis_tick_line_props(AxisPosition::Right, 5.0, 10.0, 10.0)),
            [0.0, 10.0, 10.0, 10.0]
        );
        assert_eq!(
            line(get_horizontal_axis_tick_line_props(AxisPosition::Top, 5.0, 10.0, 10.0, 20.0)),
            [10.0, 25.0, 10.0, 35.0]
        );
        assert_eq!(
            line(get_horizontal_axis_tick_line_props(AxisPosition::Bottom, 5.0, 10.0, 10.0, 20.0)),
            [10.0, 0.0, 10.0, 10.0]
        );
        assert_eq!(line(get_vertical_axis_grid_line_props(10.0, 100.0)), [0.0, 10.0, 100.0, 10.0]);
        assert_eq!(
            line(get_horizontal_axis_grid_line_props(10.0, 200.0)),
            [10.0, 0.0, 10.0, 200.0]
        );
    }

    #[test]
    fn time_axes_use_calendar_labels() {
        let day = 86_400_000.0;
        let x = XDomain {
            kind: ScaleKind::Time,
            domain: Domain::Continuous(Interval::new(0.0, 20.0 * day)),
            is_band_scale: false,
            min_interval: day,
            time_zone: Some(String::from("utc")),
        };
        let spec = AxisSpec::new("x", AxisPosition::Bottom, "g");
        let d = measure_square(&spec, &x, &[], &AxisTheme::new()).unwrap();
        assert_eq!(d.tick_labels[0], "Jan 01");
        assert!(d.tick_labels.len() > 2);
        assert!(d.tick_labels.iter().all(|l| l.starts_with("Jan ")));
    }
}
