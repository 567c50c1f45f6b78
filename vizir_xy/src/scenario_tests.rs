// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use chrono::{FixedOffset, Offset, Utc};
use hashbrown::HashMap;
use kurbo::Size;
use peniko::color::palette::css;
use vizir_text::MonospaceTextMeasurer;

use crate::{
    AxisPosition, AxisSpec, AxisTheme, BarDatum, BarSeriesSpec, ChartRotation, ContinuousKind,
    CustomDomain, Datum, Domain, DomainRange, GroupId, Interval, ScaleKind, SeriesKind, StepPolicy,
    XSeriesSpec, YSeriesSpec, compute_axis_tick_dimensions, compute_x_scale, compute_y_scales,
    get_available_ticks, get_min_max_range, get_scale_for_axis_spec, get_visible_ticks,
    merge_x_domain, merge_y_domain, render_bars,
};

const MEASURER: MonospaceTextMeasurer = MonospaceTextMeasurer::new(10.0, 12.0);
const CHART: Size = Size::new(300.0, 200.0);

fn keyed(points: &[(&str, f64)]) -> Vec<(Datum, f64)> {
    points.iter().map(|&(x, y)| (Datum::from(x), y)).collect()
}

fn labels(ticks: &[crate::PositionedTick]) -> Vec<&str> {
    ticks.iter().map(|t| t.label.as_str()).collect()
}

fn positions(ticks: &[crate::PositionedTick]) -> Vec<f64> {
    ticks.iter().map(|t| t.position).collect()
}

#[test]
fn clustered_ordinal_bars() {
    let a = [("a", 10.0), ("b", 20.0), ("c", 5.0)];
    let b = [("a", 5.0), ("b", 40.0), ("c", 15.0), ("a", 5.0)];

    let x_specs = [
        XSeriesSpec::new(SeriesKind::Bar, ScaleKind::Ordinal),
        XSeriesSpec::new(SeriesKind::Bar, ScaleKind::Ordinal),
    ];
    let x_values: Vec<Datum> = a.iter().chain(&b).map(|&(x, _)| Datum::from(x)).collect();
    let x = merge_x_domain(&x_specs, &x_values, None).unwrap();
    assert_eq!(x.kind, ScaleKind::Ordinal);
    assert!(x.is_band_scale);
    assert_eq!(
        x.domain,
        Domain::Ordinal(vec![Datum::from("a"), Datum::from("b"), Datum::from("c")])
    );

    let y_specs = [
        YSeriesSpec::new("a", "g", SeriesKind::Bar).with_layer(keyed(&a)),
        YSeriesSpec::new("b", "g", SeriesKind::Bar).with_layer(keyed(&b)),
    ];
    let y = merge_y_domain(&y_specs, &HashMap::new()).unwrap();
    assert_eq!(y[0].domain, Interval::new(0.0, 40.0));

    let (x0, x1) = get_min_max_range(AxisPosition::Bottom, ChartRotation::Deg0, CHART);
    let (y0, y1) = get_min_max_range(AxisPosition::Left, ChartRotation::Deg0, CHART);
    assert_eq!((y0, y1), (200.0, 0.0));
    let x_scale = compute_x_scale(&x, 2, x0, x1, 0.0);
    let y_scales = compute_y_scales(&y, y0, y1);
    let y_scale = &y_scales[&GroupId::new("g")];
    assert_eq!(x_scale.bandwidth(), 50.0);

    let theme = AxisTheme::new();
    let bottom = AxisSpec::new("bottom", AxisPosition::Bottom, "g");
    let dims =
        compute_axis_tick_dimensions(&bottom, &x, &y, 2, &MEASURER, ChartRotation::Deg0, &theme)
            .unwrap();
    assert_eq!(dims.tick_labels, ["a", "b", "c"]);
    assert_eq!(dims.max_label_text_width, 10.0);
    assert_eq!(dims.max_label_bbox_width, 12.0);
    let axis_scale =
        get_scale_for_axis_spec(&bottom, &x, &y, 2, ChartRotation::Deg0, x0, x1, 0.0).unwrap();
    let ticks = get_visible_ticks(
        get_available_ticks(&bottom, &axis_scale, 2, &theme),
        &bottom,
        &dims,
    );
    assert_eq!(labels(&ticks), ["a", "b", "c"]);
    assert_eq!(positions(&ticks), [50.0, 150.0, 250.0]);

    let left = AxisSpec::new("left", AxisPosition::Left, "g");
    let dims =
        compute_axis_tick_dimensions(&left, &x, &y, 2, &MEASURER, ChartRotation::Deg0, &theme)
            .unwrap();
    assert_eq!(dims.tick_labels.len(), 9);
    assert_eq!(dims.max_label_text_width, 20.0);
    assert_eq!(dims.max_label_bbox_height, 12.0);
    let axis_scale =
        get_scale_for_axis_spec(&left, &x, &y, 2, ChartRotation::Deg0, y0, y1, 0.0).unwrap();
    let ticks =
        get_visible_ticks(get_available_ticks(&left, &axis_scale, 2, &theme), &left, &dims);
    assert_eq!(ticks.len(), 9);
    assert_eq!(ticks[0].label, "40");
    assert_eq!(ticks[0].position, 0.0);
    assert_eq!(ticks[8].position, 200.0);

    let data = |points: &[(&str, f64)]| -> Vec<BarDatum> {
        points.iter().map(|&(x, y)| BarDatum::new(x, y)).collect()
    };
    let first = BarSeriesSpec::new("a").with_fill(css::RED);
    let second = BarSeriesSpec::new("b").with_series_index(1).with_fill(css::BLUE);
    let bars_a = render_bars(&first, &data(&a), &x_scale, y_scale, &MEASURER);
    let b = [("b", 40.0), ("d", 1.0)];
    let bars_b = render_bars(&second, &data(&b), &x_scale, y_scale, &MEASURER);

    let rects: Vec<_> = bars_a.iter().map(|b| (b.x, b.y, b.width, b.height)).collect();
    assert_eq!(
        rects,
        [(0.0, 150.0, 50.0, 50.0), (100.0, 100.0, 50.0, 100.0), (200.0, 175.0, 50.0, 25.0)]
    );
    assert_eq!(bars_b.len(), 1);
    assert_eq!((bars_b[0].x, bars_b[0].y, bars_b[0].height), (150.0, 0.0, 200.0));
    assert_eq!(bars_b[0].series_id.as_str(), "b");
}

#[test]
fn banded_continuous_bars_and_hit_testing() {
    let specs = [XSeriesSpec::new(SeriesKind::Bar, ScaleKind::Linear)];
    let values: Vec<Datum> = [3.0, 0.0, 1.0, 2.0].into_iter().map(Datum::from).collect();
    let x = merge_x_domain(&specs, &values, None).unwrap();
    assert_eq!(x.domain, Domain::Continuous(Interval::new(0.0, 3.0)));
    assert_eq!(x.min_interval, 1.0);

    let x_scale = compute_x_scale(&x, 1, 0.0, 100.0, 0.0);
    assert_eq!(x_scale.bandwidth(), 25.0);
    assert_eq!(x_scale.range(), (0.0, 75.0));
    assert_eq!(x_scale.scale(&Datum::from(3.0)), Some(75.0));
    assert_eq!(
        x_scale.invert_with_step(60.0, StepPolicy::Step),
        Some(Datum::Number(2.0))
    );

    let bottom = AxisSpec::new("x", AxisPosition::Bottom, "g");
    let ticks = get_available_ticks(&bottom, &x_scale, 1, &AxisTheme::new());
    assert_eq!(labels(&ticks), ["0", "1", "2", "3"]);
    assert_eq!(positions(&ticks), [12.5, 37.5, 62.5, 87.5]);

    let y_specs = [YSeriesSpec::new("s", "g", SeriesKind::Bar)
        .with_layer([(Datum::from(0.0), 4.0), (Datum::from(3.0), 8.0)])];
    let y = merge_y_domain(&y_specs, &HashMap::new()).unwrap();
    let y_scales = compute_y_scales(&y, 100.0, 0.0);
    let bars = render_bars(
        &BarSeriesSpec::new("s"),
        &[BarDatum::new(0.0, 4.0), BarDatum::new(3.0, 8.0), BarDatum::new(9.0, 1.0)],
        &x_scale,
        &y_scales[&GroupId::new("g")],
        &MEASURER,
    );
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[1].rect(), kurbo::Rect::new(75.0, 0.0, 100.0, 100.0));
    assert_eq!(bars[0].rect(), kurbo::Rect::new(0.0, 50.0, 25.0, 100.0));
}

#[test]
fn rotated_chart_puts_x_on_the_left() {
    let specs = [XSeriesSpec::new(SeriesKind::Bar, ScaleKind::Ordinal)];
    let values: Vec<Datum> = ["q1", "q2", "q3", "q4"].into_iter().map(Datum::from).collect();
    let x = merge_x_domain(&specs, &values, None).unwrap();
    let left = AxisSpec::new("left", AxisPosition::Left, "g");
    let (min, max) = get_min_max_range(AxisPosition::Left, ChartRotation::Deg90, CHART);
    assert_eq!((min, max), (0.0, 200.0));
    let scale =
        get_scale_for_axis_spec(&left, &x, &[], 1, ChartRotation::Deg90, min, max, 0.0).unwrap();
    assert_eq!(scale.kind(), ScaleKind::Ordinal);
    let ticks = get_available_ticks(&left, &scale, 1, &AxisTheme::new());
    assert_eq!(labels(&ticks), ["q1", "q2", "q3", "q4"]);
    assert_eq!(positions(&ticks), [25.0, 75.0, 125.0, 175.0]);
}

#[test]
fn mixed_time_zones_fall_back_to_utc() {
    let day = 86_400_000.0;
    let specs = [
        XSeriesSpec::new(SeriesKind::Line, ScaleKind::Time).with_time_zone("UTC+2"),
        XSeriesSpec::new(SeriesKind::Line, ScaleKind::Time).with_time_zone("utc"),
    ];
    let values: Vec<Datum> = (0..10).map(|d| Datum::from(f64::from(d) * day)).collect();
    let x = merge_x_domain(&specs, &values, None).unwrap();
    assert_eq!(x.kind, ScaleKind::Time);
    assert_eq!(x.time_zone.as_deref(), Some("utc"));
    assert_eq!(x.min_interval, day);

    let scale = compute_x_scale(&x, 1, 0.0, 900.0, 0.0);
    let continuous = scale.as_continuous().unwrap();
    assert_eq!(continuous.kind(), ContinuousKind::Time);
    assert_eq!(continuous.time_zone(), Utc.fix());
    assert_eq!(continuous.scale(day), Some(100.0));
    let hit = continuous.invert_with_data(140.0, &[0.0, day, 2.0 * day]).unwrap();
    assert_eq!(hit.value, day);

    let bottom = AxisSpec::new("time", AxisPosition::Bottom, "g");
    let dims = compute_axis_tick_dimensions(
        &bottom,
        &x,
        &[],
        1,
        &MEASURER,
        ChartRotation::Deg0,
        &AxisTheme::new(),
    )
    .unwrap();
    assert_eq!(dims.tick_labels[0], "Jan 01");
}

#[test]
fn single_zone_is_kept_for_time_domains() {
    let specs = [XSeriesSpec::new(SeriesKind::Point, ScaleKind::Time).with_time_zone("UTC+2")];
    let x = merge_x_domain(&specs, &[Datum::from(0.0)], None).unwrap();
    assert_eq!(x.time_zone.as_deref(), Some("utc+2"));
    let scale = compute_x_scale(&x, 1, 0.0, 100.0, 0.0);
    let two_hours = FixedOffset::east_opt(2 * 3600).unwrap();
    assert_eq!(scale.as_continuous().unwrap().time_zone(), two_hours);
}

#[test]
fn custom_domains_flow_through() {
    let specs = [XSeriesSpec::new(SeriesKind::Line, ScaleKind::Linear)];
    let values: Vec<Datum> = (1..=5).map(|v| Datum::from(f64::from(v))).collect();
    let custom = CustomDomain::from(DomainRange::new(0.0, 3.0));
    let x = merge_x_domain(&specs, &values, Some(&custom)).unwrap();
    assert_eq!(x.domain, Domain::Continuous(Interval::new(0.0, 3.0)));

    let bad = CustomDomain::from(DomainRange::new(10.0, 0.0));
    let err = merge_x_domain(&specs, &values, Some(&bad)).unwrap_err();
    assert_eq!(err.to_string(), "custom xDomain is invalid, min is greater than max");

    let shape = CustomDomain::Values(values.clone());
    let err = merge_x_domain(&specs, &values, Some(&shape)).unwrap_err();
    assert!(err.to_string().contains("DomainRange object, not an array"));

    let y_specs = [YSeriesSpec::new("s", "g", SeriesKind::Line)
        .with_layer([(Datum::from(1.0), 2.0), (Datum::from(2.0), 7.0)])];
    let mut ranges = HashMap::new();
    ranges.insert(GroupId::new("g"), DomainRange::lower(100.0));
    let err = merge_y_domain(&y_specs, &ranges).unwrap_err();
    assert_eq!(
        err.to_string(),
        "custom yDomain for g is invalid, custom min is greater than computed max"
    );
}

#[test]
fn log_bars_include_zero_values() {
    let y_specs = [YSeriesSpec::new("s", "g", SeriesKind::Bar)
        .with_y_scale_kind(ContinuousKind::Log)
        .with_layer([(Datum::from("a"), 0.0), (Datum::from("b"), 100.0)])];
    let y = merge_y_domain(&y_specs, &HashMap::new()).unwrap();
    assert_eq!(y[0].kind, ContinuousKind::Log);
    assert_eq!(y[0].domain, Interval::new(0.0, 100.0));
    let y_scales = compute_y_scales(&y, 100.0, 0.0);
    let y_scale = &y_scales[&GroupId::new("g")];
    assert_eq!(y_scale.domain(), Interval::new(1.0, 100.0));

    let x_specs = [XSeriesSpec::new(SeriesKind::Bar, ScaleKind::Ordinal)];
    let x = merge_x_domain(&x_specs, &[Datum::from("a"), Datum::from("b")], None).unwrap();
    let x_scale = compute_x_scale(&x, 1, 0.0, 100.0, 0.0);
    let bars = render_bars(
        &BarSeriesSpec::new("s"),
        &[BarDatum::new("a", 0.0), BarDatum::new("b", 100.0)],
        &x_scale,
        y_scale,
        &MEASURER,
    );
    assert_eq!((bars[0].y, bars[0].height), (100.0, 0.0));
    assert_eq!((bars[1].y, bars[1].height), (0.0, 100.0));
    let names: Vec<String> = bars.iter().map(|b| b.value.x.to_string()).collect();
    assert_eq!(names, ["a", "b"]);
}
