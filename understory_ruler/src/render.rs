// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ruler draw routine.
//!
//! Drawing happens in four passes, always in this order:
//!
//! 1. Background fill (or clear, for a transparent background) over the full
//!    device-pixel backing store, followed by the one-time `scale(2, 2)` that
//!    switches all later coordinates to logical pixels.
//! 2. Range highlight, when both range bounds are finite.
//! 3. Tick lines for every visible subdivision, queued as one path and
//!    stroked once.
//! 4. Labels for every visible main tick, each with an optional background.

use alloc::vec::Vec;
use core::f64::consts::FRAC_PI_2;
use core::ops::RangeInclusive;

use kurbo::{Line, Point, Rect, Size, Vec2};

use crate::canvas::{RulerCanvas, TextBaseline};
use crate::options::{Direction, Orientation, RulerOptions, format_with, is_transparent};

/// Label distance from the tick edge for `start` and `end` directions.
const LABEL_EDGE_INSET: f64 = 17.0;
/// Cross-axis offset of a label from its anchor.
const LABEL_CROSS_OFFSET: f64 = 10.0;
/// Along-axis nudge per alignment step.
const LABEL_ALIGN_NUDGE: f64 = 3.0;

/// Per-draw parameters derived from options, size, scroll and zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderParams {
    /// Axis the ruler runs along.
    pub orientation: Orientation,
    /// Cross-axis size in logical pixels.
    pub container_size: f64,
    /// Visible along-axis size in logical pixels.
    pub size: f64,
    /// Scroll position in ruler units.
    pub scroll_pos: f64,
    /// Pixels per ruler unit.
    pub zoom: f64,
    /// Pixels between two main ticks.
    pub zoom_unit: f64,
    /// First main tick index to consider.
    pub min_range: i64,
    /// Last main tick index to consider, inclusive.
    pub max_range: i64,
    /// Resolved length of main tick lines.
    pub main_line_size: f64,
}

impl RenderParams {
    /// Computes the parameters for drawing at `scroll_pos` and `zoom` into a
    /// ruler of logical `size`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "tick indices are the visible span divided by the tick spacing"
    )]
    pub fn new(options: &RulerOptions, size: Size, scroll_pos: f64, zoom: f64) -> Self {
        let orientation = options.orientation;
        let (along, container_size) = match orientation {
            Orientation::Horizontal => (size.width, size.height),
            Orientation::Vertical => (size.height, size.width),
        };
        let zoom_unit = zoom * options.unit;
        let start_px = scroll_pos * zoom;
        let min = libm::floor(start_px / zoom_unit);
        let max = libm::ceil((start_px + along) / zoom_unit);
        let (min_range, max_range) = if min.is_finite() && max.is_finite() {
            (min as i64, max as i64)
        } else {
            (0, -1)
        };
        Self {
            orientation,
            container_size,
            size: along,
            scroll_pos,
            zoom,
            zoom_unit,
            min_range,
            max_range,
            main_line_size: options.main_line_size.resolve(container_size),
        }
    }

    /// Returns `true` if the scale can produce ticks at all.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.zoom_unit.is_finite() && self.zoom_unit > 0.0
    }

    /// Main tick indices covering the visible span.
    #[must_use]
    pub fn tick_indices(&self) -> RangeInclusive<i64> {
        self.min_range..=self.max_range
    }

    /// Converts a ruler value to a logical pixel position along the ruler.
    #[must_use]
    pub fn to_pixel(&self, value: f64) -> f64 {
        (value - self.scroll_pos) * self.zoom
    }
}

/// Line length for the subdivision at `index` within a main tick.
#[must_use]
pub fn segment_line_size(index: u32, main: f64, long: f64, short: f64) -> f64 {
    if index == 0 {
        main
    } else if index % 2 == 0 {
        long
    } else {
        short
    }
}

/// Cross-axis start of a tick line of `line_size`.
#[must_use]
pub fn segment_margin(direction: Direction, line_size: f64, container_size: f64) -> f64 {
    match direction {
        Direction::Start => 0.0,
        Direction::Center => container_size / 2.0 - line_size / 2.0,
        Direction::End => container_size - line_size,
    }
}

/// Text baseline matching the tick direction.
#[must_use]
pub fn text_baseline(direction: Direction) -> TextBaseline {
    match direction {
        Direction::Start => TextBaseline::Top,
        Direction::Center => TextBaseline::Middle,
        Direction::End => TextBaseline::Bottom,
    }
}

/// Every visible tick line, in draw order.
#[must_use]
pub fn tick_lines(options: &RulerOptions, params: &RenderParams) -> Vec<Line> {
    let mut lines = Vec::new();
    if !params.is_drawable() || options.segment == 0 {
        return lines;
    }
    let segment = f64::from(options.segment);
    let long = options.long_line_size.resolve(params.container_size);
    let short = options.short_line_size.resolve(params.container_size);
    let offset = options.line_offset;

    for index in params.tick_indices() {
        if !options.negative_ruler && index < 0 {
            continue;
        }
        let start_value = tick_value(index, options.unit);
        let start_pos = params.to_pixel(start_value);

        for j in 0..options.segment {
            let fraction = f64::from(j) / segment;
            let pos = start_pos + fraction * params.zoom_unit;
            let value = start_value + fraction * options.unit;
            if pos < 0.0 || pos >= params.size || !options.in_range(value) {
                continue;
            }
            let line_size = segment_line_size(j, params.main_line_size, long, short);
            let margin = segment_margin(options.direction, line_size, params.container_size);
            let (p0, p1) = match params.orientation {
                Orientation::Horizontal => {
                    let p0 = Point::new(pos, margin) + offset;
                    (p0, p0 + Vec2::new(0.0, line_size))
                }
                Orientation::Vertical => {
                    let p0 = Point::new(margin, pos) + offset;
                    (p0, p0 + Vec2::new(line_size, 0.0))
                }
            };
            lines.push(Line::new(p0, p1));
        }
    }
    lines
}

/// A main tick that gets a label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelTick {
    /// Ruler value of the tick.
    pub value: f64,
    /// Along-axis position in logical pixels.
    pub pos: f64,
}

/// Main ticks whose labels are visible.
///
/// Labels use a wider window than tick lines: a label is kept while its tick
/// lies within one tick spacing before the start or one unit past the end,
/// so partially visible text at the edges is still drawn.
#[must_use]
pub fn label_ticks(options: &RulerOptions, params: &RenderParams) -> Vec<LabelTick> {
    let mut ticks = Vec::new();
    if !params.is_drawable() {
        return ticks;
    }
    for index in params.tick_indices() {
        if !options.negative_ruler && index < 0 {
            continue;
        }
        let value = tick_value(index, options.unit);
        let pos = params.to_pixel(value);
        if pos < -params.zoom_unit
            || pos >= params.size + options.unit * params.zoom
            || !options.in_range(value)
        {
            continue;
        }
        ticks.push(LabelTick { value, pos });
    }
    ticks
}

/// Anchor point of the label for a tick at `pos`.
#[must_use]
pub fn label_anchor(options: &RulerOptions, container_size: f64, pos: f64) -> Point {
    let origin = match options.direction {
        Direction::Start => LABEL_EDGE_INSET,
        Direction::Center => container_size / 2.0,
        Direction::End => container_size - LABEL_EDGE_INSET,
    };
    let nudge = options.text_align.sign() * LABEL_ALIGN_NUDGE;
    match options.orientation {
        Orientation::Horizontal => Point::new(pos - nudge, origin),
        Orientation::Vertical => Point::new(origin, pos + nudge),
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "tick indices stay far below 2^52"
)]
fn tick_value(index: i64, unit: f64) -> f64 {
    index as f64 * unit
}

/// Paints the whole ruler.
///
/// `size` is the logical size; the canvas backing store is expected to be
/// twice that in each dimension.
pub fn draw<C: RulerCanvas + ?Sized>(
    canvas: &mut C,
    options: &RulerOptions,
    size: Size,
    params: &RenderParams,
) {
    tracing::trace!(
        scroll_pos = params.scroll_pos,
        zoom = params.zoom,
        min_range = params.min_range,
        max_range = params.max_range,
        "drawing ruler"
    );
    render_background(canvas, options, size);
    if !params.is_drawable() {
        tracing::warn!(
            zoom_unit = params.zoom_unit,
            "ruler scale is degenerate, skipping ticks and labels"
        );
        canvas.restore();
        return;
    }
    render_range_background(canvas, options, params);
    render_segments(canvas, options, params);
    render_labels(canvas, options, params);
}

fn render_background<C: RulerCanvas + ?Sized>(canvas: &mut C, options: &RulerOptions, size: Size) {
    let full = Rect::new(0.0, 0.0, size.width * 2.0, size.height * 2.0);
    if is_transparent(options.background_color) {
        canvas.clear_rect(full);
    } else {
        canvas.set_fill_color(options.background_color);
        canvas.fill_rect(full);
    }

    canvas.save();
    canvas.scale(2.0, 2.0);
    canvas.set_stroke_color(options.line_color);
    canvas.set_line_width(1.0);
    canvas.set_font(&options.font);
    canvas.set_fill_color(options.text_color);
    canvas.set_text_baseline(text_baseline(options.direction));
    canvas.translate(0.5, 0.0);
    canvas.begin_path();
}

/// Paints the range highlight and returns its `(start, length)` in pixels.
fn render_range_background<C: RulerCanvas + ?Sized>(
    canvas: &mut C,
    options: &RulerOptions,
    params: &RenderParams,
) -> Option<(f64, f64)> {
    if !options.is_range_background_active() {
        return None;
    }
    let [start, end] = options.range;
    let range_start = params.to_pixel(start);
    let range_len = (end - start) * params.zoom;
    let rect = match params.orientation {
        Orientation::Horizontal => Rect::new(
            range_start,
            0.0,
            range_start + range_len,
            params.container_size,
        ),
        Orientation::Vertical => Rect::new(
            0.0,
            range_start,
            params.container_size,
            range_start + range_len,
        ),
    };
    canvas.save();
    canvas.set_fill_color(options.range_background_color);
    canvas.fill_rect(rect);
    canvas.restore();
    Some((range_start, range_len))
}

fn render_segments<C: RulerCanvas + ?Sized>(
    canvas: &mut C,
    options: &RulerOptions,
    params: &RenderParams,
) {
    for line in tick_lines(options, params) {
        canvas.move_to(line.p0);
        canvas.line_to(line.p1);
    }
    canvas.stroke();
}

fn render_labels<C: RulerCanvas + ?Sized>(
    canvas: &mut C,
    options: &RulerOptions,
    params: &RenderParams,
) {
    for tick in label_ticks(options, params) {
        render_label(canvas, options, params, tick);
    }
    canvas.restore();
}

fn render_label<C: RulerCanvas + ?Sized>(
    canvas: &mut C,
    options: &RulerOptions,
    params: &RenderParams,
    tick: LabelTick,
) {
    let anchor = label_anchor(options, params.container_size, tick.pos);
    let text_offset = options.text_offset
        + match params.orientation {
            Orientation::Horizontal => Vec2::new(0.0, LABEL_CROSS_OFFSET),
            Orientation::Vertical => Vec2::new(LABEL_CROSS_OFFSET, 0.0),
        };
    let text = format_with(options.text_format.as_ref(), tick.value);

    canvas.set_text_align(options.text_align);
    let text_width = canvas.measure_text(&text);
    let background_offset = options.text_align.background_offset(text_width);
    let paint_background = !is_transparent(options.text_background_color);
    let at = anchor + text_offset;

    match params.orientation {
        Orientation::Horizontal => {
            if paint_background {
                let x0 = at.x + background_offset;
                canvas.save();
                canvas.set_fill_color(options.text_background_color);
                canvas.fill_rect(Rect::new(x0, 0.0, x0 + text_width, params.main_line_size));
                canvas.restore();
            }
            canvas.fill_text(&text, at);
        }
        Orientation::Vertical => {
            if paint_background {
                canvas.save();
                canvas.translate(0.0, at.y);
                canvas.rotate(-FRAC_PI_2);
                canvas.set_fill_color(options.text_background_color);
                canvas.fill_rect(Rect::new(
                    background_offset,
                    0.0,
                    background_offset + text_width,
                    params.main_line_size,
                ));
                canvas.restore();
            }
            canvas.save();
            canvas.translate(at.x, at.y);
            canvas.rotate(-FRAC_PI_2);
            canvas.fill_text(&text, Point::ZERO);
            canvas.restore();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasCommand, RecordingCanvas, rgba8};
    use crate::options::{LineSize, TextAlign};
    use peniko::Color;

    fn params(options: &RulerOptions, size: Size, scroll: f64) -> RenderParams {
        RenderParams::new(options, size, scroll, options.zoom)
    }

    #[test]
    fn visible_range_covers_scroll_window() {
        let options = RulerOptions::default();
        let p = params(&options, Size::new(5.0, 30.0), 2.0);
        assert_eq!(p.zoom_unit, 50.0);
        assert_eq!(p.min_range, 0);
        assert_eq!(p.max_range, 1);
        assert_eq!(p.tick_indices().count(), 2);
    }

    #[test]
    fn vertical_params_swap_axes() {
        let options = RulerOptions::new(Orientation::Vertical).with_unit(10.0);
        let p = params(&options, Size::new(30.0, 0.0), 3.0);
        assert_eq!(p.container_size, 30.0);
        assert_eq!(p.size, 0.0);
        assert_eq!(p.zoom_unit, 10.0);
        assert_eq!(p.max_range, 1);
    }

    #[test]
    fn zero_unit_is_not_drawable() {
        let options = RulerOptions::default().with_unit(0.0);
        let p = params(&options, Size::new(100.0, 30.0), 0.0);
        assert!(!p.is_drawable());
        assert!(tick_lines(&options, &p).is_empty());
        assert!(label_ticks(&options, &p).is_empty());
    }

    #[test]
    fn line_sizes_alternate() {
        assert_eq!(segment_line_size(0, 1.0, 2.0, 3.0), 1.0);
        assert_eq!(segment_line_size(4, 1.0, 2.0, 3.0), 2.0);
        assert_eq!(segment_line_size(5, 1.0, 2.0, 3.0), 3.0);
    }

    #[test]
    fn margin_follows_direction() {
        assert_eq!(segment_margin(Direction::End, 2.0, 4.0), 2.0);
        assert_eq!(segment_margin(Direction::Start, 2.0, 4.0), 0.0);
        assert_eq!(segment_margin(Direction::Center, 2.0, 4.0), 1.0);
    }

    #[test]
    fn baseline_follows_direction() {
        assert_eq!(text_baseline(Direction::End), TextBaseline::Bottom);
        assert_eq!(text_baseline(Direction::Start), TextBaseline::Top);
        assert_eq!(text_baseline(Direction::Center), TextBaseline::Middle);
    }

    #[test]
    fn horizontal_ticks_hang_from_far_edge() {
        let options = RulerOptions::default();
        let p = params(&options, Size::new(100.0, 30.0), 0.0);
        let lines = tick_lines(&options, &p);

        // Ticks at 0, 5, .., 95: index 0 (main), 1 (short), 2 (long) ...
        assert_eq!(lines.len(), 20);
        assert_eq!(lines[0], Line::new((0.0, 0.0), (0.0, 30.0)));
        assert_eq!(lines[1], Line::new((5.0, 23.0), (5.0, 30.0)));
        assert_eq!(lines[2], Line::new((10.0, 20.0), (10.0, 30.0)));
        assert_eq!(lines[10], Line::new((50.0, 0.0), (50.0, 30.0)));
    }

    #[test]
    fn vertical_ticks_run_along_x() {
        let options = RulerOptions::new(Orientation::Vertical)
            .with_direction(Direction::Start)
            .with_segment(2);
        let p = params(&options, Size::new(20.0, 60.0), 0.0);
        let lines = tick_lines(&options, &p);

        assert_eq!(
            lines,
            [
                Line::new((0.0, 0.0), (20.0, 0.0)),
                Line::new((0.0, 25.0), (7.0, 25.0)),
                Line::new((0.0, 50.0), (20.0, 50.0)),
            ]
        );
    }

    #[test]
    fn line_offset_shifts_both_ends() {
        let mut options = RulerOptions::default().with_segment(1);
        options.line_offset = Vec2::new(0.0, 10.0);
        options.main_line_size = LineSize::Px(2.0);
        let p = params(&options, Size::new(5.0, 4.0), 0.0);

        assert_eq!(
            tick_lines(&options, &p),
            [Line::new((0.0, 12.0), (0.0, 14.0))]
        );
    }

    #[test]
    fn negative_ticks_can_be_hidden() {
        let options = RulerOptions::default().with_negative_ruler(false);
        let p = params(&options, Size::new(100.0, 30.0), -100.0);
        assert!(tick_lines(&options, &p).iter().all(|l| l.p0.x >= 100.0));
        assert!(label_ticks(&options, &p).iter().all(|t| t.value >= 0.0));
    }

    #[test]
    fn range_clips_ticks_and_labels() {
        let options = RulerOptions::default().with_range(0.0, 50.0);
        let p = params(&options, Size::new(200.0, 30.0), -20.0);

        let lines = tick_lines(&options, &p);
        assert!(!lines.is_empty());
        assert!(lines.iter().all(|l| l.p0.x >= 20.0 && l.p0.x <= 70.0));

        let labels: Vec<f64> = label_ticks(&options, &p).iter().map(|t| t.value).collect();
        assert_eq!(labels, [0.0, 50.0]);
    }

    #[test]
    fn labels_use_wider_window_than_lines() {
        let options = RulerOptions::default();
        // Scrolled so the tick at 0 sits 30px before the visible start.
        let p = params(&options, Size::new(100.0, 30.0), 30.0);

        let labels: Vec<f64> = label_ticks(&options, &p).iter().map(|t| t.value).collect();
        assert_eq!(labels, [0.0, 50.0, 100.0, 150.0]);
        assert!(tick_lines(&options, &p).iter().all(|l| l.p0.x >= 0.0));
    }

    #[test]
    fn label_anchor_per_direction_and_alignment() {
        let options = RulerOptions::default().with_text_align(TextAlign::Center);
        assert_eq!(label_anchor(&options, 5.0, 2.0), Point::new(2.0, -12.0));

        let options = RulerOptions::default()
            .with_direction(Direction::Start)
            .with_text_align(TextAlign::Right);
        assert_eq!(label_anchor(&options, 7.0, 0.0), Point::new(-3.0, 17.0));

        let options = RulerOptions::new(Orientation::Vertical).with_direction(Direction::Center);
        assert_eq!(label_anchor(&options, 20.0, 10.0), Point::new(10.0, 7.0));
    }

    #[test]
    fn range_background_horizontal_and_vertical() {
        let mut options = RulerOptions::default().with_range(0.0, 10.0);
        options.range_background_color = Color::WHITE;
        let p = params(&options, Size::new(100.0, 5.0), 2.0);
        let mut canvas = RecordingCanvas::new(Size::ZERO);
        assert_eq!(
            render_range_background(&mut canvas, &options, &p),
            Some((-2.0, 10.0))
        );
        assert!(
            canvas
                .commands()
                .contains(&CanvasCommand::FillRect(Rect::new(-2.0, 0.0, 8.0, 5.0)))
        );

        let mut options = options.with_orientation(Orientation::Vertical);
        options.range = [10.0, 0.0];
        let p = params(&options, Size::new(5.0, 100.0), 2.0);
        let mut canvas = RecordingCanvas::new(Size::ZERO);
        assert_eq!(
            render_range_background(&mut canvas, &options, &p),
            Some((8.0, -10.0))
        );
        assert!(
            canvas
                .commands()
                .contains(&CanvasCommand::FillRect(Rect::new(0.0, 8.0, 5.0, -2.0)))
        );
    }

    #[test]
    fn transparent_background_clears_full_backing_store() {
        let mut options = RulerOptions::default();
        options.background_color = Color::TRANSPARENT;
        let size = Size::new(40.0, 20.0);
        let mut canvas = RecordingCanvas::new(size);
        draw(&mut canvas, &options, size, &params(&options, size, 0.0));

        assert_eq!(
            canvas.commands()[0],
            CanvasCommand::ClearRect(Rect::new(0.0, 0.0, 80.0, 40.0))
        );
    }

    #[test]
    fn draw_scales_once_then_strokes_once() {
        let options = RulerOptions::default();
        let size = Size::new(120.0, 30.0);
        let mut canvas = RecordingCanvas::new(size);
        draw(&mut canvas, &options, size, &params(&options, size, 0.0));
        let cmds = canvas.commands();

        assert_eq!(
            cmds[0],
            CanvasCommand::FillColor(rgba8(options.background_color))
        );
        assert_eq!(
            cmds[1],
            CanvasCommand::FillRect(Rect::new(0.0, 0.0, 240.0, 60.0))
        );
        let scales = cmds
            .iter()
            .filter(|c| matches!(c, CanvasCommand::Scale(..)))
            .count();
        let strokes = cmds
            .iter()
            .filter(|c| matches!(c, CanvasCommand::Stroke))
            .count();
        assert_eq!(scales, 1);
        assert_eq!(strokes, 1);

        let saves = cmds.iter().filter(|c| **c == CanvasCommand::Save).count();
        let restores = cmds.iter().filter(|c| **c == CanvasCommand::Restore).count();
        assert_eq!(saves, restores);
        assert_eq!(canvas.texts(), ["0", "50", "100", "150"]);
    }

    #[test]
    fn horizontal_label_paints_background_then_text() {
        let mut options = RulerOptions::default();
        options.text_background_color = Color::BLACK;
        options.main_line_size = LineSize::Px(4.0);
        let p = params(&options, Size::new(100.0, 30.0), 0.0);
        let mut canvas = RecordingCanvas::new(Size::ZERO).with_char_advance(2.0);

        render_label(&mut canvas, &options, &p, LabelTick { value: 1.0, pos: 1.0 });

        // Left alignment nudges the anchor by +3 px; text sits 10 px below the anchor.
        assert_eq!(
            canvas.commands(),
            [
                CanvasCommand::TextAlign(TextAlign::Left),
                CanvasCommand::Save,
                CanvasCommand::FillColor(rgba8(Color::BLACK)),
                CanvasCommand::FillRect(Rect::new(4.0, 0.0, 6.0, 4.0)),
                CanvasCommand::Restore,
                CanvasCommand::FillText {
                    text: "1".into(),
                    at: Point::new(4.0, 23.0),
                },
            ]
        );
    }

    #[test]
    fn vertical_label_is_rotated_about_anchor() {
        let options = RulerOptions::new(Orientation::Vertical)
            .with_text_format(|v| alloc::format!("{}", v + 4.0));
        let p = params(&options, Size::new(30.0, 100.0), 0.0);
        let mut canvas = RecordingCanvas::new(Size::ZERO);

        render_label(&mut canvas, &options, &p, LabelTick { value: 1.0, pos: 6.0 });

        assert_eq!(
            canvas.commands(),
            [
                CanvasCommand::TextAlign(TextAlign::Left),
                CanvasCommand::Save,
                CanvasCommand::Translate(23.0, 3.0),
                CanvasCommand::Rotate(-FRAC_PI_2),
                CanvasCommand::FillText {
                    text: "5".into(),
                    at: Point::ZERO,
                },
                CanvasCommand::Restore,
            ]
        );
    }
}
