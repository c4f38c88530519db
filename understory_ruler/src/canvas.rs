// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render target abstraction and a recording implementation.
//!
//! [`RulerCanvas`] is the narrow 2D drawing surface the ruler paints into. It
//! mirrors the subset of an HTML canvas 2D context the ruler needs, so a web
//! host can forward calls one to one while native hosts can translate them to
//! their renderer of choice.
//!
//! [`RecordingCanvas`] records every call instead of rasterizing. It is meant
//! for tests and debugging that want to assert on emitted commands.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use peniko::Color;

use crate::options::TextAlign;

/// Vertical text anchoring, as in the canvas 2D `textBaseline` property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    /// Anchor at the top of the em box.
    Top,
    /// Anchor at the middle of the em box.
    Middle,
    /// Anchor at the bottom of the em box.
    Bottom,
}

/// A 2D drawing surface sized in device pixels.
///
/// Coordinates passed to drawing calls are transformed by the current
/// transform, which starts as identity on every draw and is changed with
/// [`scale`](Self::scale), [`translate`](Self::translate) and
/// [`rotate`](Self::rotate). [`save`](Self::save) and
/// [`restore`](Self::restore) push and pop the full drawing state.
pub trait RulerCanvas {
    /// Laid-out size of the canvas element in logical pixels.
    fn client_size(&self) -> Size;
    /// Resizes the backing store, in device pixels. Clears its contents.
    fn set_backing_size(&mut self, size: Size);
    /// Current backing store size, in device pixels.
    fn backing_size(&self) -> Size;

    /// Pushes the drawing state.
    fn save(&mut self);
    /// Pops the drawing state.
    fn restore(&mut self);
    /// Post-multiplies the current transform by a scale.
    fn scale(&mut self, sx: f64, sy: f64);
    /// Post-multiplies the current transform by a translation.
    fn translate(&mut self, dx: f64, dy: f64);
    /// Post-multiplies the current transform by a rotation, in radians.
    fn rotate(&mut self, angle: f64);

    /// Sets the color used by fills and text.
    fn set_fill_color(&mut self, color: Color);
    /// Sets the color used by strokes.
    fn set_stroke_color(&mut self, color: Color);
    /// Sets the stroke width.
    fn set_line_width(&mut self, width: f64);
    /// Sets the font used for text.
    fn set_font(&mut self, font: &str);
    /// Sets the text baseline.
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    /// Sets the text alignment.
    fn set_text_align(&mut self, align: TextAlign);

    /// Fills `rect` with the fill color.
    fn fill_rect(&mut self, rect: Rect);
    /// Clears `rect` to transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Starts a new path, discarding the current one.
    fn begin_path(&mut self);
    /// Starts a new subpath at `p`.
    fn move_to(&mut self, p: Point);
    /// Adds a line from the current point to `p`.
    fn line_to(&mut self, p: Point);
    /// Strokes the current path with the stroke color.
    fn stroke(&mut self);

    /// Returns the advance width of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> f64;
    /// Draws `text` anchored at `at` with the fill color.
    fn fill_text(&mut self, text: &str, at: Point);
}

/// A single recorded canvas call.
///
/// Colors are stored as 8-bit RGBA so commands can be compared directly.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasCommand {
    /// [`RulerCanvas::set_backing_size`].
    SetBackingSize(Size),
    /// [`RulerCanvas::save`].
    Save,
    /// [`RulerCanvas::restore`].
    Restore,
    /// [`RulerCanvas::scale`].
    Scale(f64, f64),
    /// [`RulerCanvas::translate`].
    Translate(f64, f64),
    /// [`RulerCanvas::rotate`].
    Rotate(f64),
    /// [`RulerCanvas::set_fill_color`].
    FillColor([u8; 4]),
    /// [`RulerCanvas::set_stroke_color`].
    StrokeColor([u8; 4]),
    /// [`RulerCanvas::set_line_width`].
    LineWidth(f64),
    /// [`RulerCanvas::set_font`].
    Font(String),
    /// [`RulerCanvas::set_text_baseline`].
    TextBaseline(TextBaseline),
    /// [`RulerCanvas::set_text_align`].
    TextAlign(TextAlign),
    /// [`RulerCanvas::fill_rect`].
    FillRect(Rect),
    /// [`RulerCanvas::clear_rect`].
    ClearRect(Rect),
    /// [`RulerCanvas::begin_path`].
    BeginPath,
    /// [`RulerCanvas::move_to`].
    MoveTo(Point),
    /// [`RulerCanvas::line_to`].
    LineTo(Point),
    /// [`RulerCanvas::stroke`].
    Stroke,
    /// [`RulerCanvas::fill_text`].
    FillText {
        /// Text drawn.
        text: String,
        /// Anchor position in current user space.
        at: Point,
    },
}

/// Converts a color to 8-bit RGBA.
#[must_use]
pub fn rgba8(color: Color) -> [u8; 4] {
    let c = color.to_rgba8();
    [c.r, c.g, c.b, c.a]
}

/// A [`RulerCanvas`] that records calls instead of drawing.
///
/// Text is measured with a fixed advance per character.
#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    client_size: Size,
    backing_size: Size,
    char_advance: f64,
    commands: Vec<CanvasCommand>,
}

impl RecordingCanvas {
    /// Creates a recorder whose element measures `client_size`.
    ///
    /// The default character advance is 6 logical pixels.
    #[must_use]
    pub fn new(client_size: Size) -> Self {
        Self {
            client_size,
            backing_size: Size::ZERO,
            char_advance: 6.0,
            commands: Vec::new(),
        }
    }

    /// Sets the advance used by [`RulerCanvas::measure_text`].
    #[must_use]
    pub fn with_char_advance(mut self, advance: f64) -> Self {
        self.char_advance = advance;
        self
    }

    /// Changes the measured element size, as after a host layout pass.
    pub fn set_client_size(&mut self, size: Size) {
        self.client_size = size;
    }

    /// Returns the recorded commands in call order.
    #[must_use]
    pub fn commands(&self) -> &[CanvasCommand] {
        &self.commands
    }

    /// Clears the recorded commands.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Recorded tick segments as `(from, to)` pairs.
    #[must_use]
    pub fn line_segments(&self) -> Vec<(Point, Point)> {
        let mut segments = Vec::new();
        let mut current = None;
        for cmd in &self.commands {
            match cmd {
                CanvasCommand::MoveTo(p) => current = Some(*p),
                CanvasCommand::LineTo(p) => {
                    if let Some(from) = current {
                        segments.push((from, *p));
                    }
                    current = Some(*p);
                }
                CanvasCommand::BeginPath => current = None,
                _ => {}
            }
        }
        segments
    }

    /// Recorded label texts in draw order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                CanvasCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn push(&mut self, cmd: CanvasCommand) {
        self.commands.push(cmd);
    }
}

impl RulerCanvas for RecordingCanvas {
    fn client_size(&self) -> Size {
        self.client_size
    }

    fn set_backing_size(&mut self, size: Size) {
        self.backing_size = size;
        self.push(CanvasCommand::SetBackingSize(size));
    }

    fn backing_size(&self) -> Size {
        self.backing_size
    }

    fn save(&mut self) {
        self.push(CanvasCommand::Save);
    }

    fn restore(&mut self) {
        self.push(CanvasCommand::Restore);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.push(CanvasCommand::Scale(sx, sy));
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.push(CanvasCommand::Translate(dx, dy));
    }

    fn rotate(&mut self, angle: f64) {
        self.push(CanvasCommand::Rotate(angle));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.push(CanvasCommand::FillColor(rgba8(color)));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.push(CanvasCommand::StrokeColor(rgba8(color)));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(CanvasCommand::LineWidth(width));
    }

    fn set_font(&mut self, font: &str) {
        self.push(CanvasCommand::Font(String::from(font)));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.push(CanvasCommand::TextBaseline(baseline));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.push(CanvasCommand::TextAlign(align));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.push(CanvasCommand::FillRect(rect));
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.push(CanvasCommand::ClearRect(rect));
    }

    fn begin_path(&mut self) {
        self.push(CanvasCommand::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.push(CanvasCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.push(CanvasCommand::LineTo(p));
    }

    fn stroke(&mut self) {
        self.push(CanvasCommand::Stroke);
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_advance
    }

    fn fill_text(&mut self, text: &str, at: Point) {
        self.push(CanvasCommand::FillText {
            text: String::from(text),
            at,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_segments_pair_moves_with_lines() {
        let mut canvas = RecordingCanvas::new(Size::new(10.0, 10.0));
        canvas.begin_path();
        canvas.move_to(Point::new(0.0, 0.0));
        canvas.line_to(Point::new(0.0, 5.0));
        canvas.move_to(Point::new(2.0, 0.0));
        canvas.line_to(Point::new(2.0, 3.0));
        canvas.stroke();

        assert_eq!(
            canvas.line_segments(),
            [
                (Point::new(0.0, 0.0), Point::new(0.0, 5.0)),
                (Point::new(2.0, 0.0), Point::new(2.0, 3.0)),
            ]
        );
    }

    #[test]
    fn measure_text_uses_fixed_advance() {
        let mut canvas = RecordingCanvas::new(Size::ZERO).with_char_advance(4.0);
        assert_eq!(canvas.measure_text("100"), 12.0);
    }
}
