// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ruler configuration.

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use core::fmt;
use core::str::FromStr;

use kurbo::Vec2;
use peniko::Color;

/// Which way the ruler runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Ticks advance along X; the cross axis is Y.
    #[default]
    Horizontal,
    /// Ticks advance along Y; the cross axis is X.
    Vertical,
}

impl Orientation {
    /// Returns `true` for [`Orientation::Horizontal`].
    #[inline]
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        self == Self::Horizontal
    }

    /// Picks the component of `v` that runs along the ruler.
    #[inline]
    #[must_use]
    pub fn along(self, v: Vec2) -> f64 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }

    /// Picks the component of `v` that runs across the ruler.
    ///
    /// Guides attached to a ruler move along this axis.
    #[inline]
    #[must_use]
    pub fn across(self, v: Vec2) -> f64 {
        match self {
            Self::Horizontal => v.y,
            Self::Vertical => v.x,
        }
    }
}

/// Where tick lines sit on the cross axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    /// Flush with the origin edge.
    Start,
    /// Centered.
    Center,
    /// Flush with the far edge.
    #[default]
    End,
}

/// Horizontal alignment of tick labels relative to their anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Text starts at the anchor.
    #[default]
    Left,
    /// Text is centered on the anchor.
    Center,
    /// Text ends at the anchor.
    Right,
}

impl TextAlign {
    /// Shift applied to the label background relative to the text anchor.
    #[must_use]
    pub fn background_offset(self, text_width: f64) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => -text_width / 2.0,
            Self::Right => -text_width,
        }
    }

    /// `-1`, `0` or `1` for left, center and right.
    pub(crate) fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Center => 0.0,
            Self::Right => 1.0,
        }
    }
}

/// Color presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    /// Dark gray background with light text.
    Dark,
    /// White background with light gray lines and text.
    Light,
}

/// A cross-axis length, either absolute or relative to the ruler thickness.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineSize {
    /// Logical pixels.
    Px(f64),
    /// Percentage of the cross-axis size.
    Percent(f64),
}

impl LineSize {
    /// Resolves to logical pixels against the ruler's cross-axis size.
    #[must_use]
    pub fn resolve(self, container_size: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Percent(p) => container_size * p / 100.0,
        }
    }
}

impl From<f64> for LineSize {
    fn from(px: f64) -> Self {
        Self::Px(px)
    }
}

/// Error returned when a [`LineSize`] string cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseLineSizeError {
    input: String,
}

impl ParseLineSizeError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseLineSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid line size {:?}: expected a number, `<n>px` or `<n>%`",
            self.input
        )
    }
}

impl core::error::Error for ParseLineSizeError {}

impl FromStr for LineSize {
    type Err = ParseLineSizeError;

    /// Accepts `"7"`, `"7px"` and `"100%"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ParseLineSizeError {
            input: s.to_string(),
        };
        let (number, percent) = if let Some(n) = trimmed.strip_suffix('%') {
            (n, true)
        } else if let Some(n) = trimmed.strip_suffix("px") {
            (n, false)
        } else {
            (trimmed, false)
        };
        let value: f64 = number.trim().parse().map_err(|_| err())?;
        if !value.is_finite() {
            return Err(err());
        }
        Ok(if percent {
            Self::Percent(value)
        } else {
            Self::Px(value)
        })
    }
}

/// A shared `f64 -> String` formatter used for tick labels and guide positions.
#[derive(Clone)]
pub struct ValueFormat(Arc<dyn Fn(f64) -> String + Send + Sync>);

impl ValueFormat {
    /// Wraps a formatting closure.
    pub fn new(f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Formats `value`.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        (self.0)(value)
    }
}

impl fmt::Debug for ValueFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueFormat(..)")
    }
}

/// Default textual form of a ruler value: `50`, `0.5`, `-100`.
///
/// Negative zero prints as `0`.
#[must_use]
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return String::from("0");
    }
    value.to_string()
}

/// Formats `value` with `format` if present, otherwise with [`format_value`].
#[must_use]
pub fn format_with(format: Option<&ValueFormat>, value: f64) -> String {
    match format {
        Some(f) => f.format(value),
        None => format_value(value),
    }
}

/// Options controlling how a [`Ruler`](crate::Ruler) lays out and paints its scale.
///
/// All lengths are logical pixels unless noted.
#[derive(Clone, Debug)]
pub struct RulerOptions {
    /// Axis the ruler runs along.
    pub orientation: Orientation,
    /// Fixed logical width. `None` uses the canvas' measured size.
    pub width: Option<f64>,
    /// Fixed logical height. `None` uses the canvas' measured size.
    pub height: Option<f64>,
    /// Ruler units between two main ticks.
    pub unit: f64,
    /// Pixels per ruler unit.
    pub zoom: f64,
    /// Tick placement on the cross axis.
    pub direction: Direction,
    /// Label alignment.
    pub text_align: TextAlign,
    /// CSS-style font passed through to the canvas.
    pub font: String,
    /// Subdivisions between two main ticks.
    pub segment: u32,
    /// Length of the main (index 0) tick.
    pub main_line_size: LineSize,
    /// Length of even subdivision ticks.
    pub long_line_size: LineSize,
    /// Length of odd subdivision ticks.
    pub short_line_size: LineSize,
    /// Offset added to both ends of every tick line.
    pub line_offset: Vec2,
    /// Offset added to every label anchor.
    pub text_offset: Vec2,
    /// Whether ticks below zero are drawn.
    pub negative_ruler: bool,
    /// Highlighted and visible value range, `[start, end]`.
    ///
    /// The default `[-inf, +inf]` means no highlight and no clipping.
    pub range: [f64; 2],
    /// Scroll position used by [`Ruler::resize`](crate::Ruler::resize) instead of the
    /// last drawn one.
    pub scroll_pos: Option<f64>,
    /// Fill behind the whole ruler. Transparent clears instead.
    pub background_color: Color,
    /// Fill behind the highlighted range. Transparent disables the highlight fill.
    pub range_background_color: Color,
    /// Tick stroke color.
    pub line_color: Color,
    /// Label color.
    pub text_color: Color,
    /// Fill behind each label. Transparent disables it.
    pub text_background_color: Color,
    /// Label formatter. `None` prints the value.
    pub text_format: Option<ValueFormat>,
}

impl Default for RulerOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            width: None,
            height: None,
            unit: 50.0,
            zoom: 1.0,
            direction: Direction::End,
            text_align: TextAlign::Left,
            font: String::from("10px sans-serif"),
            segment: 10,
            main_line_size: LineSize::Percent(100.0),
            long_line_size: LineSize::Px(10.0),
            short_line_size: LineSize::Px(7.0),
            line_offset: Vec2::ZERO,
            text_offset: Vec2::ZERO,
            negative_ruler: true,
            range: [f64::NEG_INFINITY, f64::INFINITY],
            scroll_pos: None,
            background_color: Color::from_rgb8(0x33, 0x33, 0x33),
            range_background_color: Color::TRANSPARENT,
            line_color: Color::from_rgb8(0x77, 0x77, 0x77),
            text_color: Color::WHITE,
            text_background_color: Color::TRANSPARENT,
            text_format: None,
        }
    }
}

impl RulerOptions {
    /// Default options for a ruler running in `orientation`.
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    /// Sets the orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Fixes the logical size instead of measuring the canvas.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets the main tick unit.
    #[must_use]
    pub fn with_unit(mut self, unit: f64) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the zoom factor.
    #[must_use]
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Sets the tick direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the label alignment.
    #[must_use]
    pub fn with_text_align(mut self, text_align: TextAlign) -> Self {
        self.text_align = text_align;
        self
    }

    /// Sets the number of subdivisions between main ticks.
    #[must_use]
    pub fn with_segment(mut self, segment: u32) -> Self {
        self.segment = segment;
        self
    }

    /// Enables or disables ticks below zero.
    #[must_use]
    pub fn with_negative_ruler(mut self, negative_ruler: bool) -> Self {
        self.negative_ruler = negative_ruler;
        self
    }

    /// Sets the highlighted range.
    #[must_use]
    pub fn with_range(mut self, start: f64, end: f64) -> Self {
        self.range = [start, end];
        self
    }

    /// Sets the label formatter.
    #[must_use]
    pub fn with_text_format(mut self, f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        self.text_format = Some(ValueFormat::new(f));
        self
    }

    /// Applies a color preset to the background, line and text colors.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        let (background, line, text) = match theme {
            Theme::Dark => (
                Color::from_rgb8(0x44, 0x44, 0x44),
                Color::from_rgb8(0x77, 0x77, 0x77),
                Color::WHITE,
            ),
            Theme::Light => (
                Color::WHITE,
                Color::from_rgb8(0xbb, 0xbb, 0xbb),
                Color::from_rgb8(0xbb, 0xbb, 0xbb),
            ),
        };
        self.background_color = background;
        self.line_color = line;
        self.text_color = text;
        self
    }

    /// Returns `true` if both range bounds are finite.
    #[must_use]
    pub fn has_finite_range(&self) -> bool {
        self.range[0].is_finite() && self.range[1].is_finite()
    }

    /// Returns `true` if the highlighted range should be painted.
    #[must_use]
    pub fn is_range_background_active(&self) -> bool {
        !is_transparent(self.range_background_color) && self.has_finite_range()
    }

    /// Returns `true` if `value` lies inside `range`, bounds included.
    #[must_use]
    pub fn in_range(&self, value: f64) -> bool {
        value >= self.range[0] && value <= self.range[1]
    }
}

/// Returns `true` if `color` has zero alpha.
#[must_use]
pub fn is_transparent(color: Color) -> bool {
    color.components[3] == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_size_parses_units() {
        assert_eq!("100%".parse::<LineSize>(), Ok(LineSize::Percent(100.0)));
        assert_eq!("10px".parse::<LineSize>(), Ok(LineSize::Px(10.0)));
        assert_eq!(" 7 ".parse::<LineSize>(), Ok(LineSize::Px(7.0)));
        let err = "wide".parse::<LineSize>().unwrap_err();
        assert_eq!(err.input(), "wide");
    }

    #[test]
    fn line_size_resolves_against_container() {
        assert_eq!(LineSize::Percent(50.0).resolve(30.0), 15.0);
        assert_eq!(LineSize::Px(7.0).resolve(30.0), 7.0);
    }

    #[test]
    fn background_offset_follows_alignment() {
        assert_eq!(TextAlign::Left.background_offset(2.0), 0.0);
        assert_eq!(TextAlign::Center.background_offset(2.0), -1.0);
        assert_eq!(TextAlign::Right.background_offset(2.0), -2.0);
    }

    #[test]
    fn range_background_needs_color_and_finite_bounds() {
        let opts = RulerOptions::default();
        assert!(!opts.is_range_background_active());

        let mut opts = RulerOptions::default().with_range(10.0, 10.0);
        assert!(!opts.is_range_background_active());
        opts.range_background_color = Color::WHITE;
        assert!(opts.is_range_background_active());

        opts.range = [f64::NEG_INFINITY, 10.0];
        assert!(!opts.is_range_background_active());
    }

    #[test]
    fn default_value_format_matches_plain_numbers() {
        assert_eq!(format_value(50.0), "50");
        assert_eq!(format_value(0.5), "0.5");
        assert_eq!(format_value(-100.0), "-100");
        assert_eq!(format_value(-0.0), "0");
    }
}
