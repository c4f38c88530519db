// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Guides configuration.

use alloc::string::String;
use alloc::vec::Vec;

use understory_ruler::{Orientation, RulerOptions, ValueFormat, format_value};

use crate::policy::LockPolicy;
use crate::resolve::ResolveParams;

/// Options for a guides layer and the ruler it is attached to.
///
/// The engine reads these on every decision, so changes made through
/// [`GuideEngine::options_mut`](crate::GuideEngine::options_mut) take effect
/// on the next pointer event.
#[derive(Clone, Debug)]
pub struct GuidesOptions {
    /// The attached ruler. Its `orientation` and `zoom` also drive the guides.
    pub ruler: RulerOptions,
    /// Decimal places kept in guide values.
    pub digit: u32,
    /// Snap distance in pixels.
    pub snap_threshold: f64,
    /// Snap candidates in ruler units.
    pub snaps: Vec<f64>,
    /// Show a floating label with the position while dragging.
    pub display_drag_pos: bool,
    /// Formatter for the floating drag label.
    pub drag_pos_format: Option<ValueFormat>,
    /// Show a label on every guide.
    pub display_guide_pos: bool,
    /// Formatter for guide labels. Falls back to `drag_pos_format`.
    pub guide_pos_format: Option<ValueFormat>,
    /// Which mutations are blocked.
    pub lock_guides: LockPolicy,
    /// Render guides at all.
    pub show_guides: bool,
    /// Guides present at construction.
    pub default_guides: Vec<f64>,
}

impl Default for GuidesOptions {
    fn default() -> Self {
        Self {
            ruler: RulerOptions::default(),
            digit: 0,
            snap_threshold: 5.0,
            snaps: Vec::new(),
            display_drag_pos: false,
            drag_pos_format: None,
            display_guide_pos: false,
            guide_pos_format: None,
            lock_guides: LockPolicy::Unlocked,
            show_guides: true,
            default_guides: Vec::new(),
        }
    }
}

impl GuidesOptions {
    /// Default options for guides on a ruler running in `orientation`.
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self {
            ruler: RulerOptions::new(orientation),
            ..Self::default()
        }
    }

    /// Replaces the ruler options.
    #[must_use]
    pub fn with_ruler(mut self, ruler: RulerOptions) -> Self {
        self.ruler = ruler;
        self
    }

    /// Sets the zoom.
    #[must_use]
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.ruler.zoom = zoom;
        self
    }

    /// Sets the rounding precision of guide values.
    #[must_use]
    pub fn with_digit(mut self, digit: u32) -> Self {
        self.digit = digit;
        self
    }

    /// Sets snap candidates and the snap distance.
    #[must_use]
    pub fn with_snaps(mut self, snaps: impl Into<Vec<f64>>, threshold: f64) -> Self {
        self.snaps = snaps.into();
        self.snap_threshold = threshold;
        self
    }

    /// Sets the lock policy.
    #[must_use]
    pub fn with_lock(mut self, lock: impl Into<LockPolicy>) -> Self {
        self.lock_guides = lock.into();
        self
    }

    /// Sets the guides present at construction.
    #[must_use]
    pub fn with_default_guides(mut self, guides: impl Into<Vec<f64>>) -> Self {
        self.default_guides = guides.into();
        self
    }

    /// Enables the floating drag label.
    #[must_use]
    pub fn with_drag_pos(mut self, format: Option<ValueFormat>) -> Self {
        self.display_drag_pos = true;
        self.drag_pos_format = format;
        self
    }

    /// Enables per-guide labels.
    #[must_use]
    pub fn with_guide_pos(mut self, format: Option<ValueFormat>) -> Self {
        self.display_guide_pos = true;
        self.guide_pos_format = format;
        self
    }

    /// Shows or hides guides.
    #[must_use]
    pub fn with_show_guides(mut self, show: bool) -> Self {
        self.show_guides = show;
        self
    }

    /// Orientation of the attached ruler.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.ruler.orientation
    }

    /// Zoom of the attached ruler.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.ruler.zoom
    }

    /// Resolver inputs borrowed from these options.
    #[must_use]
    pub fn resolve_params(&self) -> ResolveParams<'_> {
        ResolveParams {
            orientation: self.ruler.orientation,
            zoom: self.ruler.zoom,
            digits: self.digit,
            snaps: &self.snaps,
            snap_threshold: self.snap_threshold,
        }
    }

    /// Text of the floating drag label.
    #[must_use]
    pub fn format_drag_pos(&self, value: f64) -> String {
        match &self.drag_pos_format {
            Some(f) => f.format(value),
            None => format_value(value),
        }
    }

    /// Text of a guide label.
    #[must_use]
    pub fn format_guide_pos(&self, value: f64) -> String {
        match self.guide_pos_format.as_ref().or(self.drag_pos_format.as_ref()) {
            Some(f) => f.format(value),
            None => format_value(value),
        }
    }
}
