// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained view model of the guides layer.
//!
//! Offsets are in local pixels along the guide movement axis: Y for guides
//! on a horizontal ruler, X on a vertical one. [`GuidesView::translation`]
//! turns an offset into a 2D translation.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Affine, Vec2};
use understory_ruler::Orientation;

/// One rendered guide.
#[derive(Clone, Debug, PartialEq)]
pub struct GuideVisual {
    /// Slot in the guide list.
    pub slot: usize,
    /// Value shown; the live drag value while this guide is dragged.
    pub value: f64,
    /// Offset along the movement axis.
    pub offset: f64,
    /// `false` when the guide lies before the scroll position.
    pub visible: bool,
    /// Part of the selection.
    pub selected: bool,
    /// Being dragged.
    pub dragging: bool,
    /// Label text, when guide labels are enabled.
    pub label: Option<String>,
}

/// The marker previewing a guide created from the ruler.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct MarkerVisual {
    /// Offset along the movement axis.
    pub offset: f64,
    /// Live value while a creation drag shows feedback.
    pub value: Option<f64>,
    /// A creation drag is in progress.
    pub dragging: bool,
}

impl MarkerVisual {
    /// Returns `true` while the marker should be drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.dragging && self.value.is_some()
    }
}

/// The floating position label shown while dragging.
#[derive(Clone, Debug, PartialEq)]
pub struct DragLabel {
    /// Formatted position.
    pub text: String,
    /// Placement relative to the guides layer.
    pub transform: Affine,
}

/// Everything a host needs to draw the guides layer.
#[derive(Clone, Debug, PartialEq)]
pub struct GuidesView {
    /// Orientation of the attached ruler.
    pub orientation: Orientation,
    /// Offset of the whole layer along the movement axis.
    pub layer_offset: f64,
    /// `false` while pointer input is suppressed after scrolling.
    pub pointer_events: bool,
    /// Guides in slot order. Empty when guides are hidden.
    pub guides: Vec<GuideVisual>,
    /// The creation marker.
    pub adder: MarkerVisual,
    /// The floating drag label, while shown.
    pub drag_label: Option<DragLabel>,
}

impl GuidesView {
    /// Translation for `offset` along the movement axis.
    #[must_use]
    pub fn translation(&self, offset: f64) -> Vec2 {
        match self.orientation {
            Orientation::Horizontal => Vec2::new(0.0, offset),
            Orientation::Vertical => Vec2::new(offset, 0.0),
        }
    }

    /// Translation of the whole layer.
    #[must_use]
    pub fn layer_translation(&self) -> Vec2 {
        self.translation(self.layer_offset)
    }

    /// Guides that should be drawn.
    pub fn visible_guides(&self) -> impl Iterator<Item = &GuideVisual> {
        self.guides.iter().filter(|g| g.visible)
    }

    /// The guide in `slot`.
    #[must_use]
    pub fn guide(&self, slot: usize) -> Option<&GuideVisual> {
        self.guides.get(slot)
    }
}
