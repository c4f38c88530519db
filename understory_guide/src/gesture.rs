// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture tracker: turn pointer down/move/up into a drag lifecycle.
//!
//! ## Usage
//!
//! 1) Call [`GestureTracker::pointer_down`] on press; it yields
//!    [`GestureEvent::DragStart`] unless a gesture is already active.
//! 2) Call [`GestureTracker::pointer_move`] on every move; it yields
//!    [`GestureEvent::Drag`] with the distance accumulated since the press.
//! 3) Call [`GestureTracker::pointer_up`] on release; it yields
//!    [`GestureEvent::DragEnd`], whose `is_drag` tells a drag from a click.
//!
//! [`GestureTracker::stop`] ends the current gesture early: later moves and the
//! release produce nothing.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_guide::gesture::{GestureEvent, GestureTracker};
//!
//! let mut tracker = GestureTracker::new();
//!
//! tracker.pointer_down(Point::new(10.0, 20.0));
//! let moved = tracker.pointer_move(Point::new(15.0, 26.0));
//! assert!(matches!(moved, Some(GestureEvent::Drag { dist, .. }) if dist == Vec2::new(5.0, 6.0)));
//!
//! let ended = tracker.pointer_up(Point::new(15.0, 26.0));
//! assert!(matches!(ended, Some(GestureEvent::DragEnd { is_drag: true, .. })));
//! ```

use kurbo::{Point, Vec2};

/// Reports whether the pointer is, or just was, dragging.
///
/// Used to tell the click that terminates a drag from a genuine click.
pub trait DragStatus {
    /// Returns `true` if the most recent gesture moved the pointer.
    fn is_dragging(&self) -> bool;
}

impl DragStatus for bool {
    fn is_dragging(&self) -> bool {
        *self
    }
}

/// A step in the drag lifecycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// The pointer was pressed.
    DragStart {
        /// Pointer position in client coordinates.
        client: Point,
    },
    /// The pointer moved while pressed.
    Drag {
        /// Pointer position in client coordinates.
        client: Point,
        /// Distance from the press position.
        dist: Vec2,
        /// Movement since the previous event.
        delta: Vec2,
    },
    /// The pointer was released.
    DragEnd {
        /// Pointer position in client coordinates.
        client: Point,
        /// Distance from the press position.
        dist: Vec2,
        /// `false` for a press and release without movement.
        is_drag: bool,
    },
}

/// Tracks a single-pointer drag.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureTracker {
    start_pos: Option<Point>,
    last_pos: Option<Point>,
    moved: bool,
    disposed: bool,
}

impl GestureTracker {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a gesture at `client`.
    ///
    /// Returns `None` while another gesture is active or after
    /// [`dispose`](Self::dispose).
    pub fn pointer_down(&mut self, client: Point) -> Option<GestureEvent> {
        if self.disposed || self.start_pos.is_some() {
            return None;
        }
        self.start_pos = Some(client);
        self.last_pos = Some(client);
        self.moved = false;
        Some(GestureEvent::DragStart { client })
    }

    /// Advances the active gesture to `client`.
    pub fn pointer_move(&mut self, client: Point) -> Option<GestureEvent> {
        let start = self.start_pos?;
        let last = self.last_pos.unwrap_or(start);
        let delta = client - last;
        self.last_pos = Some(client);
        let dist = client - start;
        if dist != Vec2::ZERO {
            self.moved = true;
        }
        Some(GestureEvent::Drag {
            client,
            dist,
            delta,
        })
    }

    /// Ends the active gesture at `client`.
    pub fn pointer_up(&mut self, client: Point) -> Option<GestureEvent> {
        let start = self.start_pos?;
        self.start_pos = None;
        self.last_pos = None;
        Some(GestureEvent::DragEnd {
            client,
            dist: client - start,
            is_drag: self.moved,
        })
    }

    /// Ends the active gesture without a [`GestureEvent::DragEnd`].
    pub fn stop(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Stops and disables the tracker. Later presses are ignored.
    pub fn dispose(&mut self) {
        self.stop();
        self.moved = false;
        self.disposed = true;
    }

    /// Re-enables a disposed tracker.
    pub fn enable(&mut self) {
        self.disposed = false;
    }

    /// Returns `true` between a press and its release or [`stop`](Self::stop).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start_pos.is_some()
    }

    /// Returns `true` after [`dispose`](Self::dispose).
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl DragStatus for GestureTracker {
    /// `true` once the current gesture has moved, and until the next press.
    ///
    /// The flag outlives the release so the click event that follows a drag
    /// still sees it.
    fn is_dragging(&self) -> bool {
        self.moved
    }
}
