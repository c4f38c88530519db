// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_guide --heading-base-level=0

//! Understory Guide: draggable alignment guides attached to a ruler.
//!
//! A guide is a line at a value in ruler units, drawn across the canvas
//! perpendicular to the ruler. Users create guides by dragging out of the
//! ruler, move them by dragging, and delete them by dragging them back onto
//! the ruler or pressing Backspace/Delete while one is selected.
//!
//! The crate is split into small pieces that can be used on their own:
//!
//! - [`resolve`]: pure functions from pointer deltas to guide values, with
//!   zoom, rounding and snapping.
//! - [`gesture`]: a single-pointer drag tracker.
//! - [`GuideEngine`]: the guide list, the selection and the per-gesture
//!   decision of whether a drag adds, removes, moves or does nothing.
//! - [`Guides`]: a component wiring a [`Ruler`](understory_ruler::Ruler),
//!   the engine and the tracker together behind host-facing input methods.
//!
//! Nothing here draws guides. Hosts read a [`GuidesView`] after each call and
//! render it however they like.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_guide::{Guides, GuidesEvent, GuidesOptions, GuideLayout, HitTarget};
//! use understory_ruler::RecordingCanvas;
//!
//! let canvas = RecordingCanvas::new(Size::new(300.0, 30.0));
//! let mut guides = Guides::new(canvas, GuidesOptions::default());
//! guides.mount();
//!
//! // Drag 40 px down out of the ruler to create a guide at 40.
//! let layout = GuideLayout::default();
//! guides.pointer_down(HitTarget::Ruler, Point::new(10.0, 0.0), &layout);
//! guides.pointer_move(Point::new(10.0, 20.0));
//! guides.pointer_move(Point::new(10.0, 40.0));
//! let events = guides.pointer_up(Point::new(10.0, 40.0));
//!
//! assert_eq!(guides.guides(), [40.0]);
//! assert!(events.contains(&GuidesEvent::AddGuide { pos: 40.0 }));
//! ```
//!
//! ## Lock policy
//!
//! [`LockPolicy::All`] refuses every gesture at drag start. A subset,
//! [`LockPolicy::Only`], lets gestures start and blocks only the named
//! [`LockOps`] when the drag ends. The policy is read at both points, so
//! changing it mid-gesture takes effect at release.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod engine;
pub mod gesture;
mod guides;
mod options;
mod policy;
pub mod resolve;
pub mod timer;
mod view;

pub use engine::{
    ChangeKind, DragSession, DragStartOutcome, DragTarget, DragUpdate, GesturePhase, GuideEngine,
    GuideLayout, GuidesChange, GuidesEvent, GuidesEvents, HitTarget, Key, POINTER_EVENTS_DELAY_MS,
    Propagation, Rejection, Resolution, SessionKind, decide_drag_end, drag_label_transform,
};
pub use guides::Guides;
pub use options::GuidesOptions;
pub use policy::{LockOps, LockPolicy};
pub use view::{DragLabel, GuideVisual, GuidesView, MarkerVisual};
