// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_ruler --heading-base-level=0

//! Understory Ruler: a headless tick-and-label scale for canvas editors.
//!
//! A [`Ruler`] paints subdivided tick marks and numeric labels along one axis,
//! given a scroll position (in ruler units) and a zoom (pixels per unit). It
//! draws through the [`RulerCanvas`] trait, a small subset of a 2D canvas
//! context, so the same routine can target an HTML canvas, a native renderer
//! or the [`RecordingCanvas`] used in tests.
//!
//! The backing store is always twice the logical size. Each draw starts with a
//! single `scale(2, 2)`, after which every coordinate is in logical pixels.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_ruler::{RecordingCanvas, Ruler, RulerCanvas, RulerOptions};
//!
//! let canvas = RecordingCanvas::new(Size::new(200.0, 30.0));
//! let mut ruler = Ruler::new(canvas, RulerOptions::default());
//!
//! // Allocates a 400x60 backing store and draws at scroll 0.
//! ruler.resize(None);
//! assert_eq!(ruler.canvas().backing_size(), Size::new(400.0, 60.0));
//! assert_eq!(ruler.canvas().texts(), ["0", "50", "100", "150", "200"]);
//!
//! // Scroll so 25 units are off-screen to the left.
//! ruler.scroll(25.0, None);
//! assert_eq!(ruler.render_params().min_range, 0);
//! ```
//!
//! ## Tick layout
//!
//! Main ticks sit at every multiple of `unit`. Each main tick is split into
//! `segment` subdivisions: index 0 uses the main line size, even indices the
//! long size, odd indices the short size. `direction` decides whether lines
//! hang from the origin edge, the center or the far edge of the ruler.
//!
//! A finite `range` both highlights and clips: ticks and labels outside it are
//! not drawn.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod canvas;
pub mod options;
pub mod render;
mod ruler;

pub use canvas::{CanvasCommand, RecordingCanvas, RulerCanvas, TextBaseline};
pub use options::{
    Direction, LineSize, Orientation, ParseLineSizeError, RulerOptions, TextAlign, Theme,
    ValueFormat, format_value,
};
pub use render::RenderParams;
pub use ruler::Ruler;
