// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Ruler`] component.

use kurbo::Size;

use crate::canvas::RulerCanvas;
use crate::options::RulerOptions;
use crate::render::{self, RenderParams};

/// A ruler bound to a render target.
///
/// The ruler owns its canvas, so drawing always has a target. It remembers
/// the last scroll position and zoom, which [`scroll`](Self::scroll) and
/// [`resize`](Self::resize) fall back to when called without them.
#[derive(Debug)]
pub struct Ruler<C> {
    canvas: C,
    options: RulerOptions,
    size: Size,
    scroll_pos: f64,
    zoom: f64,
}

impl<C: RulerCanvas> Ruler<C> {
    /// Creates a ruler painting into `canvas`.
    ///
    /// Nothing is drawn until [`resize`](Self::resize) is called.
    pub fn new(canvas: C, options: RulerOptions) -> Self {
        let zoom = options.zoom;
        Self {
            canvas,
            options,
            size: Size::ZERO,
            scroll_pos: 0.0,
            zoom,
        }
    }

    /// Re-measures the canvas, reallocates its backing store at 2x and redraws.
    ///
    /// Fixed `width`/`height` options take precedence over the measured client
    /// size. The fixed `scroll_pos` option, when set, replaces the last scroll
    /// position.
    pub fn resize(&mut self, next_zoom: Option<f64>) {
        let client = self.canvas.client_size();
        let size = Size::new(
            self.options.width.unwrap_or(client.width),
            self.options.height.unwrap_or(client.height),
        );
        self.size = size;
        self.canvas.set_backing_size(size * 2.0);
        let scroll_pos = self.options.scroll_pos.unwrap_or(self.scroll_pos);
        self.draw(scroll_pos, next_zoom.unwrap_or(self.zoom));
    }

    /// Redraws at `scroll_pos` without resizing.
    pub fn scroll(&mut self, scroll_pos: f64, next_zoom: Option<f64>) {
        self.draw(scroll_pos, next_zoom.unwrap_or(self.zoom));
    }

    /// Paints the ruler at `scroll_pos` and `zoom`, remembering both.
    pub fn draw(&mut self, scroll_pos: f64, zoom: f64) {
        self.scroll_pos = scroll_pos;
        self.zoom = zoom;
        let params = self.render_params();
        render::draw(&mut self.canvas, &self.options, self.size, &params);
    }

    /// Parameters the next draw would use.
    #[must_use]
    pub fn render_params(&self) -> RenderParams {
        RenderParams::new(&self.options, self.size, self.scroll_pos, self.zoom)
    }

    /// Last drawn scroll position.
    #[must_use]
    pub fn scroll_pos(&self) -> f64 {
        self.scroll_pos
    }

    /// Last drawn zoom.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Logical size from the last [`resize`](Self::resize).
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// The ruler options.
    #[must_use]
    pub fn options(&self) -> &RulerOptions {
        &self.options
    }

    /// Mutable access to the options. Changes apply on the next draw.
    pub fn options_mut(&mut self) -> &mut RulerOptions {
        &mut self.options
    }

    /// Replaces the options. Changes apply on the next draw.
    pub fn set_options(&mut self, options: RulerOptions) {
        self.options = options;
    }

    /// The render target.
    #[must_use]
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Mutable access to the render target.
    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// Consumes the ruler, returning its render target.
    pub fn into_canvas(self) -> C {
        self.canvas
    }
}
