// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Guides`] component: a ruler, a guide engine and a gesture tracker.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};
use understory_ruler::{Ruler, RulerCanvas};

use crate::engine::{
    DragStartOutcome, GuideEngine, GuideLayout, GuidesEvent, GuidesEvents, HitTarget, Key,
    Propagation,
};
use crate::gesture::{GestureEvent, GestureTracker};
use crate::options::GuidesOptions;
use crate::view::GuidesView;

/// A ruler with draggable guides.
///
/// Hosts forward raw pointer input and window-level key/click events, and
/// read [`view`](Self::view) afterwards. Window-level handlers only act
/// between [`mount`](Self::mount) and [`unmount`](Self::unmount).
#[derive(Debug)]
pub struct Guides<C> {
    ruler: Ruler<C>,
    engine: GuideEngine,
    tracker: GestureTracker,
    mounted: bool,
}

impl<C: RulerCanvas> Guides<C> {
    /// Creates guides over a ruler painting into `canvas`.
    pub fn new(canvas: C, options: GuidesOptions) -> Self {
        let ruler = Ruler::new(canvas, options.ruler.clone());
        let mut tracker = GestureTracker::new();
        tracker.dispose();
        Self {
            ruler,
            engine: GuideEngine::new(options),
            tracker,
            mounted: false,
        }
    }

    /// Subscribes to input and draws the ruler.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.tracker.enable();
        self.ruler.resize(None);
        tracing::debug!("guides mounted");
    }

    /// Unsubscribes from input and abandons any gesture in progress.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.tracker.dispose();
        let _ = self.engine.drag_end(Vec2::ZERO, false);
        tracing::debug!("guides unmounted");
    }

    /// Returns `true` between [`mount`](Self::mount) and [`unmount`](Self::unmount).
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Pointer pressed on `hit` at `client`.
    ///
    /// While pointer input is suppressed after a scroll, guides are not
    /// hittable and a press on one counts as a press on nothing.
    pub fn pointer_down(
        &mut self,
        hit: HitTarget,
        client: Point,
        layout: &GuideLayout,
    ) -> GuidesEvents {
        let mut events = GuidesEvents::new();
        let hit = match hit {
            HitTarget::Guide(_) if !self.engine.pointer_events() => HitTarget::Other,
            hit => hit,
        };
        if let Some(GestureEvent::DragStart { client }) = self.tracker.pointer_down(client) {
            match self.engine.drag_start(hit, client, layout) {
                DragStartOutcome::Started { target } => {
                    events.push(GuidesEvent::DragStart { target, client });
                }
                DragStartOutcome::Rejected(_) => self.tracker.stop(),
            }
        }
        events
    }

    /// Pointer moved to `client`.
    pub fn pointer_move(&mut self, client: Point) -> GuidesEvents {
        let mut events = GuidesEvents::new();
        let Some(GestureEvent::Drag { client, dist, .. }) = self.tracker.pointer_move(client)
        else {
            return events;
        };
        if let Some(update) = self.engine.drag(dist) {
            events.push(GuidesEvent::Drag {
                target: update.target,
                client,
                dist,
                resolved: update.resolved,
            });
        }
        events
    }

    /// Pointer released at `client`.
    pub fn pointer_up(&mut self, client: Point) -> GuidesEvents {
        match self.tracker.pointer_up(client) {
            Some(GestureEvent::DragEnd { dist, is_drag, .. }) => {
                self.engine.drag_end(dist, is_drag)
            }
            _ => GuidesEvents::new(),
        }
    }

    /// Click on the guide in `slot`.
    ///
    /// Selects it unless the click ends a drag. Always returns
    /// [`Propagation::Stop`] so the window click handler leaves the
    /// selection alone.
    pub fn guide_click(&mut self, slot: usize) -> Propagation {
        match self.engine.guides().get(slot).copied() {
            Some(value) => self.engine.select_guide(value, &self.tracker),
            None => Propagation::Stop,
        }
    }

    /// Window-level key press. Backspace and Delete remove the selected guide.
    pub fn window_key_down(&mut self, key: Key) -> Option<GuidesEvent> {
        if !self.mounted {
            return None;
        }
        self.engine.delete_selected_guide(key)
    }

    /// Window-level click. Clears the selection.
    pub fn window_click(&mut self) {
        if self.mounted {
            self.engine.reset_selected();
        }
    }

    /// Redraws the ruler at `pos` without moving the guides.
    pub fn scroll(&mut self, pos: f64) {
        self.ruler.scroll(pos, None);
    }

    /// Moves the guides layer for `pos` at `zoom`. See [`GuideEngine::scroll_guides`].
    pub fn scroll_guides(&mut self, pos: f64, zoom: f64, now: u64) {
        self.engine.scroll_guides(pos, zoom, now);
    }

    /// Re-measures and redraws the ruler.
    pub fn resize(&mut self) {
        self.ruler.resize(None);
    }

    /// Advances the scroll debounce. Returns `true` when pointer input was re-enabled.
    pub fn poll(&mut self, now: u64) -> bool {
        self.engine.poll(now)
    }

    /// The current guide values.
    #[must_use]
    pub fn guides(&self) -> &[f64] {
        self.engine.guides()
    }

    /// Replaces all guides. No events.
    pub fn load_guides(&mut self, guides: impl Into<Vec<f64>>) {
        self.engine.load_guides(guides);
    }

    /// Removes all guides. No events.
    pub fn clear_all_guides(&mut self) {
        self.engine.clear_all_guides();
    }

    /// Deletes the selected guide if `key` is Backspace or Delete.
    pub fn delete_selected_guide(&mut self, key: Key) -> Option<GuidesEvent> {
        self.engine.delete_selected_guide(key)
    }

    /// Clears the selection.
    pub fn reset_selected(&mut self) {
        self.engine.reset_selected();
    }

    /// Replaces options for both the ruler and the guides.
    ///
    /// A mounted ruler is redrawn at the new zoom.
    pub fn set_options(&mut self, options: GuidesOptions) {
        let zoom = options.zoom();
        self.ruler.set_options(options.ruler.clone());
        self.engine.set_options(options);
        if self.mounted {
            self.ruler.resize(Some(zoom));
        }
    }

    /// The options.
    #[must_use]
    pub fn options(&self) -> &GuidesOptions {
        self.engine.options()
    }

    /// Snapshot of the guides layer.
    #[must_use]
    pub fn view(&self) -> GuidesView {
        self.engine.view()
    }

    /// The ruler.
    #[must_use]
    pub fn ruler(&self) -> &Ruler<C> {
        &self.ruler
    }

    /// Mutable access to the ruler.
    pub fn ruler_mut(&mut self) -> &mut Ruler<C> {
        &mut self.ruler
    }

    /// The engine.
    #[must_use]
    pub fn engine(&self) -> &GuideEngine {
        &self.engine
    }

    /// Mutable access to the engine, e.g. to change options mid-gesture.
    pub fn engine_mut(&mut self) -> &mut GuideEngine {
        &mut self.engine
    }

    /// The gesture tracker.
    #[must_use]
    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }
}
