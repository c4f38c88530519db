// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The guide interaction engine.
//!
//! [`GuideEngine`] owns the guide list and selection, and interprets one drag
//! gesture at a time:
//!
//! - [`GuideEngine::drag_start`] decides what the gesture is about from the
//!   hit target and the lock policy. A rejected gesture must be stopped by
//!   the caller so no further callbacks arrive.
//! - [`GuideEngine::drag`] resolves the live position for visual feedback.
//! - [`GuideEngine::drag_end`] resolves the final position again and commits
//!   at most one of add, remove or change via [`decide_drag_end`].
//!
//! The engine never touches a render target. Hosts read [`GuideEngine::view`]
//! after each call and apply it to their scene.

use alloc::vec::Vec;

use kurbo::{Affine, Point, Vec2};
use smallvec::SmallVec;
use understory_ruler::Orientation;

use crate::gesture::DragStatus;
use crate::options::GuidesOptions;
use crate::policy::{LockOps, LockPolicy};
use crate::resolve::{Resolved, resolve, to_pixel_delta};
use crate::timer::Debounce;
use crate::view::{DragLabel, GuideVisual, GuidesView, MarkerVisual};

/// Quiet period after the last scroll before guides accept pointer input again.
pub const POINTER_EVENTS_DELAY_MS: u64 = 300;

/// Geometry of the guides container, supplied by the host at drag start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuideLayout {
    /// Client position of the container's logical origin.
    pub origin: Point,
    /// Offset of the guides layer inside the container, in local pixels.
    pub layer_offset: Vec2,
    /// Maps client-space deltas into the container's local space.
    pub screen_to_local: Affine,
}

impl Default for GuideLayout {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            layer_offset: Vec2::ZERO,
            screen_to_local: Affine::IDENTITY,
        }
    }
}

/// What the pointer was pressed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    /// The ruler's drawing surface.
    Ruler,
    /// The guide rendered in `slot`.
    Guide(usize),
    /// Anything else.
    Other,
}

/// The visual being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTarget {
    /// The synthetic marker previewing a new guide.
    Adder,
    /// The existing guide in this slot.
    Guide(usize),
}

/// What a gesture will do, fixed at drag start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionKind {
    /// Creating a guide from the ruler.
    FromRuler,
    /// Moving, or dragging away to delete, the guide in `slot`.
    ExistingGuide {
        /// Render slot of the guide when the drag started.
        slot: usize,
    },
}

impl SessionKind {
    /// The visual this kind of gesture drags.
    #[must_use]
    pub fn target(self) -> DragTarget {
        match self {
            Self::FromRuler => DragTarget::Adder,
            Self::ExistingGuide { slot } => DragTarget::Guide(slot),
        }
    }
}

/// State captured at drag start and threaded through the gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    /// Local pixel offset of the press from the logical origin, scroll included.
    pub origin_offset: Vec2,
    /// Container transform at drag start.
    pub screen_to_local: Affine,
    /// What the gesture does.
    pub kind: SessionKind,
    first_move: bool,
    preview: Option<Resolved>,
}

impl DragSession {
    /// The visual being dragged.
    #[must_use]
    pub fn target(&self) -> DragTarget {
        self.kind.target()
    }

    /// Returns `true` until the first drag frame.
    #[must_use]
    pub fn is_first_move(&self) -> bool {
        self.first_move
    }

    /// Position shown by the last drag frame, if feedback was shown.
    #[must_use]
    pub fn preview(&self) -> Option<Resolved> {
        self.preview
    }
}

/// Why a gesture was refused at drag start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The policy locks everything.
    FullLock,
    /// Pressed on the ruler while adding is locked.
    AddLocked,
    /// Pressed on a guide while both moving and removing are locked.
    MoveLocked,
    /// Pressed on neither the ruler nor a guide.
    InvalidTarget,
}

/// Per-gesture state.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum GesturePhase {
    /// No gesture.
    #[default]
    Idle,
    /// The last gesture was refused.
    Rejected(Rejection),
    /// A gesture is in progress.
    Active(DragSession),
}

/// Result of [`GuideEngine::drag_start`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragStartOutcome {
    /// The gesture continues, dragging `target`.
    Started {
        /// The visual being dragged.
        target: DragTarget,
    },
    /// The gesture must be stopped.
    Rejected(Rejection),
}

impl DragStartOutcome {
    /// Returns `true` for [`DragStartOutcome::Rejected`].
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Result of [`GuideEngine::drag`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragUpdate {
    /// The visual being dragged.
    pub target: DragTarget,
    /// Resolved position for this frame.
    pub resolved: Resolved,
    /// `true` if the visual was moved to `resolved` this frame.
    pub feedback: bool,
}

/// The mutation a finished drag commits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolution {
    /// Append a guide.
    Add(f64),
    /// Delete the guide in `slot`.
    Remove {
        /// Slot to delete.
        slot: usize,
    },
    /// Move the guide in `slot` to `value`.
    Change {
        /// Slot to overwrite.
        slot: usize,
        /// New value.
        value: f64,
    },
    /// Nothing changes.
    Noop,
}

/// Decides what a finished drag does.
///
/// `value` is the resolved guide value. The lock policy is the one in force
/// now, not at drag start.
///
/// - From the ruler: add `value` unless adding is locked, `value` lies before
///   `scroll_pos`, or it is already a guide.
/// - From a guide: a `value` before `scroll_pos` removes the guide; a `value`
///   equal to any existing guide does nothing; anything else moves the guide.
///   Removing and moving each respect their own lock.
#[must_use]
pub fn decide_drag_end(
    kind: SessionKind,
    value: f64,
    scroll_pos: f64,
    guides: &[f64],
    policy: LockPolicy,
) -> Resolution {
    match kind {
        SessionKind::FromRuler => {
            if policy.locks(LockOps::ADD) || value < scroll_pos || guides.contains(&value) {
                Resolution::Noop
            } else {
                Resolution::Add(value)
            }
        }
        SessionKind::ExistingGuide { slot } => {
            if slot >= guides.len() {
                tracing::warn!(
                    slot,
                    len = guides.len(),
                    "dragged guide slot no longer exists"
                );
                return Resolution::Noop;
            }
            if value < scroll_pos {
                if policy.locks(LockOps::REMOVE) {
                    Resolution::Noop
                } else {
                    Resolution::Remove { slot }
                }
            } else if guides.contains(&value) || policy.locks(LockOps::CHANGE) {
                Resolution::Noop
            } else {
                Resolution::Change { slot, value }
            }
        }
    }
}

/// Which mutation a [`GuidesChange`] reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// A guide was added.
    Add,
    /// A guide was removed.
    Remove,
    /// A guide was moved.
    Change,
}

/// Payload of [`GuidesEvent::ChangeGuides`].
#[derive(Clone, Debug, PartialEq)]
pub struct GuidesChange {
    /// The guide list after the mutation.
    pub guides: Vec<f64>,
    /// Distance the pointer travelled during the gesture.
    pub dist: Vec2,
    /// The mutation.
    pub kind: ChangeKind,
}

impl GuidesChange {
    /// Returns `true` if a guide was added.
    #[must_use]
    pub fn is_add(&self) -> bool {
        self.kind == ChangeKind::Add
    }

    /// Returns `true` if a guide was removed.
    #[must_use]
    pub fn is_remove(&self) -> bool {
        self.kind == ChangeKind::Remove
    }

    /// Returns `true` if a guide was moved.
    #[must_use]
    pub fn is_change(&self) -> bool {
        self.kind == ChangeKind::Change
    }
}

/// Notifications for the host.
#[derive(Clone, Debug, PartialEq)]
pub enum GuidesEvent {
    /// A gesture started on the ruler or a guide.
    DragStart {
        /// The visual being dragged.
        target: DragTarget,
        /// Pointer position.
        client: Point,
    },
    /// A gesture moved.
    Drag {
        /// The visual being dragged.
        target: DragTarget,
        /// Pointer position.
        client: Point,
        /// Distance from the press position.
        dist: Vec2,
        /// Resolved position for this frame.
        resolved: Resolved,
    },
    /// A gesture that moved has ended.
    DragEnd {
        /// The visual that was dragged.
        target: DragTarget,
        /// Distance from the press position.
        dist: Vec2,
    },
    /// A drag that started on the ruler has ended.
    ClickRuler {
        /// Resolved guide value at release.
        pos: f64,
    },
    /// A guide was created by dragging from the ruler.
    AddGuide {
        /// Value of the new guide.
        pos: f64,
    },
    /// A guide was deleted.
    DeleteGuide {
        /// Slot the guide occupied.
        index: usize,
        /// Value of the deleted guide.
        pos: f64,
    },
    /// The guide list was mutated by a gesture.
    ChangeGuides(GuidesChange),
}

/// Events produced by a single engine call.
pub type GuidesEvents = SmallVec<[GuidesEvent; 4]>;

/// Keys relevant to guide editing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Any other key.
    Other,
}

impl Key {
    /// Returns `true` for keys that delete the selected guide.
    #[must_use]
    pub fn is_delete(self) -> bool {
        matches!(self, Self::Backspace | Self::Delete)
    }
}

/// Whether the host should keep propagating a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Propagation {
    /// Let other handlers see the event.
    Continue,
    /// Stop propagation and prevent the default action.
    Stop,
}

/// Owns guides and selection and interprets drag gestures.
#[derive(Debug)]
pub struct GuideEngine {
    options: GuidesOptions,
    guides: Vec<f64>,
    selected: Vec<f64>,
    scroll_pos: f64,
    layer_zoom: f64,
    phase: GesturePhase,
    dragging: Option<DragTarget>,
    pointer_events: bool,
    pointer_timer: Debounce,
}

impl GuideEngine {
    /// Creates an engine holding `options.default_guides`.
    #[must_use]
    pub fn new(options: GuidesOptions) -> Self {
        let guides = options.default_guides.clone();
        let layer_zoom = options.zoom();
        Self {
            options,
            guides,
            selected: Vec::new(),
            scroll_pos: 0.0,
            layer_zoom,
            phase: GesturePhase::Idle,
            dragging: None,
            pointer_events: true,
            pointer_timer: Debounce::new(POINTER_EVENTS_DELAY_MS),
        }
    }

    /// The options.
    #[must_use]
    pub fn options(&self) -> &GuidesOptions {
        &self.options
    }

    /// Mutable access to the options. Read again at the next decision.
    pub fn options_mut(&mut self) -> &mut GuidesOptions {
        &mut self.options
    }

    /// Replaces the options.
    ///
    /// A changed `default_guides` list replaces the current guides.
    pub fn set_options(&mut self, options: GuidesOptions) {
        if options.default_guides != self.options.default_guides {
            self.guides = options.default_guides.clone();
        }
        self.options = options;
    }

    /// The current guide values, in slot order.
    #[must_use]
    pub fn guides(&self) -> &[f64] {
        &self.guides
    }

    /// Selected guide values.
    #[must_use]
    pub fn selected(&self) -> &[f64] {
        &self.selected
    }

    /// Scroll position from the last [`scroll_guides`](Self::scroll_guides).
    #[must_use]
    pub fn scroll_pos(&self) -> f64 {
        self.scroll_pos
    }

    /// The current gesture phase.
    #[must_use]
    pub fn phase(&self) -> &GesturePhase {
        &self.phase
    }

    /// The active drag session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match &self.phase {
            GesturePhase::Active(session) => Some(session),
            _ => None,
        }
    }

    /// Returns `true` while the guides layer accepts pointer input.
    #[must_use]
    pub fn pointer_events(&self) -> bool {
        self.pointer_events
    }

    /// Replaces all guides. No events.
    pub fn load_guides(&mut self, guides: impl Into<Vec<f64>>) {
        self.guides = guides.into();
    }

    /// Removes all guides. No events.
    pub fn clear_all_guides(&mut self) {
        self.guides.clear();
    }

    /// Clears the selection.
    pub fn reset_selected(&mut self) {
        self.selected.clear();
    }

    /// Selects the guide with `value`, unless the pointer has just dragged.
    ///
    /// Always asks the host to stop propagation, so a window-level click
    /// handler does not immediately clear the new selection.
    pub fn select_guide(&mut self, value: f64, status: &impl DragStatus) -> Propagation {
        if !status.is_dragging() {
            self.selected.clear();
            self.selected.push(value);
        }
        Propagation::Stop
    }

    /// Deletes the first guide whose value is selected, on Backspace or Delete.
    pub fn delete_selected_guide(&mut self, key: Key) -> Option<GuidesEvent> {
        if !key.is_delete() || self.selected.is_empty() {
            return None;
        }
        let index = self
            .guides
            .iter()
            .position(|guide| self.selected.contains(guide));
        self.selected.clear();
        let index = index?;
        let pos = self.guides.remove(index);
        tracing::debug!(index, pos, "deleted selected guide");
        Some(GuidesEvent::DeleteGuide { index, pos })
    }

    /// Offsets the guides layer for `pos` and suppresses pointer input until
    /// [`poll`](Self::poll) sees a quiet period.
    ///
    /// `zoom` only affects the layer offset; guide offsets use the options zoom.
    pub fn scroll_guides(&mut self, pos: f64, zoom: f64, now: u64) {
        if self.options.show_guides {
            self.pointer_events = false;
            self.pointer_timer.trigger(now);
        }
        self.scroll_pos = pos;
        self.layer_zoom = zoom;
    }

    /// Re-enables pointer input once the scroll quiet period has passed.
    ///
    /// Returns `true` when this call re-enabled it.
    pub fn poll(&mut self, now: u64) -> bool {
        if self.pointer_timer.poll(now) {
            self.pointer_events = true;
            return true;
        }
        false
    }

    /// Starts a gesture pressed on `hit` at `client`.
    ///
    /// Starting any gesture clears the selection. On
    /// [`DragStartOutcome::Rejected`] the caller must stop its gesture tracker.
    pub fn drag_start(
        &mut self,
        hit: HitTarget,
        client: Point,
        layout: &GuideLayout,
    ) -> DragStartOutcome {
        self.reset_selected();
        self.dragging = None;

        let policy = self.options.lock_guides;
        if policy.is_full() {
            return self.reject(Rejection::FullLock);
        }

        let origin_offset = self.origin_offset(client, layout);
        let kind = match hit {
            HitTarget::Ruler => {
                if policy.locks(LockOps::ADD) {
                    return self.reject(Rejection::AddLocked);
                }
                SessionKind::FromRuler
            }
            HitTarget::Guide(slot) => {
                if policy.locks(LockOps::REMOVE | LockOps::CHANGE) {
                    return self.reject(Rejection::MoveLocked);
                }
                SessionKind::ExistingGuide { slot }
            }
            HitTarget::Other => return self.reject(Rejection::InvalidTarget),
        };

        tracing::debug!(?kind, ?origin_offset, "drag started");
        self.phase = GesturePhase::Active(DragSession {
            origin_offset,
            screen_to_local: layout.screen_to_local,
            kind,
            first_move: true,
            preview: None,
        });
        DragStartOutcome::Started {
            target: kind.target(),
        }
    }

    /// Resolves a drag frame at accumulated distance `dist`.
    pub fn drag(&mut self, dist: Vec2) -> Option<DragUpdate> {
        let GesturePhase::Active(session) = &mut self.phase else {
            return None;
        };
        let first = session.first_move;
        session.first_move = false;
        if first {
            self.dragging = Some(session.kind.target());
        }

        let resolved = resolve(
            &self.options.resolve_params(),
            session.origin_offset,
            session.screen_to_local,
            dist,
        );
        let feedback = !(first && session.kind == SessionKind::FromRuler);
        if feedback {
            session.preview = Some(resolved);
        }
        tracing::trace!(?dist, ?resolved, feedback, "drag");
        Some(DragUpdate {
            target: session.kind.target(),
            resolved,
            feedback,
        })
    }

    /// Ends the gesture at accumulated distance `dist`.
    ///
    /// A gesture that never moved (`is_drag == false`) changes nothing and
    /// produces no events.
    pub fn drag_end(&mut self, dist: Vec2, is_drag: bool) -> GuidesEvents {
        let mut events = GuidesEvents::new();
        let phase = core::mem::take(&mut self.phase);
        let GesturePhase::Active(session) = phase else {
            return events;
        };
        self.dragging = None;
        if !is_drag {
            return events;
        }

        let resolved = resolve(
            &self.options.resolve_params(),
            session.origin_offset,
            session.screen_to_local,
            dist,
        );
        let value = resolved.value;
        if session.kind == SessionKind::FromRuler {
            events.push(GuidesEvent::ClickRuler { pos: value });
        }

        let resolution = decide_drag_end(
            session.kind,
            value,
            self.scroll_pos,
            &self.guides,
            self.options.lock_guides,
        );
        tracing::debug!(?resolution, value, "drag ended");
        match resolution {
            Resolution::Add(pos) => {
                self.guides.push(pos);
                events.push(self.commit(dist, ChangeKind::Add));
                events.push(GuidesEvent::AddGuide { pos });
            }
            Resolution::Remove { slot } => {
                let pos = self.guides.remove(slot);
                events.push(GuidesEvent::DeleteGuide { index: slot, pos });
                events.push(self.commit(dist, ChangeKind::Remove));
            }
            Resolution::Change { slot, value } => {
                self.guides[slot] = value;
                events.push(self.commit(dist, ChangeKind::Change));
            }
            Resolution::Noop => {}
        }

        events.push(GuidesEvent::DragEnd {
            target: session.target(),
            dist,
        });
        events
    }

    /// Snapshot of everything a host needs to render the guides layer.
    #[must_use]
    pub fn view(&self) -> GuidesView {
        let orientation = self.options.orientation();
        let zoom = self.options.zoom();
        let session = self.session();
        let preview_for = |target: DragTarget| {
            session
                .filter(|s| s.target() == target)
                .and_then(DragSession::preview)
        };

        let guides = if self.options.show_guides {
            self.guides
                .iter()
                .enumerate()
                .map(|(slot, &value)| {
                    let target = DragTarget::Guide(slot);
                    let preview = preview_for(target);
                    let shown = preview.map_or(value, |p| p.value);
                    GuideVisual {
                        slot,
                        value: shown,
                        offset: preview.map_or(value * zoom, |p| p.pixel_pos),
                        visible: value - self.scroll_pos >= 0.0,
                        selected: self.selected.contains(&value),
                        dragging: self.dragging == Some(target),
                        label: self
                            .options
                            .display_guide_pos
                            .then(|| self.options.format_guide_pos(shown)),
                    }
                })
                .collect()
        } else {
            Vec::new()
        };

        let adder_preview = preview_for(DragTarget::Adder);
        let adder = MarkerVisual {
            offset: adder_preview.map_or(0.0, |p| p.pixel_pos),
            value: adder_preview.map(|p| p.value),
            dragging: self.dragging == Some(DragTarget::Adder),
        };

        let drag_label = if self.options.display_drag_pos {
            session.and_then(DragSession::preview).map(|p| DragLabel {
                text: self.options.format_drag_pos(p.value),
                transform: drag_label_transform(orientation, p.pixel_pos),
            })
        } else {
            None
        };

        GuidesView {
            orientation,
            layer_offset: -self.scroll_pos * self.layer_zoom,
            pointer_events: self.pointer_events,
            guides,
            adder,
            drag_label,
        }
    }

    fn reject(&mut self, rejection: Rejection) -> DragStartOutcome {
        tracing::debug!(?rejection, "drag rejected");
        self.phase = GesturePhase::Rejected(rejection);
        DragStartOutcome::Rejected(rejection)
    }

    fn commit(&self, dist: Vec2, kind: ChangeKind) -> GuidesEvent {
        GuidesEvent::ChangeGuides(GuidesChange {
            guides: self.guides.clone(),
            dist,
            kind,
        })
    }

    fn origin_offset(&self, client: Point, layout: &GuideLayout) -> Vec2 {
        let local = to_pixel_delta(layout.screen_to_local, client - layout.origin);
        let offset = local - layout.layer_offset;
        let scrolled = self.scroll_pos * self.options.zoom();
        match self.options.orientation() {
            Orientation::Horizontal => Vec2::new(offset.x, offset.y + scrolled),
            Orientation::Vertical => Vec2::new(offset.x + scrolled, offset.y),
        }
    }
}

/// Placement of the floating drag label for a guide at `pixel_pos`.
///
/// Horizontal guides get a label rotated to read along the vertical ruler edge.
#[must_use]
pub fn drag_label_transform(orientation: Orientation, pixel_pos: f64) -> Affine {
    match orientation {
        Orientation::Horizontal => {
            Affine::translate((-18.0, pixel_pos - 10.0))
                * Affine::rotate(-core::f64::consts::FRAC_PI_2)
        }
        Orientation::Vertical => Affine::translate((pixel_pos + 8.0, 1.0)),
    }
}
