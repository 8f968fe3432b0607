// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture recognizer: turn raw pointer samples into gesture events.
//!
//! Hosts whose platform already recognizes drags and swipes can feed
//! [`GestureEvent`]s to the menu directly. Hosts that only see pointer
//! down/move/up can run them through a [`GestureRecognizer`] instead.
//!
//! ## Usage
//!
//! 1) Call [`GestureRecognizer::pointer_down`] with the press position, a
//!    millisecond timestamp and what the pointer landed on.
//! 2) Call [`GestureRecognizer::pointer_move`] for each move; once the pointer
//!    travels past [`DRAG_MIN_DISTANCE`] it yields drag events carrying the
//!    cumulative horizontal delta.
//! 3) Call [`GestureRecognizer::pointer_up`]; it yields a swipe (fast drag)
//!    or a tap (short, still press) followed by a release.
//! 4) Pass the menu's [`GestureResponse`] for each event to
//!    [`GestureRecognizer::apply`] so cancelled gestures stop producing
//!    events.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_sliding_menu::gesture::GestureKind;
//! use understory_sliding_menu::recognizer::{GestureRecognizer, PointerTarget};
//!
//! let mut recognizer = GestureRecognizer::new();
//! recognizer.pointer_down(Point::new(10.0, 50.0), 0, PointerTarget::main_panel());
//!
//! let drag = recognizer.pointer_move(Point::new(130.0, 52.0)).unwrap();
//! assert_eq!(drag.kind, GestureKind::DragRight);
//! assert_eq!(drag.delta_x, 120.0);
//!
//! let ended = recognizer.pointer_up(Point::new(130.0, 52.0), 1000);
//! assert_eq!(ended.last().unwrap().kind, GestureKind::Release);
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::gesture::{GestureEvent, GestureKind, GestureResponse};

/// Distance in logical pixels a pointer must travel before a drag starts.
pub const DRAG_MIN_DISTANCE: f64 = 10.0;

/// Horizontal speed in pixels per millisecond that turns a drag into a swipe.
pub const SWIPE_VELOCITY: f64 = 0.7;

/// Longest press, in milliseconds, still recognized as a tap.
pub const TAP_MAX_TIME: u64 = 250;

/// Largest movement in logical pixels still recognized as a tap.
pub const TAP_MAX_DISTANCE: f64 = 10.0;

/// What a pointer press landed on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PointerTarget {
    /// The target sits inside a zone flagged to ignore swipes.
    pub in_ignored_zone: bool,
    /// The target is inside the main panel.
    pub on_main_panel: bool,
}

impl PointerTarget {
    /// A plain target inside the main panel.
    #[must_use]
    pub fn main_panel() -> Self {
        Self {
            in_ignored_zone: false,
            on_main_panel: true,
        }
    }
}

/// Recognizes touch start, drag, swipe, tap and release from pointer samples.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GestureRecognizer {
    start_pos: Option<Point>,
    start_time: u64,
    target: PointerTarget,
    dragging: bool,
    cancelled: bool,
}

impl GestureRecognizer {
    /// Create an idle recognizer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` between a press and its release, unless cancelled.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start_pos.is_some() && !self.cancelled
    }

    /// Returns `true` once the current press has moved far enough to drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Start a new gesture.
    pub fn pointer_down(&mut self, pos: Point, time_ms: u64, target: PointerTarget) -> GestureEvent {
        *self = Self {
            start_pos: Some(pos),
            start_time: time_ms,
            target,
            dragging: false,
            cancelled: false,
        };
        self.event(GestureKind::TouchStart, pos, 0.0)
    }

    /// Track a move. Yields a drag event once past [`DRAG_MIN_DISTANCE`].
    pub fn pointer_move(&mut self, pos: Point) -> Option<GestureEvent> {
        let offset = self.total_offset(pos)?;
        if !self.dragging && offset.hypot() < DRAG_MIN_DISTANCE {
            return None;
        }
        self.dragging = true;
        let kind = if offset.x < 0.0 {
            GestureKind::DragLeft
        } else {
            GestureKind::DragRight
        };
        Some(self.event(kind, pos, offset.x))
    }

    /// End the gesture, yielding a swipe or tap (if any) and then a release.
    pub fn pointer_up(&mut self, pos: Point, time_ms: u64) -> SmallVec<[GestureEvent; 2]> {
        let mut events = SmallVec::new();
        let Some(offset) = self.total_offset(pos) else {
            self.end();
            return events;
        };
        let elapsed = time_ms.saturating_sub(self.start_time).max(1);

        if self.dragging {
            let velocity = offset.x / elapsed as f64;
            if velocity >= SWIPE_VELOCITY {
                events.push(self.event(GestureKind::SwipeRight, pos, offset.x));
            } else if velocity <= -SWIPE_VELOCITY {
                events.push(self.event(GestureKind::SwipeLeft, pos, offset.x));
            }
        } else if elapsed <= TAP_MAX_TIME && offset.hypot() < TAP_MAX_DISTANCE {
            events.push(self.event(GestureKind::Tap, pos, offset.x));
        }
        events.push(self.event(GestureKind::Release, pos, offset.x));
        self.end();
        events
    }

    /// Stop producing events until the next press.
    pub fn cancel_detection(&mut self) {
        self.cancelled = true;
    }

    /// Apply the menu's response to the last event.
    pub fn apply(&mut self, response: GestureResponse) {
        if response.cancel_detection {
            self.cancel_detection();
        }
    }

    fn total_offset(&self, pos: Point) -> Option<Vec2> {
        if self.cancelled {
            return None;
        }
        self.start_pos.map(|start| pos - start)
    }

    fn end(&mut self) {
        self.start_pos = None;
        self.dragging = false;
    }

    fn event(&self, kind: GestureKind, center: Point, delta_x: f64) -> GestureEvent {
        GestureEvent {
            kind,
            center,
            delta_x,
            in_ignored_zone: self.target.in_ignored_zone,
            on_main_panel: self.target.on_main_panel,
        }
    }
}
