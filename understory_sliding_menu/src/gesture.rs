// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture interpreter: turn gesture events into distance model commands.
//!
//! The interpreter consumes the discrete events of a gesture recognizer
//! (touch start, drag, swipe, tap, release) and decides what they mean for
//! the menu. It never mutates the [`DistanceModel`]; it reads it and returns a
//! [`GestureCommand`] for the owner to apply, plus a [`GestureResponse`] telling
//! the recognizer whether to stop detecting or to prevent the platform
//! default.
//!
//! ## Rules
//!
//! - A touch starting inside an ignored zone cancels detection for the
//!   gesture.
//! - On a closed menu, a touch starting outside the swipe target width from
//!   the menu's edge cancels detection, so the content can scroll instead.
//! - Drags are sign-flipped for right-mounted menus so that movement toward
//!   the open state is always positive. The opened state at the first drag
//!   sample is cached for the whole gesture; the target distance is the
//!   cumulative delta, plus the maximum distance if the gesture began open.
//! - Drags pushing past a boundary the menu already sits on are ignored.
//! - Swipes open or close outright and end detection.
//! - Release commits to whichever boundary is nearer.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_sliding_menu::config::MenuSide;
//! use understory_sliding_menu::distance::DistanceModel;
//! use understory_sliding_menu::gesture::{GestureCommand, GestureEvent, GestureInterpreter};
//!
//! let model = DistanceModel::new(300.0).unwrap();
//! let mut interpreter = GestureInterpreter::new(MenuSide::Right, None);
//!
//! interpreter.interpret(&GestureEvent::touch_start(Point::new(350.0, 10.0)), &model, 400.0);
//! let result = interpreter.interpret(&GestureEvent::drag(-200.0), &model, 400.0);
//! assert_eq!(result.command, Some(GestureCommand::Translate(200.0)));
//! ```

use kurbo::Point;

use crate::config::{MenuSide, resolve_swipe_target_width};
use crate::distance::DistanceModel;

/// Kind of gesture event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// A finger touched down.
    TouchStart,
    /// The finger is dragging left.
    DragLeft,
    /// The finger is dragging right.
    DragRight,
    /// A fast leftward flick.
    SwipeLeft,
    /// A fast rightward flick.
    SwipeRight,
    /// A short touch without movement.
    Tap,
    /// The finger lifted.
    Release,
}

/// One event from a gesture recognizer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureEvent {
    /// What happened.
    pub kind: GestureKind,
    /// Pointer position in main panel coordinates.
    pub center: Point,
    /// Horizontal movement since the gesture started.
    pub delta_x: f64,
    /// Whether the event target sits inside a zone flagged to ignore swipes.
    pub in_ignored_zone: bool,
    /// Whether the event target is inside the main panel.
    pub on_main_panel: bool,
}

impl GestureEvent {
    /// An event of `kind` at the origin on the main panel.
    #[must_use]
    pub fn new(kind: GestureKind) -> Self {
        Self {
            kind,
            center: Point::ORIGIN,
            delta_x: 0.0,
            in_ignored_zone: false,
            on_main_panel: true,
        }
    }

    /// A touch start at `center`.
    #[must_use]
    pub fn touch_start(center: Point) -> Self {
        Self {
            center,
            ..Self::new(GestureKind::TouchStart)
        }
    }

    /// A drag with cumulative horizontal movement `delta_x`.
    #[must_use]
    pub fn drag(delta_x: f64) -> Self {
        let kind = if delta_x < 0.0 {
            GestureKind::DragLeft
        } else {
            GestureKind::DragRight
        };
        Self {
            delta_x,
            ..Self::new(kind)
        }
    }

    /// Mark the event target as inside an ignored zone.
    #[must_use]
    pub fn in_ignored_zone(mut self) -> Self {
        self.in_ignored_zone = true;
        self
    }

    /// Mark the event target as outside the main panel.
    #[must_use]
    pub fn off_main_panel(mut self) -> Self {
        self.on_main_panel = false;
        self
    }
}

/// What the recognizer should do after an event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GestureResponse {
    /// Stop detecting the current gesture.
    pub cancel_detection: bool,
    /// Suppress the platform default (for example scrolling).
    pub prevent_default: bool,
}

/// Change the interpreter wants applied to the menu.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureCommand {
    /// Move to this absolute distance.
    Translate(f64),
    /// Open the menu.
    Open,
    /// Close the menu.
    Close,
}

/// Result of interpreting one event.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Interpretation {
    /// Instructions for the recognizer.
    pub response: GestureResponse,
    /// Change to apply to the menu, if any.
    pub command: Option<GestureCommand>,
}

/// State cached for the gesture in progress.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct GestureSession {
    started_opened: Option<bool>,
    swipe_target_width: Option<f64>,
    cancelled: bool,
}

/// Maps gesture events onto menu commands.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureInterpreter {
    side: MenuSide,
    swipe_target_width: Option<f64>,
    session: GestureSession,
}

impl GestureInterpreter {
    /// Create an interpreter for a menu mounted on `side`.
    ///
    /// `swipe_target_width` is the configured edge zone; see
    /// [`resolve_swipe_target_width`].
    #[must_use]
    pub fn new(side: MenuSide, swipe_target_width: Option<f64>) -> Self {
        Self {
            side,
            swipe_target_width,
            session: GestureSession::default(),
        }
    }

    /// Change the configured swipe target width. Applies from the next
    /// gesture.
    pub fn set_swipe_target_width(&mut self, width: Option<f64>) {
        self.swipe_target_width = width;
    }

    /// Forget the gesture in progress.
    pub fn reset(&mut self) {
        self.session = GestureSession::default();
    }

    /// Interpret `event` against the current model state.
    ///
    /// `main_width` is the current width of the main panel.
    pub fn interpret(
        &mut self,
        event: &GestureEvent,
        model: &DistanceModel,
        main_width: f64,
    ) -> Interpretation {
        if event.kind == GestureKind::TouchStart {
            self.session = GestureSession::default();
        } else if self.session.cancelled {
            log::trace!("sliding menu: gesture cancelled, ignoring {:?}", event.kind);
            return Interpretation::default();
        }

        let mut result = Interpretation::default();
        if event.in_ignored_zone {
            self.cancel(&mut result);
        }

        match event.kind {
            GestureKind::TouchStart => {
                if model.is_closed() && !self.inside_swipe_target(event.center.x, main_width) {
                    self.cancel(&mut result);
                }
            }
            GestureKind::DragLeft | GestureKind::DragRight => {
                result.response.prevent_default = true;
                let delta = self.side.direction() * event.delta_x;
                let started_opened = *self
                    .session
                    .started_opened
                    .get_or_insert_with(|| model.is_opened());

                if (delta < 0.0 && model.is_closed()) || (delta > 0.0 && model.is_opened()) {
                    return result;
                }
                let distance = if started_opened {
                    delta + model.max_distance()
                } else {
                    delta
                };
                result.command = Some(GestureCommand::Translate(distance));
            }
            GestureKind::SwipeLeft | GestureKind::SwipeRight => {
                result.response.prevent_default = true;
                let opens = (event.kind == GestureKind::SwipeLeft) == self.side.is_right();
                result.command = Some(if opens {
                    GestureCommand::Open
                } else {
                    GestureCommand::Close
                });
                self.cancel(&mut result);
            }
            GestureKind::Release => {
                self.session = GestureSession::default();
                if model.should_open() {
                    result.command = Some(GestureCommand::Open);
                } else if model.should_close() {
                    result.command = Some(GestureCommand::Close);
                }
            }
            GestureKind::Tap => {}
        }
        result
    }

    fn cancel(&mut self, result: &mut Interpretation) {
        self.session.cancelled = true;
        result.response.cancel_detection = true;
    }

    fn inside_swipe_target(&mut self, x: f64, main_width: f64) -> bool {
        let configured = self.swipe_target_width;
        let target = *self
            .session
            .swipe_target_width
            .get_or_insert_with(|| resolve_swipe_target_width(configured, main_width));
        match self.side {
            MenuSide::Left => x < target,
            MenuSide::Right => main_width - x < target,
        }
    }
}

/// Returns `true` if any node on a root→target `path` is flagged to ignore
/// swipes.
///
/// Hosts with a node tree can use this to fill
/// [`GestureEvent::in_ignored_zone`].
pub fn inside_ignored_element<K>(path: &[K], is_ignored: impl Fn(&K) -> bool) -> bool {
    path.iter().rev().any(is_ignored)
}
