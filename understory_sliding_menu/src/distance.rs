// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distance model: how far the menu is slid open.
//!
//! [`DistanceModel`] is pure state. It tracks the current slide `distance` and
//! the `max_distance` of a fully open menu, answers the opened/closed and
//! should-open/should-close questions, and reports state changes as values
//! ([`Transition`] and [`TranslateEvent`]) instead of driving any visuals.
//!
//! ## Boundaries
//!
//! - Only [`DistanceModel::open`] and [`DistanceModel::close`] land exactly on
//!   `max_distance` or `0`.
//! - [`DistanceModel::translate`] clamps into `[1, max_distance - 1]`, so a live
//!   drag never reads as fully open or fully closed.
//!
//! ## Minimal example
//!
//! ```
//! use understory_sliding_menu::distance::{DistanceModel, TransitionKind, TransitionOptions};
//!
//! let mut model = DistanceModel::new(200.0).unwrap();
//! assert!(model.is_closed());
//!
//! // Dragging past the halfway point.
//! model.translate(120.0);
//! assert!(model.should_open());
//!
//! // Committing the drag produces an open transition.
//! let transition = model.open_or_close(TransitionOptions::new()).unwrap();
//! assert_eq!(transition.kind, TransitionKind::Open);
//! assert!(model.is_opened());
//! ```

use alloc::boxed::Box;
use core::fmt;

use crate::error::Error;

/// Whether a transition animates or jumps straight to its end state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationMode {
    /// Play the animator's transition.
    #[default]
    Animated,
    /// Apply the end state instantly.
    None,
}

/// Completion callback for an open or close request.
pub type TransitionCallback = Box<dyn FnOnce()>;

/// Options accepted by every open/close/toggle request.
#[derive(Default)]
pub struct TransitionOptions {
    /// Animation mode for the transition.
    pub animation: AnimationMode,
    callback: Option<TransitionCallback>,
}

impl TransitionOptions {
    /// Animated transition without a callback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transition that applies its end state instantly.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            animation: AnimationMode::None,
            callback: None,
        }
    }

    /// Attach a completion callback.
    #[must_use]
    pub fn with_callback(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Returns `true` if the transition skips its animation.
    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.animation == AnimationMode::None
    }

    /// Returns `true` if a completion callback is attached.
    #[must_use]
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Consume the options, invoking the callback if there is one.
    pub fn complete(self) {
        if let Some(callback) = self.callback {
            callback();
        }
    }

    pub(crate) fn take_callback(&mut self) -> Option<TransitionCallback> {
        self.callback.take()
    }
}

impl fmt::Debug for TransitionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionOptions")
            .field("animation", &self.animation)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

/// Direction of a discrete transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// The menu moves to fully open.
    Open,
    /// The menu moves to fully closed.
    Close,
}

/// A discrete open or close signalled by the model.
#[derive(Debug)]
pub struct Transition {
    /// Direction of the transition.
    pub kind: TransitionKind,
    /// Options the request was made with.
    pub options: TransitionOptions,
}

/// Continuous position update emitted while dragging.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TranslateEvent {
    /// Current slide distance.
    pub distance: f64,
    /// Distance of a fully open menu.
    pub max_distance: f64,
}

impl TranslateEvent {
    /// Fraction of the way open, in `[0, 1]`.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        (self.distance / self.max_distance).clamp(0.0, 1.0)
    }
}

/// Slide distance state of one menu.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceModel {
    distance: f64,
    max_distance: f64,
}

impl DistanceModel {
    /// Create a closed model.
    ///
    /// Fails with [`Error::InvalidMaxDistance`] if `max_distance` is not a
    /// number or is not greater than zero.
    pub fn new(max_distance: f64) -> Result<Self, Error> {
        validate_max_distance(max_distance)?;
        Ok(Self {
            distance: 0.0,
            max_distance,
        })
    }

    /// Current slide distance.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Distance of a fully open menu.
    #[must_use]
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Update the fully open distance.
    ///
    /// An opened menu stays opened: its distance snaps to the new maximum.
    /// A menu caught mid-drag is clamped into `[1, max_distance - 1]`.
    pub fn set_max_distance(&mut self, max_distance: f64) -> Result<(), Error> {
        validate_max_distance(max_distance)?;
        let was_opened = self.is_opened();
        let was_closed = self.is_closed();
        self.max_distance = max_distance;
        if was_opened {
            self.distance = max_distance;
        } else if !was_closed {
            self.distance = self.distance.min(max_distance - 1.0).max(1.0);
        }
        Ok(())
    }

    /// The current position, if the menu sits between its boundaries.
    #[must_use]
    pub fn interior_position(&self) -> Option<TranslateEvent> {
        if self.is_opened() || self.is_closed() {
            return None;
        }
        Some(TranslateEvent {
            distance: self.distance,
            max_distance: self.max_distance,
        })
    }

    /// Returns `true` if the menu is fully closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.distance == 0.0
    }

    /// Returns `true` if the menu is fully open.
    #[must_use]
    pub fn is_opened(&self) -> bool {
        self.distance == self.max_distance
    }

    /// Returns `true` if releasing here should commit to open.
    #[must_use]
    pub fn should_open(&self) -> bool {
        !self.is_opened() && self.distance >= self.max_distance / 2.0
    }

    /// Returns `true` if releasing here should commit to close.
    #[must_use]
    pub fn should_close(&self) -> bool {
        !self.is_closed() && self.distance < self.max_distance / 2.0
    }

    /// Move to fully open.
    ///
    /// If the menu is already open the callback runs immediately and `None`
    /// is returned.
    pub fn open(&mut self, options: TransitionOptions) -> Option<Transition> {
        if self.is_opened() {
            options.complete();
            return None;
        }
        self.distance = self.max_distance;
        Some(Transition {
            kind: TransitionKind::Open,
            options,
        })
    }

    /// Move to fully closed.
    ///
    /// If the menu is already closed the callback runs immediately and `None`
    /// is returned.
    pub fn close(&mut self, options: TransitionOptions) -> Option<Transition> {
        if self.is_closed() {
            options.complete();
            return None;
        }
        self.distance = 0.0;
        Some(Transition {
            kind: TransitionKind::Close,
            options,
        })
    }

    /// Commit a partial drag to whichever boundary is nearer.
    ///
    /// Returns `None` without invoking the callback when the menu already sits
    /// on a boundary.
    pub fn open_or_close(&mut self, options: TransitionOptions) -> Option<Transition> {
        if self.should_open() {
            self.open(options)
        } else if self.should_close() {
            self.close(options)
        } else {
            None
        }
    }

    /// Open a closed menu, otherwise close it.
    pub fn toggle(&mut self, options: TransitionOptions) -> Option<Transition> {
        if self.is_closed() {
            self.open(options)
        } else {
            self.close(options)
        }
    }

    /// Move to `x`, clamped into `[1, max_distance - 1]`.
    pub fn translate(&mut self, x: f64) -> TranslateEvent {
        self.distance = x.min(self.max_distance - 1.0).max(1.0);
        TranslateEvent {
            distance: self.distance,
            max_distance: self.max_distance,
        }
    }
}

fn validate_max_distance(max_distance: f64) -> Result<(), Error> {
    if max_distance.is_finite() && max_distance > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidMaxDistance(max_distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    fn counting_options(count: &Rc<Cell<u32>>) -> TransitionOptions {
        let count = Rc::clone(count);
        TransitionOptions::new().with_callback(move || count.set(count.get() + 1))
    }

    fn at(distance: f64, max_distance: f64) -> DistanceModel {
        DistanceModel {
            distance,
            max_distance,
        }
    }

    #[test]
    fn rejects_non_positive_or_nan_max_distance() {
        assert_eq!(DistanceModel::new(0.0), Err(Error::InvalidMaxDistance(0.0)));
        assert_eq!(
            DistanceModel::new(-5.0),
            Err(Error::InvalidMaxDistance(-5.0))
        );
        assert!(DistanceModel::new(f64::NAN).is_err());
        assert!(DistanceModel::new(f64::INFINITY).is_err());
    }

    #[test]
    fn boundary_predicates_track_distance() {
        for d in [0.0, 1.0, 50.0, 99.0, 100.0, 150.0, 199.0, 200.0] {
            let model = at(d, 200.0);
            assert_eq!(model.is_opened(), d == 200.0, "opened at {d}");
            assert_eq!(model.is_closed(), d == 0.0, "closed at {d}");
        }
    }

    #[test]
    fn should_open_and_should_close_split_at_half() {
        for d in [0.0, 1.0, 99.0, 100.0, 101.0, 199.0, 200.0] {
            let model = at(d, 200.0);
            assert_eq!(model.should_open(), d >= 100.0 && d != 200.0, "open at {d}");
            assert_eq!(model.should_close(), d < 100.0 && d != 0.0, "close at {d}");
            assert!(!(model.should_open() && model.should_close()));
        }
    }

    #[test]
    fn translate_clamps_inside_boundaries() {
        let mut model = DistanceModel::new(200.0).unwrap();

        let event = model.translate(-100.0);
        assert_eq!(event.distance, 1.0);
        assert_eq!(model.distance(), 1.0);

        let event = model.translate(500.0);
        assert_eq!(event.distance, 199.0);
        assert_eq!(event.max_distance, 200.0);
        assert!(!model.is_opened());

        model.translate(80.0);
        assert_eq!(model.distance(), 80.0);
    }

    #[test]
    fn open_signals_once_then_short_circuits() {
        let count = Rc::new(Cell::new(0));
        let mut model = DistanceModel::new(200.0).unwrap();

        let transition = model.open(counting_options(&count)).unwrap();
        assert_eq!(transition.kind, TransitionKind::Open);
        assert!(transition.options.has_callback());
        assert_eq!(count.get(), 0);
        assert!(model.is_opened());

        assert!(model.open(counting_options(&count)).is_none());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn close_on_closed_menu_runs_callback_without_signal() {
        let count = Rc::new(Cell::new(0));
        let mut model = DistanceModel::new(200.0).unwrap();

        assert!(model.close(counting_options(&count)).is_none());
        assert_eq!(count.get(), 1);

        model.translate(40.0);
        let transition = model.close(counting_options(&count)).unwrap();
        assert_eq!(transition.kind, TransitionKind::Close);
        assert!(model.is_closed());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn set_max_distance_keeps_opened_state() {
        let mut model = DistanceModel::new(200.0).unwrap();
        model.set_max_distance(300.0).unwrap();
        assert_eq!(model.distance(), 0.0);

        model.open(TransitionOptions::new());
        model.set_max_distance(250.0).unwrap();
        assert_eq!(model.distance(), 250.0);
        assert!(model.is_opened());

        assert!(model.set_max_distance(0.0).is_err());
        assert_eq!(model.max_distance(), 250.0);
    }

    #[test]
    fn set_max_distance_clamps_drag_position() {
        let mut model = DistanceModel::new(300.0).unwrap();
        model.translate(250.0);
        model.set_max_distance(100.0).unwrap();
        assert_eq!(model.distance(), 99.0);
        assert!(!model.is_opened());
        assert!(!model.is_closed());
        assert_eq!(
            model.interior_position(),
            Some(TranslateEvent {
                distance: 99.0,
                max_distance: 100.0,
            })
        );

        // A position still inside the band stays put.
        model.set_max_distance(400.0).unwrap();
        assert_eq!(model.distance(), 99.0);

        model.close(TransitionOptions::new());
        assert_eq!(model.interior_position(), None);
    }

    #[test]
    fn open_or_close_commits_to_nearer_boundary() {
        let mut model = DistanceModel::new(300.0).unwrap();
        model.translate(200.0);
        let transition = model.open_or_close(TransitionOptions::new()).unwrap();
        assert_eq!(transition.kind, TransitionKind::Open);
        assert_eq!(model.distance(), 300.0);

        model.translate(100.0);
        let transition = model.open_or_close(TransitionOptions::new()).unwrap();
        assert_eq!(transition.kind, TransitionKind::Close);

        assert!(model.open_or_close(TransitionOptions::new()).is_none());
    }

    #[test]
    fn toggle_flips_between_boundaries() {
        let mut model = DistanceModel::new(100.0).unwrap();
        assert_eq!(
            model.toggle(TransitionOptions::new()).map(|t| t.kind),
            Some(TransitionKind::Open)
        );
        assert_eq!(
            model.toggle(TransitionOptions::new()).map(|t| t.kind),
            Some(TransitionKind::Close)
        );
    }

    #[test]
    fn translate_ratio_is_fraction_open() {
        let mut model = DistanceModel::new(200.0).unwrap();
        assert_eq!(model.translate(50.0).ratio(), 0.25);
    }
}
