// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in headless animators: reveal, overlay and push.
//!
//! These animators compute where the panels sit ([`PanelLayout`]) for the
//! current slide distance; the host applies the transforms. Easing is left to
//! the host, so a non-instant transition moves straight to its end layout and
//! reports [`AnimationProgress::Running`] for [`DEFAULT_ANIMATION_DURATION`].
//!
//! - [`RevealAnimator`]: the main panel slides away and uncovers the menu
//!   resting beneath it.
//! - [`OverlayAnimator`]: the menu slides in over a stationary main panel.
//! - [`PushAnimator`]: the menu slides in and pushes the main panel along.
//!
//! ```
//! use understory_sliding_menu::animator::{AnimatorSetup, SlidingMenuAnimator};
//! use understory_sliding_menu::animators::OverlayAnimator;
//! use understory_sliding_menu::config::{MenuSide, SlideDistance};
//!
//! let mut overlay = OverlayAnimator::default();
//! overlay.setup(AnimatorSetup {
//!     side: MenuSide::Left,
//!     width: SlideDistance::Pixels(200.0),
//!     container_width: 400.0,
//! });
//! overlay.open_menu(true);
//!
//! let layout = overlay.panel_layout().unwrap();
//! assert_eq!(layout.menu.translation().x, 0.0);
//! assert_eq!(layout.main.translation().x, 0.0);
//! ```
//!
//! [`DEFAULT_ANIMATION_DURATION`]: crate::animator::DEFAULT_ANIMATION_DURATION

use alloc::boxed::Box;

use kurbo::{Affine, Vec2};

use crate::animator::{
    AnimationProgress, AnimatorCapabilities, AnimatorSetup, PanelLayout, ResizeEvent,
    SlidingMenuAnimator,
};
use crate::config::{MenuSide, SlideDistance};
use crate::distance::TranslateEvent;

/// Opacity of a fully closed menu under the reveal animator.
const REVEAL_CLOSED_OPACITY: f64 = 0.5;

/// Slide state shared by the built-in animators.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Geometry {
    side: MenuSide,
    width: SlideDistance,
    container_width: f64,
    distance: f64,
    max_distance: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            side: MenuSide::Left,
            width: SlideDistance::DEFAULT,
            container_width: 0.0,
            distance: 0.0,
            max_distance: 0.0,
        }
    }
}

impl Geometry {
    fn menu_width(&self) -> f64 {
        self.width.resolve(self.container_width).max(0.0)
    }

    fn ratio(&self) -> f64 {
        if self.max_distance > 0.0 {
            (self.distance / self.max_distance).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn setup(&mut self, setup: AnimatorSetup) {
        self.side = setup.side;
        self.width = setup.width;
        self.container_width = setup.container_width;
        self.distance = 0.0;
        self.max_distance = self.menu_width();
    }

    fn open(&mut self, instant: bool) -> AnimationProgress {
        self.max_distance = self.menu_width();
        self.distance = self.max_distance;
        progress(instant)
    }

    fn close(&mut self, instant: bool) -> AnimationProgress {
        self.distance = 0.0;
        progress(instant)
    }

    fn translate(&mut self, event: TranslateEvent) {
        self.distance = event.distance;
        self.max_distance = event.max_distance;
    }

    fn resize(&mut self, event: ResizeEvent) {
        self.width = event.width;
        self.container_width = event.container_width;
        self.max_distance = self.menu_width();
        self.distance = if event.is_opened {
            self.max_distance
        } else {
            0.0
        };
    }

    /// Main panel offset when it follows the menu.
    fn pushed_main(&self) -> Affine {
        Affine::translate(Vec2::new(self.side.direction() * self.distance, 0.0))
    }

    /// Menu resting against its edge, fully visible.
    fn resting_menu(&self) -> Affine {
        match self.side {
            MenuSide::Left => Affine::IDENTITY,
            MenuSide::Right => {
                Affine::translate(Vec2::new(self.container_width - self.menu_width(), 0.0))
            }
        }
    }

    /// Menu sliding in from beyond its edge.
    fn sliding_menu(&self) -> Affine {
        let x = match self.side {
            MenuSide::Left => self.distance - self.menu_width(),
            MenuSide::Right => self.container_width - self.distance,
        };
        Affine::translate(Vec2::new(x, 0.0))
    }
}

fn progress(instant: bool) -> AnimationProgress {
    if instant {
        AnimationProgress::Finished
    } else {
        AnimationProgress::Running
    }
}

macro_rules! delegate_geometry {
    () => {
        fn capabilities(&self) -> AnimatorCapabilities {
            AnimatorCapabilities::REQUIRED
        }

        fn setup(&mut self, setup: AnimatorSetup) {
            self.geometry.setup(setup);
        }

        fn open_menu(&mut self, instant: bool) -> AnimationProgress {
            self.geometry.open(instant)
        }

        fn close_menu(&mut self, instant: bool) -> AnimationProgress {
            self.geometry.close(instant)
        }

        fn translate_menu(&mut self, event: TranslateEvent) {
            self.geometry.translate(event);
        }

        fn on_resized(&mut self, event: ResizeEvent) {
            self.geometry.resize(event);
        }

        fn copy(&self) -> Box<dyn SlidingMenuAnimator> {
            Box::new(*self)
        }
    };
}

/// Main panel slides away to uncover the menu beneath it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RevealAnimator {
    geometry: Geometry,
}

impl SlidingMenuAnimator for RevealAnimator {
    delegate_geometry!();

    fn panel_layout(&self) -> Option<PanelLayout> {
        let g = &self.geometry;
        Some(PanelLayout {
            main: g.pushed_main(),
            menu: g.resting_menu(),
            menu_opacity: REVEAL_CLOSED_OPACITY + (1.0 - REVEAL_CLOSED_OPACITY) * g.ratio(),
        })
    }
}

/// Menu slides in over a stationary main panel.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct OverlayAnimator {
    geometry: Geometry,
}

impl SlidingMenuAnimator for OverlayAnimator {
    delegate_geometry!();

    fn panel_layout(&self) -> Option<PanelLayout> {
        Some(PanelLayout {
            main: Affine::IDENTITY,
            menu: self.geometry.sliding_menu(),
            menu_opacity: 1.0,
        })
    }
}

/// Menu slides in and pushes the main panel along.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PushAnimator {
    geometry: Geometry,
}

impl SlidingMenuAnimator for PushAnimator {
    delegate_geometry!();

    fn panel_layout(&self) -> Option<PanelLayout> {
        Some(PanelLayout {
            main: self.geometry.pushed_main(),
            menu: self.geometry.sliding_menu(),
            menu_opacity: 1.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(side: MenuSide) -> AnimatorSetup {
        AnimatorSetup {
            side,
            width: SlideDistance::Pixels(200.0),
            container_width: 400.0,
        }
    }

    fn main_x(animator: &dyn SlidingMenuAnimator) -> f64 {
        animator.panel_layout().unwrap().main.translation().x
    }

    fn menu_x(animator: &dyn SlidingMenuAnimator) -> f64 {
        animator.panel_layout().unwrap().menu.translation().x
    }

    #[test]
    fn reveal_moves_main_panel_and_fades_menu_in() {
        let mut reveal = RevealAnimator::default();
        reveal.setup(setup(MenuSide::Left));
        assert_eq!(main_x(&reveal), 0.0);
        assert_eq!(reveal.panel_layout().unwrap().menu_opacity, 0.5);

        assert_eq!(reveal.open_menu(false), AnimationProgress::Running);
        assert_eq!(main_x(&reveal), 200.0);
        assert_eq!(menu_x(&reveal), 0.0);
        assert_eq!(reveal.panel_layout().unwrap().menu_opacity, 1.0);
    }

    #[test]
    fn right_mounted_reveal_moves_main_panel_left() {
        let mut reveal = RevealAnimator::default();
        reveal.setup(setup(MenuSide::Right));
        reveal.translate_menu(TranslateEvent {
            distance: 50.0,
            max_distance: 200.0,
        });
        assert_eq!(main_x(&reveal), -50.0);
        assert_eq!(menu_x(&reveal), 200.0);
    }

    #[test]
    fn overlay_slides_menu_from_offscreen() {
        let mut overlay = OverlayAnimator::default();
        overlay.setup(setup(MenuSide::Left));
        assert_eq!(menu_x(&overlay), -200.0);

        overlay.translate_menu(TranslateEvent {
            distance: 120.0,
            max_distance: 200.0,
        });
        assert_eq!(menu_x(&overlay), -80.0);
        assert_eq!(main_x(&overlay), 0.0);

        assert_eq!(overlay.close_menu(true), AnimationProgress::Finished);
        assert_eq!(menu_x(&overlay), -200.0);
    }

    #[test]
    fn push_moves_both_panels() {
        let mut push = PushAnimator::default();
        push.setup(setup(MenuSide::Right));
        assert_eq!(menu_x(&push), 400.0);

        push.open_menu(true);
        assert_eq!(menu_x(&push), 200.0);
        assert_eq!(main_x(&push), -200.0);
    }

    #[test]
    fn resize_keeps_opened_state() {
        let mut push = PushAnimator::default();
        push.setup(setup(MenuSide::Left));
        push.open_menu(true);

        push.on_resized(ResizeEvent {
            is_opened: true,
            width: SlideDistance::Percent(50.0),
            container_width: 600.0,
        });
        assert_eq!(main_x(&push), 300.0);
        assert_eq!(menu_x(&push), 0.0);

        push.on_resized(ResizeEvent {
            is_opened: false,
            width: SlideDistance::Percent(50.0),
            container_width: 600.0,
        });
        assert_eq!(main_x(&push), 0.0);
    }

    #[test]
    fn copies_do_not_share_state() {
        let mut reveal = RevealAnimator::default();
        reveal.setup(setup(MenuSide::Left));
        let copy = reveal.copy();
        reveal.open_menu(true);
        assert_eq!(main_x(&reveal), 200.0);
        assert_eq!(main_x(copy.as_ref()), 0.0);
    }
}
