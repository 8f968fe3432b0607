// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pluggable animators and the registry that selects them.
//!
//! A [`SlidingMenuAnimator`] owns the visual treatment of one menu: where the
//! main and menu panels sit for a given slide distance and how open and close
//! transitions play. The menu drives it; the animator never touches menu
//! state.
//!
//! Animators are looked up by key in an [`AnimatorRegistry`]. Selecting an
//! animator hands out an independent [`copy`](SlidingMenuAnimator::copy) of
//! the registered prototype so that two menus never share transient state.
//!
//! ## Capability contract
//!
//! Every animator advertises its [`AnimatorCapabilities`]. The registry only
//! accepts animators that advertise [`AnimatorCapabilities::REQUIRED`]:
//!
//! ```
//! use understory_sliding_menu::animator::{
//!     AnimatorCapabilities, AnimatorRegistry, SlidingMenuAnimator,
//! };
//! use understory_sliding_menu::animators::OverlayAnimator;
//!
//! let mut registry = AnimatorRegistry::builtin();
//! registry.register("sheet", Box::new(OverlayAnimator::default())).unwrap();
//! assert!(registry.contains("sheet"));
//! assert!(OverlayAnimator::default().capabilities().contains(AnimatorCapabilities::REQUIRED));
//! ```

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt;
use core::time::Duration;

use hashbrown::HashMap;
use kurbo::Affine;

use crate::animators::{OverlayAnimator, PushAnimator, RevealAnimator};
use crate::config::{MenuSide, SlideDistance};
use crate::distance::TranslateEvent;
use crate::error::Error;

bitflags::bitflags! {
    /// Operations an animator implements.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct AnimatorCapabilities: u8 {
        /// Plays open transitions.
        const OPEN = 1 << 0;
        /// Plays close transitions.
        const CLOSE = 1 << 1;
        /// Follows a live drag.
        const TRANSLATE = 1 << 2;
        /// Resizes its panels when the layout changes.
        const RESIZE = 1 << 3;
        /// Everything a sliding menu drives.
        const REQUIRED = Self::OPEN.bits()
            | Self::CLOSE.bits()
            | Self::TRANSLATE.bits()
            | Self::RESIZE.bits();
    }
}

/// Default length of a built-in open or close transition.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(400);

/// Outcome of starting a transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnimationProgress {
    /// The end state is already applied.
    Finished,
    /// The transition is playing; the host reports its end later.
    Running,
}

/// Geometry handed to [`SlidingMenuAnimator::setup`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimatorSetup {
    /// Edge the menu is mounted on.
    pub side: MenuSide,
    /// Width of the open menu.
    pub width: SlideDistance,
    /// Width of the main panel.
    pub container_width: f64,
}

/// Layout change handed to [`SlidingMenuAnimator::on_resized`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResizeEvent {
    /// Whether the menu is currently open; the animator keeps it that way.
    pub is_opened: bool,
    /// Width of the open menu.
    pub width: SlideDistance,
    /// Width of the main panel.
    pub container_width: f64,
}

/// Where the panels sit for the current state of an animator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanelLayout {
    /// Transform of the main panel.
    pub main: Affine,
    /// Transform of the menu panel.
    pub menu: Affine,
    /// Opacity of the menu panel.
    pub menu_opacity: f64,
}

/// Visual strategy for a sliding menu.
pub trait SlidingMenuAnimator: fmt::Debug {
    /// Operations this animator implements.
    fn capabilities(&self) -> AnimatorCapabilities;

    /// Bind the animator to a menu's geometry. Called once after layout has
    /// settled, and again whenever the animator is swapped in.
    fn setup(&mut self, setup: AnimatorSetup);

    /// Animate to fully open.
    fn open_menu(&mut self, instant: bool) -> AnimationProgress;

    /// Animate to fully closed.
    fn close_menu(&mut self, instant: bool) -> AnimationProgress;

    /// Follow a live drag.
    fn translate_menu(&mut self, event: TranslateEvent);

    /// Adapt to a new menu or container width without changing the opened
    /// state.
    fn on_resized(&mut self, event: ResizeEvent);

    /// An independent instance with the same configuration.
    fn copy(&self) -> Box<dyn SlidingMenuAnimator>;

    /// How long a non-instant transition plays.
    fn duration(&self) -> Duration {
        DEFAULT_ANIMATION_DURATION
    }

    /// Current panel placement, if the animator computes one.
    fn panel_layout(&self) -> Option<PanelLayout> {
        None
    }
}

/// Key used when a requested key is not registered.
pub const DEFAULT_ANIMATOR: &str = "default";

/// Maps animator keys to prototype animators.
#[derive(Debug, Default)]
pub struct AnimatorRegistry {
    prototypes: HashMap<String, Box<dyn SlidingMenuAnimator>>,
}

impl AnimatorRegistry {
    /// Create a registry with no animators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in `default`, `reveal`, `overlay` and
    /// `push` animators.
    #[must_use]
    pub fn builtin() -> Self {
        let mut prototypes: HashMap<String, Box<dyn SlidingMenuAnimator>> = HashMap::new();
        prototypes.insert(DEFAULT_ANIMATOR.into(), Box::new(RevealAnimator::default()));
        prototypes.insert("reveal".into(), Box::new(RevealAnimator::default()));
        prototypes.insert("overlay".into(), Box::new(OverlayAnimator::default()));
        prototypes.insert("push".into(), Box::new(PushAnimator::default()));
        Self { prototypes }
    }

    /// Register `animator` under `key`, replacing any previous entry.
    ///
    /// Fails if the key is empty or the animator does not advertise
    /// [`AnimatorCapabilities::REQUIRED`].
    pub fn register(
        &mut self,
        key: &str,
        animator: Box<dyn SlidingMenuAnimator>,
    ) -> Result<(), Error> {
        if key.is_empty() {
            return Err(Error::EmptyAnimatorKey);
        }
        let missing = AnimatorCapabilities::REQUIRED - animator.capabilities();
        if !missing.is_empty() {
            return Err(Error::NonConformingAnimator {
                key: key.to_string(),
                missing,
            });
        }
        self.prototypes.insert(key.to_string(), animator);
        Ok(())
    }

    /// Returns `true` if `key` is registered.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.prototypes.contains_key(key)
    }

    /// Registered keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.prototypes.keys().map(String::as_str)
    }

    /// A fresh copy of the animator registered under `key`.
    ///
    /// Unknown keys fall back to [`DEFAULT_ANIMATOR`], and a registry without
    /// a default falls back to [`RevealAnimator`].
    #[must_use]
    pub fn select(&self, key: &str) -> Box<dyn SlidingMenuAnimator> {
        if let Some(prototype) = self.prototypes.get(key) {
            return prototype.copy();
        }
        log::debug!("sliding menu: unknown animator `{key}`, using `{DEFAULT_ANIMATOR}`");
        match self.prototypes.get(DEFAULT_ANIMATOR) {
            Some(prototype) => prototype.copy(),
            None => Box::new(RevealAnimator::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    /// Opens and closes but cannot follow a drag.
    #[derive(Clone, Debug, Default)]
    struct Snap {
        opened: bool,
    }

    impl SlidingMenuAnimator for Snap {
        fn capabilities(&self) -> AnimatorCapabilities {
            AnimatorCapabilities::OPEN | AnimatorCapabilities::CLOSE
        }
        fn setup(&mut self, _: AnimatorSetup) {}
        fn open_menu(&mut self, _: bool) -> AnimationProgress {
            self.opened = true;
            AnimationProgress::Finished
        }
        fn close_menu(&mut self, _: bool) -> AnimationProgress {
            self.opened = false;
            AnimationProgress::Finished
        }
        fn translate_menu(&mut self, _: TranslateEvent) {}
        fn on_resized(&mut self, _: ResizeEvent) {}
        fn copy(&self) -> Box<dyn SlidingMenuAnimator> {
            Box::new(self.clone())
        }
    }

    #[test]
    fn builtin_registry_has_the_standard_keys() {
        let registry = AnimatorRegistry::builtin();
        for key in ["default", "reveal", "overlay", "push"] {
            assert!(registry.contains(key), "missing {key}");
        }
        assert_eq!(registry.keys().count(), 4);
    }

    #[test]
    fn non_conforming_animator_is_rejected() {
        let mut registry = AnimatorRegistry::builtin();
        let err = registry.register("custom", Box::new(Snap::default())).unwrap_err();
        assert_eq!(
            err,
            Error::NonConformingAnimator {
                key: "custom".into(),
                missing: AnimatorCapabilities::TRANSLATE | AnimatorCapabilities::RESIZE,
            }
        );
        assert!(!registry.contains("custom"));
    }

    #[test]
    fn empty_key_is_rejected() {
        let mut registry = AnimatorRegistry::new();
        assert_eq!(
            registry.register("", Box::new(PushAnimator::default())),
            Err(Error::EmptyAnimatorKey)
        );
    }

    #[test]
    fn unknown_key_falls_back_to_default() {
        let registry = AnimatorRegistry::builtin();
        let animator = registry.select("nope");
        assert!(format!("{animator:?}").starts_with("RevealAnimator"));

        let empty = AnimatorRegistry::new();
        let animator = empty.select("nope");
        assert!(format!("{animator:?}").starts_with("RevealAnimator"));
    }

    #[test]
    fn selected_animators_are_independent_copies() {
        let registry = AnimatorRegistry::builtin();
        let mut first = registry.select("push");
        let second = registry.select("push");
        first.setup(AnimatorSetup {
            side: MenuSide::Left,
            width: SlideDistance::Pixels(100.0),
            container_width: 300.0,
        });
        first.open_menu(true);
        assert_ne!(first.panel_layout(), second.panel_layout());
    }
}
