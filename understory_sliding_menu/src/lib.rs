// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sliding_menu --heading-base-level=0

//! Understory Sliding Menu: a headless sliding menu (drawer) controller.
//!
//! A sliding menu is a side panel hidden beneath or beside the main content
//! that is revealed by swiping from one screen edge or programmatically.
//! This crate owns the menu's state and its rules; rendering is left to the
//! host, which applies the transforms an animator computes.
//!
//! - [`distance`]: the slide-distance model and open/close decisions.
//! - [`lock`]: a door lock that serializes transitions and queues work.
//! - [`gesture`]: interpretation of drag, swipe and release events.
//! - [`recognizer`]: optional recognition of gestures from raw pointer samples.
//! - [`animator`]: the animator contract and a registry of named animators.
//! - [`animators`]: built-in reveal, overlay and push animators.
//! - [`config`]: configuration and attribute parsing.
//! - [`events`]: lifecycle events and listeners.
//! - [`page`]: main and menu page slots loaded by the host.
//! - [`menu`]: the [`SlidingMenu`] controller tying it all together.
//!
//! ## Usage
//!
//! 1) Build a [`SlidingMenuConfig`], directly or with
//!    [`SlidingMenuConfig::from_attributes`].
//! 2) Create a [`SlidingMenu`] and report [`SlidingMenu::layout_settled`] once
//!    the host has laid out the panels.
//! 3) Feed gestures to [`SlidingMenu::handle_gesture`] (optionally via a
//!    [`recognizer::GestureRecognizer`]) and call [`SlidingMenu::open`] /
//!    [`SlidingMenu::close`] from UI actions.
//! 4) Apply [`SlidingMenu::panel_layout`] when rendering and report finished
//!    animations with [`SlidingMenu::animation_finished`] or
//!    [`SlidingMenu::advance`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_sliding_menu::config::MenuSide;
//! use understory_sliding_menu::gesture::{GestureEvent, GestureKind};
//! use understory_sliding_menu::{SlidingMenu, SlidingMenuConfig};
//! use kurbo::Point;
//!
//! let config = SlidingMenuConfig::from_attributes([
//!     ("side", "right"),
//!     ("max-slide-distance", "300px"),
//! ])
//! .unwrap();
//! assert_eq!(config.side, MenuSide::Right);
//!
//! let mut menu = SlidingMenu::new(config, 400.0).unwrap();
//! menu.layout_settled(400.0);
//!
//! // Drag leftwards from the right edge.
//! menu.handle_gesture(&GestureEvent::touch_start(Point::new(390.0, 10.0)));
//! menu.handle_gesture(&GestureEvent::drag(-200.0));
//! assert_eq!(menu.distance(), 200.0);
//!
//! // Past the halfway mark, so releasing opens the menu.
//! menu.handle_gesture(&GestureEvent::new(GestureKind::Release));
//! let ticket = menu.pending_animation().unwrap();
//! menu.animation_finished(ticket);
//! assert!(menu.is_menu_opened());
//! assert_eq!(menu.distance(), 300.0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): compile Kurbo with the standard library.
//! - `libm`: use `libm` for Kurbo's float math in `no_std` builds.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod animator;
pub mod animators;
pub mod config;
pub mod distance;
pub mod error;
pub mod events;
pub mod gesture;
pub mod lock;
pub mod menu;
pub mod page;
pub mod recognizer;

pub use animator::{AnimatorRegistry, SlidingMenuAnimator};
pub use config::SlidingMenuConfig;
pub use distance::TransitionOptions;
pub use error::{Error, ErrorKind};
pub use events::MenuEvent;
pub use menu::{AnimationTicket, BackButton, SlidingMenu};
pub use page::PageOptions;
