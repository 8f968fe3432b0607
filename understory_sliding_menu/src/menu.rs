// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sliding menu controller: transitions, gestures and layout.
//!
//! [`SlidingMenu`] ties the pieces together. It owns one [`DistanceModel`],
//! one [`DoorLock`] and the active [`SlidingMenuAnimator`], and it turns
//! requests from three sources into serialized transitions:
//!
//! - programmatic calls ([`SlidingMenu::open`], [`SlidingMenu::close`],
//!   [`SlidingMenu::toggle`], the back button),
//! - gesture events ([`SlidingMenu::handle_gesture`]),
//! - layout changes ([`SlidingMenu::resize`],
//!   [`SlidingMenu::set_max_slide_distance`]).
//!
//! ## Transitions
//!
//! Open and close requests emit [`MenuEvent::PreOpen`] / [`MenuEvent::PreClose`]
//! right away and then wait for the door lock. Once it is free the distance
//! model decides whether anything moves; if it does, the lock is held while
//! the animator plays. A transition that reports
//! [`AnimationProgress::Running`] stays in flight until the host calls
//! [`SlidingMenu::animation_finished`] with its [`AnimationTicket`], or until
//! [`SlidingMenu::advance`] has covered the animator's duration. On
//! completion the lock is released, [`MenuEvent::PostOpen`] /
//! [`MenuEvent::PostClose`] is emitted, the callback runs, and only then does
//! the next queued request start.
//!
//! ## Deferred setup
//!
//! A new menu keeps its menu panel hidden and holds the door lock until the
//! host reports that layout has settled ([`SlidingMenu::layout_settled`]), or
//! until [`SlidingMenu::advance`] has covered the configured settle delay.
//! Requests made before then are queued.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_sliding_menu::{SlidingMenu, SlidingMenuConfig, TransitionOptions};
//!
//! let mut menu = SlidingMenu::new(SlidingMenuConfig::default(), 400.0).unwrap();
//! let opened = Rc::new(Cell::new(false));
//!
//! // Queued until layout has settled.
//! let flag = Rc::clone(&opened);
//! menu.open(TransitionOptions::instant().with_callback(move || flag.set(true)));
//! assert!(!opened.get());
//!
//! menu.layout_settled(400.0);
//! assert!(opened.get());
//! assert!(menu.is_menu_opened());
//! assert_eq!(menu.max_distance(), 360.0);
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use crate::animator::{
    AnimationProgress, AnimatorRegistry, AnimatorSetup, PanelLayout, ResizeEvent,
    SlidingMenuAnimator,
};
use crate::config::{MenuSide, SlideDistance, SlidingMenuConfig};
use crate::distance::{
    DistanceModel, Transition, TransitionCallback, TransitionKind, TransitionOptions,
};
use crate::error::Error;
use crate::events::{ListenerId, MenuEvent, MenuListeners};
use crate::gesture::{
    GestureCommand, GestureEvent, GestureInterpreter, GestureKind, GestureResponse,
    Interpretation,
};
use crate::lock::{DoorLock, UnlockToken};
use crate::page::{PageLoad, PageOptions, PageRequest, PageSlot, PageSlots};

/// Identifies one running open or close animation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnimationTicket(u64);

/// What a back button press did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BackButton {
    /// The menu was open and is closing.
    Handled,
    /// The menu was not open; pass the press to the next handler.
    Delegate,
}

/// Work waiting for the door lock.
#[derive(Debug)]
enum Pending {
    Open(TransitionOptions),
    Close(TransitionOptions),
    SwapAnimator(String),
}

/// The transition currently holding the door lock.
struct InFlight {
    ticket: AnimationTicket,
    token: UnlockToken,
    kind: TransitionKind,
    callback: Option<TransitionCallback>,
    elapsed: Duration,
    duration: Duration,
}

impl fmt::Debug for InFlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InFlight")
            .field("ticket", &self.ticket)
            .field("kind", &self.kind)
            .field("has_callback", &self.callback.is_some())
            .field("elapsed", &self.elapsed)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

/// A sliding menu (drawer) controller.
#[derive(Debug)]
pub struct SlidingMenu {
    config: SlidingMenuConfig,
    registry: Rc<AnimatorRegistry>,
    model: DistanceModel,
    lock: DoorLock<Pending>,
    interpreter: GestureInterpreter,
    listeners: MenuListeners,
    animator: Option<Box<dyn SlidingMenuAnimator>>,
    setup_token: Option<UnlockToken>,
    in_flight: Option<InFlight>,
    pages: PageSlots,
    main_width: f64,
    settle_elapsed: Duration,
    next_ticket: u64,
    close_on_tap: bool,
    menu_visible: bool,
    destroyed: bool,
}

impl SlidingMenu {
    /// Create a menu using the built-in animators.
    ///
    /// `main_width` is the main panel width known at construction; it may be
    /// provisional until [`layout_settled`](Self::layout_settled).
    pub fn new(config: SlidingMenuConfig, main_width: f64) -> Result<Self, Error> {
        Self::with_registry(config, Rc::new(AnimatorRegistry::builtin()), main_width)
    }

    /// Create a menu that selects its animator from `registry`.
    pub fn with_registry(
        config: SlidingMenuConfig,
        registry: Rc<AnimatorRegistry>,
        main_width: f64,
    ) -> Result<Self, Error> {
        let initial = config.slide_distance().resolve(main_width).max(1.0);
        let model = DistanceModel::new(initial)?;
        let mut lock = DoorLock::new();
        let setup_token = lock.lock()?;
        let interpreter = GestureInterpreter::new(config.side, config.swipe_target_width);

        let mut pages = PageSlots::default();
        if let Some(page) = &config.main_page {
            pages.request(PageSlot::Main, page, PageOptions::new())?;
        }
        if let Some(page) = &config.menu_page {
            pages.request(PageSlot::Menu, page, PageOptions::new())?;
        }

        log::debug!(
            "sliding menu: created ({:?}, animator `{}`), waiting for layout",
            config.side,
            config.animator
        );
        Ok(Self {
            config,
            registry,
            model,
            lock,
            interpreter,
            listeners: MenuListeners::new(),
            animator: None,
            setup_token: Some(setup_token),
            in_flight: None,
            pages,
            main_width,
            settle_elapsed: Duration::ZERO,
            next_ticket: 0,
            close_on_tap: false,
            menu_visible: false,
            destroyed: false,
        })
    }

    // --- State -----------------------------------------------------------

    /// The configuration in effect.
    #[must_use]
    pub fn config(&self) -> &SlidingMenuConfig {
        &self.config
    }

    /// Edge the menu is mounted on.
    #[must_use]
    pub fn side(&self) -> MenuSide {
        self.config.side
    }

    /// Returns `true` once deferred setup has run.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.animator.is_some()
    }

    /// Returns `false` while the menu panel is hidden during deferred setup.
    #[must_use]
    pub fn is_menu_visible(&self) -> bool {
        self.menu_visible
    }

    /// Returns `true` if the menu is fully open.
    #[must_use]
    pub fn is_menu_opened(&self) -> bool {
        self.model.is_opened()
    }

    /// Returns `true` if the menu is fully closed.
    #[must_use]
    pub fn is_menu_closed(&self) -> bool {
        self.model.is_closed()
    }

    /// Current slide distance.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.model.distance()
    }

    /// Distance of a fully open menu.
    #[must_use]
    pub fn max_distance(&self) -> f64 {
        self.model.max_distance()
    }

    /// Returns `true` while a transition or deferred setup holds the door
    /// lock.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    /// Number of requests waiting for the door lock.
    #[must_use]
    pub fn queued_requests(&self) -> usize {
        self.lock.waiting()
    }

    /// Returns `true` while a tap on the main panel will close the menu.
    #[must_use]
    pub fn closes_on_tap(&self) -> bool {
        self.close_on_tap
    }

    /// Returns `true` if drag and swipe gestures move the menu.
    #[must_use]
    pub fn is_swipeable(&self) -> bool {
        self.config.swipeable
    }

    /// Returns `true` after [`destroy`](Self::destroy).
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Panel placement computed by the active animator.
    #[must_use]
    pub fn panel_layout(&self) -> Option<PanelLayout> {
        self.animator.as_ref().and_then(|animator| animator.panel_layout())
    }

    /// The running transition, if any.
    #[must_use]
    pub fn pending_animation(&self) -> Option<AnimationTicket> {
        self.in_flight.as_ref().map(|flight| flight.ticket)
    }

    // --- Listeners -------------------------------------------------------

    /// Listen to lifecycle events.
    pub fn subscribe(&mut self, listener: impl FnMut(&MenuEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Stop listening. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // --- Setup and time --------------------------------------------------

    /// Report that the host layout has settled, running deferred setup.
    ///
    /// Has no effect once setup has run.
    pub fn layout_settled(&mut self, main_width: f64) {
        if self.destroyed || self.is_ready() {
            return;
        }
        self.main_width = main_width;
        self.setup();
    }

    /// Advance the menu's clock.
    ///
    /// Runs deferred setup once the configured settle delay has passed, and
    /// finishes a running transition once the animator's duration has passed.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.destroyed {
            return;
        }
        if !self.is_ready() {
            self.settle_elapsed += elapsed;
            if self.settle_elapsed >= self.config.settle_delay {
                log::debug!("sliding menu: settle delay elapsed without a layout signal");
                self.setup();
            }
            return;
        }
        let done = match self.in_flight.as_mut() {
            Some(flight) => {
                flight.elapsed += elapsed;
                flight.elapsed >= flight.duration
            }
            None => false,
        };
        if done {
            self.finish_transition();
        }
    }

    fn setup(&mut self) {
        self.recalculate_max_distance();
        self.menu_visible = true;

        let mut animator = self.registry.select(&self.config.animator);
        animator.setup(self.animator_setup());
        self.animator = Some(animator);

        if let Some(token) = self.setup_token.take() {
            self.lock.unlock(token);
        }
        log::debug!(
            "sliding menu: setup done, max distance {}",
            self.model.max_distance()
        );
        self.drain_waiters();
    }

    fn animator_setup(&self) -> AnimatorSetup {
        AnimatorSetup {
            side: self.config.side,
            width: self.config.slide_distance(),
            container_width: self.main_width,
        }
    }

    // --- Transitions -----------------------------------------------------

    /// Open the menu.
    ///
    /// Emits [`MenuEvent::PreOpen`] immediately. If the menu is already open
    /// once the door lock is free, the callback runs without a transition.
    pub fn open(&mut self, options: TransitionOptions) {
        if self.ignored_after_destroy("open") {
            return;
        }
        self.listeners.emit(&MenuEvent::PreOpen);
        self.request(Pending::Open(options));
    }

    /// Open the menu and call `callback` when done.
    pub fn open_with(&mut self, callback: impl FnOnce() + 'static) {
        self.open(TransitionOptions::new().with_callback(callback));
    }

    /// Close the menu.
    ///
    /// Disarms tap-to-close and emits [`MenuEvent::PreClose`] immediately. If
    /// the menu is already closed once the door lock is free, the callback
    /// runs without a transition.
    pub fn close(&mut self, options: TransitionOptions) {
        if self.ignored_after_destroy("close") {
            return;
        }
        self.close_on_tap = false;
        self.listeners.emit(&MenuEvent::PreClose);
        self.request(Pending::Close(options));
    }

    /// Close the menu and call `callback` when done.
    pub fn close_with(&mut self, callback: impl FnOnce() + 'static) {
        self.close(TransitionOptions::new().with_callback(callback));
    }

    /// Open a closed menu, otherwise close it.
    pub fn toggle(&mut self, options: TransitionOptions) {
        if self.model.is_closed() {
            self.open(options);
        } else {
            self.close(options);
        }
    }

    /// Report that the animation identified by `ticket` has finished.
    ///
    /// Returns `false` for tickets that are not in flight.
    pub fn animation_finished(&mut self, ticket: AnimationTicket) -> bool {
        if self.destroyed {
            return false;
        }
        match &self.in_flight {
            Some(flight) if flight.ticket == ticket => {
                self.finish_transition();
                true
            }
            _ => {
                log::warn!("sliding menu: ignoring stale animation ticket {ticket:?}");
                false
            }
        }
    }

    fn request(&mut self, pending: Pending) {
        if let Some(pending) = self.lock.wait_unlock(pending) {
            self.run(pending);
        }
        self.drain_waiters();
    }

    fn drain_waiters(&mut self) {
        while !self.destroyed {
            let Some(pending) = self.lock.next_waiter() else {
                break;
            };
            self.run(pending);
        }
    }

    fn run(&mut self, pending: Pending) {
        match pending {
            Pending::Open(options) => {
                if let Some(transition) = self.model.open(options) {
                    self.start_transition(transition);
                }
            }
            Pending::Close(options) => {
                self.close_on_tap = false;
                if let Some(transition) = self.model.close(options) {
                    self.start_transition(transition);
                }
            }
            Pending::SwapAnimator(key) => self.swap_animator(&key),
        }
    }

    fn start_transition(&mut self, transition: Transition) {
        let Transition { kind, mut options } = transition;
        let token = match self.lock.lock() {
            Ok(token) => token,
            Err(err) => {
                log::warn!("sliding menu: cannot start {kind:?}: {err}");
                return;
            }
        };
        let instant = options.is_instant();
        let (progress, duration) = match self.animator.as_mut() {
            Some(animator) => {
                let progress = match kind {
                    TransitionKind::Open => animator.open_menu(instant),
                    TransitionKind::Close => animator.close_menu(instant),
                };
                (progress, animator.duration())
            }
            None => (AnimationProgress::Finished, Duration::ZERO),
        };

        self.next_ticket += 1;
        let ticket = AnimationTicket(self.next_ticket);
        log::debug!("sliding menu: {kind:?} started ({progress:?}, {ticket:?})");
        self.in_flight = Some(InFlight {
            ticket,
            token,
            kind,
            callback: options.take_callback(),
            elapsed: Duration::ZERO,
            duration,
        });
        if progress == AnimationProgress::Finished {
            self.finish_transition();
        }
    }

    fn finish_transition(&mut self) {
        let Some(flight) = self.in_flight.take() else {
            return;
        };
        self.lock.unlock(flight.token);
        log::debug!("sliding menu: {:?} finished ({:?})", flight.kind, flight.ticket);
        match flight.kind {
            TransitionKind::Open => {
                self.close_on_tap = true;
                self.listeners.emit(&MenuEvent::PostOpen);
            }
            TransitionKind::Close => self.listeners.emit(&MenuEvent::PostClose),
        }
        if let Some(callback) = flight.callback {
            callback();
        }
        self.drain_waiters();
    }

    // --- Gestures --------------------------------------------------------

    /// Feed one gesture event to the menu.
    ///
    /// Taps on the main panel close an open menu, queued behind any running
    /// transition. Other events are ignored while the door lock is held or
    /// when the menu is not swipeable.
    pub fn handle_gesture(&mut self, event: &GestureEvent) -> GestureResponse {
        if self.destroyed {
            return GestureResponse::default();
        }
        if event.kind == GestureKind::Tap {
            // Queued behind the door lock like any other close.
            if self.close_on_tap && event.on_main_panel {
                self.close(TransitionOptions::new());
            }
            return GestureResponse::default();
        }
        if self.lock.is_locked() {
            log::trace!("sliding menu: locked, ignoring {:?}", event.kind);
            return GestureResponse::default();
        }
        if !self.config.swipeable {
            return GestureResponse::default();
        }

        let Interpretation { response, command } =
            self.interpreter
                .interpret(event, &self.model, self.main_width);
        match command {
            Some(GestureCommand::Translate(x)) => self.translate(x),
            Some(GestureCommand::Open) => self.open(TransitionOptions::new()),
            Some(GestureCommand::Close) => self.close(TransitionOptions::new()),
            None => {}
        }
        response
    }

    fn translate(&mut self, x: f64) {
        let event = self.model.translate(x);
        if let Some(animator) = self.animator.as_mut() {
            animator.translate_menu(event);
        }
        self.listeners.emit(&MenuEvent::Translate(event));
    }

    /// Enable or disable drag and swipe gestures.
    pub fn set_swipeable(&mut self, swipeable: bool) {
        self.config.swipeable = swipeable;
        if !swipeable {
            self.interpreter.reset();
        }
    }

    /// Change the edge zone opening gestures must start in.
    pub fn set_swipe_target_width(&mut self, width: Option<f64>) {
        self.config.swipe_target_width = width;
        self.interpreter.set_swipe_target_width(width);
    }

    /// Handle a platform back action.
    pub fn handle_back_button(&mut self) -> BackButton {
        if !self.destroyed && self.model.is_opened() {
            self.close(TransitionOptions::new());
            BackButton::Handled
        } else {
            BackButton::Delegate
        }
    }

    // --- Layout ----------------------------------------------------------

    /// The main panel changed size.
    pub fn resize(&mut self, main_width: f64) {
        if self.ignored_after_destroy("resize") {
            return;
        }
        self.main_width = main_width;
        self.recalculate_max_distance();
        self.refresh_animator_width();
    }

    /// The configured maximum slide distance changed.
    pub fn set_max_slide_distance(&mut self, distance: Option<SlideDistance>) {
        if self.ignored_after_destroy("set_max_slide_distance") {
            return;
        }
        self.config.max_slide_distance = distance;
        self.recalculate_max_distance();
        self.refresh_animator_width();
    }

    fn recalculate_max_distance(&mut self) {
        let max = self.config.slide_distance().resolve(self.main_width);
        if max > 0.0 {
            if let Err(err) = self.model.set_max_distance(max) {
                log::warn!("sliding menu: keeping max distance: {err}");
            }
        }
    }

    fn refresh_animator_width(&mut self) {
        let event = ResizeEvent {
            is_opened: self.model.is_opened(),
            width: self.config.slide_distance(),
            container_width: self.main_width,
        };
        let position = self.model.interior_position();
        if let Some(animator) = self.animator.as_mut() {
            animator.on_resized(event);
            if let Some(position) = position {
                animator.translate_menu(position);
            }
        }
    }

    /// Switch to the animator registered under `key`.
    ///
    /// The swap waits for any in-flight transition, which keeps its animator.
    pub fn set_animator_type(&mut self, key: &str) {
        if self.ignored_after_destroy("set_animator_type") {
            return;
        }
        self.config.animator = key.to_string();
        if self.is_ready() {
            self.request(Pending::SwapAnimator(key.to_string()));
        }
    }

    fn swap_animator(&mut self, key: &str) {
        let mut animator = self.registry.select(key);
        animator.setup(self.animator_setup());
        self.animator = Some(animator);
        self.refresh_animator_width();
        log::debug!("sliding menu: animator swapped to `{key}`");
    }

    // --- Pages -----------------------------------------------------------

    /// Show `page` in the main panel.
    ///
    /// Fails with [`Error::MissingPage`] for an empty identifier. If `page` is
    /// already the main page the options complete right away; otherwise a
    /// [`PageRequest`] is queued for the host.
    pub fn set_main_page(&mut self, page: &str, options: PageOptions) -> Result<(), Error> {
        self.set_page(PageSlot::Main, page, options)
    }

    /// Show `page` in the menu panel.
    ///
    /// Fails with [`Error::MissingPage`] for an empty identifier.
    pub fn set_menu_page(&mut self, page: &str, options: PageOptions) -> Result<(), Error> {
        self.set_page(PageSlot::Menu, page, options)
    }

    fn set_page(&mut self, slot: PageSlot, page: &str, options: PageOptions) -> Result<(), Error> {
        if self.ignored_after_destroy("set_page") {
            return Ok(());
        }
        if let Some(options) = self.pages.request(slot, page, options)? {
            self.finish_page(options, Ok(()));
        }
        Ok(())
    }

    /// Page loads the host should perform.
    pub fn take_page_requests(&mut self) -> Vec<PageRequest> {
        self.pages.take_requests()
    }

    /// Report the outcome of a page load.
    ///
    /// A failed load reaches the request's callback as
    /// [`Error::PageNotFound`].
    pub fn complete_page_load(&mut self, request: PageRequest, outcome: PageLoad) {
        if self.ignored_after_destroy("complete_page_load") {
            return;
        }
        match self.pages.finish(request, outcome) {
            Some((options, result)) => {
                if let Err(err) = &result {
                    log::warn!("sliding menu: {err}");
                } else {
                    log::debug!("sliding menu: page loaded");
                }
                self.finish_page(options, result);
            }
            None => log::warn!("sliding menu: ignoring unknown page request"),
        }
    }

    /// Page currently shown in `slot`.
    #[must_use]
    pub fn current_page(&self, slot: PageSlot) -> Option<&str> {
        self.pages.current(slot)
    }

    fn finish_page(&mut self, options: PageOptions, result: Result<(), Error>) {
        if result.is_ok() && options.close_menu {
            self.close(TransitionOptions::new());
        }
        options.complete(result);
    }

    // --- Teardown --------------------------------------------------------

    /// Tear the menu down.
    ///
    /// Emits [`MenuEvent::Destroy`], then drops listeners, queued requests,
    /// pending page loads and any in-flight transition without running their
    /// callbacks. Every later call is a no-op.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.listeners.emit(&MenuEvent::Destroy);
        self.destroyed = true;
        self.listeners.clear();

        let dropped = self.lock.clear_waiters().len();
        if let Some(flight) = self.in_flight.take() {
            log::debug!("sliding menu: cancelling {:?} on destroy", flight.kind);
            self.lock.unlock(flight.token);
        }
        if let Some(token) = self.setup_token.take() {
            self.lock.unlock(token);
        }
        self.animator = None;
        self.pages.clear();
        self.interpreter.reset();
        self.close_on_tap = false;
        log::debug!("sliding menu: destroyed, dropped {dropped} queued requests");
    }

    fn ignored_after_destroy(&self, operation: &str) -> bool {
        if self.destroyed {
            log::warn!("sliding menu: `{operation}` called after destroy");
        }
        self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MenuEventKind;
    use alloc::vec;
    use core::cell::{Cell, RefCell};
    use kurbo::Point;

    fn ready_menu(config: SlidingMenuConfig, width: f64) -> SlidingMenu {
        let mut menu = SlidingMenu::new(config, width).unwrap();
        menu.layout_settled(width);
        menu
    }

    fn record(menu: &mut SlidingMenu) -> Rc<RefCell<Vec<MenuEventKind>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        menu.subscribe(move |event| sink.borrow_mut().push(event.kind()));
        log
    }

    #[test]
    fn construction_holds_lock_and_hides_menu() {
        let menu = SlidingMenu::new(SlidingMenuConfig::default(), 400.0).unwrap();
        assert!(menu.is_locked());
        assert!(!menu.is_menu_visible());
        assert!(!menu.is_ready());
        assert_eq!(menu.max_distance(), 360.0);
    }

    #[test]
    fn zero_width_construction_uses_minimal_max_distance() {
        let menu = SlidingMenu::new(SlidingMenuConfig::default(), 0.0).unwrap();
        assert_eq!(menu.max_distance(), 1.0);
    }

    #[test]
    fn settle_delay_runs_setup_without_signal() {
        let mut menu = SlidingMenu::new(SlidingMenuConfig::default(), 400.0).unwrap();
        menu.advance(Duration::from_millis(300));
        assert!(!menu.is_ready());
        menu.advance(Duration::from_millis(100));
        assert!(menu.is_ready());
        assert!(menu.is_menu_visible());
        assert!(!menu.is_locked());
    }

    #[test]
    fn open_runs_full_lifecycle() {
        let mut menu = ready_menu(SlidingMenuConfig::default(), 400.0);
        let log = record(&mut menu);
        let done = Rc::new(Cell::new(false));
        let flag = Rc::clone(&done);

        menu.open_with(move || flag.set(true));
        assert_eq!(*log.borrow(), vec![MenuEventKind::PreOpen]);
        assert!(menu.is_locked());
        assert!(!done.get());

        let ticket = menu.pending_animation().unwrap();
        assert!(menu.animation_finished(ticket));
        assert!(done.get());
        assert!(!menu.is_locked());
        assert!(menu.closes_on_tap());
        assert_eq!(
            *log.borrow(),
            vec![MenuEventKind::PreOpen, MenuEventKind::PostOpen]
        );
        assert!(!menu.animation_finished(ticket));
    }

    #[test]
    fn opening_an_open_menu_skips_the_transition() {
        let mut menu = ready_menu(SlidingMenuConfig::default(), 400.0);
        menu.open(TransitionOptions::instant());
        let log = record(&mut menu);
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);

        menu.open_with(move || sink.set(sink.get() + 1));
        assert_eq!(count.get(), 1);
        assert_eq!(*log.borrow(), vec![MenuEventKind::PreOpen]);
        assert!(menu.pending_animation().is_none());
    }

    #[test]
    fn close_waits_for_open_to_finish() {
        let mut menu = ready_menu(SlidingMenuConfig::default(), 400.0);
        let order = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&order);
        menu.open_with(move || sink.borrow_mut().push("opened"));
        let sink = Rc::clone(&order);
        menu.close_with(move || sink.borrow_mut().push("closed"));

        assert_eq!(menu.queued_requests(), 1);
        assert!(menu.is_menu_opened());

        let open_ticket = menu.pending_animation().unwrap();
        menu.animation_finished(open_ticket);
        assert_eq!(*order.borrow(), vec!["opened"]);

        // The close started only after the open callback.
        let close_ticket = menu.pending_animation().unwrap();
        assert_ne!(open_ticket, close_ticket);
        assert!(menu.is_menu_closed());
        menu.animation_finished(close_ticket);
        assert_eq!(*order.borrow(), vec!["opened", "closed"]);
    }

    #[test]
    fn advance_finishes_running_transition() {
        let mut menu = ready_menu(SlidingMenuConfig::default(), 400.0);
        menu.open(TransitionOptions::new());
        menu.advance(Duration::from_millis(200));
        assert!(menu.pending_animation().is_some());
        menu.advance(Duration::from_millis(200));
        assert!(menu.pending_animation().is_none());
        assert!(!menu.is_locked());
    }

    #[test]
    fn gestures_are_ignored_while_locked() {
        let mut menu = SlidingMenu::new(SlidingMenuConfig::default(), 400.0).unwrap();
        menu.handle_gesture(&GestureEvent::touch_start(Point::new(10.0, 0.0)));
        menu.handle_gesture(&GestureEvent::drag(100.0));
        assert!(menu.is_menu_closed());
    }

    #[test]
    fn tap_on_main_panel_closes_open_menu() {
        let mut menu = ready_menu(SlidingMenuConfig::default(), 400.0);
        menu.open(TransitionOptions::instant());
        assert!(menu.closes_on_tap());

        menu.handle_gesture(&GestureEvent::new(GestureKind::Tap).off_main_panel());
        assert!(menu.is_menu_opened());

        menu.handle_gesture(&GestureEvent::new(GestureKind::Tap));
        assert!(!menu.closes_on_tap());
        let ticket = menu.pending_animation().unwrap();
        menu.animation_finished(ticket);
        assert!(menu.is_menu_closed());
    }

    #[test]
    fn unswipeable_menu_ignores_drags() {
        let mut menu = ready_menu(SlidingMenuConfig::default(), 400.0);
        menu.set_swipeable(false);
        menu.handle_gesture(&GestureEvent::touch_start(Point::new(10.0, 0.0)));
        menu.handle_gesture(&GestureEvent::drag(100.0));
        assert!(menu.is_menu_closed());
    }

    #[test]
    fn back_button_closes_or_delegates() {
        let mut menu = ready_menu(SlidingMenuConfig::default(), 400.0);
        assert_eq!(menu.handle_back_button(), BackButton::Delegate);
        menu.open(TransitionOptions::instant());
        assert_eq!(menu.handle_back_button(), BackButton::Handled);
    }

    #[test]
    fn resize_keeps_open_menu_open() {
        let mut menu = ready_menu(SlidingMenuConfig::default(), 400.0);
        menu.open(TransitionOptions::instant());
        menu.resize(600.0);
        assert_eq!(menu.max_distance(), 540.0);
        assert!(menu.is_menu_opened());
        assert_eq!(menu.panel_layout().unwrap().main.translation().x, 540.0);
    }

    #[test]
    fn attribute_change_recomputes_max_distance() {
        let mut menu = ready_menu(SlidingMenuConfig::default(), 400.0);
        menu.set_max_slide_distance(Some(SlideDistance::Pixels(120.0)));
        assert_eq!(menu.max_distance(), 120.0);
        menu.set_max_slide_distance(Some(SlideDistance::Pixels(0.0)));
        assert_eq!(menu.max_distance(), 120.0);
    }

    #[test]
    fn resize_during_drag_keeps_distance_in_range() {
        let mut menu = ready_menu(SlidingMenuConfig::default(), 400.0);
        menu.handle_gesture(&GestureEvent::touch_start(Point::new(10.0, 0.0)));
        menu.handle_gesture(&GestureEvent::drag(300.0));
        assert_eq!(menu.distance(), 300.0);

        menu.resize(200.0);
        assert_eq!(menu.max_distance(), 180.0);
        assert_eq!(menu.distance(), 179.0);
        assert!(!menu.is_menu_opened());
        // The animator follows the clamped position.
        assert_eq!(menu.panel_layout().unwrap().main.translation().x, 179.0);

        menu.set_max_slide_distance(Some(SlideDistance::Pixels(50.0)));
        assert_eq!(menu.distance(), 49.0);
        assert_eq!(menu.panel_layout().unwrap().main.translation().x, 49.0);
    }

    #[test]
    fn animator_swap_during_drag_keeps_position() {
        let mut menu = ready_menu(SlidingMenuConfig::default(), 400.0);
        menu.handle_gesture(&GestureEvent::touch_start(Point::new(10.0, 0.0)));
        menu.handle_gesture(&GestureEvent::drag(120.0));

        menu.set_animator_type("push");
        let layout = menu.panel_layout().unwrap();
        assert_eq!(layout.main.translation().x, 120.0);
        assert_eq!(layout.menu.translation().x, 120.0 - 360.0);
    }

    #[test]
    fn tap_close_is_queued_behind_running_transition() {
        let mut menu = ready_menu(SlidingMenuConfig::default(), 400.0);
        menu.open(TransitionOptions::new());
        assert!(menu.is_locked());
        menu.close_on_tap = true;

        menu.handle_gesture(&GestureEvent::new(GestureKind::Tap));
        assert!(!menu.closes_on_tap());
        assert_eq!(menu.queued_requests(), 1);

        let open_ticket = menu.pending_animation().unwrap();
        menu.animation_finished(open_ticket);
        let close_ticket = menu.pending_animation().unwrap();
        assert!(!menu.closes_on_tap());
        menu.animation_finished(close_ticket);
        assert!(menu.is_menu_closed());
    }

    #[test]
    fn animator_swap_waits_for_transition() {
        let mut menu = ready_menu(SlidingMenuConfig::default(), 400.0);
        menu.open(TransitionOptions::new());
        menu.set_animator_type("overlay");
        assert_eq!(menu.queued_requests(), 1);

        let ticket = menu.pending_animation().unwrap();
        menu.animation_finished(ticket);
        assert_eq!(menu.queued_requests(), 0);
        let layout = menu.panel_layout().unwrap();
        // Overlay keeps the main panel still and shows the open menu.
        assert_eq!(layout.main.translation().x, 0.0);
        assert_eq!(layout.menu.translation().x, 0.0);
    }

    #[test]
    fn destroy_drops_in_flight_work() {
        let mut menu = ready_menu(SlidingMenuConfig::default(), 400.0);
        let log = record(&mut menu);
        let called = Rc::new(Cell::new(false));
        let flag = Rc::clone(&called);
        menu.open(TransitionOptions::new().with_callback(move || flag.set(true)));
        let ticket = menu.pending_animation().unwrap();

        menu.destroy();
        assert!(menu.is_destroyed());
        assert!(!menu.animation_finished(ticket));
        assert!(!called.get());
        assert_eq!(
            *log.borrow(),
            vec![MenuEventKind::PreOpen, MenuEventKind::Destroy]
        );

        menu.close(TransitionOptions::new());
        assert_eq!(log.borrow().len(), 2);
    }
}
