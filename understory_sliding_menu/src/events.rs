// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle events emitted by a sliding menu and their listeners.
//!
//! Listeners are plain closures. Subscribing returns a [`ListenerId`] that can
//! later be passed to [`MenuListeners::unsubscribe`].
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_sliding_menu::events::{MenuEvent, MenuListeners};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut listeners = MenuListeners::new();
//! let sink = Rc::clone(&seen);
//! let id = listeners.subscribe(move |event| sink.borrow_mut().push(event.kind()));
//!
//! listeners.emit(&MenuEvent::PreOpen);
//! listeners.unsubscribe(id);
//! listeners.emit(&MenuEvent::PostOpen);
//!
//! assert_eq!(seen.borrow().len(), 1);
//! ```

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

use crate::distance::TranslateEvent;

/// Lifecycle event of a sliding menu.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MenuEvent {
    /// An open was requested.
    PreOpen,
    /// An open transition finished.
    PostOpen,
    /// A close was requested.
    PreClose,
    /// A close transition finished.
    PostClose,
    /// The menu moved during a drag.
    Translate(TranslateEvent),
    /// The menu is being torn down.
    Destroy,
}

/// Payload-free discriminant of a [`MenuEvent`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MenuEventKind {
    /// See [`MenuEvent::PreOpen`].
    PreOpen,
    /// See [`MenuEvent::PostOpen`].
    PostOpen,
    /// See [`MenuEvent::PreClose`].
    PreClose,
    /// See [`MenuEvent::PostClose`].
    PostClose,
    /// See [`MenuEvent::Translate`].
    Translate,
    /// See [`MenuEvent::Destroy`].
    Destroy,
}

impl MenuEvent {
    /// The event's discriminant.
    #[must_use]
    pub fn kind(&self) -> MenuEventKind {
        match self {
            Self::PreOpen => MenuEventKind::PreOpen,
            Self::PostOpen => MenuEventKind::PostOpen,
            Self::PreClose => MenuEventKind::PreClose,
            Self::PostClose => MenuEventKind::PostClose,
            Self::Translate(_) => MenuEventKind::Translate,
            Self::Destroy => MenuEventKind::Destroy,
        }
    }
}

/// Handle identifying a subscribed listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

type Listener = Box<dyn FnMut(&MenuEvent)>;

/// Ordered set of lifecycle listeners.
#[derive(Default)]
pub struct MenuListeners {
    entries: SmallVec<[(ListenerId, Listener); 4]>,
    next_id: u32,
}

impl MenuListeners {
    /// Create an empty listener set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener; it is called for every event in subscription order.
    pub fn subscribe(&mut self, listener: impl FnMut(&MenuEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Number of subscribed listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver `event` to every listener.
    pub fn emit(&mut self, event: &MenuEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    /// Remove every listener.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Debug for MenuListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuListeners")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
