// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Main and menu page slots.
//!
//! The menu does not load page content itself. Setting a page queues a
//! [`PageRequest`] that the host fulfills, reporting back with a
//! [`PageLoad`] outcome. A failed load reaches the caller through the
//! completion callback as [`Error::PageNotFound`].

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::error::Error;

/// Which panel a page is shown in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PageSlot {
    /// The main content panel.
    Main,
    /// The menu panel.
    Menu,
}

/// Outcome of a host page load.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PageLoad {
    /// The content was found and attached.
    Loaded,
    /// The content does not exist.
    NotFound,
}

/// Completion callback for a page change.
pub type PageCallback = Box<dyn FnOnce(Result<(), Error>)>;

/// Options for a page change.
#[derive(Default)]
pub struct PageOptions {
    /// Close the menu once the page is in place.
    pub close_menu: bool,
    callback: Option<PageCallback>,
}

impl PageOptions {
    /// Options that leave the menu as it is.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the menu once the page is in place.
    #[must_use]
    pub fn closing_menu(mut self) -> Self {
        self.close_menu = true;
        self
    }

    /// Attach a completion callback.
    #[must_use]
    pub fn with_callback(mut self, callback: impl FnOnce(Result<(), Error>) + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    pub(crate) fn complete(self, result: Result<(), Error>) {
        if let Some(callback) = self.callback {
            callback(result);
        }
    }
}

impl fmt::Debug for PageOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageOptions")
            .field("close_menu", &self.close_menu)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

/// A page the host is asked to load.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PageRequest {
    id: u64,
    slot: PageSlot,
    page: String,
}

impl PageRequest {
    /// Panel the page goes into.
    #[must_use]
    pub fn slot(&self) -> PageSlot {
        self.slot
    }

    /// Page identifier to load.
    #[must_use]
    pub fn page(&self) -> &str {
        &self.page
    }
}

/// Page bookkeeping for one menu.
#[derive(Debug, Default)]
pub(crate) struct PageSlots {
    main: Option<String>,
    menu: Option<String>,
    next_id: u64,
    queued: Vec<PageRequest>,
    pending: Vec<(u64, PageOptions)>,
}

impl PageSlots {
    pub(crate) fn current(&self, slot: PageSlot) -> Option<&str> {
        match slot {
            PageSlot::Main => self.main.as_deref(),
            PageSlot::Menu => self.menu.as_deref(),
        }
    }

    /// Queue a load, or hand the options back if the main page is already
    /// showing `page`.
    pub(crate) fn request(
        &mut self,
        slot: PageSlot,
        page: &str,
        options: PageOptions,
    ) -> Result<Option<PageOptions>, Error> {
        if page.is_empty() {
            return Err(Error::MissingPage);
        }
        if slot == PageSlot::Main && self.main.as_deref() == Some(page) {
            return Ok(Some(options));
        }
        self.next_id += 1;
        self.queued.push(PageRequest {
            id: self.next_id,
            slot,
            page: page.to_string(),
        });
        self.pending.push((self.next_id, options));
        Ok(None)
    }

    pub(crate) fn take_requests(&mut self) -> Vec<PageRequest> {
        core::mem::take(&mut self.queued)
    }

    /// Record the outcome of `request`, returning its options and the result
    /// to report. Unknown requests yield `None`.
    pub(crate) fn finish(
        &mut self,
        request: PageRequest,
        outcome: PageLoad,
    ) -> Option<(PageOptions, Result<(), Error>)> {
        let index = self.pending.iter().position(|(id, _)| *id == request.id)?;
        let (_, options) = self.pending.remove(index);
        let result = match outcome {
            PageLoad::Loaded => {
                match request.slot {
                    PageSlot::Main => self.main = Some(request.page),
                    PageSlot::Menu => self.menu = Some(request.page),
                }
                Ok(())
            }
            PageLoad::NotFound => Err(Error::PageNotFound(request.page)),
        };
        Some((options, result))
    }

    pub(crate) fn clear(&mut self) {
        self.queued.clear();
        self.pending.clear();
    }
}
