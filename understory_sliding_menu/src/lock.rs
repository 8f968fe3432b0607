// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Door lock: a binary reentrancy guard with a FIFO wait queue.
//!
//! The sliding menu holds the lock for the whole lifetime of an open or close
//! animation. Requests that arrive meanwhile are queued as waiters and run in
//! arrival order once the holder releases.
//!
//! Waiters are plain values of type `W`; the owner decides what running one
//! means. This keeps the lock free of callbacks that would need to borrow the
//! owner.
//!
//! ## Usage
//!
//! 1) Offer work with [`DoorLock::wait_unlock`]. If it hands the waiter back,
//!    run it now.
//! 2) Take the lock with [`DoorLock::lock`] while work is in flight.
//! 3) Release with [`DoorLock::unlock`], then pull waiters with
//!    [`DoorLock::next_waiter`] until it returns `None`. A waiter that locks
//!    again stops the drain, so the remaining waiters stay queued behind it.
//!
//! ## Minimal example
//!
//! ```
//! use understory_sliding_menu::lock::DoorLock;
//!
//! let mut lock = DoorLock::new();
//! let token = lock.lock().unwrap();
//!
//! assert_eq!(lock.wait_unlock("close"), None);
//! assert_eq!(lock.next_waiter(), None);
//!
//! assert!(lock.unlock(token));
//! assert_eq!(lock.next_waiter(), Some("close"));
//! ```

use alloc::collections::VecDeque;

use crate::error::Error;

/// Single-use token returned by [`DoorLock::lock`].
#[must_use = "dropping the token leaves the door lock held"]
#[derive(Debug, PartialEq, Eq)]
pub struct UnlockToken {
    generation: u64,
}

/// Binary lock with a queue of waiters.
#[derive(Debug)]
pub struct DoorLock<W> {
    held: Option<u64>,
    generation: u64,
    waiters: VecDeque<W>,
}

impl<W> Default for DoorLock<W> {
    fn default() -> Self {
        Self {
            held: None,
            generation: 0,
            waiters: VecDeque::new(),
        }
    }
}

impl<W> DoorLock<W> {
    /// Create an unlocked door lock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a token is outstanding.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.held.is_some()
    }

    /// Number of queued waiters.
    #[must_use]
    pub fn waiting(&self) -> usize {
        self.waiters.len()
    }

    /// Take the lock.
    ///
    /// Only one holder is supported; locking again before the outstanding
    /// token is released fails with [`Error::AlreadyLocked`].
    pub fn lock(&mut self) -> Result<UnlockToken, Error> {
        if self.held.is_some() {
            return Err(Error::AlreadyLocked);
        }
        self.generation += 1;
        self.held = Some(self.generation);
        Ok(UnlockToken {
            generation: self.generation,
        })
    }

    /// Release the lock.
    ///
    /// Returns `false` if the token does not belong to the current holder,
    /// in which case nothing changes.
    pub fn unlock(&mut self, token: UnlockToken) -> bool {
        if self.held == Some(token.generation) {
            self.held = None;
            true
        } else {
            log::warn!("door lock: ignoring stale unlock token {}", token.generation);
            false
        }
    }

    /// Run `waiter` as soon as the lock is free.
    ///
    /// Returns the waiter back when it may run right away: the lock is free
    /// and nobody is queued ahead of it. Otherwise it is queued and `None` is
    /// returned.
    pub fn wait_unlock(&mut self, waiter: W) -> Option<W> {
        if self.held.is_none() && self.waiters.is_empty() {
            Some(waiter)
        } else {
            self.waiters.push_back(waiter);
            None
        }
    }

    /// Pop the oldest waiter if the lock is free.
    pub fn next_waiter(&mut self) -> Option<W> {
        if self.held.is_some() {
            return None;
        }
        self.waiters.pop_front()
    }

    /// Drop every queued waiter, returning them in arrival order.
    pub fn clear_waiters(&mut self) -> VecDeque<W> {
        core::mem::take(&mut self.waiters)
    }
}
