//! Reference-counted body scroll lock.

use std::collections::HashSet;

use crate::types::Overflow;

/// Proof of a scroll lock acquisition. Not `Clone`: each acquisition can be
/// released exactly once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping the token leaks the scroll lock"]
pub struct ScrollLockToken(u64);

/// Keeps the body from scrolling while at least one holder exists.
///
/// The first acquisition saves the current body overflow and sets it to
/// hidden; the last release restores the saved value.
#[derive(Debug, Default)]
pub struct ScrollLock {
    next: u64,
    holders: HashSet<u64>,
    overflow: Overflow,
    saved: Option<Overflow>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current body overflow.
    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    /// Host-side change of the body overflow. While locked, the value is
    /// remembered and applied on the final release.
    pub fn set_overflow(&mut self, overflow: Overflow) {
        if self.is_locked() {
            self.saved = Some(overflow);
        } else {
            self.overflow = overflow;
        }
    }

    pub fn is_locked(&self) -> bool {
        !self.holders.is_empty()
    }

    pub fn holders(&self) -> usize {
        self.holders.len()
    }

    pub fn acquire(&mut self) -> ScrollLockToken {
        if self.holders.is_empty() {
            self.saved = Some(self.overflow);
            self.overflow = Overflow::Hidden;
            log::debug!("[scroll_lock] locked, saved overflow {:?}", self.saved);
        }
        let id = self.next;
        self.next += 1;
        self.holders.insert(id);
        ScrollLockToken(id)
    }

    /// Release an acquisition. Returns false for a token this lock never issued.
    pub fn release(&mut self, token: ScrollLockToken) -> bool {
        if !self.holders.remove(&token.0) {
            log::warn!("[scroll_lock] release of unknown token {}", token.0);
            return false;
        }
        if self.holders.is_empty() {
            self.overflow = self.saved.take().unwrap_or_default();
            log::debug!("[scroll_lock] unlocked, restored overflow {:?}", self.overflow);
        }
        true
    }
}
