use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies the component that owns a listener or a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(u64);

impl OwnerId {
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "owner#{}", self.0)
    }
}

/// Handle returned by [`Listeners::add`], used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    KeyDown,
    PointerDown,
    Click,
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// Receives every event of its kind after it bubbled through the tree.
    Document,
    /// Receives events targeted at this element or one of its descendants.
    Element(String),
}

#[derive(Debug, Clone)]
struct Registration {
    id: ListenerId,
    target: ListenerTarget,
    kind: ListenerKind,
    owner: OwnerId,
}

/// Registry of event listeners, in registration order.
#[derive(Debug, Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<Registration>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, target: ListenerTarget, kind: ListenerKind, owner: OwnerId) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        log::trace!("[listeners] add {:?} {:?} on {:?} for {}", id, kind, target, owner);
        self.entries.push(Registration {
            id,
            target,
            kind,
            owner,
        });
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|r| r.id != id);
        before != self.entries.len()
    }

    /// Remove every listener registered by `owner`. Returns how many were removed.
    pub fn remove_owner(&mut self, owner: OwnerId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|r| r.owner != owner);
        before - self.entries.len()
    }

    /// Remove element listeners whose element no longer exists.
    pub(crate) fn retain_elements(&mut self, exists: impl Fn(&str) -> bool) {
        self.entries.retain(|r| match &r.target {
            ListenerTarget::Document => true,
            ListenerTarget::Element(id) => exists(id),
        });
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|r| r.id == id)
    }

    /// Number of document-level listeners of a kind.
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.entries
            .iter()
            .filter(|r| r.kind == kind && r.target == ListenerTarget::Document)
            .count()
    }

    /// Number of listeners of any kind owned by `owner`.
    pub fn count_for_owner(&self, owner: OwnerId) -> usize {
        self.entries.iter().filter(|r| r.owner == owner).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Listeners attached to `target` for `kind`, in registration order.
    pub fn for_target(&self, target: &ListenerTarget, kind: ListenerKind) -> Vec<(ListenerId, OwnerId)> {
        self.entries
            .iter()
            .filter(|r| r.kind == kind && &r.target == target)
            .map(|r| (r.id, r.owner))
            .collect()
    }
}
