use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Session key under which the dismissal is stored.
pub const CONTENT_WARNING_KEY: &str = "scrollreel.content_warning_dismissed";

/// Per-session boolean flags (the browser's `sessionStorage`, or a stand-in).
pub trait SessionStore {
    /// Stored flag, if any.
    fn get(&self, key: &str) -> Option<bool>;
    /// Store a flag.
    fn set(&self, key: &str, value: bool);
}

/// In-memory [`SessionStore`].
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    flags: RefCell<HashMap<String, bool>>,
    writes: Cell<u32>,
}

impl MemorySessionStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one flag.
    pub fn with_flag(key: &str, value: bool) -> Self {
        let store = Self::default();
        store.flags.borrow_mut().insert(key.to_string(), value);
        store
    }

    /// Number of `set` calls so far.
    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<bool> {
        self.flags.borrow().get(key).copied()
    }

    fn set(&self, key: &str, value: bool) {
        self.flags.borrow_mut().insert(key.to_string(), value);
        self.writes.set(self.writes.get() + 1);
    }
}

/// Proof that the content warning was dismissed. Required to mount a page.
#[derive(Debug)]
pub struct GateToken {
    _private: (),
}

/// Content-warning gate.
///
/// Reads the session flag once on construction and writes it at most once, on the first
/// dismissal.
#[derive(Debug)]
pub struct ContentGate {
    dismissed: bool,
}

impl ContentGate {
    /// Read the flag from `store`.
    pub fn open(store: &dyn SessionStore) -> Self {
        let dismissed = store.get(CONTENT_WARNING_KEY).unwrap_or(false);
        tracing::debug!(dismissed, "content gate opened");
        Self { dismissed }
    }

    /// Whether the warning has been dismissed this session.
    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    /// Dismiss the warning, persisting the flag the first time.
    pub fn dismiss(&mut self, store: &dyn SessionStore) {
        if !self.dismissed {
            store.set(CONTENT_WARNING_KEY, true);
            self.dismissed = true;
        }
    }

    /// Token for mounting the page, once dismissed.
    pub fn pass(&self) -> Option<GateToken> {
        self.dismissed.then_some(GateToken { _private: () })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/gate.rs"]
mod tests;
