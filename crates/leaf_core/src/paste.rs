//! Scoped paste listening.
//!
//! Paste shortcuts arrive on the window, not on a widget. Views that accept
//! pasted images hold a [`PasteSubscription`] for as long as they exist; the
//! window only reads the clipboard while at least one subscription is alive.

use std::cell::Cell;
use std::rc::Rc;

/// Registry of views currently interested in paste events.
#[derive(Debug, Clone, Default)]
pub struct PasteListeners {
    active: Rc<Cell<usize>>,
}

impl PasteListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> PasteSubscription {
        self.active.set(self.active.get() + 1);
        tracing::debug!(listeners = self.active.get(), "paste listener attached");
        PasteSubscription {
            active: Rc::clone(&self.active),
        }
    }

    pub fn is_listening(&self) -> bool {
        self.active.get() > 0
    }

    pub fn count(&self) -> usize {
        self.active.get()
    }
}

/// Released on drop.
#[derive(Debug)]
pub struct PasteSubscription {
    active: Rc<Cell<usize>>,
}

impl Drop for PasteSubscription {
    fn drop(&mut self) {
        self.active.set(self.active.get().saturating_sub(1));
        tracing::debug!(listeners = self.active.get(), "paste listener detached");
    }
}
