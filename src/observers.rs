use std::{cell::RefCell, rc::Rc};

use crate::{book_state::BookState, events::BookEvent};

/// Trait for state change observation
pub trait StateObserver {
    /// Called when a state transition occurs
    fn on_state_change(&self, from: BookState, to: BookState, event: &BookEvent);
}

/// Logs all transitions that occur in the system
#[derive(Debug)]
pub struct TransitionLogger;

impl StateObserver for TransitionLogger {
    fn on_state_change(&self, from: BookState, to: BookState, event: &BookEvent) {
        tracing::info!(
            book_id = event.book_id(),
            member_id = event.member_id(),
            "transition {from:?} --({event:?})--> {to:?}"
        );
    }
}

/// Keeps every transition it sees, in order
#[derive(Debug, Default, Clone)]
pub struct TransitionRecorder {
    /// Shared list of observed transitions
    seen: Rc<RefCell<Vec<(BookState, BookState, BookEvent)>>>,
}

impl TransitionRecorder {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy out the transitions observed so far
    #[must_use]
    pub fn transitions(&self) -> Vec<(BookState, BookState, BookEvent)> {
        self.seen.borrow().clone()
    }
}

impl StateObserver for TransitionRecorder {
    fn on_state_change(&self, from: BookState, to: BookState, event: &BookEvent) {
        self.seen.borrow_mut().push((from, to, *event));
    }
}
