use std::cell::RefCell;
use std::rc::Rc;

use crate::BoardObserver;
use crate::events::BoardEvent;

/// Observer that records every event it receives.
///
/// Clones share the same log, so a test can subscribe one clone and inspect
/// another.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<BoardEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far.
    pub fn events(&self) -> Vec<BoardEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl BoardObserver for EventLog {
    fn on_event(&mut self, event: &BoardEvent) {
        self.events.borrow_mut().push(*event);
    }
}
