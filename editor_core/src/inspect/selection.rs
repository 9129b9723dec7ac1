//! Entity selection state shared between editor panels

use crate::inspect::notify::Subscription;
use std::fmt;
use tracing::debug;

type SelectionObserver = Box<dyn FnMut(Option<usize>) + Send>;

/// The currently selected entity, if any, identified by its scene index.
///
/// Observers fire only on actual changes; re-selecting the current entity
/// is a no-op.
#[derive(Default)]
pub struct EntitySelection {
    selected: Option<usize>,
    observers: Vec<(Subscription, SelectionObserver)>,
    next_id: u64,
}

impl EntitySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select an entity by scene index
    pub fn select(&mut self, index: usize) {
        self.set(Some(index));
    }

    /// Clear the selection
    pub fn clear(&mut self) {
        self.set(None);
    }

    fn set(&mut self, value: Option<usize>) {
        if self.selected == value {
            return;
        }
        self.selected = value;
        debug!(selected = ?value, "Selection changed");
        for (_, observer) in &mut self.observers {
            observer(value);
        }
    }

    /// Observe selection changes
    pub fn subscribe(&mut self, observer: impl FnMut(Option<usize>) + Send + 'static) -> Subscription {
        let subscription = Subscription(self.next_id);
        self.next_id += 1;
        self.observers.push((subscription, Box::new(observer)));
        subscription
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != subscription);
        self.observers.len() != before
    }
}

impl fmt::Debug for EntitySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySelection")
            .field("selected", &self.selected)
            .field("observer_count", &self.observers.len())
            .finish()
    }
}
