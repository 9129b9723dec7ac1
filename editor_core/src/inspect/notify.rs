//! Change notification for property edits
//!
//! Observers run synchronously, in subscription order, after the write has
//! landed. An observer that returns an error is reported and skipped; it
//! never blocks later observers or the edit itself.

use crate::component_system::field_access::FieldValue;
use std::fmt;
use tracing::warn;

/// A single property edit, as seen by observers
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    /// Tag of the component that was edited
    pub source: String,
    /// Dotted path of the edited field, e.g. `position.x`
    pub field: String,
    /// The value that was written
    pub value: FieldValue,
}

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(pub(crate) u64);

pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

type ObserverFn = Box<dyn FnMut(&ChangeEvent) -> Result<(), ObserverError> + Send>;

/// Ordered list of change observers
#[derive(Default)]
pub struct ChangeNotifier {
    observers: Vec<(Subscription, ObserverFn)>,
    next_id: u64,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer; it runs on every subsequent notification until
    /// unsubscribed.
    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&ChangeEvent) -> Result<(), ObserverError> + Send + 'static,
    ) -> Subscription {
        let subscription = Subscription(self.next_id);
        self.next_id += 1;
        self.observers.push((subscription, Box::new(observer)));
        subscription
    }

    /// Remove an observer. Returns false if the subscription was already
    /// removed or never belonged to this notifier.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != subscription);
        self.observers.len() != before
    }

    /// Deliver an event to every observer, in subscription order.
    ///
    /// Requires `&mut self`, so an observer cannot re-enter the notifier it
    /// is being called from.
    pub fn notify(&mut self, event: &ChangeEvent) {
        for (subscription, observer) in &mut self.observers {
            if let Err(e) = observer(event) {
                warn!(
                    observer = subscription.0,
                    source = %event.source,
                    field = %event.field,
                    error = %e,
                    "Change observer failed"
                );
            }
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("observer_count", &self.observers.len())
            .finish()
    }
}
