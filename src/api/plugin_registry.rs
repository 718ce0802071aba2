use crate::error::{DashboardError, DashboardResult};
use crate::extensions::DashboardObserver;

use super::DashboardEngine;

impl DashboardEngine {
    /// Adds an observer. Ids must be non-empty and unique within the session.
    ///
    /// Observers receive events in registration order.
    pub fn register_observer(&mut self, observer: Box<dyn DashboardObserver>) -> DashboardResult<()> {
        let id = observer.id();
        let problem = if id.is_empty() {
            Some("observer ids cannot be blank".to_owned())
        } else if self.has_observer(id) {
            Some(format!("observer `{id}` is registered twice"))
        } else {
            None
        };
        if let Some(problem) = problem {
            return Err(DashboardError::InvalidData(problem));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Drops the observer with `observer_id`. Returns `false` when none matched.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        let before = self.observers.len();
        self.observers.retain(|observer| observer.id() != observer_id);
        self.observers.len() != before
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers.iter().any(|observer| observer.id() == observer_id)
    }
}
