use crate::extensions::{DashboardContext, DashboardEvent};

use super::DashboardEngine;

impl DashboardEngine {
    pub(super) fn observer_context(&self) -> DashboardContext {
        DashboardContext {
            year_range: self.filter.year_range(),
            playback_mode: self.playback.mode(),
            pending_views: self.pending,
            record_count: self.store.len(),
        }
    }

    pub(super) fn emit_event(&mut self, event: DashboardEvent) {
        if self.observers.is_empty() {
            return;
        }
        let context = self.observer_context();
        for observer in &mut self.observers {
            observer.on_event(&event, context);
        }
    }
}
