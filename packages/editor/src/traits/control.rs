use super::binding::{TraitContext, UpdateSink};
use super::{CommitPolicy, TraitDef, TraitError, TraitValue};
use crate::component::{Component, ComponentId};
use crate::debounce::{Clock, Debouncer, Edge};
use crate::registry::Registry;
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, warn};

/// What happened to a committed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Written to the component
    Applied,
    /// Waiting for the burst to settle
    Scheduled,
    /// Dropped because a leading commit already fired in this window
    Suppressed,
    /// Invalid input; the component was left as it was
    Rejected,
}

/// A trait control bound to one component instance.
///
/// Holds the component's id, never the component itself: every method that
/// writes takes the instance for the duration of the call.
#[derive(Debug)]
pub struct TraitControl {
    trait_def: TraitDef,
    component: ComponentId,
    debouncer: Option<Debouncer<TraitValue>>,
}

impl TraitControl {
    pub fn new(trait_def: TraitDef, component: ComponentId, clock: Rc<dyn Clock>) -> Self {
        let debouncer = match trait_def.commit {
            CommitPolicy::Immediate => None,
            CommitPolicy::Debounced { wait, leading } => {
                let edge = if leading { Edge::Leading } else { Edge::Trailing };
                Some(Debouncer::new(wait, edge, clock))
            }
        };

        Self {
            trait_def,
            component,
            debouncer,
        }
    }

    pub fn trait_def(&self) -> &TraitDef {
        &self.trait_def
    }

    pub fn name(&self) -> &str {
        &self.trait_def.name
    }

    pub fn component_id(&self) -> ComponentId {
        self.component
    }

    pub fn value(&self, component: &Component) -> TraitValue {
        self.trait_def
            .resolved_binding()
            .get_value(&self.trait_def, component)
    }

    pub fn commit(
        &mut self,
        value: TraitValue,
        component: &mut Component,
        registry: &Registry,
        sink: &mut dyn UpdateSink,
    ) -> CommitOutcome {
        let Some(debouncer) = self.debouncer.as_mut() else {
            return self.apply(value, component, registry, sink);
        };

        let edge = debouncer.edge();
        let ready = debouncer.call(value);
        match (edge, ready) {
            (Edge::Leading, Some(value)) => self.apply(value, component, registry, sink),
            (Edge::Leading, None) => {
                debug!(trait_name = %self.trait_def.name, "Suppressed trait commit");
                CommitOutcome::Suppressed
            }
            (Edge::Trailing, overdue) => {
                if let Some(value) = overdue {
                    self.apply(value, component, registry, sink);
                }
                debug!(
                    trait_name = %self.trait_def.name,
                    component = %self.component,
                    "Scheduled trait commit"
                );
                CommitOutcome::Scheduled
            }
        }
    }

    /// Apply a settled commit; `None` when nothing is due
    pub fn poll(
        &mut self,
        component: &mut Component,
        registry: &Registry,
        sink: &mut dyn UpdateSink,
    ) -> Option<CommitOutcome> {
        let value = self.debouncer.as_mut()?.poll()?;
        Some(self.apply(value, component, registry, sink))
    }

    /// Apply the pending commit now
    pub fn flush(
        &mut self,
        component: &mut Component,
        registry: &Registry,
        sink: &mut dyn UpdateSink,
    ) -> Option<CommitOutcome> {
        let value = self.debouncer.as_mut()?.flush()?;
        Some(self.apply(value, component, registry, sink))
    }

    pub fn cancel(&mut self) {
        if let Some(debouncer) = self.debouncer.as_mut() {
            debouncer.cancel();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.as_ref().is_some_and(Debouncer::is_pending)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.as_ref()?.next_deadline()
    }

    fn apply(
        &self,
        value: TraitValue,
        component: &mut Component,
        registry: &Registry,
        sink: &mut dyn UpdateSink,
    ) -> CommitOutcome {
        if component.id() != self.component {
            let err = TraitError::WrongComponent {
                name: self.trait_def.name.clone(),
                expected: self.component.to_string(),
                found: component.id().to_string(),
            };
            warn!(error = %err, "Discarded trait commit");
            return CommitOutcome::Rejected;
        }

        // Restored if the binding fails halfway
        let snapshot = component.clone();
        let result = {
            let mut ctx = TraitContext::new(component, registry, &self.trait_def, sink);
            self.trait_def.resolved_binding().set_value(&mut ctx, value)
        };

        match result {
            Ok(()) => {
                debug!(
                    trait_name = %self.trait_def.name,
                    component = %self.component,
                    "Applied trait commit"
                );
                CommitOutcome::Applied
            }
            Err(err) => {
                *component = snapshot;
                warn!(
                    trait_name = %self.trait_def.name,
                    component = %self.component,
                    error = %err,
                    "Discarded malformed trait input"
                );
                CommitOutcome::Rejected
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::ManualClock;
    use crate::registry::{RegistryBuilder, TypeDefinition};
    use crate::traits::UpdateLog;
    use std::time::Duration;

    fn registry() -> Registry {
        let mut builder = RegistryBuilder::new();
        builder.register(TypeDefinition::new("default")).unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_immediate_commit_applies() {
        let registry = registry();
        let clock = ManualClock::new();
        let mut c = Component::new("default", "div");
        let mut log = UpdateLog::new();
        let mut control = TraitControl::new(TraitDef::text("title"), c.id(), Rc::new(clock));

        let outcome = control.commit(TraitValue::text("Hi"), &mut c, &registry, &mut log);
        assert_eq!(outcome, CommitOutcome::Applied);
        assert_eq!(control.value(&c), TraitValue::text("Hi"));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_debounced_commit_uses_last_value() {
        let registry = registry();
        let clock = ManualClock::new();
        let mut c = Component::new("default", "div");
        let mut log = UpdateLog::new();
        let def = TraitDef::text("title").commit(CommitPolicy::settled());
        let mut control = TraitControl::new(def, c.id(), Rc::new(clock.clone()));

        for value in ["a", "ab", "abc"] {
            let outcome = control.commit(TraitValue::text(value), &mut c, &registry, &mut log);
            assert_eq!(outcome, CommitOutcome::Scheduled);
            clock.advance_ms(100);
        }
        assert_eq!(c.get_attribute("title"), None);
        assert!(control.is_pending());

        clock.advance_ms(400);
        assert_eq!(
            control.poll(&mut c, &registry, &mut log),
            Some(CommitOutcome::Applied)
        );
        assert_eq!(c.get_attribute("title"), Some("abc"));
        assert_eq!(log.len(), 1);
        assert_eq!(control.poll(&mut c, &registry, &mut log), None);
    }

    #[test]
    fn test_leading_commit_suppresses_rest_of_burst() {
        let registry = registry();
        let clock = ManualClock::new();
        let mut c = Component::new("default", "div");
        let mut log = UpdateLog::new();
        let def = TraitDef::text("title").commit(CommitPolicy::Debounced {
            wait: Duration::from_millis(200),
            leading: true,
        });
        let mut control = TraitControl::new(def, c.id(), Rc::new(clock.clone()));

        assert_eq!(
            control.commit(TraitValue::text("first"), &mut c, &registry, &mut log),
            CommitOutcome::Applied
        );
        assert_eq!(
            control.commit(TraitValue::text("second"), &mut c, &registry, &mut log),
            CommitOutcome::Suppressed
        );
        assert_eq!(c.get_attribute("title"), Some("first"));
    }

    #[test]
    fn test_flush_and_cancel() {
        let registry = registry();
        let clock = ManualClock::new();
        let mut c = Component::new("default", "div");
        let mut log = UpdateLog::new();
        let def = TraitDef::text("title").commit(CommitPolicy::settled());
        let mut control = TraitControl::new(def, c.id(), Rc::new(clock.clone()));

        control.commit(TraitValue::text("x"), &mut c, &registry, &mut log);
        assert_eq!(
            control.flush(&mut c, &registry, &mut log),
            Some(CommitOutcome::Applied)
        );
        assert_eq!(control.flush(&mut c, &registry, &mut log), None);

        control.commit(TraitValue::text("y"), &mut c, &registry, &mut log);
        control.cancel();
        clock.advance_ms(1000);
        assert_eq!(control.poll(&mut c, &registry, &mut log), None);
        assert_eq!(c.get_attribute("title"), Some("x"));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_wrong_component_is_rejected() {
        let registry = registry();
        let clock = ManualClock::new();
        let bound = Component::new("default", "div");
        let mut other = Component::new("default", "div");
        let mut log = UpdateLog::new();
        let mut control = TraitControl::new(TraitDef::text("title"), bound.id(), Rc::new(clock));

        let outcome = control.commit(TraitValue::text("x"), &mut other, &registry, &mut log);
        assert_eq!(outcome, CommitOutcome::Rejected);
        assert_eq!(other.get_attribute("title"), None);
    }
}
