//! Named-event subscription used for lifecycle hooks and change notifications.

use crate::component::ComponentId;
use crate::page::PageId;
use crate::traits::UpdateSink;
use std::fmt;
use tracing::trace;

pub const COMPONENT_UPDATE: &str = "component:update";
pub const COMPONENT_ADD: &str = "component:add";

/// Event name emitted when a command starts
pub fn run_event(command: &str) -> String {
    format!("run:{}", command)
}

/// Event name emitted when a command stops
pub fn stop_event(command: &str) -> String {
    format!("stop:{}", command)
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    ComponentUpdate {
        component: ComponentId,
        property: String,
    },
    ComponentAdd {
        page: PageId,
        component: ComponentId,
        type_id: String,
    },
    Command {
        command: String,
        running: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&EditorEvent)>;

struct Subscription {
    id: SubscriptionId,
    event: String,
    handler: Handler,
}

#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(
        &mut self,
        event: impl Into<String>,
        handler: impl FnMut(&EditorEvent) + 'static,
    ) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscriptions.push(Subscription {
            id,
            event: event.into(),
            handler: Box::new(handler),
        });
        id
    }

    /// Remove a subscription; false if it was already gone
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Call every handler subscribed to `event`, in subscription order
    pub fn emit(&mut self, event: &str, payload: &EditorEvent) -> usize {
        let mut delivered = 0;
        for subscription in self.subscriptions.iter_mut().filter(|s| s.event == event) {
            (subscription.handler)(payload);
            delivered += 1;
        }
        trace!(event, delivered, "Emitted event");
        delivered
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.subscriptions.iter().filter(|s| s.event == event).count()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field(
                "events",
                &self.subscriptions.iter().map(|s| s.event.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl UpdateSink for EventBus {
    fn component_updated(&mut self, component: ComponentId, property: &str) {
        self.emit(
            COMPONENT_UPDATE,
            &EditorEvent::ComponentUpdate {
                component,
                property: property.to_string(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_on_emit_off() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        let id = bus.on(run_event("core:preview"), move |event| {
            sink.borrow_mut().push(event.clone());
        });

        let event = EditorEvent::Command {
            command: "core:preview".into(),
            running: true,
        };
        assert_eq!(bus.emit("run:core:preview", &event), 1);
        assert_eq!(bus.emit("stop:core:preview", &event), 0);
        assert!(bus.off(id));
        assert!(!bus.off(id));
        assert_eq!(bus.emit("run:core:preview", &event), 0);
        assert_eq!(seen.borrow().len(), 1);
    }
}
