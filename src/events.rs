//! Typed widget notifications
//!
//! A subscription table keyed by event kind. Emission is a synchronous
//! fan-out to that kind's subscribers in registration order; there is no
//! queue and no thread hop, matching the single-threaded widget model.

use std::collections::HashMap;
use std::fmt;

use crate::document::WidgetId;

/// Notification kinds a select list publishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// An ordinary item was activated and its value committed
    Submit,
    /// The disclosure state changed (or was re-applied)
    Toggle,
}

/// A published notification
#[derive(Debug, Clone, PartialEq)]
pub enum Event<V> {
    Submit { value: V, widget: WidgetId },
    Toggle { widget: WidgetId, show: bool },
}

impl<V> Event<V> {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Submit { .. } => EventKind::Submit,
            Event::Toggle { .. } => EventKind::Toggle,
        }
    }
}

/// Handle returned by [`Emitter::on`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerId(u64);

type Callback<V> = Box<dyn FnMut(&Event<V>)>;

/// Subscription table for one widget's notifications
pub struct Emitter<V> {
    next_id: u64,
    table: HashMap<EventKind, Vec<(HandlerId, Callback<V>)>>,
}

impl<V> Default for Emitter<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for Emitter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("submit_subscribers", &self.subscriber_count(EventKind::Submit))
            .field("toggle_subscribers", &self.subscriber_count(EventKind::Toggle))
            .finish()
    }
}

impl<V> Emitter<V> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            table: HashMap::new(),
        }
    }

    /// Subscribe to one event kind
    pub fn on(&mut self, kind: EventKind, callback: impl FnMut(&Event<V>) + 'static) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.table
            .entry(kind)
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Drop a subscription; returns false when the handle is unknown
    pub fn off(&mut self, id: HandlerId) -> bool {
        for handlers in self.table.values_mut() {
            if let Some(pos) = handlers.iter().position(|(h, _)| *h == id) {
                let _ = handlers.remove(pos);
                return true;
            }
        }
        false
    }

    /// Fan an event out to its kind's subscribers, in registration order
    pub fn emit(&mut self, event: &Event<V>) {
        if let Some(handlers) = self.table.get_mut(&event.kind()) {
            for (_, callback) in handlers.iter_mut() {
                callback(event);
            }
        }
    }

    /// Number of live subscriptions for a kind
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.table.get(&kind).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::document::Document;

    fn widget_id() -> WidgetId {
        let mut doc = Document::new(10, 10);
        doc.register(ratatui::layout::Rect::new(0, 0, 1, 1))
    }

    #[test]
    fn test_emit_reaches_subscribers_in_order() {
        let mut emitter: Emitter<u32> = Emitter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        emitter.on(EventKind::Submit, move |_| first.borrow_mut().push("first"));
        let second = Rc::clone(&seen);
        emitter.on(EventKind::Submit, move |_| second.borrow_mut().push("second"));

        emitter.emit(&Event::Submit {
            value: 7,
            widget: widget_id(),
        });
        assert_eq!(*seen.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_kinds_are_isolated() {
        let mut emitter: Emitter<u32> = Emitter::new();
        let submits = Rc::new(RefCell::new(0u32));

        let counter = Rc::clone(&submits);
        emitter.on(EventKind::Submit, move |_| *counter.borrow_mut() += 1);

        emitter.emit(&Event::Toggle {
            widget: widget_id(),
            show: true,
        });
        assert_eq!(*submits.borrow(), 0);

        emitter.emit(&Event::Submit {
            value: 1,
            widget: widget_id(),
        });
        assert_eq!(*submits.borrow(), 1);
    }

    #[test]
    fn test_off_removes_only_that_handler() {
        let mut emitter: Emitter<u32> = Emitter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        let keep = emitter.on(EventKind::Toggle, move |_| first.borrow_mut().push("keep"));
        let second = Rc::clone(&seen);
        let dropped = emitter.on(EventKind::Toggle, move |_| second.borrow_mut().push("drop"));

        assert!(emitter.off(dropped));
        assert!(!emitter.off(dropped));
        assert_eq!(emitter.subscriber_count(EventKind::Toggle), 1);

        emitter.emit(&Event::Toggle {
            widget: widget_id(),
            show: false,
        });
        assert_eq!(*seen.borrow(), vec!["keep"]);
        let _ = keep;
    }

    #[test]
    fn test_event_carries_payload() {
        let mut emitter: Emitter<String> = Emitter::new();
        let last = Rc::new(RefCell::new(None));

        let sink = Rc::clone(&last);
        emitter.on(EventKind::Submit, move |event| {
            if let Event::Submit { value, .. } = event {
                *sink.borrow_mut() = Some(value.clone());
            }
        });

        emitter.emit(&Event::Submit {
            value: "green".to_string(),
            widget: widget_id(),
        });
        assert_eq!(last.borrow().as_deref(), Some("green"));
    }
}
