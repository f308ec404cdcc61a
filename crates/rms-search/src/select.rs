//! Broadcasting selection events to interested parties

use crate::types::SelectionEvent;
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

enum Listener {
    Callback(Box<dyn FnMut(&SelectionEvent) + Send>),
    Channel(Sender<SelectionEvent>),
}

/// Synchronous fan-out of [`SelectionEvent`]s, in subscription order
#[derive(Default)]
pub struct SelectionBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl SelectionBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&SelectionEvent) + Send + 'static,
    {
        self.add(Listener::Callback(Box::new(listener)))
    }

    /// Subscribe with a channel; the receiver sees every later event
    pub fn channel(&mut self) -> Receiver<SelectionEvent> {
        let (tx, rx) = mpsc::channel();
        self.add(Listener::Channel(tx));
        rx
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver `event` to every listener. Channels whose receiver is gone are dropped.
    pub fn emit(&mut self, event: &SelectionEvent) {
        log::debug!("selected {} result: {}", event.search_type, event.item.name());
        self.listeners.retain_mut(|(_, listener)| match listener {
            Listener::Callback(callback) => {
                callback(event);
                true
            }
            Listener::Channel(tx) => tx.send(event.clone()).is_ok(),
        });
    }

    fn add(&mut self, listener: Listener) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, listener));
        id
    }
}
