//! Event channel built on crossbeam-channel.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Sending half handed to the batch comparator.
///
/// A disabled sender drops every event without allocating a channel.
#[derive(Clone, Default)]
pub struct EventSender {
    inner: Option<Sender<Event>>,
}

impl EventSender {
    /// A sender with no listener
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    /// False for a disabled sender
    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Send an event; a gone receiver is not an error
    pub fn send(&self, event: impl Into<Event>) {
        if let Some(sender) = &self.inner {
            let _ = sender.send(event.into());
        }
    }
}

/// Receiving half, usually moved to a listener thread
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Blocks until every sender is dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }

    /// Everything queued so far, without blocking
    pub fn drain(&self) -> Vec<Event> {
        self.inner.try_iter().collect()
    }
}

/// Connected sender/receiver pair
pub fn channel() -> (EventSender, EventReceiver) {
    let (sender, receiver) = unbounded();
    (
        EventSender {
            inner: Some(sender),
        },
        EventReceiver { inner: receiver },
    )
}
