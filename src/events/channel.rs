//! Event channel built on crossbeam-channel.
//!
//! Workers on every thread share one sender; the CLI owns the receiver.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Cloneable handle for emitting events from scanner and workers.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Emit an event.
    ///
    /// A dropped receiver is not an error: the run continues without
    /// anyone watching.
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Receiving end, held by whoever renders progress.
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Blocking iterator that ends when all senders are dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }

    /// Collect whatever is queued right now without blocking
    pub fn drain(&self) -> Vec<Event> {
        self.inner.try_iter().collect()
    }
}

/// Constructors for sender/receiver pairs.
pub struct EventChannel;

impl EventChannel {
    /// Unbounded channel; events are small and the renderer keeps up.
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// Sender whose receiver is already gone, for runs nobody watches.
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ScanEvent, TransferEvent};
    use std::path::PathBuf;
    use std::thread;

    #[test]
    fn events_can_be_sent_across_threads() {
        let (sender, receiver) = EventChannel::new();

        let handle = thread::spawn(move || {
            sender.send(Event::Scan(ScanEvent::Completed {
                jobs: 25,
                already_copied: 5,
            }));
        });

        handle.join().unwrap();

        match receiver.drain().pop().unwrap() {
            Event::Scan(ScanEvent::Completed {
                jobs,
                already_copied,
            }) => {
                assert_eq!(jobs, 25);
                assert_eq!(already_copied, 5);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn receiver_iteration_ends_when_senders_drop() {
        let (sender, receiver) = EventChannel::new();
        let worker = sender.clone();
        thread::spawn(move || {
            worker.send(Event::Scan(ScanEvent::Started {
                root: PathBuf::from("/src"),
            }));
        })
        .join()
        .unwrap();
        drop(sender);

        assert_eq!(receiver.iter().count(), 1);
    }

    #[test]
    fn drain_returns_queued_events_only() {
        let (sender, receiver) = EventChannel::new();
        sender.send(Event::Scan(ScanEvent::Started {
            root: PathBuf::from("/src"),
        }));
        assert_eq!(receiver.drain().len(), 1);
        assert!(receiver.drain().is_empty());
    }

    #[test]
    fn null_sender_does_not_panic() {
        let sender = null_sender();
        sender.send(Event::Transfer(TransferEvent::Started {
            total_jobs: 1,
            already_copied: 0,
        }));
    }
}
