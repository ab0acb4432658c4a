//! Observer/Subject notification bus shared by the Orches.
//!
//! An Orch that owns cross-domain state (neighbors, next hops, FDB, mirror
//! sessions, VLAN/LAG membership) publishes a [`Notification`] synchronously
//! after it has updated its own in-memory mirror and the dataplane. Peer
//! Orches that depend on that state register as [`Observer`]s and react
//! within the same call stack.
//!
//! Re-entrancy is allowed: an observer may call back into the publisher's
//! read-only accessors, but must not mutate the publisher's state from
//! inside `handle`. Nothing in this module enforces that by the type system
//! beyond giving observers a `&Notification`, not `&mut` access to the
//! publisher; the discipline is maintained by convention, matching the
//! donor's existing callback-trait pattern (`XOrchCallbacks`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Weak};

use sonic_types::{IpAddress, MacAddress};

/// A cross-Orch change event, published after the owning Orch has already
/// applied the change to its own state and the dataplane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A neighbor entry was added, updated, or removed.
    NeighborChange {
        ip: IpAddress,
        alias: String,
        mac: Option<MacAddress>,
        removed: bool,
    },
    /// A next hop's resolvability or interface-down flag changed.
    NextHopChange {
        key: String,
        resolved: bool,
    },
    /// An FDB entry changed.
    FdbChange {
        mac: MacAddress,
        vlan: u16,
        port: String,
        removed: bool,
    },
    /// An FDB flush event (all or per-port/per-vlan).
    FdbFlushChange {
        port: Option<String>,
        vlan: Option<u16>,
    },
    /// A mirror session's active/inactive status changed.
    MirrorSessionChange {
        session: String,
        active: bool,
    },
    /// A VLAN gained or lost a member port.
    VlanMemberChange {
        vlan: u16,
        port: String,
        removed: bool,
    },
    /// A LAG gained or lost a member port.
    LagMemberChange {
        lag: String,
        port: String,
        removed: bool,
    },
}

/// Implemented by Orches (or test harnesses) that want to react to a peer
/// Orch's [`Notification`]s.
pub trait Observer: Send + Sync {
    /// Handle one notification. Must not block on external I/O and must not
    /// attempt to mutate the publisher's state.
    fn handle(&self, notification: &Notification);
}

/// A publisher-side registry of observers, notified synchronously in
/// registration order.
///
/// Observers are held weakly so that a subscriber going away (e.g. during
/// Orch teardown) does not keep the publisher from dropping its registry
/// entry; a dead weak reference is silently skipped and lazily pruned on
/// the next publish.
#[derive(Default)]
pub struct Subject {
    observers: Mutex<Vec<Weak<dyn Observer>>>,
}

impl Subject {
    pub fn new() -> Self {
        Self {
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Registers an observer. The caller retains ownership via the returned
    /// strong `Arc`'s sibling; the subject only ever upgrades a `Weak`.
    pub fn subscribe(&self, observer: &Arc<dyn Observer>) {
        let mut observers = self.observers.lock().expect("notify subject mutex poisoned");
        observers.push(Arc::downgrade(observer));
    }

    /// Publishes a notification to every live observer, in registration
    /// order, and prunes observers that have been dropped.
    pub fn publish(&self, notification: Notification) {
        let mut observers = self.observers.lock().expect("notify subject mutex poisoned");
        observers.retain(|weak| {
            if let Some(observer) = weak.upgrade() {
                observer.handle(&notification);
                true
            } else {
                false
            }
        });
    }

    /// Returns the number of currently-live observers.
    pub fn observer_count(&self) -> usize {
        let observers = self.observers.lock().expect("notify subject mutex poisoned");
        observers.iter().filter(|w| w.strong_count() > 0).count()
    }
}

/// A queue-backed [`Observer`] for subscribers that need `&mut self` to react
/// to a notification (e.g. RouteOrch/NhgOrch detaching a group member) and so
/// cannot act from inside the synchronous, `&self` `handle` call. The
/// subscriber owns an `Arc<NotificationQueue>`, hands a clone of it to
/// `Subject::subscribe` as its `Observer`, and drains the queue itself on its
/// next `do_task` pass.
#[derive(Default)]
pub struct NotificationQueue {
    pending: Mutex<VecDeque<Notification>>,
}

impl NotificationQueue {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            pending: Mutex::new(VecDeque::new()),
        })
    }

    /// Drains every notification queued since the last drain, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        let mut pending = self.pending.lock().expect("notification queue mutex poisoned");
        pending.drain(..).collect()
    }

    /// Returns the number of notifications currently queued.
    pub fn len(&self) -> usize {
        self.pending.lock().expect("notification queue mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Observer for NotificationQueue {
    fn handle(&self, notification: &Notification) {
        self.pending
            .lock()
            .expect("notification queue mutex poisoned")
            .push_back(notification.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingObserver {
        count: AtomicUsize,
    }

    impl Observer for CountingObserver {
        fn handle(&self, _notification: &Notification) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn publish_reaches_live_observers() {
        let subject = Subject::new();
        let observer: Arc<dyn Observer> = Arc::new(CountingObserver {
            count: AtomicUsize::new(0),
        });
        subject.subscribe(&observer);

        subject.publish(Notification::NeighborChange {
            ip: "10.0.0.1".parse().unwrap(),
            alias: "Ethernet0".to_string(),
            mac: Some("aa:bb:cc:dd:ee:ff".parse().unwrap()),
            removed: false,
        });

        assert_eq!(subject.observer_count(), 1);
    }

    #[test]
    fn dropped_observer_is_pruned() {
        let subject = Subject::new();
        {
            let observer: Arc<dyn Observer> = Arc::new(CountingObserver {
                count: AtomicUsize::new(0),
            });
            subject.subscribe(&observer);
            assert_eq!(subject.observer_count(), 1);
        }
        // observer dropped; next publish should prune it
        subject.publish(Notification::FdbFlushChange {
            port: None,
            vlan: None,
        });
        assert_eq!(subject.observer_count(), 0);
    }

    #[test]
    fn notification_queue_buffers_until_drained() {
        let queue = NotificationQueue::new();
        let subject = Subject::new();
        let observer: Arc<dyn Observer> = queue.clone();
        subject.subscribe(&observer);

        subject.publish(Notification::NextHopChange {
            key: "Ethernet0:10.0.0.1".to_string(),
            resolved: false,
        });
        subject.publish(Notification::NextHopChange {
            key: "Ethernet0:10.0.0.1".to_string(),
            resolved: true,
        });
        assert_eq!(queue.len(), 2);

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert!(queue.is_empty());

        // A second drain with nothing new queued is empty, not an error.
        assert!(queue.drain().is_empty());
    }
}
