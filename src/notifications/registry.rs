/// Subscriber registry for purchase notifications
///
/// One instance is shared (`Arc`) between the purchase watcher, which removes
/// destinations whose delivery failed, and the command handlers, which toggle
/// subscriptions. Every mutation happens under the write lock, so `snapshot`
/// never sees a half-applied change.
use crate::logger::{self, LogTag};
use parking_lot::RwLock;
use std::collections::HashSet;
use teloxide::types::ChatId;

#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    destinations: RwLock<HashSet<ChatId>>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the destination was not subscribed before
    pub fn add(&self, destination: ChatId) -> bool {
        let added = self.destinations.write().insert(destination);
        if added {
            logger::debug(
                LogTag::Subscriptions,
                &format!("Subscribed chat {}", destination.0),
            );
        }
        added
    }

    /// Returns true if the destination was subscribed
    pub fn remove(&self, destination: ChatId) -> bool {
        let removed = self.destinations.write().remove(&destination);
        if removed {
            logger::debug(
                LogTag::Subscriptions,
                &format!("Unsubscribed chat {}", destination.0),
            );
        }
        removed
    }

    pub fn contains(&self, destination: ChatId) -> bool {
        self.destinations.read().contains(&destination)
    }

    /// Subscribe if absent, unsubscribe if present. Returns the new state.
    pub fn toggle(&self, destination: ChatId) -> bool {
        let mut destinations = self.destinations.write();
        let subscribed = if destinations.remove(&destination) {
            false
        } else {
            destinations.insert(destination);
            true
        };
        drop(destinations);

        logger::debug(
            LogTag::Subscriptions,
            &format!(
                "Chat {} {}",
                destination.0,
                if subscribed { "subscribed" } else { "unsubscribed" }
            ),
        );
        subscribed
    }

    /// Point-in-time copy, unaffected by later mutations
    pub fn snapshot(&self) -> Vec<ChatId> {
        self.destinations.read().iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.destinations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_add_contains_remove() {
        let registry = SubscriptionRegistry::new();
        let chat = ChatId(42);

        assert!(!registry.contains(chat));
        assert!(registry.add(chat));
        assert!(!registry.add(chat));
        assert!(registry.contains(chat));
        assert_eq!(registry.len(), 1);

        assert!(registry.remove(chat));
        assert!(!registry.remove(chat));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_toggle() {
        let registry = SubscriptionRegistry::new();
        let chat = ChatId(-100123);

        assert!(registry.toggle(chat));
        assert!(registry.contains(chat));
        assert!(!registry.toggle(chat));
        assert!(!registry.contains(chat));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let registry = SubscriptionRegistry::new();
        registry.add(ChatId(1));
        registry.add(ChatId(2));

        let mut snapshot = registry.snapshot();
        registry.remove(ChatId(1));
        registry.add(ChatId(3));

        snapshot.sort_by_key(|c| c.0);
        assert_eq!(snapshot, vec![ChatId(1), ChatId(2)]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_concurrent_toggles() {
        let registry = Arc::new(SubscriptionRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        registry.toggle(ChatId(i));
                    }
                    registry.add(ChatId(1000 + i));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        // Even number of toggles per chat leaves only the explicit adds
        let mut ids: Vec<i64> = registry.snapshot().iter().map(|c| c.0).collect();
        ids.sort();
        assert_eq!(ids, (1000..1008).collect::<Vec<i64>>());
    }
}
