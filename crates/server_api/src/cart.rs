use std::sync::{Arc, Mutex, MutexGuard};

use shared::{domain::CartItem, protocol::StoreEvent};
use tokio::sync::broadcast;
use tracing::info;

/// What `CartStore::add` did with the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    Added,
    /// A line with the same id existed; its fields were overwritten in place.
    Replaced,
}

/// The session's cart. Clones share the same lines.
///
/// Every mutation holds the lock for its whole read-modify-write, so two
/// overlapping adds both land. The `CartUpdated` event for a mutation is sent
/// before the lock is released, so listeners see counts in mutation order.
#[derive(Debug, Clone)]
pub struct CartStore {
    items: Arc<Mutex<Vec<CartItem>>>,
    events: broadcast::Sender<StoreEvent>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self::with_events(events)
    }

    /// A cart that announces its count changes on `events`.
    pub fn with_events(events: broadcast::Sender<StoreEvent>) -> Self {
        Self {
            items: Arc::default(),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn add(&self, item: CartItem) -> CartChange {
        let mut items = self.lock();
        let change = match items.iter_mut().find(|line| line.id == item.id) {
            Some(existing) => {
                *existing = item;
                CartChange::Replaced
            }
            None => {
                items.push(item);
                CartChange::Added
            }
        };
        info!(count = items.len(), ?change, "cart updated");
        self.announce(&items);
        change
    }

    /// Removes the line with `id`. Absent ids are ignored.
    pub fn remove(&self, id: &str) -> Option<CartItem> {
        let mut items = self.lock();
        let position = items.iter().position(|line| line.id == id)?;
        let removed = items.remove(position);
        info!(count = items.len(), id, "cart line removed");
        self.announce(&items);
        Some(removed)
    }

    pub fn clear(&self) -> usize {
        let mut items = self.lock();
        let cleared = items.len();
        items.clear();
        self.announce(&items);
        cleared
    }

    pub fn items(&self) -> Vec<CartItem> {
        self.lock().clone()
    }

    pub fn get(&self, id: &str) -> Option<CartItem> {
        self.lock().iter().find(|line| line.id == id).cloned()
    }

    pub fn count(&self) -> usize {
        self.lock().len()
    }

    pub fn total(&self) -> f64 {
        self.lock().iter().map(|line| line.price).sum()
    }

    /// Called with the lock held.
    fn announce(&self, items: &[CartItem]) {
        // Nobody listening is fine.
        let _ = self.events.send(StoreEvent::CartUpdated { count: items.len() });
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CartItem>> {
        // No operation can leave the vector half-written, so a poisoned lock
        // still guards a consistent cart.
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
#[path = "tests/cart_tests.rs"]
mod tests;
