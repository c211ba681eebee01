//! Local persisted cart identifier store.

use std::sync::{Mutex, PoisonError};

use mockall::automock;

use crate::domain::carts::models::CartId;

/// The single client-held copy of the last-known cart identifier.
///
/// The browser analog is one localStorage value under a fixed key: written
/// after create, read before every mutating action, never expired locally.
#[automock]
pub trait CartIdStore: Send + Sync {
    /// The persisted identifier, if any.
    fn load(&self) -> Option<CartId>;

    /// Persist a new identifier, replacing any previous one.
    fn save(&self, id: &CartId);
}

/// In-memory identifier store.
#[derive(Debug, Default)]
pub struct MemoryCartIdStore {
    slot: Mutex<Option<CartId>>,
}

impl MemoryCartIdStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartIdStore for MemoryCartIdStore {
    fn load(&self) -> Option<CartId> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, id: &CartId) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryCartIdStore::new();

        assert_eq!(store.load(), None);

        store.save(&CartId::new("gid://shopify/Cart/1"));

        assert_eq!(store.load(), Some(CartId::new("gid://shopify/Cart/1")));
    }

    #[test]
    fn test_memory_store_save_replaces() {
        let store = MemoryCartIdStore::new();

        store.save(&CartId::new("first"));
        store.save(&CartId::new("second"));

        assert_eq!(store.load(), Some(CartId::new("second")));
    }
}
