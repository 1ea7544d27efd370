//! Inventory Listeners
//!
//! Observer list owned by an inventory. Listeners are plain closures, called
//! synchronously in subscription order once the mutation has been committed.
//! A panicking listener unwinds through the mutating call and the listeners
//! after it are skipped.

use std::fmt;

use slotmap::{SlotMap, new_key_type};

use crate::products::ProductKey;

new_key_type! {
    /// Listener Key
    pub struct ListenerKey;
}

/// Kind of inventory change a listener can subscribe to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InventoryEvent {
    /// An item was appended to the inventory.
    Added,

    /// An item was taken out of the inventory.
    Removed,
}

impl fmt::Display for InventoryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryEvent::Added => f.write_str("added"),
            InventoryEvent::Removed => f.write_str("removed"),
        }
    }
}

/// Boxed listener callback, given the key and the affected item.
pub type Listener<T> = Box<dyn FnMut(ProductKey, &T)>;

pub(crate) struct Listeners<T> {
    keys: SlotMap<ListenerKey, ()>,
    added: Vec<(ListenerKey, Listener<T>)>,
    removed: Vec<(ListenerKey, Listener<T>)>,
}

impl<T> Listeners<T> {
    pub(crate) fn new() -> Self {
        Self {
            keys: SlotMap::with_key(),
            added: Vec::new(),
            removed: Vec::new(),
        }
    }

    pub(crate) fn subscribe(
        &mut self,
        event: InventoryEvent,
        listener: Listener<T>,
    ) -> ListenerKey {
        let key = self.keys.insert(());

        self.list_mut(event).push((key, listener));

        key
    }

    pub(crate) fn unsubscribe(&mut self, key: ListenerKey) -> bool {
        if self.keys.remove(key).is_none() {
            return false;
        }

        self.added.retain(|(listener_key, _)| *listener_key != key);
        self.removed.retain(|(listener_key, _)| *listener_key != key);

        true
    }

    pub(crate) fn notify(&mut self, event: InventoryEvent, key: ProductKey, item: &T) {
        for (_, listener) in self.list_mut(event) {
            listener(key, item);
        }
    }

    pub(crate) fn count(&self, event: InventoryEvent) -> usize {
        match event {
            InventoryEvent::Added => self.added.len(),
            InventoryEvent::Removed => self.removed.len(),
        }
    }

    fn list_mut(&mut self, event: InventoryEvent) -> &mut Vec<(ListenerKey, Listener<T>)> {
        match event {
            InventoryEvent::Added => &mut self.added,
            InventoryEvent::Removed => &mut self.removed,
        }
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("added", &self.added.len())
            .field("removed", &self.removed.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use slotmap::SlotMap;

    use super::*;

    fn product_key() -> ProductKey {
        let mut keys = SlotMap::<ProductKey, ()>::with_key();

        keys.insert(())
    }

    #[test]
    fn notify_calls_only_matching_event_listeners() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::<u32>::new();

        let added_calls = Rc::clone(&calls);
        listeners.subscribe(
            InventoryEvent::Added,
            Box::new(move |_, item| added_calls.borrow_mut().push(("added", *item))),
        );

        let removed_calls = Rc::clone(&calls);
        listeners.subscribe(
            InventoryEvent::Removed,
            Box::new(move |_, item| removed_calls.borrow_mut().push(("removed", *item))),
        );

        listeners.notify(InventoryEvent::Removed, product_key(), &7);

        assert_eq!(*calls.borrow(), vec![("removed", 7)]);
    }

    #[test]
    fn unsubscribe_removes_listener_once() {
        let mut listeners = Listeners::<u32>::new();
        let key = listeners.subscribe(InventoryEvent::Added, Box::new(|_, _| {}));

        assert_eq!(listeners.count(InventoryEvent::Added), 1);
        assert!(listeners.unsubscribe(key));
        assert!(!listeners.unsubscribe(key));
        assert_eq!(listeners.count(InventoryEvent::Added), 0);
    }

    #[test]
    fn debug_reports_listener_counts() {
        let mut listeners = Listeners::<u32>::new();
        listeners.subscribe(InventoryEvent::Removed, Box::new(|_, _| {}));

        assert_eq!(format!("{listeners:?}"), "Listeners { added: 0, removed: 1 }");
    }

    #[test]
    fn event_display_names() {
        assert_eq!(InventoryEvent::Added.to_string(), "added");
        assert_eq!(InventoryEvent::Removed.to_string(), "removed");
    }
}
