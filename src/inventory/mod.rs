//! Inventory
//!
//! An ordered, keyed collection of discountable items evaluated against a
//! single reference year. Every mutation is reported to the inventory's
//! listeners.

use rust_decimal::Decimal;
use slotmap::SlotMap;
use tracing::debug;

use crate::{discounts::Discountable, products::ProductKey};

pub mod appliances;
pub mod listeners;

use listeners::{InventoryEvent, ListenerKey, Listeners};

/// Inventory
#[derive(Debug)]
pub struct Inventory<T> {
    label: String,
    reference_year: i32,
    keys: SlotMap<ProductKey, ()>,
    items: Vec<(ProductKey, T)>,
    listeners: Listeners<T>,
}

impl<T: Discountable> Inventory<T> {
    /// Create a new inventory holding `items` in the given order.
    ///
    /// Initial items are not reported to listeners.
    pub fn new(
        label: impl Into<String>,
        reference_year: i32,
        items: impl IntoIterator<Item = T>,
    ) -> Self {
        let mut keys = SlotMap::with_key();

        let items = items
            .into_iter()
            .map(|item| (keys.insert(()), item))
            .collect();

        Self {
            label: label.into(),
            reference_year,
            keys,
            items,
            listeners: Listeners::new(),
        }
    }

    /// Number of items eligible for a discount in the inventory's reference year.
    pub fn count_discount_eligible(&self) -> usize {
        self.items
            .iter()
            .filter(|(_, item)| item.is_discount_eligible(self.reference_year))
            .count()
    }

    /// Sum of every item's price in the inventory's reference year.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    pub fn sum_computed_prices(&self) -> Decimal {
        self.items
            .iter()
            .map(|(_, item)| item.compute_price(self.reference_year))
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Append an item and notify the "added" listeners.
    pub fn add_product(&mut self, item: T) -> ProductKey {
        let key = self.keys.insert(());

        self.items.push((key, item));

        debug!(label = %self.label, len = self.items.len(), "product added");

        if let Some((_, item)) = self.items.last() {
            self.listeners.notify(InventoryEvent::Added, key, item);
        }

        key
    }

    /// Remove the item stored under `key` and notify the "removed" listeners.
    ///
    /// Returns `None`, without notifying anyone, when no such item exists.
    pub fn remove_product(&mut self, key: ProductKey) -> Option<T> {
        let index = self.position(key)?;

        Some(self.remove_at(index))
    }

    /// Remove the first item equal to `item` and notify the "removed" listeners.
    ///
    /// Returns `None`, without notifying anyone, when nothing matches.
    pub fn remove_first(&mut self, item: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let index = self.items.iter().position(|(_, stored)| stored == item)?;

        Some(self.remove_at(index))
    }

    fn remove_at(&mut self, index: usize) -> T {
        let (key, item) = self.items.remove(index);

        self.keys.remove(key);

        debug!(label = %self.label, len = self.items.len(), "product removed");

        self.listeners.notify(InventoryEvent::Removed, key, &item);

        item
    }

    /// Subscribe to additions. Returns a key for [`Inventory::unsubscribe`].
    pub fn on_added(&mut self, listener: impl FnMut(ProductKey, &T) + 'static) -> ListenerKey {
        self.listeners
            .subscribe(InventoryEvent::Added, Box::new(listener))
    }

    /// Subscribe to removals. Returns a key for [`Inventory::unsubscribe`].
    pub fn on_removed(&mut self, listener: impl FnMut(ProductKey, &T) + 'static) -> ListenerKey {
        self.listeners
            .subscribe(InventoryEvent::Removed, Box::new(listener))
    }

    /// Drop a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, key: ListenerKey) -> bool {
        self.listeners.unsubscribe(key)
    }

    /// Number of listeners subscribed to `event`.
    pub fn listener_count(&self, event: InventoryEvent) -> usize {
        self.listeners.count(event)
    }
}

impl<T> Inventory<T> {
    /// Inventory label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Year every item is priced against.
    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Get an item by key.
    pub fn get(&self, key: ProductKey) -> Option<&T> {
        self.items
            .iter()
            .find_map(|(item_key, item)| (*item_key == key).then_some(item))
    }

    /// Get an item by key for in-place updates.
    ///
    /// In-place updates are not reported to listeners.
    pub fn get_mut(&mut self, key: ProductKey) -> Option<&mut T> {
        self.items
            .iter_mut()
            .find_map(|(item_key, item)| (*item_key == key).then_some(item))
    }

    /// Position of the item stored under `key`.
    pub fn position(&self, key: ProductKey) -> Option<usize> {
        self.items.iter().position(|(item_key, _)| *item_key == key)
    }

    /// Iterate over keys and items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &T)> {
        self.items.iter().map(|(key, item)| (*key, item))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = ProductKey> + '_ {
        self.items.iter().map(|(key, _)| *key)
    }

    /// Get the number of items in the inventory.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the inventory is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
