//! Appliance Inventory

use rust_decimal::Decimal;

use crate::{discounts::Discountable, inventory::Inventory, products::Product};

/// Inventory of appliances of any kind.
pub type ApplianceInventory = Inventory<Product>;

impl ApplianceInventory {
    /// Total price of all stock in the inventory's reference year.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    pub fn total_price(&self) -> Decimal {
        let reference_year = self.reference_year();

        self.iter()
            .map(|(_, product)| product.compute_price(reference_year))
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Count products for which `predicate(product, threshold)` holds.
    ///
    /// See [`crate::predicates`] for the standard predicates.
    pub fn count_matching<P>(&self, predicate: P, threshold: Decimal) -> usize
    where
        P: Fn(&dyn Discountable, Decimal) -> bool,
    {
        self.iter()
            .filter(|(_, product)| predicate(*product, threshold))
            .count()
    }
}
