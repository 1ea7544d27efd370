//! Applistock prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    discounts::{DiscountTier, Discountable},
    fixtures::{Fixture, FixtureError},
    inventory::{
        Inventory,
        appliances::ApplianceInventory,
        listeners::{InventoryEvent, Listener, ListenerKey},
    },
    predicates::{PriceBound, price_above, price_below},
    products::{Appliance, EcoAppliance, Product, ProductKey},
    report::{PriceQuery, Report, ReportError, ReportEvent, StockLine},
};
