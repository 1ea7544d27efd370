//! Applistock
//!
//! Applistock keeps an appliance retailer's stock: products that get cheaper
//! with age, eco appliances that get cheaper still, inventories that tell
//! their listeners about every change, and price queries over the lot.

pub mod app;
pub mod config;
pub mod discounts;
pub mod fixtures;
pub mod inventory;
pub mod logging;
pub mod predicates;
pub mod prelude;
pub mod products;
pub mod report;
