//! Report
//!
//! Console report for an inventory run: the change events in the order they
//! happened, a stock table, and the summary figures.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, PLN, USD},
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    discounts::{DiscountTier, Discountable},
    inventory::{appliances::ApplianceInventory, listeners::InventoryEvent},
    predicates::PriceBound,
    products::Product,
};

/// Errors that can occur while rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Look up a supported currency by ISO code.
///
/// # Errors
///
/// Returns [`ReportError::UnknownCurrency`] for anything but GBP, USD, EUR or PLN.
pub fn currency_from_code(code: &str) -> Result<&'static Currency, ReportError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        "PLN" => Ok(PLN),
        _ => Err(ReportError::UnknownCurrency(code.to_string())),
    }
}

/// A change to the inventory, as it was reported to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEvent {
    /// What happened
    pub event: InventoryEvent,

    /// Description of the product involved
    pub description: String,
}

/// One row of the stock table.
#[derive(Debug, Clone, PartialEq)]
pub struct StockLine {
    /// Product name
    pub name: String,

    /// Product kind
    pub kind: &'static str,

    /// Age as of the reference year
    pub age: i32,

    /// Stored price
    pub base_price: Decimal,

    /// Price in the reference year
    pub price: Decimal,

    /// Discount applied in the reference year
    pub tier: DiscountTier,
}

impl StockLine {
    /// Price `product` against `reference_year`.
    pub fn new(product: &Product, reference_year: i32) -> Self {
        Self {
            name: product.name().to_string(),
            kind: product.kind(),
            age: product.age(reference_year),
            base_price: product.price(),
            price: product.compute_price(reference_year),
            tier: product.discount_tier(reference_year),
        }
    }
}

/// Price predicate query and its outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuery {
    /// Side of the threshold counted
    pub bound: PriceBound,

    /// Threshold price
    pub threshold: Decimal,

    /// Year prices were evaluated in
    pub evaluation_year: i32,

    /// Number of matching products
    pub matching: usize,
}

/// Report
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    label: String,
    reference_year: i32,
    events: Vec<ReportEvent>,
    stock: Vec<StockLine>,
    query: PriceQuery,
    total_price: Decimal,
    discount_eligible: usize,
    on_discount: usize,
}

impl Report {
    /// Summarise `inventory` after a run.
    pub fn new(
        inventory: &ApplianceInventory,
        events: Vec<ReportEvent>,
        query: PriceQuery,
    ) -> Self {
        let reference_year = inventory.reference_year();

        let stock: Vec<_> = inventory
            .iter()
            .map(|(_, product)| StockLine::new(product, reference_year))
            .collect();

        let on_discount = stock.iter().filter(|line| line.tier.is_discounted()).count();

        Self {
            label: inventory.label().to_string(),
            reference_year,
            events,
            stock,
            query,
            total_price: inventory.total_price(),
            discount_eligible: inventory.count_discount_eligible(),
            on_discount,
        }
    }

    /// Inventory label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Change events in the order they happened.
    pub fn events(&self) -> &[ReportEvent] {
        &self.events
    }

    /// Stock rows in inventory order.
    pub fn stock(&self) -> &[StockLine] {
        &self.stock
    }

    /// Price predicate query and its outcome.
    pub fn query(&self) -> &PriceQuery {
        &self.query
    }

    /// Total price of the stock in the reference year.
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Number of products eligible for their best discount.
    pub fn discount_eligible(&self) -> usize {
        self.discount_eligible
    }

    /// Number of products sold below their stored price, at any tier.
    pub fn on_discount(&self) -> usize {
        self.on_discount
    }

    /// Writes the report, rendering amounts in `currency`.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be written.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        currency: &'static Currency,
    ) -> Result<(), ReportError> {
        writeln!(out, "{} ({})", self.label, self.reference_year)?;

        for event in &self.events {
            let marker = match event.event {
                InventoryEvent::Added => '+',
                InventoryEvent::Removed => '-',
            };

            writeln!(out, " {marker} {}: {}", event.event, event.description)?;
        }

        writeln!(out, "\n{}", self.stock_table(currency))?;

        let comparison = match self.query.bound {
            PriceBound::Above => "above",
            PriceBound::Below => "below",
        };

        writeln!(
            out,
            " Products priced {comparison} {} in {}: {}",
            money(self.query.threshold, currency),
            self.query.evaluation_year,
            self.query.matching
        )?;

        writeln!(out, " Total price: {}", money(self.total_price, currency))?;
        writeln!(out, " Discount eligible products: {}", self.discount_eligible)?;
        writeln!(out, " Products on discount: {}", self.on_discount)?;

        Ok(())
    }

    fn stock_table(&self, currency: &'static Currency) -> String {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Kind", "Age", "Base Price", "Price", "Discount"]);

        for (idx, line) in self.stock.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                line.kind.to_string(),
                line.age.to_string(),
                money(line.base_price, currency),
                money(line.price, currency),
                line.tier.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::rounded());
        table.modify(Columns::new(3..6), Alignment::right());

        table.to_string()
    }
}

fn money(amount: Decimal, currency: &'static Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}
