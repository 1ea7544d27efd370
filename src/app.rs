//! Inventory run
//!
//! Opens an inventory from a fixture, records every change as it happens,
//! takes in the arrivals, sells the first product that was in stock, and
//! summarises the result.

use std::{cell::RefCell, io, rc::Rc};

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    config::Config,
    fixtures::{Fixture, FixtureError},
    inventory::{appliances::ApplianceInventory, listeners::InventoryEvent},
    products::{Product, ProductKey},
    report::{PriceQuery, Report, ReportError, ReportEvent},
};

/// Errors that can end a run.
#[derive(Debug, Error)]
pub enum AppError {
    /// The fixture could not be loaded.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// The report could not be written.
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Load the fixture, run the scenario, and write the report to `out`.
///
/// # Errors
///
/// Returns an error if the fixture cannot be loaded or the report cannot be written.
pub fn execute(config: &Config, out: impl io::Write) -> Result<Report, AppError> {
    let fixture = load_fixture(config)?;
    let report = run(config, &fixture);

    report.write_to(out, config.currency)?;

    Ok(report)
}

/// Load the configured fixture, or the bundled showroom.
///
/// # Errors
///
/// Returns an error if the fixture cannot be loaded.
pub fn load_fixture(config: &Config) -> Result<Fixture, AppError> {
    let fixture = match config.fixture.as_deref() {
        Some(path) => Fixture::from_path(path)?,
        None => Fixture::sample()?,
    };

    Ok(fixture)
}

/// Run the configured scenario against `fixture`.
pub fn run(config: &Config, fixture: &Fixture) -> Report {
    let mut inventory = fixture.inventory(config.reference_year());

    info!(
        label = inventory.label(),
        reference_year = inventory.reference_year(),
        products = inventory.len(),
        "inventory opened"
    );

    let events = Rc::new(RefCell::new(Vec::new()));

    subscribe_recorder(&mut inventory, &events, InventoryEvent::Added, config.display_year);
    subscribe_recorder(&mut inventory, &events, InventoryEvent::Removed, config.display_year);

    debug!(
        added = inventory.listener_count(InventoryEvent::Added),
        removed = inventory.listener_count(InventoryEvent::Removed),
        "listeners subscribed"
    );

    let first_in_stock = inventory.keys().next();

    for product in fixture.arrivals() {
        inventory.add_product(product.clone());
    }

    if let Some(key) = first_in_stock {
        inventory.remove_product(key);
    }

    let evaluation_year = config.predicate_year();

    let query = PriceQuery {
        bound: config.predicate,
        threshold: config.threshold,
        evaluation_year,
        matching: inventory.count_matching(
            config.predicate.predicate(evaluation_year),
            config.threshold,
        ),
    };

    let events = events.take();

    info!(
        products = inventory.len(),
        events = events.len(),
        matching = query.matching,
        "inventory summarised"
    );

    Report::new(&inventory, events, query)
}

fn subscribe_recorder(
    inventory: &mut ApplianceInventory,
    events: &Rc<RefCell<Vec<ReportEvent>>>,
    event: InventoryEvent,
    display_year: i32,
) {
    let events = Rc::clone(events);

    let record = move |_: ProductKey, product: &Product| {
        let description = product.describe(display_year);

        info!(%event, product = product.name(), "inventory changed");

        events.borrow_mut().push(ReportEvent { event, description });
    };

    match event {
        InventoryEvent::Added => inventory.on_added(record),
        InventoryEvent::Removed => inventory.on_removed(record),
    };
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::predicates::PriceBound;

    use super::*;

    fn config(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(["applistock"].iter().chain(args))
    }

    #[test]
    fn showroom_run_adds_then_removes() -> TestResult {
        let config = config(&["--reference-year", "2027", "--predicate-year", "2027"])?;
        let report = run(&config, &Fixture::sample()?);

        assert_eq!(
            report.events(),
            [
                ReportEvent {
                    event: InventoryEvent::Added,
                    description: "Microwave, age 0, price 500".to_string(),
                },
                ReportEvent {
                    event: InventoryEvent::Removed,
                    description: "Fridge, age 0, price 500".to_string(),
                },
            ]
        );

        let names: Vec<_> = report.stock().iter().map(|line| line.name.as_str()).collect();
        assert_eq!(names, ["Washer", "Dishwasher", "Oven", "Microwave"]);

        // 300 + 400 + 400 + 400
        assert_eq!(report.total_price(), Decimal::from(1500));
        assert_eq!(report.discount_eligible(), 3);
        assert_eq!(report.on_discount(), 4);

        // Nothing is strictly below 300.
        assert_eq!(report.query().matching, 0);
        assert_eq!(report.query().bound, PriceBound::Below);

        Ok(())
    }

    #[test]
    fn predicate_year_is_independent_of_reference_year() -> TestResult {
        let config = config(&[
            "--reference-year",
            "2027",
            "--predicate-year",
            "2040",
            "--predicate",
            "above",
            "--threshold",
            "450",
        ])?;
        let report = run(&config, &Fixture::sample()?);

        // Everything is back at full price in 2040.
        assert_eq!(report.query().matching, 4);
        assert_eq!(report.query().evaluation_year, 2040);
        assert_eq!(report.total_price(), Decimal::from(1500));

        Ok(())
    }

    #[test]
    fn display_year_changes_described_age() -> TestResult {
        let config = config(&["--display-year", "2025"])?;
        let report = run(&config, &Fixture::sample()?);

        assert_eq!(
            report.events().first().map(|event| event.description.as_str()),
            Some("Microwave, age 3, price 500")
        );

        Ok(())
    }

    #[test]
    fn fixture_without_stock_records_only_arrivals() -> TestResult {
        let config = config(&[])?;
        let fixture = Fixture::from_yaml(
            "label: Pop-up\nproducts: []\narrivals:\n  - kind: eco\n    name: Dryer\n    eco_rating: 4\n",
        )?;

        let report = run(&config, &fixture);

        assert_eq!(report.events().len(), 1);
        assert_eq!(report.stock().len(), 1);

        Ok(())
    }

    #[test]
    fn execute_writes_report() -> TestResult {
        let config = config(&["--reference-year", "2027", "--currency", "EUR"])?;
        let mut out = Vec::new();

        let report = execute(&config, &mut out)?;
        let output = String::from_utf8(out)?;

        assert!(output.starts_with("Adam's Appliance Consignment (2027)"));
        assert!(output.contains(" + added: Microwave"));
        assert!(output.contains(" - removed: Fridge"));
        assert!(output.contains(" Discount eligible products: 3"));
        assert_eq!(report.stock().len(), 4);

        Ok(())
    }

    #[test]
    fn load_fixture_defaults_to_sample() -> TestResult {
        let fixture = load_fixture(&config(&[])?)?;

        assert_eq!(fixture.label(), Fixture::sample()?.label());

        Ok(())
    }

    #[test]
    fn load_fixture_reports_missing_file() -> TestResult {
        let result = load_fixture(&config(&["--fixture", "missing.yml"])?);

        assert!(matches!(result, Err(AppError::Fixture(FixtureError::Io(_)))));

        Ok(())
    }
}
