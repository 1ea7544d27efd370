//! Fixtures
//!
//! Inventory datasets loaded from YAML. A fixture names the inventory, lists
//! the products stocked from the start, and the arrivals added afterwards.

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    inventory::{Inventory, appliances::ApplianceInventory},
    products::Product,
};

pub mod products;

use products::ProductFixture;

/// Bundled showroom dataset.
const SAMPLE_SHOWROOM: &str = include_str!("../../fixtures/showroom.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Product without a name
    #[error("Product name must not be empty")]
    EmptyName,
}

/// Wrapper for an inventory dataset in YAML
#[derive(Debug, Deserialize)]
struct InventoryFixture {
    label: String,
    products: Vec<ProductFixture>,
    #[serde(default)]
    arrivals: Vec<ProductFixture>,
}

/// Fixture
#[derive(Debug, Clone)]
pub struct Fixture {
    label: String,
    products: Vec<Product>,
    arrivals: Vec<Product>,
}

impl Fixture {
    /// The bundled showroom: a fridge, a washer, a dishwasher and an oven in
    /// stock, with a microwave arriving later.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled YAML is invalid.
    pub fn sample() -> Result<Self, FixtureError> {
        Self::from_yaml(SAMPLE_SHOWROOM)
    }

    /// Load a fixture from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a price is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();

        debug!(path = %path.display(), "loading fixture");

        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse a fixture from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, or if a price is invalid.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        let fixture: InventoryFixture = serde_norway::from_str(contents)?;

        let products = fixture
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let arrivals = fixture
            .arrivals
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            label: fixture.label,
            products,
            arrivals,
        })
    }

    /// Inventory label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Products in stock from the start.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products added once the inventory is open.
    pub fn arrivals(&self) -> &[Product] {
        &self.arrivals
    }

    /// Build an inventory of the initial stock, priced against `reference_year`.
    pub fn inventory(&self, reference_year: i32) -> ApplianceInventory {
        Inventory::new(self.label.clone(), reference_year, self.products.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rust_decimal::Decimal;
    use tempfile::NamedTempFile;
    use testresult::TestResult;

    use crate::products::{Appliance, EcoAppliance};

    use super::*;

    #[test]
    fn sample_has_four_products_and_one_arrival() -> TestResult {
        let fixture = Fixture::sample()?;

        assert_eq!(fixture.label(), "Adam's Appliance Consignment");
        assert_eq!(
            fixture.products(),
            [
                Product::from(Appliance::new("Fridge")),
                Product::from(EcoAppliance::new("Washer", 3)),
                Product::from(Appliance::new("Dishwasher")),
                Product::from(EcoAppliance::new("Oven", 1)),
            ]
        );
        assert_eq!(fixture.arrivals(), [Product::from(Appliance::new("Microwave"))]);

        Ok(())
    }

    #[test]
    fn inventory_uses_label_and_reference_year() -> TestResult {
        let inventory = Fixture::sample()?.inventory(2027);

        assert_eq!(inventory.label(), "Adam's Appliance Consignment");
        assert_eq!(inventory.reference_year(), 2027);
        assert_eq!(inventory.len(), 4);
        assert_eq!(inventory.total_price(), Decimal::from(1500));

        Ok(())
    }

    #[test]
    fn arrivals_default_to_empty() -> TestResult {
        let fixture = Fixture::from_yaml("label: Empty\nproducts: []\n")?;

        assert!(fixture.products().is_empty());
        assert!(fixture.arrivals().is_empty());

        Ok(())
    }

    #[test]
    fn from_path_reads_file() -> TestResult {
        let mut file = NamedTempFile::new()?;

        writeln!(
            file,
            "label: Outlet\nproducts:\n  - kind: appliance\n    name: Kettle\n    price: \"39.99\"\n"
        )?;

        let fixture = Fixture::from_path(file.path())?;

        assert_eq!(fixture.label(), "Outlet");
        assert_eq!(
            fixture.products().first().map(Product::price),
            Some(Decimal::new(3999, 2))
        );

        Ok(())
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let result = Fixture::from_path("does/not/exist.yml");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }

    #[test]
    fn invalid_price_is_reported() {
        let result = Fixture::from_yaml(
            "label: Bad\nproducts:\n  - kind: appliance\n    name: Kettle\n    price: cheap\n",
        );

        assert!(matches!(result, Err(FixtureError::InvalidPrice(price)) if price == "cheap"));
    }

    #[test]
    fn blank_product_name_is_rejected() {
        let result = Fixture::from_yaml(
            "label: Bad\nproducts: []\narrivals:\n  - kind: eco\n    name: \"  \"\n    eco_rating: 3\n",
        );

        assert!(matches!(result, Err(FixtureError::EmptyName)));
    }

    #[test]
    fn malformed_yaml_is_reported() {
        let result = Fixture::from_yaml("label: [unclosed");

        assert!(matches!(result, Err(FixtureError::Yaml(_))));
    }
}
