//! Product Fixtures

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    products::{Appliance, EcoAppliance, Product},
};

/// Product Fixture, tagged by `kind`
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductFixture {
    /// Plain appliance
    Appliance(ApplianceFixture),

    /// Eco appliance
    Eco(EcoFixture),
}

/// Appliance Fixture
#[derive(Debug, Deserialize)]
pub struct ApplianceFixture {
    /// Product name
    pub name: String,

    /// Manufacture year, defaults to 2022
    pub manufacture_year: Option<i32>,

    /// Product price (e.g., "499.99"), defaults to 500
    pub price: Option<String>,
}

/// Eco Appliance Fixture
#[derive(Debug, Deserialize)]
pub struct EcoFixture {
    /// Shared appliance fields
    #[serde(flatten)]
    pub appliance: ApplianceFixture,

    /// Eco rating
    pub eco_rating: u8,
}

impl TryFrom<ApplianceFixture> for Appliance {
    type Error = FixtureError;

    fn try_from(fixture: ApplianceFixture) -> Result<Self, Self::Error> {
        if fixture.name.trim().is_empty() {
            return Err(FixtureError::EmptyName);
        }

        let mut appliance = Appliance::new(fixture.name);

        if let Some(year) = fixture.manufacture_year {
            appliance = appliance.with_manufacture_year(year);
        }

        if let Some(price) = fixture.price.as_deref() {
            appliance = appliance.with_price(parse_price(price)?);
        }

        Ok(appliance)
    }
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        match fixture {
            ProductFixture::Appliance(appliance) => {
                Ok(Product::Appliance(appliance.try_into()?))
            }
            ProductFixture::Eco(eco) => {
                let base = Appliance::try_from(eco.appliance)?;

                Ok(Product::Eco(
                    EcoAppliance::new(base.name(), eco.eco_rating)
                        .with_manufacture_year(base.manufacture_year())
                        .with_price(base.price()),
                ))
            }
        }
    }
}

/// Parse a price string (e.g., "499.99") into a decimal amount.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPrice`] if the string is not a decimal number.
pub fn parse_price(s: &str) -> Result<Decimal, FixtureError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))
}
