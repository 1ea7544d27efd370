//! Products
//!
//! Stocked appliances and their discount rules. The product family is closed:
//! a [`Product`] is either a plain [`Appliance`] or an [`EcoAppliance`], and an
//! eco appliance is built on top of a plain one so its pricing can fall back
//! to the base rule.

use rust_decimal::Decimal;
use slotmap::new_key_type;

use crate::discounts::{DiscountTier, Discountable};

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Manufacture year assumed when none is given.
pub const DEFAULT_MANUFACTURE_YEAR: i32 = 2022;

/// Price assumed when none is given.
pub const DEFAULT_PRICE: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Maximum age, in years, at which an appliance still gets a discount.
pub const DISCOUNT_WINDOW_YEARS: i32 = 5;

/// Eco rating an appliance has to exceed to qualify for the eco discount.
pub const ECO_RATING_THRESHOLD: u8 = 2;

/// Appliance
#[derive(Debug, Clone, PartialEq)]
pub struct Appliance {
    name: String,
    manufacture_year: i32,
    price: Decimal,
}

impl Appliance {
    /// Creates an appliance with the default manufacture year and price.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            manufacture_year: DEFAULT_MANUFACTURE_YEAR,
            price: DEFAULT_PRICE,
        }
    }

    /// Sets the manufacture year.
    #[must_use]
    pub fn with_manufacture_year(mut self, manufacture_year: i32) -> Self {
        self.manufacture_year = manufacture_year;
        self
    }

    /// Sets the price.
    #[must_use]
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Year the appliance was manufactured.
    pub fn manufacture_year(&self) -> i32 {
        self.manufacture_year
    }

    /// Stored price, before any discount.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Replaces price and manufacture year in one update.
    pub fn update_price(&mut self, new_price: Decimal, new_year: i32) {
        self.price = new_price;
        self.manufacture_year = new_year;
    }

    /// Age in whole years as of `as_of_year`.
    pub fn age(&self, as_of_year: i32) -> i32 {
        as_of_year.saturating_sub(self.manufacture_year)
    }

    /// Discount tier for `reference_year`.
    pub fn discount_tier(&self, reference_year: i32) -> DiscountTier {
        if self.is_discount_eligible(reference_year) {
            DiscountTier::Standard
        } else {
            DiscountTier::FullPrice
        }
    }

    /// Renders name, age as of `as_of_year`, and stored price.
    pub fn describe(&self, as_of_year: i32) -> String {
        format!(
            "{}, age {}, price {}",
            self.name,
            self.age(as_of_year),
            self.price
        )
    }
}

impl Discountable for Appliance {
    fn is_discount_eligible(&self, reference_year: i32) -> bool {
        self.age(reference_year) <= DISCOUNT_WINDOW_YEARS
    }

    fn compute_price(&self, reference_year: i32) -> Decimal {
        self.discount_tier(reference_year).apply(self.price)
    }
}

/// Appliance with an eco rating.
///
/// Eligibility for the eco discount requires the plain appliance rule to hold
/// as well; when only the plain rule holds, the standard discount applies.
#[derive(Debug, Clone, PartialEq)]
pub struct EcoAppliance {
    appliance: Appliance,
    eco_rating: u8,
}

impl EcoAppliance {
    /// Creates an eco appliance with the default manufacture year and price.
    pub fn new(name: impl Into<String>, eco_rating: u8) -> Self {
        Self {
            appliance: Appliance::new(name),
            eco_rating,
        }
    }

    /// Sets the manufacture year.
    #[must_use]
    pub fn with_manufacture_year(mut self, manufacture_year: i32) -> Self {
        self.appliance = self.appliance.with_manufacture_year(manufacture_year);
        self
    }

    /// Sets the price.
    #[must_use]
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.appliance = self.appliance.with_price(price);
        self
    }

    /// The underlying plain appliance.
    pub fn appliance(&self) -> &Appliance {
        &self.appliance
    }

    /// Eco rating
    pub fn eco_rating(&self) -> u8 {
        self.eco_rating
    }

    /// Changes the eco rating.
    pub fn set_eco_rating(&mut self, eco_rating: u8) {
        self.eco_rating = eco_rating;
    }

    /// Replaces price and manufacture year in one update.
    pub fn update_price(&mut self, new_price: Decimal, new_year: i32) {
        self.appliance.update_price(new_price, new_year);
    }

    /// Discount tier for `reference_year`.
    pub fn discount_tier(&self, reference_year: i32) -> DiscountTier {
        if self.is_discount_eligible(reference_year) {
            DiscountTier::Eco
        } else {
            self.appliance.discount_tier(reference_year)
        }
    }

    /// Plain appliance description followed by the eco rating.
    pub fn describe(&self, as_of_year: i32) -> String {
        format!(
            "{}, eco rating {}",
            self.appliance.describe(as_of_year),
            self.eco_rating
        )
    }
}

impl Discountable for EcoAppliance {
    fn is_discount_eligible(&self, reference_year: i32) -> bool {
        self.appliance.is_discount_eligible(reference_year)
            && self.eco_rating > ECO_RATING_THRESHOLD
    }

    fn compute_price(&self, reference_year: i32) -> Decimal {
        self.discount_tier(reference_year)
            .apply(self.appliance.price())
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    /// Plain appliance
    Appliance(Appliance),

    /// Eco appliance
    Eco(EcoAppliance),
}

impl Product {
    /// Shared appliance data of either variant.
    pub fn appliance(&self) -> &Appliance {
        match self {
            Product::Appliance(appliance) => appliance,
            Product::Eco(eco) => eco.appliance(),
        }
    }

    /// Product name
    pub fn name(&self) -> &str {
        self.appliance().name()
    }

    /// Year the product was manufactured.
    pub fn manufacture_year(&self) -> i32 {
        self.appliance().manufacture_year()
    }

    /// Stored price, before any discount.
    pub fn price(&self) -> Decimal {
        self.appliance().price()
    }

    /// Eco rating, for eco appliances only.
    pub fn eco_rating(&self) -> Option<u8> {
        match self {
            Product::Appliance(_) => None,
            Product::Eco(eco) => Some(eco.eco_rating()),
        }
    }

    /// Short label for the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Product::Appliance(_) => "appliance",
            Product::Eco(_) => "eco",
        }
    }

    /// Age in whole years as of `as_of_year`.
    pub fn age(&self, as_of_year: i32) -> i32 {
        self.appliance().age(as_of_year)
    }

    /// Replaces price and manufacture year in one update.
    pub fn update_price(&mut self, new_price: Decimal, new_year: i32) {
        match self {
            Product::Appliance(appliance) => appliance.update_price(new_price, new_year),
            Product::Eco(eco) => eco.update_price(new_price, new_year),
        }
    }

    /// Discount tier for `reference_year`.
    pub fn discount_tier(&self, reference_year: i32) -> DiscountTier {
        match self {
            Product::Appliance(appliance) => appliance.discount_tier(reference_year),
            Product::Eco(eco) => eco.discount_tier(reference_year),
        }
    }

    /// Human readable description as of `as_of_year`.
    pub fn describe(&self, as_of_year: i32) -> String {
        match self {
            Product::Appliance(appliance) => appliance.describe(as_of_year),
            Product::Eco(eco) => eco.describe(as_of_year),
        }
    }
}

impl Discountable for Product {
    fn is_discount_eligible(&self, reference_year: i32) -> bool {
        match self {
            Product::Appliance(appliance) => appliance.is_discount_eligible(reference_year),
            Product::Eco(eco) => eco.is_discount_eligible(reference_year),
        }
    }

    fn compute_price(&self, reference_year: i32) -> Decimal {
        match self {
            Product::Appliance(appliance) => appliance.compute_price(reference_year),
            Product::Eco(eco) => eco.compute_price(reference_year),
        }
    }
}

impl From<Appliance> for Product {
    fn from(appliance: Appliance) -> Self {
        Product::Appliance(appliance)
    }
}

impl From<EcoAppliance> for Product {
    fn from(eco: EcoAppliance) -> Self {
        Product::Eco(eco)
    }
}
