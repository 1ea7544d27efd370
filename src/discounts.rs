//! Discounts
//!
//! The discount capability shared by every stocked product, and the fixed
//! discount tiers a product can fall into for a given reference year.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

/// Something that can be priced against a reference year.
///
/// Inventories are generic over this trait, and price predicates only ever see
/// items through it.
pub trait Discountable {
    /// Whether the item qualifies for its best discount in `reference_year`.
    fn is_discount_eligible(&self, reference_year: i32) -> bool;

    /// Price of the item in `reference_year`, net of any applicable discount.
    ///
    /// Never mutates the stored price.
    fn compute_price(&self, reference_year: i32) -> Decimal;
}

/// Discount level applied to a single product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiscountTier {
    /// No discount; the stored price is charged.
    FullPrice,

    /// Standard appliance discount (20% off).
    Standard,

    /// Deep discount for recent, highly rated eco appliances (40% off).
    Eco,
}

impl DiscountTier {
    /// Fraction of the price taken off by this tier.
    pub fn percentage(self) -> Percentage {
        match self {
            DiscountTier::FullPrice => Percentage::from(Decimal::ZERO),
            DiscountTier::Standard => Percentage::from(Decimal::new(20, 2)),
            DiscountTier::Eco => Percentage::from(Decimal::new(40, 2)),
        }
    }

    /// Apply the tier to `price`.
    ///
    /// Uses exact decimal arithmetic, no rounding to currency minor units.
    pub fn apply(self, price: Decimal) -> Decimal {
        match self {
            DiscountTier::FullPrice => price,
            DiscountTier::Standard | DiscountTier::Eco => price - self.percentage() * price,
        }
    }

    /// Whether any discount is applied at all.
    pub fn is_discounted(self) -> bool {
        self != DiscountTier::FullPrice
    }
}

impl fmt::Display for DiscountTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountTier::FullPrice => f.write_str("none"),
            DiscountTier::Standard => f.write_str("standard (20%)"),
            DiscountTier::Eco => f.write_str("eco (40%)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn full_price_leaves_price_untouched() {
        let price = Decimal::new(49_999, 2);

        assert_eq!(DiscountTier::FullPrice.apply(price), price);
    }

    #[test]
    fn standard_takes_twenty_percent_off() {
        assert_eq!(
            DiscountTier::Standard.apply(Decimal::from(500)),
            Decimal::from(400)
        );
    }

    #[test]
    fn eco_takes_forty_percent_off() {
        assert_eq!(DiscountTier::Eco.apply(Decimal::from(500)), Decimal::from(300));
    }

    #[test]
    fn discounts_keep_exact_fractions() {
        // 333.33 * 0.8 = 266.664, not rounded to 266.66
        assert_eq!(
            DiscountTier::Standard.apply(Decimal::new(33_333, 2)),
            Decimal::new(266_664, 3)
        );
    }

    #[test]
    fn eco_discount_is_deeper_than_standard() {
        let price = Decimal::new(1, 2);

        assert!(DiscountTier::Eco.apply(price) < DiscountTier::Standard.apply(price));
    }

    #[test]
    fn display_names_the_tier() {
        assert_eq!(DiscountTier::FullPrice.to_string(), "none");
        assert_eq!(DiscountTier::Standard.to_string(), "standard (20%)");
        assert_eq!(DiscountTier::Eco.to_string(), "eco (40%)");
        assert!(DiscountTier::Eco.is_discounted());
        assert!(!DiscountTier::FullPrice.is_discounted());
    }
}
