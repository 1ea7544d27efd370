//! Price predicates
//!
//! Standard predicates for counting appliances by price. Each one prices
//! items at an explicit evaluation year, which need not match the inventory's
//! own reference year.

use jiff::Zoned;
use rust_decimal::Decimal;

use crate::discounts::Discountable;

/// Which side of the threshold a price has to fall on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum PriceBound {
    /// Price strictly above the threshold.
    Above,

    /// Price strictly below the threshold.
    Below,
}

impl PriceBound {
    /// Check `item`'s price in `evaluation_year` against `threshold`.
    pub fn matches(
        self,
        item: &dyn Discountable,
        threshold: Decimal,
        evaluation_year: i32,
    ) -> bool {
        let price = item.compute_price(evaluation_year);

        match self {
            PriceBound::Above => price > threshold,
            PriceBound::Below => price < threshold,
        }
    }

    /// Predicate closure for this bound, evaluated at `evaluation_year`.
    pub fn predicate(self, evaluation_year: i32) -> impl Fn(&dyn Discountable, Decimal) -> bool {
        move |item: &dyn Discountable, threshold: Decimal| {
            self.matches(item, threshold, evaluation_year)
        }
    }
}

/// Items whose price in `evaluation_year` is above the threshold.
pub fn price_above(evaluation_year: i32) -> impl Fn(&dyn Discountable, Decimal) -> bool {
    PriceBound::Above.predicate(evaluation_year)
}

/// Items whose price in `evaluation_year` is below the threshold.
pub fn price_below(evaluation_year: i32) -> impl Fn(&dyn Discountable, Decimal) -> bool {
    PriceBound::Below.predicate(evaluation_year)
}

/// Current calendar year in the system time zone.
pub fn current_year() -> i32 {
    i32::from(Zoned::now().year())
}
