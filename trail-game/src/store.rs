//! General store: pricing and purchasing against the wagon's cash.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::StorePrices;
use crate::state::{CENTS_PER_DOLLAR, Supply, WagonPart};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error("nothing was ordered")]
    EmptyOrder,
    #[error("you don't have enough money for this purchase (costs {total_cents} cents, {cash_cents} on hand)")]
    InsufficientCash { total_cents: u32, cash_cents: u32 },
}

/// Quantities requested at the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOrder {
    pub food_lbs: u32,
    pub ammo_boxes: u32,
    pub clothing_sets: u32,
    pub oxen: u32,
    pub wheels: u32,
    pub axles: u32,
    pub tongues: u32,
}

impl StoreOrder {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.food_lbs == 0
            && self.ammo_boxes == 0
            && self.clothing_sets == 0
            && self.oxen == 0
            && self.wheels == 0
            && self.axles == 0
            && self.tongues == 0
    }

    #[must_use]
    pub const fn spare(&self, part: WagonPart) -> u32 {
        match part {
            WagonPart::Wheel => self.wheels,
            WagonPart::Axle => self.axles,
            WagonPart::Tongue => self.tongues,
        }
    }

    /// `(label, quantity, unit price in cents)` for every line on the order.
    #[must_use]
    pub const fn lines(&self, prices: &StorePrices) -> [(&'static str, u32, u32); 7] {
        [
            ("food (lbs)", self.food_lbs, prices.food_lb),
            ("ammunition (boxes)", self.ammo_boxes, prices.ammo_box),
            ("clothing (sets)", self.clothing_sets, prices.clothing_set),
            ("oxen", self.oxen, prices.ox),
            ("wagon wheels", self.wheels, prices.spare_part),
            ("wagon axles", self.axles, prices.spare_part),
            ("wagon tongues", self.tongues, prices.spare_part),
        ]
    }
}

/// `$12.40` style label for a cent amount.
#[must_use]
pub fn format_cents(cents: u32) -> String {
    format!("${}.{:02}", cents / CENTS_PER_DOLLAR, cents % CENTS_PER_DOLLAR)
}

/// Order total at standard prices, in cents.
#[must_use]
pub fn quote(order: &StoreOrder) -> u32 {
    quote_with(order, &StorePrices::standard())
}

#[must_use]
pub fn quote_with(order: &StoreOrder, prices: &StorePrices) -> u32 {
    order
        .lines(prices)
        .iter()
        .fold(0_u32, |total, (_, qty, unit)| {
            total.saturating_add(qty.saturating_mul(*unit))
        })
}

/// Buy at standard prices.
///
/// # Errors
///
/// See [`purchase_with`].
pub fn purchase(supply: &Supply, order: &StoreOrder) -> Result<Supply, StoreError> {
    purchase_with(supply, order, &StorePrices::standard())
}

/// Return the wagon's supplies after buying `order`.
///
/// # Errors
///
/// Rejects empty orders and orders costing more than the cash on hand.
pub fn purchase_with(
    supply: &Supply,
    order: &StoreOrder,
    prices: &StorePrices,
) -> Result<Supply, StoreError> {
    if order.is_empty() {
        return Err(StoreError::EmptyOrder);
    }
    let total_cents = quote_with(order, prices);
    if total_cents > supply.cash_cents {
        return Err(StoreError::InsufficientCash {
            total_cents,
            cash_cents: supply.cash_cents,
        });
    }

    let mut next = *supply;
    next.cash_cents -= total_cents;
    next.food = next.food.saturating_add(order.food_lbs);
    next.ammunition = next.ammunition.saturating_add(order.ammo_boxes);
    next.clothing = next.clothing.saturating_add(order.clothing_sets);
    next.oxen = next.oxen.saturating_add(order.oxen);
    for part in WagonPart::ALL {
        next.spare_parts.add(part, order.spare(part));
    }
    log::debug!("store: spent {}", format_cents(total_cents));
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SpareParts;

    fn wallet(dollars: u32) -> Supply {
        Supply {
            cash_cents: dollars * CENTS_PER_DOLLAR,
            ..Supply::default()
        }
    }

    #[test]
    fn quote_sums_unit_prices() {
        let order = StoreOrder {
            food_lbs: 100,
            ammo_boxes: 2,
            clothing_sets: 1,
            oxen: 1,
            wheels: 1,
            axles: 0,
            tongues: 1,
        };
        assert_eq!(quote(&order), 2000 + 400 + 1000 + 4000 + 2000);
        assert_eq!(format_cents(quote(&order)), "$94.00");
        assert_eq!(format_cents(20), "$0.20");
    }

    #[test]
    fn purchase_moves_goods_into_wagon() {
        let order = StoreOrder {
            food_lbs: 50,
            axles: 2,
            ..StoreOrder::default()
        };
        let after = purchase(&wallet(40), &order).expect("affordable");
        assert_eq!(after.cash_cents, 4000 - 1000 - 2000);
        assert_eq!(after.food, 50);
        assert_eq!(
            after.spare_parts,
            SpareParts {
                wheels: 0,
                axles: 2,
                tongues: 0
            }
        );
    }

    #[test]
    fn exact_cash_is_enough() {
        let order = StoreOrder {
            oxen: 1,
            ..StoreOrder::default()
        };
        let after = purchase(&wallet(40), &order).expect("exact");
        assert_eq!(after.cash_cents, 0);
        assert_eq!(after.oxen, 1);
    }

    #[test]
    fn rejected_orders_leave_supply_alone() {
        let order = StoreOrder {
            oxen: 2,
            ..StoreOrder::default()
        };
        let err = purchase(&wallet(40), &order).unwrap_err();
        assert_eq!(
            err,
            StoreError::InsufficientCash {
                total_cents: 8000,
                cash_cents: 4000
            }
        );
        assert!(err.to_string().contains("costs 8000 cents"));
        assert_eq!(
            purchase(&wallet(40), &StoreOrder::default()),
            Err(StoreError::EmptyOrder)
        );
    }
}
