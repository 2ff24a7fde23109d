//! Pricing of ticket selections.
//!
//! A selection (bag) maps a tier name to a requested quantity. Its price is
//! the sum of `quantity * trade_price` over every entry, in the single
//! payment token of the inventory.

use soroban_sdk::{Map, Symbol};

use crate::terms::InventoryItem;
use crate::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PriceError {
    /// The selection names an item the price table does not carry.
    UnknownItem,
    Overflow,
}

impl From<PriceError> for Error {
    fn from(err: PriceError) -> Self {
        match err {
            PriceError::UnknownItem => Error::UnknownTier,
            PriceError::Overflow => Error::Overflow,
        }
    }
}

/// Total price of `selection`, looking up each unit price with `unit_price`.
///
/// Stops at the first name the lookup does not know; no partial total is
/// returned. An empty selection costs zero.
pub fn total_price<K, I, F>(selection: I, mut unit_price: F) -> Result<i128, PriceError>
where
    I: IntoIterator<Item = (K, u64)>,
    F: FnMut(&K) -> Option<i128>,
{
    selection
        .into_iter()
        .try_fold(0i128, |total, (name, quantity)| {
            let price = unit_price(&name).ok_or(PriceError::UnknownItem)?;
            let line = price
                .checked_mul(i128::from(quantity))
                .ok_or(PriceError::Overflow)?;
            total.checked_add(line).ok_or(PriceError::Overflow)
        })
}

/// Price of a ticket bag against an on-chain inventory.
pub fn bag_price(
    bag: &Map<Symbol, u64>,
    inventory: &Map<Symbol, InventoryItem>,
) -> Result<i128, Error> {
    let total = total_price(bag.iter(), |tier| {
        inventory.get(tier.clone()).map(|item| item.trade_price)
    })?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &&str) -> Option<i128> {
        match *name {
            "frontRow" => Some(3),
            "middleRow" => Some(2),
            "lastRow" => Some(1),
            _ => None,
        }
    }

    #[test]
    fn sums_quantity_times_unit_price() {
        let selection = [("frontRow", 3u64), ("middleRow", 2), ("lastRow", 1)];
        assert_eq!(total_price(selection, table), Ok(14));
    }

    #[test]
    fn order_does_not_matter() {
        let forward = [("frontRow", 1u64), ("middleRow", 4), ("lastRow", 2)];
        let backward = [("lastRow", 2u64), ("middleRow", 4), ("frontRow", 1)];
        assert_eq!(total_price(forward, table), total_price(backward, table));
    }

    #[test]
    fn empty_selection_is_free() {
        let selection: [(&str, u64); 0] = [];
        assert_eq!(total_price(selection, table), Ok(0));
    }

    #[test]
    fn zero_quantity_adds_nothing() {
        let selection = [("frontRow", 0u64), ("lastRow", 5)];
        assert_eq!(total_price(selection, table), Ok(5));
    }

    #[test]
    fn unknown_item_aborts() {
        let mut looked_up = 0;
        let selection = [("balcony", 1u64), ("frontRow", 1)];
        let result = total_price(selection, |name| {
            looked_up += 1;
            table(name)
        });
        assert_eq!(result, Err(PriceError::UnknownItem));
        assert_eq!(looked_up, 1);
    }

    #[test]
    fn overflow_is_reported() {
        let selection = [("whale", u64::MAX), ("whale2", u64::MAX)];
        let result = total_price(selection, |_| Some(i128::MAX / 2));
        assert_eq!(result, Err(PriceError::Overflow));
    }
}
