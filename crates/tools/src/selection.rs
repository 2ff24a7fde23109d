//! Off-chain view of the ticket inventory and selection pricing.
//!
//! Uses the same tier table and pricing rule as the contract, so a price
//! quoted here is the exact `give` amount a trade must carry.

use std::collections::BTreeMap;

use sell_concert_tickets::pricing::{total_price, PriceError};
use sell_concert_tickets::terms::{TICKETS_PER_TIER, TIERS};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("expected tier=quantity, got {0:?}")]
    Malformed(String),

    #[error("invalid quantity for {tier}: {raw:?}")]
    BadQuantity { tier: String, raw: String },

    #[error("unknown tier: {0}")]
    UnknownTier(String),

    #[error("base unit must be positive, got {0}")]
    InvalidBaseUnit(i128),

    #[error("price overflows")]
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRow {
    pub tier: &'static str,
    pub trade_price: i128,
    pub max_tickets: u64,
}

/// The inventory an instance started with `base_unit` offers.
pub fn inventory_rows(base_unit: i128) -> Result<Vec<InventoryRow>, SelectionError> {
    if base_unit <= 0 {
        return Err(SelectionError::InvalidBaseUnit(base_unit));
    }
    TIERS
        .iter()
        .map(|&(tier, multiple)| {
            Ok(InventoryRow {
                tier,
                trade_price: base_unit.checked_mul(multiple).ok_or(SelectionError::Overflow)?,
                max_tickets: TICKETS_PER_TIER,
            })
        })
        .collect()
}

/// Parse `tier=quantity` arguments. Repeated tiers add up.
pub fn parse_selection<S: AsRef<str>>(args: &[S]) -> Result<BTreeMap<String, u64>, SelectionError> {
    let mut selection = BTreeMap::new();
    for arg in args {
        let arg = arg.as_ref();
        let (tier, raw) = arg
            .split_once('=')
            .ok_or_else(|| SelectionError::Malformed(arg.to_string()))?;
        let tier = tier.trim();
        if tier.is_empty() {
            return Err(SelectionError::Malformed(arg.to_string()));
        }
        let quantity: u64 = raw.trim().parse().map_err(|_| SelectionError::BadQuantity {
            tier: tier.to_string(),
            raw: raw.to_string(),
        })?;

        let entry = selection.entry(tier.to_string()).or_insert(0u64);
        *entry = entry.checked_add(quantity).ok_or(SelectionError::Overflow)?;
    }
    Ok(selection)
}

/// Total price of `selection` at `base_unit`.
pub fn price_selection(selection: &BTreeMap<String, u64>, base_unit: i128) -> Result<i128, SelectionError> {
    let rows = inventory_rows(base_unit)?;
    let mut missing = None;
    let total = total_price(selection.iter().map(|(tier, qty)| (tier, *qty)), |tier| {
        let price = rows.iter().find(|row| row.tier == tier.as_str()).map(|row| row.trade_price);
        if price.is_none() {
            missing = Some(tier.to_string());
        }
        price
    });

    total.map_err(|err| match err {
        PriceError::UnknownItem => SelectionError::UnknownTier(missing.take().unwrap_or_default()),
        PriceError::Overflow => SelectionError::Overflow,
    })
}
