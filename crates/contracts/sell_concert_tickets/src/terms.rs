use soroban_sdk::{contracttype, Address, Env, Map, Symbol};

use crate::Error;

/// Seats offered per tier when an instance starts.
pub const TICKETS_PER_TIER: u64 = 3;

/// Tier name and its price as a multiple of the base unit.
pub const TIERS: [(&str, i128); 3] = [("frontRow", 3), ("middleRow", 2), ("lastRow", 1)];

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InventoryItem {
    pub trade_price: i128,
    pub max_tickets: u64,
}

/// Instance terms fixed at start: the token buyers pay in and the price table.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Terms {
    pub price_token: Address,
    pub inventory: Map<Symbol, InventoryItem>,
}

/// Fails with `Overflow` when a tier price does not fit in an `i128`.
pub fn make_inventory(env: &Env, base_unit: i128) -> Result<Map<Symbol, InventoryItem>, Error> {
    let mut inventory = Map::new(env);
    for (name, multiple) in TIERS {
        let trade_price = base_unit.checked_mul(multiple).ok_or(Error::Overflow)?;
        inventory.set(
            Symbol::new(env, name),
            InventoryItem {
                trade_price,
                max_tickets: TICKETS_PER_TIER,
            },
        );
    }
    Ok(inventory)
}

pub fn make_terms(env: &Env, price_token: &Address, base_unit: i128) -> Result<Terms, Error> {
    Ok(Terms {
        price_token: price_token.clone(),
        inventory: make_inventory(env, base_unit)?,
    })
}
