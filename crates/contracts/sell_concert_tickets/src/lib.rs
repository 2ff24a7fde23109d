#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, log, token, Address, Env, Map, Symbol};

pub mod events;
pub mod pricing;
mod storage;
pub mod terms;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;


pub use terms::{make_inventory, make_terms, InventoryItem, Terms};

#[contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    UnknownTier = 3,
    EmptyInventory = 4,
    InvalidPrice = 5,
    EmptySelection = 6,
    PriceMismatch = 7,
    InsufficientInventory = 8,
    Overflow = 9,
    InvalidAmount = 10,
}

#[contract]
pub struct SellConcertTickets;

#[contractimpl]
impl SellConcertTickets {
    /// Start the sale with an admin and the instance terms.
    /// Every tier opens with `max_tickets` seats in stock.
    pub fn init(env: Env, admin: Address, terms: Terms) -> Result<(), Error> {
        if storage::has_admin(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if terms.inventory.is_empty() {
            return Err(Error::EmptyInventory);
        }

        let mut remaining = Map::new(&env);
        for (tier, item) in terms.inventory.iter() {
            if item.trade_price < 0 {
                return Err(Error::InvalidPrice);
            }
            remaining.set(tier, item.max_tickets);
        }

        storage::write_admin(&env, &admin);
        storage::write_terms(&env, &terms);
        storage::write_remaining(&env, &remaining);
        storage::write_proceeds(&env, 0);
        storage::bump_instance(&env);

        log!(&env, "sale started", terms.price_token, terms.inventory.len());
        Ok(())
    }

    pub fn terms(env: Env) -> Result<Terms, Error> {
        storage::read_terms(&env)
    }

    /// Price of `bag` against this instance's inventory.
    pub fn bag_price(env: Env, bag: Map<Symbol, u64>) -> Result<i128, Error> {
        let terms = storage::read_terms(&env)?;
        pricing::bag_price(&bag, &terms.inventory)
    }

    /// Sell the tickets in `want` to `buyer` for exactly `give` of the price token.
    ///
    /// Any rejection leaves balances, stock and holdings as they were.
    pub fn trade(env: Env, buyer: Address, give: i128, want: Map<Symbol, u64>) -> Result<(), Error> {
        let terms = storage::read_terms(&env)?;

        if give < 0 {
            return Err(Error::InvalidAmount);
        }
        if want.iter().all(|(_, quantity)| quantity == 0) {
            return Err(Error::EmptySelection);
        }

        let price = pricing::bag_price(&want, &terms.inventory)?;
        if give != price {
            log!(&env, "price mismatch", price, give);
            return Err(Error::PriceMismatch);
        }

        buyer.require_auth();

        let mut remaining = storage::read_remaining(&env);
        let mut holdings = storage::read_tickets(&env, &buyer);
        for (tier, quantity) in want.iter() {
            if quantity == 0 {
                continue;
            }
            let in_stock = remaining.get(tier.clone()).unwrap_or(0);
            if quantity > in_stock {
                return Err(Error::InsufficientInventory);
            }
            remaining.set(tier.clone(), in_stock - quantity);

            let held = holdings.get(tier.clone()).unwrap_or(0);
            let held = held.checked_add(quantity).ok_or(Error::Overflow)?;
            holdings.set(tier, held);
        }

        let proceeds = storage::read_proceeds(&env)
            .checked_add(price)
            .ok_or(Error::Overflow)?;

        // Effects before the token interaction.
        storage::write_remaining(&env, &remaining);
        storage::write_tickets(&env, &buyer, &holdings);
        storage::write_proceeds(&env, proceeds);
        storage::bump_instance(&env);

        if price > 0 {
            let token_client = token::Client::new(&env, &terms.price_token);
            token_client.transfer(&buyer, &env.current_contract_address(), &price);
        }

        events::emit_tickets_sold(&env, &buyer, &want, price);
        Ok(())
    }

    /// Tickets held by `holder`, per tier.
    pub fn tickets(env: Env, holder: Address) -> Map<Symbol, u64> {
        storage::read_tickets(&env, &holder)
    }

    /// Seats still for sale, per tier.
    pub fn remaining(env: Env) -> Result<Map<Symbol, u64>, Error> {
        storage::read_terms(&env)?;
        Ok(storage::read_remaining(&env))
    }

    pub fn proceeds(env: Env) -> Result<i128, Error> {
        storage::read_admin(&env)?;
        Ok(storage::read_proceeds(&env))
    }

    /// Pay all collected proceeds out to `to`. Admin only.
    pub fn withdraw_proceeds(env: Env, to: Address) -> Result<i128, Error> {
        let admin = storage::read_admin(&env)?;
        admin.require_auth();

        let terms = storage::read_terms(&env)?;
        let amount = storage::read_proceeds(&env);
        if amount > 0 {
            storage::write_proceeds(&env, 0);
            storage::bump_instance(&env);

            let token_client = token::Client::new(&env, &terms.price_token);
            token_client.transfer(&env.current_contract_address(), &to, &amount);
        }

        events::emit_proceeds_withdrawn(&env, &to, amount);
        Ok(amount)
    }

    pub fn get_admin(env: Env) -> Result<Address, Error> {
        storage::read_admin(&env)
    }
}
