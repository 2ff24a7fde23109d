use soroban_sdk::{contracttype, Address, Env, Map, Symbol};

use crate::terms::Terms;
use crate::Error;

pub(crate) const INSTANCE_TTL_THRESHOLD: u32 = 100;
pub(crate) const INSTANCE_TTL_BUMP: u32 = 100;
pub(crate) const HOLDER_TTL_THRESHOLD: u32 = 100;
pub(crate) const HOLDER_TTL_BUMP: u32 = 100;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admin,
    Terms,
    Remaining,
    Proceeds,
    Tickets(Address),
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn read_admin(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)
}

pub fn write_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn read_terms(env: &Env) -> Result<Terms, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Terms)
        .ok_or(Error::NotInitialized)
}

pub fn write_terms(env: &Env, terms: &Terms) {
    env.storage().instance().set(&DataKey::Terms, terms);
}

pub fn read_remaining(env: &Env) -> Map<Symbol, u64> {
    env.storage()
        .instance()
        .get(&DataKey::Remaining)
        .unwrap_or(Map::new(env))
}

pub fn write_remaining(env: &Env, remaining: &Map<Symbol, u64>) {
    env.storage().instance().set(&DataKey::Remaining, remaining);
}

pub fn read_proceeds(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::Proceeds)
        .unwrap_or(0)
}

pub fn write_proceeds(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::Proceeds, &amount);
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_BUMP);
}

pub fn read_tickets(env: &Env, holder: &Address) -> Map<Symbol, u64> {
    env.storage()
        .persistent()
        .get(&DataKey::Tickets(holder.clone()))
        .unwrap_or(Map::new(env))
}

pub fn write_tickets(env: &Env, holder: &Address, tickets: &Map<Symbol, u64>) {
    let key = DataKey::Tickets(holder.clone());
    env.storage().persistent().set(&key, tickets);
    env.storage()
        .persistent()
        .extend_ttl(&key, HOLDER_TTL_THRESHOLD, HOLDER_TTL_BUMP);
}
