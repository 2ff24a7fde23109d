use soroban_sdk::{contracttype, Address, Env, Map, Symbol};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TicketsSoldEvent {
    pub buyer: Address,
    pub tickets: Map<Symbol, u64>,
    pub price: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProceedsWithdrawnEvent {
    pub to: Address,
    pub amount: i128,
}

pub fn emit_tickets_sold(env: &Env, buyer: &Address, tickets: &Map<Symbol, u64>, price: i128) {
    env.events().publish(
        (Symbol::new(env, "tickets_sold"), buyer.clone()),
        TicketsSoldEvent {
            buyer: buyer.clone(),
            tickets: tickets.clone(),
            price,
        },
    );
}

pub fn emit_proceeds_withdrawn(env: &Env, to: &Address, amount: i128) {
    env.events().publish(
        (Symbol::new(env, "proceeds_withdrawn"),),
        ProceedsWithdrawnEvent {
            to: to.clone(),
            amount,
        },
    );
}
