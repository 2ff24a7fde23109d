//! Test harness for the ticket sale.
//!
//! Registers the contract, starts instances with terms, funds buyers with
//! payment tokens, and simulates the chain bootstrap that starts the sale
//! once governance has approved it. Consumers read values their producers
//! resolved exactly once, mirroring how bootstrap powers are wired.

use core::cell::OnceCell;

use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env};

use crate::terms::{make_terms, Terms};
use crate::{Error, SellConcertTickets, SellConcertTicketsClient};

/// One unit of a six-decimal stable token.
pub const UNIT6: i128 = 1_000_000;
pub const CENT: i128 = UNIT6 / 100;

/// Register the contract code. The returned address is not started yet.
pub fn install(env: &Env) -> Address {
    env.register(SellConcertTickets, ())
}

/// Start an installed contract with `terms`.
pub fn start_instance<'a>(
    env: &Env,
    installation: &Address,
    admin: &Address,
    terms: &Terms,
) -> SellConcertTicketsClient<'a> {
    let client = SellConcertTicketsClient::new(env, installation);
    client.init(admin, terms);
    client
}

/// Payment token handle: the token interface plus its minting admin.
pub struct PaymentToken<'a> {
    pub token: TokenClient<'a>,
    pub asset: StellarAssetClient<'a>,
}

impl PaymentToken<'_> {
    pub fn address(&self) -> Address {
        self.token.address.clone()
    }
}

pub fn create_token<'a>(env: &Env, admin: &Address) -> PaymentToken<'a> {
    let contract = env.register_stellar_asset_contract_v2(admin.clone());
    PaymentToken {
        token: TokenClient::new(env, &contract.address()),
        asset: StellarAssetClient::new(env, &contract.address()),
    }
}

/// Hands out stable tokens to test accounts.
pub struct StableFaucet<'a> {
    env: Env,
    stable: PaymentToken<'a>,
}

impl<'a> StableFaucet<'a> {
    pub fn new(env: &Env, stable: PaymentToken<'a>) -> Self {
        Self {
            env: env.clone(),
            stable,
        }
    }

    /// A fresh account holding `amount` of the stable token.
    pub fn faucet(&self, amount: i128) -> Address {
        let account = Address::generate(&self.env);
        self.stable.asset.mint(&account, &amount);
        account
    }

    pub fn token(&self) -> &PaymentToken<'a> {
        &self.stable
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BootstrapError {
    /// A consumer read a value nobody produced yet.
    Pending,
    AlreadyResolved,
    /// The contract refused to start.
    Rejected(Error),
    /// The start call failed outside the contract's own errors.
    InvokeFailed,
}

/// A value slot resolved exactly once and read by any number of consumers.
pub struct Producer<T> {
    cell: OnceCell<T>,
}

impl<T: Clone> Producer<T> {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn resolve(&self, value: T) -> Result<(), BootstrapError> {
        self.cell
            .set(value)
            .map_err(|_| BootstrapError::AlreadyResolved)
    }

    pub fn get(&self) -> Result<T, BootstrapError> {
        self.cell.get().cloned().ok_or(BootstrapError::Pending)
    }

    pub fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: Clone> Default for Producer<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The powers chain bootstrap grants to the approved start-up code.
pub struct BootstrapPowers {
    pub env: Env,
    /// Governance account that will administer the sale.
    pub admin: Address,
    /// The chain's stable fee token (IST).
    pub fee_token: Address,
    /// Consumed: installation of the contract code.
    pub installation: Producer<Address>,
    /// Produced: the started instance.
    pub instance: Producer<Address>,
    /// Produced: the ticket brand, i.e. the contract that issues tickets.
    pub ticket_brand: Producer<Address>,
}

impl BootstrapPowers {
    pub fn new(env: &Env, admin: &Address, fee_token: &Address) -> Self {
        Self {
            env: env.clone(),
            admin: admin.clone(),
            fee_token: fee_token.clone(),
            installation: Producer::new(),
            instance: Producer::new(),
            ticket_brand: Producer::new(),
        }
    }
}

/// Start the sale from bootstrap powers, pricing tickets in the fee token.
///
/// Starting twice is refused with `AlreadyResolved` before touching the chain.
pub fn start_sell_concert_tickets(powers: &BootstrapPowers) -> Result<Address, BootstrapError> {
    if powers.instance.is_resolved() {
        return Err(BootstrapError::AlreadyResolved);
    }
    let installation = powers.installation.get()?;
    let terms =
        make_terms(&powers.env, &powers.fee_token, 5 * CENT).map_err(BootstrapError::Rejected)?;

    let client = SellConcertTicketsClient::new(&powers.env, &installation);
    match client.try_init(&powers.admin, &terms) {
        Ok(Ok(())) => {}
        Err(Ok(err)) => return Err(BootstrapError::Rejected(err)),
        _ => return Err(BootstrapError::InvokeFailed),
    }

    powers.instance.resolve(client.address.clone())?;
    powers.ticket_brand.resolve(client.address.clone())?;
    Ok(client.address)
}
