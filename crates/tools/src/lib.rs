//! Ticket sale tools library
//!
//! Configuration loading, logging setup and off-chain pricing for the
//! sell-concert-tickets contract.

pub mod config;
pub mod observability;
pub mod selection;

pub use config::{Config, ConfigError, Network};
pub use selection::{inventory_rows, parse_selection, price_selection, InventoryRow, SelectionError};
