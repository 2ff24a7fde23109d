//! Network and sale configuration for the ticket sale tools.
//!
//! Configuration is resolved in priority order:
//!
//! 1. Environment variables (`SOROBAN_*`, `TICKETS_*`)
//! 2. The selected profile of `soroban.toml`
//! 3. Built-in network defaults
//!
//! # Examples
//!
//! ```rust,no_run
//! use sell_tickets_tools::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! println!("Network: {}", config.network);
//! println!("Base unit: {}", config.base_unit);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Length of a Stellar strkey (`G...` accounts, `C...` contracts).
const STRKEY_LEN: usize = 56;

pub const DEFAULT_BASE_UNIT: i128 = 1;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid network: {0}. Must be: testnet, mainnet, or sandbox")]
    InvalidNetwork(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Testnet,
    Mainnet,
    /// Local sandbox for development
    Sandbox,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
            Network::Sandbox => "sandbox",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "testnet" => Ok(Network::Testnet),
            "mainnet" => Ok(Network::Mainnet),
            "sandbox" => Ok(Network::Sandbox),
            other => Err(ConfigError::InvalidNetwork(other.to_string())),
        }
    }

    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Testnet => "https://soroban-testnet.stellar.org",
            Network::Mainnet => "https://mainnet.sorobanrpc.com",
            Network::Sandbox => "http://localhost:8000",
        }
    }

    /// Network passphrase used when signing transactions.
    pub fn passphrase(&self) -> &'static str {
        match self {
            Network::Testnet => "Test SDF Network ; September 2015",
            Network::Mainnet => "Public Global Stellar Network ; September 2015",
            Network::Sandbox => "Standalone Network ; February 2017",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A `[profile.<name>]` table of soroban.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkProfile {
    pub network: String,
    pub rpc_url: String,
    pub network_passphrase: String,
    #[serde(default)]
    pub contract_id: Option<String>,
    #[serde(default)]
    pub price_token: Option<String>,
    #[serde(default)]
    pub base_unit: Option<i128>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SorobanToml {
    #[serde(default)]
    pub default: Option<DefaultProfile>,
    #[serde(default)]
    pub profile: HashMap<String, NetworkProfile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultProfile {
    pub network: Option<String>,
}

impl SorobanToml {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub network: Network,
    pub rpc_url: String,
    pub network_passphrase: String,
    /// Deployed sale instance, if any.
    pub contract_id: Option<String>,
    /// Token buyers pay in.
    pub price_token: Option<String>,
    /// Price of a last-row seat; the other tiers are multiples of it.
    pub base_unit: i128,
}

impl Config {
    /// Load configuration from the process environment and `./soroban.toml`.
    ///
    /// A `.env` file is read first when present.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let toml = match SorobanToml::from_path(Path::new("soroban.toml")) {
            Ok(toml) => Some(toml),
            Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => return Err(err),
        };

        Self::resolve(toml.as_ref(), |key| std::env::var(key).ok())
    }

    /// Resolve configuration from an optional soroban.toml and an env lookup.
    pub fn resolve<F>(toml: Option<&SorobanToml>, var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let network_name = var("SOROBAN_NETWORK")
            .or_else(|| {
                toml.and_then(|t| t.default.as_ref())
                    .and_then(|d| d.network.clone())
            })
            .unwrap_or_else(|| "testnet".to_string());

        let network = Network::parse(&network_name)?;
        let profile = toml.and_then(|t| t.profile.get(network_name.as_str()));

        let rpc_url = var("SOROBAN_RPC_URL")
            .or_else(|| profile.map(|p| p.rpc_url.clone()))
            .unwrap_or_else(|| network.default_rpc_url().to_string());

        let network_passphrase = var("SOROBAN_NETWORK_PASSPHRASE")
            .or_else(|| profile.map(|p| p.network_passphrase.clone()))
            .unwrap_or_else(|| network.passphrase().to_string());

        let contract_id = var("SOROBAN_CONTRACT_ID").or_else(|| profile.and_then(|p| p.contract_id.clone()));
        let price_token = var("TICKETS_PRICE_TOKEN").or_else(|| profile.and_then(|p| p.price_token.clone()));

        let base_unit = match var("TICKETS_BASE_UNIT") {
            Some(raw) => raw.parse().map_err(|_| {
                ConfigError::ValidationError(format!("TICKETS_BASE_UNIT is not an integer: {}", raw))
            })?,
            None => profile
                .and_then(|p| p.base_unit)
                .unwrap_or(DEFAULT_BASE_UNIT),
        };

        let config = Config {
            network,
            rpc_url,
            network_passphrase,
            contract_id,
            price_token,
            base_unit,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rpc_url.is_empty() {
            return Err(ConfigError::MissingField("rpc_url".to_string()));
        }
        if self.network_passphrase.is_empty() {
            return Err(ConfigError::MissingField("network_passphrase".to_string()));
        }
        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "RPC URL must start with http:// or https://: {}",
                self.rpc_url
            )));
        }
        if self.base_unit <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "base unit must be positive: {}",
                self.base_unit
            )));
        }
        if let Some(id) = &self.contract_id {
            check_contract_strkey("contract_id", id)?;
        }
        if let Some(token) = &self.price_token {
            check_contract_strkey("price_token", token)?;
        }
        Ok(())
    }

    pub fn print_summary(&self) {
        println!("  Network:             {}", self.network);
        println!("  RPC URL:             {}", self.rpc_url);
        println!("  Network Passphrase:  {}", self.network_passphrase);
        println!(
            "  Sale Contract:       {}",
            self.contract_id.as_deref().unwrap_or("(not configured)")
        );
        println!(
            "  Price Token:         {}",
            self.price_token.as_deref().unwrap_or("(not configured)")
        );
        println!("  Base Unit:           {}", self.base_unit);
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn check_contract_strkey(field: &str, value: &str) -> Result<(), ConfigError> {
    let well_formed = value.len() == STRKEY_LEN
        && value.starts_with('C')
        && value.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
    if well_formed {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{} is not a contract address: {}",
            field, value
        )))
    }
}
