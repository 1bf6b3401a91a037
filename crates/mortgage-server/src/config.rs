//! Server configuration

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Prefix for amounts on the HTML page
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Prefix for amounts in PDF documents, which use single-byte fonts
    #[serde(default = "default_pdf_currency_prefix")]
    pub pdf_currency_prefix: String,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_currency_symbol() -> String {
    "£".to_string()
}

fn default_pdf_currency_prefix() -> String {
    "GBP ".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset or blank keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str, default: fn() -> String| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(default)
        };

        let config = Self {
            addr: get("MORTGAGE_ADDR", default_addr),
            currency_symbol: get("MORTGAGE_CURRENCY_SYMBOL", default_currency_symbol),
            pdf_currency_prefix: get("MORTGAGE_PDF_CURRENCY_PREFIX", default_pdf_currency_prefix),
            log_filter: get("MORTGAGE_LOG", default_log_filter),
        };
        config.socket_addr()?;
        Ok(config)
    }

    /// Parsed listen address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.addr
            .parse()
            .with_context(|| format!("invalid MORTGAGE_ADDR '{}'", self.addr))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            currency_symbol: default_currency_symbol(),
            pdf_currency_prefix: default_pdf_currency_prefix(),
            log_filter: default_log_filter(),
        }
    }
}
