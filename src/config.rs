use std::env;
use std::path::PathBuf;

use crate::currency::CurrencyFormat;
use crate::services::DEFAULT_TOP_LOCATIONS;

#[derive(Debug, Clone)]
pub struct Config {
    pub winners_dir: PathBuf,
    pub server_host: String,
    pub server_port: u16,
    pub top_locations: usize,
    pub currency_code: String,
    pub currency_symbol: String,
}

impl Config {
    /// Every setting has a default; unparseable numbers fall back to theirs
    pub fn from_env() -> Self {
        Config {
            winners_dir: env::var("WINNERS_DIR")
                .unwrap_or_else(|_| "public/winners".to_string())
                .into(),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            top_locations: env::var("TOP_LOCATIONS")
                .unwrap_or_else(|_| DEFAULT_TOP_LOCATIONS.to_string())
                .parse()
                .unwrap_or(DEFAULT_TOP_LOCATIONS),
            currency_code: env::var("CURRENCY_CODE").unwrap_or_else(|_| "GBP".to_string()),
            currency_symbol: env::var("CURRENCY_SYMBOL").unwrap_or_else(|_| "£".to_string()),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn currency(&self) -> CurrencyFormat {
        CurrencyFormat::new(self.currency_code.clone(), self.currency_symbol.clone())
    }
}
