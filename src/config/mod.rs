//! Checkout service configuration
//!
//! Loaded from `ORDARO_CHECKOUT`-prefixed environment variables through the
//! `config` crate, with `dotenvy` picking up a local `.env`. Sections nest
//! with `__`.
//!
//! # Example
//!
//! ```no_run
//! use ordaro_checkout::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod api;
mod encryption;
mod error;
mod features;
mod history;
mod payment;
mod rate_limit;
mod server;

pub use api::ApiConfig;
pub use encryption::EncryptionConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use history::HistoryConfig;
pub use payment::PaymentConfig;
pub use rate_limit::RateLimitSettings;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Everything the checkout binary needs to start.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Order API and payment service endpoints
    pub api: ApiConfig,

    /// Payment configuration (Paystack)
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Order id cipher credentials
    #[serde(default)]
    pub encryption: EncryptionConfig,

    /// Rate limit windows
    #[serde(default)]
    pub rate_limit: RateLimitSettings,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,

    /// Payment history storage
    #[serde(default)]
    pub history: HistoryConfig,
}

impl AppConfig {
    /// Reads `ORDARO_CHECKOUT__<SECTION>__<KEY>` variables, after a `.env`
    /// file if one exists.
    ///
    /// `ORDARO_CHECKOUT__API__ORDARO_API_URL` lands in `api.ordaro_api_url`.
    /// Fails when the `api` section is absent or a value has the wrong type;
    /// semantic checks are left to [`AppConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ORDARO_CHECKOUT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic checks across sections: URLs, the Paystack key prefix,
    /// cipher key and IV lengths, rate limit bounds, and the webhook secret
    /// in production.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.api.validate()?;
        self.payment.validate(self.server.environment)?;
        self.encryption.validate()?;
        self.rate_limit.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
