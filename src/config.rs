use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use std::{env, fs};

use tracing::{info, warn};

use crate::error::{OrderError, Result};

/// Runtime configuration, loaded once at startup from the environment.
///
/// Tunables fall back to defaults with a log line; secrets are required and
/// missing ones fail startup with a `Configuration` error that names the
/// variable but never its value.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub paypal: PayPalConfig,
    pub email: Option<EmailConfig>,
}

#[derive(Debug, Clone)]
pub struct PayPalConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub currency: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub endpoint: String,
    pub api_key: String,
    pub from_address: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let paypal = PayPalConfig {
            base_url: try_load("PAYPAL_BASE_URL", "https://api-m.sandbox.paypal.com")?,
            client_id: read_secret("PAYPAL_CLIENT_ID")?,
            client_secret: read_secret("PAYPAL_CLIENT_SECRET")?,
            currency: try_load("PAYPAL_CURRENCY", "USD")?,
            timeout: Duration::from_millis(try_load("PAYPAL_TIMEOUT_MS", "15000")?),
        };

        // The confirmation-email endpoint is optional; without it the
        // dispatcher degrades to log-only delivery.
        let email = match env::var("EMAIL_API_URL") {
            Ok(endpoint) if !endpoint.is_empty() => Some(EmailConfig {
                endpoint,
                api_key: read_secret("EMAIL_API_KEY")?,
                from_address: try_load("EMAIL_FROM", "orders@paperdesk.example")?,
            }),
            _ => {
                info!("EMAIL_API_URL not set, order confirmations will be logged only");
                None
            }
        };

        Ok(Self {
            port: try_load("PORT", "1111")?,
            paypal,
            email,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse()
        .map_err(|e| OrderError::Configuration(format!("invalid {key} value: {e}")))
}

/// Reads a secret from the environment, or from a Docker-style
/// `/run/secrets/<name>` file when the variable is absent.
fn read_secret(name: &str) -> Result<String> {
    if let Ok(value) = env::var(name)
        && !value.is_empty()
    {
        return Ok(value);
    }

    let path = format!("/run/secrets/{name}");
    fs::read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|_| {
            warn!("{name} not found in environment or secrets file");
            OrderError::Configuration(format!("{name} is not set"))
        })
}
