//! Server configuration

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::BoxError;
use crate::pricing::DEFAULT_TAX_RATE;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT secret for customer authentication
    pub jwt_secret: String,
    /// Sales tax rate included in menu prices (0.08 = 8%)
    pub tax_rate: Decimal,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Parse a tax rate, which must lie in `[0, 1)`
    pub fn parse_tax_rate(raw: Option<&str>) -> Result<Decimal, BoxError> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(DEFAULT_TAX_RATE);
        };
        let rate = Decimal::from_str(raw).map_err(|e| format!("TAX_RATE is not a decimal: {e}"))?;
        if rate < Decimal::ZERO || rate >= Decimal::ONE {
            return Err(format!("TAX_RATE must be in [0, 1), got {rate}").into());
        }
        Ok(rate)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            tax_rate: Self::parse_tax_rate(std::env::var("TAX_RATE").ok().as_deref())?,
            environment,
        })
    }
}
