use std::env;

use anyhow::Context;

use crate::auth::CredentialStore;

/// Governor settings for the unauthenticated write endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub per_second: u64,
    pub burst_size: u32,
}

impl Default for RateLimit {
    fn default() -> Self {
        // One request replenished every 2 seconds, burst of 5
        Self {
            per_second: 2,
            burst_size: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Participant secrets, loaded from `PARTICIPANT_SECRETS`
    pub credentials: CredentialStore,
    /// Register every configured participant at startup
    pub seed_on_startup: bool,
    pub rate_limit: RateLimit,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{}'", raw))?,
            Err(_) => 8080,
        };

        let credentials = match env::var("PARTICIPANT_SECRETS") {
            Ok(raw) => {
                CredentialStore::from_json(&raw).context("Invalid PARTICIPANT_SECRETS")?
            }
            Err(_) => CredentialStore::default(),
        };

        let seed_on_startup = env::var("SEED_ON_STARTUP")
            .map(|raw| parse_flag(&raw))
            .unwrap_or(true);

        Ok(Self {
            database_url,
            port,
            credentials,
            seed_on_startup,
            rate_limit: RateLimit::default(),
        })
    }

    /// Database URL with the password masked, for logging
    pub fn redacted_database_url(&self) -> String {
        redact_url(&self.database_url)
    }
}

fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((userinfo, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
        None => url.to_string(),
    }
}
