use std::{env, net::SocketAddr, time::Duration};

use color_eyre::eyre::{eyre, Result, WrapErr};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_FORMS: usize = 1024;

/// Everything read from the environment at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub places_url: String,
    pub bind_addr: SocketAddr,
    pub places_timeout: Option<Duration>,
    pub max_forms: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let places_url = lookup("NEARBY_PLACES_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(eyre!("NEARBY_PLACES_URL must be set"))?;
        let bind_addr = lookup("NEARBY_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .wrap_err("NEARBY_BIND_ADDR is not a socket address")?;
        let places_timeout = lookup("NEARBY_PLACES_TIMEOUT_SECS")
            .map(|secs| secs.parse::<u64>())
            .transpose()
            .wrap_err("NEARBY_PLACES_TIMEOUT_SECS is not a whole number of seconds")?
            .map(Duration::from_secs);
        let max_forms = match lookup("NEARBY_MAX_FORMS") {
            Some(max) => max
                .parse::<usize>()
                .ok()
                .filter(|max| *max > 0)
                .ok_or(eyre!("NEARBY_MAX_FORMS must be a positive number"))?,
            None => DEFAULT_MAX_FORMS,
        };
        Ok(Config {
            places_url,
            bind_addr,
            places_timeout,
            max_forms,
        })
    }
}
