use std::{sync::OnceLock, time::Duration};

use color_eyre::eyre::{eyre, Result};

pub static REQWEST: OnceLock<reqwest::Client> = OnceLock::new();

pub fn init_reqwest_client(timeout: Option<Duration>) -> Result<()> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    REQWEST
        .set(builder.build()?)
        .map_err(|_| eyre!("reqwest client already initialised"))
}

/// Falls back to a default client when startup never initialised one, e.g. in tests
pub fn get_reqwest_client() -> &'static reqwest::Client {
    REQWEST.get_or_init(reqwest::Client::new)
}
