use crate::cli::Args;
use crate::devices::DeviceRegistry;
use anyhow::{bail, Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_address: String,
    pub request_timeout: Duration,
    pub registry: DeviceRegistry,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        if args.devices.is_empty() {
            bail!("no devices specified");
        }
        if args.request_timeout_ms == 0 {
            bail!("request timeout must be greater than zero");
        }
        let listen_address = args.address.trim().to_string();
        if listen_address.is_empty() {
            bail!("listen address must not be empty");
        }

        let registry =
            DeviceRegistry::parse(&args.devices).context("error parsing devices")?;

        Ok(Self {
            listen_address,
            request_timeout: Duration::from_millis(args.request_timeout_ms),
            registry,
        })
    }
}
