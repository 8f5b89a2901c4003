//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `STOREFRONT_BIND`
    pub bind_addr: SocketAddr,
    /// `STOREFRONT_PUBLIC_DIR`
    pub public_dir: PathBuf,
    /// `STOREFRONT_SEED_FILE`
    pub seed_file: Option<PathBuf>,
    /// `STOREFRONT_BODY_LIMIT`, in bytes.
    pub body_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            seed_file: None,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. Absent keys fall back to defaults;
    /// present but unparsable values are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        match lookup("STOREFRONT_BIND") {
            Some(raw) => {
                config.bind_addr = raw
                    .parse()
                    .with_context(|| format!("STOREFRONT_BIND is not a socket address: {raw:?}"))?;
            }
            None => tracing::info!("STOREFRONT_BIND not set; using {DEFAULT_BIND}"),
        }

        if let Some(raw) = lookup("STOREFRONT_PUBLIC_DIR") {
            config.public_dir = PathBuf::from(raw);
        }

        config.seed_file = lookup("STOREFRONT_SEED_FILE")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);
        if config.seed_file.is_none() {
            tracing::warn!("STOREFRONT_SEED_FILE not set; starting with empty collections");
        }

        if let Some(raw) = lookup("STOREFRONT_BODY_LIMIT") {
            config.body_limit = raw
                .parse()
                .with_context(|| format!("STOREFRONT_BODY_LIMIT is not a byte count: {raw:?}"))?;
        }

        Ok(config)
    }
}
