//! Process-owned collaborators, built once and shared by every request.

use std::path::PathBuf;

use anyhow::Context;

use storefront_auth::Authenticator;
use storefront_infra::{SeedData, StoreUserDirectory, Stores};

use crate::config::{AppConfig, DEFAULT_BODY_LIMIT, DEFAULT_PUBLIC_DIR};

#[derive(Debug, Clone)]
pub struct AppServices {
    pub stores: Stores,
    pub authenticator: Authenticator<StoreUserDirectory>,
    pub public_dir: PathBuf,
    pub body_limit: usize,
}

impl AppServices {
    pub fn new(stores: Stores, public_dir: PathBuf, body_limit: usize) -> Self {
        let directory = StoreUserDirectory::new(stores.users.clone());
        Self {
            stores,
            authenticator: Authenticator::new(directory),
            public_dir,
            body_limit,
        }
    }

    /// Empty in-memory collections with default limits (dev/test).
    pub fn in_memory() -> Self {
        Self::new(
            Stores::in_memory(),
            PathBuf::from(DEFAULT_PUBLIC_DIR),
            DEFAULT_BODY_LIMIT,
        )
    }

    /// In-memory collections, seeded from `config.seed_file` when set.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let services = Self::new(
            Stores::in_memory(),
            config.public_dir.clone(),
            config.body_limit,
        );

        if let Some(path) = &config.seed_file {
            let report = SeedData::from_path(path)
                .and_then(|seed| seed.apply(&services.stores))
                .with_context(|| format!("failed to seed from {}", path.display()))?;
            tracing::info!(
                users = report.users,
                products = report.products,
                seed_file = %path.display(),
                "collections seeded"
            );
        }

        Ok(services)
    }

    pub fn directory(&self) -> &StoreUserDirectory {
        self.authenticator.directory()
    }
}
