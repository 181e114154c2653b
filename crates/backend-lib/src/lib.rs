// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the `hrdesk` authentication server.

pub mod config;
pub mod accounts;
pub mod auth;
pub mod delivery;
pub mod error;
pub mod metrics;
pub mod validation;
pub mod handlers;
pub mod router;

use std::sync::Arc;

use crate::accounts::{AccountStore, FlatFileAccounts};
use crate::auth::{AuthService, DefaultAuth};
use crate::config::Settings;
use crate::delivery::{CodeDelivery, ConsoleDelivery};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state over an account store and delivery
    /// channel
    pub fn new(
        store: Arc<dyn AccountStore>,
        delivery: Arc<dyn CodeDelivery>,
        settings: Settings,
    ) -> Self {
        let auth = Arc::new(DefaultAuth::new(store, delivery, settings.clone()));

        Self {
            auth,
            settings: Arc::new(settings),
        }
    }

    /// Create application state with the flat-file store and console code
    /// delivery
    pub fn new_default(settings: Settings) -> anyhow::Result<Self> {
        let store = Arc::new(FlatFileAccounts::new(&settings.data_dir)?);
        Ok(Self::new(store, Arc::new(ConsoleDelivery), settings))
    }
}
