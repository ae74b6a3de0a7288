pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{Credential, RateProvider, Session};
use crate::providers::ExchangeRateApiProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        from: String,
        to: String,
        amount: f64,
    },
    History,
    Session,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        base_url = %config.provider.base_url,
        version = %config.provider.version,
        "Loaded config"
    );

    let credential = Credential::new(config.api_key.clone());
    let provider: Arc<dyn RateProvider> =
        Arc::new(ExchangeRateApiProvider::from_config(&config.provider)?);

    match command {
        AppCommand::Convert { from, to, amount } => {
            cli::convert::run(provider.as_ref(), credential, &from, &to, amount).await
        }
        AppCommand::History => cli::history::run(&config.history_path()?),
        AppCommand::Session => {
            let history_path = config.history_path()?;
            let mut session = Session::new(provider, credential);
            cli::session::run(&mut session, &config.currencies, &history_path).await
        }
    }
}
