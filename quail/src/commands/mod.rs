mod login;
mod me;
mod post;

use anyhow::Result;
use chrono::Utc;
use quail_auth::OAuthClient;
use std::path::PathBuf;

use crate::cli::{Cli, Commands};
use crate::output::OutputFormat;
use crate::settings::{self, Settings};
use crate::token;

/// Everything a command needs, resolved from flags and the config file
pub struct Context {
    pub settings: Settings,
    pub config_path: PathBuf,
    pub api_base: String,
    pub auth_base: String,
    pub format: OutputFormat,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => settings::default_config_path()?,
        };
        let settings = Settings::load(&config_path)?;
        tracing::debug!(path = %config_path.display(), "Loaded settings");

        Ok(Self {
            settings,
            config_path,
            api_base: cli.api_base.clone(),
            auth_base: cli.auth_base.clone(),
            format: cli.format,
        })
    }

    pub fn oauth_client(&self) -> Result<OAuthClient> {
        Ok(OAuthClient::new(
            &self.auth_base,
            &self.api_base,
            self.settings.oauth.clone(),
        )?)
    }

    /// API client authenticated with a token refreshed first if needed
    pub async fn api_client(&mut self) -> Result<quail_api::Client> {
        let oauth = self.oauth_client()?;
        let tokens =
            token::ensure_fresh(&mut self.settings, &self.config_path, &oauth, Utc::now()).await;

        Ok(quail_api::Client::new(&self.api_base, &tokens.access_token))
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut ctx = Context::from_cli(&cli)?;

    match cli.command {
        Commands::Login => login::run(&mut ctx).await,
        Commands::Me => me::run(&mut ctx).await,
        Commands::Post { command } => post::run(&mut ctx, command).await,
    }
}
