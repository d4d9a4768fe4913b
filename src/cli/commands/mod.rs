//! Subcommand arguments and handlers

pub mod subscriptions;
pub mod users;

use anyhow::Result;
use clap::Args;
use is_terminal::IsTerminal;
use std::time::Duration;

use crate::api::constants::MAX_BATCH_SIZE;
use crate::api::{BatchConfig, BatchExecutor, ClientManager, GraphClient, Operation, RetryPolicy};
use crate::config::{Credentials, GraphConfig};
use crate::ui::{prompt_confirmation, ConsoleReporter};

/// Application credentials; each flag falls back to an `ENTRA_*` variable (also read from `.env`)
#[derive(Args, Debug, Clone)]
pub struct CredentialArgs {
    /// Directory (tenant) id
    #[arg(long, env = "ENTRA_TENANT_ID")]
    pub tenant_id: Option<String>,
    /// Application (client) id
    #[arg(long, env = "ENTRA_CLIENT_ID")]
    pub client_id: Option<String>,
    /// Client secret
    #[arg(long, env = "ENTRA_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,
    /// Identity platform authority
    #[arg(long, env = "ENTRA_LOGIN_BASE_URL", hide = true)]
    pub login_base_url: Option<String>,
    /// Graph version root
    #[arg(long, env = "ENTRA_GRAPH_BASE_URL", hide = true)]
    pub graph_base_url: Option<String>,
}

impl CredentialArgs {
    pub fn to_config(&self) -> GraphConfig {
        let credentials = Credentials::new(
            self.tenant_id.clone().unwrap_or_default(),
            self.client_id.clone().unwrap_or_default(),
            self.client_secret.clone().unwrap_or_default(),
        );

        let mut config = GraphConfig::new(credentials);
        if let Some(url) = &self.login_base_url {
            config = config.with_login_base_url(url.clone());
        }
        if let Some(url) = &self.graph_base_url {
            config = config.with_graph_base_url(url.clone());
        }
        config
    }
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Requests per $batch envelope (Graph allows at most 20)
    #[arg(long, default_value_t = MAX_BATCH_SIZE as u64, value_parser = clap::value_parser!(u64).range(1..=MAX_BATCH_SIZE as u64))]
    pub batch_size: u64,
    /// Seconds to wait before retrying a failed batch
    #[arg(long, default_value_t = 5)]
    pub retry_delay: u64,
    /// Attempts per batch, including the first
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,
}

impl BatchArgs {
    pub fn to_config(&self) -> Result<BatchConfig> {
        let retry = RetryPolicy::fixed(self.max_attempts, Duration::from_secs(self.retry_delay));
        BatchConfig::new(self.batch_size as usize, retry)
    }
}

/// Authenticate with the given credentials
pub async fn connect(credentials: &CredentialArgs) -> Result<GraphClient> {
    let manager = ClientManager::new(credentials.to_config());
    manager.authenticate().await
}

/// Ask before destructive work, unless told not to or not attached to a terminal
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes || !std::io::stdin().is_terminal() {
        return Ok(true);
    }
    prompt_confirmation(prompt, false)
}

/// Execute operations with console reporting and print the final tally
pub async fn run_batch(
    client: &GraphClient,
    batch: &BatchArgs,
    operations: &[Operation],
    mut reporter: ConsoleReporter,
) -> Result<()> {
    let executor = BatchExecutor::new(client, batch.to_config()?);
    let report = executor.execute(operations, &mut reporter).await;
    reporter.print_summary(&report.summary());
    Ok(())
}
