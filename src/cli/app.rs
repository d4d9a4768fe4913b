use super::commands::subscriptions::DeleteSubscriptionsArgs;
use super::commands::users::{CreateUsersArgs, DeleteUsersArgs};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "graph-bulk")]
#[command(version)]
#[command(about = "Bulk create and delete test users and subscriptions through Microsoft Graph")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create numbered test users (testuser00000@<domain>, ...)
    CreateUsers(CreateUsersArgs),
    /// Delete every user whose principal name starts with a prefix
    DeleteUsers(DeleteUsersArgs),
    /// Delete every change-notification subscription
    DeleteSubscriptions(DeleteSubscriptionsArgs),
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Commands::CreateUsers(args) => super::commands::users::create_users_command(args).await,
            Commands::DeleteUsers(args) => super::commands::users::delete_users_command(args).await,
            Commands::DeleteSubscriptions(args) => {
                super::commands::subscriptions::delete_subscriptions_command(args).await
            }
        }
    }
}
