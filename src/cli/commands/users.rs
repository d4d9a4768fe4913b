use anyhow::Result;
use clap::Args;
use colored::*;

use super::{confirm, connect, run_batch, BatchArgs, CredentialArgs};
use crate::api::constants::{collections, USER_PAGE_SIZE};
use crate::api::{Filter, ListQuery};
use crate::records::{self, TEST_USER_PREFIX};
use crate::ui::ConsoleReporter;

#[derive(Args, Debug)]
pub struct CreateUsersArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,
    #[command(flatten)]
    pub batch: BatchArgs,
    /// Domain suffix for the generated principal names
    #[arg(long, default_value = "yourdomain.onmicrosoft.com")]
    pub domain: String,
    /// Number of users to create
    #[arg(long, default_value_t = 10)]
    pub count: usize,
}

#[derive(Args, Debug)]
pub struct DeleteUsersArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,
    #[command(flatten)]
    pub batch: BatchArgs,
    /// Delete users whose userPrincipalName starts with this prefix
    #[arg(long, default_value = TEST_USER_PREFIX)]
    pub prefix: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Listing query for users whose principal name starts with `prefix`.
///
/// A blank prefix would match every user in the tenant and is rejected.
pub fn users_with_prefix(prefix: &str) -> Result<ListQuery> {
    if prefix.trim().is_empty() {
        anyhow::bail!("--prefix must not be empty");
    }

    Ok(ListQuery::new(collections::USERS)
        .with_filter(Filter::starts_with("userPrincipalName", prefix))
        .with_top(USER_PAGE_SIZE))
}

pub async fn create_users_command(args: CreateUsersArgs) -> Result<()> {
    if args.domain.trim().is_empty() {
        anyhow::bail!("--domain must not be empty");
    }

    let client = connect(&args.credentials).await?;

    let users = records::generate_users(&args.domain, args.count);
    if users.is_empty() {
        println!("✅ Nothing to create.");
        return Ok(());
    }

    println!(
        "👤 Creating {} users in {}",
        users.len().to_string().bright_green(),
        args.domain.cyan()
    );

    let operations = records::create_operations(&users)?;
    run_batch(&client, &args.batch, &operations, ConsoleReporter::new("users", "Created")).await
}

pub async fn delete_users_command(args: DeleteUsersArgs) -> Result<()> {
    let query = users_with_prefix(&args.prefix)?;
    let client = connect(&args.credentials).await?;

    let users = client.list_records(&query).await?;
    println!("🔍 Found {} users starting with '{}'", users.len(), args.prefix);

    if users.is_empty() {
        println!("✅ No users to delete.");
        return Ok(());
    }

    if !confirm(&format!("Delete {} users?", users.len()), args.yes)? {
        println!("Aborted.");
        return Ok(());
    }

    let operations = records::delete_operations(collections::USERS, &users);
    run_batch(&client, &args.batch, &operations, ConsoleReporter::new("users", "Deleted")).await
}
