use anyhow::Result;
use clap::Args;

use super::{confirm, connect, run_batch, BatchArgs, CredentialArgs};
use crate::api::constants::collections;
use crate::api::ListQuery;
use crate::records;
use crate::ui::ConsoleReporter;

#[derive(Args, Debug)]
pub struct DeleteSubscriptionsArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,
    #[command(flatten)]
    pub batch: BatchArgs,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn delete_subscriptions_command(args: DeleteSubscriptionsArgs) -> Result<()> {
    let client = connect(&args.credentials).await?;

    let subscriptions = client
        .list_records(&ListQuery::new(collections::SUBSCRIPTIONS))
        .await?;
    println!("🔍 Found {} subscriptions", subscriptions.len());

    if subscriptions.is_empty() {
        println!("✅ No subscriptions to delete.");
        return Ok(());
    }

    if !confirm(&format!("Delete {} subscriptions?", subscriptions.len()), args.yes)? {
        println!("Aborted.");
        return Ok(());
    }

    let operations = records::delete_operations(collections::SUBSCRIPTIONS, &subscriptions);
    run_batch(
        &client,
        &args.batch,
        &operations,
        ConsoleReporter::new("subscriptions", "Deleted"),
    )
    .await
}
