use clap::Args;
use scolarite_app::database::{Store, ensure_schema};

use crate::cli::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    #[command(flatten)]
    store: StoreArgs,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), String> {
    let store = Store::connect(&args.store.settings())
        .await
        .map_err(|error| format!("failed to connect to a backend: {error}"))?;

    ensure_schema(&store)
        .await
        .map_err(|error| format!("failed to apply schema: {error}"))?;

    println!("schema is up to date ({})", store.kind().as_str());

    Ok(())
}
