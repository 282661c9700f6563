use clap::Args;
use scolarite_app::database::{DEFAULT_ADMIN_EMAIL, Store, ensure_schema, seed_default_admin};

use crate::cli::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct SeedAdminArgs {
    #[command(flatten)]
    store: StoreArgs,
}

pub(crate) async fn run(args: SeedAdminArgs) -> Result<(), String> {
    let store = Store::connect(&args.store.settings())
        .await
        .map_err(|error| format!("failed to connect to a backend: {error}"))?;

    ensure_schema(&store)
        .await
        .map_err(|error| format!("failed to apply schema: {error}"))?;

    seed_default_admin(&store)
        .await
        .map_err(|error| format!("failed to seed admin: {error}"))?;

    println!("admin account present: {DEFAULT_ADMIN_EMAIL}");

    Ok(())
}
