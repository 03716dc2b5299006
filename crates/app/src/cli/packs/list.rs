use clap::Args;
use packopt_app::domain::packs::PackSizesService;

use crate::cli::{DatabaseArgs, format_sizes};

#[derive(Debug, Args)]
pub(crate) struct ListPacksArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ListPacksArgs) -> Result<(), String> {
    let service = args.database.pack_sizes().await?;

    let version = service
        .current_version()
        .await
        .map_err(|error| format!("failed to read pack set version: {error}"))?;

    let sizes = service
        .active_sizes()
        .await
        .map_err(|error| format!("failed to list pack sizes: {error}"))?;

    println!("version: {version}");
    println!("sizes: {}", format_sizes(&sizes));

    Ok(())
}
