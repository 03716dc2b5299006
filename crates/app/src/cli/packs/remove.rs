use clap::Args;
use packopt_app::domain::packs::PackSizesService;

use crate::cli::{DatabaseArgs, format_sizes};

#[derive(Debug, Args)]
pub(crate) struct RemovePackArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Pack size to remove
    #[arg(long)]
    size: u32,
}

pub(crate) async fn run(args: RemovePackArgs) -> Result<(), String> {
    let service = args.database.pack_sizes().await?;

    let remaining = service
        .remove_size(args.size)
        .await
        .map_err(|error| format!("failed to remove pack size {}: {error}", args.size))?;

    println!("sizes: {}", format_sizes(&remaining));

    Ok(())
}
