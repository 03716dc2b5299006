use clap::Args;
use packopt_app::domain::packs::PackSizesService;

use crate::cli::{DatabaseArgs, format_sizes};

#[derive(Debug, Args)]
pub(crate) struct SetPacksArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Comma-separated pack sizes, e.g. 250,500,1000
    #[arg(long, value_delimiter = ',', required = true)]
    sizes: Vec<u32>,
}

pub(crate) async fn run(args: SetPacksArgs) -> Result<(), String> {
    if args.sizes.contains(&0) {
        return Err("pack sizes must be positive".to_string());
    }

    let service = args.database.pack_sizes().await?;

    let stored = service
        .replace_sizes(args.sizes)
        .await
        .map_err(|error| format!("failed to replace pack sizes: {error}"))?;

    println!("sizes: {}", format_sizes(&stored));

    Ok(())
}
