use clap::{Args, Parser, Subcommand};
use packopt_app::{
    database::{self, Db},
    domain::packs::PgPackSizesService,
};

mod calculate;
mod packs;

#[derive(Debug, Parser)]
#[command(name = "packopt-app", about = "Packopt CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Inspect or change the configured pack sizes
    Packs(packs::PacksCommand),

    /// Pack an order offline and print the result
    Calculate(calculate::CalculateArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Packs(command) => packs::run(command).await,
            Commands::Calculate(args) => calculate::run(&args),
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    /// Connect, migrate and build the pack size store.
    pub(crate) async fn pack_sizes(&self) -> Result<PgPackSizesService, String> {
        let pool = database::connect(&self.database_url)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        database::migrate(&pool)
            .await
            .map_err(|error| format!("failed to migrate database: {error}"))?;

        Ok(PgPackSizesService::new(Db::new(pool)))
    }
}

pub(crate) fn format_sizes(sizes: &[u32]) -> String {
    if sizes.is_empty() {
        return "(none)".to_string();
    }

    sizes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
