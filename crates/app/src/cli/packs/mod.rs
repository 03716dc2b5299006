use clap::{Args, Subcommand};

mod list;
mod remove;
mod set;

#[derive(Debug, Args)]
pub(crate) struct PacksCommand {
    #[command(subcommand)]
    command: PacksSubcommand,
}

#[derive(Debug, Subcommand)]
enum PacksSubcommand {
    /// Show the active pack sizes
    List(list::ListPacksArgs),

    /// Replace the active pack sizes
    Set(set::SetPacksArgs),

    /// Remove a single pack size
    Remove(remove::RemovePackArgs),
}

pub(crate) async fn run(command: PacksCommand) -> Result<(), String> {
    match command.command {
        PacksSubcommand::List(args) => list::run(args).await,
        PacksSubcommand::Set(args) => set::run(args).await,
        PacksSubcommand::Remove(args) => remove::run(args).await,
    }
}
