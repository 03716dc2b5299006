use std::{io, time::Instant};

use clap::Args;
use humanize_duration::{Truncate, prelude::DurationExt};
use packopt::{calculation::Calculation, slip::PackingSlip};

#[derive(Debug, Args)]
pub(crate) struct CalculateArgs {
    /// Number of items ordered
    #[arg(long, allow_negative_numbers = true)]
    amount: i64,

    /// Comma-separated pack sizes
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        default_value = "250,500,1000,2000,5000"
    )]
    sizes: Vec<i64>,
}

pub(crate) fn run(args: &CalculateArgs) -> Result<(), String> {
    let start = Instant::now();

    let calculation = Calculation::solve(args.amount, &args.sizes)
        .map_err(|error| format!("failed to calculate packs: {error}"))?;

    let elapsed = start.elapsed();

    PackingSlip::new(&calculation)
        .write_to(io::stdout().lock())
        .map_err(|error| format!("failed to print packing slip: {error}"))?;

    println!("Solved in {}", elapsed.human(Truncate::Nano));

    Ok(())
}
