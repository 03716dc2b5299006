//! Packing Slip
//!
//! Console rendering of a [`Calculation`]: one row per pack size, largest first, followed by
//! the order totals.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::calculation::Calculation;

/// Errors that can occur when writing a packing slip.
#[derive(Debug, Error)]
pub enum SlipError {
    /// The output could not be written to.
    #[error("failed to write packing slip")]
    IO,
}

/// A printable view over a [`Calculation`].
#[derive(Debug, Clone, Copy)]
pub struct PackingSlip<'a> {
    calculation: &'a Calculation,
}

impl<'a> PackingSlip<'a> {
    /// Slip for `calculation`.
    pub fn new(calculation: &'a Calculation) -> Self {
        Self { calculation }
    }

    /// Prints the slip.
    ///
    /// # Errors
    ///
    /// Returns an error if `out` cannot be written to.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), SlipError> {
        let mut builder = Builder::default();

        builder.push_record(["Pack Size", "Packs", "Items"]);

        for (size, count) in self.calculation.breakdown.iter_descending() {
            builder.push_record([
                size.to_string(),
                count.to_string(),
                size.saturating_mul(count).to_string(),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(0..3), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| SlipError::IO)?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), SlipError> {
        let lines = [
            (" Requested:", self.calculation.amount.to_string()),
            (" Shipped:", self.calculation.total_items.to_string()),
            (" Overage:", self.calculation.overage.to_string()),
            (" Packs:", self.calculation.total_packs.to_string()),
        ];

        let label_width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or_default();
        let value_width = lines.iter().map(|(_, value)| value.len()).max().unwrap_or_default();

        for (label, value) in &lines {
            writeln!(out, "{label:<label_width$} {value:>value_width$}")
                .map_err(|_err| SlipError::IO)?;
        }

        writeln!(out).map_err(|_err| SlipError::IO)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn write_to_lists_sizes_largest_first() -> TestResult {
        let calculation = Calculation::solve(12_001, &[250, 500, 1_000, 2_000, 5_000])?;

        let mut out = Vec::new();
        PackingSlip::new(&calculation).write_to(&mut out)?;

        let output = String::from_utf8(out)?;

        let five_thousand = output.find("5000").ok_or("missing 5000 row")?;
        let two_thousand = output.find("2000").ok_or("missing 2000 row")?;

        assert!(five_thousand < two_thousand, "rows should be descending");
        assert!(output.contains("10000"), "5000 x 2 should show 10000 items");
        assert!(output.contains("Overage:"));
        assert!(output.contains("249"));

        Ok(())
    }

    #[test]
    fn write_to_renders_empty_calculation() -> TestResult {
        let calculation = Calculation::solve(0, &[250])?;

        let mut out = Vec::new();
        PackingSlip::new(&calculation).write_to(&mut out)?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("Pack Size"));
        assert!(output.contains("Shipped:"));

        Ok(())
    }
}
