use std::io;

use crate::render::currency::format_plain;
use crate::types::{MortgageReport, Schedule};
use crate::MortgageResult;

/// Column order of every schedule CSV.
pub const CSV_HEADER: [&str; 4] = ["Month", "Interest", "Principal", "Balance"];

/// Write the schedule as CSV: header row, then one row per month with
/// money to two decimals.
pub fn write_schedule_csv<W: io::Write>(writer: W, schedule: &Schedule) -> MortgageResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for entry in schedule.entries() {
        wtr.write_record([
            entry.month.to_string(),
            format_plain(entry.interest),
            format_plain(entry.principal),
            format_plain(entry.balance),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render the report's schedule into an in-memory CSV document.
pub fn render_csv(report: &MortgageReport) -> MortgageResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_schedule_csv(&mut buf, &report.schedule)?;
    Ok(buf)
}
