//! Fixed-width text rendering for the interactive menu.

use chrono::Local;
use pillpilot_core::{DailyStatistics, HistoryEntry, Medicine};
use std::io::{self, Write};

const RULE: &str =
    "--------------------------------------------------------------------------------";

pub fn medicine_table<'a, W: Write>(
    out: &mut W,
    medicines: impl IntoIterator<Item = &'a Medicine>,
    total: usize,
) -> io::Result<()> {
    writeln!(out, "\n=== ALL MEDICINES ===")?;
    writeln!(
        out,
        "{:<5} {:<20} {:<10} {:<6} {:<30}",
        "ID", "Name", "Dosage", "Time", "Instructions"
    )?;
    writeln!(out, "{}", RULE)?;
    for med in medicines {
        writeln!(
            out,
            "{:<5} {:<20} {:<10} {:<6} {:<30}",
            med.id,
            med.name,
            med.dosage,
            med.time.to_string(),
            med.instructions
        )?;
    }
    writeln!(out, "\nTotal Medicines: {}", total)
}

pub fn schedule_table<W: Write>(out: &mut W, schedule: &[Medicine]) -> io::Result<()> {
    writeln!(out, "\n=== TODAY'S SCHEDULE (Sorted by Time) ===")?;
    writeln!(
        out,
        "{:<6} {:<20} {:<10} {:<30}",
        "Time", "Medicine", "Dosage", "Instructions"
    )?;
    writeln!(out, "{}", RULE)?;
    for med in schedule {
        writeln!(
            out,
            "{:<6} {:<20} {:<10} {:<30}",
            med.time.to_string(),
            med.name,
            med.dosage,
            med.instructions
        )?;
    }
    if schedule.is_empty() {
        writeln!(out, "Nothing scheduled.")?;
    }
    Ok(())
}

pub fn history_table<'a, W: Write>(
    out: &mut W,
    entries: impl IntoIterator<Item = &'a HistoryEntry>,
    total: usize,
) -> io::Result<()> {
    writeln!(out, "\n=== MEDICATION HISTORY ===")?;
    writeln!(out, "{:<20} {:<10} {:<30}", "Medicine", "Status", "Timestamp")?;
    writeln!(out, "{}", RULE)?;
    for entry in entries {
        let local = entry.recorded_at.with_timezone(&Local);
        writeln!(
            out,
            "{:<20} {:<10} {:<30}",
            entry.medicine_name,
            entry.status.to_string(),
            local.format("%Y-%m-%d %H:%M:%S").to_string()
        )?;
    }
    writeln!(out, "\nTotal Entries: {}", total)?;
    if total == 0 {
        writeln!(out, "No medication history recorded yet.")?;
    }
    Ok(())
}

pub fn statistics<W: Write>(out: &mut W, stats: &DailyStatistics) -> io::Result<()> {
    writeln!(out, "\n=== TODAY'S MEDICATION STATISTICS ===")?;
    writeln!(out, "Total Medicines: {}", stats.total_medicines)?;
    writeln!(out, "Medicines Taken Today: {}", stats.taken)?;
    writeln!(out, "Medicines Missed Today: {}", stats.missed)?;

    match (stats.adherence(), stats.band()) {
        (Some(rate), Some(band)) => {
            writeln!(out, "Today's Adherence Rate: {:.1}%", rate)?;
            writeln!(out, "{}", band.message())
        }
        _ => writeln!(out, "No medication taken or missed today yet."),
    }
}

pub fn medicine_details<W: Write>(out: &mut W, med: &Medicine) -> io::Result<()> {
    writeln!(out, "\n=== MEDICINE FOUND ===")?;
    writeln!(out, "ID: {}", med.id)?;
    writeln!(out, "Name: {}", med.name)?;
    writeln!(out, "Dosage: {}", med.dosage)?;
    writeln!(out, "Scheduled Time: {}", med.time)?;
    writeln!(out, "Instructions: {}", med.instructions)?;
    writeln!(
        out,
        "Priority Value: {} minutes from midnight",
        med.priority()
    )
}
