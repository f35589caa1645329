//! Interactive menu loop.
//!
//! Generic over its input and output so tests can script a whole session.

use crate::render;
use chrono::Local;
use pillpilot_core::{Error, MedicationTracker, MedicineId, NewMedicine, Result, ScheduledTime};
use std::io::{BufRead, Write};

/// What the loop should do after handling one menu choice
enum Flow {
    Continue,
    Exit,
}

pub struct Session<R, W> {
    tracker: MedicationTracker,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(tracker: MedicationTracker, input: R, out: W) -> Self {
        Self {
            tracker,
            input,
            out,
        }
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        self.banner()?;
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Enter your choice (0-9): ")? else {
                break;
            };

            match self.dispatch(choice.trim())? {
                Flow::Continue => {}
                Flow::Exit => break,
            }
        }
        writeln!(self.out, "\nThank you for using PillPilot!")?;
        writeln!(self.out, "Stay healthy and remember to take your meds on time!")?;
        Ok(())
    }

    fn dispatch(&mut self, choice: &str) -> Result<Flow> {
        match choice {
            "1" => self.add_medicine()?,
            "2" => render::medicine_table(
                &mut self.out,
                self.tracker.medicines(),
                self.tracker.medicine_count(),
            )?,
            "3" => render::schedule_table(&mut self.out, &self.tracker.schedule())?,
            "4" => self.mark(true)?,
            "5" => self.mark(false)?,
            "6" => render::history_table(
                &mut self.out,
                self.tracker.history(),
                self.tracker.history_len(),
            )?,
            "7" => {
                let stats = self.tracker.daily_statistics(&Local::now());
                render::statistics(&mut self.out, &stats)?
            }
            "8" => self.search()?,
            "9" => self.delete()?,
            "0" => return Ok(Flow::Exit),
            other => {
                tracing::debug!("Ignoring menu choice {:?}", other);
                writeln!(
                    self.out,
                    "\n✗ Invalid choice! Please enter a number from 0-9 and try again."
                )?;
            }
        }
        Ok(Flow::Continue)
    }

    fn banner(&mut self) -> Result<()> {
        writeln!(self.out, "------------------------------------------")?;
        writeln!(self.out, "|       PILLPILOT - MEDICATION TRACKER     |")?;
        writeln!(self.out, "------------------------------------------")?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out, "\n========== MAIN MENU ==========")?;
        writeln!(self.out, "1. Add New Medicine")?;
        writeln!(self.out, "2. View All Medicines")?;
        writeln!(self.out, "3. View Today's Schedule")?;
        writeln!(self.out, "4. Mark Medicine as Taken")?;
        writeln!(self.out, "5. Mark Medicine as Missed")?;
        writeln!(self.out, "6. View Medication History")?;
        writeln!(self.out, "7. View Today's Statistics")?;
        writeln!(self.out, "8. Search Medicine by ID")?;
        writeln!(self.out, "9. Delete Medicine")?;
        writeln!(self.out, "0. Exit Program")?;
        writeln!(self.out, "===============================")?;
        Ok(())
    }

    /// Print `label` and read one line; `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt_id(&mut self, label: &str) -> Result<Option<MedicineId>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };
        match raw.trim().parse::<MedicineId>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.out, "\n✗ {:?} is not a valid medicine ID.", raw.trim())?;
                Ok(None)
            }
        }
    }

    fn add_medicine(&mut self) -> Result<()> {
        writeln!(self.out, "\n--- Adding New Medicine ---")?;
        let Some(name) = self.prompt("Enter medicine name: ")? else {
            return Ok(());
        };
        let name = name.trim().to_string();
        if name.is_empty() {
            writeln!(self.out, "\n✗ Medicine name cannot be empty.")?;
            return Ok(());
        }
        let Some(dosage) = self.prompt("Enter dosage (e.g., 500mg, 1 tablet): ")? else {
            return Ok(());
        };
        let Some(time) = self.prompt("Enter time (HH:MM format, e.g., 08:30): ")? else {
            return Ok(());
        };
        let time = match time.parse::<ScheduledTime>() {
            Ok(time) => time,
            Err(e) => {
                writeln!(self.out, "\n✗ {}", e)?;
                return Ok(());
            }
        };
        let Some(instructions) = self.prompt("Enter instructions: ")? else {
            return Ok(());
        };

        let fields = NewMedicine {
            name,
            dosage: dosage.trim().to_string(),
            time,
            instructions: instructions.trim().to_string(),
        };

        match self.tracker.add_medicine(fields) {
            Ok(med) => writeln!(
                self.out,
                "\n✓ Medicine added successfully! ID: {}",
                med.id
            )?,
            Err(Error::PartiallyAdded { id, source }) => {
                writeln!(self.out, "\n⚠ Medicine saved with ID {}, but {}.", id, source)?;
                writeln!(self.out, "  It will not appear in today's schedule.")?;
            }
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn mark(&mut self, taken: bool) -> Result<()> {
        let Some(id) = self.prompt_id("\nEnter medicine ID: ")? else {
            return Ok(());
        };
        let outcome = if taken {
            self.tracker.mark_taken(id).map(|_| "taken")
        } else {
            self.tracker.mark_missed(id).map(|_| "missed")
        };
        match outcome {
            Ok(status) => writeln!(self.out, "\n✓ Marked as {}!", status)?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        let Some(id) = self.prompt_id("\nEnter medicine ID to search: ")? else {
            return Ok(());
        };
        match self.tracker.find_medicine(id) {
            Ok(med) => render::medicine_details(&mut self.out, med)?,
            Err(e) => {
                self.report(e)?;
                writeln!(
                    self.out,
                    "  Double-check the ID or use option 2 to list all medicines."
                )?;
            }
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let Some(id) = self.prompt_id("\nEnter medicine ID to delete: ")? else {
            return Ok(());
        };
        let summary = match self.tracker.find_medicine(id) {
            Ok(med) => format!("{} ({})", med.name, med.dosage),
            Err(e) => return self.report(e),
        };

        writeln!(self.out, "Found medicine: {}", summary)?;
        let confirm = self
            .prompt("Are you sure you want to delete this? (y/n): ")?
            .unwrap_or_default();
        if !confirm.trim().eq_ignore_ascii_case("y") {
            writeln!(self.out, "\n✗ Deletion cancelled.")?;
            return Ok(());
        }

        match self.tracker.remove_medicine(id) {
            Ok(_) => writeln!(self.out, "\n✓ Medicine ID {} deleted successfully!", id)?,
            Err(e) => self.report(e)?,
        }
        Ok(())
    }

    /// Show a recoverable core error and return to the menu
    ///
    /// IO failures are not recoverable and propagate.
    fn report(&mut self, error: Error) -> Result<()> {
        match error {
            Error::Io(e) => Err(Error::Io(e)),
            other => {
                tracing::debug!("Operation failed: {:?}", other);
                writeln!(self.out, "\n✗ {}", other)?;
                Ok(())
            }
        }
    }
}
