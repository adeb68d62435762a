//! Student record command handlers

use super::open_reconciler;
use crate::args::StudentSubcommand;
use coursereg::config::Config;
use coursereg::{info, EnrollmentStore};

/// Dispatch student subcommands
///
/// # Errors
/// Returns a message if the store cannot be opened or the student is unknown
pub fn run(subcommand: StudentSubcommand, config: &Config) -> Result<(), String> {
    let reconciler = open_reconciler(config)?;

    match subcommand {
        StudentSubcommand::Register { student_id } => {
            reconciler
                .store()
                .register_student(&student_id)
                .map_err(|e| format!("✗ {e}"))?;
            info!("Registered student {student_id}");
            println!("✓ Registered student {student_id}");
        }
        StudentSubcommand::Show { student_id } => {
            let enrolled = reconciler
                .enrolled_courses(&student_id)
                .map_err(|e| format!("✗ {e}"))?;

            println!("\n=== {student_id} ===\n");
            if enrolled.records.is_empty() {
                println!("No enrolled courses");
            }
            for record in &enrolled.records {
                println!(
                    "{:<8} {:<36} {:>2} credits  (enrolled {})",
                    record.course.code,
                    record.course.name,
                    record.course.credits,
                    record.enrolled_date.format("%Y-%m-%d")
                );
            }
            println!(
                "\nTotal: {}/{} credits",
                enrolled.total_credits,
                reconciler.credit_ceiling()
            );
        }
        StudentSubcommand::List => {
            let ids = reconciler
                .store()
                .student_ids()
                .map_err(|e| format!("✗ {e}"))?;
            if ids.is_empty() {
                println!("No students registered");
            }
            for id in ids {
                println!("{id}");
            }
        }
    }
    Ok(())
}
