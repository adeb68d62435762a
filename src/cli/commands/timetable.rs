//! Timetable and credit command handlers

use super::open_reconciler;
use coursereg::config::Config;

/// Print a student's weekly timetable
///
/// # Errors
/// Returns a message if the student is unknown
pub fn run(student_id: &str, config: &Config) -> Result<(), String> {
    let reconciler = open_reconciler(config)?;
    let timetable = reconciler
        .timetable(student_id)
        .map_err(|e| format!("✗ {e}"))?;

    println!("\n=== Timetable for {student_id} ===\n");
    print!("{timetable}");
    Ok(())
}

/// Print whether `additional` credits would fit under the ceiling
///
/// # Errors
/// Returns a message if the student is unknown
pub fn credits(student_id: &str, additional: u32, config: &Config) -> Result<(), String> {
    let reconciler = open_reconciler(config)?;
    let check = reconciler
        .credit_check(student_id, additional)
        .map_err(|e| format!("✗ {e}"))?;

    let mark = if check.can_enroll() { '✓' } else { '✗' };
    println!("{mark} {check}");
    Ok(())
}
