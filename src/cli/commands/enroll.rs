//! Enrollment command handlers: batch reconcile plus single add/drop

use super::open_reconciler;
use coursereg::config::Config;
use coursereg::{
    verbose, warn, EnrollmentStore, ReconcileOutcome, ReconcileReport, Reconciler, SelectionSet,
};
use std::collections::BTreeSet;

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Reconcile a student's enrollment to `select`, or to the current
/// enrollment with each code in `toggle` flipped
///
/// # Errors
/// Returns a message if the student is unknown, a toggle is refused, or
/// nothing could be applied
pub fn run(
    student_id: &str,
    select: &[String],
    toggle: &[String],
    config: &Config,
) -> Result<(), String> {
    let reconciler = open_reconciler(config)?;
    let enrolled = reconciler
        .store()
        .get_enrolled(student_id)
        .map_err(|e| format!("✗ {e}"))?;

    let selection = if toggle.is_empty() {
        SelectionSet::from_codes(select.iter().map(|c| normalize(c)))
    } else {
        toggled_selection(&reconciler, &enrolled, toggle)?
    };

    let credits = selection.total_credits(reconciler.catalog());
    verbose!(
        "Saving selection for {student_id}: {} course(s), {credits} credits",
        selection.len()
    );
    for line in preview(&selection, &enrolled) {
        verbose!("{line}");
    }
    if credits > reconciler.credit_ceiling() {
        warn!(
            "Selection for {student_id} totals {credits} credits, over the {} credit ceiling",
            reconciler.credit_ceiling()
        );
    }

    let report = reconciler
        .reconcile(student_id, &selection)
        .map_err(|e| format!("✗ {e}"))?;

    print_report(&report);

    if report.outcome() == ReconcileOutcome::Failed {
        return Err(format!(
            "✗ Enrollment failed for all {} course(s)",
            report.attempted()
        ));
    }
    Ok(())
}

/// Flip each code in `toggle` starting from the enrolled set
///
/// # Errors
/// Returns a message naming the first code that is unknown or would go over
/// the credit ceiling
pub fn toggled_selection<S: EnrollmentStore>(
    reconciler: &Reconciler<S>,
    enrolled: &BTreeSet<String>,
    toggle: &[String],
) -> Result<SelectionSet, String> {
    toggle
        .iter()
        .try_fold(SelectionSet::from(enrolled.clone()), |selection, code| {
            let code = normalize(code);
            selection
                .toggled(&code, reconciler.catalog(), reconciler.credit_ceiling())
                .map_err(|e| format!("✗ Cannot select {code}: {e}"))
        })
}

/// One `CODE: status` line per course that is enrolled or selected
#[must_use]
pub fn preview(selection: &SelectionSet, enrolled: &BTreeSet<String>) -> Vec<String> {
    enrolled
        .union(selection.codes())
        .map(|code| format!("  {code}: {}", selection.status_of(code, enrolled)))
        .collect()
}

/// Human-readable summary of a reconcile report
#[must_use]
pub fn summarize(report: &ReconcileReport) -> Vec<String> {
    let mut lines = Vec::new();
    match report.outcome() {
        ReconcileOutcome::Succeeded if report.attempted() == 0 => {
            lines.push("✓ No changes to save".to_string());
        }
        ReconcileOutcome::Succeeded => {
            lines.push(format!(
                "✓ {} courses updated successfully!",
                report.succeeded()
            ));
        }
        ReconcileOutcome::PartiallySucceeded => {
            lines.push(format!(
                "✓ {} courses updated successfully, {} failed:",
                report.succeeded(),
                report.failures.len()
            ));
        }
        ReconcileOutcome::Failed => {
            lines.push("✗ No courses could be updated:".to_string());
        }
    }
    lines.extend(report.failures.iter().map(|f| format!("  ✗ {f}")));
    lines
}

fn print_report(report: &ReconcileReport) {
    for code in &report.enrolled {
        verbose!("  + {code}");
    }
    for code in &report.dropped {
        verbose!("  - {code}");
    }
    for line in summarize(report) {
        println!("{line}");
    }
    println!("Total credits: {}", report.total_credits);
}

/// Enroll a student in one course
///
/// # Errors
/// Returns a message describing why the enrollment was refused
pub fn add(student_id: &str, code: &str, config: &Config) -> Result<(), String> {
    let reconciler = open_reconciler(config)?;
    let code = normalize(code);
    let record = reconciler
        .enroll(student_id, &code)
        .map_err(|e| format!("✗ {e}"))?;
    println!(
        "✓ Enrolled {student_id} in {} ({})",
        record.course.code, record.course.name
    );
    Ok(())
}

/// Drop one course for a student
///
/// # Errors
/// Returns a message describing why the drop was refused
pub fn drop_course(student_id: &str, code: &str, config: &Config) -> Result<(), String> {
    let reconciler = open_reconciler(config)?;
    let code = normalize(code);
    let remaining = reconciler
        .drop_course(student_id, &code)
        .map_err(|e| format!("✗ {e}"))?;
    println!("✓ Dropped {code} for {student_id} ({remaining} credits remaining)");
    Ok(())
}
