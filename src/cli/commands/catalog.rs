//! Catalog command handler

use super::load_catalog;
use coursereg::config::Config;
use coursereg::Course;

/// List every course, or show one course in detail
///
/// # Errors
/// Returns a message if the catalog cannot be loaded or the code is unknown
pub fn run(code: Option<&str>, config: &Config) -> Result<(), String> {
    let catalog = load_catalog(config)?;

    if let Some(code) = code {
        let course = catalog.course_by_code(code).map_err(|e| format!("✗ {e}"))?;
        print_course(course);
        return Ok(());
    }

    println!("\n=== Course Catalog ({} courses) ===\n", catalog.len());
    println!(
        "{:<8} {:<36} {:>7}  {:<24} {}",
        "Code", "Name", "Credits", "Schedule", "Room"
    );
    for course in catalog.all_courses() {
        println!(
            "{:<8} {:<36} {:>7}  {:<24} {}",
            course.code, course.name, course.credits, course.schedule, course.room
        );
    }
    Ok(())
}

fn print_course(course: &Course) {
    println!("\n=== {} ===\n", course.code);
    println!("Name:        {}", course.name);
    println!("Credits:     {}", course.credits);
    println!("Instructor:  {}", course.instructor);
    println!("Schedule:    {}", course.schedule);
    println!("Room:        {}", course.room);
    println!("Capacity:    {}", course.capacity);
    if let Some(semester) = course.semester {
        println!("Semester:    {semester}");
    }
    if !course.description.is_empty() {
        println!("\n{}", course.description);
    }
}
