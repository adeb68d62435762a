//! Command-line interface entry point for `coursereg`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use coursereg::config::Config;
use coursereg::info;
use coursereg::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; otherwise config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Into::into)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Catalog { code } => commands::catalog::run(code.as_deref(), &config),
        Command::Student { subcommand } => commands::student::run(subcommand, &config),
        Command::Enroll {
            student_id,
            select,
            toggle,
        } => commands::enroll::run(&student_id, &select, &toggle, &config),
        Command::Add { student_id, code } => commands::enroll::add(&student_id, &code, &config),
        Command::Drop { student_id, code } => commands::enroll::drop_course(&student_id, &code, &config),
        Command::Timetable { student_id } => commands::timetable::run(&student_id, &config),
        Command::Credits { student_id, add } => {
            commands::timetable::credits(&student_id, add, &config)
        }
    };

    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
