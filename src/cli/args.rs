//! CLI argument definitions for `coursereg`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use coursereg::config::ConfigOverrides;
use coursereg::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Optional configuration key to display (e.g., `level`, `credit_ceiling`, `data_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum StudentSubcommand {
    /// Create an empty enrollment record for a student.
    Register {
        /// Student ID
        #[arg(value_name = "ID")]
        student_id: String,
    },
    /// Show a student's enrolled courses and credit total.
    Show {
        /// Student ID
        #[arg(value_name = "ID")]
        student_id: String,
    },
    /// List registered student IDs.
    List,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// List the course catalog, or show one course.
    Catalog {
        /// Course code to show in detail
        #[arg(value_name = "CODE")]
        code: Option<String>,
    },
    /// Manage student records.
    Student {
        #[command(subcommand)]
        subcommand: StudentSubcommand,
    },
    /// Save a course selection: enroll new courses and drop deselected ones.
    Enroll {
        /// Student ID
        #[arg(value_name = "ID")]
        student_id: String,

        /// Course codes the student should hold afterwards (none drops everything)
        #[arg(short, long, value_name = "CODES", num_args = 0..)]
        select: Vec<String>,

        /// Flip courses in or out of the current enrollment instead; a flip that
        /// would go over the credit ceiling is refused before anything is saved
        #[arg(short, long, value_name = "CODES", num_args = 1.., conflicts_with = "select")]
        toggle: Vec<String>,
    },
    /// Enroll a student in a single course.
    Add {
        /// Student ID
        #[arg(value_name = "ID")]
        student_id: String,
        /// Course code
        #[arg(value_name = "CODE")]
        code: String,
    },
    /// Drop a single course.
    Drop {
        /// Student ID
        #[arg(value_name = "ID")]
        student_id: String,
        /// Course code
        #[arg(value_name = "CODE")]
        code: String,
    },
    /// Print a student's weekly timetable.
    Timetable {
        /// Student ID
        #[arg(value_name = "ID")]
        student_id: String,
    },
    /// Check a student's credits against the ceiling.
    Credits {
        /// Student ID
        #[arg(value_name = "ID")]
        student_id: String,

        /// Additional credits to check for
        #[arg(long, value_name = "N", default_value_t = 0)]
        add: u32,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "coursereg",
    about = "Course enrollment and timetable command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the credit ceiling for this run
    #[arg(long = "credit-ceiling", value_name = "CREDITS")]
    pub credit_ceiling: Option<u32>,

    /// Override the enrollment data directory
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the course catalog file
    #[arg(long = "catalog-file", value_name = "PATH")]
    pub catalog_file: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            credit_ceiling: self.credit_ceiling,
            data_dir: self
                .data_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            catalog_file: self
                .catalog_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let cli = Cli::parse_from(["coursereg", "catalog"]);
        let overrides = cli.to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.credit_ceiling.is_none());
        assert!(overrides.data_dir.is_none());
        assert!(overrides.catalog_file.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli::parse_from([
            "coursereg",
            "--config-level",
            "debug",
            "--config-verbose",
            "yes",
            "--credit-ceiling",
            "18",
            "--data-dir",
            "/srv/enroll",
            "catalog",
        ]);
        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.credit_ceiling, Some(18));
        assert_eq!(overrides.data_dir, Some("/srv/enroll".to_string()));
    }

    #[test]
    fn test_enroll_select_parses_many_codes() {
        let cli = Cli::parse_from(["coursereg", "enroll", "s1", "--select", "CS101", "MATH101"]);
        match cli.command {
            Command::Enroll {
                student_id,
                select,
                toggle,
            } => {
                assert_eq!(student_id, "s1");
                assert_eq!(select, vec!["CS101".to_string(), "MATH101".to_string()]);
                assert!(toggle.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_enroll_toggle_conflicts_with_select() {
        let cli = Cli::parse_from(["coursereg", "enroll", "s1", "--toggle", "CS301"]);
        assert!(matches!(cli.command, Command::Enroll { ref toggle, .. } if toggle == &["CS301"]));

        let err = Cli::try_parse_from([
            "coursereg", "enroll", "s1", "--select", "CS101", "--toggle", "CS301",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn test_enroll_without_select_drops_all() {
        let cli = Cli::parse_from(["coursereg", "enroll", "s1"]);
        assert!(matches!(cli.command, Command::Enroll { ref select, .. } if select.is_empty()));
    }
}
