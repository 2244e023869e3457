//! Run log duplicating console output into a monthly log file.
//!
//! Every status line goes to the console and, when file logging is enabled,
//! is appended to `logs/YYYY-MM.log` with a timestamp prefix. Log file
//! problems degrade to console-only output; they never fail the run.

use chrono::{DateTime, Local};
use colored::Colorize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

pub struct RunLog {
    file: Option<File>,
}

impl RunLog {
    pub fn console_only() -> Self {
        Self { file: None }
    }

    /// Open the current month's log file in an existing logs directory.
    pub fn with_file(logs_dir: &Path) -> Self {
        let log_path = logs_dir.join(monthly_log_name(&Local::now()));
        match OpenOptions::new().create(true).append(true).open(&log_path) {
            Ok(file) => Self { file: Some(file) },
            Err(e) => {
                eprintln!(
                    "{}",
                    format!("Could not open log file {}: {}", log_path.display(), e).yellow()
                );
                Self::console_only()
            }
        }
    }

    pub fn step(&mut self, msg: &str) {
        println!("{}", msg.cyan());
        self.append(msg);
    }

    pub fn info(&mut self, msg: &str) {
        println!("{msg}");
        self.append(msg);
    }

    pub fn success(&mut self, msg: &str) {
        println!("{}", msg.green());
        self.append(msg);
    }

    pub fn warn(&mut self, msg: &str) {
        eprintln!("{}", msg.yellow());
        self.append(msg);
    }

    pub fn error(&mut self, msg: &str) {
        eprintln!("{}", msg.red());
        self.append(msg);
    }

    /// Separator line, written to the log file without a timestamp prefix.
    pub fn blank(&mut self) {
        println!();
        if let Some(file) = &mut self.file {
            let _ = writeln!(file);
        }
    }

    fn append(&mut self, msg: &str) {
        if let Some(file) = &mut self.file {
            let _ = writeln!(file, "{}", log_line(&Local::now(), msg));
        }
    }
}

pub(crate) fn monthly_log_name(now: &DateTime<Local>) -> String {
    format!("{}.log", now.format("%Y-%m"))
}

fn log_line(now: &DateTime<Local>, msg: &str) -> String {
    format!("[{}] {}", now.format("%Y-%m-%d %H:%M:%S"), msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn clock() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 5, 12, 30, 45).unwrap()
    }

    #[test]
    fn log_lines_carry_timestamp_prefix() {
        assert_eq!(
            log_line(&clock(), "wallpaper saved"),
            "[2026-08-05 12:30:45] wallpaper saved"
        );
    }

    #[test]
    fn log_files_rotate_monthly() {
        assert_eq!(monthly_log_name(&clock()), "2026-08.log");
    }

    #[test]
    fn messages_are_appended_to_the_monthly_file() {
        let dir = tempdir().unwrap();
        let mut log = RunLog::with_file(dir.path());
        log.info("first line");
        log.blank();
        log.error("second line");
        drop(log);

        let log_path = dir.path().join(monthly_log_name(&Local::now()));
        let content = std::fs::read_to_string(log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("first line"));
        assert_eq!(lines[1], "");
        assert!(lines[2].ends_with("second line"));
    }
}
