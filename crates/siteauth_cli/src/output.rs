//! Terminal output helpers shared by every command.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;

/// Consistent, coloured status output for the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    /// Bold section heading.
    pub fn section(&self, title: &str) {
        println!("{}", title.bold().bright_cyan());
    }

    /// Plain line with no decoration.
    pub fn print(&self, line: &str) {
        println!("{line}");
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".bright_green(), message.bright_green());
    }

    /// Error line, written to stdout with the rest of the command output.
    pub fn error(&self, message: &str) {
        let _ = write_error(&mut std::io::stdout().lock(), message);
    }

    /// Labelled value, label dimmed.
    pub fn info(&self, label: &str, value: &str) {
        println!("  {} {}", label.dimmed(), value);
    }

    pub fn status(&self, message: &str) {
        println!("{}", message.dimmed());
    }
}

fn write_error(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "✗".bright_red(), message.bright_red())
}

/// Human-friendly age of a timestamp relative to `now`.
pub fn format_relative_time(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(time);

    if elapsed.num_seconds() < 60 {
        "just now".to_string()
    } else if elapsed.num_minutes() < 60 {
        format!("{} min ago", elapsed.num_minutes())
    } else if elapsed.num_hours() < 24 {
        format!("{} hours ago", elapsed.num_hours())
    } else {
        format!("{} days ago", elapsed.num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_line_carries_message() {
        let mut buf = Vec::new();
        write_error(&mut buf, "KEYCLOAK_CLIENT_SECRET must be set in environment variables")
            .unwrap();

        let line = String::from_utf8(buf).unwrap();
        assert_eq!(line.lines().count(), 1);
        assert!(line.contains("KEYCLOAK_CLIENT_SECRET must be set in environment variables"));
    }

    #[test]
    fn test_relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(format_relative_time(now, now), "just now");
        assert_eq!(
            format_relative_time(now - Duration::minutes(5), now),
            "5 min ago"
        );
        assert_eq!(
            format_relative_time(now - Duration::hours(3), now),
            "3 hours ago"
        );
        assert_eq!(
            format_relative_time(now - Duration::days(2), now),
            "2 days ago"
        );
    }
}
