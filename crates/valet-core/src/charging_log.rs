//! Append-only log of observed charging states.
//!
//! Every `/info` readout records the charging state it saw, one sample per
//! line: `<RFC 3339 timestamp>\t<state>`. This file is the only local
//! persistence in the system.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use tracing::debug;

/// Append one charging-state sample to the log at `path`.
///
/// Creates the parent directory on first use.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn record_charging_state(path: &Path, state: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}\t{}", Utc::now().to_rfc3339(), state)?;
    debug!(state = %state, path = %path.display(), "Recorded charging state");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charging_states.log");

        record_charging_state(&path, "Charging").unwrap();
        record_charging_state(&path, "Complete").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("\tCharging"));
        assert!(lines[1].ends_with("\tComplete"));
    }

    #[test]
    fn test_record_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("charging_states.log");

        record_charging_state(&path, "Stopped").unwrap();
        assert!(path.exists());
    }
}
