use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Self-documenting header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- ticklist recovery log: append-only error recovery data
     This file captures task data that ticklist couldn't load or save
     normally. If something went missing, check here.
     Safe to delete if empty or stale. -->

---
";

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    Load,
    Save,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Load => write!(f, "load"),
            RecoveryCategory::Save => write!(f, "save"),
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

/// Return the path to the recovery log file.
pub fn recovery_log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(".recovery.log")
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl RecoveryEntry {
    /// Format this entry as a markdown block for the recovery log.
    fn to_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "## {} | {}: {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        out.push('\n');

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            out.push('\n');
            out.push_str("```text\n");
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n");
        }

        out.push('\n');
        out.push_str("---\n");
        out
    }
}

/// Append a recovery entry to the log. Errors are swallowed and printed to
/// stderr; losing a log line must not take the app down.
pub fn log_recovery(data_dir: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(data_dir, entry) {
        eprintln!("warning: could not write to recovery log: {}", e);
    }
}

fn log_recovery_inner(data_dir: &Path, entry: RecoveryEntry) -> io::Result<()> {
    let path = recovery_log_path(data_dir);
    let needs_header = !path.exists() || std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }

    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_entry(category: RecoveryCategory, desc: &str, body: &str) -> RecoveryEntry {
        RecoveryEntry {
            timestamp: Utc::now(),
            category,
            description: desc.to_string(),
            fields: vec![("Slot".to_string(), "tasks.json".to_string())],
            body: body.to_string(),
        }
    }

    #[test]
    fn entry_formatting() {
        let entry = make_entry(RecoveryCategory::Load, "malformed slot", "not json");
        let md = entry.to_markdown();
        assert!(md.contains("## "));
        assert!(md.contains("load: malformed slot"));
        assert!(md.contains("Slot: tasks.json"));
        assert!(md.contains("```text"));
        assert!(md.contains("not json"));
        assert!(md.ends_with("---\n"));
    }

    #[test]
    fn empty_body_omits_code_fence() {
        let mut entry = make_entry(RecoveryCategory::Save, "write failed", "");
        entry.fields.push(("Error".into(), "disk full".into()));
        let md = entry.to_markdown();
        assert!(!md.contains("```"));
        assert!(md.contains("save: write failed"));
        assert!(md.contains("Error: disk full"));
    }

    #[test]
    fn file_header_created_on_first_write_only() {
        let tmp = TempDir::new().unwrap();
        log_recovery(tmp.path(), make_entry(RecoveryCategory::Load, "one", "a"));
        log_recovery(tmp.path(), make_entry(RecoveryCategory::Save, "two", "b"));

        let content = std::fs::read_to_string(recovery_log_path(tmp.path())).unwrap();
        assert!(content.starts_with("<!-- ticklist recovery log"));
        assert_eq!(content.matches("ticklist recovery log").count(), 1);
        assert!(content.contains("load: one"));
        assert!(content.contains("save: two"));
    }

    #[test]
    fn atomic_write_creates_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("slot.json");

        atomic_write(&path, b"hello").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");

        atomic_write(&path, b"goodbye").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "goodbye");
    }

    #[test]
    fn category_display() {
        assert_eq!(RecoveryCategory::Load.to_string(), "load");
        assert_eq!(RecoveryCategory::Save.to_string(), "save");
    }
}
