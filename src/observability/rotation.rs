//! Size-based rotating line writer.
//!
//! When the active file grows past [`MAX_FILE_BYTES`] it is renamed to
//! `<name>.<YYYYmmddTHHMMSS>` and a fresh file is started. Only the newest
//! [`MAX_BACKUPS`] backups survive.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;
pub const MAX_BACKUPS: usize = 3;

#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    file: Mutex<Option<File>>,
}

impl RotatingFile {
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limit(path, MAX_FILE_BYTES)
    }

    pub const fn with_limit(path: PathBuf, max_bytes: u64) -> Self {
        Self {
            path,
            max_bytes,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace writer poisoned: {e}")))?;

        if fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes) {
            *guard = None;
            self.rotate()?;
        }

        let file = match guard.take() {
            Some(file) => file,
            None => OpenOptions::new().create(true).append(true).open(&self.path)?,
        };
        let file = guard.insert(file);

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%3f");
        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".{stamp}"));
        fs::rename(&self.path, PathBuf::from(backup))?;
        self.prune_backups()
    }

    /// Deletes all but the newest backups. Timestamps sort lexically.
    fn prune_backups(&self) -> io::Result<()> {
        let Some(dir) = self.path.parent() else {
            return Ok(());
        };
        let Some(prefix) = self.path.file_name().and_then(|n| n.to_str()).map(|n| format!("{n}.")) else {
            return Ok(());
        };

        let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| is_backup(path, &prefix))
            .collect();

        backups.sort_unstable_by(|a, b| b.cmp(a));
        for stale in backups.iter().skip(MAX_BACKUPS) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

fn is_backup(path: &Path, prefix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingFile::new(path.clone());

        writer.append_line("{\"a\":1}").unwrap();
        writer.append_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_past_limit_and_keeps_few_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = RotatingFile::with_limit(path.clone(), 8);

        for i in 0..(MAX_BACKUPS + 3) {
            writer.append_line(&format!("line number {i}")).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        let backups = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| is_backup(&e.path(), "trace.json."))
            .count();
        assert_eq!(backups, MAX_BACKUPS);
        assert!(fs::read_to_string(path).unwrap().ends_with(&format!("line number {}\n", MAX_BACKUPS + 2)));
    }
}
