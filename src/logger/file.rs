/// File persistence for log lines
///
/// One file per process start: `<directory>/frizmine_<YYYY-mm-dd_HH-MM-SS>.log`.
/// Until `init_file_logging` succeeds every write is a no-op.
use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

static LOG_FILE: Lazy<Mutex<Option<BufWriter<File>>>> = Lazy::new(|| Mutex::new(None));

/// Open the log file inside `directory`, creating the directory if needed
pub fn init_file_logging(directory: &Path) -> Result<PathBuf, String> {
    fs::create_dir_all(directory).map_err(|e| {
        format!(
            "Failed to create log directory '{}': {}",
            directory.display(),
            e
        )
    })?;

    let path = directory.join(format!(
        "frizmine_{}.log",
        Local::now().format("%Y-%m-%d_%H-%M-%S")
    ));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("Failed to open log file '{}': {}", path.display(), e))?;

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(BufWriter::new(file));
    }

    Ok(path)
}

pub fn write_to_file(line: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            // Write errors are ignored
            let _ = writeln!(writer, "{}", line);
        }
    }
}

pub fn flush_file_logging() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            let _ = writer.flush();
        }
    }
}
