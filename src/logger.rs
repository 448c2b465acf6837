use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;

pub struct Logger {
  file: Mutex<std::fs::File>,
}

impl Logger {
  pub fn new(path: &Path) -> anyhow::Result<Self> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Self {
      file: Mutex::new(file),
    })
  }

  pub fn info(&self, message: &str) {
    self.log("INFO", message);
  }

  pub fn warn(&self, message: &str) {
    self.log("WARN", message);
  }

  pub fn error(&self, message: &str) {
    self.log("ERROR", message);
  }

  // Route names arrive as part of the message, so lines read like
  // "2026-08-28T12:00:00+00:00 [WARN] /api/message rejected: ...".
  fn log(&self, level: &str, message: &str) {
    let ts = Utc::now().to_rfc3339();
    let line = format!("{ts} [{level}] {message}\n");
    if let Ok(mut file) = self.file.lock() {
      let _ = file.write_all(line.as_bytes());
    }
  }
}
