use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::types::Verdict;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `<timestamp> | <VERDICT> | <text>` with the text flattened to one line.
pub fn format_line(at: DateTime<Local>, verdict: Verdict, text: &str) -> String {
    let flat = text.trim().replace(['\r', '\n'], " ");
    format!("{} | {} | {}\n", at.format(TIMESTAMP_FORMAT), verdict, flat)
}

/// Append-only prediction log shared by all requests.
pub struct AuditLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl AuditLog {
    pub async fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path).await?;
        Ok(Self { path: path.to_path_buf(), file: Mutex::new(file) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append(&self, verdict: Verdict, text: &str) -> io::Result<()> {
        let line = format_line(Local::now(), verdict, text);
        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        debug!(path = %self.path.display(), %verdict, "appended audit line");
        Ok(())
    }

    /// Write failures never fail the caller.
    pub async fn record(&self, verdict: Verdict, text: &str) {
        if let Err(e) = self.append(verdict, text).await {
            warn!(path = %self.path.display(), error = %e, "failed to write audit line");
        }
    }
}
