use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Where the displayed image came from, for the status bar and dialogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMeta {
    name: String,
    directory: Option<PathBuf>,
    byte_len: Option<u64>,
    last_modified: Option<SystemTime>,
}

impl ImageMeta {
    /// Describe a file on disk; size and modification time are best effort.
    pub fn for_file(path: &Path) -> Self {
        let fs_meta = std::fs::metadata(path).ok();
        Self {
            name: path.file_name().map_or_else(
                || path.display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            ),
            directory: path.parent().map(Path::to_path_buf),
            byte_len: fs_meta.as_ref().map(std::fs::Metadata::len),
            last_modified: fs_meta.and_then(|m| m.modified().ok()),
        }
    }

    /// Describe bytes dropped onto the window without a backing path.
    pub fn for_drop(
        name: Option<&str>,
        byte_len: usize,
        last_modified: Option<SystemTime>,
    ) -> Self {
        Self {
            name: name
                .filter(|n| !n.is_empty())
                .unwrap_or("Unnamed drop")
                .to_owned(),
            directory: None,
            byte_len: u64::try_from(byte_len).ok(),
            last_modified,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }

    /// Directory of the source file, used to seed the save dialog.
    pub fn parent_dir(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// `name · W×H · size · modified`, omitting unknown parts.
    pub fn summary(&self, (width, height): (u32, u32)) -> String {
        let mut parts = vec![self.name.clone(), format!("{width}×{height}")];
        parts.extend(self.byte_len.map(human_readable_bytes));
        parts.extend(self.last_modified.map(format_system_time));
        parts.join(" · ")
    }
}

/// Byte count in binary units: `512 B`, `1.50 KiB`.
pub fn human_readable_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["KiB", "MiB", "GiB", "TiB", "PiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{value:.2} {unit}")
}

/// UTC timestamp, seconds precision.
pub fn format_system_time(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn bytes_use_binary_units() {
        assert_eq!(human_readable_bytes(512), "512 B");
        assert_eq!(human_readable_bytes(1536), "1.50 KiB");
        assert_eq!(human_readable_bytes(5 * 1024 * 1024), "5.00 MiB");
    }

    #[test]
    fn summary_for_unnamed_drop() {
        let modified = UNIX_EPOCH + Duration::from_secs(60);
        let meta = ImageMeta::for_drop(Some(""), 2048, Some(modified));
        assert_eq!(
            meta.summary((4, 3)),
            "Unnamed drop · 4×3 · 2.00 KiB · 1970-01-01 00:01:00 UTC"
        );
        assert!(meta.parent_dir().is_none());
    }

    #[test]
    fn missing_file_still_has_a_name() {
        let meta = ImageMeta::for_file(Path::new("/nonexistent/retouch/cat.png"));
        assert_eq!(meta.display_name(), "cat.png");
        assert_eq!(meta.parent_dir(), Some(Path::new("/nonexistent/retouch")));
        assert_eq!(meta.summary((2, 2)), "cat.png · 2×2");
    }
}
