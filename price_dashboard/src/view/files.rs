use crate::models::saved_file::SavedFile;

pub const NO_FILES: &str = "No saved files";

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;

/// Human-readable size using 1024-based units and one decimal place.
///
/// `512 -> "512 B"`, `1536 -> "1.5 KB"`, `1048576 -> "1.0 MB"`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.1} KB", round_tenths(bytes as f64 / KIB as f64))
    } else {
        format!("{:.1} MB", round_tenths(bytes as f64 / MIB as f64))
    }
}

// Ties round up, so 1.25 KB shows as "1.3 KB".
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    /// `SYMBOL (TF)`
    pub title: String,
    pub size: String,
    pub modified: String,
}

impl From<&SavedFile> for FileRow {
    fn from(f: &SavedFile) -> Self {
        Self {
            title: format!("{} ({})", f.symbol, f.timeframe),
            size: format_file_size(f.size),
            modified: f.modified.clone(),
        }
    }
}

pub fn file_rows(files: &[SavedFile]) -> Vec<FileRow> {
    files.iter().map(FileRow::from).collect()
}
