//! Progress bar display for template installation

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for the file copy stage
pub struct ProgressDisplay {
    file_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total file count
    pub fn new(total_files: u64) -> Self {
        let file_style = ProgressStyle::default_bar()
            .template("  [{bar:40.green/yellow}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let file_pb = ProgressBar::new(total_files);
        file_pb.set_style(file_style);

        Self { file_pb }
    }

    /// Update file progress with the path just written
    pub fn update_file(&self, file_path: &str) {
        self.file_pb.set_message(truncate_path(file_path));
        self.file_pb.inc(1);
    }

    /// Finish file progress
    pub fn finish(&self) {
        self.file_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.file_pb.abandon();
    }
}

/// Truncate long paths for display, keeping the tail
///
/// Cuts on a char boundary so multibyte path components cannot split.
fn truncate_path(path: &str) -> String {
    if path.len() <= 50 {
        return path.to_string();
    }
    let mut cut = path.len() - 47;
    while !path.is_char_boundary(cut) {
        cut += 1;
    }
    format!("...{}", &path[cut..])
}
