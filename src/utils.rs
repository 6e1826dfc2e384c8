use std::path::PathBuf;
use tinyfiledialogs::{message_box_ok, open_file_dialog, MessageBoxIcon};

pub fn show_error_message(title: &str, message: &str) {
    message_box_ok(title, message, MessageBoxIcon::Error);
}

/// Native "open file" dialog. The PDF filter is only a hint to the user.
pub fn pick_file() -> Option<PathBuf> {
    let patterns: &[&str] = &["*.pdf"];
    open_file_dialog("Choose cv.pdf", "", Some((patterns, "PDF documents"))).map(PathBuf::from)
}
