use std::sync::Arc;

use crate::WidgetError;

/// Largest accepted upload (10 MiB, inclusive).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Where a selection came from. All sources share one validation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    /// Click on the upload area followed by the file picker.
    Picker,
    /// Drag-and-drop onto the upload area.
    Drop,
    /// Native file input change event.
    InputChange,
}

/// A file offered by the user, not yet validated.
///
/// `size` is the declared size; it is kept apart from `content` so hosts
/// can report it without reading the file first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub media_type: String,
    pub size: u64,
    pub content: Arc<[u8]>,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, content: Vec<u8>) -> Self {
        let content: Arc<[u8]> = content.into();
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size: content.len() as u64,
            content,
        }
    }
}

pub fn validate_selection(file: &FileCandidate) -> Result<(), WidgetError> {
    if !file.media_type.starts_with("image/") {
        return Err(WidgetError::InvalidFileType {
            media_type: file.media_type.clone(),
        });
    }
    if file.size > MAX_UPLOAD_BYTES {
        return Err(WidgetError::FileTooLarge {
            size: file.size,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Human-readable size with binary unit steps and at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_use_binary_steps() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(1_500_000), "1.43 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn sizes_beyond_gigabytes_stay_in_gigabytes() {
        assert_eq!(format_file_size(2048 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn candidate_size_follows_content() {
        let file = FileCandidate::new("leaf.png", "image/png", vec![0; 42]);
        assert_eq!(file.size, 42);
    }
}
