//! Human-readable descriptions of file sizes and accepted types

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

const MIME_DESCRIPTIONS: &[(&str, &str)] = &[
    ("image/jpeg", "JPEG"),
    ("image/png", "PNG"),
    ("image/gif", "GIF"),
    ("image/webp", "WEBP"),
    ("image/svg+xml", "SVG"),
    ("application/pdf", "PDF"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "DOCX",
    ),
    ("application/msword", "DOC"),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "XLSX",
    ),
    ("application/vnd.ms-excel", "XLS"),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "PPTX",
    ),
    ("application/vnd.ms-powerpoint", "PPT"),
    ("application/zip", "ZIP"),
    ("application/x-rar-compressed", "RAR"),
    ("text/plain", "Text"),
    ("text/csv", "CSV"),
    ("audio/mpeg", "MP3"),
    ("audio/wav", "WAV"),
    ("video/mp4", "MP4"),
    ("video/x-msvideo", "AVI"),
    ("video/webm", "WEBM"),
];

const GENERAL_CATEGORIES: &[(&str, &str)] = &[
    ("image/*", "Images"),
    ("application/*", "Documents"),
    ("audio/*", "Audio Files"),
    ("video/*", "Video Files"),
    ("text/*", "Text Files"),
];

const UNKNOWN_TYPE: &str = "Unknown File Type";

fn lookup(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Formats a byte count with base-1024 units, e.g. `1.50 KB`
pub fn format_file_size(size_bytes: u64, decimals: usize) -> String {
    if size_bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut index = 0;
    let mut size = size_bytes as f64;
    while size >= 1024.0 && index < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        index += 1;
    }

    format!("{:.*} {}", decimals, size, SIZE_UNITS[index])
}

/// Describes a comma-separated list of MIME matchers, e.g.
/// `image/*, application/pdf` becomes `(Images, PDF)`
pub fn describe_mime_types(mime_types: &str) -> String {
    let mut labels: Vec<&str> = Vec::new();

    for mime_type in mime_types.split(',').map(str::trim) {
        let label = lookup(GENERAL_CATEGORIES, mime_type)
            .or_else(|| lookup(MIME_DESCRIPTIONS, mime_type))
            .or_else(|| {
                let top_level = mime_type.split('/').next().unwrap_or_default();
                lookup(GENERAL_CATEGORIES, &format!("{top_level}/*"))
            })
            .unwrap_or(UNKNOWN_TYPE);

        if !labels.contains(&label) {
            labels.push(label);
        }
    }

    format!("({})", labels.join(", "))
}
