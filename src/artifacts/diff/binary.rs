use crate::artifacts::diff::image;
use crate::domain::file::{File, FileStat};
use crate::domain::options::DiffOptions;
use crate::errors::Result;
use chrono::{DateTime, Local};
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use std::time::SystemTime;

const IMAGE_PROBE_LEN: usize = 64 * 1024;
const SIZE_UNITS: [&str; 7] = ["bytes", "KB", "MB", "GB", "TB", "PB", "EB"];
const MAX_PATH_WIDTH: usize = 24;

/// NUL bytes or invalid UTF-8 mean binary. A multi-byte sequence cut off at
/// the end of a probe does not count as invalid.
pub fn is_binary(data: &[u8]) -> bool {
    if data.contains(&0) {
        return true;
    }

    match std::str::from_utf8(data) {
        Ok(_) => false,
        Err(e) => e.error_len().is_some(),
    }
}

/// Metadata table comparing the existing file with its replacement.
pub fn render(existing: &mut File, proposed: &mut File, options: &DiffOptions) -> Result<String> {
    if options.fs {
        existing.ensure_stat()?;
        proposed.ensure_stat()?;
    }

    let existing_size = existing.size();
    let proposed_size = proposed.size();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["", "Existing", "Replacement", "Diff"]);

    table.add_row(vec![
        "Path".to_string(),
        shorten(&existing.relative()),
        shorten(&proposed.relative()),
        String::new(),
    ]);
    table.add_row(vec![
        "Size".to_string(),
        existing_size.map(human_bytes).unwrap_or_else(absent),
        proposed_size.map(human_bytes).unwrap_or_else(absent),
        size_diff(existing_size, proposed_size),
    ]);

    let existing_dimensions = dimensions(existing, options.fs)?;
    let proposed_dimensions = dimensions(proposed, options.fs)?;
    if existing_dimensions.is_some() || proposed_dimensions.is_some() {
        table.add_row(vec![
            "Dimensions".to_string(),
            existing_dimensions.map(|d| d.to_string()).unwrap_or_else(absent),
            proposed_dimensions.map(|d| d.to_string()).unwrap_or_else(absent),
            "N/A".to_string(),
        ]);
    }

    let dates: [(&str, fn(&FileStat) -> Option<SystemTime>); 3] = [
        ("Date modified", |stat| stat.modified),
        ("Date accessed", |stat| stat.accessed),
        ("Date created", |stat| stat.created),
    ];
    for (label, pick) in dates {
        table.add_row(vec![
            label.to_string(),
            existing
                .stat()
                .and_then(pick)
                .map(format_time)
                .unwrap_or_else(absent),
            "New".to_string(),
            "N/A".to_string(),
        ]);
    }

    Ok(format!("{table}\n"))
}

fn dimensions(file: &File, fs: bool) -> Result<Option<image::Dimensions>> {
    if file.is_directory() || (!fs && file.is_null()) {
        return Ok(None);
    }

    Ok(file
        .read_chunk(IMAGE_PROBE_LEN)?
        .and_then(|chunk| image::dimensions(&chunk)))
}

fn absent() -> String {
    "-".to_string()
}

fn size_diff(existing: Option<u64>, proposed: Option<u64>) -> String {
    match (existing, proposed) {
        (Some(a), Some(b)) if a > b => format!("-{}", human_bytes(a - b)),
        (Some(a), Some(b)) => format!("+{}", human_bytes(b - a)),
        (None, Some(b)) => format!("+{}", human_bytes(b)),
        _ => "N/A".to_string(),
    }
}

/// Decimal units with up to two decimals, e.g. `1.23 KB`.
pub fn human_bytes(size: u64) -> String {
    let round = |value: f64| (value * 100.0).round() / 100.0;

    // the unit is settled on the rounded value, so 999_999 reads `1 MB`
    let mut unit = 0;
    let mut value = size as f64;
    while unit + 1 < SIZE_UNITS.len() && round(value) >= 1000.0 {
        value /= 1000.0;
        unit += 1;
    }

    let formatted = format!("{:.2}", round(value));
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');

    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

fn shorten(path: &str) -> String {
    let chars = path.chars().collect::<Vec<_>>();
    if chars.len() <= MAX_PATH_WIDTH {
        return path.to_string();
    }

    let head = chars[..5].iter().collect::<String>();
    let tail = chars[chars.len() - 16..].iter().collect::<String>();
    format!("{head}...{tail}")
}

fn format_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
