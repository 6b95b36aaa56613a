//! Human-readable comparison of an existing file and its replacement
//!
//! - `myers`: Myers' shortest edit script over any comparable sequence
//! - `text`: line or character diffs with colored markers
//! - `binary`: metadata table for binaries and directories
//! - `image`: pixel dimensions sniffed from image headers
//!
//! [`render_diff`] picks the representation: text when both sides look like
//! UTF-8 text, the metadata table otherwise.

pub mod binary;
pub mod image;
pub mod myers;
pub mod text;

use crate::domain::file::File;
use crate::domain::options::DiffOptions;
use crate::errors::Result;
use derive_new::new;
use text::TextDiff;

/// Leading bytes inspected when deciding whether content is binary.
pub const PROBE_LEN: usize = 4 + 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    Text,
    Binary,
}

/// A rendered comparison together with the two files it describes.
#[derive(Debug, Clone, new)]
pub struct FileDiff {
    pub existing: File,
    pub proposed: File,
    pub diff: String,
}

pub fn classify(existing: &mut File, proposed: &mut File, options: &DiffOptions) -> Result<DiffKind> {
    if options.fs {
        existing.ensure_stat()?;
        proposed.ensure_stat()?;
    }

    if existing.is_directory() || proposed.is_directory() {
        return Ok(DiffKind::Binary);
    }

    for file in [&*existing, &*proposed] {
        if !options.fs && file.is_null() {
            continue;
        }
        if let Some(chunk) = file.read_chunk(PROBE_LEN)?
            && binary::is_binary(&chunk)
        {
            return Ok(DiffKind::Binary);
        }
    }

    Ok(DiffKind::Text)
}

pub fn render_diff(existing: &mut File, proposed: &mut File, options: &DiffOptions) -> Result<String> {
    match classify(existing, proposed, options)? {
        DiffKind::Binary => binary::render(existing, proposed, options),
        DiffKind::Text => {
            if options.fs {
                existing.ensure_contents()?;
                proposed.ensure_contents()?;
            }

            let diff = TextDiff::compute(&text_of(existing), &text_of(proposed), options.chars);
            Ok(diff.to_string())
        }
    }
}

/// Renders every `(existing, proposed)` pair, keeping the pairs alongside.
pub fn diff_files(
    pairs: impl IntoIterator<Item = (File, File)>,
    options: &DiffOptions,
) -> Result<Vec<FileDiff>> {
    pairs
        .into_iter()
        .map(|(mut existing, mut proposed)| {
            let diff = render_diff(&mut existing, &mut proposed, options)?;
            Ok(FileDiff::new(existing, proposed, diff))
        })
        .collect()
}

fn text_of(file: &File) -> String {
    file.contents()
        .map(|data| String::from_utf8_lossy(data).into_owned())
        .unwrap_or_default()
}
