use crate::artifacts::diff::render_diff;
use crate::domain::file::File;
use crate::domain::options::DiffOptions;
use std::io::Write;
use std::path::Path;

/// Prints the difference between a file on disk and its would-be replacement.
pub fn diff(existing: &Path, proposed: &Path, chars: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let mut existing = File::new(existing);
    let mut proposed = File::new(proposed);
    let options = DiffOptions { chars, fs: true };

    let rendered = render_diff(&mut existing, &mut proposed, &options)?;
    out.write_all(rendered.as_bytes())?;

    Ok(())
}
