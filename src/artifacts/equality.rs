//! Decides whether writing a proposed file would change anything.
//!
//! Errs on the side of reporting a difference: directories and missing
//! contents never compare equal, and equal lengths are always followed by a
//! full byte comparison.

use crate::domain::file::File;
use crate::errors::Result;

pub fn is_equal(existing: &mut File, proposed: &mut File, fs: bool) -> Result<bool> {
    if fs {
        existing.ensure_stat()?;
        proposed.ensure_stat()?;
    }

    if existing.is_directory() || proposed.is_directory() {
        return Ok(false);
    }

    if fs {
        existing.ensure_contents()?;
        proposed.ensure_contents()?;
    }

    let (Some(a), Some(b)) = (existing.contents(), proposed.contents()) else {
        return Ok(false);
    };

    if a.len() != b.len() {
        return Ok(false);
    }

    // slice equality stops at the first mismatching byte
    Ok(a.as_ref() == b.as_ref())
}
