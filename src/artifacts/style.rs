//! Status symbols and colors for user-facing output.

use crate::domain::file::File;
use colored::{ColoredString, Colorize};

pub fn success() -> ColoredString {
    "✔".green()
}

pub fn warning() -> ColoredString {
    "⚠".yellow()
}

pub fn error() -> ColoredString {
    "✖".red()
}

pub fn info() -> ColoredString {
    "ℹ".cyan()
}

pub fn relative(file: &File) -> ColoredString {
    file.relative().yellow()
}

pub fn added(text: &str) -> ColoredString {
    text.green()
}

pub fn removed(text: &str) -> ColoredString {
    text.red()
}

/// The two-line header every text diff starts with.
pub fn legend() -> String {
    format!("{}\n{}\n\n", added("+ added"), removed("- removed"))
}
