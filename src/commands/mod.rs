//! Command line entry points
//!
//! - `check`: run a batch against a destination directory and report the accepted files
//! - `diff`: render the difference between two files

pub mod check;
pub mod diff;
