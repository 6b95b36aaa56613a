//! Decides whether writing a generated file would clobber something different,
//! and asks what to do about it.
//!
//! - `domain`: files, actions, options, prompts and the per-batch session
//! - `artifacts`: equality check, diff rendering and output styling
//! - `areas`: the conflict engine and its batch/stream entry points
//! - `commands`: what the `conflicts` binary runs
//! - `errors`: the crate-wide error type

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod domain;
pub mod errors;

pub use areas::batch::files;
pub use areas::conflicts::Conflicts;
pub use artifacts::diff::{FileDiff, diff_files, render_diff};
pub use artifacts::equality::is_equal;
pub use domain::action::Action;
pub use domain::file::File;
pub use domain::options::{ConflictOptions, Destination, DiffOptions, Overwrite};
pub use domain::prompt::{
    LinePrompt, Prompt, Question, ScriptedPrompt, SelectPrompt, TerminalPrompt,
};
pub use domain::session::{Marks, Session};
pub use errors::{ConflictError, Result};
