//! Value types the conflict engine works with
//!
//! - `action`: the closed set of answers to a conflict
//! - `file`: proposed/existing file handles with lazy content and stat caches
//! - `options`: typed batch configuration and the caller-supplied async hooks
//! - `prompt`: the question descriptor and the `Prompt` seam
//! - `session`: per-batch mutable state

pub mod action;
pub mod file;
pub mod options;
pub mod prompt;
pub mod session;
