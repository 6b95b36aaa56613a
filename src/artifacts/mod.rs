//! Comparison and presentation
//!
//! - `diff`: text, binary and image diffs between an existing file and its replacement
//! - `equality`: byte-level "would writing change anything" check
//! - `style`: status symbols and colors shared by all output

pub mod diff;
pub mod equality;
pub mod style;
