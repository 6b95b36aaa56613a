use std::fmt;

/// What to do with a proposed file whose destination already holds
/// different content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Overwrite this one file.
    Yes,
    /// Leave the existing file alone.
    No,
    /// Overwrite this file and every remaining file of the batch.
    All,
    /// Drop everything accepted so far and stop.
    Abort,
    /// Show the difference, then ask again.
    Diff,
    /// Nothing to do, the contents are identical.
    Skip,
}

const ACTION_TOKENS: phf::Map<&'static str, Action> = phf::phf_map! {
    "y" => Action::Yes,
    "yes" => Action::Yes,
    "n" => Action::No,
    "no" => Action::No,
    "a" => Action::All,
    "all" => Action::All,
    "x" => Action::Abort,
    "abort" => Action::Abort,
    "d" => Action::Diff,
    "diff" => Action::Diff,
    "skip" => Action::Skip,
};

impl Action {
    /// Strict lookup of a key (`y`) or a token (`yes`).
    pub fn lookup(token: &str) -> Option<Action> {
        ACTION_TOKENS
            .get(token.trim().to_ascii_lowercase().as_str())
            .copied()
    }

    /// Lenient lookup: anything unrecognised is treated as `no`.
    pub fn from_token(token: &str) -> Action {
        Self::lookup(token).unwrap_or(Action::No)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Yes => "yes",
            Action::No => "no",
            Action::All => "all",
            Action::Abort => "abort",
            Action::Diff => "diff",
            Action::Skip => "skip",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Action::Diff)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
