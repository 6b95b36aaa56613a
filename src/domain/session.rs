use crate::domain::action::Action;
use crate::domain::file::File;
use bitflags::bitflags;

bitflags! {
    /// Every action ever applied during a session. Flags are only ever added.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Marks: u8 {
        const YES = 0b000001;
        const NO = 0b000010;
        const SKIP = 0b000100;
        const ALL = 0b001000;
        const ABORT = 0b010000;
        const DIFF = 0b100000;
    }
}

impl From<Action> for Marks {
    fn from(action: Action) -> Self {
        match action {
            Action::Yes => Marks::YES,
            Action::No => Marks::NO,
            Action::Skip => Marks::SKIP,
            Action::All => Marks::ALL,
            Action::Abort => Marks::ABORT,
            Action::Diff => Marks::DIFF,
        }
    }
}

/// State shared by every detection of one batch.
///
/// `abort` and `all` are monotonic. Once aborted the accepted list is empty
/// and stays empty.
#[derive(Debug, Clone, Default)]
pub struct Session {
    files: Vec<File>,
    marks: Marks,
    action: Option<Action>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files approved for writing, in approval order.
    pub fn files(&self) -> &[File] {
        &self.files
    }

    pub fn is_aborted(&self) -> bool {
        self.marks.contains(Marks::ABORT)
    }

    pub fn overwrites_all(&self) -> bool {
        self.marks.contains(Marks::ALL)
    }

    /// The most recently resolved action.
    pub fn action(&self) -> Option<Action> {
        self.action
    }

    pub fn marks(&self) -> Marks {
        self.marks
    }

    pub(crate) fn record(&mut self, action: Action) {
        self.action = Some(action);
    }

    pub(crate) fn mark(&mut self, action: Action) {
        self.marks.insert(action.into());
    }

    /// Queues a file unless the same file is already queued or the session
    /// was aborted.
    pub(crate) fn accept(&mut self, file: &File) {
        if self.is_aborted() || self.files.iter().any(|queued| queued.id() == file.id()) {
            return;
        }
        self.files.push(file.clone());
    }

    pub(crate) fn overwrite_all(&mut self) {
        self.mark(Action::All);
    }

    pub(crate) fn abort(&mut self) {
        self.mark(Action::Abort);
        self.files.clear();
    }

    pub(crate) fn clear(&mut self) {
        self.files.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn accept_suppresses_duplicates_by_identity() {
        let mut session = Session::new();
        let file = File::anonymous("a");
        let twin = File::anonymous("a");

        session.accept(&file);
        session.accept(&file.clone());
        session.accept(&twin);

        let ids = session.files().iter().map(File::id).collect::<Vec<_>>();
        assert_eq!(ids, vec![file.id(), twin.id()]);
    }

    #[test]
    fn abort_clears_and_blocks_further_accepts() {
        let mut session = Session::new();
        session.accept(&File::anonymous("a"));

        session.abort();
        session.accept(&File::anonymous("b"));

        assert!(session.is_aborted());
        assert!(session.files().is_empty());
    }

    #[test]
    fn marks_accumulate() {
        let mut session = Session::new();
        session.mark(Action::Yes);
        session.mark(Action::Diff);

        assert_eq!(session.marks(), Marks::YES | Marks::DIFF);
        assert!(!session.overwrites_all());
    }

    fn operation_strategy() -> impl Strategy<Value = u8> {
        0u8..5
    }

    proptest! {
        #[test]
        fn prop_abort_and_all_are_monotonic(ops in proptest::collection::vec(operation_strategy(), 1..40)) {
            let mut session = Session::new();
            let mut aborted = false;
            let mut all = false;

            for op in ops {
                match op {
                    0 => session.accept(&File::anonymous("x")),
                    1 => { session.abort(); aborted = true; }
                    2 => { session.overwrite_all(); all = true; }
                    3 => session.mark(Action::No),
                    _ => session.clear(),
                }

                prop_assert_eq!(session.is_aborted(), aborted);
                prop_assert_eq!(session.overwrites_all(), all);
                if aborted {
                    prop_assert!(session.files().is_empty());
                }
            }
        }
    }
}
