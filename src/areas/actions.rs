use crate::areas::conflicts::{Conflicts, Step};
use crate::artifacts::diff::render_diff;
use crate::artifacts::style;
use crate::domain::action::Action;
use crate::domain::file::File;
use crate::domain::prompt::Prompt;
use crate::errors::Result;

impl<P: Prompt> Conflicts<P> {
    /// Applies `action` to the pair as if it had been chosen at the prompt.
    ///
    /// `diff` shows the difference and then asks about the pair again.
    pub async fn take_action(
        &mut self,
        action: Action,
        proposed: &mut File,
        existing: &mut File,
    ) -> Result<Action> {
        match self.apply(action, proposed, existing)? {
            Step::Done(action) => Ok(action),
            Step::Again => self.detect(proposed, existing).await,
        }
    }

    pub(crate) fn apply(
        &mut self,
        action: Action,
        proposed: &mut File,
        existing: &mut File,
    ) -> Result<Step> {
        self.session_mut().record(action);

        match action {
            Action::Yes => self.overwrite(proposed),
            Action::No => self.skip(proposed, action, ""),
            Action::Skip => self.skip(proposed, action, ", file is identical"),
            Action::All => self.overwrite_all(proposed),
            Action::Abort => self.abort(),
            Action::Diff => self.diff(proposed, existing),
        }
    }

    fn overwrite(&mut self, proposed: &File) -> Result<Step> {
        let session = self.session_mut();
        session.mark(Action::Yes);
        session.accept(proposed);

        self.log(format!(
            "{} Overwriting {}",
            style::success(),
            style::relative(proposed)
        ))?;

        Ok(Step::Done(Action::Yes))
    }

    fn skip(&mut self, proposed: &File, action: Action, note: &str) -> Result<Step> {
        self.session_mut().mark(action);

        self.log(format!(
            "{} Skipping {}{}",
            style::warning(),
            style::relative(proposed),
            note
        ))?;

        Ok(Step::Done(action))
    }

    fn overwrite_all(&mut self, proposed: &File) -> Result<Step> {
        let session = self.session_mut();
        session.overwrite_all();
        session.accept(proposed);

        self.log(format!(
            "{} All remaining files will be written, overwriting any existing files.",
            style::success()
        ))?;

        Ok(Step::Done(Action::All))
    }

    fn abort(&mut self) -> Result<Step> {
        self.session_mut().abort();

        self.log(format!(
            "{} Stopping, no files will be overwritten.",
            style::error()
        ))?;

        Ok(Step::Done(Action::Abort))
    }

    fn diff(&mut self, proposed: &mut File, existing: &mut File) -> Result<Step> {
        self.session_mut().mark(Action::Diff);

        if self.options().silent {
            return Ok(Step::Again);
        }

        self.log(format!(
            "{} Diff comparison of {} and existing content.",
            style::info(),
            style::relative(proposed)
        ))?;

        let options = self.options().diff_options();
        let rendered = render_diff(existing, proposed, &options)?;
        self.log_raw(&rendered)?;

        Ok(Step::Again)
    }
}
