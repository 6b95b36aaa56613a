use crate::artifacts::equality::is_equal;
use crate::domain::action::Action;
use crate::domain::file::File;
use crate::domain::options::{ConflictOptions, Overwrite};
use crate::domain::prompt::{Prompt, Question};
use crate::domain::session::Session;
use crate::errors::{ConflictError, Result};
use std::fmt::Display;
use std::io::Write;
use std::sync::Arc;

/// Outcome of one pass through the decision procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Done(Action),
    /// A diff was shown; the same pair has to be decided again.
    Again,
}

/// The conflict engine: options, the prompt that answers genuine conflicts,
/// the status sink and the state of the current batch.
pub struct Conflicts<P> {
    options: ConflictOptions,
    prompt: P,
    writer: Box<dyn Write + Send>,
    session: Session,
}

impl<P: Prompt> Conflicts<P> {
    pub fn new(options: ConflictOptions, prompt: P, writer: Box<dyn Write + Send>) -> Self {
        Conflicts {
            options,
            prompt,
            writer,
            session: Session::new(),
        }
    }

    pub fn options(&self) -> &ConflictOptions {
        &self.options
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Hands out the current session and starts a fresh one.
    pub fn reset(&mut self) -> Session {
        std::mem::take(&mut self.session)
    }

    /// Decides what happens to `proposed` given whatever sits at `existing`.
    ///
    /// Loops until a terminal action is reached; `diff` shows the difference
    /// and goes around again.
    pub async fn detect(&mut self, proposed: &mut File, existing: &mut File) -> Result<Action> {
        loop {
            match self.evaluate(proposed, existing).await? {
                Step::Done(action) => return Ok(action),
                Step::Again => continue,
            }
        }
    }

    async fn evaluate(&mut self, proposed: &mut File, existing: &mut File) -> Result<Step> {
        if self.session.is_aborted() {
            self.session.clear();
            return Ok(Step::Done(Action::Abort));
        }

        if matches!(self.options.overwrite, Overwrite::Always) || self.session.overwrites_all() {
            return Ok(self.resolve(Action::All, proposed));
        }

        if let Overwrite::When(policy) = &self.options.overwrite {
            let policy = Arc::clone(policy);
            if policy.should_overwrite(proposed).await? {
                return Ok(self.resolve(Action::Yes, proposed));
            }
        }

        if existing.path().is_none() || !existing.exists(self.options.fs)? {
            return Ok(self.resolve(Action::Yes, proposed));
        }

        if is_equal(existing, proposed, self.options.fs)? {
            return self.apply(Action::Skip, proposed, existing);
        }

        if let Some(observer) = self.options.on_conflict.clone() {
            observer.on_conflict(proposed, existing).await?;
        }

        let action = match proposed.take_action() {
            Some(action) => action,
            None => self.prompt.run(&Question::for_file(proposed)).await?,
        };

        self.apply(action, proposed, existing)
    }

    /// Accepts without asking or logging.
    fn resolve(&mut self, action: Action, proposed: &File) -> Step {
        self.session.record(action);
        self.session.accept(proposed);
        Step::Done(action)
    }

    pub(crate) fn log(&mut self, message: impl Display) -> Result<()> {
        if self.options.silent {
            return Ok(());
        }

        writeln!(self.writer, "{message}").map_err(ConflictError::Output)
    }

    pub(crate) fn log_raw(&mut self, text: &str) -> Result<()> {
        if self.options.silent {
            return Ok(());
        }

        self.writer
            .write_all(text.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(ConflictError::Output)
    }

    pub(crate) fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }
}
