use crate::areas::conflicts::Conflicts;
use crate::domain::file::File;
use crate::domain::options::{ConflictOptions, Destination};
use crate::domain::prompt::Prompt;
use crate::errors::{ConflictError, Result};
use futures::{Stream, StreamExt};
use std::path::Path;

impl<P: Prompt> Conflicts<P> {
    /// Runs a batch over `paths`, one file at a time and in order, and returns
    /// the files approved for writing.
    ///
    /// Every call starts a fresh session; it stays available through
    /// [`Conflicts::session`] afterwards.
    pub async fn files<I, T>(&mut self, paths: I) -> Result<Vec<File>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<Path>,
    {
        let dest = self.options().destination()?.clone();
        self.reset();

        for path in paths {
            let mut proposed = File::with_cwd(&self.options().cwd, path);
            let mut existing = self.existing_for(&dest, &proposed)?;
            self.detect(&mut proposed, &mut existing).await?;
        }

        Ok(self.session().files().to_vec())
    }

    /// Stream form of [`Conflicts::files`]. Files without contents are
    /// passed over, and nothing is returned before the stream ends.
    pub async fn filter_stream<S>(&mut self, mut stream: S) -> Result<Vec<File>>
    where
        S: Stream<Item = File> + Unpin,
    {
        let dest = self.options().destination()?.clone();
        self.reset();

        while let Some(mut proposed) = stream.next().await {
            if self.session().is_aborted() {
                continue;
            }

            if self.options().fs && proposed.ensure_stat()?.is_some_and(|stat| !stat.is_dir) {
                proposed.ensure_contents()?;
            }
            if proposed.is_null() {
                continue;
            }

            let mut existing = self.existing_for(&dest, &proposed)?;
            self.detect(&mut proposed, &mut existing).await?;
        }

        Ok(self.session().files().to_vec())
    }

    /// The file the proposed one would replace: same name, inside the
    /// resolved destination directory.
    pub(crate) fn existing_for(&self, dest: &Destination, proposed: &File) -> Result<File> {
        let name = proposed.basename().ok_or_else(|| {
            ConflictError::Configuration(format!(
                "'{}' does not name a file",
                proposed.relative()
            ))
        })?;

        let cwd = &self.options().cwd;
        let dir = cwd.join(dest.resolve(proposed));

        Ok(File::with_cwd(cwd, dir.join(name)).with_base(dir))
    }
}

/// One-shot batch reporting to stderr.
pub async fn files<I, T, P>(paths: I, options: ConflictOptions, prompt: P) -> Result<Vec<File>>
where
    I: IntoIterator<Item = T>,
    T: AsRef<Path>,
    P: Prompt,
{
    Conflicts::new(options, prompt, Box::new(std::io::stderr()))
        .files(paths)
        .await
}
