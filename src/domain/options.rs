use crate::domain::file::File;
use crate::errors::{ConflictError, Result};
use futures::future::BoxFuture;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Per-file overwrite decision supplied by the caller.
pub trait OverwritePolicy: Send + Sync {
    fn should_overwrite<'a>(&'a self, proposed: &'a File) -> BoxFuture<'a, Result<bool>>;
}

impl<F> OverwritePolicy for F
where
    F: Fn(&File) -> bool + Send + Sync,
{
    fn should_overwrite<'a>(&'a self, proposed: &'a File) -> BoxFuture<'a, Result<bool>> {
        let decision = self(proposed);
        Box::pin(async move { Ok(decision) })
    }
}

/// Hook awaited right before a genuine conflict is decided. It may pre-set
/// `proposed`'s action to answer on the user's behalf.
pub trait ConflictObserver: Send + Sync {
    fn on_conflict<'a>(
        &'a self,
        proposed: &'a mut File,
        existing: &'a File,
    ) -> BoxFuture<'a, Result<()>>;
}

impl<F> ConflictObserver for F
where
    F: Fn(&mut File, &File) + Send + Sync,
{
    fn on_conflict<'a>(
        &'a self,
        proposed: &'a mut File,
        existing: &'a File,
    ) -> BoxFuture<'a, Result<()>> {
        self(proposed, existing);
        Box::pin(async { Ok(()) })
    }
}

#[derive(Clone, Default)]
pub enum Overwrite {
    /// Compare and ask.
    #[default]
    Ask,
    /// Accept every file without comparing.
    Always,
    /// Accept the files the policy approves, ask about the rest.
    When(Arc<dyn OverwritePolicy>),
}

impl fmt::Debug for Overwrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Overwrite::Ask => write!(f, "Ask"),
            Overwrite::Always => write!(f, "Always"),
            Overwrite::When(_) => write!(f, "When(..)"),
        }
    }
}

impl From<bool> for Overwrite {
    fn from(value: bool) -> Self {
        if value { Overwrite::Always } else { Overwrite::Ask }
    }
}

/// Where the existing counterpart of a proposed file lives.
#[derive(Clone)]
pub enum Destination {
    Dir(PathBuf),
    Resolve(Arc<dyn Fn(&File) -> PathBuf + Send + Sync>),
}

impl Destination {
    pub fn resolve(&self, proposed: &File) -> PathBuf {
        match self {
            Destination::Dir(dir) => dir.clone(),
            Destination::Resolve(resolver) => resolver(proposed),
        }
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Dir(dir) => write!(f, "Dir({})", dir.display()),
            Destination::Resolve(_) => write!(f, "Resolve(..)"),
        }
    }
}

impl From<&str> for Destination {
    fn from(value: &str) -> Self {
        Destination::Dir(PathBuf::from(value))
    }
}

impl From<&Path> for Destination {
    fn from(value: &Path) -> Self {
        Destination::Dir(value.to_path_buf())
    }
}

impl From<PathBuf> for Destination {
    fn from(value: PathBuf) -> Self {
        Destination::Dir(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Diff character by character even when the texts have newlines.
    pub chars: bool,
    /// Whether contents/metadata may be read from disk.
    pub fs: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions {
            chars: false,
            fs: true,
        }
    }
}

/// Everything the engine needs to know about one batch.
#[derive(Clone)]
pub struct ConflictOptions {
    pub cwd: PathBuf,
    pub dest: Option<Destination>,
    pub overwrite: Overwrite,
    pub on_conflict: Option<Arc<dyn ConflictObserver>>,
    pub silent: bool,
    pub diff_chars: bool,
    pub fs: bool,
}

impl Default for ConflictOptions {
    fn default() -> Self {
        ConflictOptions {
            cwd: std::env::current_dir().unwrap_or_default(),
            dest: None,
            overwrite: Overwrite::Ask,
            on_conflict: None,
            silent: false,
            diff_chars: false,
            fs: true,
        }
    }
}

impl fmt::Debug for ConflictOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConflictOptions")
            .field("cwd", &self.cwd)
            .field("dest", &self.dest)
            .field("overwrite", &self.overwrite)
            .field("on_conflict", &self.on_conflict.as_ref().map(|_| ".."))
            .field("silent", &self.silent)
            .field("diff_chars", &self.diff_chars)
            .field("fs", &self.fs)
            .finish()
    }
}

impl ConflictOptions {
    pub fn new(dest: impl Into<Destination>) -> Self {
        Self::default().with_dest(dest)
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn with_dest(mut self, dest: impl Into<Destination>) -> Self {
        self.dest = Some(dest.into());
        self
    }

    pub fn with_dest_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&File) -> PathBuf + Send + Sync + 'static,
    {
        self.dest = Some(Destination::Resolve(Arc::new(resolver)));
        self
    }

    pub fn with_overwrite(mut self, overwrite: impl Into<Overwrite>) -> Self {
        self.overwrite = overwrite.into();
        self
    }

    pub fn with_overwrite_policy(mut self, policy: impl OverwritePolicy + 'static) -> Self {
        self.overwrite = Overwrite::When(Arc::new(policy));
        self
    }

    pub fn with_on_conflict(mut self, observer: impl ConflictObserver + 'static) -> Self {
        self.on_conflict = Some(Arc::new(observer));
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn with_diff_chars(mut self, chars: bool) -> Self {
        self.diff_chars = chars;
        self
    }

    pub fn with_fs(mut self, fs: bool) -> Self {
        self.fs = fs;
        self
    }

    /// The configured destination; batches cannot run without one.
    pub fn destination(&self) -> Result<&Destination> {
        self.dest
            .as_ref()
            .ok_or_else(ConflictError::missing_destination)
    }

    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            chars: self.diff_chars,
            fs: self.fs,
        }
    }
}
