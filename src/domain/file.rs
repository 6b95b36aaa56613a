use crate::domain::action::Action;
use crate::errors::{ConflictError, Result};
use bytes::Bytes;
use std::ffi::OsStr;
use std::io::{ErrorKind, Read};
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

static NEXT_FILE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`File`]; clones share it, new files never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u64);

impl FileId {
    fn next() -> Self {
        FileId(NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Content cache. Once `Loaded` it is authoritative and never re-read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Contents {
    #[default]
    Unloaded,
    Loaded(Bytes),
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    pub is_dir: bool,
    pub modified: Option<SystemTime>,
    pub accessed: Option<SystemTime>,
    pub created: Option<SystemTime>,
}

impl From<&std::fs::Metadata> for FileStat {
    fn from(metadata: &std::fs::Metadata) -> Self {
        FileStat {
            size: metadata.len(),
            is_dir: metadata.is_dir(),
            modified: metadata.modified().ok(),
            accessed: metadata.accessed().ok(),
            // not every platform/filesystem records a birth time
            created: metadata.created().ok(),
        }
    }
}

/// Metadata cache, same lifecycle as [`Contents`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Stat {
    #[default]
    Unloaded,
    Loaded(FileStat),
    Missing,
}

/// A proposed or existing file.
///
/// Contents and metadata are loaded lazily and at most once: call
/// [`File::ensure_contents`] / [`File::ensure_stat`] to perform the read,
/// the plain accessors never touch the disk.
#[derive(Debug, Clone)]
pub struct File {
    id: FileId,
    history: Vec<PathBuf>,
    cwd: PathBuf,
    base: Option<PathBuf>,
    contents: Contents,
    stat: Stat,
    action: Option<Action>,
}

impl File {
    /// A file at `path`, resolved against the process working directory.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::with_cwd(cwd, path)
    }

    /// A file at `path`, resolved against `cwd`.
    pub fn with_cwd(cwd: impl Into<PathBuf>, path: impl AsRef<Path>) -> Self {
        let mut file = Self::blank(cwd.into());
        file.set_path(path);
        file
    }

    /// A file with contents but no path; it can only ever be compared
    /// in memory.
    pub fn anonymous(contents: impl Into<Bytes>) -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::blank(cwd).with_contents(contents)
    }

    fn blank(cwd: PathBuf) -> Self {
        File {
            id: FileId::next(),
            history: Vec::new(),
            cwd: normalize(&cwd),
            base: None,
            contents: Contents::Unloaded,
            stat: Stat::Unloaded,
            action: None,
        }
    }

    pub fn with_contents(mut self, contents: impl Into<Bytes>) -> Self {
        self.set_contents(contents);
        self
    }

    pub fn with_base(mut self, base: impl AsRef<Path>) -> Self {
        self.set_base(base);
        self
    }

    pub fn with_stat(mut self, stat: FileStat) -> Self {
        self.stat = Stat::Loaded(stat);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// The current path, i.e. the most recent entry of the history.
    pub fn path(&self) -> Option<&Path> {
        self.history.last().map(PathBuf::as_path)
    }

    pub fn history(&self) -> &[PathBuf] {
        &self.history
    }

    /// Moves the file. The cached stat belongs to the old location and is
    /// dropped; the contents travel with the file.
    pub fn set_path(&mut self, path: impl AsRef<Path>) {
        let resolved = normalize(&self.cwd.join(path.as_ref()));
        if resolved.as_os_str().is_empty() || self.path() == Some(resolved.as_path()) {
            return;
        }

        self.history.push(resolved);
        self.stat = Stat::Unloaded;
    }

    pub fn base(&self) -> &Path {
        self.base.as_deref().unwrap_or(&self.cwd)
    }

    pub fn set_base(&mut self, base: impl AsRef<Path>) {
        self.base = Some(normalize(&self.cwd.join(base.as_ref())));
    }

    pub fn basename(&self) -> Option<&OsStr> {
        self.path().and_then(Path::file_name)
    }

    /// Extension including the leading dot, empty when there is none.
    pub fn extname(&self) -> String {
        self.path()
            .and_then(Path::extension)
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    }

    /// Display path relative to the base directory.
    pub fn relative(&self) -> String {
        match self.path() {
            Some(path) => relative_to(path, self.base()).display().to_string(),
            None => "<memory>".to_string(),
        }
    }

    pub fn contents(&self) -> Option<&Bytes> {
        match &self.contents {
            Contents::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn content_state(&self) -> &Contents {
        &self.contents
    }

    pub fn set_contents(&mut self, contents: impl Into<Bytes>) {
        self.contents = Contents::Loaded(contents.into());
    }

    /// True when no contents are available (yet).
    pub fn is_null(&self) -> bool {
        !matches!(self.contents, Contents::Loaded(_))
    }

    /// Reads the contents from disk the first time it is called; a path that
    /// does not exist leaves the file `Missing` rather than failing.
    pub fn ensure_contents(&mut self) -> Result<Option<&Bytes>> {
        if self.contents == Contents::Unloaded {
            let loaded = match self.path() {
                None => Contents::Missing,
                Some(path) => match std::fs::read(path) {
                    Ok(data) => Contents::Loaded(Bytes::from(data)),
                    Err(e) if e.kind() == ErrorKind::NotFound => Contents::Missing,
                    Err(e) => return Err(ConflictError::io(path, e)),
                },
            };
            self.contents = loaded;
        }

        Ok(self.contents())
    }

    /// Up to `len` leading bytes, without populating the content cache.
    pub fn read_chunk(&self, len: usize) -> Result<Option<Bytes>> {
        match (&self.contents, self.path()) {
            (Contents::Loaded(data), _) => Ok(Some(data.slice(..len.min(data.len())))),
            (Contents::Missing, _) | (Contents::Unloaded, None) => Ok(None),
            (Contents::Unloaded, Some(path)) => {
                let handle = match std::fs::File::open(path) {
                    Ok(handle) => handle,
                    Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
                    Err(e) => return Err(ConflictError::io(path, e)),
                };

                let mut chunk = Vec::with_capacity(len);
                handle
                    .take(len as u64)
                    .read_to_end(&mut chunk)
                    .map_err(|e| ConflictError::io(path, e))?;

                Ok(Some(Bytes::from(chunk)))
            }
        }
    }

    pub fn stat(&self) -> Option<&FileStat> {
        match &self.stat {
            Stat::Loaded(stat) => Some(stat),
            _ => None,
        }
    }

    pub fn ensure_stat(&mut self) -> Result<Option<&FileStat>> {
        if self.stat == Stat::Unloaded {
            let loaded = match self.path() {
                None => Stat::Missing,
                Some(path) => match std::fs::metadata(path) {
                    Ok(metadata) => Stat::Loaded(FileStat::from(&metadata)),
                    Err(e) if e.kind() == ErrorKind::NotFound => Stat::Missing,
                    Err(e) => return Err(ConflictError::io(path, e)),
                },
            };
            self.stat = loaded;
        }

        Ok(self.stat())
    }

    /// Answers from the cached stat only.
    pub fn is_directory(&self) -> bool {
        self.stat().is_some_and(|stat| stat.is_dir)
    }

    /// Whether there is something at this file's location. In-memory
    /// contents or a known stat count; the disk is consulted only when `fs`
    /// is allowed.
    pub fn exists(&mut self, fs: bool) -> Result<bool> {
        if !self.is_null() || self.stat().is_some() {
            return Ok(true);
        }

        if !fs || self.path().is_none() {
            return Ok(false);
        }

        Ok(self.ensure_stat()?.is_some())
    }

    /// Size in bytes from the contents if loaded, otherwise from the stat.
    pub fn size(&self) -> Option<u64> {
        self.contents()
            .map(|data| data.len() as u64)
            .or_else(|| self.stat().map(|stat| stat.size))
    }

    pub fn action(&self) -> Option<Action> {
        self.action
    }

    pub fn set_action(&mut self, action: Action) {
        self.action = Some(action);
    }

    pub fn take_action(&mut self) -> Option<Action> {
        self.action.take()
    }

    /// Writes the contents verbatim to `target`, creating parent directories.
    pub fn write_to(&mut self, target: &Path) -> Result<()> {
        let data = self
            .ensure_contents()?
            .cloned()
            .ok_or_else(|| {
                ConflictError::io(
                    self.path().unwrap_or(target),
                    std::io::Error::new(ErrorKind::NotFound, "file has no contents"),
                )
            })?;

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConflictError::io(parent, e))?;
        }
        std::fs::write(target, &data).map_err(|e| ConflictError::io(target, e))
    }
}

/// Lexical normalisation: drops `.` and folds `..` without touching the disk.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_components = path.components().collect::<Vec<_>>();
    let base_components = base.components().collect::<Vec<_>>();

    let common = path_components
        .iter()
        .zip(base_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_components.len() {
        relative.push("..");
    }
    for component in &path_components[common..] {
        relative.push(component.as_os_str());
    }
    relative
}
