//! Part library lookup
//!
//! Maps a part name as written in a type 1 line (`s\3001s01.dat`,
//! `3001.DAT`, `stud`) onto a file below the library root.
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PartError, PartResult};
use crate::geometry::ParsedPart;
use crate::parser::parse_part;
use crate::resolver::DEFAULT_MAX_DEPTH;

/// File extension of LDraw part files.
pub const PART_EXTENSION: &str = "dat";

/// Subdirectories probed in order; the empty entry is the root itself.
pub const SEARCH_DIRS: [&str; 4] = ["parts", "p", "parts/s", ""];

/// Read access to the files of a part library.
pub trait PartSource {
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl PartSource for FsSource {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// Files held in memory, keyed by full path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }
}

impl PartSource for MemorySource {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }
}

/// A library root plus the source its files are read from.
#[derive(Debug, Clone)]
pub struct PartLibrary<S = FsSource> {
    root: PathBuf,
    source: S,
    pub(crate) max_depth: usize,
}

impl PartLibrary<FsSource> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_source(root, FsSource)
    }
}

impl<S: PartSource> PartLibrary<S> {
    pub fn with_source(root: impl Into<PathBuf>, source: S) -> Self {
        Self {
            root: root.into(),
            source,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Depth bound used by [`PartLibrary::resolve`] and [`PartLibrary::try_resolve`].
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Locate the file backing `name`.
    ///
    /// Falls back to the `parts/` candidate when nothing exists, so a failed
    /// lookup still reports a concrete path.
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        let base = normalize_name(name);
        let file = format!("{base}.{PART_EXTENSION}");

        SEARCH_DIRS
            .iter()
            .map(|dir| self.root.join(dir).join(&file))
            .find(|candidate| self.source.exists(candidate))
            .unwrap_or_else(|| self.root.join(SEARCH_DIRS[0]).join(&file))
    }

    /// Read and parse one part file without expanding its references.
    pub fn parse_file(&self, name: &str) -> PartResult<ParsedPart> {
        let path = self.resolve_path(name);
        if !self.source.exists(&path) {
            return Err(PartError::NotFound {
                name: name.to_string(),
                path,
            });
        }

        let contents = self
            .source
            .read_to_string(&path)
            .map_err(|source| PartError::Read {
                path: path.clone(),
                source,
            })?;

        debug!(name, path = %path.display(), "Parsing part file");
        Ok(parse_part(&contents))
    }
}

/// Forward slashes, lower case, no trailing `.dat`.
pub fn normalize_name(name: &str) -> String {
    let normalized = name.trim().replace('\\', "/").to_lowercase();
    match normalized.strip_suffix(".dat") {
        Some(base) => base.to_string(),
        None => normalized,
    }
}
