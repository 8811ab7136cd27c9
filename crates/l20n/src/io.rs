//! Resource stream abstraction.
//!
//! The core never touches the filesystem directly: every manifest and
//! resource file is read through a [`ResourceLoader`], so a host can
//! redirect loading through its own asset-bundling scheme. Two loaders are
//! bundled: [`FileLoader`] for directory-rooted file access and
//! [`MemoryLoader`] for in-memory resources (tests, embedded assets).

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

/// Resolves logical resource paths to readable streams.
pub trait ResourceLoader {
    /// Open a readable stream for a logical resource path.
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>>;

    /// Read an entire resource into a string.
    fn read_to_string(&self, path: &str) -> io::Result<String> {
        let mut content = String::new();
        self.open(path)?.read_to_string(&mut content)?;
        Ok(content)
    }
}

/// A loader that resolves paths against a root directory.
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    /// Create a loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ResourceLoader for FileLoader {
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        let file = File::open(self.root.join(path))?;
        Ok(Box::new(file))
    }
}

/// A loader serving resources from an in-memory map.
#[derive(Default)]
pub struct MemoryLoader {
    files: BTreeMap<String, String>,
}

impl MemoryLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource under a logical path.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    /// Register a resource and return the loader, for chained setup.
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }
}

impl ResourceLoader for MemoryLoader {
    fn open(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        match self.files.get(path) {
            Some(content) => Ok(Box::new(content.as_bytes())),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such resource: {path}"),
            )),
        }
    }
}
