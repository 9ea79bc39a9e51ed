//! Test utilities for toolvars unit tests.
//!
//! Provides throwaway install trees with `lib<name>.a` archives, plus
//! ready-made prerequisites (see [`fixtures`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::{mkl_prerequisites, LibTree};
//!
//! #[test]
//! fn test_example() {
//!     let tree = LibTree::new();
//!     let lib = tree.dir("mkl/lib/intel64");
//!     tree.archives(&lib, &["fftw3xc_intel", "mkl_core"]);
//!     // resolve against tree.root() ...
//! }
//! ```

pub mod fixtures;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub use fixtures::*;

/// A temporary installation tree, removed on drop.
#[derive(Debug)]
pub struct LibTree {
    tmp: TempDir,
}

impl LibTree {
    pub fn new() -> Self {
        LibTree {
            tmp: TempDir::new().unwrap(),
        }
    }

    /// The root of the tree, used as an install root.
    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    /// Create a directory relative to the root and return its full path.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Create empty `lib<name>.a` archives in `dir`.
    pub fn archives(&self, dir: &Path, names: &[&str]) {
        for name in names {
            self.file(&dir.join(format!("lib{}.a", name)));
        }
    }

    /// Create an empty file, including parent directories.
    pub fn file(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }
}

impl Default for LibTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lib_tree() {
        let tree = LibTree::new();
        let lib = tree.dir("mkl/lib/intel64");
        tree.archives(&lib, &["mkl_core"]);

        assert!(lib.starts_with(tree.root()));
        assert!(lib.join("libmkl_core.a").is_file());
    }
}
