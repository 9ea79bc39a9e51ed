//! Optional interface-library resolution.
//!
//! Interface libraries (FFTW wrappers, cluster DFT, ...) are optional parts
//! of a vendor installation. The candidate list is assembled from the
//! options, every candidate is probed on disk, and the list is only
//! committed when all of them exist. A partial set is never linked against:
//! one missing archive empties the whole list and produces a diagnostic.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::core::options::OptionSet;
use crate::util::diagnostic::Diagnostic;

/// Suffix of the position-independent builds of the interface libraries.
pub const PIC_SUFFIX: &str = "_pic";

/// Default name of the cluster (distributed) DFT core library.
pub const DEFAULT_CLUSTER_CORE: &str = "mkl_cdft_core";

/// What to assemble: an interface library plus its dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRequest {
    /// Serial interface library
    pub base: String,
    /// Cluster interface library, used with MPI
    pub cluster_interface: String,
    /// Cluster core library, used with MPI
    pub cluster_core: String,
    /// Communication libraries needed by the cluster interface (e.g. BLACS)
    pub cluster_deps: Vec<Vec<String>>,
    /// Core numerical libraries, always linked
    pub core_deps: Vec<Vec<String>>,
}

impl LibraryRequest {
    /// Request for `base`, with the cluster interface named `<base>_cdft`.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        LibraryRequest {
            cluster_interface: format!("{}_cdft", base),
            base,
            cluster_core: DEFAULT_CLUSTER_CORE.to_string(),
            cluster_deps: Vec::new(),
            core_deps: Vec::new(),
        }
    }

    pub fn with_cluster_interface(mut self, name: impl Into<String>) -> Self {
        self.cluster_interface = name.into();
        self
    }

    pub fn with_cluster_core(mut self, name: impl Into<String>) -> Self {
        self.cluster_core = name.into();
        self
    }

    pub fn with_cluster_deps(mut self, deps: Vec<Vec<String>>) -> Self {
        self.cluster_deps = deps;
        self
    }

    pub fn with_core_deps(mut self, deps: Vec<Vec<String>>) -> Self {
        self.core_deps = deps;
        self
    }

    /// Assemble the ordered candidate list for the given options.
    pub fn candidates(&self, options: &OptionSet) -> Vec<String> {
        let suffix = if options.position_independent {
            PIC_SUFFIX
        } else {
            ""
        };

        let mut libs = vec![format!("{}{}", self.base, suffix)];
        if options.parallel {
            libs.push(format!("{}{}", self.cluster_interface, suffix));
            libs.push(self.cluster_core.clone());
            libs.extend(self.cluster_deps.iter().flatten().cloned());
        }
        tracing::debug!("interface libs {:?}", libs);

        libs.extend(self.core_deps.iter().flatten().cloned());
        tracing::debug!("interface libs with core {:?}", libs);

        libs
    }
}

/// A library and the directories its static archive may live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibrarySpec<'a> {
    pub name: &'a str,
    pub dirs: &'a [PathBuf],
}

impl<'a> LibrarySpec<'a> {
    pub fn new(name: &'a str, dirs: &'a [PathBuf]) -> Self {
        LibrarySpec { name, dirs }
    }

    /// File name of the static archive, `lib<name>.a`.
    pub fn archive_name(&self) -> String {
        format!("lib{}.a", self.name)
    }

    /// First directory containing the archive, if any.
    pub fn locate(&self) -> Option<&'a Path> {
        let archive = self.archive_name();
        self.dirs
            .iter()
            .find(|dir| dir.join(&archive).exists())
            .map(PathBuf::as_path)
    }
}

/// Outcome of [`resolve_libraries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryResolution {
    /// The assembled candidates, in link order
    pub candidates: Vec<String>,
    /// The committed libraries: all candidates, or nothing
    pub libs: Vec<String>,
    /// Whether the libraries can be linked against
    pub usable: bool,
    /// Candidates that were found in none of the search directories
    pub missing: Vec<String>,
    /// Set whenever `usable` is false
    pub diagnostic: Option<Diagnostic>,
}

/// Assemble, probe and commit the libraries of a request.
pub fn resolve_libraries(
    request: &LibraryRequest,
    options: &OptionSet,
    search_dirs: &[PathBuf],
) -> LibraryResolution {
    let candidates = request.candidates(options);

    if search_dirs.is_empty() {
        tracing::info!(
            "No search directories for interface libraries {:?}, leaving them unset",
            candidates
        );
        let diagnostic = Diagnostic::warning(format!(
            "no search directories given for `{}`",
            request.base
        ))
        .with_context(format!("sought: {}", candidates.join(", ")));

        return LibraryResolution {
            missing: candidates.clone(),
            candidates,
            libs: Vec::new(),
            usable: false,
            diagnostic: Some(diagnostic),
        };
    }

    let missing = probe_missing(&candidates, search_dirs);

    if missing.is_empty() {
        return LibraryResolution {
            libs: candidates.clone(),
            candidates,
            usable: true,
            missing,
            diagnostic: None,
        };
    }

    let dirs: Vec<String> = search_dirs
        .iter()
        .map(|d| d.display().to_string())
        .collect();
    tracing::info!(
        "Not all interface libraries ({:?}) are found in {:?}, leaving them unset",
        candidates,
        dirs
    );

    let diagnostic = Diagnostic::warning(format!(
        "interface libraries for `{}` are incomplete, not linking any of them",
        request.base
    ))
    .with_context(format!("sought: {}", candidates.join(", ")))
    .with_context(format!("missing: {}", missing.join(", ")))
    .with_context(format!("searched: {}", dirs.join(", ")))
    .with_suggestion("Install the optional interface libraries of the provider")
    .with_suggestion("Point the library directories at the installation that has them");

    LibraryResolution {
        candidates,
        libs: Vec::new(),
        usable: false,
        missing,
        diagnostic: Some(diagnostic),
    }
}

/// Linker flags for `libs`, as nested groups ready for
/// [`VariableStore::append`](crate::core::VariableStore::append).
///
/// `group` wraps the libraries in `--start-group`/`--end-group` so circular
/// references between them resolve; `static_only` brackets everything with
/// `-Bstatic`/`-Bdynamic`. No libraries means no flags at all.
pub fn link_flag_groups(libs: &[String], group: bool, static_only: bool) -> Vec<Vec<String>> {
    if libs.is_empty() {
        return Vec::new();
    }

    let mut groups = Vec::new();
    if static_only {
        groups.push(vec!["-Wl,-Bstatic".to_string()]);
    }
    if group {
        groups.push(vec!["-Wl,--start-group".to_string()]);
    }
    groups.push(libs.iter().map(|l| format!("-l{}", l)).collect());
    if group {
        groups.push(vec!["-Wl,--end-group".to_string()]);
    }
    if static_only {
        groups.push(vec!["-Wl,-Bdynamic".to_string()]);
    }
    groups
}

/// Candidates whose archive exists in none of `search_dirs`, in input order.
///
/// Each candidate is probed independently; the result does not depend on
/// probe order.
fn probe_missing(candidates: &[String], search_dirs: &[PathBuf]) -> Vec<String> {
    candidates
        .par_iter()
        .map(|name| LibrarySpec::new(name, search_dirs))
        .filter(|spec| spec.locate().is_none())
        .map(|spec| spec.name.to_string())
        .collect()
}
