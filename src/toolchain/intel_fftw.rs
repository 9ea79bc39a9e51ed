//! FFTW interfaces of Intel MKL as the toolchain FFT library.
//!
//! The FFTW wrapper libraries are an optional part of an MKL installation,
//! so they are probed before being committed. See
//! [`resolve_libraries`](crate::toolchain::libraries::resolve_libraries).

use std::path::PathBuf;

use crate::core::component::Provider;
use crate::core::variables::VariableStore;
use crate::toolchain::libraries::{link_flag_groups, resolve_libraries, LibraryRequest};
use crate::toolchain::variant::{
    ComponentVariant, Prerequisites, ResolveContext, VariantOutcome,
};
use crate::util::errors::ConfigurationError;

/// Serial FFTW3 interface library.
pub const FFTW_INTERFACE: &str = "fftw3xc_intel";

/// Cluster FFTW3 interface library.
pub const FFTW_CLUSTER_INTERFACE: &str = "fftw3x_cdft";

/// Cluster DFT core library.
pub const CLUSTER_DFT_CORE: &str = "mkl_cdft_core";

/// MKL libraries reference each other and must be linked as a group.
const FFT_LIB_GROUP: bool = true;

/// The interface libraries only ship as static archives.
const FFT_LIB_STATIC: bool = true;

/// Intel MKL's FFTW interfaces.
#[derive(Debug, Clone)]
pub struct IntelFftw {
    lib_dirs: Vec<PathBuf>,
    include_dirs: Vec<PathBuf>,
    blas_libs: Vec<Vec<String>>,
    blacs_libs: Vec<Vec<String>>,
}

impl IntelFftw {
    /// Build from the BLAS provider layout; the BLAS library directory is
    /// required.
    pub fn from_prerequisites(
        prereqs: &Prerequisites,
    ) -> Result<Box<dyn ComponentVariant>, ConfigurationError> {
        let missing = || ConfigurationError::MissingPrerequisite {
            component: Provider::IntelFftw.module_name().to_string(),
            name: "BLAS_LIB_DIR".to_string(),
        };
        let blas = prereqs.blas.as_ref().ok_or_else(missing)?;
        let lib_dirs = blas.lib_dirs.clone().ok_or_else(missing)?;

        Ok(Box::new(IntelFftw {
            lib_dirs,
            include_dirs: blas.include_dirs.clone(),
            blas_libs: blas.libs.clone(),
            blacs_libs: blas.blacs_libs.clone(),
        }))
    }

    fn request(&self) -> LibraryRequest {
        LibraryRequest::new(FFTW_INTERFACE)
            .with_cluster_interface(FFTW_CLUSTER_INTERFACE)
            .with_cluster_core(CLUSTER_DFT_CORE)
            .with_cluster_deps(self.blacs_libs.clone())
            .with_core_deps(self.blas_libs.clone())
    }
}

impl ComponentVariant for IntelFftw {
    fn provider(&self) -> Provider {
        Provider::IntelFftw
    }

    fn set_variables(
        &self,
        ctx: &ResolveContext<'_>,
        store: &mut VariableStore,
    ) -> Result<VariantOutcome, ConfigurationError> {
        let root = ctx.component.install_root();
        let search_dirs: Vec<PathBuf> = self.lib_dirs.iter().map(|d| root.join(d)).collect();
        let include_dirs: Vec<PathBuf> =
            self.include_dirs.iter().map(|d| root.join(d)).collect();

        store.set_list(
            "FFT_LIB_DIR",
            search_dirs.iter().map(|d| d.display().to_string()),
        );
        store.set_list(
            "FFT_INCLUDE_DIR",
            include_dirs.iter().map(|d| d.display().to_string()),
        );

        let resolution = resolve_libraries(&self.request(), ctx.options, &search_dirs);
        store.set_list("FFT_LIB", resolution.libs.iter().cloned());

        store.set_list("LIBFFT", Vec::<String>::new());
        store.append(
            "LIBFFT",
            link_flag_groups(
                &resolution.libs,
                FFT_LIB_GROUP,
                FFT_LIB_STATIC || ctx.options.static_linking,
            ),
        )?;

        Ok(VariantOutcome {
            usable: resolution.usable,
            diagnostics: resolution.diagnostic.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::component::Component;
    use crate::core::options::OptionSet;
    use crate::test_support::{mkl_prerequisites, LibTree};
    use crate::toolchain::gate::BehaviorVariant;
    use crate::toolchain::variant::BlasPrerequisites;

    fn run(tree: &LibTree, options: OptionSet) -> (VariableStore, VariantOutcome) {
        let component = Component::new(Provider::IntelFftw, "11.2.3.187", tree.root()).unwrap();
        let ctx = ResolveContext {
            component: &component,
            options: &options,
            variant: BehaviorVariant::Standard,
        };
        let variant = IntelFftw::from_prerequisites(&mkl_prerequisites()).unwrap();
        let mut store = VariableStore::new();
        let outcome = variant.set_variables(&ctx, &mut store).unwrap();
        (store, outcome)
    }

    #[test]
    fn test_serial_interfaces_found() {
        let tree = LibTree::new();
        let lib = tree.dir("mkl/lib/intel64");
        tree.archives(
            &lib,
            &["fftw3xc_intel", "mkl_intel_lp64", "mkl_sequential", "mkl_core"],
        );

        let (store, outcome) = run(&tree, OptionSet::default());

        assert!(outcome.usable);
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(
            store.list("FFT_LIB").unwrap(),
            ["fftw3xc_intel", "mkl_intel_lp64", "mkl_sequential", "mkl_core"]
        );
        assert_eq!(
            store.list("LIBFFT").unwrap(),
            [
                "-Wl,-Bstatic",
                "-Wl,--start-group",
                "-lfftw3xc_intel",
                "-lmkl_intel_lp64",
                "-lmkl_sequential",
                "-lmkl_core",
                "-Wl,--end-group",
                "-Wl,-Bdynamic"
            ]
        );
        assert_eq!(
            store.list("FFT_LIB_DIR").unwrap(),
            [lib.display().to_string()]
        );
        assert_eq!(
            store.list("FFT_INCLUDE_DIR").unwrap(),
            [tree.root().join("mkl/include").display().to_string()]
        );
    }

    #[test]
    fn test_cluster_interfaces_with_usempi_and_pic() {
        let tree = LibTree::new();
        let lib = tree.dir("mkl/lib/intel64");
        tree.archives(
            &lib,
            &[
                "fftw3xc_intel_pic",
                "fftw3x_cdft_pic",
                "mkl_cdft_core",
                "mkl_blacs_intelmpi_lp64",
                "mkl_intel_lp64",
                "mkl_sequential",
                "mkl_core",
            ],
        );

        let options = OptionSet {
            parallel: true,
            position_independent: true,
            static_linking: false,
        };
        let (store, outcome) = run(&tree, options);

        assert!(outcome.usable);
        assert_eq!(
            store.list("FFT_LIB").unwrap(),
            [
                "fftw3xc_intel_pic",
                "fftw3x_cdft_pic",
                "mkl_cdft_core",
                "mkl_blacs_intelmpi_lp64",
                "mkl_intel_lp64",
                "mkl_sequential",
                "mkl_core"
            ]
        );
    }

    #[test]
    fn test_missing_cluster_interface_leaves_fft_unset() {
        let tree = LibTree::new();
        let lib = tree.dir("mkl/lib/intel64");
        tree.archives(
            &lib,
            &[
                "fftw3xc_intel",
                "mkl_cdft_core",
                "mkl_blacs_intelmpi_lp64",
                "mkl_intel_lp64",
                "mkl_sequential",
                "mkl_core",
            ],
        );

        let options = OptionSet {
            parallel: true,
            ..OptionSet::default()
        };
        let (store, outcome) = run(&tree, options);

        assert!(!outcome.usable);
        assert!(store.list("FFT_LIB").unwrap().is_empty());
        assert!(store.list("LIBFFT").unwrap().is_empty());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(outcome.diagnostics[0]
            .format(false)
            .contains("missing: fftw3x_cdft"));
    }

    #[test]
    fn test_missing_blas_lib_dir_is_fatal() {
        let prereqs = Prerequisites {
            blas: Some(BlasPrerequisites {
                lib_dirs: None,
                ..mkl_prerequisites().blas.unwrap()
            }),
            ..Prerequisites::default()
        };
        let err = IntelFftw::from_prerequisites(&prereqs).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::MissingPrerequisite { ref name, .. } if name == "BLAS_LIB_DIR"
        ));

        let err = IntelFftw::from_prerequisites(&Prerequisites::default()).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingPrerequisite { .. }));
    }

    #[test]
    fn test_empty_lib_dirs_is_unusable_not_fatal() {
        let tree = LibTree::new();
        let prereqs = Prerequisites {
            blas: Some(BlasPrerequisites {
                lib_dirs: Some(Vec::new()),
                ..mkl_prerequisites().blas.unwrap()
            }),
            ..Prerequisites::default()
        };
        let component = Component::new(Provider::IntelFftw, "2021.4", tree.root()).unwrap();
        let options = OptionSet::default();
        let ctx = ResolveContext {
            component: &component,
            options: &options,
            variant: BehaviorVariant::Standard,
        };

        let variant = IntelFftw::from_prerequisites(&prereqs).unwrap();
        let mut store = VariableStore::new();
        let outcome = variant.set_variables(&ctx, &mut store).unwrap();

        assert!(!outcome.usable);
        assert!(store.list("FFT_LIB").unwrap().is_empty());
    }
}
