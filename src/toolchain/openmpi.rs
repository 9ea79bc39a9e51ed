//! Open MPI as the toolchain MPI library.

use crate::core::component::Provider;
use crate::core::variables::VariableStore;
use crate::toolchain::compiler_vars::{
    map_compiler_variables, COMPILER_COMMANDS, COMPILER_VARIABLES,
};
use crate::toolchain::gate::BehaviorVariant;
use crate::toolchain::libraries::link_flag_groups;
use crate::toolchain::variant::{
    ComponentVariant, Prerequisites, ResolveContext, VariantOutcome,
};
use crate::util::errors::ConfigurationError;

/// Prefix of the variables the Open MPI wrappers read the real compilers from.
pub const OMPI_PREFIX: &str = "OMPI_";

/// Name of the Open MPI library.
pub const MPI_LIBRARY_NAME: &str = "mpi";

/// Wrapper option that prints the link line.
pub const MPI_LINK_INFO_OPTION: &str = "-showme:link";

/// Wrapper commands, in `COMPILER_COMMANDS` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MpiWrappers {
    pub mpicc: &'static str,
    pub mpicxx: &'static str,
    pub mpif77: &'static str,
    pub mpif90: &'static str,
    pub mpifc: &'static str,
}

impl MpiWrappers {
    /// Wrapper names for a behavior variant.
    pub fn for_variant(variant: BehaviorVariant) -> Self {
        let (mpif77, mpif90, mpifc) = match variant {
            BehaviorVariant::UnifiedFortranWrappers => ("mpifort", "mpifort", "mpifort"),
            _ => ("mpif77", "mpif90", "mpif90"),
        };
        MpiWrappers {
            mpicc: "mpicc",
            mpicxx: "mpicxx",
            mpif77,
            mpif90,
            mpifc,
        }
    }

    fn commands(&self) -> [&'static str; 5] {
        [self.mpicc, self.mpicxx, self.mpif77, self.mpif90, self.mpifc]
    }
}

/// Open MPI. The wrappers read `OMPI_CC` etc, so no wrapper options are
/// needed on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenMpi;

impl OpenMpi {
    /// Build from the compiler toolchain's variables; every recognized
    /// compiler variable must be provided.
    pub fn from_prerequisites(
        prereqs: &Prerequisites,
    ) -> Result<Box<dyn ComponentVariant>, ConfigurationError> {
        if let Some(var) = COMPILER_VARIABLES
            .iter()
            .find(|var| !prereqs.compiler.contains_key(var.source))
        {
            return Err(ConfigurationError::MissingPrerequisite {
                component: Provider::OpenMpi.module_name().to_string(),
                name: var.source.to_string(),
            });
        }

        Ok(Box::new(OpenMpi))
    }
}

impl ComponentVariant for OpenMpi {
    fn provider(&self) -> Provider {
        Provider::OpenMpi
    }

    fn set_variables(
        &self,
        ctx: &ResolveContext<'_>,
        store: &mut VariableStore,
    ) -> Result<VariantOutcome, ConfigurationError> {
        // Capture the real compilers before CC & co. become wrapper names.
        map_compiler_variables(store, OMPI_PREFIX)?;

        let wrappers = MpiWrappers::for_variant(ctx.variant);
        for (command, wrapper) in COMPILER_COMMANDS.iter().zip(wrappers.commands()) {
            store.set_scalar(format!("MPI{}", command), wrapper);
            if ctx.options.parallel {
                tracing::debug!("{} = {} (MPI wrapper)", command, wrapper);
                store.set_scalar(*command, wrapper);
            }
        }

        let root = ctx.component.install_root();
        store.set_list("MPI_LIB_DIR", [root.join("lib").display().to_string()]);
        store.set_list(
            "MPI_INCLUDE_DIR",
            [root.join("include").display().to_string()],
        );
        store.set_list("MPI_LIB", [MPI_LIBRARY_NAME]);
        store.set_scalar("MPI_LINK_INFO_OPTION", MPI_LINK_INFO_OPTION);

        store.set_list("LIBMPI", Vec::<String>::new());
        store.append(
            "LIBMPI",
            link_flag_groups(
                &[MPI_LIBRARY_NAME.to_string()],
                false,
                ctx.options.static_linking,
            ),
        )?;

        Ok(VariantOutcome::usable())
    }
}
