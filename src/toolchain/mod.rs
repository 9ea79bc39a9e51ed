//! Toolchain variable resolution.
//!
//! A pass runs in a fixed order:
//! 1. [`gate::select`] picks the behavior variant from the component version
//! 2. the provider's [`ComponentVariant`] maps compiler variables
//!    ([`compiler_vars`]) before applying any wrapper overrides
//! 3. optional libraries are assembled and probed ([`libraries`])
//!
//! Variants are looked up in a [`VariantRegistry`] keyed by provider.

pub mod compiler_vars;
pub mod gate;
pub mod intel_fftw;
pub mod libraries;
pub mod openmpi;
pub mod registry;
pub mod variant;

pub use gate::BehaviorVariant;
pub use libraries::{resolve_libraries, LibraryRequest, LibraryResolution, LibrarySpec};
pub use registry::VariantRegistry;
pub use variant::{BlasPrerequisites, ComponentVariant, Prerequisites, ResolveContext};
