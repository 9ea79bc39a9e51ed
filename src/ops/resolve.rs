//! Toolchain resolution pass.
//!
//! A [`ToolchainSession`] validates everything that can be fatal when it is
//! constructed: provider, version, install root and the provider's
//! prerequisites. [`ToolchainSession::resolve`] then runs one pass over a
//! fresh [`VariableStore`] and returns the frozen result.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::component::{resolve_install_root, Component, Provider};
use crate::core::options::OptionSet;
use crate::core::variables::{Value, VariableStore};
use crate::toolchain::gate::{self, BehaviorVariant};
use crate::toolchain::registry::VariantRegistry;
use crate::toolchain::variant::{ComponentVariant, Prerequisites, ResolveContext};
use crate::util::diagnostic::Diagnostic;
use crate::util::errors::{ConfigurationError, VariableError};

/// Caller-supplied identity of the component to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSpec {
    /// Provider name, e.g. `openmpi` or `intel-fftw`
    pub provider: String,
    /// Detected version string
    pub version: String,
    /// Installation root; read from the provider's `EBROOT*` variable when unset
    pub install_root: Option<PathBuf>,
}

impl ComponentSpec {
    pub fn new(provider: impl Into<String>, version: impl Into<String>) -> Self {
        ComponentSpec {
            provider: provider.into(),
            version: version.into(),
            install_root: None,
        }
    }

    pub fn with_install_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.install_root = Some(root.into());
        self
    }
}

/// One component + option set, ready to be resolved.
#[derive(Debug)]
pub struct ToolchainSession {
    component: Component,
    options: OptionSet,
    prerequisites: Prerequisites,
    variant: Box<dyn ComponentVariant>,
}

impl ToolchainSession {
    /// Create a session, reading install roots from the process environment.
    pub fn new(
        spec: ComponentSpec,
        options: OptionSet,
        prerequisites: Prerequisites,
    ) -> Result<Self, ConfigurationError> {
        Self::with_env(spec, options, prerequisites, |var| std::env::var(var).ok())
    }

    /// Create a session with an explicit environment lookup.
    pub fn with_env<F>(
        spec: ComponentSpec,
        options: OptionSet,
        prerequisites: Prerequisites,
        lookup: F,
    ) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::with_registry(&VariantRegistry::new(), spec, options, prerequisites, lookup)
    }

    /// Create a session against a custom variant registry.
    pub fn with_registry<F>(
        registry: &VariantRegistry,
        spec: ComponentSpec,
        options: OptionSet,
        prerequisites: Prerequisites,
        lookup: F,
    ) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider: Provider = spec.provider.parse()?;
        let root = resolve_install_root(provider, spec.install_root, lookup)?;
        let component = Component::new(provider, &spec.version, root)?;
        let variant = registry.build(provider, &prerequisites)?;

        tracing::debug!(
            "Resolving {} at {} with {:?}",
            component,
            component.install_root().display(),
            options
        );

        Ok(ToolchainSession {
            component,
            options,
            prerequisites,
            variant,
        })
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Run one resolution pass.
    ///
    /// Every call starts from a fresh store seeded with the prerequisite
    /// compiler variables, so repeated calls give identical results.
    pub fn resolve(&self) -> Result<ResolvedToolchainConfig, ConfigurationError> {
        let mut store = VariableStore::new();
        for (name, value) in &self.prerequisites.compiler {
            store.set(name.clone(), value.clone());
        }

        let variant = gate::select(self.component.provider(), self.component.version());
        tracing::debug!("{} selects {}", self.component, variant);

        let ctx = ResolveContext {
            component: &self.component,
            options: &self.options,
            variant,
        };
        let outcome = self.variant.set_variables(&ctx, &mut store)?;

        Ok(ResolvedToolchainConfig {
            component: self.component.clone(),
            options: self.options,
            variant,
            usable: outcome.usable,
            variables: store,
            diagnostics: outcome.diagnostics,
        })
    }
}

/// The variables resolved for one component + option set.
///
/// Read-only: it is discarded and recomputed when the options change.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedToolchainConfig {
    component: Component,
    options: OptionSet,
    variant: BehaviorVariant,
    usable: bool,
    variables: VariableStore,
    diagnostics: Vec<Diagnostic>,
}

impl ResolvedToolchainConfig {
    pub fn component(&self) -> &Component {
        &self.component
    }

    pub fn install_root(&self) -> &Path {
        self.component.install_root()
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn variant(&self) -> BehaviorVariant {
        self.variant
    }

    /// False when optional libraries were left out.
    pub fn usable(&self) -> bool {
        self.usable
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn get(&self, name: &str) -> Result<&Value, VariableError> {
        self.variables.get(name)
    }

    pub fn scalar(&self, name: &str) -> Result<&str, VariableError> {
        self.variables.scalar(name)
    }

    /// A list variable, flattened and in link order.
    pub fn list(&self, name: &str) -> Result<&[String], VariableError> {
        self.variables.list(name)
    }

    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.variables.iter()
    }
}
