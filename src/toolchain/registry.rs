//! Variant registry - maps providers to the strategy that resolves them.
//!
//! Registry construction never fails and does no I/O. Prerequisites are
//! checked when a variant is built for a specific pass.

use std::collections::BTreeMap;

use crate::core::component::Provider;
use crate::toolchain::intel_fftw::IntelFftw;
use crate::toolchain::openmpi::OpenMpi;
use crate::toolchain::variant::{ComponentVariant, Prerequisites};
use crate::util::errors::ConfigurationError;

/// Builds a variant from the prerequisites of a pass.
pub type VariantFactory =
    fn(&Prerequisites) -> Result<Box<dyn ComponentVariant>, ConfigurationError>;

/// Registry of provider variants.
pub struct VariantRegistry {
    factories: BTreeMap<Provider, VariantFactory>,
}

impl VariantRegistry {
    /// Create a registry with all built-in variants.
    pub fn new() -> Self {
        let mut registry = VariantRegistry {
            factories: BTreeMap::new(),
        };

        registry.register(Provider::OpenMpi, OpenMpi::from_prerequisites);
        registry.register(Provider::IntelFftw, IntelFftw::from_prerequisites);

        registry
    }

    /// Register (or replace) the factory for a provider.
    pub fn register(&mut self, provider: Provider, factory: VariantFactory) {
        self.factories.insert(provider, factory);
    }

    /// Build the variant for `provider`, validating its prerequisites.
    pub fn build(
        &self,
        provider: Provider,
        prereqs: &Prerequisites,
    ) -> Result<Box<dyn ComponentVariant>, ConfigurationError> {
        let factory =
            self.factories
                .get(&provider)
                .ok_or_else(|| ConfigurationError::UnknownProvider {
                    name: provider.as_str().to_string(),
                })?;
        factory(prereqs)
    }

    /// Registered providers, in a stable order.
    pub fn providers(&self) -> impl Iterator<Item = Provider> + '_ {
        self.factories.keys().copied()
    }

    pub fn contains(&self, provider: Provider) -> bool {
        self.factories.contains_key(&provider)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for VariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}
