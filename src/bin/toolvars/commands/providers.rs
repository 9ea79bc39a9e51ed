//! `toolvars providers` command

use anyhow::Result;

use crate::cli::ProvidersArgs;
use toolvars::VariantRegistry;

pub fn execute(_args: ProvidersArgs) -> Result<()> {
    let registry = VariantRegistry::new();

    for provider in registry.providers() {
        println!(
            "{:<12} {:<4} {:<8} {}",
            provider.as_str(),
            provider.kind().as_str(),
            provider.module_name(),
            provider.install_root_var()
        );
    }

    Ok(())
}
