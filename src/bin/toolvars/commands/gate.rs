//! `toolvars gate` command

use anyhow::Result;

use crate::cli::GateArgs;
use toolvars::core::component::parse_version;
use toolvars::toolchain::gate;
use toolvars::Provider;

pub fn execute(args: GateArgs) -> Result<()> {
    let provider: Provider = args.provider.parse()?;
    let version = parse_version(provider, &args.component_version)?;

    println!("{} {}: {}", provider, version, gate::select(provider, &version));

    Ok(())
}
