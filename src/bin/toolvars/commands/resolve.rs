//! `toolvars resolve` command

use anyhow::{Context, Result};

use crate::cli::ResolveArgs;
use toolvars::core::variables::Value;
use toolvars::toolchain::compiler_vars::COMPILER_VARIABLES;
use toolvars::util::config::{
    global_toolchain_path, load_toolchain_file, project_toolchain_path, ToolchainFile,
};
use toolvars::util::diagnostic::{emit, Diagnostic};
use toolvars::{ComponentSpec, ToolchainSession};

pub fn execute(args: ResolveArgs, color: bool) -> Result<()> {
    let file = match &args.config {
        Some(path) => ToolchainFile::load(path)?,
        None => {
            let cwd = std::env::current_dir().context("failed to get current directory")?;
            let project_path = project_toolchain_path(&cwd);
            load_toolchain_file(global_toolchain_path().as_deref(), &project_path)?
        }
    };

    let provider = args
        .provider
        .or_else(|| file.component.provider.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no component provider given\n\
                 help: pass --provider or set `provider` in the [component] section"
            )
        })?;

    let version = args
        .component_version
        .or_else(|| file.component.version.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no version given for `{}`\n\
                 help: pass --version or set `version` in the [component] section",
                provider
            )
        })?;

    let mut spec = ComponentSpec::new(provider, version);
    spec.install_root = args.root.or_else(|| file.component.root.clone());

    let mut options = file.options.unwrap_or_default();
    options.apply_pairs(args.set)?;

    let mut prerequisites = file.prerequisites();
    for var in COMPILER_VARIABLES {
        if prerequisites.compiler.contains_key(var.source) {
            continue;
        }
        if let Some(value) = compiler_from_env(var.source) {
            tracing::debug!("{} taken from the environment", var.source);
            prerequisites.compiler.insert(var.source.to_string(), value);
        }
    }

    let session = ToolchainSession::new(spec, options, prerequisites)?;
    let resolved = session.resolve()?;

    for diagnostic in resolved.diagnostics() {
        emit(diagnostic, color);
    }
    if !resolved.usable() {
        let note = Diagnostic::note(format!(
            "{} resolved without its optional libraries",
            resolved.component()
        ));
        emit(&note, color);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        for (name, value) in resolved.iter() {
            println!("{}={}", name, value.render());
        }
    }

    Ok(())
}

/// Read a compiler variable from the process environment.
///
/// `LDFLAGS` is split on whitespace; empty values count as unset.
fn compiler_from_env(name: &str) -> Option<Value> {
    let value = std::env::var(name).ok().filter(|v| !v.trim().is_empty())?;
    if name == "LDFLAGS" {
        Some(Value::List(
            value.split_whitespace().map(str::to_string).collect(),
        ))
    } else {
        Some(Value::Scalar(value))
    }
}
