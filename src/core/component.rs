//! Component identity: which provider, which version, installed where.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::core::version::Version;
use crate::util::errors::ConfigurationError;

/// The role a component plays in a toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// MPI implementation
    Mpi,
    /// FFT library
    Fft,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Mpi => "mpi",
            ComponentKind::Fft => "fft",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A supported vendor implementation of a component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provider {
    /// Open MPI
    #[serde(rename = "openmpi")]
    OpenMpi,
    /// FFTW3 interfaces shipped with Intel MKL
    IntelFftw,
}

impl Provider {
    /// All built-in providers.
    pub const ALL: [Provider; 2] = [Provider::OpenMpi, Provider::IntelFftw];

    /// The CLI/config spelling of the provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenMpi => "openmpi",
            Provider::IntelFftw => "intel-fftw",
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Provider::OpenMpi => ComponentKind::Mpi,
            Provider::IntelFftw => ComponentKind::Fft,
        }
    }

    /// Name of the software module that installs this provider.
    pub fn module_name(&self) -> &'static str {
        match self {
            Provider::OpenMpi => "OpenMPI",
            Provider::IntelFftw => "imkl",
        }
    }

    /// Environment variable holding the module's installation root.
    pub fn install_root_var(&self) -> String {
        let name: String = self
            .module_name()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("EBROOT{}", name)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openmpi" | "open-mpi" => Ok(Provider::OpenMpi),
            "intel-fftw" | "intelfftw" | "imkl" => Ok(Provider::IntelFftw),
            _ => Err(ConfigurationError::UnknownProvider {
                name: s.to_string(),
            }),
        }
    }
}

/// A resolved component: immutable for the duration of a build pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    provider: Provider,
    version: Version,
    install_root: PathBuf,
}

impl Component {
    /// Create a component, parsing its version strictly.
    pub fn new(
        provider: Provider,
        version: &str,
        install_root: impl Into<PathBuf>,
    ) -> Result<Self, ConfigurationError> {
        Ok(Component {
            provider,
            version: parse_version(provider, version)?,
            install_root: install_root.into(),
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn install_root(&self) -> &Path {
        &self.install_root
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.provider.module_name(), self.version)
    }
}

/// Parse the version of `provider`, naming the provider on failure.
pub fn parse_version(provider: Provider, version: &str) -> Result<Version, ConfigurationError> {
    Version::parse(version).map_err(|e| ConfigurationError::InvalidVersion {
        component: provider.module_name().to_string(),
        version: version.to_string(),
        reason: e.to_string(),
    })
}

/// Determine the installation root of a provider.
///
/// An explicit root wins; otherwise the provider's `EBROOT*` variable is
/// read through `lookup`. An unset or empty variable is fatal.
pub fn resolve_install_root<F>(
    provider: Provider,
    explicit: Option<PathBuf>,
    lookup: F,
) -> Result<PathBuf, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(root) = explicit {
        return Ok(root);
    }

    let var = provider.install_root_var();
    match lookup(&var) {
        Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => Err(ConfigurationError::MissingInstallRoot {
            component: provider.module_name().to_string(),
            var,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse() {
        assert_eq!("openmpi".parse::<Provider>().unwrap(), Provider::OpenMpi);
        assert_eq!("OpenMPI".parse::<Provider>().unwrap(), Provider::OpenMpi);
        assert_eq!("imkl".parse::<Provider>().unwrap(), Provider::IntelFftw);
        assert_eq!(
            "intel-fftw".parse::<Provider>().unwrap(),
            Provider::IntelFftw
        );
        assert!(matches!(
            "mpich".parse::<Provider>(),
            Err(ConfigurationError::UnknownProvider { name }) if name == "mpich"
        ));
    }

    #[test]
    fn test_install_root_var() {
        assert_eq!(Provider::OpenMpi.install_root_var(), "EBROOTOPENMPI");
        assert_eq!(Provider::IntelFftw.install_root_var(), "EBROOTIMKL");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Provider::OpenMpi.kind(), ComponentKind::Mpi);
        assert_eq!(Provider::IntelFftw.kind(), ComponentKind::Fft);
    }

    #[test]
    fn test_component_rejects_bad_version() {
        let err = Component::new(Provider::OpenMpi, "1.x..", "/opt/ompi").unwrap_err();
        match err {
            ConfigurationError::InvalidVersion {
                component, version, ..
            } => {
                assert_eq!(component, "OpenMPI");
                assert_eq!(version, "1.x..");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_component_display() {
        let c = Component::new(Provider::IntelFftw, "11.2.3.187", "/opt/imkl").unwrap();
        assert_eq!(c.to_string(), "imkl 11.2.3.187");
        assert_eq!(c.install_root(), Path::new("/opt/imkl"));
    }

    #[test]
    fn test_install_root_explicit_wins() {
        let root = resolve_install_root(
            Provider::IntelFftw,
            Some(PathBuf::from("/explicit")),
            |_| Some("/from/env".to_string()),
        )
        .unwrap();
        assert_eq!(root, PathBuf::from("/explicit"));
    }

    #[test]
    fn test_install_root_from_env() {
        let root = resolve_install_root(Provider::IntelFftw, None, |var| {
            (var == "EBROOTIMKL").then(|| "/opt/imkl".to_string())
        })
        .unwrap();
        assert_eq!(root, PathBuf::from("/opt/imkl"));
    }

    #[test]
    fn test_install_root_missing_or_empty() {
        for value in [None, Some(String::new())] {
            let err = resolve_install_root(Provider::IntelFftw, None, |_| value.clone())
                .unwrap_err();
            assert!(matches!(
                err,
                ConfigurationError::MissingInstallRoot { ref var, .. } if var == "EBROOTIMKL"
            ));
        }
    }
}
