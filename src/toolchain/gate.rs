//! Version gating: pick a provider's behavior from its version.

use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

use crate::core::component::Provider;
use crate::core::version::Version;

/// Open MPI switched to the single `mpifort` wrapper in 1.7.
static OPENMPI_UNIFIED_FORTRAN: LazyLock<Version> =
    LazyLock::new(|| Version::from_numbers(&[1, 7]));

/// A discrete set of command names/flags selected by version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BehaviorVariant {
    /// Separate `mpif77`/`mpif90` Fortran wrappers
    LegacyFortranWrappers,
    /// One `mpifort` wrapper for every Fortran dialect
    UnifiedFortranWrappers,
    /// The provider has no version-dependent behavior
    Standard,
}

impl BehaviorVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorVariant::LegacyFortranWrappers => "legacy-fortran-wrappers",
            BehaviorVariant::UnifiedFortranWrappers => "unified-fortran-wrappers",
            BehaviorVariant::Standard => "standard",
        }
    }
}

impl fmt::Display for BehaviorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Select the behavior variant for a provider at a given version.
///
/// Thresholds are inclusive: the threshold release itself gets the newer
/// behavior.
pub fn select(provider: Provider, version: &Version) -> BehaviorVariant {
    match provider {
        Provider::OpenMpi => {
            if *version >= *OPENMPI_UNIFIED_FORTRAN {
                BehaviorVariant::UnifiedFortranWrappers
            } else {
                BehaviorVariant::LegacyFortranWrappers
            }
        }
        Provider::IntelFftw => BehaviorVariant::Standard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_openmpi_threshold_is_inclusive() {
        assert_eq!(
            select(Provider::OpenMpi, &v("1.6.5")),
            BehaviorVariant::LegacyFortranWrappers
        );
        assert_eq!(
            select(Provider::OpenMpi, &v("1.7")),
            BehaviorVariant::UnifiedFortranWrappers
        );
        assert_eq!(
            select(Provider::OpenMpi, &v("1.7.0")),
            BehaviorVariant::UnifiedFortranWrappers
        );
        assert_eq!(
            select(Provider::OpenMpi, &v("4.1.1")),
            BehaviorVariant::UnifiedFortranWrappers
        );
    }

    #[test]
    fn test_openmpi_prerelease_parts() {
        assert_eq!(
            select(Provider::OpenMpi, &v("1.6rc2")),
            BehaviorVariant::LegacyFortranWrappers
        );
        assert_eq!(
            select(Provider::OpenMpi, &v("1.10")),
            BehaviorVariant::UnifiedFortranWrappers
        );
    }

    #[test]
    fn test_intel_fftw_has_no_gate() {
        for version in ["10.3", "11.2.3.187", "2021.4.0"] {
            assert_eq!(
                select(Provider::IntelFftw, &v(version)),
                BehaviorVariant::Standard
            );
        }
    }

    #[test]
    fn test_openmpi_mixed_parts() {
        assert_eq!(
            select(Provider::OpenMpi, &v("1.6b")),
            BehaviorVariant::LegacyFortranWrappers
        );
        assert_eq!(
            select(Provider::OpenMpi, &v("1.7rc1")),
            BehaviorVariant::UnifiedFortranWrappers
        );
        assert_eq!(
            select(Provider::OpenMpi, &v("1.7a")),
            BehaviorVariant::UnifiedFortranWrappers
        );
    }

    /// Versions like `1.7`, `1.6b`, `1.7rc1` or `2.0.1a`.
    fn version_text() -> impl Strategy<Value = String> {
        "[0-9]{1,2}(\\.[0-9]{1,2}){0,2}([a-z]{1,3}[0-9]{0,1})?"
    }

    proptest! {
        #[test]
        fn prop_gate_is_monotonic(
            a in prop::collection::vec(0u64..20, 1..4),
            b in prop::collection::vec(0u64..20, 1..4),
        ) {
            let (lo, hi) = {
                let (x, y) = (Version::from_numbers(&a), Version::from_numbers(&b));
                if x <= y { (x, y) } else { (y, x) }
            };
            if select(Provider::OpenMpi, &lo) == BehaviorVariant::UnifiedFortranWrappers {
                prop_assert_eq!(
                    select(Provider::OpenMpi, &hi),
                    BehaviorVariant::UnifiedFortranWrappers
                );
            }
        }

        #[test]
        fn prop_gate_is_monotonic_with_mixed_parts(a in version_text(), b in version_text()) {
            let (x, y) = (v(&a), v(&b));
            let (lo, hi) = if x <= y { (x, y) } else { (y, x) };
            if select(Provider::OpenMpi, &lo) == BehaviorVariant::UnifiedFortranWrappers {
                prop_assert_eq!(
                    select(Provider::OpenMpi, &hi),
                    BehaviorVariant::UnifiedFortranWrappers
                );
            }
        }
    }
}
