//! Prerequisite fixtures for common toolchains.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::variables::{Value, VariableStore};
use crate::toolchain::variant::{BlasPrerequisites, Prerequisites};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// GNU compiler variables, as a compiler toolchain would publish them.
pub fn gnu_compiler_vars() -> BTreeMap<String, Value> {
    let mut vars = BTreeMap::new();
    vars.insert("CC".to_string(), Value::Scalar("gcc".to_string()));
    vars.insert("CXX".to_string(), Value::Scalar("g++".to_string()));
    for fortran in ["F77", "F90", "FC"] {
        vars.insert(fortran.to_string(), Value::Scalar("gfortran".to_string()));
    }
    vars.insert(
        "LDFLAGS".to_string(),
        Value::List(strings(&["-L/opt/gcc/lib64", "-Wl,-rpath=/opt/gcc/lib64"])),
    );
    vars
}

/// A store seeded with [`gnu_compiler_vars`].
pub fn gnu_compilers() -> VariableStore {
    let mut store = VariableStore::new();
    for (name, value) in gnu_compiler_vars() {
        store.set(name, value);
    }
    store
}

/// Prerequisites of a GNU compiler toolchain without BLAS.
pub fn gnu_compiler_prerequisites() -> Prerequisites {
    Prerequisites {
        compiler: gnu_compiler_vars(),
        blas: None,
    }
}

/// Prerequisites as published by a sequential LP64 MKL.
pub fn mkl_prerequisites() -> Prerequisites {
    Prerequisites {
        compiler: gnu_compiler_vars(),
        blas: Some(BlasPrerequisites {
            lib_dirs: Some(vec![PathBuf::from("mkl/lib/intel64")]),
            include_dirs: vec![PathBuf::from("mkl/include")],
            libs: vec![strings(&["mkl_intel_lp64", "mkl_sequential", "mkl_core"])],
            blacs_libs: vec![strings(&["mkl_blacs_intelmpi_lp64"])],
        }),
    }
}
