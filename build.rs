/* SPDX-License-Identifier: BSD-3-Clause */
/***********************************************************************************************
 * Copyright 2024-2026 Fraunhofer SIT, sponsored by the ELISA and ProSeCA research projects.
 * All rights reserved.
 **********************************************************************************************/

use std::{
    env,
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

/// The name of the native TSS 1.2 service provider library
#[cfg_attr(not(feature = "native"), allow(dead_code))]
const LIBRARY_NAME: &str = "tspi";

/// The name of the pkg-config package, if the distribution ships one
#[cfg_attr(not(feature = "native"), allow(dead_code))]
const PACKAGE_NAME: &str = "trousers";

/// Version assumed when it can not be detected; this is the last TrouSerS release
const LIBRARY_DEFAULT_VERSION: &str = "0.3.15";

/// This build script detects and links the "native" libtspi, if the `native` feature is enabled
fn main() {
    println!("cargo:rerun-if-env-changed=TSPI_INCLUDE_PATH");
    println!("cargo:rerun-if-env-changed=TSPI_LIBRARY_PATH");
    println!("cargo:rerun-if-env-changed=TSPI_LIBRARY_VERS");

    // Get the output directory
    let out_path = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is not defined!"));

    // Generate bindings and link the library, or just record the default version
    let version = native::configure(&out_path);

    // Persist the detected library version
    if !write_version_string(&out_path.join("tspi_versinfo.rs"), &version) {
        panic!("Failed to write library version!");
    }
}

#[cfg(feature = "native")]
mod native {
    use super::{LIBRARY_DEFAULT_VERSION, LIBRARY_NAME, PACKAGE_NAME};
    use std::{env, path::Path, path::PathBuf};

    /// Library configuration type definition
    type LibraryConfig = (Vec<String>, Vec<PathBuf>, Vec<PathBuf>, String);

    /// Functions of the service provider interface that are used by the wrapper
    const FUNCTIONS: &[&str] = &[
        "Tspi_Context_Create",
        "Tspi_Context_Connect",
        "Tspi_Context_GetTpmObject",
        "Tspi_Context_FreeMemory",
        "Tspi_Context_Close",
        "Tspi_TPM_GetRandom",
    ];

    pub fn configure(out_path: &Path) -> String {
        // Detect the native libtspi location
        let tspi = detect_tspi_library();

        // Add the required libraries to be linked
        for library_name in tspi.0 {
            assert!(!library_name.is_empty(), "library name is empty!");
            println!("cargo:rustc-link-lib={}", library_name);
        }

        // Add the required linker search paths
        for link_path in tspi.1 {
            assert!(link_path.is_dir(), "Link path not found: {:?}", link_path);
            println!("cargo:rustc-link-search={}", link_path.to_str().unwrap());
        }

        // Initialize `bindgen` builder with the required include directories
        let mut bindgen_builder = bindgen::Builder::default();
        for inc_path in tspi.2 {
            assert!(inc_path.is_dir(), "Include path not found: {:?}", inc_path);
            bindgen_builder = bindgen_builder.clang_arg(format!("-I{}", inc_path.to_str().unwrap()));
        }
        for function in FUNCTIONS {
            bindgen_builder = bindgen_builder.allowlist_function(function);
        }

        // Invoke the `bindgen` for the service provider interface
        bindgen_builder
            .header_contents("wrapper.h", "#include <trousers/tss.h>")
            .layout_tests(false)
            .parse_callbacks(Box::new(bindgen::CargoCallbacks::new()))
            .generate()
            .expect("Unable to generate TSPI bindings")
            .write_to_file(out_path.join("tspi_bindings.rs"))
            .expect("Failed to write TSPI bindings!");

        tspi.3
    }

    /// Detect the native libtspi
    ///
    /// Uses the environment variables `TSPI_INCLUDE_PATH` and `TSPI_LIBRARY_PATH`, if defined. Otherwise try **pkg-config**, then fall back to the default search path.
    fn detect_tspi_library() -> LibraryConfig {
        let env_include_path = env::var("TSPI_INCLUDE_PATH").map(PathBuf::from);
        let env_library_path = env::var("TSPI_LIBRARY_PATH").map(PathBuf::from);
        let library_version = env::var("TSPI_LIBRARY_VERS").ok();

        // Shortcut if `TSPI_INCLUDE_PATH` and `TSPI_LIBRARY_PATH` are defined
        if let (Ok(include_path), Ok(library_path)) = (env_include_path, env_library_path) {
            let version = library_version.unwrap_or_else(|| LIBRARY_DEFAULT_VERSION.to_owned());
            return (vec![LIBRARY_NAME.to_owned()], vec![library_path], vec![include_path], version);
        }

        // Most distributions do not ship a `trousers.pc`, so a failed probe is not fatal
        match pkg_config::Config::new().cargo_metadata(false).probe(PACKAGE_NAME) {
            Ok(config) => (config.libs, config.link_paths, config.include_paths, library_version.unwrap_or(config.version)),
            Err(_) => (vec![LIBRARY_NAME.to_owned()], Vec::new(), Vec::new(), library_version.unwrap_or_else(|| LIBRARY_DEFAULT_VERSION.to_owned())),
        }
    }
}

#[cfg(not(feature = "native"))]
mod native {
    use super::LIBRARY_DEFAULT_VERSION;
    use std::{env, path::Path};

    pub fn configure(_out_path: &Path) -> String {
        env::var("TSPI_LIBRARY_VERS").unwrap_or_else(|_| LIBRARY_DEFAULT_VERSION.to_owned())
    }
}

/// Persist the version string to output file, so that it can be evaluated in the code at runtime
fn write_version_string(path: &Path, version_string: &str) -> bool {
    // Parse the version string, assuming that is is in the `"major.minor.patch"` format
    let mut tokens = version_string.split('.');
    let vers_major = tokens.next().unwrap_or_default().parse::<u16>().expect("Failed to parse version string!");
    let vers_minor = tokens.next().unwrap_or_default().parse::<u16>().expect("Failed to parse version string!");
    let vers_patch = tokens.next().unwrap_or_default().parse::<u16>().unwrap_or_default();

    // Try to write the version string to the output file
    let mut file = File::create(path).expect("Failed to create output file for version!");
    writeln!(file, r#"pub const TSPI_VERSION: &str = "{}.{}.{}";"#, vers_major, vers_minor, vers_patch).is_ok()
}
