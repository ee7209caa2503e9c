/* SPDX-License-Identifier: BSD-3-Clause */
/*******************************************************************************
 * Copyright 2024-2026, Fraunhofer SIT sponsored by the ELISA research project
 * All rights reserved.
 ******************************************************************************/

use std::{fmt::Display, sync::OnceLock};

static VERSION_INFO_PKG: OnceLock<VersionInfo> = OnceLock::new();
static VERSION_INFO_SYS: OnceLock<VersionInfo> = OnceLock::new();

/// Contains version information.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VersionInfo {
    /// The *major* version of the software.
    pub major: u16,
    /// The *minor* version of the software.
    pub minor: u16,
    /// The *patch* level of the software.
    pub patch: u16,
}

/// The versions returned by [`get_version()`].
#[derive(Clone, Copy, Debug)]
pub struct TspiVersion {
    /// The version of the **`tspi-rs`** package.
    pub package: &'static VersionInfo,
    /// The version of the "native" `libtspi` that was detected at build time.
    pub library: &'static VersionInfo,
}

/// Returns the package version of the **`tspi-rs`** library.
///
/// Additionally, the version of the "native" `libtspi` that was detected when `tspi-rs` was built is returned. If the library version could not be detected, the version of the last TrouSerS release is assumed.
pub fn get_version() -> TspiVersion {
    TspiVersion {
        package: VERSION_INFO_PKG.get_or_init(|| parse_version(env!("CARGO_PKG_VERSION", "Package version not defined!"))),
        library: VERSION_INFO_SYS.get_or_init(|| parse_version(crate::tspi_sys::TSPI_VERSION)),
    }
}

/// Parse a version string that is in the `"major.minor.patch"` format into a [`VersionInfo`] struct.
fn parse_version(version_string: &str) -> VersionInfo {
    let mut tokens = version_string.split('.').map(|str| str.parse::<u16>().unwrap_or_default());
    VersionInfo {
        major: tokens.next().unwrap_or_default(),
        minor: tokens.next().unwrap_or_default(),
        patch: tokens.next().unwrap_or_default(),
    }
}

/// Convert the `VersionInfo` struct to a string in the `"major.minor.patch"` format
impl Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

// ==========================================================================
// Unit tests
// ==========================================================================
