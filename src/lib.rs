/* SPDX-License-Identifier: BSD-3-Clause */
/***********************************************************************************************
 * Copyright 2024-2026 Fraunhofer SIT, sponsored by the ELISA and ProSeCA research projects.
 * All rights reserved.
 **********************************************************************************************/

//! [![Rust](https://img.shields.io/badge/rust-1.82.0+-orchid?logo=rust)](https://www.rust-lang.org/)
//! [![License](https://img.shields.io/badge/license-BSD--3--Clause-blue)](https://opensource.org/licenses/BSD-3-Clause)
//!
//! # TSS 1.2 TSPI Rust Wrapper
//!
//! The **`tspi-rs`** Rust crate provides access to the hardware random number generator of a TPM, through the TCG TSS 1.2 *service provider interface* (TSPI), as implemented by the [TrouSerS](https://sourceforge.net/projects/trousers/) `libtspi` library.
//!
//! The surface of the wrapper is deliberately small: a [`TpmContext`] is opened (create, connect, get the TPM object), random bytes are requested any number of times, and the context is closed again. Every native status code is translated into one of the [`ErrorCode`] variants, raw codes never leave the crate.
//!
//! ### Disclaimer
//!
//! The current version of the API does not offer any security or code safety guarantees. Interfaces may change in such a way as to break compatibility with client code.
//!
//! ### Getting started
//!
//! The following example illustrates how to obtain random bytes from the TPM:
//!
//! ```rust,ignore
//! use log::{error, info};
//! use tspi_rs::TpmContext;
//!
//! fn main() {
//!     // Create and connect a new TPM context
//!     info!("Creating TPM context, please wait...");
//!     let mut context = match TpmContext::new() {
//!         Ok(tpm_ctx) => tpm_ctx,
//!         Err(error) => panic!("Failed to create context: {:?}", error),
//!     };
//!
//!     // Generate random
//!     match context.get_random(32) {
//!         Ok(random) => info!("Random data: {}", hex::encode(&random[..])),
//!         Err(error) => error!("get_random() failed: {:?}", error),
//!     }
//!
//!     // Release the context
//!     if let Err(error) = context.close() {
//!         error!("close() failed: {:?}", error);
//!     }
//! }
//! ```
//!
//! Please see the **[`TpmContext`]** documentation for more details!
//!
//! #### Features
//!
//! Feature  | Description
//! -------- | ---------------------------------------------------------------------------------------------------------
//! `native` | Link the native `libtspi` and provide [`NativePlatform`] as well as [`TpmContext::new()`] (not default)
//!
//! Without the `native` feature, a [`TpmContext`] can still be created on top of any [`TspiPlatform`] implementation, via [`TpmContext::with_platform()`].
//!
//! ### Prerequisites
//!
//! The `native` feature requires the **`libtspi`** library and its header files (e.g. the `libtspi-dev` package on Debian/Ubuntu), a working **C compiler** and **libclang** (required by [`bindgen`](https://crates.io/crates/bindgen)). At runtime, the TCS daemon (`tcsd`) must be running.
//!
//! By default, the library is located via [pkg-config](https://en.wikipedia.org/wiki/Pkg-config) (package `trousers`), falling back to the default linker search path. Alternatively, the location can be specified explicitly via the following *environment variables*:
//!
//! Variable            | Description
//! ------------------- | ---------------------------------------------------------------
//! `TSPI_INCLUDE_PATH` | Directory containing the `trousers/tss.h` header file
//! `TSPI_LIBRARY_PATH` | Directory containing the `libtspi.so` library
//! `TSPI_LIBRARY_VERS` | Version of the library, as reported by [`get_version()`]
//!
//! ### Logging
//!
//! The wrapper emits log messages through the [`log`](https://crates.io/crates/log) facade, but does not install a logger. Every native call is logged at the `trace` level.

#![doc(html_no_source)]

mod context;
mod error;
mod memory;
mod platform;
mod tspi_sys;
mod version;

pub use context::TpmContext;
pub use error::ErrorCode;
#[cfg(feature = "native")]
pub use platform::NativePlatform;
pub use platform::TspiPlatform;
pub use version::{get_version, TspiVersion, VersionInfo};

/// Raw TSS 1.2 types and status codes, as needed to implement a [`TspiPlatform`].
pub mod sys {
    pub use crate::tspi_sys::{constants, BYTE, TSS_HCONTEXT, TSS_HOBJECT, TSS_HTPM, TSS_RESULT, UINT32};
}
