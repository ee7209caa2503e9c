/* SPDX-License-Identifier: BSD-3-Clause */
/***********************************************************************************************
 * Copyright 2024-2026 Fraunhofer SIT, sponsored by the ELISA and ProSeCA research projects.
 * All rights reserved.
 **********************************************************************************************/

#![allow(clippy::all)]
#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(unused)]

pub mod constants;

/* Basic TSS 1.2 types, all object handles are plain 32-bit values */
pub type BYTE = u8;
pub type UINT32 = u32;
pub type TSS_RESULT = UINT32;
pub type TSS_HOBJECT = UINT32;
pub type TSS_HCONTEXT = TSS_HOBJECT;
pub type TSS_HTPM = TSS_HOBJECT;

/// Generated bindings of the service provider interface (`Tspi_*` functions)
#[cfg(feature = "native")]
pub mod ffi {
    include!(concat!(env!("OUT_DIR"), "/tspi_bindings.rs"));
}

include!(concat!(env!("OUT_DIR"), "/tspi_versinfo.rs"));
