/* SPDX-License-Identifier: BSD-3-Clause */
/***********************************************************************************************
 * Copyright 2024-2026 Fraunhofer SIT, sponsored by the ELISA and ProSeCA research projects.
 * All rights reserved.
 **********************************************************************************************/

use crate::tspi_sys::{BYTE, TSS_HCONTEXT, TSS_HTPM, TSS_RESULT, UINT32};

/// The primitives of the TSS 1.2 service provider interface that are used by [`TpmContext`](crate::TpmContext).
///
/// Each method corresponds to one `Tspi_*` function and returns its "raw" `TSS_RESULT`, which is translated into an [`ErrorCode`](crate::ErrorCode) by the caller. Output values are written through the `&mut` arguments and are only meaningful if `TSS_SUCCESS` was returned.
///
/// The [`NativePlatform`] implementation forwards to the native `libtspi` and is available with the **`native`** feature. Other implementations may be provided, e.g. to talk to a different service provider or for testing.
///
/// # Safety
///
/// On success, [`tpm_get_random()`](TspiPlatform::tpm_get_random) must store a pointer to at least `length` readable *and* writable bytes (or a `NULL` pointer), which remain valid until they are passed to [`context_free_memory()`](TspiPlatform::context_free_memory).
pub unsafe trait TspiPlatform {
    /// *See also:* `Tspi_Context_Create()`
    fn context_create(&self, context: &mut TSS_HCONTEXT) -> TSS_RESULT;

    /// Connects to the default (local) TCS daemon.
    ///
    /// *See also:* `Tspi_Context_Connect()`
    fn context_connect(&self, context: TSS_HCONTEXT) -> TSS_RESULT;

    /// *See also:* `Tspi_Context_GetTpmObject()`
    fn context_get_tpm_object(&self, context: TSS_HCONTEXT, tpm: &mut TSS_HTPM) -> TSS_RESULT;

    /// *See also:* `Tspi_TPM_GetRandom()`
    fn tpm_get_random(&self, tpm: TSS_HTPM, length: UINT32, random: &mut *mut BYTE) -> TSS_RESULT;

    /// Frees the given memory block, or *all* memory associated with the context if `memory` is a `NULL` pointer.
    ///
    /// *See also:* `Tspi_Context_FreeMemory()`
    fn context_free_memory(&self, context: TSS_HCONTEXT, memory: *mut BYTE) -> TSS_RESULT;

    /// *See also:* `Tspi_Context_Close()`
    fn context_close(&self, context: TSS_HCONTEXT) -> TSS_RESULT;
}

/// Forwards all calls to the native `libtspi` library, which is linked at build time.
#[cfg(feature = "native")]
#[derive(Clone, Copy, Debug, Default)]
pub struct NativePlatform;

#[cfg(feature = "native")]
unsafe impl TspiPlatform for NativePlatform {
    fn context_create(&self, context: &mut TSS_HCONTEXT) -> TSS_RESULT {
        unsafe { crate::tspi_sys::ffi::Tspi_Context_Create(context) }
    }

    fn context_connect(&self, context: TSS_HCONTEXT) -> TSS_RESULT {
        unsafe { crate::tspi_sys::ffi::Tspi_Context_Connect(context, std::ptr::null_mut()) }
    }

    fn context_get_tpm_object(&self, context: TSS_HCONTEXT, tpm: &mut TSS_HTPM) -> TSS_RESULT {
        unsafe { crate::tspi_sys::ffi::Tspi_Context_GetTpmObject(context, tpm) }
    }

    fn tpm_get_random(&self, tpm: TSS_HTPM, length: UINT32, random: &mut *mut BYTE) -> TSS_RESULT {
        unsafe { crate::tspi_sys::ffi::Tspi_TPM_GetRandom(tpm, length, random) }
    }

    fn context_free_memory(&self, context: TSS_HCONTEXT, memory: *mut BYTE) -> TSS_RESULT {
        unsafe { crate::tspi_sys::ffi::Tspi_Context_FreeMemory(context, memory) }
    }

    fn context_close(&self, context: TSS_HCONTEXT) -> TSS_RESULT {
        unsafe { crate::tspi_sys::ffi::Tspi_Context_Close(context) }
    }
}
