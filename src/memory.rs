/* SPDX-License-Identifier: BSD-3-Clause */
/*******************************************************************************
 * Copyright 2024-2026 Fraunhofer SIT, sponsored by the ELISA research project.
 * All rights reserved.
 ******************************************************************************/

use crate::{
    error::{create_result_from_retval, ErrorScope},
    platform::TspiPlatform,
    tspi_sys::{BYTE, TSS_HCONTEXT},
    ErrorCode,
};
use log::{trace, warn};
use std::{ffi::c_void, ptr, slice};

#[cfg(target_os = "linux")]
use libc::explicit_bzero;

// ==========================================================================
// TspiMemoryHolder
// ==========================================================================

/// Wrapper class to hold a data pointer returned by the native TSPI.
///
/// Assumes that the pointed-to memory was allocated by the service provider on behalf of `context` and therefore automatically releases the pointed-to memory, by calling `Tspi_Context_FreeMemory()`, when the `TspiMemoryHolder` instance is dropped.
pub(crate) struct TspiMemoryHolder<'a, P: TspiPlatform> {
    platform: &'a P,
    context: TSS_HCONTEXT,
    data_ptr: *mut BYTE,
    length: usize,
}

impl<'a, P: TspiPlatform> TspiMemoryHolder<'a, P> {
    /// Creates a new `TspiMemoryHolder` from a "raw" pointer and a length. The pointer can be a `NULL` pointer, in which case the `length` is ignored.
    pub fn from_raw(platform: &'a P, context: TSS_HCONTEXT, data_ptr: *mut BYTE, length: usize) -> Self {
        Self {
            platform,
            context,
            data_ptr,
            length: if !data_ptr.is_null() { length } else { 0usize },
        }
    }

    /// Copies the wrapped data into a new `Vec<u8>`, so that it can remain valid after this `TspiMemoryHolder` instance was dropped.
    pub fn to_vec(&self, expected: usize) -> Result<Vec<u8>, ErrorCode> {
        copy_from_raw(self.data_ptr, self.length, expected)
    }
}

impl<P: TspiPlatform> Drop for TspiMemoryHolder<'_, P> {
    fn drop(&mut self) {
        if !self.data_ptr.is_null() {
            erase_memory(self.data_ptr, self.length);
            let error_code = self.platform.context_free_memory(self.context, self.data_ptr);
            trace!("Tspi_Context_FreeMemory({:#x}, {:p}) -> {:#x}", self.context, self.data_ptr, error_code);
            if let Err(error) = create_result_from_retval(error_code, ErrorScope::Lifecycle) {
                warn!("Failed to release memory of context {:#x}: {}", self.context, error);
            }
            self.data_ptr = ptr::null_mut();
        }
    }
}

// ==========================================================================
// Utilities
// ==========================================================================

/// Copies `expected` bytes out of a buffer of `available` bytes that is owned by the service provider.
///
/// Fails with [`AllocationFailure`](ErrorCode::AllocationFailure) if the target buffer can not be allocated, or with [`Unknown`](ErrorCode::Unknown) if the pointer is `NULL` or the buffer is too short, although `expected` bytes were requested.
fn copy_from_raw(data_ptr: *const BYTE, available: usize, expected: usize) -> Result<Vec<u8>, ErrorCode> {
    if expected == 0usize {
        return Ok(Vec::new());
    }
    if data_ptr.is_null() || (available < expected) {
        return Err(ErrorCode::Unknown);
    }

    let mut buffer = Vec::new();
    buffer.try_reserve_exact(expected).map_err(|_| ErrorCode::AllocationFailure)?;
    buffer.extend_from_slice(unsafe { slice::from_raw_parts(data_ptr, expected) });
    Ok(buffer)
}

fn erase_memory(address: *mut BYTE, length: usize) {
    #[cfg(target_os = "linux")]
    unsafe {
        explicit_bzero(address as *mut c_void, length);
    }
    #[cfg(not(target_os = "linux"))]
    unsafe {
        ptr::write_bytes(address as *mut c_void, 0u8, length);
    }
}

// ==========================================================================
// Unit tests
// ==========================================================================
