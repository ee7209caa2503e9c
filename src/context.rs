/* SPDX-License-Identifier: BSD-3-Clause */
/***********************************************************************************************
 * Copyright 2024-2026 Fraunhofer SIT, sponsored by the ELISA and ProSeCA research projects.
 * All rights reserved.
 **********************************************************************************************/

use std::{cell::Cell, fmt::Display, marker::PhantomData, ptr};

use crate::{
    error::{create_result_from_retval, ErrorScope},
    memory::TspiMemoryHolder,
    platform::TspiPlatform,
    tspi_sys::{BYTE, TSS_HCONTEXT, TSS_HTPM, TSS_RESULT},
    ErrorCode,
};
use log::{debug, trace, warn};

#[cfg(feature = "native")]
use crate::platform::NativePlatform;

/// Wraps the native `TSS_HCONTEXT` and exposes the random number generator of the TPM.
///
/// Each context represents a logically independent connection to the TPM, via the TCS daemon. A context is created and connected using the [`new()`](TpmContext::new) function, while [closing](TpmContext::close) or [dropping](std::ops::Drop) the object frees all memory associated with the context and closes it.
///
/// The handle of the TPM object is only reachable through a live `TpmContext`, it can never outlive the context it was obtained from.
///
/// ### Return Values
///
/// All functions have a return type of [`Result<T, ErrorCode>`]. Native status codes are translated into the small set of [`ErrorCode`](crate::ErrorCode) variants before they are returned.
///
/// ### Thread Safety
///
/// Individual instances of `TpmContext` are **not** thread-safe &#128680;
///
/// `TpmContext` implements the [`Send`] trait (if its platform does), but it does **not** implement the [`Sync`] trait. Sharing a context between *concurrent* threads requires explicit synchronization in the application code, e.g. by wrapping it in an `Arc<Mutex<T>>`. This library does not serialize any calls.
///
/// ### Configuration
///
/// The context always connects to the *default* TCS daemon. The native `libtspi` honours the environment variables **`TSS_TCSD_HOSTNAME`** and **`TSS_TCSD_PORT`**, which can be set *before* creating a new context in order to connect to a different daemon.
pub struct TpmContext<P: TspiPlatform> {
    native_holder: NativeContextHolder<P>,
    tpm_handle: TSS_HTPM,
    _not_sync: PhantomData<Cell<()>>,
}

/// A struct that owns the native `TSS_HCONTEXT` handle and the platform it was created by
struct NativeContextHolder<P: TspiPlatform> {
    platform: P,
    native_context: TSS_HCONTEXT,
    released: bool,
}

// ==========================================================================
// Context implementation
// ==========================================================================

#[cfg(feature = "native")]
impl TpmContext<NativePlatform> {
    /// Creates a new context, connects it to the local TPM and obtains the handle of the TPM object.
    ///
    /// *See also:* `Tspi_Context_Create()`, `Tspi_Context_Connect()`, `Tspi_Context_GetTpmObject()`
    pub fn new() -> Result<Self, ErrorCode> {
        Self::with_platform(NativePlatform)
    }
}

impl<P: TspiPlatform> TpmContext<P> {
    /// Creates a new context using the given [`TspiPlatform`](crate::TspiPlatform) implementation, connects it to the TPM and obtains the handle of the TPM object.
    ///
    /// If connecting or obtaining the TPM object fails, the partially initialized context is released again before the error is returned.
    pub fn with_platform(platform: P) -> Result<Self, ErrorCode> {
        let mut native_context: TSS_HCONTEXT = 0;
        let error_code = platform.context_create(&mut native_context);
        trace!("Tspi_Context_Create() -> {:#x}", error_code);
        create_result_from_retval(error_code, ErrorScope::Lifecycle)?;

        let mut native_holder = NativeContextHolder::new(platform, native_context);

        native_holder.call(ErrorScope::Lifecycle, "Tspi_Context_Connect", |platform, context| platform.context_connect(context))?;

        let mut tpm_handle: TSS_HTPM = 0;
        native_holder.call(ErrorScope::Command, "Tspi_Context_GetTpmObject", |platform, context| {
            platform.context_get_tpm_object(context, &mut tpm_handle)
        })?;

        debug!("TPM context {:#x} connected, TPM object {:#x}", native_context, tpm_handle);
        Ok(Self { native_holder, tpm_handle, _not_sync: PhantomData })
    }

    /// Returns exactly `length` random bytes that have been generated by the TPM, in the order they were returned by the device.
    ///
    /// The memory that was allocated by the service provider is wiped and released before this function returns, regardless of the result. A `length` of zero yields an empty vector. Excessively large requests are rejected by the service provider, typically with [`BadParameter`](ErrorCode::BadParameter).
    ///
    /// *See also:* `Tspi_TPM_GetRandom()`
    pub fn get_random(&mut self, length: u32) -> Result<Vec<u8>, ErrorCode> {
        let tpm_handle = self.tpm_handle;
        let mut data_ptr: *mut BYTE = ptr::null_mut();

        self.native_holder.call(ErrorScope::Command, "Tspi_TPM_GetRandom", |platform, _context| {
            platform.tpm_get_random(tpm_handle, length, &mut data_ptr)
        })?;

        let expected = usize::try_from(length).map_err(|_| ErrorCode::AllocationFailure)?;
        let random = TspiMemoryHolder::from_raw(&self.native_holder.platform, self.native_holder.native_context, data_ptr, expected).to_vec(expected)?;

        debug!("Received {} random bytes from the TPM", random.len());
        Ok(random)
    }

    /// Frees all memory that the service provider has allocated on behalf of this context, then closes the context.
    ///
    /// The context is consumed; it can **not** be used or re-opened afterwards. If freeing the memory fails, that error is returned, even if closing succeeds.
    ///
    /// *See also:* `Tspi_Context_FreeMemory()`, `Tspi_Context_Close()`
    pub fn close(mut self) -> Result<(), ErrorCode> {
        self.native_holder.release()
    }

    /// Returns a reference to the underlying [`TspiPlatform`](crate::TspiPlatform) implementation.
    pub fn platform(&self) -> &P {
        &self.native_holder.platform
    }
}

impl<P: TspiPlatform> Display for TpmContext<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TpmContext({:#x})", self.native_holder.native_context)
    }
}

impl<P: TspiPlatform> std::fmt::Debug for TpmContext<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TpmContext")
            .field("native_context", &format_args!("{:#x}", self.native_holder.native_context))
            .field("tpm_handle", &format_args!("{:#x}", self.tpm_handle))
            .finish()
    }
}

// ==========================================================================
// ContextHolder implementation
// ==========================================================================

impl<P: TspiPlatform> NativeContextHolder<P> {
    fn new(platform: P, native_context: TSS_HCONTEXT) -> Self {
        Self { platform, native_context, released: false }
    }

    /// Wrapper function that performs the actual TSPI invocation and checks the return value
    fn call<F>(&mut self, scope: ErrorScope, name: &str, caller: F) -> Result<(), ErrorCode>
    where
        F: FnOnce(&P, TSS_HCONTEXT) -> TSS_RESULT,
    {
        assert!(!self.released, "TSS_HCONTEXT has already been released!");
        let error_code = caller(&self.platform, self.native_context);
        trace!("{}({:#x}) -> {:#x}", name, self.native_context, error_code);
        create_result_from_retval(error_code, scope)
    }

    /// Frees all memory of the context and closes it; does nothing if the context was released before.
    fn release(&mut self) -> Result<(), ErrorCode> {
        if self.released {
            return Ok(());
        }
        let freed = self.call(ErrorScope::Lifecycle, "Tspi_Context_FreeMemory", |platform, context| platform.context_free_memory(context, ptr::null_mut()));
        let closed = self.call(ErrorScope::Lifecycle, "Tspi_Context_Close", |platform, context| platform.context_close(context));
        self.released = true;
        debug!("TPM context {:#x} released", self.native_context);
        freed.and(closed)
    }
}

/// Release the native `TSS_HCONTEXT` as soon as the holder goes out of scope!
impl<P: TspiPlatform> Drop for NativeContextHolder<P> {
    fn drop(&mut self) {
        if let Err(error) = self.release() {
            warn!("Failed to release TPM context {:#x}: {}", self.native_context, error);
        }
    }
}
