/* SPDX-License-Identifier: BSD-3-Clause */
/*******************************************************************************
 * Copyright 2024-2026 Fraunhofer SIT, sponsored by the ELISA research project.
 * All rights reserved.
 ******************************************************************************/

use crate::tspi_sys::{constants, TSS_RESULT};
use std::fmt::{self, Display};

/// The error type for TSPI operations, used by the [`TpmContext`](crate::TpmContext) struct.
///
/// Native status codes are never exposed; every code that is not recognized is reported as [`Unknown`](ErrorCode::Unknown).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A handle argument was invalid or stale.
    InvalidHandle,
    /// The service provider reported an internal failure.
    InternalError,
    /// An argument, e.g. the requested number of bytes, was rejected.
    BadParameter,
    /// Any other status code, including future or unrecognized ones.
    Unknown,
    /// The buffer for copying the result could not be allocated.
    AllocationFailure,
}

/// Selects which status codes a particular TSPI call is able to report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ErrorScope {
    /// Context lifecycle calls (connect, free, close); bad-parameter is reported as `Unknown`.
    Lifecycle,
    /// Calls that take caller arguments (get TPM object, get random).
    Command,
}

impl ErrorCode {
    /// Maps a non-success `TSS_RESULT` to an `ErrorCode`. The layer bits of the code are ignored, but any bit outside of the layer and error fields makes the code `Unknown`.
    pub(crate) fn from_raw(error_code: TSS_RESULT, scope: ErrorScope) -> Self {
        if (error_code & !(constants::TSS_LAYER_MASK | constants::TSS_MAX_ERROR)) != 0 {
            return ErrorCode::Unknown;
        }
        match (error_code & constants::TSS_MAX_ERROR, scope) {
            (constants::TSS_E_INVALID_HANDLE, _) => ErrorCode::InvalidHandle,
            (constants::TSS_E_INTERNAL_ERROR, _) => ErrorCode::InternalError,
            (constants::TSS_E_BAD_PARAMETER, ErrorScope::Command) => ErrorCode::BadParameter,
            _ => ErrorCode::Unknown,
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::InvalidHandle => write!(f, "tpm: invalid handle"),
            ErrorCode::InternalError => write!(f, "tpm: internal error"),
            ErrorCode::BadParameter => write!(f, "tpm: bad parameter"),
            ErrorCode::Unknown => write!(f, "tpm: unknown error"),
            ErrorCode::AllocationFailure => write!(f, "tpm: failed to allocate result buffer"),
        }
    }
}

impl std::error::Error for ErrorCode {}

/// Create result from `TSS_RESULT` error code
pub(crate) fn create_result_from_retval(error_code: TSS_RESULT, scope: ErrorScope) -> Result<(), ErrorCode> {
    match error_code {
        constants::TSS_SUCCESS => Ok(()),
        _ => Err(ErrorCode::from_raw(error_code, scope)),
    }
}

// ==========================================================================
// Unit tests
// ==========================================================================
