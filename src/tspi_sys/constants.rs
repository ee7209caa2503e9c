/* SPDX-License-Identifier: BSD-3-Clause */
/***********************************************************************************************
 * Copyright 2024-2026 Fraunhofer SIT, sponsored by the ELISA and ProSeCA research projects.
 * All rights reserved.
 **********************************************************************************************/

use super::TSS_RESULT;

pub const TSS_SUCCESS: TSS_RESULT = 0x000;

/* Error layers */
pub const TSS_LAYER_TPM: TSS_RESULT = 0x0000;
pub const TSS_LAYER_TDDL: TSS_RESULT = 0x1000;
pub const TSS_LAYER_TCS: TSS_RESULT = 0x2000;
pub const TSS_LAYER_TSP: TSS_RESULT = 0x3000;

pub const TSS_LAYER_MASK: TSS_RESULT = 0x3000;
pub const TSS_MAX_ERROR: TSS_RESULT = 0x0FFF;

/* Common error codes */
pub const TSS_E_BASE: TSS_RESULT = 0x000;
pub const TSS_E_FAIL: TSS_RESULT = TSS_E_BASE + 0x002;
pub const TSS_E_BAD_PARAMETER: TSS_RESULT = TSS_E_BASE + 0x003;
pub const TSS_E_INTERNAL_ERROR: TSS_RESULT = TSS_E_BASE + 0x004;
pub const TSS_E_OUTOFMEMORY: TSS_RESULT = TSS_E_BASE + 0x005;
pub const TSS_E_NOTIMPL: TSS_RESULT = TSS_E_BASE + 0x006;
pub const TSS_E_TPM_UNEXPECTED: TSS_RESULT = TSS_E_BASE + 0x010;
pub const TSS_E_COMM_FAILURE: TSS_RESULT = TSS_E_BASE + 0x011;
pub const TSS_E_TIMEOUT: TSS_RESULT = TSS_E_BASE + 0x012;
pub const TSS_E_CANCELED: TSS_RESULT = TSS_E_BASE + 0x016;

/* Service provider error codes */
pub const TSS_E_INVALID_OBJECT_TYPE: TSS_RESULT = TSS_E_BASE + 0x101;
pub const TSS_E_NO_CONNECTION: TSS_RESULT = TSS_E_BASE + 0x102;
pub const TSS_E_CONNECTION_FAILED: TSS_RESULT = TSS_E_BASE + 0x103;
pub const TSS_E_CONNECTION_BROKEN: TSS_RESULT = TSS_E_BASE + 0x104;
pub const TSS_E_INVALID_HANDLE: TSS_RESULT = TSS_E_BASE + 0x126;
