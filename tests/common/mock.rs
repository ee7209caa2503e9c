/* SPDX-License-Identifier: BSD-3-Clause */
/***********************************************************************************************
 * Copyright 2024-2026 Fraunhofer SIT, sponsored by the ELISA and ProSeCA research projects.
 * All rights reserved.
 **********************************************************************************************/

#![allow(dead_code)]

use super::random::create_seed;
use log::trace;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaChaRng;
use std::{
    collections::{HashMap, HashSet},
    ptr,
    sync::{Arc, Mutex, MutexGuard},
};
use tspi_rs::{
    sys::{
        constants::{TSS_E_BAD_PARAMETER, TSS_E_INVALID_HANDLE, TSS_LAYER_TSP, TSS_SUCCESS},
        BYTE, TSS_HCONTEXT, TSS_HTPM, TSS_RESULT, UINT32,
    },
    TspiPlatform,
};

/* Defaults */
const MAX_RANDOM_LENGTH: UINT32 = 0x0010_0000;
const FIRST_CONTEXT_HANDLE: TSS_HCONTEXT = 0x0000_1001;
const TPM_HANDLE_FLAG: TSS_HTPM = 0x4000_0000;

/// The TSPI functions that can be observed and made to fail
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TspiCall {
    Create,
    Connect,
    GetTpmObject,
    GetRandom,
    FreeMemory,
    Close,
}

struct MockState {
    rng: ChaChaRng,
    failures: HashMap<TspiCall, TSS_RESULT>,
    calls: Vec<TspiCall>,
    next_handle: TSS_HCONTEXT,
    contexts: HashSet<TSS_HCONTEXT>,
    connected: HashSet<TSS_HCONTEXT>,
    tpm_objects: HashMap<TSS_HTPM, TSS_HCONTEXT>,
    allocations: HashMap<usize, (TSS_HCONTEXT, usize)>,
    wiped_blocks: usize,
}

/// Software stand-in for `libtspi` that tracks handles and allocations, and supports fault injection.
///
/// Clones share their state, so a clone can be kept to inspect the mock after it was moved into a context.
#[derive(Clone)]
pub struct MockPlatform {
    state: Arc<Mutex<MockState>>,
}

impl MockPlatform {
    pub fn new(seed: u64) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                rng: ChaChaRng::from_seed(create_seed(seed)),
                failures: HashMap::new(),
                calls: Vec::new(),
                next_handle: FIRST_CONTEXT_HANDLE,
                contexts: HashSet::new(),
                connected: HashSet::new(),
                tpm_objects: HashMap::new(),
                allocations: HashMap::new(),
                wiped_blocks: 0usize,
            })),
        }
    }

    /// Make every subsequent invocation of `call` return `error_code`
    pub fn fail(&self, call: TspiCall, error_code: TSS_RESULT) {
        self.lock().failures.insert(call, error_code);
    }

    pub fn heal(&self, call: TspiCall) {
        self.lock().failures.remove(&call);
    }

    pub fn calls(&self) -> Vec<TspiCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, call: TspiCall) -> usize {
        self.lock().calls.iter().filter(|entry| **entry == call).count()
    }

    pub fn open_contexts(&self) -> usize {
        self.lock().contexts.len()
    }

    pub fn outstanding_allocations(&self) -> usize {
        self.lock().allocations.len()
    }

    /// Number of blocks that have been zeroed by the caller before they were freed
    pub fn wiped_blocks(&self) -> usize {
        self.lock().wiped_blocks
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl MockState {
    fn enter(&mut self, call: TspiCall) -> Option<TSS_RESULT> {
        self.calls.push(call);
        self.failures.get(&call).copied()
    }

    fn release(&mut self, address: usize, length: usize) {
        let data = unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(address as *mut BYTE, length)) };
        if data.iter().all(|value| *value == 0u8) {
            self.wiped_blocks += 1usize;
        }
    }

    fn release_all(&mut self, context: TSS_HCONTEXT) {
        let owned: Vec<(usize, usize)> = self.allocations.iter().filter(|(_, (owner, _))| *owner == context).map(|(address, (_, length))| (*address, *length)).collect();
        for (address, length) in owned {
            self.allocations.remove(&address);
            self.release(address, length);
        }
    }
}

unsafe impl TspiPlatform for MockPlatform {
    fn context_create(&self, context: &mut TSS_HCONTEXT) -> TSS_RESULT {
        let mut state = self.lock();
        if let Some(error_code) = state.enter(TspiCall::Create) {
            return error_code;
        }
        let handle = state.next_handle;
        state.next_handle += 1;
        state.contexts.insert(handle);
        *context = handle;
        TSS_SUCCESS
    }

    fn context_connect(&self, context: TSS_HCONTEXT) -> TSS_RESULT {
        let mut state = self.lock();
        if let Some(error_code) = state.enter(TspiCall::Connect) {
            return error_code;
        }
        if !state.contexts.contains(&context) {
            return TSS_LAYER_TSP | TSS_E_INVALID_HANDLE;
        }
        state.connected.insert(context);
        TSS_SUCCESS
    }

    fn context_get_tpm_object(&self, context: TSS_HCONTEXT, tpm: &mut TSS_HTPM) -> TSS_RESULT {
        let mut state = self.lock();
        if let Some(error_code) = state.enter(TspiCall::GetTpmObject) {
            return error_code;
        }
        if !state.connected.contains(&context) {
            return TSS_LAYER_TSP | TSS_E_INVALID_HANDLE;
        }
        let handle = context | TPM_HANDLE_FLAG;
        state.tpm_objects.insert(handle, context);
        *tpm = handle;
        TSS_SUCCESS
    }

    fn tpm_get_random(&self, tpm: TSS_HTPM, length: UINT32, random: &mut *mut BYTE) -> TSS_RESULT {
        let mut state = self.lock();
        if let Some(error_code) = state.enter(TspiCall::GetRandom) {
            return error_code;
        }
        let context = match state.tpm_objects.get(&tpm) {
            Some(context) if state.connected.contains(context) => *context,
            _ => return TSS_LAYER_TSP | TSS_E_INVALID_HANDLE,
        };
        if length > MAX_RANDOM_LENGTH {
            return TSS_LAYER_TSP | TSS_E_BAD_PARAMETER;
        }
        if length == 0 {
            *random = ptr::null_mut();
            return TSS_SUCCESS;
        }
        let mut data = vec![0u8; length as usize].into_boxed_slice();
        state.rng.fill_bytes(&mut data);
        let address = Box::into_raw(data) as *mut BYTE;
        trace!("MockPlatform: allocated {} bytes at {:p}", length, address);
        state.allocations.insert(address as usize, (context, length as usize));
        *random = address;
        TSS_SUCCESS
    }

    fn context_free_memory(&self, context: TSS_HCONTEXT, memory: *mut BYTE) -> TSS_RESULT {
        let mut state = self.lock();
        if let Some(error_code) = state.enter(TspiCall::FreeMemory) {
            return error_code;
        }
        if !state.contexts.contains(&context) {
            return TSS_LAYER_TSP | TSS_E_INVALID_HANDLE;
        }
        if memory.is_null() {
            state.release_all(context);
            return TSS_SUCCESS;
        }
        match state.allocations.get(&(memory as usize)).copied() {
            Some((owner, length)) if owner == context => {
                state.allocations.remove(&(memory as usize));
                state.release(memory as usize, length);
                TSS_SUCCESS
            }
            _ => TSS_LAYER_TSP | TSS_E_BAD_PARAMETER,
        }
    }

    fn context_close(&self, context: TSS_HCONTEXT) -> TSS_RESULT {
        let mut state = self.lock();
        if let Some(error_code) = state.enter(TspiCall::Close) {
            return error_code;
        }
        if !state.contexts.remove(&context) {
            return TSS_LAYER_TSP | TSS_E_INVALID_HANDLE;
        }
        state.release_all(context);
        state.connected.remove(&context);
        state.tpm_objects.retain(|_, owner| *owner != context);
        TSS_SUCCESS
    }
}
