/* SPDX-License-Identifier: BSD-3-Clause */
/*******************************************************************************
 * Copyright 2024-2026 Fraunhofer SIT, sponsored by the ELISA research project.
 * All rights reserved.
 ******************************************************************************/

use log::info;
use std::sync::{Mutex, MutexGuard, Once};

/* One-time initialization */
static ENV_LOGGER_INIT: Once = Once::new();

/* The mutex lock */
static MUTEX: Mutex<bool> = Mutex::new(false);

/* Accquire the lock */
macro_rules! accquire_lock {
    ($mutex:ident, $lock:ident) => {
        let mut $lock = $mutex.lock().or_else(|err| Ok::<_, ()>(err.into_inner())).unwrap();
        assert_eq!(*$lock, false);
        *$lock = true;
    };
}

/// Holds the per-process test lock and makes sure that the logger is initialized
pub struct TestConfiguration<'a> {
    uniq_lock: MutexGuard<'a, bool>,
}

impl Default for TestConfiguration<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl TestConfiguration<'_> {
    pub fn new() -> Self {
        accquire_lock!(MUTEX, uniq_lock);
        ENV_LOGGER_INIT.call_once(env_logger::init);
        info!("Test environment is ready.");
        Self { uniq_lock }
    }
}

impl Drop for TestConfiguration<'_> {
    fn drop(&mut self) {
        *self.uniq_lock = false;
    }
}
