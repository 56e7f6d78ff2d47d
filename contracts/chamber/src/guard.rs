//! Reentrancy guard for Chamber-level mutating entry points.
//!
//! A dedicated mutable flag, released on drop so every early-return path
//! (including `?` propagation) clears it without duplicating the release
//! call at each exit.

use soroban_sdk::Env;

use crate::errors::ChamberError;
use crate::storage;

pub struct ReentrancyGuard {
    env: Env,
}

impl ReentrancyGuard {
    pub fn enter(env: &Env) -> Result<Self, ChamberError> {
        if storage::is_reentrant_locked(env) {
            return Err(ChamberError::ReentrantCall);
        }
        storage::set_reentrant_locked(env, true);
        Ok(Self { env: env.clone() })
    }
}

impl Drop for ReentrancyGuard {
    fn drop(&mut self) {
        storage::set_reentrant_locked(&self.env, false);
    }
}
