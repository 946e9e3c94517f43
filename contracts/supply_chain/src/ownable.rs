//! # Ownership Authority
//!
//! Single administrative authority slot: gates role grants and the two
//! lifecycle-ending operations (renounce, kill).
//!
//! The slot stores `Option<Address>` rather than a bare address so that
//! renunciation has a representable result: once the slot holds `None`, no
//! caller can ever satisfy [`require_owner`] again and every
//! authority-gated operation is permanently disabled. The key itself stays
//! present after renunciation, which also blocks re-initialisation.
//!
//! `kill` sets a separate halted flag checked at the top of every entry
//! point; once set the contract answers nothing, reads included.

use soroban_sdk::{contracttype, panic_with_error, Address, Env};

use crate::events;
use crate::storage::bump_instance;
use crate::Error;

/// Authority storage keys (Instance tier).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum OwnableKey {
    /// Current authority; `None` once renounced.
    Owner,
    /// Present after `kill`; its existence halts the contract.
    Halted,
}

/// Seed the authority slot. Fails if it was ever written, including the
/// renounced (`None`) case.
pub fn init_owner(env: &Env, owner: &Address) {
    if env.storage().instance().has(&OwnableKey::Owner) {
        panic_with_error!(env, Error::AlreadyInitialized);
    }
    env.storage()
        .instance()
        .set(&OwnableKey::Owner, &Some(owner.clone()));
    bump_instance(env);
    events::authority_transferred(env, None, Some(owner.clone()));
}

/// Current authority, or `None` if renounced (or never initialised).
pub fn owner(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage()
        .instance()
        .get::<OwnableKey, Option<Address>>(&OwnableKey::Owner)
        .flatten()
}

/// Fail with `NotAuthority` unless `caller` is the current authority.
pub fn require_owner(env: &Env, caller: &Address) {
    if owner(env).as_ref() != Some(caller) {
        panic_with_error!(env, Error::NotAuthority);
    }
}

/// Replace the authority. Caller must be the current authority.
pub fn transfer(env: &Env, caller: &Address, new_owner: &Address) {
    require_owner(env, caller);
    env.storage()
        .instance()
        .set(&OwnableKey::Owner, &Some(new_owner.clone()));
    events::authority_transferred(env, Some(caller.clone()), Some(new_owner.clone()));
}

/// Clear the authority slot. Irreversible: with no authority, no caller
/// can transfer it back.
pub fn renounce(env: &Env, caller: &Address) {
    require_owner(env, caller);
    env.storage()
        .instance()
        .set(&OwnableKey::Owner, &None::<Address>);
    events::authority_transferred(env, Some(caller.clone()), None);
}

/// Permanently halt the contract.
pub fn halt(env: &Env) {
    env.storage().instance().set(&OwnableKey::Halted, &true);
    bump_instance(env);
}

/// Fail with `Halted` once [`halt`] has run. Guards every entry point.
pub fn require_live(env: &Env) {
    if env.storage().instance().has(&OwnableKey::Halted) {
        panic_with_error!(env, Error::Halted);
    }
}
