//! # Role-Based Access Control
//!
//! Maintains the four independent actor allow-lists of the supply chain:
//! Farmer, Distributor, Retailer, Consumer. An address may hold any number
//! of roles at once; holding a role never implies item custody, which is
//! checked separately.
//!
//! Role storage lives in [`RbacKey`] inside this module. Granting is gated
//! by the contract authority (checked in the entry points via
//! [`crate::ownable::require_owner`]); an address may only renounce its own
//! membership.
//!
//! [`require_role`] and [`require_custodian`] fail with distinct error
//! variants so a caller can tell "wrong role" from "right role, wrong
//! actor". The combined transition guard that sequences them around the
//! state check lives in the contract root (`authorize_transition`).

use soroban_sdk::{contracttype, panic_with_error, Address, Env};

use crate::events;
use crate::Error;

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;
/// Role entries: bump by 30 days when below 7 days remaining.
const ROLE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const ROLE_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

/// Supply chain actor roles.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Farmer = 0,
    Distributor = 1,
    Retailer = 2,
    Consumer = 3,
}

/// Role membership storage keys.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum RbacKey {
    /// Presence of this key means `Address` holds `Role`.
    Has(Address, Role),
}

/// Return `true` if `account` holds `role`.
pub fn has_role(env: &Env, account: &Address, role: Role) -> bool {
    env.storage()
        .persistent()
        .has(&RbacKey::Has(account.clone(), role))
}

/// Grant `role` to `account`.
///
/// Idempotent: granting an already-held role succeeds without emitting a
/// second event. Authority gating happens in the entry point.
pub fn grant(env: &Env, account: &Address, role: Role) {
    let key = RbacKey::Has(account.clone(), role);
    if env.storage().persistent().has(&key) {
        return;
    }
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, ROLE_LIFETIME_THRESHOLD, ROLE_BUMP_AMOUNT);
    events::role_added(env, role, account);
}

/// Remove `account`'s own membership in `role`.
///
/// No-op if the role is not held; there is no way to revoke another
/// address's role.
pub fn renounce(env: &Env, account: &Address, role: Role) {
    let key = RbacKey::Has(account.clone(), role);
    if !env.storage().persistent().has(&key) {
        return;
    }
    env.storage().persistent().remove(&key);
    events::role_removed(env, role, account);
}

/// Fail with `MissingRole` unless `account` holds `role`.
pub fn require_role(env: &Env, account: &Address, role: Role) {
    if !has_role(env, account, role) {
        panic_with_error!(env, Error::MissingRole);
    }
}

/// Fail with `NotCustodian` unless `caller` is the item's current owner.
pub fn require_custodian(env: &Env, caller: &Address, owner: &Address) {
    if caller != owner {
        panic_with_error!(env, Error::NotCustodian);
    }
}
