//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers used by the supply chain:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key            | Type      | Description                          |
//! |----------------|-----------|--------------------------------------|
//! | `SkuCount`     | `u64`     | Auto-increment stock keeping counter |
//! | `PaymentToken` | `Address` | Settlement token set at `init`       |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key               | Type          | Description                       |
//! |-------------------|---------------|-----------------------------------|
//! | `ItemConfig(upc)` | `ItemConfig`  | Immutable provenance record       |
//! | `ItemStatus(upc)` | `ItemStatus`  | Mutable custody status            |
//! | `History(upc)`    | `Vec<String>` | Append-only transaction log       |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining.
//!
//! ## Why split Config and Status?
//!
//! Every custody transition rewrites the status, but the provenance strings
//! (farm name, location, notes) never change after harvest. Keeping them in
//! a separate write-once entry means the eight transitions each touch only
//! the small status record.

use soroban_sdk::{contracttype, Address, Env, String, Vec};

use crate::types::{Item, ItemConfig, ItemStatus};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// Item and counter storage keys.
///
/// Instance-tier keys (`SkuCount`, `PaymentToken`) live as long as the
/// contract. Persistent-tier keys hold per-item data keyed by product code
/// with independent TTLs. Role and authority keys live in their own modules
/// (`rbac::RbacKey`, `ownable::OwnableKey`).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Global auto-increment stock keeping counter (Instance).
    SkuCount,
    /// Token used for buy/purchase settlement (Instance).
    PaymentToken,
    /// Immutable provenance record keyed by product code (Persistent).
    ItemConfig(u64),
    /// Mutable custody status keyed by product code (Persistent).
    ItemStatus(u64),
    /// Ordered transaction references keyed by product code (Persistent).
    History(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Atomically reads, increments, and stores the stock keeping counter.
/// Returns the sku to use for the *current* item; the first harvest gets 1.
pub fn next_sku(env: &Env) -> u64 {
    bump_instance(env);
    let next: u64 = env
        .storage()
        .instance()
        .get(&DataKey::SkuCount)
        .unwrap_or(0)
        + 1;
    env.storage().instance().set(&DataKey::SkuCount, &next);
    next
}

/// Store the settlement token address in instance storage.
pub fn set_payment_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::PaymentToken, token);
    bump_instance(env);
}

/// Retrieve the settlement token address.
/// Panics if the contract was never initialised.
pub fn get_payment_token(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::PaymentToken)
        .expect("payment token not set")
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// True if a product code has ever been harvested.
pub fn has_item(env: &Env, upc: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::ItemConfig(upc))
}

/// Save both the immutable config and the initial status for a new item.
pub fn save_new_item(env: &Env, config: &ItemConfig, status: &ItemStatus) {
    let config_key = DataKey::ItemConfig(config.upc);
    let status_key = DataKey::ItemStatus(config.upc);
    env.storage().persistent().set(&config_key, config);
    env.storage().persistent().set(&status_key, status);
    bump_persistent(env, &config_key);
    bump_persistent(env, &status_key);
}

/// Load only the immutable provenance record.
/// Panics if the item does not exist; guard with [`has_item`] first.
pub fn load_item_config(env: &Env, upc: u64) -> ItemConfig {
    let key = DataKey::ItemConfig(upc);
    let config: ItemConfig = env
        .storage()
        .persistent()
        .get(&key)
        .expect("item not found");
    bump_persistent(env, &key);
    config
}

/// Load only the mutable custody status.
/// Panics if the item does not exist; guard with [`has_item`] first.
pub fn load_item_status(env: &Env, upc: u64) -> ItemStatus {
    let key = DataKey::ItemStatus(upc);
    let status: ItemStatus = env
        .storage()
        .persistent()
        .get(&key)
        .expect("item not found");
    bump_persistent(env, &key);
    status
}

/// Save only the mutable custody status (the per-transition write).
pub fn save_item_status(env: &Env, upc: u64, status: &ItemStatus) {
    let key = DataKey::ItemStatus(upc);
    env.storage().persistent().set(&key, status);
    bump_persistent(env, &key);
}

/// Load the full `Item` by combining config and status.
/// Panics if the item does not exist; guard with [`has_item`] first.
pub fn load_item(env: &Env, upc: u64) -> Item {
    Item::from_parts(load_item_config(env, upc), load_item_status(env, upc))
}

// ── History Helpers ──────────────────────────────────────────────────

/// Fetch the ordered transaction references for a product code.
/// Returns an empty vector for an unknown item.
pub fn get_history(env: &Env, upc: u64) -> Vec<String> {
    let key = DataKey::History(upc);
    match env.storage().persistent().get(&key) {
        Some(history) => {
            bump_persistent(env, &key);
            history
        }
        None => Vec::new(env),
    }
}

/// Append a transaction reference to an item's history.
/// Never deduplicates, never reorders.
pub fn push_history(env: &Env, upc: u64, tx_ref: &String) {
    let key = DataKey::History(upc);
    let mut history: Vec<String> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or_else(|| Vec::new(env));
    history.push_back(tx_ref.clone());
    env.storage().persistent().set(&key, &history);
    bump_persistent(env, &key);
}
