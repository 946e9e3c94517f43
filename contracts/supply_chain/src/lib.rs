//! # Supply Chain Contract
//!
//! This is the root crate of the **coffee supply chain** tracker. It exposes
//! the single Soroban contract `SupplyChain` whose entry points cover the
//! full custody chain of an item, farmer to consumer:
//!
//! | Phase       | Entry Point(s)                                        |
//! |-------------|-------------------------------------------------------|
//! | Bootstrap   | [`SupplyChain::init`]                                 |
//! | Role admin  | `grant_role`, `renounce_role`, `has_role`             |
//! | Authority   | `owner`, `transfer_ownership`, `renounce_ownership`, `kill` |
//! | Farm stages | `harvest_item`, `process_item`, `pack_item`, `sell_item` |
//! | Trade stages| `buy_item`, `ship_item`, `receive_item`, `purchase_item` |
//! | Audit       | `record_history`, `get_item_history`                  |
//! | Queries     | `get_item`                                            |
//!
//! ## Architecture
//!
//! Role membership is fully delegated to [`rbac`], the authority slot and
//! the halt flag to [`ownable`], storage access to [`storage`]. This file
//! contains only the public entry points, the shared transition guard and
//! the settlement routine.
//!
//! Every custody transition runs the same three-way check in a fixed
//! order: required role, required prior state, then (where the operation
//! demands it) the custodian check. Each failure uses its own error
//! variant, so "wrong role", "wrong stage" and "right role, wrong actor"
//! are distinguishable by callers.
//!
//! Payments are settled in the token configured at `init`: `buy_item` and
//! `purchase_item` pull the declared payment from the payer, forward
//! exactly the agreed price to the pre-transition owner and return the
//! excess as change. A failing transfer panics, and the host rolls back
//! the whole invocation, so no partial transition or partial settlement is
//! ever observable.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env, String, Vec,
};

mod events;
mod ownable;
mod storage;
mod types;
pub mod rbac;


use storage::{
    get_history, has_item, load_item, load_item_status, next_sku, push_history, save_item_status,
    save_new_item, set_payment_token,
};
use types::{ItemConfig, ItemStatus};

pub use rbac::Role;
pub use types::{Item, ItemState};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    /// Caller is not the administrative authority.
    NotAuthority = 2,
    /// Caller lacks the role the operation requires.
    MissingRole = 3,
    /// Caller holds the right role but is not the item's custodian.
    NotCustodian = 4,
    /// Zero product code, empty reference, or non-positive price.
    InvalidArgument = 5,
    /// Declared payment does not cover the price.
    InsufficientPayment = 6,
    /// The contract was killed; nothing answers anymore.
    Halted = 7,
    /// History operation on a product code that was never harvested.
    ItemNotFound = 8,
    // State machine: each variant names the state the operation requires.
    MustBeNone = 9,
    MustBeHarvested = 10,
    MustBeProcessed = 11,
    MustBePacked = 12,
    MustBeForSale = 13,
    MustBeSold = 14,
    MustBeShipped = 15,
    MustBeReceived = 16,
}

/// The error raised when an operation requiring `required` finds the item
/// in any other state.
fn required_state_error(required: ItemState) -> Error {
    match required {
        ItemState::None => Error::MustBeNone,
        ItemState::Harvested => Error::MustBeHarvested,
        ItemState::Processed => Error::MustBeProcessed,
        ItemState::Packed => Error::MustBePacked,
        ItemState::ForSale => Error::MustBeForSale,
        ItemState::Sold => Error::MustBeSold,
        ItemState::Shipped => Error::MustBeShipped,
        ItemState::Received => Error::MustBeReceived,
        // Purchased is terminal; no transition requires it.
        ItemState::Purchased => Error::ItemNotFound,
    }
}

/// The shared transition guard: role, then prior state, then custodian.
///
/// Returns the loaded status so the caller mutates exactly what was
/// checked. An absent item fails the state check (its virtual state is
/// `None`), which keeps the error order of the guards stable whether or
/// not the item exists.
fn authorize_transition(
    env: &Env,
    caller: &Address,
    role: Role,
    upc: u64,
    required: ItemState,
    check_custody: bool,
) -> ItemStatus {
    rbac::require_role(env, caller, role);
    if !has_item(env, upc) {
        panic_with_error!(env, required_state_error(required));
    }
    let status = load_item_status(env, upc);
    if status.state != required {
        panic_with_error!(env, required_state_error(required));
    }
    if check_custody {
        rbac::require_custodian(env, caller, &status.owner);
    }
    status
}

/// Settle a paid transition: pull `payment` from the payer, forward
/// exactly `price` to the recipient and return the excess as change.
///
/// The under-payment check runs before any transfer; a token failure at
/// any step panics and the host reverts the invocation, so settlement is
/// all-or-nothing with the state change it accompanies.
fn settle(env: &Env, payer: &Address, recipient: &Address, price: i128, payment: i128) {
    if payment < price {
        panic_with_error!(env, Error::InsufficientPayment);
    }
    let client = token::Client::new(env, &storage::get_payment_token(env));
    client.transfer(payer, &env.current_contract_address(), &payment);
    client.transfer(&env.current_contract_address(), recipient, &price);
    let change = payment - price;
    if change > 0 {
        client.transfer(&env.current_contract_address(), payer, &change);
    }
}

#[contract]
pub struct SupplyChain;

#[contractimpl]
impl SupplyChain {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract: set the authority and the settlement token.
    ///
    /// Must be called exactly once immediately after deployment.
    /// Subsequent calls fail with `Error::AlreadyInitialized`.
    pub fn init(env: Env, owner: Address, payment_token: Address) {
        owner.require_auth();
        ownable::init_owner(&env, &owner);
        set_payment_token(&env, &payment_token);
    }

    // ─────────────────────────────────────────────────────────
    // Authority
    // ─────────────────────────────────────────────────────────

    /// Current authority, or `None` once renounced.
    pub fn owner(env: Env) -> Option<Address> {
        ownable::require_live(&env);
        ownable::owner(&env)
    }

    /// Transfer the authority to `new_owner`. Authority only.
    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) {
        caller.require_auth();
        ownable::require_live(&env);
        ownable::transfer(&env, &caller, &new_owner);
    }

    /// Clear the authority slot forever. Authority only. Afterwards every
    /// authority-gated operation fails for every caller.
    pub fn renounce_ownership(env: Env, caller: Address) {
        caller.require_auth();
        ownable::require_live(&env);
        ownable::renounce(&env, &caller);
    }

    /// Permanently halt the contract. For the authority this disables all
    /// further operations, reads included; for anyone else it is a silent
    /// no-op.
    pub fn kill(env: Env, caller: Address) {
        caller.require_auth();
        ownable::require_live(&env);
        if ownable::owner(&env).as_ref() == Some(&caller) {
            ownable::halt(&env);
        }
    }

    // ─────────────────────────────────────────────────────────
    // Role management
    // ─────────────────────────────────────────────────────────

    /// Grant `role` to `account`. Authority only; idempotent.
    pub fn grant_role(env: Env, caller: Address, account: Address, role: Role) {
        caller.require_auth();
        ownable::require_live(&env);
        ownable::require_owner(&env, &caller);
        rbac::grant(&env, &account, role);
    }

    /// Renounce the caller's own membership in `role`. No-op if not held;
    /// there is no way to revoke someone else's role.
    pub fn renounce_role(env: Env, caller: Address, role: Role) {
        caller.require_auth();
        ownable::require_live(&env);
        rbac::renounce(&env, &caller, role);
    }

    /// Return `true` if `account` holds `role`.
    pub fn has_role(env: Env, account: Address, role: Role) -> bool {
        ownable::require_live(&env);
        rbac::has_role(&env, &account, role)
    }

    // ─────────────────────────────────────────────────────────
    // Farm stages
    // ─────────────────────────────────────────────────────────

    /// Create an item in the `Harvested` state.
    ///
    /// `origin_farmer` must sign, hold the Farmer role, and becomes both
    /// the provenance record's farmer and the initial custodian. The
    /// product code must be non-zero and never used before.
    pub fn harvest_item(
        env: Env,
        upc: u64,
        origin_farmer: Address,
        origin_farm_name: String,
        origin_farm_info: String,
        origin_farm_latitude: String,
        origin_farm_longitude: String,
        notes: String,
    ) {
        origin_farmer.require_auth();
        ownable::require_live(&env);
        rbac::require_role(&env, &origin_farmer, Role::Farmer);
        if upc == 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }
        if has_item(&env, upc) {
            panic_with_error!(&env, Error::MustBeNone);
        }

        let sku = next_sku(&env);
        let config = ItemConfig {
            sku,
            upc,
            product_id: sku + upc,
            origin_farmer: origin_farmer.clone(),
            origin_farm_name,
            origin_farm_info,
            origin_farm_latitude,
            origin_farm_longitude,
            notes,
        };
        let status = ItemStatus {
            owner: origin_farmer,
            state: ItemState::Harvested,
            price: 0,
            retail_price: 0,
            distributor: None,
            retailer: None,
            consumer: None,
        };
        save_new_item(&env, &config, &status);
        events::state_changed(&env, upc, ItemState::Harvested);
    }

    /// Advance a harvested item to `Processed`. Farmer and custodian only.
    pub fn process_item(env: Env, caller: Address, upc: u64) {
        caller.require_auth();
        ownable::require_live(&env);
        let mut status =
            authorize_transition(&env, &caller, Role::Farmer, upc, ItemState::Harvested, true);
        status.state = ItemState::Processed;
        save_item_status(&env, upc, &status);
        events::state_changed(&env, upc, ItemState::Processed);
    }

    /// Advance a processed item to `Packed`. Farmer and custodian only.
    pub fn pack_item(env: Env, caller: Address, upc: u64) {
        caller.require_auth();
        ownable::require_live(&env);
        let mut status =
            authorize_transition(&env, &caller, Role::Farmer, upc, ItemState::Processed, true);
        status.state = ItemState::Packed;
        save_item_status(&env, upc, &status);
        events::state_changed(&env, upc, ItemState::Packed);
    }

    /// Offer a packed item for sale at `price`. Farmer and custodian only;
    /// the price must be strictly positive and is immutable afterwards.
    pub fn sell_item(env: Env, caller: Address, upc: u64, price: i128) {
        caller.require_auth();
        ownable::require_live(&env);
        let mut status =
            authorize_transition(&env, &caller, Role::Farmer, upc, ItemState::Packed, true);
        if price <= 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }
        status.price = price;
        status.state = ItemState::ForSale;
        save_item_status(&env, upc, &status);
        events::state_changed(&env, upc, ItemState::ForSale);
    }

    // ─────────────────────────────────────────────────────────
    // Trade stages
    // ─────────────────────────────────────────────────────────

    /// Buy an item offered for sale. Distributor role; `payment` must
    /// cover the price. The price goes to the farmer, the excess comes
    /// back as change, and the buyer takes custody.
    pub fn buy_item(env: Env, buyer: Address, upc: u64, payment: i128) {
        buyer.require_auth();
        ownable::require_live(&env);
        let mut status =
            authorize_transition(&env, &buyer, Role::Distributor, upc, ItemState::ForSale, false);

        // Settle against the pre-transition owner (the farmer).
        settle(&env, &buyer, &status.owner, status.price, payment);

        status.owner = buyer.clone();
        status.distributor = Some(buyer);
        status.state = ItemState::Sold;
        save_item_status(&env, upc, &status);
        events::state_changed(&env, upc, ItemState::Sold);
    }

    /// Ship a sold item. Distributor and custodian only.
    pub fn ship_item(env: Env, caller: Address, upc: u64) {
        caller.require_auth();
        ownable::require_live(&env);
        let mut status =
            authorize_transition(&env, &caller, Role::Distributor, upc, ItemState::Sold, true);
        status.state = ItemState::Shipped;
        save_item_status(&env, upc, &status);
        events::state_changed(&env, upc, ItemState::Shipped);
    }

    /// Mark a shipped item received. Retailer role; fixes the retail price
    /// at 120% of the sale price and hands custody to the retailer.
    pub fn receive_item(env: Env, retailer: Address, upc: u64) {
        retailer.require_auth();
        ownable::require_live(&env);
        let mut status =
            authorize_transition(&env, &retailer, Role::Retailer, upc, ItemState::Shipped, false);

        status.retail_price = status.price * 12 / 10;
        status.owner = retailer.clone();
        status.retailer = Some(retailer);
        status.state = ItemState::Received;
        save_item_status(&env, upc, &status);
        events::state_changed(&env, upc, ItemState::Received);
    }

    /// Purchase a received item. Consumer role; `payment` must cover the
    /// retail price, which goes to the retailer with the excess returned.
    /// Terminal transition: custody ends with the consumer.
    pub fn purchase_item(env: Env, consumer: Address, upc: u64, payment: i128) {
        consumer.require_auth();
        ownable::require_live(&env);
        let mut status =
            authorize_transition(&env, &consumer, Role::Consumer, upc, ItemState::Received, false);

        // Settle against the pre-transition owner (the retailer).
        settle(&env, &consumer, &status.owner, status.retail_price, payment);

        status.owner = consumer.clone();
        status.consumer = Some(consumer);
        status.state = ItemState::Purchased;
        save_item_status(&env, upc, &status);
        events::state_changed(&env, upc, ItemState::Purchased);
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Full item record for any product code, readable by anyone. A code
    /// that was never harvested yields the zero-valued record instead of
    /// an error.
    pub fn get_item(env: Env, upc: u64) -> Item {
        ownable::require_live(&env);
        if has_item(&env, upc) {
            load_item(&env, upc)
        } else {
            Item::absent(&env, upc)
        }
    }

    // ─────────────────────────────────────────────────────────
    // Audit history
    // ─────────────────────────────────────────────────────────

    /// Append a transaction reference to an item's audit trail. Only the
    /// item's current custodian may record; references are kept in call
    /// order, never deduplicated.
    pub fn record_history(env: Env, caller: Address, upc: u64, tx_ref: String) {
        caller.require_auth();
        ownable::require_live(&env);
        if upc == 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }
        if tx_ref.len() == 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }
        if !has_item(&env, upc) {
            panic_with_error!(&env, Error::ItemNotFound);
        }
        let status = load_item_status(&env, upc);
        rbac::require_custodian(&env, &caller, &status.owner);
        push_history(&env, upc, &tx_ref);
    }

    /// Ordered transaction references for a product code, readable by
    /// anyone; empty for an unknown item.
    pub fn get_item_history(env: Env, upc: u64) -> Vec<String> {
        ownable::require_live(&env);
        get_history(&env, upc)
    }
}
