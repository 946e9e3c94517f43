//! # Events
//!
//! Typed payload structs and publish helpers for every notification the
//! contract emits. Topics are `symbol_short!` names; payloads are
//! `#[contracttype]` structs so off-chain consumers can decode them with
//! `try_into_val`.
//!
//! | Topic        | Payload                  | Emitted by                  |
//! |--------------|--------------------------|-----------------------------|
//! | `role_add`   | [`RoleAdded`]            | `grant_role`                |
//! | `role_rem`   | [`RoleRemoved`]          | `renounce_role`             |
//! | `auth_xfer`  | [`AuthorityTransferred`] | init / transfer / renounce  |
//! | `harvested` … `purchased` | [`StateChanged`] | each custody transition |
//!
//! Custody topics carry the product code as a second topic element so
//! indexers can filter per item without decoding payloads.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::rbac::Role;
use crate::types::ItemState;

/// Payload for `role_add`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleAdded {
    pub account: Address,
    pub role: Role,
}

/// Payload for `role_rem`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleRemoved {
    pub account: Address,
    pub role: Role,
}

/// Payload for `auth_xfer`. `None` stands for the cleared slot: the
/// bootstrap transfer has `old = None`, renunciation has `new = None`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorityTransferred {
    pub old: Option<Address>,
    pub new: Option<Address>,
}

/// Payload shared by all eight custody transition events; the topic names
/// the transition, the payload carries the code and the state reached.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StateChanged {
    pub upc: u64,
    pub state: ItemState,
}

pub fn role_added(env: &Env, role: Role, account: &Address) {
    env.events().publish(
        (symbol_short!("role_add"), role),
        RoleAdded {
            account: account.clone(),
            role,
        },
    );
}

pub fn role_removed(env: &Env, role: Role, account: &Address) {
    env.events().publish(
        (symbol_short!("role_rem"), role),
        RoleRemoved {
            account: account.clone(),
            role,
        },
    );
}

pub fn authority_transferred(env: &Env, old: Option<Address>, new: Option<Address>) {
    env.events()
        .publish((symbol_short!("auth_xfer"),), AuthorityTransferred { old, new });
}

/// Topic symbol for the event announcing arrival in `state`.
pub fn state_topic(state: ItemState) -> Symbol {
    match state {
        ItemState::None => symbol_short!("none"),
        ItemState::Harvested => symbol_short!("harvested"),
        ItemState::Processed => symbol_short!("processed"),
        ItemState::Packed => symbol_short!("packed"),
        ItemState::ForSale => symbol_short!("forsale"),
        ItemState::Sold => symbol_short!("sold"),
        ItemState::Shipped => symbol_short!("shipped"),
        ItemState::Received => symbol_short!("received"),
        ItemState::Purchased => symbol_short!("purchased"),
    }
}

/// Publish the custody transition event for an item that just reached
/// `state`.
pub fn state_changed(env: &Env, upc: u64, state: ItemState) {
    env.events()
        .publish((state_topic(state), upc), StateChanged { upc, state });
}
