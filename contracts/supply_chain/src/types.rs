//! # Types
//!
//! Shared data structures used across all modules of the supply chain contract.
//!
//! ## Design decisions
//!
//! ### Config / Status split
//!
//! An `Item` is internally stored as two separate ledger entries:
//!
//! - [`ItemConfig`] — written once at harvest; never mutated.
//! - [`ItemStatus`] — written on every custody transition.
//!
//! The public API exposes the reconstructed [`Item`] struct for convenience.
//!
//! ### State as a Finite-State Machine
//!
//! [`ItemState`] enforces a strict forward-only custody chain:
//!
//! ```text
//! None ──► Harvested ──► Processed ──► Packed ──► ForSale
//!                                                    │
//! Purchased ◄── Received ◄── Shipped ◄── Sold ◄──────┘
//! ```
//!
//! Each transition admits exactly one prior state; skipping, re-entry and
//! backward moves are all rejected with the error variant naming the
//! required state.

use soroban_sdk::{contracttype, Address, Env, String};

/// Custody stage of an item. Discriminants follow the chain order, so a
/// later stage always compares greater than an earlier one.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum ItemState {
    /// Product code never used.
    None = 0,
    /// Created by the origin farmer.
    Harvested = 1,
    /// Processed by the origin farmer.
    Processed = 2,
    /// Packed by the origin farmer.
    Packed = 3,
    /// Priced and offered to distributors.
    ForSale = 4,
    /// Bought and paid for by a distributor.
    Sold = 5,
    /// Shipped by the distributor.
    Shipped = 6,
    /// Received by a retailer; retail price fixed here.
    Received = 7,
    /// Terminal: purchased by a consumer.
    Purchased = 8,
}

/// Immutable provenance record, written once at harvest.
///
/// Stored separately from the mutable status so that the eight custody
/// transitions never rewrite the provenance strings.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemConfig {
    /// Stock keeping number, assigned from the global counter.
    pub sku: u64,
    /// Universal product code, caller-supplied, unique and non-zero.
    pub upc: u64,
    /// Derived product identifier (`sku + upc`).
    pub product_id: u64,
    /// The farmer who harvested the item.
    pub origin_farmer: Address,
    pub origin_farm_name: String,
    pub origin_farm_info: String,
    pub origin_farm_latitude: String,
    pub origin_farm_longitude: String,
    /// Free-form product notes.
    pub notes: String,
}

/// Mutable custody status, updated on every transition.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemStatus {
    /// Current custodian.
    pub owner: Address,
    /// Current stage in the chain.
    pub state: ItemState,
    /// Sale price, fixed at the `ForSale` transition; 0 before.
    pub price: i128,
    /// Retail price (`price * 12 / 10`), fixed at `Received`; 0 before.
    pub retail_price: i128,
    /// Stage slots, populated when the stage is reached, never cleared.
    pub distributor: Option<Address>,
    pub retailer: Option<Address>,
    pub consumer: Option<Address>,
}

/// Full public representation of an item.
///
/// Reconstructed from the split `ItemConfig` + `ItemStatus` entries. For a
/// product code that was never harvested, queries return the zero-valued
/// record produced by [`Item::absent`] instead of failing.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Item {
    pub sku: u64,
    pub upc: u64,
    pub product_id: u64,
    /// Current custodian; `None` only for an absent item.
    pub owner: Option<Address>,
    /// Origin farmer; `None` only for an absent item.
    pub origin_farmer: Option<Address>,
    pub origin_farm_name: String,
    pub origin_farm_info: String,
    pub origin_farm_latitude: String,
    pub origin_farm_longitude: String,
    pub notes: String,
    pub price: i128,
    pub retail_price: i128,
    pub state: ItemState,
    pub distributor: Option<Address>,
    pub retailer: Option<Address>,
    pub consumer: Option<Address>,
}

impl Item {
    /// Combine the stored config and status entries.
    pub fn from_parts(config: ItemConfig, status: ItemStatus) -> Self {
        Item {
            sku: config.sku,
            upc: config.upc,
            product_id: config.product_id,
            owner: Some(status.owner),
            origin_farmer: Some(config.origin_farmer),
            origin_farm_name: config.origin_farm_name,
            origin_farm_info: config.origin_farm_info,
            origin_farm_latitude: config.origin_farm_latitude,
            origin_farm_longitude: config.origin_farm_longitude,
            notes: config.notes,
            price: status.price,
            retail_price: status.retail_price,
            state: status.state,
            distributor: status.distributor,
            retailer: status.retailer,
            consumer: status.consumer,
        }
    }

    /// Zero-valued record for a product code that was never harvested.
    pub fn absent(env: &Env, upc: u64) -> Self {
        Item {
            sku: 0,
            upc,
            product_id: 0,
            owner: None,
            origin_farmer: None,
            origin_farm_name: String::from_str(env, ""),
            origin_farm_info: String::from_str(env, ""),
            origin_farm_latitude: String::from_str(env, ""),
            origin_farm_longitude: String::from_str(env, ""),
            notes: String::from_str(env, ""),
            price: 0,
            retail_price: 0,
            state: ItemState::None,
            distributor: None,
            retailer: None,
            consumer: None,
        }
    }
}
