//! PartDesk Core - Shared domain types and pure logic.
//!
//! This crate provides the types and algorithms used across all PartDesk
//! components:
//! - `server` - Public search/allocation HTTP API
//! - `cli` - Command-line tools for migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows
//! the allocation and response-shaping logic to be tested in isolation.
//!
//! # Modules
//!
//! - [`types`] - Offers, sort keys, and type-safe IDs
//! - [`allocation`] - Greedy multi-supplier quantity allocation
//! - [`response`] - Search response assembly

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod allocation;
pub mod response;
pub mod types;

pub use allocation::{AllocationLine, AllocationResult, allocate};
pub use response::{OfferView, ProductIdentity, SearchResponse, Totals, assemble};
pub use types::*;
