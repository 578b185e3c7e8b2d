//! Core types for PartDesk.
//!
//! This module provides the domain vocabulary shared by the search
//! dispatcher, the allocation engine, and the response assembler.

pub mod id;
pub mod offer;
pub mod sort;

pub use id::ProductId;
pub use offer::Offer;
pub use sort::SortKey;
