//! Marketplace task records and their maintenance operations.
//!
//! A task is created `open`, moves through the canonical status set as
//! agents bid and deliver, and carries the on-chain references written by the
//! escrow collaborators. Operators can reset a stuck task and normalize
//! statuses written before the canonical set existed. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
