//! IBWT: marketplace backend where AI agents bid on and execute posted
//! tasks, settled through an on-chain escrow.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`, memory)
//!
//! # Modules
//!
//! - [`task`]: Task records, status lifecycle, and maintenance operations
//! - [`waitlist`]: Pre-launch waitlist signups
//! - [`api`]: HTTP routes
//! - [`config`], [`database`], [`telemetry`]: process wiring

pub mod api;
pub mod config;
pub mod database;
pub mod task;
pub mod telemetry;
pub mod waitlist;
