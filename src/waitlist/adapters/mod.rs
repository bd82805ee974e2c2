//! Adapter implementations for waitlist persistence.

pub mod memory;
pub mod postgres;
